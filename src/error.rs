use thiserror::Error;

/// Failures raised by the recognition library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognizerError {
    #[error("no recognizer grammar available for culture '{0}'")]
    UnsupportedCulture(String),

    #[error("invalid culture code '{0}'")]
    InvalidCulture(String),
}

/// Failures raised while a component processes messages.
///
/// None of these are handled inside the component; they surface to the host.
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error(transparent)]
    Recognizer(#[from] RecognizerError),

    #[error("message has no text to recognize")]
    MissingText,

    #[error("recognizer result of type '{type_name}' has an empty candidate list")]
    EmptyResolution { type_name: String },

    #[error("message field 'entities' is not a list")]
    InvalidEntities,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures raised by the component registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("component '{0}' is already registered")]
    DuplicateComponent(String),

    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    #[error("failed to create component '{name}': {source}")]
    Create {
        name: String,
        #[source]
        source: ComponentError,
    },
}

/// Failures raised while loading pipeline configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pipeline config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("pipeline config has no component named '{0}'")]
    MissingComponent(String),
}
