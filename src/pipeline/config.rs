use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::ComponentConfig;
use crate::error::ConfigError;

fn default_language() -> String {
    "en".to_string()
}

/// A host pipeline file.
///
/// ```yaml
/// language: en
/// pipeline:
///   - name: WhitespaceTokenizer
///   - name: TextRecognizer
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub pipeline: Vec<ComponentSpec>,
}

/// One pipeline entry: the component name plus its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    #[serde(flatten)]
    pub config: ComponentConfig,
}

impl PipelineConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_yaml_str(&contents)
    }

    /// First entry named `name`.
    pub fn component(&self, name: &str) -> Result<&ComponentSpec, ConfigError> {
        self.pipeline.iter().find(|c| c.name == name).ok_or_else(|| ConfigError::MissingComponent(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PIPELINE: &str = r#"
language: en
pipeline:
  - name: WhitespaceTokenizer
  - name: TextRecognizer
    note: structured entities
  - name: DIETClassifier
    epochs: 100
"#;

    #[test]
    fn entries_keep_their_options() {
        let config = PipelineConfig::from_yaml_str(PIPELINE).unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.pipeline.len(), 3);

        let recognizer = config.component("TextRecognizer").unwrap();
        assert_eq!(recognizer.config.get("note"), Some(&json!("structured entities")));
        assert_eq!(config.component("DIETClassifier").unwrap().config.get("epochs"), Some(&json!(100)));
        assert!(config.component("WhitespaceTokenizer").unwrap().config.is_empty());
    }

    #[test]
    fn missing_component_is_an_error() {
        let config = PipelineConfig::from_yaml_str("pipeline: []").unwrap();
        assert_eq!(config.language, "en");
        assert!(matches!(config.component("TextRecognizer"), Err(ConfigError::MissingComponent(_))));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(PipelineConfig::from_yaml_str("pipeline: {name"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn unreadable_file_reports_its_path() {
        let err = PipelineConfig::load_from_file("/nonexistent/pipeline.yml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pipeline.yml"));
    }
}
