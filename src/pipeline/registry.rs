use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use super::{ComponentConfig, ComponentRecipe, ComponentType, ExecutionContext, GraphComponent};
use crate::error::{ComponentError, RegistryError};
use crate::extractor::TextRecognizer;

type Factory = fn(ComponentConfig, &ExecutionContext) -> Result<Box<dyn GraphComponent>, ComponentError>;

fn build<T: ComponentRecipe>(
    config: ComponentConfig,
    context: &ExecutionContext,
) -> Result<Box<dyn GraphComponent>, ComponentError> {
    Ok(Box::new(T::create(config, context)?))
}

/// Registration record of one component.
#[derive(Clone)]
pub struct RegisteredComponent {
    pub name: &'static str,
    pub component_type: ComponentType,
    pub is_trainable: bool,
    default_config: fn() -> ComponentConfig,
    factory: Factory,
}

impl RegisteredComponent {
    pub fn default_config(&self) -> ComponentConfig {
        (self.default_config)()
    }
}

impl fmt::Debug for RegisteredComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredComponent")
            .field("name", &self.name)
            .field("component_type", &self.component_type)
            .field("is_trainable", &self.is_trainable)
            .finish()
    }
}

/// Name-indexed table of components a host can instantiate.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<&'static str, RegisteredComponent>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every component this crate ships.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert::<TextRecognizer>(ComponentType::EntityExtractor, false);
        registry
    }

    pub fn register<T: ComponentRecipe>(
        &mut self,
        component_type: ComponentType,
        is_trainable: bool,
    ) -> Result<(), RegistryError> {
        if self.components.contains_key(T::NAME) {
            return Err(RegistryError::DuplicateComponent(T::NAME.to_string()));
        }
        self.insert::<T>(component_type, is_trainable);
        Ok(())
    }

    fn insert<T: ComponentRecipe>(&mut self, component_type: ComponentType, is_trainable: bool) {
        debug!(target: "text_recognizer::pipeline", name = T::NAME, ?component_type, is_trainable, "register");
        self.components.insert(
            T::NAME,
            RegisteredComponent {
                name: T::NAME,
                component_type,
                is_trainable,
                default_config: T::get_default_config,
                factory: build::<T>,
            },
        );
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredComponent> {
        self.components.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.components.keys().copied().collect()
    }

    /// Instantiate `name`, with `config` layered over its default config.
    pub fn create(
        &self,
        name: &str,
        config: ComponentConfig,
        context: &ExecutionContext,
    ) -> Result<Box<dyn GraphComponent>, RegistryError> {
        let entry = self.lookup(name).ok_or_else(|| RegistryError::UnknownComponent(name.to_string()))?;
        let mut merged = entry.default_config();
        merged.extend(config);
        (entry.factory)(merged, context).map_err(|source| RegistryError::Create { name: name.to_string(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Message;
    use serde_json::{Value, json};

    /// Echoes its merged config into every message.
    struct ConfigEcho {
        config: ComponentConfig,
    }

    impl GraphComponent for ConfigEcho {
        fn process(&self, mut messages: Vec<Message>) -> Result<Vec<Message>, ComponentError> {
            for message in &mut messages {
                message.set("config", Value::Object(self.config.clone()), false);
            }
            Ok(messages)
        }
    }

    impl ComponentRecipe for ConfigEcho {
        const NAME: &'static str = "ConfigEcho";

        fn get_default_config() -> ComponentConfig {
            json!({"threshold": 0.5, "case_sensitive": false}).as_object().cloned().unwrap()
        }

        fn create(config: ComponentConfig, _context: &ExecutionContext) -> Result<Self, ComponentError> {
            Ok(Self { config })
        }
    }

    #[test]
    fn builtins_include_the_text_recognizer() {
        let registry = ComponentRegistry::with_builtins();
        assert_eq!(registry.names(), vec!["TextRecognizer"]);
        let entry = registry.lookup("TextRecognizer").unwrap();
        assert_eq!(entry.component_type, ComponentType::EntityExtractor);
        assert!(!entry.is_trainable);
        assert!(entry.default_config().is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = ComponentRegistry::new();
        registry.register::<ConfigEcho>(ComponentType::IntentClassifier, true).unwrap();
        let err = registry.register::<ConfigEcho>(ComponentType::IntentClassifier, true).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateComponent(name) if name == "ConfigEcho"));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let registry = ComponentRegistry::with_builtins();
        let err = registry.create("SpacyEntityExtractor", ComponentConfig::new(), &ExecutionContext::default());
        assert!(matches!(err, Err(RegistryError::UnknownComponent(name)) if name == "SpacyEntityExtractor"));
    }

    #[test]
    fn user_config_overrides_defaults() {
        let mut registry = ComponentRegistry::new();
        registry.register::<ConfigEcho>(ComponentType::IntentClassifier, true).unwrap();

        let user = json!({"threshold": 0.9, "epochs": 3}).as_object().cloned().unwrap();
        let component = registry.create("ConfigEcho", user, &ExecutionContext::for_node("ConfigEcho_0")).unwrap();
        let out = component.process(vec![Message::from_text("hi")]).unwrap();

        assert_eq!(out[0].get("config"), Some(&json!({"threshold": 0.9, "case_sensitive": false, "epochs": 3})));
    }
}
