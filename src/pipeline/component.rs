use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Message;
use crate::error::ComponentError;

/// Duck-typed component options, as found under a pipeline entry.
pub type ComponentConfig = Map<String, Value>;

/// Role a component plays in the host pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    MessageTokenizer,
    MessageFeaturizer,
    IntentClassifier,
    EntityExtractor,
    PolicyWithoutEndToEndSupport,
    PolicyWithEndToEndSupport,
}

/// Information about the graph run a component is created for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Name of the graph node, usually the component name plus an index.
    pub node_name: String,
    pub model_id: Option<String>,
    pub is_finetuning: bool,
}

impl ExecutionContext {
    pub fn for_node(node_name: impl Into<String>) -> Self {
        Self { node_name: node_name.into(), ..Self::default() }
    }
}

/// A component that transforms messages in place.
pub trait GraphComponent: Send + Sync {
    fn process(&self, messages: Vec<Message>) -> Result<Vec<Message>, ComponentError>;
}

/// Construction side of a component: its registered name, default options
/// and factory.
pub trait ComponentRecipe: GraphComponent + Sized + 'static {
    const NAME: &'static str;

    fn get_default_config() -> ComponentConfig;

    fn create(config: ComponentConfig, context: &ExecutionContext) -> Result<Self, ComponentError>;
}
