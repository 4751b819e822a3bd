//! Host side of the plugin contract.
//!
//! A host pipeline owns [`Message`]s and drives [`GraphComponent`]s over
//! them. Components describe themselves through [`ComponentRecipe`] and are
//! instantiated by name from a [`ComponentRegistry`], usually following the
//! order of a [`PipelineConfig`] file.

mod component;
mod config;
mod message;
mod registry;

pub use component::{ComponentConfig, ComponentRecipe, ComponentType, ExecutionContext, GraphComponent};
pub use config::{ComponentSpec, PipelineConfig};
pub use message::Message;
pub use registry::{ComponentRegistry, RegisteredComponent};
