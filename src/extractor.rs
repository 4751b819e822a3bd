//! The structured-entity extractor component.
//!
//! ```text
//! message.text ──▶ number ─ ordinal ─ ... ─ email     (battery, fixed order)
//!                      │        │              │
//!                      └────────┴── flatten ───┘
//!                                     │
//!                        EntityRecord per ModelResult ──▶ message.entities (+=)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::api::{RecognizerKind, RecognizerSuite, RuleRecognizers};
use crate::error::{ComponentError, RecognizerError};
use crate::model::{Culture, ModelResult, Resolution};
use crate::pipeline::{ComponentConfig, ComponentRecipe, ExecutionContext, GraphComponent, Message};

/// Value of the `extractor` field of every record this component writes.
pub const EXTRACTOR_NAME: &str = "text_recognizer";

const ENTITIES: &str = "entities";
const CONFIDENCE: &str = "1.0";

/// An entity in the host's flat output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub value: String,
    pub confidence: String,
    pub entity: String,
    pub extractor: String,
}

impl EntityRecord {
    pub fn new(value: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            confidence: CONFIDENCE.to_string(),
            entity: entity.into(),
            extractor: EXTRACTOR_NAME.to_string(),
        }
    }

    /// Flatten one recognizer result.
    ///
    /// Direct values keep the recognizer's type name. Candidate lists report
    /// the type and value of their last candidate, whatever the number of
    /// readings.
    pub fn from_result(result: &ModelResult) -> Result<Self, ComponentError> {
        match &result.resolution {
            Resolution::Value(resolution) => Ok(Self::new(resolution.value.clone(), result.type_name.clone())),
            Resolution::Values { values } => {
                let last = values
                    .last()
                    .ok_or_else(|| ComponentError::EmptyResolution { type_name: result.type_name.clone() })?;
                Ok(Self::new(last.value.render(), last.kind.clone()))
            }
        }
    }
}

/// Runs every recognizer of [`RecognizerKind::BATTERY`] over each message
/// and appends the results to its `entities`.
#[derive(Debug, Clone)]
pub struct TextRecognizer<R = RuleRecognizers> {
    component_config: ComponentConfig,
    suite: R,
}

impl TextRecognizer {
    pub fn new(config: ComponentConfig) -> Self {
        Self::with_suite(config, RuleRecognizers::default())
    }
}

impl<R: RecognizerSuite> TextRecognizer<R> {
    pub fn with_suite(config: ComponentConfig, suite: R) -> Self {
        Self { component_config: config, suite }
    }

    pub fn component_config(&self) -> &ComponentConfig {
        &self.component_config
    }

    /// One result list per recognizer, in battery order.
    pub fn parse_all(&self, text: &str) -> Result<Vec<Vec<ModelResult>>, RecognizerError> {
        RecognizerKind::BATTERY.iter().map(|&kind| self.suite.recognize(kind, text, &Culture::ENGLISH)).collect()
    }

    pub fn extract(&self, text: &str) -> Result<Vec<EntityRecord>, ComponentError> {
        self.parse_all(text)?.iter().flatten().map(EntityRecord::from_result).collect()
    }

    fn process_message(&self, message: &mut Message) -> Result<(), ComponentError> {
        let text = message.text().ok_or(ComponentError::MissingText)?;
        let records = self.extract(text)?;

        let mut entities = match message.get(ENTITIES) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(existing)) => existing.clone(),
            Some(_) => return Err(ComponentError::InvalidEntities),
        };
        debug!(
            target: "text_recognizer::extractor",
            existing = entities.len(),
            found = records.len(),
            "entities"
        );
        for record in &records {
            entities.push(serde_json::to_value(record)?);
        }
        message.set(ENTITIES, Value::Array(entities), true);
        Ok(())
    }
}

impl<R: RecognizerSuite> GraphComponent for TextRecognizer<R> {
    fn process(&self, mut messages: Vec<Message>) -> Result<Vec<Message>, ComponentError> {
        for message in &mut messages {
            self.process_message(message)?;
        }
        Ok(messages)
    }
}

impl ComponentRecipe for TextRecognizer {
    const NAME: &'static str = "TextRecognizer";

    fn get_default_config() -> ComponentConfig {
        ComponentConfig::new()
    }

    fn create(config: ComponentConfig, context: &ExecutionContext) -> Result<Self, ComponentError> {
        info!(
            target: "text_recognizer::extractor",
            node = context.node_name.as_str(),
            options = config.len(),
            "create"
        );
        Ok(Self::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Candidate, CandidateValue, ValueResolution};

    fn result(type_name: &str, resolution: Resolution) -> ModelResult {
        ModelResult { text: String::new(), start: 0, end: 0, type_name: type_name.to_string(), resolution }
    }

    fn point(kind: &str, value: &str) -> Candidate {
        Candidate { timex: None, kind: kind.to_string(), value: CandidateValue::Point { value: value.to_string() } }
    }

    #[test]
    fn direct_values_use_the_recognizer_type() {
        let record = EntityRecord::from_result(&result(
            "currency",
            Resolution::Value(ValueResolution {
                value: "75300000".into(),
                unit: Some("Dollar".into()),
                iso_currency: Some("USD".into()),
                ..ValueResolution::default()
            }),
        ))
        .unwrap();
        assert_eq!(record, EntityRecord::new("75300000", "currency"));
        assert_eq!(record.confidence, "1.0");
        assert_eq!(record.extractor, "text_recognizer");
    }

    #[test]
    fn candidate_lists_use_the_last_candidate() {
        let values = vec![point("date", "2013-02-08"), point("datetime", "2013-02-15 17:00:00")];
        let record = EntityRecord::from_result(&result("datetimeV2.date", Resolution::Values { values })).unwrap();
        assert_eq!(record, EntityRecord::new("2013-02-15 17:00:00", "datetime"));
    }

    #[test]
    fn ranges_are_rendered_as_intervals() {
        let values = vec![Candidate {
            timex: None,
            kind: "timerange".into(),
            value: CandidateValue::Range { start: Some("14:00:00".into()), end: Some("16:00:00".into()) },
        }];
        let record =
            EntityRecord::from_result(&result("datetimeV2.timerange", Resolution::Values { values })).unwrap();
        assert_eq!(record.value, "14:00:00/16:00:00");
    }

    #[test]
    fn empty_candidate_lists_are_errors() {
        let err = EntityRecord::from_result(&result("datetimeV2.date", Resolution::Values { values: vec![] }))
            .unwrap_err();
        assert!(matches!(err, ComponentError::EmptyResolution { type_name } if type_name == "datetimeV2.date"));
    }

    #[test]
    fn records_serialize_flat() {
        let json = serde_json::to_value(EntityRecord::new("2", "number")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"value": "2", "confidence": "1.0", "entity": "number", "extractor": "text_recognizer"})
        );
    }
}
