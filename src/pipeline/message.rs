use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Key under which the user utterance is stored.
pub const TEXT: &str = "text";

/// A unit of data flowing through the pipeline.
///
/// Components read and write arbitrary keys; keys written with
/// `add_to_output` are reported back to the host as part of the parse
/// result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    data: Map<String, Value>,
    #[serde(default)]
    output_properties: BTreeSet<String>,
}

impl Message {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data, output_properties: BTreeSet::new() }
    }

    /// Message carrying only a user utterance.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut message = Self::default();
        message.set(TEXT, Value::String(text.into()), true);
        message
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value, add_to_output: bool) {
        let key = key.into();
        if add_to_output {
            self.output_properties.insert(key.clone());
        }
        self.data.insert(key, value);
    }

    /// The utterance, if the message has a string `text` field.
    pub fn text(&self) -> Option<&str> {
        self.get(TEXT).and_then(Value::as_str)
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn output_properties(&self) -> &BTreeSet<String> {
        &self.output_properties
    }

    /// Only the fields marked as output.
    pub fn as_output(&self) -> Map<String, Value> {
        self.data
            .iter()
            .filter(|(k, _)| self.output_properties.contains(*k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_tracks_output_properties() {
        let mut message = Message::from_text("hi");
        message.set("intent", json!("greet"), false);
        message.set("entities", json!([]), true);

        assert_eq!(message.text(), Some("hi"));
        assert_eq!(message.output_properties().iter().collect::<Vec<_>>(), vec!["entities", "text"]);
        assert_eq!(message.as_output(), json!({"text": "hi", "entities": []}).as_object().cloned().unwrap());
    }

    #[test]
    fn non_string_text_is_not_text() {
        let data = json!({"text": 42}).as_object().cloned().unwrap();
        assert_eq!(Message::new(data).text(), None);
    }
}
