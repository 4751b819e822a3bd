//! Public result model of the recognition library.
//!
//! Every recognizer returns a list of [`ModelResult`]s. The payload in
//! [`ModelResult::resolution`] comes in one of two shapes:
//!
//! ```text
//! number, ordinal, percentage, age, currency,     Resolution::Value
//! dimension, temperature, phone number, email ──▶   { value, unit?, subtype?, iso_currency? }
//!
//! datetime                                    ──▶ Resolution::Values
//!                                                   { values: [ { timex, type, value | start/end } ] }
//! ```
//!
//! Both shapes serialize the way the reference recognizers print them
//! (`{"value": ...}` vs `{"values": [...]}`).

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::RecognizerError;

/// Language-region identifier controlling recognizer grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Culture(Cow<'static, str>);

impl Culture {
    pub const ENGLISH: Culture = Culture(Cow::Borrowed("en-us"));

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Language part of the code (`"en"` for `"en-us"`).
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// Only English grammars ship with this crate.
    pub fn is_supported(&self) -> bool {
        self.language() == "en"
    }

    pub(crate) fn ensure_supported(&self) -> Result<(), RecognizerError> {
        if self.is_supported() { Ok(()) } else { Err(RecognizerError::UnsupportedCulture(self.code().to_string())) }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Culture::ENGLISH
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Culture {
    type Err = RecognizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase().replace('_', "-");
        if code.is_empty() {
            return Err(RecognizerError::InvalidCulture(s.to_string()));
        }
        Ok(Culture(Cow::Owned(code)))
    }
}

/// One match produced by a recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    /// Matched slice of the input.
    pub text: String,
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Recognizer-declared type, e.g. `"number"` or `"datetimeV2.date"`.
    pub type_name: String,
    pub resolution: Resolution,
}

/// Structured payload of a [`ModelResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolution {
    /// A single resolved value.
    Value(ValueResolution),
    /// A list of typed candidates, most often produced for ambiguous dates
    /// and times (past and future readings).
    Values { values: Vec<Candidate> },
}

impl Resolution {
    pub(crate) fn value(value: impl Into<String>) -> Self {
        Resolution::Value(ValueResolution { value: value.into(), ..ValueResolution::default() })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueResolution {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, rename = "isoCurrency", skip_serializing_if = "Option::is_none")]
    pub iso_currency: Option<String>,
}

/// One typed reading inside a [`Resolution::Values`] list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timex: Option<String>,
    /// Candidate type, e.g. `"date"`, `"time"` or `"daterange"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub value: CandidateValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateValue {
    Point {
        value: String,
    },
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<String>,
    },
}

impl CandidateValue {
    /// Flat string form: the point value, or `start/end` for ranges (an
    /// open side is left empty).
    pub fn render(&self) -> String {
        match self {
            CandidateValue::Point { value } => value.clone(),
            CandidateValue::Range { start, end } => {
                format!("{}/{}", start.as_deref().unwrap_or_default(), end.as_deref().unwrap_or_default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn culture_parsing_normalizes_case_and_separator() {
        let culture: Culture = "EN_GB".parse().unwrap();
        assert_eq!(culture.code(), "en-gb");
        assert!(culture.is_supported());
        assert!(!"fr-fr".parse::<Culture>().unwrap().is_supported());
        assert!("  ".parse::<Culture>().is_err());
    }

    #[test]
    fn unsupported_culture_is_reported() {
        let err = "de-de".parse::<Culture>().unwrap().ensure_supported().unwrap_err();
        assert!(matches!(err, RecognizerError::UnsupportedCulture(code) if code == "de-de"));
    }

    #[test]
    fn resolutions_serialize_in_both_shapes() {
        let direct = Resolution::Value(ValueResolution {
            value: "6".into(),
            unit: Some("Mile".into()),
            ..ValueResolution::default()
        });
        assert_eq!(serde_json::to_value(&direct).unwrap(), serde_json::json!({"value": "6", "unit": "Mile"}));

        let listed = Resolution::Values {
            values: vec![Candidate {
                timex: Some("T20".into()),
                kind: "time".into(),
                value: CandidateValue::Point { value: "20:00:00".into() },
            }],
        };
        assert_eq!(
            serde_json::to_value(&listed).unwrap(),
            serde_json::json!({"values": [{"timex": "T20", "type": "time", "value": "20:00:00"}]})
        );
    }

    #[test]
    fn range_candidates_render_as_intervals() {
        let closed = CandidateValue::Range { start: Some("15:00:00".into()), end: Some("17:00:00".into()) };
        assert_eq!(closed.render(), "15:00:00/17:00:00");
        let open = CandidateValue::Range { start: None, end: Some("2013-03-01".into()) };
        assert_eq!(open.render(), "/2013-03-01");
    }

    #[test]
    fn listed_resolution_deserializes() {
        let parsed: Resolution = serde_json::from_str(
            r#"{"values":[{"type":"daterange","start":"2013-02-18","end":"2013-02-25"}]}"#,
        )
        .unwrap();
        match parsed {
            Resolution::Values { values } => {
                assert_eq!(values[0].kind, "daterange");
                assert_eq!(values[0].value.render(), "2013-02-18/2013-02-25");
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }
}
