use crate::engine;
use crate::error::RecognizerError;
use crate::model::{Culture, ModelResult};
use crate::rules::{contact, numeral, ordinal, percentage, time, units};
use crate::{Dimension, Node, ResolvedToken, Rule, TokenKind};
use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

fn with_numerals(family: Vec<Rule>) -> Vec<Rule> {
    let mut rules = numeral::rules::get();
    rules.extend(family);
    rules
}

static NUMBER_RULES: Lazy<Vec<Rule>> = Lazy::new(numeral::rules::get);
static ORDINAL_RULES: Lazy<Vec<Rule>> = Lazy::new(|| with_numerals(ordinal::rules::get()));
static PERCENTAGE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| with_numerals(percentage::rules::get()));
static AGE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| with_numerals(units::rules::age()));
static CURRENCY_RULES: Lazy<Vec<Rule>> = Lazy::new(|| with_numerals(units::rules::currency()));
static DIMENSION_RULES: Lazy<Vec<Rule>> = Lazy::new(|| with_numerals(units::rules::dimension()));
static TEMPERATURE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| with_numerals(units::rules::temperature()));
static DATETIME_RULES: Lazy<Vec<Rule>> = Lazy::new(|| with_numerals(time::rules::get()));
static PHONE_NUMBER_RULES: Lazy<Vec<Rule>> = Lazy::new(contact::rules::phone_number);
static EMAIL_RULES: Lazy<Vec<Rule>> = Lazy::new(contact::rules::email);

/// Recognition context.
///
/// Holds what is needed to resolve relative expressions like "tomorrow".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Reference datetime used to resolve relative expressions.
    pub reference_time: NaiveDateTime,
}

impl Context {
    pub fn at(reference_time: NaiveDateTime) -> Self {
        Self { reference_time }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self { reference_time: Local::now().naive_local() }
    }
}

/// One recognizer of the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerKind {
    Number,
    Ordinal,
    Percentage,
    Age,
    Currency,
    Dimension,
    Temperature,
    DateTime,
    PhoneNumber,
    Email,
}

impl RecognizerKind {
    /// All recognizers, in invocation order.
    pub const BATTERY: [RecognizerKind; 10] = [
        RecognizerKind::Number,
        RecognizerKind::Ordinal,
        RecognizerKind::Percentage,
        RecognizerKind::Age,
        RecognizerKind::Currency,
        RecognizerKind::Dimension,
        RecognizerKind::Temperature,
        RecognizerKind::DateTime,
        RecognizerKind::PhoneNumber,
        RecognizerKind::Email,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RecognizerKind::Number => "number",
            RecognizerKind::Ordinal => "ordinal",
            RecognizerKind::Percentage => "percentage",
            RecognizerKind::Age => "age",
            RecognizerKind::Currency => "currency",
            RecognizerKind::Dimension => "dimension",
            RecognizerKind::Temperature => "temperature",
            RecognizerKind::DateTime => "datetime",
            RecognizerKind::PhoneNumber => "phone_number",
            RecognizerKind::Email => "email",
        }
    }

    fn rules(self) -> &'static [Rule] {
        match self {
            RecognizerKind::Number => NUMBER_RULES.as_slice(),
            RecognizerKind::Ordinal => ORDINAL_RULES.as_slice(),
            RecognizerKind::Percentage => PERCENTAGE_RULES.as_slice(),
            RecognizerKind::Age => AGE_RULES.as_slice(),
            RecognizerKind::Currency => CURRENCY_RULES.as_slice(),
            RecognizerKind::Dimension => DIMENSION_RULES.as_slice(),
            RecognizerKind::Temperature => TEMPERATURE_RULES.as_slice(),
            RecognizerKind::DateTime => DATETIME_RULES.as_slice(),
            RecognizerKind::PhoneNumber => PHONE_NUMBER_RULES.as_slice(),
            RecognizerKind::Email => EMAIL_RULES.as_slice(),
        }
    }

    fn target(self) -> Dimension {
        match self {
            RecognizerKind::Number => Dimension::Numeral,
            RecognizerKind::Ordinal => Dimension::Ordinal,
            RecognizerKind::Percentage => Dimension::Percentage,
            RecognizerKind::Age
            | RecognizerKind::Currency
            | RecognizerKind::Dimension
            | RecognizerKind::Temperature => Dimension::Quantity,
            RecognizerKind::DateTime => Dimension::Time,
            RecognizerKind::PhoneNumber => Dimension::PhoneNumber,
            RecognizerKind::Email => Dimension::Email,
        }
    }
}

impl fmt::Display for RecognizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run one recognizer over `text` with an explicit reference time.
pub fn recognize_with(
    kind: RecognizerKind,
    text: &str,
    culture: &Culture,
    context: &Context,
) -> Result<Vec<ModelResult>, RecognizerError> {
    culture.ensure_supported()?;
    let tokens = engine::Parser::new(text, kind.rules()).run(context, kind.target());
    debug!(target: "text_recognizer::api", recognizer = kind.name(), results = tokens.len(), "recognized");
    Ok(tokens.iter().map(|rt| to_model_result(text, rt)).collect())
}

macro_rules! recognizer_entry_points {
    ($($(#[$doc:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(text: &str, culture: &Culture) -> Result<Vec<ModelResult>, RecognizerError> {
                recognize_with(RecognizerKind::$kind, text, culture, &Context::default())
            }
        )*
    };
}

recognizer_entry_points! {
    /// Cardinal numbers: "two", "3.5", "1,234", "twenty-one thousand".
    ///
    /// # Example
    /// ```
    /// use text_recognizer::{Culture, recognize_number};
    ///
    /// let found = recognize_number("I have two apples", &Culture::ENGLISH).unwrap();
    /// assert_eq!(found[0].text, "two");
    /// ```
    recognize_number => Number;
    /// Ordinals: "11th", "eleventh", "twenty first".
    recognize_ordinal => Ordinal;
    /// Percentages: "100%", "fifty percent".
    recognize_percentage => Percentage;
    /// Ages: "95 years old", "aged 30".
    recognize_age => Age;
    /// Amounts of money: "$75.3 million", "20 euros".
    recognize_currency => Currency;
    /// Lengths, weights, volumes, speeds and data sizes: "6 miles", "16GB".
    recognize_dimension => Dimension;
    /// Temperatures: "30 degrees celsius", "98.6°F".
    recognize_temperature => Temperature;
    /// Dates, times, ranges and durations, resolved against the local clock.
    recognize_datetime => DateTime;
    /// Phone numbers: "(425) 555-1234", "+1 425 555 1234".
    recognize_phone_number => PhoneNumber;
    /// Email addresses.
    recognize_email => Email;
}

/// Backend the recognizer component calls into.
pub trait RecognizerSuite: Send + Sync {
    fn recognize(&self, kind: RecognizerKind, text: &str, culture: &Culture)
    -> Result<Vec<ModelResult>, RecognizerError>;
}

/// [`RecognizerSuite`] backed by this crate's rule engine.
///
/// Without a fixed context every call is resolved against the local clock.
#[derive(Debug, Clone, Default)]
pub struct RuleRecognizers {
    pub context: Option<Context>,
}

impl RuleRecognizers {
    pub fn with_context(context: Context) -> Self {
        Self { context: Some(context) }
    }
}

impl RecognizerSuite for RuleRecognizers {
    fn recognize(
        &self,
        kind: RecognizerKind,
        text: &str,
        culture: &Culture,
    ) -> Result<Vec<ModelResult>, RecognizerError> {
        match &self.context {
            Some(context) => recognize_with(kind, text, culture, context),
            None => recognize_with(kind, text, culture, &Context::default()),
        }
    }
}

/// A compact per-pass saturation trace.
#[derive(Debug, Clone)]
pub struct SaturationPass {
    pub pass: usize,
    pub duration: Duration,
    pub produced: usize,
    /// Rules whose first pattern matched somewhere in the pass.
    pub rules_seeded: usize,
    pub samples: Vec<NodeSummary>,
}

/// A compact node summary used in verbose traces.
#[derive(Debug, Clone)]
pub struct NodeSummary {
    pub start: usize,
    pub end: usize,
    pub rule: String,
    pub preview: String,
}

/// Additional details returned by [`recognize_verbose_with`].
///
/// Meant for rule debugging and performance inspection without dumping the
/// entire engine state.
#[derive(Debug, Clone)]
pub struct RecognitionDetails {
    /// Time spent in saturation (rule application) + per-pass trace.
    pub saturation_total: Duration,
    pub saturation: Vec<SaturationPass>,
    /// Time spent resolving and selecting spans.
    pub resolve: Duration,
    /// Names of rules that were active for this input.
    pub active_rules: Vec<String>,
    /// Every resolved result before overlapping spans were dropped.
    pub all_candidates: Vec<ModelResult>,
}

#[derive(Debug, Clone)]
pub struct RecognitionVerbose {
    pub kind: RecognizerKind,
    pub text: String,
    pub results: Vec<ModelResult>,
    pub elapsed: Duration,
    pub details: RecognitionDetails,
}

/// Like [`recognize_with`], returning the saturation trace and timings too.
pub fn recognize_verbose_with(
    kind: RecognizerKind,
    text: &str,
    culture: &Culture,
    context: &Context,
) -> Result<RecognitionVerbose, RecognizerError> {
    culture.ensure_supported()?;
    let run = engine::Parser::new(text, kind.rules()).capture_nodes(true).run_with_metrics(context, kind.target());

    let results = run.tokens.iter().map(|rt| to_model_result(text, rt)).collect();
    let all_candidates = run.all_tokens.iter().map(|rt| to_model_result(text, rt)).collect();

    let initial = &run.metrics.saturation.initial_regex;
    let mut saturation = vec![SaturationPass {
        pass: 0,
        duration: initial.duration,
        produced: initial.produced,
        rules_seeded: initial.rules_seeded,
        samples: initial.nodes.iter().take(8).map(|n| node_to_summary(text, n)).collect(),
    }];
    for (idx, pass) in run.metrics.saturation.iterations.iter().enumerate() {
        saturation.push(SaturationPass {
            pass: idx + 1,
            duration: pass.duration,
            produced: pass.produced,
            rules_seeded: pass.rules_seeded,
            samples: pass.nodes.iter().take(8).map(|n| node_to_summary(text, n)).collect(),
        });
    }

    let details = RecognitionDetails {
        saturation_total: run.metrics.saturation.total,
        saturation,
        resolve: run.metrics.resolve,
        active_rules: run.active_rules.iter().map(|s| s.to_string()).collect(),
        all_candidates,
    };

    Ok(RecognitionVerbose { kind, text: text.to_string(), results, elapsed: run.metrics.total, details })
}

fn to_model_result(input: &str, rt: &ResolvedToken) -> ModelResult {
    let start = rt.node.range.start;
    let end = rt.node.range.end;
    ModelResult {
        text: input.get(start..end).unwrap_or_default().to_string(),
        start,
        end,
        type_name: rt.type_name.clone(),
        resolution: rt.resolution.clone(),
    }
}

fn node_to_summary(input: &str, node: &Node) -> NodeSummary {
    NodeSummary {
        start: node.range.start,
        end: node.range.end,
        rule: node.rule_name.to_string(),
        preview: format_token_preview(input, node),
    }
}

fn format_token_preview(input: &str, node: &Node) -> String {
    let s = match &node.token.kind {
        TokenKind::TimeExpr(expr) => format!("{:?}", expr),
        TokenKind::Numeral(n) => format!("({})", n.value),
        TokenKind::Ordinal(o) => format!("#{}", o.value),
        TokenKind::Percentage(p) => format!("{}%", p.value),
        TokenKind::Quantity(q) => format!("{:?} {} {}", q.family, q.value, q.unit),
        TokenKind::PhoneNumber(p) => format!("tel:{}", p.digits),
        TokenKind::Email(_) | TokenKind::RegexMatch(_) => {
            input.get(node.range.start..node.range.end).unwrap_or_default().to_string()
        }
    };
    s.chars().take(80).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Resolution;
    use chrono::NaiveDate;

    fn reference_context() -> Context {
        Context::at(NaiveDate::from_ymd_opt(2013, 2, 12).unwrap().and_hms_opt(4, 30, 0).unwrap())
    }

    fn values(kind: RecognizerKind, text: &str) -> Vec<(String, String)> {
        recognize_with(kind, text, &Culture::ENGLISH, &reference_context())
            .unwrap()
            .into_iter()
            .map(|r| match r.resolution {
                Resolution::Value(v) => (r.type_name, v.value),
                Resolution::Values { values } => {
                    (r.type_name, values.last().map(|c| c.value.render()).unwrap_or_default())
                }
            })
            .collect()
    }

    #[test]
    fn battery_holds_every_kind_once() {
        let mut names: Vec<&str> = RecognizerKind::BATTERY.iter().map(|k| k.name()).collect();
        assert_eq!(names.first(), Some(&"number"));
        assert_eq!(names.last(), Some(&"email"));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn number_results_carry_span_and_text() {
        let found = recognize_with(RecognizerKind::Number, "I have two apples", &Culture::ENGLISH, &reference_context())
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "two");
        assert_eq!((found[0].start, found[0].end), (7, 10));
        assert_eq!(found[0].type_name, "number");
    }

    #[test]
    fn each_recognizer_only_reports_its_own_family() {
        let text = "The 3rd parcel weighs 5 kg, costs $20 and is 50% off";
        assert_eq!(values(RecognizerKind::Ordinal, text), vec![("ordinal".to_string(), "3".to_string())]);
        assert_eq!(values(RecognizerKind::Dimension, text), vec![("dimension".to_string(), "5".to_string())]);
        assert_eq!(values(RecognizerKind::Currency, text), vec![("currency".to_string(), "20".to_string())]);
        assert_eq!(values(RecognizerKind::Percentage, text), vec![("percentage".to_string(), "50%".to_string())]);
        assert!(values(RecognizerKind::Age, text).is_empty());
        assert!(values(RecognizerKind::Email, text).is_empty());
    }

    #[test]
    fn datetime_uses_the_context_reference() {
        assert_eq!(
            values(RecognizerKind::DateTime, "see you tomorrow"),
            vec![("datetimeV2.date".to_string(), "2013-02-13".to_string())]
        );
    }

    #[test]
    fn unsupported_culture_fails_before_parsing() {
        let german: Culture = "de-de".parse().unwrap();
        let err = recognize_with(RecognizerKind::Number, "zwei", &german, &reference_context()).unwrap_err();
        assert_eq!(err, RecognizerError::UnsupportedCulture("de-de".to_string()));
    }

    #[test]
    fn suite_with_fixed_context_matches_direct_call() {
        let suite = RuleRecognizers::with_context(reference_context());
        let via_suite = suite.recognize(RecognizerKind::DateTime, "next week", &Culture::ENGLISH).unwrap();
        let direct =
            recognize_with(RecognizerKind::DateTime, "next week", &Culture::ENGLISH, &reference_context()).unwrap();
        assert_eq!(via_suite, direct);
    }

    #[test]
    fn verbose_run_includes_trace_and_rules() {
        let out = recognize_verbose_with(RecognizerKind::Number, "twenty one", &Culture::ENGLISH, &reference_context())
            .unwrap();
        assert_eq!(out.results.len(), 1);
        assert!(out.details.saturation_total <= out.elapsed);
        assert!(!out.details.active_rules.is_empty());
        assert!(out.details.all_candidates.len() >= out.results.len());
        assert_eq!(out.details.saturation[0].pass, 0);
        assert!(out.details.saturation[0].rules_seeded > 0);
        assert!(out.details.saturation.iter().map(|p| p.produced).sum::<usize>() > 0);
    }
}
