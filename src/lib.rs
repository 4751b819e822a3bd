//! Structured-entity recognition for conversational pipelines.
//!
//! The crate has two layers:
//!
//! - a recognition library ([`recognize_number`], [`recognize_datetime`], ...)
//!   built on a rule-based, saturation-style engine, returning raw
//!   [`ModelResult`]s whose [`Resolution`] shape depends on the recognizer;
//! - the [`TextRecognizer`] pipeline component, which runs the whole battery
//!   of recognizers over each [`Message`] and appends flat [`EntityRecord`]s
//!   to it.

extern crate self as text_recognizer;

use regex::Regex;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod extractor;
mod model;
pub mod pipeline;
mod rules;

mod time_expr;

pub use api::{
    Context, NodeSummary, RecognitionDetails, RecognitionVerbose, RecognizerKind, RecognizerSuite, RuleRecognizers,
    SaturationPass, recognize_age, recognize_currency, recognize_datetime, recognize_dimension, recognize_email,
    recognize_number, recognize_ordinal, recognize_percentage, recognize_phone_number, recognize_temperature,
    recognize_verbose_with, recognize_with,
};
pub use error::{ComponentError, ConfigError, RecognizerError, RegistryError};
pub use extractor::{EXTRACTOR_NAME, EntityRecord, TextRecognizer};
pub use model::{Candidate, CandidateValue, Culture, ModelResult, Resolution, ValueResolution};
pub use pipeline::{
    ComponentConfig, ComponentRecipe, ComponentRegistry, ComponentType, ExecutionContext, GraphComponent, Message,
    PipelineConfig,
};

use crate::time_expr::TimeExpr;

// --- Internal types ---------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Dimension {
    Time,
    RegexMatch,
    Numeral,
    Ordinal,
    Percentage,
    Quantity,
    PhoneNumber,
    Email,
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub dim: Dimension,
    pub kind: TokenKind,
}

#[derive(Debug, Clone)]
pub(crate) struct NumeralData {
    pub value: f64,
    pub grain: Option<u32>,
    pub multipliable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OrdinalData {
    pub value: i64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PercentageData {
    pub value: f64,
}

/// Recognizer family of a number-with-unit quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum UnitFamily {
    Age,
    Currency,
    Measure,
    Temperature,
}

#[derive(Debug, Clone)]
pub(crate) struct QuantityData {
    pub family: UnitFamily,
    pub value: f64,
    pub unit: &'static str,
    pub iso_currency: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PhoneNumberData {
    /// Digits only, separators stripped.
    pub digits: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmailData {
    /// Lowercased address, used for deduplication only.
    pub address: String,
}

#[derive(Debug, Clone)]
pub(crate) enum TokenKind {
    Numeral(NumeralData),
    Ordinal(OrdinalData),
    Percentage(PercentageData),
    Quantity(QuantityData),
    TimeExpr(TimeExpr),
    PhoneNumber(PhoneNumberData),
    Email(EmailData),
    RegexMatch(Vec<String>),
}

impl TokenKind {
    /// Whether two token payloads carry the same value.
    pub(crate) fn same_value(&self, other: &TokenKind) -> bool {
        match (self, other) {
            (TokenKind::Numeral(a), TokenKind::Numeral(b)) => a.value == b.value,
            (TokenKind::Ordinal(a), TokenKind::Ordinal(b)) => a == b,
            (TokenKind::Percentage(a), TokenKind::Percentage(b)) => a.value == b.value,
            (TokenKind::Quantity(a), TokenKind::Quantity(b)) => {
                a.family == b.family && a.value == b.value && a.unit == b.unit
            }
            (TokenKind::TimeExpr(a), TokenKind::TimeExpr(b)) => a == b,
            (TokenKind::PhoneNumber(a), TokenKind::PhoneNumber(b)) => a == b,
            (TokenKind::Email(a), TokenKind::Email(b)) => a == b,
            (TokenKind::RegexMatch(a), TokenKind::RegexMatch(b)) => a.first() == b.first(),
            _ => false,
        }
    }
}

// Trait to convert rule production results into tokens
pub(crate) trait IntoToken {
    fn into_token(self) -> Option<Token>;
}

macro_rules! impl_into_token {
    ($ty:ty => $dim:ident, $kind:ident) => {
        impl IntoToken for $ty {
            fn into_token(self) -> Option<Token> {
                Some(Token { dim: Dimension::$dim, kind: TokenKind::$kind(self) })
            }
        }
    };
}

impl_into_token!(TimeExpr => Time, TimeExpr);
impl_into_token!(NumeralData => Numeral, Numeral);
impl_into_token!(OrdinalData => Ordinal, Ordinal);
impl_into_token!(PercentageData => Percentage, Percentage);
impl_into_token!(QuantityData => Quantity, Quantity);
impl_into_token!(PhoneNumberData => PhoneNumber, PhoneNumber);
impl_into_token!(EmailData => Email, Email);

// Pattern items used by rules: either a Regex to match text, or a Predicate
// that matches an existing token in the stash.
#[derive(Debug)]
pub(crate) enum Pattern {
    /// Match a regular expression against the original input. The `Regex`
    /// is stored as a static reference (created via the `regex!` macro in
    /// `src/macros.rs`).
    Regex(&'static Regex),

    /// Match an already-discovered `Token` using a predicate function.
    Predicate(fn(&Token) -> bool),
}

pub(crate) type Production = Box<dyn Fn(&[Token]) -> Option<Token> + Send + Sync>;

/// A parsing rule: a name, a positional `pattern` (vector of `Pattern` items)
/// and a `production` function that receives the matched tokens and
/// optionally returns a new `Token`.
pub(crate) struct Rule {
    pub name: &'static str,
    pub pattern: Vec<Pattern>,
    pub production: Production,
    /// Required phrases - ALL must appear in input for this rule to activate (AND logic).
    pub required_phrases: &'static [&'static str],
    /// Optional phrases - ANY one must appear in input for this rule to activate (OR logic).
    pub optional_phrases: &'static [&'static str],
    /// Bucket mask - rule only activates if input has matching buckets.
    pub buckets: u32,
    /// Required dimensions in stash before this rule activates.
    pub deps: &'static [Dimension],
    /// Priority for deterministic tie-breaking (higher = preferred).
    pub priority: u16,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("production", &"<function>")
            .field("buckets", &self.buckets)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Range {
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A node that survived resolution, together with its recognizer-facing
/// type name and resolution payload.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedToken {
    pub node: Node,
    pub type_name: String,
    pub resolution: Resolution,
}

/// Basic parse tree node produced by rules. `Node` pairs a `Token` with the
/// consumed `Range` from the original input.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub range: Range,
    pub token: Token,
    /// Name of the rule that produced this node.
    pub rule_name: &'static str,
    /// Names of rules that directly contributed to producing this node.
    pub evidence: Vec<&'static str>,
}

// --- Stash: lightweight container for discovered nodes ----------------------

#[derive(Debug, Clone)]
pub(crate) struct Stash {
    nodes: Vec<Node>,
}

impl Stash {
    /// Create an empty `Stash`.
    pub fn empty() -> Self {
        Stash { nodes: Vec::new() }
    }

    /// Return true if the stash is empty.
    pub fn null(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return nodes sorted by `(start, end)`.
    pub fn to_pos_ordered_list(&self) -> Vec<&Node> {
        let mut v: Vec<&Node> = self.nodes.iter().collect();
        v.sort_by_key(|n| (n.range.start, n.range.end));
        v
    }

    /// Union two stashes; keeps nodes deduplicated by span, dimension,
    /// producing rule and token value.
    pub fn union(&self, other: &Stash) -> Stash {
        let mut combined = self.nodes.clone();
        combined.extend(other.nodes.iter().cloned());

        combined.sort_by_key(|n| (n.range.start, n.range.end));
        combined.dedup_by(|a, b| {
            a.range == b.range
                && a.token.dim == b.token.dim
                && a.rule_name == b.rule_name
                && a.evidence == b.evidence
                && a.token.kind.same_value(&b.token.kind)
        });

        Stash { nodes: combined }
    }

    /// Insert a node into the stash (appends to internal vector).
    pub fn insert(&mut self, node: Node) {
        self.nodes.push(node);
    }
}
