//! Trigger scanning (input pre-classification).
//!
//! Inspects the raw input and produces coarse signals that let the parser
//! decide which rules are worth considering:
//!
//! - **Buckets** (`BucketMask`): cheap booleans such as "contains digits",
//!   "contains `@`" or "contains a currency symbol".
//! - **Phrases** (`TriggerInfo::phrases`): lowercased key words found in the
//!   input ("percent", "old", "tomorrow", ...), used for phrase gating.
//!
//! The scan is a heuristic: false positives only cost time, because the
//! parser still has to match full rule patterns. Case folding is ASCII-only
//! since every shipped grammar is English.

use super::compiled_rules::BucketMask;
use std::collections::HashSet;

const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "mon",
    "tue",
    "tues",
    "wed",
    "thu",
    "thur",
    "thurs",
    "fri",
];

const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
    "jan",
    "feb",
    "mar",
    "apr",
    "jun",
    "jul",
    "aug",
    "sep",
    "sept",
    "oct",
    "nov",
    "dec",
];

const ORDINAL_STEMS: &[&str] =
    &["first", "second", "third", "fifth", "eighth", "ninth", "twelfth", "th", "st", "nd", "rd", "ieth"];

const KEY_PHRASES: &[&str] = &[
    // time
    "now",
    "today",
    "tomorrow",
    "yesterday",
    "tonight",
    "day",
    "days",
    "week",
    "weeks",
    "month",
    "months",
    "year",
    "years",
    "hour",
    "hours",
    "minute",
    "minutes",
    "second",
    "seconds",
    "noon",
    "midnight",
    "next",
    "last",
    "this",
    "in",
    "ago",
    "later",
    "from",
    "to",
    "between",
    "and",
    "at",
    "on",
    "after",
    "before",
    "since",
    "until",
    "till",
    "coming",
    "past",
    "previous",
    // numbers
    "half",
    // numbers with units
    "percent",
    "percents",
    "per",
    "percentage",
    "old",
    "age",
    "aged",
    "degree",
    "degrees",
    "celsius",
    "centigrade",
    "fahrenheit",
    "kelvin",
    // phone
    "phone",
    "tel",
];

/// Input characteristics detected from the raw input.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
    pub phrases: HashSet<String>,
}

impl TriggerInfo {
    /// Scan `input` for coarse buckets and key phrases.
    pub fn scan(input: &str) -> Self {
        let mut buckets = BucketMask::empty();
        let lower = input.to_ascii_lowercase();

        // Words with surrounding punctuation trimmed ("monday," -> "monday").
        let words: HashSet<&str> = lower
            .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
            .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
            .filter(|w| !w.is_empty())
            .collect();

        if input.bytes().any(|b| b.is_ascii_digit()) {
            buckets |= BucketMask::HAS_DIGITS;
        }
        if input.contains(':') {
            buckets |= BucketMask::HAS_COLON;
        }
        if input.contains('@') {
            buckets |= BucketMask::HAS_AT;
        }
        if input.contains(['$', '€', '£', '¥']) {
            buckets |= BucketMask::CURRENCY_SYMBOL;
        }
        if input.contains('°') || lower.contains("deg") {
            buckets |= BucketMask::HAS_DEGREE;
        }

        // Crude am/pm check: false positives ("camera") are fine.
        if lower.contains("am") || lower.contains("a.m") || lower.contains("pm") || lower.contains("p.m") {
            buckets |= BucketMask::HAS_AMPM;
        }

        if WEEKDAYS.iter().any(|wd| words.contains(wd)) {
            buckets |= BucketMask::WEEKDAYISH;
        }
        if MONTHS.iter().any(|m| words.contains(m)) {
            buckets |= BucketMask::MONTHISH;
        }
        if words.iter().any(|w| ORDINAL_STEMS.iter().any(|stem| w.ends_with(stem))) {
            buckets |= BucketMask::ORDINALISH;
        }

        let phrases = KEY_PHRASES.iter().filter(|p| words.contains(*p)).map(|p| p.to_string()).collect();

        TriggerInfo { buckets, phrases }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_contact_and_symbol_buckets() {
        let info = TriggerInfo::scan("Mail Dave@abc.com about the $5 fee");
        assert!(info.buckets.contains(BucketMask::HAS_AT));
        assert!(info.buckets.contains(BucketMask::CURRENCY_SYMBOL));
        assert!(info.buckets.contains(BucketMask::HAS_DIGITS));
        assert!(!info.buckets.contains(BucketMask::HAS_DEGREE));
        assert!(TriggerInfo::scan("30 degrees").buckets.contains(BucketMask::HAS_DEGREE));
    }

    #[test]
    fn detects_calendar_words_through_punctuation() {
        let info = TriggerInfo::scan("See you Monday, October 4th.");
        assert!(info.buckets.contains(BucketMask::WEEKDAYISH));
        assert!(info.buckets.contains(BucketMask::MONTHISH));
        assert!(info.buckets.contains(BucketMask::ORDINALISH));
    }

    #[test]
    fn collects_key_phrases_as_whole_words() {
        let info = TriggerInfo::scan("Ninety five years old, per cent");
        assert!(info.phrases.contains("old"));
        assert!(info.phrases.contains("years"));
        assert!(info.phrases.contains("per"));
        assert!(!info.phrases.contains("percent"));
    }
}
