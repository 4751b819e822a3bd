//! Durations and expressions relative to the reference time.

use crate::rules::numeral::helpers::{numeral_at, regex_group};
use crate::rules::time::helpers::*;
use crate::rules::time::predicates::*;
use crate::time_expr::{Grain, TimeExpr};
use crate::{Dimension, Rule, Token};

fn duration_at(tokens: &[Token], index: usize) -> Option<(i64, Grain)> {
    match time_expr_at(tokens, index)? {
        TimeExpr::Duration { amount, grain } => Some((*amount, *grain)),
        _ => None,
    }
}

/// "3 days", "two hours", "10 mins"
pub fn rule_duration() -> Rule {
    rule! {
        name: "<integer> <unit-of-duration>",
        pattern: [
            pred!(is_positive_integer),
            re!(r"(?i)\s*\b(seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|weeks?|months?|years?|yrs?)\b"),
        ],
        deps: [Dimension::Numeral],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let amount = numeral_at(tokens, 0)?.value as i64;
            let grain = grain_from_word(regex_group(tokens, 1, 1)?)?;
            Some(TimeExpr::Duration { amount, grain })
        }
    }
}

/// "an hour", "a week"
pub fn rule_single_unit_duration() -> Rule {
    rule! {
        name: "a <unit-of-duration>",
        pattern: [re!(r"(?i)\ban?\s+(second|minute|hour|day|week|month|year)\b")],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let grain = grain_from_word(regex_group(tokens, 0, 1)?)?;
            Some(TimeExpr::Duration { amount: 1, grain })
        }
    }
}

/// "half an hour"
pub fn rule_half_hour() -> Rule {
    rule! {
        name: "half an hour",
        pattern: [re!(r"(?i)\bhalf\s+an?\s+hour\b")],
        required_phrases: ["hour"],
        prod: |_tokens: &[Token]| -> Option<TimeExpr> {
            Some(TimeExpr::Duration { amount: 30, grain: Grain::Minute })
        }
    }
}

/// "in 3 days", "within an hour"
pub fn rule_in_duration() -> Rule {
    rule! {
        name: "in <duration>",
        pattern: [
            re!(r"(?i)\b(?:in|within)\s+"),
            pred!(is_duration),
        ],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let (amount, grain) = duration_at(tokens, 1)?;
            Some(TimeExpr::Shifted { amount, grain })
        }
    }
}

/// "2 hours ago"
pub fn rule_duration_ago() -> Rule {
    rule! {
        name: "<duration> ago",
        pattern: [
            pred!(is_duration),
            re!(r"(?i)\s*\bago\b"),
        ],
        required_phrases: ["ago"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let (amount, grain) = duration_at(tokens, 0)?;
            Some(TimeExpr::Shifted { amount: -amount, grain })
        }
    }
}

/// "3 days later", "a week from now"
pub fn rule_duration_later() -> Rule {
    rule! {
        name: "<duration> later|from now",
        pattern: [
            pred!(is_duration),
            re!(r"(?i)\s*\b(?:later|from\s+now|hence)\b"),
        ],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let (amount, grain) = duration_at(tokens, 0)?;
            Some(TimeExpr::Shifted { amount, grain })
        }
    }
}

/// "this week", "next month", "last year"
pub fn rule_period() -> Rule {
    rule! {
        name: "this|next|last <cycle>",
        pattern: [re!(r"(?i)\b(this|next|last|coming|past|previous)\s+(week|month|year)\b")],
        optional_phrases: ["week", "month", "year"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let offset = week_offset(regex_group(tokens, 0, 1)?)?;
            let grain = grain_from_word(regex_group(tokens, 0, 2)?)?;
            Some(TimeExpr::Period { grain, offset })
        }
    }
}
