//! Clock times and date+time composition.

use crate::engine::BucketMask;
use crate::rules::numeral::helpers::{numeral_at, regex_group};
use crate::rules::time::helpers::*;
use crate::rules::time::predicates::*;
use crate::time_expr::{TimeExpr, TimeOfDay};
use crate::{Rule, Token};

fn is_pm(tokens: &[Token], index: usize) -> Option<bool> {
    Some(regex_group(tokens, index, 1)? == "p")
}

/// "10:30", "17:45:10"
pub fn rule_clock_time() -> Rule {
    rule! {
        name: "hh:mm[:ss]",
        pattern: [re!(r"\b(\d{1,2}):(\d{2})(?::(\d{2}))?\b")],
        buckets: BucketMask::HAS_COLON.bits(),
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let mut time = TimeOfDay::new(regex_int(tokens, 0, 1)?, regex_int(tokens, 0, 2)?, true)?;
            if let Some(second) = regex_int(tokens, 0, 3) {
                if second >= 60 {
                    return None;
                }
                time.second = second;
            }
            Some(TimeExpr::Time(time))
        }
    }
}

/// "5pm", "11 a.m."
pub fn rule_hour_meridiem() -> Rule {
    rule! {
        name: "<hour> am|pm",
        pattern: [
            pred!(is_meridiem_hour),
            re!(r"(?i)\s*([ap])(?:\.m\.|\.m\b|m\b)"),
        ],
        buckets: BucketMask::HAS_AMPM.bits(),
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let hour = numeral_at(tokens, 0)?.value as u32;
            let time = TimeOfDay::new(hour, 0, true)?.with_meridiem(is_pm(tokens, 1)?)?;
            Some(TimeExpr::Time(time))
        }
    }
}

/// "10:30 pm"
pub fn rule_clock_meridiem() -> Rule {
    rule! {
        name: "<hh:mm> am|pm",
        pattern: [
            pred!(is_ambiguous_time),
            re!(r"(?i)\s*([ap])(?:\.m\.|\.m\b|m\b)"),
        ],
        buckets: BucketMask::HAS_AMPM.bits(),
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            match time_expr_at(tokens, 0)? {
                TimeExpr::Time(time) => Some(TimeExpr::Time(time.with_meridiem(is_pm(tokens, 1)?)?)),
                _ => None,
            }
        }
    }
}

/// "noon", "midnight"
pub fn rule_noon_midnight() -> Rule {
    rule! {
        name: "noon|midnight",
        pattern: [re!(r"(?i)\b(noon|midday|midnight)\b")],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let hour = if regex_group(tokens, 0, 1)? == "midnight" { 0 } else { 12 };
            Some(TimeExpr::Time(TimeOfDay::new(hour, 0, false)?))
        }
    }
}

/// "5 o'clock"
pub fn rule_oclock() -> Rule {
    rule! {
        name: "<hour> o'clock",
        pattern: [
            pred!(is_meridiem_hour),
            re!(r"(?i)\s*o'?\s?clock\b"),
        ],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let hour = numeral_at(tokens, 0)?.value as u32;
            Some(TimeExpr::Time(TimeOfDay::new(hour, 0, true)?))
        }
    }
}

/// "at 5", "at 10:30pm", "at noon"
pub fn rule_at_time() -> Rule {
    rule! {
        name: "at <time-of-day>",
        pattern: [
            re!(r"(?i)\bat\s+"),
            pred!(is_time_or_hour),
        ],
        required_phrases: ["at"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            Some(TimeExpr::Time(time_or_hour(tokens.get(1)?)?))
        }
    }
}

/// "now", "right now"
pub fn rule_now() -> Rule {
    rule! {
        name: "now",
        pattern: [re!(r"(?i)\b(?:right\s+)?now\b")],
        required_phrases: ["now"],
        prod: |_tokens: &[Token]| -> Option<TimeExpr> {
            Some(TimeExpr::Now)
        }
    }
}

/// "tomorrow at 5pm", "Friday, 10:30"
pub fn rule_date_time() -> Rule {
    rule! {
        name: "<date> [at] <time-of-day>",
        pattern: [
            pred!(is_date),
            re!(r"\s*,?\s*"),
            pred!(is_time_of_day),
        ],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let TimeExpr::Date(date) = time_expr_at(tokens, 0)? else { return None };
            let TimeExpr::Time(time) = time_expr_at(tokens, 2)? else { return None };
            Some(TimeExpr::DateTime { date: *date, time: *time })
        }
    }
}

/// "5pm tomorrow", "10:30 on Friday"
pub fn rule_time_date() -> Rule {
    rule! {
        name: "<time-of-day> [on] <date>",
        pattern: [
            pred!(is_time_of_day),
            re!(r"(?i)\s*,?\s*(?:on\s+)?"),
            pred!(is_date),
        ],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let TimeExpr::Time(time) = time_expr_at(tokens, 0)? else { return None };
            let TimeExpr::Date(date) = time_expr_at(tokens, 2)? else { return None };
            Some(TimeExpr::DateTime { date: *date, time: *time })
        }
    }
}
