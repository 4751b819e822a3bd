//! Closed and open ranges of dates and clock times.

use crate::rules::numeral::helpers::regex_group;
use crate::rules::time::helpers::*;
use crate::rules::time::predicates::*;
use crate::time_expr::TimeExpr;
use crate::{Rule, Token};

fn date_range(tokens: &[Token], from: usize, to: usize) -> Option<TimeExpr> {
    let TimeExpr::Date(from) = time_expr_at(tokens, from)? else { return None };
    let TimeExpr::Date(to) = time_expr_at(tokens, to)? else { return None };
    Some(TimeExpr::DateRange { from: *from, to: *to })
}

fn time_range(tokens: &[Token], from: usize, to: usize) -> Option<TimeExpr> {
    let (from, to) = (tokens.get(from)?, tokens.get(to)?);
    // Two bare numbers ("from 1 to 10") do not make a time range.
    if !is_time_of_day(from) && !is_time_of_day(to) {
        return None;
    }
    Some(TimeExpr::TimeRange { from: time_or_hour(from)?, to: time_or_hour(to)? })
}

fn is_after(tokens: &[Token]) -> Option<bool> {
    Some(matches!(regex_group(tokens, 0, 1)?, "after" | "since"))
}

/// "from Monday to Friday", "from March 5 until March 9"
pub fn rule_from_date_to_date() -> Rule {
    rule! {
        name: "from <date> to <date>",
        pattern: [
            re!(r"(?i)\bfrom\s+"),
            pred!(is_date),
            re!(r"(?i)\s*(?:-|\bto\b|\btill\b|\buntil\b|\bthrough\b|\bthru\b)\s*"),
            pred!(is_date),
        ],
        required_phrases: ["from"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            date_range(tokens, 1, 3)
        }
    }
}

/// "Monday to Friday", "2013-02-12 - 2013-02-15"
pub fn rule_date_to_date() -> Rule {
    rule! {
        name: "<date> to <date>",
        pattern: [
            pred!(is_date),
            re!(r"(?i)\s*(?:-|\bto\b|\btill\b|\buntil\b|\bthrough\b|\bthru\b)\s*"),
            pred!(is_date),
        ],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            date_range(tokens, 0, 2)
        }
    }
}

/// "between Monday and Wednesday"
pub fn rule_between_dates() -> Rule {
    rule! {
        name: "between <date> and <date>",
        pattern: [
            re!(r"(?i)\bbetween\s+"),
            pred!(is_date),
            re!(r"(?i)\s*\band\b\s*"),
            pred!(is_date),
        ],
        required_phrases: ["between", "and"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            date_range(tokens, 1, 3)
        }
    }
}

/// "from 2 to 4pm", "from 10:30 until noon"
pub fn rule_from_time_to_time() -> Rule {
    rule! {
        name: "from <time-of-day> to <time-of-day>",
        pattern: [
            re!(r"(?i)\bfrom\s+"),
            pred!(is_time_or_hour),
            re!(r"(?i)\s*(?:-|\bto\b|\btill\b|\buntil\b)\s*"),
            pred!(is_time_or_hour),
        ],
        required_phrases: ["from"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            time_range(tokens, 1, 3)
        }
    }
}

/// "2pm - 4pm", "10:30 to 11:45"
pub fn rule_time_to_time() -> Rule {
    rule! {
        name: "<time-of-day> to <time-of-day>",
        pattern: [
            pred!(is_time_of_day),
            re!(r"(?i)\s*(?:-|\bto\b|\btill\b|\buntil\b)\s*"),
            pred!(is_time_of_day),
        ],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            time_range(tokens, 0, 2)
        }
    }
}

/// "between 2 and 4pm"
pub fn rule_between_times() -> Rule {
    rule! {
        name: "between <time-of-day> and <time-of-day>",
        pattern: [
            re!(r"(?i)\bbetween\s+"),
            pred!(is_time_or_hour),
            re!(r"(?i)\s*\band\b\s*"),
            pred!(is_time_or_hour),
        ],
        required_phrases: ["between", "and"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            time_range(tokens, 1, 3)
        }
    }
}

/// "after Friday", "before March 5", "since yesterday"
pub fn rule_date_bound() -> Rule {
    rule! {
        name: "after|before <date>",
        pattern: [
            re!(r"(?i)\b(after|before|since|until|till)\s+"),
            pred!(is_date),
        ],
        optional_phrases: ["after", "before", "since", "until", "till"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let TimeExpr::Date(date) = time_expr_at(tokens, 1)? else { return None };
            Some(TimeExpr::DateBound { date: *date, after: is_after(tokens)? })
        }
    }
}

/// "after 5pm", "before noon"
pub fn rule_time_bound() -> Rule {
    rule! {
        name: "after|before <time-of-day>",
        pattern: [
            re!(r"(?i)\b(after|before|since|until|till)\s+"),
            pred!(is_time_of_day),
        ],
        optional_phrases: ["after", "before", "since", "until", "till"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let TimeExpr::Time(time) = time_expr_at(tokens, 1)? else { return None };
            Some(TimeExpr::TimeBound { time: *time, after: is_after(tokens)? })
        }
    }
}
