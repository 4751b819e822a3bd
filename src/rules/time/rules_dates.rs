//! Calendar dates: relative days, weekdays, month/day forms, numeric dates.

use crate::engine::BucketMask;
use crate::rules::numeral::helpers::regex_group;
use crate::rules::time::helpers::*;
use crate::rules::time::predicates::*;
use crate::time_expr::{DateExpr, TimeExpr};
use crate::{Rule, Token};

fn valid_month_day(month: u32, day: u32) -> bool {
    (1..=12).contains(&month) && (1..=31).contains(&day) && days_in_month(2012, month).is_some_and(|max| day <= max)
}

fn month_day(month: u32, day: u32, year: Option<i32>) -> Option<TimeExpr> {
    if !valid_month_day(month, day) {
        return None;
    }
    Some(TimeExpr::Date(DateExpr::MonthDay { month, day, year }))
}

/// "today", "tomorrow", "yesterday"
pub fn rule_relative_day() -> Rule {
    rule! {
        name: "today/tomorrow/yesterday",
        pattern: [re!(r"(?i)\b(today|tomorrow|yesterday)\b")],
        optional_phrases: ["today", "tomorrow", "yesterday"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let days = match regex_group(tokens, 0, 1)? {
                "today" => 0,
                "tomorrow" => 1,
                "yesterday" => -1,
                _ => return None,
            };
            Some(TimeExpr::Date(DateExpr::Relative(days)))
        }
    }
}

/// "the day after tomorrow", "the day before yesterday"
pub fn rule_day_after_before() -> Rule {
    rule! {
        name: "the day after tomorrow / before yesterday",
        pattern: [re!(r"(?i)\b(?:the\s+)?day\s+(after\s+tomorrow|before\s+yesterday)\b")],
        optional_phrases: ["tomorrow", "yesterday"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let days = if regex_group(tokens, 0, 1)?.starts_with("after") { 2 } else { -2 };
            Some(TimeExpr::Date(DateExpr::Relative(days)))
        }
    }
}

/// "Monday", "fri"
pub fn rule_weekday() -> Rule {
    rule! {
        name: "<weekday>",
        pattern: [re!(r"(?i)\b(monday|mon|tuesday|tues?|wednesday|wed|thursday|thur?s?|friday|fri|saturday|sunday)\b")],
        buckets: BucketMask::WEEKDAYISH.bits(),
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let weekday = *WEEKDAY_NAMES.get(regex_group(tokens, 0, 1)?)?;
            Some(TimeExpr::Date(DateExpr::Weekday { weekday, shift: None }))
        }
    }
}

/// "this Friday", "next Monday", "last tue"
pub fn rule_shifted_weekday() -> Rule {
    rule! {
        name: "this|next|last <weekday>",
        pattern: [
            re!(r"(?i)\b(this|next|last|coming|past|previous)\s+"),
            pred!(is_bare_weekday),
        ],
        buckets: BucketMask::WEEKDAYISH.bits(),
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let shift = week_offset(regex_group(tokens, 0, 1)?)?;
            match time_expr_at(tokens, 1)? {
                TimeExpr::Date(DateExpr::Weekday { weekday, .. }) => {
                    Some(TimeExpr::Date(DateExpr::Weekday { weekday: *weekday, shift: Some(shift) }))
                }
                _ => None,
            }
        }
    }
}

/// "March 5", "Oct 4th, 2014"
pub fn rule_month_day() -> Rule {
    rule! {
        name: "<month> <day> [year]",
        pattern: [re!(r"(?i)\b(january|jan|february|feb|march|mar|april|apr|may|june|jun|july|jul|august|aug|september|sept?|october|oct|november|nov|december|dec)\.?\s+(\d{1,2})(?:st|nd|rd|th)?\b(?:,?\s+(\d{4})\b)?")],
        buckets: BucketMask::MONTHISH.bits(),
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let month = *MONTH_NAMES.get(regex_group(tokens, 0, 1)?)?;
            let day = regex_int(tokens, 0, 2)?;
            let year = regex_int(tokens, 0, 3).map(|y| y as i32);
            month_day(month, day, year)
        }
    }
}

/// "5th of March", "4 October 2014"
pub fn rule_day_month() -> Rule {
    rule! {
        name: "<day> [of] <month> [year]",
        pattern: [re!(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?(january|jan|february|feb|march|mar|april|apr|may|june|jun|july|jul|august|aug|september|sept?|october|oct|november|nov|december|dec)\b(?:,?\s+(\d{4})\b)?")],
        buckets: BucketMask::MONTHISH.bits(),
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let day = regex_int(tokens, 0, 1)?;
            let month = *MONTH_NAMES.get(regex_group(tokens, 0, 2)?)?;
            let year = regex_int(tokens, 0, 3).map(|y| y as i32);
            month_day(month, day, year)
        }
    }
}

/// "2013-02-15"
pub fn rule_iso_date() -> Rule {
    rule! {
        name: "yyyy-mm-dd",
        pattern: [re!(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b")],
        buckets: BucketMask::HAS_DIGITS.bits(),
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let year = regex_int(tokens, 0, 1)? as i32;
            month_day(regex_int(tokens, 0, 2)?, regex_int(tokens, 0, 3)?, Some(year))
        }
    }
}

/// "2/15", "10/04/2017", "2/15/13" (month first)
pub fn rule_slash_date() -> Rule {
    rule! {
        name: "mm/dd[/yyyy]",
        pattern: [re!(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?\b")],
        buckets: BucketMask::HAS_DIGITS.bits(),
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            let year = regex_int(tokens, 0, 3).map(|y| year_from(y as i32));
            month_day(regex_int(tokens, 0, 1)?, regex_int(tokens, 0, 2)?, year)
        }
    }
}

/// "on Friday", "on March 5"
pub fn rule_on_date() -> Rule {
    rule! {
        name: "on <date>",
        pattern: [
            re!(r"(?i)\bon\s+"),
            pred!(is_date),
        ],
        required_phrases: ["on"],
        prod: |tokens: &[Token]| -> Option<TimeExpr> {
            time_expr_at(tokens, 1).cloned()
        }
    }
}
