use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;

use crate::rules::numeral::helpers::regex_group;
use crate::time_expr::{Grain, TimeExpr, TimeOfDay};
use crate::{Token, TokenKind};

pub static WEEKDAY_NAMES: Lazy<HashMap<&'static str, Weekday>> = Lazy::new(|| {
    HashMap::from([
        ("monday", Weekday::Mon),
        ("mon", Weekday::Mon),
        ("tuesday", Weekday::Tue),
        ("tue", Weekday::Tue),
        ("tues", Weekday::Tue),
        ("wednesday", Weekday::Wed),
        ("wed", Weekday::Wed),
        ("thursday", Weekday::Thu),
        ("thu", Weekday::Thu),
        ("thur", Weekday::Thu),
        ("thurs", Weekday::Thu),
        ("friday", Weekday::Fri),
        ("fri", Weekday::Fri),
        ("saturday", Weekday::Sat),
        ("sunday", Weekday::Sun),
    ])
});

pub static MONTH_NAMES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("january", 1),
        ("jan", 1),
        ("february", 2),
        ("feb", 2),
        ("march", 3),
        ("mar", 3),
        ("april", 4),
        ("apr", 4),
        ("may", 5),
        ("june", 6),
        ("jun", 6),
        ("july", 7),
        ("jul", 7),
        ("august", 8),
        ("aug", 8),
        ("september", 9),
        ("sep", 9),
        ("sept", 9),
        ("october", 10),
        ("oct", 10),
        ("november", 11),
        ("nov", 11),
        ("december", 12),
        ("dec", 12),
    ])
});

/// "days" -> `Grain::Day`, "hrs" -> `Grain::Hour`.
pub fn grain_from_word(word: &str) -> Option<Grain> {
    let grain = match word.trim_end_matches('s') {
        "second" | "sec" => Grain::Second,
        "minute" | "min" => Grain::Minute,
        "hour" | "hr" => Grain::Hour,
        "day" => Grain::Day,
        "week" => Grain::Week,
        "month" => Grain::Month,
        "year" | "yr" => Grain::Year,
        _ => return None,
    };
    Some(grain)
}

/// Week offset of a modifier word: this = 0, next = 1, last = -1.
pub fn week_offset(modifier: &str) -> Option<i64> {
    match modifier {
        "this" => Some(0),
        "next" | "coming" => Some(1),
        "last" | "past" | "previous" => Some(-1),
        _ => None,
    }
}

/// Two-digit years map to 1950..2049.
pub fn year_from(value: i32) -> i32 {
    match value {
        0..=49 => 2000 + value,
        50..=99 => 1900 + value,
        _ => value,
    }
}

pub fn regex_int(tokens: &[Token], index: usize, group: usize) -> Option<u32> {
    regex_group(tokens, index, group)?.parse().ok()
}

pub fn time_expr_at(tokens: &[Token], index: usize) -> Option<&TimeExpr> {
    match &tokens.get(index)?.kind {
        TokenKind::TimeExpr(expr) => Some(expr),
        _ => None,
    }
}

/// A clock time, or a bare integer hour read as an ambiguous time.
pub fn time_or_hour(token: &Token) -> Option<TimeOfDay> {
    match &token.kind {
        TokenKind::TimeExpr(TimeExpr::Time(time)) => Some(*time),
        TokenKind::Numeral(nd) if nd.value.fract() == 0.0 && (0.0..24.0).contains(&nd.value) => {
            TimeOfDay::new(nd.value as u32, 0, true)
        }
        _ => None,
    }
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_next.pred_opt()?.day())
}

/// Move `date` by whole months, clamping the day to the target month.
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let zero_based = date.year() as i64 * 12 + date.month0() as i64 + months;
    let year = i32::try_from(zero_based.div_euclid(12)).ok()?;
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Shift a date by a calendar grain (day or coarser).
pub fn shift_date(date: NaiveDate, amount: i64, grain: Grain) -> Option<NaiveDate> {
    match grain {
        Grain::Day => date.checked_add_signed(Duration::try_days(amount)?),
        Grain::Week => date.checked_add_signed(Duration::try_weeks(amount)?),
        Grain::Month => add_months(date, amount),
        Grain::Year => add_months(date, amount.checked_mul(12)?),
        Grain::Second | Grain::Minute | Grain::Hour => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_shift_clamps_day() {
        assert_eq!(add_months(ymd(2013, 1, 31), 1), Some(ymd(2013, 2, 28)));
        assert_eq!(add_months(ymd(2012, 12, 15), -12), Some(ymd(2011, 12, 15)));
        assert_eq!(shift_date(ymd(2013, 2, 12), 3, Grain::Day), Some(ymd(2013, 2, 15)));
        assert_eq!(shift_date(ymd(2013, 2, 12), 1, Grain::Hour), None);
    }

    #[test]
    fn grain_words() {
        assert_eq!(grain_from_word("hrs"), Some(Grain::Hour));
        assert_eq!(grain_from_word("weeks"), Some(Grain::Week));
        assert_eq!(grain_from_word("fortnight"), None);
        assert_eq!(year_from(13), 2013);
        assert_eq!(year_from(87), 1987);
    }
}
