//! Anchor a `TimeExpr` to the reference time and render its candidates.
//!
//! Ambiguous expressions yield several candidates, always in this order:
//!
//! ```text
//! "Friday"      -> [past Friday, upcoming Friday]
//! "March 5"     -> [past March 5, upcoming March 5]
//! "at 5"        -> [05:00, 17:00]
//! "Friday at 5" -> [past 05:00, past 17:00, upcoming 05:00, upcoming 17:00]
//! ```
//!
//! "Upcoming" includes the reference day itself.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{Candidate, CandidateValue};
use crate::rules::time::helpers::{add_months, shift_date};
use crate::time_expr::{DateExpr, Grain, TimeExpr, TimeOfDay};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How many years to search for a valid occurrence of a month/day (Feb 29).
const LEAP_SEARCH_YEARS: i32 = 8;

fn point(timex: impl Into<String>, kind: &str, value: String) -> Candidate {
    Candidate { timex: Some(timex.into()), kind: kind.to_string(), value: CandidateValue::Point { value } }
}

fn range(timex: impl Into<String>, kind: &str, start: Option<String>, end: Option<String>) -> Candidate {
    Candidate { timex: Some(timex.into()), kind: kind.to_string(), value: CandidateValue::Range { start, end } }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Timex of the date expression and its concrete readings.
fn date_readings(date: &DateExpr, today: NaiveDate) -> Option<(String, Vec<NaiveDate>)> {
    match *date {
        DateExpr::Relative(days) => {
            let date = today.checked_add_signed(Duration::try_days(days)?)?;
            Some((date.format(DATE_FORMAT).to_string(), vec![date]))
        }
        DateExpr::Weekday { weekday, shift: None } => {
            let ahead = (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
            let upcoming = today.checked_add_signed(Duration::try_days(ahead as i64)?)?;
            let past = upcoming.checked_sub_signed(Duration::try_days(7)?)?;
            Some((format!("XXXX-WXX-{}", weekday.number_from_monday()), vec![past, upcoming]))
        }
        DateExpr::Weekday { weekday, shift: Some(weeks) } => {
            let monday = today.checked_sub_signed(Duration::try_days(today.weekday().num_days_from_monday() as i64)?)?;
            let offset = weeks.checked_mul(7)? + weekday.num_days_from_monday() as i64;
            let date = monday.checked_add_signed(Duration::try_days(offset)?)?;
            Some((date.format(DATE_FORMAT).to_string(), vec![date]))
        }
        DateExpr::MonthDay { month, day, year: Some(year) } => {
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            Some((date.format(DATE_FORMAT).to_string(), vec![date]))
        }
        DateExpr::MonthDay { month, day, year: None } => {
            let upcoming = (today.year()..=today.year() + LEAP_SEARCH_YEARS)
                .filter_map(|y| NaiveDate::from_ymd_opt(y, month, day))
                .find(|d| *d >= today)?;
            let past = (upcoming.year() - LEAP_SEARCH_YEARS..upcoming.year())
                .rev()
                .filter_map(|y| NaiveDate::from_ymd_opt(y, month, day))
                .next()?;
            Some((format!("XXXX-{month:02}-{day:02}"), vec![past, upcoming]))
        }
    }
}

fn clock_timex(hour: u32, minute: u32, second: u32) -> String {
    match (minute, second) {
        (0, 0) => format!("T{hour:02}"),
        (_, 0) => format!("T{hour:02}:{minute:02}"),
        _ => format!("T{hour:02}:{minute:02}:{second:02}"),
    }
}

/// Timex of the clock time and its readings (morning first when ambiguous).
fn time_readings(time: &TimeOfDay) -> Option<(String, Vec<NaiveTime>)> {
    let timex = clock_timex(time.hour, time.minute, time.second);
    let hours = if time.ambiguous { vec![time.hour % 12, time.hour % 12 + 12] } else { vec![time.hour] };
    let readings = hours
        .into_iter()
        .map(|h| NaiveTime::from_hms_opt(h, time.minute, time.second))
        .collect::<Option<Vec<_>>>()?;
    Some((timex, readings))
}

fn clock_of(time: NaiveTime) -> String {
    use chrono::Timelike;
    clock_timex(time.hour(), time.minute(), time.second())
}

/// Pair the readings of both ends so that each range runs forward.
fn time_pairs(from: &TimeOfDay, to: &TimeOfDay) -> Option<Vec<(NaiveTime, NaiveTime)>> {
    let (_, starts) = time_readings(from)?;
    let (_, ends) = time_readings(to)?;
    let mut pairs = Vec::new();
    if from.ambiguous && !to.ambiguous {
        let end = *ends.first()?;
        let start = starts.iter().rev().find(|s| **s < end).or(starts.first())?;
        pairs.push((*start, end));
    } else {
        for start in &starts {
            let end = ends.iter().find(|e| *e > start).or(ends.last())?;
            push_unique(&mut pairs, (*start, *end));
        }
    }
    Some(pairs)
}

fn span_timex(start: NaiveTime, end: NaiveTime) -> String {
    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }
    let length = if minutes % 60 == 0 { Grain::Hour.duration_timex(minutes / 60) } else { Grain::Minute.duration_timex(minutes) };
    format!("({},{},{})", clock_of(start), clock_of(end), length)
}

fn period_bounds(grain: Grain, offset: i64, today: NaiveDate) -> Option<(String, NaiveDate, NaiveDate)> {
    match grain {
        Grain::Week => {
            let monday = today.checked_sub_signed(Duration::try_days(today.weekday().num_days_from_monday() as i64)?)?;
            let start = shift_date(monday, offset, Grain::Week)?;
            let end = shift_date(start, 1, Grain::Week)?;
            let iso = start.iso_week();
            Some((format!("{}-W{:02}", iso.year(), iso.week()), start, end))
        }
        Grain::Month => {
            let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
            let start = add_months(first, offset)?;
            let end = add_months(start, 1)?;
            Some((start.format("%Y-%m").to_string(), start, end))
        }
        Grain::Year => {
            let year = today.year().checked_add(i32::try_from(offset).ok()?)?;
            let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
            Some((year.to_string(), start, end))
        }
        Grain::Second | Grain::Minute | Grain::Hour | Grain::Day => None,
    }
}

/// Resolve `expr` against `reference`, returning the `datetimeV2` subtype
/// ("date", "time", "datetime", "daterange", "timerange", "duration") and
/// the candidate list.
pub fn resolve_time(expr: &TimeExpr, reference: NaiveDateTime) -> Option<(String, Vec<Candidate>)> {
    let today = reference.date();
    let (subtype, candidates) = match expr {
        TimeExpr::Now => ("datetime", vec![point("PRESENT_REF", "datetime", reference.format(DATETIME_FORMAT).to_string())]),
        TimeExpr::Date(date) => {
            let (timex, dates) = date_readings(date, today)?;
            let candidates: Vec<Candidate> =
                dates.into_iter().map(|d| point(timex.clone(), "date", d.format(DATE_FORMAT).to_string())).collect();
            ("date", candidates)
        }
        TimeExpr::Time(time) => {
            let (timex, times) = time_readings(time)?;
            let candidates: Vec<Candidate> =
                times.into_iter().map(|t| point(timex.clone(), "time", t.format(TIME_FORMAT).to_string())).collect();
            ("time", candidates)
        }
        TimeExpr::DateTime { date, time } => {
            let (date_timex, dates) = date_readings(date, today)?;
            let (time_timex, times) = time_readings(time)?;
            let timex = format!("{date_timex}{time_timex}");
            let mut candidates = Vec::new();
            for d in &dates {
                for t in &times {
                    let value = NaiveDateTime::new(*d, *t).format(DATETIME_FORMAT).to_string();
                    push_unique(&mut candidates, point(timex.clone(), "datetime", value));
                }
            }
            ("datetime", candidates)
        }
        TimeExpr::Shifted { amount, grain } if grain.is_clock() => {
            let moved = reference.checked_add_signed(Duration::try_seconds(amount.checked_mul(grain.seconds())?)?)?;
            let timex = moved.format("%Y-%m-%dT%H:%M:%S").to_string();
            ("datetime", vec![point(timex, "datetime", moved.format(DATETIME_FORMAT).to_string())])
        }
        TimeExpr::Shifted { amount, grain } => {
            let moved = shift_date(today, *amount, *grain)?;
            let value = moved.format(DATE_FORMAT).to_string();
            ("date", vec![point(value.clone(), "date", value)])
        }
        TimeExpr::Period { grain, offset } => {
            let (timex, start, end) = period_bounds(*grain, *offset, today)?;
            let candidate = range(
                timex,
                "daterange",
                Some(start.format(DATE_FORMAT).to_string()),
                Some(end.format(DATE_FORMAT).to_string()),
            );
            ("daterange", vec![candidate])
        }
        TimeExpr::TimeRange { from, to } => {
            let candidates: Vec<Candidate> = time_pairs(from, to)?
                .into_iter()
                .map(|(start, end)| {
                    range(
                        span_timex(start, end),
                        "timerange",
                        Some(start.format(TIME_FORMAT).to_string()),
                        Some(end.format(TIME_FORMAT).to_string()),
                    )
                })
                .collect();
            ("timerange", candidates)
        }
        TimeExpr::DateRange { from, to } => {
            let (_, starts) = date_readings(from, today)?;
            let (_, ends) = date_readings(to, today)?;
            let mut pairs = Vec::new();
            for start in &starts {
                if let Some(end) = ends.iter().find(|e| *e >= start) {
                    push_unique(&mut pairs, (*start, *end));
                }
            }
            if pairs.is_empty() {
                pairs.push((*starts.first()?, *ends.last()?));
            }
            let mut candidates = Vec::new();
            for (start, end) in &pairs {
                let days = (*end - *start).num_days();
                let timex = format!(
                    "({},{},{})",
                    start.format(DATE_FORMAT),
                    end.format(DATE_FORMAT),
                    Grain::Day.duration_timex(days)
                );
                let candidate = range(
                    timex,
                    "daterange",
                    Some(start.format(DATE_FORMAT).to_string()),
                    Some(end.format(DATE_FORMAT).to_string()),
                );
                push_unique(&mut candidates, candidate);
            }
            ("daterange", candidates)
        }
        TimeExpr::DateBound { date, after } => {
            let (timex, dates) = date_readings(date, today)?;
            let candidates: Vec<Candidate> = dates
                .into_iter()
                .map(|d| {
                    let bound = Some(d.format(DATE_FORMAT).to_string());
                    if *after {
                        range(timex.clone(), "daterange", bound, None)
                    } else {
                        range(timex.clone(), "daterange", None, bound)
                    }
                })
                .collect();
            ("daterange", candidates)
        }
        TimeExpr::TimeBound { time, after } => {
            let (timex, times) = time_readings(time)?;
            let candidates: Vec<Candidate> = times
                .into_iter()
                .map(|t| {
                    let bound = Some(t.format(TIME_FORMAT).to_string());
                    if *after {
                        range(timex.clone(), "timerange", bound, None)
                    } else {
                        range(timex.clone(), "timerange", None, bound)
                    }
                })
                .collect();
            ("timerange", candidates)
        }
        TimeExpr::Duration { amount, grain } => {
            let seconds = amount.checked_mul(grain.seconds())?;
            ("duration", vec![point(grain.duration_timex(*amount), "duration", seconds.to_string())])
        }
    };
    Some((subtype.to_string(), candidates))
}
