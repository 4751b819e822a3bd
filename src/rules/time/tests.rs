use chrono::NaiveDate;

use crate::model::Resolution;
use crate::rules::{numeral, time};
use crate::{Context, Dimension, Rule};

/// Tuesday 2013-02-12 04:30:00.
fn context() -> Context {
    let reference = NaiveDate::from_ymd_opt(2013, 2, 12).and_then(|d| d.and_hms_opt(4, 30, 0)).unwrap();
    Context { reference_time: reference }
}

fn family() -> Vec<Rule> {
    let mut rules = numeral::rules::get();
    rules.extend(time::rules::get());
    rules
}

/// `(type_name, rendered values, first timex)` for every selected span.
fn resolve(input: &str) -> Vec<(String, Vec<String>, String)> {
    let rules = family();
    crate::engine::Parser::new(input, &rules)
        .run(&context(), Dimension::Time)
        .into_iter()
        .filter_map(|rt| match rt.resolution {
            Resolution::Values { values } => {
                let timex = values.first().and_then(|c| c.timex.clone()).unwrap_or_default();
                Some((rt.type_name, values.iter().map(|c| c.value.render()).collect(), timex))
            }
            Resolution::Value(_) => None,
        })
        .collect()
}

fn check(cases: &[(&str, &str, &[&str])]) {
    for (input, type_name, values) in cases {
        let results = resolve(input);
        assert_eq!(results.len(), 1, "input '{input}': {results:?}");
        let (got_type, got_values, _) = &results[0];
        assert_eq!(got_type, type_name, "input '{input}'");
        assert_eq!(got_values, values, "input '{input}'");
    }
}

#[test]
fn dates() {
    check(&[
        ("today", "datetimeV2.date", &["2013-02-12"]),
        ("tomorrow", "datetimeV2.date", &["2013-02-13"]),
        ("yesterday", "datetimeV2.date", &["2013-02-11"]),
        ("the day after tomorrow", "datetimeV2.date", &["2013-02-14"]),
        ("the day before yesterday", "datetimeV2.date", &["2013-02-10"]),
        ("next Monday", "datetimeV2.date", &["2013-02-18"]),
        ("last friday", "datetimeV2.date", &["2013-02-08"]),
        ("this Friday", "datetimeV2.date", &["2013-02-15"]),
        ("Oct 4th, 2014", "datetimeV2.date", &["2014-10-04"]),
        ("5th of March 2015", "datetimeV2.date", &["2015-03-05"]),
        ("2013-02-15", "datetimeV2.date", &["2013-02-15"]),
        ("10/04/2017", "datetimeV2.date", &["2017-10-04"]),
        ("on March 1st 2013", "datetimeV2.date", &["2013-03-01"]),
    ]);
}

#[test]
fn ambiguous_dates_list_past_then_upcoming() {
    check(&[
        ("Friday", "datetimeV2.date", &["2013-02-08", "2013-02-15"]),
        ("tuesday", "datetimeV2.date", &["2013-02-05", "2013-02-12"]),
        ("March 5", "datetimeV2.date", &["2012-03-05", "2013-03-05"]),
        ("February 12", "datetimeV2.date", &["2012-02-12", "2013-02-12"]),
        ("Feb 29", "datetimeV2.date", &["2012-02-29", "2016-02-29"]),
    ]);
    let friday = resolve("Friday");
    assert_eq!(friday[0].2, "XXXX-WXX-5");
}

#[test]
fn times() {
    check(&[
        ("5pm", "datetimeV2.time", &["17:00:00"]),
        ("10:30 am", "datetimeV2.time", &["10:30:00"]),
        ("11 p.m.", "datetimeV2.time", &["23:00:00"]),
        ("noon", "datetimeV2.time", &["12:00:00"]),
        ("midnight", "datetimeV2.time", &["00:00:00"]),
        ("17:45", "datetimeV2.time", &["17:45:00"]),
        ("at 5", "datetimeV2.time", &["05:00:00", "17:00:00"]),
        ("10:30", "datetimeV2.time", &["10:30:00", "22:30:00"]),
        ("12 am", "datetimeV2.time", &["00:00:00"]),
    ]);
    assert_eq!(resolve("at 5")[0].2, "T05");
    assert_eq!(resolve("10:30 pm")[0].2, "T22:30");
}

#[test]
fn date_times() {
    check(&[
        ("tomorrow at 5pm", "datetimeV2.datetime", &["2013-02-13 17:00:00"]),
        ("5pm tomorrow", "datetimeV2.datetime", &["2013-02-13 17:00:00"]),
        (
            "Friday at 5",
            "datetimeV2.datetime",
            &["2013-02-08 05:00:00", "2013-02-08 17:00:00", "2013-02-15 05:00:00", "2013-02-15 17:00:00"],
        ),
        ("now", "datetimeV2.datetime", &["2013-02-12 04:30:00"]),
        ("right now", "datetimeV2.datetime", &["2013-02-12 04:30:00"]),
    ]);
    assert_eq!(resolve("now")[0].2, "PRESENT_REF");
    assert_eq!(resolve("tomorrow at 5pm")[0].2, "2013-02-13T17");
}

#[test]
fn relative_shifts() {
    check(&[
        ("in 3 days", "datetimeV2.date", &["2013-02-15"]),
        ("in two weeks", "datetimeV2.date", &["2013-02-26"]),
        ("2 hours ago", "datetimeV2.datetime", &["2013-02-12 02:30:00"]),
        ("in an hour", "datetimeV2.datetime", &["2013-02-12 05:30:00"]),
        ("3 months later", "datetimeV2.date", &["2013-05-12"]),
        ("a year ago", "datetimeV2.date", &["2012-02-12"]),
    ]);
}

#[test]
fn periods() {
    check(&[
        ("next week", "datetimeV2.daterange", &["2013-02-18/2013-02-25"]),
        ("this week", "datetimeV2.daterange", &["2013-02-11/2013-02-18"]),
        ("last month", "datetimeV2.daterange", &["2013-01-01/2013-02-01"]),
        ("next year", "datetimeV2.daterange", &["2014-01-01/2015-01-01"]),
    ]);
    assert_eq!(resolve("next week")[0].2, "2013-W08");
    assert_eq!(resolve("last month")[0].2, "2013-01");
}

#[test]
fn ranges() {
    check(&[
        ("from 2 to 4pm", "datetimeV2.timerange", &["14:00:00/16:00:00"]),
        ("between 9am and 11am", "datetimeV2.timerange", &["09:00:00/11:00:00"]),
        ("10:00 - 11:30", "datetimeV2.timerange", &["10:00:00/11:30:00", "22:00:00/23:30:00"]),
        ("from Monday to Friday", "datetimeV2.daterange", &["2013-02-11/2013-02-15"]),
        ("between March 1 2013 and March 5 2013", "datetimeV2.daterange", &["2013-03-01/2013-03-05"]),
        ("after 5pm", "datetimeV2.timerange", &["17:00:00/"]),
        ("before tomorrow", "datetimeV2.daterange", &["/2013-02-13"]),
    ]);
    assert_eq!(resolve("from 2 to 4pm")[0].2, "(T14,T16,PT2H)");
    assert!(resolve("from 1 to 10").is_empty());
}

#[test]
fn durations() {
    check(&[
        ("3 days", "datetimeV2.duration", &["259200"]),
        ("two hours", "datetimeV2.duration", &["7200"]),
        ("half an hour", "datetimeV2.duration", &["1800"]),
        ("1 month", "datetimeV2.duration", &["2592000"]),
    ]);
    assert_eq!(resolve("3 days")[0].2, "P3D");
}

#[test]
fn sentences_keep_spans_apart() {
    let results = resolve("I'll call you tomorrow at 5pm, or on Friday");
    let types: Vec<&str> = results.iter().map(|(t, _, _)| t.as_str()).collect();
    assert_eq!(types, vec!["datetimeV2.datetime", "datetimeV2.date"]);
    assert!(resolve("I have two apples").is_empty());
    assert!(resolve("hello").is_empty());
}
