use crate::model::Resolution;
use crate::rules::{numeral, units};
use crate::{Context, Dimension, Rule, UnitFamily};

fn run(family: Vec<Rule>, input: &str) -> Vec<(String, String, Option<String>, Option<String>)> {
    let mut rules = numeral::rules::get();
    rules.extend(family);
    crate::engine::Parser::new(input, &rules)
        .run(&Context::default(), Dimension::Quantity)
        .into_iter()
        .filter_map(|rt| match rt.resolution {
            Resolution::Value(v) => Some((rt.type_name, v.value, v.unit, v.iso_currency)),
            Resolution::Values { .. } => None,
        })
        .collect()
}

fn single(family: Vec<Rule>, input: &str) -> (String, String, String) {
    let results = run(family, input);
    assert_eq!(results.len(), 1, "input '{input}': {results:?}");
    let (type_name, value, unit, _) = results.into_iter().next().unwrap_or_default();
    (type_name, value, unit.unwrap_or_default())
}

#[test]
fn age_examples_matching() {
    let cases = [
        ("95", "Year", "When he was 95 years old"),
        ("10", "Month", "a ten-month-old baby"),
        ("3", "Week", "the puppy is 3 weeks old"),
        ("45", "Year", "45 years of age"),
        ("30", "Year", "aged 30"),
    ];
    for (value, unit, input) in cases {
        let got = single(units::rules::age(), input);
        assert_eq!(got, ("age".to_string(), value.to_string(), unit.to_string()), "input '{input}'");
    }
}

#[test]
fn ages_need_an_age_phrase() {
    assert!(run(units::rules::age(), "I waited 3 years").is_empty());
}

#[test]
fn currency_examples_matching() {
    let cases = [
        ("75300000", "Dollar", Some("USD"), "It costs $75.3 million"),
        ("75300000", "Dollar", Some("USD"), "75.3 million dollars"),
        ("20", "Dollar", Some("USD"), "twenty bucks"),
        ("3.5", "Euro", Some("EUR"), "€3.5"),
        ("5", "British pound", Some("GBP"), "5 pounds sterling"),
        ("1000", "Japanese yen", Some("JPY"), "¥1000"),
        ("20", "United States dollar", Some("USD"), "USD 20"),
        ("99", "Cent", None, "99 cents"),
    ];
    for (value, unit, iso, input) in cases {
        let results = run(units::rules::currency(), input);
        assert_eq!(results.len(), 1, "input '{input}': {results:?}");
        let (type_name, got_value, got_unit, got_iso) = &results[0];
        assert_eq!(type_name, "currency");
        assert_eq!(got_value, value, "input '{input}'");
        assert_eq!(got_unit.as_deref(), Some(unit), "input '{input}'");
        assert_eq!(got_iso.as_deref(), iso, "input '{input}'");
    }
}

#[test]
fn dimension_examples_matching() {
    let cases = [
        ("6", "Mile", "drive 6 miles"),
        ("5", "Kilometer", "a 5km run"),
        ("3.5", "Kilogram", "3.5 kg of flour"),
        ("2", "Pound", "two pounds"),
        ("1", "Gallon", "one gallon"),
        ("100", "Mile per hour", "100 miles per hour"),
        ("16", "Gigabyte", "16GB"),
        ("30", "Liter", "30 l"),
    ];
    for (value, unit, input) in cases {
        let got = single(units::rules::dimension(), input);
        assert_eq!(got, ("dimension".to_string(), value.to_string(), unit.to_string()), "input '{input}'");
    }
}

#[test]
fn temperature_examples_matching() {
    let cases = [
        ("30", "C", "30 degrees celsius"),
        ("40", "C", "40°C"),
        ("98.6", "F", "98.6 °F"),
        ("-5", "F", "-5 fahrenheit"),
        ("0", "K", "zero kelvin"),
        ("12", "Degree", "it is 12 degrees outside"),
    ];
    for (value, unit, input) in cases {
        let got = single(units::rules::temperature(), input);
        assert_eq!(got, ("temperature".to_string(), value.to_string(), unit.to_string()), "input '{input}'");
    }
}

#[test]
fn families_are_told_apart() {
    let all: Vec<Rule> = [units::rules::age(), units::rules::dimension()].into_iter().flatten().collect();
    let mut rules = numeral::rules::get();
    rules.extend(all);
    let tokens =
        crate::engine::Parser::new("a 5 years old dog ran 3 miles", &rules).run(&Context::default(), Dimension::Quantity);
    let families: Vec<UnitFamily> = tokens
        .iter()
        .filter_map(|rt| match &rt.node.token.kind {
            crate::TokenKind::Quantity(q) => Some(q.family),
            _ => None,
        })
        .collect();
    assert_eq!(families, vec![UnitFamily::Age, UnitFamily::Measure]);
}
