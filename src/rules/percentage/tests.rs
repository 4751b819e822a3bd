use crate::model::Resolution;
use crate::rules::{numeral, percentage};
use crate::{Context, Dimension, Rule};

fn family() -> Vec<Rule> {
    let mut rules = numeral::rules::get();
    rules.extend(percentage::rules::get());
    rules
}

fn percentages(input: &str) -> Vec<String> {
    let rules = family();
    crate::engine::Parser::new(input, &rules)
        .run(&Context::default(), Dimension::Percentage)
        .into_iter()
        .filter_map(|rt| match rt.resolution {
            Resolution::Value(v) => Some(v.value),
            Resolution::Values { .. } => None,
        })
        .collect()
}

#[test]
fn percentage_examples_matching() {
    let cases: Vec<(&str, &str)> = vec![
        ("100%", "100%"),
        ("100%", "100 %"),
        ("100%", "100 percent"),
        ("100%", "one hundred percent"),
        ("3.5%", "3.5 percents"),
        ("20%", "twenty per cent"),
        ("-5%", "-5%"),
        ("15%", "percentage of 15"),
        ("0.5%", ".5 percentage"),
    ];

    for (expected, input) in cases {
        assert_eq!(percentages(input), vec![expected.to_string()], "input '{input}'");
    }
}

#[test]
fn bare_numbers_are_not_percentages() {
    assert!(percentages("100 apples").is_empty());
    assert!(percentages("percentage").is_empty());
}
