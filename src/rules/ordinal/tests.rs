use crate::rules::{numeral, ordinal};
use crate::{Context, Dimension, Rule, TokenKind};

fn family() -> Vec<Rule> {
    let mut rules = numeral::rules::get();
    rules.extend(ordinal::rules::get());
    rules
}

fn ordinals(input: &str) -> Vec<i64> {
    let rules = family();
    crate::engine::Parser::new(input, &rules)
        .run(&Context::default(), Dimension::Ordinal)
        .into_iter()
        .filter_map(|rt| match rt.node.token.kind {
            TokenKind::Ordinal(data) => Some(data.value),
            _ => None,
        })
        .collect()
}

#[test]
fn ordinal_examples_matching() {
    let cases: Vec<(i64, &str)> = vec![
        (1, "first"),
        (1, "1st"),
        (2, "second"),
        (2, "2nd"),
        (3, "third"),
        (3, "3rd"),
        (4, "fourth"),
        (11, "eleventh"),
        (11, "11th"),
        (12, "Twelfth"),
        (20, "twentieth"),
        (21, "twenty first"),
        (21, "twenty-first"),
        (22, "22nd"),
        (32, "thirty-second"),
        (90, "ninetieth"),
        (101, "101st"),
    ];

    for (expected, input) in cases {
        assert_eq!(ordinals(input), vec![expected], "input '{input}'");
    }
}

#[test]
fn ordinals_inside_sentences() {
    assert_eq!(ordinals("the second and the 3rd place"), vec![2, 3]);
    assert!(ordinals("two apples").is_empty());
    assert!(ordinals("firstly").is_empty());
}
