use crate::model::Resolution;
use crate::rules::contact;
use crate::{Context, Dimension, Rule};

fn values(rules: Vec<Rule>, dim: Dimension, input: &str) -> Vec<(String, String)> {
    crate::engine::Parser::new(input, &rules)
        .run(&Context::default(), dim)
        .into_iter()
        .filter_map(|rt| match rt.resolution {
            Resolution::Value(v) => Some((rt.type_name, v.value)),
            Resolution::Values { .. } => None,
        })
        .collect()
}

fn phones(input: &str) -> Vec<String> {
    values(contact::rules::phone_number(), Dimension::PhoneNumber, input).into_iter().map(|(_, v)| v).collect()
}

fn emails(input: &str) -> Vec<String> {
    values(contact::rules::email(), Dimension::Email, input).into_iter().map(|(_, v)| v).collect()
}

#[test]
fn phone_number_examples_matching() {
    let cases = [
        ("(206) 555-0100", "call (206) 555-0100 today"),
        ("+1 (206) 555 0100", "call +1 (206) 555 0100"),
        ("+44 20 7946 0958", "office: +44 20 7946 0958"),
        ("206-555-0100", "my number is 206-555-0100."),
        ("206.555.0100", "206.555.0100"),
        ("555-0100", "dial 555-0100"),
        ("1-800-555-0199", "1-800-555-0199"),
        ("( 19 ) 38294427", "My phone number is ( 19 ) 38294427."),
        ("(425) 5551234", "reach me on (425) 5551234"),
    ];
    for (expected, input) in cases {
        assert_eq!(phones(input), vec![expected.to_string()], "input '{input}'");
    }
}

#[test]
fn short_digit_runs_are_not_phone_numbers() {
    assert!(phones("I have 2 apples").is_empty());
    assert!(phones("+12").is_empty());
    assert!(phones("version 1.2.3").is_empty());
    assert!(phones("see note (3) 12").is_empty());
}

#[test]
fn email_keeps_original_case() {
    let found = values(
        contact::rules::email(),
        Dimension::Email,
        "Please write to me at Dave@ABC.com for more information",
    );
    assert_eq!(found, vec![("email".to_string(), "Dave@ABC.com".to_string())]);
}

#[test]
fn email_examples_matching() {
    assert_eq!(emails("dave@abc.com"), vec!["dave@abc.com"]);
    assert_eq!(emails("mail first.last+tag@mail.example.co.uk, thanks"), vec!["first.last+tag@mail.example.co.uk"]);
    assert_eq!(emails("a@b.com and c@d.org"), vec!["a@b.com", "c@d.org"]);
    assert!(emails("meet @ noon").is_empty());
    assert!(emails("user@localhost").is_empty());
}
