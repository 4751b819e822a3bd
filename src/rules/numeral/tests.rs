use crate::rules::numeral;
use crate::{Context, Dimension, ResolvedToken, TokenKind};

fn numbers(input: &str) -> Vec<ResolvedToken> {
    let rules = numeral::rules::get();
    crate::engine::Parser::new(input, &rules).run(&Context::default(), Dimension::Numeral)
}

#[test]
fn numeral_examples_matching() {
    // Expected value, then every spelling that must produce it.
    let cases: &[(f64, &[&str])] = &[
        (0.0, &["0", "naught", "nought", "zero", "nil"]),
        (1.0, &["1", "one", "single"]),
        (2.0, &["2", "two", "a pair", "a couple", "a couple of"]),
        (3.0, &["3", "three", "a few", "few"]),
        (10.0, &["10", "ten"]),
        (12.0, &["12", "twelve", "a dozen", "a dozen of"]),
        (14.0, &["14", "fourteen"]),
        (16.0, &["16", "sixteen"]),
        (17.0, &["17", "seventeen"]),
        (18.0, &["18", "eighteen"]),
        (33.0, &["33", "thirty three", "0033"]),
        (1.1, &["1.1", "1 point 1", "1.10", "01.10"]),
        (0.77, &[".77", "point 77", "0.77"]),
        (23.0, &["twenty and three"]),
        (2000.0, &["two thousand"]),
        (24.0, &["24", "2 dozens", "two dozen", "Two dozen"]),
        (100000.0, &["100,000", "100,000.0", "100000", "100K", "100k", "one hundred thousand"]),
        (0.2, &["1/5", "2/10", "3/15", "20/100"]),
        (3e6, &["3M", "3000K", "3000000", "3,000,000", "3 million", "30 lakh", "30 lkh", "30 l"]),
        (1.2e6, &["1,200,000", "1200000", "1.2M", "1200k", ".0012G", "12 lakhs", "12 lkhs"]),
        (5000.0, &["5 thousand", "five thousand"]),
        (-504.0, &["-504", "-negative five hundred and four"]),
        (-1.2e6, &["- 1,200,000", "-1200000", "minus 1,200,000", "negative 1200000", "-1.2M", "-1200K", "-.0012G"]),
        (-3200000.0, &["-3,200,000", "-3200000", "minus three million two hundred thousand"]),
        (122.0, &["one twenty two", "ONE TwentY tWO"]),
        (2e5, &["two Hundred thousand"]),
        (21011.0, &["twenty-one thousand Eleven"]),
        (721012.0, &["seven hundred twenty-one thousand twelve", "seven hundred twenty-one thousand and twelve"]),
        (
            31256721.0,
            &[
                "thirty-one million two hundred fifty-six thousand seven hundred twenty-one",
                "three crore twelve lakh fifty-six thousand seven hundred twenty-one",
                "three cr twelve lac fifty-six thousand seven hundred twenty-one",
            ],
        ),
        (2400.0, &["two hundred dozens", "200 dozens"]),
        (2200000.0, &["two point two million"]),
        (3.5, &["three and a half", "3 and a half"]),
        (3000000000.0, &["three billions", "three thousand millions"]),
        (45.0, &["forty-five (45)", "45 (forty five)"]),
    ];

    let rules = numeral::rules::get();
    let ctx = Context::default();

    for &(expected, inputs) in cases {
        for &input in inputs {
            // Checked before span selection, so a composite reading counts even
            // where a sibling reading wins the span.
            let result = crate::engine::Parser::new(input, &rules).run_with_metrics(&ctx, Dimension::Numeral);
            let matched = result.all_tokens.iter().any(|rt| match &rt.node.token.kind {
                TokenKind::Numeral(nd) => (nd.value - expected).abs() <= 1e-6 * expected.abs().max(1.0),
                _ => false,
            });
            assert!(matched, "'{input}' should read as {expected}, got {:#?}", result.all_tokens);
        }
    }
}

#[test]
fn selection_keeps_the_longest_span() {
    let tokens = numbers("seven hundred twenty-one thousand twelve");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].node.range.start, 0);
    assert_eq!(tokens[0].node.range.end, 40);
    assert_eq!(tokens[0].resolution, crate::model::Resolution::Value(crate::model::ValueResolution {
        value: "721012".into(),
        subtype: Some("integer".into()),
        ..Default::default()
    }));
}

#[test]
fn number_words_inside_other_words_are_ignored() {
    assert!(numbers("someone often weighs tension").is_empty());
    assert!(numbers("hello").is_empty());
}

#[test]
fn separate_numbers_are_reported_in_order() {
    let tokens = numbers("I have two apples and 3.5 pears");
    let values: Vec<_> = tokens
        .iter()
        .map(|rt| match &rt.node.token.kind {
            TokenKind::Numeral(nd) => nd.value,
            _ => f64::NAN,
        })
        .collect();
    assert_eq!(values, vec![2.0, 3.5]);
    assert_eq!(tokens[1].type_name, "number");
}

#[test]
fn hyphens_between_digits_are_not_signs() {
    let rules = numeral::rules::get();
    for input in ["2013-02-15", "call 555-1234"] {
        let result =
            crate::engine::Parser::new(input, &rules).run_with_metrics(&Context::default(), Dimension::Numeral);
        let negative = result
            .all_tokens
            .iter()
            .any(|rt| matches!(&rt.node.token.kind, TokenKind::Numeral(nd) if nd.value < 0.0));
        assert!(!negative, "'{input}' should hold no negative reading, got {:#?}", result.all_tokens);
    }

    let values: Vec<f64> = numbers("2013-02-15")
        .iter()
        .filter_map(|rt| match &rt.node.token.kind {
            TokenKind::Numeral(nd) => Some(nd.value),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec![2013.0, 2.0, 15.0]);
}

#[test]
fn and_a_half_wins_the_span() {
    let tokens = numbers("three and a half apples");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].node.range.end, 16);
    assert_eq!(tokens[0].resolution, crate::model::Resolution::Value(crate::model::ValueResolution {
        value: "3.5".into(),
        subtype: Some("decimal".into()),
        ..Default::default()
    }));
}

#[test]
fn tens_words_before_an_ordinal_are_left_to_the_ordinal_family() {
    assert!(numbers("twenty-first").is_empty());
    assert!(numbers("the thirty second floor").is_empty());
    assert_eq!(numbers("twenty seconds").len(), 1);
    assert_eq!(numbers("twenty one").len(), 1);
}
