//! Ordinal rules: `1st`, `22nd`, `first`..`twentieth`, `thirtieth`,
//! `twenty first`.
//!
//! Composite ordinals read their tens word directly. The numeral family
//! declines `twenty first` so the cardinal recognizer stays quiet on it.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::engine::BucketMask;
use crate::rules::numeral::helpers::regex_group;
use crate::{OrdinalData, Rule, Token, TokenKind};

static ORDINAL_WORDS: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("first", 1),
        ("second", 2),
        ("third", 3),
        ("fourth", 4),
        ("fifth", 5),
        ("sixth", 6),
        ("seventh", 7),
        ("eighth", 8),
        ("ninth", 9),
        ("tenth", 10),
        ("eleventh", 11),
        ("twelfth", 12),
        ("thirteenth", 13),
        ("fourteenth", 14),
        ("fifteenth", 15),
        ("sixteenth", 16),
        ("seventeenth", 17),
        ("eighteenth", 18),
        ("nineteenth", 19),
        ("twentieth", 20),
        ("thirtieth", 30),
        ("fortieth", 40),
        ("fiftieth", 50),
        ("sixtieth", 60),
        ("seventieth", 70),
        ("eightieth", 80),
        ("ninetieth", 90),
        ("hundredth", 100),
        ("thousandth", 1000),
    ])
});

static TENS_WORDS: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("twenty", 20),
        ("thirty", 30),
        ("forty", 40),
        ("fourty", 40),
        ("fifty", 50),
        ("sixty", 60),
        ("seventy", 70),
        ("eighty", 80),
        ("ninety", 90),
    ])
});

fn ordinal_at(tokens: &[Token], index: usize) -> Option<i64> {
    match &tokens.get(index)?.kind {
        TokenKind::Ordinal(data) => Some(data.value),
        _ => None,
    }
}

fn is_unit_ordinal(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Ordinal(data) if (1..10).contains(&data.value))
}

/// `1st`, `2nd`, `3rd`, `101st`
fn rule_ordinal_digits() -> Rule {
    rule! {
        name: "ordinal (digits)",
        pattern: [re!(r"(?i)\b(\d+)\s?(?:st|nd|rd|th)\b")],
        buckets: (BucketMask::HAS_DIGITS | BucketMask::ORDINALISH).bits(),
        prod: |tokens: &[Token]| -> Option<OrdinalData> {
            let value = regex_group(tokens, 0, 1)?.parse::<i64>().ok()?;
            Some(OrdinalData { value })
        },
    }
}

fn rule_ordinal_words() -> Rule {
    rule! {
        name: "ordinal (words)",
        pattern: [re!(r"(?i)\b(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|eleventh|twelfth|thirteenth|fourteenth|fifteenth|sixteenth|seventeenth|eighteenth|nineteenth|twentieth|thirtieth|fortieth|fiftieth|sixtieth|seventieth|eightieth|ninetieth|hundredth|thousandth)\b")],
        buckets: BucketMask::ORDINALISH.bits(),
        prod: |tokens: &[Token]| -> Option<OrdinalData> {
            let value = *ORDINAL_WORDS.get(regex_group(tokens, 0, 1)?)?;
            Some(OrdinalData { value })
        },
    }
}

/// `twenty first`, `thirty-second`
fn rule_composite_ordinal() -> Rule {
    rule! {
        name: "ordinal (composite tens)",
        pattern: [
            re!(r"(?i)\b(twenty|thirty|fou?rty|fifty|sixty|seventy|eighty|ninety)[\s\-]+"),
            pred!(is_unit_ordinal),
        ],
        buckets: BucketMask::ORDINALISH.bits(),
        prod: |tokens: &[Token]| -> Option<OrdinalData> {
            let tens = *TENS_WORDS.get(regex_group(tokens, 0, 1)?)?;
            Some(OrdinalData { value: tens + ordinal_at(tokens, 1)? })
        },
    }
}

pub fn get() -> Vec<Rule> {
    vec![rule_ordinal_digits(), rule_ordinal_words(), rule_composite_ordinal()]
}
