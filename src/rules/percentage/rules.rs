//! Percentage rules: `<number> %`, `<number> percent`, `<number> per cent`.

use crate::rules::numeral::helpers::numeral_at;
use crate::rules::numeral::predicates::is_numeral;
use crate::{PercentageData, Rule, Token};

fn rule_number_percent() -> Rule {
    rule! {
        name: "<number> percent",
        pattern: [
            pred!(is_numeral),
            re!(r"(?i)\s*(?:%|(?:percent(?:age)?s?|per\s+cent)\b)"),
        ],
        prod: |tokens: &[Token]| -> Option<PercentageData> {
            Some(PercentageData { value: numeral_at(tokens, 0)?.value })
        },
    }
}

/// `percentage of 20`
fn rule_percentage_of_number() -> Rule {
    rule! {
        name: "percentage of <number>",
        pattern: [
            re!(r"(?i)\bpercentage\s+of\s+"),
            pred!(is_numeral),
        ],
        required_phrases: ["percentage"],
        prod: |tokens: &[Token]| -> Option<PercentageData> {
            Some(PercentageData { value: numeral_at(tokens, 1)?.value })
        },
    }
}

pub fn get() -> Vec<Rule> {
    vec![rule_number_percent(), rule_percentage_of_number()]
}
