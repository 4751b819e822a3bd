use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::rules::numeral::helpers::{
    decimals_to_double, make_numeral, multiply_numerals, numeral_at, parse_number, regex_group, regex_text,
};
use crate::rules::numeral::predicates::{
    has_grain, is_integer, is_multipliable, is_numeral, is_positive, is_round_tens, number_between,
};
use crate::{NumeralData, Rule, Token};

/// Number words below one hundred, including informal quantities.
static WORD_VALUES: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("naught", 0),
        ("nil", 0),
        ("nought", 0),
        ("none", 0),
        ("zero", 0),
        ("zilch", 0),
        ("one", 1),
        ("single", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
        ("thirteen", 13),
        ("fourteen", 14),
        ("fifteen", 15),
        ("sixteen", 16),
        ("seventeen", 17),
        ("eighteen", 18),
        ("nineteen", 19),
        ("twenty", 20),
        ("thirty", 30),
        ("forty", 40),
        ("fourty", 40),
        ("fifty", 50),
        ("sixty", 60),
        ("seventy", 70),
        ("eighty", 80),
        ("ninety", 90),
        ("a couple", 2),
        ("a couple of", 2),
        ("couple", 2),
        ("couples", 2),
        ("couple of", 2),
        ("couples of", 2),
        ("a pair", 2),
        ("a pair of", 2),
        ("pair", 2),
        ("pairs", 2),
        ("pair of", 2),
        ("pairs of", 2),
        ("a few", 3),
        ("few", 3),
    ])
});

/// Power words and their exponent ("thousand" => 3).
static POWER_EXPONENTS: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    HashMap::from([
        ("hundred", 2),
        ("thousand", 3),
        ("l", 5),
        ("lac", 5),
        ("lak", 5),
        ("lakh", 5),
        ("lk", 5),
        ("lkh", 5),
        ("million", 6),
        ("cr", 7),
        ("crore", 7),
        ("koti", 7),
        ("billion", 9),
        ("trillion", 12),
    ])
});

fn word_numeral(word: &str) -> Option<NumeralData> {
    WORD_VALUES.get(word.trim()).map(|&n| make_numeral(n as f64))
}

/// Sum of a round numeral and a smaller remainder (`2000` + `30`), only when
/// the remainder fits below the first value's grain.
fn sum_below_grain(tokens: &[Token]) -> Option<NumeralData> {
    let head = numeral_at(tokens, 0)?;
    let tail = numeral_at(tokens, tokens.len().checked_sub(1)?)?;
    let grain = head.grain?;
    (10f64.powi(grain as i32) > tail.value).then(|| make_numeral(head.value + tail.value))
}

/// Words zero..nineteen and informal quantities ("a couple of", "a few").
fn rule_to_nineteen() -> Rule {
    rule! {
        name: "integer (0..19, informal)",
        pattern: [
            re!(r"(?i)\b(none|zilch|naught|nought|nil|zero|one|single|two|(?:a )?(?:pair|couple)s?(?: of)?|three|(?:a )?few|fourteen|four|fifteen|five|sixteen|six|seventeen|seven|eighteen|eight|nineteen|nine|ten|eleven|twelve|thirteen)\b")
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            word_numeral(regex_text(tokens, 0)?)
        },
    }
}

/// Tens words. `twenty-first` and `twenty first` belong to the ordinal
/// family and produce nothing here.
fn rule_tens() -> Rule {
    rule! {
        name: "integer (20..90)",
        pattern: [
            re!(r"(?i)\b(twenty|thirty|fou?rty|fifty|sixty|seventy|eighty|ninety)(?:[\s\-]+(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth)\b)?\b")
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            if regex_group(tokens, 0, 2).is_some() {
                return None;
            }
            word_numeral(regex_group(tokens, 0, 1)?)
        },
    }
}

fn rule_powers_of_ten() -> Rule {
    rule! {
        name: "powers of tens",
        pattern: [
            re!(r"(?i)\b(hundred|thousand|l(?:ac|a?kh?|k)?|million|cr(?:ore)?|koti|billion|trillion)s?\b")
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            let word = regex_group(tokens, 0, 1)?;
            POWER_EXPONENTS.get(word).map(|&exp| make_numeral(10f64.powi(exp)))
        },
    }
}

/// twenty one .. ninety nine
fn rule_composite_tens() -> Rule {
    rule! {
        name: "integer 21..99",
        pattern: [
            pred!(is_round_tens),
            re!(r"[\s\-]+"),
            pred!(number_between::<1, 10>),
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            Some(make_numeral(numeral_at(tokens, 0)?.value + numeral_at(tokens, 2)?.value))
        },
    }
}

/// "one twenty" = 120, "nine nineteen" = 919.
fn rule_skip_hundreds() -> Rule {
    rule! {
        name: "integer 100..999 without hundred",
        pattern: [
            re!(r"(?i)\b(one|two|three|four|five|six|seven|eight|nine)\b"),
            re!(r"[\s\-]+"),
            re!(r"(?i)\b(ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty|thirty|fou?rty|fifty|sixty|seventy|eighty|ninety)\b"),
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            let hundreds = WORD_VALUES.get(regex_text(tokens, 0)?)?;
            let rest = WORD_VALUES.get(regex_text(tokens, 2)?)?;
            Some(make_numeral((hundreds * 100 + rest) as f64))
        },
    }
}

/// "one twenty two" = 122.
fn rule_skip_hundreds_composite() -> Rule {
    rule! {
        name: "integer 100..999 without hundred (composite tens)",
        pattern: [
            re!(r"(?i)\b(one|two|three|four|five|six|seven|eight|nine)\b"),
            re!(r"[\s\-]+"),
            re!(r"(?i)\b(twenty|thirty|fou?rty|fifty|sixty|seventy|eighty|ninety)\b"),
            re!(r"[\s\-]+"),
            re!(r"(?i)\b(one|two|three|four|five|six|seven|eight|nine)\b"),
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            let hundreds = WORD_VALUES.get(regex_text(tokens, 0)?)?;
            let tens = WORD_VALUES.get(regex_text(tokens, 2)?)?;
            let units = WORD_VALUES.get(regex_text(tokens, 4)?)?;
            Some(make_numeral((hundreds * 100 + tens + units) as f64))
        },
    }
}

/// "one point 2"
fn rule_dot_spelled_out() -> Rule {
    rule! {
        name: "<number> point <number>",
        pattern: [
            pred!(is_numeral),
            re!(r"(?i)\s*\b(?:point|dot)\b\s*"),
            pred!(|t: &Token| !has_grain(t) && is_integer(t)),
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            let whole = numeral_at(tokens, 0)?;
            let decimals = numeral_at(tokens, 2)?;
            Some(make_numeral(whole.value + decimals_to_double(decimals.value)))
        },
    }
}

/// "point 77"
fn rule_leading_dot_spelled_out() -> Rule {
    rule! {
        name: "point <number>",
        pattern: [
            re!(r"(?i)\bpoint\s+"),
            pred!(|t: &Token| !has_grain(t) && is_integer(t)),
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            Some(make_numeral(decimals_to_double(numeral_at(tokens, 1)?.value)))
        },
    }
}

/// "two thousand three" = 2003
fn rule_sum() -> Rule {
    rule! {
        name: "intersect 2 numbers",
        pattern: [
            pred!(|t: &Token| has_grain(t) && is_positive(t)),
            re!(r"\s*"),
            pred!(|t: &Token| !is_multipliable(t) && is_positive(t)),
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            sum_below_grain(tokens)
        },
    }
}

/// "two hundred and four" = 204
fn rule_sum_and() -> Rule {
    rule! {
        name: "intersect 2 numbers (with and)",
        pattern: [
            pred!(|t: &Token| has_grain(t) && is_positive(t)),
            re!(r"(?i)\s*\band\b\s*"),
            pred!(|t: &Token| !is_multipliable(t) && is_positive(t)),
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            sum_below_grain(tokens)
        },
    }
}

/// "three and a half" = 3.5
fn rule_and_a_half() -> Rule {
    rule! {
        name: "<integer> and a half",
        pattern: [
            pred!(|t: &Token| is_integer(t) && is_positive(t)),
            re!(r"(?i)\s+and\s+a\s+half\b"),
        ],
        required_phrases: ["half"],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            Some(make_numeral(numeral_at(tokens, 0)?.value + 0.5))
        },
    }
}

/// "five thousand and twelve": the leading part is scaled by 1,000.
fn rule_thousand_and_remainder() -> Rule {
    rule! {
        name: "thousand and remainder",
        pattern: [
            pred!(|t: &Token| is_positive(t) && !is_multipliable(t)),
            re!(r"(?i)\s*thousand\s+and\s+"),
            pred!(|t: &Token| is_positive(t) && !is_multipliable(t)),
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            let head = numeral_at(tokens, 0)?.value;
            let tail = numeral_at(tokens, 2)?.value;
            ((1.0..1000.0).contains(&head) && (0.0..1000.0).contains(&tail)).then(|| make_numeral(head * 1000.0 + tail))
        },
    }
}

/// "three hundred", "75.3 million"
fn rule_multiply() -> Rule {
    rule! {
        name: "compose by multiplication",
        pattern: [
            pred!(is_positive),
            re!(r"\s*"),
            pred!(is_multipliable),
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            Some(multiply_numerals(numeral_at(tokens, 0)?, numeral_at(tokens, 2)?))
        },
    }
}

/// "forty-five (45)": the parenthesized repetition must agree.
fn rule_legal_parentheses() -> Rule {
    rule! {
        name: "<integer> '('<integer>')'",
        pattern: [
            pred!(|t: &Token| is_integer(t) && is_positive(t)),
            re!(r"\s*\(\s*"),
            pred!(|t: &Token| is_integer(t) && is_positive(t)),
            re!(r"\s*\)"),
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            let n1 = numeral_at(tokens, 0)?.value;
            let n2 = numeral_at(tokens, 2)?.value;
            ((n1 - n2).abs() < f64::EPSILON).then(|| make_numeral(n1))
        },
    }
}

fn rule_decimals() -> Rule {
    rule! {
        name: "decimal number",
        pattern: [
            re!(r"(\d*\.\d+)")
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            parse_number(regex_group(tokens, 0, 1)?).map(make_numeral)
        },
    }
}

fn rule_fractions() -> Rule {
    rule! {
        name: "fractional number",
        pattern: [
            re!(r"(\d+)/(\d+)")
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            let numerator = parse_number(regex_group(tokens, 0, 1)?)?;
            let denominator = parse_number(regex_group(tokens, 0, 2)?)?;
            (denominator.abs() > f64::EPSILON).then(|| make_numeral(numerator / denominator))
        },
    }
}

/// Digit runs: `0`, `33`, `0033`.
fn rule_integers() -> Rule {
    rule! {
        name: "integer digits",
        pattern: [
            re!(r"(\d+)")
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            parse_number(regex_group(tokens, 0, 1)?).map(make_numeral)
        },
    }
}

/// Comma-grouped numbers: `1,234`, `100,000.0`.
fn rule_commas() -> Rule {
    rule! {
        name: "comma-separated numbers",
        pattern: [
            re!(r"(\d+(?:,\d\d\d)+(?:\.\d+)?)")
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            parse_number(regex_group(tokens, 0, 1)?).map(make_numeral)
        },
    }
}

/// Magnitude suffixes glued to the number: `1.2k`, `3M`, `.0012G`.
fn rule_suffixes() -> Rule {
    rule! {
        name: "suffixes (K,M,G)",
        pattern: [
            re!(r"(?i)(\d+\.\d+|\d+|\.\d+)([kmg])\b")
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            let base = parse_number(regex_group(tokens, 0, 1)?)?;
            let factor = match regex_group(tokens, 0, 2)? {
                "k" => 1e3,
                "m" => 1e6,
                "g" => 1e9,
                _ => return None,
            };
            Some(make_numeral(base * factor))
        },
    }
}

/// "minus 1,200,000" written as one run.
fn rule_negative_prefix() -> Rule {
    rule! {
        name: "negative numbers (prefixed)",
        pattern: [
            re!(r"(?ix)
                \b(?:minus|negative)        # leading sign words
                \s*
                (                           # numeric portion
                    (?:\d{1,3}(?:,\d{3})+)  # numbers with at least one comma
                    |\d+                    # or plain digits
                )
                (?:\.\d+)?
                \b
            ")
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            parse_number(regex_group(tokens, 0, 1)?).map(|v| make_numeral(-v))
        },
    }
}

/// A sign (hyphen or word) followed by any positive numeral node.
///
/// A hyphen glued to a preceding word character is a separator, as in
/// `2013-02-15` or `555-1234`, never a sign.
fn rule_negative() -> Rule {
    rule! {
        name: "negative numbers",
        pattern: [
            re!(r"(?ix)
                \B(?:-\s*negative|-\s*minus|-)\s*  # hyphen-led signs bind tightly
                |(?:\bminus\b|\bnegative\b)\s+    # word signs consume trailing space
            "),
            pred!(is_positive)
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            Some(make_numeral(-numeral_at(tokens, 1)?.value))
        },
    }
}

fn rule_dozen() -> Rule {
    rule! {
        name: "a dozen of",
        pattern: [
            re!(r"(?i)\b(?:a\s+)?dozens?(?:\s+of)?\b")
        ],
        prod: |_tokens: &[Token]| -> Option<NumeralData> {
            Some(make_numeral(12.0))
        },
    }
}

/// "two dozen", "200 dozens"
fn rule_dozen_multiplication() -> Rule {
    rule! {
        name: "dozen as multiplier",
        pattern: [
            pred!(is_numeral),
            re!(r"(?i)\s*\bdozens?\b")
        ],
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            Some(make_numeral(numeral_at(tokens, 0)?.value * 12.0))
        },
    }
}

pub fn get() -> Vec<Rule> {
    vec![
        rule_integers(),
        rule_to_nineteen(),
        rule_tens(),
        rule_powers_of_ten(),
        rule_composite_tens(),
        rule_skip_hundreds(),
        rule_skip_hundreds_composite(),
        rule_decimals(),
        rule_fractions(),
        rule_commas(),
        rule_suffixes(),
        rule_dot_spelled_out(),
        rule_leading_dot_spelled_out(),
        rule_multiply(),
        rule_sum(),
        rule_sum_and(),
        rule_thousand_and_remainder(),
        rule_and_a_half(),
        rule_negative_prefix(),
        rule_negative(),
        rule_legal_parentheses(),
        rule_dozen(),
        rule_dozen_multiplication(),
    ]
}
