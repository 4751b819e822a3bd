use crate::engine::BucketMask;
use crate::rules::numeral::helpers::{numeral_at, regex_group};
use crate::rules::numeral::predicates::{is_numeral, is_positive};
use crate::rules::units::tables::{
    AGE_UNITS, CURRENCY_SYMBOLS, CURRENCY_WORDS, MEASURE_UNITS, TEMPERATURE_UNITS, UnitInfo, lookup,
};
use crate::{Dimension, QuantityData, Rule, Token, UnitFamily};

fn quantity(family: UnitFamily, value: f64, info: UnitInfo) -> QuantityData {
    QuantityData { family, value, unit: info.unit, iso_currency: info.iso }
}

// --- age ---------------------------------------------------------------------

/// `95 years old`, `ten-month-old`
fn rule_age_old() -> Rule {
    rule! {
        name: "<number> <unit> old",
        pattern: [
            pred!(is_positive),
            re!(r"(?i)[\s\-]*\b(years?|yrs?|months?|weeks?|days?)[\s\-]+old\b"),
        ],
        required_phrases: ["old"],
        deps: [Dimension::Numeral],
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let info = lookup(&AGE_UNITS, regex_group(tokens, 1, 1)?)?;
            Some(quantity(UnitFamily::Age, numeral_at(tokens, 0)?.value, info))
        },
    }
}

/// `45 years of age`
fn rule_age_of_age() -> Rule {
    rule! {
        name: "<number> <unit> of age",
        pattern: [
            pred!(is_positive),
            re!(r"(?i)\s*\b(years?|months?)\s+of\s+age\b"),
        ],
        required_phrases: ["age"],
        deps: [Dimension::Numeral],
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let info = lookup(&AGE_UNITS, regex_group(tokens, 1, 1)?)?;
            Some(quantity(UnitFamily::Age, numeral_at(tokens, 0)?.value, info))
        },
    }
}

/// `aged 30`, `age 30`
fn rule_aged_number() -> Rule {
    rule! {
        name: "aged <number>",
        pattern: [
            re!(r"(?i)\bage[d]?\s+"),
            pred!(is_positive),
        ],
        optional_phrases: ["age", "aged"],
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let info = lookup(&AGE_UNITS, "year")?;
            Some(quantity(UnitFamily::Age, numeral_at(tokens, 1)?.value, info))
        },
    }
}

// --- currency ----------------------------------------------------------------

/// `$ 20`, `€3.5`, `US$ 75.3 million`
fn rule_currency_symbol_prefix() -> Rule {
    rule! {
        name: "<currency symbol> <number>",
        pattern: [
            re!(r"(?i)(us\$|c\$|a\$|\$|€|£|¥)\s*"),
            pred!(is_numeral),
        ],
        buckets: BucketMask::CURRENCY_SYMBOL.bits(),
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let info = lookup(&CURRENCY_SYMBOLS, regex_group(tokens, 0, 1)?)?;
            Some(quantity(UnitFamily::Currency, numeral_at(tokens, 1)?.value, info))
        },
    }
}

/// `20$`, `15 €`
fn rule_currency_symbol_suffix() -> Rule {
    rule! {
        name: "<number> <currency symbol>",
        pattern: [
            pred!(is_numeral),
            re!(r"\s*(\$|€|£|¥)"),
        ],
        buckets: BucketMask::CURRENCY_SYMBOL.bits(),
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let info = lookup(&CURRENCY_SYMBOLS, regex_group(tokens, 1, 1)?)?;
            Some(quantity(UnitFamily::Currency, numeral_at(tokens, 0)?.value, info))
        },
    }
}

/// `75.3 million dollars`, `20 bucks`, `5 pounds sterling`
fn rule_currency_word_suffix() -> Rule {
    rule! {
        name: "<number> <currency>",
        pattern: [
            pred!(is_numeral),
            re!(r"(?i)\s*\b((?:us|canadian|australian)\s+dollars?|dollars?|bucks?|usd|cad|aud|cents?|penny|pennies|euros?|eur|(?:pounds?\s+sterling)|british\s+pounds?|gbp|yen|jpy|yuan|renminbi|cny|rupees?|inr|swiss\s+francs?|chf|pesos?)\b"),
        ],
        deps: [Dimension::Numeral],
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let info = lookup(&CURRENCY_WORDS, regex_group(tokens, 1, 1)?)?;
            Some(quantity(UnitFamily::Currency, numeral_at(tokens, 0)?.value, info))
        },
    }
}

/// `USD 20`, `EUR 3.5`
fn rule_currency_code_prefix() -> Rule {
    rule! {
        name: "<currency code> <number>",
        pattern: [
            re!(r"(?i)\b(usd|cad|aud|eur|gbp|jpy|cny|inr|chf)\s*"),
            pred!(is_numeral),
        ],
        buckets: BucketMask::HAS_DIGITS.bits(),
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let info = lookup(&CURRENCY_WORDS, regex_group(tokens, 0, 1)?)?;
            Some(quantity(UnitFamily::Currency, numeral_at(tokens, 1)?.value, info))
        },
    }
}

// --- dimension ---------------------------------------------------------------

/// `6 miles`, `5km`, `3.5 kg`, `1 gallon`, `100 mph`
fn rule_measure() -> Rule {
    rule! {
        name: "<number> <measure unit>",
        pattern: [
            pred!(is_numeral),
            re!(r"(?i)\s*(?:-\s*)?(miles\s+per\s+hour|kilometers\s+per\s+hour|km/h|mph|miles?|mi|kilomet(?:er|re)s?|km|centimet(?:er|re)s?|cm|millimet(?:er|re)s?|mm|met(?:er|re)s?|m|foot|feet|ft|inch(?:es)?|yards?|yd|kilograms?|kilos?|kg|grams?|g|pounds?|lbs?|ounces?|oz|tons?|tonnes?|millilit(?:er|re)s?|ml|lit(?:er|re)s?|l|gallons?|gal|(?:kilo|mega|giga|tera)?bytes?|kb|mb|gb|tb)\b"),
        ],
        deps: [Dimension::Numeral],
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let info = lookup(&MEASURE_UNITS, regex_group(tokens, 1, 1)?)?;
            Some(quantity(UnitFamily::Measure, numeral_at(tokens, 0)?.value, info))
        },
    }
}

// --- temperature -------------------------------------------------------------

/// `30 degrees celsius`, `-5 fahrenheit`
fn rule_temperature_named_scale() -> Rule {
    rule! {
        name: "<number> [degrees] <scale>",
        pattern: [
            pred!(is_numeral),
            re!(r"(?i)\s*(?:°|\bdeg(?:rees?)?\b)?\s*\b(celsius|centigrade|fahrenheit|kelvin)\b"),
        ],
        optional_phrases: ["celsius", "centigrade", "fahrenheit", "kelvin"],
        deps: [Dimension::Numeral],
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let info = lookup(&TEMPERATURE_UNITS, regex_group(tokens, 1, 1)?)?;
            Some(quantity(UnitFamily::Temperature, numeral_at(tokens, 0)?.value, info))
        },
    }
}

/// `40°C`, `98.6 °F`, `30 degrees F`
fn rule_temperature_scale_letter() -> Rule {
    rule! {
        name: "<number> °<scale letter>",
        pattern: [
            pred!(is_numeral),
            re!(r"(?i)\s*(?:°|\bdegrees?\s+)\s*([cfk])\b"),
        ],
        buckets: BucketMask::HAS_DEGREE.bits(),
        deps: [Dimension::Numeral],
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let info = lookup(&TEMPERATURE_UNITS, regex_group(tokens, 1, 1)?)?;
            Some(quantity(UnitFamily::Temperature, numeral_at(tokens, 0)?.value, info))
        },
    }
}

/// `30 degrees`, `12°`
fn rule_temperature_bare_degrees() -> Rule {
    rule! {
        name: "<number> degrees",
        pattern: [
            pred!(is_numeral),
            re!(r"(?i)\s*(?:°|\bdegrees?\b)"),
        ],
        buckets: BucketMask::HAS_DEGREE.bits(),
        deps: [Dimension::Numeral],
        prod: |tokens: &[Token]| -> Option<QuantityData> {
            let value = numeral_at(tokens, 0)?.value;
            Some(quantity(UnitFamily::Temperature, value, UnitInfo { unit: "Degree", iso: None }))
        },
    }
}

pub fn age() -> Vec<Rule> {
    vec![rule_age_old(), rule_age_of_age(), rule_aged_number()]
}

pub fn currency() -> Vec<Rule> {
    vec![
        rule_currency_symbol_prefix(),
        rule_currency_symbol_suffix(),
        rule_currency_word_suffix(),
        rule_currency_code_prefix(),
    ]
}

pub fn dimension() -> Vec<Rule> {
    vec![rule_measure()]
}

pub fn temperature() -> Vec<Rule> {
    vec![rule_temperature_named_scale(), rule_temperature_scale_letter(), rule_temperature_bare_degrees()]
}
