use crate::engine::BucketMask;
use crate::rules::numeral::helpers::regex_text;
use crate::{EmailData, PhoneNumberData, Rule, Token};

/// Separators stripped; 7 to 15 digits are accepted.
fn phone_digits(text: &str) -> Option<PhoneNumberData> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    (7..=15).contains(&digits.len()).then_some(PhoneNumberData { digits })
}

/// `(206) 555-0100`, `+1 (206) 555 0100`, `( 19 ) 38294427`
fn rule_phone_area_code() -> Rule {
    rule! {
        name: "phone number (area code)",
        pattern: [re!(r"(?:\+\d{1,3}[\s.\-]?)?\(\s*\d{1,4}\s*\)\s*[.\-]?\s*\d{2,}(?:[\s.\-]\d{2,}){0,2}\b")],
        buckets: BucketMask::HAS_DIGITS.bits(),
        prod: |tokens: &[Token]| -> Option<PhoneNumberData> {
            phone_digits(regex_text(tokens, 0)?)
        },
    }
}

/// `+44 20 7946 0958`, `+1-206-555-0100`
fn rule_phone_international() -> Rule {
    rule! {
        name: "phone number (international)",
        pattern: [re!(r"\+\d{1,3}(?:[\s.\-]?\d{2,4}){2,4}\b")],
        buckets: BucketMask::HAS_DIGITS.bits(),
        prod: |tokens: &[Token]| -> Option<PhoneNumberData> {
            phone_digits(regex_text(tokens, 0)?)
        },
    }
}

/// `206-555-0100`, `206.555.0100`, `555-0100`
fn rule_phone_grouped() -> Rule {
    rule! {
        name: "phone number (grouped digits)",
        pattern: [re!(r"\b(?:1[\s.\-])?(?:\d{3}[\s.\-])?\d{3}[.\-]\d{4}\b")],
        buckets: BucketMask::HAS_DIGITS.bits(),
        prod: |tokens: &[Token]| -> Option<PhoneNumberData> {
            phone_digits(regex_text(tokens, 0)?)
        },
    }
}

fn rule_email() -> Rule {
    rule! {
        name: "email address",
        pattern: [re!(r"(?i)\b[a-z0-9][a-z0-9._%+\-]*@[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?)*\.[a-z]{2,}\b")],
        buckets: BucketMask::HAS_AT.bits(),
        prod: |tokens: &[Token]| -> Option<EmailData> {
            Some(EmailData { address: regex_text(tokens, 0)?.to_string() })
        },
    }
}

pub fn phone_number() -> Vec<Rule> {
    vec![rule_phone_area_code(), rule_phone_international(), rule_phone_grouped()]
}

pub fn email() -> Vec<Rule> {
    vec![rule_email()]
}
