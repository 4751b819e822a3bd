use crate::{Token, TokenKind};

/// Any numeral token.
pub fn is_numeral(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(_))
}

/// Positive numeral value (> 0).
pub fn is_positive(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.value > 0.0)
}

/// Numeral with a grain (power-of-ten information).
pub fn has_grain(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.grain.is_some())
}

/// Numeral in `[MIN, MAX)`.
pub fn number_between<const MIN: i64, const MAX: i64>(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.value >= MIN as f64 && nd.value < MAX as f64)
}

/// Numeral usable as a multiplier in composite numbers ("hundred", "million").
pub fn is_multipliable(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.multipliable)
}

pub fn is_integer(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.value.fract().abs() < f64::EPSILON)
}

/// Tens numeral 20, 30, ..., 90.
pub fn is_round_tens(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd)
        if nd.value >= 20.0
            && nd.value <= 90.0
            && (nd.value % 10.0).abs() < f64::EPSILON)
}
