use crate::{NumeralData, Token, TokenKind};

/// Capture group `group` of the regex token at `tokens[index]`.
///
/// Groups are already lowercased by the parser.
pub fn regex_group(tokens: &[Token], index: usize, group: usize) -> Option<&str> {
    match &tokens.get(index)?.kind {
        TokenKind::RegexMatch(groups) => groups.get(group).map(String::as_str),
        _ => None,
    }
}

/// Whole-match text of the regex token at `tokens[index]`.
pub fn regex_text(tokens: &[Token], index: usize) -> Option<&str> {
    regex_group(tokens, index, 0)
}

/// Numeric value of the numeral token at `tokens[index]`.
pub fn numeral_at(tokens: &[Token], index: usize) -> Option<&NumeralData> {
    match &tokens.get(index)?.kind {
        TokenKind::Numeral(data) => Some(data),
        _ => None,
    }
}

/// Build a `NumeralData`, inferring grain and whether the value can act as
/// a multiplier (exact powers of ten such as 100 or 1000).
pub fn make_numeral(value: f64) -> NumeralData {
    let grain = infer_grain(value);
    let multipliable = grain.is_some_and(|g| (value.abs() - 10f64.powi(g as i32)).abs() < f64::EPSILON);
    NumeralData { value, grain, multipliable }
}

/// Parse a number string, ignoring `,` group separators.
pub fn parse_number(s: &str) -> Option<f64> {
    s.replace(',', "").parse::<f64>().ok()
}

/// Count of trailing zeros of an integral value, or `None` for fractions
/// and values without trailing zeros.
pub fn infer_grain(value: f64) -> Option<u32> {
    let abs_val = value.abs();
    if abs_val == 0.0 || value.fract().abs() > f64::EPSILON || abs_val >= i64::MAX as f64 {
        return None;
    }

    let mut n = abs_val as i64;
    let mut grain = 0u32;
    while n % 10 == 0 {
        grain += 1;
        n /= 10;
    }

    if grain > 0 { Some(grain) } else { None }
}

/// Turn an integer into its fractional decimal form (12 -> 0.12).
pub fn decimals_to_double(value: f64) -> f64 {
    let abs_val = value.abs();
    if abs_val == 0.0 {
        return 0.0;
    }
    let mut n = abs_val as u64;
    let mut digits = 0i32;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    value / 10f64.powi(digits)
}

/// Multiply two numerals; the product keeps the multiplier's grain.
pub fn multiply_numerals(base: &NumeralData, multiplier: &NumeralData) -> NumeralData {
    NumeralData { value: base.value * multiplier.value, grain: multiplier.grain, multipliable: false }
}

/// Canonical string form of a resolved number: integers without a decimal
/// point, other values with at most six decimals.
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() <= 1e-9 * value.abs().max(1.0) {
        if rounded == 0.0 {
            return "0".to_string();
        }
        return format!("{rounded:.0}");
    }
    let fixed = format!("{value:.6}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_integers_without_fraction() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-504.0), "-504");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(75.3 * 1e6), "75300000");
        assert_eq!(format_number(3e9), "3000000000");
    }

    #[test]
    fn formats_fractions_with_trimmed_decimals() {
        assert_eq!(format_number(0.2), "0.2");
        assert_eq!(format_number(1.1), "1.1");
        assert_eq!(format_number(10.0 / 3.0), "3.333333");
    }

    #[test]
    fn grain_counts_trailing_zeros() {
        assert_eq!(infer_grain(1000.0), Some(3));
        assert_eq!(infer_grain(120.0), Some(1));
        assert_eq!(infer_grain(7.0), None);
        assert_eq!(infer_grain(0.5), None);
        assert!(make_numeral(100.0).multipliable);
        assert!(!make_numeral(120.0).multipliable);
    }

    #[test]
    fn decimals_shift_below_one() {
        assert!((decimals_to_double(12.0) - 0.12).abs() < 1e-12);
        assert!((decimals_to_double(7.0) - 0.7).abs() < 1e-12);
        assert!((decimals_to_double(100.0) - 0.1).abs() < 1e-12);
    }
}
