use crate::rules::time::helpers::time_or_hour;
use crate::time_expr::{DateExpr, TimeExpr};
use crate::{Token, TokenKind};

pub fn is_date(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::TimeExpr(TimeExpr::Date(_)))
}

/// Weekday name without this/next/last.
pub fn is_bare_weekday(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::TimeExpr(TimeExpr::Date(DateExpr::Weekday { shift: None, .. })))
}

pub fn is_time_of_day(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::TimeExpr(TimeExpr::Time(_)))
}

/// Clock time still missing its am/pm ("10:30", "at 5").
pub fn is_ambiguous_time(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::TimeExpr(TimeExpr::Time(time)) if time.ambiguous)
}

pub fn is_time_or_hour(t: &Token) -> bool {
    time_or_hour(t).is_some()
}

/// Integer numeral usable as a clock hour with am/pm (1..=12).
pub fn is_meridiem_hour(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.value.fract() == 0.0 && (1.0..=12.0).contains(&nd.value))
}

pub fn is_duration(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::TimeExpr(TimeExpr::Duration { .. }))
}

pub fn is_positive_integer(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.value.fract() == 0.0 && nd.value > 0.0 && nd.value < 1e9)
}
