//! Rule families, one per recognizer.
//!
//! Families that read amounts (ordinal composites, percentages, units,
//! date/time) are run together with the numeral rules, whose nodes they
//! consume through predicates.

pub mod contact;
pub mod numeral;
pub mod ordinal;
pub mod percentage;
pub mod time;
pub mod units;
