//! Date and time rules.
//!
//! Rules build `TimeExpr` values relative to an unknown reference time;
//! `normalize` anchors them once a context is known.

pub mod helpers;
pub mod normalize;
pub mod predicates;
pub mod rules;
mod rules_dates;
mod rules_ranges;
mod rules_relative;
mod rules_times;

#[cfg(test)]
mod tests;
