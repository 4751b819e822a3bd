//! Number-with-unit rules for the age, currency, dimension and temperature
//! recognizers. All four produce `QuantityData`, told apart by `UnitFamily`.

pub mod rules;
pub mod tables;

#[cfg(test)]
mod tests;
