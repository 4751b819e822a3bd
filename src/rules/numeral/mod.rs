pub mod helpers;
pub mod predicates;
pub mod rules;

#[cfg(test)]
mod tests;
