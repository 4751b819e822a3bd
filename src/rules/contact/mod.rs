//! Phone number and email rules. Both are purely lexical: one regex each,
//! no composition with other families.

pub mod rules;

#[cfg(test)]
mod tests;
