pub mod rules;

#[cfg(test)]
mod tests;
