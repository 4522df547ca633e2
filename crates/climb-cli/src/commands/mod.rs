pub mod check;
pub mod dump;
pub mod exec;
pub mod grammar_loader;

#[cfg(test)]
mod exec_tests;
