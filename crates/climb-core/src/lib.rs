#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for climb.
//!
//! - **Grammar input**: the rule/expression model a front end hands to the
//!   analysis, with a JSON reader and a small builder vocabulary
//! - **Relations**: square bit matrices with transitive closure
//! - **Presentation helpers**: ANSI colors and printable escaping

pub mod colors;
pub mod grammar;
pub mod matrix;
pub mod utils;

#[cfg(test)]
mod matrix_tests;
#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
pub use matrix::BitMatrix;
pub use vob::Vob;
