//! Grammar input model.
//!
//! This is what a front end hands to the analysis: rules in declaration
//! order, each with ordered alternatives, optional semantic actions per
//! alternative, and an optional diagnostic name. Rule bodies are plain
//! expression trees; names of other rules appear as [`ExprDef::Ref`].
//!
//! Grammars can be read from JSON ([`GrammarDef::from_json`]) or assembled
//! in code with the helpers in [`dsl`].

pub mod dsl;
mod json;
mod types;

#[cfg(test)]
mod json_tests;

pub use json::GrammarError;
pub use types::{ActionDef, AltDef, ExprDef, GrammarDef, RuleDef};
