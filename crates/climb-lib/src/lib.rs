//! Climb: left-recursion analysis and recursive ascent for PEG grammars.
//!
//! # Example
//!
//! ```
//! use climb_core::grammar::dsl::*;
//! use climb_core::grammar::{GrammarDef, RuleDef};
//! use climb_lib::Grammar;
//!
//! // E = E "+" T / T ; T = "a" ;
//! let def = GrammarDef::new()
//!     .rule(RuleDef::new("E").alt(seq([name("E"), lit("+"), name("T")])).alt(name("T")))
//!     .rule(RuleDef::new("T").alt(lit("a")));
//!
//! let grammar = Grammar::try_from(&def).expect("references resolve");
//! assert!(grammar.is_valid());
//! assert_eq!(grammar.classes()[0].name, "E");
//! eprintln!("{}", grammar.dump_diagnostics());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod ascent;
pub mod diagnostics;
pub mod engine;
pub mod grammar;
pub mod graph;

mod invariants;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use grammar::{Grammar, GrammarBuilder, GrammarIndexed};

/// Errors that stop the pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Rule names could not be resolved; nothing further was analyzed.
    #[error("grammar resolution failed with {} errors", .0.error_count())]
    Resolve(Diagnostics),

    /// The analysis found errors, so no parser can be derived.
    #[error("parser generation refused: grammar has {} errors", .0.error_count())]
    Generation(Diagnostics),

    /// Execution fuel exhausted (too many interpreter steps).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// The requested start rule does not exist.
    #[error("no rule named `{0}`")]
    UnknownRule(String),
}

/// Result type for grammar operations.
pub type Result<T> = std::result::Result<T, Error>;
