//! Reference interpreter.
//!
//! Runs an error-free grammar directly over its graph, using recursive
//! ascent (driven by the [`AscentPlan`](crate::ascent::AscentPlan)) for
//! left-recursive classes and ordinary PEG semantics everywhere else.

pub mod error;
mod frame;
pub mod interpreter;
pub mod phrase;
pub mod trace;

#[cfg(test)]
mod interpreter_tests;
#[cfg(test)]
mod phrase_tests;

pub use error::RuntimeError;
pub use interpreter::{DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL, Engine};
pub use phrase::Phrase;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
