//! Static analysis over an indexed expression graph.
//!
//! Stages: attributes → relations → recursion classes → diagnose.
//! `compact` is optional and runs after diagnosis.

mod attributes;
mod compact;
mod diagnose;
mod recursion;
mod relations;

#[cfg(test)]
mod compact_tests;
#[cfg(test)]
mod diagnose_tests;

pub use recursion::RecClass;
pub use relations::Relations;

pub(crate) use attributes::compute_attributes;
#[cfg(test)]
pub(crate) use attributes::attribute_pass;
pub(crate) use compact::compact;
pub(crate) use diagnose::diagnose;
pub(crate) use recursion::build_classes;
