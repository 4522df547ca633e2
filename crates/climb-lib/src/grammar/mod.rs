//! Grammar processing pipeline.
//!
//! Stages: build → resolve → index → source → attributes → relations →
//! recursion classes → diagnose, then optionally compact.
//!
//! Resolution errors stop the pipeline. Everything after that always runs to
//! completion and records its findings; use [`Grammar::is_valid`] to check
//! whether any stage produced errors.

mod builder;
mod dump;

#[cfg(test)]
mod mod_tests;

pub use builder::{GrammarBuilder, GrammarConfig, GrammarIndexed};
pub use dump::GrammarPrinter;

use climb_core::grammar::GrammarDef;

use crate::analyze::{self, RecClass, Relations};
use crate::ascent::AscentPlan;
use crate::diagnostics::Diagnostics;
use crate::graph::{ExprId, Graph};
use crate::{Error, Result};

/// An analyzed grammar.
///
/// Create with [`GrammarBuilder`] or `Grammar::try_from(&def)`. Check
/// [`is_valid`](Self::is_valid) or [`diagnostics`](Self::diagnostics) to
/// find out whether a parser can be derived from it.
#[derive(Debug, Clone)]
pub struct Grammar {
    graph: Graph,
    relations: Relations,
    classes: Vec<RecClass>,
    diagnostics: Diagnostics,
    attr_iterations: usize,
    compacted: Option<usize>,
}

impl Grammar {
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn dump_diagnostics(&self) -> String {
        self.diagnostics.render()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn relations(&self) -> &Relations {
        &self.relations
    }

    pub fn classes(&self) -> &[RecClass] {
        &self.classes
    }

    /// Class `id` belongs to, if it is left-recursive.
    pub fn class_of(&self, id: ExprId) -> Option<&RecClass> {
        self.graph[id].class.map(|c| &self.classes[c.index()])
    }

    /// Members of `class` that have `id` as an immediate first.
    pub fn have_as_first(&self, class: &RecClass, id: ExprId) -> Vec<ExprId> {
        class.have_as_first(&self.relations.first, id)
    }

    /// Iterations the attribute fixpoint needed.
    pub fn attr_iterations(&self) -> usize {
        self.attr_iterations
    }

    /// Expressions dropped by compaction, `None` when it has not run.
    pub fn compacted(&self) -> Option<usize> {
        self.compacted
    }

    /// Merge duplicate subexpressions outside recursion classes.
    ///
    /// Indices stay valid; merged expressions are skipped by
    /// [`Graph::subs`] and [`Graph::terms`]. Running it again is a no-op.
    pub fn compact(&mut self) -> usize {
        if let Some(n) = self.compacted {
            return n;
        }
        let n = analyze::compact(&mut self.graph);
        self.compacted = Some(n);
        n
    }

    /// Procedure structure of the recursive-ascent parser.
    ///
    /// Refused when the analysis reported errors.
    pub fn plan(&self) -> Result<AscentPlan> {
        if !self.is_valid() {
            return Err(Error::Generation(self.diagnostics.clone()));
        }
        Ok(AscentPlan::new(self))
    }

    pub fn printer(&self) -> GrammarPrinter<'_> {
        GrammarPrinter::new(self)
    }
}

impl TryFrom<&GrammarDef> for Grammar {
    type Error = Error;

    fn try_from(def: &GrammarDef) -> Result<Self> {
        Ok(GrammarBuilder::new(def).build()?.analyze())
    }
}

impl TryFrom<GrammarDef> for Grammar {
    type Error = Error;

    fn try_from(def: GrammarDef) -> Result<Self> {
        Self::try_from(&def)
    }
}
