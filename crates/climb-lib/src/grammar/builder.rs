use climb_core::grammar::GrammarDef;

use crate::analyze::{self, Relations};
use crate::diagnostics::Diagnostics;
use crate::graph::{self, Graph};
use crate::{Error, Result};

use super::Grammar;

#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarConfig {
    /// Run compaction right after diagnosis.
    pub compact: bool,
}

pub struct GrammarBuilder<'d> {
    def: &'d GrammarDef,
    config: GrammarConfig,
}

impl<'d> GrammarBuilder<'d> {
    pub fn new(def: &'d GrammarDef) -> Self {
        Self {
            def,
            config: GrammarConfig::default(),
        }
    }

    pub fn with_compaction(mut self, compact: bool) -> Self {
        self.config.compact = compact;
        self
    }

    /// Build the graph, resolve references and assign indices.
    pub fn build(self) -> Result<GrammarIndexed> {
        let mut diag = Diagnostics::new();
        let mut graph = graph::build_graph(self.def);

        graph::resolve_references(&mut graph, &mut diag);
        if diag.has_errors() {
            return Err(Error::Resolve(diag));
        }

        let mut graph = graph::assign_indices(graph);
        graph::reconstruct_sources(&mut graph);

        Ok(GrammarIndexed {
            graph,
            diag,
            config: self.config,
        })
    }
}

/// Resolved and indexed, not yet analyzed.
pub struct GrammarIndexed {
    graph: Graph,
    diag: Diagnostics,
    config: GrammarConfig,
}

impl GrammarIndexed {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn analyze(mut self) -> Grammar {
        let attr_iterations = analyze::compute_attributes(&mut self.graph);
        let relations = Relations::compute(&self.graph);
        let classes = analyze::build_classes(&mut self.graph, &relations, &mut self.diag);
        analyze::diagnose(&self.graph, &relations, &classes, &mut self.diag);

        let mut grammar = Grammar {
            graph: self.graph,
            relations,
            classes,
            diagnostics: self.diag,
            attr_iterations,
            compacted: None,
        };
        if self.config.compact {
            grammar.compact();
        }
        grammar
    }
}
