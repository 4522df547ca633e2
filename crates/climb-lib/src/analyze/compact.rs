//! Subexpression deduplication.
//!
//! Walks every rule outside recursion classes and replaces each child whose
//! reconstructed source was already seen by the first expression with that
//! source. Recursion class members are left alone, and so are rules inside
//! classes. Indices are not reassigned: a dropped expression keeps its slot
//! and records in `alias` which expression took over.

use indexmap::IndexMap;

use crate::graph::{ExprId, Graph};

/// Returns the number of expressions dropped.
pub(crate) fn compact(graph: &mut Graph) -> usize {
    let mut compactor = Compactor {
        sources: IndexMap::new(),
        dropped: 0,
    };

    for rule in graph.rules() {
        if graph[rule].class.is_none() {
            compactor.visit(graph, rule);
        }
    }

    compactor.dropped
}

struct Compactor {
    sources: IndexMap<String, ExprId>,
    dropped: usize,
}

impl Compactor {
    /// Pre-order walk, so the first copy met in reading order survives.
    fn visit(&mut self, graph: &mut Graph, root: ExprId) {
        // (parent, next child slot)
        let mut frames: Vec<(ExprId, usize)> = vec![(root, 0)];
        while let Some((parent, slot)) = frames.pop() {
            let Some(&child) = graph[parent].kind.children().get(slot) else {
                continue;
            };
            frames.push((parent, slot + 1));

            let (kept, descend) = self.alias(graph, child);
            if kept != child {
                graph.get_mut(parent).kind.children_mut()[slot] = kept;
            }
            if descend {
                frames.push((kept, 0));
            }
        }
    }

    /// Expression to use in place of `id`, and whether to walk into it.
    fn alias(&mut self, graph: &mut Graph, id: ExprId) -> (ExprId, bool) {
        if graph[id].class.is_some() {
            return (id, false);
        }

        if let Some(&found) = self.sources.get(&graph[id].source) {
            if found != id {
                self.drop_subtree(graph, id, found);
            }
            return (found, false);
        }

        self.sources.insert(graph[id].source.clone(), id);
        (id, !graph[id].named)
    }

    fn drop_subtree(&mut self, graph: &mut Graph, id: ExprId, found: ExprId) {
        let mut stack = vec![id];
        while let Some(e) = stack.pop() {
            let expr = graph.get_mut(e);
            if expr.named || expr.class.is_some() || expr.alias.is_some() {
                continue;
            }
            expr.alias = Some(found);
            self.dropped += 1;
            stack.extend(expr.kind.children().iter().copied());
        }
    }
}
