//! Call relations between expressions and their closures.
//!
//! - `first[e, f]`: `e` may call `f` before consuming any input
//! - `calls[e, f]`: `e` may call `f`
//! - `clean[e, f]`: `e` may call `f` such that the rest of `e` can consume
//!   nothing, which is what a cycle is made of
//!
//! `First` and `Clean` are the transitive closures.

use climb_core::BitMatrix;

use crate::graph::{ExprId, ExprKind, Graph};

#[derive(Debug, Clone)]
pub struct Relations {
    pub first: BitMatrix,
    pub calls: BitMatrix,
    pub clean: BitMatrix,
    pub first_closure: BitMatrix,
    pub clean_closure: BitMatrix,
}

impl Relations {
    pub fn compute(graph: &Graph) -> Self {
        let size = graph.len();
        let mut first = BitMatrix::new(size);
        let mut calls = BitMatrix::new(size);
        let mut clean = BitMatrix::new(size);

        for id in graph.ids() {
            let e = id.index();
            match &graph[id].kind {
                ExprKind::Rule(_) | ExprKind::Choice(_) => {
                    let args = graph[id].kind.children();
                    for a in args {
                        first.set(e, a.index());
                        calls.set(e, a.index());
                        clean.set(e, a.index());
                    }
                }
                ExprKind::Sequence(args) => {
                    for a in args {
                        first.set(e, a.index());
                        if !graph[*a].attrs.nul {
                            break;
                        }
                    }
                    for a in args {
                        calls.set(e, a.index());
                    }
                    for (i, a) in args.iter().enumerate() {
                        if graph[*a].is_terminal() {
                            continue;
                        }
                        let others_nullable = args
                            .iter()
                            .enumerate()
                            .all(|(j, b)| j == i || graph[*b].attrs.nul);
                        if others_nullable {
                            clean.set(e, a.index());
                        }
                    }
                }
                ExprKind::And(_)
                | ExprKind::Not(_)
                | ExprKind::Plus(_)
                | ExprKind::Star(_)
                | ExprKind::Query(_)
                | ExprKind::PlusPlus(_)
                | ExprKind::StarPlus(_)
                | ExprKind::Is(_)
                | ExprKind::IsNot(_) => {
                    for a in graph[id].kind.children() {
                        first.set(e, a.index());
                        calls.set(e, a.index());
                    }
                }
                ExprKind::Ref(_)
                | ExprKind::StringLit(_)
                | ExprKind::CharClass { .. }
                | ExprKind::Range(..)
                | ExprKind::Any
                | ExprKind::End => {}
            }
        }

        let first_closure = first.closure();
        let clean_closure = clean.closure();
        Self {
            first,
            calls,
            clean,
            first_closure,
            clean_closure,
        }
    }

    /// Whether `id` can call itself before consuming input.
    pub fn is_left_recursive(&self, id: ExprId) -> bool {
        self.first_closure.at(id.index(), id.index())
    }
}
