//! Attribute fixpoint.
//!
//! Terminals start with their preset attributes; every other expression
//! starts all-false. One iteration recomputes each non-terminal in index
//! order from its children and ORs the result in, so attributes only move
//! from false to true. Iteration stops when the number of true attributes
//! over the whole graph no longer changes.

use crate::graph::{Attrs, ExprId, ExprKind, Graph};

/// Run the fixpoint and return the number of iterations it took.
pub(crate) fn compute_attributes(graph: &mut Graph) -> usize {
    let mut iterations = 0;
    let mut count = total(graph);

    loop {
        iterations += 1;
        attribute_pass(graph);

        let next = total(graph);
        if next == count {
            return iterations;
        }
        count = next;
    }
}

/// One sweep over the non-terminals in index order.
pub(crate) fn attribute_pass(graph: &mut Graph) {
    for i in 0..graph.nonterminal_count() {
        let id = ExprId::new(i);
        let step = step(graph, id);
        graph.get_mut(id).attrs.merge(step);
    }
}

fn total(graph: &Graph) -> usize {
    graph.ids().map(|id| graph[id].attrs.count()).sum()
}

/// Attributes implied by the current attributes of the children.
fn step(graph: &Graph, id: ExprId) -> Attrs {
    let attrs = |e: ExprId| graph[e].attrs;

    match &graph[id].kind {
        ExprKind::Rule(rule) => {
            let mut out = alternatives(graph, &rule.alts);
            // A boolean action can reject a success, so that alternative may fail.
            out.fal = rule
                .alts
                .iter()
                .enumerate()
                .all(|(i, a)| attrs(*a).fal || rule.has_boolean_success(i));
            out
        }
        ExprKind::Choice(args) => alternatives(graph, args),
        ExprKind::Sequence(args) => {
            let all = |f: fn(&Attrs) -> bool| args.iter().all(|a| f(&attrs(*a)));
            let any = |f: fn(&Attrs) -> bool| args.iter().any(|a| f(&attrs(*a)));
            Attrs {
                def: all(|a| a.def),
                nul: all(|a| a.nul),
                adv: any(|a| a.adv),
                end: any(|a| a.end),
                fal: any(|a| a.fal),
            }
        }
        ExprKind::And(a) | ExprKind::Not(a) => Attrs {
            def: attrs(*a).def,
            nul: true,
            fal: true,
            ..Attrs::default()
        },
        ExprKind::Plus(a) => attrs(*a),
        ExprKind::Star(a) | ExprKind::Query(a) => Attrs {
            def: true,
            nul: true,
            adv: attrs(*a).adv,
            ..Attrs::default()
        },
        ExprKind::PlusPlus([a, b]) => {
            let (a, b) = (attrs(*a), attrs(*b));
            Attrs {
                def: a.def && b.def,
                nul: a.nul && b.nul,
                adv: a.adv || b.adv,
                end: a.end || b.end,
                fal: a.fal || b.fal,
            }
        }
        ExprKind::StarPlus([a, b]) => {
            let (a, b) = (attrs(*a), attrs(*b));
            Attrs {
                adv: a.adv || b.adv,
                ..b
            }
        }
        ExprKind::Is([a, b]) => {
            let (a, b) = (attrs(*a), attrs(*b));
            Attrs {
                def: a.def && b.def,
                nul: a.nul && b.nul,
                adv: a.adv && b.adv,
                end: a.end && b.end,
                fal: a.fal || b.fal,
            }
        }
        ExprKind::IsNot([a, b]) => {
            let (a, b) = (attrs(*a), attrs(*b));
            Attrs {
                def: a.def && b.def,
                ..a
            }
        }
        ExprKind::Ref(_) => crate::invariants::unreachable_ref(id),
        ExprKind::StringLit(_)
        | ExprKind::CharClass { .. }
        | ExprKind::Range(..)
        | ExprKind::Any
        | ExprKind::End => graph[id].attrs,
    }
}

/// Ordered choice: exists for def/nul/adv, for-all for end/fal.
fn alternatives(graph: &Graph, args: &[ExprId]) -> Attrs {
    let attrs = |e: &ExprId| graph[*e].attrs;
    Attrs {
        def: args.iter().any(|a| attrs(a).def),
        nul: args.iter().any(|a| attrs(a).nul),
        adv: args.iter().any(|a| attrs(a).adv),
        end: args.iter().all(|a| attrs(a).end),
        fal: args.iter().all(|a| attrs(a).fal),
    }
}
