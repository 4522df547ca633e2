//! Listing, naming and renumbering.
//!
//! Each rule is walked in pre-order (declaration order across rules). Every
//! inner expression and terminal met on the way gets the name `rule_N`, with
//! one counter per rule shared by both kinds. The arena is then rebuilt in
//! the order rules, inner expressions, terminals, and `Ref` leaves left
//! behind by resolution are dropped.

use climb_core::matrix::empty_row;

use crate::invariants::{ensure_listed, ensure_renumbered};

use super::{ExprId, Graph};

pub(crate) fn assign_indices(mut graph: Graph) -> Graph {
    let rule_count = graph.rule_count();
    let mut subs: Vec<ExprId> = Vec::new();
    let mut terms: Vec<ExprId> = Vec::new();
    let mut seen = empty_row(graph.len());

    for rule in graph.rules() {
        let prefix = graph[rule].name.clone();
        let mut counter = 0usize;
        let mut stack: Vec<ExprId> = graph[rule].kind.children().iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            if graph[id].is_rule() || seen.get(id.index()).unwrap_or(false) {
                continue;
            }
            seen.set(id.index(), true);

            let expr = graph.get_mut(id);
            expr.name = format!("{prefix}_{counter}");
            counter += 1;

            if expr.is_terminal() {
                terms.push(id);
            } else {
                subs.push(id);
            }
            stack.extend(expr.kind.children().iter().rev().copied());
        }
    }

    let order: Vec<ExprId> = graph
        .rules()
        .chain(subs.iter().copied())
        .chain(terms.iter().copied())
        .collect();

    let mut renumber: Vec<Option<ExprId>> = vec![None; graph.len()];
    for (new, old) in order.iter().enumerate() {
        renumber[old.index()] = Some(ExprId::new(new));
    }

    let mut slots: Vec<_> = graph.into_exprs().into_iter().map(Some).collect();
    let mut indexed = Graph::default();
    for old in order {
        let mut expr = ensure_listed(slots[old.index()].take());
        for child in expr.kind.children_mut() {
            *child = ensure_renumbered(renumber[child.index()], *child);
        }
        indexed.push(expr);
    }

    indexed.set_counts(rule_count, rule_count + subs.len());
    indexed
}
