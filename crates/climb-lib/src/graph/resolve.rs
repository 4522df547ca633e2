//! Reference resolution.
//!
//! Builds the rule name table, then walks every expression reachable from a
//! rule and rewrites `Ref` children into the id of the named rule. Rules
//! are roots of the walk, so a walk never descends into another rule.

use indexmap::{IndexMap, IndexSet};
use vob::Vob;

use climb_core::matrix::empty_row;

use crate::diagnostics::{DiagnosticKind, Diagnostics};

use super::{ExprId, ExprKind, Graph};

pub(crate) fn resolve_references(graph: &mut Graph, diag: &mut Diagnostics) {
    let mut names: IndexMap<String, ExprId> = IndexMap::new();
    for id in graph.rules() {
        let name = graph[id].name.clone();
        if names.contains_key(&name) {
            diag.report(DiagnosticKind::DuplicateRule, &name).emit();
            continue;
        }
        names.insert(name, id);
    }

    let mut referenced: IndexSet<ExprId> = IndexSet::new();
    let mut undefined: IndexSet<String> = IndexSet::new();
    let mut visited: Vob = empty_row(graph.len());
    // (expression, rule it belongs to)
    let mut stack: Vec<(ExprId, ExprId)> = graph.rules().map(|r| (r, r)).collect();

    while let Some((id, owner)) = stack.pop() {
        if visited.get(id.index()).unwrap_or(false) {
            continue;
        }
        visited.set(id.index(), true);

        let children = graph[id].kind.children().to_vec();
        for (slot, child) in children.into_iter().enumerate() {
            let name = match &graph[child].kind {
                ExprKind::Ref(name) => name.clone(),
                ExprKind::Rule(_) => continue,
                _ => {
                    stack.push((child, owner));
                    continue;
                }
            };

            match names.get(&name) {
                Some(&rule) => {
                    referenced.insert(rule);
                    graph.get_mut(id).kind.children_mut()[slot] = rule;
                }
                None => {
                    if undefined.insert(name.clone()) {
                        diag.report(DiagnosticKind::UndefinedReference, &name)
                            .related_to(format!("referenced from `{}`", graph[owner].name))
                            .emit();
                    }
                }
            }
        }
    }

    // The start rule counts as referenced.
    for id in graph.rules().skip(1) {
        if !referenced.contains(&id) && names.get(&graph[id].name) == Some(&id) {
            diag.report(DiagnosticKind::UnusedRule, &graph[id].name).emit();
        }
    }
}
