//! Well-formedness checks over the analyzed graph.
//!
//! Order of findings:
//! 1. void expressions
//! 2. cycles, one report per group of rules cycling together
//! 3. recursion classes nothing enters
//! 4. per-expression checks in index order

use climb_core::matrix::empty_row;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::graph::{ExprId, ExprKind, Graph};

use super::{RecClass, Relations};

pub(crate) fn diagnose(
    graph: &Graph,
    relations: &Relations,
    classes: &[RecClass],
    diag: &mut Diagnostics,
) {
    for i in 0..graph.nonterminal_count() {
        let id = ExprId::new(i);
        if !graph[id].attrs.def {
            diag.report(DiagnosticKind::VoidExpression, graph.short(id))
                .emit();
        }
    }

    report_cycles(graph, relations, diag);

    for class in classes {
        if class.entries.is_empty() {
            diag.report(DiagnosticKind::UnusedClass, &class.name).emit();
        }
    }

    for id in graph.ids() {
        check_expr(graph, id, diag);
    }
}

fn report_cycles(graph: &Graph, relations: &Relations, diag: &mut Diagnostics) {
    let clean = &relations.clean_closure;
    let mut pending = empty_row(graph.rule_count());
    for r in 0..graph.rule_count() {
        if clean.at(r, r) {
            pending.set(r, true);
        }
    }

    for r in 0..graph.rule_count() {
        if !pending.get(r).unwrap_or(false) {
            continue;
        }
        diag.report(DiagnosticKind::Cycle, graph.short(ExprId::new(r)))
            .emit();

        // Rules on a common cycle with `r` need no report of their own.
        for other in r..graph.rule_count() {
            if clean.at(r, other) && clean.at(other, r) {
                pending.set(other, false);
            }
        }
    }
}

fn check_expr(graph: &Graph, id: ExprId, diag: &mut Diagnostics) {
    let expr = &graph[id];
    let in_class = expr.class.is_some();

    match &expr.kind {
        ExprKind::Rule(rule) => {
            hidden_alternatives(graph, id, &rule.alts, diag);
            if !in_class {
                return;
            }
            for action in rule.on_succ.iter().flatten().filter(|a| a.boolean) {
                diag.report(DiagnosticKind::BooleanActionInRecursion, graph.short(id))
                    .message(format!(
                        "boolean action \"{}\" is not supported in recursive `{}`",
                        action.name,
                        graph.short(id)
                    ))
                    .emit();
            }
            for action in rule.on_fail.iter().flatten() {
                diag.report(DiagnosticKind::FailureActionInRecursion, graph.short(id))
                    .message(format!(
                        "action on failure \"{}\" is not supported in recursive `{}`",
                        action.name,
                        graph.short(id)
                    ))
                    .emit();
            }
        }
        ExprKind::Choice(args) => hidden_alternatives(graph, id, args, diag),
        ExprKind::Sequence(args) => {
            let Some(head) = args.first() else {
                return;
            };
            if in_class && graph[*head].attrs.nul {
                diag.report(DiagnosticKind::NullableRecursionHead, graph.short(id))
                    .related_to(format!("`{}` may match the empty string", graph.short(*head)))
                    .emit();
            }
        }
        ExprKind::Plus(a)
        | ExprKind::Star(a)
        | ExprKind::PlusPlus([a, _])
        | ExprKind::StarPlus([a, _]) => {
            if graph[*a].attrs.nul {
                diag.report(DiagnosticKind::NullableRepetition, graph.short(id))
                    .emit();
            }
        }
        ExprKind::Query(a) => {
            if !graph[*a].attrs.fal {
                diag.report(DiagnosticKind::SuperfluousOptional, graph.short(*a))
                    .emit();
            }
        }
        ExprKind::And(_)
        | ExprKind::Not(_)
        | ExprKind::Is(_)
        | ExprKind::IsNot(_)
        | ExprKind::Ref(_)
        | ExprKind::StringLit(_)
        | ExprKind::CharClass { .. }
        | ExprKind::Range(..)
        | ExprKind::Any
        | ExprKind::End => {}
    }
}

/// An alternative that cannot fail makes every later alternative dead.
fn hidden_alternatives(graph: &Graph, id: ExprId, args: &[ExprId], diag: &mut Diagnostics) {
    let Some((_, init)) = args.split_last() else {
        return;
    };
    for &arg in init {
        if !graph[arg].attrs.fal {
            diag.report(DiagnosticKind::HiddenAlternatives, graph.short(arg))
                .message(format!(
                    "{} in `{}` never fails and hides other alternative(s)",
                    graph.short(arg),
                    graph.short(id)
                ))
                .emit();
        }
    }
}
