//! Recursion classes.
//!
//! A rule `r` is left-recursive when `First[r, r]`. Its class is every
//! expression `e` with `First[r, e]` and `First[e, r]`; those are mutually
//! left-recursive with `r`. Classes are built in rule declaration order, so
//! a class is named after its earliest-declared rule.
//!
//! Within a class:
//! - entries are members called from outside the class (or the start rule)
//! - seeds are alternatives of multi-alternative members that lie outside
//!   the class; they are where a recursive-ascent parse starts
//! - exits are the members owning seeds

use climb_core::BitMatrix;
use climb_core::matrix::empty_row;
use vob::Vob;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::graph::{ClassId, ExprId, ExprKind, Graph};

use super::Relations;

#[derive(Debug, Clone)]
pub struct RecClass {
    pub name: String,
    /// Rule the class was built from.
    pub rule: ExprId,
    member_bits: Vob,
    /// Ordered by index.
    pub members: Vec<ExprId>,
    /// Ordered by index.
    pub entries: Vec<ExprId>,
    /// Ordered by index.
    pub exits: Vec<ExprId>,
    /// In discovery order, without duplicates.
    pub seeds: Vec<ExprId>,
}

impl RecClass {
    pub fn contains(&self, id: ExprId) -> bool {
        self.member_bits.get(id.index()).unwrap_or(false)
    }

    pub fn is_entry(&self, id: ExprId) -> bool {
        self.entries.contains(&id)
    }

    pub fn is_exit(&self, id: ExprId) -> bool {
        self.exits.contains(&id)
    }

    /// Members having `id` as an immediate first, in index order.
    ///
    /// These are the expressions a match of `id` can grow into.
    pub fn have_as_first(&self, first: &BitMatrix, id: ExprId) -> Vec<ExprId> {
        let mut column = first.column(id.index());
        column.and(&self.member_bits);
        column.iter_set_bits(..).map(ExprId::new).collect()
    }
}

/// Find all classes, tag their members and report what the ascent cannot
/// handle.
pub(crate) fn build_classes(
    graph: &mut Graph,
    relations: &Relations,
    diag: &mut Diagnostics,
) -> Vec<RecClass> {
    let mut classes: Vec<RecClass> = Vec::new();

    for rule in graph.rules() {
        if !relations.is_left_recursive(rule) || graph[rule].class.is_some() {
            continue;
        }

        let class_id = ClassId::new(classes.len());
        let class = build_class(graph, relations, rule, class_id, diag);
        classes.push(class);
    }

    classes
}

fn build_class(
    graph: &mut Graph,
    relations: &Relations,
    rule: ExprId,
    class_id: ClassId,
    diag: &mut Diagnostics,
) -> RecClass {
    let r = rule.index();
    let mut member_bits = relations.first_closure.row(r).clone();
    member_bits.and(&relations.first_closure.column(r));

    let members: Vec<ExprId> = member_bits.iter_set_bits(..).map(ExprId::new).collect();
    for &m in &members {
        graph.get_mut(m).class = Some(class_id);
    }

    let entries = members
        .iter()
        .copied()
        .filter(|m| m.index() == 0 || has_outside_caller(relations, &member_bits, *m))
        .collect();

    let mut class = RecClass {
        name: graph[rule].name.clone(),
        rule,
        member_bits,
        members,
        entries,
        exits: Vec::new(),
        seeds: Vec::new(),
    };

    for m in class.members.clone() {
        match &graph[m].kind {
            ExprKind::Rule(_) | ExprKind::Choice(_) => collect_seeds(graph, &mut class, m),
            ExprKind::And(_)
            | ExprKind::Not(_)
            | ExprKind::Plus(_)
            | ExprKind::Star(_)
            | ExprKind::Query(_)
            | ExprKind::PlusPlus(_)
            | ExprKind::StarPlus(_)
            | ExprKind::Is(_)
            | ExprKind::IsNot(_) => {
                diag.report(DiagnosticKind::UnsupportedInRecursion, graph.short(m))
                    .related_to(format!("in recursion class of `{}`", class.name))
                    .emit();
            }
            // A sequence passes recursion through its first element only.
            ExprKind::Sequence(_) => {}
            ExprKind::Ref(_)
            | ExprKind::StringLit(_)
            | ExprKind::CharClass { .. }
            | ExprKind::Range(..)
            | ExprKind::Any
            | ExprKind::End => {}
        }
    }

    if class.seeds.is_empty() {
        diag.report(DiagnosticKind::SeedlessClass, &class.name).emit();
    }

    class
}

fn has_outside_caller(relations: &Relations, member_bits: &Vob, id: ExprId) -> bool {
    let mut callers = relations.calls.column(id.index());
    let mut outside = empty_row(member_bits.len());
    outside.or(member_bits);
    outside.negate();
    callers.and(&outside);
    callers.iter_set_bits(..).next().is_some()
}

fn collect_seeds(graph: &Graph, class: &mut RecClass, id: ExprId) {
    let args = graph[id].kind.children();
    // A single-alternative member only passes recursion through.
    if args.len() == 1 {
        return;
    }

    let mut is_exit = false;
    for &arg in args {
        if class.contains(arg) {
            continue;
        }
        if !class.seeds.contains(&arg) {
            class.seeds.push(arg);
        }
        is_exit = true;
    }

    if is_exit {
        class.exits.push(id);
    }
}
