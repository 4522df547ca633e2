//! Lowering of the user-facing grammar definition into the arena.
//!
//! Rules are pushed first so that they occupy ids `0..R` in declaration
//! order. Alternatives are lowered through an explicit worklist, so deeply
//! nested definitions do not recurse on the call stack.
//!
//! Normalizations applied on the way:
//! - predicate chains fold: `!!e` → `&e`, `!&e` → `!e`, `&&e` → `&e`, `&!e` → `!e`
//! - `!_` becomes the end-of-input terminal
//! - single-element choices and sequences collapse to their element
//! - actions without a name get `rule` / `rule_fail` (one alternative) or
//!   `rule_i` / `rule_i_fail`

use climb_core::grammar::{ActionDef, ExprDef, GrammarDef, RuleDef};

use super::{Action, Expr, ExprId, ExprKind, Graph, RuleData};

pub(crate) fn build_graph(def: &GrammarDef) -> Graph {
    let mut builder = GraphBuilder::default();

    let rule_ids: Vec<ExprId> = def
        .rules
        .iter()
        .map(|rule| {
            let mut expr = Expr::new(ExprKind::Any);
            expr.name = rule.name.clone();
            expr.named = true;
            builder.graph.push(expr)
        })
        .collect();

    for (rule, id) in def.rules.iter().zip(rule_ids) {
        let data = builder.lower_rule(rule);
        builder.graph.get_mut(id).set_kind(ExprKind::Rule(data));
    }

    builder.drain();
    builder.graph.set_counts(def.rules.len(), 0);
    builder.graph
}

#[derive(Default)]
struct GraphBuilder<'d> {
    graph: Graph,
    /// Allocated nodes whose kind is not yet filled in.
    pending: Vec<(ExprId, &'d ExprDef)>,
}

impl<'d> GraphBuilder<'d> {
    fn lower_rule(&mut self, rule: &'d RuleDef) -> RuleData {
        let single = rule.alternatives.len() == 1;
        let default_name = |i: usize| {
            if single {
                rule.name.clone()
            } else {
                format!("{}_{}", rule.name, i)
            }
        };

        let mut data = RuleData {
            alts: Vec::with_capacity(rule.alternatives.len()),
            on_succ: Vec::with_capacity(rule.alternatives.len()),
            on_fail: Vec::with_capacity(rule.alternatives.len()),
            diag_name: rule.diag_name.clone(),
        };

        for (i, alt) in rule.alternatives.iter().enumerate() {
            data.alts.push(self.alloc(&alt.expr));
            data.on_succ
                .push(alt.on_success.as_ref().map(|a| action(a, default_name(i))));
            data.on_fail.push(
                alt.on_failure
                    .as_ref()
                    .map(|a| action(a, format!("{}_fail", default_name(i)))),
            );
        }

        data
    }

    fn alloc(&mut self, def: &'d ExprDef) -> ExprId {
        let id = self.graph.push(Expr::new(ExprKind::Any));
        self.pending.push((id, def));
        id
    }

    fn drain(&mut self) {
        while let Some((id, def)) = self.pending.pop() {
            let kind = self.lower(def);
            self.graph.get_mut(id).set_kind(kind);
        }
    }

    fn lower(&mut self, mut def: &'d ExprDef) -> ExprKind {
        while let ExprDef::Choice(items) | ExprDef::Sequence(items) = def {
            match items.as_slice() {
                [only] => def = only,
                _ => break,
            }
        }

        match def {
            ExprDef::Choice(items) => ExprKind::Choice(self.alloc_all(items)),
            ExprDef::Sequence(items) => ExprKind::Sequence(self.alloc_all(items)),
            ExprDef::And(inner) => self.lower_predicate(true, inner),
            ExprDef::Not(inner) => self.lower_predicate(false, inner),
            ExprDef::Plus(inner) => ExprKind::Plus(self.alloc(inner)),
            ExprDef::Star(inner) => ExprKind::Star(self.alloc(inner)),
            ExprDef::Query(inner) => ExprKind::Query(self.alloc(inner)),
            ExprDef::PlusPlus(a, b) => ExprKind::PlusPlus(self.alloc_pair(a, b)),
            ExprDef::StarPlus(a, b) => ExprKind::StarPlus(self.alloc_pair(a, b)),
            ExprDef::Is(a, b) => ExprKind::Is(self.alloc_pair(a, b)),
            ExprDef::IsNot(a, b) => ExprKind::IsNot(self.alloc_pair(a, b)),
            ExprDef::Ref(name) => ExprKind::Ref(name.clone()),
            ExprDef::StringLit(s) => ExprKind::StringLit(s.clone()),
            ExprDef::CharClass { chars, negated } => ExprKind::CharClass {
                chars: chars.clone(),
                negated: *negated,
            },
            ExprDef::Range(a, z) => ExprKind::Range(*a, *z),
            ExprDef::Any => ExprKind::Any,
            ExprDef::End => ExprKind::End,
        }
    }

    fn lower_predicate(&mut self, mut positive: bool, mut arg: &'d ExprDef) -> ExprKind {
        loop {
            match arg {
                ExprDef::And(inner) => arg = inner.as_ref(),
                ExprDef::Not(inner) => {
                    positive = !positive;
                    arg = inner.as_ref();
                }
                _ => break,
            }
        }

        match (positive, arg) {
            (false, ExprDef::Any) => ExprKind::End,
            (true, _) => ExprKind::And(self.alloc(arg)),
            (false, _) => ExprKind::Not(self.alloc(arg)),
        }
    }

    fn alloc_all(&mut self, items: &'d [ExprDef]) -> Vec<ExprId> {
        items.iter().map(|d| self.alloc(d)).collect()
    }

    fn alloc_pair(&mut self, a: &'d ExprDef, b: &'d ExprDef) -> [ExprId; 2] {
        [self.alloc(a), self.alloc(b)]
    }
}

fn action(def: &ActionDef, default_name: String) -> Action {
    Action {
        name: if def.name.is_empty() {
            default_name
        } else {
            def.name.clone()
        },
        boolean: def.boolean,
    }
}
