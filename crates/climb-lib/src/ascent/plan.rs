use std::fmt::Write;

use indexmap::IndexMap;

use crate::Grammar;
use crate::graph::{Action, ExprId, ExprKind, Graph};

/// One step up from a matched expression into a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AscentStep {
    /// The member is a rule and the match is its alternative `alt`.
    Wrap { alt: usize, action: Option<Action> },
    /// The member is a choice; the match passes through unchanged.
    Pass,
    /// The member is a sequence; the match is its head, `rest` follows.
    Continue { rest: Vec<ExprId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ascent {
    pub to: ExprId,
    pub step: AscentStep,
}

/// What to try after matching `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimbProc {
    pub from: ExprId,
    /// Tried in order, before ending growth.
    pub ascents: Vec<Ascent>,
    /// `from` is an entry, so growth may end here when it is the member the
    /// parse was asked for.
    pub end_grow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPlan {
    pub name: String,
    /// Each gets a thin wrapper that runs the common entry with itself as
    /// the growth target.
    pub entries: Vec<ExprId>,
    /// Common entry: tried in this order.
    pub seeds: Vec<ExprId>,
    /// Keyed by the matched expression: every seed, then every member.
    pub climbs: IndexMap<ExprId, ClimbProc>,
}

impl ClassPlan {
    pub fn climb(&self, from: ExprId) -> Option<&ClimbProc> {
        self.climbs.get(&from)
    }
}

/// Procedures a recursive-ascent parser needs, one [`ClassPlan`] per class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AscentPlan {
    pub classes: Vec<ClassPlan>,
}

impl AscentPlan {
    pub(crate) fn new(grammar: &Grammar) -> Self {
        let graph = grammar.graph();
        let classes = grammar
            .classes()
            .iter()
            .map(|class| {
                let mut climbs = IndexMap::new();
                for &from in class.seeds.iter().chain(class.members.iter()) {
                    let ascents = grammar
                        .have_as_first(class, from)
                        .into_iter()
                        .map(|to| Ascent {
                            to,
                            step: step(graph, from, to),
                        })
                        .collect();
                    climbs.insert(
                        from,
                        ClimbProc {
                            from,
                            ascents,
                            end_grow: class.is_entry(from),
                        },
                    );
                }

                ClassPlan {
                    name: class.name.clone(),
                    entries: class.entries.clone(),
                    seeds: class.seeds.clone(),
                    climbs,
                }
            })
            .collect();

        Self { classes }
    }

    pub fn dump(&self, graph: &Graph) -> String {
        let mut out = String::new();
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let names = |ids: &[ExprId]| {
                ids.iter()
                    .map(|id| graph.short(*id))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let _ = writeln!(out, "Class {}", class.name);
            let _ = writeln!(out, "  entries: {}", names(&class.entries));
            let _ = writeln!(out, "  seeds: {}", names(&class.seeds));

            for proc in class.climbs.values() {
                let grow = if proc.end_grow { " (may end growth)" } else { "" };
                let _ = writeln!(out, "  climb from {}{grow}", graph.short(proc.from));
                for ascent in &proc.ascents {
                    let _ = write!(out, "    -> {}", graph.short(ascent.to));
                    match &ascent.step {
                        AscentStep::Wrap { alt, action } => {
                            let _ = write!(out, " as alternative {alt}");
                            if let Some(action) = action {
                                let _ = write!(out, " {action}");
                            }
                        }
                        AscentStep::Pass => {}
                        AscentStep::Continue { rest } => {
                            let rest: Vec<String> = rest.iter().map(|r| graph.short(*r)).collect();
                            let _ = write!(out, " then {}", rest.join(" "));
                        }
                    }
                    out.push('\n');
                }
            }
        }
        out
    }
}

fn step(graph: &Graph, from: ExprId, to: ExprId) -> AscentStep {
    match &graph[to].kind {
        ExprKind::Rule(rule) => {
            let alt = rule.alts.iter().position(|a| *a == from).unwrap_or(0);
            AscentStep::Wrap {
                alt,
                action: rule.on_succ.get(alt).cloned().flatten(),
            }
        }
        ExprKind::Sequence(args) => AscentStep::Continue {
            rest: args.iter().skip(1).copied().collect(),
        },
        _ => AscentStep::Pass,
    }
}
