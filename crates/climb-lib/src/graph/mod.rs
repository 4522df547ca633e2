//! Expression graph: an index-addressed arena of PEG nodes.
//!
//! Stages: build → resolve → index → source.
//!
//! After `build` the arena is a forest of rule trees with `Ref` leaves.
//! `resolve` replaces every `Ref` child by the id of the rule it names, which
//! turns the forest into a graph where rules are shared. `index` drops the
//! `Ref` nodes and renumbers everything so that ids are the stable indices
//! used by the analysis: rules first, then inner expressions, then terminals.

mod build;
mod index;
mod resolve;
mod source;

#[cfg(test)]
mod source_tests;

use std::fmt;
use std::ops::Index;

use climb_core::utils::to_print;

pub(crate) use build::build_graph;
pub(crate) use index::assign_indices;
pub(crate) use resolve::resolve_references;
pub(crate) use source::reconstruct_sources;

/// Stable index of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprId(u32);

impl ExprId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of a recursion class in [`crate::Grammar::classes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u32);

impl ClassId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The five monotone properties of an expression.
///
/// - `def`: defines a terminal string (the expression is not void)
/// - `nul`: may succeed without consuming input
/// - `adv`: may succeed consuming input
/// - `end`: every success sees end of input
/// - `fal`: may fail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attrs {
    pub def: bool,
    pub nul: bool,
    pub adv: bool,
    pub end: bool,
    pub fal: bool,
}

impl Attrs {
    /// Preset for every terminal.
    pub fn terminal() -> Self {
        Self {
            def: true,
            adv: true,
            fal: true,
            ..Self::default()
        }
    }

    /// Preset for `!_`.
    pub fn end_of_input() -> Self {
        Self {
            end: true,
            ..Self::terminal()
        }
    }

    /// Starting point of the fixpoint: terminals preset, everything else false.
    pub fn preset(kind: &ExprKind) -> Self {
        match kind {
            ExprKind::End => Self::end_of_input(),
            k if k.is_terminal() => Self::terminal(),
            _ => Self::default(),
        }
    }

    /// Number of true attributes.
    pub fn count(&self) -> usize {
        [self.def, self.nul, self.adv, self.end, self.fal]
            .into_iter()
            .filter(|b| *b)
            .count()
    }

    /// Compact code: `v` when void, else `0` `1` `e` `f` for nul, adv, end, fal.
    pub fn code(&self) -> String {
        if !self.def {
            return "v".to_string();
        }
        let mut out = String::new();
        for (set, c) in [
            (self.nul, '0'),
            (self.adv, '1'),
            (self.end, 'e'),
            (self.fal, 'f'),
        ] {
            if set {
                out.push(c);
            }
        }
        out
    }

    /// Pointwise OR. Attributes only ever move from false to true.
    pub fn merge(&mut self, other: Attrs) {
        self.def |= other.def;
        self.nul |= other.nul;
        self.adv |= other.adv;
        self.end |= other.end;
        self.fal |= other.fal;
    }
}

/// Semantic action attached to a rule alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    /// Boolean actions may turn a success into a failure.
    pub boolean: bool,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.boolean {
            write!(f, "{{&{}}}", self.name)
        } else {
            write!(f, "{{{}}}", self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleData {
    pub alts: Vec<ExprId>,
    /// Parallel to `alts`.
    pub on_succ: Vec<Option<Action>>,
    /// Parallel to `alts`.
    pub on_fail: Vec<Option<Action>>,
    pub diag_name: Option<String>,
}

impl RuleData {
    pub fn has_boolean_success(&self, alt: usize) -> bool {
        self.on_succ
            .get(alt)
            .and_then(|a| a.as_ref())
            .is_some_and(|a| a.boolean)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    Rule(RuleData),
    Choice(Vec<ExprId>),
    Sequence(Vec<ExprId>),
    And(ExprId),
    Not(ExprId),
    Plus(ExprId),
    Star(ExprId),
    Query(ExprId),
    PlusPlus([ExprId; 2]),
    StarPlus([ExprId; 2]),
    Is([ExprId; 2]),
    IsNot([ExprId; 2]),
    /// Unresolved rule name; gone after indexing.
    Ref(String),
    StringLit(String),
    CharClass { chars: String, negated: bool },
    Range(char, char),
    Any,
    End,
}

impl ExprKind {
    pub fn children(&self) -> &[ExprId] {
        match self {
            Self::Rule(r) => &r.alts,
            Self::Choice(args) | Self::Sequence(args) => args,
            Self::And(a) | Self::Not(a) | Self::Plus(a) | Self::Star(a) | Self::Query(a) => {
                std::slice::from_ref(a)
            }
            Self::PlusPlus(ab) | Self::StarPlus(ab) | Self::Is(ab) | Self::IsNot(ab) => ab,
            Self::Ref(_)
            | Self::StringLit(_)
            | Self::CharClass { .. }
            | Self::Range(..)
            | Self::Any
            | Self::End => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut [ExprId] {
        match self {
            Self::Rule(r) => &mut r.alts,
            Self::Choice(args) | Self::Sequence(args) => args,
            Self::And(a) | Self::Not(a) | Self::Plus(a) | Self::Star(a) | Self::Query(a) => {
                std::slice::from_mut(a)
            }
            Self::PlusPlus(ab) | Self::StarPlus(ab) | Self::Is(ab) | Self::IsNot(ab) => ab,
            Self::Ref(_)
            | Self::StringLit(_)
            | Self::CharClass { .. }
            | Self::Range(..)
            | Self::Any
            | Self::End => &mut [],
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::StringLit(_) | Self::CharClass { .. } | Self::Range(..) | Self::Any | Self::End
        )
    }

    pub fn is_rule(&self) -> bool {
        matches!(self, Self::Rule(_))
    }

    /// Operator name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rule(_) => "rule",
            Self::Choice(_) => "choice",
            Self::Sequence(_) => "sequence",
            Self::And(_) => "and-predicate",
            Self::Not(_) => "not-predicate",
            Self::Plus(_) => "plus",
            Self::Star(_) => "star",
            Self::Query(_) => "optional",
            Self::PlusPlus(_) => "plus-until",
            Self::StarPlus(_) => "star-until",
            Self::Is(_) => "is",
            Self::IsNot(_) => "is-not",
            Self::Ref(_) => "reference",
            Self::StringLit(_) => "string",
            Self::CharClass { .. } => "class",
            Self::Range(..) => "range",
            Self::Any => "any",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    /// Rule name, or synthesized `rule_N`.
    pub name: String,
    /// Named expressions print as their name inside other expressions.
    pub named: bool,
    pub attrs: Attrs,
    pub class: Option<ClassId>,
    /// Reconstructed source text, unescaped.
    pub source: String,
    /// Set when compaction merged this node into an equal one.
    pub alias: Option<ExprId>,
    pub(crate) bind: u8,
}

impl Expr {
    pub(crate) fn new(kind: ExprKind) -> Self {
        Self {
            attrs: Attrs::preset(&kind),
            kind,
            name: String::new(),
            named: false,
            class: None,
            source: String::new(),
            alias: None,
            bind: 4,
        }
    }

    pub(crate) fn set_kind(&mut self, kind: ExprKind) {
        self.attrs = Attrs::preset(&kind);
        self.kind = kind;
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    pub fn is_rule(&self) -> bool {
        self.kind.is_rule()
    }

    pub fn rule(&self) -> Option<&RuleData> {
        match &self.kind {
            ExprKind::Rule(r) => Some(r),
            _ => None,
        }
    }
}

/// Arena of expressions.
///
/// Once indexed, ids `0..R` are rules, `R..N` inner expressions and `N..E`
/// terminals.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    exprs: Vec<Expr>,
    rule_count: usize,
    nonterminal_count: usize,
}

impl Graph {
    pub(crate) fn push(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len());
        self.exprs.push(expr);
        id
    }

    pub(crate) fn get_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Total number of expressions (`E`).
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Number of rules (`R`).
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Number of rules and inner expressions (`N`).
    pub fn nonterminal_count(&self) -> usize {
        self.nonterminal_count
    }

    pub fn ids(&self) -> impl Iterator<Item = ExprId> + use<> {
        (0..self.exprs.len()).map(ExprId::new)
    }

    pub fn rules(&self) -> impl Iterator<Item = ExprId> + use<> {
        (0..self.rule_count).map(ExprId::new)
    }

    /// Inner expressions still in use (merged duplicates are skipped).
    pub fn subs(&self) -> impl Iterator<Item = ExprId> + '_ {
        (self.rule_count..self.nonterminal_count)
            .map(ExprId::new)
            .filter(|id| self.is_live(*id))
    }

    /// Terminals still in use (merged duplicates are skipped).
    pub fn terms(&self) -> impl Iterator<Item = ExprId> + '_ {
        (self.nonterminal_count..self.exprs.len())
            .map(ExprId::new)
            .filter(|id| self.is_live(*id))
    }

    pub fn is_live(&self, id: ExprId) -> bool {
        self.get(id).alias.is_none()
    }

    pub fn find_rule(&self, name: &str) -> Option<ExprId> {
        self.rules().find(|id| self.get(*id).name == name)
    }

    /// Name when named, printable source otherwise.
    pub fn short(&self, id: ExprId) -> String {
        let e = self.get(id);
        if e.named {
            e.name.clone()
        } else {
            to_print(&e.source)
        }
    }

    /// Rules print as their definition, others as `name = source`.
    pub fn named(&self, id: ExprId) -> String {
        let e = self.get(id);
        if e.is_rule() {
            to_print(&e.source)
        } else {
            format!("{} = {}", e.name, to_print(&e.source))
        }
    }

    pub(crate) fn set_counts(&mut self, rule_count: usize, nonterminal_count: usize) {
        self.rule_count = rule_count;
        self.nonterminal_count = nonterminal_count;
    }

    pub(crate) fn into_exprs(self) -> Vec<Expr> {
        self.exprs
    }
}

impl Index<ExprId> for Graph {
    type Output = Expr;

    fn index(&self, id: ExprId) -> &Expr {
        self.get(id)
    }
}
