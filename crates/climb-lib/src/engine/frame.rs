//! Suspended evaluations for the interpreter's explicit stack.
//!
//! Each frame waits for the result of one sub-expression and records where
//! to continue once it arrives. Nesting in the grammar or in the input grows
//! this stack on the heap, never the native call stack.

use crate::ascent::ClassPlan;
use crate::graph::{ExprId, RuleData};

use super::phrase::Phrase;

/// Result of a successful match: where it ended and what it produced.
#[derive(Debug)]
pub(crate) struct Matched {
    pub end: usize,
    pub items: Vec<Phrase>,
}

impl Matched {
    pub fn empty(pos: usize) -> Self {
        Self {
            end: pos,
            items: Vec::new(),
        }
    }

    pub fn append(&mut self, next: Matched) {
        self.end = next.end;
        self.items.extend(next.items);
    }
}

pub(crate) enum Frame<'a> {
    Rule {
        id: ExprId,
        rule: &'a RuleData,
        pos: usize,
        alt: usize,
    },
    Choice {
        args: &'a [ExprId],
        pos: usize,
        next: usize,
    },
    Sequence {
        args: &'a [ExprId],
        next: usize,
        cur: Matched,
    },
    /// `&a` when `positive`, `!a` otherwise.
    Lookahead { pos: usize, positive: bool },
    Optional { pos: usize },
    Repeat {
        a: ExprId,
        min: usize,
        count: usize,
        cur: Matched,
    },
    /// `a++ b` / `a*+ b`; `in_body` tells which of the two is running.
    RepeatUntil {
        a: ExprId,
        b: ExprId,
        min: usize,
        count: usize,
        cur: Matched,
        in_body: bool,
    },
    /// `a:b` / `a:!b`. `outer` is `a`'s match once it is known; `saved` is
    /// the input limit to restore after `b`.
    Exact {
        b: ExprId,
        pos: usize,
        exact: bool,
        outer: Option<Matched>,
        saved: usize,
    },
    Class(ClassRun<'a>),
}

/// One activation of a recursion class.
///
/// While a seed is being matched `points` is empty. Afterwards `points` is
/// the chain of members the current match has grown through, and `cur` is
/// the match of the last one.
pub(crate) struct ClassRun<'a> {
    pub plan: &'a ClassPlan,
    pub target: ExprId,
    pub pos: usize,
    /// Position in `plan.seeds`.
    pub seed: usize,
    pub cur: Matched,
    pub points: Vec<ClimbPoint>,
    /// Member a sequence ascent is heading for while its rest is matched.
    pub pending: Option<ExprId>,
}

impl<'a> ClassRun<'a> {
    pub fn new(plan: &'a ClassPlan, target: ExprId, pos: usize) -> Self {
        Self {
            plan,
            target,
            pos,
            seed: 0,
            cur: Matched::empty(pos),
            points: Vec::new(),
            pending: None,
        }
    }

    /// Drop the top point and restore `cur` to the match below it.
    pub fn backtrack(&mut self) {
        let Some(point) = self.points.pop() else {
            return;
        };
        match point.undo {
            Undo::Seed => self.cur = Matched::empty(self.pos),
            Undo::Keep => {}
            Undo::Unwrap => {
                if let Some(mut wrapped) = self.cur.items.pop() {
                    self.cur.items = std::mem::take(&mut wrapped.children);
                }
            }
            Undo::Truncate { len, end } => {
                self.cur.items.truncate(len);
                self.cur.end = end;
            }
        }
    }
}

/// A member reached during growth, with the next ascent to try from it.
pub(crate) struct ClimbPoint {
    pub from: ExprId,
    pub next: usize,
    pub undo: Undo,
}

/// How to turn the current match back into the previous point's match.
pub(crate) enum Undo {
    Seed,
    /// Choice pass-through: nothing changed.
    Keep,
    /// The items were wrapped into one rule phrase.
    Unwrap,
    /// A sequence ascent appended items after `len` and moved the end.
    Truncate { len: usize, end: usize },
}
