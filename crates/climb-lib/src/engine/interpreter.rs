//! Graph interpreter with recursive ascent for left-recursive classes.
//!
//! Every invocation of a class member enters the class with that member as
//! the growth target: each seed is tried in order, and a matched seed climbs
//! through the plan's ascents until it reaches the target. Ascents are tried
//! before stopping (greedy) and the first complete climb wins.
//!
//! Everything outside classes follows ordinary PEG semantics. Inner
//! expressions splice their results into the enclosing rule's phrase.
//!
//! Evaluation never recurses natively: pending work lives in a stack of
//! frames and results are handed back to the frame on top. Growth
//! inside a class is a loop over climb points, so a flat left-recursive list
//! costs no depth at all.

use crate::Grammar;
use crate::ascent::{AscentPlan, AscentStep};
use crate::graph::{ExprId, ExprKind, Graph, RuleData};
use crate::invariants::unreachable_ref;

use super::error::RuntimeError;
use super::frame::{ClassRun, ClimbPoint, Frame, Matched, Undo};
use super::phrase::Phrase;
use super::trace::{NoopTracer, Tracer};

/// Default execution fuel: interpreter steps before giving up.
pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;

/// Default recursion fuel: nested rule calls and class entries.
pub const DEFAULT_RECURSION_FUEL: u32 = 1024;

/// Executes an analyzed grammar over input text.
pub struct Engine<'g> {
    grammar: &'g Grammar,
    plan: AscentPlan,
    exec_fuel: u32,
    recursion_fuel: u32,
    start: Option<String>,
}

impl<'g> Engine<'g> {
    /// Fails with [`crate::Error::Generation`] when the grammar has errors.
    pub fn new(grammar: &'g Grammar) -> crate::Result<Self> {
        let plan = grammar.plan()?;
        Ok(Self {
            grammar,
            plan,
            exec_fuel: DEFAULT_EXEC_FUEL,
            recursion_fuel: DEFAULT_RECURSION_FUEL,
            start: None,
        })
    }

    /// Set execution fuel limit.
    pub fn with_exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    /// Set recursion fuel limit.
    pub fn with_recursion_fuel(mut self, fuel: u32) -> Self {
        self.recursion_fuel = fuel;
        self
    }

    /// Start from the named rule instead of the first one.
    pub fn with_start(mut self, rule: impl Into<String>) -> Self {
        self.start = Some(rule.into());
        self
    }

    pub fn plan(&self) -> &AscentPlan {
        &self.plan
    }

    /// Match the start rule at the beginning of `input`.
    ///
    /// `Ok(None)` means the start rule failed. A success may stop before the
    /// end of the input; compare [`Phrase::end`] with `input.len()`.
    pub fn run(&self, input: &str) -> Result<Option<Phrase>, RuntimeError> {
        self.run_traced(input, &mut NoopTracer)
    }

    pub fn run_traced<T: Tracer>(
        &self,
        input: &str,
        tracer: &mut T,
    ) -> Result<Option<Phrase>, RuntimeError> {
        let graph = self.grammar.graph();
        let start = match &self.start {
            Some(name) => graph
                .find_rule(name)
                .ok_or_else(|| RuntimeError::UnknownRule(name.clone()))?,
            None => match graph.rules().next() {
                Some(id) => id,
                None => return Ok(None),
            },
        };

        let mut run = Run {
            graph,
            plan: &self.plan,
            input,
            limit: input.len(),
            exec_fuel: self.exec_fuel,
            recursion_fuel: self.recursion_fuel,
            depth: 0,
            stack: Vec::new(),
            tracer,
        };
        let matched = run.execute(start)?;
        Ok(matched.and_then(|m| m.items.into_iter().next()))
    }
}

/// What the interpreter does next.
enum Next {
    Eval(ExprId, usize),
    /// Hand a result to the frame on top of the stack.
    Return(Option<Matched>),
}

struct Run<'a, T: Tracer> {
    graph: &'a Graph,
    plan: &'a AscentPlan,
    input: &'a str,
    /// Terminals never look past this offset; `a:b` narrows it for `b`.
    limit: usize,
    exec_fuel: u32,
    recursion_fuel: u32,
    depth: u32,
    stack: Vec<Frame<'a>>,
    tracer: &'a mut T,
}

impl<'a, T: Tracer> Run<'a, T> {
    fn execute(&mut self, start: ExprId) -> Result<Option<Matched>, RuntimeError> {
        let mut next = Next::Eval(start, 0);
        loop {
            next = match next {
                Next::Eval(id, pos) => self.eval(id, pos)?,
                Next::Return(result) => match self.stack.pop() {
                    Some(frame) => self.resume(frame, result)?,
                    None => return Ok(result),
                },
            };
        }
    }

    fn eval(&mut self, id: ExprId, pos: usize) -> Result<Next, RuntimeError> {
        self.tick()?;
        let graph = self.graph;
        let expr = &graph[id];
        if let Some(class) = expr.class {
            self.enter()?;
            self.tracer.trace_call(id, pos);
            let plans = self.plan;
            let run = ClassRun::new(&plans.classes[class.index()], id, pos);
            return Ok(self.next_seed(run));
        }

        let next = match &expr.kind {
            ExprKind::Rule(rule) => {
                self.enter()?;
                self.tracer.trace_call(id, pos);
                self.next_alt(id, rule, pos, 0)
            }
            ExprKind::Choice(args) => self.next_choice(args, pos, 0),
            ExprKind::Sequence(args) => self.next_in_sequence(args, 0, Matched::empty(pos)),
            ExprKind::And(a) => self.call(Frame::Lookahead { pos, positive: true }, *a, pos),
            ExprKind::Not(a) => self.call(Frame::Lookahead { pos, positive: false }, *a, pos),
            ExprKind::Plus(a) => self.repeat(*a, 1, pos),
            ExprKind::Star(a) => self.repeat(*a, 0, pos),
            ExprKind::Query(a) => self.call(Frame::Optional { pos }, *a, pos),
            ExprKind::PlusPlus([a, b]) => self.repeat_until(*a, *b, 1, pos),
            ExprKind::StarPlus([a, b]) => self.repeat_until(*a, *b, 0, pos),
            ExprKind::Is([a, b]) => self.exact(*a, *b, true, pos),
            ExprKind::IsNot([a, b]) => self.exact(*a, *b, false, pos),
            ExprKind::Ref(_) => unreachable_ref(id),
            ExprKind::StringLit(_)
            | ExprKind::CharClass { .. }
            | ExprKind::Range(..)
            | ExprKind::Any
            | ExprKind::End => Next::Return(self.terminal(id, pos)),
        };
        Ok(next)
    }

    /// Suspend `frame` until `id` has been matched at `pos`.
    fn call(&mut self, frame: Frame<'a>, id: ExprId, pos: usize) -> Next {
        self.stack.push(frame);
        Next::Eval(id, pos)
    }

    fn resume(&mut self, frame: Frame<'a>, result: Option<Matched>) -> Result<Next, RuntimeError> {
        let next = match frame {
            Frame::Rule { id, rule, pos, alt } => match result {
                Some(m) => {
                    self.leave();
                    self.tracer.trace_success(id, pos, m.end);
                    let action = rule.on_succ[alt].as_ref().map(|a| a.name.clone());
                    let phrase = Phrase::node(self.graph, id, pos, m.end, action, m.items);
                    Next::Return(Some(Matched {
                        end: m.end,
                        items: vec![phrase],
                    }))
                }
                None => self.next_alt(id, rule, pos, alt + 1),
            },
            Frame::Choice { args, pos, next } => match result {
                Some(m) => Next::Return(Some(m)),
                None => self.next_choice(args, pos, next + 1),
            },
            Frame::Sequence { args, next, mut cur } => match result {
                Some(m) => {
                    cur.append(m);
                    self.next_in_sequence(args, next + 1, cur)
                }
                None => Next::Return(None),
            },
            Frame::Lookahead { pos, positive } => {
                Next::Return((result.is_some() == positive).then(|| Matched::empty(pos)))
            }
            Frame::Optional { pos } => {
                Next::Return(Some(result.unwrap_or_else(|| Matched::empty(pos))))
            }
            Frame::Repeat {
                a,
                min,
                mut count,
                mut cur,
            } => match result {
                Some(m) => {
                    let progressed = m.end > cur.end;
                    cur.append(m);
                    count += 1;
                    if progressed {
                        let pos = cur.end;
                        self.call(Frame::Repeat { a, min, count, cur }, a, pos)
                    } else {
                        Next::Return((count >= min).then_some(cur))
                    }
                }
                None => Next::Return((count >= min).then_some(cur)),
            },
            Frame::RepeatUntil {
                a,
                b,
                min,
                mut count,
                mut cur,
                in_body,
            } => match (in_body, result) {
                (false, Some(until)) => {
                    if count < min {
                        Next::Return(None)
                    } else {
                        cur.append(until);
                        Next::Return(Some(cur))
                    }
                }
                (false, None) => {
                    let pos = cur.end;
                    let frame = Frame::RepeatUntil {
                        a,
                        b,
                        min,
                        count,
                        cur,
                        in_body: true,
                    };
                    self.call(frame, a, pos)
                }
                (true, Some(m)) if m.end > cur.end => {
                    cur.append(m);
                    count += 1;
                    let pos = cur.end;
                    let frame = Frame::RepeatUntil {
                        a,
                        b,
                        min,
                        count,
                        cur,
                        in_body: false,
                    };
                    self.call(frame, b, pos)
                }
                (true, _) => Next::Return(None),
            },
            Frame::Exact {
                b,
                pos,
                exact,
                outer: None,
                ..
            } => match result {
                Some(m) => {
                    let saved = self.limit;
                    self.limit = m.end;
                    let frame = Frame::Exact {
                        b,
                        pos,
                        exact,
                        outer: Some(m),
                        saved,
                    };
                    self.call(frame, b, pos)
                }
                None => Next::Return(None),
            },
            Frame::Exact {
                exact,
                outer: Some(m),
                saved,
                ..
            } => {
                self.limit = saved;
                let whole = result.is_some_and(|p| p.end == m.end);
                Next::Return((whole == exact).then_some(m))
            }
            Frame::Class(run) => return self.resume_class(run, result),
        };
        Ok(next)
    }

    fn next_alt(&mut self, id: ExprId, rule: &'a RuleData, pos: usize, alt: usize) -> Next {
        match rule.alts.get(alt) {
            Some(&arg) => self.call(Frame::Rule { id, rule, pos, alt }, arg, pos),
            None => {
                self.leave();
                self.tracer.trace_failure(id, pos);
                Next::Return(None)
            }
        }
    }

    fn next_choice(&mut self, args: &'a [ExprId], pos: usize, next: usize) -> Next {
        match args.get(next) {
            Some(&arg) => self.call(Frame::Choice { args, pos, next }, arg, pos),
            None => Next::Return(None),
        }
    }

    fn next_in_sequence(&mut self, args: &'a [ExprId], next: usize, cur: Matched) -> Next {
        match args.get(next) {
            Some(&arg) => {
                let pos = cur.end;
                self.call(Frame::Sequence { args, next, cur }, arg, pos)
            }
            None => Next::Return(Some(cur)),
        }
    }

    /// `a+` / `a*`, stopping early when `a` makes no progress.
    fn repeat(&mut self, a: ExprId, min: usize, pos: usize) -> Next {
        let frame = Frame::Repeat {
            a,
            min,
            count: 0,
            cur: Matched::empty(pos),
        };
        self.call(frame, a, pos)
    }

    /// `(!b a)+ b` / `(!b a)* b`.
    fn repeat_until(&mut self, a: ExprId, b: ExprId, min: usize, pos: usize) -> Next {
        let frame = Frame::RepeatUntil {
            a,
            b,
            min,
            count: 0,
            cur: Matched::empty(pos),
            in_body: false,
        };
        self.call(frame, b, pos)
    }

    /// `a:b` when `exact`, `a:!b` otherwise. The result is `a`'s match.
    fn exact(&mut self, a: ExprId, b: ExprId, exact: bool, pos: usize) -> Next {
        let frame = Frame::Exact {
            b,
            pos,
            exact,
            outer: None,
            saved: self.limit,
        };
        self.call(frame, a, pos)
    }

    fn terminal(&mut self, id: ExprId, pos: usize) -> Option<Matched> {
        let graph = self.graph;
        let rest = self.input.get(pos..self.limit).unwrap_or_default();
        let next = rest.chars().next();

        let len = match &graph[id].kind {
            ExprKind::StringLit(s) => rest.starts_with(s.as_str()).then_some(s.len()),
            ExprKind::CharClass { chars, negated } => next
                .filter(|c| chars.contains(*c) != *negated)
                .map(char::len_utf8),
            ExprKind::Range(lo, hi) => next.filter(|c| (*lo..=*hi).contains(c)).map(char::len_utf8),
            ExprKind::Any => next.map(char::len_utf8),
            ExprKind::End => return rest.is_empty().then(|| Matched::empty(pos)),
            _ => None,
        }?;

        let end = pos + len;
        let leaf = Phrase::leaf(graph, id, pos, &self.input[pos..end]);
        Some(Matched {
            end,
            items: vec![leaf],
        })
    }

    /// Try the next seed of the class, or fail the whole activation.
    fn next_seed(&mut self, run: ClassRun<'a>) -> Next {
        match run.plan.seeds.get(run.seed) {
            Some(&seed) => {
                self.tracer.trace_seed(seed, run.pos);
                let pos = run.pos;
                self.call(Frame::Class(run), seed, pos)
            }
            None => {
                self.leave();
                self.tracer.trace_failure(run.target, run.pos);
                Next::Return(None)
            }
        }
    }

    fn resume_class(
        &mut self,
        mut run: ClassRun<'a>,
        result: Option<Matched>,
    ) -> Result<Next, RuntimeError> {
        let Some(to) = run.pending.take() else {
            // A seed came back.
            let Some(m) = result else {
                run.seed += 1;
                return Ok(self.next_seed(run));
            };
            run.cur = m;
            run.points.push(ClimbPoint {
                from: run.plan.seeds[run.seed],
                next: 0,
                undo: Undo::Seed,
            });
            return self.climb(run);
        };

        // The rest of a sequence ascent came back.
        if let Some(m) = result {
            let len = run.cur.items.len();
            let end = run.cur.end;
            run.cur.append(m);
            if let Some(top) = run.points.last() {
                self.tracer.trace_ascent(top.from, to, run.cur.end);
            }
            run.points.push(ClimbPoint {
                from: to,
                next: 0,
                undo: Undo::Truncate { len, end },
            });
        }
        self.climb(run)
    }

    /// Grow the current match through the plan's ascents until it is a
    /// match of the target, backtracking through the climb points.
    fn climb(&mut self, mut run: ClassRun<'a>) -> Result<Next, RuntimeError> {
        let plan = run.plan;
        loop {
            let Some(top) = run.points.last_mut() else {
                run.seed += 1;
                return Ok(self.next_seed(run));
            };
            let from = top.from;
            let ascent = plan.climb(from).and_then(|p| p.ascents.get(top.next));

            let Some(ascent) = ascent else {
                if from == run.target {
                    self.tracer.trace_end_grow(run.target, run.cur.end);
                    self.leave();
                    self.tracer.trace_success(run.target, run.pos, run.cur.end);
                    return Ok(Next::Return(Some(run.cur)));
                }
                run.backtrack();
                continue;
            };
            top.next += 1;
            self.tick()?;

            let undo = match &ascent.step {
                AscentStep::Wrap { action, .. } => {
                    let children = std::mem::take(&mut run.cur.items);
                    let action = action.as_ref().map(|a| a.name.clone());
                    let phrase =
                        Phrase::node(self.graph, ascent.to, run.pos, run.cur.end, action, children);
                    run.cur.items.push(phrase);
                    Undo::Unwrap
                }
                AscentStep::Pass => Undo::Keep,
                AscentStep::Continue { rest } => {
                    let start = run.cur.end;
                    run.pending = Some(ascent.to);
                    self.stack.push(Frame::Class(run));
                    return Ok(self.next_in_sequence(rest, 0, Matched::empty(start)));
                }
            };
            self.tracer.trace_ascent(from, ascent.to, run.cur.end);
            run.points.push(ClimbPoint {
                from: ascent.to,
                next: 0,
                undo,
            });
        }
    }

    fn tick(&mut self) -> Result<(), RuntimeError> {
        if self.exec_fuel == 0 {
            return Err(RuntimeError::ExecFuelExhausted);
        }
        self.exec_fuel -= 1;
        Ok(())
    }

    fn enter(&mut self) -> Result<(), RuntimeError> {
        if self.depth >= self.recursion_fuel {
            return Err(RuntimeError::RecursionLimitExceeded);
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}
