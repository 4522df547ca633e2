//! Tracing infrastructure for debugging grammar execution.
//!
//! # Design: Zero-Cost Abstraction
//!
//! When `NoopTracer` is used every trait method is an `#[inline(always)]`
//! empty function, so the calls and their arguments compile away. No
//! tracing state lives in the interpreter itself; `PrintTracer` keeps its
//! own call depth for indentation.

use climb_core::Colors;
use climb_core::utils::{to_string_lit, truncate_text};

use crate::graph::{ExprId, Graph};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: rule calls, successes and failures.
    #[default]
    Default,
    /// Verbose (-v): also seeds, ascents and end of growth.
    Verbose,
    /// Very verbose (-vv): also the matched text on success.
    VeryVerbose,
}

/// Instrumentation hooks for the interpreter.
///
/// Each method is called at a specific point during execution:
/// - `trace_call` - when a rule is invoked or a recursion class is entered
/// - `trace_success` / `trace_failure` - when that invocation returns
/// - `trace_seed` - before a seed of a recursion class is tried
/// - `trace_ascent` - after an ascent step into a member succeeded
/// - `trace_end_grow` - when growth stops at the requested member
pub trait Tracer {
    fn trace_call(&mut self, id: ExprId, pos: usize);

    fn trace_success(&mut self, id: ExprId, start: usize, end: usize);

    fn trace_failure(&mut self, id: ExprId, pos: usize);

    fn trace_seed(&mut self, seed: ExprId, pos: usize);

    fn trace_ascent(&mut self, from: ExprId, to: ExprId, end: usize);

    fn trace_end_grow(&mut self, target: ExprId, end: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_call(&mut self, _id: ExprId, _pos: usize) {}

    #[inline(always)]
    fn trace_success(&mut self, _id: ExprId, _start: usize, _end: usize) {}

    #[inline(always)]
    fn trace_failure(&mut self, _id: ExprId, _pos: usize) {}

    #[inline(always)]
    fn trace_seed(&mut self, _seed: ExprId, _pos: usize) {}

    #[inline(always)]
    fn trace_ascent(&mut self, _from: ExprId, _to: ExprId, _end: usize) {}

    #[inline(always)]
    fn trace_end_grow(&mut self, _target: ExprId, _end: usize) {}
}

/// Max characters of matched text shown per line.
const TEXT_WIDTH: usize = 24;

/// Tracer that collects an indented execution log.
pub struct PrintTracer<'t> {
    graph: &'t Graph,
    /// Input for extracting matched text.
    input: &'t str,
    verbosity: Verbosity,
    /// Collected trace lines.
    lines: Vec<String>,
    depth: usize,
    colors: Colors,
}

impl<'t> PrintTracer<'t> {
    pub fn new(graph: &'t Graph, input: &'t str, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            graph,
            input,
            verbosity,
            lines: Vec::new(),
            depth: 0,
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all collected lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }

    fn verbose(&self) -> bool {
        self.verbosity != Verbosity::Default
    }

    fn push(&mut self, text: String) {
        self.lines.push(format!("{}{text}", "  ".repeat(self.depth)));
    }

    fn name(&self, id: ExprId) -> String {
        let c = &self.colors;
        format!("{}{}{}", c.name, self.graph.short(id), c.reset)
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_call(&mut self, id: ExprId, pos: usize) {
        let line = format!("→ {} @{pos}", self.name(id));
        self.push(line);
        self.depth += 1;
    }

    fn trace_success(&mut self, id: ExprId, start: usize, end: usize) {
        self.depth = self.depth.saturating_sub(1);
        let mut line = format!("✓ {} {start}..{end}", self.name(id));
        if self.verbosity == Verbosity::VeryVerbose {
            let c = &self.colors;
            let text = self.input.get(start..end).unwrap_or_default();
            line.push_str(&format!(
                " {}{}{}",
                c.literal,
                to_string_lit(&truncate_text(text, TEXT_WIDTH)),
                c.reset
            ));
        }
        self.push(line);
    }

    fn trace_failure(&mut self, id: ExprId, pos: usize) {
        self.depth = self.depth.saturating_sub(1);
        let line = format!("{}✗{} {} @{pos}", self.colors.error, self.colors.reset, self.name(id));
        self.push(line);
    }

    fn trace_seed(&mut self, seed: ExprId, pos: usize) {
        if !self.verbose() {
            return;
        }
        let line = format!("{}seed{} {} @{pos}", self.colors.dim, self.colors.reset, self.name(seed));
        self.push(line);
    }

    fn trace_ascent(&mut self, from: ExprId, to: ExprId, end: usize) {
        if !self.verbose() {
            return;
        }
        let line = format!("↑ {} → {} ..{end}", self.name(from), self.name(to));
        self.push(line);
    }

    fn trace_end_grow(&mut self, target: ExprId, end: usize) {
        if !self.verbose() {
            return;
        }
        let line = format!("■ {} ..{end}", self.name(target));
        self.push(line);
    }
}
