//! Human-readable dumps of an analyzed grammar.
//!
//! Every expression line ends with `// code`, the compact attribute code,
//! followed by `rec class X` for members of a recursion class.

use std::fmt::Write;

use climb_core::Colors;

use crate::graph::ExprId;

use super::Grammar;

pub struct GrammarPrinter<'g> {
    grammar: &'g Grammar,
    counts: bool,
    all: bool,
    classes: bool,
    colors: Colors,
}

impl<'g> GrammarPrinter<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            counts: true,
            all: false,
            classes: false,
            colors: Colors::OFF,
        }
    }

    pub fn counts(mut self, value: bool) -> Self {
        self.counts = value;
        self
    }

    /// Also list inner expressions and terminals.
    pub fn all(mut self, value: bool) -> Self {
        self.all = value;
        self
    }

    pub fn classes(mut self, value: bool) -> Self {
        self.classes = value;
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colors = Colors::new(value);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.counts {
            self.format_counts(w)?;
            writeln!(w)?;
        }

        let graph = self.grammar.graph();
        writeln!(w, "Rules")?;
        for id in graph.rules() {
            self.format_expr(w, id, graph.named(id))?;
        }

        if self.all {
            writeln!(w)?;
            writeln!(w, "Inner")?;
            for id in graph.subs() {
                self.format_expr(w, id, graph.named(id))?;
            }
            writeln!(w)?;
            writeln!(w, "Terminals")?;
            for id in graph.terms() {
                self.format_expr(w, id, graph.short(id))?;
            }
        }

        if self.classes {
            for (i, _) in self.grammar.classes().iter().enumerate() {
                writeln!(w)?;
                self.format_class(w, i)?;
            }
        }

        Ok(())
    }

    fn format_counts(&self, w: &mut impl Write) -> std::fmt::Result {
        let graph = self.grammar.graph();
        writeln!(w, "Counts")?;
        writeln!(w, "  {} rules", graph.rule_count())?;
        writeln!(w, "  {} unnamed", graph.subs().count())?;
        writeln!(w, "  {} terminals", graph.terms().count())?;

        let classes = self.grammar.classes();
        if !classes.is_empty() {
            let members: usize = classes.iter().map(|c| c.members.len()).sum();
            let plural = if classes.len() == 1 { "" } else { "es" };
            writeln!(
                w,
                "  {members} left-recursive expressions in {} class{plural}",
                classes.len()
            )?;
        }

        writeln!(
            w,
            "  attributes stable after {} iterations",
            self.grammar.attr_iterations()
        )?;
        if let Some(n) = self.grammar.compacted() {
            writeln!(w, "  {n} duplicate expressions merged")?;
        }
        Ok(())
    }

    fn format_expr(&self, w: &mut impl Write, id: ExprId, text: String) -> std::fmt::Result {
        let c = &self.colors;
        let expr = &self.grammar.graph()[id];
        write!(w, "  {text}   {}// {}", c.dim, expr.attrs.code())?;
        if let Some(class) = self.grammar.class_of(id) {
            write!(w, " rec class {}", class.name)?;
        }
        writeln!(w, "{}", c.reset)
    }

    fn format_class(&self, w: &mut impl Write, index: usize) -> std::fmt::Result {
        let c = &self.colors;
        let graph = self.grammar.graph();
        let class = &self.grammar.classes()[index];

        writeln!(w, "Recursion class {}{}{}", c.name, class.name, c.reset)?;
        writeln!(w, "  members:")?;
        for &m in &class.members {
            write!(w, "    {}", graph.short(m))?;
            if class.is_entry(m) {
                write!(w, " (entry)")?;
            }
            if class.is_exit(m) {
                write!(w, " (exit)")?;
            }
            writeln!(w)?;
        }

        writeln!(w, "  seeds:")?;
        for &seed in &class.seeds {
            let within: Vec<String> = self
                .grammar
                .have_as_first(class, seed)
                .into_iter()
                .map(|m| graph.short(m))
                .collect();
            writeln!(w, "    {} (in {})", graph.short(seed), within.join(", "))?;
        }
        Ok(())
    }
}
