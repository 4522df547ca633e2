//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use climb_core::Colors;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    path: Option<&'d str>,
    colors: Colors,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            path: None,
            colors: Colors::OFF,
        }
    }

    /// Grammar file the findings belong to, printed before each message.
    pub fn path(mut self, path: &'d str) -> Self {
        self.path = Some(path);
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
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            self.format_one(w, diag)?;
        }
        Ok(())
    }

    fn format_one(&self, w: &mut impl Write, diag: &DiagnosticMessage) -> std::fmt::Result {
        let c = &self.colors;
        let color = match diag.severity() {
            Severity::Error => c.error,
            Severity::Warning => c.warning,
        };

        if let Some(path) = self.path {
            write!(w, "{path}: ")?;
        }
        writeln!(w, "{color}{}{}: {}", diag.severity(), c.reset, diag.message)?;
        for related in &diag.related {
            writeln!(w, "  {}note:{} {related}", c.dim, c.reset)?;
        }
        for hint in &diag.hints {
            writeln!(w, "  {}hint:{} {hint}", c.dim, c.reset)?;
        }
        Ok(())
    }
}
