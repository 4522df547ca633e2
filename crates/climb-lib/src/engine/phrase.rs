//! Phrase trees produced by the engine.

use std::fmt;

use climb_core::utils::to_string_lit;

use crate::graph::{ExprId, Graph};

/// A matched rule or terminal.
///
/// Rules become nodes; inner expressions of a rule are spliced into the
/// rule's children, so only rules and terminals appear in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub expr: ExprId,
    /// Rule name, or terminal source for leaves.
    pub name: String,
    /// Byte offset into the input.
    pub start: usize,
    /// Byte offset into the input, exclusive.
    pub end: usize,
    /// Success action of the alternative that matched.
    pub action: Option<String>,
    pub children: Vec<Phrase>,
    /// Matched text, set on terminal leaves only.
    pub text: Option<String>,
}

impl Phrase {
    pub(crate) fn node(
        graph: &Graph,
        expr: ExprId,
        start: usize,
        end: usize,
        action: Option<String>,
        children: Vec<Phrase>,
    ) -> Self {
        Self {
            expr,
            name: graph[expr].name.clone(),
            start,
            end,
            action,
            children,
            text: None,
        }
    }

    pub(crate) fn leaf(graph: &Graph, expr: ExprId, start: usize, text: &str) -> Self {
        Self {
            expr,
            name: graph.short(expr),
            start,
            end: start + text.len(),
            action: None,
            children: Vec::new(),
            text: Some(text.to_string()),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.text.is_some()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Indented tree with spans and actions, one phrase per line.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self, 0)];
        while let Some((phrase, depth)) = stack.pop() {
            let indent = "  ".repeat(depth);
            if let Some(text) = &phrase.text {
                out.push_str(&format!(
                    "{indent}{} {}..{}\n",
                    to_string_lit(text),
                    phrase.start,
                    phrase.end
                ));
                continue;
            }
            out.push_str(&format!("{indent}{} {}..{}", phrase.name, phrase.start, phrase.end));
            if let Some(action) = &phrase.action {
                out.push_str(&format!(" {{{action}}}"));
            }
            out.push('\n');
            stack.extend(phrase.children.iter().rev().map(|c| (c, depth + 1)));
        }
        out
    }
}

enum Piece<'p> {
    Open(&'p Phrase),
    Close,
}

/// S-expression form: `(E (T "a") "+" (T "a"))`.
impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Open(self)];
        let mut first = true;
        while let Some(piece) = stack.pop() {
            let phrase = match piece {
                Piece::Open(phrase) => phrase,
                Piece::Close => {
                    write!(f, ")")?;
                    continue;
                }
            };
            if !std::mem::take(&mut first) {
                write!(f, " ")?;
            }
            if let Some(text) = &phrase.text {
                write!(f, "{}", to_string_lit(text))?;
                continue;
            }
            write!(f, "({}", phrase.name)?;
            stack.push(Piece::Close);
            stack.extend(phrase.children.iter().rev().map(Piece::Open));
        }
        Ok(())
    }
}

/// Left-recursive parses nest as deep as the input is long.
impl Drop for Phrase {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}
