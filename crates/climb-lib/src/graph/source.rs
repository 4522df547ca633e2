//! Source reconstruction.
//!
//! Every node gets a canonical PEG rendering. Named children print as their
//! name; unnamed ones are inlined, parenthesized when their binding strength
//! does not exceed the slot they sit in:
//!
//! | slot | level |
//! |---|---|
//! | choice alternative | 0 |
//! | sequence element | 1 |
//! | `&` / `!` operand | 2 |
//! | suffix and binary operands | 3 |
//!
//! Nodes are visited in reverse index order. Unnamed children always sit at
//! a higher index than their parent, so their text is ready when needed.

use std::fmt::Write;

use super::{ExprId, ExprKind, Graph};

const BIND_CHOICE: u8 = 0;
const BIND_SEQUENCE: u8 = 1;
const BIND_PREFIX: u8 = 2;
const BIND_SUFFIX: u8 = 3;
const BIND_ATOM: u8 = 4;

pub(crate) fn reconstruct_sources(graph: &mut Graph) {
    for i in (0..graph.len()).rev() {
        let id = ExprId::new(i);
        let (source, bind) = render(graph, id);
        let expr = graph.get_mut(id);
        expr.source = source;
        expr.bind = bind;
    }
}

fn render(graph: &Graph, id: ExprId) -> (String, u8) {
    let expr = &graph[id];
    let wrap = |child: ExprId, level: u8| enclose(graph, child, level);

    match &expr.kind {
        ExprKind::Rule(rule) => {
            let mut out = format!("{} = ", expr.name);
            for (i, alt) in rule.alts.iter().enumerate() {
                if i > 0 {
                    out.push_str(" / ");
                }
                out.push_str(&wrap(*alt, BIND_CHOICE));
                if let Some(action) = &rule.on_succ[i] {
                    let _ = write!(out, " {action}");
                }
                if let Some(action) = &rule.on_fail[i] {
                    let _ = write!(out, " ~{action}");
                }
            }
            if let Some(diag) = &rule.diag_name {
                let _ = write!(out, " <{diag}>");
            }
            out.push_str(" ;");
            (out, BIND_ATOM)
        }
        ExprKind::Choice(args) => {
            let bind = if args.len() > 1 { BIND_CHOICE } else { BIND_ATOM };
            (join(graph, args, BIND_CHOICE, " / "), bind)
        }
        ExprKind::Sequence(args) => (join(graph, args, BIND_SEQUENCE, " "), BIND_SEQUENCE),
        ExprKind::And(a) => (format!("&{}", wrap(*a, BIND_PREFIX)), BIND_PREFIX),
        ExprKind::Not(a) => (format!("!{}", wrap(*a, BIND_PREFIX)), BIND_PREFIX),
        ExprKind::Plus(a) => (format!("{}+", wrap(*a, BIND_SUFFIX)), BIND_SUFFIX),
        ExprKind::Star(a) => (format!("{}*", wrap(*a, BIND_SUFFIX)), BIND_SUFFIX),
        ExprKind::Query(a) => (format!("{}?", wrap(*a, BIND_SUFFIX)), BIND_SUFFIX),
        ExprKind::PlusPlus([a, b]) => (binary(graph, *a, "++ ", *b), BIND_SUFFIX),
        ExprKind::StarPlus([a, b]) => (binary(graph, *a, "*+ ", *b), BIND_SUFFIX),
        ExprKind::Is([a, b]) => (binary(graph, *a, ":", *b), BIND_SUFFIX),
        ExprKind::IsNot([a, b]) => (binary(graph, *a, ":!", *b), BIND_SUFFIX),
        ExprKind::Ref(name) => (name.clone(), BIND_ATOM),
        ExprKind::StringLit(s) => (format!("\"{s}\""), BIND_ATOM),
        ExprKind::CharClass { chars, negated } => {
            let hat = if *negated { "^" } else { "" };
            (format!("{hat}[{chars}]"), BIND_ATOM)
        }
        ExprKind::Range(a, z) => (format!("[{a}-{z}]"), BIND_ATOM),
        ExprKind::Any => ("_".to_string(), BIND_ATOM),
        ExprKind::End => ("!_".to_string(), BIND_ATOM),
    }
}

fn enclose(graph: &Graph, child: ExprId, level: u8) -> String {
    let expr = &graph[child];
    if expr.named {
        return expr.name.clone();
    }
    if expr.bind <= level {
        format!("({})", expr.source)
    } else {
        expr.source.clone()
    }
}

fn join(graph: &Graph, args: &[ExprId], level: u8, sep: &str) -> String {
    args.iter()
        .map(|a| enclose(graph, *a, level))
        .collect::<Vec<_>>()
        .join(sep)
}

fn binary(graph: &Graph, a: ExprId, op: &str, b: ExprId) -> String {
    format!(
        "{}{op}{}",
        enclose(graph, a, BIND_SUFFIX),
        enclose(graph, b, BIND_SUFFIX)
    )
}
