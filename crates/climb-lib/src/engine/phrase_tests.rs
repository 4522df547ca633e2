use crate::graph::ExprId;

use super::Phrase;

fn leaf(start: usize, text: &str) -> Phrase {
    Phrase {
        expr: ExprId::new(9),
        name: format!("{text:?}"),
        start,
        end: start + text.len(),
        action: None,
        children: Vec::new(),
        text: Some(text.to_string()),
    }
}

fn node(name: &str, action: Option<&str>, children: Vec<Phrase>) -> Phrase {
    Phrase {
        expr: ExprId::new(0),
        name: name.to_string(),
        start: children.first().map_or(0, |c| c.start),
        end: children.last().map_or(0, |c| c.end),
        action: action.map(str::to_string),
        children,
        text: None,
    }
}

#[test]
fn display_is_s_expression() {
    let p = node("S", None, vec![leaf(0, "a"), node("T", None, vec![leaf(1, "b")])]);

    insta::assert_snapshot!(p.to_string(), @r#"(S "a" (T "b"))"#);
}

#[test]
fn leaf_text_is_escaped() {
    let p = node("S", None, vec![leaf(0, "\"\n")]);

    insta::assert_snapshot!(p.to_string(), @r#"(S "\"\n")"#);
}

#[test]
fn empty_rule_phrase() {
    let p = node("Empty", None, Vec::new());

    assert!(p.is_empty());
    assert!(!p.is_leaf());
    insta::assert_snapshot!(p.to_string(), @"(Empty)");
}

#[test]
fn pretty_shows_spans_and_actions() {
    let p = node("S", Some("build"), vec![leaf(0, "ab"), leaf(2, "c")]);

    assert_eq!(p.len(), 3);
    insta::assert_snapshot!(p.pretty(), @r#"
    S 0..3 {build}
      "ab" 0..2
      "c" 2..3
    "#);
}

#[test]
fn deep_tree_prints_and_drops() {
    let mut p = leaf(0, "a");
    for _ in 0..100_000 {
        p = node("E", None, vec![p]);
    }

    let text = p.to_string();
    assert!(text.starts_with("(E (E "));
    assert!(text.ends_with(r#""a"))"#));
    assert_eq!(p.pretty().lines().count(), 100_001);
}
