use climb_core::grammar::dsl::*;
use climb_core::grammar::{GrammarDef, RuleDef};

use crate::{Grammar, GrammarBuilder};

fn compacted(def: &GrammarDef) -> Grammar {
    GrammarBuilder::new(def)
        .with_compaction(true)
        .build()
        .expect("references resolve")
        .analyze()
}

#[test]
fn duplicates_merge_into_first_copy() {
    // S = X "a" / "a" ; X = "a"* ;
    let def = GrammarDef::new()
        .rule(RuleDef::new("S").alt(seq([name("X"), lit("a")])).alt(lit("a")))
        .rule(RuleDef::new("X").alt(lit("a").star()));

    let g = compacted(&def);
    let graph = g.graph();

    assert_eq!(g.compacted(), Some(2));
    assert_eq!(graph.terms().count(), 1);

    let kept = graph.terms().next().unwrap();
    let s = graph.find_rule("S").unwrap();
    assert_eq!(graph[s].kind.children()[1], kept);
    for id in graph.ids().filter(|id| !graph.is_live(*id)) {
        assert_eq!(graph[id].alias, Some(kept));
    }
}

#[test]
fn whole_subtrees_are_dropped() {
    // S = ("a" "b") "c" / ("a" "b") "d" ;
    let def = GrammarDef::new().rule(
        RuleDef::new("S")
            .alt(seq([seq([lit("a"), lit("b")]), lit("c")]))
            .alt(seq([seq([lit("a"), lit("b")]), lit("d")])),
    );

    let g = compacted(&def);

    // The second `"a" "b"` and its two terminals.
    assert_eq!(g.compacted(), Some(3));
    assert_eq!(g.graph().subs().count(), 3);
}

#[test]
fn recursion_classes_are_left_alone() {
    // E = E "+" T / T ; T = "a" / "(" "a" ")" ;
    let def = GrammarDef::new()
        .rule(RuleDef::new("E").alt(seq([name("E"), lit("+"), name("T")])).alt(name("T")))
        .rule(
            RuleDef::new("T")
                .alt(lit("a"))
                .alt(seq([lit("("), lit("a"), lit(")")])),
        );

    let g = compacted(&def);
    let graph = g.graph();

    assert_eq!(g.compacted(), Some(1));
    for class in g.classes() {
        assert!(class.members.iter().all(|m| graph.is_live(*m)));
    }
}

#[test]
fn compaction_runs_once() {
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(lit("a")).alt(seq([lit("b"), lit("a")])));
    let mut g = Grammar::try_from(&def).unwrap();

    assert_eq!(g.compacted(), None);
    let first = g.compact();
    let len = g.graph().terms().count();

    assert_eq!(first, 1);
    assert_eq!(g.compact(), first);
    assert_eq!(g.graph().terms().count(), len);
}

#[test]
fn indices_stay_stable() {
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(lit("a")).alt(seq([lit("b"), lit("a")])));
    let before = Grammar::try_from(&def).unwrap();

    let after = compacted(&def);

    assert_eq!(before.graph().len(), after.graph().len());
    for id in before.graph().ids() {
        assert_eq!(before.graph()[id].name, after.graph()[id].name);
    }
}
