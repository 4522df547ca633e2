use climb_core::grammar::dsl::*;
use climb_core::grammar::{GrammarDef, RuleDef};
use indoc::indoc;

use crate::{DiagnosticKind, Error, Grammar, GrammarBuilder};

#[test]
fn pipeline_from_json() {
    let json = indoc! {r#"
        { "rules": [
            { "name": "E", "alternatives": [
                { "type": "SEQ", "members": [
                    { "type": "REF", "name": "E" },
                    { "type": "STRING", "value": "+" },
                    { "type": "REF", "name": "T" } ] },
                { "type": "REF", "name": "T" } ] },
            { "name": "T", "alternatives": [ { "type": "STRING", "value": "a" } ] }
        ] }
    "#};
    let def = GrammarDef::from_json(json).unwrap();

    let g = Grammar::try_from(&def).unwrap();

    assert!(g.is_valid());
    assert_eq!(g.graph().rule_count(), 2);
    assert_eq!(g.classes().len(), 1);
    assert!(g.plan().is_ok());
}

#[test]
fn resolution_errors_stop_the_pipeline() {
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(seq([name("A"), name("B")])));

    let err = Grammar::try_from(def).unwrap_err();

    let Error::Resolve(diag) = &err else {
        panic!("expected a resolve error, got {err:?}");
    };
    assert_eq!(diag.error_count(), 2);
    insta::assert_snapshot!(err.to_string(), @"grammar resolution failed with 2 errors");
}

#[test]
fn analysis_errors_are_collected() {
    // S = A ; A = A ;
    let def = GrammarDef::new()
        .rule(RuleDef::new("S").alt(name("A")))
        .rule(RuleDef::new("A").alt(name("A")));

    let g = Grammar::try_from(def).unwrap();

    assert!(!g.is_valid());
    assert!(g.diagnostics().contains(DiagnosticKind::Cycle));
    assert!(g.diagnostics().contains(DiagnosticKind::VoidExpression));
    let err = g.plan().unwrap_err();
    assert!(err.to_string().starts_with("parser generation refused"));
}

#[test]
fn warnings_do_not_block_planning() {
    let def = GrammarDef::new()
        .rule(RuleDef::new("S").alt(lit("s")))
        .rule(RuleDef::new("Unused").alt(lit("u")));

    let g = Grammar::try_from(def).unwrap();

    assert!(g.is_valid());
    assert_eq!(g.diagnostics().warning_count(), 1);
    assert!(g.plan().is_ok());
}

#[test]
fn indexed_stage_is_inspectable() {
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(seq([lit("a"), lit("b")])));

    let indexed = GrammarBuilder::new(&def).build().unwrap();

    assert_eq!(indexed.graph().len(), 4);
    assert_eq!(indexed.graph()[indexed.graph().rules().next().unwrap()].attrs.code(), "v");

    let g = indexed.analyze();
    assert_eq!(g.graph()[g.graph().rules().next().unwrap()].attrs.code(), "1f");
    assert_eq!(g.compacted(), None);
}

#[test]
fn class_lookup() {
    let def = GrammarDef::new()
        .rule(RuleDef::new("E").alt(seq([name("E"), lit("+"), name("T")])).alt(name("T")))
        .rule(RuleDef::new("T").alt(lit("a")));

    let g = Grammar::try_from(def).unwrap();
    let e = g.graph().find_rule("E").unwrap();
    let t = g.graph().find_rule("T").unwrap();

    assert_eq!(g.class_of(e).map(|c| c.name.as_str()), Some("E"));
    assert!(g.class_of(t).is_none());
}
