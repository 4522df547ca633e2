use climb_core::grammar::dsl::*;
use climb_core::grammar::{ActionDef, AltDef, GrammarDef, RuleDef};

use crate::GrammarBuilder;

fn sources(def: &GrammarDef) -> String {
    let indexed = GrammarBuilder::new(def).build().expect("references resolve");
    let graph = indexed.graph();
    graph
        .ids()
        .map(|id| graph.named(id))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn named_children_print_as_names() {
    let def = GrammarDef::new()
        .rule(RuleDef::new("E").alt(seq([name("E"), lit("+"), name("T")])).alt(name("T")))
        .rule(RuleDef::new("T").alt(lit("a")));

    insta::assert_snapshot!(sources(&def), @r#"
    E = E "+" T / T ;
    T = "a" ;
    E_0 = E "+" T
    E_1 = "+"
    T_0 = "a"
    "#);
}

#[test]
fn weaker_children_are_parenthesized() {
    // S = ("a" / "b")* "c" !("d" "e") ;
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(seq([
        choice([lit("a"), lit("b")]).star(),
        lit("c"),
        seq([lit("d"), lit("e")]).not(),
    ])));

    let out = sources(&def);

    assert_eq!(
        out.lines().next().unwrap(),
        r#"S = ("a" / "b")* "c" !("d" "e") ;"#
    );
}

#[test]
fn binary_operators() {
    // S = _*+ "*/" [a-z]+:!"if" ;
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(seq([
        any().star_until(lit("*/")),
        range('a', 'z').plus().is_not(lit("if")),
    ])));

    let out = sources(&def);

    assert_eq!(
        out.lines().next().unwrap(),
        r#"S = _*+ "*/" ([a-z]+):!"if" ;"#
    );
}

#[test]
fn terminals() {
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(seq([
        class("xy"),
        not_class("xy"),
        range('0', '9'),
        any(),
        end(),
    ])));

    let out = sources(&def);

    assert_eq!(out.lines().next().unwrap(), r#"S = [xy] ^[xy] [0-9] _ !_ ;"#);
}

#[test]
fn actions_and_diagnostic_name() {
    let def = GrammarDef::new().rule(
        RuleDef::new("R")
            .alt_with(
                AltDef::new(lit("a"))
                    .on_success(ActionDef::named("x"))
                    .on_failure(ActionDef::named("y")),
            )
            .alt_with(AltDef::new(lit("b")).on_success(ActionDef::named("z").boolean()))
            .diag("Thing"),
    );

    let out = sources(&def);

    assert_eq!(
        out.lines().next().unwrap(),
        r#"R = "a" {x} ~{y} / "b" {&z} <Thing> ;"#
    );
}

#[test]
fn control_characters_print_escaped() {
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(lit("\n")));

    insta::assert_snapshot!(sources(&def), @r#"
    S = "\n" ;
    S_0 = "\n"
    "#);
}
