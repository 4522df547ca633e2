use climb_core::grammar::dsl::*;
use climb_core::grammar::{ActionDef, AltDef, GrammarDef, RuleDef};

use crate::{DiagnosticKind, Grammar};

fn grammar(def: GrammarDef) -> Grammar {
    Grammar::try_from(def).expect("references resolve")
}

#[test]
fn clean_grammar_has_no_findings() {
    let g = grammar(
        GrammarDef::new()
            .rule(RuleDef::new("E").alt(seq([name("E"), lit("+"), name("T")])).alt(name("T")))
            .rule(RuleDef::new("T").alt(lit("a"))),
    );

    assert!(g.is_valid());
    assert!(g.diagnostics().is_empty());
}

#[test]
fn self_loop() {
    // A = A ;
    let g = grammar(GrammarDef::new().rule(RuleDef::new("A").alt(name("A"))));

    assert!(!g.is_valid());
    insta::assert_snapshot!(g.dump_diagnostics(), @r"
    error: recursion class of `A` has no seed
      hint: add an alternative that does not start with a left-recursive call

    error: `A` is void

    error: the grammar has a cycle involving `A`
    ");
}

#[test]
fn one_cycle_report_per_group() {
    // S = A / "s" ; A = B / "a" ; B = A / "b" ;
    let g = grammar(
        GrammarDef::new()
            .rule(RuleDef::new("S").alt(name("A")).alt(lit("s")))
            .rule(RuleDef::new("A").alt(name("B")).alt(lit("a")))
            .rule(RuleDef::new("B").alt(name("A")).alt(lit("b"))),
    );

    let cycles: Vec<&str> = g
        .diagnostics()
        .iter()
        .filter(|d| d.kind() == DiagnosticKind::Cycle)
        .map(|d| d.subject())
        .collect();
    assert_eq!(cycles, ["A"]);
}

#[test]
fn nullable_recursion_head() {
    // L = Opt L "," N / N ; Opt = "o"? ; N = "n" ;
    let g = grammar(
        GrammarDef::new()
            .rule(
                RuleDef::new("L")
                    .alt(seq([name("Opt"), name("L"), lit(","), name("N")]))
                    .alt(name("N")),
            )
            .rule(RuleDef::new("Opt").alt(lit("o").opt()))
            .rule(RuleDef::new("N").alt(lit("n"))),
    );

    insta::assert_snapshot!(g.dump_diagnostics(), @r#"
    error: left-recursive `Opt L "," N` starts with a nullable expression
      note: `Opt` may match the empty string
      hint: the ascent could loop without consuming input
    "#);
}

#[test]
fn nullable_repetition() {
    // S = ("a"?)* "b"++ "c" ;
    let g = grammar(GrammarDef::new().rule(RuleDef::new("S").alt(seq([
        lit("a").opt().star(),
        lit("b").plus_until(lit("c")),
    ]))));

    insta::assert_snapshot!(g.dump_diagnostics(), @r#"error: argument of `("a"?)*` is nullable"#);
}

#[test]
fn actions_in_recursive_rule() {
    // E = E "+" "a" {&check} ~{oops} / "a" ;
    let g = grammar(
        GrammarDef::new().rule(
            RuleDef::new("E")
                .alt_with(
                    AltDef::new(seq([name("E"), lit("+"), lit("a")]))
                        .on_success(ActionDef::named("check").boolean())
                        .on_failure(ActionDef::named("oops")),
                )
                .alt(lit("a")),
        ),
    );

    insta::assert_snapshot!(g.dump_diagnostics(), @r#"
    error: boolean action "check" is not supported in recursive `E`

    error: action on failure "oops" is not supported in recursive `E`
    "#);
}

#[test]
fn actions_outside_recursion_are_fine() {
    let g = grammar(
        GrammarDef::new().rule(
            RuleDef::new("S").alt_with(
                AltDef::new(lit("s"))
                    .on_success(ActionDef::named("check").boolean())
                    .on_failure(ActionDef::named("oops")),
            ),
        ),
    );

    assert!(g.diagnostics().is_empty());
}

#[test]
fn advisories() {
    // S = "a"* / "b" / X? ; X = "x"* ; A = A "a" / "b" ;
    let g = grammar(
        GrammarDef::new()
            .rule(
                RuleDef::new("S")
                    .alt(lit("a").star())
                    .alt(lit("b"))
                    .alt(name("X").opt()),
            )
            .rule(RuleDef::new("X").alt(lit("x").star()))
            .rule(RuleDef::new("A").alt(seq([name("A"), lit("a")])).alt(lit("b"))),
    );

    assert!(g.is_valid());
    insta::assert_snapshot!(g.dump_diagnostics(), @r#"
    warning: recursion class of `A` is not used

    warning: "a"* in `S` never fails and hides other alternative(s)

    warning: as `X` never fails, `?` after it can be dropped
    "#);
}
