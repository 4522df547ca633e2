use climb_core::Colors;
use climb_core::grammar::dsl::*;
use climb_core::grammar::{ActionDef, AltDef, GrammarDef, RuleDef};
use indoc::indoc;

use crate::Grammar;
use crate::engine::{Engine, PrintTracer, RuntimeError, Verbosity};

fn run_with(def: GrammarDef, input: &str, configure: impl FnOnce(Engine) -> Engine) -> String {
    let grammar = Grammar::try_from(def).expect("references resolve");
    let engine = match Engine::new(&grammar) {
        Ok(engine) => configure(engine),
        Err(e) => return format!("GENERATION ERROR: {e}"),
    };

    match engine.run(input) {
        Ok(Some(phrase)) if phrase.end == input.len() => phrase.to_string(),
        Ok(Some(phrase)) => format!("{phrase} (stopped at {})", phrase.end),
        Ok(None) => "NO MATCH".to_string(),
        Err(e) => format!("RUNTIME ERROR: {e}"),
    }
}

fn run(def: GrammarDef, input: &str) -> String {
    run_with(def, input, |engine| engine)
}

// E = E "+" T / T ; T = "a" ;
fn sum() -> GrammarDef {
    GrammarDef::new()
        .rule(RuleDef::new("E").alt(seq([name("E"), lit("+"), name("T")])).alt(name("T")))
        .rule(RuleDef::new("T").alt(lit("a")))
}

// E = E "+" T / T ; T = T "*" F / F ; F = "a" / "(" E ")" ;
fn arith() -> GrammarDef {
    GrammarDef::new()
        .rule(RuleDef::new("E").alt(seq([name("E"), lit("+"), name("T")])).alt(name("T")))
        .rule(RuleDef::new("T").alt(seq([name("T"), lit("*"), name("F")])).alt(name("F")))
        .rule(
            RuleDef::new("F")
                .alt(lit("a"))
                .alt(seq([lit("("), name("E"), lit(")")])),
        )
}

#[test]
fn left_recursion_associates_left() {
    let result = run(sum(), "a+a+a");

    insta::assert_snapshot!(result, @r#"(E (E (E (T "a")) "+" (T "a")) "+" (T "a"))"#);
}

#[test]
fn seed_alone_ends_growth() {
    insta::assert_snapshot!(run(sum(), "a"), @r#"(E (T "a"))"#);
}

#[test]
fn growth_stops_before_unmatched_suffix() {
    insta::assert_snapshot!(run(sum(), "a+a+"), @r#"(E (E (T "a")) "+" (T "a")) (stopped at 3)"#);
}

#[test]
fn direct_recursion_on_literal_seed() {
    // A = A "x" / "y" ;
    let def = GrammarDef::new().rule(RuleDef::new("A").alt(seq([name("A"), lit("x")])).alt(lit("y")));

    insta::assert_snapshot!(run(def.clone(), "yxx"), @r#"(A (A (A "y") "x") "x")"#);
    insta::assert_snapshot!(run(def, "x"), @"NO MATCH");
}

#[test]
fn precedence_levels_nest() {
    let result = run(arith(), "a+a*a");

    insta::assert_snapshot!(result, @r#"(E (E (T (F "a"))) "+" (T (T (F "a")) "*" (F "a")))"#);
}

#[test]
fn parenthesized_operand_reenters_class() {
    let result = run(arith(), "(a+a)*a");

    insta::assert_snapshot!(result, @r#"(E (T (T (F "(" (E (E (T (F "a"))) "+" (T (F "a"))) ")")) "*" (F "a")))"#);
}

#[test]
fn mutual_left_recursion() {
    // A = B "x" / "y" ; B = A "z" / "w" ;
    let def = GrammarDef::new()
        .rule(RuleDef::new("A").alt(seq([name("B"), lit("x")])).alt(lit("y")))
        .rule(RuleDef::new("B").alt(seq([name("A"), lit("z")])).alt(lit("w")));

    insta::assert_snapshot!(run(def.clone(), "yzx"), @r#"(A (B (A "y") "z") "x")"#);
    insta::assert_snapshot!(run(def, "wx"), @r#"(A (B "w") "x")"#);
}

#[test]
fn operator_choice_passes_through() {
    // E = (E "+" / E "-") T / T ; T = "a" ;
    let def = GrammarDef::new()
        .rule(
            RuleDef::new("E")
                .alt(seq([
                    choice([seq([name("E"), lit("+")]), seq([name("E"), lit("-")])]),
                    name("T"),
                ]))
                .alt(name("T")),
        )
        .rule(RuleDef::new("T").alt(lit("a")));

    let result = run(def, "a-a+a");

    insta::assert_snapshot!(result, @r#"(E (E (E (T "a")) "-" (T "a")) "+" (T "a"))"#);
}

#[test]
fn right_recursion_is_plain_peg() {
    // S = "a" S / "b" ;
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(seq([lit("a"), name("S")])).alt(lit("b")));

    insta::assert_snapshot!(run(def, "aab"), @r#"(S "a" (S "a" (S "b")))"#);
}

#[test]
fn repetition_and_end_of_input() {
    // S = [0-9]+ !_ ;
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(seq([range('0', '9').plus(), end()])));

    insta::assert_snapshot!(run(def.clone(), "123"), @r#"(S "1" "2" "3")"#);
    insta::assert_snapshot!(run(def, "12x"), @"NO MATCH");
}

#[test]
fn lookahead_consumes_nothing() {
    // S = &"a" _ !"b" ;
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(seq([
        lit("a").and(),
        any(),
        lit("b").not(),
    ])));

    insta::assert_snapshot!(run(def.clone(), "a"), @r#"(S "a")"#);
    insta::assert_snapshot!(run(def, "ab"), @"NO MATCH");
}

#[test]
fn star_until_includes_terminator() {
    // C = "/*" _ *+ "*/" ;
    let def = GrammarDef::new().rule(
        RuleDef::new("C").alt(seq([lit("/*"), any().star_until(lit("*/"))])),
    );

    insta::assert_snapshot!(run(def.clone(), "/*x*/"), @r#"(C "/*" "x" "*/")"#);
    insta::assert_snapshot!(run(def, "/**/"), @r#"(C "/*" "*/")"#);
}

#[test]
fn plus_until_needs_one_item() {
    // S = [a-z]++ ";" ;
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(range('a', 'z').plus_until(lit(";"))));

    insta::assert_snapshot!(run(def.clone(), "ab;"), @r#"(S "a" "b" ";")"#);
    insta::assert_snapshot!(run(def, ";"), @"NO MATCH");
}

#[test]
fn is_not_excludes_exact_keyword() {
    // Id = [a-z]+ :! "if" ;
    let def = GrammarDef::new().rule(RuleDef::new("Id").alt(range('a', 'z').plus().is_not(lit("if"))));

    insta::assert_snapshot!(run(def.clone(), "ifx"), @r#"(Id "i" "f" "x")"#);
    insta::assert_snapshot!(run(def, "if"), @"NO MATCH");
}

#[test]
fn is_requires_exact_match() {
    // K = [a-z]+ : "if" ;
    let def = GrammarDef::new().rule(RuleDef::new("K").alt(range('a', 'z').plus().is(lit("if"))));

    insta::assert_snapshot!(run(def.clone(), "if"), @r#"(K "i" "f")"#);
    insta::assert_snapshot!(run(def, "ifx"), @"NO MATCH");
}

#[test]
fn class_and_negated_class() {
    // S = [xy] ^[xy] ;
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(seq([class("xy"), not_class("xy")])));

    insta::assert_snapshot!(run(def.clone(), "yz"), @r#"(S "y" "z")"#);
    insta::assert_snapshot!(run(def, "yx"), @"NO MATCH");
}

#[test]
fn actions_attach_to_phrases() {
    // E = E "+" T {} / T {single} ; T = "a" ;
    let def = GrammarDef::new()
        .rule(
            RuleDef::new("E")
                .alt_with(
                    AltDef::new(seq([name("E"), lit("+"), name("T")]))
                        .on_success(ActionDef::unnamed()),
                )
                .alt_with(AltDef::new(name("T")).on_success(ActionDef::named("single"))),
        )
        .rule(RuleDef::new("T").alt(lit("a")));
    let grammar = Grammar::try_from(def).unwrap();
    let engine = Engine::new(&grammar).unwrap();

    let phrase = engine.run("a+a").unwrap().unwrap();

    insta::assert_snapshot!(phrase.pretty(), @r#"
    E 0..3 {E_0}
      E 0..1 {single}
        T 0..1
          "a" 0..1
      "+" 1..2
      T 2..3
        "a" 2..3
    "#);
}

#[test]
fn start_rule_can_be_chosen() {
    insta::assert_snapshot!(run_with(sum(), "a", |e| e.with_start("T")), @r#"(T "a")"#);
    insta::assert_snapshot!(run_with(sum(), "a", |e| e.with_start("X")), @"RUNTIME ERROR: no rule named `X`");
}

#[test]
fn exec_fuel_exhaustion() {
    let result = run_with(sum(), "a+a+a", |e| e.with_exec_fuel(5));

    insta::assert_snapshot!(result, @"RUNTIME ERROR: runtime execution limit exceeded");
}

#[test]
fn recursion_fuel_exhaustion() {
    let def = GrammarDef::new().rule(RuleDef::new("S").alt(seq([lit("a"), name("S")])).alt(lit("b")));

    insta::assert_snapshot!(run_with(def.clone(), "ab", |e| e.with_recursion_fuel(3)), @r#"(S "a" (S "b"))"#);
    insta::assert_snapshot!(run_with(def, "aaaab", |e| e.with_recursion_fuel(3)), @"RUNTIME ERROR: runtime recursion limit exceeded");
}

#[test]
fn long_left_recursive_list_uses_no_recursion_fuel() {
    let input = vec!["a"; 1000].join("+");
    let grammar = Grammar::try_from(sum()).unwrap();
    let engine = Engine::new(&grammar).unwrap().with_recursion_fuel(3);

    let phrase = engine.run(&input).unwrap().unwrap();

    assert_eq!(phrase.end, input.len());
    assert!(phrase.to_string().starts_with("(E (E (E (E "));
    assert_eq!(phrase.pretty().lines().count(), 1000 * 3 + 999);
}

#[test]
fn long_left_recursive_list_with_defaults() {
    let input = vec!["a"; 1000].join("+");
    let grammar = Grammar::try_from(sum()).unwrap();
    let engine = Engine::new(&grammar).unwrap();

    let phrase = engine.run(&input).unwrap().unwrap();

    assert_eq!(phrase.end, input.len());
    assert_eq!(phrase.children.len(), 3);
}

#[test]
fn deep_right_recursion_with_defaults() {
    // R = "a" "+" R / "a" ;
    let def = GrammarDef::new().rule(RuleDef::new("R").alt(seq([lit("a"), lit("+"), name("R")])).alt(lit("a")));
    let grammar = Grammar::try_from(def).unwrap();
    let engine = Engine::new(&grammar).unwrap();

    let input = vec!["a"; 1000].join("+");
    let phrase = engine.run(&input).unwrap().unwrap();
    assert_eq!(phrase.end, input.len());

    let input = vec!["a"; 5000].join("+");
    assert!(matches!(engine.run(&input), Err(RuntimeError::RecursionLimitExceeded)));
}

#[test]
fn deep_nesting_hits_recursion_limit_not_the_stack() {
    let input = format!("{}a{}", "(".repeat(1000), ")".repeat(1000));
    let grammar = Grammar::try_from(arith()).unwrap();

    let engine = Engine::new(&grammar).unwrap();
    assert!(matches!(engine.run(&input), Err(RuntimeError::RecursionLimitExceeded)));

    let engine = Engine::new(&grammar).unwrap().with_recursion_fuel(10_000);
    let phrase = engine.run(&input).unwrap().unwrap();
    assert_eq!(phrase.end, input.len());
}

#[test]
fn invalid_grammar_is_refused() {
    // A = A ;
    let def = GrammarDef::new().rule(RuleDef::new("A").alt(name("A")));

    insta::assert_snapshot!(run(def, "x"), @"GENERATION ERROR: parser generation refused: grammar has 3 errors");
}

#[test]
fn runtime_error_converts_to_pipeline_error() {
    let err: crate::Error = RuntimeError::RecursionLimitExceeded.into();

    assert!(matches!(err, crate::Error::RecursionLimitExceeded));
}

#[test]
fn trace_shows_calls() {
    let grammar = Grammar::try_from(sum()).unwrap();
    let engine = Engine::new(&grammar).unwrap();
    let mut tracer = PrintTracer::new(grammar.graph(), "a", Verbosity::Default, Colors::OFF);

    engine.run_traced("a", &mut tracer).unwrap();

    insta::assert_snapshot!(tracer.lines().join("\n"), @r"
    → E @0
      → T @0
      ✓ T 0..1
    ✓ E 0..1
    ");
}

#[test]
fn verbose_trace_shows_ascent() {
    // A = A "x" / "y" ;
    let def = GrammarDef::new().rule(RuleDef::new("A").alt(seq([name("A"), lit("x")])).alt(lit("y")));
    let grammar = Grammar::try_from(def).unwrap();
    let engine = Engine::new(&grammar).unwrap();
    let mut tracer = PrintTracer::new(grammar.graph(), "yx", Verbosity::Verbose, Colors::OFF);

    engine.run_traced("yx", &mut tracer).unwrap();

    let expected = indoc! {r#"
        → A @0
          seed "y" @0
          ↑ "y" → A ..1
          ↑ A → A "x" ..2
          ↑ A "x" → A ..2
          ■ A ..2
        ✓ A 0..2"#};
    assert_eq!(tracer.lines().join("\n"), expected);
}

#[test]
fn very_verbose_trace_shows_text() {
    let grammar = Grammar::try_from(sum()).unwrap();
    let engine = Engine::new(&grammar).unwrap();
    let mut tracer = PrintTracer::new(grammar.graph(), "a+a", Verbosity::VeryVerbose, Colors::OFF);

    engine.run_traced("a+a", &mut tracer).unwrap();

    assert_eq!(tracer.lines().last().unwrap(), r#"✓ E 0..3 "a+a""#);
}
