use climb_core::grammar::dsl::*;
use climb_core::grammar::{GrammarDef, RuleDef};
use climb_lib::Grammar;
use climb_lib::engine::Engine;

use super::exec::unconsumed_note;

#[test]
fn partial_match_gets_a_note() {
    // A = A "x" / "y" ;
    let g = Grammar::try_from(
        GrammarDef::new().rule(RuleDef::new("A").alt(seq([name("A"), lit("x")])).alt(lit("y"))),
    )
    .unwrap();
    let engine = Engine::new(&g).unwrap();

    let full = engine.run("yxx").unwrap().unwrap();
    let partial = engine.run("yxz").unwrap().unwrap();

    assert_eq!(unconsumed_note(&full, "yxx"), None);
    insta::assert_snapshot!(
        unconsumed_note(&partial, "yxz").unwrap(),
        @"matched 2 of 3 bytes; input not consumed from offset 2"
    );
}
