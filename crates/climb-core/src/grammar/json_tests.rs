use super::dsl::*;
use super::*;

#[test]
fn parse_minimal_grammar() {
    let json = r#"{
        "rules": [
            { "name": "Start", "alternatives": [ { "type": "STRING", "value": "x" } ] }
        ]
    }"#;

    let grammar = GrammarDef::from_json(json).unwrap();
    assert_eq!(grammar.rules.len(), 1);
    assert_eq!(grammar.rules[0].name, "Start");
    assert_eq!(grammar.rules[0].alternatives[0].expr, lit("x"));
}

#[test]
fn parse_left_recursive_sum() {
    let json = r#"{
        "rules": [
            { "name": "E", "alternatives": [
                { "type": "SEQ", "members": [
                    { "type": "REF", "name": "E" },
                    { "type": "STRING", "value": "+" },
                    { "type": "REF", "name": "T" }
                ] },
                { "type": "REF", "name": "T" }
            ] },
            { "name": "T", "alternatives": [ { "type": "RANGE", "from": "0", "to": "9" } ] }
        ]
    }"#;

    let grammar = GrammarDef::from_json(json).unwrap();
    let expected = GrammarDef::new()
        .rule(
            RuleDef::new("E")
                .alt(seq([name("E"), lit("+"), name("T")]))
                .alt(name("T")),
        )
        .rule(RuleDef::new("T").alt(range('0', '9')));
    assert_eq!(grammar, expected);
}

#[test]
fn parse_alternative_with_actions() {
    let json = r#"{
        "rules": [
            { "name": "R", "diag_name": "thing", "alternatives": [
                { "expr": { "type": "ANY" },
                  "on_success": { "name": "ok", "boolean": true },
                  "on_failure": {} }
            ] }
        ]
    }"#;

    let grammar = GrammarDef::from_json(json).unwrap();
    let rule = &grammar.rules[0];
    assert_eq!(rule.diag_name.as_deref(), Some("thing"));
    let alt = &rule.alternatives[0];
    assert_eq!(alt.expr, any());
    assert_eq!(alt.on_success, Some(ActionDef::named("ok").boolean()));
    assert_eq!(alt.on_failure, Some(ActionDef::unnamed()));
}

#[test]
fn parse_all_operators() {
    let json = r#"{
        "rules": [
            { "name": "R", "alternatives": [
                { "type": "CHOICE", "members": [
                    { "type": "AND", "content": { "type": "ANY" } },
                    { "type": "NOT", "content": { "type": "END" } },
                    { "type": "PLUS", "content": { "type": "CLASS", "chars": "ab" } },
                    { "type": "STAR", "content": { "type": "CLASS", "chars": "ab", "negated": true } },
                    { "type": "OPTIONAL", "content": { "type": "ANY" } },
                    { "type": "PLUS_UNTIL", "content": { "type": "ANY" }, "until": { "type": "STRING", "value": ";" } },
                    { "type": "STAR_UNTIL", "content": { "type": "ANY" }, "until": { "type": "STRING", "value": ";" } },
                    { "type": "IS", "content": { "type": "REF", "name": "R" }, "pattern": { "type": "ANY" } },
                    { "type": "IS_NOT", "content": { "type": "REF", "name": "R" }, "pattern": { "type": "ANY" } }
                ] }
            ] }
        ]
    }"#;

    let grammar = GrammarDef::from_json(json).unwrap();
    let expected = choice([
        any().and(),
        end().not(),
        class("ab").plus(),
        not_class("ab").star(),
        any().opt(),
        any().plus_until(lit(";")),
        any().star_until(lit(";")),
        name("R").is(any()),
        name("R").is_not(any()),
    ]);
    assert_eq!(grammar.rules[0].alternatives[0].expr, expected);
}

#[test]
fn empty_rule_list_is_rejected() {
    let err = GrammarDef::from_json(r#"{ "rules": [] }"#).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"grammar has no rules");
}

#[test]
fn unknown_expression_type_is_rejected() {
    let json = r#"{ "rules": [ { "name": "R", "alternatives": [ { "type": "REGEX" } ] } ] }"#;
    let err = GrammarDef::from_json(json).unwrap_err();
    assert!(matches!(err, GrammarError::Json(_)));
}
