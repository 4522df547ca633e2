use crate::utils::{to_print, to_string_lit, truncate_text};

#[test]
fn print_escapes_whitespace_controls() {
    assert_eq!(to_print("a\nb\rc\td"), "a\\nb\\rc\\td");
}

#[test]
fn print_escapes_other_controls_as_unicode() {
    assert_eq!(to_print("\u{1}"), "\\u0001");
    assert_eq!(to_print("\u{7f}"), "\\u007f");
}

#[test]
fn print_keeps_quotes_and_non_ascii() {
    assert_eq!(to_print("\"é\""), "\"é\"");
}

#[test]
fn string_lit_quotes_and_escapes() {
    assert_eq!(to_string_lit("x"), "\"x\"");
    assert_eq!(to_string_lit("say \"hi\""), "\"say \\\"hi\\\"\"");
    assert_eq!(to_string_lit("a\\b"), "\"a\\\\b\"");
    assert_eq!(to_string_lit("\n"), "\"\\n\"");
}

#[test]
fn truncate_keeps_short_text() {
    assert_eq!(truncate_text("abc", 3), "abc");
    assert_eq!(truncate_text("", 0), "");
}

#[test]
fn truncate_marks_cut() {
    assert_eq!(truncate_text("abcdef", 4), "abc…");
}
