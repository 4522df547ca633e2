/// Make text printable on one line.
///
/// Newline, carriage return and tab become `\n`, `\r`, `\t`; any other
/// control character becomes a `\uXXXX` escape. Everything else is kept.
///
/// # Examples
/// ```
/// use climb_core::utils::to_print;
/// assert_eq!(to_print("a\nb"), "a\\nb");
/// assert_eq!(to_print("plain"), "plain");
/// ```
pub fn to_print(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        push_escaped(&mut out, c);
    }
    out
}

/// Render text as a double-quoted literal, escaping `"` and `\` as well.
pub fn to_string_lit(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => push_escaped(&mut out, c),
        }
    }
    out.push('"');
    out
}

/// Shorten text to at most `max` characters, marking the cut with `…`.
pub fn truncate_text(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
        c => out.push(c),
    }
}
