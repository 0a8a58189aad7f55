//! Small text helpers shared by rendering code.

/// Uppercases the first character.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapses whitespace runs to one space, drops spaces before `, ; . : ?`
/// and `!`, and trims both ends.
#[must_use]
pub fn tidy_spacing(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space && !matches!(c, ',' | ';' | '.' | ':' | '?' | '!') {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}
