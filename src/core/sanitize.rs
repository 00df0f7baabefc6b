// src/core/sanitize.rs

pub const NBSP: char = '\u{a0}';

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Transcript block text: drop one leading ':', NBSP → space, collapse, trim.
pub fn normalize_text(s: &str) -> String {
    let s = s.strip_prefix(':').unwrap_or(s);
    normalize_ws(&s.replace(NBSP, " "))
}

/// Empty `<p>` blocks render as a lone NBSP.
pub fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == NBSP || c.is_whitespace())
}

/// File-name-safe steno name: spaces and commas become underscores.
pub fn steno_name(display: &str) -> String {
    normalize_ws(&display.replace(NBSP, " "))
        .chars()
        .map(|c| if c == ' ' || c == ',' { '_' } else { c })
        .collect()
}

/// Inverse of [`steno_name`] for matching against page headings.
pub fn steno_name_words(steno: &str) -> String {
    normalize_ws(&steno.replace('_', " "))
}

pub fn tokens(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}
