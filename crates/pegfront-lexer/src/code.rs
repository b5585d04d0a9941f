//! Brace-delimited code blocks

use crate::{char_at, Lexeme};

/// End of the balanced code starting at `pos`: stops before the first `}`
/// that closes nothing. Returns `None` if a `{` is never closed.
fn balanced_code(source: &str, pos: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut p = pos;
    while let Some(c) = char_at(source, p) {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => return Some(p),
            '}' => depth -= 1,
            _ => {}
        }
        p += c.len_utf8();
    }
    None
}

/// `{ code }`. The lexeme holds the raw code verbatim, and its range covers
/// only the code between the braces.
pub fn code_block(source: &str, pos: usize) -> Option<Lexeme<String>> {
    if char_at(source, pos)? != '{' {
        return None;
    }
    let start = pos + 1;
    let end = balanced_code(source, start)?;
    Some(Lexeme::new(source[start..end].to_string(), start, end))
}
