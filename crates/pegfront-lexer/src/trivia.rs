//! Whitespace, line terminators and comments
//!
//! Two skipping modes exist. [`skip`] crosses line boundaries and is used
//! between tokens. [`skip_inline`] never does: it is used between the end of
//! a rule and the line terminator that ends it, so a multi-line comment there
//! must open and close on the same line.

use crate::chars::{is_line_terminator, is_whitespace};
use crate::{char_at, literal_at};

/// One inline space character
pub fn whitespace(source: &str, pos: usize) -> Option<usize> {
    char_at(source, pos)
        .filter(|&c| is_whitespace(c))
        .map(|c| pos + c.len_utf8())
}

/// LF, CRLF, CR, LS or PS; CRLF counts as one
pub fn line_terminator_sequence(source: &str, pos: usize) -> Option<usize> {
    match char_at(source, pos)? {
        '\r' => Some(literal_at(source, pos, "\r\n").unwrap_or(pos + 1)),
        c if is_line_terminator(c) => Some(pos + c.len_utf8()),
        _ => None,
    }
}

/// `/* ... */`, not nesting; unterminated comments do not match
pub fn multi_line_comment(source: &str, pos: usize) -> Option<usize> {
    let body = literal_at(source, pos, "/*")?;
    source[body..].find("*/").map(|close| body + close + 2)
}

/// `/* ... */` with no line terminator inside
pub fn multi_line_comment_no_line_terminator(source: &str, pos: usize) -> Option<usize> {
    let body = literal_at(source, pos, "/*")?;
    let mut p = body;
    loop {
        if let Some(end) = literal_at(source, p, "*/") {
            return Some(end);
        }
        match char_at(source, p) {
            Some(c) if !is_line_terminator(c) => p += c.len_utf8(),
            _ => return None,
        }
    }
}

/// `//` up to, not including, the next line terminator or the end of input
pub fn single_line_comment(source: &str, pos: usize) -> Option<usize> {
    let body = literal_at(source, pos, "//")?;
    let len = source[body..]
        .find(is_line_terminator)
        .unwrap_or(source.len() - body);
    Some(body + len)
}

pub fn comment(source: &str, pos: usize) -> Option<usize> {
    multi_line_comment(source, pos).or_else(|| single_line_comment(source, pos))
}

/// Skip whitespace, line terminators and comments
pub fn skip(source: &str, mut pos: usize) -> usize {
    while let Some(next) = whitespace(source, pos)
        .or_else(|| line_terminator_sequence(source, pos))
        .or_else(|| comment(source, pos))
    {
        pos = next;
    }
    pos
}

/// Skip whitespace and single-line `/* */` comments without leaving the line
pub fn skip_inline(source: &str, mut pos: usize) -> usize {
    while let Some(next) = whitespace(source, pos)
        .or_else(|| multi_line_comment_no_line_terminator(source, pos))
    {
        pos = next;
    }
    pos
}
