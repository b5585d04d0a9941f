//! Identifiers

use crate::chars::{is_identifier_part, is_identifier_start};
use crate::{char_at, literal::unicode_escape, Lexeme};

/// `\uXXXX` inside an identifier
fn escaped(source: &str, pos: usize) -> Option<(char, usize)> {
    match char_at(source, pos)? {
        '\\' => unicode_escape(source, pos + 1),
        _ => None,
    }
}

fn identifier_start(source: &str, pos: usize) -> Option<(char, usize)> {
    match char_at(source, pos)? {
        c if is_identifier_start(c) => Some((c, pos + c.len_utf8())),
        _ => escaped(source, pos),
    }
}

fn identifier_part(source: &str, pos: usize) -> Option<(char, usize)> {
    match char_at(source, pos)? {
        c if is_identifier_part(c) => Some((c, pos + c.len_utf8())),
        _ => escaped(source, pos),
    }
}

/// An identifier with its `\uXXXX` escapes decoded
pub fn identifier_name(source: &str, pos: usize) -> Option<Lexeme<String>> {
    let (head, mut end) = identifier_start(source, pos)?;
    let mut name = String::from(head);
    while let Some((c, next)) = identifier_part(source, end) {
        name.push(c);
        end = next;
    }
    Some(Lexeme::new(name, pos, end))
}
