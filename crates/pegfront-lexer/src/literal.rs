//! String literals, character classes and their escape sequences

use pegfront_ast::ClassPart;

use crate::chars::{is_decimal_digit, is_hex_digit, is_line_terminator};
use crate::trivia::line_terminator_sequence;
use crate::{char_at, literal_at, LexError, Lexeme};

/// Decode `count` hex digits starting at `pos`
fn hex_digits(source: &str, pos: usize, count: usize) -> Option<(u32, usize)> {
    let digits = source.get(pos..pos + count)?;
    if !digits.chars().all(is_hex_digit) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some((value, pos + count))
}

/// `xHH`, with `pos` at the `x`
fn hex_escape(source: &str, pos: usize) -> Option<(char, usize)> {
    let (value, end) = hex_digits(source, literal_at(source, pos, "x")?, 2)?;
    Some((char::from_u32(value)?, end))
}

/// `uHHHH`, with `pos` at the `u`. Lone surrogates do not decode.
pub(crate) fn unicode_escape(source: &str, pos: usize) -> Option<(char, usize)> {
    let (value, end) = hex_digits(source, literal_at(source, pos, "u")?, 4)?;
    Some((char::from_u32(value)?, end))
}

fn single_escape(c: char) -> Option<char> {
    match c {
        '\'' | '"' | '\\' => Some(c),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{b}'),
        _ => None,
    }
}

/// Characters with a meaning after a backslash
fn is_escape_character(c: char) -> bool {
    single_escape(c).is_some() || is_decimal_digit(c) || c == 'x' || c == 'u'
}

/// The part of an escape after the backslash, with `pos` just past it.
///
/// Any character that is not itself an escape character, digit or line
/// terminator stands for itself.
pub fn escape_sequence(source: &str, pos: usize) -> Option<(char, usize)> {
    let c = char_at(source, pos)?;
    if let Some(decoded) = single_escape(c) {
        return Some((decoded, pos + 1));
    }
    if !is_escape_character(c) && !is_line_terminator(c) {
        return Some((c, pos + c.len_utf8()));
    }
    match c {
        '0' if !char_at(source, pos + 1).is_some_and(is_decimal_digit) => Some(('\0', pos + 1)),
        'x' => hex_escape(source, pos),
        'u' => unicode_escape(source, pos),
        _ => None,
    }
}

/// A backslash followed by a line terminator; contributes nothing
pub fn line_continuation(source: &str, pos: usize) -> Option<usize> {
    line_terminator_sequence(source, literal_at(source, pos, "\\")?)
}

/// A single- or double-quoted string, decoded
pub fn string_literal(source: &str, pos: usize) -> Option<Lexeme<String>> {
    let quote = char_at(source, pos).filter(|&c| c == '"' || c == '\'')?;
    let mut p = pos + 1;
    let mut value = String::new();
    loop {
        let c = char_at(source, p)?;
        if c == quote {
            return Some(Lexeme::new(value, pos, p + 1));
        }
        if c == '\\' {
            if let Some((decoded, next)) = escape_sequence(source, p + 1) {
                value.push(decoded);
                p = next;
            } else {
                p = line_continuation(source, p)?;
            }
            continue;
        }
        if is_line_terminator(c) {
            return None;
        }
        value.push(c);
        p += c.len_utf8();
    }
}

/// Decoded contents of a `[...]` class, without its `i` flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBody {
    pub parts: Vec<ClassPart>,
    pub inverted: bool,
}

/// One class character; `Some(None)` is a line continuation
fn class_character(source: &str, pos: usize) -> Option<(Option<char>, usize)> {
    match char_at(source, pos)? {
        ']' => None,
        '\\' => match escape_sequence(source, pos + 1) {
            Some((decoded, next)) => Some((Some(decoded), next)),
            None => line_continuation(source, pos).map(|next| (None, next)),
        },
        c if is_line_terminator(c) => None,
        c => Some((Some(c), pos + c.len_utf8())),
    }
}

fn class_range(source: &str, pos: usize) -> Result<Option<Lexeme<ClassPart>>, LexError> {
    let Some((Some(start), dash)) = class_character(source, pos) else {
        return Ok(None);
    };
    let Some(after) = literal_at(source, dash, "-") else {
        return Ok(None);
    };
    let Some((Some(end), next)) = class_character(source, after) else {
        return Ok(None);
    };
    if start > end {
        return Err(LexError::InvalidRange {
            text: source[pos..next].to_string(),
            start: pos,
            end: next,
        });
    }
    Ok(Some(Lexeme::new(ClassPart::Range(start, end), pos, next)))
}

/// `[` `^`? parts `]`.
///
/// An inverted range is reported as soon as it is seen, even if the class
/// would not have been closed.
pub fn class_body(source: &str, pos: usize) -> Result<Option<Lexeme<ClassBody>>, LexError> {
    let Some(mut p) = literal_at(source, pos, "[") else {
        return Ok(None);
    };
    let inverted = match literal_at(source, p, "^") {
        Some(next) => {
            p = next;
            true
        }
        None => false,
    };

    let mut parts = Vec::new();
    loop {
        if let Some(range) = class_range(source, p)? {
            parts.push(range.value);
            p = range.end;
            continue;
        }
        match class_character(source, p) {
            Some((Some(c), next)) => {
                parts.push(ClassPart::Char(c));
                p = next;
            }
            Some((None, next)) => p = next,
            None => break,
        }
    }

    Ok(literal_at(source, p, "]").map(|end| Lexeme::new(ClassBody { parts, inverted }, pos, end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(source: &str) -> Option<String> {
        string_literal(source, 0).map(|lexeme| lexeme.value)
    }

    #[test]
    fn test_simple_escapes() {
        assert_eq!(decode(r"'\n'").as_deref(), Some("\n"));
        assert_eq!(decode(r#""\"\'\\\b\f\r\t\v""#).as_deref(), Some("\"'\\\u{8}\u{c}\r\t\u{b}"));
        assert_eq!(decode(r"'\0'").as_deref(), Some("\0"));
    }

    #[test]
    fn test_hex_and_unicode_escapes() {
        assert_eq!(decode(r"'\xFF'").as_deref(), Some("\u{ff}"));
        assert_eq!(decode(r"'\uFFFF'").as_deref(), Some("\u{ffff}"));
        assert_eq!(decode(r"'\xG0'"), None);
        assert_eq!(decode(r"'\uD800'"), None);
    }

    #[test]
    fn test_non_escape_character_stands_for_itself() {
        assert_eq!(decode(r"'\a\%'").as_deref(), Some("a%"));
    }

    #[test]
    fn test_digit_escapes_fail() {
        assert_eq!(decode(r"'\1'"), None);
        assert_eq!(decode(r"'\01'"), None);
    }

    #[test]
    fn test_line_continuation_decodes_to_nothing() {
        assert_eq!(decode("'a\\\r\nb'").as_deref(), Some("ab"));
        assert_eq!(decode("'\\\n'").as_deref(), Some(""));
    }

    #[test]
    fn test_raw_line_terminator_fails() {
        assert_eq!(decode("'a\nb'"), None);
        assert_eq!(decode("\"a\u{2028}b\""), None);
        assert_eq!(decode("'open"), None);
    }

    #[test]
    fn test_lexeme_covers_quotes() {
        let lexeme = string_literal("x 'abcd' y", 2).unwrap();
        assert_eq!((lexeme.start, lexeme.end), (2, 8));
    }

    #[test]
    fn test_class_parts() {
        let body = class_body("[^a-z_\\]]", 0).unwrap().unwrap();
        assert!(body.value.inverted);
        assert_eq!(
            body.value.parts,
            vec![ClassPart::Range('a', 'z'), ClassPart::Char('_'), ClassPart::Char(']')]
        );
        assert_eq!(body.end, 9);
    }

    #[test]
    fn test_class_dash_edges_are_plain_characters() {
        let body = class_body("[a-]", 0).unwrap().unwrap();
        assert_eq!(body.value.parts, vec![ClassPart::Char('a'), ClassPart::Char('-')]);
        let body = class_body("[-a]", 0).unwrap().unwrap();
        assert_eq!(body.value.parts, vec![ClassPart::Char('-'), ClassPart::Char('a')]);
    }

    #[test]
    fn test_class_line_continuation_is_dropped() {
        let body = class_body("[a\\\nb]", 0).unwrap().unwrap();
        assert_eq!(body.value.parts, vec![ClassPart::Char('a'), ClassPart::Char('b')]);
    }

    #[test]
    fn test_inverted_range_is_reported_with_source_text() {
        let err = class_body(r"[x\x62-a]", 0).unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidRange {
                text: r"\x62-a".to_string(),
                start: 2,
                end: 8,
            }
        );
        assert_eq!(err.to_string(), r"Invalid character range: \x62-a.");
    }

    #[test]
    fn test_equal_range_endpoints_are_valid() {
        let body = class_body("[a-a]", 0).unwrap().unwrap();
        assert_eq!(body.value.parts, vec![ClassPart::Range('a', 'a')]);
    }

    #[test]
    fn test_unterminated_class() {
        assert_eq!(class_body("[abc", 0), Ok(None));
        assert_eq!(class_body("[a\nb]", 0), Ok(None));
    }
}
