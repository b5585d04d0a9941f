//! Pegfront Lexer - Scannerless lexical primitives
//!
//! Grammar text has no fixed token set: code blocks, the two whitespace
//! modes and the `i` flag on literals all depend on where the parser is.
//! So instead of a token stream this crate exposes small recognizers that
//! take a byte offset into the source and either return what they matched
//! together with the offset just past it, or `None` without consuming
//! anything.

mod code;
mod ident;
mod literal;
mod locator;
pub mod trivia;

pub use pegfront_ast::chars;
pub use code::*;
pub use ident::*;
pub use literal::*;
pub use locator::*;

use thiserror::Error;

/// A recognized lexical unit and the byte range it occupied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<T> {
    pub value: T,
    pub start: usize,
    /// Exclusive end
    pub end: usize,
}

impl<T> Lexeme<T> {
    pub fn new(value: T, start: usize, end: usize) -> Self {
        Self { value, start, end }
    }
}

/// Well-formed input with invalid content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Invalid character range: {text}.")]
    InvalidRange {
        /// The range exactly as written, e.g. `b-a` or `\x62-a`
        text: String,
        start: usize,
        end: usize,
    },
}

/// Character at `pos`, if any
pub fn char_at(source: &str, pos: usize) -> Option<char> {
    source.get(pos..).and_then(|rest| rest.chars().next())
}

/// Match a fixed string at `pos`
pub fn literal_at(source: &str, pos: usize, text: &str) -> Option<usize> {
    source
        .get(pos..)
        .filter(|rest| rest.starts_with(text))
        .map(|_| pos + text.len())
}
