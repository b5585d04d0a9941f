//! Parser error types

use pegfront_ast::Span;
use thiserror::Error;

use crate::Expectation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text does not match the grammar syntax
    #[error("{message}")]
    Syntax {
        message: String,
        expected: Vec<Expectation>,
        /// `None` at end of input
        found: Option<char>,
        location: Span,
    },

    /// A class range whose start comes after its end, e.g. `[z-a]`
    #[error("Invalid character range: {text}.")]
    InvalidCharacterRange {
        /// The range as written, escapes included
        text: String,
        location: Span,
    },

    #[error("Can't start parsing from rule \"{rule}\".")]
    UnknownStartRule { rule: String },
}

impl ParseError {
    pub fn location(&self) -> Option<&Span> {
        match self {
            ParseError::Syntax { location, .. } => Some(location),
            ParseError::InvalidCharacterRange { location, .. } => Some(location),
            ParseError::UnknownStartRule { .. } => None,
        }
    }

    /// What the parser would have accepted; empty for non-syntax errors
    pub fn expected(&self) -> &[Expectation] {
        match self {
            ParseError::Syntax { expected, .. } => expected,
            _ => &[],
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax { .. })
    }
}
