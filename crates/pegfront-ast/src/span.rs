//! Source location tracking

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A point in the grammar source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source (UTF-8 bytes, not characters)
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self { offset, line, column }
    }

    /// Position of the first character of a document
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Opaque tag identifying which document a span belongs to.
///
/// The parser never looks inside it; it is copied onto every span so that
/// consumers juggling several grammars can tell them apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTag(Option<Arc<str>>);

impl SourceTag {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(Some(Arc::from(tag.as_ref())))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<&str> for SourceTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for SourceTag {
    fn from(tag: String) -> Self {
        Self(Some(Arc::from(tag)))
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("<input>"))
    }
}

/// A span representing a range in the grammar source
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub source: SourceTag,
    pub start: Position,
    /// Exclusive end
    pub end: Position,
}

impl Span {
    pub fn new(source: SourceTag, start: Position, end: Position) -> Self {
        Self { source, start, end }
    }

    /// Byte range covered by this span
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.offset..self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.source, self.start, self.end)
    }
}
