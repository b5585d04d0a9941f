//! Furthest-failure bookkeeping
//!
//! Every failed match records what it wanted and where. Only the failures at
//! the deepest offset survive, and those become the syntax error reported
//! when the whole parse gives up.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Something the parser would have accepted at the failure position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Expectation {
    /// Exact text, e.g. `"="`
    Literal(String),
    /// A named production, e.g. `identifier`
    Named(String),
    Any,
    End,
}

impl Expectation {
    pub fn literal(text: &str) -> Self {
        Expectation::Literal(text.to_string())
    }

    pub fn named(name: &str) -> Self {
        Expectation::Named(name.to_string())
    }

    pub fn describe(&self) -> String {
        match self {
            Expectation::Literal(text) => format!("\"{}\"", escape_for_message(text)),
            Expectation::Named(name) => name.clone(),
            Expectation::Any => "any character".to_string(),
            Expectation::End => "end of input".to_string(),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn escape_for_message(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\0' => out.push_str("\\0"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Deepest failure seen so far in one parse
#[derive(Debug, Default)]
pub(crate) struct Failures {
    max_pos: usize,
    expected: Vec<Expectation>,
}

impl Failures {
    pub(crate) fn record(&mut self, pos: usize, expectation: Expectation) {
        if pos < self.max_pos {
            return;
        }
        if pos > self.max_pos {
            self.max_pos = pos;
            self.expected.clear();
        }
        self.expected.push(expectation);
    }

    pub(crate) fn max_pos(&self) -> usize {
        self.max_pos
    }

    /// Expectations at the deepest position, deduplicated and sorted by
    /// their description
    pub(crate) fn expected(&self) -> Vec<Expectation> {
        let mut expected = self.expected.clone();
        expected.sort_by_cached_key(Expectation::describe);
        expected.dedup();
        expected
    }
}

/// `Expected a, b, or c but "x" found.`
pub fn build_message(expected: &[Expectation], found: Option<char>) -> String {
    let descriptions: Vec<String> = expected.iter().map(Expectation::describe).collect();
    let expected = match descriptions.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    };
    let found = match found {
        Some(c) => format!("\"{}\"", escape_for_message(&c.to_string())),
        None => "end of input".to_string(),
    };
    format!("Expected {} but {} found.", expected, found)
}
