//! Pegfront Parser - Recursive descent parser for PEG grammars
//!
//! Parses grammar text into a location-annotated [`Grammar`] AST.
//! Key parsing challenges:
//! - A rule reference and the name that starts the next rule look the same
//!   until the `=` after them is seen
//! - Statement ends may be a newline, so inline whitespace is handled
//!   separately from whitespace that crosses lines
//! - Syntax errors report everything expected at the deepest position
//!   reached, not just the last thing tried

mod error;
mod expected;
mod options;
mod parser;

pub use error::*;
pub use expected::{build_message, Expectation};
pub use options::*;
pub use parser::*;

use pegfront_ast::Grammar;
use tracing::debug;

/// Parse grammar text into a Grammar AST
pub fn parse(source: &str) -> Result<Grammar, ParseError> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse grammar text with an explicit source tag or start rule
pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Grammar, ParseError> {
    let start_rule = options.start_rule();
    if start_rule != DEFAULT_START_RULE {
        return Err(ParseError::UnknownStartRule {
            rule: start_rule.to_string(),
        });
    }

    debug!(source = %options.source, len = source.len(), "parsing grammar");
    let mut parser = Parser::new(source, options);
    let result = parser.parse_grammar();
    match &result {
        Ok(grammar) => debug!(rules = grammar.rules.len(), "parsed grammar"),
        Err(error) => debug!(%error, "grammar failed to parse"),
    }
    result
}
