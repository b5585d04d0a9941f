//! Pegfront - the parsing front end of a PEG parser generator
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use pegfront_ast as ast;
pub use pegfront_lexer as lexer;
pub use pegfront_parser as parser;

pub use pegfront_parser::{parse, parse_with_options, ParseError, ParseOptions};
