//! Pegfront AST - Core types for parsed grammars
//!
//! This crate defines the grammar AST node types, the source locations
//! attached to every node, a mutable visitor and a canonical printer.
//! Character classification lives here too, since both the lexer and the
//! printer need to know what may appear in an identifier.

pub mod chars;
mod span;
mod expr;
mod grammar;
mod printer;
pub mod visit;

pub use span::*;
pub use expr::*;
pub use grammar::*;
pub use printer::*;
pub use visit::{strip_expr_locations, strip_locations, VisitMut};
