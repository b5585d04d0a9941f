//! Expression AST nodes

use serde::{Deserialize, Serialize};

use crate::Span;

/// A parsing expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    pub location: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, location: Span) -> Self {
        Self { kind, location }
    }

    /// The `pick` flag when this is a labeled element
    pub fn is_pick(&self) -> bool {
        matches!(self.kind, ExprKind::Labeled { pick: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExprKind {
    /// Human-readable name given to a rule: `rule "name" = ...`
    Named {
        name: String,
        /// Set by a `~` after the display name
        verbose: bool,
        expression: Box<Expr>,
    },

    /// Ordered choice: `a / b / c`
    Choice { alternatives: Vec<Expr> },

    /// Expression followed by a code block: `a b { code }`
    Action {
        expression: Box<Expr>,
        code: String,
        code_location: Span,
    },

    /// Sequence: `a b c`, or a lone pick element `@a`
    Sequence { elements: Vec<Expr> },

    /// `label:expr`, `@expr` or `@label:expr`
    Labeled {
        /// `None` only for an anonymous pick
        label: Option<String>,
        label_location: Span,
        pick: bool,
        expression: Box<Expr>,
    },

    /// `$expr`
    Text { expression: Box<Expr> },

    /// `&expr`
    SimpleAnd { expression: Box<Expr> },

    /// `!expr`
    SimpleNot { expression: Box<Expr> },

    /// `expr?`
    Optional { expression: Box<Expr> },

    /// `expr*`
    ZeroOrMore { expression: Box<Expr> },

    /// `expr+`
    OneOrMore { expression: Box<Expr> },

    /// Parenthesized labeled or sequence expression, isolating label scope
    Group { expression: Box<Expr> },

    /// `&{ code }`
    SemanticAnd { code: String, code_location: Span },

    /// `!{ code }`
    SemanticNot { code: String, code_location: Span },

    /// Reference to another rule, resolved by later stages
    RuleRef { name: String },

    /// `"text"` or `'text'i`, with escapes already decoded
    Literal { value: String, ignore_case: bool },

    /// `[a-z_]`, `[^0-9]i`
    Class {
        parts: Vec<ClassPart>,
        inverted: bool,
        ignore_case: bool,
    },

    /// `.`
    Any,
}

impl ExprKind {
    /// The snake_case tag used when the node is serialized
    pub fn type_name(&self) -> &'static str {
        match self {
            ExprKind::Named { .. } => "named",
            ExprKind::Choice { .. } => "choice",
            ExprKind::Action { .. } => "action",
            ExprKind::Sequence { .. } => "sequence",
            ExprKind::Labeled { .. } => "labeled",
            ExprKind::Text { .. } => "text",
            ExprKind::SimpleAnd { .. } => "simple_and",
            ExprKind::SimpleNot { .. } => "simple_not",
            ExprKind::Optional { .. } => "optional",
            ExprKind::ZeroOrMore { .. } => "zero_or_more",
            ExprKind::OneOrMore { .. } => "one_or_more",
            ExprKind::Group { .. } => "group",
            ExprKind::SemanticAnd { .. } => "semantic_and",
            ExprKind::SemanticNot { .. } => "semantic_not",
            ExprKind::RuleRef { .. } => "rule_ref",
            ExprKind::Literal { .. } => "literal",
            ExprKind::Class { .. } => "class",
            ExprKind::Any => "any",
        }
    }
}

/// One element of a character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassPart {
    Char(char),
    /// Inclusive range; `start <= end` always holds for parsed classes
    Range(char, char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_serializes_flat_with_type_tag() {
        let expr = Expr::new(
            ExprKind::Literal {
                value: "a".to_string(),
                ignore_case: true,
            },
            Span::default(),
        );
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["type"], "literal");
        assert_eq!(json["value"], "a");
        assert_eq!(json["ignore_case"], true);
        assert_eq!(json["location"]["start"]["line"], 1);
    }

    #[test]
    fn test_class_parts_serialize_untagged() {
        let parts = vec![ClassPart::Char('_'), ClassPart::Range('a', 'z')];
        let json = serde_json::to_string(&parts).unwrap();
        assert_eq!(json, r#"["_",["a","z"]]"#);
    }

    #[test]
    fn test_type_name_matches_serde_tag() {
        let expr = Expr::new(
            ExprKind::ZeroOrMore {
                expression: Box::new(Expr::new(ExprKind::Any, Span::default())),
            },
            Span::default(),
        );
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["type"], expr.kind.type_name());
        assert_eq!(json["expression"]["type"], "any");
    }
}
