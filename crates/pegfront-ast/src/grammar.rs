//! Grammar and rule nodes

use serde::{Deserialize, Serialize};

use crate::{Expr, Span};

/// A complete grammar document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "grammar")]
pub struct Grammar {
    /// `{{ ... }}` block, run once per generated module
    pub top_level_initializer: Option<TopLevelInitializer>,
    /// `{ ... }` block, run once per parse
    pub initializer: Option<Initializer>,
    /// Rules in declaration order; never empty for a parsed grammar
    pub rules: Vec<Rule>,
    pub location: Span,
}

impl Grammar {
    /// First rule with the given name
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "top_level_initializer")]
pub struct TopLevelInitializer {
    /// Raw code between the double braces
    pub code: String,
    pub code_location: Span,
    pub location: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "initializer")]
pub struct Initializer {
    /// Raw code between the braces
    pub code: String,
    pub code_location: Span,
    pub location: Span,
}

/// `name "display name" = expression`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "rule")]
pub struct Rule {
    pub name: String,
    pub name_location: Span,
    /// Wrapped in [`crate::ExprKind::Named`] when a display name was given
    pub expression: Expr,
    pub location: Span,
}

impl Rule {
    /// The display name, if the rule declared one
    pub fn display_name(&self) -> Option<&str> {
        match &self.expression.kind {
            crate::ExprKind::Named { name, .. } => Some(name),
            _ => None,
        }
    }
}
