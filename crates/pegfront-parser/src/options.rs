//! Parse configuration

use pegfront_ast::SourceTag;
use serde::{Deserialize, Serialize};

/// The only production a grammar document can be parsed from
pub const DEFAULT_START_RULE: &str = "Grammar";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Copied onto every span of the result
    pub source: SourceTag,
    /// Must be `Grammar` when set
    pub start_rule: Option<String>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl Into<SourceTag>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_start_rule(mut self, rule: impl Into<String>) -> Self {
        self.start_rule = Some(rule.into());
        self
    }

    pub fn start_rule(&self) -> &str {
        self.start_rule.as_deref().unwrap_or(DEFAULT_START_RULE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::new();
        assert_eq!(options.start_rule(), "Grammar");
        assert_eq!(options.source, SourceTag::none());
    }

    #[test]
    fn test_loads_from_json() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"source": "calc.peggy"}"#).unwrap();
        assert_eq!(options.source.as_str(), Some("calc.peggy"));
        assert_eq!(options.start_rule, None);
    }
}
