//! Canonical text printer for grammar ASTs
//!
//! Serializes an AST back to grammar text. Parentheses are only emitted where
//! operator precedence requires them, literals always use double quotes, and
//! rules are separated by a blank line.

use crate::chars::{is_identifier_part, is_identifier_start};
use crate::{ClassPart, Expr, ExprKind, Grammar, Initializer, Rule, TopLevelInitializer};

/// Trait for converting AST nodes to canonical grammar text.
pub trait ToPeg {
    fn to_peg(&self) -> String;
}

/// Binding strength of each expression shape, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Choice,
    Action,
    Sequence,
    Labeled,
    Prefixed,
    Suffixed,
    Primary,
}

fn prec(expr: &Expr) -> Prec {
    match &expr.kind {
        ExprKind::Named { expression, .. } => prec(expression),
        ExprKind::Choice { .. } => Prec::Choice,
        ExprKind::Action { .. } => Prec::Action,
        ExprKind::Sequence { elements } if elements.len() == 1 => prec(&elements[0]),
        ExprKind::Sequence { .. } => Prec::Sequence,
        ExprKind::Labeled { .. } => Prec::Labeled,
        ExprKind::Text { .. } | ExprKind::SimpleAnd { .. } | ExprKind::SimpleNot { .. } => {
            Prec::Prefixed
        }
        ExprKind::Optional { .. } | ExprKind::ZeroOrMore { .. } | ExprKind::OneOrMore { .. } => {
            Prec::Suffixed
        }
        _ => Prec::Primary,
    }
}

/// Escape shared by string literals and class characters
fn escape_char(c: char, out: &mut String) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\u{8}' => out.push_str("\\b"),
        '\u{c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{b}' => out.push_str("\\v"),
        '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04X}", c as u32)),
        c if (c as u32) < 0x20 || c == '\u{7f}' => out.push_str(&format!("\\x{:02X}", c as u32)),
        c => out.push(c),
    }
}

/// Quote and escape a string for output
pub fn quote_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        if c == '"' {
            result.push_str("\\\"");
        } else {
            escape_char(c, &mut result);
        }
    }
    result.push('"');
    result
}

/// Write a rule name or label so that it reads back as the same name.
///
/// Names can hold any character through `\uXXXX` escapes, so characters
/// that would not lex at their position are escaped again.
fn identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        let lexes = if i == 0 {
            is_identifier_start(c)
        } else {
            is_identifier_part(c)
        };
        // four hex digits cannot spell an astral character
        if lexes || (c as u32) > 0xffff {
            out.push(c);
        } else {
            out.push_str(&format!("\\u{:04X}", c as u32));
        }
    }
    out
}

fn class_char(c: char, out: &mut String) {
    match c {
        ']' | '^' | '-' => {
            out.push('\\');
            out.push(c);
        }
        c => escape_char(c, out),
    }
}

// ===== Grammar =====

impl ToPeg for Grammar {
    fn to_peg(&self) -> String {
        let mut blocks = Vec::new();
        if let Some(init) = &self.top_level_initializer {
            blocks.push(init.to_peg());
        }
        if let Some(init) = &self.initializer {
            blocks.push(init.to_peg());
        }
        blocks.extend(self.rules.iter().map(ToPeg::to_peg));
        let mut text = blocks.join("\n\n");
        text.push('\n');
        text
    }
}

impl ToPeg for TopLevelInitializer {
    fn to_peg(&self) -> String {
        format!("{{{{{}}}}}", self.code)
    }
}

impl ToPeg for Initializer {
    fn to_peg(&self) -> String {
        format!("{{{}}}", self.code)
    }
}

impl ToPeg for Rule {
    fn to_peg(&self) -> String {
        match &self.expression.kind {
            ExprKind::Named {
                name,
                verbose,
                expression,
            } => format!(
                "{} {}{} = {}",
                identifier(&self.name),
                quote_string(name),
                if *verbose { "~" } else { "" },
                expression.to_peg()
            ),
            _ => format!("{} = {}", identifier(&self.name), self.expression.to_peg()),
        }
    }
}

// ===== Expressions =====

impl ToPeg for Expr {
    fn to_peg(&self) -> String {
        match &self.kind {
            ExprKind::Named { expression, .. } => expression.to_peg(),
            ExprKind::Choice { alternatives } => alternatives
                .iter()
                .map(|alt| at_least(alt, Prec::Action))
                .collect::<Vec<_>>()
                .join(" / "),
            ExprKind::Action {
                expression, code, ..
            } => {
                let body = at_least(expression, Prec::Sequence);
                if body.is_empty() {
                    format!("{{{}}}", code)
                } else {
                    format!("{} {{{}}}", body, code)
                }
            }
            ExprKind::Sequence { elements } => elements
                .iter()
                .map(|element| at_least(element, Prec::Labeled))
                .collect::<Vec<_>>()
                .join(" "),
            ExprKind::Labeled {
                label,
                pick,
                expression,
                ..
            } => {
                let mut out = String::new();
                if *pick {
                    out.push('@');
                }
                if let Some(label) = label {
                    out.push_str(&identifier(label));
                    out.push(':');
                }
                out.push_str(&at_least(expression, Prec::Prefixed));
                out
            }
            ExprKind::Text { expression } => format!("${}", at_least(expression, Prec::Suffixed)),
            ExprKind::SimpleAnd { expression } => {
                format!("&{}", at_least(expression, Prec::Suffixed))
            }
            ExprKind::SimpleNot { expression } => {
                format!("!{}", at_least(expression, Prec::Suffixed))
            }
            ExprKind::Optional { expression } => {
                format!("{}?", at_least(expression, Prec::Primary))
            }
            ExprKind::ZeroOrMore { expression } => {
                format!("{}*", at_least(expression, Prec::Primary))
            }
            ExprKind::OneOrMore { expression } => {
                format!("{}+", at_least(expression, Prec::Primary))
            }
            ExprKind::Group { expression } => format!("({})", expression.to_peg()),
            ExprKind::SemanticAnd { code, .. } => format!("&{{{}}}", code),
            ExprKind::SemanticNot { code, .. } => format!("!{{{}}}", code),
            ExprKind::RuleRef { name } => identifier(name),
            ExprKind::Literal { value, ignore_case } => {
                let mut out = quote_string(value);
                if *ignore_case {
                    out.push('i');
                }
                out
            }
            ExprKind::Class {
                parts,
                inverted,
                ignore_case,
            } => {
                let mut out = String::from("[");
                if *inverted {
                    out.push('^');
                }
                for part in parts {
                    match *part {
                        ClassPart::Char(c) => class_char(c, &mut out),
                        ClassPart::Range(start, end) => {
                            class_char(start, &mut out);
                            out.push('-');
                            class_char(end, &mut out);
                        }
                    }
                }
                out.push(']');
                if *ignore_case {
                    out.push('i');
                }
                out
            }
            ExprKind::Any => ".".to_string(),
        }
    }
}

/// Print `expr`, parenthesized if it binds looser than `min`
fn at_least(expr: &Expr, min: Prec) -> String {
    if prec(expr) < min {
        format!("({})", expr.to_peg())
    } else {
        expr.to_peg()
    }
}
