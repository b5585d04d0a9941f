//! Recursive descent parser implementation
//!
//! One method per production. Each either succeeds, leaving `pos` just past
//! what it matched, or fails and leaves `pos` where it found it so the caller
//! can try something else. `Err` is reserved for errors that end the parse on
//! the spot, currently only inverted character ranges.

use pegfront_ast::*;
use pegfront_lexer::chars::is_line_terminator;
use pegfront_lexer::{self as lexer, literal_at, trivia, LexError, Lexeme, Locator};
use tracing::trace;

use crate::expected::{build_message, Failures};
use crate::{Expectation, ParseError, ParseOptions};

/// Outcome of a production that may also stop the whole parse
type PResult<T> = Result<Option<T>, ParseError>;

type Wrap = fn(Box<Expr>) -> ExprKind;

const PREFIX_OPERATORS: [(&str, Wrap); 3] = [
    ("$", |expression| ExprKind::Text { expression }),
    ("&", |expression| ExprKind::SimpleAnd { expression }),
    ("!", |expression| ExprKind::SimpleNot { expression }),
];

const SUFFIX_OPERATORS: [(&str, Wrap); 3] = [
    ("?", |expression| ExprKind::Optional { expression }),
    ("*", |expression| ExprKind::ZeroOrMore { expression }),
    ("+", |expression| ExprKind::OneOrMore { expression }),
];

pub struct Parser<'a> {
    source: &'a str,
    pos: usize,
    locator: Locator<'a>,
    failures: Failures,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, options: &ParseOptions) -> Self {
        Self {
            source,
            pos: 0,
            locator: Locator::new(source, options.source.clone()),
            failures: Failures::default(),
        }
    }

    // === Utilities ===

    fn span(&mut self, start: usize, end: usize) -> Span {
        self.locator.span(start, end)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn fail(&mut self, pos: usize, expectation: Expectation) {
        self.failures.record(pos, expectation);
    }

    /// Consume `text` if present, recording it as expected otherwise
    fn consume(&mut self, text: &str) -> bool {
        match literal_at(self.source, self.pos, text) {
            Some(end) => {
                self.pos = end;
                true
            }
            None => {
                self.fail(self.pos, Expectation::literal(text));
                false
            }
        }
    }

    /// Consume `text` if present, without recording anything
    fn eat(&mut self, text: &str) -> bool {
        match literal_at(self.source, self.pos, text) {
            Some(end) => {
                self.pos = end;
                true
            }
            None => false,
        }
    }

    /// Run a lexer recognizer as a named production
    fn lex<T>(
        &mut self,
        name: &str,
        recognize: impl FnOnce(&str, usize) -> Option<Lexeme<T>>,
    ) -> Option<Lexeme<T>> {
        match recognize(self.source, self.pos) {
            Some(lexeme) => {
                self.pos = lexeme.end;
                Some(lexeme)
            }
            None => {
                self.fail(self.pos, Expectation::named(name));
                None
            }
        }
    }

    fn range_error(&mut self, error: LexError) -> ParseError {
        match error {
            LexError::InvalidRange { text, start, end } => ParseError::InvalidCharacterRange {
                text,
                location: self.span(start, end),
            },
        }
    }

    /// The error for the deepest failure recorded so far
    fn syntax_error(&mut self) -> ParseError {
        let pos = self.failures.max_pos();
        let expected = self.failures.expected();
        let found = lexer::char_at(self.source, pos);
        let end = pos + found.map_or(0, char::len_utf8);
        ParseError::Syntax {
            message: build_message(&expected, found),
            expected,
            found,
            location: self.span(pos, end),
        }
    }

    // === Trivia ===

    /// Whitespace, line terminators and comments (`__`)
    fn skip_trivia(&mut self) {
        self.pos = trivia::skip(self.source, self.pos);
        for name in ["whitespace", "end of line", "comment"] {
            self.fail(self.pos, Expectation::named(name));
        }
    }

    /// Whitespace and comments that stay on the current line (`_`)
    fn skip_inline(&mut self) {
        self.pos = trivia::skip_inline(self.source, self.pos);
        self.fail(self.pos, Expectation::named("whitespace"));
        self.fail_inline_comment();
    }

    /// Record why an inline `/* */` comment did not match here
    fn fail_inline_comment(&mut self) {
        let Some(body) = literal_at(self.source, self.pos, "/*") else {
            self.fail(self.pos, Expectation::literal("/*"));
            return;
        };
        let stop = self.source[body..]
            .find(is_line_terminator)
            .map_or(self.source.len(), |offset| body + offset);
        if stop == self.source.len() {
            self.fail(stop, Expectation::Any);
        }
        self.fail(stop, Expectation::literal("*/"));
    }

    /// End of statement: `;`, the end of the line, or the end of input
    fn parse_eos(&mut self) -> bool {
        let start = self.pos;

        self.skip_trivia();
        if self.consume(";") {
            return true;
        }

        self.pos = start;
        self.skip_inline();
        match trivia::single_line_comment(self.source, self.pos) {
            Some(end) => self.pos = end,
            None => self.fail(self.pos, Expectation::literal("//")),
        }
        if self
            .lex("end of line", |source, pos| {
                trivia::line_terminator_sequence(source, pos).map(|end| Lexeme::new((), pos, end))
            })
            .is_some()
        {
            return true;
        }

        self.pos = start;
        self.skip_trivia();
        if self.at_end() {
            return true;
        }
        self.fail(self.pos, Expectation::End);
        self.pos = start;
        false
    }

    // === Tokens ===

    fn identifier(&mut self) -> Option<Lexeme<String>> {
        self.lex("identifier", lexer::identifier_name)
    }

    fn string_literal(&mut self) -> Option<Lexeme<String>> {
        self.lex("string", lexer::string_literal)
    }

    /// `{ code }`; the lexeme range covers the code only
    fn code_block(&mut self) -> Option<Lexeme<String>> {
        let block = self.lex("code block", lexer::code_block)?;
        // step over the closing brace
        self.pos += 1;
        Some(block)
    }

    /// Would a rule definition start after an identifier ending at `pos`?
    fn starts_rule(&self, pos: usize) -> bool {
        let mut p = trivia::skip(self.source, pos);
        if let Some(display) = lexer::string_literal(self.source, p) {
            p = trivia::skip(self.source, display.end);
            if let Some(tilde) = literal_at(self.source, p, "~") {
                p = trivia::skip(self.source, tilde);
            }
        }
        literal_at(self.source, p, "=").is_some()
    }

    // === Grammar ===

    pub fn parse_grammar(&mut self) -> Result<Grammar, ParseError> {
        let grammar = self.grammar()?;
        match grammar {
            Some(grammar) if self.at_end() => Ok(grammar),
            Some(_) => {
                self.fail(self.pos, Expectation::End);
                Err(self.syntax_error())
            }
            None => Err(self.syntax_error()),
        }
    }

    fn grammar(&mut self) -> PResult<Grammar> {
        let start = self.pos;
        self.skip_trivia();

        let top_level_initializer = self.parse_top_level_initializer();
        if top_level_initializer.is_some() {
            self.skip_trivia();
        }
        let initializer = self.parse_initializer();
        if initializer.is_some() {
            self.skip_trivia();
        }

        let mut rules = Vec::new();
        while let Some(rule) = self.parse_rule()? {
            rules.push(rule);
            self.skip_trivia();
        }
        if rules.is_empty() {
            self.pos = start;
            return Ok(None);
        }

        let location = self.span(start, self.pos);
        Ok(Some(Grammar {
            top_level_initializer,
            initializer,
            rules,
            location,
        }))
    }

    fn parse_top_level_initializer(&mut self) -> Option<TopLevelInitializer> {
        let start = self.pos;
        if !self.consume("{") {
            return None;
        }
        let Some(code) = self.code_block() else {
            self.pos = start;
            return None;
        };
        if !self.consume("}") || !self.parse_eos() {
            self.pos = start;
            return None;
        }
        Some(TopLevelInitializer {
            code: code.value,
            code_location: self.span(code.start, code.end),
            location: self.span(start, self.pos),
        })
    }

    fn parse_initializer(&mut self) -> Option<Initializer> {
        let start = self.pos;
        let code = self.code_block()?;
        if !self.parse_eos() {
            self.pos = start;
            return None;
        }
        Some(Initializer {
            code: code.value,
            code_location: self.span(code.start, code.end),
            location: self.span(start, self.pos),
        })
    }

    fn parse_rule(&mut self) -> PResult<Rule> {
        let start = self.pos;
        let Some(name) = self.identifier() else {
            return Ok(None);
        };
        self.skip_trivia();

        let display_name = match self.string_literal() {
            Some(display) => {
                self.skip_trivia();
                let verbose = self.consume("~");
                if verbose {
                    self.skip_trivia();
                }
                Some((display.value, verbose))
            }
            None => None,
        };

        if !self.consume("=") {
            self.pos = start;
            return Ok(None);
        }
        let Some(expression) = self.after_trivia(Self::parse_expression)? else {
            self.pos = start;
            return Ok(None);
        };
        if !self.parse_eos() {
            self.pos = start;
            return Ok(None);
        }

        let location = self.span(start, self.pos);
        let expression = match display_name {
            Some((display, verbose)) => Expr::new(
                ExprKind::Named {
                    name: display,
                    verbose,
                    expression: Box::new(expression),
                },
                location.clone(),
            ),
            None => expression,
        };
        trace!(rule = %name.value, "parsed rule");

        Ok(Some(Rule {
            name: name.value,
            name_location: self.span(name.start, name.end),
            expression,
            location,
        }))
    }

    // === Expressions ===

    /// Skip trivia, then run `production`. An empty sequence gives the
    /// trivia back so that whatever follows can still claim it.
    fn after_trivia(&mut self, production: fn(&mut Self) -> PResult<Expr>) -> PResult<Expr> {
        let before = self.pos;
        self.skip_trivia();
        let Some(mut expression) = production(self)? else {
            self.pos = before;
            return Ok(None);
        };
        if matches!(&expression.kind, ExprKind::Sequence { elements } if elements.is_empty()) {
            self.pos = before;
            expression.location = self.span(before, before);
        }
        Ok(Some(expression))
    }

    fn parse_expression(&mut self) -> PResult<Expr> {
        self.parse_choice()
    }

    fn parse_choice(&mut self) -> PResult<Expr> {
        let start = self.pos;
        let Some(head) = self.parse_action()? else {
            return Ok(None);
        };

        let mut alternatives = vec![head];
        loop {
            let before = self.pos;
            self.skip_trivia();
            if !self.consume("/") {
                self.pos = before;
                break;
            }
            match self.after_trivia(Self::parse_action)? {
                Some(alternative) => alternatives.push(alternative),
                None => {
                    self.pos = before;
                    break;
                }
            }
        }

        if alternatives.len() == 1 {
            return Ok(alternatives.pop());
        }
        let location = self.span(start, self.pos);
        Ok(Some(Expr::new(ExprKind::Choice { alternatives }, location)))
    }

    fn parse_action(&mut self) -> PResult<Expr> {
        let start = self.pos;
        let Some(expression) = self.parse_sequence()? else {
            return Ok(None);
        };

        let before = self.pos;
        self.skip_trivia();
        match self.code_block() {
            Some(code) => {
                let code_location = self.span(code.start, code.end);
                let location = self.span(start, self.pos);
                Ok(Some(Expr::new(
                    ExprKind::Action {
                        expression: Box::new(expression),
                        code: code.value,
                        code_location,
                    },
                    location,
                )))
            }
            None => {
                self.pos = before;
                Ok(Some(expression))
            }
        }
    }

    fn parse_sequence(&mut self) -> PResult<Expr> {
        let start = self.pos;
        let mut elements = Vec::new();

        if let Some(head) = self.parse_labeled()? {
            elements.push(head);
            loop {
                let before = self.pos;
                self.skip_trivia();
                match self.parse_labeled()? {
                    Some(element) => elements.push(element),
                    None => {
                        self.pos = before;
                        break;
                    }
                }
            }
        }

        // A lone pick element keeps its sequence so the pick is not lost
        if elements.len() == 1 && !elements[0].is_pick() {
            return Ok(elements.pop());
        }
        let location = self.span(start, self.pos);
        Ok(Some(Expr::new(ExprKind::Sequence { elements }, location)))
    }

    /// `label:` including the colon
    fn parse_label(&mut self) -> Option<Lexeme<String>> {
        let start = self.pos;
        let label = self.identifier()?;
        self.skip_trivia();
        if self.consume(":") {
            Some(label)
        } else {
            self.pos = start;
            None
        }
    }

    fn parse_labeled(&mut self) -> PResult<Expr> {
        let start = self.pos;

        if self.consume("@") {
            let at = self.span(start, self.pos);
            self.skip_trivia();
            let label = self.parse_label();
            self.skip_trivia();
            let Some(expression) = self.parse_prefixed()? else {
                self.pos = start;
                return Ok(None);
            };
            let (label, label_location) = match label {
                Some(label) => {
                    let location = self.span(label.start, label.end);
                    (Some(label.value), location)
                }
                None => (None, at),
            };
            let location = self.span(start, self.pos);
            return Ok(Some(Expr::new(
                ExprKind::Labeled {
                    label,
                    label_location,
                    pick: true,
                    expression: Box::new(expression),
                },
                location,
            )));
        }

        if let Some(label) = self.parse_label() {
            self.skip_trivia();
            if let Some(expression) = self.parse_prefixed()? {
                let label_location = self.span(label.start, label.end);
                let location = self.span(start, self.pos);
                return Ok(Some(Expr::new(
                    ExprKind::Labeled {
                        label: Some(label.value),
                        label_location,
                        pick: false,
                        expression: Box::new(expression),
                    },
                    location,
                )));
            }
            self.pos = start;
        }

        self.parse_prefixed()
    }

    fn parse_prefixed(&mut self) -> PResult<Expr> {
        let start = self.pos;
        for (operator, wrap) in PREFIX_OPERATORS {
            if !self.consume(operator) {
                continue;
            }
            self.skip_trivia();
            if let Some(expression) = self.parse_suffixed()? {
                let location = self.span(start, self.pos);
                return Ok(Some(Expr::new(wrap(Box::new(expression)), location)));
            }
            self.pos = start;
            break;
        }
        self.parse_suffixed()
    }

    fn parse_suffixed(&mut self) -> PResult<Expr> {
        let start = self.pos;
        let Some(expression) = self.parse_primary()? else {
            return Ok(None);
        };

        let before = self.pos;
        self.skip_trivia();
        for (operator, wrap) in SUFFIX_OPERATORS {
            if self.consume(operator) {
                let location = self.span(start, self.pos);
                return Ok(Some(Expr::new(wrap(Box::new(expression)), location)));
            }
        }
        self.pos = before;
        Ok(Some(expression))
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        if let Some(literal) = self.parse_literal_matcher() {
            return Ok(Some(literal));
        }
        if let Some(class) = self.parse_class_matcher()? {
            return Ok(Some(class));
        }
        if let Some(any) = self.parse_any_matcher() {
            return Ok(Some(any));
        }
        if let Some(rule_ref) = self.parse_rule_ref() {
            return Ok(Some(rule_ref));
        }
        if let Some(predicate) = self.parse_semantic_predicate() {
            return Ok(Some(predicate));
        }
        self.parse_group()
    }

    fn parse_literal_matcher(&mut self) -> Option<Expr> {
        let start = self.pos;
        let literal = self.lex("literal", lexer::string_literal)?;
        let ignore_case = self.eat("i");
        let location = self.span(start, self.pos);
        Some(Expr::new(
            ExprKind::Literal {
                value: literal.value,
                ignore_case,
            },
            location,
        ))
    }

    fn parse_class_matcher(&mut self) -> PResult<Expr> {
        let start = self.pos;
        let body = match lexer::class_body(self.source, start) {
            Ok(Some(body)) => body,
            Ok(None) => {
                self.fail(start, Expectation::named("character class"));
                return Ok(None);
            }
            Err(error) => return Err(self.range_error(error)),
        };
        self.pos = body.end;
        let ignore_case = self.eat("i");
        let location = self.span(start, self.pos);
        Ok(Some(Expr::new(
            ExprKind::Class {
                parts: body.value.parts,
                inverted: body.value.inverted,
                ignore_case,
            },
            location,
        )))
    }

    fn parse_any_matcher(&mut self) -> Option<Expr> {
        let start = self.pos;
        if !self.consume(".") {
            return None;
        }
        let location = self.span(start, self.pos);
        Some(Expr::new(ExprKind::Any, location))
    }

    fn parse_rule_ref(&mut self) -> Option<Expr> {
        let start = self.pos;
        let name = self.identifier()?;
        if self.starts_rule(name.end) {
            self.pos = start;
            return None;
        }
        let location = self.span(start, self.pos);
        Some(Expr::new(ExprKind::RuleRef { name: name.value }, location))
    }

    fn parse_semantic_predicate(&mut self) -> Option<Expr> {
        let start = self.pos;
        let positive = if self.consume("&") {
            true
        } else if self.consume("!") {
            false
        } else {
            return None;
        };
        self.skip_trivia();
        let Some(code) = self.code_block() else {
            self.pos = start;
            return None;
        };

        let code_location = self.span(code.start, code.end);
        let kind = if positive {
            ExprKind::SemanticAnd {
                code: code.value,
                code_location,
            }
        } else {
            ExprKind::SemanticNot {
                code: code.value,
                code_location,
            }
        };
        let location = self.span(start, self.pos);
        Some(Expr::new(kind, location))
    }

    fn parse_group(&mut self) -> PResult<Expr> {
        let start = self.pos;
        if !self.consume("(") {
            return Ok(None);
        }
        let Some(expression) = self.after_trivia(Self::parse_expression)? else {
            self.pos = start;
            return Ok(None);
        };
        self.skip_trivia();
        if !self.consume(")") {
            self.pos = start;
            return Ok(None);
        }

        // Only labeled elements and sequences need their label scope isolated
        if matches!(
            expression.kind,
            ExprKind::Labeled { .. } | ExprKind::Sequence { .. }
        ) {
            let location = self.span(start, self.pos);
            return Ok(Some(Expr::new(
                ExprKind::Group {
                    expression: Box::new(expression),
                },
                location,
            )));
        }
        Ok(Some(expression))
    }
}
