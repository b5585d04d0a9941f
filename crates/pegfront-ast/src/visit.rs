//! Mutable traversal over a grammar tree
//!
//! Implementors override the hooks they care about and call the matching
//! `walk_*` function to keep descending.

use crate::{Expr, ExprKind, Grammar, Initializer, Rule, Span, TopLevelInitializer};

pub trait VisitMut {
    fn visit_grammar(&mut self, grammar: &mut Grammar) {
        walk_grammar(self, grammar);
    }

    fn visit_top_level_initializer(&mut self, init: &mut TopLevelInitializer) {
        self.visit_span(&mut init.code_location);
        self.visit_span(&mut init.location);
    }

    fn visit_initializer(&mut self, init: &mut Initializer) {
        self.visit_span(&mut init.code_location);
        self.visit_span(&mut init.location);
    }

    fn visit_rule(&mut self, rule: &mut Rule) {
        walk_rule(self, rule);
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr(self, expr);
    }

    fn visit_span(&mut self, _span: &mut Span) {}
}

pub fn walk_grammar<V: VisitMut + ?Sized>(visitor: &mut V, grammar: &mut Grammar) {
    if let Some(init) = &mut grammar.top_level_initializer {
        visitor.visit_top_level_initializer(init);
    }
    if let Some(init) = &mut grammar.initializer {
        visitor.visit_initializer(init);
    }
    for rule in &mut grammar.rules {
        visitor.visit_rule(rule);
    }
    visitor.visit_span(&mut grammar.location);
}

pub fn walk_rule<V: VisitMut + ?Sized>(visitor: &mut V, rule: &mut Rule) {
    visitor.visit_span(&mut rule.name_location);
    visitor.visit_expr(&mut rule.expression);
    visitor.visit_span(&mut rule.location);
}

pub fn walk_expr<V: VisitMut + ?Sized>(visitor: &mut V, expr: &mut Expr) {
    match &mut expr.kind {
        ExprKind::Named { expression, .. }
        | ExprKind::Text { expression }
        | ExprKind::SimpleAnd { expression }
        | ExprKind::SimpleNot { expression }
        | ExprKind::Optional { expression }
        | ExprKind::ZeroOrMore { expression }
        | ExprKind::OneOrMore { expression }
        | ExprKind::Group { expression } => visitor.visit_expr(expression),
        ExprKind::Choice { alternatives } => {
            for alternative in alternatives {
                visitor.visit_expr(alternative);
            }
        }
        ExprKind::Sequence { elements } => {
            for element in elements {
                visitor.visit_expr(element);
            }
        }
        ExprKind::Action {
            expression,
            code_location,
            ..
        } => {
            visitor.visit_expr(expression);
            visitor.visit_span(code_location);
        }
        ExprKind::Labeled {
            label_location,
            expression,
            ..
        } => {
            visitor.visit_span(label_location);
            visitor.visit_expr(expression);
        }
        ExprKind::SemanticAnd { code_location, .. } | ExprKind::SemanticNot { code_location, .. } => {
            visitor.visit_span(code_location);
        }
        ExprKind::RuleRef { .. }
        | ExprKind::Literal { .. }
        | ExprKind::Class { .. }
        | ExprKind::Any => {}
    }
    visitor.visit_span(&mut expr.location);
}

struct LocationStripper;

impl VisitMut for LocationStripper {
    fn visit_span(&mut self, span: &mut Span) {
        *span = Span::default();
    }
}

/// Reset every span in the tree, leaving only its structure
pub fn strip_locations(grammar: &mut Grammar) {
    LocationStripper.visit_grammar(grammar);
}

/// Expression-level counterpart of [`strip_locations`]
pub fn strip_expr_locations(expr: &mut Expr) {
    LocationStripper.visit_expr(expr);
}
