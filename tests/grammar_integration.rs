//! End-to-end tests over whole grammars

mod common;

use common::assertions::*;
use common::fixtures::{discover_fixtures, load_fixture};
use pegfront::ast::*;
use pegfront::parser::{Expectation, ParseError};
use pegfront::{parse_with_options, ParseOptions};
use std::fs;

// === Fixture structure ===

#[test]
fn test_arithmetics_structure() {
    let grammar = assert_parses(&load_fixture("arithmetics"));

    let names: Vec<_> = grammar.rule_names().collect();
    assert_eq!(names, vec!["Expression", "Term", "Factor", "Integer", "_"]);

    let top = grammar.top_level_initializer.as_ref().expect("top-level initializer");
    assert!(top.code.contains("function reduce(head, tail)"));
    assert!(grammar.initializer.is_none());

    assert_eq!(assert_has_rule(&grammar, "Integer").display_name(), Some("integer"));
    assert_eq!(assert_has_rule(&grammar, "_").display_name(), Some("whitespace"));

    let factor = assert_has_rule(&grammar, "Factor");
    let ExprKind::Choice { alternatives } = &factor.expression.kind else {
        panic!("Factor should be a choice");
    };
    let ExprKind::Sequence { elements } = &alternatives[0].kind else {
        panic!("first alternative should be a sequence");
    };
    assert_eq!(elements.len(), 5);
    assert!(elements[2].is_pick());
    assert_eq!(
        alternatives[1].kind,
        ExprKind::RuleRef {
            name: "Integer".to_string()
        }
    );
}

#[test]
fn test_json_structure() {
    let grammar = assert_parses(&load_fixture("json"));
    assert_eq!(grammar.rules.len(), 32);
    assert_eq!(grammar.rules.first().map(|r| r.name.as_str()), Some("JSON_text"));
    assert_eq!(grammar.rules.last().map(|r| r.name.as_str()), Some("HEXDIG"));

    let value = assert_has_rule(&grammar, "value");
    let ExprKind::Choice { alternatives } = &value.expression.kind else {
        panic!("value should be a choice");
    };
    let refs: Vec<_> = alternatives
        .iter()
        .map(|alt| match &alt.kind {
            ExprKind::RuleRef { name } => name.as_str(),
            other => panic!("unexpected alternative {:?}", other),
        })
        .collect();
    assert_eq!(refs, vec!["false", "null", "true", "object", "array", "number", "string"]);

    let unescaped = assert_has_rule(&grammar, "unescaped");
    assert!(matches!(
        &unescaped.expression.kind,
        ExprKind::Class { parts, inverted: true, ignore_case: false }
            if parts == &vec![
                ClassPart::Range('\0', '\u{1f}'),
                ClassPart::Char('"'),
                ClassPart::Char('\\'),
            ]
    ));

    let hexdig = assert_has_rule(&grammar, "HEXDIG");
    assert!(matches!(
        hexdig.expression.kind,
        ExprKind::Class {
            ignore_case: true,
            ..
        }
    ));

    // members:( ... { code } )? keeps the action, not a group
    let object = assert_has_rule(&grammar, "object");
    let ExprKind::Action { expression, .. } = &object.expression.kind else {
        panic!("object should be an action");
    };
    let ExprKind::Sequence { elements } = &expression.kind else {
        panic!("object body should be a sequence");
    };
    let ExprKind::Labeled { expression, .. } = &elements[1].kind else {
        panic!("members should be labeled");
    };
    let ExprKind::Optional { expression } = &expression.kind else {
        panic!("members should be optional");
    };
    assert_eq!(expression.kind.type_name(), "action");
}

#[test]
fn test_features_structure() {
    let grammar = assert_parses(&load_fixture("features"));

    assert_eq!(
        grammar.initializer.as_ref().map(|init| init.code.as_str()),
        Some("\n  let depth = 0;\n")
    );
    let names: Vec<_> = grammar.rule_names().collect();
    assert_eq!(
        names,
        vec![
            "start",
            "item",
            "blank",
            "keyword",
            "identifier",
            "list",
            "number",
            "comment_text",
            "_"
        ]
    );

    let start = assert_has_rule(&grammar, "start");
    assert!(matches!(
        &start.expression.kind,
        ExprKind::Named { name, verbose: true, .. } if name == "program"
    ));
    // Named expressions share the rule's location
    assert_eq!(start.expression.location, start.location);

    let number = assert_has_rule(&grammar, "number");
    let ExprKind::Action { expression, .. } = &number.expression.kind else {
        panic!("number should be an action");
    };
    let ExprKind::Sequence { elements } = &expression.kind else {
        panic!("number body should be a sequence");
    };
    assert_eq!(elements[1].kind.type_name(), "semantic_not");
}

#[test]
fn test_rules_parse_the_same_on_their_own() {
    for path in discover_fixtures() {
        let source = fs::read_to_string(&path).unwrap();
        let grammar = assert_parses(&source);
        let stripped = parse_stripped(&source);

        for (rule, expected) in grammar.rules.iter().zip(&stripped.rules) {
            let text = &source[rule.location.range()];
            let alone = parse_stripped(text);
            assert_eq!(alone.rules.len(), 1, "{}: {:?}", path.display(), text);
            assert_eq!(&alone.rules[0], expected, "{}: rule {}", path.display(), rule.name);
        }
    }
}

// === Printing ===

#[test]
fn test_printed_fixtures_reparse_to_the_same_tree() {
    for path in discover_fixtures() {
        let source = fs::read_to_string(&path).unwrap();
        let original = parse_stripped(&source);
        let printed = original.to_peg();
        let reparsed = parse_stripped(&printed);
        assert_eq!(
            original,
            reparsed,
            "{} changed after printing:\n{}",
            path.display(),
            printed
        );
        assert_eq!(printed, reparsed.to_peg(), "{} is not stable", path.display());
    }
}

#[test]
fn test_escaped_names_survive_printing() {
    let original = parse_stripped(r"\u0031x = a\u002Db:'a' c\u0020d");
    let rule = &original.rules[0];
    assert_eq!(rule.name, "1x");
    let ExprKind::Sequence { elements } = &rule.expression.kind else {
        panic!("expected sequence");
    };
    assert!(matches!(
        &elements[0].kind,
        ExprKind::Labeled { label: Some(label), .. } if label == "a-b"
    ));
    assert_eq!(
        elements[1].kind,
        ExprKind::RuleRef {
            name: "c d".to_string()
        }
    );

    let printed = original.to_peg();
    assert_eq!(parse_stripped(&printed), original, "reprinted as:\n{}", printed);
}

#[test]
fn test_layout_does_not_change_the_tree() {
    let compact = parse_stripped("a = 'x' 'y' / b:c { code }\nc = [0-9]+");
    let spread = parse_stripped(
        "// leading comment\na\n  = 'x'\n    'y'\n  / b : c\n    { code }\n\n\nc\n  = [0-9]+ /* done */\n",
    );
    assert_eq!(compact, spread);
}

// === JSON ===

#[test]
fn test_json_output_shape() {
    let options = ParseOptions::new().with_source("tiny.peggy");
    let grammar = parse_with_options("start = 'a'i", &options).unwrap();
    let json = serde_json::to_value(&grammar).unwrap();

    let expression = &json["rules"][0]["expression"];
    assert_eq!(expression["type"], "literal");
    assert_eq!(expression["value"], "a");
    assert_eq!(expression["ignore_case"], true);
    assert_eq!(expression["location"]["source"], "tiny.peggy");
    assert_eq!(expression["location"]["start"]["offset"], 8);
    assert_eq!(expression["location"]["end"]["column"], 13);
    assert!(json["initializer"].is_null());

    let restored: Grammar = serde_json::from_value(json).unwrap();
    assert_eq!(restored, grammar);
}

#[test]
fn test_json_nodes_carry_their_type() {
    let grammar = parse_stripped("{{ top }}\n{ per_parse }\nstart = 'a'");
    let json = serde_json::to_value(&grammar).unwrap();
    assert_eq!(json["type"], "grammar");
    assert_eq!(json["top_level_initializer"]["type"], "top_level_initializer");
    assert_eq!(json["initializer"]["type"], "initializer");
    assert_eq!(json["rules"][0]["type"], "rule");
    assert_eq!(json["rules"][0]["expression"]["type"], "literal");
}

#[test]
fn test_stripped_json_has_no_source() {
    let grammar = parse_stripped("start = [a-z]");
    let json = serde_json::to_value(&grammar).unwrap();
    let class = &json["rules"][0]["expression"];
    assert_eq!(class["type"], "class");
    assert_eq!(class["parts"][0], serde_json::json!(["a", "z"]));
    assert!(class["location"]["source"].is_null());
    assert_eq!(class["location"]["start"]["offset"], 0);
}

// === Errors ===

#[test]
fn test_range_error_location() {
    let err = assert_parse_fails("start = 'a'\n\nbad = [z-a]");
    assert!(matches!(err, ParseError::InvalidCharacterRange { ref text, .. } if text == "z-a"));
    let location = err.location().unwrap();
    assert_eq!(location.start.offset, 20);
    assert_eq!((location.start.line, location.start.column), (3, 8));
}

#[test]
fn test_error_columns_count_characters() {
    let err = assert_parse_fails("start = 'üü' )");
    let location = err.location().unwrap();
    assert_eq!(location.start.offset, 15);
    assert_eq!(location.start.column, 14);
    assert!(matches!(err, ParseError::Syntax { found: Some(')'), .. }));
    assert!(err.expected().contains(&Expectation::End));
}

#[test]
fn test_error_carries_source_tag() {
    let options = ParseOptions::new().with_source("broken.peggy");
    let err = parse_with_options("start = (", &options).unwrap_err();
    assert_eq!(err.location().unwrap().source.as_str(), Some("broken.peggy"));
    assert!(err.to_string().ends_with("but end of input found."));
}

#[test]
fn test_rule_starting_on_same_line_needs_separator() {
    assert_parse_fails("a = 'x' b = 'y'");
    assert_parses("a = 'x'; b = 'y'");
}
