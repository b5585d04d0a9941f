use pegfront::ast::*;
use pegfront::parser::ParseError;

/// Assert that parsing succeeds
pub fn assert_parses(source: &str) -> Grammar {
    pegfront::parse(source).unwrap_or_else(|e| panic!("Expected source to parse, got: {}", e))
}

/// Assert that parsing fails
pub fn assert_parse_fails(source: &str) -> ParseError {
    match pegfront::parse(source) {
        Ok(grammar) => panic!("Expected source to fail parsing, got {} rules", grammar.rules.len()),
        Err(e) => e,
    }
}

/// Assert the grammar defines a rule with the given name
pub fn assert_has_rule<'a>(grammar: &'a Grammar, name: &str) -> &'a Rule {
    grammar
        .rule(name)
        .unwrap_or_else(|| panic!("Expected rule named: {}", name))
}

/// Parse and drop locations, for comparing trees built from different text
pub fn parse_stripped(source: &str) -> Grammar {
    let mut grammar = assert_parses(source);
    strip_locations(&mut grammar);
    grammar
}
