//! Character classification by Unicode general category

use unicode_general_category::{get_general_category, GeneralCategory};

/// LF, CR, LS and PS
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Inline space: tab, vertical tab, form feed, space, NBSP, the BOM, and
/// anything in the space separator category
pub fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\u{b}' | '\u{c}' | ' ' | '\u{a0}' | '\u{feff}')
        || matches!(get_general_category(c), GeneralCategory::SpaceSeparator)
}

pub fn is_unicode_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::LetterNumber
    )
}

pub fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || is_unicode_letter(c)
}

pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c)
        || c == '\u{200c}'
        || c == '\u{200d}'
        || matches!(
            get_general_category(c),
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::DecimalNumber
                | GeneralCategory::ConnectorPunctuation
        )
}

pub fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}
