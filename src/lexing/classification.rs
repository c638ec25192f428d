//! Token classification
//!
//! Pure predicates mapping a raw token string to its kind. The classifier is
//! the single authority on token grammar: the scanner asks it whether a
//! segment is complete, and the builder asks it what a raw token means.
//! Nothing here holds state, so both pipeline stages may classify freely.

use crate::token::Token;
use once_cell::sync::Lazy;
use regex::Regex;

/// `-` digits, optional fraction, optional exponent. Leading zeroes allowed.
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$").unwrap());

/// Quoted text; a backslash always consumes the next character, so `"a\\"` is
/// complete and `"a\"` is not. Raw control characters are never part of a string.
static STRING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"(?:[^"\\\x00-\x1F]|\\[^\x00-\x1F])*"$"#).unwrap());

/// The six structural characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structural {
    /// `,`
    MoreValue,
    /// `:`
    ElementPair,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
}

impl Structural {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Structural::MoreValue),
            ':' => Some(Structural::ElementPair),
            '[' => Some(Structural::ArrayStart),
            ']' => Some(Structural::ArrayEnd),
            '{' => Some(Structural::ObjectStart),
            '}' => Some(Structural::ObjectEnd),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Structural::MoreValue => ',',
            Structural::ElementPair => ':',
            Structural::ArrayStart => '[',
            Structural::ArrayEnd => ']',
            Structural::ObjectStart => '{',
            Structural::ObjectEnd => '}',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Structural(Structural),
    Null,
    Boolean,
    Number,
    String,
    Invalid,
}

/// Classify a raw token string.
pub fn classify(text: &str) -> TokenKind {
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(structural) = Structural::from_char(c) {
            return TokenKind::Structural(structural);
        }
    }

    if is_null(text) {
        TokenKind::Null
    } else if is_boolean(text) {
        TokenKind::Boolean
    } else if is_number(text) {
        TokenKind::Number
    } else if is_string(text) {
        TokenKind::String
    } else {
        TokenKind::Invalid
    }
}

/// Build the leaf token a classified raw string denotes.
///
/// Returns `None` for structural and invalid kinds.
pub fn leaf_token(kind: TokenKind, text: &str) -> Option<Token> {
    match kind {
        TokenKind::Null => Some(Token::Null),
        TokenKind::Boolean => Some(Token::Boolean(text == "true")),
        TokenKind::Number => Some(Token::Number(text.to_string())),
        TokenKind::String => Some(Token::String(text[1..text.len() - 1].to_string())),
        TokenKind::Structural(_) | TokenKind::Invalid => None,
    }
}

pub fn is_structural(text: &str) -> bool {
    matches!(classify(text), TokenKind::Structural(_))
}

pub fn is_structural_char(c: char) -> bool {
    Structural::from_char(c).is_some()
}

/// JSON insignificant whitespace: space, tab, line feed, carriage return.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

pub fn is_null(text: &str) -> bool {
    text == "null"
}

pub fn is_boolean(text: &str) -> bool {
    text == "true" || text == "false"
}

pub fn is_number(text: &str) -> bool {
    NUMBER_PATTERN.is_match(text)
}

pub fn is_string(text: &str) -> bool {
    STRING_PATTERN.is_match(text)
}

/// True when `text` is a complete token of any kind.
pub fn is_token(text: &str) -> bool {
    classify(text) != TokenKind::Invalid
}
