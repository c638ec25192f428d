//! Conversion of token trees into `serde_json` values
//!
//! Number literals are carried over exactly (serde_json is built with
//! `arbitrary_precision`) and object order is kept (`preserve_order`). String
//! escapes are decoded on the way. Duplicate names in an object collapse to
//! the last value, as serde_json maps do.

use super::escape::{unescape, EscapeError};
use super::{Element, Token};
use crate::lexing::classification::is_number;
use serde_json::{Map, Number, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum InterchangeError {
    Escape(EscapeError),
    Number(String),
}

impl fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterchangeError::Escape(err) => write!(f, "{}", err),
            InterchangeError::Number(literal) => {
                write!(f, "Number literal '{}' is not representable", literal)
            }
        }
    }
}

impl std::error::Error for InterchangeError {}

impl From<EscapeError> for InterchangeError {
    fn from(err: EscapeError) -> Self {
        InterchangeError::Escape(err)
    }
}

impl TryFrom<&Token> for Value {
    type Error = InterchangeError;

    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        Ok(match token {
            Token::Null => Value::Null,
            Token::Boolean(b) => Value::Bool(*b),
            Token::Number(literal) => Value::Number(exact_number(literal)?),
            Token::String(raw) => Value::String(unescape(raw)?),
            Token::Element(element) => Value::Object(to_map(std::iter::once(&**element))?),
            Token::Object(elements) => Value::Object(to_map(elements)?),
            Token::Array(items) => Value::Array(
                items
                    .iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        })
    }
}

/// Carry a literal over as written; re-parsing would normalize e.g. `E` to `e`.
fn exact_number(literal: &str) -> Result<Number, InterchangeError> {
    if !is_number(literal) {
        return Err(InterchangeError::Number(literal.to_string()));
    }
    Ok(Number::from_string_unchecked(literal.to_string()))
}

fn to_map<'a>(
    elements: impl IntoIterator<Item = &'a Element>,
) -> Result<Map<String, Value>, InterchangeError> {
    let mut map = Map::new();
    for element in elements {
        map.insert(unescape(element.name())?, Value::try_from(element.value())?);
    }
    Ok(map)
}
