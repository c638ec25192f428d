//! Value tokens: the nodes of a parsed JSON tree
//!
//!     A parse produces a sequence of root tokens. Leaf tokens hold literal
//!     values; composite tokens own their children exclusively, in source
//!     order, so a tree has no sharing and no cycles.
//!
//! Literal fidelity
//!
//!     Numbers keep their lexical text verbatim (`0.456245355434375E-23` stays
//!     exactly that), and strings keep their interior with escape sequences
//!     undecoded. Rendering a parsed tree therefore reproduces the literals of
//!     the source. Use [escape::unescape] to decode a string on demand, or
//!     [interchange] to hand a tree to serde_json.

pub mod escape;
pub mod formatting;
pub mod interchange;

/// A node of the value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Null,
    Boolean(bool),
    /// Number literal, exactly as written in the source
    Number(String),
    /// String interior without the delimiting quotes, escapes undecoded
    String(String),
    /// A single `name: value` pair
    Element(Box<Element>),
    Object(Vec<Element>),
    Array(Vec<Token>),
}

/// A `name: value` pair inside an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    value: Token,
}

impl Element {
    /// `name` is the raw string interior, as for [Token::String].
    pub fn new(name: impl Into<String>, value: Token) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Token {
        &self.value
    }

    pub fn into_parts(self) -> (String, Token) {
        (self.name, self.value)
    }
}

impl Token {
    pub fn string(raw: impl Into<String>) -> Self {
        Token::String(raw.into())
    }

    pub fn number(literal: impl Into<String>) -> Self {
        Token::Number(literal.into())
    }

    pub fn element(name: impl Into<String>, value: Token) -> Self {
        Token::Element(Box::new(Element::new(name, value)))
    }

    /// Short lowercase name of the token kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Null => "null",
            Token::Boolean(_) => "boolean",
            Token::Number(_) => "number",
            Token::String(_) => "string",
            Token::Element(_) => "element",
            Token::Object(_) => "object",
            Token::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Token::Null)
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Token::Object(_) | Token::Array(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Token::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The raw interior of a string token.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }

    /// The literal text of a number token.
    pub fn as_number(&self) -> Option<&str> {
        match self {
            Token::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn elements(&self) -> Option<&[Element]> {
        match self {
            Token::Object(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[Token]> {
        match self {
            Token::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up the first element named `name` in an object.
    ///
    /// Names are compared on their raw (undecoded) text.
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.elements()?
            .iter()
            .find(|element| element.name() == name)
            .map(Element::value)
    }
}
