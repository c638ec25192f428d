//! Partial builders for composite tokens
//!
//! Each builder accumulates the children of one composite until its grammar
//! is satisfied. Structural events arrive as `set_more` (`,` or `:`) and
//! `set_end` (`]` or `}`); children arrive through `add`. Every operation
//! reports whether it was legal in the builder's current state, and the
//! stack machine turns a refusal into a syntax error.

use crate::error::{ParseError, ParseResult};
use crate::token::{Element, Token};

/// Builds an [Token::Array].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayBuilder {
    items: Vec<Token>,
    more: bool,
    end: bool,
}

impl ArrayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty, open array takes its first value; afterwards a `,` must come first.
    pub fn ready_for_more(&self) -> bool {
        if self.items.is_empty() {
            !self.end
        } else {
            self.more
        }
    }

    pub fn is_done(&self) -> bool {
        self.end && !self.more
    }

    pub fn add(&mut self, token: Token) -> bool {
        if !self.ready_for_more() {
            return false;
        }
        self.items.push(token);
        self.more = false;
        true
    }

    pub fn set_more(&mut self) -> bool {
        if self.items.is_empty() || self.more || self.end {
            return false;
        }
        self.more = true;
        true
    }

    pub fn set_end(&mut self) -> bool {
        if self.more || self.end {
            return false;
        }
        self.end = true;
        true
    }

    pub fn build(self) -> ParseResult<Token> {
        if !self.is_done() {
            return Err(ParseError::BuildContract {
                message: format!("cannot build unfinished {}", self.describe()),
            });
        }
        Ok(Token::Array(self.items))
    }

    pub fn describe(&self) -> String {
        format!(
            "array(items={}, more={}, end={})",
            self.items.len(),
            self.more,
            self.end
        )
    }
}

/// Builds an [Token::Object]; only accepts [Token::Element] children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectBuilder {
    elements: Vec<Element>,
    more: bool,
    end: bool,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready_for_more(&self) -> bool {
        if self.elements.is_empty() {
            !self.end
        } else {
            self.more
        }
    }

    pub fn is_done(&self) -> bool {
        self.end && !self.more
    }

    pub fn add(&mut self, token: Token) -> bool {
        if !self.ready_for_more() {
            return false;
        }
        match token {
            Token::Element(element) => {
                self.elements.push(*element);
                self.more = false;
                true
            }
            _ => false,
        }
    }

    pub fn set_more(&mut self) -> bool {
        if self.elements.is_empty() || self.more || self.end {
            return false;
        }
        self.more = true;
        true
    }

    pub fn set_end(&mut self) -> bool {
        if self.more || self.end {
            return false;
        }
        self.end = true;
        true
    }

    pub fn build(self) -> ParseResult<Token> {
        if !self.is_done() {
            return Err(ParseError::BuildContract {
                message: format!("cannot build unfinished {}", self.describe()),
            });
        }
        Ok(Token::Object(self.elements))
    }

    pub fn describe(&self) -> String {
        format!(
            "object(elements={}, more={}, end={})",
            self.elements.len(),
            self.more,
            self.end
        )
    }
}

/// Builds an [Token::Element]: a string name, then `:`, then a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementBuilder {
    name: Option<String>,
    value: Option<Token>,
    awaiting_value: bool,
}

impl ElementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready_for_more(&self) -> bool {
        self.name.is_none() || self.awaiting_value
    }

    /// Done as soon as the value has been received.
    pub fn is_done(&self) -> bool {
        self.value.is_some()
    }

    pub fn add(&mut self, token: Token) -> bool {
        if self.name.is_none() {
            return match token {
                Token::String(name) => {
                    self.name = Some(name);
                    true
                }
                _ => false,
            };
        }
        if !self.awaiting_value {
            return false;
        }
        self.value = Some(token);
        self.awaiting_value = false;
        true
    }

    /// The `:` between name and value.
    pub fn set_more(&mut self) -> bool {
        if self.name.is_none() || self.awaiting_value || self.value.is_some() {
            return false;
        }
        self.awaiting_value = true;
        true
    }

    /// Elements are closed by their value, never by a bracket.
    pub fn set_end(&mut self) -> bool {
        false
    }

    pub fn build(self) -> ParseResult<Token> {
        let description = self.describe();
        match (self.name, self.value) {
            (Some(name), Some(value)) => Ok(Token::element(name, value)),
            _ => Err(ParseError::BuildContract {
                message: format!("cannot build unfinished {}", description),
            }),
        }
    }

    pub fn describe(&self) -> String {
        let value = match (&self.value, self.awaiting_value) {
            (Some(value), _) => value.kind_name(),
            (None, true) => "pending",
            (None, false) => "none",
        };
        match &self.name {
            Some(name) => format!("element(name={:?}, value={})", name, value),
            None => format!("element(name=none, value={})", value),
        }
    }
}

/// One entry of the builder stack.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueBuilder {
    Object(ObjectBuilder),
    Array(ArrayBuilder),
    Element(ElementBuilder),
}

impl ValueBuilder {
    pub fn ready_for_more(&self) -> bool {
        match self {
            ValueBuilder::Object(b) => b.ready_for_more(),
            ValueBuilder::Array(b) => b.ready_for_more(),
            ValueBuilder::Element(b) => b.ready_for_more(),
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            ValueBuilder::Object(b) => b.is_done(),
            ValueBuilder::Array(b) => b.is_done(),
            ValueBuilder::Element(b) => b.is_done(),
        }
    }

    /// Whether a value (leaf or composite) may be delivered to this builder
    /// directly, as opposed to starting a new element of an object.
    pub fn accepts_value(&self) -> bool {
        match self {
            ValueBuilder::Object(_) => false,
            ValueBuilder::Array(b) => b.ready_for_more(),
            ValueBuilder::Element(b) => b.awaiting_value,
        }
    }

    pub fn add(&mut self, token: Token) -> bool {
        match self {
            ValueBuilder::Object(b) => b.add(token),
            ValueBuilder::Array(b) => b.add(token),
            ValueBuilder::Element(b) => b.add(token),
        }
    }

    pub fn set_more(&mut self) -> bool {
        match self {
            ValueBuilder::Object(b) => b.set_more(),
            ValueBuilder::Array(b) => b.set_more(),
            ValueBuilder::Element(b) => b.set_more(),
        }
    }

    pub fn set_end(&mut self) -> bool {
        match self {
            ValueBuilder::Object(b) => b.set_end(),
            ValueBuilder::Array(b) => b.set_end(),
            ValueBuilder::Element(b) => b.set_end(),
        }
    }

    pub fn build(self) -> ParseResult<Token> {
        match self {
            ValueBuilder::Object(b) => b.build(),
            ValueBuilder::Array(b) => b.build(),
            ValueBuilder::Element(b) => b.build(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ValueBuilder::Object(b) => b.describe(),
            ValueBuilder::Array(b) => b.describe(),
            ValueBuilder::Element(b) => b.describe(),
        }
    }
}
