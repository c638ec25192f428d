//! Incremental tree building
//!
//! [TreeBuilder] is a stack machine fed one raw token at a time. Opening
//! brackets push a builder, values are delivered to the builder on top, and
//! every close (or completed element) triggers a reduce that folds finished
//! builders into their parents. No token list is ever buffered: the stack
//! only holds the composites that are still open, plus finished roots.
//!
//!     builders    per-composite partial builders and the stack entry type

pub mod builders;

use crate::error::{ParseError, ParseResult};
use crate::lexing::classification::{classify, leaf_token, Structural, TokenKind};
use crate::lexing::scanner::RawToken;
use crate::token::Token;
use builders::{ArrayBuilder, ElementBuilder, ObjectBuilder, ValueBuilder};

/// The builder stack machine.
///
/// Owned by exactly one execution context for the duration of a parse.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<ValueBuilder>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of builders on the stack, finished roots included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn reset(&mut self) {
        self.stack.clear();
    }

    /// Classify a raw token and apply it. Errors are tagged with the token's position.
    pub fn feed(&mut self, raw: &RawToken) -> ParseResult<()> {
        let kind = classify(&raw.text);
        let result = match kind {
            TokenKind::Structural(event) => self.apply(event),
            TokenKind::Invalid => {
                return Err(ParseError::InvalidToken {
                    text: raw.text.clone(),
                    position: raw.position,
                })
            }
            _ => match leaf_token(kind, &raw.text) {
                Some(token) => self.add_value(token),
                None => Err(self.syntax(format!("'{}' is not a value", raw.text))),
            },
        };
        result.map_err(|e| e.at(raw.position))
    }

    /// Apply a structural event to the top of the stack.
    pub fn apply(&mut self, event: Structural) -> ParseResult<()> {
        match event {
            Structural::ArrayStart => {
                self.open_slot(event)?;
                self.stack.push(ValueBuilder::Array(ArrayBuilder::new()));
                Ok(())
            }
            Structural::ObjectStart => {
                self.open_slot(event)?;
                self.stack.push(ValueBuilder::Object(ObjectBuilder::new()));
                Ok(())
            }
            Structural::ArrayEnd => {
                let closed = match self.stack.last_mut() {
                    Some(ValueBuilder::Array(array)) => array.set_end(),
                    _ => false,
                };
                if !closed {
                    return Err(self.syntax("unexpected ']'"));
                }
                self.reduce()
            }
            Structural::ObjectEnd => {
                let closed = match self.stack.last_mut() {
                    Some(ValueBuilder::Object(object)) => object.set_end(),
                    _ => false,
                };
                if !closed {
                    return Err(self.syntax("unexpected '}'"));
                }
                self.reduce()
            }
            Structural::MoreValue => {
                let accepted = match self.stack.last_mut() {
                    Some(ValueBuilder::Array(array)) => array.set_more(),
                    Some(ValueBuilder::Object(object)) => object.set_more(),
                    _ => false,
                };
                if !accepted {
                    return Err(self.syntax("unexpected ','"));
                }
                Ok(())
            }
            Structural::ElementPair => {
                let accepted = match self.stack.last_mut() {
                    Some(ValueBuilder::Element(element)) => element.set_more(),
                    _ => false,
                };
                if !accepted {
                    return Err(self.syntax("unexpected ':'"));
                }
                Ok(())
            }
        }
    }

    /// Deliver a value token (leaf or reduced composite) to the top of the stack.
    pub fn add_value(&mut self, token: Token) -> ParseResult<()> {
        let kind = token.kind_name();
        let Some(mut top) = self.stack.pop() else {
            return Err(self.syntax(format!("{} outside of any object or array", kind)));
        };
        if top.is_done() {
            self.stack.push(top);
            return Err(self.syntax(format!("{} after a complete value", kind)));
        }

        match top {
            ValueBuilder::Object(_) => {
                let ready = top.ready_for_more();
                self.stack.push(top);
                if !ready {
                    return Err(self.syntax(format!("expected ',' or '}}' before {}", kind)));
                }
                let mut element = ElementBuilder::new();
                if !element.add(token) {
                    return Err(self.syntax(format!("object member name must be a string, found {}", kind)));
                }
                self.stack.push(ValueBuilder::Element(element));
                Ok(())
            }
            ValueBuilder::Array(_) => {
                let accepted = top.add(token);
                self.stack.push(top);
                if !accepted {
                    return Err(self.syntax(format!("expected ',' or ']' before {}", kind)));
                }
                Ok(())
            }
            ValueBuilder::Element(_) => {
                let accepted = top.add(token);
                self.stack.push(top);
                if !accepted {
                    return Err(self.syntax(format!("expected ':' before {}", kind)));
                }
                self.reduce()
            }
        }
    }

    /// Close the parse: every builder on the stack must be a finished root.
    ///
    /// Returns the roots in source order and leaves the builder empty.
    pub fn finish(&mut self) -> ParseResult<Vec<Token>> {
        if self.stack.iter().any(|builder| !builder.is_done()) {
            let err = self.syntax("unexpected end of input");
            self.stack.clear();
            return Err(err);
        }
        std::mem::take(&mut self.stack)
            .into_iter()
            .map(ValueBuilder::build)
            .collect()
    }

    /// Fold finished builders into their parents while that is legal.
    fn reduce(&mut self) -> ParseResult<()> {
        while self.stack.last().map_or(false, ValueBuilder::is_done) {
            if self.stack.len() == 1 {
                break;
            }
            let Some(done) = self.stack.pop() else {
                break;
            };
            if self.stack.last().map_or(true, ValueBuilder::is_done) {
                self.stack.push(done);
                break;
            }

            let token = done.build()?;
            log::trace!("reduce: folding {} at depth {}", token.kind_name(), self.stack.len());
            let kind = token.kind_name();
            let accepted = match self.stack.last_mut() {
                Some(parent) => parent.add(token),
                None => false,
            };
            if !accepted {
                return Err(self.syntax(format!("{} cannot be added here", kind)));
            }
        }
        Ok(())
    }

    /// A composite may open on an empty stack, after a finished root, or
    /// wherever the top accepts a value.
    fn open_slot(&self, event: Structural) -> ParseResult<()> {
        match self.stack.last() {
            None => Ok(()),
            Some(top) if top.is_done() || top.accepts_value() => Ok(()),
            Some(_) => Err(self.syntax(format!("unexpected '{}'", event.as_char()))),
        }
    }

    fn syntax(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            message: message.into(),
            position: None,
            depth: self.stack.len(),
            states: self.stack.iter().map(ValueBuilder::describe).collect(),
        }
    }
}
