//! Error types for scanning, classification and tree building
//!
//! Every failure is fatal to the parse call that produced it: there are no
//! partial trees and no recovery. Errors carry enough context (source
//! position, builder stack) to diagnose the offending input.

use std::fmt;

/// A 1-based location in the character source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Coarse classification of a [`ParseError`], handy for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    InvalidToken,
    Syntax,
    BuildContract,
    Input,
    Pipeline,
}

/// Errors that can occur while parsing a JSON source
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Malformed token boundary while scanning
    Lexical { message: String, position: Position },
    /// Raw text handed to the builder that matches no token grammar
    InvalidToken { text: String, position: Position },
    /// Illegal event for the builder stack, or an incomplete stack at end of input
    Syntax {
        message: String,
        position: Option<Position>,
        depth: usize,
        states: Vec<String>,
    },
    /// `build()` was invoked on a builder whose grammar is not satisfied
    BuildContract { message: String },
    /// The character source could not be read or decoded
    Input { message: String },
    /// The concurrent pipeline failed to start or one of its tasks died
    Pipeline { message: String },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lexical { .. } => ErrorKind::Lexical,
            ParseError::InvalidToken { .. } => ErrorKind::InvalidToken,
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::BuildContract { .. } => ErrorKind::BuildContract,
            ParseError::Input { .. } => ErrorKind::Input,
            ParseError::Pipeline { .. } => ErrorKind::Pipeline,
        }
    }

    /// Attach a source position to a syntax error that does not have one yet.
    pub fn at(self, at: Position) -> Self {
        match self {
            ParseError::Syntax {
                message,
                position: None,
                depth,
                states,
            } => ParseError::Syntax {
                message,
                position: Some(at),
                depth,
                states,
            },
            other => other,
        }
    }

    /// The source position of the error, when one is known.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Lexical { position, .. } | ParseError::InvalidToken { position, .. } => {
                Some(*position)
            }
            ParseError::Syntax { position, .. } => *position,
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lexical { message, position } => {
                write!(f, "Lexical error at {}: {}", position, message)
            }
            ParseError::InvalidToken { text, position } => {
                write!(f, "Invalid token '{}' at {}", text, position)
            }
            ParseError::Syntax {
                message,
                position,
                depth,
                states,
            } => {
                write!(f, "Syntax error")?;
                if let Some(position) = position {
                    write!(f, " at {}", position)?;
                }
                write!(f, ": {} (stack depth {}", message, depth)?;
                if !states.is_empty() {
                    write!(f, ": {}", states.join(" > "))?;
                }
                write!(f, ")")
            }
            ParseError::BuildContract { message } => write!(f, "Build contract violated: {}", message),
            ParseError::Input { message } => write!(f, "Input error: {}", message),
            ParseError::Pipeline { message } => write!(f, "Pipeline error: {}", message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Result alias used throughout the crate
pub type ParseResult<T> = Result<T, ParseError>;
