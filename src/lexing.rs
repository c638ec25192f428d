//! Lexing: from characters to classified raw tokens
//!
//!     source          owned character sources (text, byte stream, char stream)
//!     scanner         boundary detection with one character of look-ahead
//!     classification  pure predicates deciding what a raw token string is

pub mod classification;
pub mod scanner;
pub mod source;

pub use classification::{classify, Structural, TokenKind};
pub use scanner::{tokenize, RawToken, Scanner};
pub use source::{CharStream, Source};
