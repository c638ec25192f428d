//! # stackjson
//!
//! A JSON parser built from a streaming scanner and an incremental builder
//! stack machine.
//!
//! Parsing happens in two stages:
//!
//!     Source ──> Scanner ──raw tokens──> TreeBuilder ──> Vec<Token>
//!
//! The [scanner](lexing::scanner) cuts characters into raw token strings with
//! a single character of look-ahead. The [builder](building::TreeBuilder)
//! classifies each raw token and folds it into a stack of partial
//! composites, so the whole token list is never held in memory. The two
//! stages either alternate on the calling thread or run as two tasks joined
//! by a bounded queue; see [Strategy].
//!
//! Leaf values keep their source text: numbers are never converted to a
//! machine float and strings keep their escapes. Trees render back to text in
//! a compact single-line form (`Display`) or an indented form
//! ([Token::to_indented_string]).
//!
//! ## Example
//!
//!     let roots = stackjson::parse(r#"{"id":"0001","n":1}"#)?;
//!     assert_eq!(roots[0].to_string(), r#"{ "id": "0001", "n": 1 }"#);

pub mod building;
pub mod config;
pub mod error;
pub mod lexing;
pub mod pipeline;
pub mod token;

pub use config::{Loader, ParserConfig, Strategy};
pub use error::{ErrorKind, ParseError, ParseResult, Position};
pub use lexing::source::Source;
pub use pipeline::{parse, parse_with, Parser};
pub use token::{Element, Token};
