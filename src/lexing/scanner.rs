//! Streaming scanner: characters in, raw token strings out
//!
//! The scanner reads one character at a time and never buffers more than the
//! token it is assembling plus a single look-ahead character. Structural
//! characters are emitted on their own. Anything else accumulates until a
//! boundary: whitespace, or a structural character, outside an open string
//! literal. When a structural character ends a token it is parked in the
//! look-ahead slot and becomes the next token.
//!
//! The scanner decides where tokens end; whether a segment is a valid token
//! is decided by [classification](super::classification).

use super::classification::{is_structural_char, is_token, is_whitespace};
use super::source::{CharStream, Source};
use crate::error::{ParseError, Position};

/// A raw token string and the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub position: Position,
}

impl RawToken {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// Shape of the segment being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Bare,
    OpenString { escaped: bool },
    ClosedString,
}

/// Lazy, finite, non-restartable sequence of raw tokens.
///
/// `next_token` returns `Ok(None)` once the end of input is reached, and keeps
/// doing so. After an error the scanner is finished as well.
pub struct Scanner<I> {
    chars: I,
    lookahead: Option<(char, Position)>,
    line: usize,
    column: usize,
    finished: bool,
}

impl Scanner<CharStream> {
    pub fn from_source(source: Source) -> Self {
        Scanner::new(source.into_chars())
    }
}

impl<I> Scanner<I>
where
    I: Iterator<Item = Result<char, ParseError>>,
{
    pub fn new(chars: I) -> Self {
        Self {
            chars,
            lookahead: None,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Read the next raw token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<RawToken>, ParseError> {
        if self.finished {
            return Ok(None);
        }
        let scanned = self.scan();
        if !matches!(scanned, Ok(Some(_))) {
            self.finished = true;
        }
        scanned
    }

    fn scan(&mut self) -> Result<Option<RawToken>, ParseError> {
        let first = match self.lookahead.take() {
            Some(parked) => Some(parked),
            None => self.skip_whitespace()?,
        };
        let Some((first, position)) = first else {
            return Ok(None);
        };

        if is_structural_char(first) {
            return Ok(Some(RawToken::new(first, position)));
        }

        let mut buffer = String::from(first);
        let mut segment = if first == '"' {
            Segment::OpenString { escaped: false }
        } else {
            Segment::Bare
        };

        let mut boundary = String::from("end of input");
        while let Some((c, at)) = self.read_char()? {
            match segment {
                Segment::OpenString { escaped } => {
                    if (c as u32) < 0x20 {
                        return Err(ParseError::Lexical {
                            message: format!("raw control character {:?} inside string literal", c),
                            position: at,
                        });
                    }
                    buffer.push(c);
                    segment = match (escaped, c) {
                        (false, '\\') => Segment::OpenString { escaped: true },
                        (false, '"') => Segment::ClosedString,
                        _ => Segment::OpenString { escaped: false },
                    };
                }
                Segment::Bare | Segment::ClosedString => {
                    if is_whitespace(c) {
                        boundary = String::from("whitespace");
                        break;
                    }
                    if is_structural_char(c) {
                        boundary = format!("'{}'", c);
                        self.lookahead = Some((c, at));
                        break;
                    }
                    buffer.push(c);
                }
            }
        }

        if let Segment::OpenString { .. } = segment {
            return Err(ParseError::Lexical {
                message: "unterminated string literal".to_string(),
                position,
            });
        }
        if !is_token(&buffer) {
            return Err(ParseError::Lexical {
                message: format!("'{}' is not a complete token before {}", buffer, boundary),
                position,
            });
        }

        log::trace!("scanned {:?} at {}", buffer, position);
        Ok(Some(RawToken::new(buffer, position)))
    }

    fn read_char(&mut self) -> Result<Option<(char, Position)>, ParseError> {
        let Some(c) = self.chars.next().transpose()? else {
            return Ok(None);
        };
        let at = Position::new(self.line, self.column);
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Ok(Some((c, at)))
    }

    fn skip_whitespace(&mut self) -> Result<Option<(char, Position)>, ParseError> {
        loop {
            match self.read_char()? {
                Some((c, _)) if is_whitespace(c) => continue,
                other => return Ok(other),
            }
        }
    }
}

impl<I> Iterator for Scanner<I>
where
    I: Iterator<Item = Result<char, ParseError>>,
{
    type Item = Result<RawToken, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Scan a whole text into raw token strings.
pub fn tokenize(text: &str) -> Result<Vec<String>, ParseError> {
    Scanner::new(text.chars().map(Ok))
        .map(|token| token.map(|t| t.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_structural_and_values() {
        let tokens = tokenize(r#"{"id":"0001","n":1}"#).unwrap();
        assert_eq!(
            tokens,
            vec!["{", r#""id""#, ":", r#""0001""#, ",", r#""n""#, ":", "1", "}"]
        );
    }

    #[test]
    fn test_whitespace_is_skipped() {
        let tokens = tokenize("\n\t[ true ,\r\n null\t]  ").unwrap();
        assert_eq!(tokens, vec!["[", "true", ",", "null", "]"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), Vec::<String>::new());
        assert_eq!(tokenize(" \n\t ").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_spaces_and_structurals_inside_strings() {
        let tokens = tokenize(r#"["a b", "{[:,]}"]"#).unwrap();
        assert_eq!(tokens, vec!["[", r#""a b""#, ",", r#""{[:,]}""#, "]"]);
    }

    #[test]
    fn test_escaped_quotes_and_backslashes() {
        let tokens = tokenize(r#"["say \"hi\", ok", "dir\\"]"#).unwrap();
        assert_eq!(
            tokens,
            vec!["[", r#""say \"hi\", ok""#, ",", r#""dir\\""#, "]"]
        );
    }

    #[test]
    fn test_number_literal_kept_verbatim() {
        let tokens = tokenize("[0.456245355434375E-23]").unwrap();
        assert_eq!(tokens, vec!["[", "0.456245355434375E-23", "]"]);
    }

    #[test]
    fn test_unterminated_string_is_lexical() {
        let err = tokenize(r#""abc"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.position(), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_control_character_in_string_is_lexical() {
        let err = tokenize("[\"a\tb\"]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.position(), Some(Position::new(1, 4)));
    }

    #[test]
    fn test_malformed_boundary_is_lexical() {
        let err = tokenize("[tru]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);

        let err = tokenize("[1.5e]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
    }

    #[test]
    fn test_invalid_segment_at_whitespace() {
        let err = tokenize("[ nul ]").unwrap_err();
        assert_eq!(
            err,
            ParseError::Lexical {
                message: "'nul' is not a complete token before whitespace".into(),
                position: Position::new(1, 3),
            }
        );

        let err = tokenize(r#"["a"b ]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
    }

    #[test]
    fn test_same_kind_whatever_ends_the_segment() {
        for text in ["[1.5e]", "[1.5e ]", "[1.5e", "[1.5e,2]", "[1.5e\n]"] {
            let err = tokenize(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Lexical, "{}", text);
            assert_eq!(err.position(), Some(Position::new(1, 2)), "{}", text);
        }
        assert_eq!(
            tokenize("nope").unwrap_err().to_string(),
            "Lexical error at line 1, column 1: 'nope' is not a complete token before end of input"
        );
    }

    #[test]
    fn test_positions_track_lines() {
        let tokens: Vec<RawToken> = Scanner::new("{\n  \"a\": 1\n}".chars().map(Ok))
            .collect::<Result<_, _>>()
            .unwrap();
        let positions: Vec<_> = tokens.iter().map(|t| (t.position.line, t.position.column)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 3), (2, 6), (2, 8), (3, 1)]);
    }

    #[test]
    fn test_finished_after_end_and_error() {
        let mut scanner = Scanner::new("[]".chars().map(Ok));
        assert!(scanner.next_token().unwrap().is_some());
        assert!(scanner.next_token().unwrap().is_some());
        assert_eq!(scanner.next_token().unwrap(), None);
        assert_eq!(scanner.next_token().unwrap(), None);

        let mut scanner = Scanner::new("[x] [1]".chars().map(Ok));
        assert!(scanner.next_token().unwrap().is_some());
        assert!(scanner.next_token().is_err());
        assert_eq!(scanner.next_token().unwrap(), None);
    }
}
