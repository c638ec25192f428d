//! Character sources for the scanner
//!
//! A [Source] owns its input so that it can be moved onto the scanning task
//! of the concurrent pipeline. It is turned into a [CharStream], a
//! one-shot iterator of characters where I/O and UTF-8 decoding failures
//! surface as [ParseError::Input].

use crate::error::ParseError;
use std::fmt;
use std::io::{self, BufReader, ErrorKind, Read};

/// Input for a parse: in-memory text, a byte stream, or a character stream.
pub struct Source {
    inner: SourceInner,
}

enum SourceInner {
    Text(String),
    Reader(Box<dyn Read + Send>),
    Chars(Box<dyn Iterator<Item = char> + Send>),
}

impl Source {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            inner: SourceInner::Text(text.into()),
        }
    }

    /// A byte stream decoded as UTF-8.
    pub fn reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            inner: SourceInner::Reader(Box::new(reader)),
        }
    }

    pub fn chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
        I::IntoIter: Send + 'static,
    {
        Self {
            inner: SourceInner::Chars(Box::new(chars.into_iter())),
        }
    }

    pub fn into_chars(self) -> CharStream {
        match self.inner {
            SourceInner::Text(text) => CharStream::new(TextChars { text, offset: 0 }),
            SourceInner::Reader(reader) => CharStream::new(Utf8Chars::new(reader)),
            SourceInner::Chars(chars) => CharStream::new(chars.map(Ok)),
        }
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::text(text)
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::text(text)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            SourceInner::Text(text) => write!(f, "Source::Text({} bytes)", text.len()),
            SourceInner::Reader(_) => write!(f, "Source::Reader"),
            SourceInner::Chars(_) => write!(f, "Source::Chars"),
        }
    }
}

/// Sendable, non-restartable stream of decoded characters.
pub struct CharStream {
    chars: Box<dyn Iterator<Item = Result<char, ParseError>> + Send>,
}

impl CharStream {
    fn new(chars: impl Iterator<Item = Result<char, ParseError>> + Send + 'static) -> Self {
        Self {
            chars: Box::new(chars),
        }
    }
}

impl Iterator for CharStream {
    type Item = Result<char, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chars.next()
    }
}

struct TextChars {
    text: String,
    offset: usize,
}

impl Iterator for TextChars {
    type Item = Result<char, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.text[self.offset..].chars().next()?;
        self.offset += c.len_utf8();
        Some(Ok(c))
    }
}

/// Incremental UTF-8 decoder over a byte stream.
struct Utf8Chars<R> {
    reader: BufReader<R>,
    failed: bool,
}

impl<R: Read> Utf8Chars<R> {
    fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            failed: false,
        }
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let mut buf = [0u8; 4];
        loop {
            match self.reader.read(&mut buf[..1]) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        let width = match buf[0] {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            byte => {
                return Err(io::Error::new(
                    ErrorKind::InvalidData,
                    format!("invalid UTF-8 lead byte 0x{:02X}", byte),
                ))
            }
        };
        self.reader.read_exact(&mut buf[1..width])?;

        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| io::Error::new(ErrorKind::InvalidData, "invalid UTF-8 sequence"))
    }
}

impl<R: Read> Iterator for Utf8Chars<R> {
    type Item = Result<char, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_char() {
            Ok(c) => c.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(ParseError::Input {
                    message: e.to_string(),
                }))
            }
        }
    }
}
