//! Decoding of string escape sequences
//!
//! String tokens store their raw interior. Decoding puts the quotes back and
//! lets serde_json read the result as a JSON string, so the escape set and
//! surrogate pairing are exactly serde_json's.

use std::fmt;

/// A raw string interior that is not a valid JSON string body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeError {
    raw: String,
    message: String,
}

impl EscapeError {
    /// The interior that failed to decode.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EscapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot decode string \"{}\": {}", self.raw, self.message)
    }
}

impl std::error::Error for EscapeError {}

/// Decode the escape sequences of a raw string interior.
pub fn unescape(raw: &str) -> Result<String, EscapeError> {
    if !raw.contains(['\\', '"']) {
        return Ok(raw.to_string());
    }
    serde_json::from_str::<String>(&format!("\"{}\"", raw)).map_err(|e| EscapeError {
        raw: raw.to_string(),
        message: e.to_string(),
    })
}
