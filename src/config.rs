//! Parse configuration
//!
//! The parser reads two settings: which [Strategy] schedules scanning and
//! building, and how far the scanner may run ahead of the builder. They come
//! from [ParserConfig::default], or from a [Loader] that starts at
//! `defaults/stackjson.default.toml` (kept equal to the `Default` impl) and
//! stacks TOML files, inline TOML and single-key overrides on top.

use crate::error::{ParseError, ParseResult};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/stackjson.default.toml");

/// How scanning and building are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// One context alternates scanning and building, token by token.
    Synchronous,
    /// A scanning task and a building task joined by a bounded queue.
    #[default]
    Concurrent,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ParserConfig {
    pub strategy: Strategy,
    /// Raw tokens the scanner may run ahead of the builder.
    pub queue_capacity: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            queue_capacity: 256,
        }
    }
}

impl ParserConfig {
    /// Concurrent when `multithreaded`, synchronous otherwise.
    pub fn multithreaded(multithreaded: bool) -> Self {
        let strategy = if multithreaded {
            Strategy::Concurrent
        } else {
            Strategy::Synchronous
        };
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn is_multithreaded(&self) -> bool {
        self.strategy == Strategy::Concurrent
    }

    pub fn validate(&self) -> ParseResult<()> {
        if self.queue_capacity == 0 {
            return Err(ParseError::Pipeline {
                message: "queue capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Layered source of a [ParserConfig].
///
/// Layers apply in the order they are added, later ones winning, on top of
/// the embedded defaults. The result is validated before it is returned.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_file(path.as_ref(), true)
    }

    /// Layer a TOML file if it exists, e.g. a per-project `stackjson.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_file(path.as_ref(), false)
    }

    /// Layer a TOML document held in memory.
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Force one key, e.g. `("queue-capacity", 16)`, over every layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ParserConfig, ConfigError> {
        let parser_config: ParserConfig = self.builder.build()?.try_deserialize()?;
        parser_config
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(parser_config)
    }

    fn layer_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults, validated.
pub fn load_defaults() -> Result<ParserConfig, ConfigError> {
    Loader::new().build()
}
