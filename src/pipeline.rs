//! Parser façade
//!
//! [Parser] picks a strategy from its [ParserConfig] and owns nothing else:
//! every call gets a fresh scanner, queue and builder, so one parser may be
//! shared freely between threads.
//!
//!     queue       bounded handoff between the scanning and building tasks
//!     executor    the synchronous and concurrent strategies

pub mod executor;
pub mod queue;

use crate::config::{ParserConfig, Strategy};
use crate::error::ParseResult;
use crate::lexing::source::Source;
use crate::token::Token;

#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Shorthand for [ParserConfig::multithreaded].
    pub fn multithreaded(multithreaded: bool) -> Self {
        Self::new(ParserConfig::multithreaded(multithreaded))
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse every root composite in `source`, in source order.
    pub fn parse(&self, source: impl Into<Source>) -> ParseResult<Vec<Token>> {
        self.config.validate()?;
        let source = source.into();
        log::debug!("parsing {:?} with {:?} strategy", source, self.config.strategy);
        match self.config.strategy {
            Strategy::Synchronous => executor::run_synchronous(source),
            Strategy::Concurrent => executor::run_concurrent(source, self.config.queue_capacity),
        }
    }
}

/// Parse text with the default configuration.
pub fn parse(text: &str) -> ParseResult<Vec<Token>> {
    Parser::default().parse(text)
}

pub fn parse_with(source: impl Into<Source>, config: &ParserConfig) -> ParseResult<Vec<Token>> {
    Parser::new(config.clone()).parse(source)
}
