//! Strategy execution
//!
//! Both strategies drive the same [Scanner] and [TreeBuilder] and therefore
//! produce identical trees and identical errors for identical input. The
//! synchronous strategy is the reference; the concurrent strategy splits the
//! two stages across tasks joined by the handoff queue.

use super::queue::{token_queue, QueueConsumer, QueueProducer};
use crate::building::TreeBuilder;
use crate::error::{ParseError, ParseResult};
use crate::lexing::scanner::Scanner;
use crate::lexing::source::{CharStream, Source};
use crate::token::Token;
use tokio::runtime::{Builder, Handle, Runtime};

/// Alternate scanning and building on the calling thread.
pub fn run_synchronous(source: Source) -> ParseResult<Vec<Token>> {
    let mut scanner = Scanner::from_source(source);
    let mut builder = TreeBuilder::new();
    let mut count = 0usize;
    while let Some(raw) = scanner.next_token()? {
        builder.feed(&raw)?;
        count += 1;
    }
    let roots = builder.finish()?;
    log::debug!("synchronous parse: {} tokens, {} roots", count, roots.len());
    Ok(roots)
}

/// Run the scanner and the builder as two tasks joined by a queue of `capacity`.
///
/// Blocks until both tasks have finished.
pub fn run_concurrent(source: Source, capacity: usize) -> ParseResult<Vec<Token>> {
    with_runtime(move |runtime| {
        runtime.block_on(async move {
            let (producer, consumer) = token_queue(capacity);
            let scanning = tokio::task::spawn_blocking(move || {
                scan_into(Scanner::from_source(source), producer)
            });

            let built = build_from(consumer).await;
            let count = scanning.await.map_err(|e| ParseError::Pipeline {
                message: format!("scanning task failed: {}", e),
            })?;
            let roots = built?;
            log::debug!("concurrent parse: {} tokens, {} roots", count, roots.len());
            Ok(roots)
        })
    })
}

/// Scanning task: push every raw token, then the error that stopped the
/// scanner if any, then mark the queue done.
fn scan_into(mut scanner: Scanner<CharStream>, mut producer: QueueProducer) -> usize {
    loop {
        let item = match scanner.next_token() {
            Ok(Some(raw)) => Ok(raw),
            Ok(None) => break,
            Err(e) => Err(e),
        };
        let failed = item.is_err();
        if !producer.push(item) || failed {
            break;
        }
    }
    let count = producer.pushed();
    producer.finish();
    count
}

/// Building task: feed tokens until the queue is done and drained.
///
/// Returning early drops the consumer, which makes the scanner's next push
/// fail so that it stops as well.
async fn build_from(mut consumer: QueueConsumer) -> ParseResult<Vec<Token>> {
    let mut builder = TreeBuilder::new();
    while let Some(item) = consumer.pop().await {
        builder.feed(&item?)?;
    }
    builder.finish()
}

fn with_runtime<T, F>(task: F) -> ParseResult<T>
where
    F: FnOnce(&Runtime) -> ParseResult<T> + Send,
    T: Send,
{
    let start = || -> ParseResult<T> {
        let runtime = Builder::new_current_thread()
            .build()
            .map_err(|e| ParseError::Pipeline {
                message: format!("cannot start runtime: {}", e),
            })?;
        task(&runtime)
    };

    if Handle::try_current().is_err() {
        return start();
    }
    // Nested runtimes cannot block their parent's worker; host this one on its own thread.
    std::thread::scope(|scope| {
        scope.spawn(start).join().unwrap_or_else(|_| {
            Err(ParseError::Pipeline {
                message: "pipeline thread panicked".to_string(),
            })
        })
    })
}
