//! Bounded FIFO handoff between the scanning and the building task
//!
//! A thin wrapper over a bounded `tokio::sync::mpsc` channel. Dropping (or
//! [finishing](QueueProducer::finish)) the producer is the one-way "done"
//! transition: the consumer keeps receiving what was already queued and then
//! sees `None`. Scanner failures travel through the queue as items, so the
//! consumer observes them in stream order.

use crate::error::ParseResult;
use crate::lexing::scanner::RawToken;
use tokio::sync::mpsc;

/// One queued unit: a raw token, or the error that ended scanning.
pub type QueueItem = ParseResult<RawToken>;

/// Create a queue holding at most `capacity` items (at least one).
pub fn token_queue(capacity: usize) -> (QueueProducer, QueueConsumer) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (QueueProducer { tx, pushed: 0 }, QueueConsumer { rx, popped: 0 })
}

/// Producing half, owned by the scanning task.
#[derive(Debug)]
pub struct QueueProducer {
    tx: mpsc::Sender<QueueItem>,
    pushed: usize,
}

impl QueueProducer {
    /// Push from a synchronous context, waiting while the queue is full.
    ///
    /// Returns `false` once the consumer has gone away. Must not be called
    /// from inside an async task.
    pub fn push(&mut self, item: QueueItem) -> bool {
        let sent = self.tx.blocking_send(item).is_ok();
        self.pushed += sent as usize;
        sent
    }

    /// Push from an async context.
    pub async fn send(&mut self, item: QueueItem) -> bool {
        let sent = self.tx.send(item).await.is_ok();
        self.pushed += sent as usize;
        sent
    }

    /// The consumer stopped listening; further pushes are dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub fn pushed(&self) -> usize {
        self.pushed
    }

    /// Mark the stream done. Items already queued stay available.
    pub fn finish(self) {
        log::trace!("queue: producer done after {} items", self.pushed);
    }
}

/// Consuming half, owned by the building task.
#[derive(Debug)]
pub struct QueueConsumer {
    rx: mpsc::Receiver<QueueItem>,
    popped: usize,
}

impl QueueConsumer {
    /// Wait for the next item; `None` once the producer is done and the queue drained.
    pub async fn pop(&mut self) -> Option<QueueItem> {
        let item = self.rx.recv().await;
        self.popped += item.is_some() as usize;
        item
    }

    /// Blocking variant of [pop](Self::pop) for synchronous consumers.
    pub fn blocking_pop(&mut self) -> Option<QueueItem> {
        let item = self.rx.blocking_recv();
        self.popped += item.is_some() as usize;
        item
    }

    /// Stop accepting items. Already queued items can still be popped.
    pub fn close(&mut self) {
        self.rx.close();
    }

    pub fn popped(&self) -> usize {
        self.popped
    }
}
