//! The write-only conduit effects use to report back to the loop.

use std::sync::mpsc::SyncSender;
use thiserror::Error;

/// The driver loop has terminated and the event was dropped.
///
/// Emitting into a closed sink is the one failure an effect cannot report
/// as an event. Dangling slow effects started before a fatal fault receive
/// this from their next [`EventSink::emit`] and can use it to stop early.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("event sink closed: the driver loop has ended")]
pub struct SinkClosed;

/// Write end of the driver's bounded event channel.
///
/// Every effect execution gets its own handle; all handles feed the single
/// channel the loop reads from. `emit` blocks while the channel is full;
/// events are never dropped to relieve pressure.
pub struct EventSink<E> {
    tx: SyncSender<E>,
}

impl<E> Clone for EventSink<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E> EventSink<E> {
    pub(crate) fn new(tx: SyncSender<E>) -> Self {
        Self { tx }
    }

    /// Push one event into the loop.
    ///
    /// Blocks while the channel is at capacity. Fails only once the driver
    /// loop has terminated; the event is dropped in that case.
    pub fn emit(&self, event: E) -> Result<(), SinkClosed> {
        self.tx.send(event).map_err(|_| SinkClosed)
    }
}
