//! Waiters: suspended multi-step sequences, and the resolutions that
//! continue them.
//!
//! A sequential process that spans several I/O round trips does not block
//! anywhere. Instead each stage leaves a waiter in the state describing
//! what it is waiting for; when a matching event arrives, the waiter's
//! resolution runs the next stage and returns a state with the waiter
//! removed, replaced, or re-armed.

use crate::core::event::Step;
use crate::core::program::Program;

/// One suspended sequence, waiting for a specific future event.
///
/// A waiter holds whatever private data it needs to recognize its awaited
/// event and to continue afterwards: a request id, a file handle, an offset
/// into a larger job.
pub trait Waiter<P: Program> {
    /// Test whether `event` is the one this waiter is waiting for.
    ///
    /// Must be a pure predicate: no side effects, no I/O. Returns the
    /// resolution to run if the event is claimed. The claim borrows the
    /// event, so a resolution copies out whatever event data its
    /// transition needs.
    fn claim(&self, event: &P::Event) -> Option<P::Resolution>;
}

/// A waiter matched with the event it was waiting for.
///
/// Short-lived: the dispatcher invokes `resolve` once and discards the
/// value.
pub trait Resolution<P: Program> {
    /// The pure transition continuing the suspended sequence.
    ///
    /// Responsible for the waiter's lifecycle: return a state without the
    /// waiter if the sequence is complete, or with an updated waiter if it
    /// continues.
    fn resolve(self, state: P::State) -> Step<P>;
}
