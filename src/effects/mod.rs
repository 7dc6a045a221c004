//! The imperative shell: effect execution, the event conduit, and the
//! driver loop.
//!
//! This is the only part of the crate that performs I/O-adjacent work:
//! spawning threads, blocking on the event channel, stamping journal
//! timestamps. Everything it runs between those points is pure.

mod driver;
mod effect;
mod sink;

pub use driver::{run, Driver, DEFAULT_CAPACITY};
pub use effect::{Effect, EffectClass};
pub use sink::{EventSink, SinkClosed};
