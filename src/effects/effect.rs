//! Outbound effects: descriptions of I/O actions and their scheduling
//! class.

use crate::core::Program;
use crate::effects::sink::{EventSink, SinkClosed};
use serde::{Deserialize, Serialize};

/// Whether an effect runs inline on the loop thread or on its own thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectClass {
    /// Cheap, bounded-latency actions (reading a clock, handing a value to
    /// an in-process channel). Run synchronously on the loop thread; the
    /// loop does not advance until they return.
    Fast,
    /// Actions with unbounded or blocking latency (network, file system,
    /// timers). Run on their own thread; the loop never waits for them.
    Slow,
}

impl EffectClass {
    /// True for `Fast`.
    pub fn is_fast(self) -> bool {
        matches!(self, Self::Fast)
    }
}

/// One action to perform against the outside world.
///
/// Effects are immutable descriptions produced by pure transitions and
/// consumed exactly once by the driver, in the iteration they were
/// produced. Keep `perform` implementations as short as possible and let
/// pure transitions hold the logic: an effect reads or writes, turns what
/// happened into events, and nothing more.
///
/// Failures are not returned: an effect that fails reports the failure as
/// an event (for pure logic to decide on retries or escalation). The only
/// error `perform` can surface is [`SinkClosed`], meaning the driver loop
/// has already terminated and nobody is listening.
pub trait Effect<P: Program>: Send + 'static {
    /// A short display name for logs, typically the variant name.
    fn label(&self) -> &str;

    /// How the driver schedules this effect.
    fn class(&self) -> EffectClass;

    /// Execute the action, emitting any resulting events into `events`.
    ///
    /// Runs on the loop thread for `Fast` effects and on a dedicated
    /// thread for `Slow` ones. With a full channel, `emit` blocks until
    /// the loop catches up; slow effects must tolerate that backpressure
    /// indefinitely.
    fn perform(self, events: EventSink<P::Event>) -> Result<(), SinkClosed>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_reports_fast() {
        assert!(EffectClass::Fast.is_fast());
        assert!(!EffectClass::Slow.is_fast());
    }

    #[test]
    fn class_serializes_round_trip() {
        let json = serde_json::to_string(&EffectClass::Slow).unwrap();
        let back: EffectClass = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EffectClass::Slow);
    }
}
