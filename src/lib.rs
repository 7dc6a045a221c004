//! Waterwheel: a pure functional event loop.
//!
//! Waterwheel structures event-driven programs so that most of the logic
//! lives in pure functions, that is, functions that perform no I/O and are easy to
//! test, while the I/O itself is pushed to the edges.
//!
//! Three ideas carry the whole design:
//!
//! 1. **All program state lives in one value.** Transitions take the state
//!    by argument and return the next state; nothing mutates it from the
//!    side.
//! 2. **I/O is described, not performed, by the logic.** Transitions return
//!    [`Effect`] descriptions; the [`Driver`] executes them and feeds every
//!    result back through a single bounded event channel.
//! 3. **Sequential I/O is a data structure.** A multi-step process leaves a
//!    [`Waiter`] in the state; when its awaited event arrives, the waiter's
//!    [`Resolution`] runs the next step.
//!
//! # Core Concepts
//!
//! - **[`Program`]**: the type family (state, events, effects, waiters,
//!   fault) naming one program
//! - **[`dispatch`]**: pure routing: waiters first, in order, first claim
//!   wins; otherwise the event's own transition
//! - **[`Driver`]**: the loop: run effects, block for one event, dispatch,
//!   repeat until the fault slot is set
//! - **[`Journal`]**: optional immutable record of every dispatch
//!
//! # Example
//!
//! A program that asks for clock ticks and stops after three:
//!
//! ```rust
//! use waterwheel::{
//!     run, Effect, EffectClass, Event, EventSink, Program, Resolution, SinkClosed, State, Step,
//!     Waiter,
//! };
//!
//! struct Counter;
//!
//! struct CounterState {
//!     ticks: u32,
//!     waiters: Vec<CounterWaiter>,
//!     fault: Option<CounterFault>,
//! }
//!
//! enum CounterEvent {
//!     Tick,
//! }
//!
//! enum CounterEffect {
//!     RequestTick,
//! }
//!
//! enum CounterWaiter {}
//! enum CounterResolution {}
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum CounterFault {
//!     Finished(u32),
//! }
//!
//! impl Program for Counter {
//!     type State = CounterState;
//!     type Event = CounterEvent;
//!     type Effect = CounterEffect;
//!     type Waiter = CounterWaiter;
//!     type Resolution = CounterResolution;
//!     type Fault = CounterFault;
//! }
//!
//! impl State<Counter> for CounterState {
//!     fn waiters(&self) -> &[CounterWaiter] {
//!         &self.waiters
//!     }
//!
//!     fn fault(&self) -> Option<&CounterFault> {
//!         self.fault.as_ref()
//!     }
//! }
//!
//! impl Event<Counter> for CounterEvent {
//!     fn label(&self) -> &str {
//!         "Tick"
//!     }
//!
//!     fn apply(self, mut state: CounterState) -> Step<Counter> {
//!         state.ticks += 1;
//!         if state.ticks == 3 {
//!             state.fault = Some(CounterFault::Finished(state.ticks));
//!             Step::quiet(state)
//!         } else {
//!             Step::new(state, vec![CounterEffect::RequestTick])
//!         }
//!     }
//! }
//!
//! impl Effect<Counter> for CounterEffect {
//!     fn label(&self) -> &str {
//!         "RequestTick"
//!     }
//!
//!     fn class(&self) -> EffectClass {
//!         EffectClass::Fast
//!     }
//!
//!     fn perform(self, events: EventSink<CounterEvent>) -> Result<(), SinkClosed> {
//!         events.emit(CounterEvent::Tick)
//!     }
//! }
//!
//! impl Waiter<Counter> for CounterWaiter {
//!     fn claim(&self, _event: &CounterEvent) -> Option<CounterResolution> {
//!         match *self {}
//!     }
//! }
//!
//! impl Resolution<Counter> for CounterResolution {
//!     fn resolve(self, _state: CounterState) -> Step<Counter> {
//!         match self {}
//!     }
//! }
//!
//! let fault = run(|| {
//!     Step::<Counter>::new(
//!         CounterState {
//!             ticks: 0,
//!             waiters: Vec::new(),
//!             fault: None,
//!         },
//!         vec![CounterEffect::RequestTick],
//!     )
//! });
//!
//! assert_eq!(fault, CounterFault::Finished(3));
//! ```

pub mod builder;
pub mod core;
pub mod effects;

// Re-export commonly used types
pub use crate::core::{
    dispatch, route, DispatchRecord, Event, Init, Journal, Outcome, Program, Resolution, Routed,
    State, Step, Waiter,
};
pub use builder::{BuildError, DriverBuilder};
pub use effects::{run, Driver, Effect, EffectClass, EventSink, SinkClosed, DEFAULT_CAPACITY};
