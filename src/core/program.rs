//! The program type family and the initialization seam.

use crate::core::event::{Event, Step};
use crate::core::state::State;
use crate::core::waiter::{Resolution, Waiter};
use crate::effects::Effect;
use std::fmt::Debug;

/// Ties together the types that make up one event-driven program.
///
/// A program defines its state, its inbound events, its outbound effects,
/// its waiters, and its fault type, then implements this trait on a marker
/// type to name the family. Every routing function and the driver are
/// generic over that single parameter.
///
/// Events, effects, and waiters are expected to be enums: one variant per
/// event kind / action / suspended sequence, matched exhaustively inside the
/// trait implementations.
///
/// # Example
///
/// ```rust
/// use waterwheel::{Event, Program, State, Step};
/// # use waterwheel::{Effect, EffectClass, EventSink, Resolution, SinkClosed, Waiter};
///
/// struct Pinger;
///
/// struct PingerState {
///     waiters: Vec<PingerWaiter>,
///     fault: Option<PingerFault>,
/// }
///
/// enum PingerEvent { Pong }
/// enum PingerEffect { SendPing }
/// enum PingerWaiter { AwaitPong }
/// enum PingerResolution { PongArrived }
///
/// #[derive(Clone, Debug)]
/// enum PingerFault { Done }
///
/// impl Program for Pinger {
///     type State = PingerState;
///     type Event = PingerEvent;
///     type Effect = PingerEffect;
///     type Waiter = PingerWaiter;
///     type Resolution = PingerResolution;
///     type Fault = PingerFault;
/// }
/// # impl State<Pinger> for PingerState {
/// #     fn waiters(&self) -> &[PingerWaiter] { &self.waiters }
/// #     fn fault(&self) -> Option<&PingerFault> { self.fault.as_ref() }
/// # }
/// # impl Event<Pinger> for PingerEvent {
/// #     fn label(&self) -> &str { "Pong" }
/// #     fn apply(self, state: PingerState) -> Step<Pinger> { Step::quiet(state) }
/// # }
/// # impl Effect<Pinger> for PingerEffect {
/// #     fn label(&self) -> &str { "SendPing" }
/// #     fn class(&self) -> EffectClass { EffectClass::Fast }
/// #     fn perform(self, events: EventSink<PingerEvent>) -> Result<(), SinkClosed> {
/// #         events.emit(PingerEvent::Pong)
/// #     }
/// # }
/// # impl Waiter<Pinger> for PingerWaiter {
/// #     fn claim(&self, _event: &PingerEvent) -> Option<PingerResolution> {
/// #         Some(PingerResolution::PongArrived)
/// #     }
/// # }
/// # impl Resolution<Pinger> for PingerResolution {
/// #     fn resolve(self, mut state: PingerState) -> Step<Pinger> {
/// #         state.waiters.clear();
/// #         state.fault = Some(PingerFault::Done);
/// #         Step::quiet(state)
/// #     }
/// # }
/// ```
pub trait Program: Sized + 'static {
    /// The single container of all mutable program state.
    type State: State<Self>;

    /// Inbound occurrences from the outside world.
    type Event: Event<Self>;

    /// Outbound actions against the outside world.
    type Effect: Effect<Self>;

    /// Suspended multi-step sequences awaiting a future event.
    type Waiter: Waiter<Self>;

    /// A matched waiter/event pair, ready to transition.
    type Resolution: Resolution<Self>;

    /// The fatal error returned when the driver loop ends. Any fault value
    /// is terminal; there is no severity below fatal.
    type Fault: Clone + Debug + Send + 'static;
}

/// Describes a program's starting point: the initial state and the first
/// batch of effects.
///
/// `boot` must not perform I/O. The returned effects, once executed by the
/// driver, do the first real work.
///
/// Any `FnOnce() -> Step<P>` closure is an initializer:
///
/// ```rust,ignore
/// let fault = waterwheel::run(|| Step::new(initial_state, vec![MyEffect::Listen]));
/// ```
pub trait Init<P: Program> {
    /// Produce the initial state and effect list.
    fn boot(self) -> Step<P>;
}

impl<P, F> Init<P> for F
where
    P: Program,
    F: FnOnce() -> Step<P>,
{
    fn boot(self) -> Step<P> {
        self()
    }
}
