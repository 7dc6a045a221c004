//! Pure event routing: waiter resolution first, default handling second.

use crate::core::event::{Event, Step};
use crate::core::journal::Outcome;
use crate::core::program::Program;
use crate::core::state::State;
use crate::core::waiter::{Resolution, Waiter};

/// The routing decision for one event.
pub enum Routed<P: Program> {
    /// A waiter claimed the event. `index` is its position in the waiter
    /// list at dispatch time.
    Claimed {
        /// Position of the claiming waiter.
        index: usize,
        /// The transition to run.
        resolution: P::Resolution,
    },
    /// No waiter claimed the event; its default transition applies.
    Unclaimed,
}

impl<P: Program> Routed<P> {
    /// The journal-facing summary of this decision.
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Claimed { index, .. } => Outcome::Claimed { waiter: *index },
            Self::Unclaimed => Outcome::Defaulted,
        }
    }
}

/// Offer `event` to each waiter in stored order; first claim wins.
///
/// Waiters after the first claim are not consulted. Pure: same inputs,
/// same decision, no side effects.
pub fn route<P: Program>(waiters: &[P::Waiter], event: &P::Event) -> Routed<P> {
    for (index, waiter) in waiters.iter().enumerate() {
        if let Some(resolution) = waiter.claim(event) {
            return Routed::Claimed { index, resolution };
        }
    }
    Routed::Unclaimed
}

/// Route one event and run the chosen transition.
///
/// A claimed event always goes to its waiter's resolution, even when its
/// default transition could also handle it. An unclaimed event runs its own
/// `apply`. Pure and total: never performs I/O, never blocks, and never
/// fails: transitions signal fatal conditions only through the fault slot
/// of the state they return.
pub fn dispatch<P: Program>(state: P::State, event: P::Event) -> Step<P> {
    match route::<P>(state.waiters(), &event) {
        Routed::Claimed { resolution, .. } => resolution.resolve(state),
        Routed::Unclaimed => event.apply(state),
    }
}
