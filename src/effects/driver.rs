//! The driver: the single loop that executes effects, collects events, and
//! advances the state.

use crate::core::{
    route, DispatchRecord, Event, Init, Journal, Program, Resolution, Routed, State, Step,
};
use crate::effects::effect::{Effect, EffectClass};
use crate::effects::sink::EventSink;
use chrono::Utc;
use std::sync::mpsc;
use std::thread;

/// Default event channel capacity.
pub const DEFAULT_CAPACITY: usize = 1;

/// Runs a program to completion.
///
/// One driver iteration executes the pending effects (fast ones inline,
/// slow ones on their own threads), blocks until a single event arrives on
/// the shared bounded channel, and dispatches it through the pure routing
/// core. The loop ends only when a transition sets the state's fault slot;
/// the fault is returned to the caller. A program that never faults runs
/// forever.
///
/// The driver has no policy of its own: no retries, no error
/// classification, no reordering. Retry and escalation logic belongs in
/// pure transitions reacting to failure events.
///
/// Construct with [`Driver::new`] for defaults (capacity 1, no journal) or
/// through [`crate::builder::DriverBuilder`]. A fast effect that emits more
/// events than the channel capacity before returning will block the loop on
/// itself; size the capacity for the largest fast-effect batch.
pub struct Driver {
    capacity: usize,
    journaling: bool,
    journal: Option<Journal>,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    /// A driver with default configuration: channel capacity 1, journaling
    /// off.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            journaling: false,
            journal: None,
        }
    }

    pub(crate) fn configured(capacity: usize, journaling: bool) -> Self {
        Self {
            capacity,
            journaling,
            journal: None,
        }
    }

    /// The event channel capacity this driver was configured with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The journal captured by the most recent [`run`](Driver::run).
    ///
    /// `None` until a journaling-enabled run has completed. Replaced on
    /// every run.
    pub fn journal(&self) -> Option<&Journal> {
        self.journal.as_ref()
    }

    /// Run `init`'s program until a transition sets the fault slot.
    ///
    /// `boot` is called once, without I/O; the effects it returns are the
    /// first batch executed. Returns the fault from the final state.
    pub fn run<P, I>(&mut self, init: I) -> P::Fault
    where
        P: Program,
        I: Init<P>,
    {
        let Step {
            mut state,
            mut effects,
        } = init.boot();
        let (tx, rx) = mpsc::sync_channel::<P::Event>(self.capacity);
        let mut journal = self.journaling.then(Journal::new);

        let fault = loop {
            if let Some(fault) = state.fault() {
                tracing::debug!(fault = ?fault, "fault set; driver loop ending");
                break fault.clone();
            }

            for effect in effects {
                let sink = EventSink::new(tx.clone());
                match effect.class() {
                    EffectClass::Fast => {
                        tracing::trace!(effect = effect.label(), "performing fast effect");
                        if effect.perform(sink).is_err() {
                            tracing::debug!("event sink closed during fast effect");
                        }
                    }
                    EffectClass::Slow => {
                        tracing::trace!(effect = effect.label(), "spawning slow effect");
                        thread::spawn(move || {
                            if effect.perform(sink).is_err() {
                                tracing::debug!("event sink closed before slow effect finished");
                            }
                        });
                    }
                }
            }

            let event = match rx.recv() {
                Ok(event) => event,
                // `tx` lives until the loop breaks, so the channel cannot
                // disconnect while the loop is still receiving.
                Err(_) => unreachable!("driver holds a live sender"),
            };
            tracing::trace!(event = event.label(), "event received");

            let label = journal.is_some().then(|| event.label().to_string());
            let routed = route::<P>(state.waiters(), &event);
            let outcome = routed.outcome();
            let step = match routed {
                Routed::Claimed { resolution, .. } => resolution.resolve(state),
                Routed::Unclaimed => event.apply(state),
            };

            if let (Some(journal), Some(event_label)) = (journal.as_mut(), label) {
                *journal = journal.record(DispatchRecord {
                    event: event_label,
                    outcome,
                    effects: step.effects.len(),
                    timestamp: Utc::now(),
                });
            }

            state = step.state;
            effects = step.effects;
        };

        self.journal = journal;
        fault
    }
}

/// Run a program with a default driver.
///
/// ```rust,ignore
/// let fault = waterwheel::run(|| Step::new(initial_state, initial_effects));
/// ```
pub fn run<P, I>(init: I) -> P::Fault
where
    P: Program,
    I: Init<P>,
{
    Driver::new().run(init)
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::builder::DriverBuilder;
    use crate::core::{Outcome, Resolution, Waiter};
    use crate::effects::sink::SinkClosed;

    struct Probe;

    /// What the program observed by the time it finished.
    #[derive(Clone, Debug, PartialEq)]
    struct Summary {
        ticks: u32,
        timeouts: u32,
        replies: Vec<u32>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ProbeFault {
        Done(Summary),
    }

    struct ProbeState {
        ticks: u32,
        timeouts: u32,
        replies: Vec<u32>,
        seen: u32,
        goal: u32,
        waiters: Vec<ProbeWaiter>,
        fault: Option<ProbeFault>,
    }

    #[derive(Debug)]
    enum ProbeEvent {
        Tick,
        Timeout,
        Reply { id: u32 },
    }

    enum ProbeEffect {
        EmitNow(ProbeEvent),
        EmitLater(ProbeEvent),
        EmitBatchLater(Vec<ProbeEvent>),
    }

    /// Awaits a `Reply` carrying a specific id.
    struct ProbeWaiter {
        await_id: u32,
    }

    struct ProbeResolution {
        id: u32,
    }

    impl Program for Probe {
        type State = ProbeState;
        type Event = ProbeEvent;
        type Effect = ProbeEffect;
        type Waiter = ProbeWaiter;
        type Resolution = ProbeResolution;
        type Fault = ProbeFault;
    }

    impl State<Probe> for ProbeState {
        fn waiters(&self) -> &[ProbeWaiter] {
            &self.waiters
        }

        fn fault(&self) -> Option<&ProbeFault> {
            self.fault.as_ref()
        }
    }

    /// Counts the dispatch and faults once the goal is reached.
    fn conclude(mut state: ProbeState) -> Step<Probe> {
        state.seen += 1;
        if state.seen >= state.goal {
            state.fault = Some(ProbeFault::Done(Summary {
                ticks: state.ticks,
                timeouts: state.timeouts,
                replies: state.replies.clone(),
            }));
        }
        Step::quiet(state)
    }

    impl Event<Probe> for ProbeEvent {
        fn label(&self) -> &str {
            match self {
                Self::Tick => "Tick",
                Self::Timeout => "Timeout",
                Self::Reply { .. } => "Reply",
            }
        }

        fn apply(self, mut state: ProbeState) -> Step<Probe> {
            match self {
                Self::Tick => state.ticks += 1,
                Self::Timeout => state.timeouts += 1,
                Self::Reply { id } => state.replies.push(id),
            }
            conclude(state)
        }
    }

    impl Effect<Probe> for ProbeEffect {
        fn label(&self) -> &str {
            match self {
                Self::EmitNow(_) => "EmitNow",
                Self::EmitLater(_) => "EmitLater",
                Self::EmitBatchLater(_) => "EmitBatchLater",
            }
        }

        fn class(&self) -> EffectClass {
            match self {
                Self::EmitNow(_) => EffectClass::Fast,
                Self::EmitLater(_) | Self::EmitBatchLater(_) => EffectClass::Slow,
            }
        }

        fn perform(self, events: EventSink<ProbeEvent>) -> Result<(), SinkClosed> {
            match self {
                Self::EmitNow(event) | Self::EmitLater(event) => events.emit(event),
                Self::EmitBatchLater(batch) => {
                    for event in batch {
                        events.emit(event)?;
                    }
                    Ok(())
                }
            }
        }
    }

    impl Waiter<Probe> for ProbeWaiter {
        fn claim(&self, event: &ProbeEvent) -> Option<ProbeResolution> {
            match event {
                ProbeEvent::Reply { id } if *id == self.await_id => {
                    Some(ProbeResolution { id: *id })
                }
                _ => None,
            }
        }
    }

    impl Resolution<Probe> for ProbeResolution {
        fn resolve(self, mut state: ProbeState) -> Step<Probe> {
            // Claimed replies are marked by the +1000 offset so tests can
            // tell them apart from default-handled ones.
            state.replies.push(self.id + 1000);
            state.waiters.retain(|w| w.await_id != self.id);
            conclude(state)
        }
    }

    fn probe_state(goal: u32, waiters: Vec<ProbeWaiter>) -> ProbeState {
        ProbeState {
            ticks: 0,
            timeouts: 0,
            replies: Vec::new(),
            seen: 0,
            goal,
            waiters,
            fault: None,
        }
    }

    fn summary(fault: ProbeFault) -> Summary {
        match fault {
            ProbeFault::Done(summary) => summary,
        }
    }

    fn journaling_driver(capacity: usize) -> Driver {
        DriverBuilder::new()
            .capacity(capacity)
            .journal(true)
            .build()
            .unwrap()
    }

    #[test]
    fn fast_effect_event_is_dispatched_in_the_first_iteration() {
        let mut driver = journaling_driver(1);
        let fault = driver.run(|| {
            Step::<Probe>::new(
                probe_state(1, Vec::new()),
                vec![ProbeEffect::EmitNow(ProbeEvent::Tick)],
            )
        });

        assert_eq!(summary(fault).ticks, 1);

        let journal = driver.journal().unwrap();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal.records()[0].event, "Tick");
        assert_eq!(journal.records()[0].outcome, Outcome::Defaulted);
        assert_eq!(journal.records()[0].effects, 0, "final step schedules nothing");
    }

    #[test]
    fn unexpected_event_runs_default_and_leaves_waiter_armed() {
        let mut driver = journaling_driver(2);
        let fault = driver.run(|| {
            Step::<Probe>::new(
                probe_state(2, vec![ProbeWaiter { await_id: 9 }]),
                vec![
                    ProbeEffect::EmitNow(ProbeEvent::Timeout),
                    ProbeEffect::EmitNow(ProbeEvent::Reply { id: 9 }),
                ],
            )
        });

        let summary = summary(fault);
        assert_eq!(summary.timeouts, 1, "timeout went through the default path");
        assert_eq!(summary.replies, vec![1009], "reply was claimed by the waiter");

        let outcomes: Vec<&Outcome> = driver
            .journal()
            .unwrap()
            .records()
            .iter()
            .map(|r| &r.outcome)
            .collect();
        assert_eq!(
            outcomes,
            vec![&Outcome::Defaulted, &Outcome::Claimed { waiter: 0 }]
        );
    }

    #[test]
    fn slow_effects_deliver_in_either_order_exactly_once() {
        let fault = run(|| {
            Step::<Probe>::new(
                probe_state(2, Vec::new()),
                vec![
                    ProbeEffect::EmitLater(ProbeEvent::Reply { id: 1 }),
                    ProbeEffect::EmitLater(ProbeEvent::Reply { id: 2 }),
                ],
            )
        });

        let mut replies = summary(fault).replies;
        replies.sort_unstable();
        assert_eq!(replies, vec![1, 2]);
    }

    #[test]
    fn producers_block_rather_than_drop_on_a_full_channel() {
        // Capacity 1 forces the batch producer to block between emits.
        let fault = run(|| {
            Step::<Probe>::new(
                probe_state(3, Vec::new()),
                vec![ProbeEffect::EmitBatchLater(vec![
                    ProbeEvent::Tick,
                    ProbeEvent::Tick,
                    ProbeEvent::Tick,
                ])],
            )
        });

        assert_eq!(summary(fault).ticks, 3);
    }

    #[test]
    fn fast_effects_enqueue_in_effect_list_order() {
        let mut driver = journaling_driver(2);
        driver.run(|| {
            Step::<Probe>::new(
                probe_state(2, Vec::new()),
                vec![
                    ProbeEffect::EmitNow(ProbeEvent::Tick),
                    ProbeEffect::EmitNow(ProbeEvent::Timeout),
                ],
            )
        });

        let events: Vec<&str> = driver
            .journal()
            .unwrap()
            .records()
            .iter()
            .map(|r| r.event.as_str())
            .collect();
        assert_eq!(events, vec!["Tick", "Timeout"]);
    }

    #[test]
    fn loop_returns_after_exactly_the_faulting_dispatch() {
        let mut driver = journaling_driver(1);
        driver.run(|| {
            Step::<Probe>::new(
                probe_state(5, Vec::new()),
                vec![ProbeEffect::EmitBatchLater(vec![
                    ProbeEvent::Tick,
                    ProbeEvent::Tick,
                    ProbeEvent::Tick,
                    ProbeEvent::Tick,
                    ProbeEvent::Tick,
                ])],
            )
        });

        assert_eq!(driver.journal().unwrap().len(), 5);
    }

    #[test]
    fn prefaulted_state_returns_without_dispatching() {
        let mut driver = journaling_driver(1);
        let mut state = probe_state(1, Vec::new());
        state.fault = Some(ProbeFault::Done(Summary {
            ticks: 0,
            timeouts: 0,
            replies: Vec::new(),
        }));

        let fault = driver.run(|| Step::<Probe>::quiet(state));

        assert_eq!(summary(fault).ticks, 0);
        assert!(driver.journal().unwrap().is_empty());
    }

    #[test]
    fn journaling_is_off_by_default() {
        let mut driver = Driver::new();
        driver.run(|| {
            Step::<Probe>::new(
                probe_state(1, Vec::new()),
                vec![ProbeEffect::EmitNow(ProbeEvent::Tick)],
            )
        });

        assert!(driver.journal().is_none());
    }
}
