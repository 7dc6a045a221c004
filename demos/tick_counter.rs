//! Tick Counter
//!
//! The smallest complete waterwheel program: a fast effect asks for a
//! tick, the pure transition counts it, and the program stops itself by
//! setting the fault slot after five ticks.
//!
//! Key concepts:
//! - Pure transitions own all the logic; the effect only emits an event
//! - The fault slot is the loop's single exit path
//! - The journal shows what the driver dispatched
//!
//! Run with: cargo run --example tick_counter

use waterwheel::{
    DriverBuilder, Effect, EffectClass, Event, EventSink, Program, Resolution, SinkClosed, State,
    Step, Waiter,
};

struct Counter;

struct CounterState {
    ticks: u32,
    waiters: Vec<CounterWaiter>,
    fault: Option<CounterFault>,
}

enum CounterEvent {
    Tick,
}

enum CounterEffect {
    RequestTick,
}

enum CounterWaiter {}
enum CounterResolution {}

#[derive(Clone, Debug, PartialEq)]
enum CounterFault {
    Finished(u32),
}

impl Program for Counter {
    type State = CounterState;
    type Event = CounterEvent;
    type Effect = CounterEffect;
    type Waiter = CounterWaiter;
    type Resolution = CounterResolution;
    type Fault = CounterFault;
}

impl State<Counter> for CounterState {
    fn waiters(&self) -> &[CounterWaiter] {
        &self.waiters
    }

    fn fault(&self) -> Option<&CounterFault> {
        self.fault.as_ref()
    }
}

impl Event<Counter> for CounterEvent {
    fn label(&self) -> &str {
        "Tick"
    }

    fn apply(self, mut state: CounterState) -> Step<Counter> {
        state.ticks += 1;
        if state.ticks == 5 {
            state.fault = Some(CounterFault::Finished(state.ticks));
            Step::quiet(state)
        } else {
            Step::new(state, vec![CounterEffect::RequestTick])
        }
    }
}

impl Effect<Counter> for CounterEffect {
    fn label(&self) -> &str {
        "RequestTick"
    }

    fn class(&self) -> EffectClass {
        EffectClass::Fast
    }

    fn perform(self, events: EventSink<CounterEvent>) -> Result<(), SinkClosed> {
        events.emit(CounterEvent::Tick)
    }
}

impl Waiter<Counter> for CounterWaiter {
    fn claim(&self, _event: &CounterEvent) -> Option<CounterResolution> {
        match *self {}
    }
}

impl Resolution<Counter> for CounterResolution {
    fn resolve(self, _state: CounterState) -> Step<Counter> {
        match self {}
    }
}

fn main() {
    println!("=== Tick Counter Example ===\n");

    let mut driver = DriverBuilder::new()
        .journal(true)
        .build()
        .expect("default capacity is valid");

    let fault = driver.run(|| {
        Step::<Counter>::new(
            CounterState {
                ticks: 0,
                waiters: Vec::new(),
                fault: None,
            },
            vec![CounterEffect::RequestTick],
        )
    });

    println!("Loop ended with: {fault:?}");

    let journal = driver.journal().expect("journaling was enabled");
    println!("\nDispatches recorded: {}", journal.len());
    for record in journal.records() {
        println!(
            "  {} -> {:?} ({} new effects)",
            record.event, record.outcome, record.effects
        );
    }

    println!("\n=== Example Complete ===");
}
