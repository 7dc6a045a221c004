//! Flaky Fetch
//!
//! A multi-step sequence: send a request, wait for its response, retry on
//! failure. The retry policy lives entirely in pure logic; the slow
//! effect only simulates the network and reports what happened as events.
//!
//! Key concepts:
//! - A waiter suspends the sequence between request and response
//! - Slow effects run on their own threads and report back via the sink
//! - Retry counting and escalation are state, not driver policy
//!
//! Run with: RUST_LOG=waterwheel=trace cargo run --example flaky_fetch

use std::thread;
use std::time::Duration;
use waterwheel::{
    run, Effect, EffectClass, Event, EventSink, Program, Resolution, SinkClosed, State, Step,
    Waiter,
};

const MAX_ATTEMPTS: u32 = 3;

struct Fetcher;

struct FetcherState {
    attempts: u32,
    waiters: Vec<FetcherWaiter>,
    fault: Option<FetchOutcome>,
}

enum FetcherEvent {
    Response {
        request: u32,
        result: Result<String, String>,
    },
}

enum FetcherEffect {
    SendRequest { request: u32, attempt: u32 },
}

enum FetcherWaiter {
    AwaitResponse { request: u32 },
}

enum FetcherResolution {
    Respond {
        request: u32,
        result: Result<String, String>,
    },
}

/// The loop's exit value: success and giving up both end the program.
#[derive(Clone, Debug)]
enum FetchOutcome {
    Fetched { body: String, attempts: u32 },
    GaveUp { attempts: u32 },
}

impl Program for Fetcher {
    type State = FetcherState;
    type Event = FetcherEvent;
    type Effect = FetcherEffect;
    type Waiter = FetcherWaiter;
    type Resolution = FetcherResolution;
    type Fault = FetchOutcome;
}

impl State<Fetcher> for FetcherState {
    fn waiters(&self) -> &[FetcherWaiter] {
        &self.waiters
    }

    fn fault(&self) -> Option<&FetchOutcome> {
        self.fault.as_ref()
    }
}

impl Event<Fetcher> for FetcherEvent {
    fn label(&self) -> &str {
        "Response"
    }

    fn apply(self, state: FetcherState) -> Step<Fetcher> {
        // A response nobody is waiting for belongs to an abandoned
        // sequence; drop it.
        Step::quiet(state)
    }
}

impl Effect<Fetcher> for FetcherEffect {
    fn label(&self) -> &str {
        "SendRequest"
    }

    fn class(&self) -> EffectClass {
        EffectClass::Slow
    }

    fn perform(self, events: EventSink<FetcherEvent>) -> Result<(), SinkClosed> {
        let Self::SendRequest { request, attempt } = self;

        // Simulated network: slow, and only the third attempt succeeds.
        thread::sleep(Duration::from_millis(50));
        let result = if attempt < 3 {
            Err(format!("connection reset on attempt {attempt}"))
        } else {
            Ok("<html>hello</html>".to_string())
        };

        events.emit(FetcherEvent::Response { request, result })
    }
}

impl Waiter<Fetcher> for FetcherWaiter {
    fn claim(&self, event: &FetcherEvent) -> Option<FetcherResolution> {
        let Self::AwaitResponse { request } = self;
        let FetcherEvent::Response {
            request: responded,
            result,
        } = event;
        if responded == request {
            Some(FetcherResolution::Respond {
                request: *request,
                result: result.clone(),
            })
        } else {
            None
        }
    }
}

impl Resolution<Fetcher> for FetcherResolution {
    fn resolve(self, mut state: FetcherState) -> Step<Fetcher> {
        let Self::Respond { request, result } = self;
        state.attempts += 1;

        match result {
            Ok(body) => {
                state.waiters.clear();
                state.fault = Some(FetchOutcome::Fetched {
                    body,
                    attempts: state.attempts,
                });
                Step::quiet(state)
            }
            Err(_) if state.attempts >= MAX_ATTEMPTS => {
                state.waiters.clear();
                state.fault = Some(FetchOutcome::GaveUp {
                    attempts: state.attempts,
                });
                Step::quiet(state)
            }
            Err(_) => {
                // Waiter stays armed; try again.
                let attempt = state.attempts + 1;
                Step::new(state, vec![FetcherEffect::SendRequest { request, attempt }])
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("waterwheel=debug")),
        )
        .init();

    println!("=== Flaky Fetch Example ===\n");

    let outcome = run(|| {
        Step::<Fetcher>::new(
            FetcherState {
                attempts: 0,
                waiters: vec![FetcherWaiter::AwaitResponse { request: 1 }],
                fault: None,
            },
            vec![FetcherEffect::SendRequest {
                request: 1,
                attempt: 1,
            }],
        )
    });

    match outcome {
        FetchOutcome::Fetched { body, attempts } => {
            println!("Fetched after {attempts} attempt(s): {body}");
        }
        FetchOutcome::GaveUp { attempts } => {
            println!("Gave up after {attempts} attempt(s)");
        }
    }

    println!("\n=== Example Complete ===");
}
