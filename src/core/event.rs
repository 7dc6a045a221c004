//! Inbound events and the transition result they produce.

use crate::core::program::Program;

/// One occurrence observed from the outside world.
///
/// Events are immutable values produced by effect executions and consumed
/// exactly once by the dispatcher. `Send + 'static` because they cross from
/// effect threads into the driver loop.
pub trait Event<P: Program>: Send + 'static {
    /// A short display name for logs and the dispatch journal, typically
    /// the variant name.
    fn label(&self) -> &str;

    /// The default pure transition, run when no waiter claims this event.
    ///
    /// Must not perform any I/O, not even reading a clock or generating a
    /// random number. An event that starts a multi-step sequence should
    /// return a state containing a new waiter rather than trying to do the
    /// whole sequence here.
    fn apply(self, state: P::State) -> Step<P>;
}

/// The result of one pure transition: the next state and the effects to
/// execute in the next driver iteration.
pub struct Step<P: Program> {
    /// The state the program moves to.
    pub state: P::State,
    /// Effects the driver executes before blocking for the next event.
    pub effects: Vec<P::Effect>,
}

impl<P: Program> Step<P> {
    /// A step with effects to run.
    pub fn new(state: P::State, effects: Vec<P::Effect>) -> Self {
        Self { state, effects }
    }

    /// A step that only moves state, scheduling no effects.
    pub fn quiet(state: P::State) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    /// Append one more effect to this step.
    pub fn with_effect(mut self, effect: P::Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
