//! Parallel hypothesis tracker.
//!
//! A word like "March" or "Jack" opens a date or name hypothesis, but it may
//! just as well be an ordinary noun or verb. The tracker runs the general
//! noun/verb-phrase reading alongside with its own confidence and start offset,
//! its emissions suppressed, so it can take over if the primary reading dies
//! without producing anything.

use super::machine::Machine;
use crate::Token;
use crate::grammar::{self, State, Step};
use tracing::debug;

#[derive(Debug, Default)]
pub(crate) struct ParallelTracker {
    state: Option<State>,
    alt_confidence: i32,
    pub started: usize,
    pub committed: usize,
    pub cancelled: usize,
}

impl ParallelTracker {
    pub fn new() -> Self {
        ParallelTracker::default()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Open the general-phrase reading of `token`. Returns whether it took.
    pub fn start(&mut self, m: &mut Machine<'_>, token: &Token) -> bool {
        self.cancel(m);
        self.alt_confidence = m.options.initial_confidence;
        m.regs.book.alt_phrase_start = Some(token.span.start);
        match self.run(m, State::GeneralStart, token) {
            Step::Continue(next) => {
                self.state = Some(next);
                self.started += 1;
                if m.options.trace {
                    debug!(state = next.name(), token = %token.text, "parallel hypothesis opened");
                }
                true
            }
            Step::Done | Step::Reject => {
                m.regs.clear_noun();
                m.stack.discard_all();
                false
            }
        }
    }

    /// Step the secondary reading; it is dropped as soon as it stops.
    pub fn advance(&mut self, m: &mut Machine<'_>, token: &Token) {
        let Some(state) = self.state else { return };
        match self.run(m, state, token) {
            Step::Continue(next) => self.state = Some(next),
            Step::Done | Step::Reject => self.cancel(m),
        }
    }

    /// Promote the secondary reading to primary. Its confidence and start offset
    /// replace the primary's.
    pub fn commit(&mut self, m: &mut Machine<'_>) -> Option<State> {
        let state = self.state.take()?;
        m.regs.confidence = self.alt_confidence;
        m.regs.book.phrase_start = m.regs.book.alt_phrase_start.take();
        self.committed += 1;
        debug!(state = state.name(), confidence = m.regs.confidence, "committing to parallel hypothesis");
        Some(state)
    }

    pub fn cancel(&mut self, m: &mut Machine<'_>) {
        if self.state.take().is_some() {
            m.regs.clear_noun();
            m.stack.discard_all();
            m.regs.book.alt_phrase_start = None;
            self.cancelled += 1;
        }
    }

    fn run(&mut self, m: &mut Machine<'_>, state: State, token: &Token) -> Step {
        self.swap(m);
        let suppressed = m.emitter.suppress(true);
        let step = grammar::step(m, state, token);
        m.emitter.suppress(suppressed);
        self.swap(m);
        step
    }

    fn swap(&mut self, m: &mut Machine<'_>) {
        std::mem::swap(&mut m.regs.confidence, &mut self.alt_confidence);
        std::mem::swap(&mut m.regs.book.phrase_start, &mut m.regs.book.alt_phrase_start);
    }
}
