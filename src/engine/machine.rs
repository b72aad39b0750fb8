//! The state every transition works on: lexicon, options, punctuation context,
//! registers, the hypothesis stack and the emitter.

use super::confidence::{self, Penalties};
use super::context::LexicalContext;
use super::emit::Emitter;
use super::registers::Registers;
use super::stack::HypothesisStack;
use crate::api::{Context, Options};
use crate::lexicon::{Lexicon, RunLexicon};
use crate::phrase::{Phrase, Word};
use chrono::Datelike;

/// How two-digit years ("'97") are placed in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearBias {
    /// The year inside a 100-year window reaching `future_year_horizon` years ahead.
    #[default]
    Nearest,
    /// The latest year not after the reference year.
    Past,
    /// The earliest year not before the reference year.
    Future,
    /// Years are plain numbers: two-digit years stay as written and bare
    /// numbers are never read as years.
    Abstract,
}

/// Numbers within this many years of the reference year may be read as years.
const LIKELY_YEAR_WINDOW: i32 = 200;

pub(crate) struct Machine<'a> {
    lex: RunLexicon<'a>,
    pub options: Options,
    pub now_year: i32,
    pub ctx: LexicalContext,
    pub regs: Registers,
    pub stack: HypothesisStack,
    pub emitter: Emitter,
}

impl<'a> Machine<'a> {
    pub fn new(lex: &'a dyn Lexicon, context: &Context, options: Options) -> Self {
        Machine {
            lex: RunLexicon::new(lex),
            now_year: context.reference_time.year(),
            ctx: LexicalContext::new(),
            regs: Registers::new(options.initial_confidence),
            stack: HypothesisStack::new(),
            emitter: Emitter::new(options.threshold),
            options,
        }
    }

    /// The lexicon as this run sees it, guessed senses included.
    pub fn lex(&self) -> &dyn Lexicon {
        &self.lex
    }

    pub fn penalties(&self) -> Penalties {
        self.options.penalties
    }

    pub fn case_sensitive(&self) -> bool {
        self.options.case_sensitive
    }

    pub fn penalize(&mut self, weight: i32) {
        self.regs.confidence = confidence::penalize(self.regs.confidence, weight);
    }

    /// Capitalization only the current hypothesis explains.
    pub fn raise_if_unexplained(&mut self) {
        if self.case_sensitive() {
            self.regs.confidence = confidence::raise_if_unexplained(self.regs.confidence, self.options.threshold);
        }
    }

    /// Finalize a phrase starting at the recorded phrase start.
    pub fn transmit(&mut self, phrase: Phrase, used_current: bool, explicit_end: Option<usize>) -> bool {
        let start = self.regs.book.phrase_start;
        self.transmit_from(start, phrase, used_current, explicit_end)
    }

    pub fn transmit_from(
        &mut self,
        start: Option<usize>,
        phrase: Phrase,
        used_current: bool,
        explicit_end: Option<usize>,
    ) -> bool {
        self.emitter.transmit(phrase, self.regs.confidence, start, &self.regs.book, used_current, explicit_end)
    }

    /// Whether `value` can stand for a year on its own.
    pub fn likely_year(&self, value: f64) -> bool {
        if self.options.year_bias == YearBias::Abstract || value.fract() != 0.0 || value < 1.0 {
            return false;
        }
        (value as i64 - self.now_year as i64).abs() <= LIKELY_YEAR_WINDOW as i64
    }

    pub fn presumed_year(&self, two_digits: i32) -> i32 {
        make_presumed_year(two_digits, self.now_year, self.options.future_year_horizon, self.options.year_bias)
    }

    /// Open a prepositional object under `prep`.
    pub fn push_prep(&mut self, prep: Word) {
        self.stack.push(prep, &mut self.regs.noun);
    }

    /// Fold every open prepositional object back into its parent.
    ///
    /// Objects carrying modifiers of their own are also emitted as noun phrases.
    pub fn pop_all(&mut self) {
        while self.stack.depth() > 0 {
            let child = self.regs.noun.clone();
            self.stack.pop(&mut self.regs.noun);
            if child.modifiers.is_empty() {
                continue;
            }
            if let Some(np) = child.to_phrase() {
                self.transmit_from(child.start, Phrase::Noun(np), false, Some(child.end));
            }
        }
    }
}

/// Place a two-digit year relative to `now`.
pub(crate) fn make_presumed_year(two_digits: i32, now: i32, horizon: i32, bias: YearBias) -> i32 {
    let yy = two_digits.rem_euclid(100);
    let century = now - now.rem_euclid(100);
    let candidates = [century - 100 + yy, century + yy, century + 100 + yy];
    match bias {
        YearBias::Abstract => yy,
        YearBias::Past => candidates.iter().copied().filter(|y| *y <= now).max().unwrap_or(century + yy),
        YearBias::Future => candidates.iter().copied().filter(|y| *y >= now).min().unwrap_or(century + yy),
        YearBias::Nearest => {
            let horizon = horizon.clamp(0, 99);
            let low = now - (100 - horizon);
            candidates.iter().copied().find(|y| *y > low && *y <= now + horizon).unwrap_or(century + yy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presumed_year_windows() {
        assert_eq!(make_presumed_year(97, 2013, 25, YearBias::Nearest), 1997);
        assert_eq!(make_presumed_year(30, 2013, 25, YearBias::Nearest), 2030);
        assert_eq!(make_presumed_year(40, 2013, 25, YearBias::Nearest), 1940);
        assert_eq!(make_presumed_year(38, 2013, 25, YearBias::Nearest), 2038);
        assert_eq!(make_presumed_year(10, 2013, 25, YearBias::Past), 2010);
        assert_eq!(make_presumed_year(20, 2013, 25, YearBias::Past), 1920);
        assert_eq!(make_presumed_year(10, 2013, 25, YearBias::Future), 2110);
        assert_eq!(make_presumed_year(20, 2013, 25, YearBias::Future), 2020);
        assert_eq!(make_presumed_year(97, 2013, 25, YearBias::Abstract), 97);
    }

    #[test]
    fn likely_year_window() {
        let lex = crate::BasicLexicon::empty();
        let m = Machine::new(&lex, &Context::default(), Options::default());
        assert_eq!(m.now_year, 2013);
        assert!(m.likely_year(1999.0));
        assert!(m.likely_year(2200.0));
        assert!(!m.likely_year(97.0));
        assert!(!m.likely_year(1999.5));

        let abstract_years = Options { year_bias: YearBias::Abstract, ..Options::default() };
        let m = Machine::new(&lex, &Context::default(), abstract_years);
        assert!(!m.likely_year(1999.0));
    }
}
