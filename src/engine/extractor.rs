//! Incremental extractor: the dispatch loop.
//!
//! Scanner items are fed one at a time. Punctuation and spacing go into the
//! lexical context; words go through the compound resolver and then, one
//! token at a time, to the primary hypothesis (and the parallel one, if any).
//! Finished phrases reach the sink after every dispatched word.

use super::compound::{CompoundResolver, Pending};
use super::machine::Machine;
use super::metrics::{CompoundMetrics, ParallelMetrics, RunMetrics, StackMetrics};
use super::parallel::ParallelTracker;
use super::registers::Family;
use super::emit::PhraseSink;
use crate::api::{Context, Options, PhraseMode};
use crate::grammar::{self, State, Step};
use crate::lexicon::Lexicon;
use crate::scanner::{ScanItem, ScanKind, Scanner};
use crate::{Category, Features, Token};
use std::time::Instant;
use tracing::{debug, trace};

/// Streaming phrase extractor over one text.
///
/// ```
/// use phrasefinder::{BasicLexicon, Context, Extractor, FoundPhrase, Options};
///
/// let lexicon = BasicLexicon::english();
/// let found: Vec<FoundPhrase> =
///     Extractor::new(&lexicon, &Context::default(), &Options::default(), Vec::new()).extract("the dog");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].phrase.kind(), "noun");
/// ```
pub struct Extractor<'a, S: PhraseSink> {
    m: Machine<'a>,
    sink: S,
    compounds: CompoundResolver,
    primary: Option<State>,
    parallel: ParallelTracker,
    metrics: RunMetrics,
    started: Instant,
    finished: bool,
}

impl<'a, S: PhraseSink> Extractor<'a, S> {
    pub fn new(lexicon: &'a dyn Lexicon, context: &Context, options: &Options, sink: S) -> Self {
        Extractor {
            m: Machine::new(lexicon, context, options.clone()),
            sink,
            compounds: CompoundResolver::new(),
            primary: None,
            parallel: ParallelTracker::new(),
            metrics: RunMetrics::default(),
            started: Instant::now(),
            finished: false,
        }
    }

    /// Scan `text`, feed every item and finish. Returns the sink.
    pub fn extract(mut self, text: &str) -> S {
        let items: Vec<ScanItem> = Scanner::new(text, self.m.lex()).collect();
        for item in items {
            self.feed(item);
        }
        self.finish();
        self.sink
    }

    /// Feed one scanner item. The final item also finishes the stream.
    pub fn feed(&mut self, item: ScanItem) {
        if self.finished {
            debug!(text = %item.text, "item fed after finish; ignoring");
            return;
        }
        self.metrics.items += 1;
        match item.kind {
            ScanKind::Word | ScanKind::Number => self.feed_word(&item),
            ScanKind::Punct => {
                self.metrics.punctuation += 1;
                let ready = self.compounds.flush(self.m.lex());
                self.deliver(ready);
                self.m.ctx.observe_punctuation(&item);
            }
            ScanKind::Space | ScanKind::Newline => {
                self.m.ctx.observe_punctuation(&item);
                if self.m.ctx.sbreak() {
                    let ready = self.compounds.flush(self.m.lex());
                    self.deliver(ready);
                }
            }
        }
        if item.is_final {
            self.finish();
        }
    }

    /// End the stream: flush held words and close every open hypothesis.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        let ready = self.compounds.flush(self.m.lex());
        self.deliver(ready);
        self.end_hypotheses();
        debug_assert!(self.m.stack.is_balanced(), "prepositional objects left open");
        self.finished = true;
        self.collect_metrics();
        debug!(
            words = self.metrics.words,
            emitted = self.metrics.emitted,
            dropped = self.metrics.dropped,
            elapsed_us = self.metrics.total.as_micros() as u64,
            "extraction finished"
        );
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn feed_word(&mut self, item: &ScanItem) {
        self.metrics.words += 1;
        self.sink.receive_token_position(&item.text, item.begin, item.end);
        let token = Token::from_scan(item, self.m.lex());
        if self.m.options.tag_parts_of_speech {
            if let Some(category) = token.categories.primary() {
                self.sink.receive_tag(&token.text, token.span.start, token.span.end, category);
            }
        }
        let snapshot = self.m.ctx.take_snapshot();
        let ready = self.compounds.offer(Pending { snapshot, token }, self.m.lex());
        self.deliver(ready);
    }

    /// Dispatch released words, each against the punctuation that preceded it.
    fn deliver(&mut self, ready: Vec<Pending>) {
        for pending in ready {
            let live = self.m.ctx.snapshot();
            self.m.ctx.restore(pending.snapshot);
            let token = pending.token;
            let breaks = token.has(Features::BREAK_WORD);
            if breaks {
                trace!(word = %token.text, "break word ends open hypotheses");
                self.end_hypotheses();
            } else {
                self.dispatch_word(&token);
            }
            self.m.ctx.consume_word(&token);
            self.m.ctx.restore(live);
            if breaks {
                self.m.ctx.mark_break();
            }
            self.drain();
        }
    }

    fn dispatch_word(&mut self, token: &Token) {
        if self.m.ctx.sbreak() {
            self.end_hypotheses();
        }
        self.m.regs.book.cur_end = token.span.end;
        self.metrics.dispatches += 1;

        match self.primary.take() {
            Some(state) => {
                let before = self.m.emitter.emitted;
                match grammar::step(&mut self.m, state, token) {
                    Step::Continue(next) => {
                        self.primary = Some(next);
                        self.parallel.advance(&mut self.m, token);
                    }
                    step @ (Step::Done | Step::Reject) => {
                        let emitted = self.m.emitter.emitted > before;
                        self.end_primary();
                        if !emitted && self.parallel.is_active() {
                            self.commit_parallel(token);
                        } else {
                            self.parallel.cancel(&mut self.m);
                            if step == Step::Reject {
                                self.start(token);
                            }
                        }
                    }
                }
            }
            None => self.start(token),
        }

        self.m.regs.book.prev_end = token.span.end;
        debug_assert!(self.families_consistent(), "registers of several phrase families are live");
    }

    /// The primary hypothesis died without output: the parallel reading takes
    /// over and sees the current word.
    fn commit_parallel(&mut self, token: &Token) {
        let Some(state) = self.parallel.commit(&mut self.m) else { return };
        match grammar::step(&mut self.m, state, token) {
            Step::Continue(next) => self.primary = Some(next),
            step @ (Step::Done | Step::Reject) => {
                self.reset();
                if step == Step::Reject {
                    self.start(token);
                }
            }
        }
    }

    /// Open a hypothesis on a word nothing was waiting for.
    fn start(&mut self, token: &Token) {
        let Some(state) = grammar::start_state_for(token, &self.m.options) else {
            return;
        };
        self.reset();
        self.m.regs.confidence = self.m.options.initial_confidence;
        self.m.regs.book.phrase_start = Some(token.span.start);
        self.m.regs.book.scan_start = token.span.start;
        match grammar::step(&mut self.m, state, token) {
            Step::Continue(next) => {
                self.primary = Some(next);
                if self.wants_parallel(next, token) {
                    self.parallel.start(&mut self.m, token);
                }
            }
            // a start state that turns its own word down drops the word
            Step::Done | Step::Reject => self.reset(),
        }
    }

    fn wants_parallel(&self, state: State, token: &Token) -> bool {
        self.m.options.mode == PhraseMode::Full
            && matches!(state.family(), Family::Name | Family::Date | Family::Place)
            && token.is(Category::GENERAL)
    }

    /// Close the primary (and, failing output, the parallel) hypothesis with a
    /// boundary token, then clear everything.
    fn end_hypotheses(&mut self) {
        let boundary = Token::boundary(self.m.regs.book.prev_end);
        if let Some(state) = self.primary.take() {
            let before = self.m.emitter.emitted;
            if let Step::Continue(next) = grammar::step(&mut self.m, state, &boundary) {
                debug!(state = next.name(), "hypothesis kept going at a boundary; dropping it");
            }
            let emitted = self.m.emitter.emitted > before;
            self.end_primary();
            if !emitted {
                if let Some(alt) = self.parallel.commit(&mut self.m) {
                    grammar::step(&mut self.m, alt, &boundary);
                }
            }
        }
        self.parallel.cancel(&mut self.m);
        self.reset();
        self.drain();
    }

    /// Clear the primary's registers, sparing the parallel reading's.
    fn end_primary(&mut self) {
        if self.parallel.is_active() {
            self.m.regs.clear_except(Some(Family::General));
        } else {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.m.regs.clear_except(None);
        self.m.stack.discard_all();
    }

    fn drain(&mut self) {
        for found in self.m.emitter.drain() {
            self.sink.receive_phrase(found);
        }
    }

    fn families_consistent(&self) -> bool {
        let live = self.m.regs.live_families();
        live.iter().filter(|f| **f != Family::General).count() <= 1
    }

    fn collect_metrics(&mut self) {
        self.metrics.total = self.started.elapsed();
        self.metrics.emitted = self.m.emitter.emitted;
        self.metrics.dropped = self.m.emitter.dropped;
        self.metrics.compounds = CompoundMetrics {
            queued: self.compounds.queued,
            built: self.compounds.built,
            replayed: self.compounds.replayed,
        };
        self.metrics.stack = StackMetrics { pushes: self.m.stack.pushes, pops: self.m.stack.pops };
        self.metrics.parallel = ParallelMetrics {
            started: self.parallel.started,
            committed: self.parallel.committed,
            cancelled: self.parallel.cancelled,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicLexicon, FoundPhrase};

    fn run(text: &str) -> (Vec<FoundPhrase>, RunMetrics) {
        let lex = BasicLexicon::english();
        let mut ex = Extractor::new(&lex, &Context::default(), &Options::default(), Vec::new());
        for item in Scanner::new(text, &lex) {
            ex.feed(item);
        }
        ex.finish();
        let metrics = ex.metrics().clone();
        (ex.into_sink(), metrics)
    }

    #[test]
    fn nested_prepositions_balance_the_stack() {
        let (found, metrics) = run("book of the library of congress");
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].start, found[0].end), (0, 31));
        assert_eq!(metrics.stack.pushes, 2);
        assert_eq!(metrics.stack.pops, 2);
    }

    #[test]
    fn compound_is_dispatched_once() {
        let (found, metrics) = run("Los Angeles");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].phrase.kind(), "city");
        assert_eq!(metrics.compounds.built, 1);
        assert_eq!(metrics.dispatches, 1);
    }

    #[test]
    fn failed_compound_is_replayed_word_by_word() {
        let (found, metrics) = run("a new car");
        assert_eq!(metrics.compounds.replayed, 1);
        assert_eq!(metrics.dispatches, 3);
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].start, found[0].end), (0, 9));
    }

    #[test]
    fn finish_is_idempotent() {
        let lex = BasicLexicon::english();
        let mut ex = Extractor::new(&lex, &Context::default(), &Options::default(), Vec::new());
        for item in Scanner::new("the dog", &lex) {
            ex.feed(item);
        }
        ex.finish();
        ex.finish();
        assert_eq!(ex.into_sink().len(), 1);
    }

    #[test]
    fn break_word_ends_the_phrase() {
        let (found, _) = run("the dog but the cat");
        let spans: Vec<(usize, usize)> = found.iter().map(|f| (f.start, f.end)).collect();
        assert_eq!(spans, vec![(0, 7), (12, 19)]);
    }

    #[test]
    fn sentence_break_separates_phrases() {
        let (found, _) = run("the dog. the cat");
        assert_eq!(found.len(), 2);
        assert_eq!((found[1].start, found[1].end), (9, 16));
    }
}
