//! Phrase emission and the downstream sink.

use super::registers::Bookkeeping;
use crate::phrase::Phrase;
use crate::{Category, Span};
use tracing::{debug, trace};

/// A phrase handed to the sink, with its source offsets and confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPhrase {
    pub phrase: Phrase,
    /// Start byte offset of the first contributing word.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    pub confidence: i32,
}

/// Downstream consumer of extraction results.
pub trait PhraseSink {
    fn receive_phrase(&mut self, found: FoundPhrase);

    /// Called for every word before it is dispatched.
    fn receive_token_position(&mut self, _text: &str, _start: usize, _end: usize) {}

    /// Called for every word when part-of-speech tagging is enabled.
    fn receive_tag(&mut self, _text: &str, _start: usize, _end: usize, _category: Category) {}
}

impl PhraseSink for Vec<FoundPhrase> {
    fn receive_phrase(&mut self, found: FoundPhrase) {
        self.push(found);
    }
}

impl<S: PhraseSink + ?Sized> PhraseSink for &mut S {
    fn receive_phrase(&mut self, found: FoundPhrase) {
        (**self).receive_phrase(found);
    }

    fn receive_token_position(&mut self, text: &str, start: usize, end: usize) {
        (**self).receive_token_position(text, start, end);
    }

    fn receive_tag(&mut self, text: &str, start: usize, end: usize, category: Category) {
        (**self).receive_tag(text, start, end, category);
    }
}

/// Confidence gate between finished hypotheses and the sink.
///
/// Accepted phrases wait in an outbox until the dispatch loop drains them.
#[derive(Debug)]
pub(crate) struct Emitter {
    threshold: i32,
    suppressed: bool,
    outbox: Vec<FoundPhrase>,
    pub emitted: usize,
    pub dropped: usize,
}

impl Emitter {
    pub fn new(threshold: i32) -> Self {
        Emitter { threshold, suppressed: false, outbox: Vec::new(), emitted: 0, dropped: 0 }
    }

    /// Set suppression and return the previous setting.
    pub fn suppress(&mut self, on: bool) -> bool {
        std::mem::replace(&mut self.suppressed, on)
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Finalize `phrase`.
    ///
    /// The end offset is `explicit_end` if given, else the current word's end when
    /// the current word belongs to the phrase, else the previous word's end. The
    /// start is `start`, else the scan start. Returns whether the phrase went out.
    pub fn transmit(
        &mut self,
        mut phrase: Phrase,
        confidence: i32,
        start: Option<usize>,
        book: &Bookkeeping,
        used_current: bool,
        explicit_end: Option<usize>,
    ) -> bool {
        let end = explicit_end.unwrap_or(if used_current { book.cur_end } else { book.prev_end });
        let start = start.unwrap_or(book.scan_start).min(end);

        if self.suppressed {
            trace!(kind = phrase.kind(), start, end, "suppressed phrase from parallel hypothesis");
            return false;
        }
        if confidence <= self.threshold {
            trace!(
                kind = phrase.kind(),
                start,
                end,
                confidence,
                threshold = self.threshold,
                phrase = %phrase,
                "dropping phrase below threshold"
            );
            self.dropped += 1;
            return false;
        }

        phrase.set_span(Span::new(start, end));
        debug!(kind = phrase.kind(), start, end, confidence, phrase = %phrase, "emitting phrase");
        self.outbox.push(FoundPhrase { phrase, start, end, confidence });
        self.emitted += 1;
        true
    }

    pub fn drain(&mut self) -> Vec<FoundPhrase> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::{NounPhrase, Word};

    fn dog() -> Phrase {
        Phrase::Noun(NounPhrase {
            determiner: None,
            modifiers: vec![],
            noun: Word::new("dog", Span::new(4, 7)),
            quantity: None,
            postmods: vec![],
            span: None,
        })
    }

    fn book() -> Bookkeeping {
        Bookkeeping { cur_end: 12, prev_end: 7, scan_start: 4, ..Bookkeeping::default() }
    }

    #[test]
    fn end_offset_rules() {
        let mut emitter = Emitter::new(5);
        assert!(emitter.transmit(dog(), 10, Some(0), &book(), false, None));
        assert!(emitter.transmit(dog(), 10, Some(0), &book(), true, None));
        assert!(emitter.transmit(dog(), 10, None, &book(), true, Some(9)));
        let out = emitter.drain();
        let spans: Vec<(usize, usize)> = out.iter().map(|f| (f.start, f.end)).collect();
        assert_eq!(spans, vec![(0, 7), (0, 12), (4, 9)]);
        assert_eq!(out[0].phrase.span(), Some(Span::new(0, 7)));
        assert!(emitter.drain().is_empty());
    }

    #[test]
    fn threshold_is_strict() {
        let mut emitter = Emitter::new(5);
        assert!(!emitter.transmit(dog(), 5, None, &book(), false, None));
        assert!(emitter.transmit(dog(), 6, None, &book(), false, None));
        assert_eq!((emitter.emitted, emitter.dropped), (1, 1));
    }

    #[test]
    fn suppressed_phrases_are_not_counted() {
        let mut emitter = Emitter::new(5);
        assert!(!emitter.suppress(true));
        assert!(!emitter.transmit(dog(), 10, None, &book(), false, None));
        assert!(emitter.suppress(false));
        assert_eq!((emitter.emitted, emitter.dropped), (0, 0));
        assert!(emitter.drain().is_empty());
    }
}
