//! Hypothesis stack for prepositional attachment.
//!
//! "book of the library of congress" pushes a frame at each "of": the noun
//! registers of the outer phrase are parked, the object phrase is read into
//! fresh registers, and popping folds the object back into the parent as a
//! prepositional post-modifier.

use super::registers::NounFields;
use crate::Span;
use crate::phrase::{Phrase, PrepPhrase, Word};
use tracing::debug;

#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub prep: Word,
    pub saved: NounFields,
    pub phrase_start: Option<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct HypothesisStack {
    frames: Vec<Frame>,
    pub pushes: usize,
    pub pops: usize,
}

impl HypothesisStack {
    pub fn new() -> Self {
        HypothesisStack::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Park the current noun registers under `prep` and clear them for the object.
    pub fn push(&mut self, prep: Word, noun: &mut NounFields) {
        let saved = std::mem::take(noun);
        let phrase_start = saved.start;
        self.frames.push(Frame { prep, saved, phrase_start });
        self.pushes += 1;
    }

    /// Restore the parent registers, attaching the object as a prepositional phrase.
    ///
    /// Returns the object's registers as they were before the pop. An object
    /// without a head is dropped; the pop still counts.
    pub fn pop(&mut self, noun: &mut NounFields) -> Option<NounFields> {
        let frame = self.frames.pop()?;
        self.pops += 1;
        let child = std::mem::replace(noun, frame.saved);
        match child.to_phrase() {
            Some(object) => {
                let span = Span::new(frame.prep.span.start, child.end);
                noun.postmods.push(Phrase::Prep(PrepPhrase {
                    preposition: frame.prep,
                    object: Box::new(Phrase::Noun(object)),
                    span: Some(span),
                }));
                noun.end = child.end;
            }
            None => debug!(
                prep = %frame.prep,
                parent_start = ?frame.phrase_start,
                "abandoning prepositional object without a head"
            ),
        }
        Some(child)
    }

    /// Drop every frame without attaching anything.
    pub fn discard_all(&mut self) {
        self.pops += self.frames.len();
        self.frames.clear();
    }

    pub fn is_balanced(&self) -> bool {
        self.pushes == self.pops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(text: &str, start: usize) -> Word {
        Word::new(text, Span::new(start, start + text.len()))
    }

    fn head(noun: &mut NounFields, word: Word) {
        noun.touch(word.span);
        noun.noun = Some(word);
    }

    #[test]
    fn pop_attaches_object_as_prepositional_phrase() {
        let mut stack = HypothesisStack::new();
        let mut noun = NounFields::default();
        head(&mut noun, w("book", 0));
        stack.push(w("of", 5), &mut noun);
        assert!(noun.noun.is_none());
        head(&mut noun, w("congress", 8));

        let child = stack.pop(&mut noun).unwrap();
        assert_eq!(child.noun.unwrap().text, "congress");
        assert_eq!(noun.noun.as_ref().unwrap().text, "book");
        assert_eq!(noun.end, 16);
        let np = noun.to_phrase().unwrap();
        assert_eq!(Phrase::Noun(np).to_string(), "np(book pp(of np(congress)))");
        assert!(stack.is_balanced());
    }

    #[test]
    fn incomplete_object_is_abandoned() {
        let mut stack = HypothesisStack::new();
        let mut noun = NounFields::default();
        head(&mut noun, w("book", 0));
        stack.push(w("of", 5), &mut noun);
        noun.determiner = Some(w("the", 8));
        stack.pop(&mut noun);
        assert!(noun.postmods.is_empty());
        assert_eq!(noun.end, 4);
        assert!(stack.is_balanced());
    }

    #[test]
    fn discard_counts_as_pops() {
        let mut stack = HypothesisStack::new();
        let mut noun = NounFields::default();
        stack.push(w("of", 0), &mut noun);
        stack.push(w("in", 3), &mut noun);
        assert_eq!(stack.depth(), 2);
        stack.discard_all();
        assert_eq!(stack.depth(), 0);
        assert_eq!((stack.pushes, stack.pops), (2, 2));
        assert!(stack.pop(&mut noun).is_none());
    }
}
