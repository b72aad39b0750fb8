//! Compound-word resolver.
//!
//! Words that may begin a multi-word lexicon entry ("new york", "ice cream")
//! are held back until the compound either completes or fails. A completed
//! compound reaches the grammar as one token; a failed queue is replayed word
//! by word, each with the punctuation that originally preceded it.

use super::context::PunctSnapshot;
use crate::lexicon::{CompoundCursor, Lexicon};
use crate::{CapCode, Features, Span, Token};
use tracing::debug;

/// A word waiting for (or ready for) dispatch.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Pending {
    pub snapshot: PunctSnapshot,
    pub token: Token,
}

#[derive(Debug, Default)]
pub(crate) struct CompoundResolver {
    queue: Vec<Pending>,
    cursor: Option<CompoundCursor>,
    /// Queue length at the last position that spelled a whole compound.
    complete_len: usize,
    pub queued: usize,
    pub replayed: usize,
    pub built: usize,
}

impl CompoundResolver {
    pub fn new() -> Self {
        CompoundResolver::default()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Offer the next word. Returns the words that are ready for dispatch, in order.
    pub fn offer(&mut self, pending: Pending, lexicon: &dyn Lexicon) -> Vec<Pending> {
        match lexicon.compound_continuation(&pending.token.key(), self.cursor) {
            Some(cursor) => {
                self.queue.push(pending);
                self.queued += 1;
                self.cursor = Some(cursor);
                if cursor.complete {
                    self.complete_len = self.queue.len();
                    if !cursor.extendable {
                        let len = self.queue.len();
                        return self.release(len, lexicon);
                    }
                }
                Vec::new()
            }
            None if self.queue.is_empty() => vec![pending],
            None => {
                let mut ready = self.flush(lexicon);
                ready.extend(self.offer(pending, lexicon));
                ready
            }
        }
    }

    /// Give up on the queued compound: deliver its longest complete prefix as one
    /// token and replay the rest individually.
    pub fn flush(&mut self, lexicon: &dyn Lexicon) -> Vec<Pending> {
        if self.queue.is_empty() {
            return Vec::new();
        }
        let complete = self.complete_len;
        self.release(complete, lexicon)
    }

    fn release(&mut self, compound_len: usize, lexicon: &dyn Lexicon) -> Vec<Pending> {
        let mut queue = std::mem::take(&mut self.queue);
        self.cursor = None;
        self.complete_len = 0;

        let rest = queue.split_off(compound_len);
        let mut ready = Vec::with_capacity(rest.len() + 1);
        if !queue.is_empty() {
            let built = merge(queue, lexicon);
            debug!(compound = %built.token.text, "compound word recognized");
            self.built += 1;
            ready.push(built);
        }
        if !rest.is_empty() {
            debug!(count = rest.len(), "replaying queued words");
            self.replayed += rest.len();
        }
        ready.extend(rest);
        ready
    }
}

fn merge(parts: Vec<Pending>, lexicon: &dyn Lexicon) -> Pending {
    let text = parts.iter().map(|p| p.token.text.as_str()).collect::<Vec<_>>().join(" ");
    let first = &parts[0];
    let last = &parts[parts.len() - 1];
    let cap = if parts.iter().all(|p| p.token.cap.is_capitalized()) {
        if parts.iter().all(|p| p.token.cap == CapCode::Upper) { CapCode::Upper } else { CapCode::Initial }
    } else {
        first.token.cap
    };
    let token = Token {
        categories: lexicon.category_of(&text),
        features: lexicon.features_of(&text) | Features::COMPOUND,
        cap,
        value: lexicon.numeric_value(&text),
        span: Span::new(first.token.span.start, last.token.span.end),
        sentence_start: first.token.sentence_start,
        source_id: first.token.source_id,
        lookahead: last.token.lookahead,
        is_final: last.token.is_final,
        text,
    };
    Pending { snapshot: first.snapshot.clone(), token }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicLexicon, Category, Scanner};

    fn pending(text: &str, lex: &BasicLexicon) -> Vec<Pending> {
        Scanner::new(text, lex)
            .filter(|i| i.is_word())
            .map(|i| Pending { snapshot: PunctSnapshot::default(), token: Token::from_scan(&i, lex) })
            .collect()
    }

    fn run(text: &str) -> (Vec<Pending>, CompoundResolver) {
        let lex = BasicLexicon::english();
        let mut resolver = CompoundResolver::new();
        let mut out = Vec::new();
        for p in pending(text, &lex) {
            out.extend(resolver.offer(p, &lex));
        }
        out.extend(resolver.flush(&lex));
        (out, resolver)
    }

    #[test]
    fn unique_completion_yields_one_token() {
        let (out, resolver) = run("Los Angeles");
        assert_eq!(out.len(), 1);
        let token = &out[0].token;
        assert_eq!(token.text, "Los Angeles");
        assert_eq!(token.span, Span::new(0, 11));
        assert!(token.is(Category::CITY));
        assert!(token.has(Features::COMPOUND));
        assert_eq!(token.cap, CapCode::Initial);
        assert_eq!(resolver.built, 1);
        assert!(resolver.is_idle());
    }

    #[test]
    fn failed_compound_replays_every_queued_word_in_order() {
        let lex = BasicLexicon::english();
        let input = pending("new car", &lex);
        let (out, resolver) = run("new car");
        assert_eq!(out, input);
        assert_eq!(resolver.replayed, 1);
        assert_eq!(resolver.built, 0);
    }

    #[test]
    fn longest_complete_prefix_survives_failure() {
        let (out, resolver) = run("New York is big");
        let texts: Vec<&str> = out.iter().map(|p| p.token.text.as_str()).collect();
        assert_eq!(texts, vec!["New York", "is", "big"]);
        assert_eq!(out[0].token.span, Span::new(0, 8));
        assert_eq!(resolver.replayed, 0);
    }

    #[test]
    fn extendable_compound_completes_at_the_longest_entry() {
        let (out, _) = run("new york city");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].token.text, "new york city");
        assert_eq!(out[0].token.cap, CapCode::Lower);
    }

    #[test]
    fn flush_releases_a_partial_queue() {
        let lex = BasicLexicon::english();
        let mut resolver = CompoundResolver::new();
        let mut words = pending("salt lake", &lex).into_iter();
        assert!(resolver.offer(words.next().unwrap(), &lex).is_empty());
        assert!(resolver.offer(words.next().unwrap(), &lex).is_empty());
        let out = resolver.flush(&lex);
        let texts: Vec<&str> = out.iter().map(|p| p.token.text.as_str()).collect();
        assert_eq!(texts, vec!["salt", "lake"]);
    }
}
