//! Lexical context buffer: punctuation seen since the last word, sentence
//! breaks, and the running capitalization profile of the text.

use crate::scanner::{ScanItem, ScanKind, is_initial};
use crate::{CapCode, Features, Token};

/// Punctuation state between two words.
///
/// The compound-word resolver stores one of these with every queued token so
/// the token can be replayed against the punctuation that actually preceded it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PunctSnapshot {
    marks: Vec<char>,
    spaced: bool,
    newlines: usize,
    sbreak: bool,
}

/// Running capitalization profile. Function words are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CaseFlags {
    pub words: usize,
    pub all_upper: bool,
    pub all_initial: bool,
}

impl Default for CaseFlags {
    fn default() -> Self {
        CaseFlags { words: 0, all_upper: true, all_initial: true }
    }
}

impl CaseFlags {
    const SETTLED: usize = 3;

    /// Every content word so far has been all caps.
    pub fn shouting(&self) -> bool {
        self.words >= Self::SETTLED && self.all_upper
    }

    /// Every content word so far has been capitalized, as in a headline.
    pub fn headline(&self) -> bool {
        self.words >= Self::SETTLED && self.all_initial && !self.all_upper
    }
}

#[derive(Debug, Default)]
pub(crate) struct LexicalContext {
    punct: PunctSnapshot,
    pending_cr: bool,
    last_shortened: bool,
    case: CaseFlags,
}

impl LexicalContext {
    pub fn new() -> Self {
        LexicalContext::default()
    }

    /// Buffer one punctuation, space or newline item.
    pub fn observe_punctuation(&mut self, item: &ScanItem) {
        match item.kind {
            ScanKind::Space => self.punct.spaced = true,
            ScanKind::Newline => {
                // "\r" followed by a separate "\n" counts once.
                if item.text == "\n" && self.pending_cr {
                    self.pending_cr = false;
                    return;
                }
                self.pending_cr = item.text == "\r";
                self.punct.newlines += 1;
                if self.punct.newlines >= 2 {
                    self.punct.sbreak = true;
                }
            }
            ScanKind::Punct => {
                self.pending_cr = false;
                for c in item.text.chars() {
                    self.punct.marks.push(c);
                    match c {
                        '?' | '!' => self.punct.sbreak = true,
                        '.' if !self.last_shortened || self.punct.marks.len() > 1 => self.punct.sbreak = true,
                        _ => {}
                    }
                }
            }
            ScanKind::Word | ScanKind::Number => {}
        }
    }

    /// Any punctuation or line break precedes the current word.
    pub fn prev_break(&self) -> bool {
        !self.punct.marks.is_empty() || self.punct.newlines > 0
    }

    /// A hard sentence break precedes the current word.
    pub fn sbreak(&self) -> bool {
        self.punct.sbreak
    }

    /// The `n`-th punctuation mark counting back from the word (1 = closest).
    pub fn nth_punct_back(&self, n: usize) -> Option<char> {
        let len = self.punct.marks.len();
        if n == 0 || n > len { None } else { Some(self.punct.marks[len - n]) }
    }

    /// No mark lies beyond position `n` counting back from the word.
    pub fn no_punct_after(&self, n: usize) -> bool {
        self.punct.marks.len() <= n
    }

    /// The word directly touches the previous one: no space, no mark, no newline.
    pub fn adjacent(&self) -> bool {
        !self.punct.spaced && self.punct.marks.is_empty() && self.punct.newlines == 0
    }

    /// Exactly the single mark `c` (plus optional spacing) separates the words.
    pub fn only_mark(&self, c: char) -> bool {
        self.punct.marks.len() == 1 && self.punct.marks[0] == c && self.punct.newlines < 2
    }

    pub fn case_flags(&self) -> CaseFlags {
        self.case
    }

    pub fn snapshot(&self) -> PunctSnapshot {
        self.punct.clone()
    }

    /// Hand out the buffered punctuation and start a fresh buffer.
    pub fn take_snapshot(&mut self) -> PunctSnapshot {
        std::mem::take(&mut self.punct)
    }

    pub fn restore(&mut self, snapshot: PunctSnapshot) {
        self.punct = snapshot;
    }

    /// Force a hard break before the next word.
    pub fn mark_break(&mut self) {
        self.punct.sbreak = true;
    }

    /// Account for a word that has just been dispatched.
    pub fn consume_word(&mut self, token: &Token) {
        self.punct = PunctSnapshot::default();
        self.last_shortened = token.has(Features::ABBREVIATION) || is_initial(&token.text);
        if token.has(Features::FUNCTION_WORD) || token.cap == CapCode::Other {
            return;
        }
        self.case.words += 1;
        if token.cap != CapCode::Upper {
            self.case.all_upper = false;
        }
        if !token.cap.is_capitalized() {
            self.case.all_initial = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicLexicon, Lexicon, Scanner};

    fn feed(ctx: &mut LexicalContext, text: &str) {
        let lex = BasicLexicon::shared();
        for item in Scanner::new(text, lex) {
            if item.is_word() {
                let token = Token::from_scan(&item, lex as &dyn Lexicon);
                ctx.consume_word(&token);
            } else {
                ctx.observe_punctuation(&item);
            }
        }
    }

    #[test]
    fn period_after_abbreviation_is_not_a_break() {
        let mut ctx = LexicalContext::new();
        feed(&mut ctx, "Dr. ");
        assert!(!ctx.sbreak());
        assert_eq!(ctx.nth_punct_back(1), Some('.'));

        let mut ctx = LexicalContext::new();
        feed(&mut ctx, "dog. ");
        assert!(ctx.sbreak());
    }

    #[test]
    fn blank_line_is_a_hard_break_single_newline_is_not() {
        let mut ctx = LexicalContext::new();
        feed(&mut ctx, "dog\n");
        assert!(ctx.prev_break());
        assert!(!ctx.sbreak());

        let mut ctx = LexicalContext::new();
        feed(&mut ctx, "dog\r\n\r\n");
        assert!(ctx.sbreak());
    }

    #[test]
    fn punctuation_queries() {
        let mut ctx = LexicalContext::new();
        feed(&mut ctx, "3, '");
        assert_eq!(ctx.nth_punct_back(1), Some('\''));
        assert_eq!(ctx.nth_punct_back(2), Some(','));
        assert_eq!(ctx.nth_punct_back(3), None);
        assert!(ctx.no_punct_after(2));
        assert!(!ctx.no_punct_after(1));
        assert!(!ctx.adjacent());

        let mut ctx = LexicalContext::new();
        feed(&mut ctx, "10:");
        assert!(ctx.only_mark(':'));
    }

    #[test]
    fn snapshots_round_trip() {
        let mut ctx = LexicalContext::new();
        feed(&mut ctx, "dog, ");
        let snap = ctx.take_snapshot();
        assert!(ctx.adjacent());
        ctx.restore(snap);
        assert_eq!(ctx.nth_punct_back(1), Some(','));
    }

    #[test]
    fn case_flags_ignore_function_words() {
        let mut ctx = LexicalContext::new();
        feed(&mut ctx, "THE BIG DOG OF THE LIBRARY");
        assert!(ctx.case_flags().shouting());

        let mut ctx = LexicalContext::new();
        feed(&mut ctx, "Book of the Big Library");
        assert!(ctx.case_flags().headline());

        let mut ctx = LexicalContext::new();
        feed(&mut ctx, "the big dog barked");
        assert!(!ctx.case_flags().headline());
        assert!(!ctx.case_flags().shouting());
    }
}
