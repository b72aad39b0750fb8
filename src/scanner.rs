//! Regex tokenizer producing the item stream the extractor consumes.
//!
//! Every byte of the input lands in exactly one item, so offsets can be used
//! directly as spans into the original text.

use crate::lexicon::Lexicon;
use crate::{CapCode, Features};
use std::collections::VecDeque;

/// Coarse item class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Word,
    Number,
    Punct,
    Space,
    Newline,
}

/// One scanned item with its source metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanItem {
    pub text: String,
    pub kind: ScanKind,
    pub cap: CapCode,
    /// First word of a sentence (after `.`/`?`/`!` or a blank line, or at input start).
    pub sentence_start: bool,
    /// Ordinal of the item in the stream.
    pub source_id: u32,
    pub begin: usize,
    pub end: usize,
    /// Character immediately after the item, if any.
    pub lookahead: Option<char>,
    /// Last item of the input.
    pub is_final: bool,
}

impl ScanItem {
    pub fn is_word(&self) -> bool {
        matches!(self.kind, ScanKind::Word | ScanKind::Number)
    }
}

/// Iterator over the [`ScanItem`]s of a text.
#[derive(Debug)]
pub struct Scanner {
    items: VecDeque<ScanItem>,
}

impl Scanner {
    pub fn new(text: &str, lexicon: &dyn Lexicon) -> Self {
        let re = regex!(
            r"(?P<nl>\r\n|\r|\n)|(?P<ws>[ \t\f\v]+)|(?P<num>(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?(?:st|nd|rd|th)?)|(?P<poss>'s\b)|(?P<word>\p{L}+(?:-\p{L}+)*(?:'(?:t|re|ll|ve|m|d)\b)?)|(?P<punct>(?s:.))"
        );

        let mut items = VecDeque::new();
        let mut at_start = true;
        let mut newlines = 0usize;
        let mut last_word: Option<String> = None;

        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            let kind = if caps.name("nl").is_some() {
                ScanKind::Newline
            } else if caps.name("ws").is_some() {
                ScanKind::Space
            } else if caps.name("num").is_some() {
                ScanKind::Number
            } else if caps.name("poss").is_some() || caps.name("word").is_some() {
                ScanKind::Word
            } else {
                ScanKind::Punct
            };

            let mut sentence_start = false;
            match kind {
                ScanKind::Newline => {
                    newlines += 1;
                    if newlines >= 2 {
                        at_start = true;
                    }
                }
                ScanKind::Space => {}
                ScanKind::Punct => {
                    newlines = 0;
                    match m.as_str() {
                        "?" | "!" => at_start = true,
                        "." => {
                            let shortened =
                                last_word.as_deref().is_some_and(|w| is_initial(w) || is_abbreviation(w, lexicon));
                            if !shortened {
                                at_start = true;
                            }
                        }
                        _ => {}
                    }
                }
                ScanKind::Word | ScanKind::Number => {
                    newlines = 0;
                    sentence_start = at_start;
                    at_start = false;
                    last_word = Some(m.as_str().to_string());
                }
            }

            items.push_back(ScanItem {
                text: m.as_str().to_string(),
                kind,
                cap: CapCode::of(m.as_str()),
                sentence_start,
                source_id: items.len() as u32,
                begin: m.start(),
                end: m.end(),
                lookahead: text[m.end()..].chars().next(),
                is_final: false,
            });
        }
        if let Some(last) = items.back_mut() {
            last.is_final = true;
        }
        Scanner { items }
    }
}

impl Iterator for Scanner {
    type Item = ScanItem;

    fn next(&mut self) -> Option<ScanItem> {
        self.items.pop_front()
    }
}

/// A single capital letter, as in the "F." of "John F. Kennedy".
pub(crate) fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

pub(crate) fn is_abbreviation(word: &str, lexicon: &dyn Lexicon) -> bool {
    lexicon.features_of(word).contains(Features::ABBREVIATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BasicLexicon;

    fn scan(text: &str) -> Vec<ScanItem> {
        Scanner::new(text, BasicLexicon::shared()).collect()
    }

    #[test]
    fn covers_every_byte() {
        let text = "Dr. Smith's 1,200 dogs\n\ndon't bark at 10:30.";
        let items = scan(text);
        let joined: String = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(joined, text);
        for pair in items.windows(2) {
            assert_eq!(pair[0].end, pair[1].begin);
        }
        assert!(items.last().unwrap().is_final);
        assert_eq!(items.iter().filter(|i| i.is_final).count(), 1);
    }

    #[test]
    fn splits_possessive_and_keeps_contractions() {
        let words: Vec<String> = scan("John's dog don't").into_iter().filter(|i| i.is_word()).map(|i| i.text).collect();
        assert_eq!(words, vec!["John", "'s", "dog", "don't"]);
    }

    #[test]
    fn numbers_keep_groups_and_ordinals() {
        let items = scan("1,200 3rd 4.5");
        let nums: Vec<&str> =
            items.iter().filter(|i| i.kind == ScanKind::Number).map(|i| i.text.as_str()).collect();
        assert_eq!(nums, vec!["1,200", "3rd", "4.5"]);
    }

    #[test]
    fn sentence_starts_skip_abbreviations_and_initials() {
        let items = scan("Dr. John F. Kennedy spoke. Then he left.\n\nnew para");
        let starts: Vec<&str> =
            items.iter().filter(|i| i.sentence_start).map(|i| i.text.as_str()).collect();
        assert_eq!(starts, vec!["Dr", "Then", "new"]);
    }

    #[test]
    fn lookahead_and_cap_codes() {
        let items = scan("NASA launched");
        assert_eq!(items[0].cap, CapCode::Upper);
        assert_eq!(items[0].lookahead, Some(' '));
        assert_eq!(items[2].cap, CapCode::Lower);
        assert_eq!(items[2].lookahead, None);
    }
}
