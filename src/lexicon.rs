//! Lexicon interface and the built-in English lexicon.
//!
//! The engine only *reads* the lexicon: categories, features, numeric values,
//! compound-word continuations and morphological roots. The single exception is
//! [`Lexicon::add_guessed_sense`], used when the name grammar commits to an
//! unknown capitalized word as a surname. An extractor sends those guesses to a
//! [`RunLexicon`] overlay that lives as long as the run, so a lexicon shared
//! between runs never changes under them.
//!
//! ## Entry text format
//!
//! [`BasicLexicon::load_entries`] accepts one entry per line:
//!
//! ```text
//! # word       | categories       | features        | value | pattern
//! mcdonald     | lastname         |                 |       | AaAaaaaa
//! dozen        | number,noun      | unit            | 12
//! cape cod     | place            |
//! ```
//!
//! Multi-word entries become compound words. Categories and features use the
//! lowercase labels from `CATEGORY_NAMES` / `FEATURE_NAMES`.

#[path = "lexicon/seed.rs"]
mod seed;

use crate::error::LexiconError;
use crate::{Category, Features};
use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// Position inside a compound-word tree.
///
/// `complete` means the words seen so far spell a whole compound; `extendable`
/// means at least one longer compound shares this prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundCursor {
    pub node: usize,
    pub complete: bool,
    pub extendable: bool,
}

/// Word knowledge consumed by the engine.
///
/// All lookups are case-insensitive.
pub trait Lexicon {
    fn category_of(&self, word: &str) -> Category;

    fn features_of(&self, word: &str) -> Features;

    fn numeric_value(&self, word: &str) -> Option<f64>;

    /// Advance a compound-word match by `word`. `partial == None` asks whether
    /// `word` can begin a compound.
    fn compound_continuation(&self, word: &str, partial: Option<CompoundCursor>) -> Option<CompoundCursor>;

    fn is_known_word(&self, word: &str) -> bool;

    /// Known dictionary roots of an inflected form ("libraries" -> "library").
    fn morphological_roots(&self, word: &str) -> Vec<String>;

    /// Record a sense invented while assembling a phrase (e.g. a guessed surname).
    fn add_guessed_sense(&self, word: &str, category: Category);

    /// Capitalization pattern for the pretty-printer, e.g. `AaAaaaaa` for "McDonald".
    fn capitalization_pattern(&self, _word: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    categories: Category,
    features: Features,
    value: Option<f64>,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<String, usize>,
    complete: bool,
}

const CATEGORY_NAMES: &[(&str, Category)] = &[
    ("noun", Category::NOUN),
    ("verb", Category::VERB),
    ("adj", Category::ADJECTIVE),
    ("adv", Category::ADVERB),
    ("det", Category::DETERMINER),
    ("prep", Category::PREPOSITION),
    ("pron", Category::PRONOUN),
    ("conj", Category::CONJUNCTION),
    ("number", Category::NUMBER),
    ("ordinal", Category::ORDINAL),
    ("month", Category::MONTH),
    ("weekday", Category::WEEKDAY),
    ("title", Category::TITLE),
    ("firstname", Category::FIRSTNAME),
    ("lastname", Category::LASTNAME),
    ("namesuffix", Category::NAME_SUFFIX),
    ("city", Category::CITY),
    ("state", Category::STATE),
    ("country", Category::COUNTRY),
    ("place", Category::PLACE),
    ("timezone", Category::TIMEZONE),
    ("daytime", Category::DAYTIME),
    ("possessive", Category::POSSESSIVE),
];

const FEATURE_NAMES: &[(&str, Features)] = &[
    ("singular", Features::SINGULAR),
    ("plural", Features::PLURAL),
    ("abbrev", Features::ABBREVIATION),
    ("break", Features::BREAK_WORD),
    ("unit", Features::UNIT),
    ("multiplier", Features::MULTIPLIER),
    ("particle", Features::NAME_PARTICLE),
    ("function", Features::FUNCTION_WORD),
    ("wants-singular", Features::WANTS_SINGULAR),
    ("wants-plural", Features::WANTS_PLURAL),
];

static SHARED: Lazy<BasicLexicon> = Lazy::new(BasicLexicon::english);

/// In-memory lexicon seeded with an English word list.
#[derive(Debug)]
pub struct BasicLexicon {
    entries: HashMap<String, Entry>,
    trie: Vec<TrieNode>,
    patterns: HashMap<String, String>,
    guessed: RwLock<HashMap<String, Category>>,
}

impl BasicLexicon {
    /// An empty lexicon (digits are still recognized as numbers).
    pub fn empty() -> Self {
        BasicLexicon {
            entries: HashMap::new(),
            trie: vec![TrieNode::default()],
            patterns: HashMap::new(),
            guessed: RwLock::new(HashMap::new()),
        }
    }

    /// The built-in English lexicon.
    pub fn english() -> Self {
        let mut lex = BasicLexicon::empty();
        seed::install(&mut lex);
        lex
    }

    /// Process-wide English lexicon used by [`crate::parse`].
    pub fn shared() -> &'static BasicLexicon {
        &SHARED
    }

    /// English lexicon extended with the entries in `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let text = std::fs::read_to_string(path)?;
        let mut lex = BasicLexicon::english();
        lex.load_entries(&text)?;
        Ok(lex)
    }

    /// Add (or extend) one entry. Multi-word entries are also registered as compounds.
    pub fn insert(&mut self, word: &str, categories: Category, features: Features, value: Option<f64>) {
        let key = normalize_key(word);
        let entry = self.entries.entry(key.clone()).or_default();
        entry.categories |= categories;
        entry.features |= features;
        if value.is_some() {
            entry.value = value;
        }
        if key.contains(' ') {
            self.insert_compound(&key);
        }
    }

    pub fn set_pattern(&mut self, word: &str, pattern: &str) {
        self.patterns.insert(normalize_key(word), pattern.to_string());
    }

    fn insert_compound(&mut self, key: &str) {
        let mut node = 0;
        for part in key.split(' ') {
            node = match self.trie[node].children.get(part) {
                Some(&next) => next,
                None => {
                    self.trie.push(TrieNode::default());
                    let next = self.trie.len() - 1;
                    self.trie[node].children.insert(part.to_string(), next);
                    next
                }
            };
        }
        self.trie[node].complete = true;
    }

    /// Parse entries in the line format described in the module docs.
    ///
    /// Returns the number of entries added.
    pub fn load_entries(&mut self, text: &str) -> Result<usize, LexiconError> {
        let mut added = 0;
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let cols: Vec<&str> = line.split('|').map(str::trim).collect();
            if cols.len() < 2 || cols[0].is_empty() {
                return Err(LexiconError::Malformed {
                    line: line_no,
                    reason: "expected at least 'word | categories'".to_string(),
                });
            }
            if cols.len() > 5 {
                return Err(LexiconError::Malformed { line: line_no, reason: "too many columns".to_string() });
            }

            let mut categories = Category::empty();
            for name in cols[1].split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let cat = CATEGORY_NAMES.iter().find(|(n, _)| *n == name).map(|(_, c)| *c).ok_or_else(|| {
                    LexiconError::UnknownCategory { line: line_no, name: name.to_string() }
                })?;
                categories |= cat;
            }

            let mut features = Features::empty();
            if let Some(col) = cols.get(2) {
                for name in col.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    let feat = FEATURE_NAMES.iter().find(|(n, _)| *n == name).map(|(_, f)| *f).ok_or_else(|| {
                        LexiconError::UnknownFeature { line: line_no, name: name.to_string() }
                    })?;
                    features |= feat;
                }
            }

            let value = match cols.get(3).filter(|v| !v.is_empty()) {
                Some(v) => Some(
                    v.parse::<f64>()
                        .map_err(|_| LexiconError::InvalidValue { line: line_no, value: v.to_string() })?,
                ),
                None => None,
            };

            self.insert(cols[0], categories, features, value);
            if let Some(pattern) = cols.get(4).filter(|p| !p.is_empty()) {
                self.set_pattern(cols[0], pattern);
            }
            added += 1;
        }
        Ok(added)
    }

    fn entry(&self, key: &str) -> Option<Entry> {
        self.entries.get(key).copied()
    }

    fn guessed(&self, key: &str) -> Option<Category> {
        self.guessed.read().ok().and_then(|g| g.get(key).copied())
    }

    /// Categories an inflected form inherits from its roots, with the inflection's features.
    fn inflected(&self, key: &str) -> (Category, Features) {
        let mut cats = Category::empty();
        let mut feats = Features::empty();
        for (root, suffix) in root_candidates(key) {
            let Some(entry) = self.entry(&root) else { continue };
            match suffix {
                Suffix::Plural => {
                    if entry.categories.contains(Category::NOUN) {
                        cats |= Category::NOUN;
                        feats |= Features::PLURAL | (entry.features & Features::UNIT);
                    }
                    if entry.categories.contains(Category::VERB) {
                        cats |= Category::VERB;
                    }
                }
                Suffix::Past | Suffix::Progressive => {
                    if entry.categories.contains(Category::VERB) {
                        cats |= Category::VERB;
                    }
                }
            }
        }
        (cats, feats)
    }
}

impl Default for BasicLexicon {
    fn default() -> Self {
        BasicLexicon::english()
    }
}

fn normalize_key(word: &str) -> String {
    word.split_whitespace().map(|w| w.to_lowercase()).collect::<Vec<_>>().join(" ")
}

/// Digit strings, optionally grouped by commas, with a decimal part or an ordinal suffix.
fn digit_value(key: &str) -> Option<(f64, bool)> {
    let caps = regex!(r"^(\d{1,3}(?:,\d{3})+|\d+)(\.\d+)?(st|nd|rd|th)?$").captures(key)?;
    let mut digits = caps.get(1)?.as_str().replace(',', "");
    if let Some(frac) = caps.get(2) {
        digits.push_str(frac.as_str());
    }
    let value = digits.parse::<f64>().ok()?;
    Some((value, caps.get(3).is_some()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    Plural,
    Past,
    Progressive,
}

fn root_candidates(key: &str) -> Vec<(String, Suffix)> {
    let mut out = Vec::new();
    if let Some(stem) = key.strip_suffix("ies") {
        out.push((format!("{stem}y"), Suffix::Plural));
    }
    if let Some(stem) = key.strip_suffix("es") {
        out.push((stem.to_string(), Suffix::Plural));
    }
    if let Some(stem) = key.strip_suffix('s') {
        if !stem.ends_with('s') && !stem.is_empty() {
            out.push((stem.to_string(), Suffix::Plural));
        }
    }
    if let Some(stem) = key.strip_suffix("ied") {
        out.push((format!("{stem}y"), Suffix::Past));
    }
    if let Some(stem) = key.strip_suffix("ed") {
        out.push((stem.to_string(), Suffix::Past));
        out.push((format!("{stem}e"), Suffix::Past));
    }
    if let Some(stem) = key.strip_suffix("ing") {
        out.push((stem.to_string(), Suffix::Progressive));
        out.push((format!("{stem}e"), Suffix::Progressive));
    }
    out
}

impl Lexicon for BasicLexicon {
    fn category_of(&self, word: &str) -> Category {
        let key = normalize_key(word);
        if let Some((_, ordinal)) = digit_value(&key) {
            return if ordinal { Category::NUMBER | Category::ORDINAL } else { Category::NUMBER };
        }
        let mut cats = self.entry(&key).map(|e| e.categories).unwrap_or(Category::empty());
        if let Some(g) = self.guessed(&key) {
            cats |= g;
        }
        if !cats.intersects(Category::NOUN | Category::VERB) {
            cats |= self.inflected(&key).0;
        }
        cats
    }

    fn features_of(&self, word: &str) -> Features {
        let key = normalize_key(word);
        if digit_value(&key).is_some() {
            return Features::empty();
        }
        let mut feats = self.entry(&key).map(|e| e.features).unwrap_or_default();
        let listed = self.entry(&key).map(|e| e.categories).unwrap_or(Category::empty());
        if !listed.intersects(Category::NOUN | Category::VERB) {
            feats |= self.inflected(&key).1;
        }
        if self.guessed(&key).is_some() {
            feats |= Features::GUESSED;
        }
        if key.contains(' ') {
            feats |= Features::COMPOUND;
        }
        let cats = self.category_of(&key);
        if cats.contains(Category::NOUN) && !feats.contains(Features::PLURAL) {
            feats |= Features::SINGULAR;
        }
        feats
    }

    fn numeric_value(&self, word: &str) -> Option<f64> {
        let key = normalize_key(word);
        if let Some((value, _)) = digit_value(&key) {
            return Some(value);
        }
        self.entry(&key).and_then(|e| e.value)
    }

    fn compound_continuation(&self, word: &str, partial: Option<CompoundCursor>) -> Option<CompoundCursor> {
        let from = partial.map(|c| c.node).unwrap_or(0);
        let next = *self.trie.get(from)?.children.get(&word.to_lowercase())?;
        let node = &self.trie[next];
        Some(CompoundCursor { node: next, complete: node.complete, extendable: !node.children.is_empty() })
    }

    fn is_known_word(&self, word: &str) -> bool {
        let key = normalize_key(word);
        self.entries.contains_key(&key)
            || self.guessed(&key).is_some()
            || digit_value(&key).is_some()
            || !self.morphological_roots(&key).is_empty()
    }

    fn morphological_roots(&self, word: &str) -> Vec<String> {
        let key = normalize_key(word);
        let mut roots: Vec<String> =
            root_candidates(&key).into_iter().map(|(r, _)| r).filter(|r| self.entries.contains_key(r)).collect();
        roots.dedup();
        roots
    }

    fn add_guessed_sense(&self, word: &str, category: Category) {
        if let Ok(mut guessed) = self.guessed.write() {
            *guessed.entry(normalize_key(word)).or_insert(Category::empty()) |= category;
        }
    }

    fn capitalization_pattern(&self, word: &str) -> Option<String> {
        self.patterns.get(&normalize_key(word)).cloned()
    }
}

/// One run's view of a lexicon: lookups go to `base`, guessed senses stay here.
pub(crate) struct RunLexicon<'a> {
    base: &'a dyn Lexicon,
    guessed: RefCell<HashMap<String, Category>>,
}

impl<'a> RunLexicon<'a> {
    pub fn new(base: &'a dyn Lexicon) -> Self {
        RunLexicon { base, guessed: RefCell::new(HashMap::new()) }
    }

    fn guessed(&self, word: &str) -> Option<Category> {
        self.guessed.borrow().get(&normalize_key(word)).copied()
    }
}

impl Lexicon for RunLexicon<'_> {
    fn category_of(&self, word: &str) -> Category {
        self.base.category_of(word) | self.guessed(word).unwrap_or(Category::empty())
    }

    fn features_of(&self, word: &str) -> Features {
        let feats = self.base.features_of(word);
        if self.guessed(word).is_some() { feats | Features::GUESSED } else { feats }
    }

    fn numeric_value(&self, word: &str) -> Option<f64> {
        self.base.numeric_value(word)
    }

    fn compound_continuation(&self, word: &str, partial: Option<CompoundCursor>) -> Option<CompoundCursor> {
        self.base.compound_continuation(word, partial)
    }

    fn is_known_word(&self, word: &str) -> bool {
        self.guessed(word).is_some() || self.base.is_known_word(word)
    }

    fn morphological_roots(&self, word: &str) -> Vec<String> {
        self.base.morphological_roots(word)
    }

    fn add_guessed_sense(&self, word: &str, category: Category) {
        *self.guessed.borrow_mut().entry(normalize_key(word)).or_insert(Category::empty()) |= category;
    }

    fn capitalization_pattern(&self, word: &str) -> Option<String> {
        self.base.capitalization_pattern(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_numbers_with_values() {
        let lex = BasicLexicon::empty();
        assert_eq!(lex.category_of("1999"), Category::NUMBER);
        assert_eq!(lex.numeric_value("1,200"), Some(1200.0));
        assert_eq!(lex.numeric_value("3.5"), Some(3.5));
        assert!(lex.category_of("3rd").contains(Category::ORDINAL));
        assert_eq!(lex.numeric_value("3rd"), Some(3.0));
    }

    #[test]
    fn plural_nouns_inherit_from_roots() {
        let lex = BasicLexicon::english();
        assert!(lex.category_of("libraries").contains(Category::NOUN));
        assert!(lex.features_of("libraries").contains(Features::PLURAL));
        assert!(lex.features_of("dog").contains(Features::SINGULAR));
        assert_eq!(lex.morphological_roots("dogs"), vec!["dog".to_string()]);
    }

    #[test]
    fn compound_cursor_walks_the_tree() {
        let lex = BasicLexicon::english();
        let new = lex.compound_continuation("New", None).unwrap();
        assert!(!new.complete);
        let york = lex.compound_continuation("york", Some(new)).unwrap();
        assert!(york.complete);
        assert!(york.extendable, "'new york city' extends 'new york'");
        assert!(lex.compound_continuation("car", Some(new)).is_none());
    }

    #[test]
    fn load_entries_parses_columns() {
        let mut lex = BasicLexicon::empty();
        let added = lex
            .load_entries("# comment\nmcdonald | lastname | | | AaAaaaaa\ndozen | number,noun | unit | 12\n")
            .unwrap();
        assert_eq!(added, 2);
        assert!(lex.category_of("McDonald").contains(Category::LASTNAME));
        assert_eq!(lex.numeric_value("dozen"), Some(12.0));
        assert!(lex.features_of("dozen").contains(Features::UNIT));
        assert_eq!(lex.capitalization_pattern("mcdonald").as_deref(), Some("AaAaaaaa"));
    }

    #[test]
    fn load_entries_reports_bad_lines() {
        let mut lex = BasicLexicon::empty();
        let err = lex.load_entries("foo | gizmo\n").unwrap_err();
        assert_eq!(err, LexiconError::UnknownCategory { line: 1, name: "gizmo".to_string() });
        let err = lex.load_entries("\nfoo | noun | | twelve\n").unwrap_err();
        assert_eq!(err, LexiconError::InvalidValue { line: 2, value: "twelve".to_string() });
    }

    #[test]
    fn guessed_senses_are_visible_through_shared_reference() {
        let lex = BasicLexicon::empty();
        assert!(!lex.is_known_word("Quimby"));
        lex.add_guessed_sense("Quimby", Category::LASTNAME);
        assert!(lex.is_known_word("quimby"));
        assert!(lex.category_of("Quimby").contains(Category::LASTNAME));
        assert!(lex.features_of("Quimby").contains(Features::GUESSED));
    }

    #[test]
    fn run_lexicon_keeps_guesses_to_itself() {
        let base = BasicLexicon::english();
        let run = RunLexicon::new(&base);
        run.add_guessed_sense("Zorblax", Category::LASTNAME);
        assert!(run.category_of("zorblax").contains(Category::LASTNAME));
        assert!(run.features_of("Zorblax").contains(Features::GUESSED));
        assert!(run.is_known_word("Zorblax"));
        assert!(!base.is_known_word("Zorblax"));
        assert_eq!(base.category_of("Zorblax"), Category::empty());
    }
}
