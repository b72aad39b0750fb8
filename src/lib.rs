extern crate self as phrasefinder;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod grammar;
mod lexicon;
mod phrase;
mod pretty;
mod scanner;

pub use api::{
    Context, Extraction, Options, ParseDetails, ParseResult, ParseResultVerbose, PhraseMode, TokenTag, parse,
    parse_verbose_with, parse_with, parse_with_lexicon,
};
pub use engine::{
    CompoundMetrics, Extractor, FoundPhrase, ParallelMetrics, Penalties, PhraseSink, RunMetrics, StackMetrics, YearBias,
};
pub use error::{LexiconError, PrettyError};
pub use lexicon::{BasicLexicon, CompoundCursor, Lexicon};
pub use phrase::{
    AdjPhrase, AdvPhrase, CityPhrase, ClockTime, DatePhrase, NamePhrase, NounPhrase, Phrase, PlaceNamePhrase,
    PossPhrase, PrepPhrase, TimePhrase, VerbPhrase, Word,
};
pub use pretty::{apply_pattern, canonical};
pub use scanner::{ScanItem, ScanKind, Scanner};

// --- Token model -------------------------------------------------------------

/// Half-open byte span into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span { start: self.start.min(other.start), end: self.end.max(other.end) }
    }
}

/// Capitalization code assigned by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapCode {
    /// All letters lowercase.
    Lower,
    /// First letter uppercase, at least one lowercase letter follows (or a single capital).
    Initial,
    /// Two or more letters, all uppercase.
    Upper,
    /// No letters (digits, symbols).
    Other,
}

impl CapCode {
    /// Classify a surface string.
    pub fn of(text: &str) -> CapCode {
        let mut letters = text.chars().filter(|c| c.is_alphabetic());
        let Some(first) = letters.next() else {
            return CapCode::Other;
        };
        let rest: Vec<char> = letters.collect();
        if first.is_lowercase() {
            return CapCode::Lower;
        }
        if rest.is_empty() {
            return CapCode::Initial;
        }
        if rest.iter().all(|c| c.is_uppercase()) { CapCode::Upper } else { CapCode::Initial }
    }

    pub fn is_capitalized(self) -> bool {
        matches!(self, CapCode::Initial | CapCode::Upper)
    }
}

bitflags::bitflags! {
    /// Part-of-speech-like categories assigned by the lexicon.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Category: u32 {
        const NOUN        = 1 << 0;
        const VERB        = 1 << 1;
        const ADJECTIVE   = 1 << 2;
        const ADVERB      = 1 << 3;
        const DETERMINER  = 1 << 4;
        const PREPOSITION = 1 << 5;
        const PRONOUN     = 1 << 6;
        const CONJUNCTION = 1 << 7;
        const NUMBER      = 1 << 8;
        const ORDINAL     = 1 << 9;
        const MONTH       = 1 << 10;
        const WEEKDAY     = 1 << 11;
        const TITLE       = 1 << 12;
        const FIRSTNAME   = 1 << 13;
        const LASTNAME    = 1 << 14;
        const NAME_SUFFIX = 1 << 15;
        const CITY        = 1 << 16;
        const STATE       = 1 << 17;
        const COUNTRY     = 1 << 18;
        const PLACE       = 1 << 19;
        const TIMEZONE    = 1 << 20;
        const DAYTIME     = 1 << 21;
        const POSSESSIVE  = 1 << 22;
    }
}

impl Category {
    /// Categories read by the general noun/verb-phrase grammar.
    pub const GENERAL: Category = Category::NOUN
        .union(Category::VERB)
        .union(Category::ADJECTIVE)
        .union(Category::ADVERB)
        .union(Category::DETERMINER)
        .union(Category::PREPOSITION);

    /// Short lowercase label used by part-of-speech tagging and reports.
    pub fn label(self) -> &'static str {
        Self::LABELS.iter().find(|(c, _)| self.contains(*c)).map(|(_, l)| *l).unwrap_or("unknown")
    }

    /// The most specific single category in the set, if any.
    pub fn primary(self) -> Option<Category> {
        Self::LABELS.iter().find(|(c, _)| self.contains(*c)).map(|(c, _)| *c)
    }

    const LABELS: &'static [(Category, &'static str)] = &[
        (Category::NUMBER, "number"),
        (Category::ORDINAL, "ordinal"),
        (Category::MONTH, "month"),
        (Category::WEEKDAY, "weekday"),
        (Category::TITLE, "title"),
        (Category::FIRSTNAME, "firstname"),
        (Category::LASTNAME, "lastname"),
        (Category::NAME_SUFFIX, "namesuffix"),
        (Category::CITY, "city"),
        (Category::STATE, "state"),
        (Category::COUNTRY, "country"),
        (Category::PLACE, "place"),
        (Category::TIMEZONE, "timezone"),
        (Category::DAYTIME, "daytime"),
        (Category::POSSESSIVE, "possessive"),
        (Category::DETERMINER, "det"),
        (Category::PREPOSITION, "prep"),
        (Category::PRONOUN, "pron"),
        (Category::CONJUNCTION, "conj"),
        (Category::ADVERB, "adv"),
        (Category::ADJECTIVE, "adj"),
        (Category::NOUN, "noun"),
        (Category::VERB, "verb"),
    ];
}

bitflags::bitflags! {
    /// Lexical feature flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Features: u32 {
        const SINGULAR      = 1 << 0;
        const PLURAL        = 1 << 1;
        /// Word that is normally written with a trailing period ("Dr", "Mr", "Inc").
        const ABBREVIATION  = 1 << 2;
        /// Function word that ends any phrase in progress.
        const BREAK_WORD    = 1 << 3;
        /// Noun used as a unit of counting ("mile", "dollar").
        const UNIT          = 1 << 4;
        /// Number word that scales what precedes it ("hundred", "thousand").
        const MULTIPLIER    = 1 << 5;
        /// Lowercase particle allowed inside a surname ("van", "de").
        const NAME_PARTICLE = 1 << 6;
        /// Closed-class word ignored by the running case flags.
        const FUNCTION_WORD = 1 << 7;
        /// Sense guessed at runtime rather than listed.
        const GUESSED       = 1 << 8;
        /// Token built by the compound-word resolver.
        const COMPOUND      = 1 << 9;
        /// Determiner demanding a singular head ("a", "each").
        const WANTS_SINGULAR = 1 << 10;
        /// Determiner demanding a plural head ("these", "several").
        const WANTS_PLURAL  = 1 << 11;
        /// Synthetic boundary token for sentence breaks and end of input.
        const BOUNDARY      = 1 << 12;
    }
}

/// One scanned word, as seen by the engine.
///
/// Produced from a [`ScanItem`] plus lexicon lookups; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub categories: Category,
    pub features: Features,
    pub cap: CapCode,
    pub value: Option<f64>,
    pub span: Span,
    pub sentence_start: bool,
    pub source_id: u32,
    pub lookahead: Option<char>,
    pub is_final: bool,
}

impl Token {
    /// Build a token from a scanned word by consulting the lexicon.
    pub fn from_scan(item: &ScanItem, lexicon: &dyn Lexicon) -> Token {
        Token {
            text: item.text.clone(),
            categories: lexicon.category_of(&item.text),
            features: lexicon.features_of(&item.text),
            cap: item.cap,
            value: lexicon.numeric_value(&item.text),
            span: Span::new(item.begin, item.end),
            sentence_start: item.sentence_start,
            source_id: item.source_id,
            lookahead: item.lookahead,
            is_final: item.is_final,
        }
    }

    /// Zero-width token that no grammar clause accepts; delivered at hard breaks and end of input.
    pub(crate) fn boundary(offset: usize) -> Token {
        Token {
            text: String::new(),
            categories: Category::empty(),
            features: Features::BOUNDARY,
            cap: CapCode::Other,
            value: None,
            span: Span::new(offset, offset),
            sentence_start: false,
            source_id: 0,
            lookahead: None,
            is_final: true,
        }
    }

    pub fn is(&self, category: Category) -> bool {
        self.categories.intersects(category)
    }

    pub fn has(&self, feature: Features) -> bool {
        self.features.intersects(feature)
    }

    pub fn is_boundary(&self) -> bool {
        self.features.contains(Features::BOUNDARY)
    }

    /// Lowercased surface text, the lexicon key.
    pub fn key(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn word(&self) -> Word {
        Word::new(&self.text, self.span)
    }
}
