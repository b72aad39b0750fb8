use crate::engine::{Extractor, FoundPhrase, Penalties, PhraseSink, RunMetrics, YearBias};
use crate::lexicon::{BasicLexicon, Lexicon};
use crate::phrase::Phrase;
use crate::Category;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::time::Duration;

/// Extraction context.
///
/// This holds the environment needed to judge years ("1999" is plausibly a
/// year, "2999" is not; "'97" is 1997).
#[derive(Debug, Clone)]
pub struct Context {
    /// Reference datetime that stands in for "now".
    pub reference_time: NaiveDateTime,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            let date = NaiveDate::from_ymd_opt(2013, 2, 12).unwrap();
            let time = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
            Self { reference_time: NaiveDateTime::new(date, time) }
        } else {
            Self { reference_time: Local::now().naive_local() }
        }
    }
}

/// Which phrases the grammar looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhraseMode {
    /// Every phrase family, including general noun and verb phrases.
    #[default]
    Full,
    /// Personal names only.
    NamesOnly,
}

/// Options that affect extraction.
///
/// Fixed for the lifetime of an [`Extractor`].
#[derive(Debug, Clone)]
pub struct Options {
    /// Capitalization counts as evidence (and its absence as counter-evidence).
    pub case_sensitive: bool,
    /// Log every transition at `trace` level.
    pub trace: bool,
    pub mode: PhraseMode,
    /// Report each word's primary category to the sink.
    pub tag_parts_of_speech: bool,
    /// Penalize determiner/head number disagreement ("these dog").
    pub check_agreement: bool,
    /// Phrases are emitted only when their confidence is strictly above this.
    pub threshold: i32,
    pub initial_confidence: i32,
    /// How many years ahead of the reference year a two-digit year may point.
    pub future_year_horizon: i32,
    pub year_bias: YearBias,
    /// Capitalized unknown words no longer head noun phrases.
    pub suppress_proper_nouns: bool,
    pub penalties: Penalties,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            case_sensitive: true,
            trace: false,
            mode: PhraseMode::Full,
            tag_parts_of_speech: false,
            check_agreement: true,
            threshold: 5,
            initial_confidence: 10,
            future_year_horizon: 25,
            year_bias: YearBias::Nearest,
            suppress_proper_nouns: false,
            penalties: Penalties::default(),
        }
    }
}

/// A phrase found in the input.
///
/// `start`/`end` are byte offsets into the original input.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Phrase kind, e.g. `"date"` or `"name"`.
    pub kind: String,
    /// Slice of the original input that matched.
    pub body: String,
    /// Normalized value, e.g. `"1999-03-03"` for a date.
    pub value: String,
    pub start: usize,
    pub end: usize,
    pub confidence: i32,
    /// The structured phrase.
    pub phrase: Phrase,
}

/// A word with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTag {
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Category label, e.g. `"noun"` or `"month"`.
    pub tag: String,
}

/// Result from [`parse`] and [`parse_with`].
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The input text.
    pub text: String,
    pub results: Vec<Extraction>,
    /// Total elapsed time spent extracting.
    pub elapsed: Duration,
}

/// Additional details returned by [`parse_verbose_with`] and [`parse_with_lexicon`].
#[derive(Debug, Clone)]
pub struct ParseDetails {
    pub metrics: RunMetrics,
    /// Part-of-speech tags, when [`Options::tag_parts_of_speech`] is set.
    pub tags: Vec<TokenTag>,
    /// Every word position reported to the sink, in input order.
    pub positions: Vec<(usize, usize)>,
}

/// Result from [`parse_verbose_with`] and [`parse_with_lexicon`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    pub text: String,
    pub results: Vec<Extraction>,
    pub elapsed: Duration,
    pub details: ParseDetails,
}

/// Extract phrases from `text` with the English seed lexicon and a default [`Context`].
///
/// # Example
/// ```
/// use phrasefinder::parse;
///
/// let out = parse("John Smith");
/// assert_eq!(out.results.len(), 1);
/// assert_eq!(out.results[0].kind, "name");
/// ```
pub fn parse(text: &str) -> ParseResult {
    parse_with(text, &Context::default(), &Options::default())
}

/// Extract phrases from `text` with the provided `context`/`options`.
///
/// Use this when you want deterministic year decisions by supplying a reference time.
pub fn parse_with(text: &str, context: &Context, options: &Options) -> ParseResult {
    let run = run(text, BasicLexicon::shared(), context, options);
    ParseResult { text: text.to_string(), results: run.results, elapsed: run.elapsed }
}

/// Extract phrases and return the run metrics, tags and word positions as well.
pub fn parse_verbose_with(text: &str, context: &Context, options: &Options) -> ParseResultVerbose {
    parse_with_lexicon(text, BasicLexicon::shared(), context, options)
}

/// Like [`parse_verbose_with`], with a caller-supplied lexicon.
pub fn parse_with_lexicon(
    text: &str,
    lexicon: &dyn Lexicon,
    context: &Context,
    options: &Options,
) -> ParseResultVerbose {
    let run = run(text, lexicon, context, options);
    ParseResultVerbose {
        text: text.to_string(),
        results: run.results,
        elapsed: run.elapsed,
        details: ParseDetails { metrics: run.metrics, tags: run.sink.tags, positions: run.sink.positions },
    }
}

/// Sink keeping everything the verbose result reports.
#[derive(Debug, Default)]
struct Collector {
    found: Vec<FoundPhrase>,
    tags: Vec<TokenTag>,
    positions: Vec<(usize, usize)>,
}

impl PhraseSink for Collector {
    fn receive_phrase(&mut self, found: FoundPhrase) {
        self.found.push(found);
    }

    fn receive_token_position(&mut self, _text: &str, start: usize, end: usize) {
        self.positions.push((start, end));
    }

    fn receive_tag(&mut self, text: &str, start: usize, end: usize, category: Category) {
        self.tags.push(TokenTag { text: text.to_string(), start, end, tag: category.label().to_string() });
    }
}

struct Run {
    results: Vec<Extraction>,
    elapsed: Duration,
    metrics: RunMetrics,
    sink: Collector,
}

fn run(text: &str, lexicon: &dyn Lexicon, context: &Context, options: &Options) -> Run {
    let mut collector = Collector::default();
    let mut extractor = Extractor::new(lexicon, context, options, &mut collector);
    for item in crate::Scanner::new(text, lexicon) {
        extractor.feed(item);
    }
    extractor.finish();
    let metrics = extractor.metrics().clone();
    drop(extractor);

    let found = std::mem::take(&mut collector.found);
    Run {
        results: found.into_iter().map(|f| to_extraction(text, f)).collect(),
        elapsed: metrics.total,
        metrics,
        sink: collector,
    }
}

fn to_extraction(input: &str, found: FoundPhrase) -> Extraction {
    let body = input.get(found.start..found.end).unwrap_or("").to_string();
    Extraction {
        kind: found.phrase.kind().to_string(),
        body,
        value: found.phrase.value(),
        start: found.start,
        end: found.end,
        confidence: found.confidence,
        phrase: found.phrase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_context() -> Context {
        let date = NaiveDate::from_ymd_opt(2013, 2, 12).unwrap();
        let time = NaiveTime::from_hms_opt(4, 30, 0).unwrap();
        Context { reference_time: NaiveDateTime::new(date, time) }
    }

    #[test]
    fn parse_with_returns_extractions() {
        let ctx = reference_context();
        let res = parse_with("It was March 3, 1999.", &ctx, &Options::default());

        assert_eq!(res.text, "It was March 3, 1999.");
        assert!(res.elapsed >= Duration::ZERO);

        let date = res.results.iter().find(|e| e.kind == "date").unwrap();
        assert_eq!(date.body, "March 3, 1999");
        assert_eq!(date.start, 7);
        assert_eq!(date.end, 20);
        assert_eq!(date.value, "1999-03-03");
        assert_eq!(date.confidence, 10);
    }

    #[test]
    fn earlier_parses_leave_later_ones_unchanged() {
        let ctx = reference_context();
        let options = Options::default();
        let summary = |res: ParseResult| -> Vec<(String, String, i32)> {
            res.results.into_iter().map(|e| (e.kind, e.body, e.confidence)).collect()
        };
        let before = summary(parse_with("the big Zorblax", &ctx, &options));
        parse_with("Dr. Zorblax", &ctx, &options);
        let after = summary(parse_with("the big Zorblax", &ctx, &options));
        assert_eq!(before, vec![("noun".to_string(), "the big Zorblax".to_string(), 10)]);
        assert_eq!(before, after);
        assert!(!BasicLexicon::shared().is_known_word("Zorblax"));
    }

    #[test]
    fn reference_time_decides_two_digit_years() {
        let later = Context {
            reference_time: NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2090, 1, 1).unwrap(),
                NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            ),
        };
        let res = parse_with("March '97", &later, &Options::default());
        assert_eq!(res.results[0].value, "2097-03-XX");

        let res = parse_with("March '97", &reference_context(), &Options::default());
        assert_eq!(res.results[0].value, "1997-03-XX");
    }

    #[test]
    fn parse_verbose_includes_metrics_tags_and_positions() {
        let ctx = reference_context();
        let options = Options { tag_parts_of_speech: true, ..Options::default() };
        let res = parse_verbose_with("the dog barked", &ctx, &options);

        assert_eq!(res.elapsed, res.details.metrics.total);
        assert_eq!(res.details.metrics.words, 3);
        assert_eq!(res.details.positions, vec![(0, 3), (4, 7), (8, 14)]);
        let tags: Vec<&str> = res.details.tags.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["det", "noun"]);
    }

    #[test]
    fn custom_lexicon_is_used() {
        let mut lexicon = BasicLexicon::english();
        lexicon.load_entries("zorblax | city\n").unwrap();
        let res = parse_with_lexicon("Zorblax, France", &lexicon, &reference_context(), &Options::default());
        assert_eq!(res.results.len(), 1);
        assert_eq!(res.results[0].kind, "city");
        assert_eq!(res.results[0].body, "Zorblax, France");
    }
}
