use crate::{BasicLexicon, Context, Extractor, FoundPhrase, Options, Penalties, Phrase, PhraseMode, RunMetrics};

fn extract_with(text: &str, options: &Options) -> (Vec<FoundPhrase>, RunMetrics) {
    let lex = BasicLexicon::english();
    let mut extractor = Extractor::new(&lex, &Context::default(), options, Vec::new());
    for item in crate::Scanner::new(text, &lex) {
        extractor.feed(item);
    }
    extractor.finish();
    let metrics = extractor.metrics().clone();
    (extractor.into_sink(), metrics)
}

fn extract(text: &str) -> Vec<FoundPhrase> {
    extract_with(text, &Options::default()).0
}

fn slices<'a>(text: &'a str, found: &[FoundPhrase]) -> Vec<(&'static str, &'a str)> {
    found.iter().map(|f| (f.phrase.kind(), &text[f.start..f.end])).collect()
}

#[test]
fn single_phrase_examples() {
    // (input, kind, matched text, confidence)
    let cases: Vec<(&str, &str, &str, i32)> = vec![
        ("John Smith", "name", "John Smith", 10),
        ("John F. Kennedy", "name", "John F. Kennedy", 10),
        ("Dr. Quimby", "name", "Dr. Quimby", 10),
        ("March 3, 1999", "date", "March 3, 1999", 10),
        ("Tuesday, March 3", "date", "Tuesday, March 3", 10),
        ("3rd of March", "date", "3rd of March", 10),
        ("March '97", "date", "March '97", 10),
        ("1999", "date", "1999", 10),
        ("We met in March", "date", "March", 9),
        ("10:30 pm EST", "time", "10:30 pm EST", 10),
        ("He left at 10:30", "time", "at 10:30", 10),
        ("Paris, France", "city", "Paris, France", 10),
        ("Boston, MA 02115", "city", "Boston, MA 02115", 10),
        ("the dog", "noun", "the dog", 10),
        ("these dog", "noun", "these dog", 7),
        ("97", "noun", "97", 10),
        ("two hundred and five dogs", "noun", "two hundred and five dogs", 10),
        ("book of the library of congress", "noun", "book of the library of congress", 10),
        ("the dog's bone", "noun", "the dog's bone", 10),
        ("the 3rd", "noun", "the 3rd", 10),
        ("on the 3rd", "noun", "the 3rd", 10),
        ("the 1st of the month", "noun", "the 1st of the month", 10),
        ("Paris is lovely", "city", "Paris", 10),
        ("We flew to Paris", "city", "Paris", 10),
    ];

    for (input, kind, matched, confidence) in cases {
        let found = extract(input);
        assert_eq!(found.len(), 1, "expected one phrase for '{input}', got {:?}", slices(input, &found));
        let f = &found[0];
        assert_eq!(f.phrase.kind(), kind, "kind for '{input}'");
        assert_eq!(&input[f.start..f.end], matched, "span for '{input}'");
        assert_eq!(f.confidence, confidence, "confidence for '{input}'");
    }
}

#[test]
fn ambiguous_bare_head_is_dropped() {
    let (found, metrics) = extract_with("run", &Options::default());
    assert!(found.is_empty());
    assert_eq!(metrics.emitted, 0);
    assert_eq!(metrics.dropped, 1);
}

#[test]
fn date_fields_are_filled() {
    let found = extract("March 3, 1999");
    let Phrase::Date(date) = &found[0].phrase else { panic!("not a date: {:?}", found[0].phrase) };
    assert_eq!((date.month_number, date.day, date.year), (Some(3), Some(3), Some(1999)));

    let found = extract("March '97");
    let Phrase::Date(date) = &found[0].phrase else { panic!("not a date") };
    assert_eq!(date.year, Some(1997));
}

#[test]
fn time_fields_are_filled() {
    let found = extract("10:30 pm EST");
    let Phrase::Time(time) = &found[0].phrase else { panic!("not a time") };
    assert_eq!((time.hour.hour, time.hour.minute), (10, 30));
    assert_eq!(time.daytime.as_ref().map(|w| w.text.as_str()), Some("pm"));
    assert_eq!(time.timezone.as_ref().map(|w| w.text.as_str()), Some("EST"));
}

#[test]
fn spelled_out_number_counts_its_noun() {
    let found = extract("two hundred and five dogs");
    let Phrase::Noun(np) = &found[0].phrase else { panic!("not a noun phrase") };
    assert_eq!(np.quantity, Some(205.0));
    assert_eq!(np.noun.text, "dogs");
}

#[test]
fn verb_phrase_emits_object_and_verb_phrase() {
    let text = "the dog chased the cat";
    let found = extract(text);
    assert_eq!(slices(text, &found), vec![("noun", "the dog"), ("noun", "the cat"), ("verb", "chased the cat")]);
}

#[test]
fn prepositional_objects_nest() {
    let (found, metrics) = extract_with("book of the library of congress", &Options::default());
    assert_eq!(found[0].phrase.to_string(), "np(book pp(of np(the library pp(of np(congress)))))");
    assert_eq!(metrics.stack.pushes, 2);
    assert_eq!(metrics.stack.pops, 2);
}

#[test]
fn parallel_reading_takes_over_a_failed_date() {
    let (found, metrics) = extract_with("march of the dogs", &Options::default());
    assert_eq!(slices("march of the dogs", &found), vec![("noun", "march of the dogs")]);
    assert_eq!(metrics.parallel.started, 1);
    assert_eq!(metrics.parallel.committed, 1);
}

#[test]
fn parallel_reading_is_cancelled_when_the_date_holds() {
    let (found, metrics) = extract_with("March 3, 1999", &Options::default());
    assert_eq!(found.len(), 1);
    assert_eq!(metrics.parallel.started, 1);
    assert_eq!(metrics.parallel.committed, 0);
    assert_eq!(metrics.parallel.cancelled, 1);
}

#[test]
fn threshold_is_strict() {
    let strict = Options { threshold: 9, ..Options::default() };
    let (found, _) = extract_with("We met in March", &strict);
    assert!(found.is_empty());

    let lenient = Options { threshold: 8, ..Options::default() };
    let (found, _) = extract_with("We met in March", &lenient);
    assert_eq!(found.len(), 1);
}

#[test]
fn agreement_check_can_be_turned_off() {
    let options = Options { check_agreement: false, ..Options::default() };
    let (found, _) = extract_with("these dog", &options);
    assert_eq!(found[0].confidence, 10);
}

#[test]
fn lowercase_names_need_case_insensitive_mode() {
    assert!(extract("john smith").is_empty());

    let options = Options { case_sensitive: false, ..Options::default() };
    let (found, _) = extract_with("john smith", &options);
    assert_eq!(slices("john smith", &found), vec![("name", "john smith")]);
}

#[test]
fn names_only_mode_skips_general_phrases() {
    let text = "the dog met John Smith";
    let options = Options { mode: PhraseMode::NamesOnly, ..Options::default() };
    let (found, _) = extract_with(text, &options);
    assert_eq!(slices(text, &found), vec![("name", "John Smith")]);
}

#[test]
fn proper_nouns_can_be_suppressed() {
    let text = "the big Zorblax";
    assert_eq!(slices(text, &extract(text)), vec![("noun", "the big Zorblax")]);

    let options = Options { suppress_proper_nouns: true, ..Options::default() };
    let (found, _) = extract_with(text, &options);
    assert!(found.is_empty());
}

#[test]
fn emitted_phrases_are_well_formed() {
    let corpus = [
        "Dr. Quimby met John F. Kennedy in Boston, MA 02115 on Tuesday, March 3, 1999 at 10:30 pm EST.",
        "The quick brown fox jumped over the lazy dog. These dogs chased the cat's ball!",
        "Paris, France is very beautiful in May but the book of the library of congress is not.",
        "two hundred and five dogs ran; 97 people saw 3 miles of road near Cape Cod, Massachusetts.",
        "MARCH 3 1999\n\nthe big Zorblax, Jr. said march of the dogs was on the 3rd of March",
    ];
    let options = Options::default();
    for text in corpus {
        let (found, metrics) = extract_with(text, &options);
        assert!(!found.is_empty(), "nothing found in '{text}'");
        for f in &found {
            assert!(f.start < f.end && f.end <= text.len(), "bad span {:?} in '{text}'", (f.start, f.end));
            assert!(f.confidence > options.threshold);
            assert!(f.confidence <= options.initial_confidence);
            assert_eq!(f.phrase.span().map(|s| (s.start, s.end)), Some((f.start, f.end)));
        }
        assert_eq!(metrics.stack.pushes, metrics.stack.pops, "stack unbalanced for '{text}'");
        assert_eq!(metrics.emitted, found.len());
    }
}

#[test]
fn every_state_has_a_distinct_name() {
    let mut names: Vec<&str> = crate::grammar::State::ALL.iter().map(|s| s.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), crate::grammar::State::ALL.len());
}

#[test]
fn ordinal_head_takes_a_prepositional_object() {
    let (found, metrics) = extract_with("the 1st of the month", &Options::default());
    assert_eq!(found[0].phrase.to_string(), "np(the 1st pp(of np(the month)))");
    assert_eq!((metrics.stack.pushes, metrics.stack.pops), (1, 1));
}

#[test]
fn lone_city_name_keeps_its_name_reading_with_a_surname() {
    let text = "We met Paris Hilton";
    assert_eq!(slices(text, &extract(text)), vec![("name", "Paris Hilton")]);

    let options = Options { mode: PhraseMode::NamesOnly, ..Options::default() };
    let (found, _) = extract_with("We flew to Paris", &options);
    assert!(found.iter().all(|f| f.phrase.kind() == "name"));
}

#[test]
fn possessive_name_owns_the_next_noun_phrase() {
    let text = "John Smith's dog";
    let found = extract(text);
    assert_eq!(slices(text, &found), vec![("name", "John Smith"), ("noun", "John Smith's dog")]);
    assert_eq!(found[1].phrase.to_string(), "np(dog poss(name(John Smith)))");
}

#[test]
fn line_break_ends_a_compound_head() {
    let text = "the dog\nfood bowl";
    assert_eq!(slices(text, &extract(text))[0], ("noun", "the dog"));
}

#[test]
fn lowering_a_penalty_never_lowers_confidence() {
    let corpus = [
        "Dr. Quimby met John F. Kennedy in Boston, MA 02115 on Tuesday, March 3, 1999 at 10:30 pm EST.",
        "these dog ran; john smith met Jack in boston massachusetts on March 3 1999",
        "THE BIG DOG SAW MARY IN MAY",
        "Paris is lovely and the run was long but John Smith's dog liked the 3rd of the month",
        "run",
    ];
    let lower: [fn(&mut Penalties); 8] = [
        |p| p.case_mismatch = 0,
        |p| p.text_case = 0,
        |p| p.dictionary_sense = 0,
        |p| p.no_punctuation_signal = 0,
        |p| p.lowercase_name = 0,
        |p| p.lone_first_name = 0,
        |p| p.ambiguous_head = 0,
        |p| p.agreement = 0,
    ];
    // everything is emitted, so only the scores can differ between runs
    let base = Options { threshold: -1000, ..Options::default() };
    for text in corpus {
        let (reference, _) = extract_with(text, &base);
        for set in lower {
            let mut options = base.clone();
            set(&mut options.penalties);
            let (lowered, _) = extract_with(text, &options);
            let spans = |found: &[FoundPhrase]| -> Vec<_> {
                found.iter().map(|f| (f.phrase.kind(), f.start, f.end)).collect()
            };
            assert_eq!(spans(&reference), spans(&lowered), "phrases changed for '{text}'");
            for (before, after) in reference.iter().zip(&lowered) {
                assert!(
                    after.confidence >= before.confidence,
                    "confidence fell from {} to {} for '{}' in '{text}'",
                    before.confidence,
                    after.confidence,
                    &text[after.start..after.end],
                );
            }
        }
    }
}
