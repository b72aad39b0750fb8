//! Emitted phrase values.
//!
//! Phrases are built once by the engine's assembler from the register set and
//! handed to the sink; nothing mutates them afterwards.

use crate::Span;
use std::fmt;

/// A surface word plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub span: Span,
}

impl Word {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Word { text: text.into(), span }
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NounPhrase {
    pub determiner: Option<Word>,
    pub modifiers: Vec<Word>,
    pub noun: Word,
    /// Numeric value when the head is a number ("97", "two hundred").
    pub quantity: Option<f64>,
    pub postmods: Vec<Phrase>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamePhrase {
    pub title: Option<Word>,
    pub first: Option<Word>,
    pub initials: Vec<Word>,
    pub last: Vec<Word>,
    pub suffix: Vec<Word>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatePhrase {
    pub weekday: Option<Word>,
    pub month: Option<Word>,
    pub month_number: Option<u32>,
    pub day: Option<u32>,
    pub year: Option<i32>,
    pub span: Option<Span>,
}

/// Wall-clock reading as written (12-hour values stay 12-hour; see [`TimePhrase::to_24h`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: Option<u32>,
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.second {
            Some(s) => write!(f, "{}:{:02}:{:02}", self.hour, self.minute, s),
            None => write!(f, "{}:{:02}", self.hour, self.minute),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimePhrase {
    pub preposition: Option<Word>,
    pub hour: ClockTime,
    pub daytime: Option<Word>,
    pub timezone: Option<Word>,
    pub span: Option<Span>,
}

impl TimePhrase {
    /// Hour on a 24-hour clock, folding in an am/pm marker when present.
    pub fn to_24h(&self) -> ClockTime {
        let mut hour = self.hour.hour;
        if let Some(daytime) = &self.daytime {
            let marker = daytime.lower().replace('.', "");
            match marker.as_str() {
                "pm" | "p" if hour < 12 => hour += 12,
                "am" | "a" if hour == 12 => hour = 0,
                _ => {}
            }
        }
        ClockTime { hour, ..self.hour }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityPhrase {
    pub city: Word,
    pub state: Option<Word>,
    pub country: Option<Word>,
    pub postal_code: Option<Word>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceNamePhrase {
    pub name: Word,
    pub state: Option<Word>,
    pub country: Option<Word>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerbPhrase {
    pub verb: Word,
    pub object: Box<Phrase>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrepPhrase {
    pub preposition: Word,
    pub object: Box<Phrase>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PossPhrase {
    pub object: Box<Phrase>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdjPhrase {
    pub adjective: Word,
    pub adverbs: Vec<Word>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvPhrase {
    pub head: Word,
    pub qualifiers: Vec<Word>,
    pub span: Option<Span>,
}

/// A recognized phrase.
#[derive(Debug, Clone, PartialEq)]
pub enum Phrase {
    Noun(NounPhrase),
    Name(NamePhrase),
    Date(DatePhrase),
    Time(TimePhrase),
    City(CityPhrase),
    PlaceName(PlaceNamePhrase),
    Verb(VerbPhrase),
    Prep(PrepPhrase),
    Poss(PossPhrase),
    Adj(AdjPhrase),
    Adv(AdvPhrase),
}

impl Phrase {
    /// Short kind label, e.g. `"date"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Phrase::Noun(_) => "noun",
            Phrase::Name(_) => "name",
            Phrase::Date(_) => "date",
            Phrase::Time(_) => "time",
            Phrase::City(_) => "city",
            Phrase::PlaceName(_) => "place",
            Phrase::Verb(_) => "verb",
            Phrase::Prep(_) => "prep",
            Phrase::Poss(_) => "poss",
            Phrase::Adj(_) => "adj",
            Phrase::Adv(_) => "adv",
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Phrase::Noun(p) => p.span,
            Phrase::Name(p) => p.span,
            Phrase::Date(p) => p.span,
            Phrase::Time(p) => p.span,
            Phrase::City(p) => p.span,
            Phrase::PlaceName(p) => p.span,
            Phrase::Verb(p) => p.span,
            Phrase::Prep(p) => p.span,
            Phrase::Poss(p) => p.span,
            Phrase::Adj(p) => p.span,
            Phrase::Adv(p) => p.span,
        }
    }

    pub(crate) fn set_span(&mut self, span: Span) {
        let slot = match self {
            Phrase::Noun(p) => &mut p.span,
            Phrase::Name(p) => &mut p.span,
            Phrase::Date(p) => &mut p.span,
            Phrase::Time(p) => &mut p.span,
            Phrase::City(p) => &mut p.span,
            Phrase::PlaceName(p) => &mut p.span,
            Phrase::Verb(p) => &mut p.span,
            Phrase::Prep(p) => &mut p.span,
            Phrase::Poss(p) => &mut p.span,
            Phrase::Adj(p) => &mut p.span,
            Phrase::Adv(p) => &mut p.span,
        };
        *slot = Some(span);
    }

    pub fn as_noun(&self) -> Option<&NounPhrase> {
        match self {
            Phrase::Noun(np) => Some(np),
            _ => None,
        }
    }

    /// All words of the phrase in reading order.
    ///
    /// Post-modifier slots only hold prepositional or possessive phrases; anything
    /// else found there is logged and skipped.
    pub fn words(&self) -> Vec<&Word> {
        let mut out = Vec::new();
        self.collect_words(&mut out);
        out
    }

    fn collect_words<'a>(&'a self, out: &mut Vec<&'a Word>) {
        match self {
            Phrase::Noun(np) => {
                out.extend(np.determiner.iter());
                out.extend(np.modifiers.iter());
                out.push(&np.noun);
                for post in &np.postmods {
                    match post {
                        Phrase::Prep(_) | Phrase::Poss(_) => post.collect_words(out),
                        other => {
                            tracing::warn!(kind = other.kind(), "unexpected phrase in post-modifier slot, skipping")
                        }
                    }
                }
            }
            Phrase::Name(n) => {
                out.extend(n.title.iter());
                out.extend(n.first.iter());
                out.extend(n.initials.iter());
                out.extend(n.last.iter());
                out.extend(n.suffix.iter());
            }
            Phrase::Date(d) => {
                out.extend(d.weekday.iter());
                out.extend(d.month.iter());
            }
            Phrase::Time(t) => {
                out.extend(t.preposition.iter());
                out.extend(t.daytime.iter());
                out.extend(t.timezone.iter());
            }
            Phrase::City(c) => {
                out.push(&c.city);
                out.extend(c.state.iter());
                out.extend(c.postal_code.iter());
                out.extend(c.country.iter());
            }
            Phrase::PlaceName(p) => {
                out.push(&p.name);
                out.extend(p.state.iter());
                out.extend(p.country.iter());
            }
            Phrase::Verb(v) => {
                out.push(&v.verb);
                v.object.collect_words(out);
            }
            Phrase::Prep(p) => {
                out.push(&p.preposition);
                p.object.collect_words(out);
            }
            Phrase::Poss(p) => p.object.collect_words(out),
            Phrase::Adj(a) => {
                out.extend(a.adverbs.iter());
                out.push(&a.adjective);
            }
            Phrase::Adv(a) => {
                out.extend(a.qualifiers.iter());
                out.push(&a.head);
            }
        }
    }

    /// Normalized value used for indexing.
    ///
    /// ```text
    /// Date  -> 1999-03-03, XXXX-03-03, 1999-XX-XX (+ " tuesday" when a weekday was given)
    /// Time  -> 22:30 (24h) + " EST" when zoned
    /// Noun  -> quantity for numbers, lowercase head otherwise
    /// Name  -> "last, first"
    /// ```
    pub fn value(&self) -> String {
        match self {
            Phrase::Date(d) => {
                let year = d.year.map(|y| format!("{:04}", y)).unwrap_or_else(|| "XXXX".to_string());
                let month = d.month_number.map(|m| format!("{:02}", m)).unwrap_or_else(|| "XX".to_string());
                let day = d.day.map(|v| format!("{:02}", v)).unwrap_or_else(|| "XX".to_string());
                let mut s = format!("{year}-{month}-{day}");
                if let Some(w) = &d.weekday {
                    s.push(' ');
                    s.push_str(&w.lower());
                }
                s
            }
            Phrase::Time(t) => {
                let clock = t.to_24h();
                let mut s = format!("{:02}:{:02}", clock.hour, clock.minute);
                if let Some(sec) = clock.second {
                    s.push_str(&format!(":{:02}", sec));
                }
                if let Some(tz) = &t.timezone {
                    s.push(' ');
                    s.push_str(&tz.text.to_uppercase());
                }
                s
            }
            Phrase::Noun(np) => match np.quantity {
                Some(q) if q.fract() == 0.0 => format!("{}", q as i64),
                Some(q) => format!("{}", q),
                None => np.noun.lower(),
            },
            Phrase::Name(n) => {
                let last = n.last.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ");
                match &n.first {
                    Some(first) if !last.is_empty() => format!("{}, {}", last, first.text),
                    Some(first) => first.text.clone(),
                    None => last,
                }
            }
            other => other.to_string(),
        }
    }
}

fn join(words: &[Word]) -> String {
    words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ")
}

fn push_opt(parts: &mut Vec<String>, word: &Option<Word>) {
    if let Some(w) = word {
        parts.push(w.text.clone());
    }
}

fn push_all(parts: &mut Vec<String>, words: &[Word]) {
    if !words.is_empty() {
        parts.push(join(words));
    }
}

/// Bracketed structural rendering: `np(the book pp(of np(congress)))`.
impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        match self {
            Phrase::Noun(np) => {
                push_opt(&mut parts, &np.determiner);
                push_all(&mut parts, &np.modifiers);
                parts.push(np.noun.text.clone());
                parts.extend(np.postmods.iter().map(|p| p.to_string()));
                write!(f, "np({})", parts.join(" "))
            }
            Phrase::Name(n) => {
                push_opt(&mut parts, &n.title);
                push_opt(&mut parts, &n.first);
                push_all(&mut parts, &n.initials);
                push_all(&mut parts, &n.last);
                push_all(&mut parts, &n.suffix);
                write!(f, "name({})", parts.join(" "))
            }
            Phrase::Date(_) => write!(f, "date({})", self.value()),
            Phrase::Time(t) => {
                push_opt(&mut parts, &t.preposition);
                parts.push(t.hour.to_string());
                push_opt(&mut parts, &t.daytime);
                push_opt(&mut parts, &t.timezone);
                write!(f, "time({})", parts.join(" "))
            }
            Phrase::City(c) => {
                parts.push(c.city.text.clone());
                push_opt(&mut parts, &c.state);
                push_opt(&mut parts, &c.postal_code);
                push_opt(&mut parts, &c.country);
                write!(f, "city({})", parts.join(", "))
            }
            Phrase::PlaceName(p) => {
                parts.push(p.name.text.clone());
                push_opt(&mut parts, &p.state);
                push_opt(&mut parts, &p.country);
                write!(f, "place({})", parts.join(", "))
            }
            Phrase::Verb(v) => write!(f, "vp({} {})", v.verb, v.object),
            Phrase::Prep(p) => write!(f, "pp({} {})", p.preposition, p.object),
            Phrase::Poss(p) => write!(f, "poss({})", p.object),
            Phrase::Adj(a) => {
                push_all(&mut parts, &a.adverbs);
                parts.push(a.adjective.text.clone());
                write!(f, "adj({})", parts.join(" "))
            }
            Phrase::Adv(a) => {
                push_all(&mut parts, &a.qualifiers);
                parts.push(a.head.text.clone());
                write!(f, "adv({})", parts.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(text: &str, start: usize) -> Word {
        Word::new(text, Span::new(start, start + text.len()))
    }

    fn np(det: Option<Word>, noun: Word, postmods: Vec<Phrase>) -> Phrase {
        Phrase::Noun(NounPhrase { determiner: det, modifiers: vec![], noun, quantity: None, postmods, span: None })
    }

    #[test]
    fn nested_noun_phrase_renders_structurally() {
        let congress = np(None, w("congress", 25), vec![]);
        let library = np(
            Some(w("the", 8)),
            w("library", 12),
            vec![Phrase::Prep(PrepPhrase { preposition: w("of", 20), object: Box::new(congress), span: None })],
        );
        let book = np(
            None,
            w("book", 0),
            vec![Phrase::Prep(PrepPhrase { preposition: w("of", 5), object: Box::new(library), span: None })],
        );
        assert_eq!(book.to_string(), "np(book pp(of np(the library pp(of np(congress)))))");
        let words: Vec<&str> = book.words().iter().map(|w| w.text.as_str()).collect();
        assert_eq!(words, vec!["book", "of", "the", "library", "of", "congress"]);
    }

    #[test]
    fn unexpected_postmodifier_is_skipped_when_flattening() {
        let date = Phrase::Date(DatePhrase {
            weekday: None,
            month: Some(w("May", 9)),
            month_number: Some(5),
            day: None,
            year: None,
            span: None,
        });
        let phrase = np(None, w("meeting", 0), vec![date]);
        let words: Vec<&str> = phrase.words().iter().map(|w| w.text.as_str()).collect();
        assert_eq!(words, vec!["meeting"]);
    }

    #[test]
    fn time_value_folds_daytime_into_24_hours() {
        let time = Phrase::Time(TimePhrase {
            preposition: None,
            hour: ClockTime { hour: 10, minute: 30, second: None },
            daytime: Some(w("pm", 6)),
            timezone: Some(w("EST", 9)),
            span: None,
        });
        assert_eq!(time.value(), "22:30 EST");
        assert_eq!(time.to_string(), "time(10:30 pm EST)");
    }

    #[test]
    fn partial_date_value_marks_missing_fields() {
        let date = Phrase::Date(DatePhrase {
            weekday: Some(w("Tuesday", 0)),
            month: Some(w("March", 9)),
            month_number: Some(3),
            day: Some(3),
            year: None,
            span: None,
        });
        assert_eq!(date.value(), "XXXX-03-03 tuesday");
    }
}
