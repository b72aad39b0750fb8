//! Parse registers threaded through every transition.
//!
//! Fields are grouped by phrase family. A hypothesis only ever fills the
//! family it belongs to; handing off (a number that turns out to be a day of
//! the month) clears the old family before filling the new one.

use crate::phrase::{NounPhrase, Phrase, Word};
use crate::{Features, Span};

/// Phrase family owning a group of registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Family {
    Number,
    Date,
    Time,
    Name,
    Place,
    General,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DateFields {
    pub weekday: Option<Word>,
    pub month: Option<Word>,
    pub month_number: Option<u32>,
    pub day: Option<u32>,
    pub year: Option<i32>,
    /// A day was read after a weekday, before its month ("Tuesday 3rd of March").
    pub expect_month: bool,
    /// Charged if the phrase ends as a bare month or weekday.
    pub lone_penalty: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TimeFields {
    /// "at", "by", ... read before the number. Primes the family without making it live.
    pub preposition: Option<Word>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub daytime: Option<Word>,
    pub timezone: Option<Word>,
}

impl TimeFields {
    fn is_live(&self) -> bool {
        self.hour.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct NumberFields {
    /// Completed groups ("two thousand" in "two thousand three hundred").
    pub firstnum: f64,
    /// Group in progress.
    pub othernum: f64,
    /// Last plain number read, with its span.
    pub secondnum: Option<(f64, Span)>,
    pub words: Vec<Word>,
    pub ordinal: bool,
    pub last_multiplier: Option<f64>,
    /// Every word so far was written in digits.
    pub digits: bool,
}

impl NumberFields {
    pub fn total(&self) -> f64 {
        self.firstnum + self.othernum
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct NameFields {
    pub title: Option<Word>,
    pub first: Option<Word>,
    pub last: Vec<Word>,
    pub initials: Vec<Word>,
    pub suffix: Vec<Word>,
    pub looks_lower: bool,
    pub looks_upper: bool,
    /// A surname was guessed for an unknown capitalized word.
    pub guessed: bool,
    /// Opened by a capitalized word at the start of a sentence.
    pub sentence_start: bool,
    /// "van", "de": held until a surname follows.
    pub particle: Option<Word>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PlaceFields {
    pub city: Option<Word>,
    pub state: Option<Word>,
    pub country: Option<Word>,
    pub postal_code: Option<Word>,
    pub named: Option<Word>,
    pub looks_lower: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct NounFields {
    pub determiner: Option<Word>,
    pub det_features: Features,
    pub modifiers: Vec<Word>,
    pub adverbs: Vec<Word>,
    pub noun: Option<Word>,
    pub noun_features: Features,
    pub quantity: Option<f64>,
    pub postmods: Vec<Phrase>,
    pub possessor: Option<Phrase>,
    pub verb: Option<Word>,
    pub pending_prep: Option<Word>,
    pub must_be_singular: bool,
    pub must_be_plural: bool,
    /// Start of the noun phrase held in these registers.
    pub start: Option<usize>,
    /// End of its last accepted word.
    pub end: usize,
}

impl NounFields {
    /// Build the noun phrase these registers describe, if a head was read.
    pub fn to_phrase(&self) -> Option<NounPhrase> {
        let noun = self.noun.clone()?;
        let mut postmods = Vec::with_capacity(self.postmods.len() + 1);
        postmods.extend(self.possessor.clone());
        postmods.extend(self.postmods.iter().cloned());
        let mut modifiers = self.adverbs.clone();
        modifiers.extend(self.modifiers.iter().cloned());
        Some(NounPhrase {
            determiner: self.determiner.clone(),
            modifiers,
            noun,
            quantity: self.quantity,
            postmods,
            span: self.start.map(|s| Span::new(s, self.end)),
        })
    }

    /// Head only: no determiner, modifier, quantity or post-modifier.
    pub fn is_bare(&self) -> bool {
        self.determiner.is_none()
            && self.modifiers.is_empty()
            && self.adverbs.is_empty()
            && self.quantity.is_none()
            && self.postmods.is_empty()
            && self.possessor.is_none()
    }

    /// Record a word as accepted into this noun phrase.
    pub fn touch(&mut self, span: Span) {
        if self.start.is_none() {
            self.start = Some(span.start);
        }
        self.end = span.end;
    }
}

/// Offsets shared by the dispatch loop and the emitter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Bookkeeping {
    pub phrase_start: Option<usize>,
    pub alt_phrase_start: Option<usize>,
    pub temp_start: Option<usize>,
    pub temp_end: usize,
    pub verb_phrase_start: Option<usize>,
    pub post_verb_phrase_start: Option<usize>,
    pub cur_end: usize,
    pub prev_end: usize,
    pub scan_start: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Registers {
    pub confidence: i32,
    pub date: DateFields,
    pub time: TimeFields,
    pub number: NumberFields,
    pub name: NameFields,
    pub place: PlaceFields,
    pub noun: NounFields,
    pub book: Bookkeeping,
}

impl Registers {
    pub fn new(confidence: i32) -> Self {
        Registers { confidence, ..Registers::default() }
    }

    pub fn clear_date(&mut self) {
        self.date = DateFields::default();
    }

    pub fn clear_time(&mut self) {
        self.time = TimeFields::default();
    }

    pub fn clear_number(&mut self) {
        self.number = NumberFields::default();
    }

    pub fn clear_name(&mut self) {
        self.name = NameFields::default();
    }

    pub fn clear_place(&mut self) {
        self.place = PlaceFields::default();
    }

    pub fn clear_noun(&mut self) {
        self.noun = NounFields::default();
        self.book.verb_phrase_start = None;
        self.book.post_verb_phrase_start = None;
    }

    pub fn clear(&mut self, family: Family) {
        match family {
            Family::Number => self.clear_number(),
            Family::Date => self.clear_date(),
            Family::Time => self.clear_time(),
            Family::Name => self.clear_name(),
            Family::Place => self.clear_place(),
            Family::General => self.clear_noun(),
        }
    }

    /// Clear every family except `keep`, and the per-hypothesis offsets.
    pub fn clear_except(&mut self, keep: Option<Family>) {
        for family in [Family::Number, Family::Date, Family::Time, Family::Name, Family::Place, Family::General] {
            if Some(family) != keep {
                self.clear(family);
            }
        }
        self.book.temp_start = None;
        self.book.temp_end = 0;
    }

    /// Families holding any data.
    pub fn live_families(&self) -> Vec<Family> {
        let mut live = Vec::new();
        if self.number != NumberFields::default() {
            live.push(Family::Number);
        }
        if self.date != DateFields::default() {
            live.push(Family::Date);
        }
        if self.time.is_live() {
            live.push(Family::Time);
        }
        if self.name != NameFields::default() {
            live.push(Family::Name);
        }
        if self.place != PlaceFields::default() {
            live.push(Family::Place);
        }
        if self.noun != NounFields::default() {
            live.push(Family::General);
        }
        live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(text: &str, start: usize) -> Word {
        Word::new(text, Span::new(start, start + text.len()))
    }

    #[test]
    fn clear_except_keeps_one_family() {
        let mut regs = Registers::new(10);
        regs.name.first = Some(w("Jack", 0));
        regs.noun.noun = Some(w("Jack", 0));
        regs.clear_except(Some(Family::General));
        assert_eq!(regs.live_families(), vec![Family::General]);
        regs.clear_except(None);
        assert!(regs.live_families().is_empty());
        assert_eq!(regs.confidence, 10);
    }

    #[test]
    fn preposition_alone_does_not_make_time_live() {
        let mut regs = Registers::new(10);
        regs.time.preposition = Some(w("at", 0));
        assert!(regs.live_families().is_empty());
        regs.time.hour = Some(10);
        assert_eq!(regs.live_families(), vec![Family::Time]);
    }

    #[test]
    fn noun_fields_build_phrase_with_possessor_first() {
        let mut noun = NounFields::default();
        assert!(noun.to_phrase().is_none());
        noun.determiner = Some(w("the", 0));
        noun.touch(Span::new(0, 3));
        noun.noun = Some(w("bone", 4));
        noun.touch(Span::new(4, 8));
        let dog = NounFields { noun: Some(w("dog", 10)), ..Default::default() };
        noun.possessor = Some(Phrase::Noun(dog.to_phrase().unwrap()));
        let np = noun.to_phrase().unwrap();
        assert_eq!(np.span, Some(Span::new(0, 8)));
        assert_eq!(np.postmods.len(), 1);
        assert!(!noun.is_bare());
    }
}
