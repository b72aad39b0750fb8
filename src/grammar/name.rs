//! Personal names: "Dr. Quimby", "John F. Kennedy", "Thomas de Quincey",
//! "John Smith, Jr.".

use super::predicates::{is_initial_letter, is_unknown, may_switch_family, name_gap_ok};
use super::{State, Step, general, place};
use crate::engine::Machine;
use crate::engine::registers::{NameFields, NounFields};
use crate::engine::confidence;
use crate::phrase::{NamePhrase, Phrase, Word};
use crate::{CapCode, Category, Features, Token};
use tracing::debug;

/// Words that never continue a name as a surname.
const NOT_SURNAME: Category = Category::DETERMINER
    .union(Category::PREPOSITION)
    .union(Category::PRONOUN)
    .union(Category::CONJUNCTION)
    .union(Category::MONTH)
    .union(Category::WEEKDAY)
    .union(Category::TITLE)
    .union(Category::TIMEZONE)
    .union(Category::DAYTIME)
    .union(Category::NUMBER)
    .union(Category::NAME_SUFFIX)
    .union(Category::POSSESSIVE)
    .union(Category::CITY)
    .union(Category::STATE)
    .union(Category::COUNTRY)
    .union(Category::PLACE);

const MAX_SURNAME_PARTS: usize = 3;
const MAX_INITIALS: usize = 3;

pub(super) fn title_start(m: &mut Machine<'_>, token: &Token) -> Step {
    note_case(m, token);
    m.regs.name.title = Some(token.word());
    m.regs.name.sentence_start = token.sentence_start;
    m.regs.book.temp_end = token.span.end;
    Step::Continue(State::NameTitle)
}

pub(super) fn firstname_start(m: &mut Machine<'_>, token: &Token) -> Step {
    note_case(m, token);
    m.regs.name.first = Some(token.word());
    m.regs.name.sentence_start = token.sentence_start;
    m.regs.book.temp_end = token.span.end;
    Step::Continue(State::NameFirst)
}

pub(super) fn name_title(m: &mut Machine<'_>, token: &Token) -> Step {
    if name_gap_ok(m) {
        if token.is(Category::FIRSTNAME) && (token.cap.is_capitalized() || !m.case_sensitive()) {
            note_case(m, token);
            m.regs.name.first = Some(token.word());
            m.regs.book.temp_end = token.span.end;
            return Step::Continue(State::NameFirst);
        }
        if is_initial_letter(token) {
            return add_initial(m, token);
        }
        if is_surname(m, token) {
            return add_last(m, token);
        }
    }
    // a title on its own is not a name
    m.regs.clear_name();
    Step::Reject
}

pub(super) fn name_first(m: &mut Machine<'_>, token: &Token) -> Step {
    if let Some(step) = possessive(m, token) {
        return step;
    }
    // "Paris, France"
    if m.ctx.only_mark(',') && token.is(Category::STATE | Category::COUNTRY) && may_switch_family(m) {
        let city = m.regs.name.first.clone().filter(|w| m.lex().category_of(&w.text).contains(Category::CITY));
        if let Some(city) = city {
            let looks_lower = m.regs.name.looks_lower;
            return place::city_from_name(m, city, looks_lower, token);
        }
    }
    if name_gap_ok(m) {
        if is_initial_letter(token) {
            return add_initial(m, token);
        }
        if let Some(step) = hold_particle(m, token, State::NameFirst) {
            return step;
        }
        if is_surname(m, token) {
            return add_last(m, token);
        }
    }
    finish_name(m);
    Step::Reject
}

pub(super) fn name_initial(m: &mut Machine<'_>, token: &Token) -> Step {
    if name_gap_ok(m) {
        if is_initial_letter(token) && m.regs.name.initials.len() < MAX_INITIALS {
            return add_initial(m, token);
        }
        if is_surname(m, token) {
            return add_last(m, token);
        }
    }
    finish_name(m);
    Step::Reject
}

pub(super) fn name_last(m: &mut Machine<'_>, token: &Token) -> Step {
    if let Some(step) = possessive(m, token) {
        return step;
    }
    if token.is(Category::NAME_SUFFIX) && (name_gap_ok(m) || m.ctx.only_mark(',')) {
        return add_suffix(m, token);
    }
    if name_gap_ok(m) {
        if let Some(step) = hold_particle(m, token, State::NameLast) {
            return step;
        }
        let room = m.regs.name.last.len() < MAX_SURNAME_PARTS;
        if room && token.cap.is_capitalized() && !token.sentence_start && is_surname(m, token) {
            return add_last(m, token);
        }
    }
    finish_name(m);
    Step::Reject
}

pub(super) fn name_suffix(m: &mut Machine<'_>, token: &Token) -> Step {
    if let Some(step) = possessive(m, token) {
        return step;
    }
    if token.is(Category::NAME_SUFFIX) && (name_gap_ok(m) || m.ctx.only_mark(',')) {
        return add_suffix(m, token);
    }
    finish_name(m);
    Step::Reject
}

fn note_case(m: &mut Machine<'_>, token: &Token) {
    match token.cap {
        CapCode::Lower => m.regs.name.looks_lower = true,
        CapCode::Initial | CapCode::Upper => m.regs.name.looks_upper = true,
        CapCode::Other => {}
    }
}

fn is_surname(m: &Machine<'_>, token: &Token) -> bool {
    if token.is_boundary() || token.text.contains('\'') {
        return false;
    }
    if token.is(Category::LASTNAME) {
        return true;
    }
    if token.is(NOT_SURNAME) {
        return false;
    }
    if !m.case_sensitive() {
        return token.is(Category::FIRSTNAME);
    }
    token.cap.is_capitalized()
}

fn hold_particle(m: &mut Machine<'_>, token: &Token, state: State) -> Option<Step> {
    if !token.has(Features::NAME_PARTICLE) || token.cap != CapCode::Lower || m.regs.name.particle.is_some() {
        return None;
    }
    m.regs.name.particle = Some(token.word());
    Some(Step::Continue(state))
}

fn add_initial(m: &mut Machine<'_>, token: &Token) -> Step {
    m.regs.name.initials.push(token.word());
    m.regs.book.temp_end = token.span.end;
    Step::Continue(State::NameInitial)
}

fn add_last(m: &mut Machine<'_>, token: &Token) -> Step {
    if is_unknown(token) && token.cap.is_capitalized() && !token.sentence_start {
        debug!(word = %token.text, "guessing surname sense");
        m.lex().add_guessed_sense(&token.text, Category::LASTNAME);
        m.regs.name.guessed = true;
    }
    if token.has(Features::GUESSED) {
        m.regs.name.guessed = true;
    }
    note_case(m, token);
    let name = &mut m.regs.name;
    if let Some(particle) = name.particle.take() {
        name.last.push(particle);
    }
    name.last.push(token.word());
    m.regs.book.temp_end = token.span.end;
    Step::Continue(State::NameLast)
}

fn add_suffix(m: &mut Machine<'_>, token: &Token) -> Step {
    m.regs.name.suffix.push(token.word());
    m.regs.book.temp_end = token.span.end;
    Step::Continue(State::NameSuffix)
}

/// "John Smith's dog": the name is emitted, then owns the noun phrase that follows.
fn possessive(m: &mut Machine<'_>, token: &Token) -> Option<Step> {
    if !token.is(Category::POSSESSIVE) || !m.ctx.adjacent() || !may_switch_family(m) {
        return None;
    }
    // a parallel reading still holds the noun registers
    if m.regs.noun != NounFields::default() || lone_city(m, &m.regs.name).is_some() {
        return None;
    }
    let n = std::mem::take(&mut m.regs.name);
    let phrase = name_phrase(m, n)?;
    let start = m.regs.book.phrase_start;
    let end = m.regs.book.temp_end;
    m.transmit(phrase.clone(), false, Some(end));
    Some(general::possessed_by(m, phrase, start, None, token))
}

pub(super) fn finish_name(m: &mut Machine<'_>) {
    let n = std::mem::take(&mut m.regs.name);
    if let Some(city) = lone_city(m, &n) {
        // "We flew to Paris"
        m.regs.place.city = Some(city);
        m.regs.place.looks_lower = n.looks_lower;
        place::finish_place(m);
        return;
    }
    if let Some(phrase) = name_phrase(m, n) {
        let end = Some(m.regs.book.temp_end);
        m.transmit(phrase, false, end);
    }
}

/// A first name standing alone that is also a city reads as the city.
fn lone_city(m: &Machine<'_>, n: &NameFields) -> Option<Word> {
    let lone = n.last.is_empty() && n.title.is_none() && n.initials.is_empty() && n.suffix.is_empty();
    let first = n.first.as_ref().filter(|_| lone && may_switch_family(m))?;
    m.lex().category_of(&first.text).contains(Category::CITY).then(|| first.clone())
}

/// Score the name held in `n` and build its phrase.
fn name_phrase(m: &mut Machine<'_>, n: NameFields) -> Option<Phrase> {
    if n.first.is_none() && n.last.is_empty() {
        return None;
    }
    let p = m.penalties();
    let cs = m.case_sensitive();

    let mut caps = Vec::with_capacity(2);
    if n.looks_lower {
        caps.push(CapCode::Lower);
    }
    if n.looks_upper {
        caps.push(CapCode::Initial);
    }
    let mut penalty = confidence::part_case_penalty(&caps, cs, &p);

    let lone_first = n.last.is_empty() && n.title.is_none() && n.initials.is_empty();
    if let (true, Some(first)) = (lone_first, &n.first) {
        penalty += p.lone_first_name.max(0);
        let other_senses = m.lex().category_of(&first.text);
        let competing = confidence::competing_sense_penalty(other_senses, Category::FIRSTNAME | Category::LASTNAME, &p);
        penalty += competing;
        if competing > 0 && (n.sentence_start || !cs) {
            penalty += p.ambiguous_head.max(0);
        }
    }
    penalty += confidence::text_case_penalty(m.ctx.case_flags(), cs, &p);
    m.penalize(penalty);

    // nothing else explains a capitalized unknown word after a first name or title
    if n.guessed && !n.looks_lower && (n.title.is_some() || n.first.is_some()) {
        m.raise_if_unexplained();
    }

    Some(Phrase::Name(NamePhrase {
        title: n.title,
        first: n.first,
        initials: n.initials,
        last: n.last,
        suffix: n.suffix,
        span: None,
    }))
}

#[cfg(test)]
mod tests {
    use crate::{BasicLexicon, Context, Extractor, FoundPhrase, Options, Phrase};

    fn names(text: &str) -> Vec<FoundPhrase> {
        let lex = BasicLexicon::english();
        let found = Extractor::new(&lex, &Context::default(), &Options::default(), Vec::new()).extract(text);
        found.into_iter().filter(|f| matches!(f.phrase, Phrase::Name(_))).collect()
    }

    #[test]
    fn particle_joins_the_surname() {
        let found = names("We heard Thomas de Quincey yesterday");
        assert_eq!(found.len(), 1);
        let Phrase::Name(name) = &found[0].phrase else { unreachable!() };
        let last: Vec<&str> = name.last.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(last, vec!["de", "Quincey"]);
    }

    #[test]
    fn dangling_particle_is_left_out() {
        let found = names("We met John van");
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].start, found[0].end), (7, 11));
    }

    #[test]
    fn suffix_after_comma() {
        let found = names("He saw John Smith, Jr. today");
        assert_eq!(found.len(), 1);
        let Phrase::Name(name) = &found[0].phrase else { unreachable!() };
        assert_eq!(name.suffix.len(), 1);
        assert_eq!(&"He saw John Smith, Jr. today"[found[0].start..found[0].end], "John Smith, Jr");
    }
}
