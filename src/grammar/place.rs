//! Places: "Boston, MA 02115", "Paris, France", "Cape Cod, Massachusetts".

use super::predicates::{digit_count_is, no_punct};
use super::{State, Step};
use crate::engine::Machine;
use crate::engine::confidence;
use crate::phrase::{CityPhrase, Phrase, PlaceNamePhrase, Word};
use crate::{CapCode, Category, Token};

const PLACE_SENSES: Category =
    Category::CITY.union(Category::STATE).union(Category::COUNTRY).union(Category::PLACE);

pub(super) fn city_start(m: &mut Machine<'_>, token: &Token) -> Step {
    m.regs.place.city = Some(token.word());
    m.regs.place.looks_lower = token.cap == CapCode::Lower;
    m.regs.book.temp_end = token.span.end;
    Step::Continue(State::PlaceCity)
}

pub(super) fn place_start(m: &mut Machine<'_>, token: &Token) -> Step {
    m.regs.place.named = Some(token.word());
    m.regs.place.looks_lower = token.cap == CapCode::Lower;
    m.regs.book.temp_end = token.span.end;
    Step::Continue(State::PlaceNamed)
}

/// Hand-off from a first name that turns out to be a city ("Paris, France").
pub(super) fn city_from_name(m: &mut Machine<'_>, city: Word, looks_lower: bool, token: &Token) -> Step {
    m.regs.clear_name();
    m.regs.place.city = Some(city);
    m.regs.place.looks_lower = looks_lower;
    place_city(m, token)
}

pub(super) fn place_city(m: &mut Machine<'_>, token: &Token) -> Step {
    if token.is(Category::STATE) {
        if m.ctx.only_mark(',') {
            return set_state(m, token);
        }
        if no_punct(m) && token.cap.is_capitalized() {
            let weight = m.penalties().no_punctuation_signal;
            m.penalize(weight);
            return set_state(m, token);
        }
    }
    if token.is(Category::COUNTRY) && m.ctx.only_mark(',') {
        return close_with_country(m, token);
    }
    finish_place(m);
    Step::Reject
}

pub(super) fn place_state(m: &mut Machine<'_>, token: &Token) -> Step {
    if digit_count_is(token, 5) && no_punct(m) {
        m.regs.place.postal_code = Some(token.word());
        m.regs.book.temp_end = token.span.end;
        return Step::Continue(State::PlaceCountry);
    }
    place_country(m, token)
}

pub(super) fn place_country(m: &mut Machine<'_>, token: &Token) -> Step {
    if token.is(Category::COUNTRY) && m.ctx.only_mark(',') {
        return close_with_country(m, token);
    }
    finish_place(m);
    Step::Reject
}

pub(super) fn place_named(m: &mut Machine<'_>, token: &Token) -> Step {
    let named_country = m.regs.place.named.as_ref().is_some_and(|w| m.lex().category_of(&w.text) == Category::COUNTRY);
    if !named_country && m.ctx.only_mark(',') {
        if token.is(Category::STATE) && m.regs.place.state.is_none() {
            m.regs.place.state = Some(token.word());
            m.regs.book.temp_end = token.span.end;
            return Step::Continue(State::PlaceNamed);
        }
        if token.is(Category::COUNTRY) {
            return close_with_country(m, token);
        }
    }
    finish_place(m);
    Step::Reject
}

fn set_state(m: &mut Machine<'_>, token: &Token) -> Step {
    m.regs.place.state = Some(token.word());
    m.regs.book.temp_end = token.span.end;
    Step::Continue(State::PlaceState)
}

fn close_with_country(m: &mut Machine<'_>, token: &Token) -> Step {
    m.regs.place.country = Some(token.word());
    m.regs.book.temp_end = token.span.end;
    finish_place(m);
    Step::Done
}

pub(super) fn finish_place(m: &mut Machine<'_>) {
    let pl = std::mem::take(&mut m.regs.place);
    let p = m.penalties();
    let cs = m.case_sensitive();

    let head = match (&pl.city, &pl.named) {
        (Some(city), _) => city.clone(),
        (None, Some(named)) => named.clone(),
        (None, None) => return,
    };
    let mut penalty = 0;
    if pl.looks_lower {
        penalty += confidence::part_case_penalty(&[CapCode::Lower], cs, &p);
    }
    let lone = pl.state.is_none() && pl.country.is_none() && pl.postal_code.is_none();
    if lone {
        penalty += confidence::competing_sense_penalty(m.lex().category_of(&head.text), PLACE_SENSES, &p);
    }
    penalty += confidence::text_case_penalty(m.ctx.case_flags(), cs, &p);
    m.penalize(penalty);

    let phrase = if pl.city.is_some() {
        Phrase::City(CityPhrase {
            city: head,
            state: pl.state,
            country: pl.country,
            postal_code: pl.postal_code,
            span: None,
        })
    } else {
        Phrase::PlaceName(PlaceNamePhrase { name: head, state: pl.state, country: pl.country, span: None })
    };
    let end = Some(m.regs.book.temp_end);
    m.transmit(phrase, false, end);
}
