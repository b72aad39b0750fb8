//! Numbers in digits or words, and the hand-offs out of them: "10:30" and
//! "10 pm" become times, "3 March" a date, "3 miles" a counted noun phrase.

use super::predicates::{digit_count_is, has_special_start, integer, is_digits, is_nounish, no_punct};
use super::{State, Step, date, general, time};
use crate::engine::Machine;
use crate::engine::registers::NumberFields;
use crate::phrase::{DatePhrase, NounPhrase, Phrase, Word};
use crate::{Category, Features, Token};
use tracing::warn;

pub(super) fn num_start(m: &mut Machine<'_>, token: &Token) -> Step {
    let Some(value) = token.value else {
        warn!(token = %token.text, "number word has no numeric value");
        return Step::Done;
    };
    m.regs.book.temp_end = token.span.end;
    let n = &mut m.regs.number;
    n.words.push(token.word());
    n.digits = is_digits(token);
    n.othernum = value;
    if token.is(Category::ORDINAL) {
        n.ordinal = true;
        return Step::Continue(State::NumOrdinal);
    }
    if token.has(Features::MULTIPLIER) {
        n.last_multiplier = Some(value);
        return Step::Continue(State::NumAfterMultiplier);
    }
    n.secondnum = Some((value, token.span));
    Step::Continue(State::NumCardinal)
}

pub(super) fn num_cardinal(m: &mut Machine<'_>, token: &Token) -> Step {
    let single = m.regs.number.words.len() == 1;
    let digits = m.regs.number.digits;
    let whole = whole_total(&m.regs.number);

    if single && digits {
        if let Some(hour) = whole.filter(|h| *h <= 24) {
            if m.ctx.only_mark(':') && digit_count_is(token, 2) {
                if let Some(minute) = integer(token).filter(|v| *v <= 59) {
                    return time::begin_minute(m, hour as u32, minute as u32, token);
                }
            }
            if token.is(Category::DAYTIME) && no_punct(m) && hour <= 12 {
                return time::begin_daytime(m, hour as u32, token);
            }
        }
    }
    if single && token.is(Category::MONTH) && no_punct(m) {
        if let Some(day) = whole.filter(|d| (1..=31).contains(d)) {
            if let Some(step) = date::begin_day_month(m, day as u32, token) {
                return step;
            }
        }
    }
    if let Some(step) = extend(m, token) {
        return step;
    }
    finish_number(m);
    Step::Reject
}

pub(super) fn num_after_multiplier(m: &mut Machine<'_>, token: &Token) -> Step {
    // "two hundred and five"
    if token.key() == "and" && no_punct(m) && m.regs.number.secondnum.is_none() {
        return Step::Continue(State::NumAfterMultiplier);
    }
    num_cardinal(m, token)
}

pub(super) fn num_ordinal(m: &mut Machine<'_>, token: &Token) -> Step {
    if token.key() == "of" && no_punct(m) {
        return Step::Continue(State::NumOrdinalOf);
    }
    if token.is(Category::MONTH) && no_punct(m) {
        if let Some(step) = ordinal_day(m, token) {
            return step;
        }
    }
    if no_punct(m) && is_nounish(m, token) && !has_special_start(token) {
        return counted_noun(m, token);
    }
    finish_number(m);
    Step::Reject
}

/// "3rd of March"
pub(super) fn num_ordinal_of(m: &mut Machine<'_>, token: &Token) -> Step {
    if token.is(Category::MONTH) && no_punct(m) {
        if let Some(step) = ordinal_day(m, token) {
            return step;
        }
    }
    finish_number(m);
    Step::Reject
}

fn ordinal_day(m: &mut Machine<'_>, month: &Token) -> Option<Step> {
    let day = whole_total(&m.regs.number).filter(|d| (1..=31).contains(d))?;
    date::begin_day_month(m, day as u32, month)
}

/// Multipliers, tens-and-units and counted nouns.
fn extend(m: &mut Machine<'_>, token: &Token) -> Option<Step> {
    if !no_punct(m) {
        return None;
    }
    let value = token.value;
    let n = &m.regs.number;

    if token.has(Features::MULTIPLIER) {
        let mult = value?;
        if !accepts_multiplier(n, mult) {
            return None;
        }
        m.regs.book.temp_end = token.span.end;
        let n = &mut m.regs.number;
        apply_multiplier(n, mult);
        n.words.push(token.word());
        n.digits = false;
        return Some(Step::Continue(State::NumAfterMultiplier));
    }

    if token.is(Category::NUMBER) {
        let v = value?;
        if !continues_group(n, v, token) {
            return None;
        }
        m.regs.book.temp_end = token.span.end;
        let n = &mut m.regs.number;
        n.othernum += v;
        n.secondnum = Some((v, token.span));
        n.words.push(token.word());
        if token.is(Category::ORDINAL) {
            n.ordinal = true;
            return Some(Step::Continue(State::NumOrdinal));
        }
        return Some(Step::Continue(State::NumCardinal));
    }

    if is_nounish(m, token) && !has_special_start(token) {
        return Some(counted_noun(m, token));
    }
    None
}

fn whole_total(n: &NumberFields) -> Option<i64> {
    let total = n.total();
    if total.fract() == 0.0 && total >= 0.0 && total < i64::MAX as f64 { Some(total as i64) } else { None }
}

fn accepts_multiplier(n: &NumberFields, mult: f64) -> bool {
    match n.last_multiplier {
        None => true,
        // "thousand three hundred" starts a new group under a larger scale
        Some(last) => mult > last || (n.secondnum.is_some() && mult < last),
    }
}

fn apply_multiplier(n: &mut NumberFields, mult: f64) {
    let group = if n.othernum == 0.0 { 1.0 } else { n.othernum };
    if mult >= 1000.0 {
        n.firstnum += group * mult;
        n.othernum = 0.0;
    } else {
        n.othernum = group * mult;
    }
    n.last_multiplier = Some(mult);
    n.secondnum = None;
}

/// "twenty" + "three", or a smaller number after a multiplier.
fn continues_group(n: &NumberFields, value: f64, token: &Token) -> bool {
    if n.digits || is_digits(token) || n.ordinal {
        return false;
    }
    match (n.secondnum, n.last_multiplier) {
        (Some((prev, _)), _) => (20.0..100.0).contains(&prev) && prev % 10.0 == 0.0 && (1.0..10.0).contains(&value),
        (None, Some(mult)) => value < mult,
        (None, None) => false,
    }
}

/// The number counts the word that follows: continue as a noun phrase.
fn counted_noun(m: &mut Machine<'_>, token: &Token) -> Step {
    let n = std::mem::take(&mut m.regs.number);
    m.regs.clear_time();
    let Some(word) = joined(&n.words) else {
        return Step::Reject;
    };
    let noun = &mut m.regs.noun;
    noun.touch(word.span);
    noun.modifiers.push(word);
    if !n.ordinal {
        let quantity = n.total();
        noun.quantity = Some(quantity);
        if quantity == 1.0 {
            noun.must_be_singular = true;
        } else {
            noun.must_be_plural = true;
        }
    }
    general::accept_noun(m, token)
}

/// Emit the number read so far: a year when it can only be one, else a
/// numeric noun phrase.
pub(super) fn finish_number(m: &mut Machine<'_>) {
    let n = std::mem::take(&mut m.regs.number);
    m.regs.clear_time();
    let Some(word) = joined(&n.words) else { return };
    let total = n.total();
    let end = Some(m.regs.book.temp_end);
    let plain_digits = word.text.chars().all(|c| c.is_ascii_digit());
    let phrase = if n.words.len() == 1 && plain_digits && m.likely_year(total) {
        Phrase::Date(DatePhrase {
            weekday: None,
            month: None,
            month_number: None,
            day: None,
            year: Some(total as i32),
            span: None,
        })
    } else {
        Phrase::Noun(NounPhrase {
            determiner: None,
            modifiers: vec![],
            noun: word,
            quantity: Some(total),
            postmods: vec![],
            span: None,
        })
    };
    m.transmit(phrase, false, end);
}

fn joined(words: &[Word]) -> Option<Word> {
    let first = words.first()?;
    let span = words.iter().fold(first.span, |acc, w| acc.cover(w.span));
    let text = words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ");
    Some(Word::new(text, span))
}
