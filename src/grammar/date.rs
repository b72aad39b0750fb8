//! Dates: "March 3, 1999", "3 March", "Tuesday, March 3", "March '97",
//! a bare month or weekday.

use super::predicates::{day_value, digit_count_is, integer, no_punct, plausible_day};
use super::{State, Step};
use crate::engine::Machine;
use crate::engine::confidence;
use crate::phrase::{DatePhrase, Phrase};
use crate::{CapCode, Category, Token};

pub(super) fn month_start(m: &mut Machine<'_>, token: &Token) -> Step {
    set_month(m, token);
    m.regs.date.lone_penalty = lone_penalty(m, token, Category::MONTH);
    Step::Continue(State::DateMonth)
}

pub(super) fn weekday_start(m: &mut Machine<'_>, token: &Token) -> Step {
    m.regs.date.weekday = Some(token.word());
    m.regs.date.lone_penalty = lone_penalty(m, token, Category::WEEKDAY);
    m.regs.book.temp_end = token.span.end;
    Step::Continue(State::DateWeekday)
}

/// Hand-off from a number followed by a month ("3 March", "3rd of March").
///
/// Returns `None` when the day cannot fall in that month.
pub(super) fn begin_day_month(m: &mut Machine<'_>, day: u32, month: &Token) -> Option<Step> {
    if !plausible_day(day, month_number(month), None) {
        return None;
    }
    m.regs.clear_number();
    m.regs.clear_time();
    set_month(m, month);
    m.regs.date.day = Some(day);
    Some(Step::Continue(State::DateMonthDay))
}

pub(super) fn date_weekday(m: &mut Machine<'_>, token: &Token) -> Step {
    let gap_ok = no_punct(m) || m.ctx.only_mark(',');
    if gap_ok && token.is(Category::MONTH) {
        set_month(m, token);
        return Step::Continue(State::DateMonth);
    }
    if gap_ok {
        if let Some(day) = day_value(token) {
            // the weekday's end stays the fallback end until a month shows up
            m.regs.date.day = Some(day);
            m.regs.date.expect_month = true;
            return Step::Continue(State::DateDayMonth);
        }
    }
    finish_date(m);
    Step::Reject
}

pub(super) fn date_day_month(m: &mut Machine<'_>, token: &Token) -> Step {
    if token.key() == "of" && no_punct(m) {
        return Step::Continue(State::DateDayMonth);
    }
    if token.is(Category::MONTH) && no_punct(m) {
        let day = m.regs.date.day.unwrap_or(1);
        if plausible_day(day, month_number(token), None) {
            set_month(m, token);
            m.regs.date.expect_month = false;
            return Step::Continue(State::DateMonthDay);
        }
    }
    // no month: the day does not belong to the phrase
    m.regs.date.day = None;
    m.regs.date.expect_month = false;
    finish_date(m);
    Step::Reject
}

pub(super) fn date_month(m: &mut Machine<'_>, token: &Token) -> Step {
    if no_punct(m) {
        if let Some(day) = day_value(token) {
            if plausible_day(day, m.regs.date.month_number, None) {
                m.regs.date.day = Some(day);
                m.regs.book.temp_end = token.span.end;
                return Step::Continue(State::DateMonthDay);
            }
        }
    }
    // "March 1999", "March, 1999"
    if digit_count_is(token, 4) && (no_punct(m) || m.ctx.only_mark(',')) {
        if let Some(year) = integer(token).filter(|y| m.likely_year(*y as f64)) {
            return close_with_year(m, year as i32, token);
        }
    }
    if let Some(year) = apostrophe_year(m, token) {
        return close_with_year(m, year, token);
    }
    finish_date(m);
    Step::Reject
}

pub(super) fn date_month_day(m: &mut Machine<'_>, token: &Token) -> Step {
    let day = m.regs.date.day.unwrap_or(1);
    if digit_count_is(token, 4) {
        let year = integer(token).map(|y| y as i32).filter(|y| m.likely_year(*y as f64));
        if let Some(year) = year.filter(|y| plausible_day(day, m.regs.date.month_number, Some(*y))) {
            if m.ctx.only_mark(',') {
                return close_with_year(m, year, token);
            }
            if no_punct(m) {
                let weight = m.penalties().no_punctuation_signal;
                m.penalize(weight);
                return close_with_year(m, year, token);
            }
        }
    }
    // "March 3, 99"
    if digit_count_is(token, 2) && m.ctx.only_mark(',') {
        if let Some(yy) = integer(token) {
            let year = m.presumed_year(yy as i32);
            return close_with_year(m, year, token);
        }
    }
    if let Some(year) = apostrophe_year(m, token) {
        return close_with_year(m, year, token);
    }
    finish_date(m);
    Step::Reject
}

fn month_number(token: &Token) -> Option<u32> {
    token.value.filter(|v| (1.0..=12.0).contains(v)).map(|v| v as u32)
}

fn set_month(m: &mut Machine<'_>, token: &Token) {
    m.regs.date.month = Some(token.word());
    m.regs.date.month_number = month_number(token);
    m.regs.book.temp_end = token.span.end;
}

/// What a bare month or weekday costs: another dictionary sense ("May",
/// "March"), made worse when capitalization cannot vouch for the date reading.
fn lone_penalty(m: &Machine<'_>, token: &Token, own: Category) -> i32 {
    let p = m.penalties();
    let mut penalty = confidence::competing_sense_penalty(token.categories, own, &p);
    let uninformative = !m.case_sensitive() || token.sentence_start || token.cap == CapCode::Lower;
    if penalty > 0 && uninformative {
        penalty += p.ambiguous_head.max(0);
    }
    penalty + confidence::part_case_penalty(&[token.cap], m.case_sensitive(), &p)
}

/// "'97" and ", '97" after a month or day.
fn apostrophe_year(m: &Machine<'_>, token: &Token) -> Option<i32> {
    if !digit_count_is(token, 2) || m.ctx.nth_punct_back(1) != Some('\'') {
        return None;
    }
    let gap_ok = m.ctx.no_punct_after(1) || (m.ctx.no_punct_after(2) && m.ctx.nth_punct_back(2) == Some(','));
    if !gap_ok {
        return None;
    }
    integer(token).map(|yy| m.presumed_year(yy as i32))
}

fn close_with_year(m: &mut Machine<'_>, year: i32, token: &Token) -> Step {
    m.regs.date.year = Some(year);
    m.regs.book.temp_end = token.span.end;
    finish_date(m);
    Step::Done
}

pub(super) fn finish_date(m: &mut Machine<'_>) {
    let d = std::mem::take(&mut m.regs.date);
    if d.month.is_none() && d.weekday.is_none() {
        return;
    }
    let lone = d.day.is_none() && d.year.is_none() && (d.month.is_none() || d.weekday.is_none());
    if lone {
        m.penalize(d.lone_penalty);
    }
    let phrase = Phrase::Date(DatePhrase {
        weekday: d.weekday,
        month: d.month,
        month_number: d.month_number,
        day: d.day,
        year: d.year,
        span: None,
    });
    let end = Some(m.regs.book.temp_end);
    m.transmit(phrase, false, end);
}
