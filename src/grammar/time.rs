//! Clock times: "10:30", "10:30:15 pm EST", "at 7 am".

use super::predicates::{digit_count_is, integer, no_punct};
use super::{State, Step};
use crate::engine::Machine;
use crate::phrase::{ClockTime, Phrase, TimePhrase};
use crate::{Category, Token};

/// Hand-off from a number followed by ":" and minutes.
pub(super) fn begin_minute(m: &mut Machine<'_>, hour: u32, minute: u32, token: &Token) -> Step {
    begin(m, hour, token);
    m.regs.time.minute = Some(minute);
    Step::Continue(State::TimeMinute)
}

/// Hand-off from a number followed by "am", "pm", "noon", ...
pub(super) fn begin_daytime(m: &mut Machine<'_>, hour: u32, token: &Token) -> Step {
    begin(m, hour, token);
    m.regs.time.minute = Some(0);
    m.regs.time.daytime = Some(token.word());
    Step::Continue(State::TimeDaytime)
}

fn begin(m: &mut Machine<'_>, hour: u32, token: &Token) {
    m.regs.clear_number();
    m.regs.time.hour = Some(hour);
    // "at 10:30": the phrase starts at the preposition
    if m.regs.time.preposition.is_some() {
        if let Some(start) = m.regs.book.temp_start {
            m.regs.book.phrase_start = Some(start);
        }
    }
    m.regs.book.temp_end = token.span.end;
}

pub(super) fn time_minute(m: &mut Machine<'_>, token: &Token) -> Step {
    if m.ctx.only_mark(':') && digit_count_is(token, 2) {
        if let Some(second) = integer(token).filter(|s| *s <= 59) {
            m.regs.time.second = Some(second as u32);
            m.regs.book.temp_end = token.span.end;
            return Step::Continue(State::TimeSecond);
        }
    }
    daytime_or_zone(m, token)
}

pub(super) fn time_second(m: &mut Machine<'_>, token: &Token) -> Step {
    daytime_or_zone(m, token)
}

pub(super) fn time_daytime(m: &mut Machine<'_>, token: &Token) -> Step {
    if let Some(step) = zone(m, token) {
        return step;
    }
    finish_time(m);
    Step::Reject
}

fn daytime_or_zone(m: &mut Machine<'_>, token: &Token) -> Step {
    let hour = m.regs.time.hour.unwrap_or(0);
    if token.is(Category::DAYTIME) && no_punct(m) && hour <= 12 {
        m.regs.time.daytime = Some(token.word());
        m.regs.book.temp_end = token.span.end;
        return Step::Continue(State::TimeDaytime);
    }
    if let Some(step) = zone(m, token) {
        return step;
    }
    finish_time(m);
    Step::Reject
}

/// A time zone closes the phrase.
fn zone(m: &mut Machine<'_>, token: &Token) -> Option<Step> {
    if !token.is(Category::TIMEZONE) || !no_punct(m) {
        return None;
    }
    m.regs.time.timezone = Some(token.word());
    let phrase = build(m)?;
    m.transmit(phrase, true, None);
    m.regs.clear_time();
    Some(Step::Done)
}

fn build(m: &Machine<'_>) -> Option<Phrase> {
    let t = &m.regs.time;
    let hour = t.hour?;
    Some(Phrase::Time(TimePhrase {
        preposition: t.preposition.clone(),
        hour: ClockTime { hour, minute: t.minute.unwrap_or(0), second: t.second },
        daytime: t.daytime.clone(),
        timezone: t.timezone.clone(),
        span: None,
    }))
}

fn finish_time(m: &mut Machine<'_>) {
    if let Some(phrase) = build(m) {
        let end = Some(m.regs.book.temp_end);
        m.transmit(phrase, false, end);
    }
    m.regs.clear_time();
}
