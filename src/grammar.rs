//! Transition grammar.
//!
//! Every state is a variant of [`State`]; [`step`] dispatches a word to the
//! state's transition function, which evaluates its clauses in order (first
//! match wins), updates the registers and answers with a [`Step`].
//!
//! ```text
//!            start table (first match)
//! word ──┬── number/ordinal ─> NumStart ─┬─> NumCardinal ─┬─> time (10:30, 10 pm)
//!        │                              │                ├─> date (3 March)
//!        │                              │                └─> general (3 miles)
//!        ├── month   ─> MonthStart   ─> DateMonth ─> DateMonthDay
//!        ├── weekday ─> WeekdayStart ─> DateWeekday
//!        ├── title   ─> TitleStart   ─> NameTitle ─┐
//!        ├── first   ─> FirstnameStart ─> NameFirst ┴> NameInitial / NameLast ─> NameSuffix
//!        ├── city    ─> CityStart    ─> PlaceCity ─> PlaceState ─> PlaceCountry
//!        ├── place   ─> PlaceStart   ─> PlaceNamed
//!        └── other   ─> GeneralStart ─> NpDet / NpMod / NpNoun / NpPrep / VpVerb / AdvSeq
//! ```
//!
//! A hypothesis that cannot use the word either emits what it has and returns
//! [`Step::Reject`] (the word starts over at the start table) or returns
//! [`Step::Done`] after using it. Sentence breaks and the end of input arrive as
//! a boundary token that no clause accepts.

#[path = "grammar/date.rs"]
mod date;
#[path = "grammar/general.rs"]
mod general;
#[path = "grammar/name.rs"]
mod name;
#[path = "grammar/number.rs"]
mod number;
#[path = "grammar/place.rs"]
mod place;
#[path = "grammar/predicates.rs"]
mod predicates;
#[path = "grammar/time.rs"]
mod time;

#[cfg(test)]
#[path = "grammar/tests.rs"]
mod tests;

use crate::api::{Options, PhraseMode};
use crate::engine::{Family, Machine};
use crate::{Category, Token};
use tracing::trace;

/// Grammar states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum State {
    NumStart,
    NumCardinal,
    NumAfterMultiplier,
    NumOrdinal,
    NumOrdinalOf,

    WeekdayStart,
    DateWeekday,
    DateDayMonth,
    MonthStart,
    DateMonth,
    DateMonthDay,

    TimeMinute,
    TimeSecond,
    TimeDaytime,

    TitleStart,
    NameTitle,
    FirstnameStart,
    NameFirst,
    NameInitial,
    NameLast,
    NameSuffix,

    CityStart,
    PlaceCity,
    PlaceState,
    PlaceCountry,
    PlaceStart,
    PlaceNamed,

    GeneralStart,
    PrepStart,
    NpDet,
    NpMod,
    NpNoun,
    NpPrep,
    VpVerb,
    AdvSeq,
}

impl State {
    #[cfg(test)]
    pub const ALL: [State; 35] = [
        State::NumStart,
        State::NumCardinal,
        State::NumAfterMultiplier,
        State::NumOrdinal,
        State::NumOrdinalOf,
        State::WeekdayStart,
        State::DateWeekday,
        State::DateDayMonth,
        State::MonthStart,
        State::DateMonth,
        State::DateMonthDay,
        State::TimeMinute,
        State::TimeSecond,
        State::TimeDaytime,
        State::TitleStart,
        State::NameTitle,
        State::FirstnameStart,
        State::NameFirst,
        State::NameInitial,
        State::NameLast,
        State::NameSuffix,
        State::CityStart,
        State::PlaceCity,
        State::PlaceState,
        State::PlaceCountry,
        State::PlaceStart,
        State::PlaceNamed,
        State::GeneralStart,
        State::PrepStart,
        State::NpDet,
        State::NpMod,
        State::NpNoun,
        State::NpPrep,
        State::VpVerb,
        State::AdvSeq,
    ];

    pub fn family(self) -> Family {
        use State::*;
        match self {
            NumStart | NumCardinal | NumAfterMultiplier | NumOrdinal | NumOrdinalOf => Family::Number,
            WeekdayStart | DateWeekday | DateDayMonth | MonthStart | DateMonth | DateMonthDay => Family::Date,
            TimeMinute | TimeSecond | TimeDaytime => Family::Time,
            TitleStart | NameTitle | FirstnameStart | NameFirst | NameInitial | NameLast | NameSuffix => Family::Name,
            CityStart | PlaceCity | PlaceState | PlaceCountry | PlaceStart | PlaceNamed => Family::Place,
            GeneralStart | PrepStart | NpDet | NpMod | NpNoun | NpPrep | VpVerb | AdvSeq => Family::General,
        }
    }

    pub fn name(self) -> &'static str {
        use State::*;
        match self {
            NumStart => "num-start",
            NumCardinal => "num-cardinal",
            NumAfterMultiplier => "num-after-multiplier",
            NumOrdinal => "num-ordinal",
            NumOrdinalOf => "num-ordinal-of",
            WeekdayStart => "weekday-start",
            DateWeekday => "date-weekday",
            DateDayMonth => "date-day-month",
            MonthStart => "month-start",
            DateMonth => "date-month",
            DateMonthDay => "date-month-day",
            TimeMinute => "time-minute",
            TimeSecond => "time-second",
            TimeDaytime => "time-daytime",
            TitleStart => "title-start",
            NameTitle => "name-title",
            FirstnameStart => "firstname-start",
            NameFirst => "name-first",
            NameInitial => "name-initial",
            NameLast => "name-last",
            NameSuffix => "name-suffix",
            CityStart => "city-start",
            PlaceCity => "place-city",
            PlaceState => "place-state",
            PlaceCountry => "place-country",
            PlaceStart => "place-start",
            PlaceNamed => "place-named",
            GeneralStart => "general-start",
            PrepStart => "prep-start",
            NpDet => "np-det",
            NpMod => "np-mod",
            NpNoun => "np-noun",
            NpPrep => "np-prep",
            VpVerb => "vp-verb",
            AdvSeq => "adv-seq",
        }
    }
}

/// Outcome of feeding one word to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The word was used; the hypothesis goes on in the given state.
    Continue(State),
    /// The word was used and the hypothesis is over.
    Done,
    /// The hypothesis is over and did not use the word.
    Reject,
}

/// Category-to-start-state table, in priority order.
const START_TABLE: &[(Category, State)] = &[
    (Category::NUMBER.union(Category::ORDINAL), State::NumStart),
    (Category::MONTH, State::MonthStart),
    (Category::WEEKDAY, State::WeekdayStart),
    (Category::TITLE, State::TitleStart),
    (Category::FIRSTNAME, State::FirstnameStart),
    (Category::CITY, State::CityStart),
    (Category::STATE.union(Category::COUNTRY).union(Category::PLACE), State::PlaceStart),
];

/// Start state for a word that no hypothesis is waiting for.
pub(crate) fn start_state_for(token: &Token, options: &Options) -> Option<State> {
    if token.is_boundary() {
        return None;
    }
    let full = options.mode == PhraseMode::Full;
    let found = START_TABLE
        .iter()
        .filter(|(_, state)| full || state.family() == Family::Name)
        .find(|(cats, _)| token.is(*cats))
        .map(|(_, state)| *state);
    match found {
        Some(state) => Some(state),
        None if full => Some(State::GeneralStart),
        None => None,
    }
}

/// Feed `token` to `state`.
pub(crate) fn step(m: &mut Machine<'_>, state: State, token: &Token) -> Step {
    let next = match state {
        State::NumStart => number::num_start(m, token),
        State::NumCardinal => number::num_cardinal(m, token),
        State::NumAfterMultiplier => number::num_after_multiplier(m, token),
        State::NumOrdinal => number::num_ordinal(m, token),
        State::NumOrdinalOf => number::num_ordinal_of(m, token),

        State::WeekdayStart => date::weekday_start(m, token),
        State::DateWeekday => date::date_weekday(m, token),
        State::DateDayMonth => date::date_day_month(m, token),
        State::MonthStart => date::month_start(m, token),
        State::DateMonth => date::date_month(m, token),
        State::DateMonthDay => date::date_month_day(m, token),

        State::TimeMinute => time::time_minute(m, token),
        State::TimeSecond => time::time_second(m, token),
        State::TimeDaytime => time::time_daytime(m, token),

        State::TitleStart => name::title_start(m, token),
        State::NameTitle => name::name_title(m, token),
        State::FirstnameStart => name::firstname_start(m, token),
        State::NameFirst => name::name_first(m, token),
        State::NameInitial => name::name_initial(m, token),
        State::NameLast => name::name_last(m, token),
        State::NameSuffix => name::name_suffix(m, token),

        State::CityStart => place::city_start(m, token),
        State::PlaceCity => place::place_city(m, token),
        State::PlaceState => place::place_state(m, token),
        State::PlaceCountry => place::place_country(m, token),
        State::PlaceStart => place::place_start(m, token),
        State::PlaceNamed => place::place_named(m, token),

        State::GeneralStart => general::general_start(m, token),
        State::PrepStart => general::prep_start(m, token),
        State::NpDet => general::np_det(m, token),
        State::NpMod => general::np_mod(m, token),
        State::NpNoun => general::np_noun(m, token),
        State::NpPrep => general::np_prep(m, token),
        State::VpVerb => general::vp_verb(m, token),
        State::AdvSeq => general::adv_seq(m, token),
    };
    if m.options.trace {
        trace!(state = state.name(), token = %token.text, next = ?next, confidence = m.regs.confidence, "transition");
    }
    next
}
