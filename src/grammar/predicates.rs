//! Word tests shared by the transition functions.

use crate::api::PhraseMode;
use crate::engine::Machine;
use crate::{CapCode, Category, Features, Token};

/// Categories that open a hypothesis of their own and so never continue a
/// general phrase.
const SPECIAL_START: Category = Category::NUMBER
    .union(Category::ORDINAL)
    .union(Category::MONTH)
    .union(Category::WEEKDAY)
    .union(Category::TITLE)
    .union(Category::FIRSTNAME)
    .union(Category::CITY)
    .union(Category::STATE)
    .union(Category::COUNTRY)
    .union(Category::PLACE);

const CLOSED_CLASS: Category = Category::DETERMINER
    .union(Category::PREPOSITION)
    .union(Category::PRONOUN)
    .union(Category::CONJUNCTION)
    .union(Category::POSSESSIVE);

pub(super) fn has_special_start(token: &Token) -> bool {
    token.is(SPECIAL_START)
}

/// Written in digits ("1999", "1,200", "3.5"), with no ordinal suffix.
pub(super) fn is_digits(token: &Token) -> bool {
    !token.text.is_empty() && token.text.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}

/// Written in exactly `n` ASCII digits.
pub(super) fn digit_count_is(token: &Token, n: usize) -> bool {
    token.text.len() == n && token.text.chars().all(|c| c.is_ascii_digit())
}

/// The token's value as a whole number, if it has one.
pub(super) fn integer(token: &Token) -> Option<i64> {
    let value = token.value?;
    if value.fract() == 0.0 && value >= 0.0 && value < i64::MAX as f64 { Some(value as i64) } else { None }
}

/// Usable as a day of the month: 1..=31, in at most two digits or as a word.
pub(super) fn day_value(token: &Token) -> Option<u32> {
    if !token.is(Category::NUMBER) || token.text.chars().filter(|c| c.is_ascii_digit()).count() > 2 {
        return None;
    }
    integer(token).filter(|d| (1..=31).contains(d)).map(|d| d as u32)
}

pub(super) fn days_in_month(month: Option<u32>, year: Option<i32>) -> u32 {
    match month {
        Some(4 | 6 | 9 | 11) => 30,
        Some(2) => match year {
            Some(y) if !(y % 4 == 0 && (y % 100 != 0 || y % 400 == 0)) => 28,
            _ => 29,
        },
        _ => 31,
    }
}

pub(super) fn plausible_day(day: u32, month: Option<u32>, year: Option<i32>) -> bool {
    day >= 1 && day <= days_in_month(month, year)
}

/// A single capital letter, as in the "F" of "John F. Kennedy".
pub(super) fn is_initial_letter(token: &Token) -> bool {
    let mut chars = token.text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// A word the lexicon knows nothing about.
pub(super) fn is_unknown(token: &Token) -> bool {
    token.categories.is_empty() && token.cap != CapCode::Other && !token.text.contains('\'')
}

/// Can head a noun phrase.
pub(super) fn is_nounish(m: &Machine<'_>, token: &Token) -> bool {
    if token.is_boundary() || token.is(CLOSED_CLASS) {
        return false;
    }
    if is_unknown(token) {
        if m.options.suppress_proper_nouns && token.cap.is_capitalized() && !token.sentence_start {
            return false;
        }
        return true;
    }
    token.is(Category::NOUN)
}

/// The word reads better as a verb than as the next noun of a compound.
///
/// "runs" after "dog" is a verb; "race" after "horse" continues the noun.
pub(super) fn prefers_verb(m: &Machine<'_>, token: &Token) -> bool {
    if !token.is(Category::VERB) {
        return false;
    }
    if !token.is(Category::NOUN) {
        return true;
    }
    m.regs.noun.noun_features.contains(Features::SINGULAR) && token.has(Features::PLURAL)
}

/// Can open a noun phrase in the general grammar.
pub(super) fn starts_noun_phrase(m: &Machine<'_>, token: &Token) -> bool {
    if has_special_start(token) {
        return false;
    }
    token.is(Category::DETERMINER | Category::ADJECTIVE) || is_nounish(m, token)
}

/// No punctuation at all between the previous word and this one.
pub(super) fn no_punct(m: &Machine<'_>) -> bool {
    m.ctx.no_punct_after(0)
}

/// Punctuation between the parts of a name: none, or the period that closes
/// an abbreviation or initial (a period that ended the sentence has already
/// ended the hypothesis).
pub(super) fn name_gap_ok(m: &Machine<'_>) -> bool {
    no_punct(m) || (m.ctx.only_mark('.') && !m.ctx.sbreak())
}

/// Hand-offs between families: full phrase mode, and never from the secondary
/// reading, which stays in the general family.
pub(super) fn may_switch_family(m: &Machine<'_>) -> bool {
    m.options.mode == PhraseMode::Full && !m.emitter.is_suppressed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(Some(2), Some(2000)), 29);
        assert_eq!(days_in_month(Some(2), Some(1900)), 28);
        assert_eq!(days_in_month(Some(2), None), 29);
        assert_eq!(days_in_month(Some(9), None), 30);
        assert_eq!(days_in_month(None, None), 31);
        assert!(plausible_day(31, Some(3), None));
        assert!(!plausible_day(31, Some(4), None));
        assert!(!plausible_day(0, Some(1), None));
    }
}
