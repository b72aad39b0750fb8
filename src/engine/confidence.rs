//! Confidence and case policy.
//!
//! Confidence is a small integer that starts at [`crate::Options::initial_confidence`]
//! and only ever goes down by penalty weights, with one exception: capitalization
//! that nothing but the hypothesis explains lifts it to the lowest emitting value.

use super::context::CaseFlags;
use crate::{CapCode, Category, Features};

/// Penalty weights. Negative weights are treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Penalties {
    /// Parts of one name or place disagree in capitalization ("John smith").
    pub case_mismatch: i32,
    /// The running text is all caps or headline case, so capitals carry no signal.
    pub text_case: i32,
    /// The deciding word also has an unrelated dictionary sense ("Jack", "May").
    pub dictionary_sense: i32,
    /// Expected punctuation is missing ("March 3 1999", "Boston Massachusetts").
    pub no_punctuation_signal: i32,
    /// A name or place written entirely in lowercase.
    pub lowercase_name: i32,
    /// A first name with no surname, title or initial.
    pub lone_first_name: i32,
    /// A bare noun phrase whose head is just as likely a verb ("run").
    pub ambiguous_head: i32,
    /// Determiner and head disagree in number ("these dog").
    pub agreement: i32,
}

impl Default for Penalties {
    fn default() -> Self {
        Penalties {
            case_mismatch: 3,
            text_case: 2,
            dictionary_sense: 1,
            no_punctuation_signal: 1,
            lowercase_name: 6,
            lone_first_name: 3,
            ambiguous_head: 6,
            agreement: 3,
        }
    }
}

pub(crate) fn penalize(confidence: i32, weight: i32) -> i32 {
    confidence - weight.max(0)
}

/// Lift `confidence` to the lowest value that still emits.
pub(crate) fn raise_if_unexplained(confidence: i32, threshold: i32) -> i32 {
    confidence.max(threshold + 1)
}

/// Case penalty for the parts of a name or place.
pub(crate) fn part_case_penalty(caps: &[CapCode], case_sensitive: bool, p: &Penalties) -> i32 {
    if !case_sensitive {
        return 0;
    }
    let lower = caps.iter().any(|c| *c == CapCode::Lower);
    let upper = caps.iter().any(|c| c.is_capitalized());
    match (lower, upper) {
        (true, false) => p.lowercase_name.max(0),
        (true, true) => p.case_mismatch.max(0),
        _ => 0,
    }
}

pub(crate) fn text_case_penalty(flags: CaseFlags, case_sensitive: bool, p: &Penalties) -> i32 {
    if case_sensitive && (flags.shouting() || flags.headline()) { p.text_case.max(0) } else { 0 }
}

/// Penalty when `categories` holds senses outside `own` that compete with it.
pub(crate) fn competing_sense_penalty(categories: Category, own: Category, p: &Penalties) -> i32 {
    let competing = Category::GENERAL.difference(Category::DETERMINER | Category::PREPOSITION);
    if categories.difference(own).intersects(competing) { p.dictionary_sense.max(0) } else { 0 }
}

pub(crate) fn ambiguous_head_penalty(categories: Category, p: &Penalties) -> i32 {
    if categories.contains(Category::NOUN | Category::VERB) { p.ambiguous_head.max(0) } else { 0 }
}

pub(crate) fn agreement_penalty(det: Features, head: Features, p: &Penalties) -> i32 {
    let clash = (det.contains(Features::WANTS_SINGULAR) && head.contains(Features::PLURAL))
        || (det.contains(Features::WANTS_PLURAL) && head.contains(Features::SINGULAR));
    if clash { p.agreement.max(0) } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_reaches_first_emitting_value() {
        assert_eq!(raise_if_unexplained(2, 5), 6);
        assert_eq!(raise_if_unexplained(9, 5), 9);
    }

    #[test]
    fn penalties_only_subtract() {
        assert_eq!(penalize(10, 3), 7);
        assert_eq!(penalize(10, -4), 10);
        for weight in 0..10 {
            assert!(penalize(10, weight) >= penalize(10, weight + 1));
        }
    }

    #[test]
    fn part_case() {
        let p = Penalties::default();
        assert_eq!(part_case_penalty(&[CapCode::Initial, CapCode::Initial], true, &p), 0);
        assert_eq!(part_case_penalty(&[CapCode::Lower, CapCode::Lower], true, &p), 6);
        assert_eq!(part_case_penalty(&[CapCode::Initial, CapCode::Lower], true, &p), 3);
        assert_eq!(part_case_penalty(&[CapCode::Lower], false, &p), 0);
    }

    #[test]
    fn senses_and_agreement() {
        let p = Penalties::default();
        assert_eq!(competing_sense_penalty(Category::FIRSTNAME | Category::NOUN, Category::FIRSTNAME, &p), 1);
        assert_eq!(competing_sense_penalty(Category::FIRSTNAME | Category::CITY, Category::FIRSTNAME, &p), 0);
        assert_eq!(ambiguous_head_penalty(Category::NOUN | Category::VERB, &p), 6);
        assert_eq!(ambiguous_head_penalty(Category::NOUN, &p), 0);
        assert_eq!(agreement_penalty(Features::WANTS_PLURAL, Features::SINGULAR, &p), 3);
        assert_eq!(agreement_penalty(Features::WANTS_SINGULAR, Features::SINGULAR, &p), 0);
    }

    #[test]
    fn text_case_needs_a_settled_profile() {
        let p = Penalties::default();
        let shouting = CaseFlags { words: 4, all_upper: true, all_initial: true };
        assert_eq!(text_case_penalty(shouting, true, &p), 2);
        let early = CaseFlags { words: 1, all_upper: true, all_initial: true };
        assert_eq!(text_case_penalty(early, true, &p), 0);
    }
}
