//! General phrases: noun phrases with determiners, modifiers, prepositional
//! and possessive post-modifiers; verb phrases with their object; adjective
//! and adverb phrases.

use super::predicates::{has_special_start, is_nounish, may_switch_family, no_punct, prefers_verb, starts_noun_phrase};
use super::{State, Step, number};
use crate::engine::Machine;
use crate::engine::confidence;
use crate::engine::registers::NounFields;
use crate::phrase::{AdjPhrase, AdvPhrase, Phrase, PossPhrase, VerbPhrase, Word};
use crate::{Category, Features, Span, Token};

pub(super) fn general_start(m: &mut Machine<'_>, token: &Token) -> Step {
    if token.is(Category::DETERMINER) {
        return accept_det(m, token);
    }
    if token.is(Category::PREPOSITION) {
        m.regs.noun.pending_prep = Some(token.word());
        return Step::Continue(State::PrepStart);
    }
    if token.is(Category::ADVERB) && !token.is(Category::NOUN | Category::ADJECTIVE) {
        return accept_adverb(m, token, State::AdvSeq);
    }
    if token.is(Category::ADJECTIVE) {
        return accept_modifier(m, token);
    }
    if token.is(Category::VERB) && !token.is(Category::NOUN) {
        return begin_verb(m, token);
    }
    if is_nounish(m, token) {
        return accept_noun(m, token);
    }
    Step::Reject
}

/// A preposition with nothing before it: "at 10:30", "in the house".
pub(super) fn prep_start(m: &mut Machine<'_>, token: &Token) -> Step {
    let Some(prep) = m.regs.noun.pending_prep.take() else {
        return Step::Reject;
    };
    if token.is(Category::NUMBER) && no_punct(m) && may_switch_family(m) {
        m.regs.clear_noun();
        m.regs.book.temp_start = Some(prep.span.start);
        m.regs.time.preposition = Some(prep);
        m.regs.book.phrase_start = Some(token.span.start);
        return number::num_start(m, token);
    }
    if no_punct(m) && starts_noun_phrase(m, token) {
        m.regs.clear_noun();
        m.regs.book.phrase_start = Some(token.span.start);
        return open_noun_phrase(m, token);
    }
    Step::Reject
}

pub(super) fn np_det(m: &mut Machine<'_>, token: &Token) -> Step {
    if no_punct(m) {
        if is_modifier(token) {
            return accept_modifier(m, token);
        }
        if token.is(Category::ADVERB) && !token.is(Category::NOUN | Category::ADJECTIVE) {
            return accept_adverb(m, token, State::NpMod);
        }
        if is_nounish(m, token) {
            return accept_noun(m, token);
        }
    }
    finish_np(m);
    Step::Reject
}

pub(super) fn np_mod(m: &mut Machine<'_>, token: &Token) -> Step {
    if no_punct(m) {
        if is_modifier(token) {
            return accept_modifier(m, token);
        }
        if token.is(Category::ADVERB) && !token.is(Category::NOUN | Category::ADJECTIVE) {
            return accept_adverb(m, token, State::NpMod);
        }
        if is_nounish(m, token) {
            return accept_noun(m, token);
        }
        // "the 1st of the month"
        if token.is(Category::PREPOSITION) && promote_last_modifier(m) {
            m.regs.noun.pending_prep = Some(token.word());
            return Step::Continue(State::NpPrep);
        }
    }
    if !emit_adjective_phrase(m) {
        promote_last_modifier(m);
        finish_np(m);
    }
    Step::Reject
}

pub(super) fn np_noun(m: &mut Machine<'_>, token: &Token) -> Step {
    if token.is(Category::POSSESSIVE) && m.ctx.adjacent() {
        if let Some(step) = accept_possessive(m, token) {
            return step;
        }
    }
    if no_punct(m) && !token.is_boundary() {
        // "horse race", "ice cream truck"; a line break ends the head
        let compound = !m.ctx.prev_break() && !has_special_start(token) && !prefers_verb(m, token);
        if compound && is_nounish(m, token) {
            let noun = &mut m.regs.noun;
            if let Some(previous) = noun.noun.take() {
                noun.modifiers.push(previous);
            }
            return accept_noun(m, token);
        }
        // the subject is done; its verb opens a new phrase
        if token.is(Category::VERB) && m.regs.noun.verb.is_none() {
            finish_np(m);
            return begin_verb(m, token);
        }
        if token.is(Category::PREPOSITION) {
            m.regs.noun.pending_prep = Some(token.word());
            return Step::Continue(State::NpPrep);
        }
    }
    finish_np(m);
    Step::Reject
}

/// A noun phrase followed by a preposition: attach the object if one starts here.
pub(super) fn np_prep(m: &mut Machine<'_>, token: &Token) -> Step {
    if let Some(prep) = m.regs.noun.pending_prep.take() {
        if no_punct(m) && starts_noun_phrase(m, token) {
            m.push_prep(prep);
            return open_noun_phrase(m, token);
        }
    }
    finish_np(m);
    Step::Reject
}

pub(super) fn vp_verb(m: &mut Machine<'_>, token: &Token) -> Step {
    if no_punct(m) {
        if token.is(Category::ADVERB) && !token.is(Category::NOUN | Category::ADJECTIVE) {
            return Step::Continue(State::VpVerb);
        }
        // "has been", "would go": the last verb heads the phrase
        if token.is(Category::VERB) && !token.is(Category::NOUN) {
            m.regs.noun.verb = Some(token.word());
            return Step::Continue(State::VpVerb);
        }
        if starts_noun_phrase(m, token) {
            m.regs.book.post_verb_phrase_start = Some(token.span.start);
            return open_noun_phrase(m, token);
        }
    }
    Step::Reject
}

pub(super) fn adv_seq(m: &mut Machine<'_>, token: &Token) -> Step {
    if no_punct(m) {
        if token.is(Category::ADVERB) && !token.is(Category::NOUN | Category::ADJECTIVE) {
            return accept_adverb(m, token, State::AdvSeq);
        }
        if token.is(Category::ADJECTIVE) {
            return accept_modifier(m, token);
        }
        if is_nounish(m, token) && !has_special_start(token) {
            return accept_noun(m, token);
        }
    }
    let noun = std::mem::take(&mut m.regs.noun);
    if noun.adverbs.len() >= 2 {
        let mut qualifiers = noun.adverbs;
        if let Some(head) = qualifiers.pop() {
            let phrase = Phrase::Adv(AdvPhrase { head, qualifiers, span: None });
            m.transmit_from(noun.start, phrase, false, Some(noun.end));
        }
    }
    m.regs.clear_noun();
    Step::Reject
}

fn is_modifier(token: &Token) -> bool {
    token.is(Category::ADJECTIVE | Category::ORDINAL) || (token.is(Category::NUMBER) && !token.is(Category::NOUN))
}

fn open_noun_phrase(m: &mut Machine<'_>, token: &Token) -> Step {
    if token.is(Category::DETERMINER) {
        accept_det(m, token)
    } else if token.is(Category::ADJECTIVE) {
        accept_modifier(m, token)
    } else {
        accept_noun(m, token)
    }
}

fn accept_det(m: &mut Machine<'_>, token: &Token) -> Step {
    let noun = &mut m.regs.noun;
    noun.determiner = Some(token.word());
    noun.det_features = token.features;
    noun.touch(token.span);
    Step::Continue(State::NpDet)
}

fn accept_modifier(m: &mut Machine<'_>, token: &Token) -> Step {
    let noun = &mut m.regs.noun;
    noun.modifiers.push(token.word());
    noun.touch(token.span);
    if token.is(Category::NUMBER) && !token.is(Category::ORDINAL) {
        if let Some(value) = token.value {
            noun.quantity = Some(value);
            noun.must_be_singular = value == 1.0;
            noun.must_be_plural = value != 1.0;
        }
    }
    Step::Continue(State::NpMod)
}

fn accept_adverb(m: &mut Machine<'_>, token: &Token, next: State) -> Step {
    let noun = &mut m.regs.noun;
    noun.adverbs.push(token.word());
    noun.touch(token.span);
    Step::Continue(next)
}

pub(super) fn accept_noun(m: &mut Machine<'_>, token: &Token) -> Step {
    let noun = &mut m.regs.noun;
    noun.noun = Some(token.word());
    noun.noun_features = token.features;
    noun.touch(token.span);
    Step::Continue(State::NpNoun)
}

/// "the dog's bone": the phrase so far becomes the possessor of the next one.
fn accept_possessive(m: &mut Machine<'_>, token: &Token) -> Option<Step> {
    let np = m.regs.noun.to_phrase()?;
    let old = std::mem::take(&mut m.regs.noun);
    Some(possessed_by(m, Phrase::Noun(np), old.start, old.verb, token))
}

/// Open a noun phrase owned by `object`, which started at `start` and ends at the possessive `token`.
pub(super) fn possessed_by(
    m: &mut Machine<'_>,
    object: Phrase,
    start: Option<usize>,
    verb: Option<Word>,
    token: &Token,
) -> Step {
    let span = start.map(|start| Span::new(start, token.span.end));
    m.regs.noun = NounFields {
        possessor: Some(Phrase::Poss(PossPhrase { object: Box::new(object), span })),
        verb,
        start,
        end: token.span.end,
        ..NounFields::default()
    };
    Step::Continue(State::NpDet)
}

fn begin_verb(m: &mut Machine<'_>, token: &Token) -> Step {
    m.regs.clear_noun();
    m.regs.noun.verb = Some(token.word());
    m.regs.book.verb_phrase_start = Some(token.span.start);
    m.regs.book.phrase_start = Some(token.span.start);
    m.regs.confidence = m.options.initial_confidence;
    Step::Continue(State::VpVerb)
}

/// "very happy": adverbs and a single adjective with nothing to modify.
fn emit_adjective_phrase(m: &mut Machine<'_>) -> bool {
    let noun = &m.regs.noun;
    let lone_adjective = noun.determiner.is_none()
        && noun.quantity.is_none()
        && noun.possessor.is_none()
        && noun.modifiers.len() == 1
        && !noun.adverbs.is_empty()
        && m.stack.depth() == 0
        && noun.modifiers.first().is_some_and(|w| m.lex().category_of(&w.text).contains(Category::ADJECTIVE));
    if !lone_adjective {
        return false;
    }
    let noun = std::mem::take(&mut m.regs.noun);
    let Some(adjective) = noun.modifiers.into_iter().next() else {
        return false;
    };
    let phrase = Phrase::Adj(AdjPhrase { adjective, adverbs: noun.adverbs, span: None });
    m.transmit_from(noun.start, phrase, false, Some(noun.end));
    m.regs.clear_noun();
    true
}

/// "the second", "the 3rd": with nothing after it, the last modifier heads the
/// phrase when it can be a noun, or when it is an ordinal after a determiner or
/// possessor. Returns whether the phrase has a head.
fn promote_last_modifier(m: &mut Machine<'_>) -> bool {
    let noun = &m.regs.noun;
    if noun.noun.is_some() {
        return true;
    }
    let Some(last) = noun.modifiers.last() else {
        return false;
    };
    let categories = m.lex().category_of(&last.text);
    let determined = noun.determiner.is_some() || noun.possessor.is_some();
    let mut features = m.lex().features_of(&last.text);
    if !categories.contains(Category::NOUN) {
        if !(determined && categories.contains(Category::ORDINAL)) {
            return false;
        }
        features |= Features::SINGULAR;
    }
    let noun = &mut m.regs.noun;
    noun.noun = noun.modifiers.pop();
    noun.noun_features = features;
    if noun.modifiers.is_empty() {
        noun.quantity = None;
        noun.must_be_singular = false;
        noun.must_be_plural = false;
    }
    true
}

/// Close the noun phrase in the registers, folding open prepositional objects
/// into it first, and emit it (with its verb phrase when it is an object).
pub(super) fn finish_np(m: &mut Machine<'_>) {
    m.pop_all();
    let fields = &m.regs.noun;
    let Some(np) = fields.to_phrase() else {
        m.regs.clear_noun();
        return;
    };
    let p = m.penalties();
    let end = fields.end;
    let mut penalty = 0;
    if fields.is_bare() && fields.verb.is_none() {
        penalty += confidence::ambiguous_head_penalty(m.lex().category_of(&np.noun.text), &p);
    }
    if m.options.check_agreement {
        let mut wanted = fields.det_features;
        if fields.must_be_singular {
            wanted |= Features::WANTS_SINGULAR;
        }
        if fields.must_be_plural {
            wanted |= Features::WANTS_PLURAL;
        }
        penalty += confidence::agreement_penalty(wanted, fields.noun_features, &p);
    }
    let verb = fields.verb.clone();
    let np_start = fields.start;
    m.penalize(penalty);

    match verb {
        Some(verb) => {
            let object_start = m.regs.book.post_verb_phrase_start.or(np_start);
            m.transmit_from(object_start, Phrase::Noun(np.clone()), false, Some(end));
            let vp = Phrase::Verb(VerbPhrase { verb, object: Box::new(Phrase::Noun(np)), span: None });
            let vp_start = m.regs.book.verb_phrase_start;
            m.transmit_from(vp_start, vp, false, Some(end));
        }
        None => {
            m.transmit(Phrase::Noun(np), false, Some(end));
        }
    }
    m.regs.clear_noun();
}
