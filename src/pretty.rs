//! Canonical capitalization for display.
//!
//! A pattern holds one character per letter of the word: `A` uppercases, `a`
//! lowercases and `_` keeps the character as written.

use crate::error::PrettyError;
use crate::lexicon::Lexicon;
use crate::phrase::Phrase;
use crate::{CapCode, Category};

const PROPER: Category = Category::MONTH
    .union(Category::WEEKDAY)
    .union(Category::TITLE)
    .union(Category::FIRSTNAME)
    .union(Category::LASTNAME)
    .union(Category::CITY)
    .union(Category::STATE)
    .union(Category::COUNTRY)
    .union(Category::PLACE);

/// Apply a capitalization pattern to `word`.
pub fn apply_pattern(word: &str, pattern: &str) -> Result<String, PrettyError> {
    if let Some(bad) = pattern.chars().find(|c| !matches!(c, 'A' | 'a' | '_')) {
        return Err(PrettyError::IllegalPattern { word: word.to_string(), pattern: pattern.to_string(), bad });
    }
    let expected = pattern.chars().count();
    let actual = word.chars().count();
    if expected != actual {
        return Err(PrettyError::LengthMismatch {
            word: word.to_string(),
            pattern: pattern.to_string(),
            expected,
            actual,
        });
    }

    let mut out = String::with_capacity(word.len());
    for (c, p) in word.chars().zip(pattern.chars()) {
        match p {
            'A' => out.extend(c.to_uppercase()),
            'a' => out.extend(c.to_lowercase()),
            _ => out.push(c),
        }
    }
    Ok(out)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn canonical_word(text: &str, lexicon: &dyn Lexicon) -> Result<String, PrettyError> {
    if let Some(pattern) = lexicon.capitalization_pattern(text) {
        return apply_pattern(text, &pattern);
    }
    let cats = lexicon.category_of(text);
    if cats.intersects(Category::TIMEZONE) || (CapCode::of(text) == CapCode::Upper && text.chars().count() > 1) {
        return Ok(text.to_uppercase());
    }
    if cats.intersects(PROPER) || (CapCode::of(text).is_capitalized() && !lexicon.is_known_word(text)) {
        return Ok(text.split(' ').map(capitalize).collect::<Vec<_>>().join(" "));
    }
    Ok(text.to_lowercase())
}

/// Render the words of `phrase` with their canonical capitalization.
///
/// Fails on the first word whose lexicon pattern is illegal.
pub fn canonical(phrase: &Phrase, lexicon: &dyn Lexicon) -> Result<String, PrettyError> {
    let mut parts = Vec::new();
    for word in phrase.words() {
        parts.push(canonical_word(&word.text, lexicon)?);
    }
    Ok(parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::{NamePhrase, Word};
    use crate::{BasicLexicon, Span};

    #[test]
    fn patterns_apply_per_position() {
        assert_eq!(apply_pattern("mcdonald", "AaAaaaaa").unwrap(), "McDonald");
        assert_eq!(apply_pattern("IPHONE", "aAaaaa").unwrap(), "iPhone");
        assert_eq!(apply_pattern("x-ray", "a_Aaa").unwrap(), "x-Ray");
    }

    #[test]
    fn illegal_patterns_are_errors() {
        let err = apply_pattern("nasa", "AAxA").unwrap_err();
        assert_eq!(err, PrettyError::IllegalPattern { word: "nasa".into(), pattern: "AAxA".into(), bad: 'x' });
        let err = apply_pattern("nasa", "AAA").unwrap_err();
        assert!(matches!(err, PrettyError::LengthMismatch { expected: 3, actual: 4, .. }));
    }

    #[test]
    fn canonical_name_uses_lexicon_patterns() {
        let lex = BasicLexicon::english();
        let phrase = Phrase::Name(NamePhrase {
            title: None,
            first: Some(Word::new("RONALD", Span::new(0, 6))),
            initials: vec![],
            last: vec![Word::new("mcdonald", Span::new(7, 15))],
            suffix: vec![],
            span: None,
        });
        assert_eq!(canonical(&phrase, &lex).unwrap(), "RONALD McDonald");
    }

    #[test]
    fn canonical_propagates_bad_lexicon_data() {
        let mut lex = BasicLexicon::empty();
        lex.load_entries("smith | lastname | | | Aa?aa\n").unwrap();
        let phrase = Phrase::Name(NamePhrase {
            title: None,
            first: None,
            initials: vec![],
            last: vec![Word::new("smith", Span::new(0, 5))],
            suffix: vec![],
            span: None,
        });
        assert!(matches!(canonical(&phrase, &lex), Err(PrettyError::IllegalPattern { bad: '?', .. })));
    }
}
