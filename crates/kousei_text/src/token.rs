//! Morpheme tokens.

use serde::{Deserialize, Serialize};

use crate::Span;

/// A token representing one morphological unit.
///
/// Tokens are produced by an external [`Tokenizer`](crate::Tokenizer) and are
/// immutable afterwards. Part-of-speech tags follow the IPADIC conventions
/// (e.g. `名詞`, `動詞`, `助詞`). Fields the analyzer could not fill are empty
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The surface form of the token (the text itself).
    pub surface: String,
    /// Major part of speech (e.g. "名詞", "動詞").
    pub pos: String,
    /// Up to three part-of-speech sub-classifications.
    #[serde(default)]
    pub pos_detail: Vec<String>,
    /// Conjugation type (e.g. "一段", "五段・ラ行").
    #[serde(default)]
    pub conjugation_type: String,
    /// Conjugation form (e.g. "基本形", "未然形").
    #[serde(default)]
    pub conjugation_form: String,
    /// Dictionary (base) form.
    #[serde(default)]
    pub base_form: String,
    /// Katakana reading.
    #[serde(default)]
    pub reading: String,
    /// Pronunciation.
    #[serde(default)]
    pub pronunciation: String,
    /// Byte range in the original text.
    pub span: Span,
}

impl Token {
    /// Creates a new token with only surface, part of speech and span set.
    pub fn new(surface: impl Into<String>, pos: impl Into<String>, span: Span) -> Self {
        let surface = surface.into();
        Self {
            base_form: surface.clone(),
            surface,
            pos: pos.into(),
            pos_detail: Vec::new(),
            conjugation_type: String::new(),
            conjugation_form: String::new(),
            reading: String::new(),
            pronunciation: String::new(),
            span,
        }
    }

    /// Sets the part-of-speech sub-classifications.
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.pos_detail = details;
        self
    }

    /// Sets the conjugation type and form.
    pub fn with_conjugation(
        mut self,
        conjugation_type: impl Into<String>,
        conjugation_form: impl Into<String>,
    ) -> Self {
        self.conjugation_type = conjugation_type.into();
        self.conjugation_form = conjugation_form.into();
        self
    }

    /// Sets the dictionary form.
    pub fn with_base_form(mut self, base_form: impl Into<String>) -> Self {
        self.base_form = base_form.into();
        self
    }

    /// Sets the reading.
    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.reading = reading.into();
        self
    }

    /// Sets the pronunciation.
    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = pronunciation.into();
        self
    }

    /// Gets the n-th part-of-speech sub-classification, if present.
    pub fn pos_detail(&self, index: usize) -> Option<&str> {
        self.pos_detail
            .get(index)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Returns true if the token is a particle (助詞).
    pub fn is_particle(&self) -> bool {
        self.pos == "助詞"
    }

    /// Returns true if the token is a verb (動詞).
    pub fn is_verb(&self) -> bool {
        self.pos == "動詞"
    }

    /// Returns true if the token is a noun (名詞).
    pub fn is_noun(&self) -> bool {
        self.pos == "名詞"
    }

    /// Returns true if the token is an adjective (形容詞).
    pub fn is_adjective(&self) -> bool {
        self.pos == "形容詞"
    }

    /// Returns true if the token is an adverb (副詞).
    pub fn is_adverb(&self) -> bool {
        self.pos == "副詞"
    }

    /// Returns true if the token is an auxiliary verb (助動詞).
    pub fn is_auxiliary(&self) -> bool {
        self.pos == "助動詞"
    }

    /// Returns true if the token is a symbol (記号).
    pub fn is_symbol(&self) -> bool {
        self.pos == "記号"
    }

    /// Returns true if the token is a conjunction (接続詞).
    pub fn is_conjunction(&self) -> bool {
        self.pos == "接続詞"
    }

    /// Returns true if the token is a numeral noun (名詞,数).
    pub fn is_number(&self) -> bool {
        self.is_noun() && self.pos_detail(0) == Some("数")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("助詞", true, false, false)]
    #[case("動詞", false, true, false)]
    #[case("名詞", false, false, true)]
    fn capability_queries(
        #[case] pos: &str,
        #[case] particle: bool,
        #[case] verb: bool,
        #[case] noun: bool,
    ) {
        let token = Token::new("surface", pos, Span::new(0, 3));
        assert_eq!(token.is_particle(), particle);
        assert_eq!(token.is_verb(), verb);
        assert_eq!(token.is_noun(), noun);
    }

    #[test]
    fn test_builder_chain() {
        let token = Token::new("食べれる", "動詞", Span::new(0, 12))
            .with_details(vec!["自立".to_string()])
            .with_conjugation("一段", "基本形")
            .with_base_form("食べれる")
            .with_reading("タベレル");

        assert_eq!(token.pos_detail(0), Some("自立"));
        assert_eq!(token.pos_detail(1), None);
        assert_eq!(token.conjugation_type, "一段");
        assert_eq!(token.conjugation_form, "基本形");
        assert_eq!(token.reading, "タベレル");
    }

    #[test]
    fn test_base_form_defaults_to_surface() {
        let token = Token::new("世界", "名詞", Span::new(0, 6));
        assert_eq!(token.base_form, "世界");
    }

    #[test]
    fn test_number_detection() {
        let number = Token::new("3", "名詞", Span::new(0, 1)).with_details(vec!["数".to_string()]);
        assert!(number.is_number());

        let plain = Token::new("犬", "名詞", Span::new(0, 3));
        assert!(!plain.is_number());
    }

    #[test]
    fn test_empty_detail_filtered() {
        let token =
            Token::new("は", "助詞", Span::new(0, 3)).with_details(vec![String::new()]);
        assert_eq!(token.pos_detail(0), None);
    }
}
