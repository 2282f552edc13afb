//! Sentence entities and register predicates.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::{Span, Token};

/// A sentence unit: a contiguous token span plus the raw substring.
///
/// The span bounds exactly the tokens the sentence contains, including the
/// trailing terminal punctuation when present. The comma count is derived at
/// construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// The tokens this sentence consists of.
    pub tokens: Vec<Token>,
    /// The raw substring covered by the sentence.
    pub text: String,
    /// The absolute byte range of the sentence in the original text.
    pub span: Span,
    /// Number of comma tokens (`、` or `，`) in the sentence.
    pub comma_count: usize,
}

impl Sentence {
    /// Creates a sentence from a non-empty token run and the original text.
    ///
    /// Returns `None` when `tokens` is empty or the token spans do not land
    /// on character boundaries of `text`.
    pub fn from_tokens(tokens: Vec<Token>, text: &str) -> Option<Self> {
        let first = tokens.first()?;
        let last = tokens.last()?;
        let span = Span::new(first.span.start, last.span.end);
        let raw = span.slice(text)?.to_string();
        let comma_count = tokens
            .iter()
            .filter(|t| t.surface == "、" || t.surface == "，")
            .count();

        Some(Self {
            tokens,
            text: raw,
            span,
            comma_count,
        })
    }

    /// Number of characters (grapheme clusters) in the sentence text.
    pub fn char_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Returns the trailing tokens with terminal punctuation stripped.
    fn trailing_content(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().rev().skip_while(|t| t.is_symbol())
    }

    /// Returns true if the sentence ends in the polite です/ます register.
    pub fn ends_with_desu_masu(&self) -> bool {
        let mut trailing = self.trailing_content();
        // Walk past trailing た/ん-style auxiliaries (ました, でした, ません).
        for token in trailing.by_ref().take(3) {
            if token.is_auxiliary() && (token.base_form == "です" || token.base_form == "ます") {
                return true;
            }
            if !token.is_auxiliary() {
                return false;
            }
        }
        false
    }

    /// Returns true if the sentence ends in the plain/literary である register.
    pub fn ends_with_dearu(&self) -> bool {
        let mut trailing = self.trailing_content();
        let Some(last) = trailing.next() else {
            return false;
        };

        if last.is_auxiliary() && last.base_form == "だ" {
            return true;
        }

        // である = 助詞「で」 + ある (verb or auxiliary); also であった/であります
        // style endings keep ある as the anchoring token.
        if last.base_form == "ある" && (last.is_auxiliary() || last.is_verb()) {
            return matches!(trailing.next(), Some(prev) if prev.surface == "で");
        }
        if last.is_auxiliary() && last.base_form == "た" {
            // であった: た follows ある.
            if let Some(prev) = trailing.next()
                && prev.base_form == "ある"
            {
                return matches!(trailing.next(), Some(p) if p.surface == "で");
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(surface: &str, pos: &str, start: u32, text: &str) -> Token {
        let end = start + surface.len() as u32;
        let _ = text;
        Token::new(surface, pos, Span::new(start, end))
    }

    #[test]
    fn test_from_tokens_span_and_commas() {
        let text = "犬、猫、鳥。";
        let tokens = vec![
            token("犬", "名詞", 0, text),
            token("、", "記号", 3, text),
            token("猫", "名詞", 6, text),
            token("、", "記号", 9, text),
            token("鳥", "名詞", 12, text),
            token("。", "記号", 15, text),
        ];

        let sentence = Sentence::from_tokens(tokens, text).unwrap();
        assert_eq!(sentence.span, Span::new(0, 18));
        assert_eq!(sentence.text, text);
        assert_eq!(sentence.comma_count, 2);
        assert_eq!(sentence.char_count(), 6);
    }

    #[test]
    fn test_from_tokens_empty() {
        assert!(Sentence::from_tokens(Vec::new(), "text").is_none());
    }

    #[test]
    fn test_ends_with_desu_masu() {
        let text = "行きます。";
        let tokens = vec![
            Token::new("行き", "動詞", Span::new(0, 6)).with_base_form("行く"),
            Token::new("ます", "助動詞", Span::new(6, 12)).with_base_form("ます"),
            token("。", "記号", 12, text),
        ];
        let sentence = Sentence::from_tokens(tokens, text).unwrap();
        assert!(sentence.ends_with_desu_masu());
        assert!(!sentence.ends_with_dearu());
    }

    #[test]
    fn test_ends_with_desu_masu_past() {
        let text = "行きました。";
        let tokens = vec![
            Token::new("行き", "動詞", Span::new(0, 6)).with_base_form("行く"),
            Token::new("まし", "助動詞", Span::new(6, 12)).with_base_form("ます"),
            Token::new("た", "助動詞", Span::new(12, 15)).with_base_form("た"),
            token("。", "記号", 15, text),
        ];
        let sentence = Sentence::from_tokens(tokens, text).unwrap();
        assert!(sentence.ends_with_desu_masu());
    }

    #[test]
    fn test_ends_with_dearu() {
        let text = "重要である。";
        let tokens = vec![
            token("重要", "名詞", 0, text),
            token("で", "助動詞", 6, text),
            Token::new("ある", "助動詞", Span::new(9, 15)).with_base_form("ある"),
            token("。", "記号", 15, text),
        ];
        let sentence = Sentence::from_tokens(tokens, text).unwrap();
        assert!(sentence.ends_with_dearu());
        assert!(!sentence.ends_with_desu_masu());
    }

    #[test]
    fn test_ends_with_da() {
        let text = "静かだ。";
        let tokens = vec![
            token("静か", "名詞", 0, text),
            Token::new("だ", "助動詞", Span::new(6, 9)).with_base_form("だ"),
            token("。", "記号", 9, text),
        ];
        let sentence = Sentence::from_tokens(tokens, text).unwrap();
        assert!(sentence.ends_with_dearu());
    }

    #[test]
    fn test_plain_verb_ending_is_neither() {
        let text = "走る。";
        let tokens = vec![
            Token::new("走る", "動詞", Span::new(0, 6)).with_base_form("走る"),
            token("。", "記号", 6, text),
        ];
        let sentence = Sentence::from_tokens(tokens, text).unwrap();
        assert!(!sentence.ends_with_desu_masu());
        assert!(!sentence.ends_with_dearu());
    }
}
