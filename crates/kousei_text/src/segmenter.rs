//! Sentence segmentation over token streams.

use crate::{Sentence, Token};

/// Surface forms that terminate a sentence.
const TERMINAL_MARKERS: &[&str] = &["。", "！", "？", "!", "?"];

/// Groups an ordered token sequence into sentences.
///
/// A sentence closes at a token whose surface is a terminal marker (`。`,
/// `！`, `？`, `!`, `?`) or at end of input; the closing terminal token is
/// included in the sentence span. Degenerate segments (zero tokens between
/// two terminals) are skipped.
///
/// Segmentation is total and stable: every token belongs to exactly one
/// sentence, and the same token sequence always yields the same boundaries.
pub struct SentenceSegmenter;

impl SentenceSegmenter {
    /// Splits tokens into sentences.
    ///
    /// Tokens whose spans do not land on character boundaries of `text` are
    /// grouped with their neighbors as usual; the enclosing sentence is only
    /// dropped when its combined span cannot be sliced from `text` at all.
    pub fn segment(tokens: &[Token], text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        let mut current: Vec<Token> = Vec::new();

        for token in tokens {
            let is_terminal = TERMINAL_MARKERS.contains(&token.surface.as_str());
            current.push(token.clone());

            if is_terminal {
                if let Some(sentence) = Sentence::from_tokens(std::mem::take(&mut current), text) {
                    sentences.push(sentence);
                }
            }
        }

        if !current.is_empty()
            && let Some(sentence) = Sentence::from_tokens(current, text)
        {
            sentences.push(sentence);
        }

        sentences
    }
}
