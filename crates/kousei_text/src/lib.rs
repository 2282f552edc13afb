//! # kousei_text
//!
//! Text analysis entities for the Kousei proofreading engine:
//!
//! - [`Token`]: one morpheme with part-of-speech metadata
//! - [`Sentence`]: a contiguous token span with derived predicates
//! - [`SentenceSegmenter`]: groups tokens into sentences
//! - [`Tokenizer`]: the boundary trait an external morphological
//!   analyzer implements

mod segmenter;
mod sentence;
mod span;
mod token;
mod tokenizer;

pub use segmenter::SentenceSegmenter;
pub use sentence::Sentence;
pub use span::Span;
pub use token::Token;
pub use tokenizer::{TokenizeError, Tokenizer};
