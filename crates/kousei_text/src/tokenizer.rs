//! Tokenizer boundary.
//!
//! Morphological analysis is performed by an external collaborator; the
//! engine only consumes the ordered [`Token`] stream it produces. This module
//! defines the trait that collaborator implements and the errors it may
//! surface.

use crate::Token;

/// Errors an external tokenizer may surface.
///
/// `code()` yields the closed-set error code the host displays.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TokenizeError {
    /// The analyzer failed to tokenize the text.
    #[error("Tokenizer parse error: {0}")]
    Parse(String),

    /// The analyzer's dictionary or model failed to load.
    #[error("Tokenizer dictionary error: {0}")]
    Dictionary(String),

    /// The analyzer could not be initialized.
    #[error("Tokenizer initialization error: {0}")]
    Init(String),
}

impl TokenizeError {
    /// The closed-set error code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            TokenizeError::Parse(_) => "ANALYZER_PARSE_ERROR",
            TokenizeError::Dictionary(_) => "ANALYZER_DICT_ERROR",
            TokenizeError::Init(_) => "ANALYZER_INIT_ERROR",
        }
    }
}

/// External morphological tokenizer boundary.
///
/// Implementations must produce an ordered, non-overlapping token sequence
/// for the given text buffer.
pub trait Tokenizer: Send + Sync {
    /// Tokenizes the given text.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, TokenizeError>;
}
