//! Engine error types.

use kousei_text::TokenizeError;

/// Errors that abort an analysis run before any rule executes.
///
/// Rule-local failures are never surfaced here; they are isolated into the
/// per-rule [`RuleResult`](crate::RuleResult).
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum EngineError {
    /// The document text could not be decoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The document exceeds the configured size limit.
    #[error("Document too large: {size} bytes (limit {limit})")]
    FileTooLarge {
        /// Actual document size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The external tokenizer failed.
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] TokenizeError),

    /// The token stream is malformed (unordered or overlapping tokens, or
    /// empty for non-empty text).
    #[error("Malformed token stream: {0}")]
    MalformedTokens(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The closed-set error code surfaced to the host.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Encoding(_) => "ENCODING_ERROR",
            EngineError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            EngineError::Analyzer(e) => e.code(),
            EngineError::MalformedTokens(_) => "ANALYZER_PARSE_ERROR",
            EngineError::Config(_) => "CONFIG_ERROR",
            EngineError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_codes() {
        assert_eq!(
            EngineError::Encoding("bad utf-8".into()).code(),
            "ENCODING_ERROR"
        );
        assert_eq!(
            EngineError::FileTooLarge {
                size: 10,
                limit: 5
            }
            .code(),
            "FILE_TOO_LARGE"
        );
        assert_eq!(
            EngineError::Analyzer(TokenizeError::Dictionary("missing".into())).code(),
            "ANALYZER_DICT_ERROR"
        );
        assert_eq!(
            EngineError::MalformedTokens("overlap".into()).code(),
            "ANALYZER_PARSE_ERROR"
        );
    }
}
