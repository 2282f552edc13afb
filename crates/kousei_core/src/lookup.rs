//! Term/reference lookup boundary.
//!
//! Dictionary-family rules that resolve ambiguous terminology consult an
//! external request/response service. Implementations carry their own
//! timeout; any failure degrades the affected rule to zero diagnostics and
//! never fails the run.

/// Errors the external term service may surface.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LookupError {
    /// The request failed.
    #[error("Term lookup request failed: {0}")]
    RequestFailed(String),

    /// The request timed out.
    #[error("Term lookup timed out")]
    Timeout,

    /// The service rate-limited the client.
    #[error("Term lookup rate limited")]
    RateLimit,
}

impl LookupError {
    /// The closed-set error code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::RequestFailed(_) => "WIKIPEDIA_REQUEST_FAILED",
            LookupError::Timeout => "WIKIPEDIA_TIMEOUT",
            LookupError::RateLimit => "WIKIPEDIA_RATE_LIMIT",
        }
    }
}

/// A resolved term entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    /// The canonical writing of the term.
    pub canonical: String,
    /// Optional short description of the canonical term.
    pub description: Option<String>,
}

/// External term/reference lookup boundary.
pub trait TermLookup: Send + Sync {
    /// Resolves the canonical writing of an ambiguous term.
    ///
    /// `Ok(None)` means the service has no opinion on this term.
    fn lookup(&self, term: &str) -> Result<Option<TermEntry>, LookupError>;
}

/// A lookup that never resolves anything. Used when no external term service
/// is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTermLookup;

impl TermLookup for NoopTermLookup {
    fn lookup(&self, _term: &str) -> Result<Option<TermEntry>, LookupError> {
        Ok(None)
    }
}
