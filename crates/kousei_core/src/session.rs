//! Analysis sessions and document-version staleness.

use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use kousei_text::{SentenceSegmenter, Token};

use crate::{
    AdvancedDiagnostic, AdvancedRulesConfig, Diagnostic, EngineError, NoopTermLookup, RuleContext,
    RuleExecutor, RuleRegistry, RuleResult, TermLookup, aggregate, to_plain,
};

/// Default document size limit in bytes.
const DEFAULT_MAX_DOCUMENT_BYTES: usize = 1_000_000;

/// The result set of one analysis run, tied to a `(uri, version)` pair.
///
/// This is the authority for discarding superseded work: the pipeline never
/// self-cancels, so consumers compare versions at the consumption boundary.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    /// Document URI the run was computed against.
    pub uri: String,
    /// Document version the run was computed against.
    pub version: i32,
    /// When the analysis completed.
    pub analyzed_at: SystemTime,
    /// The final aggregated diagnostic set.
    pub diagnostics: Vec<AdvancedDiagnostic>,
    /// Per-rule execution records, for host telemetry.
    pub rule_results: Vec<RuleResult>,
}

impl DocumentAnalysis {
    /// Returns true when this analysis has been superseded by a newer
    /// document version.
    pub fn is_stale(&self, current_version: i32) -> bool {
        self.version < current_version
    }

    /// Converts the aggregated diagnostics to the flat external schema.
    pub fn to_plain_diagnostics(&self) -> Vec<Diagnostic> {
        to_plain(&self.diagnostics)
    }
}

/// Binds one document version to one pipeline run.
///
/// Owns the rule registry, the current configuration snapshot, and the term
/// lookup collaborator. The configuration is replaced wholesale on external
/// change; an in-flight run keeps the snapshot it started with.
pub struct AnalysisSession {
    registry: RuleRegistry,
    config: Arc<AdvancedRulesConfig>,
    lookup: Arc<dyn TermLookup>,
    executor: RuleExecutor,
    max_document_bytes: usize,
}

impl AnalysisSession {
    /// Creates a session with the standard rule registry.
    pub fn new(config: AdvancedRulesConfig) -> Self {
        Self {
            registry: RuleRegistry::standard(),
            config: Arc::new(config),
            lookup: Arc::new(NoopTermLookup),
            executor: RuleExecutor::new(),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    /// Replaces the registry (primarily for tests and embedders).
    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the external term lookup collaborator.
    pub fn with_lookup(mut self, lookup: Arc<dyn TermLookup>) -> Self {
        self.lookup = lookup;
        self
    }

    /// Enables parallel rule execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.executor = self.executor.with_parallelism(parallel);
        self
    }

    /// Sets the document size limit.
    pub fn with_max_document_bytes(mut self, limit: usize) -> Self {
        self.max_document_bytes = limit;
        self
    }

    /// Replaces the configuration snapshot wholesale.
    ///
    /// Runs already in flight keep the snapshot they started with.
    pub fn update_config(&mut self, config: AdvancedRulesConfig) {
        self.config = Arc::new(config);
    }

    /// The currently-bound configuration snapshot.
    pub fn config(&self) -> &AdvancedRulesConfig {
        &self.config
    }

    /// Returns true when documents of the given language id should be
    /// analyzed under the current configuration.
    pub fn is_language_enabled(&self, language_id: &str) -> bool {
        self.config.is_language_enabled(language_id)
    }

    /// Runs the full pipeline against one document version snapshot.
    ///
    /// Input errors abort the run before any rule executes and are reported
    /// as a single run-level failure, never partial diagnostics.
    pub fn analyze(
        &self,
        uri: &str,
        version: i32,
        text: &str,
        tokens: Vec<Token>,
    ) -> Result<DocumentAnalysis, EngineError> {
        if text.len() > self.max_document_bytes {
            return Err(EngineError::FileTooLarge {
                size: text.len(),
                limit: self.max_document_bytes,
            });
        }

        if !text.is_empty() && tokens.is_empty() {
            return Err(EngineError::MalformedTokens(
                "empty token stream for non-empty text".to_string(),
            ));
        }
        validate_token_stream(&tokens)?;

        // Hold one snapshot for the entire run even if update_config is
        // called concurrently.
        let config = Arc::clone(&self.config);

        let sentences = SentenceSegmenter::segment(&tokens, text);
        debug!(uri, version, sentences = sentences.len(), "analysis started");

        let ctx = RuleContext {
            text,
            tokens: &tokens,
            sentences: &sentences,
            config: &config,
            lookup: self.lookup.as_ref(),
        };

        let rule_results = self.executor.run(&self.registry, &ctx);
        let diagnostics = aggregate(&rule_results);

        Ok(DocumentAnalysis {
            uri: uri.to_string(),
            version,
            analyzed_at: SystemTime::now(),
            diagnostics,
            rule_results,
        })
    }
}

/// Checks the token-stream invariants: `start < end`, ordered,
/// non-overlapping.
fn validate_token_stream(tokens: &[Token]) -> Result<(), EngineError> {
    for token in tokens {
        if token.span.start >= token.span.end {
            return Err(EngineError::MalformedTokens(format!(
                "empty token span at offset {}",
                token.span.start
            )));
        }
    }
    for pair in tokens.windows(2) {
        if pair[1].span.start < pair[0].span.end {
            return Err(EngineError::MalformedTokens(format!(
                "overlapping tokens at offset {}",
                pair[1].span.start
            )));
        }
    }
    Ok(())
}
