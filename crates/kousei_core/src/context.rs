//! Read-only context passed to every rule.

use kousei_text::{Sentence, Token};

use crate::{AdvancedRulesConfig, TermLookup};

/// Read-only bundle passed to every rule invocation.
///
/// Never mutated by a rule; the configuration is one immutable snapshot for
/// the entire run.
pub struct RuleContext<'a> {
    /// Full document text.
    pub text: &'a str,
    /// All tokens of the document, ordered and non-overlapping.
    pub tokens: &'a [Token],
    /// Segmented sentences, ordered by start offset.
    pub sentences: &'a [Sentence],
    /// The active configuration snapshot.
    pub config: &'a AdvancedRulesConfig,
    /// External term lookup collaborator.
    pub lookup: &'a dyn TermLookup,
}
