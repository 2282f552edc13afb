//! The rule capability contract and per-rule execution records.

use std::time::Duration;

use kousei_text::Token;

use crate::{AdvancedDiagnostic, AdvancedRulesConfig, RuleContext};

/// One detection rule.
///
/// `is_enabled` must be a pure function of the configuration and consult
/// exactly the flag(s) relevant to this rule. `check` must be a pure function
/// of its inputs: the same tokens and context always produce the same
/// diagnostics in the same order. Rules never inspect or mutate other rules'
/// output.
pub trait Rule: Send + Sync {
    /// Unique rule name.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Whether this rule participates in a run under the given config.
    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool;

    /// Evaluates the rule against the document.
    fn check(&self, tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic>;
}

/// Per-rule execution record, created once per rule per pipeline run.
#[derive(Debug, Clone)]
pub struct RuleResult {
    /// Name of the executed rule.
    pub rule_name: String,
    /// Diagnostics the rule produced (empty when the rule failed).
    pub diagnostics: Vec<AdvancedDiagnostic>,
    /// Wall-clock time spent in `check`.
    pub elapsed: Duration,
    /// Whether `check` completed without failure.
    pub success: bool,
    /// Captured error message when `success` is false.
    pub error: Option<String>,
}

impl RuleResult {
    /// Creates a successful result.
    pub fn success(
        rule_name: impl Into<String>,
        diagnostics: Vec<AdvancedDiagnostic>,
        elapsed: Duration,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            diagnostics,
            elapsed,
            success: true,
            error: None,
        }
    }

    /// Creates a failed result with zero diagnostics.
    pub fn failure(rule_name: impl Into<String>, error: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            rule_name: rule_name.into(),
            diagnostics: Vec::new(),
            elapsed,
            success: false,
            error: Some(error.into()),
        }
    }
}
