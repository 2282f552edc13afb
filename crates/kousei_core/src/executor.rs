//! The rule execution pipeline.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{RuleContext, RuleRegistry, RuleResult};

/// Runs enabled rules over a [`RuleContext`], isolating failures per rule.
///
/// A single rule's failure never aborts the run or affects other rules'
/// results. Sequential and parallel execution produce identical ordered
/// output because every rule is a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleExecutor {
    parallel: bool,
}

impl RuleExecutor {
    /// Creates a sequential executor.
    pub fn new() -> Self {
        Self { parallel: false }
    }

    /// Enables rayon-parallel execution across rules.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Runs the registry against the context, in registration order.
    ///
    /// Output contains one [`RuleResult`] per enabled rule, in registration
    /// order. Disabled rules are skipped entirely.
    pub fn run(&self, registry: &RuleRegistry, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let enabled: Vec<_> = registry
            .iter()
            .filter(|rule| rule.is_enabled(ctx.config))
            .collect();

        debug!(
            enabled = enabled.len(),
            total = registry.len(),
            "running rule pipeline"
        );

        if self.parallel {
            enabled
                .par_iter()
                .map(|rule| Self::run_one(*rule, ctx))
                .collect()
        } else {
            enabled
                .iter()
                .map(|rule| Self::run_one(*rule, ctx))
                .collect()
        }
    }

    /// Invokes one rule, capturing elapsed time and any panic.
    fn run_one(rule: &dyn crate::Rule, ctx: &RuleContext<'_>) -> RuleResult {
        let start = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| rule.check(ctx.tokens, ctx)));
        let elapsed = start.elapsed();

        match outcome {
            Ok(diagnostics) => {
                debug!(
                    rule = rule.name(),
                    count = diagnostics.len(),
                    ?elapsed,
                    "rule completed"
                );
                RuleResult::success(rule.name(), diagnostics, elapsed)
            }
            Err(payload) => {
                let message = panic_message(payload);
                warn!(rule = rule.name(), error = %message, "rule failed");
                RuleResult::failure(rule.name(), message, elapsed)
            }
        }
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rule panicked".to_string()
    }
}
