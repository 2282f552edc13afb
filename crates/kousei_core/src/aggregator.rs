//! Diagnostic aggregation.

use std::collections::HashSet;

use crate::{AdvancedDiagnostic, Diagnostic, RuleResult};

/// Merges per-rule diagnostics into the final list.
///
/// Diagnostics from successful results are concatenated in rule-registration
/// order, then rule-internal order. Diagnostics with byte-identical
/// `(span, kind)` are collapsed, keeping the first occurrence; overlapping
/// but not identical ranges are all kept; overlap resolution is left to the
/// diagnostics sink.
pub fn aggregate(results: &[RuleResult]) -> Vec<AdvancedDiagnostic> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for result in results.iter().filter(|r| r.success) {
        for diagnostic in &result.diagnostics {
            if seen.insert((diagnostic.span, diagnostic.kind)) {
                merged.push(diagnostic.clone());
            }
        }
    }

    merged
}

/// Converts aggregated diagnostics to the flat external schema.
pub fn to_plain(diagnostics: &[AdvancedDiagnostic]) -> Vec<Diagnostic> {
    diagnostics.iter().map(AdvancedDiagnostic::to_plain).collect()
}
