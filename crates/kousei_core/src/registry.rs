//! The fixed-order rule registry.

use crate::Rule;
use crate::rules;

/// An ordered collection of rules.
///
/// Registration order is fixed and is the tie-break order when two rules
/// report identical ranges during aggregation. Rules are never resolved by
/// name lookup at runtime.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Builds the standard registry containing every built-in rule, in the
    /// fixed evaluation order.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                // Token n-gram / window family
                Box::new(rules::RaNukiRule),
                Box::new(rules::DoubleNegationRule),
                Box::new(rules::DoubledParticleRule),
                Box::new(rules::NoParticleChainRule),
                Box::new(rules::NounChainRule),
                Box::new(rules::SahenVerbRule),
                // Dominant-style voting family
                Box::new(rules::StyleConsistencyRule),
                Box::new(rules::AlphabetWidthRule),
                Box::new(rules::NumberWidthRule),
                Box::new(rules::KanaWidthRule),
                Box::new(rules::NumeralStyleRule),
                Box::new(rules::DashTildeRule),
                Box::new(rules::NakaguroRule),
                Box::new(rules::BracketStyleRule),
                Box::new(rules::KutenStyleRule),
                Box::new(rules::KatakanaLongVowelRule),
                Box::new(rules::DateFormatRule),
                // Sentence-aggregate family
                Box::new(rules::CommaCountRule),
                Box::new(rules::LongSentenceRule),
                Box::new(rules::MonotonousEndingRule),
                Box::new(rules::PassiveOveruseRule),
                Box::new(rules::MissingSubjectRule),
                Box::new(rules::ConjunctionRepetitionRule),
                Box::new(rules::AdversativeGaRule),
                // Dictionary family
                Box::new(rules::TermNotationRule),
                Box::new(rules::KanjiOpeningRule),
                Box::new(rules::OkuriganaRule),
                Box::new(rules::HomophoneRule),
                Box::new(rules::HonorificErrorRule),
                Box::new(rules::RedundantExpressionRule),
                Box::new(rules::WeakExpressionRule),
                Box::new(rules::CustomNotationRule),
                Box::new(rules::WebTermsRule),
                Box::new(rules::GenerativeAiTermsRule),
                Box::new(rules::AwsTermsRule),
                Box::new(rules::AzureTermsRule),
                Box::new(rules::GcpTermsRule),
            ],
        }
    }

    /// Builds a registry from an explicit rule list, preserving order.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Iterates rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(Box::as_ref)
    }

    /// Rules in registration order, as a slice.
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_standard_registry_size() {
        let registry = RuleRegistry::standard();
        assert_eq!(registry.len(), 37);
    }

    #[test]
    fn test_rule_names_unique() {
        let registry = RuleRegistry::standard();
        let names: HashSet<&str> = registry.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn test_registration_order_stable() {
        let first: Vec<&str> = RuleRegistry::standard().iter().map(|r| r.name()).collect();
        let second: Vec<&str> = RuleRegistry::standard().iter().map(|r| r.name()).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "ra-nuki");
    }
}
