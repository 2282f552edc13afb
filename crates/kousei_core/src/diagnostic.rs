//! Diagnostic types produced by the rule engine.

use serde::{Deserialize, Serialize};

use kousei_text::Span;

/// Source tag attached to every diagnostic this engine emits.
pub const SOURCE_TAG: &str = "kousei";

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    Error,
    /// Warning - should be reviewed.
    #[default]
    Warning,
    /// Informational message.
    Information,
    /// Hint - unobtrusive suggestion.
    Hint,
}

impl Severity {
    /// Numeric form (0-3) used by the external diagnostic schema.
    pub fn as_number(&self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Information => 2,
            Severity::Hint => 3,
        }
    }
}

/// The closed set of detection kinds.
///
/// `code()` is the stable string form carried into the external schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    RaNuki,
    DoubleNegation,
    DoubledParticle,
    NoParticleChain,
    NounChain,
    SahenVerb,
    StyleConsistency,
    AlphabetWidth,
    NumberWidth,
    KanaWidth,
    NumeralStyle,
    DashTilde,
    Nakaguro,
    BracketStyle,
    KutenStyle,
    KatakanaLongVowel,
    DateFormat,
    CommaCount,
    LongSentence,
    MonotonousEnding,
    PassiveOveruse,
    MissingSubject,
    ConjunctionRepetition,
    AdversativeGa,
    TermNotation,
    KanjiOpening,
    Okurigana,
    Homophone,
    HonorificError,
    RedundantExpression,
    WeakExpression,
    CustomNotation,
    WebTerms,
    GenerativeAiTerms,
    AwsTerms,
    AzureTerms,
    GcpTerms,
}

impl ErrorKind {
    /// Stable kebab-case code string.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::RaNuki => "ra-nuki",
            ErrorKind::DoubleNegation => "double-negation",
            ErrorKind::DoubledParticle => "doubled-particle",
            ErrorKind::NoParticleChain => "no-particle-chain",
            ErrorKind::NounChain => "noun-chain",
            ErrorKind::SahenVerb => "sahen-verb",
            ErrorKind::StyleConsistency => "style-consistency",
            ErrorKind::AlphabetWidth => "alphabet-width",
            ErrorKind::NumberWidth => "number-width",
            ErrorKind::KanaWidth => "kana-width",
            ErrorKind::NumeralStyle => "numeral-style",
            ErrorKind::DashTilde => "dash-tilde",
            ErrorKind::Nakaguro => "nakaguro",
            ErrorKind::BracketStyle => "bracket-style",
            ErrorKind::KutenStyle => "kuten-style",
            ErrorKind::KatakanaLongVowel => "katakana-long-vowel",
            ErrorKind::DateFormat => "date-format",
            ErrorKind::CommaCount => "comma-count",
            ErrorKind::LongSentence => "long-sentence",
            ErrorKind::MonotonousEnding => "monotonous-ending",
            ErrorKind::PassiveOveruse => "passive-overuse",
            ErrorKind::MissingSubject => "missing-subject",
            ErrorKind::ConjunctionRepetition => "conjunction-repetition",
            ErrorKind::AdversativeGa => "adversative-ga",
            ErrorKind::TermNotation => "term-notation",
            ErrorKind::KanjiOpening => "kanji-opening",
            ErrorKind::Okurigana => "okurigana",
            ErrorKind::Homophone => "homophone",
            ErrorKind::HonorificError => "honorific-error",
            ErrorKind::RedundantExpression => "redundant-expression",
            ErrorKind::WeakExpression => "weak-expression",
            ErrorKind::CustomNotation => "custom-notation",
            ErrorKind::WebTerms => "web-terms",
            ErrorKind::GenerativeAiTerms => "generative-ai-terms",
            ErrorKind::AwsTerms => "aws-terms",
            ErrorKind::AzureTerms => "azure-terms",
            ErrorKind::GcpTerms => "gcp-terms",
        }
    }
}

/// A diagnostic produced by exactly one rule invocation.
///
/// Immutable after creation; converted to the flat external [`Diagnostic`]
/// by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedDiagnostic {
    /// Byte span in the source.
    pub span: Span,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Closed-set detection kind.
    pub kind: ErrorKind,
    /// Source tag.
    pub source: String,
    /// Name of the rule that produced this diagnostic.
    pub rule_name: String,
    /// Suggested replacements, if a mechanical correction exists.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl AdvancedDiagnostic {
    /// Creates a new diagnostic with the default Warning severity.
    pub fn new(
        rule_name: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            span,
            severity: Severity::Warning,
            message: message.into(),
            kind,
            source: SOURCE_TAG.to_string(),
            rule_name: rule_name.into(),
            suggestions: Vec::new(),
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Adds a suggested replacement.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Converts to the flat external schema, dropping rule name and
    /// flattening suggestions away.
    pub fn to_plain(&self) -> Diagnostic {
        Diagnostic {
            span: self.span,
            severity: self.severity.as_number(),
            message: self.message.clone(),
            code: self.kind.code().to_string(),
            source: self.source.clone(),
        }
    }
}

/// The flat diagnostic schema exposed to collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Byte span in the source.
    pub span: Span,
    /// Numeric severity (0 = error .. 3 = hint).
    pub severity: u8,
    /// The diagnostic message.
    pub message: String,
    /// Closed-set code string.
    pub code: String,
    /// Source tag.
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_defaults() {
        let diag = AdvancedDiagnostic::new(
            "ra-nuki",
            ErrorKind::RaNuki,
            "ら抜き言葉です",
            Span::new(0, 12),
        );

        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.source, SOURCE_TAG);
        assert!(diag.suggestions.is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let diag = AdvancedDiagnostic::new(
            "long-sentence",
            ErrorKind::LongSentence,
            "文が長すぎます",
            Span::new(0, 10),
        )
        .with_severity(Severity::Information)
        .with_suggestion("分割してください");

        assert_eq!(diag.severity, Severity::Information);
        assert_eq!(diag.suggestions.len(), 1);
    }

    #[test]
    fn test_to_plain_maps_unchanged() {
        let diag = AdvancedDiagnostic::new(
            "comma-count",
            ErrorKind::CommaCount,
            "読点が多すぎます",
            Span::new(3, 9),
        )
        .with_severity(Severity::Error)
        .with_suggestion("dropped");

        let plain = diag.to_plain();
        assert_eq!(plain.span, Span::new(3, 9));
        assert_eq!(plain.severity, 0);
        assert_eq!(plain.code, "comma-count");
        assert_eq!(plain.source, SOURCE_TAG);
        assert_eq!(plain.message, "読点が多すぎます");
    }

    #[test]
    fn test_severity_numbers() {
        assert_eq!(Severity::Error.as_number(), 0);
        assert_eq!(Severity::Warning.as_number(), 1);
        assert_eq!(Severity::Information.as_number(), 2);
        assert_eq!(Severity::Hint.as_number(), 3);
    }

    #[test]
    fn test_kind_code_matches_serde() {
        let json = serde_json::to_string(&ErrorKind::KatakanaLongVowel).unwrap();
        assert_eq!(json, format!("\"{}\"", ErrorKind::KatakanaLongVowel.code()));
    }
}
