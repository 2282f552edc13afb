//! Rule engine configuration.
//!
//! A configuration snapshot is loaded once and replaced wholesale when the
//! external configuration provider reports a change; a run always reads one
//! immutable snapshot. Absent fields merge against defaults at load time via
//! `#[serde(default)]`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Severity-affecting detection level for weak-expression checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionLevel {
    /// Report weak expressions as warnings.
    Strict,
    /// Report weak expressions as information.
    #[default]
    Standard,
    /// Report weak expressions as hints.
    Loose,
}

fn default_true() -> bool {
    true
}

/// Per-rule enable flags. Every rule reads exactly its own named boolean.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleToggles {
    #[serde(default = "default_true")]
    pub ra_nuki: bool,
    #[serde(default = "default_true")]
    pub double_negation: bool,
    #[serde(default = "default_true")]
    pub doubled_particle: bool,
    #[serde(default = "default_true")]
    pub no_particle_chain: bool,
    #[serde(default = "default_true")]
    pub noun_chain: bool,
    #[serde(default = "default_true")]
    pub sahen_verb: bool,
    #[serde(default = "default_true")]
    pub style_consistency: bool,
    #[serde(default = "default_true")]
    pub alphabet_width: bool,
    #[serde(default = "default_true")]
    pub number_width: bool,
    #[serde(default = "default_true")]
    pub kana_width: bool,
    #[serde(default = "default_true")]
    pub numeral_style: bool,
    #[serde(default = "default_true")]
    pub dash_tilde: bool,
    #[serde(default = "default_true")]
    pub nakaguro: bool,
    #[serde(default = "default_true")]
    pub bracket_style: bool,
    #[serde(default = "default_true")]
    pub kuten_style: bool,
    #[serde(default = "default_true")]
    pub katakana_long_vowel: bool,
    #[serde(default = "default_true")]
    pub date_format: bool,
    #[serde(default = "default_true")]
    pub comma_count: bool,
    #[serde(default = "default_true")]
    pub long_sentence: bool,
    #[serde(default = "default_true")]
    pub monotonous_ending: bool,
    #[serde(default = "default_true")]
    pub passive_overuse: bool,
    #[serde(default = "default_true")]
    pub missing_subject: bool,
    #[serde(default = "default_true")]
    pub conjunction_repetition: bool,
    #[serde(default = "default_true")]
    pub adversative_ga: bool,
    #[serde(default = "default_true")]
    pub term_notation: bool,
    #[serde(default = "default_true")]
    pub kanji_opening: bool,
    #[serde(default = "default_true")]
    pub okurigana: bool,
    #[serde(default = "default_true")]
    pub homophone: bool,
    #[serde(default = "default_true")]
    pub honorific_error: bool,
    #[serde(default = "default_true")]
    pub redundant_expression: bool,
    #[serde(default = "default_true")]
    pub weak_expression: bool,
    #[serde(default = "default_true")]
    pub custom_notation: bool,
    #[serde(default = "default_true")]
    pub web_terms: bool,
    #[serde(default = "default_true")]
    pub generative_ai_terms: bool,
    #[serde(default = "default_true")]
    pub aws_terms: bool,
    #[serde(default = "default_true")]
    pub azure_terms: bool,
    #[serde(default = "default_true")]
    pub gcp_terms: bool,
}

impl Default for RuleToggles {
    fn default() -> Self {
        // Every rule is on unless the host turns it off.
        Self {
            ra_nuki: true,
            double_negation: true,
            doubled_particle: true,
            no_particle_chain: true,
            noun_chain: true,
            sahen_verb: true,
            style_consistency: true,
            alphabet_width: true,
            number_width: true,
            kana_width: true,
            numeral_style: true,
            dash_tilde: true,
            nakaguro: true,
            bracket_style: true,
            kuten_style: true,
            katakana_long_vowel: true,
            date_format: true,
            comma_count: true,
            long_sentence: true,
            monotonous_ending: true,
            passive_overuse: true,
            missing_subject: true,
            conjunction_repetition: true,
            adversative_ga: true,
            term_notation: true,
            kanji_opening: true,
            okurigana: true,
            homophone: true,
            honorific_error: true,
            redundant_expression: true,
            weak_expression: true,
            custom_notation: true,
            web_terms: true,
            generative_ai_terms: true,
            aws_terms: true,
            azure_terms: true,
            gcp_terms: true,
        }
    }
}

fn default_max_comma_count() -> usize {
    4
}

fn default_max_sentence_length() -> usize {
    120
}

fn default_no_particle_chain_threshold() -> usize {
    3
}

fn default_monotonous_ending_threshold() -> usize {
    3
}

fn default_noun_chain_threshold() -> usize {
    5
}

fn default_passive_count_threshold() -> usize {
    3
}

fn default_conjunction_repetition_threshold() -> usize {
    2
}

/// Configuration snapshot for the rule engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedRulesConfig {
    /// Per-rule enable flags.
    pub rules: RuleToggles,

    /// Maximum commas per sentence; a sentence with more is flagged.
    #[serde(default = "default_max_comma_count")]
    pub max_comma_count: usize,

    /// Maximum sentence length in characters; a longer sentence is flagged.
    #[serde(default = "default_max_sentence_length")]
    pub max_sentence_length: usize,

    /// Minimum run of genitive 「の」 particles that is flagged.
    #[serde(default = "default_no_particle_chain_threshold")]
    pub no_particle_chain_threshold: usize,

    /// Minimum run of consecutive sentences with identical endings.
    #[serde(default = "default_monotonous_ending_threshold")]
    pub monotonous_ending_threshold: usize,

    /// Minimum run of consecutive noun tokens that is flagged.
    #[serde(default = "default_noun_chain_threshold")]
    pub noun_chain_threshold: usize,

    /// Passive markers allowed inside the passive-overuse window.
    #[serde(default = "default_passive_count_threshold")]
    pub passive_count_threshold: usize,

    /// Minimum run of sentences opening with the same conjunction.
    #[serde(default = "default_conjunction_repetition_threshold")]
    pub conjunction_repetition_threshold: usize,

    /// Severity-affecting level for weak-expression checks.
    pub weak_expression_level: DetectionLevel,

    /// Custom notation corrections: surface form -> canonical form.
    pub custom_notations: HashMap<String, String>,

    /// Language ids the engine should not analyze.
    pub disabled_languages: Vec<String>,
}

impl Default for AdvancedRulesConfig {
    fn default() -> Self {
        Self {
            rules: RuleToggles::default(),
            max_comma_count: default_max_comma_count(),
            max_sentence_length: default_max_sentence_length(),
            no_particle_chain_threshold: default_no_particle_chain_threshold(),
            monotonous_ending_threshold: default_monotonous_ending_threshold(),
            noun_chain_threshold: default_noun_chain_threshold(),
            passive_count_threshold: default_passive_count_threshold(),
            conjunction_repetition_threshold: default_conjunction_repetition_threshold(),
            weak_expression_level: DetectionLevel::default(),
            custom_notations: HashMap::new(),
            disabled_languages: Vec::new(),
        }
    }
}

impl AdvancedRulesConfig {
    /// Parses a configuration snapshot from JSON, merging absent fields
    /// against the defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json)
            .map_err(|e| EngineError::config(format!("Invalid config: {}", e)))
    }

    /// Returns true when documents of the given language id should be
    /// analyzed.
    pub fn is_language_enabled(&self, language_id: &str) -> bool {
        !self.disabled_languages.iter().any(|l| l == language_id)
    }
}
