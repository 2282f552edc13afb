//! Dictionary-backed notation rules.

use kousei_text::{Span, Token};

use crate::{
    AdvancedDiagnostic, AdvancedRulesConfig, DetectionLevel, ErrorKind, Rule, RuleContext,
    Severity,
};

use super::support::{TextHit, scan_text_map, scan_token_map};

/// Maps dictionary hits to diagnostics carrying the canonical form as a
/// suggestion.
pub(super) fn correction_diagnostics(
    rule_name: &'static str,
    kind: ErrorKind,
    severity: Severity,
    message_prefix: &str,
    hits: Vec<TextHit>,
) -> Vec<AdvancedDiagnostic> {
    hits.into_iter()
        .map(|hit| {
            AdvancedDiagnostic::new(
                rule_name,
                kind,
                format!("{}: 「{}」→「{}」", message_prefix, hit.found, hit.canonical),
                hit.span,
            )
            .with_severity(severity)
            .with_suggestion(hit.canonical)
        })
        .collect()
}

/// Frequently miswritten katakana loanwords.
const TERM_NOTATIONS: &[(&str, &str)] = &[
    ("シュミレーション", "シミュレーション"),
    ("コミニュケーション", "コミュニケーション"),
    ("アボガド", "アボカド"),
    ("バトミントン", "バドミントン"),
    ("エンターテイメント", "エンターテインメント"),
    ("ナルシスト", "ナルシシスト"),
];

/// Detects frequently miswritten loanwords.
pub struct TermNotationRule;

impl Rule for TermNotationRule {
    fn name(&self) -> &'static str {
        "term-notation"
    }

    fn description(&self) -> &'static str {
        "誤りやすい用語の表記を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.term_notation
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        correction_diagnostics(
            self.name(),
            ErrorKind::TermNotation,
            Severity::Warning,
            "用語の表記誤りの可能性があります",
            scan_text_map(ctx.text, TERM_NOTATIONS),
        )
    }
}

/// Kanji that formal style guides recommend writing in kana, keyed by
/// dictionary form to avoid flagging unrelated homographs.
const KANJI_OPENINGS: &[(&str, &str)] = &[
    ("出来る", "できる"),
    ("更に", "さらに"),
    ("但し", "ただし"),
    ("従って", "したがって"),
    ("沢山", "たくさん"),
    ("殆ど", "ほとんど"),
    ("既に", "すでに"),
    ("暫く", "しばらく"),
    ("或いは", "あるいは"),
    ("尚", "なお"),
];

/// Recommends opening kanji that style guides write in kana.
pub struct KanjiOpeningRule;

impl Rule for KanjiOpeningRule {
    fn name(&self) -> &'static str {
        "kanji-opening"
    }

    fn description(&self) -> &'static str {
        "ひらがなで書くことが推奨される漢字を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.kanji_opening
    }

    fn check(&self, tokens: &[Token], _ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        correction_diagnostics(
            self.name(),
            ErrorKind::KanjiOpening,
            Severity::Information,
            "漢字を開くことが推奨されています",
            scan_token_map(tokens, KANJI_OPENINGS),
        )
    }
}

/// Non-standard okurigana spellings per the official okurigana rules.
const OKURIGANA_ERRORS: &[(&str, &str)] = &[
    ("行なう", "行う"),
    ("行なっ", "行っ"),
    ("表わす", "表す"),
    ("現われる", "現れる"),
    ("現われ", "現れ"),
    ("断わる", "断る"),
    ("短かい", "短い"),
    ("少くとも", "少なくとも"),
];

/// Detects non-standard okurigana.
pub struct OkuriganaRule;

impl Rule for OkuriganaRule {
    fn name(&self) -> &'static str {
        "okurigana"
    }

    fn description(&self) -> &'static str {
        "送り仮名の誤りを検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.okurigana
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        correction_diagnostics(
            self.name(),
            ErrorKind::Okurigana,
            Severity::Warning,
            "送り仮名が標準的ではありません",
            scan_text_map(ctx.text, OKURIGANA_ERRORS),
        )
    }
}

/// Nouns with easily-confused homophones, checked against the external term
/// lookup.
const HOMOPHONE_WATCHLIST: &[&str] = &[
    "保証", "保障", "補償", "意志", "意思", "体制", "態勢", "体勢", "規定", "規程", "改定",
    "改訂", "追求", "追及", "追究",
];

/// Surfaces homophone candidates with their definitions from the external
/// term lookup.
///
/// A lookup failure drops this rule's findings for the run; it never aborts
/// the pipeline.
pub struct HomophoneRule;

impl Rule for HomophoneRule {
    fn name(&self) -> &'static str {
        "homophone"
    }

    fn description(&self) -> &'static str {
        "同音異義語の取り違えの可能性を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.homophone
    }

    fn check(&self, tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let mut diagnostics = Vec::new();
        for token in tokens {
            if !token.is_noun() || !HOMOPHONE_WATCHLIST.contains(&token.surface.as_str()) {
                continue;
            }
            match ctx.lookup.lookup(&token.surface) {
                Ok(Some(entry)) => {
                    let mut message =
                        format!("同音異義語に注意してください: 「{}」", token.surface);
                    if let Some(description) = &entry.description {
                        message.push_str(&format!("({description})"));
                    }
                    let mut diagnostic = AdvancedDiagnostic::new(
                        self.name(),
                        ErrorKind::Homophone,
                        message,
                        token.span,
                    )
                    .with_severity(Severity::Information);
                    if entry.canonical != token.surface {
                        diagnostic = diagnostic.with_suggestion(entry.canonical);
                    }
                    diagnostics.push(diagnostic);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(term = %token.surface, error = %e, "term lookup degraded");
                    return Vec::new();
                }
            }
        }
        diagnostics
    }
}

/// Double-honorific and over-humble patterns.
const HONORIFIC_ERRORS: &[(&str, &str)] = &[
    ("おっしゃられる", "おっしゃる"),
    ("おっしゃられ", "おっしゃり"),
    ("ご覧になられる", "ご覧になる"),
    ("ご覧になられ", "ご覧になり"),
    ("お越しになられる", "お越しになる"),
    ("拝見させていただき", "拝見し"),
    ("お伺いさせていただき", "伺い"),
];

/// Detects double honorifics.
pub struct HonorificErrorRule;

impl Rule for HonorificErrorRule {
    fn name(&self) -> &'static str {
        "honorific-error"
    }

    fn description(&self) -> &'static str {
        "二重敬語を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.honorific_error
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        correction_diagnostics(
            self.name(),
            ErrorKind::HonorificError,
            Severity::Warning,
            "二重敬語の可能性があります",
            scan_text_map(ctx.text, HONORIFIC_ERRORS),
        )
    }
}

/// Redundant phrasings and their tightened forms.
const REDUNDANT_EXPRESSIONS: &[(&str, &str)] = &[
    ("まず最初に", "最初に"),
    ("一番最初", "最初"),
    ("一番最後", "最後"),
    ("後で後悔", "後悔"),
    ("違和感を感じ", "違和感を覚え"),
    ("することができます", "できます"),
    ("することができる", "できる"),
];

/// Detects redundant expressions.
pub struct RedundantExpressionRule;

impl Rule for RedundantExpressionRule {
    fn name(&self) -> &'static str {
        "redundant-expression"
    }

    fn description(&self) -> &'static str {
        "冗長な表現を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.redundant_expression
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        correction_diagnostics(
            self.name(),
            ErrorKind::RedundantExpression,
            Severity::Information,
            "冗長な表現です",
            scan_text_map(ctx.text, REDUNDANT_EXPRESSIONS),
        )
    }
}

/// Hedging phrases that weaken assertions.
const WEAK_EXPRESSIONS: &[&str] = &[
    "かもしれません",
    "かもしれない",
    "と思います",
    "と思われます",
    "ような気がします",
    "ではないでしょうか",
];

/// Detects hedging expressions; severity follows the configured detection
/// level.
pub struct WeakExpressionRule;

impl Rule for WeakExpressionRule {
    fn name(&self) -> &'static str {
        "weak-expression"
    }

    fn description(&self) -> &'static str {
        "断定を避けた弱い表現を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.weak_expression
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let severity = match ctx.config.weak_expression_level {
            DetectionLevel::Strict => Severity::Warning,
            DetectionLevel::Standard => Severity::Information,
            DetectionLevel::Loose => Severity::Hint,
        };

        let mut hits: Vec<(Span, &str)> = Vec::new();
        for phrase in WEAK_EXPRESSIONS {
            for (start, found) in ctx.text.match_indices(phrase) {
                hits.push((Span::new(start as u32, (start + found.len()) as u32), phrase));
            }
        }
        hits.sort_by_key(|(span, _)| (span.start, span.end));

        hits.into_iter()
            .map(|(span, phrase)| {
                AdvancedDiagnostic::new(
                    self.name(),
                    ErrorKind::WeakExpression,
                    format!("断定を避けた弱い表現です: 「{phrase}」"),
                    span,
                )
                .with_severity(severity)
            })
            .collect()
    }
}

/// Applies the host-supplied notation dictionary from the configuration.
pub struct CustomNotationRule;

impl Rule for CustomNotationRule {
    fn name(&self) -> &'static str {
        "custom-notation"
    }

    fn description(&self) -> &'static str {
        "プロジェクト固有の表記辞書を適用します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.custom_notation
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        // Sorted for run-to-run determinism; the map has no inherent order.
        let mut entries: Vec<(&str, &str)> = ctx
            .config
            .custom_notations
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();

        correction_diagnostics(
            self.name(),
            ErrorKind::CustomNotation,
            Severity::Warning,
            "プロジェクト辞書と異なる表記です",
            scan_text_map(ctx.text, &entries),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LookupError, NoopTermLookup, TermEntry, TermLookup};
    use kousei_text::SentenceSegmenter;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run_with(
        rule: &dyn Rule,
        text: &str,
        tokens: &[Token],
        config: &AdvancedRulesConfig,
        lookup: &dyn TermLookup,
    ) -> Vec<AdvancedDiagnostic> {
        let sentences = SentenceSegmenter::segment(tokens, text);
        let ctx = RuleContext {
            text,
            tokens,
            sentences: &sentences,
            config,
            lookup,
        };
        rule.check(tokens, &ctx)
    }

    fn run(rule: &dyn Rule, text: &str, tokens: &[Token]) -> Vec<AdvancedDiagnostic> {
        run_with(
            rule,
            text,
            tokens,
            &AdvancedRulesConfig::default(),
            &NoopTermLookup,
        )
    }

    #[test]
    fn test_term_notation() {
        let text = "シュミレーションを実行する。";
        let diagnostics = run(&TermNotationRule, text, &[]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].suggestions, vec!["シミュレーション".to_string()]);
    }

    #[test]
    fn test_kanji_opening_matches_base_form() {
        let tokens = vec![
            Token::new("出来", "動詞", Span::new(0, 6)).with_base_form("出来る"),
            Token::new("ます", "助動詞", Span::new(6, 12)),
        ];

        let diagnostics = run(&KanjiOpeningRule, "出来ます", &tokens);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Information);
        assert_eq!(diagnostics[0].suggestions, vec!["できる".to_string()]);
    }

    #[test]
    fn test_okurigana() {
        let text = "調査を行なう。";
        let diagnostics = run(&OkuriganaRule, text, &[]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].suggestions, vec!["行う".to_string()]);
    }

    struct FixedLookup;

    impl TermLookup for FixedLookup {
        fn lookup(&self, term: &str) -> Result<Option<TermEntry>, LookupError> {
            if term == "保証" {
                Ok(Some(TermEntry {
                    canonical: "保証".to_string(),
                    description: Some("責任をもって請け合うこと".to_string()),
                }))
            } else {
                Ok(None)
            }
        }
    }

    struct FailingLookup;

    impl TermLookup for FailingLookup {
        fn lookup(&self, _term: &str) -> Result<Option<TermEntry>, LookupError> {
            Err(LookupError::Timeout)
        }
    }

    #[test]
    fn test_homophone_with_lookup() {
        let tokens = vec![Token::new("保証", "名詞", Span::new(0, 6))];
        let config = AdvancedRulesConfig::default();

        let diagnostics = run_with(&HomophoneRule, "保証", &tokens, &config, &FixedLookup);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("請け合う"));
        // Same canonical form, so no replacement suggestion.
        assert!(diagnostics[0].suggestions.is_empty());
    }

    #[test]
    fn test_homophone_lookup_failure_yields_nothing() {
        let tokens = vec![Token::new("保証", "名詞", Span::new(0, 6))];
        let config = AdvancedRulesConfig::default();

        let diagnostics = run_with(&HomophoneRule, "保証", &tokens, &config, &FailingLookup);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_honorific_error() {
        let text = "先生がおっしゃられるとおりです。";
        let diagnostics = run(&HonorificErrorRule, text, &[]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].suggestions, vec!["おっしゃる".to_string()]);
    }

    #[test]
    fn test_redundant_expression() {
        let text = "まず最初に設定することができます。";
        let diagnostics = run(&RedundantExpressionRule, text, &[]);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].suggestions, vec!["最初に".to_string()]);
        assert_eq!(diagnostics[1].suggestions, vec!["できます".to_string()]);
    }

    #[rstest]
    #[case(DetectionLevel::Strict, Severity::Warning)]
    #[case(DetectionLevel::Standard, Severity::Information)]
    #[case(DetectionLevel::Loose, Severity::Hint)]
    fn test_weak_expression_level(#[case] level: DetectionLevel, #[case] expected: Severity) {
        let mut config = AdvancedRulesConfig::default();
        config.weak_expression_level = level;

        let text = "動くかもしれません。";
        let diagnostics = run_with(&WeakExpressionRule, text, &[], &config, &NoopTermLookup);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, expected);
    }

    #[test]
    fn test_custom_notation() {
        let mut config = AdvancedRulesConfig::default();
        config
            .custom_notations
            .insert("サーバ".to_string(), "サーバー".to_string());

        let text = "サーバを再起動する。";
        let diagnostics = run_with(&CustomNotationRule, text, &[], &config, &NoopTermLookup);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].suggestions, vec!["サーバー".to_string()]);
    }

    #[test]
    fn test_custom_notation_canonical_text_ok() {
        // The key prefixes its canonical form; text already using サーバー
        // must stay silent.
        let mut config = AdvancedRulesConfig::default();
        config
            .custom_notations
            .insert("サーバ".to_string(), "サーバー".to_string());

        let text = "サーバーを再起動する。";
        let diagnostics = run_with(&CustomNotationRule, text, &[], &config, &NoopTermLookup);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_custom_notation_empty_config() {
        let diagnostics = run(&CustomNotationRule, "サーバを再起動する。", &[]);
        assert!(diagnostics.is_empty());
    }
}
