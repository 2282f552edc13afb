//! End-to-end tests of the analysis pipeline: tokens in, aggregated
//! diagnostics out.

use kousei_core::{
    AdvancedDiagnostic, AdvancedRulesConfig, AnalysisSession, DocumentAnalysis, ErrorKind, Rule,
    RuleContext, RuleRegistry, rules,
};
use kousei_text::{Span, Token};
use pretty_assertions::assert_eq;

fn seq(parts: &[(&str, &str)]) -> (String, Vec<Token>) {
    let mut text = String::new();
    let mut tokens = Vec::new();
    for (surface, pos) in parts {
        let start = text.len() as u32;
        text.push_str(surface);
        tokens.push(Token::new(*surface, *pos, Span::new(start, text.len() as u32)));
    }
    (text, tokens)
}

fn analyze(text: &str, tokens: Vec<Token>) -> DocumentAnalysis {
    AnalysisSession::new(AdvancedRulesConfig::default())
        .analyze("file:///doc.md", 1, text, tokens)
        .unwrap()
}

fn of_kind<'a>(
    diagnostics: &'a [AdvancedDiagnostic],
    kind: ErrorKind,
) -> Vec<&'a AdvancedDiagnostic> {
    diagnostics.iter().filter(|d| d.kind == kind).collect()
}

fn comma_text(commas: usize) -> (String, Vec<Token>) {
    let mut parts: Vec<(&str, &str)> = Vec::new();
    for _ in 0..commas {
        parts.push(("犬", "名詞"));
        parts.push(("、", "記号"));
    }
    parts.push(("猫", "名詞"));
    parts.push(("。", "記号"));
    seq(&parts)
}

#[test]
fn ra_nuki_reports_suggestion() {
    let (text, mut tokens) = seq(&[("食べれる", "動詞"), ("。", "記号")]);
    tokens[0] = tokens[0].clone().with_conjugation("一段", "基本形");

    let analysis = analyze(&text, tokens);
    let hits = of_kind(&analysis.diagnostics, ErrorKind::RaNuki);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].suggestions, vec!["食べられる".to_string()]);
    assert_eq!(hits[0].span, Span::new(0, 12));
}

#[test]
fn long_sentence_message_carries_both_lengths() {
    let body = "あ".repeat(129);
    let text = format!("{body}。");
    let tokens = vec![
        Token::new(body.clone(), "名詞", Span::new(0, body.len() as u32)),
        Token::new("。", "記号", Span::new(body.len() as u32, text.len() as u32)),
    ];

    let analysis = analyze(&text, tokens);
    let hits = of_kind(&analysis.diagnostics, ErrorKind::LongSentence);
    assert_eq!(hits.len(), 1);
    assert!(hits[0].message.contains("130"));
    assert!(hits[0].message.contains("120"));
}

#[test]
fn comma_count_strictly_exceeds_threshold() {
    let (text, tokens) = comma_text(5);
    let analysis = analyze(&text, tokens);
    assert_eq!(of_kind(&analysis.diagnostics, ErrorKind::CommaCount).len(), 1);

    let (text, tokens) = comma_text(4);
    let analysis = analyze(&text, tokens);
    assert!(of_kind(&analysis.diagnostics, ErrorKind::CommaCount).is_empty());
}

#[test]
fn monotonous_run_collapses_to_one_diagnostic() {
    let mut parts = Vec::new();
    for _ in 0..3 {
        parts.push(("静か", "名詞"));
        parts.push(("だ", "助動詞"));
        parts.push(("。", "記号"));
    }
    let (text, mut tokens) = seq(&parts);
    for i in [1, 4, 7] {
        tokens[i] = tokens[i].clone().with_base_form("だ");
    }

    let analysis = analyze(&text, tokens);
    let hits = of_kind(&analysis.diagnostics, ErrorKind::MonotonousEnding);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].span, Span::new(0, text.len() as u32));
}

#[test]
fn dominant_style_tie_breaks_by_first_appearance() {
    // Full-width Ａ appears before half-width a; on a 1:1 tie the earlier
    // rendering is dominant and only the later one is flagged.
    let (text, tokens) = seq(&[
        ("Ａ", "名詞"),
        ("と", "助詞"),
        ("a", "名詞"),
        ("。", "記号"),
    ]);

    let analysis = analyze(&text, tokens);
    let hits = of_kind(&analysis.diagnostics, ErrorKind::AlphabetWidth);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].suggestions, vec!["ａ".to_string()]);
}

#[test]
fn identical_runs_serialize_identically() {
    let build = || {
        let (text, tokens) = seq(&[
            ("Githubとgithub", "名詞"),
            ("の", "助詞"),
            ("サーバ", "名詞"),
            ("。", "記号"),
        ]);
        analyze(&text, tokens)
    };

    let first = serde_json::to_string(&build().diagnostics).unwrap();
    let second = serde_json::to_string(&build().diagnostics).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_and_sequential_agree() {
    let (text, tokens) = comma_text(6);

    let sequential = AnalysisSession::new(AdvancedRulesConfig::default())
        .analyze("file:///doc.md", 1, &text, tokens.clone())
        .unwrap();
    let parallel = AnalysisSession::new(AdvancedRulesConfig::default())
        .with_parallelism(true)
        .analyze("file:///doc.md", 1, &text, tokens)
        .unwrap();

    assert_eq!(sequential.diagnostics, parallel.diagnostics);
}

struct PanickingRule;

impl Rule for PanickingRule {
    fn name(&self) -> &'static str {
        "panicking"
    }

    fn description(&self) -> &'static str {
        "always fails"
    }

    fn is_enabled(&self, _config: &AdvancedRulesConfig) -> bool {
        true
    }

    fn check(&self, _tokens: &[Token], _ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        panic!("rule exploded");
    }
}

#[test]
fn one_failing_rule_does_not_poison_the_run() {
    let registry = RuleRegistry::with_rules(vec![
        Box::new(PanickingRule),
        Box::new(rules::CommaCountRule),
    ]);
    let session = AnalysisSession::new(AdvancedRulesConfig::default()).with_registry(registry);

    let (text, tokens) = comma_text(5);
    let analysis = session
        .analyze("file:///doc.md", 1, &text, tokens)
        .unwrap();

    assert_eq!(of_kind(&analysis.diagnostics, ErrorKind::CommaCount).len(), 1);
    let failed: Vec<_> = analysis.rule_results.iter().filter(|r| !r.success).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].rule_name, "panicking");
    assert_eq!(failed[0].error.as_deref(), Some("rule exploded"));
}

#[test]
fn disabled_rule_reports_nothing() {
    let config = AdvancedRulesConfig::from_json(r#"{ "rules": { "commaCount": false } }"#).unwrap();
    let session = AnalysisSession::new(config);

    let (text, tokens) = comma_text(6);
    let analysis = session
        .analyze("file:///doc.md", 1, &text, tokens)
        .unwrap();

    assert!(of_kind(&analysis.diagnostics, ErrorKind::CommaCount).is_empty());
    assert!(
        analysis
            .rule_results
            .iter()
            .all(|r| r.rule_name != "comma-count")
    );
}

#[test]
fn analysis_is_tagged_with_its_version() {
    let (text, tokens) = seq(&[("世界", "名詞"), ("。", "記号")]);
    let session = AnalysisSession::new(AdvancedRulesConfig::default());

    let analysis = session.analyze("file:///doc.md", 5, &text, tokens).unwrap();
    assert_eq!(analysis.version, 5);
    assert!(analysis.is_stale(6));
    assert!(!analysis.is_stale(5));
}

#[test]
fn empty_document_yields_empty_diagnostics() {
    let analysis = analyze("", Vec::new());
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn plain_schema_round_trips_through_json() {
    let (text, tokens) = comma_text(5);
    let analysis = analyze(&text, tokens);
    let plain = analysis.to_plain_diagnostics();

    let json = serde_json::to_string(&plain).unwrap();
    let parsed: Vec<kousei_core::Diagnostic> = serde_json::from_str(&json).unwrap();
    assert_eq!(plain, parsed);
    assert_eq!(parsed[0].source, "kousei");
    assert_eq!(parsed[0].code, "comma-count");
}
