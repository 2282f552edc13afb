//! Readability rules over sentence-level aggregates.

use kousei_text::{Sentence, Span, Token};

use crate::{AdvancedDiagnostic, AdvancedRulesConfig, ErrorKind, Rule, RuleContext, Severity};

use super::support::qualifying_runs;

/// Flags sentences whose comma count exceeds the configured maximum.
pub struct CommaCountRule;

impl Rule for CommaCountRule {
    fn name(&self) -> &'static str {
        "comma-count"
    }

    fn description(&self) -> &'static str {
        "1文あたりの読点数を検査します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.comma_count
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let max = ctx.config.max_comma_count;
        ctx.sentences
            .iter()
            .filter(|s| s.comma_count > max)
            .map(|s| {
                AdvancedDiagnostic::new(
                    self.name(),
                    ErrorKind::CommaCount,
                    format!(
                        "読点が{}個あります(上限{}個)。文の分割を検討してください",
                        s.comma_count, max
                    ),
                    s.span,
                )
            })
            .collect()
    }
}

/// Flags sentences longer than the configured character limit.
pub struct LongSentenceRule;

impl Rule for LongSentenceRule {
    fn name(&self) -> &'static str {
        "long-sentence"
    }

    fn description(&self) -> &'static str {
        "長すぎる文を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.long_sentence
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let max = ctx.config.max_sentence_length;
        ctx.sentences
            .iter()
            .filter(|s| s.char_count() > max)
            .map(|s| {
                AdvancedDiagnostic::new(
                    self.name(),
                    ErrorKind::LongSentence,
                    format!(
                        "文が{}文字あります。{}文字以内に収めることを検討してください",
                        s.char_count(),
                        max
                    ),
                    s.span,
                )
            })
            .collect()
    }
}

/// The final content token of a sentence, used as its ending key.
fn ending_key(sentence: &Sentence) -> Option<String> {
    sentence
        .tokens
        .iter()
        .rev()
        .find(|t| !t.is_symbol())
        .map(|t| t.surface.clone())
}

/// Merges the spans of a consecutive sentence run.
fn run_span(sentences: &[Sentence], run: std::ops::Range<usize>) -> Span {
    Span::new(
        sentences[run.start].span.start,
        sentences[run.end - 1].span.end,
    )
}

/// Flags runs of consecutive sentences ending in the same expression.
pub struct MonotonousEndingRule;

impl Rule for MonotonousEndingRule {
    fn name(&self) -> &'static str {
        "monotonous-ending"
    }

    fn description(&self) -> &'static str {
        "単調な文末の繰り返しを検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.monotonous_ending
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let keys: Vec<Option<String>> = ctx.sentences.iter().map(ending_key).collect();

        qualifying_runs(&keys, ctx.config.monotonous_ending_threshold)
            .into_iter()
            .map(|run| {
                let key = keys[run.start].clone().unwrap_or_default();
                let length = run.len();
                AdvancedDiagnostic::new(
                    self.name(),
                    ErrorKind::MonotonousEnding,
                    format!("同じ文末表現「{key}」が{length}回続いています"),
                    run_span(ctx.sentences, run),
                )
            })
            .collect()
    }
}

fn is_passive_marker(token: &Token) -> bool {
    token.is_auxiliary() && (token.base_form == "れる" || token.base_form == "られる")
}

/// Flags sentences using more passive markers than the configured budget.
pub struct PassiveOveruseRule;

impl Rule for PassiveOveruseRule {
    fn name(&self) -> &'static str {
        "passive-overuse"
    }

    fn description(&self) -> &'static str {
        "受け身表現の多用を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.passive_overuse
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let max = ctx.config.passive_count_threshold;
        ctx.sentences
            .iter()
            .filter_map(|s| {
                let count = s.tokens.iter().filter(|t| is_passive_marker(t)).count();
                (count > max).then(|| {
                    AdvancedDiagnostic::new(
                        self.name(),
                        ErrorKind::PassiveOveruse,
                        format!("受け身表現が{count}回使われています(目安{max}回以下)"),
                        s.span,
                    )
                })
            })
            .collect()
    }
}

/// Characters a long sentence needs before an absent subject is worth
/// flagging; shorter sentences omit subjects naturally.
const MISSING_SUBJECT_MIN_CHARS: usize = 50;

/// Flags long verb-bearing sentences with no subject marker (は/が).
pub struct MissingSubjectRule;

impl Rule for MissingSubjectRule {
    fn name(&self) -> &'static str {
        "missing-subject"
    }

    fn description(&self) -> &'static str {
        "主語が不明瞭な文を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.missing_subject
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        ctx.sentences
            .iter()
            .filter(|s| {
                s.char_count() >= MISSING_SUBJECT_MIN_CHARS
                    && s.tokens.iter().any(Token::is_verb)
                    && !s.tokens.iter().any(|t| {
                        t.is_particle() && (t.surface == "は" || t.surface == "が")
                    })
            })
            .map(|s| {
                AdvancedDiagnostic::new(
                    self.name(),
                    ErrorKind::MissingSubject,
                    "主語が不明瞭な可能性があります",
                    s.span,
                )
                .with_severity(Severity::Information)
            })
            .collect()
    }
}

/// The leading conjunction of a sentence, if it opens with one.
fn opening_conjunction(sentence: &Sentence) -> Option<String> {
    sentence
        .tokens
        .iter()
        .find(|t| !t.is_symbol())
        .filter(|t| t.is_conjunction())
        .map(|t| t.surface.clone())
}

/// Flags runs of consecutive sentences opening with the same conjunction.
pub struct ConjunctionRepetitionRule;

impl Rule for ConjunctionRepetitionRule {
    fn name(&self) -> &'static str {
        "conjunction-repetition"
    }

    fn description(&self) -> &'static str {
        "同じ接続詞で始まる文の連続を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.conjunction_repetition
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let keys: Vec<Option<String>> = ctx.sentences.iter().map(opening_conjunction).collect();

        qualifying_runs(&keys, ctx.config.conjunction_repetition_threshold)
            .into_iter()
            .map(|run| {
                let key = keys[run.start].clone().unwrap_or_default();
                let length = run.len();
                AdvancedDiagnostic::new(
                    self.name(),
                    ErrorKind::ConjunctionRepetition,
                    format!("接続詞「{key}」で始まる文が{length}回続いています"),
                    run_span(ctx.sentences, run),
                )
            })
            .collect()
    }
}

/// Marks sentences that join clauses with the connective particle が.
fn has_adversative_ga(sentence: &Sentence) -> Option<()> {
    sentence
        .tokens
        .iter()
        .any(|t| t.is_particle() && t.surface == "が" && t.pos_detail(0) == Some("接続助詞"))
        .then_some(())
}

/// Consecutive が-joined sentences needed before the run is flagged.
const ADVERSATIVE_GA_RUN: usize = 2;

/// Flags runs of consecutive sentences joined by the connective particle が.
pub struct AdversativeGaRule;

impl Rule for AdversativeGaRule {
    fn name(&self) -> &'static str {
        "adversative-ga"
    }

    fn description(&self) -> &'static str {
        "接続助詞「が」による文の連結を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.adversative_ga
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let keys: Vec<Option<()>> = ctx.sentences.iter().map(has_adversative_ga).collect();

        qualifying_runs(&keys, ADVERSATIVE_GA_RUN)
            .into_iter()
            .map(|run| {
                let length = run.len();
                AdvancedDiagnostic::new(
                    self.name(),
                    ErrorKind::AdversativeGa,
                    format!(
                        "接続助詞「が」でつながる文が{length}回続いています。文の分割を検討してください"
                    ),
                    run_span(ctx.sentences, run),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoopTermLookup;
    use kousei_text::SentenceSegmenter;
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

    fn run(rule: &dyn Rule, text: &str, tokens: &[Token]) -> Vec<AdvancedDiagnostic> {
        let config = AdvancedRulesConfig::default();
        let sentences = SentenceSegmenter::segment(tokens, text);
        let ctx = RuleContext {
            text,
            tokens,
            sentences: &sentences,
            config: &config,
            lookup: &NoopTermLookup,
        };
        rule.check(tokens, &ctx)
    }

    fn comma_sentence(commas: usize) -> (String, Vec<Token>) {
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
    fn test_comma_count_over_limit() {
        // Five commas exceed the default limit of four.
        let (text, tokens) = comma_sentence(5);
        let diagnostics = run(&CommaCountRule, &text, &tokens);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("5個"));
        assert!(diagnostics[0].message.contains("4個"));
    }

    #[test]
    fn test_comma_count_at_limit_ok() {
        let (text, tokens) = comma_sentence(4);
        assert!(run(&CommaCountRule, &text, &tokens).is_empty());
    }

    #[test]
    fn test_long_sentence_carries_both_lengths() {
        // A 130-character sentence: 129 kana plus the terminal 。.
        let body = "あ".repeat(129);
        let text = format!("{body}。");
        let tokens = vec![
            Token::new(body.clone(), "名詞", Span::new(0, body.len() as u32)),
            Token::new(
                "。",
                "記号",
                Span::new(body.len() as u32, text.len() as u32),
            ),
        ];

        let diagnostics = run(&LongSentenceRule, &text, &tokens);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("130"));
        assert!(diagnostics[0].message.contains("120"));
    }

    #[test]
    fn test_long_sentence_at_limit_ok() {
        let body = "あ".repeat(119);
        let text = format!("{body}。");
        let tokens = vec![
            Token::new(body.clone(), "名詞", Span::new(0, body.len() as u32)),
            Token::new(
                "。",
                "記号",
                Span::new(body.len() as u32, text.len() as u32),
            ),
        ];

        assert!(run(&LongSentenceRule, &text, &tokens).is_empty());
    }

    fn da_sentences(count: usize) -> (String, Vec<Token>) {
        let mut parts = Vec::new();
        for _ in 0..count {
            parts.push(("静か", "名詞"));
            parts.push(("だ", "助動詞"));
            parts.push(("。", "記号"));
        }
        seq(&parts)
    }

    #[test]
    fn test_monotonous_ending_run_is_one_diagnostic() {
        let (text, tokens) = da_sentences(3);
        let diagnostics = run(&MonotonousEndingRule, &text, &tokens);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("「だ」"));
        assert!(diagnostics[0].message.contains("3回"));
        // The run spans all three sentences.
        assert_eq!(diagnostics[0].span, Span::new(0, text.len() as u32));
    }

    #[test]
    fn test_monotonous_ending_below_threshold() {
        let (text, tokens) = da_sentences(2);
        assert!(run(&MonotonousEndingRule, &text, &tokens).is_empty());
    }

    #[test]
    fn test_passive_overuse() {
        let mut parts = Vec::new();
        for _ in 0..4 {
            parts.push(("言わ", "動詞"));
            parts.push(("れ", "助動詞"));
        }
        parts.push(("。", "記号"));
        let (text, mut tokens) = seq(&parts);
        for i in [1, 3, 5, 7] {
            tokens[i] = tokens[i].clone().with_base_form("れる");
        }

        let diagnostics = run(&PassiveOveruseRule, &text, &tokens);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("4回"));
    }

    #[test]
    fn test_passive_at_threshold_ok() {
        let mut parts = Vec::new();
        for _ in 0..3 {
            parts.push(("言わ", "動詞"));
            parts.push(("れ", "助動詞"));
        }
        parts.push(("。", "記号"));
        let (text, mut tokens) = seq(&parts);
        for i in [1, 3, 5] {
            tokens[i] = tokens[i].clone().with_base_form("れる");
        }

        assert!(run(&PassiveOveruseRule, &text, &tokens).is_empty());
    }

    #[test]
    fn test_missing_subject() {
        let filler = "長".repeat(60);
        let (text, tokens) = seq(&[
            (filler.as_str(), "名詞"),
            ("を", "助詞"),
            ("進める", "動詞"),
            ("。", "記号"),
        ]);

        let diagnostics = run(&MissingSubjectRule, &text, &tokens);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Information);
    }

    #[test]
    fn test_missing_subject_short_sentence_ok() {
        let (text, tokens) = seq(&[("進める", "動詞"), ("。", "記号")]);
        assert!(run(&MissingSubjectRule, &text, &tokens).is_empty());
    }

    #[test]
    fn test_conjunction_repetition() {
        let mut parts = Vec::new();
        for _ in 0..2 {
            parts.push(("しかし", "接続詞"));
            parts.push(("、", "記号"));
            parts.push(("進む", "動詞"));
            parts.push(("。", "記号"));
        }
        let (text, tokens) = seq(&parts);

        let diagnostics = run(&ConjunctionRepetitionRule, &text, &tokens);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("「しかし」"));
    }

    #[test]
    fn test_conjunction_differs_ok() {
        let (text, tokens) = seq(&[
            ("しかし", "接続詞"),
            ("進む", "動詞"),
            ("。", "記号"),
            ("また", "接続詞"),
            ("進む", "動詞"),
            ("。", "記号"),
        ]);

        assert!(run(&ConjunctionRepetitionRule, &text, &tokens).is_empty());
    }

    #[test]
    fn test_adversative_ga_run_is_one_diagnostic() {
        let mut parts = Vec::new();
        for _ in 0..2 {
            parts.push(("試した", "動詞"));
            parts.push(("が", "助詞"));
            parts.push(("、", "記号"));
            parts.push(("遅い", "形容詞"));
            parts.push(("。", "記号"));
        }
        let (text, mut tokens) = seq(&parts);
        for i in [1, 6] {
            tokens[i] = tokens[i].clone().with_details(vec!["接続助詞".to_string()]);
        }

        let diagnostics = run(&AdversativeGaRule, &text, &tokens);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("2回"));
        // The run spans both sentences.
        assert_eq!(diagnostics[0].span, Span::new(0, text.len() as u32));
    }

    #[test]
    fn test_adversative_ga_single_sentence_ok() {
        // Two が inside one sentence is not a run of sentences.
        let (text, mut tokens) = seq(&[
            ("試した", "動詞"),
            ("が", "助詞"),
            ("、", "記号"),
            ("動いた", "動詞"),
            ("が", "助詞"),
            ("、", "記号"),
            ("遅い", "形容詞"),
            ("。", "記号"),
        ]);
        tokens[1] = tokens[1].clone().with_details(vec!["接続助詞".to_string()]);
        tokens[4] = tokens[4].clone().with_details(vec!["接続助詞".to_string()]);

        assert!(run(&AdversativeGaRule, &text, &tokens).is_empty());
    }

    #[test]
    fn test_adversative_ga_isolated_sentence_ok() {
        let (text, mut tokens) = seq(&[
            ("試した", "動詞"),
            ("が", "助詞"),
            ("動く", "動詞"),
            ("。", "記号"),
            ("速い", "形容詞"),
            ("。", "記号"),
        ]);
        tokens[1] = tokens[1].clone().with_details(vec!["接続助詞".to_string()]);

        assert!(run(&AdversativeGaRule, &text, &tokens).is_empty());
    }
}
