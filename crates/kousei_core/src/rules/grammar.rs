//! Grammar rules over token n-grams and windows.

use kousei_text::{Span, Token};

use crate::{AdvancedDiagnostic, AdvancedRulesConfig, ErrorKind, Rule, RuleContext};

use super::support::scan_windows;

/// Conjugation classes whose potential form requires られる.
fn requires_rareru(conjugation_type: &str) -> bool {
    conjugation_type.contains("一段") || conjugation_type.starts_with("カ変")
}

/// Detects ら抜き言葉: potential forms of ichidan (and カ変) verbs written
/// with れる instead of られる.
pub struct RaNukiRule;

impl Rule for RaNukiRule {
    fn name(&self) -> &'static str {
        "ra-nuki"
    }

    fn description(&self) -> &'static str {
        "ら抜き言葉を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.ra_nuki
    }

    fn check(&self, tokens: &[Token], _ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let mut diagnostics = Vec::new();

        // Fused analysis: the analyzer kept the whole potential form as one
        // verb token (食べれる).
        for token in tokens {
            if token.is_verb()
                && requires_rareru(&token.conjugation_type)
                && token.surface.ends_with("れる")
                && !token.surface.ends_with("られる")
            {
                let stem = token.surface.trim_end_matches("れる");
                let corrected = format!("{stem}られる");
                diagnostics.push(
                    AdvancedDiagnostic::new(
                        self.name(),
                        ErrorKind::RaNuki,
                        format!(
                            "ら抜き言葉です: 「{}」は「{}」が適切です",
                            token.surface, corrected
                        ),
                        token.span,
                    )
                    .with_suggestion(corrected),
                );
            }
        }

        // Split analysis: verb stem in 未然形 followed by the auxiliary れる
        // (食べ + れる).
        let split = scan_windows(tokens, 2, |w| {
            let (stem, aux) = (&w[0], &w[1]);
            (stem.is_verb()
                && requires_rareru(&stem.conjugation_type)
                && stem.conjugation_form == "未然形"
                && aux.is_auxiliary()
                && aux.base_form == "れる")
                .then(|| {
                    (
                        format!("{}{}", stem.surface, aux.surface),
                        format!("{}ら{}", stem.surface, aux.surface),
                    )
                })
        });
        for (span, (found, corrected)) in split {
            diagnostics.push(
                AdvancedDiagnostic::new(
                    self.name(),
                    ErrorKind::RaNuki,
                    format!("ら抜き言葉です: 「{found}」は「{corrected}」が適切です"),
                    span,
                )
                .with_suggestion(corrected),
            );
        }

        diagnostics.sort_by_key(|d| (d.span.start, d.span.end));
        diagnostics
    }
}

/// Detects double negation (ない ... ない in close proximity).
pub struct DoubleNegationRule;

impl Rule for DoubleNegationRule {
    fn name(&self) -> &'static str {
        "double-negation"
    }

    fn description(&self) -> &'static str {
        "二重否定を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.double_negation
    }

    fn check(&self, tokens: &[Token], _ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let negations: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.base_form == "ない" && (t.is_auxiliary() || t.is_adjective()))
            .map(|(i, _)| i)
            .collect();

        let mut diagnostics = Vec::new();
        let mut i = 0;
        while i + 1 < negations.len() {
            let (a, b) = (negations[i], negations[i + 1]);
            let same_sentence = tokens[a + 1..b]
                .iter()
                .all(|t| !matches!(t.surface.as_str(), "。" | "！" | "？" | "!" | "?"));
            if b - a <= 4 && same_sentence {
                diagnostics.push(AdvancedDiagnostic::new(
                    self.name(),
                    ErrorKind::DoubleNegation,
                    "二重否定の表現です。肯定形への言い換えを検討してください",
                    Span::new(tokens[a].span.start, tokens[b].span.end),
                ));
                i += 2;
            } else {
                i += 1;
            }
        }
        diagnostics
    }
}

/// Particles の and て repeat legitimately in ordinary prose.
const DOUBLING_EXCEPTIONS: [&str; 2] = ["の", "て"];

/// Detects the same particle used twice in close proximity within one
/// sentence.
pub struct DoubledParticleRule;

impl Rule for DoubledParticleRule {
    fn name(&self) -> &'static str {
        "doubled-particle"
    }

    fn description(&self) -> &'static str {
        "助詞の重複を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.doubled_particle
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let mut diagnostics = Vec::new();
        for sentence in ctx.sentences {
            let particles: Vec<(usize, &Token)> = sentence
                .tokens
                .iter()
                .enumerate()
                .filter(|(_, t)| t.is_particle())
                .collect();

            for pair in particles.windows(2) {
                let (ai, a) = pair[0];
                let (bi, b) = pair[1];
                if a.surface != b.surface
                    || DOUBLING_EXCEPTIONS.contains(&a.surface.as_str())
                    || bi - ai > 4
                {
                    continue;
                }
                let comma_between = sentence.tokens[ai + 1..bi]
                    .iter()
                    .any(|t| t.surface == "、" || t.surface == "，");
                if !comma_between {
                    diagnostics.push(AdvancedDiagnostic::new(
                        self.name(),
                        ErrorKind::DoubledParticle,
                        format!("助詞「{}」が近接して重複しています", a.surface),
                        Span::new(a.span.start, b.span.end),
                    ));
                }
            }
        }
        diagnostics
    }
}

/// Detects chains of the genitive particle の at or above the configured
/// threshold.
pub struct NoParticleChainRule;

impl Rule for NoParticleChainRule {
    fn name(&self) -> &'static str {
        "no-particle-chain"
    }

    fn description(&self) -> &'static str {
        "助詞「の」の連続を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.no_particle_chain
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let threshold = ctx.config.no_particle_chain_threshold;
        let mut diagnostics = Vec::new();

        for sentence in ctx.sentences {
            let mut run: Vec<&Token> = Vec::new();
            // Any other particle or symbol breaks the chain; nouns between
            // the のs keep it alive.
            for token in &sentence.tokens {
                if token.is_particle() && token.surface == "の" {
                    run.push(token);
                } else if token.is_particle() || token.is_symbol() {
                    flush_chain(self.name(), &run, threshold, &mut diagnostics);
                    run.clear();
                }
            }
            flush_chain(self.name(), &run, threshold, &mut diagnostics);
        }
        diagnostics
    }
}

fn flush_chain(
    rule_name: &'static str,
    run: &[&Token],
    threshold: usize,
    diagnostics: &mut Vec<AdvancedDiagnostic>,
) {
    if threshold > 0 && run.len() >= threshold {
        let span = Span::new(run[0].span.start, run[run.len() - 1].span.end);
        diagnostics.push(AdvancedDiagnostic::new(
            rule_name,
            ErrorKind::NoParticleChain,
            format!("助詞「の」が{}回連続して使われています", run.len()),
            span,
        ));
    }
}

/// Detects long runs of consecutive noun tokens.
pub struct NounChainRule;

impl Rule for NounChainRule {
    fn name(&self) -> &'static str {
        "noun-chain"
    }

    fn description(&self) -> &'static str {
        "名詞の連続を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.noun_chain
    }

    fn check(&self, tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let threshold = ctx.config.noun_chain_threshold;
        if threshold == 0 {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        let mut start = None;
        for (i, token) in tokens.iter().enumerate() {
            if token.is_noun() {
                start.get_or_insert(i);
                continue;
            }
            if let Some(s) = start.take()
                && i - s >= threshold
            {
                diagnostics.push(noun_chain_diagnostic(self.name(), &tokens[s..i]));
            }
        }
        if let Some(s) = start
            && tokens.len() - s >= threshold
        {
            diagnostics.push(noun_chain_diagnostic(self.name(), &tokens[s..]));
        }
        diagnostics
    }
}

fn noun_chain_diagnostic(rule_name: &'static str, run: &[Token]) -> AdvancedDiagnostic {
    AdvancedDiagnostic::new(
        rule_name,
        ErrorKind::NounChain,
        format!(
            "名詞が{}語連続しています。読みにくい可能性があります",
            run.len()
        ),
        Span::new(run[0].span.start, run[run.len() - 1].span.end),
    )
}

/// Detects サ変名詞 + をできる, which drops the する stem incorrectly.
pub struct SahenVerbRule;

impl Rule for SahenVerbRule {
    fn name(&self) -> &'static str {
        "sahen-verb"
    }

    fn description(&self) -> &'static str {
        "サ変名詞の誤用を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.sahen_verb
    }

    fn check(&self, tokens: &[Token], _ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        scan_windows(tokens, 3, |w| {
            (w[0].is_noun()
                && w[0].pos_detail(0) == Some("サ変接続")
                && w[1].is_particle()
                && w[1].surface == "を"
                && w[2].is_verb()
                && w[2].base_form == "できる")
                .then(|| w[0].surface.clone())
        })
        .into_iter()
        .map(|(span, noun)| {
            let corrected = format!("{noun}できる");
            AdvancedDiagnostic::new(
                self.name(),
                ErrorKind::SahenVerb,
                format!("「{noun}をできる」は不自然です: 「{corrected}」が適切です"),
                span,
            )
            .with_suggestion(corrected)
        })
        .collect()
    }
}
