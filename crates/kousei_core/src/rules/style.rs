//! Notation-consistency rules built on dominant-style voting.
//!
//! Each rule collects every rendering of a semantic unit, declares the most
//! frequent rendering dominant (ties break by first appearance), and flags
//! only the minority occurrences.

use std::collections::HashMap;

use kousei_text::{Span, Token};

use crate::{AdvancedDiagnostic, AdvancedRulesConfig, ErrorKind, Rule, RuleContext};

use super::support::{
    StyleOccurrence, arabic_to_kanji, full_kana_to_half, half_kana_to_full, kanji_to_arabic,
    to_full_width, to_half_width, vote,
};

/// Groups consecutive characters of the same classification into runs.
fn char_runs(
    text: &str,
    classify: impl Fn(char) -> Option<&'static str>,
) -> Vec<(Span, &'static str, String)> {
    fn flush(
        current: &mut Option<(usize, &'static str, String)>,
        runs: &mut Vec<(Span, &'static str, String)>,
    ) {
        if let Some((start, class, buf)) = current.take() {
            runs.push((
                Span::new(start as u32, (start + buf.len()) as u32),
                class,
                buf,
            ));
        }
    }

    let mut runs = Vec::new();
    let mut current: Option<(usize, &'static str, String)> = None;

    for (i, c) in text.char_indices() {
        match classify(c) {
            Some(class) => match &mut current {
                Some((_, existing, buf)) if *existing == class => buf.push(c),
                _ => {
                    flush(&mut current, &mut runs);
                    current = Some((i, class, c.to_string()));
                }
            },
            None => flush(&mut current, &mut runs),
        }
    }
    flush(&mut current, &mut runs);
    runs
}

/// Shared body of the half/full width rules.
fn width_diagnostics(
    rule_name: &'static str,
    kind: ErrorKind,
    label: &str,
    text: &str,
    classify: impl Fn(char) -> Option<&'static str>,
    convert: impl Fn(&str, &str) -> Option<String>,
) -> Vec<AdvancedDiagnostic> {
    let occurrences: Vec<StyleOccurrence> = char_runs(text, classify)
        .into_iter()
        .map(|(span, rendering, surface)| StyleOccurrence::new(label, rendering, span, surface))
        .collect();

    vote(&occurrences, |occ, dominant| convert(&occ.surface, dominant))
        .into_iter()
        .map(|v| {
            let mut diagnostic = AdvancedDiagnostic::new(
                rule_name,
                kind,
                format!("{label}の全角と半角が混在しています: 「{}」", v.surface),
                v.span,
            );
            if let Some(suggestion) = v.suggestion.clone() {
                diagnostic = diagnostic.with_suggestion(suggestion);
            }
            diagnostic
        })
        .collect()
}

/// Flags sentences written against the document's dominant register
/// (ですます調 vs である調).
pub struct StyleConsistencyRule;

impl Rule for StyleConsistencyRule {
    fn name(&self) -> &'static str {
        "style-consistency"
    }

    fn description(&self) -> &'static str {
        "文体(ですます調/である調)の混在を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.style_consistency
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let occurrences: Vec<StyleOccurrence> = ctx
            .sentences
            .iter()
            .filter_map(|s| {
                let rendering = if s.ends_with_desu_masu() {
                    "ですます"
                } else if s.ends_with_dearu() {
                    "である"
                } else {
                    return None;
                };
                Some(StyleOccurrence::new("register", rendering, s.span, s.text.clone()))
            })
            .collect();

        vote(&occurrences, |_, _| None)
            .into_iter()
            .map(|v| {
                AdvancedDiagnostic::new(
                    self.name(),
                    ErrorKind::StyleConsistency,
                    format!(
                        "文体が統一されていません。主体の「{}調」に合わせてください",
                        v.dominant
                    ),
                    v.span,
                )
            })
            .collect()
    }
}

/// Flags alphabet runs written against the dominant width.
pub struct AlphabetWidthRule;

impl Rule for AlphabetWidthRule {
    fn name(&self) -> &'static str {
        "alphabet-width"
    }

    fn description(&self) -> &'static str {
        "英字の全角/半角の混在を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.alphabet_width
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        width_diagnostics(
            self.name(),
            ErrorKind::AlphabetWidth,
            "英字",
            ctx.text,
            |c| match c {
                'A'..='Z' | 'a'..='z' => Some("half"),
                'Ａ'..='Ｚ' | 'ａ'..='ｚ' => Some("full"),
                _ => None,
            },
            |surface, dominant| match dominant {
                "half" => Some(to_half_width(surface)),
                "full" => Some(to_full_width(surface)),
                _ => None,
            },
        )
    }
}

/// Flags digit runs written against the dominant width.
pub struct NumberWidthRule;

impl Rule for NumberWidthRule {
    fn name(&self) -> &'static str {
        "number-width"
    }

    fn description(&self) -> &'static str {
        "数字の全角/半角の混在を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.number_width
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        width_diagnostics(
            self.name(),
            ErrorKind::NumberWidth,
            "数字",
            ctx.text,
            |c| match c {
                '0'..='9' => Some("half"),
                '０'..='９' => Some("full"),
                _ => None,
            },
            |surface, dominant| match dominant {
                "half" => Some(to_half_width(surface)),
                "full" => Some(to_full_width(surface)),
                _ => None,
            },
        )
    }
}

/// Flags katakana runs written against the dominant width.
pub struct KanaWidthRule;

impl Rule for KanaWidthRule {
    fn name(&self) -> &'static str {
        "kana-width"
    }

    fn description(&self) -> &'static str {
        "カタカナの全角/半角の混在を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.kana_width
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        width_diagnostics(
            self.name(),
            ErrorKind::KanaWidth,
            "カタカナ",
            ctx.text,
            |c| match c {
                '\u{30A1}'..='\u{30FC}' => Some("full"),
                '\u{FF66}'..='\u{FF9F}' => Some("half"),
                _ => None,
            },
            |surface, dominant| match dominant {
                "full" => Some(half_kana_to_full(surface)),
                "half" => Some(full_kana_to_half(surface)),
                _ => None,
            },
        )
    }
}

const KANJI_DIGIT_CHARS: [char; 10] =
    ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Flags numeral tokens written against the dominant numeral system
/// (算用数字 vs 漢数字).
pub struct NumeralStyleRule;

impl Rule for NumeralStyleRule {
    fn name(&self) -> &'static str {
        "numeral-style"
    }

    fn description(&self) -> &'static str {
        "算用数字と漢数字の混在を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.numeral_style
    }

    fn check(&self, tokens: &[Token], _ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let occurrences: Vec<StyleOccurrence> = tokens
            .iter()
            .filter(|t| t.is_number())
            .filter_map(|t| {
                let normalized = to_half_width(&t.surface);
                let rendering = if normalized.chars().all(|c| c.is_ascii_digit()) {
                    "arabic"
                } else if t.surface.chars().all(|c| KANJI_DIGIT_CHARS.contains(&c)) {
                    "kanji"
                } else {
                    // Place-value numerals (三十) do not vote.
                    return None;
                };
                Some(StyleOccurrence::new("numeral", rendering, t.span, t.surface.clone()))
            })
            .collect();

        vote(&occurrences, |occ, dominant| match dominant {
            "arabic" => kanji_to_arabic(&occ.surface),
            "kanji" => arabic_to_kanji(&to_half_width(&occ.surface)),
            _ => None,
        })
        .into_iter()
        .map(|v| {
            let mut diagnostic = AdvancedDiagnostic::new(
                self.name(),
                ErrorKind::NumeralStyle,
                format!("算用数字と漢数字が混在しています: 「{}」", v.surface),
                v.span,
            );
            if let Some(suggestion) = v.suggestion.clone() {
                diagnostic = diagnostic.with_suggestion(suggestion);
            }
            diagnostic
        })
        .collect()
    }
}

fn dash_char(rendering: &str) -> Option<&'static str> {
    match rendering {
        "wave-dash" => Some("〜"),
        "fullwidth-tilde" => Some("～"),
        "em-dash" => Some("—"),
        "horizontal-bar" => Some("―"),
        _ => None,
    }
}

/// Flags wave-dash/tilde and dash variants against the dominant one.
pub struct DashTildeRule;

impl Rule for DashTildeRule {
    fn name(&self) -> &'static str {
        "dash-tilde"
    }

    fn description(&self) -> &'static str {
        "波ダッシュ・ダッシュ類の表記揺れを検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.dash_tilde
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let mut occurrences = Vec::new();
        for (i, c) in ctx.text.char_indices() {
            let (unit, rendering) = match c {
                '〜' => ("tilde", "wave-dash"),
                '～' => ("tilde", "fullwidth-tilde"),
                '—' => ("dash", "em-dash"),
                '―' => ("dash", "horizontal-bar"),
                _ => continue,
            };
            occurrences.push(StyleOccurrence::new(
                unit,
                rendering,
                Span::new(i as u32, (i + c.len_utf8()) as u32),
                c.to_string(),
            ));
        }

        vote(&occurrences, |_, dominant| {
            dash_char(dominant).map(str::to_string)
        })
        .into_iter()
        .map(|v| {
            let mut diagnostic = AdvancedDiagnostic::new(
                self.name(),
                ErrorKind::DashTilde,
                format!("記号「{}」の表記が揺れています", v.surface),
                v.span,
            );
            if let Some(suggestion) = v.suggestion.clone() {
                diagnostic = diagnostic.with_suggestion(suggestion);
            }
            diagnostic
        })
        .collect()
    }
}

/// Flags middle-dot width variants against the dominant one.
pub struct NakaguroRule;

impl Rule for NakaguroRule {
    fn name(&self) -> &'static str {
        "nakaguro"
    }

    fn description(&self) -> &'static str {
        "中黒の表記揺れを検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.nakaguro
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let mut occurrences = Vec::new();
        for (i, c) in ctx.text.char_indices() {
            let rendering = match c {
                '・' => "full",
                '･' => "half",
                _ => continue,
            };
            occurrences.push(StyleOccurrence::new(
                "nakaguro",
                rendering,
                Span::new(i as u32, (i + c.len_utf8()) as u32),
                c.to_string(),
            ));
        }

        vote(&occurrences, |_, dominant| {
            Some(if dominant == "full" { "・" } else { "･" }.to_string())
        })
        .into_iter()
        .map(|v| {
            AdvancedDiagnostic::new(
                self.name(),
                ErrorKind::Nakaguro,
                format!("中黒「{}」の表記が揺れています", v.surface),
                v.span,
            )
            .with_suggestion(v.suggestion.unwrap_or_default())
        })
        .collect()
    }
}

/// Flags parenthesis width variants against the dominant one.
pub struct BracketStyleRule;

impl Rule for BracketStyleRule {
    fn name(&self) -> &'static str {
        "bracket-style"
    }

    fn description(&self) -> &'static str {
        "括弧の全角/半角の混在を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.bracket_style
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let mut occurrences = Vec::new();
        for (i, c) in ctx.text.char_indices() {
            let (unit, rendering) = match c {
                '(' => ("open-paren", "half"),
                ')' => ("close-paren", "half"),
                '（' => ("open-paren", "full"),
                '）' => ("close-paren", "full"),
                _ => continue,
            };
            occurrences.push(StyleOccurrence::new(
                unit,
                rendering,
                Span::new(i as u32, (i + c.len_utf8()) as u32),
                c.to_string(),
            ));
        }

        vote(&occurrences, |occ, dominant| {
            Some(match dominant {
                "half" => to_half_width(&occ.surface),
                _ => to_full_width(&occ.surface),
            })
        })
        .into_iter()
        .map(|v| {
            AdvancedDiagnostic::new(
                self.name(),
                ErrorKind::BracketStyle,
                format!("括弧「{}」の全角と半角が混在しています", v.surface),
                v.span,
            )
            .with_suggestion(v.suggestion.unwrap_or_default())
        })
        .collect()
    }
}

/// Flags 。、 vs ．， punctuation against the dominant convention.
pub struct KutenStyleRule;

impl Rule for KutenStyleRule {
    fn name(&self) -> &'static str {
        "kuten-style"
    }

    fn description(&self) -> &'static str {
        "句読点(。、/．，)の混在を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.kuten_style
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let mut occurrences = Vec::new();
        for (i, c) in ctx.text.char_indices() {
            let (unit, rendering) = match c {
                '。' => ("kuten", "jp"),
                '．' => ("kuten", "western"),
                '、' => ("touten", "jp"),
                '，' => ("touten", "western"),
                _ => continue,
            };
            occurrences.push(StyleOccurrence::new(
                unit,
                rendering,
                Span::new(i as u32, (i + c.len_utf8()) as u32),
                c.to_string(),
            ));
        }

        vote(&occurrences, |occ, dominant| {
            let replacement = match (occ.unit.as_str(), dominant) {
                ("kuten", "jp") => "。",
                ("kuten", "western") => "．",
                ("touten", "jp") => "、",
                ("touten", "western") => "，",
                _ => return None,
            };
            Some(replacement.to_string())
        })
        .into_iter()
        .map(|v| {
            AdvancedDiagnostic::new(
                self.name(),
                ErrorKind::KutenStyle,
                format!("句読点「{}」の表記が揺れています", v.surface),
                v.span,
            )
            .with_suggestion(v.suggestion.unwrap_or_default())
        })
        .collect()
    }
}

fn is_katakana(c: char) -> bool {
    ('\u{30A1}'..='\u{30FC}').contains(&c)
}

/// Flags katakana words whose trailing long-vowel mark diverges from the
/// dominant spelling of the same word (サーバー vs サーバ).
pub struct KatakanaLongVowelRule;

impl Rule for KatakanaLongVowelRule {
    fn name(&self) -> &'static str {
        "katakana-long-vowel"
    }

    fn description(&self) -> &'static str {
        "カタカナ語末尾の長音表記の揺れを検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.katakana_long_vowel
    }

    fn check(&self, tokens: &[Token], _ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let occurrences: Vec<StyleOccurrence> = tokens
            .iter()
            .filter(|t| t.is_noun())
            .filter_map(|t| {
                if !t.surface.chars().all(is_katakana) || t.surface.chars().count() < 3 {
                    return None;
                }
                let stem = t.surface.trim_end_matches('ー');
                if stem.is_empty() {
                    return None;
                }
                let rendering = if stem.len() == t.surface.len() {
                    "short"
                } else {
                    "long"
                };
                Some(StyleOccurrence::new(stem, rendering, t.span, t.surface.clone()))
            })
            .collect();

        vote(&occurrences, |occ, dominant| {
            Some(match dominant {
                "long" => format!("{}ー", occ.unit),
                _ => occ.unit.clone(),
            })
        })
        .into_iter()
        .map(|v| {
            AdvancedDiagnostic::new(
                self.name(),
                ErrorKind::KatakanaLongVowel,
                format!("カタカナ語の長音表記が揺れています: 「{}」", v.surface),
                v.span,
            )
            .with_suggestion(v.suggestion.unwrap_or_default())
        })
        .collect()
    }
}

fn format_date(style: &str, parts: &[String; 3]) -> Option<String> {
    match style {
        "slash" => Some(format!("{}/{}/{}", parts[0], parts[1], parts[2])),
        "hyphen" => Some(format!("{}-{}-{}", parts[0], parts[1], parts[2])),
        "kanji" => Some(format!("{}年{}月{}日", parts[0], parts[1], parts[2])),
        _ => None,
    }
}

fn read_digits(chars: &[(usize, char)], j: &mut usize, min: usize, max: usize) -> Option<String> {
    let mut s = String::new();
    while s.len() < max && chars.get(*j).is_some_and(|(_, c)| c.is_ascii_digit()) {
        s.push(chars[*j].1);
        *j += 1;
    }
    (s.len() >= min).then_some(s)
}

fn try_date(chars: &[(usize, char)], i: usize) -> Option<(usize, &'static str, [String; 3])> {
    if i > 0 && chars[i - 1].1.is_ascii_digit() {
        return None;
    }
    let mut j = i;
    let year = read_digits(chars, &mut j, 4, 4)?;
    let (style, second_sep, kanji_suffix) = match chars.get(j)?.1 {
        '/' => ("slash", '/', false),
        '-' => ("hyphen", '-', false),
        '年' => ("kanji", '月', true),
        _ => return None,
    };
    j += 1;
    let month = read_digits(chars, &mut j, 1, 2)?;
    if chars.get(j)?.1 != second_sep {
        return None;
    }
    j += 1;
    let day = read_digits(chars, &mut j, 1, 2)?;
    if kanji_suffix {
        if chars.get(j).map(|(_, c)| *c) != Some('日') {
            return None;
        }
        j += 1;
    }
    if chars.get(j).is_some_and(|(_, c)| c.is_ascii_digit()) {
        return None;
    }
    Some((j - i, style, [year, month, day]))
}

fn scan_dates(text: &str) -> Vec<(Span, &'static str, [String; 3])> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut dates = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match try_date(&chars, i) {
            Some((consumed, style, parts)) => {
                let start = chars[i].0;
                let end = chars
                    .get(i + consumed)
                    .map(|(b, _)| *b)
                    .unwrap_or(text.len());
                dates.push((Span::new(start as u32, end as u32), style, parts));
                i += consumed;
            }
            None => i += 1,
        }
    }
    dates
}

/// Flags date literals written against the dominant format
/// (YYYY/MM/DD, YYYY-MM-DD, YYYY年MM月DD日).
pub struct DateFormatRule;

impl Rule for DateFormatRule {
    fn name(&self) -> &'static str {
        "date-format"
    }

    fn description(&self) -> &'static str {
        "日付形式の混在を検出します"
    }

    fn is_enabled(&self, config: &AdvancedRulesConfig) -> bool {
        config.rules.date_format
    }

    fn check(&self, _tokens: &[Token], ctx: &RuleContext<'_>) -> Vec<AdvancedDiagnostic> {
        let dates = scan_dates(ctx.text);
        let parts_by_span: HashMap<Span, [String; 3]> = dates
            .iter()
            .map(|(span, _, parts)| (*span, parts.clone()))
            .collect();

        let occurrences: Vec<StyleOccurrence> = dates
            .iter()
            .filter_map(|(span, style, _)| {
                let surface = span.slice(ctx.text)?;
                Some(StyleOccurrence::new("date", *style, *span, surface))
            })
            .collect();

        vote(&occurrences, |occ, dominant| {
            parts_by_span
                .get(&occ.span)
                .and_then(|parts| format_date(dominant, parts))
        })
        .into_iter()
        .map(|v| {
            let mut diagnostic = AdvancedDiagnostic::new(
                self.name(),
                ErrorKind::DateFormat,
                format!("日付の形式が混在しています: 「{}」", v.surface),
                v.span,
            );
            if let Some(suggestion) = v.suggestion.clone() {
                diagnostic = diagnostic.with_suggestion(suggestion);
            }
            diagnostic
        })
        .collect()
    }
}
