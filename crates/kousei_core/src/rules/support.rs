//! Shared detection-algorithm helpers used by the rule bodies.
//!
//! Four families: token window scanning, dominant-style voting,
//! sentence-run detection, and text dictionary scanning, plus the character
//! width conversions the voting rules use to build suggestions.

use std::ops::Range;

use kousei_text::{Span, Token};

// ---------------------------------------------------------------------------
// Token n-gram / window matching
// ---------------------------------------------------------------------------

/// Scans a sliding window of `k` consecutive tokens.
///
/// On a match, emits the window span and resumes past the window's last
/// token, so matches never overlap.
pub fn scan_windows<T>(
    tokens: &[Token],
    k: usize,
    mut matcher: impl FnMut(&[Token]) -> Option<T>,
) -> Vec<(Span, T)> {
    let mut hits = Vec::new();
    if k == 0 || tokens.len() < k {
        return hits;
    }

    let mut i = 0;
    while i + k <= tokens.len() {
        let window = &tokens[i..i + k];
        if let Some(value) = matcher(window) {
            let span = Span::new(window[0].span.start, window[k - 1].span.end);
            hits.push((span, value));
            i += k;
        } else {
            i += 1;
        }
    }
    hits
}

// ---------------------------------------------------------------------------
// Dominant-style voting
// ---------------------------------------------------------------------------

/// One observed rendering of a semantic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOccurrence {
    /// The semantic unit this rendering belongs to.
    pub unit: String,
    /// Normalized rendering key (e.g. "half", "full", "kanji").
    pub rendering: String,
    /// Where the rendering occurs.
    pub span: Span,
    /// The actual text at the occurrence.
    pub surface: String,
}

impl StyleOccurrence {
    pub fn new(
        unit: impl Into<String>,
        rendering: impl Into<String>,
        span: Span,
        surface: impl Into<String>,
    ) -> Self {
        Self {
            unit: unit.into(),
            rendering: rendering.into(),
            span,
            surface: surface.into(),
        }
    }
}

/// A non-dominant occurrence to be flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleViolation {
    pub span: Span,
    pub surface: String,
    /// Rendering key of the dominant style.
    pub dominant: String,
    /// Replacement in the dominant style, when mechanically derivable.
    pub suggestion: Option<String>,
}

/// Tallies renderings per semantic unit and flags every occurrence of a
/// non-dominant rendering.
///
/// The dominant rendering is the one with the highest count; ties break by
/// first appearance in document order. Units with a single rendering never
/// produce violations.
pub fn vote(
    occurrences: &[StyleOccurrence],
    mut suggest: impl FnMut(&StyleOccurrence, &str) -> Option<String>,
) -> Vec<StyleViolation> {
    // Units in first-appearance order.
    let mut units: Vec<&str> = Vec::new();
    for occ in occurrences {
        if !units.iter().any(|u| *u == occ.unit) {
            units.push(&occ.unit);
        }
    }

    let mut violations = Vec::new();
    for unit in units {
        let members: Vec<&StyleOccurrence> =
            occurrences.iter().filter(|o| o.unit == unit).collect();

        // Tally (rendering, count, first index) in first-appearance order.
        let mut tallies: Vec<(&str, usize, usize)> = Vec::new();
        for (idx, occ) in members.iter().enumerate() {
            match tallies.iter_mut().find(|(r, _, _)| *r == occ.rendering) {
                Some((_, count, _)) => *count += 1,
                None => tallies.push((&occ.rendering, 1, idx)),
            }
        }
        if tallies.len() < 2 {
            continue;
        }

        let dominant = tallies
            .iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)))
            .map(|(r, _, _)| *r)
            .unwrap_or_default();

        for occ in members {
            if occ.rendering != dominant {
                violations.push(StyleViolation {
                    span: occ.span,
                    surface: occ.surface.clone(),
                    dominant: dominant.to_string(),
                    suggestion: suggest(occ, dominant),
                });
            }
        }
    }

    violations
}

// ---------------------------------------------------------------------------
// Consecutive sentence runs
// ---------------------------------------------------------------------------

/// Finds maximal runs of consecutive equal keys of at least `min_len`.
///
/// `None` entries never participate in a run.
pub fn qualifying_runs<K: PartialEq>(keys: &[Option<K>], min_len: usize) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    if min_len == 0 {
        return runs;
    }

    let mut start = 0;
    for i in 1..=keys.len() {
        let extends = i < keys.len()
            && keys[i].is_some()
            && keys[i] == keys[start];
        if !extends {
            if keys[start].is_some() && i - start >= min_len {
                runs.push(start..i);
            }
            start = i;
        }
    }
    runs
}

// ---------------------------------------------------------------------------
// Text dictionary scanning
// ---------------------------------------------------------------------------

/// A dictionary hit in raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextHit {
    pub span: Span,
    pub found: String,
    pub canonical: String,
}

/// Scans the text for every dictionary key, emitting the canonical form.
///
/// ASCII keys match case-insensitively and only at ASCII word boundaries.
/// Occurrences already written in the canonical form are skipped, including
/// key matches sitting inside a canonical occurrence (a key such as サーバ
/// that prefixes its own canonical サーバー must not flag correct text), as
/// are hits overlapping an earlier accepted hit.
pub fn scan_text_map(text: &str, entries: &[(&str, &str)]) -> Vec<TextHit> {
    let mut hits: Vec<TextHit> = Vec::new();

    for (key, canonical) in entries {
        if key.is_ascii() {
            scan_ascii_key(text, key, canonical, &mut hits);
        } else {
            for (start, found) in text.match_indices(key) {
                let end = start + found.len();
                if !within_canonical(text, start, end, canonical) {
                    hits.push(TextHit {
                        span: Span::new(start as u32, end as u32),
                        found: found.to_string(),
                        canonical: (*canonical).to_string(),
                    });
                }
            }
        }
    }

    // Longest match wins at equal starts.
    hits.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then(b.span.end.cmp(&a.span.end))
    });

    // Drop hits overlapping an earlier accepted hit.
    let mut accepted: Vec<TextHit> = Vec::new();
    for hit in hits {
        if accepted
            .last()
            .is_none_or(|prev| hit.span.start >= prev.span.end)
        {
            accepted.push(hit);
        }
    }
    accepted
}

/// True when the hit at `start..end` lies inside an occurrence of the
/// canonical form, i.e. the surrounding text is already written correctly.
fn within_canonical(text: &str, start: usize, end: usize, canonical: &str) -> bool {
    if canonical.len() < end - start {
        return false;
    }
    let mut lo = start.saturating_sub(canonical.len() - (end - start));
    while !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (start + canonical.len()).min(text.len());
    while !text.is_char_boundary(hi) {
        hi += 1;
    }
    text[lo..hi]
        .match_indices(canonical)
        .any(|(off, m)| lo + off <= start && lo + off + m.len() >= end)
}

fn scan_ascii_key(text: &str, key: &str, canonical: &str, hits: &mut Vec<TextHit>) {
    let bytes = text.as_bytes();
    let key_bytes = key.as_bytes();
    if key_bytes.is_empty() || bytes.len() < key_bytes.len() {
        return;
    }

    let mut i = 0;
    while i + key_bytes.len() <= bytes.len() {
        if !text.is_char_boundary(i) {
            i += 1;
            continue;
        }
        let end = i + key_bytes.len();
        if text.is_char_boundary(end) && bytes[i..end].eq_ignore_ascii_case(key_bytes) {
            let before_ok = i == 0 || !bytes[i - 1].is_ascii_alphanumeric();
            let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
            let found = &text[i..end];
            if before_ok && after_ok && !within_canonical(text, i, end, canonical) {
                hits.push(TextHit {
                    span: Span::new(i as u32, end as u32),
                    found: found.to_string(),
                    canonical: canonical.to_string(),
                });
                i = end;
                continue;
            }
        }
        i += 1;
    }
}

/// Looks tokens up in a correction map keyed by surface or base form.
pub fn scan_token_map(tokens: &[Token], entries: &[(&str, &str)]) -> Vec<TextHit> {
    let mut hits = Vec::new();
    for token in tokens {
        for (key, canonical) in entries {
            if (token.surface == *key || token.base_form == *key) && token.surface != *canonical {
                hits.push(TextHit {
                    span: token.span,
                    found: token.surface.clone(),
                    canonical: (*canonical).to_string(),
                });
                break;
            }
        }
    }
    hits
}

// ---------------------------------------------------------------------------
// Character width conversions
// ---------------------------------------------------------------------------

/// Converts full-width ASCII variants to half-width.
pub fn to_half_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            '\u{3000}' => ' ',
            _ => c,
        })
        .collect()
}

/// Converts half-width ASCII to full-width variants.
pub fn to_full_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '!'..='~' => char::from_u32(c as u32 + 0xFEE0).unwrap_or(c),
            ' ' => '\u{3000}',
            _ => c,
        })
        .collect()
}

/// Half-width katakana sequences and their full-width forms. Voiced digraphs
/// come first so greedy scanning prefers them.
const KANA_PAIRS: &[(&str, char)] = &[
    ("ｶﾞ", 'ガ'), ("ｷﾞ", 'ギ'), ("ｸﾞ", 'グ'), ("ｹﾞ", 'ゲ'), ("ｺﾞ", 'ゴ'),
    ("ｻﾞ", 'ザ'), ("ｼﾞ", 'ジ'), ("ｽﾞ", 'ズ'), ("ｾﾞ", 'ゼ'), ("ｿﾞ", 'ゾ'),
    ("ﾀﾞ", 'ダ'), ("ﾁﾞ", 'ヂ'), ("ﾂﾞ", 'ヅ'), ("ﾃﾞ", 'デ'), ("ﾄﾞ", 'ド'),
    ("ﾊﾞ", 'バ'), ("ﾋﾞ", 'ビ'), ("ﾌﾞ", 'ブ'), ("ﾍﾞ", 'ベ'), ("ﾎﾞ", 'ボ'),
    ("ﾊﾟ", 'パ'), ("ﾋﾟ", 'ピ'), ("ﾌﾟ", 'プ'), ("ﾍﾟ", 'ペ'), ("ﾎﾟ", 'ポ'),
    ("ｳﾞ", 'ヴ'),
    ("ｱ", 'ア'), ("ｲ", 'イ'), ("ｳ", 'ウ'), ("ｴ", 'エ'), ("ｵ", 'オ'),
    ("ｶ", 'カ'), ("ｷ", 'キ'), ("ｸ", 'ク'), ("ｹ", 'ケ'), ("ｺ", 'コ'),
    ("ｻ", 'サ'), ("ｼ", 'シ'), ("ｽ", 'ス'), ("ｾ", 'セ'), ("ｿ", 'ソ'),
    ("ﾀ", 'タ'), ("ﾁ", 'チ'), ("ﾂ", 'ツ'), ("ﾃ", 'テ'), ("ﾄ", 'ト'),
    ("ﾅ", 'ナ'), ("ﾆ", 'ニ'), ("ﾇ", 'ヌ'), ("ﾈ", 'ネ'), ("ﾉ", 'ノ'),
    ("ﾊ", 'ハ'), ("ﾋ", 'ヒ'), ("ﾌ", 'フ'), ("ﾍ", 'ヘ'), ("ﾎ", 'ホ'),
    ("ﾏ", 'マ'), ("ﾐ", 'ミ'), ("ﾑ", 'ム'), ("ﾒ", 'メ'), ("ﾓ", 'モ'),
    ("ﾔ", 'ヤ'), ("ﾕ", 'ユ'), ("ﾖ", 'ヨ'),
    ("ﾗ", 'ラ'), ("ﾘ", 'リ'), ("ﾙ", 'ル'), ("ﾚ", 'レ'), ("ﾛ", 'ロ'),
    ("ﾜ", 'ワ'), ("ｦ", 'ヲ'), ("ﾝ", 'ン'),
    ("ｧ", 'ァ'), ("ｨ", 'ィ'), ("ｩ", 'ゥ'), ("ｪ", 'ェ'), ("ｫ", 'ォ'),
    ("ｬ", 'ャ'), ("ｭ", 'ュ'), ("ｮ", 'ョ'), ("ｯ", 'ッ'),
    ("ｰ", 'ー'), ("｡", '。'), ("､", '、'), ("｢", '「'), ("｣", '」'),
];

/// Converts half-width katakana (including voiced digraphs) to full-width.
pub fn half_kana_to_full(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    'outer: while !rest.is_empty() {
        for (half, full) in KANA_PAIRS {
            if rest.starts_with(half) {
                out.push(*full);
                rest = &rest[half.len()..];
                continue 'outer;
            }
        }
        let c = rest.chars().next().unwrap_or('\0');
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Converts full-width katakana to half-width.
pub fn full_kana_to_half(s: &str) -> String {
    s.chars()
        .map(|c| {
            KANA_PAIRS
                .iter()
                .find(|(_, full)| *full == c)
                .map(|(half, _)| (*half).to_string())
                .unwrap_or_else(|| c.to_string())
        })
        .collect()
}

/// Kanji digits in positional order.
const KANJI_DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Converts an ASCII digit string to positional kanji digits.
pub fn arabic_to_kanji(s: &str) -> Option<String> {
    s.chars()
        .map(|c| c.to_digit(10).map(|d| KANJI_DIGITS[d as usize]))
        .collect()
}

/// Converts a positional kanji digit string to ASCII digits.
///
/// Returns `None` when the string uses place-value characters (十, 百, ...)
/// that positional conversion cannot express.
pub fn kanji_to_arabic(s: &str) -> Option<String> {
    s.chars()
        .map(|c| {
            KANJI_DIGITS
                .iter()
                .position(|k| *k == c)
                .map(|d| char::from_digit(d as u32, 10).unwrap_or('0'))
        })
        .collect()
}
