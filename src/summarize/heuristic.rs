//! Rule-based summary used whenever inference is unavailable.
//!
//! Everything here is a pure function of the input text: the same transcript
//! always produces the same report, and nothing can fail.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Number of frequent keywords listed in the report.
pub const TOP_KEYWORDS: usize = 5;

/// Characters kept from the first and last lines.
pub const PREVIEW_CHARS: usize = 40;

/// Marker appended to a truncated preview.
pub const ELLIPSIS: &str = "…";

static MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<@[A-Z0-9]+>").expect("static regex compile"));

// A letter followed by at least three more letters or combining marks, in any script.
static KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{L}[\p{L}\p{M}]{3,}").expect("static regex compile"));

/// Counts and previews gathered from a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptStats {
    pub message_count: usize,
    pub char_count: usize,
    pub participant_count: usize,
    pub top_keywords: Vec<String>,
    pub first_line: String,
    pub last_line: String,
}

#[must_use]
pub fn analyze(text: &str) -> TranscriptStats {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let participants: HashSet<&str> = MENTION_RE.find_iter(text).map(|m| m.as_str()).collect();

    let without_mentions = MENTION_RE.replace_all(text, " ");

    TranscriptStats {
        message_count: lines.len(),
        char_count: text.chars().count(),
        participant_count: participants.len(),
        top_keywords: top_keywords(&without_mentions, TOP_KEYWORDS),
        first_line: lines.first().map(|l| preview(l)).unwrap_or_default(),
        last_line: lines.last().map(|l| preview(l)).unwrap_or_default(),
    }
}

/// Build the fixed-template report for `text`.
#[must_use]
pub fn extract(text: &str) -> String {
    render(&analyze(text))
}

#[must_use]
pub fn render(stats: &TranscriptStats) -> String {
    let keywords = if stats.top_keywords.is_empty() {
        "none".to_string()
    } else {
        stats.top_keywords.join(", ")
    };

    format!(
        "📊 *Rule-based summary*\n\
         ━━━━━━━━━━━━━━━\n\
         Messages: {}\n\
         Characters: {}\n\
         Participants: {}\n\
         Top keywords: {}\n\
         ━━━━━━━━━━━━━━━\n\
         First: {}\n\
         Last: {}",
        stats.message_count,
        stats.char_count,
        stats.participant_count,
        keywords,
        stats.first_line,
        stats.last_line,
    )
}

/// Most frequent keyword candidates, ties kept in first-occurrence order.
fn top_keywords(text: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, m) in KEYWORD_RE.find_iter(text).enumerate() {
        let entry = counts.entry(m.as_str()).or_insert((0, order));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _, _)| word.to_string())
        .collect()
}

fn preview(line: &str) -> String {
    let line = line.trim();
    let mut chars = line.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}
