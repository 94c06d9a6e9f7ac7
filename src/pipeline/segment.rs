use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::token::{Placeholder, CLOSE, OPEN};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{\{(.+?)\}\}").unwrap());
static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static LEADING_BREAKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:<br\s*/?>\s*)+").unwrap());
static TRAILING_BREAKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\s*<br\s*/?>)+\s*$").unwrap());
static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// One classified, renderable unit of a notice. Sequences are in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Heading { text: String },
    LineBreak,
    Text { text: String },
    RouteIcon { line: String },
    AccessibilityIcon,
    BusIcon,
    ExternalLink { url: String, text: String },
    StationLink { station_id: u32, text: String },
    EmptyDetailPlaceholder { text: String },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Segment::Heading { text: text.into() }
    }

    pub fn route(line: impl Into<String>) -> Self {
        Segment::RouteIcon { line: line.into() }
    }
}

/// Title-path split result: clauses with the interleaved breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Clause(String),
    Break,
}

/// Detail body → segments. Leading and trailing `<br>` runs are dropped;
/// every inner `<br>` becomes one `LineBreak`.
pub fn segment(text: &str) -> Vec<Segment> {
    let body = LEADING_BREAKS_RE.replace(text, "");
    let body = TRAILING_BREAKS_RE.replace(&body, "");

    let mut out = Vec::new();
    for (i, line) in BREAK_RE.split(&body).enumerate() {
        if i > 0 {
            out.push(Segment::LineBreak);
        }
        segment_inline(line, &mut out);
    }
    out
}

/// Split text along token boundaries and classify each piece.
pub fn segment_inline(text: &str, out: &mut Vec<Segment>) {
    let mut last = 0;
    for m in TOKEN_RE.find_iter(text) {
        push(out, Segment::text(&text[last..m.start()]));
        let inner = m
            .as_str()
            .strip_prefix(OPEN)
            .and_then(|s| s.strip_suffix(CLOSE))
            .unwrap_or_default();
        push(out, classify(Placeholder::parse(inner)));
        last = m.end();
    }
    push(out, Segment::text(&text[last..]));
}

/// Split a title on runs of two or more spaces. A break follows every
/// even-indexed clause except the last. Tokens are never split, even when
/// their display text holds a double space.
pub fn split_clauses(text: &str) -> Vec<Line> {
    let tokens: Vec<_> = TOKEN_RE.find_iter(text).map(|m| m.range()).collect();
    let mut clauses = Vec::new();
    let mut start = 0;
    for sep in CLAUSE_RE.find_iter(text) {
        if tokens.iter().any(|t| t.contains(&sep.start())) {
            continue;
        }
        clauses.push(&text[start..sep.start()]);
        start = sep.end();
    }
    clauses.push(&text[start..]);
    clauses.retain(|c| !c.is_empty());
    let last = clauses.len().saturating_sub(1);

    let mut lines = Vec::with_capacity(clauses.len() * 2);
    for (i, clause) in clauses.into_iter().enumerate() {
        lines.push(Line::Clause(clause.to_string()));
        if i % 2 == 0 && i < last {
            lines.push(Line::Break);
        }
    }
    lines
}

/// Titles are single-line; literal breaks are removed outright.
pub fn strip_breaks(text: &str) -> Cow<'_, str> {
    BREAK_RE.replace_all(text, "")
}

pub fn classify(token: Placeholder) -> Segment {
    match token {
        Placeholder::Route(line) => Segment::RouteIcon { line },
        Placeholder::ShuttleBus => Segment::BusIcon,
        Placeholder::Accessibility => Segment::AccessibilityIcon,
        Placeholder::Link { url, text } => {
            let text = if text.is_empty() { url.clone() } else { text };
            Segment::ExternalLink { url, text }
        }
        Placeholder::Station { id, text } => match id.parse::<u32>() {
            Ok(station_id) => Segment::StationLink { station_id, text },
            Err(_) => {
                debug!(id = %id, "station token without numeric id, keeping text");
                Segment::Text { text }
            }
        },
    }
}

fn push(out: &mut Vec<Segment>, segment: Segment) {
    if matches!(&segment, Segment::Text { text } if text.is_empty()) {
        return;
    }
    out.push(segment);
}
