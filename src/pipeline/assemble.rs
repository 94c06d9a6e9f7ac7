use super::segment::{segment, segment_inline, split_clauses, strip_breaks, Line, Segment};
use super::token::OPEN;
use super::typography::{BULLET, BULLET_SEPARATOR};
use super::{HeadingCase, Layout, Policy};

pub const NO_DETAILS: &str = "No additional details.";
pub const TRIP_PLANNER_URL: &str =
    "http://tripplanner.mta.info/MyTrip/ui_web/customplanner/tripplanner.aspx";
pub const TRIP_PLANNER_TEXT: &str = "Get me around this work with TripPlanner+";

/// Apply presentation policy to translated text.
pub fn assemble(text: &str, policy: &Policy) -> Vec<Segment> {
    let mut segments = match policy.layout {
        Layout::Title => title(text, policy.heading_case),
        Layout::Detail => detail(text),
    };
    if policy.trailing_link {
        segments.push(trip_planner_link());
    }
    segments
}

pub fn trip_planner_link() -> Segment {
    Segment::ExternalLink {
        url: TRIP_PLANNER_URL.to_string(),
        text: TRIP_PLANNER_TEXT.to_string(),
    }
}

fn title(text: &str, case: HeadingCase) -> Vec<Segment> {
    let text = strip_breaks(text);
    let mut segments = Vec::new();

    for (i, line) in split_clauses(&text).into_iter().enumerate() {
        match line {
            Line::Break => segments.push(Segment::LineBreak),
            Line::Clause(clause) if i == 0 => {
                let (heading, rest) = split_heading(&clause);
                let heading = apply_case(heading, case);
                if !heading.is_empty() {
                    segments.push(Segment::heading(heading));
                }
                segment_inline(rest, &mut segments);
            }
            Line::Clause(clause) => segment_inline(&clause, &mut segments),
        }
    }
    segments
}

fn detail(text: &str) -> Vec<Segment> {
    let segments = segment(text);
    let blank = segments
        .iter()
        .all(|s| matches!(s, Segment::Text { text } if text.trim().is_empty()));
    if blank {
        return vec![Segment::EmptyDetailPlaceholder {
            text: NO_DETAILS.to_string(),
        }];
    }
    segments
}

/// Heading text runs up to the first bullet separator or token, whichever
/// comes first. The separator itself is consumed.
fn split_heading(clause: &str) -> (&str, &str) {
    let clause = clause.trim_start_matches(|c: char| c.is_whitespace() || c == BULLET);
    let bullet = clause.find(BULLET_SEPARATOR);
    let token = clause.find(OPEN);

    match (bullet, token) {
        (Some(b), Some(t)) if t < b => (clause[..t].trim(), &clause[t..]),
        (Some(b), _) => (clause[..b].trim(), &clause[b + BULLET_SEPARATOR.len()..]),
        (None, Some(t)) => (clause[..t].trim(), &clause[t..]),
        (None, None) => (clause.trim(), ""),
    }
}

fn apply_case(text: &str, case: HeadingCase) -> String {
    match case {
        HeadingCase::AsIs => text.to_string(),
        HeadingCase::Sentence => {
            let lower = text.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}
