use serde::{Deserialize, Serialize};

use crate::pipeline::{transform, Policy, Segment};

/// A service notice as delivered by the status feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawNotice {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedNotice {
    pub id: Option<u64>,
    pub summary: Option<Vec<Segment>>,
    pub details: Vec<Segment>,
}

/// Render one notice. Records that only populate `summary` have it moved to
/// the detail body, where links and icons are kept.
pub fn render_notice(notice: &RawNotice) -> RenderedNotice {
    let details = notice.details.as_deref().filter(|d| !d.is_empty());
    let (summary, details) = match details {
        Some(details) => (notice.summary.as_deref(), details),
        None => (None, notice.summary.as_deref().unwrap_or_default()),
    };

    RenderedNotice {
        id: notice.id,
        summary: summary
            .filter(|s| !s.is_empty())
            .map(|s| transform(s, &Policy::SUMMARY)),
        details: transform(details, &Policy::DETAIL),
    }
}

#[cfg(feature = "rayon")]
pub fn render_notices(notices: &[RawNotice]) -> Vec<RenderedNotice> {
    use rayon::prelude::*;
    notices.par_iter().map(render_notice).collect()
}

#[cfg(not(feature = "rayon"))]
pub fn render_notices(notices: &[RawNotice]) -> Vec<RenderedNotice> {
    notices.iter().map(render_notice).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::assemble::{NO_DETAILS, TRIP_PLANNER_URL};

    fn notice(summary: Option<&str>, details: Option<&str>) -> RawNotice {
        RawNotice {
            id: Some(7),
            summary: summary.map(String::from),
            details: details.map(String::from),
        }
    }

    fn load_fixture() -> Vec<RawNotice> {
        let raw = std::fs::read_to_string("tests/fixtures/notices.json").unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn summary_and_details() {
        let rendered = render_notice(&notice(Some("DELAYS"), Some("Expect waits")));
        assert_eq!(rendered.id, Some(7));
        assert_eq!(rendered.summary, Some(vec![Segment::heading("Delays")]));
        assert_eq!(rendered.details[0], Segment::text("Expect waits"));
    }

    #[test]
    fn missing_details_moves_summary() {
        let rendered = render_notice(&notice(
            Some("See <a href='http://mta.info/x'>this</a>"),
            None,
        ));
        assert!(rendered.summary.is_none());
        assert_eq!(rendered.details[0], Segment::text("See "));
        assert!(matches!(&rendered.details[1], Segment::ExternalLink { text, .. } if text == "this"));
    }

    #[test]
    fn empty_details_counts_as_missing() {
        let rendered = render_notice(&notice(Some("GOOD SERVICE"), Some("")));
        assert!(rendered.summary.is_none());
        assert_eq!(rendered.details[0], Segment::text("GOOD SERVICE"));
    }

    #[test]
    fn nothing_at_all() {
        let rendered = render_notice(&RawNotice::default());
        assert!(rendered.summary.is_none());
        assert!(matches!(
            &rendered.details[0],
            Segment::EmptyDetailPlaceholder { text } if text == NO_DETAILS
        ));
        assert!(matches!(
            rendered.details.last(),
            Some(Segment::ExternalLink { url, .. }) if url == TRIP_PLANNER_URL
        ));
    }

    #[test]
    fn fixture_batch_keeps_order() {
        let notices = load_fixture();
        let rendered = render_notices(&notices);
        let ids: Vec<_> = rendered.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4)]);

        let first = &rendered[0];
        let summary = first.summary.as_ref().unwrap();
        assert_eq!(summary[0], Segment::heading("Service change"));
        assert!(summary.contains(&Segment::route("A")));
        assert!(first.details.contains(&Segment::StationLink {
            station_id: 9,
            text: "Main St".into(),
        }));

        // summary-only notice keeps its link in the detail body
        assert!(rendered[1].summary.is_none());
        assert!(rendered[1]
            .details
            .iter()
            .any(|s| matches!(s, Segment::ExternalLink { url, .. } if url == "http://mta.info")));
    }

    #[test]
    fn deserializes_missing_fields() {
        let n: RawNotice = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(n.summary, None);
        assert_eq!(n.details, None);
    }
}
