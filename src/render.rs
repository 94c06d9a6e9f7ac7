use itertools::Itertools;

use crate::notice::RenderedNotice;
use crate::pipeline::Segment;
use crate::station::{
    StationPage, StatusView, NO_SCHEDULED_WORK, PANEL_HEADING, SELECT_INSTRUCTION,
};

/// Terminal rendering of a segment sequence.
pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(segment_text).join("")
}

fn segment_text(segment: &Segment) -> String {
    match segment {
        Segment::Heading { text } => format!("{text}\n"),
        Segment::LineBreak => "\n".to_string(),
        Segment::Text { text } => text.clone(),
        Segment::RouteIcon { line } => format!("[{line}]"),
        Segment::AccessibilityIcon => "[ISA]".to_string(),
        Segment::BusIcon => "[BUS]".to_string(),
        Segment::ExternalLink { url, text } => format!("{text} <{url}>"),
        Segment::StationLink { station_id, text } => format!("{text} (station {station_id})"),
        Segment::EmptyDetailPlaceholder { text } => text.clone(),
    }
}

pub fn notice_text(notice: &RenderedNotice) -> String {
    let mut out = String::new();
    if let Some(id) = notice.id {
        out.push_str(&format!("#{id}\n"));
    }
    if let Some(summary) = &notice.summary {
        out.push_str(plain_text(summary).trim_end());
        out.push('\n');
    }
    out.push_str(plain_text(&notice.details).trim_end());
    out.push('\n');
    out
}

pub fn station_text(page: &StationPage) -> String {
    let mut out = format!(
        "{} {}\n\n{PANEL_HEADING}",
        page.station.label,
        page.station.lines.iter().map(|l| format!("[{l}]")).join("")
    );
    match &page.view {
        StatusView::NoScheduledWork => {
            out.push_str(&format!("\n{NO_SCHEDULED_WORK}\n"));
        }
        StatusView::Single(notice) => {
            out.push_str(&format!(
                "\n{}\n\n{}\n",
                plain_text(&notice.title).trim_end(),
                plain_text(&notice.details).trim_end()
            ));
        }
        StatusView::Multiple(notices) => {
            out.push_str(&format!(" ({SELECT_INSTRUCTION})\n"));
            for notice in notices {
                let title = plain_text(&notice.title).replace('\n', " ");
                out.push_str(&format!("- {}\n", title.trim_end()));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::Station;

    #[test]
    fn segments_to_text() {
        let segs = vec![
            Segment::heading("Delays"),
            Segment::route("A"),
            Segment::text(" trains, see "),
            Segment::StationLink {
                station_id: 9,
                text: "Main St".into(),
            },
            Segment::LineBreak,
            Segment::AccessibilityIcon,
            Segment::BusIcon,
            Segment::ExternalLink {
                url: "http://mta.info".into(),
                text: "info".into(),
            },
        ];
        assert_eq!(
            plain_text(&segs),
            "Delays\n[A] trains, see Main St (station 9)\n[ISA][BUS]info <http://mta.info>"
        );
    }

    #[test]
    fn empty_station_panel() {
        let page = StationPage {
            station: Station {
                id: 9,
                label: "Main St".into(),
                lines: vec!["7".into()],
            },
            view: StatusView::NoScheduledWork,
        };
        assert_eq!(
            station_text(&page),
            format!("Main St [7]\n\n{PANEL_HEADING}\n{NO_SCHEDULED_WORK}\n")
        );
    }
}
