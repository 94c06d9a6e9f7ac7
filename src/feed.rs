use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Error;
use crate::pipeline::{transform, Policy, Segment};

const TEXT_DELIMITER: &str = "$$";

/// The legacy weekender page globals, passed explicitly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyFeed {
    /// `statusId,freeText,stationId` records.
    #[serde(default)]
    pub weekendstatus: Vec<String>,
    /// `statusId` → `title$$detail`.
    #[serde(default)]
    pub statustext: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub status_id: String,
    pub free_text: String,
    pub station_id: Option<u32>,
}

impl StatusRecord {
    /// First field is the status id, last is the station id; free text keeps
    /// any commas in between.
    pub fn parse(line: &str) -> Self {
        let (status_id, rest) = line.split_once(',').unwrap_or((line, ""));
        let (free_text, station) = rest.rsplit_once(',').unwrap_or(("", rest));
        StatusRecord {
            status_id: status_id.trim().to_string(),
            free_text: free_text.trim().to_string(),
            station_id: station.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekendNotice {
    pub status_id: String,
    pub title: Vec<Segment>,
    pub details: Vec<Segment>,
}

#[derive(Debug, Clone, Default)]
pub struct WeekendFeed {
    records: Vec<StatusRecord>,
    texts: HashMap<String, String>,
}

impl WeekendFeed {
    pub fn new(records: Vec<StatusRecord>, texts: HashMap<String, String>) -> Self {
        WeekendFeed { records, texts }
    }

    pub fn from_legacy(legacy: LegacyFeed) -> Self {
        let records = legacy
            .weekendstatus
            .iter()
            .map(|line| StatusRecord::parse(line))
            .collect();
        WeekendFeed::new(records, legacy.statustext)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let legacy: LegacyFeed = serde_json::from_str(&raw).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            records = legacy.weekendstatus.len(),
            texts = legacy.statustext.len(),
            "loaded weekend feed"
        );
        Ok(WeekendFeed::from_legacy(legacy))
    }

    pub fn records(&self) -> &[StatusRecord] {
        &self.records
    }

    /// Notices affecting `station_id`, in feed order.
    pub fn notices_for(&self, station_id: u32) -> Vec<WeekendNotice> {
        let mut notices = Vec::new();
        for record in self.records.iter().filter(|r| r.station_id == Some(station_id)) {
            if record.status_id.is_empty() {
                continue;
            }
            let Some(text) = self.texts.get(&record.status_id) else {
                warn!(status_id = %record.status_id, "no status text for record, skipping");
                continue;
            };
            let (title, details) = split_status_text(text);
            notices.push(WeekendNotice {
                status_id: record.status_id.clone(),
                title: transform(title, &Policy::WEEKEND_TITLE),
                details: transform(details, &Policy::WEEKEND_DETAIL),
            });
        }
        notices
    }
}

/// `title$$detail`; a missing delimiter means no detail.
pub fn split_status_text(text: &str) -> (&str, &str) {
    text.split_once(TEXT_DELIMITER).unwrap_or((text, ""))
}
