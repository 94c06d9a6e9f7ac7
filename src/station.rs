use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::feed::{WeekendFeed, WeekendNotice};

pub const PANEL_HEADING: &str = "Weekend Service Notice";
pub const SELECT_INSTRUCTION: &str = "Select one for details";
pub const NO_SCHEDULED_WORK: &str = "No scheduled work affecting service at this station.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Station {
    pub id: u32,
    pub label: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

/// Read-only station reference data.
pub trait StationLookup {
    fn station(&self, id: u32) -> Option<&Station>;
}

#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: HashMap<u32, Station>,
}

impl StationDirectory {
    pub fn new(stations: impl IntoIterator<Item = Station>) -> Self {
        StationDirectory {
            stations: stations.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stations: Vec<Station> = serde_json::from_str(&raw).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(StationDirectory::new(stations))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl StationLookup for StationDirectory {
    fn station(&self, id: u32) -> Option<&Station> {
        self.stations.get(&id)
    }
}

/// Weekend panel layout: one notice shows title and detail together, several
/// show titles only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "notices", rename_all = "snake_case")]
pub enum StatusView {
    NoScheduledWork,
    Single(WeekendNotice),
    Multiple(Vec<WeekendNotice>),
}

impl StatusView {
    pub fn from_notices(mut notices: Vec<WeekendNotice>) -> Self {
        match notices.len() {
            0 => StatusView::NoScheduledWork,
            1 => StatusView::Single(notices.remove(0)),
            _ => StatusView::Multiple(notices),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationPage {
    pub station: Station,
    pub view: StatusView,
}

/// Station page data. An id missing from the lookup is the one fatal case.
pub fn station_page(
    lookup: &impl StationLookup,
    feed: &WeekendFeed,
    id: u32,
) -> Result<StationPage, Error> {
    let station = lookup.station(id).ok_or(Error::UnknownStation(id))?.clone();
    let view = StatusView::from_notices(feed.notices_for(id));
    Ok(StationPage { station, view })
}
