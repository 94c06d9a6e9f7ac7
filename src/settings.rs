use std::path::PathBuf;

use config::{Config, Environment, File};
use notice_render::Error;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// `notice_render.toml` (optional) overlaid with `NOTICE_*` environment
/// variables. Command-line flags win over both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub feed: Option<PathBuf>,
    #[serde(default)]
    pub stations: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Result<Self, Error> {
        let settings = Config::builder()
            .add_source(File::with_name("notice_render").required(false))
            .add_source(Environment::with_prefix("NOTICE"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
