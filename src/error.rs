use std::path::PathBuf;

/// Failures at the edges of the crate. The text pipeline itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("station {0} not found")]
    UnknownStation(u32),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
