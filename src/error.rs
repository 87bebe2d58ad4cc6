use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid page spec `{0}` (expected PATH or GROUP=PATH)")]
    PageSpec(String),
    #[error("group name `{0}` is reserved for catalog metadata")]
    ReservedGroup(String),
    #[error("invalid settings: {0}")]
    Settings(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
