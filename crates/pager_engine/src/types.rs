use std::io;
use std::path::PathBuf;

use pager_core::{FindOutcome, QueryId};

/// One completion delivered by a running query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion<T> {
    pub query_id: QueryId,
    pub outcome: FindOutcome<T>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to start query runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to read settings from {path:?}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] ron::error::SpannedError),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
