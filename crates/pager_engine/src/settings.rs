use std::fs;
use std::path::Path;

use pager_core::{PagingConfig, DEFAULT_OBJECTS_PER_PAGE};
use serde::Deserialize;

use crate::LoaderError;

/// Largest page a settings file may ask for.
pub const MAX_OBJECTS_PER_PAGE: usize = 10_000;

/// Loader configuration. Every field is optional in the RON source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    pub objects_per_page: usize,
    pub pagination_enabled: bool,
    /// Worker threads of the query runtime; tokio's default when unset.
    pub worker_threads: Option<usize>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            objects_per_page: DEFAULT_OBJECTS_PER_PAGE,
            pagination_enabled: true,
            worker_threads: None,
        }
    }
}

impl LoaderSettings {
    pub fn from_ron_str(text: &str) -> Result<Self, LoaderError> {
        let settings: LoaderSettings = ron::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, LoaderError> {
        let text = fs::read_to_string(path).map_err(|source| LoaderError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    pub fn validate(&self) -> Result<(), LoaderError> {
        if self.worker_threads == Some(0) {
            return Err(LoaderError::InvalidSettings(
                "worker_threads must be at least 1".to_string(),
            ));
        }
        if self.pagination_enabled && self.objects_per_page == 0 {
            return Err(LoaderError::InvalidSettings(
                "objects_per_page must be at least 1 while pagination is enabled".to_string(),
            ));
        }
        if self.objects_per_page > MAX_OBJECTS_PER_PAGE {
            return Err(LoaderError::InvalidSettings(format!(
                "objects_per_page must not exceed {MAX_OBJECTS_PER_PAGE}"
            )));
        }
        Ok(())
    }

    pub fn paging(&self) -> PagingConfig {
        PagingConfig {
            objects_per_page: self.objects_per_page,
            pagination_enabled: self.pagination_enabled,
        }
    }
}
