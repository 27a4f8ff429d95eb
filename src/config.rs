use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::storage::JsonFileStorage;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("daybook")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DaybookConfig {
    /// Where persisted state lives (one JSON file per storage key).
    pub data_dir: PathBuf,
    /// First day of the week for the week view. Sunday unless the user
    /// says otherwise.
    pub week_start: Weekday,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            week_start: Weekday::Sun,
        }
    }
}

impl DaybookConfig {
    /// File-backed storage rooted at the configured data directory.
    pub fn storage(&self) -> JsonFileStorage {
        JsonFileStorage::new(&self.data_dir)
    }
}
