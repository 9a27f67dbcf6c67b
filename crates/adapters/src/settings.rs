use std::path::{Path, PathBuf};

use image_panel_application::{PanelTimings, DRAG_HANDLE_SELECTOR};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub commit_debounce_ms: u64,
    pub reconcile_settle_ms: u64,
    pub reindex_exit_ms: u64,
    pub upload_dir: PathBuf,
    pub upload_url_prefix: String,
    pub drag_handle_selector: String,
}

impl Default for PanelSettings {
    fn default() -> Self {
        let timings = PanelTimings::default();
        Self {
            commit_debounce_ms: timings.commit_debounce_ms,
            reconcile_settle_ms: timings.reconcile_settle_ms,
            reindex_exit_ms: timings.reindex_exit_ms,
            upload_dir: PathBuf::from("www/images"),
            upload_url_prefix: "/local/images".to_string(),
            drag_handle_selector: DRAG_HANDLE_SELECTOR.to_string(),
        }
    }
}

impl PanelSettings {
    pub fn timings(&self) -> PanelTimings {
        PanelTimings {
            commit_debounce_ms: self.commit_debounce_ms,
            reconcile_settle_ms: self.reconcile_settle_ms,
            reindex_exit_ms: self.reindex_exit_ms,
        }
    }
}

/// Reads settings from TOML. A missing or broken file falls back to the
/// defaults; settings never stop the panel from starting.
pub fn load_settings_file(path: &Path) -> PanelSettings {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(
                "Failed to read settings file {}. Using defaults. error={}",
                path.display(),
                err
            );
            return PanelSettings::default();
        }
    };

    match toml::from_str::<PanelSettings>(&content) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(
                "Failed to parse settings file {}. Using defaults. error={}",
                path.display(),
                err
            );
            PanelSettings::default()
        }
    }
}
