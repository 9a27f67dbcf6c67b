use std::path::{Path, PathBuf};

use image_panel_adapters::{load_settings_file, PanelSettings};

pub const DEFAULT_SETTINGS_PATH: &str = "image-panel.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub config_path: PathBuf,
    pub settings: PanelSettings,
}

impl AppConfig {
    pub fn load(config_path: PathBuf, settings_path: &Path) -> Self {
        Self {
            config_path,
            settings: load_settings_file(settings_path),
        }
    }
}
