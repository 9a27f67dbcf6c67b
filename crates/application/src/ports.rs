use std::path::PathBuf;

use image_panel_domain::{ImageEntry, PanelConfig};

use crate::{ApplicationError, PanelView};

/// The host's single "config changed" channel.
pub trait ConfigSink {
    fn config_changed(&self, config: &PanelConfig) -> Result<(), ApplicationError>;
}

/// Whatever draws the panel. It must be able to tell how many list rows it
/// is actually showing, which can lag behind the configuration.
pub trait PanelSurface {
    fn render(&self, view: &PanelView) -> Result<(), ApplicationError>;

    fn rendered_item_count(&self) -> usize;
}

/// Drag library binding. The host calls back into the panel with the
/// `(old_index, new_index)` pair once a drag ends.
pub trait DragBinder {
    fn bind(&self, container_id: &str, handle_selector: &str) -> Result<(), ApplicationError>;
}

pub trait ImageUploader {
    fn upload(&self, files: &[PathBuf]) -> Result<Vec<ImageEntry>, ApplicationError>;
}

pub trait Localize {
    fn localize(&self, key: &str) -> String;
}

/// Monotonic milliseconds; only differences matter.
pub trait Clock {
    fn now_millis(&self) -> u64;
}
