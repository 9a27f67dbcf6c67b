use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ImageEntry, SelectionSet};

/// Card configuration owned by the host. The panel only ever builds new
/// values from it; fields it does not know about are carried through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub images: Vec<ImageEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_image_index: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PanelConfig {
    pub fn with_images(&self, images: Vec<ImageEntry>) -> Self {
        Self {
            images,
            ..self.clone()
        }
    }

    pub fn with_show_image_index(&self, show: bool) -> Self {
        Self {
            show_image_index: Some(show),
            ..self.clone()
        }
    }

    /// Only an explicit `false` hides the index.
    pub fn shows_image_index(&self) -> bool {
        self.show_image_index != Some(false)
    }

    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|image| image.url.as_str())
    }

    /// Images whose url is not in `selection`, in their original order.
    pub fn images_without(&self, selection: &SelectionSet) -> Vec<ImageEntry> {
        self.images
            .iter()
            .filter(|image| !selection.contains(&image.url))
            .cloned()
            .collect()
    }
}
