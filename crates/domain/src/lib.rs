mod config;
mod error;
mod image;
mod selection;

pub use config::PanelConfig;
pub use error::DomainError;
pub use image::{detect_image_kind, move_entry, ImageEntry, ImageKind};
pub use selection::SelectionSet;
