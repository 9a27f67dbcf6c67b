use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// One image attached to the card. Two entries with the same `url` are the
/// same entry as far as selection and deletion are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageEntry {
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl ImageEntry {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Entry typed in as a bare url; the url doubles as its title.
    pub fn from_url(url: &str) -> Result<Self, DomainError> {
        if url.trim().is_empty() {
            return Err(DomainError::EmptyImageUrl);
        }
        Ok(Self::new(url, url))
    }
}

/// Moves the entry at `old_index` so that it ends up at `new_index`.
pub fn move_entry(
    images: &[ImageEntry],
    old_index: usize,
    new_index: usize,
) -> Result<Vec<ImageEntry>, DomainError> {
    let len = images.len();
    if old_index >= len {
        return Err(DomainError::IndexOutOfRange {
            index: old_index,
            len,
        });
    }
    if new_index >= len {
        return Err(DomainError::IndexOutOfRange {
            index: new_index,
            len,
        });
    }

    let mut reordered = images.to_vec();
    let moved = reordered.remove(old_index);
    reordered.insert(new_index, moved);
    Ok(reordered)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Raster,
    Vector,
    Unsupported,
}

pub fn detect_image_kind(path: &Path) -> ImageKind {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return ImageKind::Unsupported;
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" => ImageKind::Raster,
        "svg" => ImageKind::Vector,
        _ => ImageKind::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> Vec<ImageEntry> {
        ["A", "B", "C", "D"]
            .iter()
            .map(|url| ImageEntry::new(*url, *url))
            .collect()
    }

    fn urls(images: &[ImageEntry]) -> Vec<&str> {
        images.iter().map(|image| image.url.as_str()).collect()
    }

    #[test]
    fn move_forward_and_backward() {
        let images = abcd();
        let forward = move_entry(&images, 0, 2).expect("in range");
        assert_eq!(urls(&forward), vec!["B", "C", "A", "D"]);

        let backward = move_entry(&images, 3, 0).expect("in range");
        assert_eq!(urls(&backward), vec!["D", "A", "B", "C"]);
    }

    #[test]
    fn move_to_same_index_keeps_list() {
        let images = abcd();
        assert_eq!(move_entry(&images, 1, 1).expect("in range"), images);
    }

    #[test]
    fn move_rejects_out_of_range_index() {
        let images = abcd();
        assert_eq!(
            move_entry(&images, 4, 0),
            Err(DomainError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert!(move_entry(&[], 0, 0).is_err());
    }

    #[test]
    fn from_url_rejects_blank_input() {
        assert_eq!(ImageEntry::from_url("  "), Err(DomainError::EmptyImageUrl));
        let entry = ImageEntry::from_url("http://x/y.png").expect("valid url");
        assert_eq!(entry.title, "http://x/y.png");
    }

    #[test]
    fn image_kind_detection_works() {
        assert_eq!(detect_image_kind(Path::new("a.JPG")), ImageKind::Raster);
        assert_eq!(detect_image_kind(Path::new("a.svg")), ImageKind::Vector);
        assert_eq!(
            detect_image_kind(Path::new("notes.txt")),
            ImageKind::Unsupported
        );
        assert_eq!(detect_image_kind(Path::new("README")), ImageKind::Unsupported);
    }
}
