use std::fs;
use std::path::{Path, PathBuf};

use image_panel_application::{ApplicationError, ImageUploader};
use image_panel_domain::{detect_image_kind, ImageEntry, ImageKind};
use walkdir::WalkDir;

/// Copies picked images into a directory the card can serve from. Picked
/// directories are walked; files that are not images are skipped.
#[derive(Debug, Clone)]
pub struct FsImageUploader {
    upload_dir: PathBuf,
    url_prefix: String,
}

impl FsImageUploader {
    pub fn new(upload_dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    fn collect_images(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>, ApplicationError> {
        let mut images = Vec::new();
        for picked in files {
            if !picked.exists() {
                return Err(ApplicationError::InvalidInput(format!(
                    "picked file does not exist: {}",
                    picked.display()
                )));
            }
            for entry in WalkDir::new(picked)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
            {
                if !entry.file_type().is_file() {
                    continue;
                }
                if detect_image_kind(entry.path()) == ImageKind::Unsupported {
                    log::debug!("skipping non-image {}", entry.path().display());
                    continue;
                }
                images.push(entry.into_path());
            }
        }
        Ok(images)
    }

    fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix.trim_end_matches('/'), file_name)
    }
}

impl ImageUploader for FsImageUploader {
    fn upload(&self, files: &[PathBuf]) -> Result<Vec<ImageEntry>, ApplicationError> {
        let sources = self.collect_images(files)?;
        if sources.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "no supported images among picked files".to_string(),
            ));
        }

        fs::create_dir_all(&self.upload_dir)
            .map_err(|error| ApplicationError::Io(error.to_string()))?;

        let mut entries = Vec::with_capacity(sources.len());
        for source in sources {
            let file_name = unused_name(&self.upload_dir, &file_name_of(&source)?);
            let target = self.upload_dir.join(&file_name);
            fs::copy(&source, &target).map_err(|error| {
                ApplicationError::Io(format!("copy {} failed: {error}", source.display()))
            })?;
            entries.push(ImageEntry::new(self.url_for(&file_name), file_name));
        }
        Ok(entries)
    }
}

fn file_name_of(path: &Path) -> Result<String, ApplicationError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ApplicationError::InvalidInput(format!("unusable file name: {}", path.display()))
        })
}

// Picks `stem-N.ext` when the name is already taken in `dir`.
fn unused_name(dir: &Path, file_name: &str) -> String {
    if !dir.join(file_name).exists() {
        return file_name.to_string();
    }
    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
        _ => (file_name, None),
    };
    let mut counter = 1u32;
    loop {
        let candidate = match extension {
            Some(extension) => format!("{stem}-{counter}.{extension}"),
            None => format!("{stem}-{counter}"),
        };
        if !dir.join(&candidate).exists() {
            log::debug!("{file_name} already uploaded, storing as {candidate}");
            return candidate;
        }
        counter += 1;
    }
}
