use std::fs;
use std::path::Path;

use image_panel_application::ApplicationError;
use image_panel_domain::PanelConfig;

pub fn load_config_file(path: &Path) -> Result<PanelConfig, ApplicationError> {
    let text = fs::read_to_string(path).map_err(|error| {
        ApplicationError::Io(format!("read {} failed: {error}", path.display()))
    })?;
    serde_json::from_str(&text).map_err(|error| {
        ApplicationError::Persistence(format!("parse {} failed: {error}", path.display()))
    })
}

/// Writes through a sibling temp file so a crash never leaves half a file.
pub fn save_config_file(path: &Path, config: &PanelConfig) -> Result<(), ApplicationError> {
    let text = serde_json::to_string_pretty(config)
        .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, text + "\n").map_err(|error| ApplicationError::Io(error.to_string()))?;
    fs::rename(&tmp_path, path).map_err(|error| ApplicationError::Io(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_panel_domain::ImageEntry;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_keeps_host_fields() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("card.json");
        fs::write(
            &path,
            r#"{"type":"custom:vehicle-card","images":[{"url":"a.png","title":"A"}]}"#,
        )
        .expect("write");

        let mut config = load_config_file(&path).expect("load");
        config.images.push(ImageEntry::new("b.png", "B"));
        save_config_file(&path, &config).expect("save");

        let reloaded = load_config_file(&path).expect("reload");
        assert_eq!(reloaded.images.len(), 2);
        assert_eq!(
            reloaded.extra.get("type").and_then(|value| value.as_str()),
            Some("custom:vehicle-card")
        );
        assert!(!dir.path().join("card.json.tmp").exists());
    }

    #[test]
    fn broken_json_is_a_persistence_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("card.json");
        fs::write(&path, "{ images: ").expect("write");
        assert!(matches!(
            load_config_file(&path),
            Err(ApplicationError::Persistence(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().expect("tempdir");
        assert!(matches!(
            load_config_file(&dir.path().join("nope.json")),
            Err(ApplicationError::Io(_))
        ));
    }
}
