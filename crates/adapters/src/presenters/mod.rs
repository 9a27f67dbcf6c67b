use image_panel_application::{
    ListView, Localize, PanelView, LABEL_DELETE_SELECTED, LABEL_DESELECT_ALL, LABEL_IMAGE_URL,
    LABEL_SELECT_ALL, LABEL_UPLOAD, TOAST_IMAGE_ERROR,
};

/// Built-in strings for the keys the panel uses; unknown keys echo back.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishCatalog;

impl Localize for EnglishCatalog {
    fn localize(&self, key: &str) -> String {
        let text = match key {
            LABEL_SELECT_ALL => "Select all",
            LABEL_DESELECT_ALL => "Deselect all",
            LABEL_DELETE_SELECTED => "Delete selected",
            LABEL_UPLOAD => "Upload",
            LABEL_IMAGE_URL => "Image URL",
            TOAST_IMAGE_ERROR => "Image upload failed",
            other => other,
        };
        text.to_string()
    }
}

pub fn present_panel(view: &PanelView, localize: &dyn Localize) -> Vec<String> {
    let mut lines = Vec::new();

    match &view.list {
        ListView::Loading => lines.push("Loading...".to_string()),
        ListView::Rows(rows) if rows.is_empty() => lines.push("(no images)".to_string()),
        ListView::Rows(rows) => {
            for row in rows {
                lines.push(format!(
                    "{:>3} ≡ [{}] {}{}",
                    row.index,
                    if row.checked { "x" } else { " " },
                    row.title,
                    if row.title == row.url {
                        String::new()
                    } else {
                        format!("  <{}>", row.url)
                    }
                ));
            }
        }
    }

    if let Some(bulk) = &view.bulk_bar {
        let mut bar = format!(
            "[{}] Show Image Index | {}",
            if bulk.show_image_index { "x" } else { " " },
            localize.localize(bulk.select_toggle.label_key())
        );
        if bulk.delete_visible {
            bar.push_str(" | ");
            bar.push_str(&localize.localize(LABEL_DELETE_SELECTED));
        }
        lines.push(bar);
    }

    lines.push(format!(
        "{} | {}: {}{}",
        localize.localize(LABEL_UPLOAD),
        localize.localize(LABEL_IMAGE_URL),
        view.add_image.pending_url,
        if view.add_image.add_enabled { " [+]" } else { "" }
    ));

    if let Some(toast) = view.toast {
        lines.push(format!("! {}", localize.localize(toast)));
    }
    lines
}
