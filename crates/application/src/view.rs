use crate::PanelState;

pub const LABEL_SELECT_ALL: &str = "editor.imagesConfig.selectAll";
pub const LABEL_DESELECT_ALL: &str = "editor.imagesConfig.deselectAll";
pub const LABEL_DELETE_SELECTED: &str = "editor.imagesConfig.deleteSelected";
pub const LABEL_UPLOAD: &str = "ui.components.selectors.image.upload";
pub const LABEL_IMAGE_URL: &str = "ui.components.selectors.image.url";
pub const TOAST_IMAGE_ERROR: &str = "card.common.toastImageError";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRowView {
    pub index: usize,
    pub url: String,
    pub title: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Placeholder shown while the list is being remounted.
    Loading,
    Rows(Vec<ImageRowView>),
}

impl ListView {
    pub fn row_count(&self) -> usize {
        match self {
            Self::Loading => 0,
            Self::Rows(rows) => rows.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectToggle {
    SelectAll,
    DeselectAll,
}

impl SelectToggle {
    pub fn label_key(self) -> &'static str {
        match self {
            Self::SelectAll => LABEL_SELECT_ALL,
            Self::DeselectAll => LABEL_DESELECT_ALL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkBarView {
    pub show_image_index: bool,
    pub select_toggle: SelectToggle,
    pub delete_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddImageView {
    pub pending_url: String,
    pub add_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub list: ListView,
    pub bulk_bar: Option<BulkBarView>,
    pub add_image: AddImageView,
    pub toast: Option<&'static str>,
}

pub fn render_panel(state: &PanelState) -> PanelView {
    let list = if state.is_reindexing() {
        ListView::Loading
    } else {
        ListView::Rows(
            state
                .images()
                .iter()
                .enumerate()
                .map(|(index, image)| ImageRowView {
                    index,
                    url: image.url.clone(),
                    title: image.title.clone(),
                    checked: state.selection().contains(&image.url),
                })
                .collect(),
        )
    };

    let bulk_bar = state
        .config()
        .filter(|config| !config.images.is_empty())
        .map(|config| BulkBarView {
            show_image_index: config.shows_image_index(),
            select_toggle: if state.selection().is_empty() {
                SelectToggle::SelectAll
            } else {
                SelectToggle::DeselectAll
            },
            delete_visible: !state.selection().is_empty(),
        });

    PanelView {
        list,
        bulk_bar,
        add_image: AddImageView {
            pending_url: state.new_image_url().to_string(),
            add_enabled: !state.new_image_url().trim().is_empty(),
        },
        toast: state.upload_failed().then_some(TOAST_IMAGE_ERROR),
    }
}
