//! Panel state and its transitions. `apply` does no I/O; it returns the
//! effects the controller has to carry out.

use image_panel_domain::{ImageEntry, PanelConfig, SelectionSet};

use crate::drag::{reorder, DragEnd};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// A configuration arrived from the host.
    ConfigReplaced(PanelConfig),
    ToggleSelection { url: String, checked: bool },
    SelectAll,
    DeselectAll,
    /// The bulk button: select-all when nothing is selected, else deselect-all.
    ToggleSelectAll,
    DeleteSelected,
    DragEnded(DragEnd),
    NewImageUrlInput(String),
    AddNewImage,
    TitleInput { index: usize, value: String },
    ShowImageIndex(bool),
    ImagesUploaded(Vec<ImageEntry>),
    UploadFailed,
    ReindexStarted,
    ReindexFinished,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEffect {
    Render,
    ScheduleCommit,
    CommitNow(PanelConfig),
    Reconcile,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    config: Option<PanelConfig>,
    images: Vec<ImageEntry>,
    selection: SelectionSet,
    new_image_url: String,
    reindexing: bool,
    upload_failed: bool,
}

impl PanelState {
    pub fn with_config(config: PanelConfig) -> Self {
        let mut state = Self::default();
        state.apply(PanelAction::ConfigReplaced(config));
        state
    }

    pub fn config(&self) -> Option<&PanelConfig> {
        self.config.as_ref()
    }

    /// The locally cached list the panel renders and reorders.
    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn new_image_url(&self) -> &str {
        &self.new_image_url
    }

    pub fn is_reindexing(&self) -> bool {
        self.reindexing
    }

    pub fn upload_failed(&self) -> bool {
        self.upload_failed
    }

    pub fn authoritative_count(&self) -> usize {
        self.config.as_ref().map_or(0, |config| config.images.len())
    }

    pub fn apply(&mut self, action: PanelAction) -> Vec<PanelEffect> {
        match action {
            PanelAction::ConfigReplaced(config) => {
                self.images = config.images.clone();
                self.config = Some(config);
                vec![PanelEffect::Render]
            }
            PanelAction::ToggleSelection { url, checked } => {
                self.selection.toggle(&url, checked);
                vec![PanelEffect::Render]
            }
            PanelAction::SelectAll => {
                match &self.config {
                    Some(config) => self.selection.select_all(config.image_urls()),
                    None => self.selection.clear(),
                }
                vec![PanelEffect::Render]
            }
            PanelAction::DeselectAll => {
                self.selection.clear();
                vec![PanelEffect::Render]
            }
            PanelAction::ToggleSelectAll => {
                if self.selection.is_empty() {
                    self.apply(PanelAction::SelectAll)
                } else {
                    self.apply(PanelAction::DeselectAll)
                }
            }
            PanelAction::DeleteSelected => self.delete_selected(),
            PanelAction::DragEnded(drag) => self.reorder_cached(drag),
            PanelAction::NewImageUrlInput(text) => {
                self.new_image_url = text;
                vec![PanelEffect::Render]
            }
            PanelAction::AddNewImage => self.add_new_image(),
            PanelAction::TitleInput { index, value } => self.set_title(index, value),
            PanelAction::ShowImageIndex(show) => {
                let Some(config) = &self.config else {
                    return Vec::new();
                };
                let next = config.with_show_image_index(show);
                self.config = Some(next.clone());
                vec![PanelEffect::Render, PanelEffect::CommitNow(next)]
            }
            PanelAction::ImagesUploaded(entries) => {
                self.upload_failed = false;
                let Some(config) = &self.config else {
                    return vec![PanelEffect::Render];
                };
                if entries.is_empty() {
                    return vec![PanelEffect::Render];
                }
                let mut images = config.images.clone();
                images.extend(entries);
                let next = config.with_images(images);
                self.replace_local(next);
                vec![PanelEffect::Render, PanelEffect::ScheduleCommit]
            }
            PanelAction::UploadFailed => {
                self.upload_failed = true;
                vec![PanelEffect::Render]
            }
            PanelAction::ReindexStarted => {
                self.reindexing = true;
                vec![PanelEffect::Render]
            }
            PanelAction::ReindexFinished => {
                self.reindexing = false;
                vec![PanelEffect::Render]
            }
        }
    }

    // The deleted list goes straight to the host and becomes the panel's own
    // copy, so later local edits build on it.
    fn delete_selected(&mut self) -> Vec<PanelEffect> {
        if self.selection.is_empty() {
            log::debug!("delete requested with empty selection");
            return Vec::new();
        }
        let Some(config) = &self.config else {
            return Vec::new();
        };
        let next = config.with_images(config.images_without(&self.selection));
        self.replace_local(next.clone());
        self.selection.clear();
        vec![
            PanelEffect::Render,
            PanelEffect::CommitNow(next),
            PanelEffect::Reconcile,
        ]
    }

    fn reorder_cached(&mut self, drag: DragEnd) -> Vec<PanelEffect> {
        let Some(config) = &self.config else {
            return Vec::new();
        };
        match reorder(&self.images, drag) {
            Ok(Some(images)) => {
                let next = config.with_images(images);
                self.replace_local(next);
                vec![PanelEffect::Render, PanelEffect::ScheduleCommit]
            }
            Ok(None) => Vec::new(),
            Err(error) => {
                log::debug!("ignoring drag end: {error}");
                Vec::new()
            }
        }
    }

    fn add_new_image(&mut self) -> Vec<PanelEffect> {
        let Some(config) = &self.config else {
            return Vec::new();
        };
        let Ok(entry) = ImageEntry::from_url(&self.new_image_url) else {
            log::debug!("add requested without an image url");
            return Vec::new();
        };
        let mut images = config.images.clone();
        images.push(entry);
        let next = config.with_images(images);
        self.replace_local(next);
        self.new_image_url.clear();
        vec![PanelEffect::Render, PanelEffect::ScheduleCommit]
    }

    fn set_title(&mut self, index: usize, value: String) -> Vec<PanelEffect> {
        let Some(config) = &self.config else {
            return Vec::new();
        };
        let mut images = self.images.clone();
        let Some(entry) = images.get_mut(index) else {
            log::debug!("title input for missing row {index}");
            return Vec::new();
        };
        entry.title = value;
        let next = config.with_images(images);
        self.replace_local(next);
        vec![PanelEffect::Render, PanelEffect::ScheduleCommit]
    }

    fn replace_local(&mut self, config: PanelConfig) {
        self.images = config.images.clone();
        self.config = Some(config);
    }
}
