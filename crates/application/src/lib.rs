mod commit;
mod controller;
mod drag;
mod error;
mod ports;
mod reconcile;
mod state;
mod view;

pub use commit::DebouncedCommit;
pub use controller::{PanelController, PanelTimings};
pub use drag::{reorder, DragEnd, DragReorderAdapter, DRAG_HANDLE_SELECTOR, IMAGES_LIST_ID};
pub use error::ApplicationError;
pub use ports::{Clock, ConfigSink, DragBinder, ImageUploader, Localize, PanelSurface};
pub use reconcile::{ReconcilePhase, ReconcileTransition, Reconciler};
pub use state::{PanelAction, PanelEffect, PanelState};
pub use view::{
    render_panel, AddImageView, BulkBarView, ImageRowView, ListView, PanelView, SelectToggle,
    LABEL_DELETE_SELECTED, LABEL_DESELECT_ALL, LABEL_IMAGE_URL, LABEL_SELECT_ALL, LABEL_UPLOAD,
    TOAST_IMAGE_ERROR,
};
