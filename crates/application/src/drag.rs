use image_panel_domain::{move_entry, DomainError, ImageEntry};

use crate::{ApplicationError, DragBinder};

pub const IMAGES_LIST_ID: &str = "images-list";
pub const DRAG_HANDLE_SELECTOR: &str = ".handle";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub old_index: usize,
    pub new_index: usize,
}

/// Keeps the drag library attached to the rendered list container. The
/// container is rebuilt on every remount, so binding is repeated then.
#[derive(Debug, Clone)]
pub struct DragReorderAdapter {
    container_id: String,
    handle_selector: String,
    bindings: u64,
}

impl Default for DragReorderAdapter {
    fn default() -> Self {
        Self::new(IMAGES_LIST_ID, DRAG_HANDLE_SELECTOR)
    }
}

impl DragReorderAdapter {
    pub fn new(container_id: impl Into<String>, handle_selector: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            handle_selector: handle_selector.into(),
            bindings: 0,
        }
    }

    pub fn bind(&mut self, binder: &dyn DragBinder) -> Result<(), ApplicationError> {
        binder.bind(&self.container_id, &self.handle_selector)?;
        self.bindings += 1;
        log::debug!(
            "drag binding #{} attached to #{}",
            self.bindings,
            self.container_id
        );
        Ok(())
    }

    pub fn bindings(&self) -> u64 {
        self.bindings
    }
}

/// New order for a finished drag, or `None` when nothing moved.
pub fn reorder(
    images: &[ImageEntry],
    drag: DragEnd,
) -> Result<Option<Vec<ImageEntry>>, DomainError> {
    if drag.old_index == drag.new_index {
        return Ok(None);
    }
    move_entry(images, drag.old_index, drag.new_index).map(Some)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingBinder {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl DragBinder for RecordingBinder {
        fn bind(&self, container_id: &str, handle_selector: &str) -> Result<(), ApplicationError> {
            self.calls
                .borrow_mut()
                .push((container_id.to_string(), handle_selector.to_string()));
            Ok(())
        }
    }

    struct FailingBinder;

    impl DragBinder for FailingBinder {
        fn bind(&self, _: &str, _: &str) -> Result<(), ApplicationError> {
            Err(ApplicationError::Host("container missing".to_string()))
        }
    }

    #[test]
    fn bind_uses_container_and_handle() {
        let binder = RecordingBinder::default();
        let mut adapter = DragReorderAdapter::default();
        adapter.bind(&binder).expect("bind");
        assert_eq!(adapter.bindings(), 1);
        assert_eq!(
            binder.calls.borrow().as_slice(),
            &[("images-list".to_string(), ".handle".to_string())]
        );
    }

    #[test]
    fn failed_bind_is_not_counted() {
        let mut adapter = DragReorderAdapter::default();
        assert!(adapter.bind(&FailingBinder).is_err());
        assert_eq!(adapter.bindings(), 0);
    }

    #[test]
    fn equal_indices_do_not_reorder() {
        let images = vec![ImageEntry::new("a", "a"), ImageEntry::new("b", "b")];
        let result = reorder(
            &images,
            DragEnd {
                old_index: 1,
                new_index: 1,
            },
        );
        assert_eq!(result, Ok(None));
    }
}
