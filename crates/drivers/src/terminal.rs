use std::cell::{Cell, RefCell};
use std::io::Write;

use image_panel_adapters::{present_panel, EnglishCatalog};
use image_panel_application::{ApplicationError, DragBinder, PanelSurface, PanelView};

/// Prints every render to a writer and remembers how many rows it showed.
pub struct TerminalSurface<W: Write> {
    out: RefCell<W>,
    rendered_rows: Cell<usize>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            rendered_rows: Cell::new(0),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> PanelSurface for TerminalSurface<W> {
    fn render(&self, view: &PanelView) -> Result<(), ApplicationError> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "----").map_err(|error| ApplicationError::Io(error.to_string()))?;
        for line in present_panel(view, &EnglishCatalog) {
            writeln!(out, "{line}").map_err(|error| ApplicationError::Io(error.to_string()))?;
        }
        out.flush()
            .map_err(|error| ApplicationError::Io(error.to_string()))?;
        self.rendered_rows.set(view.list.row_count());
        Ok(())
    }

    fn rendered_item_count(&self) -> usize {
        self.rendered_rows.get()
    }
}

/// Drag in a terminal is the `move` command; binding only has to be logged.
#[derive(Debug, Default)]
pub struct TerminalDragBinder;

impl DragBinder for TerminalDragBinder {
    fn bind(&self, container_id: &str, handle_selector: &str) -> Result<(), ApplicationError> {
        log::debug!("drag handles {handle_selector} active on #{container_id}");
        Ok(())
    }
}
