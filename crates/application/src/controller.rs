use std::path::PathBuf;

use image_panel_domain::PanelConfig;

use crate::commit::DebouncedCommit;
use crate::drag::{DragEnd, DragReorderAdapter};
use crate::reconcile::{ReconcileTransition, Reconciler};
use crate::view::{render_panel, PanelView};
use crate::{
    ApplicationError, Clock, ConfigSink, DragBinder, ImageUploader, PanelAction, PanelEffect,
    PanelState, PanelSurface,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTimings {
    pub commit_debounce_ms: u64,
    pub reconcile_settle_ms: u64,
    pub reindex_exit_ms: u64,
}

impl Default for PanelTimings {
    fn default() -> Self {
        Self {
            commit_debounce_ms: 300,
            reconcile_settle_ms: 200,
            reindex_exit_ms: 300,
        }
    }
}

/// Runs the image panel against a host-owned configuration. Every timer is
/// a deadline on the injected clock; the host event loop drives them by
/// calling [`PanelController::tick`].
pub struct PanelController {
    state: PanelState,
    commit: DebouncedCommit,
    reconciler: Reconciler,
    drag: DragReorderAdapter,
    sink: Box<dyn ConfigSink>,
    surface: Box<dyn PanelSurface>,
    binder: Box<dyn DragBinder>,
    uploader: Box<dyn ImageUploader>,
    clock: Box<dyn Clock>,
}

impl PanelController {
    pub fn new(
        sink: Box<dyn ConfigSink>,
        surface: Box<dyn PanelSurface>,
        binder: Box<dyn DragBinder>,
        uploader: Box<dyn ImageUploader>,
        clock: Box<dyn Clock>,
        timings: PanelTimings,
    ) -> Self {
        Self {
            state: PanelState::default(),
            commit: DebouncedCommit::new(timings.commit_debounce_ms),
            reconciler: Reconciler::new(timings.reconcile_settle_ms, timings.reindex_exit_ms),
            drag: DragReorderAdapter::default(),
            sink,
            surface,
            binder,
            uploader,
            clock,
        }
    }

    pub fn with_drag_adapter(mut self, drag: DragReorderAdapter) -> Self {
        self.drag = drag;
        self
    }

    /// First render plus the initial drag binding.
    pub fn mount(&mut self) -> Result<(), ApplicationError> {
        self.refresh()?;
        self.drag.bind(self.binder.as_ref())
    }

    /// Renders the current state again without changing it.
    pub fn refresh(&self) -> Result<(), ApplicationError> {
        self.surface.render(&self.view())
    }

    /// Inbound property: the host's current configuration. Never echoed back.
    pub fn set_config(&mut self, config: PanelConfig) -> Result<(), ApplicationError> {
        self.dispatch(PanelAction::ConfigReplaced(config))
    }

    pub fn dispatch(&mut self, action: PanelAction) -> Result<(), ApplicationError> {
        let effects = self.state.apply(action);
        self.run_effects(effects)
    }

    pub fn on_drag_end(
        &mut self,
        old_index: usize,
        new_index: usize,
    ) -> Result<(), ApplicationError> {
        self.dispatch(PanelAction::DragEnded(DragEnd {
            old_index,
            new_index,
        }))
    }

    /// Hands picked files to the uploader. A failed upload only raises the
    /// toast; the panel keeps its list.
    pub fn pick_files(&mut self, files: &[PathBuf]) -> Result<(), ApplicationError> {
        if files.is_empty() {
            return Ok(());
        }
        match self.uploader.upload(files) {
            Ok(entries) => {
                log::info!("uploaded {} image(s)", entries.len());
                self.dispatch(PanelAction::ImagesUploaded(entries))
            }
            Err(error) => {
                log::warn!("image upload failed: {error}");
                self.dispatch(PanelAction::UploadFailed)
            }
        }
    }

    /// Fires whatever timers are due at the clock's current time.
    pub fn tick(&mut self) -> Result<(), ApplicationError> {
        let now = self.clock.now_millis();
        if self.commit.take_due(now) {
            self.send_current()?;
        }

        loop {
            let rendered = self.surface.rendered_item_count();
            let authoritative = self.state.authoritative_count();
            match self.reconciler.poll(now, rendered, authoritative) {
                Some(ReconcileTransition::Entered) => {
                    log::info!(
                        "reindexing images: {rendered} rendered, {authoritative} configured"
                    );
                    self.dispatch(PanelAction::ReindexStarted)?;
                }
                Some(ReconcileTransition::Exited) => {
                    self.dispatch(PanelAction::ReindexFinished)?;
                    self.drag.bind(self.binder.as_ref())?;
                }
                None => break,
            }
        }
        Ok(())
    }

    /// Sends a pending debounced commit right away, e.g. before shutdown.
    pub fn flush(&mut self) -> Result<(), ApplicationError> {
        if self.commit.take_pending() {
            self.send_current()?;
        }
        Ok(())
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.commit.next_deadline(), self.reconciler.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn view(&self) -> PanelView {
        render_panel(&self.state)
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn drag_bindings(&self) -> u64 {
        self.drag.bindings()
    }

    fn run_effects(&mut self, effects: Vec<PanelEffect>) -> Result<(), ApplicationError> {
        let now = self.clock.now_millis();
        for effect in effects {
            match effect {
                PanelEffect::Render => self.surface.render(&render_panel(&self.state))?,
                PanelEffect::ScheduleCommit => self.commit.schedule(now),
                PanelEffect::CommitNow(config) => {
                    // The immediate config already carries any pending local edit.
                    if self.commit.take_pending() {
                        log::debug!("immediate commit supersedes pending debounce");
                    }
                    log::info!("committing {} image(s) immediately", config.images.len());
                    self.sink.config_changed(&config)?;
                }
                PanelEffect::Reconcile => self.reconciler.request(now),
            }
        }
        Ok(())
    }

    fn send_current(&self) -> Result<(), ApplicationError> {
        let Some(config) = self.state.config() else {
            return Ok(());
        };
        log::info!("committing {} image(s)", config.images.len());
        self.sink.config_changed(config)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use image_panel_domain::ImageEntry;

    use super::*;
    use crate::view::{ListView, TOAST_IMAGE_ERROR};

    #[derive(Default, Clone)]
    struct FakeSink {
        sent: Rc<RefCell<Vec<PanelConfig>>>,
    }

    impl ConfigSink for FakeSink {
        fn config_changed(&self, config: &PanelConfig) -> Result<(), ApplicationError> {
            self.sent.borrow_mut().push(config.clone());
            Ok(())
        }
    }

    /// Reports the rows of the last view, unless told to lag behind.
    #[derive(Default, Clone)]
    struct FakeSurface {
        views: Rc<RefCell<Vec<PanelView>>>,
        stale_count: Rc<Cell<Option<usize>>>,
    }

    impl PanelSurface for FakeSurface {
        fn render(&self, view: &PanelView) -> Result<(), ApplicationError> {
            self.views.borrow_mut().push(view.clone());
            Ok(())
        }

        fn rendered_item_count(&self) -> usize {
            if let Some(count) = self.stale_count.get() {
                return count;
            }
            self.views
                .borrow()
                .last()
                .map_or(0, |view| view.list.row_count())
        }
    }

    #[derive(Default, Clone)]
    struct FakeBinder {
        binds: Rc<Cell<u32>>,
    }

    impl DragBinder for FakeBinder {
        fn bind(&self, _: &str, _: &str) -> Result<(), ApplicationError> {
            self.binds.set(self.binds.get() + 1);
            Ok(())
        }
    }

    struct FakeUploader {
        entries: Option<Vec<ImageEntry>>,
    }

    impl ImageUploader for FakeUploader {
        fn upload(&self, _files: &[PathBuf]) -> Result<Vec<ImageEntry>, ApplicationError> {
            self.entries
                .clone()
                .ok_or_else(|| ApplicationError::Io("disk full".to_string()))
        }
    }

    #[derive(Default, Clone)]
    struct FakeClock {
        now: Rc<Cell<u64>>,
    }

    impl Clock for FakeClock {
        fn now_millis(&self) -> u64 {
            self.now.get()
        }
    }

    struct Harness {
        controller: PanelController,
        sink: FakeSink,
        surface: FakeSurface,
        binder: FakeBinder,
        clock: FakeClock,
    }

    impl Harness {
        fn new(urls: &[&str]) -> Self {
            Self::with_uploader(urls, None)
        }

        fn with_uploader(urls: &[&str], uploaded: Option<Vec<ImageEntry>>) -> Self {
            let sink = FakeSink::default();
            let surface = FakeSurface::default();
            let binder = FakeBinder::default();
            let clock = FakeClock::default();
            let mut controller = PanelController::new(
                Box::new(sink.clone()),
                Box::new(surface.clone()),
                Box::new(binder.clone()),
                Box::new(FakeUploader { entries: uploaded }),
                Box::new(clock.clone()),
                PanelTimings::default(),
            );
            controller.mount().expect("mount");
            controller.set_config(config_of(urls)).expect("set config");
            Self {
                controller,
                sink,
                surface,
                binder,
                clock,
            }
        }

        fn advance_to(&mut self, now: u64) {
            self.clock.now.set(now);
            self.controller.tick().expect("tick");
        }

        fn sent(&self) -> Vec<PanelConfig> {
            self.sink.sent.borrow().clone()
        }

        fn select(&mut self, url: &str) {
            self.controller
                .dispatch(PanelAction::ToggleSelection {
                    url: url.to_string(),
                    checked: true,
                })
                .expect("select");
        }

        /// What a host does with an outbound configuration: store it and
        /// hand it back.
        fn echo_last(&mut self) {
            let last = self.sent().last().cloned().expect("something was sent");
            self.controller.set_config(last).expect("set config");
        }
    }

    fn config_of(urls: &[&str]) -> PanelConfig {
        PanelConfig {
            images: urls.iter().map(|url| ImageEntry::new(*url, *url)).collect(),
            ..PanelConfig::default()
        }
    }

    fn urls(config: &PanelConfig) -> Vec<&str> {
        config.images.iter().map(|image| image.url.as_str()).collect()
    }

    #[test]
    fn mount_renders_and_binds_once() {
        let harness = Harness::new(&["A"]);
        assert_eq!(harness.binder.binds.get(), 1);
        assert_eq!(harness.controller.drag_bindings(), 1);
        assert!(!harness.surface.views.borrow().is_empty());
    }

    #[test]
    fn rapid_reorders_collapse_into_one_commit() {
        let mut harness = Harness::new(&["A", "B", "C", "D"]);
        for step in 0..5_u64 {
            harness.clock.now.set(step * 50);
            harness.controller.on_drag_end(0, 3).expect("drag");
            harness.controller.tick().expect("tick");
        }
        assert!(harness.sent().is_empty());

        harness.advance_to(499);
        assert!(harness.sent().is_empty());
        harness.advance_to(500);
        harness.advance_to(5_000);

        let sent = harness.sent();
        assert_eq!(sent.len(), 1);
        // Five rotations of four entries: one full turn plus one.
        assert_eq!(urls(&sent[0]), vec!["B", "C", "D", "A"]);
    }

    #[test]
    fn same_index_drag_sends_nothing() {
        let mut harness = Harness::new(&["A", "B", "C"]);
        let before = harness.controller.state().clone();
        harness.controller.on_drag_end(2, 2).expect("drag");
        harness.advance_to(10_000);
        assert!(harness.sent().is_empty());
        assert_eq!(harness.controller.state(), &before);
    }

    #[test]
    fn incoming_config_is_never_echoed() {
        let mut harness = Harness::new(&["A"]);
        harness.controller.set_config(config_of(&["A", "B"])).expect("set");
        harness.controller.set_config(config_of(&["B"])).expect("set");
        harness.advance_to(10_000);
        assert!(harness.sent().is_empty());
        assert_eq!(harness.controller.state().images().len(), 1);
    }

    #[test]
    fn delete_commits_without_waiting() {
        let mut harness = Harness::new(&["A", "B", "C", "D"]);
        harness.select("A");
        harness.select("C");
        harness.controller.dispatch(PanelAction::DeleteSelected).expect("delete");

        let sent = harness.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(urls(&sent[0]), vec!["B", "D"]);
        assert!(harness.controller.state().selection().is_empty());

        harness.echo_last();
        harness.advance_to(200);
        assert!(!harness.controller.state().is_reindexing());
        harness.advance_to(1_000);
        assert_eq!(harness.binder.binds.get(), 1, "counts matched, no remount");
        assert_eq!(harness.sent().len(), 1);
    }

    #[test]
    fn delete_cancels_pending_reorder_commit() {
        let mut harness = Harness::new(&["A", "B", "C"]);
        harness.controller.on_drag_end(0, 2).expect("drag");
        harness.select("A");
        harness.controller.dispatch(PanelAction::DeleteSelected).expect("delete");

        harness.advance_to(300);
        harness.advance_to(10_000);
        let sent = harness.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(urls(&sent[0]), vec!["B", "C"]);
    }

    #[test]
    fn drag_before_host_reply_keeps_deleted_entries_out() {
        let mut harness = Harness::new(&["A", "B", "C", "D"]);
        harness.select("B");
        harness.controller.dispatch(PanelAction::DeleteSelected).expect("delete");
        harness.controller.on_drag_end(2, 0).expect("drag");

        harness.advance_to(300);
        let sent = harness.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(urls(&sent[1]), vec!["D", "A", "C"]);
    }

    #[test]
    fn delete_with_nothing_selected_is_silent() {
        let mut harness = Harness::new(&["A"]);
        harness.controller.dispatch(PanelAction::DeleteSelected).expect("delete");
        harness.advance_to(10_000);
        assert!(harness.sent().is_empty());
        assert_eq!(harness.controller.next_deadline(), None);
    }

    #[test]
    fn count_mismatch_remounts_and_rebinds_once() {
        let mut harness = Harness::new(&["A", "B", "C", "D"]);
        harness.select("B");
        harness.controller.dispatch(PanelAction::DeleteSelected).expect("delete");
        harness.surface.stale_count.set(Some(4));
        harness.echo_last();

        harness.advance_to(199);
        assert!(!harness.controller.state().is_reindexing());

        harness.advance_to(200);
        assert!(harness.controller.state().is_reindexing());
        assert_eq!(harness.controller.view().list, ListView::Loading);
        harness.surface.stale_count.set(None);

        harness.advance_to(499);
        assert!(harness.controller.state().is_reindexing());
        harness.advance_to(500);
        assert!(!harness.controller.state().is_reindexing());
        assert_eq!(harness.binder.binds.get(), 2);

        let last_view = harness
            .surface
            .views
            .borrow()
            .last()
            .cloned()
            .expect("rendered");
        assert_eq!(last_view.list.row_count(), 3);

        harness.advance_to(10_000);
        assert_eq!(harness.binder.binds.get(), 2);
    }

    #[test]
    fn each_cycle_rebinds_exactly_once() {
        let mut harness = Harness::new(&["A", "B", "C"]);
        let mut now = 0;
        for (cycle, url) in ["A", "B"].into_iter().enumerate() {
            harness.select(url);
            harness.controller.dispatch(PanelAction::DeleteSelected).expect("delete");
            harness.surface.stale_count.set(Some(99));
            harness.echo_last();
            now += 200;
            harness.advance_to(now);
            harness.surface.stale_count.set(None);
            now += 300;
            harness.advance_to(now);
            now += 1_000;
            harness.advance_to(now);
            assert_eq!(harness.binder.binds.get(), 2 + cycle as u32);
        }
    }

    #[test]
    fn delete_during_reindex_queues_another_pass() {
        let mut harness = Harness::new(&["A", "B", "C"]);
        harness.select("A");
        harness.controller.dispatch(PanelAction::DeleteSelected).expect("delete");
        harness.surface.stale_count.set(Some(3));
        harness.echo_last();
        harness.advance_to(200);
        assert!(harness.controller.state().is_reindexing());

        harness.select("B");
        harness.controller.dispatch(PanelAction::DeleteSelected).expect("delete");
        harness.echo_last();

        // Still lagging when the first cycle exits: the queued pass remounts again.
        harness.advance_to(500);
        assert_eq!(harness.binder.binds.get(), 2);
        harness.advance_to(700);
        assert!(harness.controller.state().is_reindexing());
        harness.surface.stale_count.set(None);
        harness.advance_to(1_000);
        assert!(!harness.controller.state().is_reindexing());
        assert_eq!(harness.binder.binds.get(), 3);
        assert_eq!(urls(&harness.sent()[1]), vec!["C"]);
    }

    #[test]
    fn add_new_image_goes_through_debounce() {
        let mut harness = Harness::new(&["A"]);
        harness
            .controller
            .dispatch(PanelAction::NewImageUrlInput("http://x/y.png".to_string()))
            .expect("input");
        harness.controller.dispatch(PanelAction::AddNewImage).expect("add");
        assert_eq!(harness.controller.state().new_image_url(), "");
        assert!(harness.sent().is_empty());

        harness.advance_to(300);
        let sent = harness.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].images.last(),
            Some(&ImageEntry::new("http://x/y.png", "http://x/y.png"))
        );
    }

    #[test]
    fn show_image_index_toggle_is_immediate() {
        let mut harness = Harness::new(&["A"]);
        harness
            .controller
            .dispatch(PanelAction::ShowImageIndex(false))
            .expect("toggle");
        assert_eq!(harness.sent().len(), 1);
        assert_eq!(harness.sent()[0].show_image_index, Some(false));
    }

    #[test]
    fn failed_upload_shows_toast_without_commit() {
        let mut harness = Harness::new(&["A"]);
        harness
            .controller
            .pick_files(&[PathBuf::from("/tmp/a.png")])
            .expect("pick");
        assert_eq!(harness.controller.view().toast, Some(TOAST_IMAGE_ERROR));
        harness.advance_to(10_000);
        assert!(harness.sent().is_empty());
    }

    #[test]
    fn uploaded_images_are_appended_and_committed() {
        let mut harness = Harness::with_uploader(
            &["A"],
            Some(vec![ImageEntry::new("/local/b.png", "b.png")]),
        );
        harness
            .controller
            .pick_files(&[PathBuf::from("/tmp/b.png")])
            .expect("pick");
        harness.advance_to(300);
        assert_eq!(urls(&harness.sent()[0]), vec!["A", "/local/b.png"]);
    }

    #[test]
    fn flush_sends_pending_commit_immediately() {
        let mut harness = Harness::new(&["A", "B"]);
        harness.controller.on_drag_end(0, 1).expect("drag");
        harness.controller.flush().expect("flush");
        assert_eq!(urls(&harness.sent()[0]), vec!["B", "A"]);
        harness.advance_to(10_000);
        assert_eq!(harness.sent().len(), 1);
    }

    #[test]
    fn next_deadline_tracks_earliest_timer() {
        let mut harness = Harness::new(&["A", "B"]);
        harness.clock.now.set(100);
        harness.controller.on_drag_end(0, 1).expect("drag");
        assert_eq!(harness.controller.next_deadline(), Some(400));
        harness.select("A");
        harness.controller.dispatch(PanelAction::DeleteSelected).expect("delete");
        assert_eq!(harness.controller.next_deadline(), Some(300));
    }
}
