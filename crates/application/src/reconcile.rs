//! Rendered-count vs configuration-count check run after structural edits.
//!
//! A cycle is: wait for the settle delay, compare counts, and if they
//! differ, hold the list in a placeholder state for the exit delay before
//! handing it back. Leaving that state is the only point where the drag
//! binding must be rebuilt.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePhase {
    Stable,
    Settling { check_at_ms: u64 },
    Reconciling { exit_at_ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileTransition {
    Entered,
    Exited,
}

#[derive(Debug, Clone)]
pub struct Reconciler {
    phase: ReconcilePhase,
    settle_ms: u64,
    exit_ms: u64,
    rerun: bool,
}

impl Reconciler {
    pub fn new(settle_ms: u64, exit_ms: u64) -> Self {
        Self {
            phase: ReconcilePhase::Stable,
            settle_ms,
            exit_ms,
            rerun: false,
        }
    }

    /// Starts a cycle, or queues one behind the cycle already running.
    pub fn request(&mut self, now_ms: u64) {
        match self.phase {
            ReconcilePhase::Stable => {
                self.phase = ReconcilePhase::Settling {
                    check_at_ms: now_ms.saturating_add(self.settle_ms),
                };
            }
            ReconcilePhase::Settling { .. } | ReconcilePhase::Reconciling { .. } => {
                self.rerun = true;
            }
        }
    }

    /// Advances at most one step. Counts are only read when a settle wait
    /// has expired.
    pub fn poll(
        &mut self,
        now_ms: u64,
        rendered_count: usize,
        authoritative_count: usize,
    ) -> Option<ReconcileTransition> {
        match self.phase {
            ReconcilePhase::Settling { check_at_ms } if now_ms >= check_at_ms => {
                if rendered_count != authoritative_count {
                    self.phase = ReconcilePhase::Reconciling {
                        exit_at_ms: now_ms.saturating_add(self.exit_ms),
                    };
                    Some(ReconcileTransition::Entered)
                } else {
                    self.finish_cycle(now_ms);
                    None
                }
            }
            ReconcilePhase::Reconciling { exit_at_ms } if now_ms >= exit_at_ms => {
                self.finish_cycle(now_ms);
                Some(ReconcileTransition::Exited)
            }
            _ => None,
        }
    }

    fn finish_cycle(&mut self, now_ms: u64) {
        self.phase = ReconcilePhase::Stable;
        if std::mem::take(&mut self.rerun) {
            self.request(now_ms);
        }
    }

    pub fn phase(&self) -> ReconcilePhase {
        self.phase
    }

    pub fn is_reindexing(&self) -> bool {
        matches!(self.phase, ReconcilePhase::Reconciling { .. })
    }

    pub fn next_deadline(&self) -> Option<u64> {
        match self.phase {
            ReconcilePhase::Stable => None,
            ReconcilePhase::Settling { check_at_ms } => Some(check_at_ms),
            ReconcilePhase::Reconciling { exit_at_ms } => Some(exit_at_ms),
        }
    }
}
