/// Quiet-period gate in front of the outbound notification. There is at most
/// one pending deadline; scheduling again pushes it back.
#[derive(Debug, Clone)]
pub struct DebouncedCommit {
    delay_ms: u64,
    due_at_ms: Option<u64>,
}

impl DebouncedCommit {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            due_at_ms: None,
        }
    }

    pub fn schedule(&mut self, now_ms: u64) {
        self.due_at_ms = Some(now_ms.saturating_add(self.delay_ms));
    }

    /// Returns true exactly once per quiet period, when it has elapsed.
    pub fn take_due(&mut self, now_ms: u64) -> bool {
        match self.due_at_ms {
            Some(due) if now_ms >= due => {
                self.due_at_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the deadline and reports whether one was pending.
    pub fn take_pending(&mut self) -> bool {
        self.due_at_ms.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.due_at_ms.is_some()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.due_at_ms
    }
}
