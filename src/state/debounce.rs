use std::time::{Duration, Instant};

/// Quiescence window for search input: 300ms of no keystrokes before the
/// reconcile pass runs.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Cooperative debounce, polled from the event loop.
///
/// Each `bump` cancels any pending deadline and re-arms it; `fire` reports
/// true at most once per arm, when the deadline has passed. No timers or
/// threads — the 200ms event poll is the clock.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// A new keystroke: supersede any pending deadline.
    pub fn bump(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// True exactly once after the window has elapsed with no further bump.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
