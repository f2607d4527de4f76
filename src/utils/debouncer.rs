use std::time::{Duration, Instant};

/// A simple debouncer that tracks when an action should be triggered
/// after a period of inactivity.
///
/// Callers pass the current instant so the event loop and the tests share
/// one notion of time.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// The duration to wait after the last event before triggering
    delay: Duration,
    /// When the last event occurred
    last_event: Option<Instant>,
    /// Whether we have a pending trigger
    pending: bool,
}

impl Debouncer {
    /// Create a new debouncer with the specified delay in milliseconds
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_event: None,
            pending: false,
        }
    }

    /// Register an event at `now`, restarting the quiet window
    pub fn trigger_at(&mut self, now: Instant) {
        self.last_event = Some(now);
        self.pending = true;
    }

    /// True once the quiet period after the last event has elapsed.
    /// Fires at most once per burst of events.
    pub fn should_execute_at(&mut self, now: Instant) -> bool {
        if !self.pending {
            return false;
        }

        if let Some(last) = self.last_event {
            if now.saturating_duration_since(last) >= self.delay {
                self.pending = false;
                self.last_event = None;
                return true;
            }
        }
        false
    }

    /// Get the time remaining before the action will trigger
    /// Returns None if no action is pending
    pub fn time_remaining_at(&self, now: Instant) -> Option<Duration> {
        if !self.pending {
            return None;
        }

        self.last_event
            .map(|last| self.delay.saturating_sub(now.saturating_duration_since(last)))
    }

    /// Reset the debouncer, canceling any pending action
    pub fn reset(&mut self) {
        self.last_event = None;
        self.pending = false;
    }

    /// Check if there's a pending action
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(300);
        debouncer.trigger_at(start);

        assert!(!debouncer.should_execute_at(start + Duration::from_millis(299)));
        assert!(debouncer.should_execute_at(start + Duration::from_millis(300)));
        assert!(!debouncer.should_execute_at(start + Duration::from_millis(900)));
    }

    #[test]
    fn test_retrigger_restarts_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(300);
        debouncer.trigger_at(start);
        debouncer.trigger_at(start + Duration::from_millis(200));

        assert!(!debouncer.should_execute_at(start + Duration::from_millis(400)));
        assert_eq!(
            debouncer.time_remaining_at(start + Duration::from_millis(400)),
            Some(Duration::from_millis(100))
        );
        assert!(debouncer.should_execute_at(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_reset_cancels_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(300);
        debouncer.trigger_at(start);
        debouncer.reset();

        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.time_remaining_at(start), None);
        assert!(!debouncer.should_execute_at(start + Duration::from_secs(1)));
    }
}
