use crate::input::sanitize::Warning;
use std::time::{Duration, Instant};
use tracing::info;

pub const DEFAULT_WARNING_DURATION_MS: u64 = 3000;

#[derive(Debug, Clone)]
struct ShownWarning {
    warning: Warning,
    expires_at: Instant,
}

/// Holds at most one transient notice. A new notice replaces the old one.
#[derive(Debug, Clone)]
pub struct WarningBanner {
    current: Option<ShownWarning>,
    duration: Duration,
}

impl Default for WarningBanner {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_DURATION_MS)
    }
}

impl WarningBanner {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            current: None,
            duration: Duration::from_millis(duration_ms),
        }
    }

    pub fn show(&mut self, warning: Warning, now: Instant) {
        info!(target: "input", "Warning: {}", warning);
        self.current = Some(ShownWarning {
            warning,
            expires_at: now + self.duration,
        });
    }

    /// The notice still on screen at `now`, if any
    pub fn active(&self, now: Instant) -> Option<&Warning> {
        self.current
            .as_ref()
            .filter(|shown| now < shown.expires_at)
            .map(|shown| &shown.warning)
    }

    /// Drop an expired notice; returns true when something was removed
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.is_some() && self.active(now).is_none() {
            self.current = None;
            return true;
        }
        false
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
