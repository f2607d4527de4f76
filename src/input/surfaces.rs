//! The two mirrored search fields (desktop and mobile) and the debounce
//! that decides when an edit becomes a filter pass.

use crate::input::sanitize::{guard_keystroke, strip_pasted, Warning};
use crate::utils::debouncer::Debouncer;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Desktop,
    Mobile,
}

impl Surface {
    pub fn other(self) -> Surface {
        match self {
            Surface::Desktop => Surface::Mobile,
            Surface::Mobile => Surface::Desktop,
        }
    }
}

/// When an edit is turned into a filter pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebouncePolicy {
    /// Both fields wait for the quiet period
    #[default]
    Unified,
    /// Mobile edits filter at once, desktop edits are debounced
    MobileImmediate,
}

/// What the caller should do after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEffect {
    /// Filter now with the current query
    FilterNow,
    /// A debounced pass is scheduled
    Scheduled,
}

#[derive(Debug, Clone)]
pub struct SearchSurfaces {
    desktop: String,
    /// Hosts without a narrow layout have no mobile field
    mobile: Option<String>,
    debouncer: Debouncer,
    policy: DebouncePolicy,
}

impl SearchSurfaces {
    pub fn new(debounce_ms: u64, policy: DebouncePolicy) -> Self {
        Self {
            desktop: String::new(),
            mobile: Some(String::new()),
            debouncer: Debouncer::new(debounce_ms),
            policy,
        }
    }

    pub fn without_mobile(mut self) -> Self {
        self.mobile = None;
        self
    }

    pub fn value(&self, surface: Surface) -> Option<&str> {
        match surface {
            Surface::Desktop => Some(self.desktop.as_str()),
            Surface::Mobile => self.mobile.as_deref(),
        }
    }

    /// The logical query: desktop value, or the mobile one when desktop is empty
    pub fn query(&self) -> &str {
        if !self.desktop.is_empty() {
            self.desktop.as_str()
        } else {
            self.mobile.as_deref().unwrap_or("")
        }
    }

    fn store(&mut self, surface: Surface, value: &str) {
        match surface {
            Surface::Desktop => {
                self.desktop.clear();
                self.desktop.push_str(value);
            }
            Surface::Mobile => {
                if let Some(mobile) = self.mobile.as_mut() {
                    mobile.clear();
                    mobile.push_str(value);
                }
            }
        }
    }

    /// Overwrite both fields, e.g. after truncating an over-long query
    pub fn set_all(&mut self, value: &str) {
        self.store(Surface::Desktop, value);
        self.store(Surface::Mobile, value);
    }

    /// Keystroke check, applied before the character reaches the field
    pub fn keystroke(&self, c: char) -> Result<(), Warning> {
        guard_keystroke(c)
    }

    /// The field `surface` now holds `value`. The other field is mirrored
    /// verbatim and the debounce policy decides when to filter.
    pub fn edit(&mut self, surface: Surface, value: &str, now: Instant) -> EditEffect {
        self.store(surface, value);
        self.store(surface.other(), value);
        trace!(target: "input", "{:?} edited, mirrored value '{}'", surface, value);

        if surface == Surface::Mobile && self.policy == DebouncePolicy::MobileImmediate {
            self.debouncer.reset();
            EditEffect::FilterNow
        } else {
            self.debouncer.trigger_at(now);
            EditEffect::Scheduled
        }
    }

    /// A paste landed in `surface` leaving `value`. Angle brackets are
    /// stripped before the value is treated as an edit.
    pub fn paste(
        &mut self,
        surface: Surface,
        value: &str,
        now: Instant,
    ) -> (EditEffect, Option<Warning>) {
        match strip_pasted(value) {
            Some(cleaned) => (
                self.edit(surface, &cleaned, now),
                Some(Warning::tags_removed()),
            ),
            None => (self.edit(surface, value, now), None),
        }
    }

    /// Returns the settled query once the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.debouncer.should_execute_at(now) {
            Some(self.query().to_string())
        } else {
            None
        }
    }

    pub fn time_until_settled(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_remaining_at(now)
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn cancel_pending(&mut self) {
        self.debouncer.reset();
    }
}
