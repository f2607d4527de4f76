//! Wires the table, both engines, the search fields and the warning
//! banner together. Hosts forward user events here and render the result.

use crate::config::config::Config;
use crate::data::filter_engine::{FilterEngine, FilterOutcome};
use crate::data::sort_engine::{SortEngine, SortState};
use crate::data::table::Table;
use crate::input::sanitize::Warning;
use crate::input::surfaces::{EditEffect, SearchSurfaces, Surface};
use crate::ui::warning::WarningBanner;
use std::time::Instant;
use tracing::debug;

#[derive(Debug)]
pub struct TableController {
    table: Table,
    sort_engine: SortEngine,
    filter_engine: FilterEngine,
    surfaces: SearchSurfaces,
    warnings: WarningBanner,
    focused: Option<Surface>,
}

impl TableController {
    pub fn new(table: Table, config: &Config) -> Self {
        Self {
            table: table.with_indicators(config.sort.indicators.to_indicators()),
            sort_engine: SortEngine::new(),
            filter_engine: FilterEngine::new(config.filter.max_query_length),
            surfaces: SearchSurfaces::new(
                config.filter.debounce_ms,
                config.filter.debounce_policy,
            ),
            warnings: WarningBanner::new(config.display.warning_duration_ms),
            focused: None,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn surfaces(&self) -> &SearchSurfaces {
        &self.surfaces
    }

    pub fn filter_engine(&self) -> &FilterEngine {
        &self.filter_engine
    }

    pub fn focused(&self) -> Option<Surface> {
        self.focused
    }

    pub fn focus(&mut self, surface: Option<Surface>) {
        self.focused = surface;
    }

    /// The search dropdown opened: the desktop field takes focus
    pub fn open_search_dropdown(&mut self) {
        self.focused = Some(Surface::Desktop);
    }

    pub fn warning(&self, now: Instant) -> Option<&Warning> {
        self.warnings.active(now)
    }

    pub fn show_warning(&mut self, warning: Warning, now: Instant) {
        self.warnings.show(warning, now);
    }

    pub fn dismiss_warning(&mut self) {
        self.warnings.dismiss();
    }

    pub fn activate_column(&mut self, column: usize) -> SortState {
        self.sort_engine.activate_column(&mut self.table, column)
    }

    /// Returns false when the keystroke was rejected and must not reach the field
    pub fn keystroke(&mut self, c: char, now: Instant) -> bool {
        match self.surfaces.keystroke(c) {
            Ok(()) => true,
            Err(warning) => {
                self.warnings.show(warning, now);
                false
            }
        }
    }

    /// `surface` now holds `value` after an ordinary edit
    pub fn edited(&mut self, surface: Surface, value: &str, now: Instant) -> Option<FilterOutcome> {
        match self.surfaces.edit(surface, value, now) {
            EditEffect::FilterNow => Some(self.apply_query(now)),
            EditEffect::Scheduled => None,
        }
    }

    /// `surface` now holds `value` after a paste
    pub fn pasted(&mut self, surface: Surface, value: &str, now: Instant) -> Option<FilterOutcome> {
        let (effect, warning) = self.surfaces.paste(surface, value, now);
        if let Some(warning) = warning {
            self.warnings.show(warning, now);
        }
        match effect {
            EditEffect::FilterNow => Some(self.apply_query(now)),
            EditEffect::Scheduled => None,
        }
    }

    /// Run any debounced filter pass that is due and expire old warnings
    pub fn tick(&mut self, now: Instant) -> Option<FilterOutcome> {
        self.warnings.expire(now);
        if self.surfaces.poll(now).is_some() {
            return Some(self.apply_query(now));
        }
        None
    }

    /// Filter with the current query right away
    pub fn apply_query(&mut self, now: Instant) -> FilterOutcome {
        let query = self.surfaces.query().to_string();
        let outcome = self.filter_engine.set_query(&mut self.table, &query);
        if let FilterOutcome::TooLong { truncated, max } = &outcome {
            self.surfaces.set_all(truncated);
            self.warnings.show(Warning::query_too_long(*max), now);
        }
        debug!(target: "filter", "Filter outcome: {:?}", outcome);
        outcome
    }

    /// Apply the query now, superseding any pending debounced pass
    pub fn confirm(&mut self, now: Instant) -> FilterOutcome {
        self.surfaces.cancel_pending();
        self.apply_query(now)
    }

    /// Empty both fields and show every row
    pub fn clear(&mut self) {
        self.surfaces.set_all("");
        self.surfaces.cancel_pending();
        self.filter_engine.clear(&mut self.table);
    }
}
