//! Row filtering by a free-text query.
//!
//! Deciding which rows match is a pure function over the rows; applying
//! the decision only flips each row's visibility and never reorders.

use crate::data::table::{Row, Table};
use crate::input::sanitize::sanitize_query;
use std::collections::HashSet;
use tracing::{debug, trace};

pub const DEFAULT_MAX_QUERY_LENGTH: usize = 100;

/// Result of running a query through the filter pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Query was blank, every row is shown
    ShowAll,
    /// Query exceeded the limit; nothing was filtered and both search
    /// fields should be set to `truncated`
    TooLong { truncated: String, max: usize },
    /// Query was applied
    Applied { visible: usize, total: usize },
}

/// Original positions of the rows matching `query`.
///
/// `query` must already be sanitized. Rows with no cells are not data rows
/// and never appear in the result.
pub fn visible_rows(query: &str, rows: &[Row]) -> HashSet<usize> {
    let needle = query.to_uppercase();
    rows.iter()
        .filter(|row| !row.cells().is_empty())
        .filter(|row| {
            row.cells()
                .iter()
                .any(|cell| cell.to_uppercase().contains(&needle))
        })
        .map(|row| row.original_position())
        .collect()
}

#[derive(Debug, Clone)]
pub struct FilterEngine {
    max_query_length: usize,
    passes: usize,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUERY_LENGTH)
    }
}

impl FilterEngine {
    pub fn new(max_query_length: usize) -> Self {
        Self {
            max_query_length,
            passes: 0,
        }
    }

    /// Number of completed filter passes (blank queries and rejected
    /// over-long queries do not count)
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn set_query(&mut self, table: &mut Table, raw: &str) -> FilterOutcome {
        if raw.trim().is_empty() {
            self.clear(table);
            return FilterOutcome::ShowAll;
        }

        let length = raw.chars().count();
        if length > self.max_query_length {
            debug!(target: "filter", "Query of {} chars exceeds limit {}", length, self.max_query_length);
            return FilterOutcome::TooLong {
                truncated: raw.chars().take(self.max_query_length).collect(),
                max: self.max_query_length,
            };
        }

        let sanitized = sanitize_query(raw);
        let matches = visible_rows(&sanitized, table.rows());
        trace!(target: "filter", "Query '{}' matched {} rows", sanitized, matches.len());

        for row in table.rows_mut() {
            if row.cells().is_empty() {
                continue;
            }
            let show = matches.contains(&row.original_position());
            row.set_visible(show);
        }
        self.passes += 1;

        FilterOutcome::Applied {
            visible: matches.len(),
            total: table.row_count(),
        }
    }

    /// Show every row again
    pub fn clear(&mut self, table: &mut Table) {
        for row in table.rows_mut() {
            row.set_visible(true);
        }
    }
}
