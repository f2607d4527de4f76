//! Tri-state column sorting.
//!
//! Activating a column cycles it through ascending, descending and back to
//! the original row order. One sort state is shared by the whole table.

use crate::data::compare::compare_cells;
use crate::data::table::{Row, Table};
use std::cmp::Ordering;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    None,
}

impl SortDirection {
    /// Attribute value as recorded on the table (`asc` / `desc`)
    pub fn as_attribute(&self) -> Option<&'static str> {
        match self {
            SortDirection::Ascending => Some("asc"),
            SortDirection::Descending => Some("desc"),
            SortDirection::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// State reached by activating `column` from this state
    pub fn next(&self, column: usize) -> SortState {
        let direction = match self.column {
            Some(active) if active == column => match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::None,
                SortDirection::None => SortDirection::Ascending,
            },
            _ => SortDirection::Ascending,
        };

        if direction == SortDirection::None {
            SortState::unsorted()
        } else {
            SortState {
                column: Some(column),
                direction,
            }
        }
    }

    /// The `data-sort-col` / `data-sort-dir` attribute pair, absent when unsorted
    pub fn attributes(&self) -> Option<[(&'static str, String); 2]> {
        let column = self.column?;
        let direction = self.direction.as_attribute()?;
        Some([
            ("data-sort-col", column.to_string()),
            ("data-sort-dir", direction.to_string()),
        ])
    }
}

/// Applies sort-state transitions to a table
#[derive(Debug, Default, Clone, Copy)]
pub struct SortEngine;

impl SortEngine {
    pub fn new() -> Self {
        Self
    }

    /// Handle activation of a sortable header and return the new state.
    ///
    /// Tables without body rows and unknown columns are left unchanged.
    pub fn activate_column(&self, table: &mut Table, column: usize) -> SortState {
        if column >= table.column_count() {
            warn!(target: "sort", "Ignoring activation of unknown column {}", column);
            return *table.sort_state();
        }
        if table.row_count() == 0 {
            debug!(target: "sort", "Table has no rows, nothing to sort");
            return *table.sort_state();
        }

        let next = table.sort_state().next(column);
        match next.direction {
            SortDirection::None => {
                Self::restore_original_order(table);
                debug!(target: "sort", "Column {} reset to original order", column);
            }
            direction => {
                Self::sort_rows(table, column, direction);
                debug!(target: "sort", "Column {} sorted {:?}", column, direction);
            }
        }
        table.set_sort_state(next);
        next
    }

    fn sort_rows(table: &mut Table, column: usize, direction: SortDirection) {
        let rows = table.replace_rows(Vec::new());
        let sorted = merge_sort_by(rows, &mut |a: &Row, b: &Row| {
            let cmp = compare_cells(a.cell_text(column), b.cell_text(column));
            if direction == SortDirection::Descending {
                cmp.reverse()
            } else {
                cmp
            }
        });
        table.replace_rows(sorted);
    }

    fn restore_original_order(table: &mut Table) {
        table.rows_mut().sort_by_key(|r| r.original_position());
    }
}

/// Stable top-down merge sort.
///
/// The cell comparator picks numeric or text order per pair, so it is not
/// guaranteed to be transitive on mixed columns. `slice::sort_by` may panic
/// on such a comparator; this merge only ever asks which head goes first
/// and always terminates with a permutation of its input. Ties take the
/// left element.
fn merge_sort_by<T, F>(mut items: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, cmp);
    let right = merge_sort_by(right, cmp);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(a), Some(b)) = (left.peek(), right.peek()) {
        if cmp(a, b) == Ordering::Greater {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    merged
}
