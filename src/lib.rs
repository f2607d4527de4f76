//! Sort and filter engine for tabular data.
//!
//! Columns sort through ascending, descending and original order with
//! locale-aware comparison; rows are filtered by a debounced,
//! sanitized text query mirrored across two search fields.

pub mod config;
pub mod controller;
pub mod data;
pub mod input;
pub mod logging;
pub mod table_display;
pub mod ui;
pub mod utils;

pub use controller::TableController;
pub use data::filter_engine::{FilterEngine, FilterOutcome};
pub use data::sort_engine::{SortDirection, SortEngine, SortState};
pub use data::table::Table;
