//! Terminal front end: the table view, the search fields and the warning banner

pub mod app;
pub mod search_input;
pub mod warning;
