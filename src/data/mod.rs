//! Table model and the sort/filter engines operating on it

pub mod compare;
pub mod csv_loader;
pub mod filter_engine;
pub mod sort_engine;
pub mod table;
