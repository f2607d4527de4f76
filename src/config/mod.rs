//! Configuration module
//!
//! Filter limits, debounce timing, sort indicators and display settings.

pub mod config;
