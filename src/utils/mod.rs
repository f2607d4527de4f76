//! Utility functions and helpers
//!
//! Small building blocks shared by the engines and the terminal host.

pub mod debouncer;
