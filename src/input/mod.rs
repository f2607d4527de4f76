//! Search input handling: validation, sanitization and the mirrored fields

pub mod sanitize;
pub mod surfaces;
