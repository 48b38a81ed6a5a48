//! Content domain records.

pub mod campaign;
pub mod records;
pub mod settings;
