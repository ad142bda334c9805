//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the tracking data model.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod cell;
pub mod column;
pub mod error;
pub mod number_format;
pub mod row;

// Re-export commonly used types at the crate root
pub use cell::{simple_compare, CellValue};
pub use column::{ColumnKey, SortKey, COLUMN_COUNT};
pub use error::ConfigError;
pub use number_format::format_number_as_text;
pub use row::Row;
