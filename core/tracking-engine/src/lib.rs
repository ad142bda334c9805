//! FILENAME: core/tracking-engine/src/lib.rs
//! Tracking table subsystem.
//!
//! This crate turns raw profiler tracking records into grouped, filtered,
//! aggregated and sorted tables. It depends on `engine` only for shared
//! types (CellValue, ColumnKey, SortKey, Row).
//!
//! Layers:
//! - `definition`: Column registry and view settings (what the table IS)
//! - `aggregate`: Per-group summaries of one column
//! - `ingest`: Raw JSON records into fixed-layout rows (HOW data gets in)
//! - `engine`: Grouping, filtering, aggregation and sorting (HOW we calculate)
//! - `state`: Mutable presentation state (what the user ASKED for)
//! - `view`: Renderable output for the frontend (WHAT we display)

pub mod definition;
pub mod aggregate;
pub mod ingest;
pub mod engine;
pub mod state;
pub mod view;

pub use definition::*;
pub use aggregate::{Aggregator, AggregatorKind};
pub use ingest::{get_property_by_path, json_to_cell, ProcessBatch, RowStore};
pub use crate::engine::{
    compare_group_keys, compare_rows_structurally, evaluate, filter_function,
    grouping_function, normalize_filter_text, order_groups, sorting_function,
    GroupData, GroupKey, GroupKeyEntry, GroupedData,
};
pub use state::{UiState, NO_SELECTION_LABEL};
pub use view::*;
