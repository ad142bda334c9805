//! FILENAME: app/src/api_types.rs
// PURPOSE: Shared type definitions for communication with the renderer.
// CONTEXT: All structs use camelCase serialization for JavaScript interoperability.

use engine::ColumnKey;
use serde::{Deserialize, Serialize};
use tracking_engine::{SelectModel, TrackingView};

/// "Group by" and "Sort by" dropdown rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownsResponse {
    pub grouping: Vec<SelectModel>,
    pub sorting: Vec<SelectModel>,
}

/// One checkbox of the "Edit columns" panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnToggle {
    pub key: ColumnKey,
    /// Column id, as used in command arguments.
    pub id: String,
    pub name: String,
    pub visible: bool,
}

/// Everything the renderer needs after a state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub view: TrackingView,
    pub dropdowns: DropdownsResponse,
    pub filter_text: String,
    /// Rows in the store, before filtering.
    pub total_rows: usize,
}
