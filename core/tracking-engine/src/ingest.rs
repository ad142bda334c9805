//! FILENAME: core/tracking-engine/src/ingest.rs
//! Row Ingestion - converts raw host records into fixed-layout rows.
//!
//! The host sends one `ProcessBatch` per process: the process identity plus a
//! list of loosely structured JSON records. Each record becomes a `Row`:
//! 1. Process identity fields are copied from the batch
//! 2. Every column with an input path is extracted from the record
//! 3. Derived fields (averages, source location) are computed once
//!
//! The `RowStore` owns every row. Rows are only ever appended, or dropped all
//! at once by `clear`.

use engine::{CellValue, ColumnKey, Row};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::definition::ColumnRegistry;

// ============================================================================
// INBOUND PAYLOAD
// ============================================================================

/// One batch of tracking records from a single process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessBatch {
    /// Process identifier, attached to every row of the batch.
    #[serde(default)]
    pub process_id: Value,

    /// Process type label ("Browser", "Renderer", ...). Like `process_id`,
    /// any JSON value is accepted; a non-string ends up as its cell form.
    #[serde(default)]
    pub process_type: Value,

    /// Raw records, in the order the host sent them.
    #[serde(default)]
    pub list: Vec<Value>,
}

// ============================================================================
// JSON HELPERS
// ============================================================================

/// Returns `dict[path]`, where periods in `path` select nested properties.
/// A missing intermediate key yields `None`.
pub fn get_property_by_path<'a>(dict: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(dict, |current, part| current.get(part))
}

/// Converts a JSON value into a cell value.
pub fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Empty),
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

// ============================================================================
// ROW CONSTRUCTION
// ============================================================================

/// Builds a row from one raw record. Derived fields are filled in before the
/// row is returned.
pub fn build_row(
    registry: &ColumnRegistry,
    seq: u64,
    process_id: &CellValue,
    process_type: &CellValue,
    record: &Value,
) -> Row {
    let mut row = Row::new(seq);

    row.set(ColumnKey::ProcessId, process_id.clone());
    row.set(ColumnKey::ProcessType, process_type.clone());

    // Copy over the known properties which have a 1:1 mapping with JSON.
    for descriptor in registry.iter() {
        if let Some(path) = descriptor.input_json_key {
            let value = get_property_by_path(record, path)
                .map(json_to_cell)
                .unwrap_or(CellValue::Empty);
            row.set(descriptor.key, value);
        }
    }

    augment_row(&mut row);
    row
}

/// Adds the computed properties to `row`.
fn augment_row(row: &mut Row) {
    let count = row[ColumnKey::Count].as_number();

    let avg_queue = row[ColumnKey::QueueTime].as_number() / count;
    let avg_run = row[ColumnKey::RunTime].as_number() / count;
    row.set(ColumnKey::AvgQueueTime, CellValue::Number(avg_queue));
    row.set(ColumnKey::AvgRunTime, CellValue::Number(avg_run));

    let location = format!(
        "{} [{}]",
        row[ColumnKey::FileName].display_value(),
        row[ColumnKey::LineNumber].display_value()
    );
    row.set(ColumnKey::SourceLocation, CellValue::Text(location));
}

// ============================================================================
// ROW STORE
// ============================================================================

/// Append-only store of every ingested row.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: Vec<Row>,
    next_seq: u64,
}

impl RowStore {
    pub fn new() -> Self {
        RowStore::default()
    }

    /// Converts every record of `batch` into a row and appends it.
    /// Returns the number of rows added.
    pub fn ingest(&mut self, registry: &ColumnRegistry, batch: &ProcessBatch) -> usize {
        let process_id = json_to_cell(&batch.process_id);
        let process_type = json_to_cell(&batch.process_type);

        self.rows.reserve(batch.list.len());
        for record in &batch.list {
            let row = build_row(registry, self.next_seq, &process_id, &process_type, record);
            self.rows.push(row);
            self.next_seq += 1;
        }

        batch.list.len()
    }

    /// Drops every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
