//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for tracking view integration tests.

#![allow(dead_code)]

use app_lib::{add_data, create_app_state, AppState, ViewResponse};
use serde_json::{json, Value};
use tracking_engine::ProcessBatch;

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Create a new test harness with an empty row store.
    pub fn new() -> Self {
        TestHarness {
            state: create_app_state().expect("standard registry is valid"),
        }
    }

    /// Create a harness with the sample browser and renderer batches.
    pub fn with_sample_data() -> Self {
        let harness = Self::new();
        harness.add(browser_batch());
        harness.add(renderer_batch());
        harness
    }

    /// Ingest a batch, panicking on failure.
    pub fn add(&self, batch: ProcessBatch) -> ViewResponse {
        add_data(&self.state, &batch).expect("add_data")
    }

    pub fn row_count(&self) -> usize {
        self.state.rows.lock().unwrap().len()
    }
}

/// One raw tracking record.
pub fn record(
    function: &str,
    file: &str,
    line: u32,
    birth: &str,
    death: &str,
    count: u64,
    run_ms: u64,
    queue_ms: u64,
) -> Value {
    json!({
        "birth_thread": birth,
        "death_thread": death,
        "death_data": {
            "count": count,
            "run_ms": run_ms,
            "run_ms_max": run_ms,
            "queue_ms": queue_ms,
            "queue_ms_max": queue_ms
        },
        "location": {
            "function_name": function,
            "file_name": file,
            "line_number": line
        }
    })
}

/// Browser process (pid 5): three records.
pub fn browser_batch() -> ProcessBatch {
    ProcessBatch {
        process_id: json!(5),
        process_type: json!("Browser"),
        list: vec![
            record("OnLoad", "a.cc", 12, "CrBrowserMain", "CrBrowserMain", 1250, 2500, 50),
            record("ReadFile", "file_util.cc", 40, "Chrome_FileThread", "Chrome_FileThread", 20, 400, 10),
            record("Connect", "socket.cc", 7, "CrBrowserMain", "Chrome_IOThread", 75, 150, 0),
        ],
    }
}

/// Renderer process (pid 9): two records.
pub fn renderer_batch() -> ProcessBatch {
    ProcessBatch {
        process_id: json!(9),
        process_type: json!("Renderer"),
        list: vec![
            record("OnLoad", "a.cc", 12, "CrRendererMain", "CrRendererMain", 30, 90, 3),
            record("Layout", "layout.cc", 101, "CrRendererMain", "CrRendererMain", 3, 30, 1),
        ],
    }
}

/// Text of one column across every row of one group of the view.
pub fn column_texts(response: &ViewResponse, group: usize, name: &str) -> Vec<String> {
    let index = response
        .view
        .columns
        .iter()
        .position(|c| c.name == name)
        .unwrap_or_else(|| panic!("column {} not displayed", name));
    response.view.groups[group]
        .rows
        .iter()
        .map(|row| row[index].text.clone())
        .collect()
}

/// Aggregate text of one column for one group.
pub fn aggregate_text(response: &ViewResponse, group: usize, name: &str) -> String {
    let index = response
        .view
        .columns
        .iter()
        .position(|c| c.name == name)
        .unwrap_or_else(|| panic!("column {} not displayed", name));
    response.view.groups[group].aggregates[index].text.clone()
}
