//! FILENAME: tests/test_sorting.rs
//! PURPOSE: Tests for column-click sorting and the sort dropdowns.

mod common;

use app_lib::{click_column, get_view, select_sorting, set_sort_keys, AppError};
use common::{column_texts, TestHarness};
use engine::{ColumnKey, SortKey};

fn id(key: ColumnKey) -> String {
    key.id().to_string()
}

// ============================================================================
// CLICK-TO-SORT
// ============================================================================

#[test]
fn test_default_sort_is_count_descending() {
    let harness = TestHarness::with_sample_data();
    let response = get_view(&harness.state).unwrap();

    assert_eq!(response.view.sort_keys, vec![SortKey::descending(ColumnKey::Count)]);
    assert_eq!(
        column_texts(&response, 0, "Count"),
        vec!["1,250", "75", "30", "20", "3"]
    );
    assert_eq!(response.view.columns[0].sort_indicator, "**");
}

#[test]
fn test_click_sequence() {
    let harness = TestHarness::with_sample_data();
    let function = id(ColumnKey::FunctionName);

    let response = click_column(&harness.state, &function, false).unwrap();
    assert_eq!(response.view.sort_keys, vec![SortKey::ascending(ColumnKey::FunctionName)]);
    assert_eq!(
        column_texts(&response, 0, "Function name"),
        vec!["Connect", "Layout", "OnLoad", "OnLoad", "ReadFile"]
    );

    let response = click_column(&harness.state, &function, false).unwrap();
    assert_eq!(response.view.sort_keys, vec![SortKey::descending(ColumnKey::FunctionName)]);

    let response = click_column(&harness.state, &id(ColumnKey::LineNumber), true).unwrap();
    assert_eq!(
        response.view.sort_keys,
        vec![
            SortKey::descending(ColumnKey::FunctionName),
            SortKey::ascending(ColumnKey::LineNumber)
        ]
    );
}

#[test]
fn test_click_numeric_column_starts_descending() {
    let harness = TestHarness::with_sample_data();
    click_column(&harness.state, &id(ColumnKey::FunctionName), false).unwrap();

    let response = click_column(&harness.state, &id(ColumnKey::RunTime), false).unwrap();
    assert_eq!(response.view.sort_keys, vec![SortKey::descending(ColumnKey::RunTime)]);
    assert_eq!(
        column_texts(&response, 0, "Total run time"),
        vec!["2,500", "400", "150", "90", "30"]
    );
}

#[test]
fn test_thread_names_sort_well_known_first() {
    let harness = TestHarness::with_sample_data();
    let response = click_column(&harness.state, &id(ColumnKey::DeathThread), false).unwrap();
    assert_eq!(
        column_texts(&response, 0, "Exec thread"),
        vec![
            "CrBrowserMain",
            "Chrome_IOThread",
            "Chrome_FileThread",
            "CrRendererMain",
            "CrRendererMain"
        ]
    );
}

#[test]
fn test_equal_keys_keep_a_deterministic_order() {
    let harness = TestHarness::with_sample_data();
    let process = id(ColumnKey::ProcessType);

    let first = click_column(&harness.state, &process, false).unwrap();
    let again = get_view(&harness.state).unwrap();
    assert_eq!(first.view, again.view);
}

#[test]
fn test_unknown_column_is_rejected() {
    let harness = TestHarness::with_sample_data();
    let err = click_column(&harness.state, "42", false).unwrap_err();
    assert!(matches!(err, AppError::InvalidKey(ref k) if k == "42"));
}

// ============================================================================
// SORT DROPDOWNS
// ============================================================================

#[test]
fn test_sort_dropdowns_follow_sort_list() {
    let harness = TestHarness::with_sample_data();
    let response = select_sorting(&harness.state, 1, "-3").unwrap();

    assert_eq!(
        response.view.sort_keys,
        vec![
            SortKey::descending(ColumnKey::Count),
            SortKey::descending(ColumnKey::AvgRunTime)
        ]
    );
    let sorting = &response.dropdowns.sorting;
    assert_eq!(sorting.len(), 3);
    assert_eq!(sorting[0].selected, "-1");
    assert_eq!(sorting[1].selected, "-3");
    assert_eq!(sorting[2].selected, "");
}

#[test]
fn test_clearing_primary_sort_falls_back_to_default() {
    let harness = TestHarness::with_sample_data();
    let response = select_sorting(&harness.state, 0, "").unwrap();

    assert!(response.view.sort_keys.is_empty());
    assert_eq!(response.dropdowns.sorting.len(), 1);
    assert_eq!(
        column_texts(&response, 0, "Count"),
        vec!["1,250", "75", "30", "20", "3"]
    );
}

#[test]
fn test_set_sort_keys_truncates_at_blank() {
    let harness = TestHarness::with_sample_data();
    let keys = vec!["12".to_string(), "".to_string(), "1".to_string()];
    let response = set_sort_keys(&harness.state, &keys).unwrap();
    assert_eq!(response.view.sort_keys, vec![SortKey::ascending(ColumnKey::FunctionName)]);
}
