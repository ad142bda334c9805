//! FILENAME: tests/test_grouping.rs
//! PURPOSE: Tests for grouping rows into per-group tables.

mod common;

use app_lib::{get_dropdowns, select_grouping, set_grouping_keys, AppError};
use common::{aggregate_text, column_texts, TestHarness};
use engine::ColumnKey;

fn id(key: ColumnKey) -> String {
    key.id().to_string()
}

#[test]
fn test_group_by_process_type() {
    let harness = TestHarness::with_sample_data();
    let response = set_grouping_keys(&harness.state, &[id(ColumnKey::ProcessType)]).unwrap();

    let groups = &response.view.groups;
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].title_text(), "Process type = Browser");
    assert_eq!(groups[1].title_text(), "Process type = Renderer");
    assert_eq!(groups[0].rows.len(), 3);
    assert_eq!(groups[1].rows.len(), 2);

    assert_eq!(aggregate_text(&response, 0, "Count"), "1,345");
    assert_eq!(aggregate_text(&response, 1, "Count"), "33");
    assert_eq!(aggregate_text(&response, 1, "Avg run time"), "4");
}

#[test]
fn test_grouped_column_is_not_repeated_in_rows() {
    let harness = TestHarness::with_sample_data();
    let response = set_grouping_keys(&harness.state, &[id(ColumnKey::ProcessType)]).unwrap();

    assert!(response
        .view
        .columns
        .iter()
        .all(|c| c.key != ColumnKey::ProcessType));
    assert!(response.view.columns.iter().any(|c| c.key == ColumnKey::ProcessId));
}

#[test]
fn test_groups_are_a_partition() {
    let harness = TestHarness::with_sample_data();
    let response = set_grouping_keys(
        &harness.state,
        &[id(ColumnKey::BirthThread), id(ColumnKey::FunctionName)],
    )
    .unwrap();

    let total: usize = response.view.groups.iter().map(|g| g.rows.len()).sum();
    assert_eq!(total, 5);
    assert_eq!(response.view.row_count, 5);

    let mut ids: Vec<&str> = response.view.groups.iter().map(|g| g.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), response.view.groups.len());
}

#[test]
fn test_groups_ordered_by_column_comparator() {
    let harness = TestHarness::with_sample_data();
    let response = set_grouping_keys(&harness.state, &[id(ColumnKey::BirthThread)]).unwrap();

    let titles: Vec<String> = response.view.groups.iter().map(|g| g.title_text()).collect();
    assert_eq!(
        titles,
        vec![
            "Birth thread = CrBrowserMain",
            "Birth thread = Chrome_FileThread",
            "Birth thread = CrRendererMain"
        ]
    );
    assert_eq!(column_texts(&response, 0, "Count"), vec!["1,250", "75"]);
}

#[test]
fn test_duplicate_group_keys_collapse() {
    let harness = TestHarness::with_sample_data();
    let response = set_grouping_keys(
        &harness.state,
        &[id(ColumnKey::ProcessType), id(ColumnKey::ProcessType)],
    )
    .unwrap();

    assert_eq!(response.view.groups.len(), 2);
    assert_eq!(response.view.groups[0].title.len(), 1);
    // The raw list is kept; the dropdowns still show both entries.
    assert_eq!(response.dropdowns.grouping.len(), 3);
}

#[test]
fn test_group_dropdowns() {
    let harness = TestHarness::with_sample_data();
    select_grouping(&harness.state, 0, &id(ColumnKey::ProcessId)).unwrap();
    select_grouping(&harness.state, 1, &id(ColumnKey::FunctionName)).unwrap();

    let dropdowns = get_dropdowns(&harness.state).unwrap();
    assert_eq!(dropdowns.grouping.len(), 3);
    assert_eq!(dropdowns.grouping[0].selected, id(ColumnKey::ProcessId));
    assert_eq!(dropdowns.grouping[1].selected, id(ColumnKey::FunctionName));
    assert_eq!(dropdowns.grouping[0].options[0].label, "---");
    assert_eq!(dropdowns.grouping[0].options.len(), 9);

    // Clearing the primary grouping clears everything after it.
    let response = select_grouping(&harness.state, 0, "").unwrap();
    assert_eq!(response.dropdowns.grouping.len(), 1);
    assert_eq!(response.view.groups.len(), 1);
    assert!(response.view.groups[0].title.is_empty());
}

#[test]
fn test_invalid_group_key() {
    let harness = TestHarness::with_sample_data();
    let err = set_grouping_keys(&harness.state, &["banana".to_string()]).unwrap_err();
    assert!(matches!(err, AppError::InvalidKey(_)));
}
