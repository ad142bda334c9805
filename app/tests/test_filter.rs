//! FILENAME: tests/test_filter.rs
//! PURPOSE: Tests for free-text filtering.

mod common;

use app_lib::{set_filter_text, set_grouping_keys};
use common::{column_texts, TestHarness};
use engine::ColumnKey;

#[test]
fn test_filter_matches_any_column() {
    let harness = TestHarness::with_sample_data();

    let response = set_filter_text(&harness.state, "socket").unwrap();
    assert_eq!(response.view.row_count, 1);
    assert_eq!(column_texts(&response, 0, "Function name"), vec!["Connect"]);
    assert_eq!(response.total_rows, 5);
}

#[test]
fn test_filter_is_trimmed_and_case_insensitive() {
    let harness = TestHarness::with_sample_data();

    let response = set_filter_text(&harness.state, "  ONLOAD\t").unwrap();
    assert_eq!(response.view.row_count, 2);
    assert_eq!(response.filter_text, "  ONLOAD\t");
}

#[test]
fn test_filter_is_idempotent() {
    let harness = TestHarness::with_sample_data();

    let once = set_filter_text(&harness.state, "renderer").unwrap();
    let twice = set_filter_text(&harness.state, "renderer").unwrap();
    assert_eq!(once.view, twice.view);
    assert_eq!(once.view.row_count, 2);
}

#[test]
fn test_blank_filter_shows_everything() {
    let harness = TestHarness::with_sample_data();
    set_filter_text(&harness.state, "layout").unwrap();

    let response = set_filter_text(&harness.state, "   ").unwrap();
    assert_eq!(response.view.row_count, 5);
}

#[test]
fn test_filter_matches_formatted_numbers() {
    let harness = TestHarness::with_sample_data();

    let response = set_filter_text(&harness.state, "1,250").unwrap();
    assert_eq!(response.view.row_count, 1);
}

#[test]
fn test_filter_drops_empty_groups() {
    let harness = TestHarness::with_sample_data();
    set_grouping_keys(&harness.state, &[ColumnKey::ProcessType.id().to_string()]).unwrap();

    let response = set_filter_text(&harness.state, "layout").unwrap();
    assert_eq!(response.view.groups.len(), 1);
    assert_eq!(response.view.groups[0].title_text(), "Process type = Renderer");

    let response = set_filter_text(&harness.state, "no such function").unwrap();
    assert!(response.view.groups.is_empty());
    assert!(response.view.columns.iter().any(|c| c.key == ColumnKey::ProcessType));
}
