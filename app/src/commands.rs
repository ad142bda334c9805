//! FILENAME: app/src/commands.rs
//! PURPOSE: Commands invoked by the renderer and the host bridge.
//! CONTEXT: Each mutator updates the UI state, then re-evaluates the query
//! and returns the new view together with regenerated dropdown models.

use std::str::FromStr;

use engine::{ColumnKey, SortKey};
use tracking_engine::{prepare_view, ProcessBatch, UiState};

use crate::api_types::{ColumnToggle, DropdownsResponse, ViewResponse};
use crate::logging::{next_seq, sort_log_file, write_log, write_log_raw};
use crate::{lock, log_debug, log_enter, log_enter_info, log_exit, log_exit_info, log_info, AppError, AppState};

// ============================================================================
// HELPERS
// ============================================================================

/// Parses a column id ("1".."15").
pub fn parse_column_key(value: &str) -> Result<ColumnKey, AppError> {
    ColumnKey::from_str(value.trim()).map_err(|_| AppError::InvalidKey(value.to_string()))
}

/// Parses a signed sort id ("-1" is Count descending).
pub fn parse_sort_key(value: &str) -> Result<SortKey, AppError> {
    SortKey::from_str(value.trim()).map_err(|_| AppError::InvalidKey(value.to_string()))
}

/// Dropdown values: an empty string is the "---" choice.
fn parse_optional<T>(value: &str, parse: fn(&str) -> Result<T, AppError>) -> Result<Option<T>, AppError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}

fn parse_list<T>(values: &[String], parse: fn(&str) -> Result<T, AppError>) -> Result<Vec<Option<T>>, AppError> {
    values.iter().map(|v| parse_optional(v, parse)).collect()
}

fn dropdowns(state: &AppState, ui: &UiState) -> DropdownsResponse {
    DropdownsResponse {
        grouping: ui.grouping_dropdowns(&state.registry, &state.settings),
        sorting: ui.sorting_dropdowns(&state.registry),
    }
}

/// Re-evaluates the query for the current state. The row store is locked
/// before the UI state, and both for the whole evaluation, so a recompute
/// never sees a partially appended batch.
fn respond(state: &AppState) -> Result<ViewResponse, AppError> {
    let rows = lock(&state.rows, "rows")?;
    let ui = lock(&state.ui, "ui")?;

    let view = prepare_view(&state.registry, &state.settings, &ui, rows.rows());
    log_debug!(
        "CMD",
        "view: {} groups, {}/{} rows",
        view.groups.len(),
        view.row_count,
        rows.len()
    );

    Ok(ViewResponse {
        view,
        dropdowns: dropdowns(state, &ui),
        filter_text: ui.filter_text().to_string(),
        total_rows: rows.len(),
    })
}

// ============================================================================
// DATA
// ============================================================================

/// Current view, without changing anything.
pub fn get_view(state: &AppState) -> Result<ViewResponse, AppError> {
    log_enter!("CMD", "get_view");
    let response = respond(state)?;
    log_exit!("CMD", "get_view");
    Ok(response)
}

/// Ingests one batch from the host. The whole batch is appended under a
/// single lock acquisition.
pub fn add_data(state: &AppState, batch: &ProcessBatch) -> Result<ViewResponse, AppError> {
    log_enter!("DATA", "add_data", "pid={} type={} records={}", batch.process_id, batch.process_type, batch.list.len());

    let added = {
        let mut rows = lock(&state.rows, "rows")?;
        rows.ingest(&state.registry, batch)
    };
    log_info!("DATA", "ingested {} rows", added);

    let response = respond(state)?;
    log_exit!("DATA", "add_data", "total={}", response.total_rows);
    Ok(response)
}

/// Drops every row. Settings and UI selections are kept.
pub fn clear_data(state: &AppState) -> Result<ViewResponse, AppError> {
    log_enter!("DATA", "clear_data");
    lock(&state.rows, "rows")?.clear();
    let response = respond(state)?;
    log_exit!("DATA", "clear_data");
    Ok(response)
}

// ============================================================================
// FILTER / GROUP / SORT
// ============================================================================

pub fn set_filter_text(state: &AppState, text: &str) -> Result<ViewResponse, AppError> {
    log_enter!("CMD", "set_filter_text", "text={:?}", text);
    state.update_ui(|ui| ui.set_filter_text(text))?;
    respond(state)
}

/// Replaces the grouping list. Values are column ids; "" ends the list.
pub fn set_grouping_keys(state: &AppState, keys: &[String]) -> Result<ViewResponse, AppError> {
    log_enter!("CMD", "set_grouping_keys", "keys={:?}", keys);
    let keys = parse_list(keys, parse_column_key)?;
    state.update_ui(|ui| ui.set_grouping_keys(&keys))?;
    respond(state)
}

/// Handles a change of the `index`th "Group by" dropdown.
pub fn select_grouping(state: &AppState, index: usize, value: &str) -> Result<ViewResponse, AppError> {
    log_enter!("CMD", "select_grouping", "index={} value={:?}", index, value);
    let key = parse_optional(value, parse_column_key)?;
    state.update_ui(|ui| ui.select_grouping(index, key))?;
    respond(state)
}

/// Replaces the sort list. Values are signed sort ids; "" ends the list.
pub fn set_sort_keys(state: &AppState, keys: &[String]) -> Result<ViewResponse, AppError> {
    log_enter!("CMD", "set_sort_keys", "keys={:?}", keys);
    let keys = parse_list(keys, parse_sort_key)?;
    state.update_ui(|ui| ui.set_sort_keys(&keys))?;
    respond(state)
}

/// Handles a change of the `index`th "Sort by" dropdown.
pub fn select_sorting(state: &AppState, index: usize, value: &str) -> Result<ViewResponse, AppError> {
    log_enter!("CMD", "select_sorting", "index={} value={:?}", index, value);
    let key = parse_optional(value, parse_sort_key)?;
    state.update_ui(|ui| ui.select_sorting(index, key))?;
    respond(state)
}

/// Column header click. `modifier` is the "add secondary sort" modifier key.
pub fn click_column(state: &AppState, key: &str, modifier: bool) -> Result<ViewResponse, AppError> {
    log_enter!("CMD", "click_column", "key={} modifier={}", key, modifier);
    let column = parse_column_key(key)?;
    let sort_keys = state.update_ui(|ui| {
        ui.click_column(&state.registry, column, modifier);
        ui.sort_keys().to_vec()
    })?;
    log_debug!("CMD", "sort keys now {:?}", sort_keys);
    respond(state)
}

// ============================================================================
// COLUMNS
// ============================================================================

pub fn set_column_visible(state: &AppState, key: &str, visible: bool) -> Result<ViewResponse, AppError> {
    log_enter!("CMD", "set_column_visible", "key={} visible={}", key, visible);
    let column = parse_column_key(key)?;
    state.update_ui(|ui| ui.set_column_visible(column, visible))?;
    respond(state)
}

/// Replaces the set of checked columns.
pub fn set_visible_columns(state: &AppState, keys: &[String]) -> Result<ViewResponse, AppError> {
    log_enter!("CMD", "set_visible_columns", "keys={:?}", keys);
    let columns = keys
        .iter()
        .map(|k| parse_column_key(k))
        .collect::<Result<Vec<_>, _>>()?;
    state.update_ui(|ui| ui.set_visible_columns(columns))?;
    respond(state)
}

/// Checkbox models for the "Edit columns" panel, in table order.
pub fn get_column_toggles(state: &AppState) -> Result<Vec<ColumnToggle>, AppError> {
    let ui = lock(&state.ui, "ui")?;
    Ok(ColumnKey::ALL
        .iter()
        .map(|key| ColumnToggle {
            key: *key,
            id: key.to_string(),
            name: state.registry.name_for_key(*key).to_string(),
            visible: ui.is_column_visible(*key),
        })
        .collect())
}

pub fn get_dropdowns(state: &AppState) -> Result<DropdownsResponse, AppError> {
    let ui = lock(&state.ui, "ui")?;
    Ok(dropdowns(state, &ui))
}

// ============================================================================
// RENDERER LOGGING
// ============================================================================

/// Hands out the next shared sequence number for a renderer log line.
pub fn get_next_seq() -> u64 {
    next_seq()
}

/// Writes a renderer log line that already carries its sequence number.
pub fn log_frontend(message: &str) {
    write_log_raw(message);
}

/// Writes a renderer log line; the sequence number is assigned here.
pub fn log_frontend_atomic(level: &str, category: &str, message: &str) {
    write_log(level, category, message);
}

/// Reorders the log file by sequence number. Returns the number of lines.
pub fn sort_log() -> Result<usize, AppError> {
    log_enter_info!("CMD", "sort_log");
    let lines = sort_log_file().map_err(AppError::LogFile)?;
    log_exit_info!("CMD", "sort_log", "lines={}", lines);
    Ok(lines)
}
