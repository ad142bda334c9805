//! FILENAME: core/tracking-engine/src/view.rs
//! Rendering handoff - the fully computed table model.
//!
//! `prepare_view` runs one complete evaluation for the current UI state and
//! converts the result into a `TrackingView`: plain serializable data that a
//! renderer can draw without touching the registry or the row store.

use engine::{ColumnKey, Row, SortKey};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatorKind;
use crate::definition::{CellAlignment, ColumnRegistry, ViewSettings};
use crate::engine::{evaluate, filter_function, grouping_function, order_groups, sorting_function, GroupData, GroupKey};
use crate::state::{UiState, NO_SELECTION_LABEL};

// ============================================================================
// DROPDOWNS
// ============================================================================

/// One option of a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Option value: a column id, a signed sort id, or "" for no selection.
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The "---" option, meaning nothing selected.
    pub fn none() -> Self {
        SelectOption::new("", NO_SELECTION_LABEL)
    }
}

/// Model of one "Group by" or "Sort by" dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectModel {
    /// Position of the dropdown in its row.
    pub index: usize,
    /// Value of the selected option.
    pub selected: String,
    pub options: Vec<SelectOption>,
}

// ============================================================================
// TABLE MODEL
// ============================================================================

/// One column header of the per-group tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    pub key: ColumnKey,
    pub name: String,
    /// "*" when sorted ascending on this column, "**" when descending,
    /// empty otherwise.
    pub sort_indicator: String,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewCell {
    pub text: String,
    pub alignment: CellAlignment,
}

/// One "Name = value" constraint of a group title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTitleEntry {
    pub key: ColumnKey,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    /// Canonical form of the group key.
    pub id: String,
    /// Empty when no grouping is active.
    pub title: Vec<GroupTitleEntry>,
    /// Aggregate row, one cell per displayed column.
    pub aggregates: Vec<ViewCell>,
    /// Sorted data rows, one cell per displayed column.
    pub rows: Vec<Vec<ViewCell>>,
}

impl GroupView {
    /// The title as a single line: "Name = value and Name = value".
    pub fn title_text(&self) -> String {
        self.title
            .iter()
            .map(|entry| format!("{} = {}", entry.name, entry.value))
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingView {
    pub columns: Vec<ColumnHeader>,
    pub groups: Vec<GroupView>,
    /// Current sort list, for indicator rendering.
    pub sort_keys: Vec<SortKey>,
    /// Rows that passed the filter, over all groups.
    pub row_count: usize,
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Evaluates the query for `state` over `rows` and builds the table model.
pub fn prepare_view(
    registry: &ColumnRegistry,
    settings: &ViewSettings,
    state: &UiState,
    rows: &[Row],
) -> TrackingView {
    let sort_keys = state.effective_sort_keys(settings);

    let grouped = evaluate(
        rows,
        registry,
        grouping_function(state.group_keys()),
        filter_function(registry, state.filter_text()),
        sorting_function(registry, &sort_keys),
    );
    let ordered = order_groups(registry, grouped);

    build_view(registry, state, &ordered)
}

/// Converts ordered groups into the table model.
pub fn build_view(registry: &ColumnRegistry, state: &UiState, groups: &[(GroupKey, GroupData<'_>)]) -> TrackingView {
    let columns = state.display_columns(!groups.is_empty());

    TrackingView {
        columns: columns
            .iter()
            .map(|key| column_header(registry, state.sort_keys(), *key))
            .collect(),
        groups: groups
            .iter()
            .map(|(key, data)| group_view(registry, &columns, key, data))
            .collect(),
        sort_keys: state.sort_keys().to_vec(),
        row_count: groups.iter().map(|(_, data)| data.rows.len()).sum(),
    }
}

fn column_header(registry: &ColumnRegistry, sort_keys: &[SortKey], key: ColumnKey) -> ColumnHeader {
    let sort_indicator = match sort_keys.iter().find(|sort_key| sort_key.column == key) {
        Some(sort_key) if sort_key.descending => "**",
        Some(_) => "*",
        None => "",
    };

    ColumnHeader {
        key,
        name: registry.name_for_key(key).to_string(),
        sort_indicator: sort_indicator.to_string(),
    }
}

fn group_view(registry: &ColumnRegistry, columns: &[ColumnKey], key: &GroupKey, data: &GroupData<'_>) -> GroupView {
    let title = key
        .entries()
        .iter()
        .map(|entry| GroupTitleEntry {
            key: entry.key,
            name: registry.name_for_key(entry.key).to_string(),
            value: entry.value.display_value(),
        })
        .collect();

    // Most aggregates are numeric and right aligned; unique counts are centered.
    let aggregates = columns
        .iter()
        .map(|column| {
            let alignment = match registry.descriptor(*column).aggregator {
                Some(AggregatorKind::UniqueCount) => CellAlignment::Center,
                _ => CellAlignment::Right,
            };
            ViewCell {
                text: data.aggregates.get(column).cloned().unwrap_or_default(),
                alignment,
            }
        })
        .collect();

    let rows = data
        .rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| ViewCell {
                    text: registry.text_for_value(*column, row.get(*column)),
                    alignment: registry.descriptor(*column).cell_alignment.unwrap_or_default(),
                })
                .collect()
        })
        .collect();

    GroupView {
        id: key.canonical(),
        title,
        aggregates,
        rows,
    }
}
