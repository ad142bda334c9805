//! FILENAME: core/tracking-engine/src/state.rs
//! UI State - the mutable presentation state of the tracking table.
//!
//! Holds the ordered sort-key list, the ordered group-key list, the set of
//! visible columns and the filter text. Every user action maps onto one of
//! the mutators below; the controller re-evaluates the query afterwards.
//! Nothing here is persisted.

use std::collections::BTreeSet;

use engine::{ColumnKey, SortKey};
use serde::{Deserialize, Serialize};

use crate::definition::{ColumnRegistry, ViewSettings};
use crate::view::{SelectModel, SelectOption};

/// Label of the "nothing selected" dropdown option.
pub const NO_SELECTION_LABEL: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    sort_keys: Vec<SortKey>,
    group_keys: Vec<ColumnKey>,
    visible_columns: BTreeSet<ColumnKey>,
    filter_text: String,
}

impl UiState {
    /// Initial state: initial sort and group keys, every column visible
    /// except the initially hidden ones, no filter.
    pub fn new(settings: &ViewSettings) -> Self {
        UiState {
            sort_keys: settings.initial_sort_keys.clone(),
            group_keys: settings.initial_group_keys.clone(),
            visible_columns: ColumnKey::ALL
                .iter()
                .copied()
                .filter(|key| !settings.initially_hidden.contains(key))
                .collect(),
            filter_text: String::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort_keys
    }

    pub fn group_keys(&self) -> &[ColumnKey] {
        &self.group_keys
    }

    /// The filter text exactly as the user typed it.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn is_column_visible(&self, key: ColumnKey) -> bool {
        self.visible_columns.contains(&key)
    }

    /// Sort keys used to derive the row comparator. An empty list means
    /// nothing was specified, so the default sort applies.
    pub fn effective_sort_keys(&self, settings: &ViewSettings) -> Vec<SortKey> {
        if self.sort_keys.is_empty() {
            settings.default_sort_keys.clone()
        } else {
            self.sort_keys.clone()
        }
    }

    /// Grouping dimensions with repeats removed, first occurrence kept.
    pub fn active_grouping(&self) -> Vec<ColumnKey> {
        let mut active = Vec::with_capacity(self.group_keys.len());
        for key in &self.group_keys {
            if !active.contains(key) {
                active.push(*key);
            }
        }
        active
    }

    /// Checked columns, in table order.
    pub fn visible_columns(&self) -> Vec<ColumnKey> {
        ColumnKey::ALL
            .iter()
            .copied()
            .filter(|key| self.visible_columns.contains(key))
            .collect()
    }

    /// Columns drawn in the per-row tables. When at least one group exists,
    /// the grouped columns are already shown in the group title and are left
    /// out even if checked.
    pub fn display_columns(&self, has_groups: bool) -> Vec<ColumnKey> {
        let mut columns = self.visible_columns();
        if has_groups {
            let grouped = self.active_grouping();
            columns.retain(|key| !grouped.contains(key));
        }
        columns
    }

    // ========================================================================
    // MUTATORS
    // ========================================================================

    pub fn set_filter_text(&mut self, text: &str) {
        self.filter_text = text.to_string();
    }

    /// Replaces the grouping list. A `None` entry ends the list.
    pub fn set_grouping_keys(&mut self, keys: &[Option<ColumnKey>]) {
        self.group_keys = keys.iter().map_while(|key| *key).collect();
    }

    /// Replaces the sort list. A `None` entry ends the list; repeats are kept.
    pub fn set_sort_keys(&mut self, keys: &[Option<SortKey>]) {
        self.sort_keys = keys.iter().map_while(|key| *key).collect();
    }

    /// Applies a change of the `index`th "Group by" dropdown.
    pub fn select_grouping(&mut self, index: usize, value: Option<ColumnKey>) {
        update_key_list(&mut self.group_keys, index, value);
    }

    /// Applies a change of the `index`th "Sort by" dropdown.
    pub fn select_sorting(&mut self, index: usize, value: Option<SortKey>) {
        update_key_list(&mut self.sort_keys, index, value);
    }

    /// Handles a click on a column header.
    ///
    /// A plain click makes the column the primary sort; clicking the primary
    /// column again reverses it and drops any secondary sorts. A click with
    /// the modifier held adds the column as a secondary sort, or reverses it
    /// if it is already sorted on.
    pub fn click_column(&mut self, registry: &ColumnRegistry, column: ColumnKey, modifier: bool) {
        // Columns which prefer to start off descending get flipped.
        let mut key = SortKey::ascending(column);
        if registry.descriptor(column).sort_descending {
            key = key.reversed();
        }

        // If already sorted on this column, reverse that entry in place.
        let found = self.sort_keys.iter().position(|current| current.matches(key));
        if let Some(i) = found {
            self.sort_keys[i] = self.sort_keys[i].reversed();
        }

        if modifier {
            if found.is_none() {
                self.sort_keys.push(key);
            }
        } else if found == Some(0) {
            self.sort_keys.truncate(1);
        } else {
            self.sort_keys = vec![key];
        }
    }

    pub fn set_column_visible(&mut self, key: ColumnKey, visible: bool) {
        if visible {
            self.visible_columns.insert(key);
        } else {
            self.visible_columns.remove(&key);
        }
    }

    pub fn set_visible_columns(&mut self, columns: impl IntoIterator<Item = ColumnKey>) {
        self.visible_columns = columns.into_iter().collect();
    }

    // ========================================================================
    // DROPDOWN MODELS
    // ========================================================================

    /// One "Group by" dropdown per grouping key, plus a trailing empty one.
    pub fn grouping_dropdowns(&self, registry: &ColumnRegistry, settings: &ViewSettings) -> Vec<SelectModel> {
        let mut options = vec![SelectOption::none()];
        options.extend(
            settings
                .grouping_choices
                .iter()
                .map(|key| SelectOption::new(key.to_string(), registry.name_for_key(*key))),
        );

        (0..=self.group_keys.len())
            .map(|index| SelectModel {
                index,
                selected: self
                    .group_keys
                    .get(index)
                    .map(|key| key.to_string())
                    .unwrap_or_default(),
                options: options.clone(),
            })
            .collect()
    }

    /// One "Sort by" dropdown per sort key, plus a trailing empty one. Every
    /// column is offered ascending, then again descending.
    pub fn sorting_dropdowns(&self, registry: &ColumnRegistry) -> Vec<SelectModel> {
        let mut options = vec![SelectOption::none()];
        for key in ColumnKey::ALL {
            options.push(SelectOption::new(
                SortKey::ascending(key).to_string(),
                registry.name_for_key(key),
            ));
        }
        for key in ColumnKey::ALL {
            options.push(SelectOption::new(
                SortKey::descending(key).to_string(),
                format!("{} (DESC)", registry.name_for_key(key)),
            ));
        }

        (0..=self.sort_keys.len())
            .map(|index| SelectModel {
                index,
                selected: self
                    .sort_keys
                    .get(index)
                    .map(|key| key.to_string())
                    .unwrap_or_default(),
                options: options.clone(),
            })
            .collect()
    }
}

/// Replaces (or appends) entry `index`, then cuts the list at the first
/// empty entry so clearing the primary choice clears everything after it.
fn update_key_list<T: Copy>(list: &mut Vec<T>, index: usize, value: Option<T>) {
    match value {
        Some(v) if index < list.len() => list[index] = v,
        Some(v) => list.push(v),
        None => list.truncate(index),
    }
}
