//! FILENAME: core/tracking-engine/src/engine.rs
//! Query Engine - groups, filters, aggregates and sorts rows.
//!
//! Given the full row set plus a grouping-key function, a filter predicate
//! and a row comparator, `evaluate` partitions the rows into groups, runs
//! every aggregator per group, and sorts the rows within each group.
//!
//! Algorithm:
//! 1. Single pass over the rows; rejected rows contribute nothing
//! 2. Accepted rows go to the bucket for their `GroupKey` (created lazily,
//!    with a fresh aggregator for every aggregatable column)
//! 3. Each bucket is sorted locally and its aggregators rendered to text
//!
//! No global sort is needed since ordering is local to each group. Group
//! display order is computed separately by `order_groups`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use engine::{simple_compare, CellValue, ColumnKey, Row, SortKey};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::aggregate::Aggregator;
use crate::definition::ColumnRegistry;

// ============================================================================
// GROUP KEY
// ============================================================================

/// One "column = value" constraint of a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKeyEntry {
    pub key: ColumnKey,
    pub value: CellValue,
}

/// A row's projection onto the active grouping dimensions, in grouping
/// order. Empty when no grouping is active (every row lands in one group).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey(pub SmallVec<[GroupKeyEntry; 4]>);

impl GroupKey {
    pub fn entries(&self) -> &[GroupKeyEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deterministic serialized form, used as the final group-ordering
    /// tie-break and as a stable id for the renderer.
    pub fn canonical(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Output of one group.
#[derive(Debug, Clone, Default)]
pub struct GroupData<'a> {
    /// Rows of the group, sorted with the row comparator.
    pub rows: Vec<&'a Row>,

    /// Rendered aggregate text per aggregatable column.
    pub aggregates: BTreeMap<ColumnKey, String>,
}

/// Every non-empty group produced by one evaluation.
pub type GroupedData<'a> = FxHashMap<GroupKey, GroupData<'a>>;

/// Accumulator bucket for one group during the pass.
struct Bucket<'a> {
    rows: Vec<&'a Row>,
    aggregators: Vec<(ColumnKey, Aggregator)>,
}

impl<'a> Bucket<'a> {
    fn new(registry: &ColumnRegistry) -> Self {
        Bucket {
            rows: Vec::new(),
            aggregators: registry
                .aggregatable_columns()
                .map(|(key, kind)| (key, kind.create(key)))
                .collect(),
        }
    }

    fn add(&mut self, row: &'a Row) {
        self.rows.push(row);
        for (_, aggregator) in &mut self.aggregators {
            aggregator.consume(row);
        }
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Groups, filters, aggregates and sorts `rows`.
pub fn evaluate<'a, G, F, C>(
    rows: &'a [Row],
    registry: &ColumnRegistry,
    group_key_fn: G,
    filter_fn: F,
    row_comparator: C,
) -> GroupedData<'a>
where
    G: Fn(&Row) -> GroupKey,
    F: Fn(&Row) -> bool,
    C: Fn(&Row, &Row) -> Ordering,
{
    let mut buckets: FxHashMap<GroupKey, Bucket<'a>> = FxHashMap::default();

    for row in rows {
        if !filter_fn(row) {
            continue;
        }

        buckets
            .entry(group_key_fn(row))
            .or_insert_with(|| Bucket::new(registry))
            .add(row);
    }

    buckets
        .into_iter()
        .map(|(group_key, mut bucket)| {
            bucket.rows.sort_by(|a, b| row_comparator(*a, *b));

            let aggregates = bucket
                .aggregators
                .iter()
                .map(|(key, aggregator)| (*key, aggregator.render_text()))
                .collect();

            (
                group_key,
                GroupData {
                    rows: bucket.rows,
                    aggregates,
                },
            )
        })
        .collect()
}

// ============================================================================
// QUERY FUNCTIONS
// ============================================================================

/// Projects a row onto `keys`. Repeated keys are redundant and dropped,
/// keeping the first occurrence.
pub fn grouping_function(keys: &[ColumnKey]) -> impl Fn(&Row) -> GroupKey {
    let mut groupings: Vec<ColumnKey> = Vec::with_capacity(keys.len());
    for key in keys {
        if !groupings.contains(key) {
            groupings.push(*key);
        }
    }

    move |row: &Row| {
        GroupKey(
            groupings
                .iter()
                .map(|key| GroupKeyEntry {
                    key: *key,
                    value: row.get(*key).clone(),
                })
                .collect(),
        )
    }
}

/// Normalizes filter text: surrounding whitespace trimmed, lowercased.
pub fn normalize_filter_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Accepts rows where any column's display text contains `text` (case
/// insensitive). An empty filter accepts everything.
pub fn filter_function<'r>(registry: &'r ColumnRegistry, text: &str) -> impl Fn(&Row) -> bool + 'r {
    let needle = normalize_filter_text(text);

    move |row: &Row| {
        if needle.is_empty() {
            return true;
        }
        row.iter().any(|(key, value)| {
            registry
                .text_for_value(key, value)
                .to_lowercase()
                .contains(needle.as_str())
        })
    }
}

/// Multi-key row comparator. Each key compares with its column's
/// comparator, reversed when descending. Rows equal on every key fall back
/// to `compare_rows_structurally`, so distinct rows never tie.
pub fn sorting_function<'r>(
    registry: &'r ColumnRegistry,
    sort_keys: &[SortKey],
) -> impl Fn(&Row, &Row) -> Ordering + 'r {
    let sort_keys = sort_keys.to_vec();

    move |a: &Row, b: &Row| {
        for sort_key in &sort_keys {
            let column = sort_key.column;
            let comparison = registry.compare_values_for_key(column, a.get(column), b.get(column));
            let comparison = if sort_key.descending {
                comparison.reverse()
            } else {
                comparison
            };

            if comparison != Ordering::Equal {
                return comparison;
            }
        }

        compare_rows_structurally(a, b)
    }
}

/// Tie breaker: every field in column order, then ingestion order.
pub fn compare_rows_structurally(a: &Row, b: &Row) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|((_, x), (_, y))| simple_compare(x, y))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or_else(|| a.seq.cmp(&b.seq))
}

// ============================================================================
// GROUP ORDERING
// ============================================================================

/// Compares group keys component-wise with each column's comparator, then
/// by canonical serialization. The canonical form is only built when every
/// component ties.
pub fn compare_group_keys(registry: &ColumnRegistry, a: &GroupKey, b: &GroupKey) -> Ordering {
    for (x, y) in a.entries().iter().zip(b.entries()) {
        let comparison = registry.compare_values_for_key(x.key, &x.value, &y.value);
        if comparison != Ordering::Equal {
            return comparison;
        }
    }
    a.canonical().cmp(&b.canonical())
}

/// Puts the groups of one evaluation in display order.
pub fn order_groups<'a>(
    registry: &ColumnRegistry,
    grouped: GroupedData<'a>,
) -> Vec<(GroupKey, GroupData<'a>)> {
    let mut entries: Vec<(GroupKey, GroupData<'a>)> = grouped.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| compare_group_keys(registry, a, b));
    entries
}
