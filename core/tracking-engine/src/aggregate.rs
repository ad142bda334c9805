//! FILENAME: core/tracking-engine/src/aggregate.rs
//! Aggregators - streaming per-group summaries of one column.
//!
//! An `AggregatorKind` is the factory stored in the column registry. For each
//! group of each query evaluation a fresh `Aggregator` is created from it,
//! fed every row of the group via `consume`, and finally asked for its
//! `render_text`. Accumulation is order independent.

use engine::{format_number_as_text, CellValue, ColumnKey, Row};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Aggregator factory, bound to its source column(s) at registry definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregatorKind {
    /// Counts the number of distinct values.
    UniqueCount,
    /// Sums a numeric column.
    Sum,
    /// Sums two numeric columns independently and divides the totals.
    Average {
        numerator: ColumnKey,
        divisor: ColumnKey,
    },
    /// Tracks the maximum of a numeric column.
    Max,
}

impl AggregatorKind {
    /// Creates a fresh aggregator for the column `column`. `Average` ignores
    /// `column` and reads the columns it was bound to.
    pub fn create(self, column: ColumnKey) -> Aggregator {
        match self {
            AggregatorKind::UniqueCount => Aggregator::UniqueCount {
                column,
                values: FxHashSet::default(),
            },
            AggregatorKind::Sum => Aggregator::Sum { column, sum: 0.0 },
            AggregatorKind::Average { numerator, divisor } => Aggregator::Average {
                numerator,
                divisor,
                numerator_sum: 0.0,
                divisor_sum: 0.0,
            },
            AggregatorKind::Max => Aggregator::Max {
                column,
                max: f64::NEG_INFINITY,
            },
        }
    }
}

/// Stateful accumulator for one (group, column) pair.
#[derive(Debug, Clone)]
pub enum Aggregator {
    UniqueCount {
        column: ColumnKey,
        values: FxHashSet<CellValue>,
    },
    Sum {
        column: ColumnKey,
        sum: f64,
    },
    Average {
        numerator: ColumnKey,
        divisor: ColumnKey,
        numerator_sum: f64,
        divisor_sum: f64,
    },
    Max {
        column: ColumnKey,
        max: f64,
    },
}

impl Aggregator {
    /// Feeds one row into the accumulator.
    pub fn consume(&mut self, row: &Row) {
        match self {
            Aggregator::UniqueCount { column, values } => {
                let value = row.get(*column);
                if !values.contains(value) {
                    values.insert(value.clone());
                }
            }
            Aggregator::Sum { column, sum } => {
                *sum += row.get(*column).as_number();
            }
            Aggregator::Average {
                numerator,
                divisor,
                numerator_sum,
                divisor_sum,
            } => {
                *numerator_sum += row.get(*numerator).as_number();
                *divisor_sum += row.get(*divisor).as_number();
            }
            Aggregator::Max { column, max } => {
                let value = row.get(*column).as_number();
                // NaN is sticky here, unlike f64::max.
                *max = if value.is_nan() || max.is_nan() {
                    f64::NAN
                } else {
                    max.max(value)
                };
            }
        }
    }

    /// The aggregated value as display text.
    pub fn render_text(&self) -> String {
        match self {
            Aggregator::UniqueCount { values, .. } => format!("{} unique", values.len()),
            Aggregator::Sum { sum, .. } => format_number_as_text(*sum),
            Aggregator::Average {
                numerator_sum,
                divisor_sum,
                ..
            } => {
                if *divisor_sum == 0.0 {
                    "NaN".to_string()
                } else {
                    format_number_as_text(numerator_sum / divisor_sum)
                }
            }
            Aggregator::Max { max, .. } => format_number_as_text(*max),
        }
    }
}
