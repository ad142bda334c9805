//! FILENAME: core/engine/src/row.rs
//! PURPOSE: The fixed-shape row record shared by ingestion and the query engine.
//! CONTEXT: Each row is an array of values addressed by `ColumnKey` rather than
//! a dictionary, which keeps field access O(1) and avoids repeating key
//! strings. `seq` records ingestion order and is used as the last tie-breaker
//! when sorting.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::column::{ColumnKey, COLUMN_COUNT};

/// One normalized profiling record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Position of this row in ingestion order (0-based).
    pub seq: u64,

    /// Field values, indexed by `ColumnKey::index()`.
    values: [CellValue; COLUMN_COUNT],
}

impl Row {
    /// Creates a row with every field empty.
    pub fn new(seq: u64) -> Self {
        Row {
            seq,
            values: std::array::from_fn(|_| CellValue::Empty),
        }
    }

    pub fn get(&self, key: ColumnKey) -> &CellValue {
        &self.values[key.index()]
    }

    pub fn set(&mut self, key: ColumnKey, value: CellValue) {
        self.values[key.index()] = value;
    }

    /// Builder-style setter, handy for fixtures.
    pub fn with(mut self, key: ColumnKey, value: impl Into<CellValue>) -> Self {
        self.set(key, value.into());
        self
    }

    /// Iterates `(key, value)` pairs in column declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ColumnKey, &CellValue)> {
        ColumnKey::ALL.iter().copied().zip(self.values.iter())
    }
}

impl Index<ColumnKey> for Row {
    type Output = CellValue;

    fn index(&self, key: ColumnKey) -> &CellValue {
        self.get(key)
    }
}

impl IndexMut<ColumnKey> for Row {
    fn index_mut(&mut self, key: ColumnKey) -> &mut CellValue {
        &mut self.values[key.index()]
    }
}
