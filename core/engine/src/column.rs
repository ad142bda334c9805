//! FILENAME: core/engine/src/column.rs
//! PURPOSE: Identifiers for the columns of a tracking row and signed sort keys.
//! CONTEXT: Every field of a row is addressed by a `ColumnKey`. The declaration
//! order is also the default display order. Each key has a stable 1-based id
//! which is used as the option value in the "Group by" / "Sort by" dropdowns;
//! a negative id denotes a descending sort key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of columns in a tracking row.
pub const COLUMN_COUNT: usize = 15;

/// Identifies one field of a tracking row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnKey {
    Count,
    RunTime,
    AvgRunTime,
    MaxRunTime,
    QueueTime,
    AvgQueueTime,
    MaxQueueTime,
    BirthThread,
    DeathThread,
    ProcessType,
    ProcessId,
    FunctionName,
    SourceLocation,
    FileName,
    LineNumber,
}

impl ColumnKey {
    /// All keys, in declaration (display) order.
    pub const ALL: [ColumnKey; COLUMN_COUNT] = [
        ColumnKey::Count,
        ColumnKey::RunTime,
        ColumnKey::AvgRunTime,
        ColumnKey::MaxRunTime,
        ColumnKey::QueueTime,
        ColumnKey::AvgQueueTime,
        ColumnKey::MaxQueueTime,
        ColumnKey::BirthThread,
        ColumnKey::DeathThread,
        ColumnKey::ProcessType,
        ColumnKey::ProcessId,
        ColumnKey::FunctionName,
        ColumnKey::SourceLocation,
        ColumnKey::FileName,
        ColumnKey::LineNumber,
    ];

    /// 0-based position of this key inside a row.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable 1-based identifier. Starts at 1 so that it can carry a sign.
    pub fn id(self) -> i32 {
        self.index() as i32 + 1
    }

    /// Looks up a key by its 1-based identifier.
    pub fn from_id(id: i32) -> Option<ColumnKey> {
        if id < 1 {
            return None;
        }
        ColumnKey::ALL.get((id - 1) as usize).copied()
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ColumnKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .ok()
            .and_then(ColumnKey::from_id)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

// ============================================================================
// SORT KEYS
// ============================================================================

/// A column to sort on, plus a direction. The textual form is the column id,
/// negated when descending ("-1" = Count, descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub column: ColumnKey,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(column: ColumnKey) -> Self {
        SortKey { column, descending: false }
    }

    pub fn descending(column: ColumnKey) -> Self {
        SortKey { column, descending: true }
    }

    /// The same column sorted in the opposite direction.
    pub fn reversed(self) -> Self {
        SortKey {
            column: self.column,
            descending: !self.descending,
        }
    }

    /// True when both keys sort on the same column, whatever the direction.
    pub fn matches(self, other: SortKey) -> bool {
        self.column == other.column
    }

    /// Signed id: negative for descending.
    pub fn signed_id(self) -> i32 {
        if self.descending {
            -self.column.id()
        } else {
            self.column.id()
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signed_id())
    }
}

impl FromStr for SortKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: i32 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::UnknownKey(s.to_string()))?;
        let column =
            ColumnKey::from_id(id.abs()).ok_or_else(|| ConfigError::UnknownKey(s.to_string()))?;
        Ok(SortKey {
            column,
            descending: id < 0,
        })
    }
}
