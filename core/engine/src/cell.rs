//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the value stored in one field of a tracking row.
//! CONTEXT: Values arrive as loosely typed JSON from the host. A field whose
//! extraction path resolved to nothing is `CellValue::Empty`; it renders as an
//! empty string and coerces to NaN in arithmetic.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// The value of a single row field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric coercion used by arithmetic (aggregates, derived fields).
    /// Absent values and non-numeric text become NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Empty => f64::NAN,
            CellValue::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        }
    }

    /// Returns the plain display text of the value (no thousands grouping).
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number_plain(*n),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// Formats a number without grouping, dropping a zero fraction.
fn format_number_plain(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        // Adding 0.0 turns -0.0 into 0.0.
        format!("{:.0}", n + 0.0)
    } else {
        format!("{}", n)
    }
}

// ============================================================================
// EQUALITY, HASHING, ORDERING
// ============================================================================

// Equality is structural. NaN equals NaN so rows with absent numeric data
// still land in the same group; 0.0 and -0.0 are equal.
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => true,
            (CellValue::Number(a), CellValue::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a == b
            }
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Empty => {}
            CellValue::Number(n) => {
                if n.is_nan() {
                    // All NaN values hash to the same thing
                    u64::MAX.hash(state);
                } else if *n == 0.0 {
                    0u64.hash(state);
                } else {
                    n.to_bits().hash(state);
                }
            }
            CellValue::Text(s) => s.hash(state),
        }
    }
}

/// Compares two numbers as a total order consistent with `CellValue`
/// equality: NaN sorts after every other number.
fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Generic comparison used when a column has no custom comparator.
/// Works for both strings and numbers: Empty < Number < Text.
pub fn simple_compare(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
        (CellValue::Empty, _) => Ordering::Less,
        (_, CellValue::Empty) => Ordering::Greater,

        (CellValue::Number(na), CellValue::Number(nb)) => compare_numbers(*na, *nb),
        (CellValue::Number(_), _) => Ordering::Less,
        (_, CellValue::Number(_)) => Ordering::Greater,

        (CellValue::Text(ta), CellValue::Text(tb)) => ta.cmp(tb),
    }
}
