//! FILENAME: core/tracking-engine/src/definition.rs
//! Column Registry - The static description of every displayable field.
//!
//! This module contains all the types needed to DESCRIBE the tracking table:
//! - One `ColumnDescriptor` per `ColumnKey` (name, comparator, printer,
//!   alignment, default sort direction, aggregator factory, input path)
//! - The `ColumnRegistry`, validated once at startup
//! - `ViewSettings`: the initial and default UI configuration

use std::cmp::Ordering;
use std::fmt;

use engine::{format_number_as_text, simple_compare, CellValue, ColumnKey, ConfigError, SortKey, COLUMN_COUNT};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatorKind;

/// Custom ordering for the values of one column.
pub type Comparator = fn(&CellValue, &CellValue) -> Ordering;

/// Transforms a value into the text shown in the table.
pub type TextPrinter = fn(&CellValue) -> String;

// ============================================================================
// ALIGNMENT
// ============================================================================

/// Horizontal alignment for the cells of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellAlignment {
    #[default]
    Left,
    Center,
    Right,
}

// ============================================================================
// COLUMN DESCRIPTOR
// ============================================================================

/// Static metadata for one column.
#[derive(Clone)]
pub struct ColumnDescriptor {
    /// The column this descriptor belongs to.
    pub key: ColumnKey,

    /// Displayed as the column's label.
    pub name: &'static str,

    /// Comparator used when sorting on this column. `None` uses `simple_compare`.
    pub comparator: Option<Comparator>,

    /// Produces the displayed text. `None` uses the plain display value.
    pub text_printer: Option<TextPrinter>,

    /// Cell alignment. `None` means left aligned.
    pub cell_alignment: Option<CellAlignment>,

    /// When first clicking this column, sort descending instead of ascending.
    pub sort_descending: bool,

    /// Aggregator factory used to summarize this column per group.
    pub aggregator: Option<AggregatorKind>,

    /// Dot-separated path of this property in the raw JSON record. When
    /// present the value is populated automatically during import.
    pub input_json_key: Option<&'static str>,
}

impl ColumnDescriptor {
    pub fn new(key: ColumnKey, name: &'static str) -> Self {
        ColumnDescriptor {
            key,
            name,
            comparator: None,
            text_printer: None,
            cell_alignment: None,
            sort_descending: false,
            aggregator: None,
            input_json_key: None,
        }
    }

    pub fn align(mut self, alignment: CellAlignment) -> Self {
        self.cell_alignment = Some(alignment);
        self
    }

    pub fn sort_descending(mut self) -> Self {
        self.sort_descending = true;
        self
    }

    pub fn printer(mut self, printer: TextPrinter) -> Self {
        self.text_printer = Some(printer);
        self
    }

    pub fn comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    pub fn aggregator(mut self, kind: AggregatorKind) -> Self {
        self.aggregator = Some(kind);
        self
    }

    pub fn input(mut self, path: &'static str) -> Self {
        self.input_json_key = Some(path);
        self
    }

    /// Shorthand for the numeric timing/count columns: right aligned,
    /// descending by default, printed with thousands separators.
    fn numeric(self) -> Self {
        self.align(CellAlignment::Right)
            .sort_descending()
            .printer(number_as_text)
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("has_comparator", &self.comparator.is_some())
            .field("has_text_printer", &self.text_printer.is_some())
            .field("cell_alignment", &self.cell_alignment)
            .field("sort_descending", &self.sort_descending)
            .field("aggregator", &self.aggregator)
            .field("input_json_key", &self.input_json_key)
            .finish()
    }
}

// ============================================================================
// COMPARATORS AND PRINTERS
// ============================================================================

/// Thread names that sort ahead of everything else, in this order.
const PRIORITY_THREAD_NAMES: [&str; 6] = [
    "CrBrowserMain",
    "Chrome_IOThread",
    "Chrome_FileThread",
    "Chrome_HistoryThread",
    "Chrome_DBThread",
    "Still_Alive",
];

fn thread_rank(value: &CellValue) -> usize {
    match value {
        CellValue::Text(name) => PRIORITY_THREAD_NAMES
            .iter()
            .position(|candidate| candidate == name)
            .unwrap_or(usize::MAX),
        _ => usize::MAX,
    }
}

/// Lexicographic comparison of thread names, except that the main and IO
/// threads (and a few other well-known ones) rank higher.
pub fn compare_thread_names(a: &CellValue, b: &CellValue) -> Ordering {
    let a_rank = thread_rank(a);
    let b_rank = thread_rank(b);

    // Not matched by any of our exceptions.
    if a_rank == b_rank {
        return simple_compare(a, b);
    }
    a_rank.cmp(&b_rank)
}

/// Printer for numeric columns. Absent values print as empty text.
pub fn number_as_text(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        other => format_number_as_text(other.as_number()),
    }
}

// ============================================================================
// STANDARD TABLE
// ============================================================================

/// The built-in descriptor table for profiler tracking data.
pub fn standard_descriptors() -> Vec<ColumnDescriptor> {
    use AggregatorKind::{Max, Sum, UniqueCount};

    vec![
        ColumnDescriptor::new(ColumnKey::ProcessId, "PID")
            .align(CellAlignment::Right)
            .aggregator(UniqueCount),
        ColumnDescriptor::new(ColumnKey::ProcessType, "Process type").aggregator(UniqueCount),
        ColumnDescriptor::new(ColumnKey::BirthThread, "Birth thread")
            .input("birth_thread")
            .aggregator(UniqueCount)
            .comparator(compare_thread_names),
        ColumnDescriptor::new(ColumnKey::DeathThread, "Exec thread")
            .input("death_thread")
            .aggregator(UniqueCount)
            .comparator(compare_thread_names),
        ColumnDescriptor::new(ColumnKey::FunctionName, "Function name")
            .input("location.function_name")
            .aggregator(UniqueCount),
        ColumnDescriptor::new(ColumnKey::FileName, "File name")
            .input("location.file_name")
            .aggregator(UniqueCount),
        ColumnDescriptor::new(ColumnKey::LineNumber, "Line number")
            .align(CellAlignment::Right)
            .input("location.line_number")
            .aggregator(UniqueCount),
        ColumnDescriptor::new(ColumnKey::Count, "Count")
            .numeric()
            .input("death_data.count")
            .aggregator(Sum),
        ColumnDescriptor::new(ColumnKey::QueueTime, "Total queue time")
            .numeric()
            .input("death_data.queue_ms")
            .aggregator(Sum),
        ColumnDescriptor::new(ColumnKey::MaxQueueTime, "Max queue time")
            .numeric()
            .input("death_data.queue_ms_max")
            .aggregator(Max),
        ColumnDescriptor::new(ColumnKey::RunTime, "Total run time")
            .numeric()
            .input("death_data.run_ms")
            .aggregator(Sum),
        ColumnDescriptor::new(ColumnKey::AvgRunTime, "Avg run time")
            .numeric()
            .aggregator(AggregatorKind::Average {
                numerator: ColumnKey::RunTime,
                divisor: ColumnKey::Count,
            }),
        ColumnDescriptor::new(ColumnKey::MaxRunTime, "Max run time")
            .numeric()
            .input("death_data.run_ms_max")
            .aggregator(Max),
        ColumnDescriptor::new(ColumnKey::AvgQueueTime, "Avg queue time")
            .numeric()
            .aggregator(AggregatorKind::Average {
                numerator: ColumnKey::QueueTime,
                divisor: ColumnKey::Count,
            }),
        ColumnDescriptor::new(ColumnKey::SourceLocation, "Source location").aggregator(UniqueCount),
    ]
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Validated lookup table from `ColumnKey` to its descriptor.
/// Construction fails unless every key has exactly one descriptor, so the
/// rest of the system may index it blindly.
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    /// Descriptors in `ColumnKey::ALL` order.
    descriptors: Vec<ColumnDescriptor>,
}

impl ColumnRegistry {
    /// Builds the registry, checking that every known key is described once.
    pub fn from_descriptors(descriptors: Vec<ColumnDescriptor>) -> Result<Self, ConfigError> {
        let mut slots: Vec<Option<ColumnDescriptor>> = vec![None; COLUMN_COUNT];

        for descriptor in descriptors {
            let slot = &mut slots[descriptor.key.index()];
            if slot.is_some() {
                return Err(ConfigError::DuplicateDescriptor(descriptor.key));
            }
            *slot = Some(descriptor);
        }

        let mut ordered = Vec::with_capacity(COLUMN_COUNT);
        for (key, slot) in ColumnKey::ALL.iter().zip(slots) {
            match slot {
                Some(descriptor) => ordered.push(descriptor),
                None => return Err(ConfigError::MissingDescriptor(*key)),
            }
        }

        Ok(ColumnRegistry { descriptors: ordered })
    }

    /// The registry for the built-in profiler columns.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::from_descriptors(standard_descriptors())
    }

    /// Returns the descriptor for `key`.
    pub fn describe(&self, key: ColumnKey) -> Result<&ColumnDescriptor, ConfigError> {
        self.descriptors
            .get(key.index())
            .filter(|d| d.key == key)
            .ok_or(ConfigError::MissingDescriptor(key))
    }

    /// Infallible lookup; the registry was validated on construction.
    pub fn descriptor(&self, key: ColumnKey) -> &ColumnDescriptor {
        &self.descriptors[key.index()]
    }

    pub fn name_for_key(&self, key: ColumnKey) -> &'static str {
        self.descriptor(key).name
    }

    /// Compares two values of column `key`, using the column's comparator if
    /// it has one.
    pub fn compare_values_for_key(&self, key: ColumnKey, a: &CellValue, b: &CellValue) -> Ordering {
        match self.descriptor(key).comparator {
            Some(comparator) => comparator(a, b),
            None => simple_compare(a, b),
        }
    }

    /// The user-displayed text for `value` in column `key`.
    pub fn text_for_value(&self, key: ColumnKey, value: &CellValue) -> String {
        match self.descriptor(key).text_printer {
            Some(printer) => printer(value),
            None => value.display_value(),
        }
    }

    /// Columns that carry an aggregator, with their factory.
    pub fn aggregatable_columns(&self) -> impl Iterator<Item = (ColumnKey, AggregatorKind)> + '_ {
        self.descriptors
            .iter()
            .filter_map(|d| d.aggregator.map(|kind| (d.key, kind)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.descriptors.iter()
    }
}

// ============================================================================
// VIEW SETTINGS
// ============================================================================

/// Initial and default UI configuration. Every field has a default, so a
/// host only needs to send the fields it wants to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Keys to sort by when the page loads.
    pub initial_sort_keys: Vec<SortKey>,

    /// Keys to sort by when nothing has been specified.
    pub default_sort_keys: Vec<SortKey>,

    /// Keys to group by when the page loads.
    pub initial_group_keys: Vec<ColumnKey>,

    /// Columns initially left out of the table.
    pub initially_hidden: Vec<ColumnKey>,

    /// Ordered choices for the "Group by" dropdowns. Numeric columns are left
    /// out since they lead to awkward bucketing.
    pub grouping_choices: Vec<ColumnKey>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        ViewSettings {
            initial_sort_keys: vec![SortKey::descending(ColumnKey::Count)],
            default_sort_keys: vec![SortKey::descending(ColumnKey::Count)],
            initial_group_keys: Vec::new(),
            initially_hidden: vec![ColumnKey::FileName, ColumnKey::LineNumber, ColumnKey::QueueTime],
            grouping_choices: vec![
                ColumnKey::ProcessType,
                ColumnKey::ProcessId,
                ColumnKey::BirthThread,
                ColumnKey::DeathThread,
                ColumnKey::FunctionName,
                ColumnKey::SourceLocation,
                ColumnKey::FileName,
                ColumnKey::LineNumber,
            ],
        }
    }
}

impl ViewSettings {
    /// Parses settings from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_describes_every_key() {
        let registry = ColumnRegistry::standard().unwrap();
        for key in ColumnKey::ALL {
            let descriptor = registry.describe(key).unwrap();
            assert_eq!(descriptor.key, key);
            assert!(!descriptor.name.is_empty());
        }
    }

    #[test]
    fn test_missing_descriptor_is_a_configuration_error() {
        let descriptors: Vec<ColumnDescriptor> = standard_descriptors()
            .into_iter()
            .filter(|d| d.key != ColumnKey::SourceLocation)
            .collect();
        let err = ColumnRegistry::from_descriptors(descriptors).unwrap_err();
        assert_eq!(err, ConfigError::MissingDescriptor(ColumnKey::SourceLocation));
    }

    #[test]
    fn test_duplicate_descriptor_is_rejected() {
        let mut descriptors = standard_descriptors();
        descriptors.push(ColumnDescriptor::new(ColumnKey::Count, "Count again"));
        let err = ColumnRegistry::from_descriptors(descriptors).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateDescriptor(ColumnKey::Count));
    }

    #[test]
    fn test_thread_comparator_ranks_well_known_threads_first() {
        let main = CellValue::text("CrBrowserMain");
        let io = CellValue::text("Chrome_IOThread");
        let worker = CellValue::text("AWorkerThread");
        let other = CellValue::text("ZWorkerThread");

        assert_eq!(compare_thread_names(&main, &io), Ordering::Less);
        assert_eq!(compare_thread_names(&io, &worker), Ordering::Less);
        assert_eq!(compare_thread_names(&worker, &other), Ordering::Less);
        assert_eq!(compare_thread_names(&other, &main), Ordering::Greater);
        assert_eq!(compare_thread_names(&main, &main), Ordering::Equal);
        assert_eq!(compare_thread_names(&CellValue::Empty, &worker), Ordering::Less);
    }

    #[test]
    fn test_custom_comparators_are_reflexive_and_total() {
        let registry = ColumnRegistry::standard().unwrap();
        let mut values = vec![
            CellValue::text("Still_Alive"),
            CellValue::text("WorkerPool/1"),
            CellValue::Empty,
            CellValue::text("CrBrowserMain"),
            CellValue::Number(7.0),
            CellValue::text("Chrome_DBThread"),
            CellValue::text("AudioThread"),
        ];
        for v in &values {
            assert_eq!(registry.compare_values_for_key(ColumnKey::BirthThread, v, v), Ordering::Equal);
        }
        values.sort_by(|a, b| registry.compare_values_for_key(ColumnKey::BirthThread, a, b));
        for pair in values.windows(2) {
            let forward = registry.compare_values_for_key(ColumnKey::BirthThread, &pair[0], &pair[1]);
            let backward = registry.compare_values_for_key(ColumnKey::BirthThread, &pair[1], &pair[0]);
            assert_ne!(forward, Ordering::Greater);
            assert_eq!(forward, backward.reverse());
        }
        assert_eq!(values[0], CellValue::text("CrBrowserMain"));
    }

    #[test]
    fn test_text_for_value() {
        let registry = ColumnRegistry::standard().unwrap();
        assert_eq!(registry.text_for_value(ColumnKey::Count, &CellValue::Number(1325.0)), "1,325");
        assert_eq!(registry.text_for_value(ColumnKey::Count, &CellValue::Empty), "");
        assert_eq!(registry.text_for_value(ColumnKey::LineNumber, &CellValue::Number(1325.0)), "1325");
        assert_eq!(registry.text_for_value(ColumnKey::FileName, &CellValue::text("a.cc")), "a.cc");
    }

    #[test]
    fn test_view_settings_defaults_and_overrides() {
        let defaults = ViewSettings::default();
        assert_eq!(defaults.initial_sort_keys, vec![SortKey::descending(ColumnKey::Count)]);
        assert_eq!(defaults.initially_hidden.len(), 3);

        let settings = ViewSettings::from_json(r#"{"initial_group_keys":["ProcessType"]}"#).unwrap();
        assert_eq!(settings.initial_group_keys, vec![ColumnKey::ProcessType]);
        assert_eq!(settings.default_sort_keys, defaults.default_sort_keys);
    }
}
