//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

use crate::column::ColumnKey;

/// Errors in the static column configuration. These indicate a programming
/// error in the registry and are not recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Did not define properties for key: {0:?}")]
    MissingDescriptor(ColumnKey),

    #[error("Properties defined more than once for key: {0:?}")]
    DuplicateDescriptor(ColumnKey),

    #[error("Unknown column key: '{0}'")]
    UnknownKey(String),
}
