//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point (presentation controller).
// CONTEXT: Owns the row store and the UI state behind mutexes; every command
// mutates state and returns a freshly computed view.

use std::sync::{Mutex, MutexGuard};

use tracking_engine::{ColumnRegistry, RowStore, UiState, ViewSettings};

pub mod api_types;
pub mod bridge;
pub mod commands;
pub mod error;
pub mod logging;

pub use api_types::*;
pub use bridge::{received_data, request_data, reset_data, HostBridge, HostRequest};
pub use commands::*;
pub use error::AppError;

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct AppState {
    /// Every ingested row. Appended by `add_data`, emptied by `clear_data`.
    pub rows: Mutex<RowStore>,
    /// Sort, grouping, visibility and filter selections.
    pub ui: Mutex<UiState>,
    /// Column descriptors, validated at startup.
    pub registry: ColumnRegistry,
    pub settings: ViewSettings,
}

/// Creates the state with the built-in column table and default settings.
pub fn create_app_state() -> Result<AppState, AppError> {
    create_app_state_with_settings(ViewSettings::default())
}

pub fn create_app_state_with_settings(settings: ViewSettings) -> Result<AppState, AppError> {
    log_info!("SYS", "Creating AppState");

    let registry = ColumnRegistry::standard().map_err(|e| {
        log_error!("SYS", "column registry is invalid: {}", e);
        e
    })?;

    Ok(AppState {
        rows: Mutex::new(RowStore::new()),
        ui: Mutex::new(UiState::new(&settings)),
        registry,
        settings,
    })
}

/// Locks `mutex`, turning a poisoned lock into an `AppError`.
pub fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, AppError> {
    mutex
        .lock()
        .map_err(|e| AppError::Lock(format!("{}: {}", what, e)))
}

impl AppState {
    /// Applies `f` to the UI state under its lock.
    pub fn update_ui<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> Result<R, AppError> {
        let mut ui = lock(&self.ui, "ui")?;
        Ok(f(&mut ui))
    }
}
