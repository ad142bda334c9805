//! FILENAME: app/src/bridge.rs
//! PURPOSE: Message bridge between the view and the host application.
//! CONTEXT: The host pushes data batches as JSON; the view sends two
//! argument-less requests back. The transport itself belongs to the host and
//! is reached through `HostBridge`.

use std::fmt;

use tracking_engine::ProcessBatch;

use crate::api_types::ViewResponse;
use crate::commands::{add_data, clear_data};
use crate::{log_debug, log_info, AppError, AppState};

/// Messages sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Ask the host to send the current tracking data.
    GetData,
    /// Ask the host to reset its tracking data.
    ResetData,
}

impl HostRequest {
    /// Message name understood by the host.
    pub fn message_name(self) -> &'static str {
        match self {
            HostRequest::GetData => "getData",
            HostRequest::ResetData => "resetData",
        }
    }
}

impl fmt::Display for HostRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_name())
    }
}

/// Outbound transport, implemented by the host integration.
pub trait HostBridge {
    fn send(&self, request: HostRequest);
}

/// Asks the host for the current data. The reply arrives via `received_data`.
pub fn request_data(bridge: &dyn HostBridge) {
    log_debug!("BRIDGE", "send {}", HostRequest::GetData);
    bridge.send(HostRequest::GetData);
}

/// Clears the local row store and tells the host to reset its data.
pub fn reset_data(state: &AppState, bridge: &dyn HostBridge) -> Result<ViewResponse, AppError> {
    let response = clear_data(state)?;
    log_debug!("BRIDGE", "send {}", HostRequest::ResetData);
    bridge.send(HostRequest::ResetData);
    Ok(response)
}

/// Entry point for a data message from the host:
/// `{"process_id": ..., "process_type": ..., "list": [...]}`.
pub fn received_data(state: &AppState, json: &str) -> Result<ViewResponse, AppError> {
    let batch: ProcessBatch = serde_json::from_str(json)?;
    log_info!("BRIDGE", "received {} records from pid {}", batch.list.len(), batch.process_id);
    add_data(state, &batch)
}
