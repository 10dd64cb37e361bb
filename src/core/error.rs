//! Defines the custom error type for menu construction and dispatch.

use thiserror::Error;

/// The primary error type for the menu shell.
///
/// Building a menu template never fails; these errors come from the
/// edges: parsing what the web content sends us, and handing the
/// finished tree to the native menu bar.
#[derive(Debug, Error)]
pub enum MenuError {
    /// A workspace index outside the nine spaces the menu exposes.
    #[error("Workspace index {0} is out of range (expected 0..=8)")]
    WorkspaceOutOfRange(u8),

    /// An IPC message named a command the shell does not handle.
    #[error("Unknown IPC command: {0}")]
    UnknownIpcCommand(String),

    /// An IPC message could not be decoded.
    #[error("Malformed IPC message: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// An accelerator string that the native menu could not parse.
    #[error("Invalid accelerator {accelerator:?} for {label:?}: {reason}")]
    InvalidAccelerator {
        label: String,
        accelerator: String,
        reason: String,
    },

    /// The native menu refused to attach to a window or the application.
    #[error("Failed to install native menu: {0}")]
    Install(#[from] muda::Error),

    /// A window or its webview could not be created.
    #[error("Failed to open window: {0}")]
    Window(String),
}
