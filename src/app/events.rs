//! Defines the event and message structures for communication between the menu, the
//! event loop and the web content.

use serde::Deserialize;

use crate::core::{Command, Keymap, WorkspaceIndex, ZoomStep};

/// Identifies one application window for the lifetime of the process.
///
/// Handles are handed out by the window registry and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u32);

/// Messages sent directly to one window's content, bypassing the command adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowMessage {
    SwitchWorkspace(WorkspaceIndex),
}

/// Events posted to the tao event loop.
///
/// Every menu side effect travels as one of these: the sender never waits
/// for the outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// A native menu item was clicked. Carries the muda id of the item.
    MenuActivated(muda::MenuId),
    /// A named command for the focused window's content.
    DispatchCommand(Command),
    /// A message for one specific window's content.
    SendToWindow {
        window: WindowHandle,
        message: WindowMessage,
    },
    /// Toggle the devtools of one host window.
    ToggleHostDevTools { window: WindowHandle },
    /// Change the page zoom of one host window.
    Zoom { window: WindowHandle, step: ZoomStep },
    /// Process-wide `new-window-event`, observed by the shell.
    NewWindowEvent,
    /// Open a new window at the configured frontend URL.
    OpenWindow,
    /// Open a URL in the user's browser.
    OpenExternal(String),
    CheckForUpdates,
    /// The content replaced the user keymap; the menu must be rebuilt.
    KeymapChanged(Keymap),
}

/// A message received from the WebView via the IPC channel.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}
