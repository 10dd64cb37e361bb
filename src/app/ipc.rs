//! Handles messages the web content posts through the IPC channel.

use super::events::{IpcMessage, UserEvent};
use super::proxy::EventProxy;
use crate::core::{Keymap, MenuError};

/// The content replaced the user's keybindings.
pub const SET_KEYMAP: &str = "setKeymap";

/// Decodes one raw IPC message and posts the resulting event.
pub fn handle_ipc_message<P: EventProxy>(message: &str, proxy: &P) -> Result<(), MenuError> {
    let msg: IpcMessage = serde_json::from_str(message)?;

    match msg.command.as_str() {
        SET_KEYMAP => {
            let keymap: Keymap = serde_json::from_value(msg.payload)?;
            tracing::info!("Received keymap with {} bindings", keymap.len());
            proxy.send_event(UserEvent::KeymapChanged(keymap));
            Ok(())
        }
        _ => Err(MenuError::UnknownIpcCommand(msg.command)),
    }
}
