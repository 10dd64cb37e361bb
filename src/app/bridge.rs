//! Builds the scripts that deliver menu events to the web content.
//!
//! The content listens for DOM `CustomEvent`s on `window`; the event name is
//! the channel and `detail` carries the payload.

use serde_json::Value;

use super::events::WindowMessage;
use crate::core::Command;

/// Channel used for workspace switches.
pub const SWITCH_WORKSPACE_CHANNEL: &str = "switch-workspace";

/// Script raising `channel` with `payload` on the content's `window`.
pub fn emit_script(channel: &str, payload: &Value) -> String {
    // Serializing the channel yields a correctly escaped JS string literal.
    let channel = Value::from(channel);
    format!("window.dispatchEvent(new CustomEvent({channel}, {{ detail: {payload} }}));")
}

/// Script for a named command. Commands carry no payload.
pub fn command_script(command: Command) -> String {
    emit_script(command.name(), &Value::Null)
}

/// Script for a message addressed to one window.
pub fn window_message_script(message: &WindowMessage) -> String {
    match message {
        WindowMessage::SwitchWorkspace(index) => {
            emit_script(SWITCH_WORKSPACE_CHANNEL, &Value::from(index.get()))
        }
    }
}
