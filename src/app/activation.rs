//! Turns an activated menu action into a one-way message for the event loop.

use super::events::{UserEvent, WindowHandle, WindowMessage};
use super::proxy::EventProxy;
use crate::core::MenuAction;

/// What the host knows about a menu activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationContext {
    /// The window the menu was activated from, if any. On macOS the menu bar
    /// stays usable with every window closed, so this can be absent.
    pub window: Option<WindowHandle>,
}

impl ActivationContext {
    pub fn for_window(window: WindowHandle) -> Self {
        Self {
            window: Some(window),
        }
    }
}

/// Posts the message that carries out `action`.
///
/// Window-targeted actions need a window handle; without one they are
/// dropped. A workspace switch logs a warning in that case.
pub fn activate<P: EventProxy>(action: &MenuAction, context: &ActivationContext, proxy: &P) {
    let event = match action {
        MenuAction::Emit(command) => UserEvent::DispatchCommand(*command),
        MenuAction::OpenWindow => UserEvent::OpenWindow,
        MenuAction::OpenExternal(url) => UserEvent::OpenExternal((*url).to_string()),
        MenuAction::CheckForUpdates => UserEvent::CheckForUpdates,
        MenuAction::NewWindowEvent => UserEvent::NewWindowEvent,
        MenuAction::SwitchWorkspace(index) => match context.window {
            Some(window) => UserEvent::SendToWindow {
                window,
                message: WindowMessage::SwitchWorkspace(*index),
            },
            None => {
                tracing::warn!(
                    "Failed to emit `switch-workspace` ipc event because the window for menu item is missing"
                );
                return;
            }
        },
        MenuAction::ToggleHostDevTools => match context.window {
            Some(window) => UserEvent::ToggleHostDevTools { window },
            None => {
                tracing::debug!("No window to toggle devtools on, ignoring.");
                return;
            }
        },
        MenuAction::Zoom(step) => match context.window {
            Some(window) => UserEvent::Zoom {
                window,
                step: *step,
            },
            None => {
                tracing::debug!("No window to zoom, ignoring.");
                return;
            }
        },
    };

    tracing::debug!("Menu action `{}` -> {:?}", action, event);
    proxy.send_event(event);
}
