//! The desktop side of the shell: event plumbing, windows, and the native
//! menu bar. Everything here runs on the event-loop thread.

pub mod activation;
pub mod bridge;
pub mod events;
pub mod ipc;
pub mod menu_bar;
pub mod proxy;
pub mod shell;
pub mod windows;

pub use activation::{activate, ActivationContext};
pub use events::{UserEvent, WindowHandle, WindowMessage};
pub use ipc::handle_ipc_message;
pub use proxy::EventProxy;
