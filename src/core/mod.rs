//! Platform-independent menu model and the template builder.

pub mod builder;
pub mod command;
pub mod error;
pub mod keymap;
pub mod menu;
pub mod platform;

pub use builder::{build_menu_template, APP_NAME, HELP_MENU};
pub use command::{Command, WorkspaceIndex};
pub use error::MenuError;
pub use keymap::Keymap;
pub use menu::{MenuAction, MenuItem, MenuNode, Role, Submenu, ZoomStep};
pub use platform::PlatformProfile;
