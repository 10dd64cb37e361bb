//! Named commands and workspace indices that menu items dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::MenuError;

/// A fire-and-forget signal delivered to the focused window's web content.
///
/// The kebab-case name is the wire name the frontend listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    ToggleSettings,
    CreateCloudSpace,
    NewDoc,
    SaveAs,
    ApplyBoldStyle,
    ApplyItalicStyle,
    Search,
    FocusEditor,
    FocusTitle,
    TogglePreviewMode,
    ToggleSplitEditMode,
    Reload,
    ForceReload,
    ToggleDevTools,
}

impl Command {
    pub const ALL: [Command; 14] = [
        Command::ToggleSettings,
        Command::CreateCloudSpace,
        Command::NewDoc,
        Command::SaveAs,
        Command::ApplyBoldStyle,
        Command::ApplyItalicStyle,
        Command::Search,
        Command::FocusEditor,
        Command::FocusTitle,
        Command::TogglePreviewMode,
        Command::ToggleSplitEditMode,
        Command::Reload,
        Command::ForceReload,
        Command::ToggleDevTools,
    ];

    /// The event name sent to the web content.
    pub fn name(self) -> &'static str {
        match self {
            Command::ToggleSettings => "toggle-settings",
            Command::CreateCloudSpace => "create-cloud-space",
            Command::NewDoc => "new-doc",
            Command::SaveAs => "save-as",
            Command::ApplyBoldStyle => "apply-bold-style",
            Command::ApplyItalicStyle => "apply-italic-style",
            Command::Search => "search",
            Command::FocusEditor => "focus-editor",
            Command::FocusTitle => "focus-title",
            Command::TogglePreviewMode => "toggle-preview-mode",
            Command::ToggleSplitEditMode => "toggle-split-edit-mode",
            Command::Reload => "reload",
            Command::ForceReload => "force-reload",
            Command::ToggleDevTools => "toggle-dev-tools",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zero-based index of one of the nine spaces reachable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WorkspaceIndex(u8);

impl WorkspaceIndex {
    /// Number of spaces with a menu entry.
    pub const COUNT: u8 = 9;

    pub fn new(index: u8) -> Result<Self, MenuError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(MenuError::WorkspaceOutOfRange(index))
        }
    }

    /// All valid indices in ascending order.
    pub fn all() -> impl Iterator<Item = WorkspaceIndex> {
        (0..Self::COUNT).map(WorkspaceIndex)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The digit key bound to this space (index + 1).
    pub fn digit(self) -> u8 {
        self.0 + 1
    }
}

impl TryFrom<u8> for WorkspaceIndex {
    type Error = MenuError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
