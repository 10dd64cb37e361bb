//! User keybindings consumed by the menu builder.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keymap key for the Save As accelerator.
pub const EDITOR_SAVE_AS: &str = "editorSaveAs";
/// Keymap key for the global search accelerator.
pub const TOGGLE_GLOBAL_SEARCH: &str = "toggleGlobalSearch";
/// Keymap key for the preview mode accelerator.
pub const TOGGLE_PREVIEW_MODE: &str = "togglePreviewMode";
/// Keymap key for the split edit mode accelerator.
pub const TOGGLE_SPLIT_EDIT_MODE: &str = "toggleSplitEditMode";

/// Mapping from command identifier to accelerator string.
///
/// Accelerators are stored as given; syntax is only checked when the
/// native menu is installed. Keys the menu does not recognize are kept
/// (the settings UI owns them) but never read here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keymap(HashMap<String, String>);

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accelerator bound to `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Owned accelerator for a menu item. Missing keys simply leave the
    /// item without a shortcut hint.
    pub fn accelerator(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_owned)
    }

    pub fn insert(&mut self, key: impl Into<String>, accelerator: impl Into<String>) {
        self.0.insert(key.into(), accelerator.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The bindings shipped with a fresh install.
    pub fn defaults() -> Self {
        [
            (EDITOR_SAVE_AS, "CmdOrCtrl+Shift+S"),
            (TOGGLE_GLOBAL_SEARCH, "CmdOrCtrl+P"),
            (TOGGLE_PREVIEW_MODE, "CmdOrCtrl+E"),
            (TOGGLE_SPLIT_EDIT_MODE, "CmdOrCtrl+Shift+E"),
        ]
        .into_iter()
        .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Keymap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
