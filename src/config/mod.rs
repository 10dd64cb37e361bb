pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::Keymap;

/// Where new windows point unless the user configured otherwise.
pub const DEFAULT_FRONTEND_URL: &str = "https://boostnote.io/app";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// User keybindings, edited by the settings UI and pushed over IPC.
    pub keymap: Keymap,
    /// URL every new application window loads.
    pub frontend_url: String,
    pub window_size: (f64, f64),
    pub window_position: (f64, f64),
    /// Whether host windows are built with devtools. Defaults to on in
    /// debug builds only; "Toggle Browser Window Dev Tools" does nothing
    /// while this is off.
    pub devtools: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            keymap: Keymap::defaults(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            window_size: (1200.0, 800.0),
            window_position: (100.0, 100.0),
            devtools: cfg!(debug_assertions),
        }
    }
}
