//! Per-OS menu shape, selected once at startup.

/// Everything the builder needs to know about the host platform.
///
/// Passed explicitly to the builder so it stays a pure function of its
/// inputs and both shapes can be tested on any OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Whether an application-named root menu leads the menu bar. When it
    /// does not, its entries move into the File menu.
    pub has_root_menu: bool,
    /// Modifier used for the fixed accelerators (`Cmd` or `Ctrl`).
    pub modifier: &'static str,
    /// Window menu uses the OS-managed roles instead of our own entries.
    pub native_window_menu: bool,
    /// Edit menu ends with paste-and-match-style and a Speech submenu.
    pub speech_menu: bool,
}

impl PlatformProfile {
    pub const MACOS: PlatformProfile = PlatformProfile {
        has_root_menu: true,
        modifier: "Cmd",
        native_window_menu: true,
        speech_menu: true,
    };

    pub const OTHER: PlatformProfile = PlatformProfile {
        has_root_menu: false,
        modifier: "Ctrl",
        native_window_menu: false,
        speech_menu: false,
    };

    /// Profile for an OS identifier as reported by `std::env::consts::OS`.
    pub fn for_os(os: &str) -> Self {
        if os == "macos" {
            Self::MACOS
        } else {
            Self::OTHER
        }
    }

    /// Profile for the running process.
    pub fn current() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// Builds an accelerator from the platform modifier and `keys`,
    /// e.g. `chord("Shift+N")` gives `Cmd+Shift+N` on macOS.
    pub fn chord(&self, keys: &str) -> String {
        format!("{}+{}", self.modifier, keys)
    }
}
