//! The declarative menu tree handed to the native menu bar.

use std::fmt;

use super::command::{Command, WorkspaceIndex};

/// A standard behavior provided by the host platform. The shell only
/// references these by name; the OS implements them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    About,
    Services,
    Hide,
    Unhide,
    Quit,
    Close,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    PasteAndMatchStyle,
    Delete,
    SelectAll,
    StartSpeaking,
    StopSpeaking,
    ResetZoom,
    ZoomIn,
    ZoomOut,
    ToggleFullscreen,
    Minimize,
    Front,
    Window,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::About => "about",
            Role::Services => "services",
            Role::Hide => "hide",
            Role::Unhide => "unhide",
            Role::Quit => "quit",
            Role::Close => "close",
            Role::Undo => "undo",
            Role::Redo => "redo",
            Role::Cut => "cut",
            Role::Copy => "copy",
            Role::Paste => "paste",
            Role::PasteAndMatchStyle => "pasteAndMatchStyle",
            Role::Delete => "delete",
            Role::SelectAll => "selectAll",
            Role::StartSpeaking => "startSpeaking",
            Role::StopSpeaking => "stopSpeaking",
            Role::ResetZoom => "resetZoom",
            Role::ZoomIn => "zoomIn",
            Role::ZoomOut => "zoomOut",
            Role::ToggleFullscreen => "togglefullscreen",
            Role::Minimize => "minimize",
            Role::Front => "front",
            Role::Window => "window",
        }
    }
}

/// What a leaf item does when the user activates it.
///
/// Actions are plain data. The shell turns them into one-way messages at
/// activation time, see `app::activation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Send a named command to the focused window's content.
    Emit(Command),
    /// Open a new application window at the frontend URL.
    OpenWindow,
    /// Open a URL in the user's browser.
    OpenExternal(&'static str),
    CheckForUpdates,
    /// Switch the activating window to a space. Needs a window handle.
    SwitchWorkspace(WorkspaceIndex),
    /// Toggle devtools of the host window itself. Needs a window handle.
    ToggleHostDevTools,
    /// Raise the process-wide `new-window-event`.
    NewWindowEvent,
    /// Change the page zoom of the activating window. Needs a window handle.
    Zoom(ZoomStep),
}

/// One step of the View menu's zoom section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoomStep {
    Reset,
    In,
    Out,
}

impl ZoomStep {
    pub const MIN: f64 = 0.3;
    pub const MAX: f64 = 3.0;
    const INCREMENT: f64 = 0.1;

    /// The zoom factor after applying this step to `current`.
    pub fn apply(self, current: f64) -> f64 {
        match self {
            ZoomStep::Reset => 1.0,
            ZoomStep::In => (current + Self::INCREMENT).min(Self::MAX),
            ZoomStep::Out => (current - Self::INCREMENT).max(Self::MIN),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ZoomStep::Reset => "reset",
            ZoomStep::In => "in",
            ZoomStep::Out => "out",
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Emit(command) => write!(f, "emit {command}"),
            MenuAction::OpenWindow => f.write_str("open-window"),
            MenuAction::OpenExternal(url) => write!(f, "open {url}"),
            MenuAction::CheckForUpdates => f.write_str("check-for-updates"),
            MenuAction::SwitchWorkspace(index) => write!(f, "switch-workspace {}", index.get()),
            MenuAction::ToggleHostDevTools => f.write_str("toggle-host-dev-tools"),
            MenuAction::NewWindowEvent => f.write_str("new-window-event"),
            MenuAction::Zoom(step) => write!(f, "zoom {}", step.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub accelerator: Option<String>,
    pub action: MenuAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submenu {
    pub label: String,
    pub children: Vec<MenuNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
    Separator,
    Item(MenuItem),
    Submenu(Submenu),
    Role(Role),
}

impl MenuNode {
    pub fn item(label: &str, accelerator: Option<String>, action: MenuAction) -> Self {
        MenuNode::Item(MenuItem {
            label: label.to_string(),
            accelerator,
            action,
        })
    }

    pub fn submenu(label: &str, children: Vec<MenuNode>) -> Self {
        MenuNode::Submenu(Submenu {
            label: label.to_string(),
            children,
        })
    }

    /// Label shown to the user, if the node has one of its own.
    pub fn label(&self) -> Option<&str> {
        match self {
            MenuNode::Item(item) => Some(&item.label),
            MenuNode::Submenu(submenu) => Some(&submenu.label),
            MenuNode::Separator | MenuNode::Role(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&MenuItem> {
        match self {
            MenuNode::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_submenu(&self) -> Option<&Submenu> {
        match self {
            MenuNode::Submenu(submenu) => Some(submenu),
            _ => None,
        }
    }

    /// Every leaf item in this subtree, depth first.
    pub fn items(&self) -> Vec<&MenuItem> {
        let mut out = Vec::new();
        collect_items(std::slice::from_ref(self), &mut out);
        out
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            MenuNode::Separator => writeln!(f, "{indent}---"),
            MenuNode::Role(role) => writeln!(f, "{indent}<{}>", role.name()),
            MenuNode::Item(item) => match &item.accelerator {
                Some(accel) => writeln!(f, "{indent}{} [{accel}] -> {}", item.label, item.action),
                None => writeln!(f, "{indent}{} -> {}", item.label, item.action),
            },
            MenuNode::Submenu(submenu) => {
                writeln!(f, "{indent}{}", submenu.label)?;
                for child in &submenu.children {
                    child.write_outline(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl Submenu {
    /// Direct child submenu with the given label.
    pub fn find(&self, label: &str) -> Option<&Submenu> {
        find_submenu(&self.children, label)
    }

    /// Direct child leaf item with the given label.
    pub fn item(&self, label: &str) -> Option<&MenuItem> {
        self.children
            .iter()
            .filter_map(MenuNode::as_item)
            .find(|item| item.label == label)
    }

    pub fn contains_role(&self, role: Role) -> bool {
        self.children.contains(&MenuNode::Role(role))
    }
}

/// Indented, one-line-per-node rendering used in debug logs and tests.
impl fmt::Display for MenuNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

/// Top-level submenu with the given label.
pub fn find_submenu<'a>(nodes: &'a [MenuNode], label: &str) -> Option<&'a Submenu> {
    nodes
        .iter()
        .filter_map(MenuNode::as_submenu)
        .find(|submenu| submenu.label == label)
}

/// Every leaf item in `nodes`, depth first.
pub fn collect_items<'a>(nodes: &'a [MenuNode], out: &mut Vec<&'a MenuItem>) {
    for node in nodes {
        match node {
            MenuNode::Item(item) => out.push(item),
            MenuNode::Submenu(submenu) => collect_items(&submenu.children, out),
            MenuNode::Separator | MenuNode::Role(_) => {}
        }
    }
}
