//! Installs a menu template as the native menu bar.
//!
//! Converts the declarative [`MenuNode`] tree into `muda` menus and keeps a
//! table from each native item id back to the [`MenuAction`] it stands for.
//! The conversion runs in two steps: [`plan`] decides what the native bar
//! will hold, then [`NativeMenuBar::build`] creates the `muda` objects.

use std::collections::HashMap;

use muda::accelerator::Accelerator;
use muda::{AboutMetadata, Menu, MenuId, PredefinedMenuItem, Submenu};
use tao::window::Window;

use crate::core::{MenuAction, MenuError, MenuItem, MenuNode, Role, ZoomStep, APP_NAME, HELP_MENU};

/// A menu the OS gives extra behavior to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialMenu {
    /// Lists open windows (macOS).
    Window,
    /// Gets the search field (macOS).
    Help,
}

/// One entry of the native menu bar, after roles were resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeNode {
    Separator,
    Item(MenuItem),
    Predefined(Role),
    Submenu {
        label: String,
        special: Option<SpecialMenu>,
        children: Vec<NativeNode>,
    },
}

impl NativeNode {
    pub fn label(&self) -> Option<&str> {
        match self {
            NativeNode::Item(item) => Some(&item.label),
            NativeNode::Submenu { label, .. } => Some(label),
            NativeNode::Separator | NativeNode::Predefined(_) => None,
        }
    }
}

/// Resolves `template` into what the native menu bar will show.
///
/// Zoom roles become items the shell handles. Roles with no native
/// counterpart are dropped, and so are submenus left empty by that.
/// Separators never lead, trail or follow each other.
pub fn plan(template: &[MenuNode]) -> Vec<NativeNode> {
    template
        .iter()
        .filter_map(|node| match node {
            MenuNode::Submenu(submenu) => plan_submenu(&submenu.label, &submenu.children),
            other => {
                tracing::warn!("Skipping non-submenu top-level node {:?}", other);
                None
            }
        })
        .collect()
}

fn plan_submenu(label: &str, children: &[MenuNode]) -> Option<NativeNode> {
    let mut special = (label == HELP_MENU).then_some(SpecialMenu::Help);
    let mut planned: Vec<NativeNode> = Vec::with_capacity(children.len());

    for child in children {
        let node = match child {
            MenuNode::Separator => {
                if matches!(planned.last(), None | Some(NativeNode::Separator)) {
                    continue;
                }
                NativeNode::Separator
            }
            MenuNode::Item(item) => NativeNode::Item(item.clone()),
            MenuNode::Submenu(submenu) => {
                match plan_submenu(&submenu.label, &submenu.children) {
                    Some(node) => node,
                    None => {
                        tracing::debug!("Dropping empty submenu `{}`", submenu.label);
                        continue;
                    }
                }
            }
            MenuNode::Role(Role::Window) => {
                special = Some(SpecialMenu::Window);
                continue;
            }
            MenuNode::Role(role) => match zoom_item(*role) {
                Some(item) => NativeNode::Item(item),
                None if has_predefined(*role) => NativeNode::Predefined(*role),
                None => {
                    tracing::debug!("No native item for role `{}`, skipping", role.name());
                    continue;
                }
            },
        };
        planned.push(node);
    }

    if matches!(planned.last(), Some(NativeNode::Separator)) {
        planned.pop();
    }
    if planned.is_empty() {
        return None;
    }

    Some(NativeNode::Submenu {
        label: label.to_string(),
        special,
        children: planned,
    })
}

/// The zoom roles, as items whose clicks the shell applies to the webview.
fn zoom_item(role: Role) -> Option<MenuItem> {
    let (label, accelerator, step) = match role {
        Role::ResetZoom => ("Actual Size", "CmdOrCtrl+0", ZoomStep::Reset),
        Role::ZoomIn => ("Zoom In", "CmdOrCtrl+=", ZoomStep::In),
        Role::ZoomOut => ("Zoom Out", "CmdOrCtrl+-", ZoomStep::Out),
        _ => return None,
    };
    Some(MenuItem {
        label: label.to_string(),
        accelerator: Some(accelerator.to_string()),
        action: MenuAction::Zoom(step),
    })
}

fn has_predefined(role: Role) -> bool {
    !matches!(
        role,
        Role::PasteAndMatchStyle
            | Role::Delete
            | Role::StartSpeaking
            | Role::StopSpeaking
            | Role::ResetZoom
            | Role::ZoomIn
            | Role::ZoomOut
            | Role::Window
    )
}

/// A built native menu bar plus the actions behind its items.
pub struct NativeMenuBar {
    /// Keep the muda `Menu` alive; dropping it removes it from the menu bar.
    menu: Menu,
    actions: HashMap<MenuId, MenuAction>,
}

impl NativeMenuBar {
    /// Builds native menus for `template`. Nothing is attached yet.
    pub fn build(template: &[MenuNode]) -> Result<Self, MenuError> {
        let menu = Menu::new();
        let mut actions = HashMap::new();

        for node in plan(template) {
            if let NativeNode::Submenu {
                label,
                special,
                children,
            } = node
            {
                let native = Submenu::new(&label, true);
                append_children(&native, &children, &mut actions)?;
                mark_special(&native, special);
                menu.append(&native)?;
            }
        }

        tracing::debug!("Built native menu with {} actions", actions.len());
        Ok(Self { menu, actions })
    }

    /// The action behind a clicked item.
    pub fn action_for(&self, id: &MenuId) -> Option<&MenuAction> {
        self.actions.get(id)
    }

    /// Attaches the menu bar application-wide (macOS).
    #[cfg(target_os = "macos")]
    pub fn init_for_app(&self) {
        self.menu.init_for_nsapp();
    }

    /// Attaches the menu bar to one window (Windows, Linux).
    #[allow(unused_variables)]
    pub fn init_for_window(&self, window: &Window) -> Result<(), MenuError> {
        #[cfg(target_os = "windows")]
        {
            use tao::platform::windows::WindowExtWindows;
            unsafe { self.menu.init_for_hwnd(window.hwnd() as _)? };
        }
        #[cfg(target_os = "linux")]
        {
            use tao::platform::unix::WindowExtUnix;
            self.menu
                .init_for_gtk_window(window.gtk_window(), window.default_vbox())?;
        }
        Ok(())
    }

    /// Detaches the menu bar from one window before a replacement goes in.
    #[allow(unused_variables)]
    pub fn remove_for_window(&self, window: &Window) -> Result<(), MenuError> {
        #[cfg(target_os = "windows")]
        {
            use tao::platform::windows::WindowExtWindows;
            unsafe { self.menu.remove_for_hwnd(window.hwnd() as _)? };
        }
        #[cfg(target_os = "linux")]
        {
            use tao::platform::unix::WindowExtUnix;
            self.menu.remove_for_gtk_window(window.gtk_window())?;
        }
        Ok(())
    }
}

/// The accelerator table of the installed menu bar, shared with the
/// Windows message hook.
///
/// On Windows, muda accelerators only fire when the event loop passes each
/// message through `TranslateAcceleratorW`. Elsewhere this is empty.
#[derive(Clone, Default)]
pub struct AcceleratorTable {
    #[cfg(target_os = "windows")]
    haccel: std::rc::Rc<std::cell::Cell<isize>>,
}

impl AcceleratorTable {
    /// Points the hook at the accelerators of `menu_bar`.
    #[allow(unused_variables)]
    pub fn update(&self, menu_bar: &NativeMenuBar) {
        #[cfg(target_os = "windows")]
        self.haccel.set(menu_bar.menu.haccel());
    }

    /// Runs a raw `MSG` through the current table. Returns `true` when the
    /// message was an accelerator and must not be dispatched further.
    #[cfg(target_os = "windows")]
    pub fn translate(&self, msg: *const std::ffi::c_void) -> bool {
        use windows_sys::Win32::UI::WindowsAndMessaging::{TranslateAcceleratorW, MSG};

        let haccel = self.haccel.get();
        if haccel == 0 || msg.is_null() {
            return false;
        }
        unsafe {
            let msg = msg as *const MSG;
            TranslateAcceleratorW((*msg).hwnd, haccel, msg) == 1
        }
    }
}

fn append_children(
    parent: &Submenu,
    children: &[NativeNode],
    actions: &mut HashMap<MenuId, MenuAction>,
) -> Result<(), MenuError> {
    for child in children {
        match child {
            NativeNode::Separator => parent.append(&PredefinedMenuItem::separator())?,
            NativeNode::Item(item) => {
                let native =
                    muda::MenuItem::new(&item.label, true, parse_accelerator(item).unwrap_or(None));
                actions.insert(native.id().clone(), item.action.clone());
                parent.append(&native)?;
            }
            NativeNode::Predefined(role) => match predefined(*role) {
                Some(native) => parent.append(&native)?,
                None => tracing::debug!("No native item for role `{}`, skipping", role.name()),
            },
            NativeNode::Submenu {
                label,
                special,
                children,
            } => {
                let native = Submenu::new(label, true);
                append_children(&native, children, actions)?;
                mark_special(&native, *special);
                parent.append(&native)?;
            }
        }
    }
    Ok(())
}

#[allow(unused_variables)]
fn mark_special(submenu: &Submenu, special: Option<SpecialMenu>) {
    #[cfg(target_os = "macos")]
    match special {
        Some(SpecialMenu::Window) => submenu.set_as_windows_menu_for_nsapp(),
        Some(SpecialMenu::Help) => submenu.set_as_help_menu_for_nsapp(),
        None => {}
    }
}

/// Parses an item's accelerator. An unparsable accelerator is logged and the
/// item is installed without one.
fn parse_accelerator(item: &MenuItem) -> Result<Option<Accelerator>, MenuError> {
    let Some(raw) = item.accelerator.as_deref() else {
        return Ok(None);
    };

    raw.parse::<Accelerator>().map(Some).map_err(|e| {
        let err = MenuError::InvalidAccelerator {
            label: item.label.clone(),
            accelerator: raw.to_string(),
            reason: e.to_string(),
        };
        tracing::warn!("{}", err);
        err
    })
}

fn predefined(role: Role) -> Option<PredefinedMenuItem> {
    let item = match role {
        Role::About => PredefinedMenuItem::about(
            None,
            Some(AboutMetadata {
                name: Some(APP_NAME.to_string()),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
                ..Default::default()
            }),
        ),
        Role::Services => PredefinedMenuItem::services(None),
        Role::Hide => PredefinedMenuItem::hide(None),
        Role::Unhide => PredefinedMenuItem::show_all(None),
        Role::Quit => PredefinedMenuItem::quit(None),
        Role::Close => PredefinedMenuItem::close_window(None),
        Role::Undo => PredefinedMenuItem::undo(None),
        Role::Redo => PredefinedMenuItem::redo(None),
        Role::Cut => PredefinedMenuItem::cut(None),
        Role::Copy => PredefinedMenuItem::copy(None),
        Role::Paste => PredefinedMenuItem::paste(None),
        Role::SelectAll => PredefinedMenuItem::select_all(None),
        Role::ToggleFullscreen => PredefinedMenuItem::fullscreen(None),
        Role::Minimize => PredefinedMenuItem::minimize(None),
        Role::Front => PredefinedMenuItem::bring_all_to_front(None),
        _ => return None,
    };
    Some(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::menu::collect_items;
    use crate::core::{build_menu_template, Command, Keymap, PlatformProfile};

    fn top<'a>(nodes: &'a [NativeNode], wanted: &str) -> &'a NativeNode {
        nodes
            .iter()
            .find(|node| node.label() == Some(wanted))
            .unwrap_or_else(|| panic!("no `{wanted}` menu"))
    }

    fn children(node: &NativeNode) -> &[NativeNode] {
        match node {
            NativeNode::Submenu { children, .. } => children,
            other => panic!("not a submenu: {other:?}"),
        }
    }

    fn assert_well_formed(nodes: &[NativeNode], path: &str) {
        assert!(!nodes.is_empty(), "`{path}` is empty");
        assert_ne!(nodes.first(), Some(&NativeNode::Separator), "`{path}` leads with a separator");
        assert_ne!(nodes.last(), Some(&NativeNode::Separator), "`{path}` ends with a separator");
        for pair in nodes.windows(2) {
            assert!(
                !(pair[0] == NativeNode::Separator && pair[1] == NativeNode::Separator),
                "`{path}` has back-to-back separators"
            );
        }
        for node in nodes {
            if let NativeNode::Submenu { label, children, .. } = node {
                assert_well_formed(children, &format!("{path}/{label}"));
            }
        }
    }

    fn count_items(nodes: &[NativeNode]) -> usize {
        nodes
            .iter()
            .map(|node| match node {
                NativeNode::Item(_) => 1,
                NativeNode::Submenu { children, .. } => count_items(children),
                NativeNode::Separator | NativeNode::Predefined(_) => 0,
            })
            .sum()
    }

    #[test]
    fn planned_menus_have_no_empty_submenus_or_stray_separators() {
        for profile in [PlatformProfile::MACOS, PlatformProfile::OTHER] {
            let planned = plan(&build_menu_template(&Keymap::defaults(), &profile));
            assert_well_formed(&planned, "");
        }
    }

    #[test]
    fn speech_menu_without_native_roles_is_dropped() {
        let planned = plan(&build_menu_template(&Keymap::defaults(), &PlatformProfile::MACOS));
        let edit = children(top(&planned, "Edit"));

        assert!(edit.iter().all(|node| node.label() != Some("Speech")));
        assert_eq!(edit.last(), Some(&NativeNode::Predefined(Role::SelectAll)));
    }

    #[test]
    fn zoom_roles_become_shell_handled_items() {
        let planned = plan(&build_menu_template(&Keymap::defaults(), &PlatformProfile::OTHER));
        let view = children(top(&planned, "View"));

        let zoom: Vec<_> = view
            .iter()
            .filter_map(|node| match node {
                NativeNode::Item(item) => match item.action {
                    MenuAction::Zoom(step) => Some((item.label.as_str(), step)),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        assert_eq!(
            zoom,
            vec![
                ("Actual Size", ZoomStep::Reset),
                ("Zoom In", ZoomStep::In),
                ("Zoom Out", ZoomStep::Out),
            ]
        );
        assert!(view.contains(&NativeNode::Predefined(Role::ToggleFullscreen)));
    }

    #[test]
    fn zoom_accelerators_parse() {
        for role in [Role::ResetZoom, Role::ZoomIn, Role::ZoomOut] {
            let item = zoom_item(role).unwrap();
            assert!(matches!(parse_accelerator(&item), Ok(Some(_))), "{item:?}");
        }
    }

    #[test]
    fn every_template_item_is_planned() {
        for profile in [PlatformProfile::MACOS, PlatformProfile::OTHER] {
            let template = build_menu_template(&Keymap::defaults(), &profile);
            let mut items = Vec::new();
            collect_items(&template, &mut items);

            // The three zoom roles add one item each.
            assert_eq!(count_items(&plan(&template)), items.len() + 3);
        }
    }

    #[test]
    fn help_and_window_menus_are_marked() {
        let planned = plan(&build_menu_template(&Keymap::defaults(), &PlatformProfile::MACOS));

        let special = |label: &str| match top(&planned, label) {
            NativeNode::Submenu { special, .. } => *special,
            _ => None,
        };
        assert_eq!(special(HELP_MENU), Some(SpecialMenu::Help));
        assert_eq!(special("Window"), Some(SpecialMenu::Window));
        assert_eq!(special("Edit"), None);
    }

    #[test]
    fn separators_collapse_around_dropped_roles() {
        let template = vec![
            MenuNode::submenu(
                "Edit",
                vec![
                    MenuNode::Separator,
                    MenuNode::Role(Role::Delete),
                    MenuNode::Separator,
                    MenuNode::item("Search", None, MenuAction::Emit(Command::Search)),
                    MenuNode::Separator,
                    MenuNode::Role(Role::PasteAndMatchStyle),
                    MenuNode::Separator,
                    MenuNode::Role(Role::Undo),
                    MenuNode::Separator,
                    MenuNode::submenu("Speech", vec![MenuNode::Role(Role::StartSpeaking)]),
                ],
            ),
            MenuNode::submenu("Empty", vec![MenuNode::Separator, MenuNode::Role(Role::Delete)]),
            MenuNode::Separator,
        ];

        let planned = plan(&template);

        assert_eq!(
            planned,
            vec![NativeNode::Submenu {
                label: "Edit".to_string(),
                special: None,
                children: vec![
                    NativeNode::Item(MenuItem {
                        label: "Search".to_string(),
                        accelerator: None,
                        action: MenuAction::Emit(Command::Search),
                    }),
                    NativeNode::Separator,
                    NativeNode::Predefined(Role::Undo),
                ],
            }]
        );
    }

    #[test]
    fn predefined_table_agrees_with_the_plan() {
        for role in [
            Role::PasteAndMatchStyle,
            Role::Delete,
            Role::StartSpeaking,
            Role::StopSpeaking,
            Role::Window,
        ] {
            assert!(!has_predefined(role), "{}", role.name());
        }
        assert!(has_predefined(Role::Quit));
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn empty_accelerator_table_translates_nothing() {
        use windows_sys::Win32::UI::WindowsAndMessaging::MSG;

        let msg: MSG = unsafe { std::mem::zeroed() };
        let table = AcceleratorTable::default();
        assert!(!table.translate(&msg as *const MSG as *const std::ffi::c_void));
    }
}
