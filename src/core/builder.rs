//! Builds the application menu template from a keymap.
//!
//! One generic builder covers every platform. Where macOS and the other
//! platforms differ, the [`PlatformProfile`] decides; item constructors
//! shared between the root menu and the File menu live here once so the
//! two shapes cannot drift apart.

use super::command::{Command, WorkspaceIndex};
use super::keymap::{
    Keymap, EDITOR_SAVE_AS, TOGGLE_GLOBAL_SEARCH, TOGGLE_PREVIEW_MODE, TOGGLE_SPLIT_EDIT_MODE,
};
use super::menu::{MenuAction, MenuNode, Role};
use super::platform::PlatformProfile;

/// Name shown on the root menu.
pub const APP_NAME: &str = "Boost Note";
/// Label of the menu the OS treats as the Help menu.
pub const HELP_MENU: &str = "Help";

pub const HOMEPAGE_URL: &str = "https://boostnote.io";
pub const GITHUB_URL: &str = "https://github.com/BoostIO/BoostNote-App";
pub const SLACK_URL: &str =
    "https://join.slack.com/t/boostnote-group/shared_invite/zt-cun7pas3-WwkaezxHBB1lCbUHrwQLXw";
pub const ISSUEHUNT_URL: &str = "https://issuehunt.io/r/BoostIo/Boostnote.next";
pub const TWITTER_URL: &str = "https://twitter.com/boostnoteapp";
pub const FACEBOOK_URL: &str = "https://www.facebook.com/groups/boostnote/";
pub const REDDIT_URL: &str = "https://www.reddit.com/r/Boostnote/";

const SPACE_ORDINALS: [&str; WorkspaceIndex::COUNT as usize] = [
    "First", "Second", "Third", "4th", "5th", "6th", "7th", "8th", "9th",
];

/// Builds the full menu bar for `keymap` on `profile`.
///
/// The result always holds File, Edit, View, Window, Community and Help in
/// that order, preceded by the root menu when the profile has one.
pub fn build_menu_template(keymap: &Keymap, profile: &PlatformProfile) -> Vec<MenuNode> {
    let mut menu = Vec::with_capacity(7);

    if profile.has_root_menu {
        menu.push(root_menu(profile));
    }

    menu.push(file_menu(keymap, profile));
    menu.push(edit_menu(keymap, profile));
    menu.push(view_menu(keymap, profile));
    menu.push(window_menu(profile));
    menu.push(community_menu());
    menu.push(help_menu());

    menu
}

fn emit(label: &str, accelerator: Option<String>, command: Command) -> MenuNode {
    MenuNode::item(label, accelerator, MenuAction::Emit(command))
}

fn link(label: &str, url: &'static str) -> MenuNode {
    MenuNode::item(label, None, MenuAction::OpenExternal(url))
}

fn new_window_item(profile: &PlatformProfile) -> MenuNode {
    MenuNode::item(
        "New Window",
        Some(profile.chord("Shift+N")),
        MenuAction::OpenWindow,
    )
}

fn preferences_item(profile: &PlatformProfile) -> MenuNode {
    emit(
        "Preferences",
        Some(profile.chord(",")),
        Command::ToggleSettings,
    )
}

fn add_space_item() -> MenuNode {
    emit("Add Space", None, Command::CreateCloudSpace)
}

fn check_for_updates_item() -> MenuNode {
    MenuNode::item("Check For Updates", None, MenuAction::CheckForUpdates)
}

fn root_menu(profile: &PlatformProfile) -> MenuNode {
    MenuNode::submenu(
        APP_NAME,
        vec![
            MenuNode::Role(Role::About),
            MenuNode::Separator,
            new_window_item(profile),
            MenuNode::Separator,
            preferences_item(profile),
            MenuNode::Separator,
            add_space_item(),
            MenuNode::Separator,
            check_for_updates_item(),
            MenuNode::Separator,
            MenuNode::Role(Role::Services),
            MenuNode::Separator,
            MenuNode::Role(Role::Hide),
            MenuNode::Role(Role::Unhide),
            MenuNode::Separator,
            MenuNode::Role(Role::Quit),
        ],
    )
}

fn file_menu(keymap: &Keymap, profile: &PlatformProfile) -> MenuNode {
    let mut items = Vec::new();

    // Without a root menu, its window and space entries live here instead.
    if !profile.has_root_menu {
        items.push(new_window_item(profile));
        items.push(MenuNode::Separator);
    }

    items.push(emit(
        "New Document",
        Some(profile.chord("N")),
        Command::NewDoc,
    ));
    items.push(MenuNode::Separator);
    items.push(emit(
        "Save As",
        keymap.accelerator(EDITOR_SAVE_AS),
        Command::SaveAs,
    ));
    items.push(MenuNode::Separator);

    if profile.has_root_menu {
        items.push(MenuNode::Role(Role::Close));
    } else {
        items.extend([
            add_space_item(),
            MenuNode::Separator,
            check_for_updates_item(),
            MenuNode::Separator,
            preferences_item(profile),
            MenuNode::Separator,
            MenuNode::Role(Role::Quit),
        ]);
    }

    MenuNode::submenu("File", items)
}

fn edit_menu(keymap: &Keymap, profile: &PlatformProfile) -> MenuNode {
    let mut items = vec![
        MenuNode::submenu(
            "Format",
            vec![
                emit("Bold", Some(profile.chord("B")), Command::ApplyBoldStyle),
                emit("Italic", Some(profile.chord("I")), Command::ApplyItalicStyle),
            ],
        ),
        MenuNode::Separator,
        MenuNode::Role(Role::Undo),
        MenuNode::Role(Role::Redo),
        MenuNode::Separator,
        MenuNode::Role(Role::Cut),
        MenuNode::Role(Role::Copy),
        MenuNode::Role(Role::Paste),
        MenuNode::Separator,
        emit(
            "Search",
            keymap.accelerator(TOGGLE_GLOBAL_SEARCH),
            Command::Search,
        ),
        MenuNode::Separator,
    ];

    if profile.speech_menu {
        items.extend([
            MenuNode::Role(Role::PasteAndMatchStyle),
            MenuNode::Role(Role::Delete),
            MenuNode::Role(Role::SelectAll),
            MenuNode::Separator,
            MenuNode::submenu(
                "Speech",
                vec![
                    MenuNode::Role(Role::StartSpeaking),
                    MenuNode::Role(Role::StopSpeaking),
                ],
            ),
        ]);
    } else {
        items.extend([
            MenuNode::Role(Role::Delete),
            MenuNode::Separator,
            MenuNode::Role(Role::SelectAll),
        ]);
    }

    MenuNode::submenu("Edit", items)
}

fn switch_space_menu(profile: &PlatformProfile) -> MenuNode {
    let entries = WorkspaceIndex::all()
        .map(|index| {
            MenuNode::item(
                &format!("Switch to {} Space", SPACE_ORDINALS[index.get() as usize]),
                Some(profile.chord(&index.digit().to_string())),
                MenuAction::SwitchWorkspace(index),
            )
        })
        .collect();

    MenuNode::submenu("Switch Space", entries)
}

fn developer_menu(profile: &PlatformProfile) -> MenuNode {
    MenuNode::submenu(
        "Developer",
        vec![
            emit(
                "Force Reload",
                Some(profile.chord("Shift+R")),
                Command::ForceReload,
            ),
            emit(
                "Toggle Web View Dev Tools",
                Some(profile.chord("Alt+I")),
                Command::ToggleDevTools,
            ),
            MenuNode::item(
                "Toggle Browser Window Dev Tools",
                Some(profile.chord("Shift+Alt+I")),
                MenuAction::ToggleHostDevTools,
            ),
        ],
    )
}

fn view_menu(keymap: &Keymap, profile: &PlatformProfile) -> MenuNode {
    MenuNode::submenu(
        "View",
        vec![
            switch_space_menu(profile),
            MenuNode::Separator,
            emit(
                "Focus On Editor",
                Some(profile.chord("J")),
                Command::FocusEditor,
            ),
            emit(
                "Focus On Title",
                Some(profile.chord("Shift+J")),
                Command::FocusTitle,
            ),
            MenuNode::Separator,
            emit(
                "Toggle Preview Mode",
                keymap.accelerator(TOGGLE_PREVIEW_MODE),
                Command::TogglePreviewMode,
            ),
            emit(
                "Toggle Split Edit Mode",
                keymap.accelerator(TOGGLE_SPLIT_EDIT_MODE),
                Command::ToggleSplitEditMode,
            ),
            MenuNode::Separator,
            emit("Reload", Some(profile.chord("R")), Command::Reload),
            MenuNode::Separator,
            developer_menu(profile),
            MenuNode::Separator,
            MenuNode::Role(Role::ResetZoom),
            MenuNode::Role(Role::ZoomIn),
            MenuNode::Role(Role::ZoomOut),
            MenuNode::Separator,
            MenuNode::Role(Role::ToggleFullscreen),
        ],
    )
}

fn window_menu(profile: &PlatformProfile) -> MenuNode {
    let items = if profile.native_window_menu {
        vec![
            MenuNode::Role(Role::Minimize),
            MenuNode::Separator,
            MenuNode::Role(Role::Front),
            MenuNode::Separator,
            MenuNode::Role(Role::Window),
        ]
    } else {
        vec![
            MenuNode::Role(Role::Minimize),
            MenuNode::Role(Role::Close),
            MenuNode::item("New window", None, MenuAction::NewWindowEvent),
        ]
    };

    MenuNode::submenu("Window", items)
}

fn community_menu() -> MenuNode {
    MenuNode::submenu(
        "Community",
        vec![
            link("GitHub", GITHUB_URL),
            link("Slack", SLACK_URL),
            link("IssueHunt", ISSUEHUNT_URL),
            link("Twitter", TWITTER_URL),
            link("Facebook", FACEBOOK_URL),
            link("Reddit", REDDIT_URL),
        ],
    )
}

fn help_menu() -> MenuNode {
    MenuNode::submenu(HELP_MENU, vec![link("Learn More", HOMEPAGE_URL)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::menu::{find_submenu, Submenu};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn top_labels(menu: &[MenuNode]) -> Vec<&str> {
        menu.iter().filter_map(MenuNode::label).collect()
    }

    fn submenu<'a>(menu: &'a [MenuNode], label: &str) -> &'a Submenu {
        find_submenu(menu, label).unwrap_or_else(|| panic!("no {label} menu"))
    }

    #[test]
    fn top_level_order_with_root_menu() {
        let menu = build_menu_template(&Keymap::new(), &PlatformProfile::MACOS);
        assert_eq!(
            top_labels(&menu),
            vec![APP_NAME, "File", "Edit", "View", "Window", "Community", "Help"]
        );
    }

    #[test]
    fn top_level_order_without_root_menu() {
        let menu = build_menu_template(&Keymap::new(), &PlatformProfile::OTHER);
        assert_eq!(
            top_labels(&menu),
            vec!["File", "Edit", "View", "Window", "Community", "Help"]
        );
    }

    #[test]
    fn switch_space_has_nine_ordered_entries() {
        for profile in [PlatformProfile::MACOS, PlatformProfile::OTHER] {
            let menu = build_menu_template(&Keymap::new(), &profile);
            let spaces = submenu(&menu, "View").find("Switch Space").unwrap();
            assert_eq!(spaces.children.len(), 9);

            for (position, node) in spaces.children.iter().enumerate() {
                let item = node.as_item().expect("switch space entries are items");
                let expected = WorkspaceIndex::new(position as u8).unwrap();
                assert_eq!(item.action, MenuAction::SwitchWorkspace(expected));
                assert_eq!(
                    item.accelerator.as_deref(),
                    Some(format!("{}+{}", profile.modifier, position + 1).as_str())
                );
            }
        }
    }

    #[test]
    fn save_as_without_binding_has_no_accelerator() {
        let menu = build_menu_template(&Keymap::new(), &PlatformProfile::OTHER);
        let save_as = submenu(&menu, "File").item("Save As").unwrap();
        assert_eq!(save_as.accelerator, None);
        assert_eq!(save_as.action, MenuAction::Emit(Command::SaveAs));
    }

    #[test]
    fn keymap_entries_reach_their_items() {
        let keymap: Keymap = [
            (EDITOR_SAVE_AS, "Ctrl+Shift+S"),
            (TOGGLE_GLOBAL_SEARCH, "Ctrl+P"),
            (TOGGLE_PREVIEW_MODE, "Ctrl+E"),
            (TOGGLE_SPLIT_EDIT_MODE, "Ctrl+\\"),
            ("somethingElse", "F1"),
        ]
        .into_iter()
        .collect();
        let menu = build_menu_template(&keymap, &PlatformProfile::OTHER);

        let accel = |menu_label: &str, item: &str| {
            submenu(&menu, menu_label)
                .item(item)
                .and_then(|i| i.accelerator.clone())
        };
        assert_eq!(accel("File", "Save As").as_deref(), Some("Ctrl+Shift+S"));
        assert_eq!(accel("Edit", "Search").as_deref(), Some("Ctrl+P"));
        assert_eq!(accel("View", "Toggle Preview Mode").as_deref(), Some("Ctrl+E"));
        assert_eq!(
            accel("View", "Toggle Split Edit Mode").as_deref(),
            Some("Ctrl+\\")
        );
    }

    #[test]
    fn file_menu_does_not_duplicate_root_entries() {
        let menu = build_menu_template(&Keymap::new(), &PlatformProfile::MACOS);
        let file = submenu(&menu, "File");
        for label in ["Add Space", "Check For Updates", "Preferences", "New Window"] {
            assert!(file.item(label).is_none(), "File menu duplicates {label}");
            assert!(submenu(&menu, APP_NAME).item(label).is_some());
        }
        assert!(file.contains_role(Role::Close));
    }

    #[test]
    fn file_menu_hosts_root_entries_without_root_menu() {
        let menu = build_menu_template(&Keymap::new(), &PlatformProfile::OTHER);
        let file = submenu(&menu, "File");
        for label in ["Add Space", "Check For Updates", "Preferences", "New Window"] {
            assert!(file.item(label).is_some(), "File menu lacks {label}");
        }
        assert!(file.contains_role(Role::Quit));
        assert_eq!(
            file.item("Preferences").unwrap().accelerator.as_deref(),
            Some("Ctrl+,")
        );
    }

    #[test]
    fn edit_menu_is_populated() {
        // The assembled Edit items are returned, not dropped in favor of an
        // empty submenu.
        let keymap: Keymap = [(TOGGLE_GLOBAL_SEARCH, "Cmd+P")].into_iter().collect();
        let menu = build_menu_template(&keymap, &PlatformProfile::MACOS);
        let edit = submenu(&menu, "Edit");

        assert!(!edit.children.is_empty());
        let format = edit.find("Format").unwrap();
        assert_eq!(
            format.item("Bold").unwrap().action,
            MenuAction::Emit(Command::ApplyBoldStyle)
        );
        assert_eq!(
            format.item("Italic").unwrap().accelerator.as_deref(),
            Some("Cmd+I")
        );
        assert_eq!(
            edit.item("Search").unwrap().accelerator.as_deref(),
            Some("Cmd+P")
        );
        assert!(edit.find("Speech").unwrap().contains_role(Role::StartSpeaking));
        assert!(edit.contains_role(Role::PasteAndMatchStyle));
    }

    #[test]
    fn edit_menu_tail_without_speech() {
        let menu = build_menu_template(&Keymap::new(), &PlatformProfile::OTHER);
        let edit = submenu(&menu, "Edit");
        let tail = &edit.children[edit.children.len() - 3..];
        assert_eq!(
            tail,
            &[
                MenuNode::Role(Role::Delete),
                MenuNode::Separator,
                MenuNode::Role(Role::SelectAll),
            ]
        );
        assert!(edit.find("Speech").is_none());
    }

    #[test]
    fn developer_menu_guards_host_devtools() {
        let menu = build_menu_template(&Keymap::new(), &PlatformProfile::MACOS);
        let developer = submenu(&menu, "View").find("Developer").unwrap();
        let host = developer.item("Toggle Browser Window Dev Tools").unwrap();
        assert_eq!(host.action, MenuAction::ToggleHostDevTools);
        assert_eq!(host.accelerator.as_deref(), Some("Cmd+Shift+Alt+I"));
        assert_eq!(
            developer.item("Toggle Web View Dev Tools").unwrap().action,
            MenuAction::Emit(Command::ToggleDevTools)
        );
    }

    #[test]
    fn window_menu_per_platform() {
        let mac = build_menu_template(&Keymap::new(), &PlatformProfile::MACOS);
        insta::assert_snapshot!(mac[4].to_string(), @r"
        Window
          <minimize>
          ---
          <front>
          ---
          <window>
        ");

        let other = build_menu_template(&Keymap::new(), &PlatformProfile::OTHER);
        insta::assert_snapshot!(other[3].to_string(), @r"
        Window
          <minimize>
          <close>
          New window -> new-window-event
        ");
    }

    #[test]
    fn community_and_help_are_links() {
        let menu = build_menu_template(&Keymap::new(), &PlatformProfile::OTHER);
        let community = submenu(&menu, "Community");
        assert_eq!(community.children.len(), 6);
        assert_eq!(
            community.item("GitHub").unwrap().action,
            MenuAction::OpenExternal(GITHUB_URL)
        );
        assert_eq!(
            submenu(&menu, "Help").item("Learn More").unwrap().action,
            MenuAction::OpenExternal(HOMEPAGE_URL)
        );
    }

    #[test]
    fn every_command_is_reachable_from_some_profile() {
        let mut seen = Vec::new();
        for profile in [PlatformProfile::MACOS, PlatformProfile::OTHER] {
            let menu = build_menu_template(&Keymap::new(), &profile);
            for node in &menu {
                for item in node.items() {
                    if let MenuAction::Emit(command) = item.action {
                        seen.push(command);
                    }
                }
            }
        }
        for command in Command::ALL {
            assert!(seen.contains(&command), "{command} has no menu item");
        }
    }

    /// Keymap keys: mostly the ones the builder reads, plus arbitrary noise.
    fn keymap_key() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => prop::sample::select(vec![
                EDITOR_SAVE_AS,
                TOGGLE_GLOBAL_SEARCH,
                TOGGLE_PREVIEW_MODE,
                TOGGLE_SPLIT_EDIT_MODE,
            ])
            .prop_map(String::from),
            1 => "[a-zA-Z]{1,20}",
        ]
    }

    proptest! {
        #[test]
        fn template_is_deterministic(
            bindings in prop::collection::hash_map(keymap_key(), "[A-Za-z+]{0,16}", 0..8),
            mac in any::<bool>(),
        ) {
            let profile = if mac { PlatformProfile::MACOS } else { PlatformProfile::OTHER };
            let keymap: Keymap = bindings.clone().into_iter().collect();
            let rebuilt: Keymap = bindings.into_iter().collect::<HashMap<_, _>>().into_iter().collect();

            prop_assert_eq!(
                build_menu_template(&keymap, &profile),
                build_menu_template(&rebuilt, &profile)
            );
        }

        #[test]
        fn keymap_bound_items_carry_the_binding(
            bindings in prop::collection::hash_map(keymap_key(), "[A-Za-z+]{1,16}", 0..8),
            mac in any::<bool>(),
        ) {
            let profile = if mac { PlatformProfile::MACOS } else { PlatformProfile::OTHER };
            let keymap: Keymap = bindings.into_iter().collect();
            let menu = build_menu_template(&keymap, &profile);

            let bound = [
                ("File", "Save As", EDITOR_SAVE_AS),
                ("Edit", "Search", TOGGLE_GLOBAL_SEARCH),
                ("View", "Toggle Preview Mode", TOGGLE_PREVIEW_MODE),
                ("View", "Toggle Split Edit Mode", TOGGLE_SPLIT_EDIT_MODE),
            ];
            for (menu_label, item_label, key) in bound {
                let item = submenu(&menu, menu_label).item(item_label).unwrap();
                prop_assert_eq!(item.accelerator.as_deref(), keymap.get(key));
            }
        }
    }
}
