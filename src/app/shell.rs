//! The running desktop shell: windows, the installed menu bar, and the
//! handlers for every [`UserEvent`].

use tao::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use tao::window::WindowId;

use super::activation::{activate, ActivationContext};
use super::bridge;
use super::events::UserEvent;
use super::menu_bar::{AcceleratorTable, NativeMenuBar};
use super::windows::WindowRegistry;
use crate::config::{self, AppConfig};
use crate::core::{build_menu_template, Keymap, MenuError, MenuNode, PlatformProfile};

/// Page opened by "Check For Updates".
pub const RELEASES_URL: &str = "https://github.com/BoostIO/BoostNote-App/releases";

pub struct Shell {
    config: AppConfig,
    profile: PlatformProfile,
    windows: WindowRegistry,
    menu_bar: Option<NativeMenuBar>,
    accelerators: AcceleratorTable,
    proxy: EventLoopProxy<UserEvent>,
}

impl Shell {
    pub fn new(
        config: AppConfig,
        profile: PlatformProfile,
        proxy: EventLoopProxy<UserEvent>,
        accelerators: AcceleratorTable,
    ) -> Self {
        Self {
            config,
            profile,
            windows: WindowRegistry::new(proxy.clone()),
            menu_bar: None,
            accelerators,
            proxy,
        }
    }

    /// Builds the template for the current keymap and installs it, replacing
    /// whatever menu bar was installed before.
    ///
    /// Only a failure to build the new menu is returned; the old one then
    /// stays in place. Once built, the new menu bar always replaces the old
    /// one, even if some windows refuse it.
    pub fn rebuild_menu(&mut self) -> Result<(), MenuError> {
        let template = build_menu_template(&self.config.keymap, &self.profile);
        tracing::debug!("Menu template:\n{}", outline(&template));
        let menu_bar = NativeMenuBar::build(&template)?;

        #[cfg(target_os = "macos")]
        menu_bar.init_for_app();

        let old = self.menu_bar.take();
        let failed = reattach(
            self.windows.iter().map(|app_window| &app_window.window),
            |window| match &old {
                Some(old) => old.remove_for_window(window),
                None => Ok(()),
            },
            |window| menu_bar.init_for_window(window),
        );

        self.accelerators.update(&menu_bar);
        self.menu_bar = Some(menu_bar);
        if failed > 0 {
            tracing::warn!("Installed application menu; {} window(s) failed to switch", failed);
        } else {
            tracing::info!("Installed application menu");
        }
        Ok(())
    }

    /// Opens a window on the frontend URL and gives it the menu bar.
    pub fn open_window(&mut self, target: &EventLoopWindowTarget<UserEvent>) {
        let url = self.config.frontend_url.clone();
        let opened = match self.windows.open(target, &url, &self.config) {
            Ok(app_window) => app_window,
            Err(e) => {
                tracing::error!("{}", e);
                return;
            }
        };

        if let Some(menu_bar) = &self.menu_bar {
            if let Err(e) = menu_bar.init_for_window(&opened.window) {
                tracing::warn!("Failed to attach menu to new window: {}", e);
            }
        }
    }

    pub fn set_focus(&mut self, id: WindowId, focused: bool) {
        self.windows.set_focus(id, focused);
    }

    /// Remembers the geometry of a window so the next one opens alike.
    pub fn remember_geometry(&mut self, id: WindowId) {
        if let Some(app_window) = self.windows.by_id(id) {
            let scale = app_window.window.scale_factor();
            let size = app_window.window.inner_size().to_logical::<f64>(scale);
            self.config.window_size = (size.width, size.height);
            if let Ok(position) = app_window.window.outer_position() {
                let position = position.to_logical::<f64>(scale);
                self.config.window_position = (position.x, position.y);
            }
        }
    }

    /// Closes a window. Returns `true` when the application should exit.
    ///
    /// macOS apps keep running with no windows; elsewhere closing the last
    /// window quits.
    pub fn close_window(&mut self, id: WindowId) -> bool {
        self.remember_geometry(id);
        self.windows.close(id);
        self.windows.is_empty() && !self.profile.has_root_menu
    }

    pub fn save_config(&self) {
        if let Err(e) = config::settings::save_config(&self.config, None) {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    pub fn handle_user_event(
        &mut self,
        event: UserEvent,
        target: &EventLoopWindowTarget<UserEvent>,
    ) {
        match event {
            UserEvent::MenuActivated(id) => {
                let Some(action) = self
                    .menu_bar
                    .as_ref()
                    .and_then(|menu_bar| menu_bar.action_for(&id))
                else {
                    tracing::debug!("No action for menu item {:?}", id);
                    return;
                };
                let context = ActivationContext {
                    window: self.windows.focused().map(|w| w.handle),
                };
                activate(action, &context, &self.proxy);
            }
            UserEvent::DispatchCommand(command) => match self.windows.focused() {
                Some(app_window) => {
                    evaluate(&app_window.webview, &bridge::command_script(command));
                }
                None => tracing::warn!("No focused window for command `{}`", command),
            },
            UserEvent::SendToWindow { window, message } => match self.windows.get(window) {
                Some(app_window) => {
                    evaluate(&app_window.webview, &bridge::window_message_script(&message));
                }
                None => tracing::warn!("Window {:?} is gone, dropping {:?}", window, message),
            },
            UserEvent::ToggleHostDevTools { window } => {
                if !self.config.devtools {
                    tracing::info!("Devtools are disabled; set `devtools` in the config to enable them");
                    return;
                }
                if let Some(app_window) = self.windows.get(window) {
                    let webview = &app_window.webview;
                    if webview.is_devtools_open() {
                        webview.close_devtools();
                    } else {
                        webview.open_devtools();
                    }
                }
            }
            UserEvent::Zoom { window, step } => match self.windows.get_mut(window) {
                Some(app_window) => {
                    let level = step.apply(app_window.zoom);
                    match app_window.webview.zoom(level) {
                        Ok(()) => app_window.zoom = level,
                        Err(e) => tracing::warn!("Failed to zoom window {:?}: {}", window, e),
                    }
                }
                None => tracing::debug!("Window {:?} is gone, not zooming", window),
            },
            UserEvent::NewWindowEvent => {
                tracing::info!("Observed `new-window-event`");
                self.open_window(target);
            }
            UserEvent::OpenWindow => self.open_window(target),
            UserEvent::OpenExternal(url) => open_external(url),
            UserEvent::CheckForUpdates => open_external(RELEASES_URL.to_string()),
            UserEvent::KeymapChanged(keymap) => self.apply_keymap(keymap),
        }
    }

    fn apply_keymap(&mut self, keymap: Keymap) {
        if keymap == self.config.keymap {
            return;
        }
        self.config.keymap = keymap;
        self.save_config();
        if let Err(e) = self.rebuild_menu() {
            tracing::error!("Failed to rebuild menu after keymap change: {}", e);
        }
    }
}

/// Moves each window from the old menu bar to the new one.
///
/// A window that fails to detach or attach is logged and the rest carry on.
/// Returns how many windows had a failure.
fn reattach<W>(
    windows: impl IntoIterator<Item = W>,
    mut detach: impl FnMut(&W) -> Result<(), MenuError>,
    mut attach: impl FnMut(&W) -> Result<(), MenuError>,
) -> usize {
    let mut failed = 0;
    for window in windows {
        let mut ok = true;
        if let Err(e) = detach(&window) {
            tracing::warn!("Failed to detach old menu from a window: {}", e);
            ok = false;
        }
        if let Err(e) = attach(&window) {
            tracing::warn!("Failed to attach menu to a window: {}", e);
            ok = false;
        }
        if !ok {
            failed += 1;
        }
    }
    failed
}

fn evaluate(webview: &wry::WebView, script: &str) {
    if let Err(e) = webview.evaluate_script(script) {
        tracing::warn!("Failed to deliver event to web content: {}", e);
    }
}

/// Opens `url` in the default browser without blocking the event loop.
fn open_external(url: String) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open {}: {}", url, e);
        }
    });
}

fn outline(template: &[MenuNode]) -> String {
    template.iter().map(MenuNode::to_string).collect()
}
