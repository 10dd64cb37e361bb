//! Keeps track of the open application windows and which one has focus.

use std::collections::HashMap;

use tao::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder, WindowId};
use wry::{WebView, WebViewBuilder};

use super::events::{UserEvent, WindowHandle};
use super::ipc::handle_ipc_message;
use crate::config::AppConfig;
use crate::core::{MenuError, APP_NAME};

/// One native window and the web content it hosts.
pub struct AppWindow {
    pub handle: WindowHandle,
    /// Current page zoom factor of the webview.
    pub zoom: f64,
    // Field order matters: the webview must drop before its window.
    pub webview: WebView,
    pub window: Window,
}

/// Creates and enumerates application windows.
pub struct WindowRegistry {
    windows: HashMap<WindowId, AppWindow>,
    focused: Option<WindowId>,
    next_handle: u32,
    proxy: EventLoopProxy<UserEvent>,
}

impl WindowRegistry {
    pub fn new(proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            windows: HashMap::new(),
            focused: None,
            next_handle: 1,
            proxy,
        }
    }

    /// Opens a window loading `url` and makes it the focused one.
    pub fn open(
        &mut self,
        target: &EventLoopWindowTarget<UserEvent>,
        url: &str,
        config: &AppConfig,
    ) -> Result<&AppWindow, MenuError> {
        let (width, height) = config.window_size;
        let (pos_x, pos_y) = config.window_position;

        let window = WindowBuilder::new()
            .with_title(APP_NAME)
            .with_inner_size(tao::dpi::LogicalSize::new(width, height))
            .with_position(tao::dpi::LogicalPosition::new(pos_x, pos_y))
            .with_min_inner_size(tao::dpi::LogicalSize::new(800, 600))
            .build(target)
            .map_err(|e| MenuError::Window(e.to_string()))?;

        let ipc_proxy = self.proxy.clone();
        let webview = WebViewBuilder::new(&window)
            .with_url(url)
            .with_devtools(config.devtools)
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                if let Err(e) = handle_ipc_message(request.body(), &ipc_proxy) {
                    tracing::warn!("Ignoring IPC message: {}", e);
                }
            })
            .build()
            .map_err(|e| MenuError::Window(e.to_string()))?;

        let handle = WindowHandle(self.next_handle);
        self.next_handle += 1;

        let id = window.id();
        tracing::info!("Opened window {:?} at {}", handle, url);
        self.focused = Some(id);
        let entry = self.windows.entry(id).or_insert(AppWindow {
            handle,
            zoom: 1.0,
            webview,
            window,
        });
        Ok(&*entry)
    }

    /// Records a focus change reported by the event loop.
    pub fn set_focus(&mut self, id: WindowId, focused: bool) {
        if focused {
            self.focused = Some(id);
        } else if self.focused == Some(id) {
            self.focused = None;
        }
    }

    pub fn focused(&self) -> Option<&AppWindow> {
        self.focused.and_then(|id| self.windows.get(&id))
    }

    pub fn get(&self, handle: WindowHandle) -> Option<&AppWindow> {
        self.windows.values().find(|w| w.handle == handle)
    }

    pub fn get_mut(&mut self, handle: WindowHandle) -> Option<&mut AppWindow> {
        self.windows.values_mut().find(|w| w.handle == handle)
    }

    pub fn by_id(&self, id: WindowId) -> Option<&AppWindow> {
        self.windows.get(&id)
    }

    pub fn close(&mut self, id: WindowId) -> Option<AppWindow> {
        if self.focused == Some(id) {
            self.focused = None;
        }
        let closed = self.windows.remove(&id);
        if let Some(window) = &closed {
            tracing::info!("Closed window {:?}", window.handle);
        }
        closed
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppWindow> {
        self.windows.values()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
