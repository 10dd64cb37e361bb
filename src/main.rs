#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use boostnote_desktop::app::{self, menu_bar::AcceleratorTable, shell::Shell, EventProxy};
use boostnote_desktop::config::AppConfig;
use boostnote_desktop::core::PlatformProfile;
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let accelerators = AcceleratorTable::default();

    #[allow(unused_mut)]
    let mut event_loop_builder = EventLoopBuilder::<app::UserEvent>::with_user_event();

    // Windows only delivers menu accelerators that the loop translates itself.
    #[cfg(target_os = "windows")]
    {
        use tao::platform::windows::EventLoopBuilderExtWindows;
        let hook_accelerators = accelerators.clone();
        event_loop_builder.with_msg_hook(move |msg| hook_accelerators.translate(msg));
    }

    let event_loop = event_loop_builder.build();
    let proxy = event_loop.create_proxy();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    let profile = PlatformProfile::current();
    tracing::info!("Starting with {:?}", profile);

    // Menu clicks arrive on muda's side; forward them into the event loop.
    let menu_proxy = proxy.clone();
    muda::MenuEvent::set_event_handler(Some(move |event: muda::MenuEvent| {
        EventProxy::send_event(&menu_proxy, app::UserEvent::MenuActivated(event.id));
    }));

    let mut shell = Shell::new(config, profile, proxy, accelerators);

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                if let Err(e) = shell.rebuild_menu() {
                    tracing::error!("Failed to install application menu: {}", e);
                }
                shell.open_window(target);
                tracing::info!("Application initialized.");
            }
            Event::WindowEvent {
                window_id, event, ..
            } => match event {
                WindowEvent::CloseRequested => {
                    if shell.close_window(window_id) {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                WindowEvent::Focused(focused) => shell.set_focus(window_id, focused),
                WindowEvent::Resized(_) | WindowEvent::Moved(_) => {
                    shell.remember_geometry(window_id);
                }
                _ => (),
            },
            Event::UserEvent(user_event) => {
                shell.handle_user_event(user_event, target);
            }
            Event::LoopDestroyed => {
                shell.save_config();
            }
            _ => (),
        }
    });
}
