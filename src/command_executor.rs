/*
 * This module is responsible for executing decoded `MethodCall`s against the
 * plugin state. Window-registry calls go to `WindowRegistry`, screen calls to
 * the main window's `ScreenManager`, and platform-wide calls (monitor list,
 * quit) straight to the backend. Each function returns the JSON value sent
 * back as the success reply.
 */
use crate::app::ScreenPlugin;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::method_call::MethodCall;
use crate::screen_manager::ScreenManager;
use crate::surface::{WindowPlatform, WindowSurface};
use crate::types::{ScreenDescriptor, WindowId};
use serde_json::{Value as JsonValue, json};

pub(crate) fn execute_method_call<P: WindowPlatform>(
    plugin: &mut ScreenPlugin<P>,
    call: MethodCall,
) -> PlatformResult<JsonValue> {
    log::trace!("CommandExecutor: executing {call:?}");
    match call {
        MethodCall::CreateWindow(arguments) => {
            execute_create_window(plugin, arguments.as_deref().unwrap_or_default())
        }
        MethodCall::Show(window_id) => {
            plugin.registry.show(window_id)?;
            Ok(JsonValue::Null)
        }
        MethodCall::Hide(window_id) => {
            plugin.registry.hide(window_id)?;
            Ok(JsonValue::Null)
        }
        MethodCall::Close(window_id) => execute_close(plugin, window_id),
        MethodCall::SetFrame {
            window_id,
            left,
            top,
            width,
            height,
        } => {
            plugin
                .registry
                .set_frame(window_id, left, top, width, height)?;
            Ok(JsonValue::Null)
        }
        MethodCall::Center(window_id) => {
            plugin.registry.center(window_id)?;
            Ok(JsonValue::Null)
        }
        MethodCall::SetTitle { window_id, title } => {
            plugin.registry.set_title(window_id, &title)?;
            Ok(JsonValue::Null)
        }
        MethodCall::GetAllSubWindowIds => Ok(json!(plugin.registry.sub_window_ids())),
        MethodCall::GetAttachedScreenList => execute_get_attached_screen_list(plugin),
        MethodCall::EnsureScreenInitialized => execute_ensure_screen_initialized(plugin),
        MethodCall::Destroy => {
            log::debug!("CommandExecutor: destroy, posting quit");
            plugin.platform.post_quit();
            Ok(json!(true))
        }
        screen_call => execute_screen_call(plugin.screen_mut()?, screen_call),
    }
}

fn execute_create_window<P: WindowPlatform>(
    plugin: &mut ScreenPlugin<P>,
    arguments: &str,
) -> PlatformResult<JsonValue> {
    let window_id = plugin.registry.create(&mut plugin.platform, arguments)?;
    if !plugin.config.default_window_title.is_empty() {
        plugin
            .registry
            .set_title(window_id, &plugin.config.default_window_title)?;
    }
    Ok(json!(window_id))
}

/*
 * Closes a window. Closing the main window also drops its screen manager so
 * that later screen calls report `ScreenNotInitialized` instead of touching a
 * dead handle.
 */
fn execute_close<P: WindowPlatform>(
    plugin: &mut ScreenPlugin<P>,
    window_id: WindowId,
) -> PlatformResult<JsonValue> {
    plugin.registry.close(window_id)?;
    if window_id.is_main() {
        plugin.screen = None;
    }
    Ok(JsonValue::Null)
}

fn execute_get_attached_screen_list<P: WindowPlatform>(
    plugin: &ScreenPlugin<P>,
) -> PlatformResult<JsonValue> {
    let screens: Vec<ScreenDescriptor> = plugin
        .platform
        .attached_monitors()?
        .iter()
        .map(ScreenDescriptor::from)
        .collect();
    log::debug!("CommandExecutor: {} attached screen(s)", screens.len());
    Ok(serde_json::to_value(screens)?)
}

/*
 * Binds the screen manager to the host's main window. A manager that is
 * already bound to a live window is kept, so fullscreen restore state survives
 * repeated initialization.
 */
fn execute_ensure_screen_initialized<P: WindowPlatform>(
    plugin: &mut ScreenPlugin<P>,
) -> PlatformResult<JsonValue> {
    let reuse = plugin
        .screen
        .as_ref()
        .is_some_and(|screen| screen.surface().is_valid());
    if reuse {
        log::debug!("CommandExecutor: screen manager already initialized");
    } else {
        let surface = plugin.platform.main_window()?;
        plugin.screen = Some(ScreenManager::new(surface));
        log::debug!("CommandExecutor: screen manager initialized");
    }
    Ok(json!(true))
}

fn execute_screen_call<S: WindowSurface>(
    screen: &mut ScreenManager<S>,
    call: MethodCall,
) -> PlatformResult<JsonValue> {
    let value = match call {
        MethodCall::SetFullScreen { is_full_screen } => {
            screen.set_full_screen(is_full_screen)?;
            json!(true)
        }
        MethodCall::IsFullScreen => json!(screen.is_full_screen()),
        MethodCall::GetBounds { device_pixel_ratio } => {
            serde_json::to_value(screen.get_bounds(device_pixel_ratio)?)?
        }
        MethodCall::SetBounds {
            device_pixel_ratio,
            x,
            y,
            width,
            height,
        } => {
            screen.set_bounds(device_pixel_ratio, x, y, width, height)?;
            json!(true)
        }
        MethodCall::WaitUntilReadyToShow => {
            screen.wait_until_ready_to_show()?;
            json!(true)
        }
        MethodCall::IsMaximized => json!(screen.is_maximized()?),
        MethodCall::Maximize { vertically } => {
            screen.maximize(vertically)?;
            json!(true)
        }
        MethodCall::SetAsFrameless => {
            screen.set_as_frameless()?;
            json!(true)
        }
        MethodCall::SetTitleBarStyle { title_bar_style } => {
            screen.set_title_bar_style(title_bar_style)?;
            json!(true)
        }
        MethodCall::IsResizable => json!(screen.is_resizable()),
        MethodCall::SetResizable { is_resizable } => {
            screen.set_resizable(is_resizable)?;
            json!(true)
        }
        MethodCall::IsAlwaysOnTop => json!(screen.is_always_on_top()?),
        MethodCall::SetAlwaysOnTop { is_always_on_top } => {
            screen.set_always_on_top(is_always_on_top)?;
            json!(true)
        }
        MethodCall::IsSkipTaskbar => json!(screen.is_skip_taskbar()),
        MethodCall::SetSkipTaskbar { is_skip_taskbar } => {
            screen.set_skip_taskbar(is_skip_taskbar)?;
            json!(true)
        }
        MethodCall::IsClosable => json!(screen.is_closable()?),
        MethodCall::SetClosable { is_closable } => {
            screen.set_closable(is_closable)?;
            json!(true)
        }
        // Registry and platform calls are dispatched before reaching here.
        other => {
            log::error!("CommandExecutor: {other:?} routed to the screen manager");
            return Err(PlatformError::InvalidArguments(format!(
                "{other:?} is not a screen call"
            )));
        }
    };
    Ok(value)
}
