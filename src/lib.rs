/*
 * Provides the public entry point for the deskwindow crate, the native side of a
 * multi-window desktop host on Windows. A host forwards method-channel calls to
 * `ScreenPlugin::handle_method_call`; the plugin manages sub-windows, monitor
 * enumeration and the main window's screen properties, including fullscreen
 * transitions that restore the exact prior window configuration.
 *
 * Window logic is written against the `WindowSurface`/`WindowPlatform` traits so
 * that it stays portable and testable; only the Win32 backend (`HwndSurface`,
 * `Win32Platform` and its handlers) is compiled on Windows alone.
 */
pub mod app;
pub(crate) mod chrome;
pub(crate) mod command_executor;
pub mod error;
pub mod fullscreen;
#[cfg(target_os = "windows")]
pub(crate) mod handlers;
pub mod method_call;
pub mod registry;
pub mod screen_manager;
pub mod surface;
#[cfg(test)]
pub(crate) mod test_support;
pub mod types;
#[cfg(target_os = "windows")]
pub(crate) mod window_common;

pub use app::ScreenPlugin;
pub use chrome::WindowChrome;
pub use error::{PlatformError, Result as PlatformResult};
pub use fullscreen::{FullscreenController, FullscreenState, WindowRestoreState};
pub use method_call::{MethodCall, MethodReply};
pub use registry::WindowRegistry;
pub use screen_manager::ScreenManager;
pub use surface::{WindowPlatform, WindowSurface};
pub use types::{
    Bounds, ChromeMode, ClassStyle, ExtendedStyle, FrameRect, Margins, MonitorInfo, PluginConfig,
    ScreenDescriptor, SystemCommand, TitleBarStyle, WindowId, WindowStyle,
};
#[cfg(target_os = "windows")]
pub use window_common::{HwndSurface, Win32Platform};
