/*
 * Capability seams between the portable window logic and the operating system.
 *
 * `WindowSurface` is the set of operations the screen manager, the fullscreen
 * transitions and the window registry perform on one native window. The Win32
 * backend implements it over an `HWND`; tests implement it over an in-memory
 * fake. `WindowPlatform` covers what is not tied to a single window: creating
 * windows, locating the host's main window, enumerating monitors and quitting.
 *
 * All calls are made from the thread that owns the window.
 */
use crate::error::Result as PlatformResult;
use crate::types::{
    ChromeMode, ClassStyle, ExtendedStyle, FrameRect, Margins, MonitorInfo, SystemCommand,
    WindowId, WindowStyle,
};

pub trait WindowSurface {
    /// Whether the underlying handle still refers to a live window.
    fn is_valid(&self) -> bool;

    fn is_maximized(&self) -> PlatformResult<bool>;

    fn style(&self) -> PlatformResult<WindowStyle>;
    fn set_style(&mut self, style: WindowStyle) -> PlatformResult<()>;
    fn extended_style(&self) -> PlatformResult<ExtendedStyle>;
    fn set_extended_style(&mut self, style: ExtendedStyle) -> PlatformResult<()>;

    /// Screen-space window rectangle in device pixels.
    fn frame(&self) -> PlatformResult<FrameRect>;

    /// Moves and sizes the window to `rect` without changing z-order or
    /// activation, and recomputes the non-client frame.
    fn place(&mut self, rect: FrameRect) -> PlatformResult<()>;

    /// Moves and/or sizes the window and brings it to the top of the z-order.
    /// `None` leaves the corresponding component untouched.
    fn reposition(
        &mut self,
        origin: Option<(i32, i32)>,
        size: Option<(i32, i32)>,
    ) -> PlatformResult<()>;

    /// Forces the non-client frame to be recomputed without moving the window.
    fn refresh_frame(&mut self) -> PlatformResult<()>;

    fn set_topmost(&mut self, topmost: bool) -> PlatformResult<()>;

    /// Delivers a system command synchronously.
    fn send_system_command(&mut self, command: SystemCommand) -> PlatformResult<()>;
    /// Queues a system command on the window's message queue.
    fn post_system_command(&mut self, command: SystemCommand) -> PlatformResult<()>;
    /// Queues a non-client double click on the top edge at the cursor, which
    /// maximizes the window vertically.
    fn post_vertical_maximize(&mut self) -> PlatformResult<()>;

    fn extend_frame_into_client_area(&mut self, margins: Margins) -> PlatformResult<()>;
    fn set_chrome_mode(&mut self, mode: ChromeMode) -> PlatformResult<()>;

    /// Monitor nearest to the window.
    fn nearest_monitor(&self) -> PlatformResult<MonitorInfo>;

    fn class_style(&self) -> PlatformResult<ClassStyle>;
    fn set_class_style(&mut self, style: ClassStyle) -> PlatformResult<()>;

    /// Prepares the taskbar integration. Safe to call more than once.
    fn prepare_taskbar(&mut self) -> PlatformResult<()>;
    fn set_taskbar_tab(&mut self, visible: bool) -> PlatformResult<()>;

    fn show(&mut self) -> PlatformResult<()>;
    fn hide(&mut self) -> PlatformResult<()>;
    fn close(&mut self) -> PlatformResult<()>;
    fn set_title(&mut self, title: &str) -> PlatformResult<()>;
}

pub trait WindowPlatform {
    type Surface: WindowSurface;

    /// Creates a hidden top-level window for `window_id`. `arguments` is the
    /// opaque string the host passed to `createWindow`.
    fn create_window(&mut self, window_id: WindowId, arguments: &str)
    -> PlatformResult<Self::Surface>;

    /// Resolves the root window hosting the main view.
    fn main_window(&mut self) -> PlatformResult<Self::Surface>;

    fn attached_monitors(&self) -> PlatformResult<Vec<MonitorInfo>>;

    /// Asks the message loop to terminate.
    fn post_quit(&mut self);
}
