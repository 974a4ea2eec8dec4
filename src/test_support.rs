/*
 * In-memory window surface and platform used by the unit tests. The fake keeps
 * just enough window-manager behaviour to make restore semantics observable:
 * maximizing remembers the normal rectangle and fills the work area (or the
 * whole monitor when the window has no caption), restoring brings the normal
 * rectangle back. Every mutating call is recorded in order.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::surface::{WindowPlatform, WindowSurface};
use crate::types::{
    ChromeMode, ClassStyle, ExtendedStyle, FrameRect, Margins, MonitorInfo, SystemCommand,
    WindowId, WindowStyle,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SurfaceCall {
    SetStyle(WindowStyle),
    SetExtendedStyle(ExtendedStyle),
    Place(FrameRect),
    Reposition {
        origin: Option<(i32, i32)>,
        size: Option<(i32, i32)>,
    },
    RefreshFrame,
    SetTopmost(bool),
    SendSystemCommand(SystemCommand),
    PostSystemCommand(SystemCommand),
    PostVerticalMaximize,
    ExtendFrame(Margins),
    SetChromeMode(ChromeMode),
    SetClassStyle(ClassStyle),
    PrepareTaskbar,
    SetTaskbarTab(bool),
    Show,
    Hide,
    Close,
    SetTitle(String),
}

#[derive(Debug)]
struct FakeWindow {
    valid: bool,
    maximized: bool,
    style: WindowStyle,
    extended_style: ExtendedStyle,
    class_style: ClassStyle,
    frame: FrameRect,
    normal_frame: FrameRect,
    chrome_mode: ChromeMode,
    monitor: MonitorInfo,
    fail_monitor_query: bool,
    taskbar_prepared: bool,
    taskbar_tab: bool,
    visible: bool,
    title: String,
    calls: Vec<SurfaceCall>,
}

impl FakeWindow {
    fn maximize(&mut self) {
        if self.maximized {
            return;
        }
        self.normal_frame = self.frame;
        self.frame = if self.style.intersects(WindowStyle::CAPTION) {
            self.monitor.work_area
        } else {
            self.monitor.frame
        };
        self.maximized = true;
    }

    fn restore(&mut self) {
        if self.maximized {
            self.frame = self.normal_frame;
            self.maximized = false;
        }
    }

    fn apply(&mut self, command: SystemCommand) {
        match command {
            SystemCommand::Maximize => self.maximize(),
            SystemCommand::Restore => self.restore(),
        }
    }
}

/// Cloning shares the same underlying window.
#[derive(Debug, Clone)]
pub(crate) struct FakeSurface {
    window: Rc<RefCell<FakeWindow>>,
}

pub(crate) fn default_monitor() -> MonitorInfo {
    MonitorInfo {
        frame: FrameRect::new(0, 0, 1920, 1080),
        work_area: FrameRect::new(0, 0, 1920, 1040),
        scale_factor: 1.0,
    }
}

impl FakeSurface {
    pub(crate) fn windowed() -> Self {
        let frame = FrameRect::new(100, 100, 900, 700);
        Self {
            window: Rc::new(RefCell::new(FakeWindow {
                valid: true,
                maximized: false,
                style: WindowStyle::OVERLAPPEDWINDOW | WindowStyle::VISIBLE,
                extended_style: ExtendedStyle::WINDOWEDGE,
                class_style: ClassStyle::HREDRAW | ClassStyle::VREDRAW,
                frame,
                normal_frame: frame,
                chrome_mode: ChromeMode::Normal,
                monitor: default_monitor(),
                fail_monitor_query: false,
                taskbar_prepared: false,
                taskbar_tab: true,
                visible: true,
                title: String::new(),
                calls: Vec::new(),
            })),
        }
    }

    pub(crate) fn calls(&self) -> Vec<SurfaceCall> {
        self.window.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.window.borrow_mut().calls.clear();
    }

    pub(crate) fn current_frame(&self) -> FrameRect {
        self.window.borrow().frame
    }

    pub(crate) fn current_style(&self) -> WindowStyle {
        self.window.borrow().style
    }

    pub(crate) fn current_extended_style(&self) -> ExtendedStyle {
        self.window.borrow().extended_style
    }

    pub(crate) fn current_class_style(&self) -> ClassStyle {
        self.window.borrow().class_style
    }

    pub(crate) fn maximized(&self) -> bool {
        self.window.borrow().maximized
    }

    pub(crate) fn chrome_mode(&self) -> ChromeMode {
        self.window.borrow().chrome_mode
    }

    pub(crate) fn monitor(&self) -> MonitorInfo {
        self.window.borrow().monitor
    }

    pub(crate) fn visible(&self) -> bool {
        self.window.borrow().visible
    }

    pub(crate) fn title(&self) -> String {
        self.window.borrow().title.clone()
    }

    pub(crate) fn taskbar_tab(&self) -> bool {
        self.window.borrow().taskbar_tab
    }

    pub(crate) fn taskbar_prepared(&self) -> bool {
        self.window.borrow().taskbar_prepared
    }

    pub(crate) fn set_style_directly(&self, style: WindowStyle) {
        self.window.borrow_mut().style = style;
    }

    pub(crate) fn set_extended_style_directly(&self, style: ExtendedStyle) {
        self.window.borrow_mut().extended_style = style;
    }

    pub(crate) fn set_frame_directly(&self, frame: FrameRect) {
        let mut window = self.window.borrow_mut();
        window.frame = frame;
        window.normal_frame = frame;
    }

    pub(crate) fn set_maximized_directly(&self, maximized: bool) {
        let mut window = self.window.borrow_mut();
        if maximized {
            window.maximize();
        } else {
            window.restore();
        }
    }

    pub(crate) fn set_monitor(&self, monitor: MonitorInfo) {
        self.window.borrow_mut().monitor = monitor;
    }

    pub(crate) fn fail_monitor_query(&self, fail: bool) {
        self.window.borrow_mut().fail_monitor_query = fail;
    }

    pub(crate) fn invalidate(&self) {
        self.window.borrow_mut().valid = false;
    }

    fn read<T>(&self, f: impl FnOnce(&FakeWindow) -> T) -> PlatformResult<T> {
        let window = self.window.borrow();
        if !window.valid {
            return Err(PlatformError::InvalidHandle("fake window is gone".into()));
        }
        Ok(f(&*window))
    }

    fn write(&mut self, call: SurfaceCall, f: impl FnOnce(&mut FakeWindow)) -> PlatformResult<()> {
        let mut window = self.window.borrow_mut();
        if !window.valid {
            return Err(PlatformError::InvalidHandle("fake window is gone".into()));
        }
        window.calls.push(call);
        f(&mut *window);
        Ok(())
    }
}

impl WindowSurface for FakeSurface {
    fn is_valid(&self) -> bool {
        self.window.borrow().valid
    }

    fn is_maximized(&self) -> PlatformResult<bool> {
        self.read(|w| w.maximized)
    }

    fn style(&self) -> PlatformResult<WindowStyle> {
        self.read(|w| w.style)
    }

    fn set_style(&mut self, style: WindowStyle) -> PlatformResult<()> {
        self.write(SurfaceCall::SetStyle(style), |w| w.style = style)
    }

    fn extended_style(&self) -> PlatformResult<ExtendedStyle> {
        self.read(|w| w.extended_style)
    }

    fn set_extended_style(&mut self, style: ExtendedStyle) -> PlatformResult<()> {
        self.write(SurfaceCall::SetExtendedStyle(style), |w| {
            w.extended_style = style
        })
    }

    fn frame(&self) -> PlatformResult<FrameRect> {
        self.read(|w| w.frame)
    }

    fn place(&mut self, rect: FrameRect) -> PlatformResult<()> {
        self.write(SurfaceCall::Place(rect), |w| w.frame = rect)
    }

    fn reposition(
        &mut self,
        origin: Option<(i32, i32)>,
        size: Option<(i32, i32)>,
    ) -> PlatformResult<()> {
        self.write(SurfaceCall::Reposition { origin, size }, |w| {
            let (x, y) = origin.unwrap_or((w.frame.left, w.frame.top));
            let (width, height) = size.unwrap_or((w.frame.width(), w.frame.height()));
            w.frame = FrameRect::from_origin_size(x, y, width, height);
        })
    }

    fn refresh_frame(&mut self) -> PlatformResult<()> {
        self.write(SurfaceCall::RefreshFrame, |_| {})
    }

    fn set_topmost(&mut self, topmost: bool) -> PlatformResult<()> {
        self.write(SurfaceCall::SetTopmost(topmost), |w| {
            w.extended_style.set(ExtendedStyle::TOPMOST, topmost)
        })
    }

    fn send_system_command(&mut self, command: SystemCommand) -> PlatformResult<()> {
        self.write(SurfaceCall::SendSystemCommand(command), |w| w.apply(command))
    }

    fn post_system_command(&mut self, command: SystemCommand) -> PlatformResult<()> {
        self.write(SurfaceCall::PostSystemCommand(command), |w| w.apply(command))
    }

    fn post_vertical_maximize(&mut self) -> PlatformResult<()> {
        self.write(SurfaceCall::PostVerticalMaximize, |w| {
            w.frame.top = w.monitor.work_area.top;
            w.frame.bottom = w.monitor.work_area.bottom;
        })
    }

    fn extend_frame_into_client_area(&mut self, margins: Margins) -> PlatformResult<()> {
        self.write(SurfaceCall::ExtendFrame(margins), |_| {})
    }

    fn set_chrome_mode(&mut self, mode: ChromeMode) -> PlatformResult<()> {
        self.write(SurfaceCall::SetChromeMode(mode), |w| w.chrome_mode = mode)
    }

    fn nearest_monitor(&self) -> PlatformResult<MonitorInfo> {
        let window = self.window.borrow();
        if !window.valid {
            return Err(PlatformError::InvalidHandle("fake window is gone".into()));
        }
        if window.fail_monitor_query {
            return Err(PlatformError::OperationFailed(
                "MonitorFromWindow failed".into(),
            ));
        }
        Ok(window.monitor)
    }

    fn class_style(&self) -> PlatformResult<ClassStyle> {
        self.read(|w| w.class_style)
    }

    fn set_class_style(&mut self, style: ClassStyle) -> PlatformResult<()> {
        self.write(SurfaceCall::SetClassStyle(style), |w| w.class_style = style)
    }

    fn prepare_taskbar(&mut self) -> PlatformResult<()> {
        self.write(SurfaceCall::PrepareTaskbar, |w| w.taskbar_prepared = true)
    }

    fn set_taskbar_tab(&mut self, visible: bool) -> PlatformResult<()> {
        self.write(SurfaceCall::SetTaskbarTab(visible), |w| {
            w.taskbar_prepared = true;
            w.taskbar_tab = visible;
        })
    }

    fn show(&mut self) -> PlatformResult<()> {
        self.write(SurfaceCall::Show, |w| w.visible = true)
    }

    fn hide(&mut self) -> PlatformResult<()> {
        self.write(SurfaceCall::Hide, |w| w.visible = false)
    }

    fn close(&mut self) -> PlatformResult<()> {
        self.write(SurfaceCall::Close, |w| {
            w.visible = false;
            w.valid = false;
        })
    }

    fn set_title(&mut self, title: &str) -> PlatformResult<()> {
        self.write(SurfaceCall::SetTitle(title.to_string()), |w| {
            w.title = title.to_string()
        })
    }
}

/// Fake platform handing out `FakeSurface`s. Created windows start hidden.
#[derive(Debug, Clone)]
pub(crate) struct FakePlatform {
    pub(crate) main: FakeSurface,
    pub(crate) monitors: Vec<MonitorInfo>,
    pub(crate) created: Rc<RefCell<Vec<(WindowId, String, FakeSurface)>>>,
    pub(crate) quit_posted: Rc<RefCell<bool>>,
    pub(crate) fail_create: bool,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self {
            main: FakeSurface::windowed(),
            monitors: vec![default_monitor()],
            created: Rc::new(RefCell::new(Vec::new())),
            quit_posted: Rc::new(RefCell::new(false)),
            fail_create: false,
        }
    }

    pub(crate) fn created_surface(&self, window_id: WindowId) -> Option<FakeSurface> {
        self.created
            .borrow()
            .iter()
            .find(|(id, _, _)| *id == window_id)
            .map(|(_, _, surface)| surface.clone())
    }
}

impl WindowPlatform for FakePlatform {
    type Surface = FakeSurface;

    fn create_window(
        &mut self,
        window_id: WindowId,
        arguments: &str,
    ) -> PlatformResult<FakeSurface> {
        if self.fail_create {
            return Err(PlatformError::OperationFailed("CreateWindowExW failed".into()));
        }
        let surface = FakeSurface::windowed();
        surface.window.borrow_mut().visible = false;
        self.created
            .borrow_mut()
            .push((window_id, arguments.to_string(), surface.clone()));
        Ok(surface)
    }

    fn main_window(&mut self) -> PlatformResult<FakeSurface> {
        Ok(self.main.clone())
    }

    fn attached_monitors(&self) -> PlatformResult<Vec<MonitorInfo>> {
        Ok(self.monitors.clone())
    }

    fn post_quit(&mut self) {
        *self.quit_posted.borrow_mut() = true;
    }
}
