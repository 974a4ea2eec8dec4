/*
 * This module provides the Win32 implementation of the window capabilities:
 * `HwndSurface` drives one native window through its `HWND`, and
 * `Win32Platform` registers the sub-window class, creates native windows,
 * resolves the host's root window and enumerates monitors.
 *
 * Monitor, taskbar and non-client chrome handling are delegated to the
 * dedicated handlers in the `super::handlers` module.
 */
use super::{
    error::{PlatformError, Result as PlatformResult},
    handlers::{chrome_handler, monitor_handler, taskbar_handler::TaskbarHandle},
    surface::{WindowPlatform, WindowSurface},
    types::{
        ChromeMode, ClassStyle, ExtendedStyle, FrameRect, Margins, MonitorInfo, PluginConfig,
        SystemCommand, WindowId, WindowStyle,
    },
};

use windows::{
    Win32::{
        Foundation::{
            ERROR_SUCCESS, GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, POINT, RECT,
            SetLastError, WIN32_ERROR, WPARAM,
        },
        Graphics::Dwm::DwmExtendFrameIntoClientArea,
        Graphics::Gdi::{COLOR_WINDOW, HBRUSH},
        System::LibraryLoader::GetModuleHandleW,
        UI::Controls::MARGINS,
        UI::WindowsAndMessaging::*,
    },
    core::{HSTRING, PCWSTR},
};

use std::ffi::c_void;

pub(crate) fn frame_from_rect(rect: RECT) -> FrameRect {
    FrameRect::new(rect.left, rect.top, rect.right, rect.bottom)
}

// Packs screen coordinates the way MAKELPARAM does.
fn make_point_lparam(point: POINT) -> LPARAM {
    let low = (point.x as u16) as u32;
    let high = (point.y as u16) as u32;
    LPARAM(((high << 16) | low) as isize)
}

fn system_command_code(command: SystemCommand) -> u32 {
    match command {
        SystemCommand::Maximize => SC_MAXIMIZE,
        SystemCommand::Restore => SC_RESTORE,
    }
}

/*
 * A native window driven through its `HWND`. The taskbar list is created on
 * demand, either by `prepare_taskbar` or by the first taskbar change.
 */
#[derive(Debug)]
pub struct HwndSurface {
    hwnd: HWND,
    taskbar: Option<TaskbarHandle>,
}

impl HwndSurface {
    pub fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            taskbar: None,
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    fn checked_hwnd(&self) -> PlatformResult<HWND> {
        if self.is_valid() {
            Ok(self.hwnd)
        } else {
            Err(PlatformError::InvalidHandle(format!(
                "HWND {:?} does not refer to a live window",
                self.hwnd
            )))
        }
    }

    fn set_window_pos(
        &self,
        insert_after: Option<HWND>,
        rect: FrameRect,
        flags: SET_WINDOW_POS_FLAGS,
    ) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        log::trace!("Win32: SetWindowPos {hwnd:?} {rect:?} flags={flags:?}");
        unsafe {
            SetWindowPos(
                hwnd,
                insert_after,
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                flags,
            )?
        };
        Ok(())
    }

    // SetWindowLongW/SetClassLongW return 0 both on failure and when the old
    // value was 0, so the last error is cleared first and inspected afterwards.
    fn check_long_update(previous: u32, what: &str) -> PlatformResult<()> {
        if previous == 0 {
            let error = unsafe { GetLastError() };
            if error != ERROR_SUCCESS {
                log::error!("Win32: {what} failed: {error:?}");
                return Err(PlatformError::OperationFailed(format!(
                    "{what} failed: {error:?}"
                )));
            }
        }
        Ok(())
    }

    fn set_window_long(&mut self, index: WINDOW_LONG_PTR_INDEX, value: u32) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        let previous = unsafe {
            SetLastError(WIN32_ERROR(0));
            SetWindowLongW(hwnd, index, value as i32)
        };
        Self::check_long_update(previous as u32, "SetWindowLongW")
    }

    fn post_message(&self, msg: u32, wparam: WPARAM, lparam: LPARAM) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        unsafe { PostMessageW(Some(hwnd), msg, wparam, lparam)? };
        Ok(())
    }
}

impl WindowSurface for HwndSurface {
    fn is_valid(&self) -> bool {
        !self.hwnd.is_invalid() && unsafe { IsWindow(Some(self.hwnd)) }.as_bool()
    }

    fn is_maximized(&self) -> PlatformResult<bool> {
        let hwnd = self.checked_hwnd()?;
        Ok(unsafe { IsZoomed(hwnd) }.as_bool())
    }

    fn style(&self) -> PlatformResult<WindowStyle> {
        let hwnd = self.checked_hwnd()?;
        Ok(WindowStyle::from_bits_retain(
            unsafe { GetWindowLongW(hwnd, GWL_STYLE) } as u32,
        ))
    }

    fn set_style(&mut self, style: WindowStyle) -> PlatformResult<()> {
        log::trace!("Win32: set style {style:?} on {:?}", self.hwnd);
        self.set_window_long(GWL_STYLE, style.bits())
    }

    fn extended_style(&self) -> PlatformResult<ExtendedStyle> {
        let hwnd = self.checked_hwnd()?;
        Ok(ExtendedStyle::from_bits_retain(
            unsafe { GetWindowLongW(hwnd, GWL_EXSTYLE) } as u32,
        ))
    }

    fn set_extended_style(&mut self, style: ExtendedStyle) -> PlatformResult<()> {
        log::trace!("Win32: set extended style {style:?} on {:?}", self.hwnd);
        self.set_window_long(GWL_EXSTYLE, style.bits())
    }

    fn frame(&self) -> PlatformResult<FrameRect> {
        let hwnd = self.checked_hwnd()?;
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd, &mut rect)? };
        Ok(frame_from_rect(rect))
    }

    fn place(&mut self, rect: FrameRect) -> PlatformResult<()> {
        self.set_window_pos(None, rect, SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED)
    }

    fn reposition(
        &mut self,
        origin: Option<(i32, i32)>,
        size: Option<(i32, i32)>,
    ) -> PlatformResult<()> {
        let mut flags = SET_WINDOW_POS_FLAGS(0);
        if origin.is_none() {
            flags |= SWP_NOMOVE;
        }
        if size.is_none() {
            flags |= SWP_NOSIZE;
        }
        let (x, y) = origin.unwrap_or_default();
        let (width, height) = size.unwrap_or_default();
        let rect = FrameRect::checked_from_origin_size(x, y, width, height).ok_or_else(|| {
            PlatformError::InvalidArguments(format!(
                "bounds ({x}, {y}, {width}, {height}) exceed the coordinate range"
            ))
        })?;
        self.set_window_pos(Some(HWND_TOP), rect, flags)
    }

    fn refresh_frame(&mut self) -> PlatformResult<()> {
        self.set_window_pos(
            None,
            FrameRect::default(),
            SWP_NOZORDER | SWP_NOOWNERZORDER | SWP_NOMOVE | SWP_NOSIZE | SWP_FRAMECHANGED,
        )
    }

    fn set_topmost(&mut self, topmost: bool) -> PlatformResult<()> {
        let insert_after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
        self.set_window_pos(
            Some(insert_after),
            FrameRect::default(),
            SWP_NOMOVE | SWP_NOSIZE,
        )
    }

    fn send_system_command(&mut self, command: SystemCommand) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        log::trace!("Win32: SendMessage WM_SYSCOMMAND {command:?} to {hwnd:?}");
        let _ = unsafe {
            SendMessageW(
                hwnd,
                WM_SYSCOMMAND,
                Some(WPARAM(system_command_code(command) as usize)),
                Some(LPARAM(0)),
            )
        };
        Ok(())
    }

    fn post_system_command(&mut self, command: SystemCommand) -> PlatformResult<()> {
        log::trace!("Win32: PostMessage WM_SYSCOMMAND {command:?} to {:?}", self.hwnd);
        self.post_message(
            WM_SYSCOMMAND,
            WPARAM(system_command_code(command) as usize),
            LPARAM(0),
        )
    }

    fn post_vertical_maximize(&mut self) -> PlatformResult<()> {
        let mut cursor = POINT::default();
        unsafe { GetCursorPos(&mut cursor)? };
        self.post_message(
            WM_NCLBUTTONDBLCLK,
            WPARAM(HTTOP as usize),
            make_point_lparam(cursor),
        )
    }

    fn extend_frame_into_client_area(&mut self, margins: Margins) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        let margins = MARGINS {
            cxLeftWidth: margins.left,
            cxRightWidth: margins.right,
            cyTopHeight: margins.top,
            cyBottomHeight: margins.bottom,
        };
        unsafe { DwmExtendFrameIntoClientArea(hwnd, &margins)? };
        Ok(())
    }

    fn set_chrome_mode(&mut self, mode: ChromeMode) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        chrome_handler::set_chrome_mode(hwnd, mode)
    }

    fn nearest_monitor(&self) -> PlatformResult<MonitorInfo> {
        monitor_handler::nearest_monitor(self.checked_hwnd()?)
    }

    fn class_style(&self) -> PlatformResult<ClassStyle> {
        let hwnd = self.checked_hwnd()?;
        Ok(ClassStyle::from_bits_retain(unsafe {
            GetClassLongW(hwnd, GCL_STYLE)
        }))
    }

    fn set_class_style(&mut self, style: ClassStyle) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        let previous = unsafe {
            SetLastError(WIN32_ERROR(0));
            SetClassLongW(hwnd, GCL_STYLE, style.bits() as i32)
        };
        Self::check_long_update(previous, "SetClassLongW")
    }

    fn prepare_taskbar(&mut self) -> PlatformResult<()> {
        if self.taskbar.is_none() {
            self.taskbar = Some(TaskbarHandle::create()?);
        }
        Ok(())
    }

    fn set_taskbar_tab(&mut self, visible: bool) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        self.prepare_taskbar()?;
        match &self.taskbar {
            Some(taskbar) => taskbar.set_tab(hwnd, visible),
            None => Err(PlatformError::InitializationFailed(
                "taskbar list not available".into(),
            )),
        }
    }

    fn show(&mut self) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        log::debug!("Win32: showing {hwnd:?}");
        unsafe { _ = ShowWindow(hwnd, SW_SHOW) };
        Ok(())
    }

    fn hide(&mut self) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        log::debug!("Win32: hiding {hwnd:?}");
        unsafe { _ = ShowWindow(hwnd, SW_HIDE) };
        Ok(())
    }

    /*
     * Posts WM_CLOSE rather than destroying the window directly, so the
     * window's own procedure runs its close handling before WM_DESTROY.
     */
    fn close(&mut self) -> PlatformResult<()> {
        log::debug!("Win32: posting WM_CLOSE to {:?}", self.hwnd);
        self.post_message(WM_CLOSE, WPARAM(0), LPARAM(0))
    }

    fn set_title(&mut self, title: &str) -> PlatformResult<()> {
        let hwnd = self.checked_hwnd()?;
        log::debug!("Win32: setting title of {hwnd:?} to '{title}'");
        unsafe { SetWindowTextW(hwnd, &HSTRING::from(title))? };
        Ok(())
    }
}

unsafe extern "system" fn sub_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/*
 * Win32 backend for the plugin. `host_view` is the child window the host
 * renders into; its root ancestor is the main window.
 */
#[derive(Debug)]
pub struct Win32Platform {
    host_view: HWND,
    instance: HINSTANCE,
    class_name: HSTRING,
    default_size: (i32, i32),
    class_registered: bool,
}

impl Win32Platform {
    pub fn new(host_view: HWND, config: &PluginConfig) -> PlatformResult<Self> {
        let module = unsafe { GetModuleHandleW(None) }.map_err(|error| {
            PlatformError::InitializationFailed(format!("GetModuleHandleW failed: {error}"))
        })?;
        Ok(Self {
            host_view,
            instance: module.into(),
            class_name: HSTRING::from(config.window_class_name.as_str()),
            default_size: config.default_window_size,
            class_registered: false,
        })
    }

    /*
     * Registers the sub-window class if not already registered, either by this
     * platform instance or by an earlier one in the same process.
     */
    fn register_window_class(&mut self) -> PlatformResult<()> {
        if self.class_registered {
            return Ok(());
        }
        let class_name_pcwstr = PCWSTR(self.class_name.as_ptr());

        unsafe {
            let mut wc_test = WNDCLASSEXW::default();
            if GetClassInfoExW(Some(self.instance), class_name_pcwstr, &mut wc_test).is_ok() {
                log::debug!("Win32: window class '{}' already registered.", self.class_name);
                self.class_registered = true;
                return Ok(());
            }

            let wc = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(sub_window_proc),
                cbClsExtra: 0,
                cbWndExtra: 0,
                hInstance: self.instance,
                hIcon: LoadIconW(None, IDI_APPLICATION)?,
                hCursor: LoadCursorW(None, IDC_ARROW)?,
                hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as *mut c_void),
                lpszMenuName: PCWSTR::null(),
                lpszClassName: class_name_pcwstr,
                hIconSm: LoadIconW(None, IDI_APPLICATION)?,
            };

            if RegisterClassExW(&wc) == 0 {
                let error = GetLastError();
                log::error!("Win32: RegisterClassExW failed: {error:?}");
                return Err(PlatformError::InitializationFailed(format!(
                    "RegisterClassExW failed: {error:?}"
                )));
            }
        }
        log::debug!("Win32: window class '{}' registered successfully.", self.class_name);
        self.class_registered = true;
        Ok(())
    }
}

impl WindowPlatform for Win32Platform {
    type Surface = HwndSurface;

    fn create_window(
        &mut self,
        window_id: WindowId,
        arguments: &str,
    ) -> PlatformResult<HwndSurface> {
        self.register_window_class()?;
        let (width, height) = self.default_size;
        log::trace!("Win32: creating window {window_id} with arguments '{arguments}'");
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                &self.class_name,
                &HSTRING::new(),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                width,
                height,
                None,
                None,
                Some(self.instance),
                None,
            )?
        };
        log::debug!("Win32: created HWND {hwnd:?} for window {window_id}");
        Ok(HwndSurface::new(hwnd))
    }

    fn main_window(&mut self) -> PlatformResult<HwndSurface> {
        let root = unsafe { GetAncestor(self.host_view, GA_ROOT) };
        if root.is_invalid() {
            log::warn!("Win32: host view {:?} has no root window", self.host_view);
            return Err(PlatformError::InvalidHandle(format!(
                "no root window for host view {:?}",
                self.host_view
            )));
        }
        Ok(HwndSurface::new(root))
    }

    fn attached_monitors(&self) -> PlatformResult<Vec<MonitorInfo>> {
        monitor_handler::attached_monitors()
    }

    fn post_quit(&mut self) {
        log::debug!("Win32: posting WM_QUIT");
        unsafe { PostQuitMessage(0) };
    }
}
