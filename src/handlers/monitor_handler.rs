/*
 * Monitor queries: the monitor nearest a window and the list of all attached
 * monitors, each with its full rectangle, work area and scale factor.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::MonitorInfo;
use crate::window_common::frame_from_rect;

use windows::Win32::{
    Foundation::{HWND, LPARAM, RECT},
    Graphics::Gdi::{
        EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITOR_DEFAULTTONEAREST,
        MONITORINFO, MonitorFromWindow,
    },
    UI::HiDpi::{GetDpiForMonitor, MDT_EFFECTIVE_DPI},
};
use windows::core::BOOL;

const BASE_DPI: f64 = 96.0;

pub(crate) fn describe_monitor(monitor: HMONITOR) -> PlatformResult<MonitorInfo> {
    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        return Err(PlatformError::OperationFailed(format!(
            "GetMonitorInfoW failed for {monitor:?}"
        )));
    }

    let mut dpi_x = 0u32;
    let mut dpi_y = 0u32;
    let scale_factor =
        match unsafe { GetDpiForMonitor(monitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y) } {
            Ok(()) => f64::from(dpi_x) / BASE_DPI,
            Err(error) => {
                log::warn!("Win32: GetDpiForMonitor failed for {monitor:?}: {error}");
                1.0
            }
        };

    Ok(MonitorInfo {
        frame: frame_from_rect(info.rcMonitor),
        work_area: frame_from_rect(info.rcWork),
        scale_factor,
    })
}

pub(crate) fn nearest_monitor(hwnd: HWND) -> PlatformResult<MonitorInfo> {
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
    if monitor.is_invalid() {
        return Err(PlatformError::OperationFailed(format!(
            "MonitorFromWindow returned no monitor for {hwnd:?}"
        )));
    }
    describe_monitor(monitor)
}

unsafe extern "system" fn collect_monitor_proc(
    monitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    data: LPARAM,
) -> BOOL {
    let monitors = unsafe { &mut *(data.0 as *mut Vec<HMONITOR>) };
    monitors.push(monitor);
    BOOL::from(true)
}

pub(crate) fn attached_monitors() -> PlatformResult<Vec<MonitorInfo>> {
    let mut handles: Vec<HMONITOR> = Vec::new();
    let enumerated = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(collect_monitor_proc),
            LPARAM(&mut handles as *mut Vec<HMONITOR> as isize),
        )
    };
    if !enumerated.as_bool() {
        return Err(PlatformError::OperationFailed(
            "EnumDisplayMonitors failed".into(),
        ));
    }
    log::trace!("Win32: enumerated {} monitor(s)", handles.len());
    handles.into_iter().map(describe_monitor).collect()
}
