/*
 * Window-procedure subclass that shapes the non-client area for the hidden
 * title bar and frameless chrome modes.
 *
 * The subclass is installed the first time a window leaves `ChromeMode::Normal`
 * and stays installed until `WM_NCDESTROY`; switching back to normal only
 * updates the recorded mode. The previous window procedure and the current
 * mode live in a thread-local table keyed by HWND, since windows are only ever
 * touched from the thread that owns them.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::ChromeMode;

use std::cell::RefCell;
use std::collections::HashMap;
use windows::Win32::{
    Foundation::{GetLastError, HWND, LPARAM, LRESULT, WPARAM},
    UI::WindowsAndMessaging::{
        CallWindowProcW, DefWindowProcW, GWLP_WNDPROC, GetSystemMetrics, GetWindowLongPtrW,
        IsZoomed, NCCALCSIZE_PARAMS, SM_CXPADDEDBORDER, SM_CYFRAME, SetWindowLongPtrW,
        WM_NCCALCSIZE, WM_NCDESTROY, WNDPROC,
    },
};

#[derive(Debug, Clone, Copy)]
struct ChromeSubclass {
    previous_proc: isize,
    mode: ChromeMode,
}

thread_local! {
    static CHROME_SUBCLASSES: RefCell<HashMap<isize, ChromeSubclass>> =
        RefCell::new(HashMap::new());
}

fn hwnd_key(hwnd: HWND) -> isize {
    hwnd.0 as isize
}

fn lookup(hwnd: HWND) -> Option<ChromeSubclass> {
    CHROME_SUBCLASSES.with(|table| table.borrow().get(&hwnd_key(hwnd)).copied())
}

/// Records `mode` for `hwnd`, installing the subclass when needed.
pub(crate) fn set_chrome_mode(hwnd: HWND, mode: ChromeMode) -> PlatformResult<()> {
    let updated = CHROME_SUBCLASSES.with(|table| {
        table
            .borrow_mut()
            .get_mut(&hwnd_key(hwnd))
            .map(|entry| entry.mode = mode)
            .is_some()
    });
    if updated || mode == ChromeMode::Normal {
        return Ok(());
    }

    unsafe {
        let previous_proc = GetWindowLongPtrW(hwnd, GWLP_WNDPROC);
        if previous_proc == 0 {
            let error = GetLastError();
            log::error!("Win32: GetWindowLongPtrW(GWLP_WNDPROC) failed for {hwnd:?}: {error:?}");
            return Err(PlatformError::InvalidHandle(format!(
                "no window procedure for {hwnd:?}: {error:?}"
            )));
        }
        // Register before swapping so the first subclassed message finds its entry.
        CHROME_SUBCLASSES.with(|table| {
            table.borrow_mut().insert(
                hwnd_key(hwnd),
                ChromeSubclass {
                    previous_proc,
                    mode,
                },
            );
        });
        #[allow(clippy::fn_to_numeric_cast)]
        let _replaced = SetWindowLongPtrW(hwnd, GWLP_WNDPROC, chrome_subclass_proc as isize);
    }
    log::debug!("Win32: chrome subclass installed on {hwnd:?} ({mode:?})");
    Ok(())
}

// Extra top inset a maximized window needs so its client area does not spill
// past the monitor edge once the caption is removed.
fn maximized_top_inset() -> i32 {
    unsafe { GetSystemMetrics(SM_CYFRAME) + GetSystemMetrics(SM_CXPADDEDBORDER) }
}

unsafe extern "system" fn chrome_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        let Some(entry) = lookup(hwnd) else {
            return DefWindowProcW(hwnd, msg, wparam, lparam);
        };
        let previous: WNDPROC = std::mem::transmute(entry.previous_proc);

        if msg == WM_NCCALCSIZE && wparam.0 != 0 {
            match entry.mode {
                ChromeMode::Frameless => return LRESULT(0),
                ChromeMode::HiddenTitleBar => {
                    let params = lparam.0 as *mut NCCALCSIZE_PARAMS;
                    let original_top = (*params).rgrc[0].top;
                    let result = CallWindowProcW(previous, hwnd, msg, wparam, lparam);
                    let inset = if IsZoomed(hwnd).as_bool() {
                        maximized_top_inset()
                    } else {
                        0
                    };
                    (*params).rgrc[0].top = original_top + inset;
                    return result;
                }
                ChromeMode::Normal => {}
            }
        }

        if msg == WM_NCDESTROY {
            CHROME_SUBCLASSES.with(|table| {
                table.borrow_mut().remove(&hwnd_key(hwnd));
            });
            SetWindowLongPtrW(hwnd, GWLP_WNDPROC, entry.previous_proc);
        }

        CallWindowProcW(previous, hwnd, msg, wparam, lparam)
    }
}
