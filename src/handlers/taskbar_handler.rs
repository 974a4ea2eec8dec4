/*
 * Taskbar button management through the shell's `ITaskbarList3` COM object.
 */
use crate::error::{PlatformError, Result as PlatformResult};

use windows::Win32::{
    Foundation::{HWND, RPC_E_CHANGED_MODE},
    System::Com::{CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx},
    UI::Shell::{ITaskbarList3, TaskbarList},
};

#[derive(Debug, Clone)]
pub(crate) struct TaskbarHandle {
    taskbar: ITaskbarList3,
}

impl TaskbarHandle {
    pub(crate) fn create() -> PlatformResult<Self> {
        unsafe {
            // The host usually initialized COM already; a different apartment
            // model is fine for an in-process shell object.
            let hr = CoInitializeEx(None, COINIT_APARTMENTTHREADED);
            if hr.is_err() && hr != RPC_E_CHANGED_MODE {
                log::warn!("Win32: CoInitializeEx returned {hr:?}");
            }
            let taskbar: ITaskbarList3 = CoCreateInstance(&TaskbarList, None, CLSCTX_INPROC_SERVER)
                .map_err(|error| {
                    PlatformError::InitializationFailed(format!(
                        "ITaskbarList3 unavailable: {error}"
                    ))
                })?;
            taskbar.HrInit()?;
            log::debug!("Win32: taskbar list ready");
            Ok(Self { taskbar })
        }
    }

    pub(crate) fn set_tab(&self, hwnd: HWND, visible: bool) -> PlatformResult<()> {
        unsafe {
            if visible {
                self.taskbar.AddTab(hwnd)?;
            } else {
                self.taskbar.DeleteTab(hwnd)?;
            }
        }
        Ok(())
    }
}
