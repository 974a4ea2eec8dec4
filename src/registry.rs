/*
 * Registry of the windows driven through the plugin. The host's main window is
 * attached under `WindowId::MAIN`; sub-windows receive monotonically increasing
 * ids starting at 1, which are never reused after a window is closed.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::surface::{WindowPlatform, WindowSurface};
use crate::types::{FrameRect, WindowId};
use std::collections::BTreeMap;

#[derive(Debug)]
struct WindowEntry<S> {
    surface: S,
    // Opaque payload handed to the window's content when it starts.
    arguments: String,
}

#[derive(Debug)]
pub struct WindowRegistry<S: WindowSurface> {
    windows: BTreeMap<WindowId, WindowEntry<S>>,
    next_window_id: i64,
}

impl<S: WindowSurface> Default for WindowRegistry<S> {
    fn default() -> Self {
        Self {
            windows: BTreeMap::new(),
            next_window_id: 1,
        }
    }
}

impl<S: WindowSurface> WindowRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_main_window(&mut self, surface: S) {
        log::debug!("WindowRegistry: attaching main window");
        self.windows.insert(
            WindowId::MAIN,
            WindowEntry {
                surface,
                arguments: String::new(),
            },
        );
    }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.windows.contains_key(&window_id)
    }

    pub fn arguments(&self, window_id: WindowId) -> PlatformResult<&str> {
        self.windows
            .get(&window_id)
            .map(|entry| entry.arguments.as_str())
            .ok_or(PlatformError::WindowNotFound(window_id))
    }

    fn surface_mut(&mut self, window_id: WindowId) -> PlatformResult<&mut S> {
        self.windows
            .get_mut(&window_id)
            .map(|entry| &mut entry.surface)
            .ok_or_else(|| {
                log::warn!("WindowRegistry: unknown window id {window_id}");
                PlatformError::WindowNotFound(window_id)
            })
    }

    /// Creates a hidden sub-window and returns its id.
    pub fn create<P>(&mut self, platform: &mut P, arguments: &str) -> PlatformResult<WindowId>
    where
        P: WindowPlatform<Surface = S>,
    {
        let window_id = WindowId(self.next_window_id);
        let surface = platform.create_window(window_id, arguments)?;
        self.next_window_id += 1;
        self.windows.insert(
            window_id,
            WindowEntry {
                surface,
                arguments: arguments.to_string(),
            },
        );
        log::debug!("WindowRegistry: created window {window_id}");
        Ok(window_id)
    }

    pub fn show(&mut self, window_id: WindowId) -> PlatformResult<()> {
        self.surface_mut(window_id)?.show()
    }

    pub fn hide(&mut self, window_id: WindowId) -> PlatformResult<()> {
        self.surface_mut(window_id)?.hide()
    }

    /// Closes the window and forgets it.
    pub fn close(&mut self, window_id: WindowId) -> PlatformResult<()> {
        let mut entry = self
            .windows
            .remove(&window_id)
            .ok_or(PlatformError::WindowNotFound(window_id))?;
        log::debug!("WindowRegistry: closing window {window_id}");
        entry.surface.close()
    }

    /*
     * Places the window at a rectangle given in logical pixels, scaled by the
     * nearest monitor's scale factor.
     */
    pub fn set_frame(
        &mut self,
        window_id: WindowId,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> PlatformResult<()> {
        let surface = self.surface_mut(window_id)?;
        let scale = surface.nearest_monitor()?.scale_factor;
        let rect = FrameRect::from_logical(left, top, width, height, scale).ok_or_else(|| {
            PlatformError::InvalidArguments(format!(
                "frame ({left}, {top}, {width}, {height}) is out of range"
            ))
        })?;
        log::debug!("WindowRegistry: set_frame {window_id} -> {rect:?}");
        surface.place(rect)
    }

    /// Centres the window inside the work area of its nearest monitor.
    pub fn center(&mut self, window_id: WindowId) -> PlatformResult<()> {
        let surface = self.surface_mut(window_id)?;
        let work_area = surface.nearest_monitor()?.work_area;
        let centered = surface.frame()?.centered_in(&work_area);
        surface.place(centered)
    }

    pub fn set_title(&mut self, window_id: WindowId, title: &str) -> PlatformResult<()> {
        self.surface_mut(window_id)?.set_title(title)
    }

    /// Ids of all open sub-windows, ascending. The main window is not included.
    pub fn sub_window_ids(&self) -> Vec<WindowId> {
        self.windows
            .keys()
            .copied()
            .filter(|id| !id.is_main())
            .collect()
    }
}
