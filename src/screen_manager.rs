/*
 * Per-window screen manager. Owns the window surface together with the state
 * the operating system does not keep for us (title-bar style, frameless flag,
 * resizable and skip-taskbar flags, fullscreen restore snapshot) and exposes
 * the property getters and setters the host calls over the method channel.
 *
 * Geometry exchanged with the host is in logical pixels; the host supplies the
 * device-pixel ratio with each call. Everything stored internally is in device
 * pixels.
 */
use crate::chrome::{WindowChrome, request_maximize};
use crate::error::{PlatformError, Result as PlatformResult};
use crate::fullscreen::{FullscreenController, FullscreenState};
use crate::surface::WindowSurface;
use crate::types::{
    Bounds, ClassStyle, ExtendedStyle, FrameRect, TitleBarStyle, WindowStyle, logical_to_device,
};

#[derive(Debug)]
pub struct ScreenManager<S: WindowSurface> {
    surface: S,
    chrome: WindowChrome,
    fullscreen: FullscreenController,
    is_resizable: bool,
    is_skip_taskbar: bool,
}

fn check_device_pixel_ratio(device_pixel_ratio: f64) -> PlatformResult<f64> {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        Ok(device_pixel_ratio)
    } else {
        Err(PlatformError::InvalidArguments(format!(
            "devicePixelRatio must be positive, got {device_pixel_ratio}"
        )))
    }
}

// Scales a logical pair to device pixels. `None` unless both halves are given.
fn to_device_pair(
    a: Option<f64>,
    b: Option<f64>,
    ratio: f64,
    what: &str,
) -> PlatformResult<Option<(i32, i32)>> {
    let (Some(a), Some(b)) = (a, b) else {
        return Ok(None);
    };
    match (logical_to_device(a, ratio), logical_to_device(b, ratio)) {
        (Some(a), Some(b)) => Ok(Some((a, b))),
        _ => Err(PlatformError::InvalidArguments(format!(
            "{what} ({a}, {b}) is out of range"
        ))),
    }
}

impl<S: WindowSurface> ScreenManager<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            chrome: WindowChrome::default(),
            fullscreen: FullscreenController::default(),
            is_resizable: true,
            is_skip_taskbar: true,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn ensure_valid(&self) -> PlatformResult<()> {
        if self.surface.is_valid() {
            Ok(())
        } else {
            log::warn!("ScreenManager: window handle is no longer valid");
            Err(PlatformError::InvalidHandle(
                "screen manager window no longer exists".into(),
            ))
        }
    }

    pub fn title_bar_style(&self) -> TitleBarStyle {
        self.chrome.title_bar_style()
    }

    pub fn is_frameless(&self) -> bool {
        self.chrome.is_frameless()
    }

    pub fn set_as_frameless(&mut self) -> PlatformResult<()> {
        self.ensure_valid()?;
        self.chrome.set_as_frameless(&mut self.surface)
    }

    pub fn set_title_bar_style(&mut self, style: TitleBarStyle) -> PlatformResult<()> {
        self.ensure_valid()?;
        self.chrome.set_title_bar_style(&mut self.surface, style)
    }

    /// Prepares the taskbar integration before the window is first shown.
    pub fn wait_until_ready_to_show(&mut self) -> PlatformResult<()> {
        self.ensure_valid()?;
        self.surface.prepare_taskbar()
    }

    pub fn is_maximized(&self) -> PlatformResult<bool> {
        self.ensure_valid()?;
        self.surface.is_maximized()
    }

    pub fn maximize(&mut self, vertically: bool) -> PlatformResult<()> {
        self.ensure_valid()?;
        log::debug!("ScreenManager: maximize (vertically={vertically})");
        request_maximize(&mut self.surface, vertically)
    }

    pub fn is_full_screen(&self) -> bool {
        self.fullscreen.is_full_screen()
    }

    pub fn fullscreen_state(&self) -> &FullscreenState {
        self.fullscreen.state()
    }

    pub fn set_full_screen(&mut self, is_full_screen: bool) -> PlatformResult<()> {
        self.ensure_valid()?;
        log::debug!("ScreenManager: set_full_screen({is_full_screen})");
        self.fullscreen
            .set_full_screen(&mut self.surface, &mut self.chrome, is_full_screen)
    }

    pub fn get_bounds(&self, device_pixel_ratio: f64) -> PlatformResult<Bounds> {
        self.ensure_valid()?;
        let ratio = check_device_pixel_ratio(device_pixel_ratio)?;
        let rect = self.surface.frame()?;
        Ok(Bounds {
            x: f64::from(rect.left) / ratio,
            y: f64::from(rect.top) / ratio,
            width: f64::from(rect.width()) / ratio,
            height: f64::from(rect.height()) / ratio,
        })
    }

    /*
     * Moves and/or resizes the window. The origin is applied only when both
     * `x` and `y` are present, the size only when both `width` and `height`
     * are present.
     */
    pub fn set_bounds(
        &mut self,
        device_pixel_ratio: f64,
        x: Option<f64>,
        y: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
    ) -> PlatformResult<()> {
        self.ensure_valid()?;
        let ratio = check_device_pixel_ratio(device_pixel_ratio)?;
        let origin = to_device_pair(x, y, ratio, "origin")?;
        let size = to_device_pair(width, height, ratio, "size")?;
        if let (Some((x, y)), Some((width, height))) = (origin, size)
            && FrameRect::checked_from_origin_size(x, y, width, height).is_none()
        {
            return Err(PlatformError::InvalidArguments(format!(
                "bounds ({x}, {y}, {width}, {height}) exceed the coordinate range"
            )));
        }
        log::debug!("ScreenManager: set_bounds origin={origin:?} size={size:?}");
        self.surface.reposition(origin, size)
    }

    pub fn is_resizable(&self) -> bool {
        self.is_resizable
    }

    pub fn set_resizable(&mut self, is_resizable: bool) -> PlatformResult<()> {
        self.ensure_valid()?;
        self.is_resizable = is_resizable;
        let mut style = self.surface.style()?;
        style.set(WindowStyle::THICKFRAME, is_resizable);
        self.surface.set_style(style)
    }

    pub fn is_always_on_top(&self) -> PlatformResult<bool> {
        self.ensure_valid()?;
        Ok(self
            .surface
            .extended_style()?
            .contains(ExtendedStyle::TOPMOST))
    }

    pub fn set_always_on_top(&mut self, is_always_on_top: bool) -> PlatformResult<()> {
        self.ensure_valid()?;
        self.surface.set_topmost(is_always_on_top)
    }

    pub fn is_skip_taskbar(&self) -> bool {
        self.is_skip_taskbar
    }

    pub fn set_skip_taskbar(&mut self, is_skip_taskbar: bool) -> PlatformResult<()> {
        self.ensure_valid()?;
        self.is_skip_taskbar = is_skip_taskbar;
        self.surface.set_taskbar_tab(!is_skip_taskbar)
    }

    pub fn is_closable(&self) -> PlatformResult<bool> {
        self.ensure_valid()?;
        Ok(!self.surface.class_style()?.contains(ClassStyle::NOCLOSE))
    }

    pub fn set_closable(&mut self, is_closable: bool) -> PlatformResult<()> {
        self.ensure_valid()?;
        let mut style = self.surface.class_style()?;
        style.set(ClassStyle::NOCLOSE, !is_closable);
        self.surface.set_class_style(style)
    }
}
