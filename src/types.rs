/*
 * Platform-agnostic value types shared by the screen manager, the window
 * registry and the Win32 backend. Style bitmasks mirror the numeric values of
 * the Win32 `WS_*`, `WS_EX_*` and `CS_*` constants so the backend can pass them
 * through unchanged, while the rest of the crate stays portable and testable.
 */
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical identifier of a window managed by the plugin. Id 0 is the host's main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub i64);

impl WindowId {
    pub const MAIN: WindowId = WindowId(0);

    pub fn is_main(self) -> bool {
        self == Self::MAIN
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scales a logical value to device pixels, truncating toward zero. `None` when
/// the input is not finite or the result does not fit in `i32`.
pub fn logical_to_device(value: f64, scale: f64) -> Option<i32> {
    let scaled = (value * scale).trunc();
    if scaled.is_finite() && scaled >= f64::from(i32::MIN) && scaled <= f64::from(i32::MAX) {
        Some(scaled as i32)
    } else {
        None
    }
}

/// Screen-space rectangle in device pixels, with exclusive right/bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FrameRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Like `from_origin_size`, but `None` when an edge does not fit in `i32`.
    pub fn checked_from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        Some(Self::new(x, y, x.checked_add(width)?, y.checked_add(height)?))
    }

    /// Device-pixel rectangle for a logical origin and size scaled by `scale`.
    pub fn from_logical(left: f64, top: f64, width: f64, height: f64, scale: f64) -> Option<Self> {
        Self::checked_from_origin_size(
            logical_to_device(left, scale)?,
            logical_to_device(top, scale)?,
            logical_to_device(width, scale)?,
            logical_to_device(height, scale)?,
        )
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns a rectangle of this size centred inside `area`.
    pub fn centered_in(&self, area: &FrameRect) -> FrameRect {
        let x = area.left + (area.width() - self.width()) / 2;
        let y = area.top + (area.height() - self.height()) / 2;
        FrameRect::from_origin_size(x, y, self.width(), self.height())
    }

    /// Channel representation: `[left, top, width, height]`.
    pub fn to_channel_list(&self) -> [f64; 4] {
        [
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.width()),
            f64::from(self.height()),
        ]
    }
}

bitflags! {
    /// `GWL_STYLE` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u32 {
        const BORDER = 0x0080_0000;
        const DLGFRAME = 0x0040_0000;
        /// `WS_BORDER | WS_DLGFRAME`.
        const CAPTION = 0x00C0_0000;
        const SYSMENU = 0x0008_0000;
        const THICKFRAME = 0x0004_0000;
        const MINIMIZEBOX = 0x0002_0000;
        const MAXIMIZEBOX = 0x0001_0000;
        const OVERLAPPEDWINDOW = 0x00CF_0000;
        const VISIBLE = 0x1000_0000;
    }
}

bitflags! {
    /// `GWL_EXSTYLE` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExtendedStyle: u32 {
        const DLGMODALFRAME = 0x0000_0001;
        const TOPMOST = 0x0000_0008;
        const WINDOWEDGE = 0x0000_0100;
        const CLIENTEDGE = 0x0000_0200;
        const STATICEDGE = 0x0002_0000;
    }
}

bitflags! {
    /// `GCL_STYLE` bits of the window class.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassStyle: u32 {
        const VREDRAW = 0x0001;
        const HREDRAW = 0x0002;
        const NOCLOSE = 0x0200;
    }
}

impl WindowStyle {
    /// Bits removed while a window is fullscreen.
    pub const FULLSCREEN_STRIPPED: WindowStyle = WindowStyle::CAPTION.union(WindowStyle::THICKFRAME);
}

impl ExtendedStyle {
    /// Edge bits removed while a window is fullscreen.
    pub const FULLSCREEN_STRIPPED: ExtendedStyle = ExtendedStyle::DLGMODALFRAME
        .union(ExtendedStyle::WINDOWEDGE)
        .union(ExtendedStyle::CLIENTEDGE)
        .union(ExtendedStyle::STATICEDGE);
}

/// Decorative title-bar mode requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleBarStyle {
    #[default]
    Normal,
    Hidden,
}

/// What the non-client area of a window should look like. Consumed by the
/// backend's non-client size calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChromeMode {
    #[default]
    Normal,
    HiddenTitleBar,
    Frameless,
}

/// DWM frame margins in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Margins {
    pub const ZERO: Margins = Margins {
        left: 0,
        right: 0,
        top: 0,
        bottom: 0,
    };
}

/// `WM_SYSCOMMAND` requests used by the screen manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    Maximize,
    Restore,
}

/// A display as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorInfo {
    /// Full monitor rectangle, including the area covered by the taskbar.
    pub frame: FrameRect,
    /// Work area, excluding taskbars and docked app bars.
    pub work_area: FrameRect,
    /// Effective DPI divided by 96.
    pub scale_factor: f64,
}

/// Channel representation of one attached screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDescriptor {
    pub frame: [f64; 4],
    pub visible_frame: [f64; 4],
    pub scale_factor: f64,
}

impl From<&MonitorInfo> for ScreenDescriptor {
    fn from(monitor: &MonitorInfo) -> Self {
        Self {
            frame: monitor.frame.to_channel_list(),
            visible_frame: monitor.work_area.to_channel_list(),
            scale_factor: monitor.scale_factor,
        }
    }
}

/// Window bounds in logical pixels, as exchanged with the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Settings for the plugin as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfig {
    pub channel_name: String,
    /// Native class name registered for sub-windows.
    pub window_class_name: String,
    pub default_window_title: String,
    /// Initial sub-window size in device pixels.
    pub default_window_size: (i32, i32),
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            channel_name: "mixin.one/flutter_multi_window".to_string(),
            window_class_name: "DeskWindowSubWindowClass".to_string(),
            default_window_title: String::new(),
            default_window_size: (1280, 720),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_rect_width_and_height_are_right_minus_left_and_bottom_minus_top() {
        let rect = FrameRect::new(-100, 20, 700, 620);
        assert_eq!(rect.width(), 800);
        assert_eq!(rect.height(), 600);
        assert_eq!(rect.to_channel_list(), [-100.0, 20.0, 800.0, 600.0]);
    }

    #[test]
    fn centered_in_keeps_size_and_splits_the_slack() {
        let area = FrameRect::new(0, 0, 1920, 1040);
        let window = FrameRect::from_origin_size(5, 5, 800, 600);
        let centered = window.centered_in(&area);
        assert_eq!(centered, FrameRect::new(560, 220, 1360, 820));
    }

    #[test]
    fn logical_to_device_truncates_and_rejects_out_of_range() {
        assert_eq!(logical_to_device(10.9, 1.5), Some(16));
        assert_eq!(logical_to_device(-10.9, 1.0), Some(-10));
        assert_eq!(logical_to_device(f64::NAN, 1.0), None);
        assert_eq!(logical_to_device(f64::INFINITY, 1.0), None);
        assert_eq!(logical_to_device(3e9, 1.0), None);
    }

    #[test]
    fn from_logical_rejects_edges_past_i32() {
        assert_eq!(
            FrameRect::from_logical(10.0, 20.0, 400.0, 300.0, 2.0),
            Some(FrameRect::new(20, 40, 820, 640))
        );
        assert_eq!(FrameRect::from_logical(2e9, 0.0, 2e9, 10.0, 1.0), None);
        assert_eq!(FrameRect::checked_from_origin_size(i32::MAX, 0, 1, 1), None);
    }

    #[test]
    fn raw_style_bits_survive_removing_fullscreen_bits() {
        // WS_CLIPCHILDREN has no named flag but must not be lost.
        let raw = 0x02CF_0000;
        let mut style = WindowStyle::from_bits_retain(raw);
        style.remove(WindowStyle::FULLSCREEN_STRIPPED);
        assert_eq!(style.bits(), 0x020B_0000);
        style.insert(WindowStyle::CAPTION | WindowStyle::THICKFRAME);
        assert_eq!(style.bits(), raw);
    }

    #[test]
    fn caption_is_border_plus_dialog_frame() {
        assert_eq!(WindowStyle::BORDER | WindowStyle::DLGFRAME, WindowStyle::CAPTION);
        assert!(WindowStyle::OVERLAPPEDWINDOW.contains(WindowStyle::THICKFRAME));
    }

    #[test]
    fn without_clears_only_the_requested_bits() {
        let style = WindowStyle::OVERLAPPEDWINDOW | WindowStyle::VISIBLE;
        let stripped = style.difference(WindowStyle::FULLSCREEN_STRIPPED);
        assert!(!stripped.intersects(WindowStyle::CAPTION));
        assert!(!stripped.intersects(WindowStyle::THICKFRAME));
        assert!(stripped.contains(WindowStyle::SYSMENU | WindowStyle::VISIBLE));
    }

    #[test]
    fn screen_descriptor_serializes_with_channel_keys() {
        let monitor = MonitorInfo {
            frame: FrameRect::new(0, 0, 1920, 1080),
            work_area: FrameRect::new(0, 0, 1920, 1040),
            scale_factor: 1.5,
        };
        let value = serde_json::to_value(ScreenDescriptor::from(&monitor)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "frame": [0.0, 0.0, 1920.0, 1080.0],
                "visibleFrame": [0.0, 0.0, 1920.0, 1040.0],
                "scaleFactor": 1.5,
            })
        );
    }

    #[test]
    fn title_bar_style_uses_lowercase_names() {
        let style: TitleBarStyle = serde_json::from_str("\"hidden\"").unwrap();
        assert_eq!(style, TitleBarStyle::Hidden);
        assert_eq!(serde_json::to_string(&TitleBarStyle::Normal).unwrap(), "\"normal\"");
    }
}
