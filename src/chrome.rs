/*
 * Window chrome bookkeeping: the title-bar style and the frameless flag the host
 * has requested, plus the commands that apply them to a surface. Shared by the
 * screen manager's public setters and by the fullscreen transitions, which
 * temporarily force the normal title bar and later put the saved chrome back.
 */
use crate::error::Result as PlatformResult;
use crate::surface::WindowSurface;
use crate::types::{ChromeMode, Margins, SystemCommand, TitleBarStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowChrome {
    title_bar_style: TitleBarStyle,
    is_frameless: bool,
}

impl WindowChrome {
    pub fn title_bar_style(&self) -> TitleBarStyle {
        self.title_bar_style
    }

    pub fn is_frameless(&self) -> bool {
        self.is_frameless
    }

    fn chrome_mode(&self) -> ChromeMode {
        match (self.is_frameless, self.title_bar_style) {
            (true, _) => ChromeMode::Frameless,
            (false, TitleBarStyle::Hidden) => ChromeMode::HiddenTitleBar,
            (false, TitleBarStyle::Normal) => ChromeMode::Normal,
        }
    }

    /// Applies `style` and leaves frameless mode, so a frameless window can go
    /// back to a normal or hidden title bar.
    pub fn set_title_bar_style<S: WindowSurface>(
        &mut self,
        surface: &mut S,
        style: TitleBarStyle,
    ) -> PlatformResult<()> {
        log::debug!("Chrome: title bar style {:?} -> {style:?}", self.title_bar_style);
        self.title_bar_style = style;
        self.is_frameless = false;
        surface.set_chrome_mode(self.chrome_mode())?;
        surface.extend_frame_into_client_area(Margins::ZERO)?;
        surface.refresh_frame()
    }

    /// Removes all window chrome.
    pub fn set_as_frameless<S: WindowSurface>(&mut self, surface: &mut S) -> PlatformResult<()> {
        log::debug!("Chrome: switching to frameless");
        self.is_frameless = true;
        surface.set_chrome_mode(self.chrome_mode())?;
        surface.refresh_frame()
    }
}

/*
 * Requests a maximize. A vertical maximize simulates a double click on the top
 * resize edge; a regular one is only posted when the window is not already
 * maximized. Both are queued rather than sent, so they take effect once the
 * message loop runs.
 */
pub fn request_maximize<S: WindowSurface>(surface: &mut S, vertically: bool) -> PlatformResult<()> {
    if vertically {
        return surface.post_vertical_maximize();
    }
    if surface.is_maximized()? {
        log::trace!("Chrome: window already maximized, maximize request ignored");
        return Ok(());
    }
    surface.post_system_command(SystemCommand::Maximize)
}
