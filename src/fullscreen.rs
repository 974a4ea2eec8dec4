/*
 * Fullscreen transitions for a single window.
 *
 * The controller is an explicit two-state machine. Entering fullscreen captures
 * a `WindowRestoreState` exactly once, strips the window chrome and stretches
 * the window over the full rectangle of its nearest monitor. Leaving fullscreen
 * puts the captured styles, chrome and placement back. Requests that do not
 * change the logical state (entering while fullscreen, leaving while windowed)
 * are no-ops, so the snapshot always describes the window as it was right
 * before the first entry.
 *
 * Entry commits the `Fullscreen` state as soon as the snapshot is taken. If a
 * later step fails the error is returned, but the snapshot is kept so a
 * following exit can still restore the window. Exit only returns to `Windowed`
 * once every restore step has succeeded; a failed exit can be retried.
 */
use crate::chrome::{WindowChrome, request_maximize};
use crate::error::Result as PlatformResult;
use crate::surface::WindowSurface;
use crate::types::{ExtendedStyle, FrameRect, SystemCommand, TitleBarStyle, WindowStyle};

/// Everything needed to return a window to its pre-fullscreen configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRestoreState {
    pub was_maximized: bool,
    pub window_style: WindowStyle,
    pub extended_style: ExtendedStyle,
    /// Restored (non-maximized) window rectangle in device pixels.
    pub frame_rect: FrameRect,
    pub title_bar_style: TitleBarStyle,
    pub was_frameless: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenState {
    #[default]
    Windowed,
    Fullscreen(WindowRestoreState),
}

impl FullscreenState {
    pub fn is_full_screen(&self) -> bool {
        matches!(self, FullscreenState::Fullscreen(_))
    }

    pub fn restore_state(&self) -> Option<&WindowRestoreState> {
        match self {
            FullscreenState::Fullscreen(saved) => Some(saved),
            FullscreenState::Windowed => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct FullscreenController {
    state: FullscreenState,
}

impl FullscreenController {
    pub fn state(&self) -> &FullscreenState {
        &self.state
    }

    pub fn is_full_screen(&self) -> bool {
        self.state.is_full_screen()
    }

    pub fn set_full_screen<S: WindowSurface>(
        &mut self,
        surface: &mut S,
        chrome: &mut WindowChrome,
        is_full_screen: bool,
    ) -> PlatformResult<()> {
        match (self.state, is_full_screen) {
            (FullscreenState::Windowed, true) => self.enter(surface, chrome),
            (FullscreenState::Fullscreen(saved), false) => {
                Self::exit(surface, chrome, &saved)?;
                self.state = FullscreenState::Windowed;
                log::debug!("Fullscreen: back to windowed at {:?}", saved.frame_rect);
                Ok(())
            }
            (_, requested) => {
                log::warn!("Fullscreen: already in requested state (fullscreen={requested})");
                Ok(())
            }
        }
    }

    fn enter<S: WindowSurface>(
        &mut self,
        surface: &mut S,
        chrome: &mut WindowChrome,
    ) -> PlatformResult<()> {
        let was_maximized = surface.is_maximized()?;
        let window_style = surface.style()?;
        let extended_style = surface.extended_style()?;
        // Un-maximize first so the captured rectangle is the restored one and
        // the style edits below apply to a normal window.
        if was_maximized {
            surface.send_system_command(SystemCommand::Restore)?;
        }
        let saved = WindowRestoreState {
            was_maximized,
            window_style,
            extended_style,
            frame_rect: surface.frame()?,
            title_bar_style: chrome.title_bar_style(),
            was_frameless: chrome.is_frameless(),
        };
        self.state = FullscreenState::Fullscreen(saved);
        log::debug!("Fullscreen: captured {saved:?}");

        chrome.set_title_bar_style(surface, TitleBarStyle::Normal)?;
        surface.set_style(window_style.difference(WindowStyle::FULLSCREEN_STRIPPED))?;
        surface
            .set_extended_style(extended_style.difference(ExtendedStyle::FULLSCREEN_STRIPPED))?;

        let monitor = surface.nearest_monitor()?;
        surface.place(monitor.frame)?;
        surface.send_system_command(SystemCommand::Maximize)?;
        log::debug!("Fullscreen: covering monitor {:?}", monitor.frame);
        Ok(())
    }

    fn exit<S: WindowSurface>(
        surface: &mut S,
        chrome: &mut WindowChrome,
        saved: &WindowRestoreState,
    ) -> PlatformResult<()> {
        surface.set_style(saved.window_style)?;
        surface.set_extended_style(saved.extended_style)?;
        surface.send_system_command(SystemCommand::Restore)?;

        if chrome.title_bar_style() != saved.title_bar_style {
            chrome.set_title_bar_style(surface, saved.title_bar_style)?;
        }
        if saved.was_frameless {
            chrome.set_as_frameless(surface)?;
        }

        if saved.was_maximized {
            request_maximize(surface, false)
        } else {
            surface.place(saved.frame_rect)
        }
    }
}
