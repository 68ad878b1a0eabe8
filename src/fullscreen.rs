// ── Fullscreen controller ─────────────────────────────────────────────────────
//
// Two states per window, Windowed and Fullscreen.  Entering fullscreen strips
// the caption and sizing border and stretches the window over its monitor;
// leaving puts back exactly what was there before.
//
// The pre-fullscreen styles and rectangle are captured at enable time and
// kept per window id, so disable restores them verbatim rather than guessing.
// A window that was never enabled through us falls back to re-adding the
// decoration bits and refreshing the frame in place.
//
// All OS access goes through `WindowBackend`; the Win32 implementation lives
// in `platform::win32::window`.  No `unsafe` here.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::Deserialize;

use crate::{
    error::{Result, ShellError},
    options::FullscreenOptions,
};

// ── Style bits ────────────────────────────────────────────────────────────────
//
// Values of WS_CAPTION, WS_THICKFRAME and WS_EX_TOPMOST from winuser.h.  Kept
// as plain integers so the state machine builds and tests on every platform.

pub const WS_CAPTION: u32 = 0x00C0_0000;
pub const WS_THICKFRAME: u32 = 0x0004_0000;
pub const WS_EX_TOPMOST: u32 = 0x0000_0008;

const DECORATIONS: u32 = WS_CAPTION | WS_THICKFRAME;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Opaque window identifier.  On Windows this is the `HWND` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "isize")]
pub struct WindowId(pub isize);

/// 0 is the null window, never a valid target.
impl TryFrom<isize> for WindowId {
    type Error = ShellError;

    fn try_from(raw: isize) -> Result<Self> {
        if raw == 0 {
            Err(ShellError::InvalidArgument("bad window id 0".into()))
        } else {
            Ok(Self(raw))
        }
    }
}

/// Screen rectangle in device pixels, edges exclusive on the right/bottom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStyles {
    pub style: u32,
    pub ex_style: u32,
}

/// Where the window goes in the z-order when it is repositioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    Top,
    Topmost,
    NotTopmost,
}

/// One repositioning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Cover `rect` and show the window.
    Fill { rect: Rect, z: ZOrder },
    /// Move back to `rect`, recomputing the non-client frame.
    Restore { rect: Rect, z: ZOrder },
    /// Keep position and size, only recompute the frame.
    RefreshFrame { z: ZOrder },
}

/// The window-manager calls the controller needs.
///
/// Each method fails with exactly one `ShellError` variant so the host can
/// tell which step went wrong:
///
/// | method | error |
/// |---|---|
/// | `styles` | `StyleQuery` / `ExStyleQuery` |
/// | `set_styles` | `StyleApply` / `ExStyleApply` |
/// | `window_rect` | `WindowRect` |
/// | `monitor_rect` | `NoMonitor` / `MonitorInfo` |
/// | `set_position` | `Resize` for `Fill`, `Restore` otherwise |
pub trait WindowBackend {
    fn foreground_window(&self) -> Option<WindowId>;
    fn styles(&self, window: WindowId) -> Result<WindowStyles>;
    fn set_styles(&self, window: WindowId, styles: WindowStyles) -> Result<()>;
    fn window_rect(&self, window: WindowId) -> Result<Rect>;
    /// Rectangle of the monitor nearest to `window`.
    fn monitor_rect(&self, window: WindowId) -> Result<Rect>;
    fn set_position(&self, window: WindowId, placement: Placement) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
struct SavedWindow {
    styles: WindowStyles,
    rect: Rect,
}

// ── Controller ────────────────────────────────────────────────────────────────

pub struct FullscreenController<B> {
    backend: B,
    saved: Mutex<HashMap<WindowId, SavedWindow>>,
}

impl<B: WindowBackend> FullscreenController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            saved: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    fn backend(&self) -> &B {
        &self.backend
    }

    /// `explicit` if given, otherwise whatever window has focus right now.
    pub fn resolve_target(&self, explicit: Option<WindowId>) -> Result<WindowId> {
        explicit
            .or_else(|| self.backend.foreground_window())
            .ok_or(ShellError::NoForegroundWindow)
    }

    /// True while `window` has pre-fullscreen state stored.
    #[cfg(test)]
    fn is_fullscreen(&self, window: WindowId) -> bool {
        self.saved().contains_key(&window)
    }

    /// Perform one transition and return the window it acted on.
    pub fn apply(&self, options: FullscreenOptions) -> Result<WindowId> {
        let window = self.resolve_target(options.window)?;
        let current = self.backend.styles(window)?;

        if options.enable {
            self.enter(window, current, options.always_on_top)?;
        } else {
            self.leave(window, current, options.always_on_top)?;
        }
        Ok(window)
    }

    // The saved-state lock is never held across a backend call: the window
    // procedure runs synchronously inside SetWindowLongW/SetWindowPos and may
    // call back into the library on this same thread.

    fn enter(&self, window: WindowId, current: WindowStyles, always_on_top: bool) -> Result<()> {
        // A second enable must not overwrite the windowed state with the
        // already-stripped one.
        let known = self.saved().contains_key(&window);
        if !known {
            let rect = self.backend.window_rect(window)?;
            self.saved().entry(window).or_insert(SavedWindow {
                styles: current,
                rect,
            });
        }

        let mut next = WindowStyles {
            style: current.style & !DECORATIONS,
            ex_style: current.ex_style,
        };
        if always_on_top {
            next.ex_style |= WS_EX_TOPMOST;
        }
        self.backend.set_styles(window, next)?;

        let monitor = self.backend.monitor_rect(window)?;
        let z = if always_on_top { ZOrder::Topmost } else { ZOrder::Top };
        self.backend
            .set_position(window, Placement::Fill { rect: monitor, z })?;

        tracing::debug!(
            window = window.0,
            style = next.style,
            width = monitor.width(),
            height = monitor.height(),
            "entered fullscreen"
        );
        Ok(())
    }

    fn leave(&self, window: WindowId, current: WindowStyles, always_on_top: bool) -> Result<()> {
        let saved = self.saved().get(&window).copied();

        match saved {
            Some(before) => {
                self.backend.set_styles(window, before.styles)?;
                let z = if before.styles.ex_style & WS_EX_TOPMOST != 0 {
                    ZOrder::Topmost
                } else {
                    ZOrder::NotTopmost
                };
                self.backend.set_position(
                    window,
                    Placement::Restore {
                        rect: before.rect,
                        z,
                    },
                )?;
                self.saved().remove(&window);
                tracing::debug!(window = window.0, "restored windowed state");
            }
            None => {
                let mut next = WindowStyles {
                    style: current.style | DECORATIONS,
                    ex_style: current.ex_style,
                };
                if always_on_top {
                    next.ex_style &= !WS_EX_TOPMOST;
                }
                self.backend.set_styles(window, next)?;
                self.backend.set_position(
                    window,
                    Placement::RefreshFrame {
                        z: ZOrder::NotTopmost,
                    },
                )?;
                tracing::debug!(
                    window = window.0,
                    "no saved state; decorations re-added in place"
                );
            }
        }
        Ok(())
    }

    fn saved(&self) -> MutexGuard<'_, HashMap<WindowId, SavedWindow>> {
        self.saved.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Process-wide controller ───────────────────────────────────────────────────

#[cfg(windows)]
fn controller() -> &'static FullscreenController<crate::platform::win32::window::NativeWindows> {
    use std::sync::OnceLock;

    use crate::platform::win32::window::NativeWindows;

    static CONTROLLER: OnceLock<FullscreenController<NativeWindows>> = OnceLock::new();
    CONTROLLER.get_or_init(|| FullscreenController::new(NativeWindows))
}

/// Toggle fullscreen on the target described by `options`.
#[cfg(windows)]
pub fn toggle(options: FullscreenOptions) -> Result<WindowId> {
    controller().apply(options)
}

#[cfg(not(windows))]
pub fn toggle(_options: FullscreenOptions) -> Result<WindowId> {
    Err(ShellError::Unsupported("fullscreen"))
}

/// Resolve the current foreground window once, so the host can pass it back
/// explicitly to both halves of an enable/disable pair.
#[cfg(windows)]
pub fn foreground_window() -> Result<WindowId> {
    controller().resolve_target(None)
}

#[cfg(not(windows))]
pub fn foreground_window() -> Result<WindowId> {
    Err(ShellError::Unsupported("foreground_window"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
