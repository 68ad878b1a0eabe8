// ── Window geometry ───────────────────────────────────────────────────────────
//
// `WindowBackend` over user32:
//   • foreground window lookup;
//   • GWL_STYLE / GWL_EXSTYLE read and write;
//   • window and nearest-monitor rectangles;
//   • SetWindowPos for fill / restore / frame refresh.
//
// Each call maps to exactly one `ShellError` variant so the controller's
// error text says which step failed.

#![allow(unsafe_code)]

use std::ffi::c_void;

use windows::Win32::{
    Foundation::{GetLastError, SetLastError, HWND, RECT, WIN32_ERROR},
    Graphics::Gdi::{GetMonitorInfoW, MonitorFromWindow, MONITORINFO, MONITOR_DEFAULTTONEAREST},
    UI::WindowsAndMessaging::{
        GetForegroundWindow, GetWindowLongW, GetWindowRect, SetWindowLongW, SetWindowPos,
        GWL_EXSTYLE, GWL_STYLE, HWND_NOTOPMOST, HWND_TOP, HWND_TOPMOST, SET_WINDOW_POS_FLAGS,
        SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_SHOWWINDOW,
        WINDOW_LONG_PTR_INDEX,
    },
};

use crate::{
    error::{Result, ShellError},
    fullscreen::{Placement, Rect, WindowBackend, WindowId, WindowStyles, ZOrder},
};

/// The real window manager.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeWindows;

fn hwnd(window: WindowId) -> HWND {
    HWND(window.0 as *mut c_void)
}

impl From<RECT> for Rect {
    fn from(r: RECT) -> Self {
        Self {
            left: r.left,
            top: r.top,
            right: r.right,
            bottom: r.bottom,
        }
    }
}

impl From<ZOrder> for HWND {
    fn from(z: ZOrder) -> Self {
        match z {
            ZOrder::Top => HWND_TOP,
            ZOrder::Topmost => HWND_TOPMOST,
            ZOrder::NotTopmost => HWND_NOTOPMOST,
        }
    }
}

// ── Style words ───────────────────────────────────────────────────────────────
//
// Get/SetWindowLongW return 0 both on failure and when the value really is 0
// (an ex-style of 0 is common).  Clearing the last error first and checking
// it afterwards is the documented way to tell the two apart.

fn read_long(window: HWND, index: WINDOW_LONG_PTR_INDEX) -> Option<u32> {
    // SAFETY: SetLastError/GetLastError only touch thread-local state;
    // GetWindowLongW validates `window` and fails cleanly on a stale handle.
    unsafe {
        SetLastError(WIN32_ERROR(0));
        let value = GetWindowLongW(window, index);
        if value == 0 && GetLastError().0 != 0 {
            None
        } else {
            // Style words are bit masks; reinterpret the i32 bits.
            Some(value as u32)
        }
    }
}

fn write_long(window: HWND, index: WINDOW_LONG_PTR_INDEX, value: u32) -> Option<()> {
    // SAFETY: as for read_long; SetWindowLongW validates `window`.
    unsafe {
        SetLastError(WIN32_ERROR(0));
        let previous = SetWindowLongW(window, index, value as i32);
        if previous == 0 && GetLastError().0 != 0 {
            None
        } else {
            Some(())
        }
    }
}

// ── Backend ───────────────────────────────────────────────────────────────────

impl WindowBackend for NativeWindows {
    fn foreground_window(&self) -> Option<WindowId> {
        // SAFETY: GetForegroundWindow takes no parameters; null means none.
        let window = unsafe { GetForegroundWindow() };
        if window.0.is_null() {
            None
        } else {
            Some(WindowId(window.0 as isize))
        }
    }

    fn styles(&self, window: WindowId) -> Result<WindowStyles> {
        let h = hwnd(window);
        Ok(WindowStyles {
            style: read_long(h, GWL_STYLE).ok_or(ShellError::StyleQuery)?,
            ex_style: read_long(h, GWL_EXSTYLE).ok_or(ShellError::ExStyleQuery)?,
        })
    }

    fn set_styles(&self, window: WindowId, styles: WindowStyles) -> Result<()> {
        let h = hwnd(window);
        write_long(h, GWL_STYLE, styles.style).ok_or(ShellError::StyleApply)?;
        write_long(h, GWL_EXSTYLE, styles.ex_style).ok_or(ShellError::ExStyleApply)?;
        Ok(())
    }

    fn window_rect(&self, window: WindowId) -> Result<Rect> {
        let mut rect = RECT::default();
        // SAFETY: `rect` is a valid out-pointer; GetWindowRect validates the
        // handle.
        unsafe { GetWindowRect(hwnd(window), &mut rect) }.map_err(|_| ShellError::WindowRect)?;
        Ok(rect.into())
    }

    fn monitor_rect(&self, window: WindowId) -> Result<Rect> {
        // SAFETY: MonitorFromWindow accepts any HWND value and returns null
        // only when no monitor qualifies (not with DEFAULTTONEAREST in
        // practice, but checked anyway).
        let monitor = unsafe { MonitorFromWindow(hwnd(window), MONITOR_DEFAULTTONEAREST) };
        if monitor.is_invalid() {
            return Err(ShellError::NoMonitor);
        }

        let mut info = MONITORINFO {
            // MONITORINFO is 40 bytes; the cast is lossless.
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        // SAFETY: `monitor` was just returned non-null; `info` has cbSize set
        // as GetMonitorInfoW requires.
        if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
            return Err(ShellError::MonitorInfo);
        }
        Ok(info.rcMonitor.into())
    }

    fn set_position(&self, window: WindowId, placement: Placement) -> Result<()> {
        let (z, rect, flags, error): (ZOrder, Rect, SET_WINDOW_POS_FLAGS, ShellError) =
            match placement {
                Placement::Fill { rect, z } => (z, rect, SWP_SHOWWINDOW, ShellError::Resize),
                Placement::Restore { rect, z } => (
                    z,
                    rect,
                    SWP_FRAMECHANGED | SWP_NOACTIVATE,
                    ShellError::Restore,
                ),
                Placement::RefreshFrame { z } => (
                    z,
                    Rect::default(),
                    SWP_NOMOVE | SWP_NOSIZE | SWP_FRAMECHANGED,
                    ShellError::Restore,
                ),
            };

        // SAFETY: all arguments are plain values; SetWindowPos validates the
        // window handle and the insert-after sentinel.
        unsafe {
            SetWindowPos(
                hwnd(window),
                HWND::from(z),
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                flags,
            )
        }
        .map_err(|_| error)
    }
}

#[cfg(test)]
mod tests {
    use windows::Win32::UI::WindowsAndMessaging::{WS_CAPTION, WS_EX_TOPMOST, WS_THICKFRAME};

    use super::*;
    use crate::fullscreen;

    #[test]
    fn style_bits_match_winuser() {
        assert_eq!(fullscreen::WS_CAPTION, WS_CAPTION.0);
        assert_eq!(fullscreen::WS_THICKFRAME, WS_THICKFRAME.0);
        assert_eq!(fullscreen::WS_EX_TOPMOST, WS_EX_TOPMOST.0);
    }

    #[test]
    fn rect_conversion() {
        let r: Rect = RECT {
            left: -1920,
            top: 0,
            right: 0,
            bottom: 1080,
        }
        .into();
        assert_eq!(r.width(), 1920);
        assert_eq!(r.height(), 1080);
    }

    #[test]
    fn stale_handle_fails_style_query() {
        let err = NativeWindows
            .styles(WindowId(0x7FFF_FFF0))
            .expect_err("no such window");
        assert!(matches!(err, ShellError::StyleQuery));
    }
}
