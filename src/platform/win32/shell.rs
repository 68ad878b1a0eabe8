// ── Default handler ───────────────────────────────────────────────────────────
//
// ShellExecuteW with the "open" verb: the shell picks the browser, viewer or
// explorer window registered for the target.  Nothing waits for it.

#![allow(unsafe_code)]

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::HWND,
        UI::{Shell::ShellExecuteW, WindowsAndMessaging::SW_SHOWNORMAL},
    },
};

use super::{error::last_error_message, wide};
use crate::error::{Result, ShellError};

/// ShellExecute reports success with any value greater than 32.
const SHELL_EXECUTE_MIN_OK: isize = 32;

/// Hand `target` (URL, document or folder) to its registered "open" verb.
pub fn open_with_default_handler(target: &str) -> Result<()> {
    let file = wide(target);

    // SAFETY: `file` is a valid null-terminated UTF-16 string that outlives
    // the call; null owner window, parameters and directory are permitted.
    let instance = unsafe {
        ShellExecuteW(
            HWND::default(),
            w!("open"),
            PCWSTR(file.as_ptr()),
            PCWSTR::null(),
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };

    if instance.0 as isize > SHELL_EXECUTE_MIN_OK {
        Ok(())
    } else {
        Err(ShellError::Spawn(last_error_message()))
    }
}
