// ── Win32 error text ──────────────────────────────────────────────────────────
//
// Turns a Win32 error code into the system message the user would see in
// Explorer, trimmed of the trailing `\r\n`.

#![allow(unsafe_code)]

use windows::{
    core::PWSTR,
    Win32::{
        Foundation::GetLastError,
        System::Diagnostics::Debug::{
            FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
        },
    },
};

use crate::platform::trim_message;

/// Message buffer length in `WCHAR`s.  System messages are a sentence or two.
const MESSAGE_BUF_LEN: usize = 4096;

/// Facility bits of an HRESULT that wraps a plain Win32 error code.
const FACILITY_WIN32_MASK: u32 = 0xFFFF_0000;
const FACILITY_WIN32: u32 = 0x8007_0000;

/// Message for the calling thread's last error.
///
/// Call immediately after the failing function; any later API call may
/// overwrite the thread-local error code.
pub fn last_error_message() -> String {
    // SAFETY: GetLastError reads thread-local state; always safe to call.
    let code = unsafe { GetLastError() };
    message_for(code.0)
}

/// Message for an error returned by a `windows` crate wrapper.
pub(crate) fn os_message(error: &windows::core::Error) -> String {
    // HRESULT.0 is i32; reinterpret the bits to get at the facility.
    let hresult = error.code().0 as u32;
    let code = if hresult & FACILITY_WIN32_MASK == FACILITY_WIN32 {
        hresult & 0xFFFF
    } else {
        hresult
    };
    message_for(code)
}

pub(crate) fn message_for(code: u32) -> String {
    let mut buf = vec![0u16; MESSAGE_BUF_LEN];

    // SAFETY: `buf` is a writable buffer of MESSAGE_BUF_LEN WCHARs that
    // outlives the call; FORMAT_MESSAGE_IGNORE_INSERTS means no argument
    // array is read, so passing None for it is sound.
    let len = unsafe {
        FormatMessageW(
            FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
            None,
            code,
            0,
            PWSTR(buf.as_mut_ptr()),
            MESSAGE_BUF_LEN as u32,
            None,
        )
    };

    if len == 0 {
        return format!("error {code:#010x}");
    }
    let text = String::from_utf16_lossy(&buf[..len as usize]);
    trim_message(&text).to_owned()
}
