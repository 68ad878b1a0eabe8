// ── Platform abstraction layer ────────────────────────────────────────────────
//
// The rest of the crate talks to the OS through `native`, which is the Win32
// implementation on Windows and a std-based fallback elsewhere.  No `unsafe`
// lives here; all Win32 FFI is confined to the `win32` sub-module.
//
// Both back ends provide the same items:
//   • `spawn_hidden(&str) -> Result<ChildProcess>` with `id`, `wait`, `detach`
//   • `open_with_default_handler(&str) -> Result<()>`
//   • `last_error_message() -> String`

#[cfg(windows)]
pub mod win32;
#[cfg(windows)]
pub use win32 as native;

#[cfg(unix)]
pub mod portable;
#[cfg(unix)]
pub use portable as native;

/// Strip the trailing whitespace and line break the OS message formatter
/// appends (`FormatMessageW` ends every message with `.\r\n`).
pub fn trim_message(message: &str) -> &str {
    message.trim_end()
}

/// Text for the calling thread's last OS error.
pub fn last_error_message() -> String {
    native::last_error_message()
}
