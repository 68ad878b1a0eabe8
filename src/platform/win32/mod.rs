// ── Win32 platform implementation ─────────────────────────────────────────────
//
// The only place besides `ffi` where `unsafe` code is permitted.  Every
// `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub mod error; // FormatMessageW-based error text
pub mod process; // CreateProcessW, wait, exit code, handle ownership
pub mod shell; // ShellExecuteW
pub mod window; // WindowBackend over user32

pub use error::last_error_message;
pub use process::{spawn_hidden, ChildProcess};
pub use shell::open_with_default_handler;

/// Null-terminated UTF-16 copy of `s` for W-suffixed APIs.
pub(crate) fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
