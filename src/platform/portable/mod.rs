// ── Portable platform implementation ──────────────────────────────────────────
//
// Used on every non-Windows target.  Pure std, no `unsafe`: processes go
// through `std::process::Command`, errors through `std::io::Error`.  There
// is no window manager here; fullscreen reports `Unsupported`.

pub mod process;
pub mod shell;

use std::io;

pub use process::{spawn_hidden, ChildProcess};
pub use shell::open_with_default_handler;

use crate::platform::trim_message;

pub fn last_error_message() -> String {
    io_message(&io::Error::last_os_error())
}

/// The OS text for `error`, without the ` (os error N)` suffix std adds.
pub(crate) fn io_message(error: &io::Error) -> String {
    let mut text = error.to_string();
    if let Some(code) = error.raw_os_error() {
        let suffix = format!(" (os error {code})");
        if text.ends_with(&suffix) {
            text.truncate(text.len() - suffix.len());
        }
    }
    trim_message(&text).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_error_suffix_is_removed() {
        let text = io_message(&io::Error::from_raw_os_error(2));
        assert!(!text.contains("os error"), "{text}");
        assert!(!text.is_empty());
    }

    #[test]
    fn custom_errors_pass_through() {
        let e = io::Error::other("spawn refused\n");
        assert_eq!(io_message(&e), "spawn refused");
    }
}
