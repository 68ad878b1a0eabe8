// ── URL opener ────────────────────────────────────────────────────────────────
//
// Fire-and-forget: the host always sees success.  A dispatch failure is only
// visible in the log, matching what the Vim plugin has always expected.

use crate::platform::native;

/// Open `path` (a URL, document or folder) with the OS default handler.
pub fn open(path: &str) {
    match native::open_with_default_handler(path) {
        Ok(()) => tracing::debug!(path, "dispatched to default handler"),
        Err(e) => tracing::warn!(path, error = %e, "default handler dispatch failed"),
    }
}
