// ── Default handler ───────────────────────────────────────────────────────────
//
// `open` on macOS, `xdg-open` elsewhere.  The dispatcher is started detached
// and its exit status is never collected here.

use std::process::{Command, Stdio};

use super::{io_message, process::ChildProcess};
use crate::error::{Result, ShellError};

/// Desktop "open this" dispatcher.
#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

/// Hand `target` (URL, document or folder) to the desktop's default handler.
/// Returns once the dispatcher is started; its own outcome is not awaited.
pub fn open_with_default_handler(target: &str) -> Result<()> {
    let child = Command::new(OPENER)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ShellError::Spawn(format!("{OPENER}: {}", io_message(&e))))?;
    ChildProcess::from(child).detach();
    Ok(())
}
