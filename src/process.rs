// ── Command executor ──────────────────────────────────────────────────────────
//
// Runs one external command without a visible window.  Blocking mode waits
// for the child with no timeout, so the host's thread is stalled for the
// child's whole lifetime.  Detached mode returns as soon as the process
// exists.

use crate::{
    error::{Result, ShellError},
    platform::native,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Wait for exit and report the exit code.
    Block,
    /// Return immediately; the child keeps running on its own.
    Detach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited(u32),
    Detached,
}

impl Outcome {
    /// The string handed back to the host, if any.
    pub fn payload(&self) -> Option<String> {
        match self {
            Self::Exited(code) => Some(format!("exit_code={code}")),
            Self::Detached => None,
        }
    }
}

/// Launch `command` invisibly.  No shell is involved and nothing is retried.
pub fn execute(command: &str, mode: WaitMode) -> Result<Outcome> {
    if command.trim().is_empty() {
        return Err(ShellError::InvalidArgument("empty command line".into()));
    }

    let child = native::spawn_hidden(command)?;
    tracing::debug!(pid = child.id(), ?mode, command, "process created");

    match mode {
        WaitMode::Detach => {
            child.detach();
            Ok(Outcome::Detached)
        }
        WaitMode::Block => {
            let code = child.wait()?;
            tracing::debug!(code, "process exited");
            Ok(Outcome::Exited(code))
        }
    }
}
