// ── Invisible process creation (std) ──────────────────────────────────────────
//
// The command line is split with the Windows rules (`cmdline::split`) and the
// program is started directly, never through `sh -c`.  All three stdio
// streams go to the null device so nothing leaks into the host's terminal.
//
// Detached children are parked in `DETACHED` and reaped on later spawns, so a
// fire-and-forget launch never leaves a zombie behind for the host's lifetime.

use std::{
    os::unix::process::ExitStatusExt,
    process::{Child, Command, ExitStatus, Stdio},
    sync::{Mutex, PoisonError},
};

use super::io_message;
use crate::{
    cmdline,
    error::{Result, ShellError},
};

/// Shell convention for "terminated by signal N".
const SIGNAL_EXIT_BASE: u32 = 128;

static DETACHED: Mutex<Vec<Child>> = Mutex::new(Vec::new());

/// A freshly created child, still owned by us.
pub struct ChildProcess {
    child: Child,
}

impl From<Child> for ChildProcess {
    fn from(child: Child) -> Self {
        Self { child }
    }
}

/// Start `command` with stdio detached from ours.
pub fn spawn_hidden(command: &str) -> Result<ChildProcess> {
    let argv = cmdline::split(command);
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| ShellError::InvalidArgument("empty command line".into()))?;

    reap_detached();

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ShellError::Spawn(io_message(&e)))?;
    Ok(child.into())
}

impl ChildProcess {
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Block until the child exits and return its exit code.  No timeout.
    pub fn wait(mut self) -> Result<u32> {
        let status = self
            .child
            .wait()
            .map_err(|e| ShellError::Wait(io_message(&e)))?;
        exit_code(status)
    }

    /// Stop waiting on the child; it is reaped later by `reap_detached`.
    pub fn detach(self) {
        let pid = self.child.id();
        let mut detached = DETACHED.lock().unwrap_or_else(PoisonError::into_inner);
        detached.push(self.child);
        tracing::debug!(pid, pending = detached.len(), "detached child process");
    }
}

fn exit_code(status: ExitStatus) -> Result<u32> {
    match (status.code(), status.signal()) {
        // Reinterpret negative codes the way Windows reports them.
        (Some(code), _) => Ok(code as u32),
        (None, Some(signal)) => Ok(SIGNAL_EXIT_BASE + signal as u32),
        (None, None) => Err(ShellError::ExitCode(format!(
            "child ended without an exit status ({status})"
        ))),
    }
}

/// Collect any detached children that have exited since the last call.
fn reap_detached() {
    let mut detached = DETACHED.lock().unwrap_or_else(PoisonError::into_inner);
    let before = detached.len();
    detached.retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    if detached.len() != before {
        tracing::debug!(
            reaped = before - detached.len(),
            pending = detached.len(),
            "reaped detached children"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn exit_code_round_trips() {
        let child = spawn_hidden(r#"sh -c "exit 3""#).expect("spawn");
        assert_eq!(child.wait().expect("wait"), 3);
    }

    #[test]
    fn signal_maps_to_128_plus_n() {
        let child = spawn_hidden(r#"sh -c "kill -9 $$""#).expect("spawn");
        assert_eq!(child.wait().expect("wait"), 128 + 9);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = spawn_hidden("definitely-not-a-real-program-4711")
            .err()
            .expect("spawn must fail");
        assert!(matches!(err, ShellError::Spawn(ref text) if !text.is_empty()));
    }

    #[test]
    fn detached_children_are_reaped() {
        let child = spawn_hidden("true").expect("spawn");
        let pid = child.id();
        child.detach();

        let pending = || {
            DETACHED
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .any(|c| c.id() == pid)
        };
        let deadline = Instant::now() + Duration::from_secs(5);
        while pending() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
            reap_detached();
        }
        assert!(!pending(), "pid {pid} never reaped");
    }
}
