// ── Invisible process creation ────────────────────────────────────────────────
//
// CreateProcessW with CREATE_NO_WINDOW so console programs never flash a
// command prompt.  The command line is passed through untouched: no shell,
// no quoting.  Process and thread handles are owned by `OwnedHandle` and
// closed on drop on every path.

#![allow(unsafe_code)]

use windows::{
    core::{PCWSTR, PWSTR},
    Win32::{
        Foundation::{CloseHandle, HANDLE, WAIT_FAILED},
        System::Threading::{
            CreateProcessW, GetExitCodeProcess, WaitForSingleObject, CREATE_NO_WINDOW,
            INFINITE, PROCESS_INFORMATION, STARTUPINFOW,
        },
    },
};

use super::{
    error::{last_error_message, os_message},
    wide,
};
use crate::error::{Result, ShellError};

/// A kernel handle closed exactly once, when dropped.
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from a successful CreateProcessW and is
        // owned solely by this wrapper, so it is valid and closed only here.
        if let Err(e) = unsafe { CloseHandle(self.0) } {
            tracing::warn!(error = %os_message(&e), "CloseHandle failed");
        }
    }
}

/// A freshly created child, still owned by us.
pub struct ChildProcess {
    process: OwnedHandle,
    _thread: OwnedHandle,
    pid: u32,
}

/// Start `command` with no console window.
pub fn spawn_hidden(command: &str) -> Result<ChildProcess> {
    // CreateProcessW may write into the command-line buffer, so it must be a
    // mutable, owned copy.
    let mut command_line = wide(command);

    let startup = STARTUPINFOW {
        // STARTUPINFOW is ~100 bytes; the cast to u32 is always lossless.
        cb: std::mem::size_of::<STARTUPINFOW>() as u32,
        ..Default::default()
    };
    let mut info = PROCESS_INFORMATION::default();

    // SAFETY: `command_line` is a writable null-terminated UTF-16 buffer that
    // outlives the call; `startup` and `info` are valid for reads/writes.
    // Null application name and directory mean "parse the command line" and
    // "inherit our working directory".
    unsafe {
        CreateProcessW(
            PCWSTR::null(),
            PWSTR(command_line.as_mut_ptr()),
            None,
            None,
            false,
            CREATE_NO_WINDOW,
            None,
            PCWSTR::null(),
            &startup,
            &mut info,
        )
    }
    .map_err(|e| ShellError::Spawn(os_message(&e)))?;

    Ok(ChildProcess {
        process: OwnedHandle(info.hProcess),
        _thread: OwnedHandle(info.hThread),
        pid: info.dwProcessId,
    })
}

impl ChildProcess {
    pub fn id(&self) -> u32 {
        self.pid
    }

    /// Block until the child exits and return its exit code.  No timeout.
    /// Both handles are closed on return, success or not.
    pub fn wait(self) -> Result<u32> {
        // SAFETY: self.process is a live process handle owned by us.
        let event = unsafe { WaitForSingleObject(self.process.0, INFINITE) };
        if event == WAIT_FAILED {
            return Err(ShellError::Wait(last_error_message()));
        }

        let mut code = 0u32;
        // SAFETY: as above; `code` is a valid u32 out-pointer.
        unsafe { GetExitCodeProcess(self.process.0, &mut code) }
            .map_err(|e| ShellError::ExitCode(os_message(&e)))?;
        Ok(code)
    }

    /// Stop tracking the child.  Closing our handles does not affect the
    /// running process.
    pub fn detach(self) {
        tracing::debug!(pid = self.pid, "detached child process");
    }
}
