// End-to-end checks through the exported C functions, the way Vim calls them.

use std::{
    ffi::{CStr, CString},
    os::raw::c_char,
    thread,
    time::{Duration, Instant},
};

use shell::ffi;

#[cfg(unix)]
fn exit_with(code: u32) -> String {
    format!(r#"sh -c "exit {code}""#)
}
#[cfg(windows)]
fn exit_with(code: u32) -> String {
    format!("cmd.exe /c exit {code}")
}

#[cfg(unix)]
const SLEEP_10: &str = "sleep 10";
#[cfg(windows)]
const SLEEP_10: &str = "ping -n 11 127.0.0.1";

/// Copy the result out before the next call on this thread reuses the slot.
fn read(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null results point into this thread's live result slot.
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

fn c(text: &str) -> CString {
    CString::new(text).expect("no interior NUL")
}

fn run_sync(command: &str) -> Option<String> {
    let command = c(command);
    // SAFETY: `command` is a valid C string for the duration of the call.
    read(unsafe { ffi::execute_synchronous(command.as_ptr()) })
}

#[test]
fn synchronous_execution_reports_exit_code() {
    for code in [0, 3, 42] {
        assert_eq!(run_sync(&exit_with(code)), Some(format!("exit_code={code}")));
    }
}

#[test]
fn asynchronous_execution_returns_immediately() {
    let command = c(SLEEP_10);
    let started = Instant::now();
    // SAFETY: as above.
    let result = read(unsafe { ffi::execute_asynchronous(command.as_ptr()) });
    assert_eq!(result, None);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn failed_launch_returns_os_text() {
    let text = run_sync("vim-shell-no-such-program").expect("error text");
    assert!(!text.is_empty());
    assert!(!text.starts_with("exit_code="));
    assert_eq!(text, text.trim_end(), "trailing newline must be trimmed");
}

#[test]
fn null_command_is_rejected() {
    // SAFETY: null is explicitly allowed.
    let text = read(unsafe { ffi::execute_synchronous(std::ptr::null()) });
    assert_eq!(text.as_deref(), Some("Invalid argument: missing argument"));
}

#[test]
fn libversion_is_constant() {
    let first = read(ffi::libversion(std::ptr::null()));
    let arg = c("whatever");
    let second = read(ffi::libversion(arg.as_ptr()));
    assert_eq!(first.as_deref(), Some("0.5"));
    assert_eq!(first, second);
}

#[test]
fn openurl_always_succeeds() {
    for path in ["https://example.invalid/", "/definitely/not/here.txt"] {
        let path = c(path);
        // SAFETY: as above.
        assert_eq!(read(unsafe { ffi::openurl(path.as_ptr()) }), None);
    }
    // SAFETY: null is explicitly allowed.
    assert_eq!(read(unsafe { ffi::openurl(std::ptr::null()) }), None);
}

#[test]
fn malformed_fullscreen_options_are_rejected() {
    let options = c("{not json");
    // SAFETY: as above.
    let text = read(unsafe { ffi::fullscreen(options.as_ptr()) }).expect("error text");
    assert!(text.starts_with("Invalid argument: fullscreen options"), "{text}");
}

#[cfg(not(windows))]
#[test]
fn fullscreen_is_unsupported_off_windows() {
    let options = c("enable");
    // SAFETY: as above.
    let text = read(unsafe { ffi::fullscreen(options.as_ptr()) });
    assert_eq!(text.as_deref(), Some("fullscreen is not supported on this platform"));
    assert_eq!(
        read(ffi::fullscreen_flags(1)).as_deref(),
        Some("fullscreen is not supported on this platform")
    );
}

#[test]
fn concurrent_calls_keep_their_own_results() {
    let workers: Vec<_> = (0..8u32)
        .map(|code| {
            thread::spawn(move || {
                let command = c(&exit_with(code));
                // SAFETY: as above.
                let ptr = unsafe { ffi::execute_synchronous(command.as_ptr()) };
                // Give the other threads time to publish their own results
                // before this one reads.
                thread::sleep(Duration::from_millis(50));
                (code, read(ptr))
            })
        })
        .collect();

    for worker in workers {
        let (code, result) = worker.join().expect("worker");
        assert_eq!(result, Some(format!("exit_code={code}")));
    }
}
