// ── Exported entry points ─────────────────────────────────────────────────────
//
// The C surface Vim reaches through libcall():
//
//     :call libcall('shell.dll', 'fullscreen', 'enable always on top')
//
// Every function takes one string (or one int) and returns a pointer into the
// calling thread's result slot, valid until that thread's next call (see
// `result`).  A null return means "success, nothing to say".
//
// This module is the string-marshalling edge only: decode the argument, call
// into the typed core, publish the result.  It is one of the two places that
// may use `unsafe` (the other is `platform::win32`).

#![allow(unsafe_code)]

use std::{
    borrow::Cow,
    ffi::CStr,
    os::raw::{c_char, c_int},
    panic::{self, AssertUnwindSafe},
};

use crate::{
    config,
    error::{Result, ShellError},
    fullscreen,
    options::FullscreenOptions,
    process::{self, WaitMode},
    result::{self, ForeignCallResult},
    url,
};

/// Reported by `libversion`; the plugin compares it against what it expects.
pub const LIB_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR")
);

/// Run one entry point: logging set up, panics caught, result published.
fn call(name: &'static str, body: impl FnOnce() -> Result<Option<String>>) -> *const c_char {
    config::init_logging();
    let _span = tracing::debug_span!("entry", name).entered();

    let outcome = panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|_| {
        tracing::error!("panic caught at FFI boundary");
        Err(ShellError::Panic(name))
    });
    if let Err(e) = &outcome {
        tracing::debug!(error = %e, "call failed");
    }
    result::publish(ForeignCallResult::from(outcome))
}

/// Borrow the host's argument as text.  Invalid UTF-8 is replaced rather
/// than rejected; the host sends whatever its 'encoding' option says.
///
/// # Safety
///
/// `ptr` must be null or point to a null-terminated string that stays valid
/// for `'a`.
unsafe fn text_arg<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        None
    } else {
        // SAFETY: non-null and null-terminated per the caller's contract.
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy())
    }
}

fn required(arg: Option<Cow<'_, str>>) -> Result<Cow<'_, str>> {
    arg.ok_or_else(|| ShellError::InvalidArgument("missing argument".into()))
}

/// Run `command` invisibly, wait for it, and return `exit_code=<N>`.
///
/// # Safety
///
/// `command` must be null or a valid null-terminated string for the duration
/// of the call.
#[no_mangle]
pub unsafe extern "C" fn execute_synchronous(command: *const c_char) -> *const c_char {
    // SAFETY: forwarded caller contract.
    let command = unsafe { text_arg(command) };
    call("execute_synchronous", || {
        let command = required(command)?;
        Ok(process::execute(&command, WaitMode::Block)?.payload())
    })
}

/// Run `command` invisibly and return at once.
///
/// # Safety
///
/// As for [`execute_synchronous`].
#[no_mangle]
pub unsafe extern "C" fn execute_asynchronous(command: *const c_char) -> *const c_char {
    // SAFETY: forwarded caller contract.
    let command = unsafe { text_arg(command) };
    call("execute_asynchronous", || {
        let command = required(command)?;
        Ok(process::execute(&command, WaitMode::Detach)?.payload())
    })
}

/// The library version; the argument is ignored and never read.
#[no_mangle]
pub extern "C" fn libversion(_ignored: *const c_char) -> *const c_char {
    call("libversion", || Ok(Some(LIB_VERSION.to_owned())))
}

/// Open a URL or path with the OS default handler.  Always succeeds.
///
/// # Safety
///
/// `path` must be null or a valid null-terminated string for the duration
/// of the call.
#[no_mangle]
pub unsafe extern "C" fn openurl(path: *const c_char) -> *const c_char {
    // SAFETY: forwarded caller contract.
    let path = unsafe { text_arg(path) };
    call("openurl", || {
        match path {
            Some(path) => url::open(&path),
            None => tracing::warn!("openurl called without a path"),
        }
        Ok(None)
    })
}

/// Toggle fullscreen; `options` is described in `options::FullscreenOptions`.
///
/// # Safety
///
/// `options` must be null or a valid null-terminated string for the
/// duration of the call.
#[no_mangle]
pub unsafe extern "C" fn fullscreen(options: *const c_char) -> *const c_char {
    // SAFETY: forwarded caller contract.
    let options = unsafe { text_arg(options) };
    call("fullscreen", || {
        let options = FullscreenOptions::parse(&required(options)?)?;
        fullscreen::toggle(options)?;
        Ok(None)
    })
}

/// Toggle fullscreen from integer flags: bit 0 enable, bit 1 always on top.
#[no_mangle]
pub extern "C" fn fullscreen_flags(flags: c_int) -> *const c_char {
    call("fullscreen_flags", || {
        fullscreen::toggle(FullscreenOptions::from_flags(flags))?;
        Ok(None)
    })
}

/// The current foreground window id, in decimal, for use as `window=<id>`.
#[no_mangle]
pub extern "C" fn foreground_window(_ignored: *const c_char) -> *const c_char {
    call("foreground_window", || {
        Ok(Some(fullscreen::foreground_window()?.0.to_string()))
    })
}
