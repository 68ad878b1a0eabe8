// ── Result channel ────────────────────────────────────────────────────────────
//
// Vim's libcall() copies the returned string immediately and never frees it,
// so the library has to own the storage.  Each thread gets its own slot: a
// pointer stays valid until the next call *from the same thread*, and two
// threads can never clobber each other's result.

use std::{cell::RefCell, ffi::CString, os::raw::c_char, ptr};

use crate::error::{Result, ShellError};

/// Outcome of one foreign call, before it is marshalled for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignCallResult {
    pub success: bool,
    pub payload: Option<String>,
    pub error: Option<String>,
}

impl ForeignCallResult {
    pub fn ok(payload: Option<String>) -> Self {
        Self {
            success: true,
            payload,
            error: None,
        }
    }

    pub fn failed(error: &ShellError) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(error.to_string()),
        }
    }

    /// The text handed to the host: payload on success, error text on
    /// failure, nothing for a bare success.
    pub fn text(&self) -> Option<&str> {
        if self.success {
            self.payload.as_deref()
        } else {
            self.error.as_deref()
        }
    }
}

impl From<Result<Option<String>>> for ForeignCallResult {
    fn from(result: Result<Option<String>>) -> Self {
        match result {
            Ok(payload) => Self::ok(payload),
            Err(e) => Self::failed(&e),
        }
    }
}

thread_local! {
    static SLOT: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Store `result` in this thread's slot and return a pointer the host can
/// read until its next call on this thread.  A bare success is a null pointer.
pub fn publish(result: ForeignCallResult) -> *const c_char {
    let text = result.text().map(to_c_string);
    SLOT.with(|slot| {
        let mut slot = slot.borrow_mut();
        *slot = text;
        slot.as_ref().map_or(ptr::null(), |s| s.as_ptr())
    })
}

/// Interior NULs would silently truncate the string on the host side; drop
/// them so the rest of an OS message survives.
fn to_c_string(text: &str) -> CString {
    let bytes: Vec<u8> = text.bytes().filter(|&b| b != 0).collect();
    CString::new(bytes).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;

    fn read(ptr: *const c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }
        // SAFETY: non-null pointers from publish() point into the live slot.
        #[allow(unsafe_code)]
        let s = unsafe { CStr::from_ptr(ptr) };
        Some(s.to_string_lossy().into_owned())
    }

    #[test]
    fn bare_success_is_null() {
        assert!(publish(ForeignCallResult::ok(None)).is_null());
    }

    #[test]
    fn payload_is_returned_on_success() {
        let ptr = publish(ForeignCallResult::ok(Some("exit_code=3".into())));
        assert_eq!(read(ptr).as_deref(), Some("exit_code=3"));
    }

    #[test]
    fn error_text_is_returned_on_failure() {
        let ptr = publish(ForeignCallResult::failed(&ShellError::Resize));
        assert_eq!(read(ptr).as_deref(), Some("Could not resize window!"));
    }

    #[test]
    fn interior_nul_is_stripped() {
        let ptr = publish(ForeignCallResult::ok(Some("a\0b".into())));
        assert_eq!(read(ptr).as_deref(), Some("ab"));
    }

    #[test]
    fn threads_have_independent_slots() {
        let here = publish(ForeignCallResult::ok(Some("main".into())));
        std::thread::spawn(|| {
            publish(ForeignCallResult::ok(Some("other".into())));
        })
        .join()
        .expect("thread");
        assert_eq!(read(here).as_deref(), Some("main"));
    }

    #[test]
    fn from_result_maps_both_arms() {
        let ok: ForeignCallResult = Ok(Some("x".to_owned())).into();
        assert!(ok.success);
        assert_eq!(ok.text(), Some("x"));

        let err: ForeignCallResult = Err(ShellError::NoMonitor).into();
        assert!(!err.success);
        assert_eq!(err.text(), Some("Could not get handle to monitor!"));
    }
}
