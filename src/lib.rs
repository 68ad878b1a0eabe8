// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – Win32 / WinAPI FFI
//   • `ffi`             – the exported C entry points
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Native helper library for Vim.
//!
//! Loaded with `libcall()`, it gives the editor a few things Vimscript cannot
//! do on its own: run a program without flashing a console window (and
//! optionally wait for its exit code), open a URL with the default browser,
//! and toggle a borderless fullscreen window.  See [`ffi`] for the exported
//! functions.

pub mod cmdline;
pub mod config;
pub mod error;
pub mod ffi;
pub mod fullscreen;
pub mod options;
pub mod platform;
pub mod process;
pub mod result;
pub mod url;

pub use error::{Result, ShellError};
