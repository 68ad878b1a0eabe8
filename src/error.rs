// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations return `error::Result<T>`.  Nothing here is fatal to
// the host: every error ends up as a string handed back through the result
// slot (see `result::ForeignCallResult`).

/// Every error the library can produce.
///
/// The window variants keep the exact wording the Vim plugin has always shown,
/// one message per failing step, so a user report pinpoints the call that
/// was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Could not get handle to foreground window!")]
    NoForegroundWindow,

    #[error("Could not query window styles!")]
    StyleQuery,

    #[error("Could not query window ex style!")]
    ExStyleQuery,

    #[error("Could not query window position!")]
    WindowRect,

    #[error("Could not apply window styles!")]
    StyleApply,

    #[error("Could not apply window ex style!")]
    ExStyleApply,

    #[error("Could not get handle to monitor!")]
    NoMonitor,

    #[error("Could not get monitor information!")]
    MonitorInfo,

    #[error("Could not resize window!")]
    Resize,

    #[error("Could not restore window!")]
    Restore,

    /// Process creation failed; carries the OS error text.
    #[error("{0}")]
    Spawn(String),

    /// Waiting on a child process failed; carries the OS error text.
    #[error("{0}")]
    Wait(String),

    /// The child exited but its status could not be read.
    #[error("{0}")]
    ExitCode(String),

    /// The host passed an argument we cannot use.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A bug unwound up to an entry point; caught before it reaches the host.
    #[error("internal error in {0}")]
    Panic(&'static str),

    /// The operation has no implementation on this platform.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShellError>;
