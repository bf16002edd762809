//! Completion-specific error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    /// The gocode executable is missing or failed to launch.
    #[error("completion daemon unavailable: {0}")]
    DaemonUnavailable(String),

    /// The query subprocess started but the exchange with it failed.
    #[error("daemon transport failed: {0}")]
    Transport(String),

    /// The query subprocess exceeded the configured deadline.
    #[error("daemon query timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// A host editor call failed during preview, commit, or rollback.
    #[error("buffer access failed: {0}")]
    BufferAccess(String),
}

pub type Result<T> = std::result::Result<T, CompletionError>;
