//! Completion request builder — snapshot of buffer text and caret.
//!
//! Captured synchronously inside the triggering event handler so the daemon
//! sees exactly what the user sees. Read-only: building a request never
//! touches the buffer.

use crate::editor::EditorHost;
use crate::error::Result;

/// Immutable snapshot sent to the daemon: full buffer text plus the caret's
/// byte offset into it.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    text: Vec<u8>,
    caret: usize,
}

impl CompletionRequest {
    /// Build a request from raw buffer bytes and a caret byte offset.
    ///
    /// Host buffer storage is NUL-terminated, so the trailing NUL run is
    /// stripped; interior NUL bytes are content and pass through verbatim.
    /// The caret is clamped to the stripped length.
    pub fn new(mut buffer: Vec<u8>, caret: usize) -> Self {
        while buffer.last() == Some(&0) {
            buffer.pop();
        }
        let caret = caret.min(buffer.len());
        Self {
            text: buffer,
            caret,
        }
    }

    /// Snapshot the host's current buffer and caret.
    pub fn capture(host: &dyn EditorHost) -> Result<Self> {
        let buffer = host.buffer_bytes()?;
        let caret = host.caret_offset()?;
        Ok(Self::new(buffer, caret))
    }

    /// Buffer text, UTF-8 bytes, trailing NULs stripped.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Caret byte offset into [`Self::text`].
    pub fn caret(&self) -> usize {
        self.caret
    }
}
