//! Host editor boundary — the narrow interface the completion core needs.
//!
//! The real host (Scintilla, a TUI widget, whatever embeds this crate) wires
//! these calls to its own buffer and window APIs. The core never touches the
//! editor any other way, so everything above this trait is testable against
//! [`MemoryEditor`].
//!
//! All offsets are byte offsets into the buffer, not char indices.

use std::path::PathBuf;

use crate::error::{CompletionError, Result};

/// Editor services consumed by the completion core.
///
/// Every call may fail (the host is a foreign API); failures surface as
/// [`CompletionError::BufferAccess`] and force the active session closed.
pub trait EditorHost {
    /// Full path of the active document.
    fn document_path(&self) -> Result<PathBuf>;

    /// Full buffer content as raw bytes, exactly as the host stores it
    /// (including any NUL padding the host's storage carries).
    fn buffer_bytes(&self) -> Result<Vec<u8>>;

    /// Caret byte offset into the buffer.
    fn caret_offset(&self) -> Result<usize>;

    /// Byte offset where the identifier containing `caret` begins.
    fn word_start_offset(&self, caret: usize) -> Result<usize>;

    /// Bytes in `[start, end)`.
    fn text_range(&self, start: usize, end: usize) -> Result<Vec<u8>>;

    /// Replace `[start, end)` with `text`, leaving the caret at the end of
    /// the inserted text.
    fn replace_range(&mut self, start: usize, end: usize, text: &[u8]) -> Result<()>;

    /// Caret position in screen pixels, relative to the host window.
    fn caret_screen_position(&self) -> Result<(i32, i32)>;

    /// Height of one text line in pixels.
    fn line_height_px(&self) -> Result<i32>;

    /// Screen position of the host window's upper-left corner.
    fn window_origin(&self) -> Result<(i32, i32)>;
}

/// Screen coordinates for the suggestion popup: directly under the caret,
/// offset by one line so the current line stays visible.
pub fn popup_origin(host: &dyn EditorHost) -> Result<(i32, i32)> {
    let (win_x, win_y) = host.window_origin()?;
    let (caret_x, caret_y) = host.caret_screen_position()?;
    let line_height = host.line_height_px()?;
    Ok((win_x + caret_x, win_y + caret_y + line_height))
}

/// In-memory editor host for tests and the demo binary.
pub struct MemoryEditor {
    path: PathBuf,
    bytes: Vec<u8>,
    caret: usize,
}

impl MemoryEditor {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>, caret: usize) -> Self {
        Self {
            path: path.into(),
            bytes,
            caret,
        }
    }

    /// Current buffer content (for assertions).
    pub fn contents(&self) -> &[u8] {
        &self.bytes
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl EditorHost for MemoryEditor {
    fn document_path(&self) -> Result<PathBuf> {
        Ok(self.path.clone())
    }

    fn buffer_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn caret_offset(&self) -> Result<usize> {
        Ok(self.caret)
    }

    fn word_start_offset(&self, caret: usize) -> Result<usize> {
        let caret = caret.min(self.bytes.len());
        let mut start = caret;
        while start > 0 && is_word_byte(self.bytes[start - 1]) {
            start -= 1;
        }
        Ok(start)
    }

    fn text_range(&self, start: usize, end: usize) -> Result<Vec<u8>> {
        if start > end || end > self.bytes.len() {
            return Err(CompletionError::BufferAccess(format!(
                "range [{start}, {end}) out of bounds (len {})",
                self.bytes.len()
            )));
        }
        Ok(self.bytes[start..end].to_vec())
    }

    fn replace_range(&mut self, start: usize, end: usize, text: &[u8]) -> Result<()> {
        if start > end || end > self.bytes.len() {
            return Err(CompletionError::BufferAccess(format!(
                "range [{start}, {end}) out of bounds (len {})",
                self.bytes.len()
            )));
        }
        self.bytes.splice(start..end, text.iter().copied());
        self.caret = start + text.len();
        Ok(())
    }

    fn caret_screen_position(&self) -> Result<(i32, i32)> {
        Ok((0, 0))
    }

    fn line_height_px(&self) -> Result<i32> {
        Ok(16)
    }

    fn window_origin(&self) -> Result<(i32, i32)> {
        Ok((0, 0))
    }
}
