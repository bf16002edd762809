//! Selection session — preview, commit, or roll back one suggestion list.
//!
//! A session is scoped to one popup interaction. It owns the buffer range
//! `[word_start, word_start + live_len)` exclusively for its lifetime:
//! highlighting a suggestion replaces that range in place (a visible but
//! reversible edit), confirming leaves the previewed text as-is, and
//! cancelling restores the range byte-identically to the word captured at
//! open. The UI feeds discrete events in; all buffer mutation lives here.
//!
//! `original_word` is captured exactly once, before any preview edit, and
//! is the sole source of truth for rollback.

use tracing::{debug, warn};

use crate::editor::EditorHost;
use crate::error::Result;
use crate::response::Suggestion;

/// Lifecycle of a popup interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Popup visible, nothing highlighted yet.
    Open,
    /// A suggestion is tentatively inserted in the buffer.
    Previewing,
    /// Previewed text left in place permanently. Terminal.
    Committed,
    /// Buffer range restored to the original word. Terminal.
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Committed | SessionState::Cancelled)
    }
}

/// Interactive selection over one completion round-trip's suggestions.
pub struct SelectionSession {
    suggestions: Vec<Suggestion>,
    word_start: usize,
    original_word: Vec<u8>,
    /// Length of whatever currently occupies the owned range.
    live_len: usize,
    highlighted: Option<usize>,
    state: SessionState,
}

impl SelectionSession {
    /// Open a session against the host's current caret position.
    ///
    /// Captures the in-progress word (`[word_start, caret)`) before any
    /// mutation. An empty suggestion list is a valid session — the popup
    /// simply has nothing to highlight.
    pub fn open(host: &dyn EditorHost, suggestions: Vec<Suggestion>) -> Result<Self> {
        let caret = host.caret_offset()?;
        let word_start = host.word_start_offset(caret)?;
        let original_word = host.text_range(word_start, caret)?;
        let live_len = original_word.len();
        debug!(
            word_start,
            word = %String::from_utf8_lossy(&original_word),
            count = suggestions.len(),
            "selection session opened"
        );
        Ok(Self {
            suggestions,
            word_start,
            original_word,
            live_len,
            highlighted: None,
            state: SessionState::Open,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// The currently previewed suggestion, if any.
    pub fn highlighted(&self) -> Option<&Suggestion> {
        self.highlighted.and_then(|i| self.suggestions.get(i))
    }

    /// Preview the suggestion at `index`: replace the owned range with its
    /// text. Re-highlighting runs the same replace-in-place step, so exactly
    /// one candidate is ever live in the buffer.
    ///
    /// A buffer-access failure forces the session into `Cancelled` with a
    /// best-effort restore, and the failure is returned to the caller.
    pub fn on_highlight_changed(&mut self, host: &mut dyn EditorHost, index: usize) -> Result<()> {
        if self.state.is_terminal() {
            debug!(index, "highlight event after session closed; ignored");
            return Ok(());
        }
        let Some(suggestion) = self.suggestions.get(index) else {
            debug!(index, "highlight index out of range; ignored");
            return Ok(());
        };
        let text = suggestion.text.clone();
        let end = self.word_start + self.live_len;
        if let Err(e) = host.replace_range(self.word_start, end, text.as_bytes()) {
            self.force_cancel(host);
            return Err(e);
        }
        self.live_len = text.len();
        self.highlighted = Some(index);
        self.state = SessionState::Previewing;
        Ok(())
    }

    /// Confirm the current preview. No buffer mutation — the preview edit
    /// already wrote the text; commit just stops owning the range.
    ///
    /// Confirming from `Open` (nothing highlighted) commits an empty insert:
    /// the original word stays untouched and `None` is returned.
    pub fn on_confirm(&mut self) -> Option<&Suggestion> {
        if self.state.is_terminal() {
            return None;
        }
        self.state = SessionState::Committed;
        debug!(highlighted = ?self.highlighted, "selection committed");
        self.highlighted.and_then(|i| self.suggestions.get(i))
    }

    /// Abort: restore the owned range to exactly the original word, erasing
    /// any preview edits. Idempotent regardless of how many previews ran.
    ///
    /// A failed restoration still closes the session but is surfaced, never
    /// swallowed.
    pub fn on_cancel(&mut self, host: &mut dyn EditorHost) -> Result<()> {
        if self.state.is_terminal() {
            return Ok(());
        }
        let end = self.word_start + self.live_len;
        let original = self.original_word.clone();
        self.state = SessionState::Cancelled;
        host.replace_range(self.word_start, end, &original)?;
        self.live_len = original.len();
        debug!("selection cancelled, original word restored");
        Ok(())
    }

    /// Best-effort rollback after a preview failure. The session is closed
    /// either way; a rollback failure is logged because there is no caller
    /// left to hand it to.
    fn force_cancel(&mut self, host: &mut dyn EditorHost) {
        let end = self.word_start + self.live_len;
        let original = self.original_word.clone();
        self.state = SessionState::Cancelled;
        match host.replace_range(self.word_start, end, &original) {
            Ok(()) => self.live_len = original.len(),
            Err(e) => warn!("rollback after preview failure also failed: {e}"),
        }
    }
}
