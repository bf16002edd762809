//! Per-trigger orchestration: document check → request → transport →
//! parse → session.
//!
//! This is the boundary where failures become policy: a dead daemon or a
//! failed round-trip degrades to "no suggestions" for that trigger, host
//! buffer failures propagate so the UI can notify, and nothing panics into
//! the host editor.

use tracing::{debug, warn};

use crate::config::PluginConfig;
use crate::daemon::DaemonSupervisor;
use crate::editor::EditorHost;
use crate::error::Result;
use crate::request::CompletionRequest;
use crate::response::{parse_lines, Suggestion};
use crate::session::SelectionSession;
use crate::transport;

/// Ties the supervisor, transport, and parser into one completion flow.
///
/// One engine per host process; triggers are serialized by the host's
/// single-threaded event dispatch, so there is never a concurrent exchange.
pub struct CompletionEngine {
    config: PluginConfig,
    daemon: DaemonSupervisor,
}

impl CompletionEngine {
    pub fn new(config: PluginConfig) -> Self {
        let daemon = DaemonSupervisor::new(&config);
        Self { config, daemon }
    }

    /// Start the daemon. Called once at plugin startup; the error (if any)
    /// is for a one-time user notification, not a retry loop.
    pub async fn startup(&mut self) -> Result<()> {
        self.daemon.start().await
    }

    /// Stop the daemon. Called once at plugin teardown.
    pub async fn shutdown(&mut self) {
        self.daemon.stop().await;
    }

    /// Run one completion trigger end to end.
    ///
    /// Returns `None` for unsupported documents (no daemon traffic at all).
    /// Otherwise always returns a session — possibly with zero suggestions
    /// when the daemon is unavailable or the round-trip failed.
    pub async fn trigger(&mut self, host: &dyn EditorHost) -> Result<Option<SelectionSession>> {
        let path = host.document_path()?;
        if !self.config.is_supported_document(&path) {
            debug!(path = %path.display(), "document not eligible for completion");
            return Ok(None);
        }
        let suggestions = self.suggestions_for(host).await?;
        let session = SelectionSession::open(host, suggestions)?;
        Ok(Some(session))
    }

    /// Snapshot the buffer and run the daemon query.
    ///
    /// Daemon and transport failures yield an empty list; only host buffer
    /// failures propagate.
    pub async fn suggestions_for(&mut self, host: &dyn EditorHost) -> Result<Vec<Suggestion>> {
        // Idempotent while live; latched after a failed launch, so an absent
        // executable costs one spawn attempt total, not one per trigger.
        if let Err(e) = self.daemon.start().await {
            debug!("daemon not available: {e}");
            return Ok(Vec::new());
        }

        let request = CompletionRequest::capture(host)?;
        match transport::query(
            self.daemon.executable(),
            &request,
            self.config.timeout_secs,
        )
        .await
        {
            Ok(lines) => Ok(parse_lines(&lines)),
            Err(e) => {
                warn!("completion query failed: {e}");
                Ok(Vec::new())
            }
        }
    }
}
