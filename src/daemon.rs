//! Daemon supervisor — lifecycle of the long-lived gocode process.
//!
//! gocode self-daemonizes: running any command launches the background
//! server if it isn't already up. The supervisor starts it once at plugin
//! startup (via the `set propose-builtins` configuration command, run to
//! completion) and shuts it down once at teardown (via `close`). Queries
//! themselves go through [`crate::transport`], one short-lived subprocess
//! per request — the daemon's job is caching package state between them.
//!
//! A failed launch latches: the supervisor will not spawn again until the
//! process restarts, so a missing executable costs one error, not one per
//! keystroke.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::PluginConfig;
use crate::error::{CompletionError, Result};

/// Owns the single live daemon handle for the process lifetime.
pub struct DaemonSupervisor {
    path: PathBuf,
    propose_builtins: bool,
    alive: bool,
    attempted: bool,
}

impl DaemonSupervisor {
    pub fn new(config: &PluginConfig) -> Self {
        Self {
            path: config.daemon_path.clone(),
            propose_builtins: config.propose_builtins,
            alive: false,
            attempted: false,
        }
    }

    /// Launch the daemon and apply its configuration.
    ///
    /// Idempotent: a no-op while the daemon is live. After a failed launch,
    /// returns `DaemonUnavailable` without spawning again.
    pub async fn start(&mut self) -> Result<()> {
        if self.alive {
            debug!("daemon already live; start is a no-op");
            return Ok(());
        }
        if self.attempted {
            return Err(CompletionError::DaemonUnavailable(format!(
                "{} failed to launch previously; not retrying",
                self.path.display()
            )));
        }
        self.attempted = true;

        let builtins = if self.propose_builtins { "true" } else { "false" };
        debug!(path = %self.path.display(), "starting completion daemon");
        let status = Command::new(&self.path)
            .args(["set", "propose-builtins", builtins])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                CompletionError::DaemonUnavailable(format!(
                    "failed to launch {}: {e}",
                    self.path.display()
                ))
            })?;

        if !status.success() {
            warn!(?status, "daemon configuration command exited nonzero");
        }
        self.alive = true;
        info!(path = %self.path.display(), "completion daemon started");
        Ok(())
    }

    /// Shut the daemon down, best effort.
    ///
    /// Clears the liveness flag regardless of how the `close` command fares;
    /// a daemon that won't die cleanly must not block teardown. Safe to call
    /// when already stopped or never started.
    pub async fn stop(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;

        let result = Command::new(&self.path)
            .arg("close")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        match result {
            Ok(status) if status.success() => info!("completion daemon stopped"),
            Ok(status) => warn!(?status, "daemon close command exited nonzero"),
            Err(e) => warn!("daemon close command failed: {e}"),
        }
    }

    /// Whether the daemon is live and queries should be attempted.
    pub fn is_available(&self) -> bool {
        self.alive
    }

    /// Path to the daemon executable (queries spawn it themselves).
    pub fn executable(&self) -> &std::path::Path {
        &self.path
    }
}
