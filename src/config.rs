//! Plugin configuration — persistent settings for the completion client.
//!
//! User-level config: `~/.gocomplete/config.yaml` (daemon path, query
//! timeout, supported extensions, propose-builtins toggle).
//!
//! Resolution: config file → in-memory defaults. A missing or malformed
//! file never blocks startup; defaults are always usable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings for the completion client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Path to the gocode executable. A bare name is resolved via PATH.
    #[serde(default = "default_daemon_path")]
    pub daemon_path: PathBuf,
    /// Ask the daemon to include built-in identifiers in its suggestions.
    #[serde(default = "default_true")]
    pub propose_builtins: bool,
    /// File extensions (lowercase, no dot) eligible for completion.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Deadline for one query subprocess round-trip.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_daemon_path() -> PathBuf {
    PathBuf::from("gocode")
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec!["go".into()]
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            daemon_path: default_daemon_path(),
            propose_builtins: true,
            extensions: default_extensions(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Path to `~/.gocomplete/`.
fn dirs_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(".gocomplete"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".gocomplete"))
    }
}

impl PluginConfig {
    /// Load config from disk, falling back to defaults on any failure.
    pub fn load() -> Self {
        let Some(dir) = dirs_path() else {
            return Self::default();
        };
        Self::load_from(&dir.join("config.yaml"))
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save config to `~/.gocomplete/config.yaml`.
    pub fn save(&self) -> Result<(), String> {
        let Some(dir) = dirs_path() else {
            return Err("Cannot determine home directory".into());
        };
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
        let path = dir.join("config.yaml");
        let yaml = serde_yaml::to_string(self).map_err(|e| format!("YAML serialize error: {e}"))?;
        std::fs::write(&path, yaml).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        Ok(())
    }

    /// Whether a document is eligible for completion, by extension.
    pub fn is_supported_document(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}
