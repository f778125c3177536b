//! Naming and exclusion configuration
//!
//! Compiled-in defaults match the RDC tree conventions; an optional
//! YAML file (`.rdcsync.yaml` at the tree root, or a user-level
//! `rdcsync/config.yaml` in the platform config directory) can
//! override them.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Root-level config file name checked before the user-level fallback
pub const CONFIG_FILE_NAME: &str = ".rdcsync.yaml";

/// Names and exclusion sets shared by both policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory names never entered during traversal
    pub exclude_dirs: Vec<String>,
    /// Filename prefixes of transient editor lock files
    pub lock_prefixes: Vec<String>,
    /// Per-directory holding area for superseded revisions
    pub archive_dir: String,
    /// Append-only run log at the tree root
    pub archive_log: String,
    /// Mirror destination directory at the tree root
    pub mirror_dir: String,
    /// Manifest file inside the mirror directory
    pub manifest_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: [
                "_archive",
                ".tmp.driveupload",
                "$RECYCLE.BIN",
                ".git",
                "node_modules",
                "__pycache__",
                ".trash",
            ]
            .map(String::from)
            .to_vec(),
            lock_prefixes: vec!["~$".to_string()],
            archive_dir: "_archive".to_string(),
            archive_log: "_archive_log.txt".to_string(),
            mirror_dir: "00 - _AI-Training".to_string(),
            manifest_file: "_manifest.txt".to_string(),
        }
    }
}

impl ScanConfig {
    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_yml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Find the active configuration for a tree root.
    ///
    /// Checks the root-level file first, then the user config
    /// directory, then falls back to the compiled-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file exists but cannot be
    /// loaded.
    pub fn discover(root: &Path) -> Result<Self> {
        let local = root.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load(&local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join("rdcsync").join("config.yaml");
            if user.is_file() {
                return Self::load(&user);
            }
        }

        Ok(Self::default())
    }

    /// Validate names and exclusion entries.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured name is empty.
    pub fn validate(&self) -> Result<()> {
        for name in &self.exclude_dirs {
            if name.trim().is_empty() {
                anyhow::bail!("Excluded directory name cannot be empty");
            }
        }
        for prefix in &self.lock_prefixes {
            if prefix.is_empty() {
                anyhow::bail!("Lock-file prefix cannot be empty");
            }
        }
        for (label, value) in [
            ("archive_dir", &self.archive_dir),
            ("archive_log", &self.archive_log),
            ("mirror_dir", &self.mirror_dir),
            ("manifest_file", &self.manifest_file),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("Config field {label} cannot be empty");
            }
        }
        Ok(())
    }

    /// Directory names pruned during traversal. The holding area is
    /// always excluded, whatever the configured list says, so archived
    /// revisions are never re-archived.
    #[must_use]
    pub fn effective_exclude_dirs(&self) -> HashSet<String> {
        let mut names: HashSet<String> = self.exclude_dirs.iter().cloned().collect();
        names.insert(self.archive_dir.clone());
        names
    }
}
