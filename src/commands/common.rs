//! Options shared by both commands

use std::path::{Path, PathBuf};

use anyhow::Context;
use rdcsync::ScanConfig;

/// Flags and config selection resolved from the CLI.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub verbose: bool,
    pub dry_run: bool,
    pub config: Option<PathBuf>,
    pub no_config: bool,
}

impl RunOptions {
    pub fn new(verbose: bool, dry_run: bool, config: Option<&Path>, no_config: bool) -> Self {
        Self {
            verbose,
            dry_run,
            config: config.map(Path::to_path_buf),
            no_config,
        }
    }

    /// Resolve the active configuration for a run.
    pub fn load_config(&self, root: &Path) -> anyhow::Result<ScanConfig> {
        if self.no_config {
            return Ok(ScanConfig::default());
        }
        if let Some(path) = &self.config {
            return ScanConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()));
        }
        ScanConfig::discover(root)
    }
}
