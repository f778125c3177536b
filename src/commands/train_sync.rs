//! Training sync command

use std::path::Path;

use anyhow::Context;
use rdcsync::{run_mirror_sync, StdoutSink};

use super::RunOptions;

/// Mirror the latest TRAIN-tagged revisions into the training directory.
pub struct TrainSync;

impl TrainSync {
    /// Run the mirror policy and print its report to stdout.
    pub fn execute(root: &Path, options: &RunOptions) -> anyhow::Result<()> {
        let config = options.load_config(root)?;
        if options.verbose {
            println!("Mirror directory name: {}/", config.mirror_dir);
        }

        let mut sink = StdoutSink;
        let result = run_mirror_sync(root, &config, options.dry_run, &mut sink)
            .with_context(|| format!("Training sync failed for {}", root.display()))?;

        if !result.is_success() {
            eprintln!("\nCompleted with {} error(s):", result.errors.len());
            for error in &result.errors {
                eprintln!("  - {error}");
            }
        }
        Ok(())
    }
}
