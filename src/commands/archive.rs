//! Archive command

use std::path::Path;

use anyhow::Context;
use rdcsync::{run_archive, StdoutSink};

use super::RunOptions;

/// Archive superseded revisions under a root folder.
pub struct Archive;

impl Archive {
    /// Run the archive policy and print its report to stdout.
    pub fn execute(root: &Path, options: &RunOptions) -> anyhow::Result<()> {
        let config = options.load_config(root)?;
        if options.verbose {
            println!("Holding area name: {}/", config.archive_dir);
        }

        let mut sink = StdoutSink;
        let result = run_archive(root, &config, options.dry_run, &mut sink)
            .with_context(|| format!("Archive run failed for {}", root.display()))?;

        if !result.is_success() {
            eprintln!("\nCompleted with {} error(s):", result.errors.len());
            for error in &result.errors {
                eprintln!("  - {error}");
            }
        }
        Ok(())
    }
}
