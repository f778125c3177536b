//! Per-directory version archiving policy
//!
//! Within each directory, every document with two or more recognized
//! revisions keeps its newest revision in place while the superseded
//! ones move into a local holding subdirectory. Revisions are never
//! compared across directories; an older copy in another folder is
//! that folder's business.
//!
//! Decision and execution are split: [`ArchivePlanner`] turns grouped
//! revisions into actions, [`ArchiveExecutor`] applies them (or, in
//! preview mode, only narrates them).

mod executor;
mod planner;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;

pub use executor::ArchiveExecutor;
pub use planner::{ArchiveAction, ArchivePlan, ArchivePlanner};

use crate::config::ScanConfig;
use crate::error::{EngineError, Result};
use crate::report::ReportSink;
use crate::scanner::Scanner;
use crate::version::{parse_versioned, VersionedFile};

/// Counters and per-file errors from one archive run.
#[derive(Debug, Clone, Default)]
pub struct ArchiveResult {
    /// Superseded revisions relocated (or that would be, in preview)
    pub moved: usize,
    /// Planned relocations not performed (collisions, version ties)
    pub skipped: usize,
    /// Per-file failure descriptions; the run continues past each
    pub errors: Vec<String>,
}

impl ArchiveResult {
    /// Whether the run completed without per-file errors.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Archive superseded revisions under `root`.
///
/// In preview mode the same report lines and counters are produced but
/// nothing on disk changes and the run log is not appended.
///
/// # Errors
///
/// Fails before any traversal if `root` is not a directory, or if the
/// run log cannot be appended at the end of a live run. Per-file
/// failures are recorded in the result instead.
pub fn run_archive(
    root: &Path,
    config: &ScanConfig,
    preview: bool,
    sink: &mut dyn ReportSink,
) -> Result<ArchiveResult> {
    if !root.is_dir() {
        return Err(EngineError::InvalidRoot(root.to_path_buf()).into());
    }

    let prefix = if preview { "[DRY RUN] " } else { "" };
    sink.append(&format!("{prefix}Scanning: {}", root.display()));
    sink.append("");

    let scan = Scanner::new(config).scan(root);
    for warning in &scan.warnings {
        sink.append(&format!("  WARNING: {warning}"));
    }

    let planner = ArchivePlanner::new(config);
    let executor = ArchiveExecutor::new(preview);
    let mut result = ArchiveResult::default();

    for (dir, files) in revisions_by_directory(scan.files) {
        let plan = planner.plan(&dir, files);
        executor.execute(&plan, &mut result, sink);
    }

    if !preview {
        append_run_log(root, config, result.moved)?;
    }

    sink.append("");
    sink.append(&format!(
        "Done. {} files archived, {} skipped.",
        result.moved, result.skipped
    ));

    Ok(result)
}

/// Bucket recognized revisions per containing directory, preserving
/// traversal order both across directories and within each one.
fn revisions_by_directory(
    files: Vec<crate::scanner::ScannedFile>,
) -> Vec<(PathBuf, Vec<VersionedFile>)> {
    let mut index: std::collections::HashMap<PathBuf, usize> = std::collections::HashMap::new();
    let mut buckets: Vec<(PathBuf, Vec<VersionedFile>)> = Vec::new();

    for file in files {
        let Some(parts) = parse_versioned(&file.file_name) else {
            continue;
        };
        let revision = VersionedFile::new(parts, file.file_name, file.path, file.modified);
        if let Some(&slot) = index.get(&file.dir) {
            buckets[slot].1.push(revision);
        } else {
            index.insert(file.dir.clone(), buckets.len());
            buckets.push((file.dir, vec![revision]));
        }
    }

    buckets
}

fn append_run_log(root: &Path, config: &ScanConfig, moved: usize) -> Result<()> {
    let path = root.join(&config.archive_log);
    let line = format!(
        "[{}] Archived {} files\n",
        Local::now().format("%Y-%m-%d %H:%M"),
        moved
    );

    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open run log: {}", path.display()))?;
    log.write_all(line.as_bytes())
        .with_context(|| format!("Failed to append to run log: {}", path.display()))?;

    Ok(())
}
