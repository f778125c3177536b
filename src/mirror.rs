//! Whole-tree training mirror reconciliation
//!
//! Scans the entire tree for TRAIN-tagged revisions, groups them
//! across directories, and keeps exactly the newest revision of each
//! document inside the mirror directory at the tree root: missing or
//! outdated heads are copied in, superseded filenames are evicted, and
//! anything the grammar does not recognize is never touched.
//!
//! The mirror state is read while planning and mutated only while
//! executing, so decisions always rest on a consistent snapshot.

mod executor;
mod manifest;
mod planner;

use std::fs;
use std::path::Path;

use anyhow::Context;

pub use executor::MirrorExecutor;
pub use manifest::render_manifest;
pub use planner::{MirrorAction, MirrorOutcome, MirrorPlanner};

use crate::config::ScanConfig;
use crate::error::{EngineError, Result};
use crate::grouping::group_by_document;
use crate::report::ReportSink;
use crate::scanner::Scanner;
use crate::version::{parse_training, VersionedFile};

/// Counters, manifest lines, and per-file errors from one sync run.
#[derive(Debug, Clone, Default)]
pub struct MirrorResult {
    /// Heads copied into the mirror (or that would be, in preview)
    pub added: usize,
    /// Stale filenames removed from the mirror
    pub removed: usize,
    /// Planned actions not performed (version ties, failed copies)
    pub skipped: usize,
    /// One line per mirrored document: `<name>  ←  <source path>`
    pub manifest_lines: Vec<String>,
    /// Per-file failure descriptions; the run continues past each
    pub errors: Vec<String>,
}

impl MirrorResult {
    /// Whether the run completed without per-file errors.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Reconcile the mirror directory under `root` with the tree's
/// TRAIN-tagged revisions.
///
/// In preview mode the same report lines and counters are produced but
/// the mirror directory is not created, no file is copied or removed,
/// and the manifest is not written.
///
/// # Errors
///
/// Fails before any traversal if `root` is not a directory, or if the
/// mirror directory or manifest cannot be written on a live run.
/// Per-file failures are recorded in the result instead.
pub fn run_mirror_sync(
    root: &Path,
    config: &ScanConfig,
    preview: bool,
    sink: &mut dyn ReportSink,
) -> Result<MirrorResult> {
    if !root.is_dir() {
        return Err(EngineError::InvalidRoot(root.to_path_buf()).into());
    }

    let mirror_dir = root.join(&config.mirror_dir);
    let prefix = if preview { "[DRY RUN] " } else { "" };
    sink.append(&format!(
        "{prefix}Syncing training files \u{2192} {}",
        mirror_dir.display()
    ));
    sink.append("");

    if !preview {
        fs::create_dir_all(&mirror_dir).with_context(|| {
            format!("Failed to create mirror directory: {}", mirror_dir.display())
        })?;
    }

    let scan = Scanner::new(config)
        .prune_path(mirror_dir.clone())
        .scan(root);
    for warning in &scan.warnings {
        sink.append(&format!("  WARNING: {warning}"));
    }

    let mut revisions = Vec::new();
    for file in scan.files {
        if let Some(parts) = parse_training(&file.file_name) {
            revisions.push(VersionedFile::new(
                parts,
                file.file_name,
                file.path,
                file.modified,
            ));
        }
    }

    let groups = group_by_document(revisions);
    let outcome = MirrorPlanner::new(&mirror_dir).plan(&groups);

    let mut result = MirrorResult {
        manifest_lines: outcome.manifest_lines,
        errors: outcome.errors,
        ..MirrorResult::default()
    };

    MirrorExecutor::new(preview).execute(&outcome.actions, &mut result, sink);

    if !preview {
        manifest::write_manifest(&mirror_dir, &config.manifest_file, &result.manifest_lines)?;
    }

    sink.append("");
    sink.append(&format!(
        "Done. {} added, {} stale removed.",
        result.added, result.removed
    ));

    Ok(result)
}

#[cfg(test)]
mod integration_tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::report::MemorySink;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, rel).unwrap();
    }

    fn run(root: &Path, preview: bool) -> (MirrorResult, Vec<String>) {
        let mut sink = MemorySink::new();
        let result = run_mirror_sync(root, &ScanConfig::default(), preview, &mut sink).unwrap();
        (result, sink.into_lines())
    }

    fn mirror(root: &Path) -> std::path::PathBuf {
        root.join("00 - _AI-Training")
    }

    #[test]
    fn test_mirrors_newest_across_directories() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "x/A_TRAIN_v1.0.csv");
        touch(tmp.path(), "y/A_TRAIN_v2.0.csv");

        let (result, _) = run(tmp.path(), false);

        assert_eq!(result.added, 1);
        assert_eq!(result.removed, 0);
        assert!(mirror(tmp.path()).join("A_TRAIN_v2.0.csv").exists());
        assert!(!mirror(tmp.path()).join("A_TRAIN_v1.0.csv").exists());
        assert_eq!(result.manifest_lines.len(), 1);
        assert!(result.manifest_lines[0].contains("A_TRAIN_v2.0.csv"));
        assert!(result.manifest_lines[0].contains(&tmp.path().join("y").display().to_string()));
    }

    #[test]
    fn test_untagged_files_are_invisible() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "A_v2.0.csv");
        touch(tmp.path(), "notes.txt");

        let (result, _) = run(tmp.path(), false);

        assert_eq!(result.added, 0);
        assert!(result.manifest_lines.is_empty());
        assert!(!mirror(tmp.path()).join("A_v2.0.csv").exists());
    }

    #[test]
    fn test_repeat_run_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "data/A_TRAIN_v1.3.csv");
        touch(tmp.path(), "data/B_TRAIN_v2.0.xlsx");

        let (first, _) = run(tmp.path(), false);
        assert_eq!(first.added, 2);

        // Copies carry the source mtime, so nothing is newer next time
        let (second, _) = run(tmp.path(), false);
        assert_eq!(second.added, 0);
        assert_eq!(second.removed, 0);
        assert_eq!(second.manifest_lines.len(), 2);
    }

    #[test]
    fn test_evicts_superseded_mirror_copy() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/A_TRAIN_v1.0.csv");
        let (first, _) = run(tmp.path(), false);
        assert_eq!(first.added, 1);

        // A newer revision appears elsewhere in the tree
        touch(tmp.path(), "elsewhere/A_TRAIN_v2.0.csv");
        let (second, lines) = run(tmp.path(), false);

        assert_eq!(second.added, 1);
        assert_eq!(second.removed, 1);
        assert!(mirror(tmp.path()).join("A_TRAIN_v2.0.csv").exists());
        assert!(!mirror(tmp.path()).join("A_TRAIN_v1.0.csv").exists());
        assert!(lines.iter().any(|l| l.contains("REMOVE stale: A_TRAIN_v1.0.csv")));
    }

    #[test]
    fn test_unmanaged_mirror_files_untouched() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/A_TRAIN_v1.0.csv");
        touch(tmp.path(), "00 - _AI-Training/manually_placed.txt");

        let (result, _) = run(tmp.path(), false);

        assert_eq!(result.added, 1);
        assert_eq!(result.removed, 0);
        assert!(mirror(tmp.path()).join("manually_placed.txt").exists());
    }

    #[test]
    fn test_mirror_never_a_source() {
        let tmp = TempDir::new().unwrap();
        // A stray tagged file inside the mirror must not form a group
        touch(tmp.path(), "00 - _AI-Training/Ghost_TRAIN_v9.0.csv");

        let (result, _) = run(tmp.path(), false);

        assert_eq!(result.added, 0);
        assert!(result.manifest_lines.is_empty());
        // Not recognized as any group's member, so also never evicted
        assert!(mirror(tmp.path()).join("Ghost_TRAIN_v9.0.csv").exists());
    }

    #[test]
    fn test_updates_when_source_is_newer() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/A_TRAIN_v1.0.csv");
        let (first, _) = run(tmp.path(), false);
        assert_eq!(first.added, 1);

        // Rewrite the source with a later mtime
        let source = tmp.path().join("src/A_TRAIN_v1.0.csv");
        fs::write(&source, "updated").unwrap();
        let later = filetime::FileTime::from_unix_time(
            filetime::FileTime::from_last_modification_time(&fs::metadata(&source).unwrap())
                .unix_seconds()
                + 5,
            0,
        );
        filetime::set_file_mtime(&source, later).unwrap();

        let (second, _) = run(tmp.path(), false);
        assert_eq!(second.added, 1);
        assert_eq!(
            fs::read_to_string(mirror(tmp.path()).join("A_TRAIN_v1.0.csv")).unwrap(),
            "updated"
        );
    }

    #[test]
    fn test_manifest_rewritten_each_run() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a/One_TRAIN_v1.0.csv");
        touch(tmp.path(), "b/Two_TRAIN_v1.0.csv");
        run(tmp.path(), false);

        let manifest_path = mirror(tmp.path()).join("_manifest.txt");
        let first = fs::read_to_string(&manifest_path).unwrap();
        assert!(first.starts_with("RDC AI Training Manifest"));
        assert!(first.contains("Files: 2"));
        assert!(first.contains("One_TRAIN_v1.0.csv  \u{2190}  "));

        // Remove one source; the manifest reflects only the new run
        fs::remove_file(tmp.path().join("b/Two_TRAIN_v1.0.csv")).unwrap();
        run(tmp.path(), false);
        let second = fs::read_to_string(&manifest_path).unwrap();
        assert!(second.contains("Files: 1"));
        assert!(!second.contains("Two_TRAIN_v1.0.csv"));
    }

    #[test]
    fn test_preview_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/A_TRAIN_v1.0.csv");

        let (result, lines) = run(tmp.path(), true);

        assert_eq!(result.added, 1);
        assert!(!mirror(tmp.path()).exists());
        assert!(lines.iter().any(|l| l.contains("ADD: A_TRAIN_v1.0.csv")));
        assert_eq!(result.manifest_lines.len(), 1);
    }

    #[test]
    fn test_version_tie_not_evicted() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a/Data_TRAIN_v1.0.csv");
        touch(tmp.path(), "b/data_TRAIN_v1.0.csv");

        let (result, lines) = run(tmp.path(), false);

        // First-seen copy is mirrored; the tied twin is reported only
        assert_eq!(result.added, 1);
        assert_eq!(result.removed, 0);
        assert_eq!(result.skipped, 1);
        assert!(lines.iter().any(|l| l.contains("CONFLICT")));
        assert!(!result.is_success());
    }

    #[test]
    fn test_missing_root_fails_before_writing() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("gone");

        let mut sink = MemorySink::new();
        assert!(run_mirror_sync(&missing, &ScanConfig::default(), false, &mut sink).is_err());
        assert!(sink.lines().is_empty());
    }
}
