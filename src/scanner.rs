//! Directory tree traversal with descent-time pruning
//!
//! Walks a root path and yields every reachable file, never entering
//! excluded subtrees (holding areas, VCS metadata, dependency caches,
//! recycle bins, upload sentinels) and never reporting editor lock
//! files. Entries are visited in lexicographic filename order so that
//! grouping tie-breaks are reproducible across runs.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;

/// A file discovered during traversal, with the metadata the policies
/// need captured at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Directory the file lives in
    pub dir: PathBuf,
    /// Bare filename
    pub file_name: String,
    /// Full path
    pub path: PathBuf,
    /// Last-write timestamp
    pub modified: SystemTime,
}

/// Result of a tree walk with non-fatal warnings.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Files found, in traversal order
    pub files: Vec<ScannedFile>,
    /// Per-entry problems that did not stop the walk
    pub warnings: Vec<String>,
}

/// Tree walker configured with exclusion names and lock prefixes.
#[derive(Debug, Clone)]
pub struct Scanner {
    excluded_dirs: std::collections::HashSet<String>,
    lock_prefixes: Vec<String>,
    pruned_paths: Vec<PathBuf>,
}

impl Scanner {
    /// Create a scanner from the active configuration.
    #[must_use]
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            excluded_dirs: config.effective_exclude_dirs(),
            lock_prefixes: config.lock_prefixes.clone(),
            pruned_paths: Vec::new(),
        }
    }

    /// Additionally prune one exact directory path. Used by the mirror
    /// policy so the mirror destination is never treated as a source.
    #[must_use]
    pub fn prune_path(mut self, path: PathBuf) -> Self {
        self.pruned_paths.push(path);
        self
    }

    /// Walk the tree under `root`.
    ///
    /// Exclusion happens during descent: pruned subtrees are never
    /// entered and their contents never appear in the result. Errors
    /// on individual entries become warnings and the walk continues.
    #[must_use]
    pub fn scan(&self, root: &Path) -> ScanResult {
        let mut result = ScanResult::default();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.should_enter(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    result
                        .warnings
                        .push(format!("Failed to read directory entry: {e}"));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str().map(String::from) else {
                result.warnings.push(format!(
                    "Skipping non-UTF-8 filename: {}",
                    entry.path().display()
                ));
                continue;
            };

            if self.is_lock_file(&file_name) {
                continue;
            }

            let modified = match entry.metadata().map_err(anyhow::Error::from).and_then(|m| {
                m.modified().map_err(anyhow::Error::from)
            }) {
                Ok(modified) => modified,
                Err(e) => {
                    result.warnings.push(format!(
                        "Failed to read metadata for {}: {e}",
                        entry.path().display()
                    ));
                    continue;
                }
            };

            let path = entry.into_path();
            let dir = path
                .parent()
                .map_or_else(|| PathBuf::from(""), Path::to_path_buf);

            result.files.push(ScannedFile {
                dir,
                file_name,
                path,
                modified,
            });
        }

        result
    }

    fn should_enter(&self, entry: &DirEntry) -> bool {
        // filter_entry also sees files; only directories are pruned here
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        let name_excluded = entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.excluded_dirs.contains(name));
        !name_excluded && !self.pruned_paths.iter().any(|p| p == entry.path())
    }

    fn is_lock_file(&self, file_name: &str) -> bool {
        self.lock_prefixes
            .iter()
            .any(|prefix| file_name.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn scanner() -> Scanner {
        Scanner::new(&ScanConfig::default())
    }

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    fn names(result: &ScanResult) -> Vec<&str> {
        result.files.iter().map(|f| f.file_name.as_str()).collect()
    }

    #[test]
    fn test_scan_finds_nested_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.txt");
        touch(tmp.path(), "sub/deeper/b.txt");

        let result = scanner().scan(tmp.path());
        assert_eq!(names(&result), vec!["a.txt", "b.txt"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_excluded_dirs_never_entered() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "keep.txt");
        touch(tmp.path(), "_archive/old.txt");
        touch(tmp.path(), ".git/config");
        touch(tmp.path(), "node_modules/pkg/index.js");
        touch(tmp.path(), "sub/_archive/older.txt");

        let result = scanner().scan(tmp.path());
        assert_eq!(names(&result), vec!["keep.txt"]);
    }

    #[test]
    fn test_lock_files_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "~$report.docx");
        touch(tmp.path(), "report.docx");

        let result = scanner().scan(tmp.path());
        assert_eq!(names(&result), vec!["report.docx"]);
    }

    #[test]
    fn test_prune_path_skips_exact_directory() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "00 - _AI-Training/mirrored.csv");
        touch(tmp.path(), "sub/00 - _AI-Training/not_the_mirror.csv");
        touch(tmp.path(), "source.csv");

        let mirror = tmp.path().join("00 - _AI-Training");
        let result = scanner().prune_path(mirror).scan(tmp.path());

        // Only the root-level mirror directory is pruned; a same-named
        // subdirectory elsewhere is still a source.
        let mut found = names(&result);
        found.sort_unstable();
        assert_eq!(found, vec!["not_the_mirror.csv", "source.csv"]);
    }

    #[test]
    fn test_traversal_order_is_lexicographic() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b.txt");
        touch(tmp.path(), "a.txt");
        touch(tmp.path(), "c.txt");

        let result = scanner().scan(tmp.path());
        assert_eq!(names(&result), vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_captures_directory_and_mtime() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "sub/file.txt");

        let result = scanner().scan(tmp.path());
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].dir, tmp.path().join("sub"));
        assert!(result.files[0].modified <= SystemTime::now());
    }
}
