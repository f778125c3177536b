//! Archive action planning
//!
//! Pure decision logic: turns the revisions found in one directory
//! into relocation actions without touching the filesystem.

use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::grouping::group_by_document;
use crate::version::VersionedFile;

/// One planned step for the archive executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveAction {
    /// Relocate a superseded revision into the holding area.
    Move {
        /// Current location
        source: PathBuf,
        /// Target inside the holding area, same filename
        dest: PathBuf,
        /// Bare filename, for reporting
        file_name: String,
    },
    /// A non-head revision carries the head's exact version. It is
    /// reported and left in place rather than silently archived.
    VersionTie {
        /// The tied revision's filename
        file_name: String,
        /// The selected head's filename
        head_name: String,
    },
}

/// Planned work for one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePlan {
    /// Directory the plan covers
    pub dir: PathBuf,
    /// Holding subdirectory actions move into
    pub holding_dir: PathBuf,
    /// Steps in traversal order
    pub actions: Vec<ArchiveAction>,
}

/// Builds per-directory archive plans.
#[derive(Debug, Clone)]
pub struct ArchivePlanner {
    archive_dir: String,
}

impl ArchivePlanner {
    /// Create a planner using the configured holding-area name.
    #[must_use]
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            archive_dir: config.archive_dir.clone(),
        }
    }

    /// Plan relocations for the revisions found in one directory.
    ///
    /// Groups with a single revision contribute no actions.
    #[must_use]
    pub fn plan(&self, dir: &Path, revisions: Vec<VersionedFile>) -> ArchivePlan {
        let holding_dir = dir.join(&self.archive_dir);
        let mut actions = Vec::new();

        for group in group_by_document(revisions) {
            if group.is_singleton() {
                continue;
            }
            let head_name = group.head().file_name.clone();
            for member in group.stale() {
                if group.ties_with_head(member) {
                    actions.push(ArchiveAction::VersionTie {
                        file_name: member.file_name.clone(),
                        head_name: head_name.clone(),
                    });
                } else {
                    actions.push(ArchiveAction::Move {
                        source: member.source_path.clone(),
                        dest: holding_dir.join(&member.file_name),
                        file_name: member.file_name.clone(),
                    });
                }
            }
        }

        ArchivePlan {
            dir: dir.to_path_buf(),
            holding_dir,
            actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::SystemTime;

    use super::*;
    use crate::version::parse_versioned;

    fn revision(dir: &str, name: &str) -> VersionedFile {
        VersionedFile::new(
            parse_versioned(name).unwrap(),
            name.to_string(),
            PathBuf::from(dir).join(name),
            SystemTime::now(),
        )
    }

    fn planner() -> ArchivePlanner {
        ArchivePlanner::new(&ScanConfig::default())
    }

    #[test]
    fn test_plan_moves_all_but_head() {
        let dir = PathBuf::from("/tree/docs");
        let plan = planner().plan(
            &dir,
            vec![
                revision("/tree/docs", "r_v1.0.txt"),
                revision("/tree/docs", "r_v3.0.txt"),
                revision("/tree/docs", "r_v2.0.txt"),
            ],
        );

        assert_eq!(plan.holding_dir, dir.join("_archive"));
        assert_eq!(plan.actions.len(), 2);
        assert!(plan.actions.iter().all(|a| matches!(
            a,
            ArchiveAction::Move { file_name, .. } if file_name != "r_v3.0.txt"
        )));
    }

    #[test]
    fn test_plan_ignores_singletons() {
        let dir = PathBuf::from("/tree");
        let plan = planner().plan(
            &dir,
            vec![
                revision("/tree", "alone_v1.0.txt"),
                revision("/tree", "other_v1.0.txt"),
            ],
        );
        assert!(plan.actions.is_empty());
    }

    #[test]
    fn test_plan_flags_exact_ties() {
        let dir = PathBuf::from("/tree");
        let plan = planner().plan(
            &dir,
            vec![
                revision("/tree", "Memo_v1.0.txt"),
                revision("/tree", "memo _v1.0.txt"),
                revision("/tree", "memo_v0.9.txt"),
            ],
        );

        assert_eq!(
            plan.actions,
            vec![
                ArchiveAction::VersionTie {
                    file_name: "memo _v1.0.txt".to_string(),
                    head_name: "Memo_v1.0.txt".to_string(),
                },
                ArchiveAction::Move {
                    source: PathBuf::from("/tree/memo_v0.9.txt"),
                    dest: dir.join("_archive").join("memo_v0.9.txt"),
                    file_name: "memo_v0.9.txt".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_plan_dest_preserves_filename() {
        let dir = PathBuf::from("/tree");
        let plan = planner().plan(
            &dir,
            vec![
                revision("/tree", "a_v1.0.txt"),
                revision("/tree", "a_v2.0.txt"),
            ],
        );
        match &plan.actions[0] {
            ArchiveAction::Move { dest, .. } => {
                assert_eq!(dest, &dir.join("_archive").join("a_v1.0.txt"));
            }
            other => panic!("expected Move, got {other:?}"),
        }
    }
}
