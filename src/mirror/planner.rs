//! Mirror reconciliation planning
//!
//! Reads the mirror's current state and decides, per document group,
//! what the executor must do. All mirror reads happen here, before any
//! mutation, so the plan rests on one consistent snapshot.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;

use crate::error::Result;
use crate::grouping::VersionGroup;

/// One planned step for the mirror executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorAction {
    /// Copy a group head into the mirror, carrying its mtime along.
    Copy {
        /// Source revision path
        source: PathBuf,
        /// Target path inside the mirror, same filename
        dest: PathBuf,
        /// Bare filename, for reporting
        file_name: String,
        /// Source last-write time to stamp onto the copy
        modified: SystemTime,
    },
    /// Delete a superseded filename from the mirror.
    Evict {
        /// The stale mirror entry
        dest: PathBuf,
        /// Bare filename, for reporting
        file_name: String,
    },
    /// A non-head revision carries the head's exact version; it is
    /// reported and the mirror is left as it is.
    VersionTie {
        /// The tied revision's filename
        file_name: String,
        /// The selected head's filename
        head_name: String,
    },
}

/// A reconciliation plan plus the manifest it implies.
#[derive(Debug, Clone, Default)]
pub struct MirrorOutcome {
    /// Steps in group order
    pub actions: Vec<MirrorAction>,
    /// One line per document head, whether or not it needed copying
    pub manifest_lines: Vec<String>,
    /// Mirror-state reads that failed; those documents are skipped
    pub errors: Vec<String>,
}

/// Builds the reconciliation plan for one run.
#[derive(Debug, Clone)]
pub struct MirrorPlanner<'a> {
    mirror_dir: &'a Path,
}

impl<'a> MirrorPlanner<'a> {
    /// Create a planner targeting the given mirror directory.
    #[must_use]
    pub const fn new(mirror_dir: &'a Path) -> Self {
        Self { mirror_dir }
    }

    /// Decide actions for every group.
    ///
    /// The head is copied when the mirror lacks its filename or holds
    /// a strictly older copy. Non-head filenames found in the mirror
    /// are evicted, except exact version ties, which are flagged.
    #[must_use]
    pub fn plan(&self, groups: &[VersionGroup]) -> MirrorOutcome {
        let mut outcome = MirrorOutcome::default();

        for group in groups {
            let head = group.head();
            let dest = self.mirror_dir.join(&head.file_name);

            match Self::mirror_mtime(&dest) {
                Ok(current) => {
                    let outdated = current.is_none_or(|mirrored| head.modified > mirrored);
                    if outdated {
                        outcome.actions.push(MirrorAction::Copy {
                            source: head.source_path.clone(),
                            dest,
                            file_name: head.file_name.clone(),
                            modified: head.modified,
                        });
                    }
                }
                Err(e) => {
                    outcome.errors.push(e.to_string());
                    continue;
                }
            }

            outcome.manifest_lines.push(format!(
                "{}  \u{2190}  {}",
                head.file_name,
                head.source_path.display()
            ));

            for member in group.stale() {
                if group.ties_with_head(member) {
                    outcome.actions.push(MirrorAction::VersionTie {
                        file_name: member.file_name.clone(),
                        head_name: head.file_name.clone(),
                    });
                    continue;
                }
                let stale = self.mirror_dir.join(&member.file_name);
                if stale.exists() {
                    outcome.actions.push(MirrorAction::Evict {
                        dest: stale,
                        file_name: member.file_name.clone(),
                    });
                }
            }
        }

        outcome
    }

    /// Modification time of an existing mirror entry, `None` when the
    /// filename is absent.
    fn mirror_mtime(path: &Path) -> Result<Option<SystemTime>> {
        if !path.exists() {
            return Ok(None);
        }
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for: {}", path.display()))?;
        let modified = metadata
            .modified()
            .with_context(|| format!("Failed to get modification time for: {}", path.display()))?;
        Ok(Some(modified))
    }
}
