//! Archive plan execution
//!
//! Applies planned relocations with atomic renames. In preview mode
//! the same report lines and counters are produced with no mutation.

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::planner::{ArchiveAction, ArchivePlan};
use super::ArchiveResult;
use crate::error::{EngineError, Result};
use crate::report::ReportSink;

/// Executes archive plans.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveExecutor {
    preview: bool,
}

impl ArchiveExecutor {
    /// Create an executor; `preview` suppresses all mutation.
    #[must_use]
    pub const fn new(preview: bool) -> Self {
        Self { preview }
    }

    /// Apply one directory's plan, accumulating counters and per-file
    /// errors. A failed action never aborts the remaining ones.
    pub fn execute(
        &self,
        plan: &ArchivePlan,
        result: &mut ArchiveResult,
        sink: &mut dyn ReportSink,
    ) {
        let holding_name = plan
            .holding_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        for action in &plan.actions {
            match action {
                ArchiveAction::Move {
                    source,
                    dest,
                    file_name,
                } => {
                    if dest.exists() {
                        sink.append(&format!(
                            "  COLLISION: {file_name} already present in {holding_name}/"
                        ));
                        result
                            .errors
                            .push(EngineError::DestinationCollision(dest.clone()).to_string());
                        result.skipped += 1;
                        continue;
                    }

                    sink.append(&format!("  ARCHIVE: {file_name}  \u{2192}  {holding_name}/"));

                    if !self.preview {
                        if let Err(e) = Self::relocate(&plan.holding_dir, source, dest) {
                            result.errors.push(e.to_string());
                            result.skipped += 1;
                            continue;
                        }
                    }
                    result.moved += 1;
                }
                ArchiveAction::VersionTie {
                    file_name,
                    head_name,
                } => {
                    sink.append(&format!(
                        "  CONFLICT: {file_name} ties with {head_name}, left in place"
                    ));
                    result.errors.push(
                        EngineError::VersionTie {
                            file_name: file_name.clone(),
                            head_name: head_name.clone(),
                        }
                        .to_string(),
                    );
                    result.skipped += 1;
                }
            }
        }
    }

    fn relocate(holding_dir: &Path, source: &Path, dest: &Path) -> Result<()> {
        fs::create_dir_all(holding_dir).with_context(|| {
            format!("Failed to create holding area: {}", holding_dir.display())
        })?;
        fs::rename(source, dest).with_context(|| {
            format!(
                "Failed to move {} to {}",
                source.display(),
                dest.display()
            )
        })?;
        Ok(())
    }
}
