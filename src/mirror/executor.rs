//! Mirror plan execution
//!
//! Applies planned copies and evictions. Copies carry the source's
//! modification time so an unchanged tree produces a no-op next run.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;
use filetime::FileTime;

use super::planner::MirrorAction;
use super::MirrorResult;
use crate::error::{EngineError, Result};
use crate::report::ReportSink;

/// Executes mirror reconciliation plans.
#[derive(Debug, Clone, Copy)]
pub struct MirrorExecutor {
    preview: bool,
}

impl MirrorExecutor {
    /// Create an executor; `preview` suppresses all mutation.
    #[must_use]
    pub const fn new(preview: bool) -> Self {
        Self { preview }
    }

    /// Apply every action, accumulating counters and per-file errors.
    /// A failed action never aborts the remaining ones.
    pub fn execute(
        &self,
        actions: &[MirrorAction],
        result: &mut MirrorResult,
        sink: &mut dyn ReportSink,
    ) {
        for action in actions {
            match action {
                MirrorAction::Copy {
                    source,
                    dest,
                    file_name,
                    modified,
                } => {
                    sink.append(&format!("  ADD: {file_name}"));
                    if !self.preview {
                        if let Err(e) = Self::copy_into_mirror(source, dest, *modified) {
                            result.errors.push(e.to_string());
                            result.skipped += 1;
                            continue;
                        }
                    }
                    result.added += 1;
                }
                MirrorAction::Evict { dest, file_name } => {
                    sink.append(&format!("  REMOVE stale: {file_name}"));
                    if !self.preview {
                        if let Err(e) = fs::remove_file(dest).with_context(|| {
                            format!("Failed to remove stale copy: {}", dest.display())
                        }) {
                            result.errors.push(e.to_string());
                            result.skipped += 1;
                            continue;
                        }
                    }
                    result.removed += 1;
                }
                MirrorAction::VersionTie {
                    file_name,
                    head_name,
                } => {
                    sink.append(&format!(
                        "  CONFLICT: {file_name} ties with {head_name}, not evicted"
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

    fn copy_into_mirror(source: &Path, dest: &Path, modified: SystemTime) -> Result<()> {
        fs::copy(source, dest).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                source.display(),
                dest.display()
            )
        })?;
        // Keep the source mtime so repeat runs stay idempotent
        filetime::set_file_mtime(dest, FileTime::from_system_time(modified))
            .with_context(|| format!("Failed to set modification time: {}", dest.display()))?;
        Ok(())
    }
}
