//! Training manifest rendering
//!
//! The manifest records what the mirror holds after a run: a header
//! with the run timestamp and document count, then one line per
//! document pointing back at its source. It is assembled fully in
//! memory and written in one shot, replacing the previous run's file.

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::Local;

use crate::error::Result;

/// Render the manifest body for the given per-document lines.
#[must_use]
pub fn render_manifest(lines: &[String], timestamp: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("RDC AI Training Manifest \u{2014} {timestamp}\n"));
    out.push_str(&format!("Files: {}\n\n", lines.len()));
    out.push_str(&lines.join("\n"));
    out.push('\n');
    out
}

/// Overwrite the manifest file inside the mirror directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_manifest(mirror_dir: &Path, file_name: &str, lines: &[String]) -> Result<()> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M").to_string();
    let rendered = render_manifest(lines, &timestamp);
    let path = mirror_dir.join(file_name);
    fs::write(&path, rendered)
        .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
    Ok(())
}
