//! Filename version grammar recognizers
//!
//! Two independent recognizers over bare filenames:
//! - plain: `<base>` + whitespace/underscore + `v<major>.<minor>` +
//!   `<suffix>` + `.<ext>` (e.g. `Project Name v1.2.docx`,
//!   `company_report_V3.10_draft.xlsx`)
//! - training: same shape with a case-insensitive `TRAIN` tag before
//!   the version marker (e.g. `dataset_TRAIN_v2.0.csv`)
//!
//! A filename may match one, both, or neither; no match means the file
//! does not exist as far as grouping is concerned.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::SystemTime;

use regex::Regex;

/// Matches: base [space or _] v major . minor [suffix] .ext
const VERSION_PATTERN: &str = r"^(.+?)[\s_]+[vV](\d+)\.(\d+)(.*?)(\.[^.]+)$";

/// Same shape with a mandatory TRAIN tag before the version marker.
const TRAINING_PATTERN: &str = r"(?i)^(.+?)[\s_]TRAIN[\s_]v(\d+)\.(\d+)(.*?)(\.[^.]+)$";

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is valid"))
}

fn training_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TRAINING_PATTERN).expect("training pattern is valid"))
}

/// Identity of a logical document: revisions with equal keys belong to
/// the same document regardless of which revision is newest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    /// Base name, lowercased for comparison
    pub base: String,
    /// Extension, lowercase, with leading dot
    pub extension: String,
}

/// Structured fields recovered from a filename by one recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    /// Document name, trimmed, case preserved for display
    pub base: String,
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
    /// Free text between the minor version and the extension, verbatim
    pub suffix: String,
    /// Extension, lowercased, includes the leading dot
    pub extension: String,
}

/// One file on disk recognized as a document revision.
///
/// Only constructed from filenames that matched a grammar; unmatched
/// files are never represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedFile {
    /// Document name, trimmed, case preserved for display
    pub base: String,
    /// Extension, lowercased, includes the leading dot
    pub extension: String,
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
    /// Free text between the minor version and the extension
    pub suffix: String,
    /// Bare filename as found on disk
    pub file_name: String,
    /// Absolute path at discovery time
    pub source_path: PathBuf,
    /// Last-write timestamp (used only by the mirror policy)
    pub modified: SystemTime,
}

impl VersionedFile {
    /// Build a revision record from parsed name fields plus discovery
    /// metadata.
    #[must_use]
    pub fn new(
        parts: NameParts,
        file_name: String,
        source_path: PathBuf,
        modified: SystemTime,
    ) -> Self {
        Self {
            base: parts.base,
            extension: parts.extension,
            major: parts.major,
            minor: parts.minor,
            suffix: parts.suffix,
            file_name,
            source_path,
            modified,
        }
    }

    /// Identity of the logical document this revision belongs to.
    #[must_use]
    pub fn key(&self) -> DocumentKey {
        DocumentKey {
            base: self.base.to_lowercase(),
            extension: self.extension.clone(),
        }
    }

    /// Version pair for ordering; compared as integers, so `v2.0`
    /// outranks `v1.99`.
    #[must_use]
    pub const fn version(&self) -> (u32, u32) {
        (self.major, self.minor)
    }
}

fn parts_from_captures(caps: &regex::Captures<'_>) -> Option<NameParts> {
    Some(NameParts {
        base: caps[1].trim().to_string(),
        major: caps[2].parse().ok()?,
        minor: caps[3].parse().ok()?,
        suffix: caps[4].to_string(),
        extension: caps[5].to_lowercase(),
    })
}

/// Try to recognize a filename under the plain version grammar.
///
/// Returns `None` when the name does not fit; this is not an error.
/// The base match is non-greedy from the left, so the first plausible
/// `<separator>v<digits>.<digits>` boundary wins. A filename carrying
/// an earlier version-like token inside its base (rare in practice)
/// splits at that token; this is a known ambiguity of the grammar.
#[must_use]
pub fn parse_versioned(file_name: &str) -> Option<NameParts> {
    let caps = version_re().captures(file_name)?;
    parts_from_captures(&caps)
}

/// Try to recognize a filename under the TRAIN-tagged grammar.
///
/// Files without the tag are invisible to the mirror policy even when
/// they match the plain grammar.
#[must_use]
pub fn parse_training(file_name: &str) -> Option<NameParts> {
    let caps = training_re().captures(file_name)?;
    parts_from_captures(&caps)
}
