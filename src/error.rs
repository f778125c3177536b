//! Error types for the rdcsync engines

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Named failure conditions surfaced by the archive and mirror engines.
///
/// Filename grammar mismatches are not errors; unrecognized files are
/// simply invisible to both policies.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The root path is missing or not a directory. The invocation
    /// fails before any traversal begins and nothing is written.
    #[error("root path is not a directory: {0}")]
    InvalidRoot(PathBuf),

    /// The holding area or mirror already contains a file with the
    /// incoming name. The file is left in place and the run continues.
    #[error("destination already occupied: {0}")]
    DestinationCollision(PathBuf),

    /// Two revisions of one document carry the same major.minor pair.
    /// Neither can be declared superseded, so the extra copy is left
    /// alone and reported instead of being archived or evicted.
    #[error("version tie: {file_name} carries the same version as {head_name}")]
    VersionTie {
        /// The tied non-head member's filename
        file_name: String,
        /// The filename selected as the group head
        head_name: String,
    },
}
