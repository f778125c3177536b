//! # rdcsync
//!
//! Core library for the RDC version archive and AI-training sync tool.
//!
//! This library recognizes versioned document filenames
//! (`<base> v<major>.<minor><suffix>.<ext>`), groups files into
//! revisions of the same logical document, and applies one of two
//! policies: archive superseded revisions into per-directory
//! `_archive/` folders, or mirror the latest TRAIN-tagged revisions
//! into a single training directory at the tree root.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod config;
pub mod error;
pub mod grouping;
pub mod mirror;
pub mod report;
pub mod scanner;
pub mod version;

pub use archive::{run_archive, ArchiveResult};
pub use config::ScanConfig;
pub use mirror::{run_mirror_sync, MirrorResult};
pub use report::{MemorySink, NullSink, ReportSink, StdoutSink};
