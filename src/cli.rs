use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RDC Version Archive & Training Sync Tool
///
/// Recognize versioned document filenames, archive superseded revisions
/// per directory, or mirror the latest TRAIN-tagged revisions into the
/// AI-training directory at the tree root
#[derive(Parser, Debug)]
#[command(name = "rdcsync")]
#[command(long_about = None, version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preview changes without executing (dry-run)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files and use built-in defaults
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Move superseded document revisions into per-directory _archive/ folders
    Archive {
        /// Root folder to scan
        root: PathBuf,
    },

    /// Mirror the latest TRAIN-tagged revisions into the AI-training directory
    TrainSync {
        /// Root folder to scan
        root: PathBuf,
    },
}
