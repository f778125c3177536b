mod cli;
mod commands;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use commands::RunOptions;

fn main() -> anyhow::Result<()> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    if cli.verbose {
        println!("Verbose mode enabled");
        println!("Dry run: {}", cli.dry_run);
    }

    let options = RunOptions::new(cli.verbose, cli.dry_run, cli.config.as_deref(), cli.no_config);

    match &cli.command {
        Commands::Archive { root } => {
            commands::Archive::execute(root, &options)
                .context("Failed to execute archive command")?;
        }
        Commands::TrainSync { root } => {
            commands::TrainSync::execute(root, &options)
                .context("Failed to execute train-sync command")?;
        }
    }

    Ok(())
}
