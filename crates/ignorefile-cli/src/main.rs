//! ignorefile CLI
//!
//! Command-line interface for managing ignore files with conflict detection
//! and automatic repair.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let path = cli.file;

    match cli.command {
        Some(Commands::Init) => commands::run_init(&path),
        Some(Commands::Add { pattern }) => commands::run_add(&path, &pattern),
        Some(Commands::Remove { pattern }) => commands::run_remove(&path, &pattern),
        Some(Commands::Move {
            pattern,
            target,
            before,
        }) => commands::run_move(&path, &pattern, &target, before),
        Some(Commands::Check { json }) => commands::run_check(&path, json),
        Some(Commands::Fix { max_passes, json }) => commands::run_fix(&path, max_passes, json),
        Some(Commands::Show) => commands::run_show(&path),
        None => {
            println!("{} ignore file manager", "ignorefile".green().bold());
            println!();
            println!("Run {} for available commands.", "ignorefile --help".cyan());
            Ok(())
        }
    }
}
