//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage ignore files with conflict detection and automatic repair
#[derive(Parser, Debug)]
#[command(name = "ignorefile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path of the ignore file to operate on
    #[arg(short, long, global = true, default_value = ".gitignore")]
    pub file: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a new empty ignore file
    Init,

    /// Add a pattern with conflict checking and smart placement
    ///
    /// The pattern is classified the same way file content is parsed:
    /// `*.log` becomes an extension rule, `build/**` a directory rule, and
    /// a leading `!` marks an exception.
    ///
    /// Examples:
    ///   ignorefile add 'build/**'
    ///   ignorefile add '!build/important.txt'
    ///   ignorefile add '*.log' --file .dockerignore
    Add {
        /// The pattern to add (prefix with '!' for an exception)
        pattern: String,
    },

    /// Remove the rule matching a pattern
    Remove {
        /// The pattern to remove
        pattern: String,
    },

    /// Move a rule relative to another rule
    Move {
        /// The pattern of the rule to move
        pattern: String,

        /// The pattern of the rule to position against
        #[arg(long)]
        target: String,

        /// Place the rule before the target instead of after it
        #[arg(long)]
        before: bool,
    },

    /// List conflicts without modifying the file
    Check {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Automatically repair conflicts
    Fix {
        /// Maximum number of repair passes
        #[arg(long, default_value_t = 20)]
        max_passes: usize,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the rendered ignore file
    Show,
}
