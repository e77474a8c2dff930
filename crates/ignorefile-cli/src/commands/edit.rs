//! Add, remove, and move command implementations

use std::path::Path;

use colored::Colorize;
use ignorefile_core::MoveDirection;

use crate::error::Result;

/// Run the add command
///
/// Parses the pattern into a typed rule and inserts it with conflict
/// checking; prints the insertion and every repair the fixer applied.
pub fn run_add(path: &Path, pattern: &str) -> Result<()> {
    println!("{} Adding rule: {}", "=>".blue().bold(), pattern.cyan());

    let results = super::service().add_pattern(path, pattern)?;
    for result in &results {
        println!("   {} {}", "-".cyan(), result.log());
    }

    println!("{} Rule '{}' added.", "OK".green().bold(), pattern);
    Ok(())
}

/// Run the remove command
pub fn run_remove(path: &Path, pattern: &str) -> Result<()> {
    println!("{} Removing rule: {}", "=>".blue().bold(), pattern.cyan());

    let result = super::service().delete_pattern(path, pattern)?;
    println!("   {} {}", "-".cyan(), result.log());

    println!("{} Rule '{}' removed.", "OK".green().bold(), pattern);
    Ok(())
}

/// Run the move command
///
/// Positions the rule matching `pattern` before or after the rule matching
/// `target`.
pub fn run_move(path: &Path, pattern: &str, target: &str, before: bool) -> Result<()> {
    let direction = if before {
        MoveDirection::Before
    } else {
        MoveDirection::After
    };

    match super::service().move_rule(path, pattern, target, direction)? {
        Some(result) => {
            println!("   {} {}", "-".cyan(), result.log());
            println!("{} Rule '{}' moved.", "OK".green().bold(), pattern);
        }
        None => {
            println!("{} Rule '{}' already in place.", "OK".green().bold(), pattern);
        }
    }

    Ok(())
}
