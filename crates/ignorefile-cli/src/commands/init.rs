//! Init command implementation

use std::path::Path;

use colored::Colorize;

use crate::error::Result;

/// Run the init command
///
/// Creates an empty ignore file at the given path, overwriting any existing
/// content.
pub fn run_init(path: &Path) -> Result<()> {
    super::service().init(path)?;

    println!("{} Created {}", "OK".green().bold(), path.display());
    Ok(())
}
