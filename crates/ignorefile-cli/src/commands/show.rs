//! Show command implementation

use std::path::Path;

use ignorefile_fs::{render, RenderOptions};

use crate::error::Result;

/// Run the show command
///
/// Prints the rendered ignore file in its stored rule order.
pub fn run_show(path: &Path) -> Result<()> {
    let file = super::service().rules(path)?;

    let options = RenderOptions {
        trailing_newline: true,
        header_comment: None,
    };
    print!("{}", render(&file, &options));

    Ok(())
}
