//! Command implementations for ignorefile-cli

pub mod analyze;
pub mod edit;
pub mod init;
pub mod show;

pub use analyze::{run_check, run_fix};
pub use edit::{run_add, run_move, run_remove};
pub use init::run_init;
pub use show::run_show;

use ignorefile_fs::{FileRepository, RenderOptions, Service};

/// Service wired to the standard on-disk representation.
pub(crate) fn service() -> Service<FileRepository> {
    Service::new(FileRepository::new(RenderOptions {
        trailing_newline: true,
        header_comment: None,
    }))
}
