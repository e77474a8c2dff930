//! File-based persistence for ignore files.
//!
//! [`Repository`] abstracts where ignore files live; [`FileRepository`] is
//! the filesystem implementation. Saves stage the full content into a
//! sibling swap file and publish it with a single rename, so a crashed
//! writer never leaves a half-written ignore file behind.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use fs2::FileExt;
use ignorefile_core::IgnoreFile;

use crate::error::{Error, Result};
use crate::parser;
use crate::renderer::{self, RenderOptions};

/// Load/save abstraction over ignore file storage.
pub trait Repository {
    /// Read and parse the ignore file at `path`.
    fn load(&self, path: &Path) -> Result<IgnoreFile>;

    /// Render and write `file` to `path`, replacing any existing content.
    fn save(&self, path: &Path, file: &IgnoreFile) -> Result<()>;
}

/// Filesystem-backed [`Repository`].
#[derive(Debug, Clone, Default)]
pub struct FileRepository {
    options: RenderOptions,
}

impl FileRepository {
    /// Create a repository that saves with the given rendering options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Repository for FileRepository {
    fn load(&self, path: &Path) -> Result<IgnoreFile> {
        let mut file = File::open(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|source| Error::FileRead {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(parser::parse(&content))
    }

    fn save(&self, path: &Path, file: &IgnoreFile) -> Result<()> {
        let content = renderer::render(file, &self.options);
        save_atomic(path, content.as_bytes())
    }
}

/// Replace `path` with `content` without ever exposing a partial file.
///
/// The content is staged into a swap file and published by renaming it over
/// the target. The swap file must be a sibling of the target (rename cannot
/// cross filesystems) and carries the process id in its name, so two
/// processes saving the same path stage independently and the last rename
/// wins whole, never interleaved.
fn save_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::FileCreate {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let swap_path = path.with_file_name(format!("{file_name}.swap-{}", std::process::id()));

    let published = stage(&swap_path, content).and_then(|()| {
        fs::rename(&swap_path, path).map_err(|source| Error::FileCreate {
            path: path.to_path_buf(),
            source,
        })
    });

    if published.is_err() {
        // Best effort; an orphaned swap file is only clutter.
        let _ = fs::remove_file(&swap_path);
    }

    published
}

/// Write and flush the swap file under an exclusive advisory lock.
///
/// The lock is non-blocking (a contended swap file fails the save rather
/// than queueing) and is released when the handle drops.
fn stage(swap_path: &Path, content: &[u8]) -> Result<()> {
    let mut swap = File::create(swap_path).map_err(|source| Error::FileCreate {
        path: swap_path.to_path_buf(),
        source,
    })?;

    swap.try_lock_exclusive().map_err(|_| Error::LockFailed {
        path: swap_path.to_path_buf(),
    })?;

    swap.write_all(content).map_err(|source| Error::FileCreate {
        path: swap_path.to_path_buf(),
        source,
    })?;

    swap.sync_all().map_err(|source| Error::FileCreate {
        path: swap_path.to_path_buf(),
        source,
    })
}
