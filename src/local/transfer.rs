// src/local/transfer.rs
//!
//! Copy and move between local paths
//!

use fs_extra::dir::CopyOptions;
use std::fs;
use std::path::Path;

use super::{does_not_exist, ensure_parent_exists};
use crate::error::{FsError, FsResult};
use crate::location::{LocalKind, LocalUri};

#[derive(Debug, PartialEq, Eq)]
enum Transfer {
    /// Source and destination are the same path
    Noop,
    Proceed,
}

/// Checks shared by copy and move.
///
/// The source must exist, files and directories never mix (in either
/// direction), an existing destination directory is never merged into and
/// the destination's parent must already exist.
fn check_transfer(source: &LocalUri, destination: &LocalUri) -> FsResult<Transfer> {
    if !source.exists() {
        return Err(does_not_exist(source));
    }
    if source.full_path == destination.full_path {
        return Ok(Transfer::Noop);
    }
    match (source.kind, destination.kind) {
        (LocalKind::File, LocalKind::Directory) | (LocalKind::Directory, LocalKind::File) => {
            return Err(FsError::MixedFileAndDirectory {
                source_path: source.display_path(),
                destination: destination.display_path(),
            })
        }
        (LocalKind::Directory, LocalKind::Directory) => {
            return Err(FsError::DestinationAlreadyExists {
                path: destination.display_path(),
            })
        }
        _ => {}
    }
    ensure_parent_exists(destination.path())?;
    Ok(Transfer::Proceed)
}

fn copy_directory(source: &Path, destination: &Path) -> FsResult<()> {
    let mut options = CopyOptions::new();
    options.content_only = true;
    fs_extra::dir::copy(source, destination, &options)?;
    Ok(())
}

/// Copies a file over a file, or a directory tree to a new directory.
///
/// A failure halfway through a directory copy leaves what was already copied.
pub fn copy(source: &LocalUri, destination: &LocalUri) -> FsResult<()> {
    if check_transfer(source, destination)? == Transfer::Noop {
        return Ok(());
    }
    match source.kind {
        LocalKind::Directory => copy_directory(source.path(), destination.path())?,
        _ => {
            fs::copy(source.path(), destination.path())?;
        }
    }
    tracing::debug!(from = %source.display_path(), to = %destination.display_path(), "copied");
    Ok(())
}

/// Moves a file or directory. Falls back to copy-then-delete when the
/// atomic rename is refused (e.g. across mount points).
pub fn rename(source: &LocalUri, destination: &LocalUri) -> FsResult<()> {
    if check_transfer(source, destination)? == Transfer::Noop {
        return Ok(());
    }

    let Err(e) = fs::rename(source.path(), destination.path()) else {
        return Ok(());
    };
    tracing::warn!(
        from = %source.display_path(),
        to = %destination.display_path(),
        error = %e,
        "rename failed, falling back to copy and delete"
    );

    match source.kind {
        LocalKind::Directory => {
            copy_directory(source.path(), destination.path())?;
            fs::remove_dir_all(source.path())?;
        }
        _ => {
            fs::copy(source.path(), destination.path())?;
            fs::remove_file(source.path())?;
        }
    }
    Ok(())
}
