// src/local/mod.rs
//!
//! Local File Operations
//!
//! Operates on paths the resolver already classified as local. The probed
//! kind on the [`LocalUri`] is trusted, so resolve right before calling.
//!

pub mod transfer;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use ts_rs::TS;

pub use transfer::{copy, rename};

use crate::encoding::Encoding;
use crate::error::{FsError, FsResult};
use crate::location::{LocalKind, LocalUri};
use crate::metadata::{self, FileMetadata};
use crate::read::{ChunkStream, ChunkedReader, ReadOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum SaveMode {
    /// Truncate and replace existing content
    #[default]
    Write,
    /// Keep existing bytes and add to the end
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub encoding: Encoding,
    pub mode: SaveMode,
    /// `None` refuses to create a missing target. `Some(recursive)` creates
    /// it, along with missing parent directories when `recursive` is set.
    pub create_if_missing: Option<bool>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            encoding: Encoding::default(),
            mode: SaveMode::Write,
            create_if_missing: None,
        }
    }
}

// ============================================================================
// Precondition Helpers
// ============================================================================

pub(crate) fn does_not_exist(local: &LocalUri) -> FsError {
    FsError::DoesNotExist {
        path: local.display_path(),
    }
}

/// Fails with [`FsError::NoParentDirectory`] unless the parent of `path` is
/// an existing directory.
pub(crate) fn ensure_parent_exists(path: &Path) -> FsResult<()> {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() || parent.is_dir() => Ok(()),
        None => Ok(()),
        Some(parent) => Err(FsError::NoParentDirectory {
            path: parent.to_string_lossy().to_string(),
        }),
    }
}

fn prepare_parent(path: &Path, recursive: bool) -> FsResult<()> {
    if recursive {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        return Ok(());
    }
    ensure_parent_exists(path)
}

// ============================================================================
// Create / Delete
// ============================================================================

pub fn create_file(local: &LocalUri, recursive: bool) -> FsResult<()> {
    if local.exists() {
        return Err(FsError::AlreadyExists {
            path: local.display_path(),
        });
    }
    prepare_parent(local.path(), recursive)?;
    File::create_new(local.path()).map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists {
            path: local.display_path(),
        },
        _ => FsError::Io { source: e },
    })?;
    Ok(())
}

pub fn create_directory(local: &LocalUri, recursive: bool) -> FsResult<()> {
    if local.exists() {
        return Err(FsError::AlreadyExists {
            path: local.display_path(),
        });
    }
    if recursive {
        fs::create_dir_all(local.path())?;
    } else {
        ensure_parent_exists(local.path())?;
        fs::create_dir(local.path())?;
    }
    Ok(())
}

pub fn delete(local: &LocalUri, recursive: bool) -> FsResult<()> {
    match local.kind {
        LocalKind::Unknown => Err(does_not_exist(local)),
        LocalKind::File => fs::remove_file(local.path())
            .map_err(|e| FsError::from_local_io(e, &local.display_path())),
        LocalKind::Directory if recursive => fs::remove_dir_all(local.path())
            .map_err(|e| FsError::from_local_io(e, &local.display_path())),
        LocalKind::Directory => {
            if fs::read_dir(local.path())?.next().is_some() {
                return Err(FsError::DirectoryNotEmpty {
                    path: local.display_path(),
                });
            }
            fs::remove_dir(local.path())
                .map_err(|e| FsError::from_local_io(e, &local.display_path()))
        }
    }
}

// ============================================================================
// Read / Save
// ============================================================================

pub fn read_in_chunks(local: &LocalUri, options: &ReadOptions) -> FsResult<ChunkStream> {
    options.validate()?;
    match local.kind {
        LocalKind::Unknown => return Err(does_not_exist(local)),
        LocalKind::Directory => {
            return Err(FsError::NotAFile {
                path: local.display_path(),
            })
        }
        LocalKind::File => {}
    }
    let file = File::open(local.path())
        .map_err(|e| FsError::from_local_io(e, &local.display_path()))?;
    let available = file.metadata().ok().map(|m| m.len());
    ChunkedReader::new(Box::new(file), available, options)
}

pub fn read(local: &LocalUri, options: &ReadOptions) -> FsResult<String> {
    read_in_chunks(local, options)?.concat()
}

/// Writes `data` (in its `options.encoding` form) to the file.
///
/// A missing target is only created when `options.create_if_missing` opts
/// in, otherwise the save fails with [`FsError::DoesNotExist`].
pub fn save(local: &LocalUri, data: &str, options: &SaveOptions) -> FsResult<()> {
    if local.kind == LocalKind::Directory {
        return Err(FsError::NotAFile {
            path: local.display_path(),
        });
    }
    // Decode before touching the file so bad input leaves it alone.
    let bytes = options.encoding.decode_str(data)?;

    if !local.exists() {
        match options.create_if_missing {
            None => return Err(does_not_exist(local)),
            Some(recursive) => prepare_parent(local.path(), recursive)?,
        }
    }

    let mut file = match options.mode {
        SaveMode::Write => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(local.path())?,
        SaveMode::Append => OpenOptions::new()
            .append(true)
            .create(true)
            .open(local.path())?,
    };
    file.write_all(&bytes)?;
    file.flush()?;
    tracing::debug!(
        path = %local.display_path(),
        bytes = bytes.len(),
        mode = ?options.mode,
        "saved file"
    );
    Ok(())
}

// ============================================================================
// Metadata / Listing
// ============================================================================

pub fn metadata(local: &LocalUri) -> FsResult<FileMetadata> {
    if !local.exists() {
        return Err(does_not_exist(local));
    }
    let stat = fs::metadata(local.path())
        .map_err(|e| FsError::from_local_io(e, &local.display_path()))?;
    Ok(metadata::from_fs(local.path(), local.file_uri.clone(), &stat))
}

/// Lists a directory: directories first, then files, both by name.
pub fn list(local: &LocalUri) -> FsResult<Vec<FileMetadata>> {
    match local.kind {
        LocalKind::Unknown => return Err(does_not_exist(local)),
        LocalKind::File => {
            return Err(FsError::NotADirectory {
                path: local.display_path(),
            })
        }
        LocalKind::Directory => {}
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(local.path())? {
        let entry = entry?;
        let path = entry.path();
        // Entries can vanish between read_dir and stat
        let Ok(stat) = fs::metadata(&path) else {
            tracing::warn!(path = %path.display(), "skipping entry that could not be read");
            continue;
        };
        let file_uri = url::Url::from_file_path(&path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("file://{}", path.to_string_lossy()));
        entries.push(metadata::from_fs(&path, file_uri, &stat));
    }

    entries.sort_by(|a, b| match (a.is_directory(), b.is_directory()) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });

    Ok(entries)
}
