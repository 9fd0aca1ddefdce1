// src/content/mod.rs
//!
//! Content Reference Operations
//!
//! Content uris are owned by their provider. We can read them, describe
//! them, delete them and copy them out to a local file, nothing more.
//!

pub mod columns;
pub mod provider;

#[cfg(test)]
pub(crate) mod memory;

use std::fs::File;
use std::io::{self, Read};
use std::sync::Arc;

pub use provider::{ColumnRow, ColumnValue, ContentProvider, ContentRow};

use crate::error::{FsError, FsResult};
use crate::local;
use crate::location::{ContentUri, LocalKind, LocalUri};
use crate::metadata::{mime_type_for, FileKind, FileMetadata};
use crate::read::{ChunkStream, ChunkedReader, ReadOptions};

#[derive(Clone)]
pub struct ContentOps {
    provider: Arc<dyn ContentProvider>,
}

impl ContentOps {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        ContentOps { provider }
    }

    fn open(&self, uri: &ContentUri) -> FsResult<Box<dyn Read + Send>> {
        self.provider
            .open_input(uri)
            .map_err(|e| FsError::from_content_io(e, uri.as_str()))
    }

    fn query(&self, uri: &ContentUri) -> FsResult<Option<Box<dyn ContentRow>>> {
        self.provider
            .query(uri)
            .map_err(|e| FsError::from_content_io(e, uri.as_str()))
    }

    pub fn read_in_chunks(&self, uri: &ContentUri, options: &ReadOptions) -> FsResult<ChunkStream> {
        options.validate()?;
        // Size is only a hint for chunk sizing; a missing row is not fatal here.
        let available = self
            .query(uri)
            .ok()
            .flatten()
            .and_then(|row| columns::size(row.as_ref()));
        let stream = self.open(uri)?;
        ChunkedReader::new(stream, available, options)
    }

    pub fn read(&self, uri: &ContentUri, options: &ReadOptions) -> FsResult<String> {
        self.read_in_chunks(uri, options)?.concat()
    }

    pub fn metadata(&self, uri: &ContentUri) -> FsResult<FileMetadata> {
        let row = self.query(uri)?.ok_or_else(|| FsError::DoesNotExist {
            path: uri.to_string(),
        })?;
        let row = row.as_ref();

        let name = columns::display_name(row).unwrap_or_else(|| fallback_name(uri));
        let size = match columns::size(row) {
            Some(size) => size,
            None => {
                tracing::debug!(uri = %uri, "no size column, measuring stream");
                self.measure(uri)?
            }
        };
        let mime_type = self
            .provider
            .mime_type(uri)
            .unwrap_or_else(|| mime_type_for(&name));

        Ok(FileMetadata {
            full_path: String::new(),
            name,
            uri: uri.to_string(),
            size,
            kind: FileKind::File { mime_type },
            created_at: columns::created_at(row),
            last_modified: columns::last_modified(row).unwrap_or(0),
        })
    }

    fn measure(&self, uri: &ContentUri) -> FsResult<u64> {
        let mut stream = self.open(uri)?;
        Ok(io::copy(&mut stream, &mut io::sink())?)
    }

    pub fn delete(&self, uri: &ContentUri) -> FsResult<()> {
        let deleted = self
            .provider
            .delete(uri)
            .map_err(|e| FsError::from_content_io(e, uri.as_str()))?;
        if deleted == 0 {
            return Err(FsError::DoesNotExist {
                path: uri.to_string(),
            });
        }
        Ok(())
    }

    /// Copies the content into a local file, replacing an existing file.
    pub fn copy_to_local(&self, uri: &ContentUri, destination: &LocalUri) -> FsResult<()> {
        if destination.kind == LocalKind::Directory {
            return Err(FsError::MixedFileAndDirectory {
                source_path: uri.to_string(),
                destination: destination.display_path(),
            });
        }
        local::ensure_parent_exists(destination.path())?;

        let mut input = self.open(uri)?;
        let mut output = File::create(destination.path())?;
        let copied = io::copy(&mut input, &mut output)?;
        tracing::debug!(
            uri = %uri,
            destination = %destination.display_path(),
            bytes = copied,
            "copied content to local file"
        );
        Ok(())
    }
}

fn fallback_name(uri: &ContentUri) -> String {
    uri.as_str()
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("unknown")
        .to_string()
}
