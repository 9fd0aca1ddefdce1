// src/commands.rs
//!
//! Async command surface
//!
//! Thin wrappers the host's JS bridge calls. Each one moves the blocking
//! file operation onto tokio's blocking pool so the caller's runtime
//! threads never wait on disk or provider I/O.
//!

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ts_rs::TS;

use crate::controller::FileAccess;
use crate::encoding::Encoding;
use crate::error::{FsError, FsResult};
use crate::local::{SaveMode, SaveOptions};
use crate::location::UnresolvedUri;
use crate::metadata::FileMetadata;
use crate::read::{ReadLength, ReadOptions};

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReadFileRequest {
    pub uri: UnresolvedUri,
    /// `base64` or a charset label, defaults to `utf-8`
    pub encoding: Option<String>,
    pub offset: Option<u64>,
    /// Bytes to read after `offset`, defaults to the rest of the file
    pub length: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReadFileInChunksRequest {
    pub uri: UnresolvedUri,
    pub encoding: Option<String>,
    pub offset: Option<u64>,
    pub length: Option<u64>,
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReadFileResponse {
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WriteFileRequest {
    pub uri: UnresolvedUri,
    pub data: String,
    pub encoding: Option<String>,
    pub mode: Option<SaveMode>,
    /// Absent: a missing target is an error. `false` creates the file,
    /// `true` also creates its missing parent directories.
    pub create_if_missing: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PathRequest {
    pub uri: UnresolvedUri,
    pub recursive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransferRequest {
    pub from: UnresolvedUri,
    pub to: UnresolvedUri,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReadDirResponse {
    pub entries: Vec<FileMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GetUriResponse {
    pub uri: String,
}

// ============================================================================
// Helpers
// ============================================================================

async fn run_blocking<T, F>(task: F) -> FsResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> FsResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| FsError::Unknown {
            reason: format!("Blocking task failed: {e}"),
        })?
}

fn parse_encoding(label: Option<&str>) -> FsResult<Encoding> {
    label.map(Encoding::from_label).transpose().map(Option::unwrap_or_default)
}

fn read_options(
    access: &FileAccess,
    encoding: Option<&str>,
    offset: Option<u64>,
    length: Option<u64>,
) -> FsResult<ReadOptions> {
    Ok(access.read_options(
        parse_encoding(encoding)?,
        offset.unwrap_or(0),
        ReadLength::from(length),
    ))
}

// ============================================================================
// Commands
// ============================================================================

/// Read a whole file (or a byte range of it) as one string
pub async fn filesystem_read_file(
    access: Arc<FileAccess>,
    request: ReadFileRequest,
) -> Result<ReadFileResponse, FsError> {
    run_blocking(move || {
        let options = read_options(
            &access,
            request.encoding.as_deref(),
            request.offset,
            request.length,
        )?;
        let data = access.read_file(&request.uri, &options)?;
        Ok(ReadFileResponse { data })
    })
    .await
}

/// Read a file chunk by chunk, handing each chunk to `on_chunk` as soon as
/// it is read. Returns the number of chunks delivered.
pub async fn filesystem_read_file_in_chunks<F>(
    access: Arc<FileAccess>,
    request: ReadFileInChunksRequest,
    mut on_chunk: F,
) -> Result<usize, FsError>
where
    F: FnMut(String) + Send + 'static,
{
    run_blocking(move || {
        let mut options = read_options(
            &access,
            request.encoding.as_deref(),
            request.offset,
            request.length,
        )?;
        options.chunk_size = request.chunk_size;

        let mut delivered = 0;
        for chunk in access.read_file_in_chunks(&request.uri, &options)? {
            on_chunk(chunk?);
            delivered += 1;
        }
        Ok(delivered)
    })
    .await
}

/// Write (or append) string data to a file
pub async fn filesystem_write_file(
    access: Arc<FileAccess>,
    request: WriteFileRequest,
) -> Result<(), FsError> {
    run_blocking(move || {
        let options = SaveOptions {
            encoding: parse_encoding(request.encoding.as_deref())?,
            mode: request.mode.unwrap_or_default(),
            create_if_missing: request.create_if_missing,
        };
        access.save_file(&request.uri, &request.data, &options)
    })
    .await
}

/// Create an empty file
pub async fn filesystem_create_file(
    access: Arc<FileAccess>,
    request: PathRequest,
) -> Result<(), FsError> {
    run_blocking(move || access.create_file(&request.uri, request.recursive.unwrap_or(false))).await
}

/// Create a directory
pub async fn filesystem_mkdir(
    access: Arc<FileAccess>,
    request: PathRequest,
) -> Result<(), FsError> {
    run_blocking(move || {
        access.create_directory(&request.uri, request.recursive.unwrap_or(false))
    })
    .await
}

/// Remove a file or directory
pub async fn filesystem_remove(
    access: Arc<FileAccess>,
    request: PathRequest,
) -> Result<(), FsError> {
    run_blocking(move || access.delete(&request.uri, request.recursive.unwrap_or(false))).await
}

/// Read directory contents
pub async fn filesystem_read_dir(
    access: Arc<FileAccess>,
    uri: UnresolvedUri,
) -> Result<ReadDirResponse, FsError> {
    run_blocking(move || {
        Ok(ReadDirResponse {
            entries: access.list_directory(&uri)?,
        })
    })
    .await
}

/// Get file/directory metadata
pub async fn filesystem_stat(
    access: Arc<FileAccess>,
    uri: UnresolvedUri,
) -> Result<FileMetadata, FsError> {
    run_blocking(move || access.metadata(&uri)).await
}

/// Resolve a reference to its `file://` or `content://` uri
pub async fn filesystem_get_uri(
    access: Arc<FileAccess>,
    uri: UnresolvedUri,
) -> Result<GetUriResponse, FsError> {
    run_blocking(move || Ok(GetUriResponse { uri: access.get_uri(&uri)? })).await
}

/// Copy a file or directory
pub async fn filesystem_copy(
    access: Arc<FileAccess>,
    request: TransferRequest,
) -> Result<(), FsError> {
    run_blocking(move || access.copy(&request.from, &request.to)).await
}

/// Rename/move a file or directory
pub async fn filesystem_rename(
    access: Arc<FileAccess>,
    request: TransferRequest,
) -> Result<(), FsError> {
    run_blocking(move || access.rename(&request.from, &request.to)).await
}
