// src/metadata.rs
//!
//! File metadata model shared by local and content operations
//!

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use ts_rs::TS;

/// File or directory. Files carry their MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum FileKind {
    File {
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FileMetadata {
    /// Absolute path for local files, empty for content uris
    pub full_path: String,
    pub name: String,
    /// `file://` uri for local files, the content uri otherwise
    pub uri: String,
    /// Size in bytes (0 for directories)
    pub size: u64,
    pub kind: FileKind,
    /// Creation time (Unix timestamp in milliseconds), not every source has one
    pub created_at: Option<u64>,
    /// Last modified time (Unix timestamp in milliseconds)
    pub last_modified: u64,
}

impl FileMetadata {
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, FileKind::Directory)
    }
}

/// MIME type guessed from the file name, `application/octet-stream` when unknown.
pub fn mime_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .to_string()
}

pub(crate) fn to_millis(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis() as u64)
}

/// Creation time, when the platform reports one.
///
/// Older Android releases and several Linux filesystems do not, so callers
/// get `None` instead of a made-up value.
pub fn creation_time(metadata: &fs::Metadata) -> Option<u64> {
    metadata.created().ok().and_then(to_millis)
}

pub(crate) fn from_fs(path: &Path, file_uri: String, metadata: &fs::Metadata) -> FileMetadata {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let kind = if metadata.is_dir() {
        FileKind::Directory
    } else {
        FileKind::File {
            mime_type: mime_type_for(&name),
        }
    };

    FileMetadata {
        full_path: path.to_string_lossy().to_string(),
        name,
        uri: file_uri,
        size: if metadata.is_dir() { 0 } else { metadata.len() },
        kind,
        created_at: creation_time(metadata),
        last_modified: metadata.modified().ok().and_then(to_millis).unwrap_or(0),
    }
}
