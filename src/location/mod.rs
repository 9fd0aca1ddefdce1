// src/location/mod.rs
//!
//! Location Module
//!
//! Turns what the caller hands us (a folder alias plus path, or a raw uri)
//! into a typed reference the operations can dispatch on.
//!

pub mod alias;
pub mod resolver;
pub mod roots;


use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use ts_rs::TS;

pub use alias::FolderAlias;
pub use resolver::UriResolver;
pub use roots::StorageRoots;

/// A reference exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UnresolvedUri {
    /// When set, `path` is relative to this root and never parsed as a uri
    pub directory: Option<FolderAlias>,
    pub path: String,
}

impl UnresolvedUri {
    pub fn new(directory: Option<FolderAlias>, path: impl Into<String>) -> Self {
        UnresolvedUri {
            directory,
            path: path.into(),
        }
    }

    pub fn in_folder(directory: FolderAlias, path: impl Into<String>) -> Self {
        Self::new(Some(directory), path)
    }

    pub fn raw(uri: impl Into<String>) -> Self {
        Self::new(None, uri)
    }
}

/// Provider-owned identifier (`content://...`), kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri(String);

impl ContentUri {
    pub(crate) fn new(uri: impl Into<String>) -> Self {
        ContentUri(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of probing a local path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalKind {
    File,
    Directory,
    /// Missing, or its type could not be probed
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalUri {
    pub full_path: PathBuf,
    /// `file://` form of `full_path`
    pub file_uri: String,
    pub kind: LocalKind,
    pub in_external_storage: bool,
}

impl LocalUri {
    pub fn path(&self) -> &Path {
        &self.full_path
    }

    pub fn display_path(&self) -> String {
        self.full_path.to_string_lossy().to_string()
    }

    pub fn exists(&self) -> bool {
        self.kind != LocalKind::Unknown
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedUri {
    Content(ContentUri),
    Local(LocalUri),
}

impl ResolvedUri {
    /// Short description for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            ResolvedUri::Content(uri) => uri.to_string(),
            ResolvedUri::Local(local) => local.display_path(),
        }
    }
}
