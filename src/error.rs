// src/error.rs
//!
//! Error taxonomy shared by every public operation
//!

use serde::ser::SerializeStruct;
use serde::Serialize;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("Unable to resolve uri: {uri}")]
    Unresolvable { uri: String },

    #[error("File does not exist: {path}")]
    DoesNotExist { path: String },

    #[error("File already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Not a file: {path}")]
    NotAFile { path: String },

    #[error("Parent directory does not exist: {path}")]
    NoParentDirectory { path: String },

    #[error("Directory is not empty: {path}")]
    DirectoryNotEmpty { path: String },

    #[error("Cannot mix files and directories: {source_path} -> {destination}")]
    MixedFileAndDirectory {
        source_path: String,
        destination: String,
    },

    #[error("Destination already exists: {path}")]
    DestinationAlreadyExists { path: String },

    #[error("Operation '{operation}' is not supported for content uri: {uri}")]
    ContentSchemeUnsupported { operation: String, uri: String },

    #[error("Permission denied: {reason}")]
    PermissionDenied { reason: String },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("Unknown error: {reason}")]
    Unknown { reason: String },
}

pub type FsResult<T> = Result<T, FsError>;

impl FsError {
    /// Stable identifier of the error kind, used by the command layer.
    pub fn kind(&self) -> &'static str {
        match self {
            FsError::Unresolvable { .. } => "Unresolvable",
            FsError::DoesNotExist { .. } => "DoesNotExist",
            FsError::AlreadyExists { .. } => "AlreadyExists",
            FsError::NotADirectory { .. } => "NotADirectory",
            FsError::NotAFile { .. } => "NotAFile",
            FsError::NoParentDirectory { .. } => "NoParentDirectory",
            FsError::DirectoryNotEmpty { .. } => "DirectoryNotEmpty",
            FsError::MixedFileAndDirectory { .. } => "MixedFileAndDirectory",
            FsError::DestinationAlreadyExists { .. } => "DestinationAlreadyExists",
            FsError::ContentSchemeUnsupported { .. } => "ContentSchemeUnsupported",
            FsError::PermissionDenied { .. } => "PermissionDenied",
            FsError::InvalidArgument { .. } => "InvalidArgument",
            FsError::Io { .. } => "Io",
            FsError::Unknown { .. } => "Unknown",
        }
    }

    pub(crate) fn content_unsupported(operation: &str, uri: &str) -> Self {
        FsError::ContentSchemeUnsupported {
            operation: operation.to_string(),
            uri: uri.to_string(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        FsError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Remaps failures raised by the content layer.
    ///
    /// "Not found" becomes [`FsError::DoesNotExist`], "unsupported" becomes
    /// [`FsError::PermissionDenied`]; everything else passes through.
    pub fn from_content_io(e: io::Error, uri: &str) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => FsError::DoesNotExist {
                path: uri.to_string(),
            },
            io::ErrorKind::Unsupported => FsError::PermissionDenied {
                reason: format!("{uri}: {e}"),
            },
            _ => FsError::Io { source: e },
        }
    }

    /// Attaches a path to a local "not found" failure; other errors pass through.
    pub(crate) fn from_local_io(e: io::Error, path: &str) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => FsError::DoesNotExist {
                path: path.to_string(),
            },
            _ => FsError::Io { source: e },
        }
    }
}

impl From<fs_extra::error::Error> for FsError {
    fn from(e: fs_extra::error::Error) -> Self {
        let message = e.to_string();
        match e.kind {
            fs_extra::error::ErrorKind::Io(source) => FsError::Io { source },
            fs_extra::error::ErrorKind::NotFound => FsError::DoesNotExist { path: message },
            fs_extra::error::ErrorKind::AlreadyExists => {
                FsError::DestinationAlreadyExists { path: message }
            }
            fs_extra::error::ErrorKind::PermissionDenied => {
                FsError::PermissionDenied { reason: message }
            }
            _ => FsError::Unknown { reason: message },
        }
    }
}

impl Serialize for FsError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("FsError", 2)?;
        state.serialize_field("type", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
