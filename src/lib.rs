//! Uniform file access for the mobile host.
//!
//! A file is referenced either by a well-known folder alias plus a relative
//! path or by a raw uri (`file://`, `content://`, a bare path or a photo
//! picker's synthetic path). [`FileAccess`] resolves the reference and runs
//! the operation against the local filesystem or the platform's content
//! provider.

pub mod commands;
pub mod config;
pub mod content;
pub mod controller;
pub mod encoding;
pub mod error;
pub mod local;
pub mod location;
pub mod logging;
pub mod metadata;
pub mod read;


pub use config::FileAccessConfig;
pub use content::{ContentProvider, ContentRow};
pub use controller::FileAccess;
pub use encoding::Encoding;
pub use error::{FsError, FsResult};
pub use local::{SaveMode, SaveOptions};
pub use location::{FolderAlias, ResolvedUri, StorageRoots, UnresolvedUri};
pub use metadata::{FileKind, FileMetadata};
pub use read::{ChunkStream, ChunkedReader, ReadLength, ReadOptions};
