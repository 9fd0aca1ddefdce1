// src/controller.rs
//!
//! File access facade
//!
//! Every public operation resolves its references first and then hands off
//! to the local or content operations. Cross-cutting rules live here:
//! content uris cannot be created, written, listed or moved, and content
//! can only ever be copied *to* a local path.
//!

use std::sync::Arc;

use crate::config::FileAccessConfig;
use crate::content::{ContentOps, ContentProvider};
use crate::encoding::Encoding;
use crate::error::{FsError, FsResult};
use crate::local::{self, SaveOptions};
use crate::location::{ContentUri, ResolvedUri, UnresolvedUri, UriResolver};
use crate::metadata::FileMetadata;
use crate::read::{ChunkStream, ReadLength, ReadOptions};

pub struct FileAccess {
    resolver: UriResolver,
    content: Option<ContentOps>,
    config: FileAccessConfig,
}

impl FileAccess {
    pub fn new(config: FileAccessConfig) -> Self {
        FileAccess {
            resolver: UriResolver::new(config.roots.clone()),
            content: None,
            config,
        }
    }

    /// Enables `content://` uris. Without a provider they are rejected with
    /// [`FsError::ContentSchemeUnsupported`].
    pub fn with_content_provider(mut self, provider: Arc<dyn ContentProvider>) -> Self {
        self.content = Some(ContentOps::new(provider));
        self
    }

    pub fn config(&self) -> &FileAccessConfig {
        &self.config
    }

    /// Read options using the configured buffer and chunk sizes.
    pub fn read_options(&self, encoding: Encoding, offset: u64, length: ReadLength) -> ReadOptions {
        ReadOptions {
            offset,
            length,
            chunk_size: self.config.chunk_size,
            buffer_size: self.config.buffer_size,
            encoding,
        }
    }

    pub fn resolve(&self, uri: &UnresolvedUri) -> FsResult<ResolvedUri> {
        self.resolver.resolve(uri)
    }

    fn content_ops(&self, operation: &str, uri: &ContentUri) -> FsResult<&ContentOps> {
        self.content
            .as_ref()
            .ok_or_else(|| FsError::content_unsupported(operation, uri.as_str()))
    }

    /// The `file://` or `content://` form of a reference.
    pub fn get_uri(&self, uri: &UnresolvedUri) -> FsResult<String> {
        Ok(match self.resolve(uri)? {
            ResolvedUri::Content(content) => content.to_string(),
            ResolvedUri::Local(local) => local.file_uri,
        })
    }

    pub fn create_file(&self, uri: &UnresolvedUri, recursive: bool) -> FsResult<()> {
        match self.resolve(uri)? {
            ResolvedUri::Content(content) => {
                Err(FsError::content_unsupported("create file", content.as_str()))
            }
            ResolvedUri::Local(local) => local::create_file(&local, recursive),
        }
    }

    pub fn create_directory(&self, uri: &UnresolvedUri, recursive: bool) -> FsResult<()> {
        match self.resolve(uri)? {
            ResolvedUri::Content(content) => {
                Err(FsError::content_unsupported("create directory", content.as_str()))
            }
            ResolvedUri::Local(local) => local::create_directory(&local, recursive),
        }
    }

    pub fn read_file(&self, uri: &UnresolvedUri, options: &ReadOptions) -> FsResult<String> {
        self.read_file_in_chunks(uri, options)?.concat()
    }

    /// Opens a lazy chunk sequence. Dropping it early closes the file.
    pub fn read_file_in_chunks(
        &self,
        uri: &UnresolvedUri,
        options: &ReadOptions,
    ) -> FsResult<ChunkStream> {
        match self.resolve(uri)? {
            ResolvedUri::Content(content) => {
                self.content_ops("read", &content)?.read_in_chunks(&content, options)
            }
            ResolvedUri::Local(local) => local::read_in_chunks(&local, options),
        }
    }

    pub fn save_file(
        &self,
        uri: &UnresolvedUri,
        data: &str,
        options: &SaveOptions,
    ) -> FsResult<()> {
        match self.resolve(uri)? {
            ResolvedUri::Content(content) => {
                Err(FsError::content_unsupported("save", content.as_str()))
            }
            ResolvedUri::Local(local) => local::save(&local, data, options),
        }
    }

    pub fn delete(&self, uri: &UnresolvedUri, recursive: bool) -> FsResult<()> {
        match self.resolve(uri)? {
            ResolvedUri::Content(content) => self.content_ops("delete", &content)?.delete(&content),
            ResolvedUri::Local(local) => local::delete(&local, recursive),
        }
    }

    pub fn metadata(&self, uri: &UnresolvedUri) -> FsResult<FileMetadata> {
        match self.resolve(uri)? {
            ResolvedUri::Content(content) => {
                self.content_ops("metadata", &content)?.metadata(&content)
            }
            ResolvedUri::Local(local) => local::metadata(&local),
        }
    }

    pub fn list_directory(&self, uri: &UnresolvedUri) -> FsResult<Vec<FileMetadata>> {
        match self.resolve(uri)? {
            ResolvedUri::Content(content) => {
                Err(FsError::content_unsupported("list", content.as_str()))
            }
            ResolvedUri::Local(local) => local::list(&local),
        }
    }

    pub fn copy(&self, from: &UnresolvedUri, to: &UnresolvedUri) -> FsResult<()> {
        let source = self.resolve(from)?;
        let destination = self.resolve(to)?;
        tracing::debug!(from = %source.describe(), to = %destination.describe(), "copy");
        match (source, destination) {
            (ResolvedUri::Local(source), ResolvedUri::Local(destination)) => {
                local::copy(&source, &destination)
            }
            (ResolvedUri::Content(source), ResolvedUri::Local(destination)) => self
                .content_ops("copy", &source)?
                .copy_to_local(&source, &destination),
            (_, ResolvedUri::Content(destination)) => {
                Err(FsError::content_unsupported("copy into", destination.as_str()))
            }
        }
    }

    pub fn rename(&self, from: &UnresolvedUri, to: &UnresolvedUri) -> FsResult<()> {
        let source = self.resolve(from)?;
        let destination = self.resolve(to)?;
        tracing::debug!(from = %source.describe(), to = %destination.describe(), "rename");
        match (source, destination) {
            (ResolvedUri::Local(source), ResolvedUri::Local(destination)) => {
                local::rename(&source, &destination)
            }
            (ResolvedUri::Content(content), _) | (_, ResolvedUri::Content(content)) => {
                Err(FsError::content_unsupported("move", content.as_str()))
            }
        }
    }
}
