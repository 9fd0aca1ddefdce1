// src/location/resolver.rs
//!
//! Uri resolution
//!
//! Precedence matters here:
//! 1. a folder alias always wins, the path is never sniffed for a scheme
//! 2. `content://` uris go to the content provider
//! 3. synthetic picker paths are rewritten to `content://media/...`
//! 4. `file://` uris and bare paths are local
//! 5. every other scheme is rejected
//!

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

use super::{
    ContentUri, FolderAlias, LocalKind, LocalUri, ResolvedUri, StorageRoots, UnresolvedUri,
};
use crate::error::{FsError, FsResult};

pub const CONTENT_SCHEME: &str = "content";
pub const FILE_SCHEME: &str = "file";

/// Path segment that photo pickers put in front of provider-relative ids.
pub const SYNTHETIC_MARKER: &str = "/synthetic/";
const SYNTHETIC_CONTENT_PREFIX: &str = "content://media/";

#[derive(Debug, Clone)]
pub struct UriResolver {
    roots: StorageRoots,
}

impl UriResolver {
    pub fn new(roots: StorageRoots) -> Self {
        UriResolver { roots }
    }

    pub fn roots(&self) -> &StorageRoots {
        &self.roots
    }

    pub fn resolve(&self, unresolved: &UnresolvedUri) -> FsResult<ResolvedUri> {
        let resolved = match unresolved.directory {
            Some(alias) => ResolvedUri::Local(self.resolve_in_folder(alias, &unresolved.path)),
            None => self.resolve_raw(&unresolved.path)?,
        };
        tracing::debug!(
            input = %unresolved.path,
            directory = ?unresolved.directory,
            resolved = %resolved.describe(),
            "resolved uri"
        );
        Ok(resolved)
    }

    fn resolve_in_folder(&self, alias: FolderAlias, relative: &str) -> LocalUri {
        let root = self.roots.root_for(alias);
        let relative = relative.trim_start_matches('/');
        let full_path = if relative.is_empty() {
            root.to_path_buf()
        } else {
            root.join(relative)
        };
        // Aliased roots are classified statically, never probed.
        let in_external_storage = !alias.is_internal();
        local_uri(full_path, in_external_storage)
    }

    fn resolve_raw(&self, raw: &str) -> FsResult<ResolvedUri> {
        let parsed = match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => None,
            Err(e) => {
                return Err(FsError::Unresolvable {
                    uri: format!("{raw} ({e})"),
                })
            }
        };

        if let Some(url) = &parsed {
            if url.scheme() == CONTENT_SCHEME {
                return Ok(ResolvedUri::Content(ContentUri::new(raw)));
            }
        }

        if raw.contains(SYNTHETIC_MARKER) {
            let uri = synthetic_to_content_uri(raw)?;
            return Ok(ResolvedUri::Content(ContentUri::new(uri)));
        }

        let path = match &parsed {
            None => PathBuf::from(raw),
            Some(url) if url.scheme() == FILE_SCHEME => {
                url.to_file_path().map_err(|_| FsError::Unresolvable {
                    uri: raw.to_string(),
                })?
            }
            Some(_) => {
                return Err(FsError::Unresolvable {
                    uri: raw.to_string(),
                })
            }
        };

        let full_path = absolutize(path);
        let in_external_storage = self.roots.is_external(&full_path);
        Ok(ResolvedUri::Local(local_uri(full_path, in_external_storage)))
    }
}

/// Maps `.../synthetic/<id>.<ext>` to `content://media/<id>`.
///
/// The extension is required; without one the id cannot be told apart
/// from a plain file name.
pub fn synthetic_to_content_uri(raw: &str) -> FsResult<String> {
    let unresolvable = || FsError::Unresolvable {
        uri: raw.to_string(),
    };

    let start = raw.find(SYNTHETIC_MARKER).ok_or_else(unresolvable)? + SYNTHETIC_MARKER.len();
    let tail = &raw[start..];
    let dot = tail.rfind('.').ok_or_else(unresolvable)?;
    Ok(format!("{SYNTHETIC_CONTENT_PREFIX}{}", &tail[..dot]))
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::path::absolute(&path).unwrap_or(path)
}

fn local_uri(full_path: PathBuf, in_external_storage: bool) -> LocalUri {
    let file_uri = Url::from_file_path(&full_path)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| format!("file://{}", full_path.to_string_lossy()));
    LocalUri {
        kind: probe_kind(&full_path),
        full_path,
        file_uri,
        in_external_storage,
    }
}

/// Probes a local path. Missing paths and probe failures are both
/// reported as [`LocalKind::Unknown`].
pub fn probe_kind(path: &Path) -> LocalKind {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => LocalKind::Directory,
        Ok(_) => LocalKind::File,
        Err(e) => probe_failure(path, &e),
    }
}

/// A failed probe never propagates. Anything but "not found" is logged.
pub(crate) fn probe_failure(path: &Path, error: &io::Error) -> LocalKind {
    if error.kind() != io::ErrorKind::NotFound {
        tracing::warn!(path = %path.display(), error = %error, "could not probe file type");
    }
    LocalKind::Unknown
}
