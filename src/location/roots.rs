// src/location/roots.rs
//!
//! Platform directories backing each folder alias
//!

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::alias::FolderAlias;

/// Absolute root directory for every [`FolderAlias`].
///
/// On Android these come from `Context.getCacheDir()`, `getFilesDir()`,
/// `getExternalCacheDir()`, `getExternalFilesDir(null)`,
/// `Environment.getExternalStorageDirectory()` and the public documents
/// directory. The host passes them in once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRoots {
    pub internal_cache: PathBuf,
    pub internal_files: PathBuf,
    pub external_cache: PathBuf,
    pub external_files: PathBuf,
    pub external_storage: PathBuf,
    pub documents: PathBuf,
}

impl StorageRoots {
    /// Lays every root out below `base`, mirroring the Android layout.
    /// Used by desktop builds and tests.
    pub fn under(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let app = base.join("data");
        let storage = base.join("storage");
        StorageRoots {
            internal_cache: app.join("cache"),
            internal_files: app.join("files"),
            external_cache: storage.join("Android").join("data").join("cache"),
            external_files: storage.join("Android").join("data").join("files"),
            documents: storage.join("Documents"),
            external_storage: storage,
        }
    }

    pub fn root_for(&self, alias: FolderAlias) -> &Path {
        match alias {
            FolderAlias::InternalCache => &self.internal_cache,
            FolderAlias::InternalFiles => &self.internal_files,
            FolderAlias::ExternalCache => &self.external_cache,
            FolderAlias::ExternalFiles => &self.external_files,
            FolderAlias::ExternalStorage => &self.external_storage,
            FolderAlias::Documents => &self.documents,
        }
    }

    /// Whether `path` lives in external storage.
    ///
    /// The deepest root containing the path decides. Paths outside every
    /// known root count as external.
    pub fn is_external(&self, path: &Path) -> bool {
        FolderAlias::ALL
            .iter()
            .map(|alias| (*alias, self.root_for(*alias)))
            .filter(|(_, root)| path.starts_with(root))
            .max_by_key(|(_, root)| root.components().count())
            .map(|(alias, _)| !alias.is_internal())
            .unwrap_or(true)
    }
}
