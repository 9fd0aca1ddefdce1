// src/config.rs
//!
//! Configuration handed over by the host at startup
//!

use serde::{Deserialize, Serialize};

use crate::error::{FsError, FsResult};
use crate::location::StorageRoots;
use crate::read::{DEFAULT_BUFFER_SIZE, DEFAULT_CHUNK_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAccessConfig {
    pub roots: StorageRoots,
    /// Size of each blocking read
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    /// Chunk size used when a whole file is read in one call
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl FileAccessConfig {
    pub fn new(roots: StorageRoots) -> Self {
        FileAccessConfig {
            roots,
            buffer_size: DEFAULT_BUFFER_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn from_json(json: &str) -> FsResult<Self> {
        let config: FileAccessConfig = serde_json::from_str(json)
            .map_err(|e| FsError::invalid(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FsResult<()> {
        if self.buffer_size == 0 || self.chunk_size == 0 {
            return Err(FsError::invalid("buffer and chunk size must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_json_with_defaults() {
        let json = r#"{
            "roots": {
                "internalCache": "/data/user/0/app/cache",
                "internalFiles": "/data/user/0/app/files",
                "externalCache": "/storage/emulated/0/Android/data/app/cache",
                "externalFiles": "/storage/emulated/0/Android/data/app/files",
                "externalStorage": "/storage/emulated/0",
                "documents": "/storage/emulated/0/Documents"
            }
        }"#;
        let config = FileAccessConfig::from_json(json).unwrap();
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(
            config.roots.internal_files,
            PathBuf::from("/data/user/0/app/files")
        );
    }

    #[test]
    fn test_from_json_rejects_zero_buffer() {
        let roots = serde_json::to_value(StorageRoots::under("/tmp/x")).unwrap();
        let json = serde_json::json!({ "roots": roots, "bufferSize": 0 }).to_string();
        assert!(matches!(
            FileAccessConfig::from_json(&json),
            Err(FsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_from_json_missing_roots() {
        assert!(FileAccessConfig::from_json("{}").is_err());
    }
}
