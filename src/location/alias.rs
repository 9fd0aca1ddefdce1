// src/location/alias.rs
//!
//! Well-known folder aliases
//!
//! Aliases are matched case-insensitively on their letters only, so
//! `cache`, `Cache` and `CACHE` all select the internal cache, and
//! `CACHE_EXTERNAL` and `cache-external` select the external one.
//!

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::FsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum FolderAlias {
    InternalCache,
    InternalFiles,
    ExternalCache,
    ExternalFiles,
    ExternalStorage,
    Documents,
}

impl FolderAlias {
    pub const ALL: [FolderAlias; 6] = [
        FolderAlias::InternalCache,
        FolderAlias::InternalFiles,
        FolderAlias::ExternalCache,
        FolderAlias::ExternalFiles,
        FolderAlias::ExternalStorage,
        FolderAlias::Documents,
    ];

    pub fn primary_name(&self) -> &'static str {
        match self {
            FolderAlias::InternalCache => "INTERNAL_CACHE",
            FolderAlias::InternalFiles => "INTERNAL_FILES",
            FolderAlias::ExternalCache => "EXTERNAL_CACHE",
            FolderAlias::ExternalFiles => "EXTERNAL_FILES",
            FolderAlias::ExternalStorage => "EXTERNAL_STORAGE",
            FolderAlias::Documents => "DOCUMENTS",
        }
    }

    /// Alternate spellings accepted in addition to the primary name.
    pub fn alternate_names(&self) -> &'static [&'static str] {
        match self {
            FolderAlias::InternalCache => &["CACHE", "TEMPORARY"],
            FolderAlias::InternalFiles => &["DATA", "LIBRARY", "LIBRARY_NO_CLOUD"],
            FolderAlias::ExternalCache => &["CACHE_EXTERNAL"],
            FolderAlias::ExternalFiles => &["EXTERNAL"],
            FolderAlias::ExternalStorage => &["SDCARD"],
            FolderAlias::Documents => &["PUBLIC_DOCUMENTS"],
        }
    }

    /// Static classification. Internal roots are app-private and never
    /// probed for external storage membership.
    pub fn is_internal(&self) -> bool {
        matches!(self, FolderAlias::InternalCache | FolderAlias::InternalFiles)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.primary_name()).chain(self.alternate_names().iter().copied())
    }
}

/// Uppercased letters of `name`, everything else dropped.
pub(crate) fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect()
}

lazy_static! {
    static ref ALIAS_LOOKUP: HashMap<String, FolderAlias> = {
        let mut lookup = HashMap::new();
        for alias in FolderAlias::ALL {
            for name in alias.names() {
                lookup.insert(normalize(name), alias);
            }
        }
        lookup
    };
}

impl FromStr for FolderAlias {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALIAS_LOOKUP
            .get(&normalize(s))
            .copied()
            .ok_or_else(|| FsError::Unresolvable {
                uri: format!("unknown folder alias '{s}'"),
            })
    }
}

impl fmt::Display for FolderAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.primary_name())
    }
}

impl<'de> Deserialize<'de> for FolderAlias {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
