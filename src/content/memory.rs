// src/content/memory.rs
//!
//! In-memory provider for tests
//!

use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::sync::{Arc, Mutex};

use super::provider::{ColumnRow, ColumnValue, ContentProvider, ContentRow};
use crate::location::ContentUri;

#[derive(Debug, Clone)]
pub struct MemoryEntry {
    pub data: Vec<u8>,
    pub row: ColumnRow,
    pub mime_type: Option<String>,
}

#[derive(Default)]
pub struct MemoryProvider {
    entries: Mutex<HashMap<String, MemoryEntry>>,
    /// Uris whose reads fail with `Unsupported`
    locked: Mutex<Vec<String>>,
}

impl MemoryProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Adds a document with the usual `_display_name` and `_size` columns.
    pub fn insert(&self, uri: &str, name: &str, data: &[u8]) {
        let row = ColumnRow::new()
            .with("_display_name", ColumnValue::Text(name.to_string()))
            .with("_size", ColumnValue::Integer(data.len() as i64));
        self.insert_with_row(uri, data, row, None);
    }

    pub fn insert_with_row(&self, uri: &str, data: &[u8], row: ColumnRow, mime_type: Option<&str>) {
        self.entries.lock().unwrap().insert(
            uri.to_string(),
            MemoryEntry {
                data: data.to_vec(),
                row,
                mime_type: mime_type.map(str::to_string),
            },
        );
    }

    pub fn lock(&self, uri: &str) {
        self.locked.lock().unwrap().push(uri.to_string());
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.entries.lock().unwrap().contains_key(uri)
    }

    fn get(&self, uri: &ContentUri) -> io::Result<MemoryEntry> {
        self.entries
            .lock()
            .unwrap()
            .get(uri.as_str())
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such document"))
    }
}

impl ContentProvider for MemoryProvider {
    fn open_input(&self, uri: &ContentUri) -> io::Result<Box<dyn Read + Send>> {
        if self.locked.lock().unwrap().iter().any(|u| u == uri.as_str()) {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "provider refused"));
        }
        Ok(Box::new(Cursor::new(self.get(uri)?.data)))
    }

    fn query(&self, uri: &ContentUri) -> io::Result<Option<Box<dyn ContentRow>>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(uri.as_str())
            .map(|entry| Box::new(entry.row.clone()) as Box<dyn ContentRow>))
    }

    fn delete(&self, uri: &ContentUri) -> io::Result<usize> {
        Ok(self.entries.lock().unwrap().remove(uri.as_str()).map_or(0, |_| 1))
    }

    fn mime_type(&self, uri: &ContentUri) -> Option<String> {
        self.get(uri).ok().and_then(|entry| entry.mime_type)
    }
}
