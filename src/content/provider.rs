// src/content/provider.rs
//!
//! Content provider seam
//!
//! The host implements [`ContentProvider`] on top of the platform's
//! content resolver. Everything here is blocking.
//!

use std::collections::HashMap;
use std::io::{self, Read};

use crate::location::ContentUri;

/// One row of an attribute query.
pub trait ContentRow {
    fn get_string(&self, column: &str) -> Option<String>;
    fn get_long(&self, column: &str) -> Option<i64>;
}

pub trait ContentProvider: Send + Sync {
    /// Opens the content for reading. Must fail with
    /// `io::ErrorKind::NotFound` when the uri no longer points anywhere.
    fn open_input(&self, uri: &ContentUri) -> io::Result<Box<dyn Read + Send>>;

    /// Queries the attribute row for `uri`, `None` when the provider has no row.
    fn query(&self, uri: &ContentUri) -> io::Result<Option<Box<dyn ContentRow>>>;

    /// Deletes the content, returning the number of rows removed.
    fn delete(&self, uri: &ContentUri) -> io::Result<usize>;

    /// MIME type reported by the provider.
    fn mime_type(&self, uri: &ContentUri) -> Option<String>;
}

/// Column value as a platform cursor reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    Text(String),
    Integer(i64),
    Null,
}

/// A cursor row copied out into memory, handy for bridges that marshal
/// the platform cursor column by column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRow {
    columns: HashMap<String, ColumnValue>,
}

impl ColumnRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: ColumnValue) -> Self {
        self.columns.insert(column.to_string(), value);
        self
    }

    pub fn insert(&mut self, column: &str, value: ColumnValue) {
        self.columns.insert(column.to_string(), value);
    }
}

impl ContentRow for ColumnRow {
    fn get_string(&self, column: &str) -> Option<String> {
        match self.columns.get(column)? {
            ColumnValue::Text(text) => Some(text.clone()),
            ColumnValue::Integer(value) => Some(value.to_string()),
            ColumnValue::Null => None,
        }
    }

    fn get_long(&self, column: &str) -> Option<i64> {
        match self.columns.get(column)? {
            ColumnValue::Integer(value) => Some(*value),
            ColumnValue::Text(text) => text.trim().parse().ok(),
            ColumnValue::Null => None,
        }
    }
}
