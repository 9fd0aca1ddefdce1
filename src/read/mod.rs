// src/read/mod.rs
//!
//! Chunked Read Engine
//!
//! Streams `[offset, offset + length)` of a byte source as a sequence of
//! encoded string chunks. Two sizes are in play:
//!
//! * the *chunk* size is the logical unit handed to the caller
//! * the *buffer* size is the size of each blocking `read` call
//!
//! Base64 chunk sizes are rounded up to a multiple of 3 so every chunk but
//! the last encodes without `=` padding and the chunks can be concatenated
//! before decoding. Text chunks share one streaming decoder, so a multi-byte
//! character split by a chunk boundary is completed in the next chunk.
//!


use serde::{Deserialize, Serialize};
use std::io::{self, Read};

use crate::encoding::{ChunkEncoder, Encoding};
use crate::error::{FsError, FsResult};

pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

/// How many bytes to read after the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadLength {
    Limited(u64),
    RestOfFile,
}

impl From<Option<u64>> for ReadLength {
    fn from(length: Option<u64>) -> Self {
        length.map(ReadLength::Limited).unwrap_or(ReadLength::RestOfFile)
    }
}

impl ReadLength {
    fn limit(&self) -> Option<u64> {
        match self {
            ReadLength::Limited(n) => Some(*n),
            ReadLength::RestOfFile => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub offset: u64,
    pub length: ReadLength,
    pub chunk_size: usize,
    pub buffer_size: usize,
    pub encoding: Encoding,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            offset: 0,
            length: ReadLength::RestOfFile,
            chunk_size: DEFAULT_CHUNK_SIZE,
            buffer_size: DEFAULT_BUFFER_SIZE,
            encoding: Encoding::default(),
        }
    }
}

impl ReadOptions {
    pub fn with_encoding(encoding: Encoding) -> Self {
        ReadOptions {
            encoding,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> FsResult<()> {
        if self.chunk_size == 0 {
            return Err(FsError::invalid("chunk size must be greater than 0"));
        }
        if self.buffer_size == 0 {
            return Err(FsError::invalid("buffer size must be greater than 0"));
        }
        if self.length == ReadLength::Limited(0) {
            return Err(FsError::invalid("length must be greater than 0"));
        }
        Ok(())
    }

    /// Bytes per emitted chunk.
    ///
    /// `max(buffer, min(chunk, available after offset, length))`, rounded up
    /// to a multiple of 3 for Base64. An unknown `available` is left out.
    pub fn effective_chunk_size(&self, available: Option<u64>) -> usize {
        let mut size = self.chunk_size as u64;
        if let Some(available) = available {
            size = size.min(available.saturating_sub(self.offset));
        }
        if let Some(limit) = self.length.limit() {
            size = size.min(limit);
        }
        let mut size = size.max(self.buffer_size as u64) as usize;
        if self.encoding.is_base64() {
            size = size.div_ceil(3) * 3;
        }
        size
    }
}

/// Forward-only iterator over encoded chunks.
///
/// Reads nothing until the first chunk is pulled and never reads past the
/// chunk it is producing. The source is dropped (and so closed) as soon as
/// the sequence ends, or when the iterator itself is dropped.
pub struct ChunkedReader<R = Box<dyn Read + Send>> {
    source: Option<R>,
    encoder: ChunkEncoder,
    offset: u64,
    skipped: bool,
    chunk_size: usize,
    buffer: Vec<u8>,
    /// Bytes still allowed by the length limit, `None` for rest-of-file
    remaining: Option<u64>,
    emitted: usize,
}

impl<R: Read> ChunkedReader<R> {
    /// `available` is the total size of the source when known up front.
    pub fn new(source: R, available: Option<u64>, options: &ReadOptions) -> FsResult<Self> {
        options.validate()?;
        let chunk_size = options.effective_chunk_size(available);
        tracing::trace!(
            offset = options.offset,
            length = ?options.length,
            chunk_size,
            buffer_size = options.buffer_size,
            encoding = options.encoding.label(),
            "starting chunked read"
        );
        Ok(ChunkedReader {
            source: Some(source),
            encoder: options.encoding.chunk_encoder(),
            offset: options.offset,
            skipped: options.offset == 0,
            chunk_size,
            buffer: vec![0; options.buffer_size],
            remaining: options.length.limit(),
            emitted: 0,
        })
    }

    /// Effective chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Drains the sequence into one string.
    pub fn concat(self) -> FsResult<String> {
        let mut out = String::new();
        for chunk in self {
            out.push_str(&chunk?);
        }
        Ok(out)
    }

    fn finish(&mut self) {
        self.source = None;
    }

    /// Consumes `offset` bytes. Returns false when the source ended first.
    fn skip_offset(&mut self) -> io::Result<bool> {
        let Some(source) = self.source.as_mut() else {
            return Ok(false);
        };
        let mut skipped = 0u64;
        while skipped < self.offset {
            let want = (self.offset - skipped).min(self.buffer.len() as u64) as usize;
            match source.read(&mut self.buffer[..want]) {
                Ok(0) => return Ok(false),
                Ok(n) => skipped += n as u64,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }

    /// Fills one chunk with as many sub-reads as needed.
    /// Returns the bytes and whether the source hit end of data.
    fn fill_chunk(&mut self, budget: usize) -> io::Result<(Vec<u8>, bool)> {
        // The budget can be far larger than the source; grow as bytes arrive
        let mut chunk = Vec::with_capacity(budget.min(self.buffer.len()));
        let Some(source) = self.source.as_mut() else {
            return Ok((chunk, true));
        };
        while chunk.len() < budget {
            let want = (budget - chunk.len()).min(self.buffer.len());
            match source.read(&mut self.buffer[..want]) {
                Ok(0) => return Ok((chunk, true)),
                Ok(n) => chunk.extend_from_slice(&self.buffer[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok((chunk, false))
    }
}

impl<R: Read> Iterator for ChunkedReader<R> {
    type Item = FsResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.as_ref()?;

        if !self.skipped {
            self.skipped = true;
            match self.skip_offset() {
                Ok(true) => {}
                // Offset at or past the end: nothing to emit, not even an empty chunk
                Ok(false) => {
                    self.finish();
                    return None;
                }
                Err(e) => {
                    self.finish();
                    return Some(Err(FsError::Io { source: e }));
                }
            }
        }

        let budget = match self.remaining {
            Some(remaining) => remaining.min(self.chunk_size as u64) as usize,
            None => self.chunk_size,
        };
        if budget == 0 {
            self.finish();
            return None;
        }

        let (bytes, eof) = match self.fill_chunk(budget) {
            Ok(filled) => filled,
            Err(e) => {
                self.finish();
                return Some(Err(FsError::Io { source: e }));
            }
        };

        if bytes.is_empty() {
            self.finish();
            let tail = self.encoder.encode(&[], true);
            // An empty file still produces one (empty) chunk so callers see
            // a terminal event.
            if (self.emitted == 0 && self.offset == 0) || !tail.is_empty() {
                self.emitted += 1;
                return Some(Ok(tail));
            }
            return None;
        }

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= bytes.len() as u64;
        }
        let last = eof || self.remaining == Some(0);
        if last {
            self.finish();
        }
        self.emitted += 1;
        Some(Ok(self.encoder.encode(&bytes, last)))
    }
}

impl<R: Read> std::iter::FusedIterator for ChunkedReader<R> {}

/// Chunk sequence over a boxed source, as returned by the file operations.
pub type ChunkStream = ChunkedReader<Box<dyn Read + Send>>;
