// src/encoding.rs
//!
//! Data representation policy
//!
//! Governs how raw bytes become the caller-visible string and back.
//! `Base64` is binary safe; `Charset` round-trips text only when the file
//! really uses that charset.
//!

use base64::{engine::general_purpose::STANDARD, Engine};
use encoding_rs::{CoderResult, Decoder, Encoding as Charset, UTF_8};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FsError, FsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Base64,
    Charset(&'static Charset),
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Charset(UTF_8)
    }
}

impl Encoding {
    /// Parses a caller-supplied name. `base64` (any case) selects Base64,
    /// anything else must be a WHATWG charset label such as `utf-8`.
    pub fn from_label(label: &str) -> FsResult<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("base64") {
            return Ok(Encoding::Base64);
        }
        Charset::for_label(label.as_bytes())
            .map(Encoding::Charset)
            .ok_or_else(|| FsError::invalid(format!("Unknown charset: {label}")))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Base64 => "base64",
            Encoding::Charset(charset) => charset.name(),
        }
    }

    pub fn is_base64(&self) -> bool {
        matches!(self, Encoding::Base64)
    }

    /// Converts a whole byte buffer to its string form.
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Base64 => STANDARD.encode(bytes),
            Encoding::Charset(charset) => {
                let (text, _, _) = charset.decode(bytes);
                text.into_owned()
            }
        }
    }

    /// Converts caller-supplied save data back into raw bytes.
    ///
    /// Base64 input may carry a `data:<mime>;base64,` prefix which is
    /// dropped by splitting on the first comma.
    pub fn decode_str(&self, data: &str) -> FsResult<Vec<u8>> {
        match self {
            Encoding::Base64 => {
                let payload = strip_data_url_prefix(data);
                STANDARD
                    .decode(payload)
                    .map_err(|e| FsError::invalid(format!("Invalid base64 data: {e}")))
            }
            Encoding::Charset(charset) => {
                let (bytes, _, _) = charset.encode(data);
                Ok(bytes.into_owned())
            }
        }
    }

    /// Per-read text state. Base64 chunks carry no state between them,
    /// charset chunks share one streaming decoder.
    pub(crate) fn chunk_encoder(&self) -> ChunkEncoder {
        match self {
            Encoding::Base64 => ChunkEncoder::Base64,
            Encoding::Charset(charset) => ChunkEncoder::Text(charset.new_decoder()),
        }
    }
}

/// Returns the payload of a `data:` URL, or the input unchanged.
pub fn strip_data_url_prefix(data: &str) -> &str {
    match data.split_once(',') {
        Some((_, payload)) => payload.trim(),
        None => data.trim(),
    }
}

pub(crate) enum ChunkEncoder {
    Base64,
    Text(Decoder),
}

impl ChunkEncoder {
    /// Encodes one chunk. `last` flushes any bytes a text decoder is still
    /// holding from an incomplete multi-byte sequence.
    pub(crate) fn encode(&mut self, bytes: &[u8], last: bool) -> String {
        match self {
            ChunkEncoder::Base64 => STANDARD.encode(bytes),
            ChunkEncoder::Text(decoder) => {
                let capacity = decoder
                    .max_utf8_buffer_length(bytes.len())
                    .unwrap_or(bytes.len() * 3 + 4);
                let mut out = String::with_capacity(capacity);
                let (result, _, _) = decoder.decode_to_string(bytes, &mut out, last);
                debug_assert_eq!(result, CoderResult::InputEmpty);
                out
            }
        }
    }
}

impl Serialize for Encoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Encoding::from_label(&label).map_err(serde::de::Error::custom)
    }
}
