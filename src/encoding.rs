//! Content payloads and text encodings.
//! - Content is an explicit discrimination: raw bytes, text, or nothing.
//! - Text is encoded exactly once, before any filesystem work starts.
//! - Latin-1 input that cannot be represented is a hard error, not a
//!   silent byte mask.

use std::fmt;
use std::str::FromStr;

use crate::errors::WriteError;

/// Supported on-disk text encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8 (default)
    #[default]
    Utf8,
    /// UTF-16, little-endian code units
    Utf16Le,
    /// UTF-16, big-endian code units
    Utf16Be,
    /// ISO-8859-1, one byte per scalar value <= U+00FF
    Latin1,
}

impl Encoding {
    /// Parse common encoding names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Some(Encoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Some(Encoding::Utf16Le),
            "utf16be" | "utf-16be" => Some(Encoding::Utf16Be),
            "latin1" | "iso-8859-1" | "binary" => Some(Encoding::Latin1),
            _ => None,
        }
    }

    /// Encode `text` into bytes for this encoding.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, WriteError> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Utf16Le => Ok(text
                .encode_utf16()
                .flat_map(|u| u.to_le_bytes())
                .collect()),
            Encoding::Utf16Be => Ok(text
                .encode_utf16()
                .flat_map(|u| u.to_be_bytes())
                .collect()),
            Encoding::Latin1 => text
                .chars()
                .map(|c| {
                    let cp = c as u32;
                    if cp <= 0xFF {
                        Ok(cp as u8)
                    } else {
                        Err(WriteError::Encode {
                            encoding: Encoding::Latin1,
                        })
                    }
                })
                .collect(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16Be => "utf-16be",
            Encoding::Latin1 => "latin1",
        };
        f.write_str(s)
    }
}

impl FromStr for Encoding {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unsupported encoding: '{s}'"))
    }
}

/// What gets written to the target.
///
/// `Empty` means "write nothing": the temp file is still created, fsynced
/// and renamed, so the target ends up as an existing empty file.
#[derive(Debug, Clone)]
pub enum Content {
    Empty,
    Bytes(Vec<u8>),
    Text(String),
}

impl Content {
    /// Resolve to the final byte payload. Binary passes through untouched;
    /// text goes through `encoding`; Empty resolves to no payload at all.
    pub fn into_payload(self, encoding: Encoding) -> Result<Option<Vec<u8>>, WriteError> {
        match self {
            Content::Empty => Ok(None),
            Content::Bytes(b) => Ok(Some(b)),
            Content::Text(s) => encoding.encode(&s).map(Some),
        }
    }
}

impl From<Vec<u8>> for Content {
    fn from(b: Vec<u8>) -> Self {
        Content::Bytes(b)
    }
}

impl From<&[u8]> for Content {
    fn from(b: &[u8]) -> Self {
        Content::Bytes(b.to_vec())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}
