//! Typed error definitions for safewrite.
//! One variant per step of the replacement sequence, each carrying the
//! underlying io::Error verbatim so callers see exactly what the OS reported.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::encoding::Encoding;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("open temp file '{}': {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("write temp file '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("flush temp file '{}' to storage: {source}", path.display())]
    Flush { path: PathBuf, source: io::Error },

    #[error("set owner on temp file '{}': {source}", path.display())]
    Chown { path: PathBuf, source: io::Error },

    #[error("set mode on temp file '{}': {source}", path.display())]
    Chmod { path: PathBuf, source: io::Error },

    #[error("rename '{}' -> '{}': {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("encode text as {encoding}: input contains characters outside the target encoding")]
    Encode { encoding: Encoding },
}

impl WriteError {
    /// Stable short code for structured logging and scripting.
    pub fn code(&self) -> &'static str {
        match self {
            WriteError::Open { .. } => "open",
            WriteError::Write { .. } => "write",
            WriteError::Flush { .. } => "flush",
            WriteError::Chown { .. } => "chown",
            WriteError::Chmod { .. } => "chmod",
            WriteError::Rename { .. } => "rename",
            WriteError::Encode { .. } => "encode",
        }
    }

    /// The underlying OS error, when this step had one.
    pub fn io_source(&self) -> Option<&io::Error> {
        match self {
            WriteError::Open { source, .. }
            | WriteError::Write { source, .. }
            | WriteError::Flush { source, .. }
            | WriteError::Chown { source, .. }
            | WriteError::Chmod { source, .. }
            | WriteError::Rename { source, .. } => Some(source),
            WriteError::Encode { .. } => None,
        }
    }
}
