//! Durable writer.
//! open (exclusive create) -> write -> fsync -> close against the temp file.
//! Once this returns Ok the temp file's bytes are on stable storage.
//!
//! - An absent payload still opens, fsyncs and closes: "write nothing"
//!   produces an empty file, it is not a no-op.
//! - The descriptor is closed on every exit path; a close failure after an
//!   earlier failure does not replace the original error.

use std::io::Write;
use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::errors::WriteError;

fn open_options(mode: Option<u32>) -> std::fs::OpenOptions {
    let mut o = std::fs::OpenOptions::new();
    o.write(true).create_new(true);
    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::OpenOptionsExt;
        o.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    o
}

/// Async form: every step suspends.
pub(super) async fn write_durable(
    tmp: &Path,
    payload: Option<&[u8]>,
    mode: Option<u32>,
) -> Result<(), WriteError> {
    let mut file = tokio::fs::OpenOptions::from(open_options(mode))
        .open(tmp)
        .await
        .map_err(|source| WriteError::Open {
            path: tmp.to_path_buf(),
            source,
        })?;

    if let Some(bytes) = payload {
        file.write_all(bytes)
            .await
            .map_err(|source| WriteError::Write {
                path: tmp.to_path_buf(),
                source,
            })?;
    }

    file.sync_all().await.map_err(|source| WriteError::Flush {
        path: tmp.to_path_buf(),
        source,
    })?;

    // Dropping the handle closes it; tokio finishes the close off-thread.
    Ok(())
}

/// Blocking twin of [`write_durable`].
pub(super) fn write_durable_sync(
    tmp: &Path,
    payload: Option<&[u8]>,
    mode: Option<u32>,
) -> Result<(), WriteError> {
    let mut file = open_options(mode)
        .open(tmp)
        .map_err(|source| WriteError::Open {
            path: tmp.to_path_buf(),
            source,
        })?;

    if let Some(bytes) = payload {
        file.write_all(bytes).map_err(|source| WriteError::Write {
            path: tmp.to_path_buf(),
            source,
        })?;
    }

    file.sync_all().map_err(|source| WriteError::Flush {
        path: tmp.to_path_buf(),
        source,
    })?;

    Ok(())
}
