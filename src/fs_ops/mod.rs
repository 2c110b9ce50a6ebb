//! Crash-safe file replacement.
//!
//! The write never touches the target in place: content goes to a uniquely
//! named sibling temp file, is fsynced, inherits the target's mode/owner
//! (unless overridden), and is renamed onto the target in one atomic step.
//! The target therefore always holds either its old bytes or the complete
//! new bytes. On any failure the temp file is removed and the target is
//! left untouched.
//!
//! [`write_file`] additionally serializes concurrent calls aimed at the
//! same resolved path (FIFO); [`write_file_sync`] is the blocking variant
//! without that serialization.

mod meta;
mod queue;
mod replace;
mod temp;
mod util;
mod writer;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::encoding::{Content, Encoding};
use crate::errors::WriteError;

pub use meta::Ownership;
pub use temp::next_temp_path;

/// Options for a single replacement.
///
/// Unset mode/owner are inherited from the pre-existing target; if the
/// target doesn't exist they stay unset and the filesystem defaults apply.
/// `encoding` only matters for text content.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Explicit permission bits for the new file.
    pub mode: Option<u32>,
    /// Explicit owner for the new file (Unix).
    pub chown: Option<Ownership>,
    /// Encoding for text content. Defaults to UTF-8.
    pub encoding: Encoding,
}

/// Replace `target`'s contents, serialized against other [`write_file`]
/// calls for the same resolved path.
///
/// Returns only after the new content is durably on disk and visible under
/// `target`, or with the error of whichever step failed. Failed calls leave
/// the target exactly as it was.
pub async fn write_file(
    target: impl AsRef<Path>,
    content: impl Into<Content>,
    options: WriteOptions,
) -> Result<(), WriteError> {
    let target = target.as_ref();
    let payload = content.into().into_payload(options.encoding)?;

    // Queue on the canonical path so two spellings of the same file
    // serialize together. A not-yet-existing target keys on the literal path.
    let resolved = match tokio::fs::canonicalize(target).await {
        Ok(real) => dunce::simplified(&real).to_path_buf(),
        Err(_) => target.to_path_buf(),
    };

    let _slot = queue::acquire(&resolved).await;
    let tmp = temp::next_temp_path(&resolved);
    let meta = meta::resolve(&resolved, &options).await;

    debug!(
        path = %resolved.display(),
        tmp = %tmp.display(),
        bytes = payload.as_ref().map(|p| p.len()).unwrap_or(0),
        "replacing file"
    );

    let result = async {
        writer::write_durable(&tmp, payload.as_deref(), meta.mode).await?;
        replace::finalize(&tmp, &resolved, &meta).await
    }
    .await;

    if result.is_err() {
        // Unified cleanup: never leave the temp file behind, never let a
        // cleanup error mask the step that actually failed.
        let _ = tokio::fs::remove_file(&tmp).await;
    }
    result
}

/// Blocking variant of [`write_file`].
///
/// Same net effect (temp name, metadata inheritance, durable write, chown,
/// chmod, rename, cleanup on failure) but no per-path serialization:
/// callers that hit one path from several threads must serialize themselves.
pub fn write_file_sync(
    target: impl AsRef<Path>,
    content: impl Into<Content>,
    options: WriteOptions,
) -> Result<(), WriteError> {
    let target = target.as_ref();
    let payload = content.into().into_payload(options.encoding)?;

    let resolved = resolve_target_sync(target);
    let tmp = temp::next_temp_path(&resolved);
    let meta = meta::resolve_sync(&resolved, &options);

    debug!(
        path = %resolved.display(),
        tmp = %tmp.display(),
        bytes = payload.as_ref().map(|p| p.len()).unwrap_or(0),
        "replacing file (blocking)"
    );

    let result = writer::write_durable_sync(&tmp, payload.as_deref(), meta.mode)
        .and_then(|_| replace::finalize_sync(&tmp, &resolved, &meta));

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

/// Best-effort symlink resolution with literal fallback.
fn resolve_target_sync(target: &Path) -> PathBuf {
    dunce::canonicalize(target).unwrap_or_else(|_| target.to_path_buf())
}
