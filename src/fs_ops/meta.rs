//! Metadata inheritance.
//! Fills in mode/owner for the replacement from the pre-existing target:
//! explicit values win, anything missing is taken from a snapshot stat.
//! A missing or unreadable target is not an error; stat failures are
//! swallowed and whatever explicit values were given carry through.

use std::fs::Metadata;
use std::path::Path;

use tracing::trace;

use super::WriteOptions;

/// Numeric owner applied to the temp file before rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ownership {
    pub uid: u32,
    pub gid: u32,
}

/// Mode/owner resolved once per request. Never outlives the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedMeta {
    pub mode: Option<u32>,
    pub owner: Option<Ownership>,
}

impl ResolvedMeta {
    fn from_options(opts: &WriteOptions) -> Self {
        Self {
            mode: opts.mode,
            owner: opts.chown,
        }
    }

    /// True when a stat can't add anything.
    fn complete(&self) -> bool {
        self.mode.is_some() && self.owner.is_some()
    }

    fn fill_from(&mut self, meta: &Metadata) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::{MetadataExt, PermissionsExt};
            if self.mode.is_none() {
                self.mode = Some(meta.permissions().mode() & 0o7777);
            }
            if self.owner.is_none() {
                self.owner = Some(Ownership {
                    uid: meta.uid(),
                    gid: meta.gid(),
                });
            }
        }
        // No process-level uid/gid concept elsewhere; owner stays as given.
        #[cfg(not(unix))]
        let _ = meta;
    }
}

/// Resolve metadata for `target`, suspending on the stat.
pub(super) async fn resolve(target: &Path, opts: &WriteOptions) -> ResolvedMeta {
    let mut resolved = ResolvedMeta::from_options(opts);
    if resolved.complete() {
        return resolved;
    }
    if let Ok(meta) = tokio::fs::metadata(target).await {
        resolved.fill_from(&meta);
        trace!(path = %target.display(), mode = ?resolved.mode, "inherited metadata from existing target");
    }
    resolved
}

/// Blocking twin of [`resolve`].
pub(super) fn resolve_sync(target: &Path, opts: &WriteOptions) -> ResolvedMeta {
    let mut resolved = ResolvedMeta::from_options(opts);
    if resolved.complete() {
        return resolved;
    }
    if let Ok(meta) = std::fs::metadata(target) {
        resolved.fill_from(&meta);
        trace!(path = %target.display(), mode = ?resolved.mode, "inherited metadata from existing target");
    }
    resolved
}
