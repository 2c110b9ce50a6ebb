//! Replacement finalization: chown -> chmod -> rename, in that order.
//! Mode and owner land on the temp file before the rename makes it visible,
//! so readers of the target never see new content with stale metadata.
//! Each step is skipped when its metadata is absent. Failures leave the
//! target untouched; the pipeline owns temp cleanup.
//!
//! - On Windows, an existing destination is removed first (rename there
//!   doesn't overwrite).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::io;
use std::path::Path;

use crate::errors::WriteError;

use super::meta::{Ownership, ResolvedMeta};
use super::util;

fn apply_owner_sync(tmp: &Path, owner: Ownership) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::chown(tmp, Some(owner.uid), Some(owner.gid))
    }
    #[cfg(not(unix))]
    {
        let _ = (tmp, owner);
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "file ownership is not supported on this platform",
        ))
    }
}

fn apply_mode_sync(tmp: &Path, mode: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp, std::fs::Permissions::from_mode(mode))
    }
    #[cfg(not(unix))]
    {
        // The readonly flag is the only usable analogue of mode bits here.
        let mut perms = std::fs::metadata(tmp)?.permissions();
        perms.set_readonly(mode & 0o200 == 0);
        std::fs::set_permissions(tmp, perms)
    }
}

fn pre_rename_sync(target: &Path) -> io::Result<()> {
    #[cfg(windows)]
    if target.exists() {
        if let Err(e) = std::fs::remove_file(target) {
            if e.kind() != io::ErrorKind::NotFound {
                return Err(e);
            }
        }
    }
    let _ = target;
    Ok(())
}

fn post_rename_sync(target: &Path) {
    // Persist the rename itself; never turn a successful replace into a failure.
    if let Some(parent) = target.parent() {
        let _ = util::fsync_dir(parent);
    }
}

/// Async form. Steps suspend via tokio::fs or the blocking pool.
pub(super) async fn finalize(
    tmp: &Path,
    target: &Path,
    meta: &ResolvedMeta,
) -> Result<(), WriteError> {
    if let Some(owner) = meta.owner {
        let tmp_owned = tmp.to_path_buf();
        util::asyncify(move || apply_owner_sync(&tmp_owned, owner))
            .await
            .map_err(|source| WriteError::Chown {
                path: tmp.to_path_buf(),
                source,
            })?;
    }

    if let Some(mode) = meta.mode {
        let tmp_owned = tmp.to_path_buf();
        util::asyncify(move || apply_mode_sync(&tmp_owned, mode))
            .await
            .map_err(|source| WriteError::Chmod {
                path: tmp.to_path_buf(),
                source,
            })?;
    }

    {
        let target_owned = target.to_path_buf();
        util::asyncify(move || pre_rename_sync(&target_owned))
            .await
            .map_err(|source| rename_error(tmp, target, source))?;
    }

    tokio::fs::rename(tmp, target)
        .await
        .map_err(|source| rename_error(tmp, target, source))?;

    let target_owned = target.to_path_buf();
    let _ = util::asyncify(move || {
        post_rename_sync(&target_owned);
        Ok(())
    })
    .await;

    Ok(())
}

/// Blocking twin of [`finalize`].
pub(super) fn finalize_sync(
    tmp: &Path,
    target: &Path,
    meta: &ResolvedMeta,
) -> Result<(), WriteError> {
    if let Some(owner) = meta.owner {
        apply_owner_sync(tmp, owner).map_err(|source| WriteError::Chown {
            path: tmp.to_path_buf(),
            source,
        })?;
    }

    if let Some(mode) = meta.mode {
        apply_mode_sync(tmp, mode).map_err(|source| WriteError::Chmod {
            path: tmp.to_path_buf(),
            source,
        })?;
    }

    pre_rename_sync(target).map_err(|source| rename_error(tmp, target, source))?;
    std::fs::rename(tmp, target).map_err(|source| rename_error(tmp, target, source))?;
    post_rename_sync(target);

    Ok(())
}

fn rename_error(tmp: &Path, target: &Path, source: io::Error) -> WriteError {
    WriteError::Rename {
        from: tmp.to_path_buf(),
        to: target.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_replaces_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.txt");
        let tmp = dir.path().join("a.txt.deadbeef");
        std::fs::write(&target, "old").unwrap();
        std::fs::write(&tmp, "new").unwrap();

        finalize_sync(&tmp, &target, &ResolvedMeta::default()).unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
        assert!(!tmp.exists());
    }

    #[cfg(unix)]
    #[test]
    fn mode_applies_before_rename() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.txt");
        let tmp = dir.path().join("a.txt.deadbeef");
        std::fs::write(&tmp, "new").unwrap();

        let meta = ResolvedMeta {
            mode: Some(0o604),
            owner: None,
        };
        finalize_sync(&tmp, &target, &meta).unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o604);
    }

    #[test]
    fn rename_onto_directory_fails_and_reports_rename() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("inner.txt"), "keep").unwrap();
        let tmp = dir.path().join("occupied.deadbeef");
        std::fs::write(&tmp, "new").unwrap();

        let err = finalize_sync(&tmp, &target, &ResolvedMeta::default()).unwrap_err();
        assert_eq!(err.code(), "rename");
        assert!(target.join("inner.txt").exists(), "target untouched");
    }
}
