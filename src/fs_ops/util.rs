use std::io;
use std::path::Path;

/// Run a blocking filesystem call on the blocking pool so async callers
/// suspend instead of stalling the scheduler. Mirrors what tokio::fs does
/// internally for the calls it wraps itself.
pub(super) async fn asyncify<T, F>(f: F) -> io::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(res) => res,
        Err(_) => Err(io::Error::other("background filesystem task failed")),
    }
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = std::fs::File::open(dir)?;
    f.sync_all()
}

#[cfg(windows)]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
