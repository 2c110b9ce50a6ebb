//! Temp file naming.
//! Produces `<target>.<hash>` where the hash mixes a per-build identifier,
//! the process id and a process-wide invocation counter. Names never repeat
//! within a process and don't collide with concurrent sibling processes.

use std::ffi::OsString;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable per-build component, so two different builds writing next to each
/// other hash apart even with colliding pid/counter pairs.
const BUILD_IDENT: &str = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));

static INVOCATIONS: AtomicU64 = AtomicU64::new(0);

/// Next unique temp path for `target`. Pure name derivation: no I/O.
pub fn next_temp_path(target: &Path) -> PathBuf {
    let count = INVOCATIONS.fetch_add(1, Ordering::Relaxed);

    let mut hasher = DefaultHasher::new();
    BUILD_IDENT.hash(&mut hasher);
    std::process::id().hash(&mut hasher);
    count.hash(&mut hasher);

    let mut name = OsString::from(target.as_os_str());
    name.push(format!(".{:016x}", hasher.finish()));
    PathBuf::from(name)
}
