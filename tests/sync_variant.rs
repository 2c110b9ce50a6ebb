//! The blocking entry point has the same net effect, minus the queue.

use assert_fs::prelude::*;
use safewrite::{Content, WriteOptions, write_file_sync};
use std::fs;

#[test]
fn replaces_existing_content() {
    let td = assert_fs::TempDir::new().unwrap();
    let target = td.child("a.txt");
    target.write_str("old").unwrap();

    write_file_sync(target.path(), "new", WriteOptions::default()).unwrap();

    target.assert("new");
}

#[test]
fn creates_missing_target() {
    let td = assert_fs::TempDir::new().unwrap();
    let target = td.child("fresh.txt");

    write_file_sync(target.path(), "hello", WriteOptions::default()).unwrap();

    target.assert("hello");
}

#[test]
fn absent_content_produces_empty_file() {
    let td = assert_fs::TempDir::new().unwrap();
    let target = td.child("empty.txt");

    write_file_sync(target.path(), Content::Empty, WriteOptions::default()).unwrap();

    assert_eq!(fs::metadata(target.path()).unwrap().len(), 0);
}

#[cfg(unix)]
#[test]
fn inherits_mode_like_the_async_path() {
    use std::os::unix::fs::PermissionsExt;

    let td = assert_fs::TempDir::new().unwrap();
    let target = td.child("a.txt");
    target.write_str("old").unwrap();
    fs::set_permissions(target.path(), fs::Permissions::from_mode(0o640)).unwrap();

    write_file_sync(target.path(), "new", WriteOptions::default()).unwrap();

    let mode = fs::metadata(target.path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
    target.assert("new");
}
