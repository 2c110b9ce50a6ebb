use safewrite::{Content, WriteOptions, write_file};
use std::fs;

#[tokio::test]
async fn absent_content_produces_empty_file() {
    let td = tempfile::tempdir().unwrap();
    let target = td.path().join("empty.txt");

    write_file(&target, Content::Empty, WriteOptions::default())
        .await
        .unwrap();

    let meta = fs::metadata(&target).unwrap();
    assert!(meta.is_file());
    assert_eq!(meta.len(), 0);
}

#[tokio::test]
async fn absent_content_truncates_existing_file() {
    let td = tempfile::tempdir().unwrap();
    let target = td.path().join("full.txt");
    fs::write(&target, "previous contents").unwrap();

    write_file(&target, Content::Empty, WriteOptions::default())
        .await
        .unwrap();

    assert_eq!(fs::metadata(&target).unwrap().len(), 0);
}
