use safewrite::{Content, Encoding, WriteOptions, write_file};
use std::fs;

#[tokio::test]
async fn utf16le_text_lands_as_utf16le_bytes() {
    let td = tempfile::tempdir().unwrap();
    let target = td.path().join("wide.txt");

    let opts = WriteOptions {
        encoding: Encoding::Utf16Le,
        ..Default::default()
    };
    write_file(&target, Content::Text("hi".into()), opts)
        .await
        .unwrap();

    assert_eq!(fs::read(&target).unwrap(), vec![b'h', 0, b'i', 0]);
}

#[tokio::test]
async fn default_encoding_is_utf8() {
    let td = tempfile::tempdir().unwrap();
    let target = td.path().join("plain.txt");

    write_file(&target, "grüß", WriteOptions::default())
        .await
        .unwrap();

    assert_eq!(fs::read(&target).unwrap(), "grüß".as_bytes());
}

#[tokio::test]
async fn unencodable_text_fails_before_any_filesystem_work() {
    let td = tempfile::tempdir().unwrap();
    let target = td.path().join("narrow.txt");
    fs::write(&target, "keep").unwrap();

    let opts = WriteOptions {
        encoding: Encoding::Latin1,
        ..Default::default()
    };
    let err = write_file(&target, Content::Text("☃".into()), opts)
        .await
        .expect_err("latin1 cannot hold a snowman");

    assert_eq!(err.code(), "encode");
    assert_eq!(fs::read_to_string(&target).unwrap(), "keep");
    // No temp file was ever created for an unencodable payload.
    let leftovers: Vec<_> = fs::read_dir(td.path())
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("narrow.txt."))
        .collect();
    assert!(leftovers.is_empty());
}
