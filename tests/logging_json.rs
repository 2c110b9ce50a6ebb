//! --json emits machine-parseable log lines.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

#[test]
fn json_flag_produces_parseable_log_lines() {
    let td = tempfile::tempdir().unwrap();
    let target = td.path().join("out.txt");

    let me = assert_cmd::cargo::cargo_bin!("safewrite");
    let mut child = Command::new(me)
        .arg(&target)
        .arg("--json")
        .arg("--debug")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn binary");
    child.stdin.take().unwrap().write_all(b"logged").unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success());
    assert_eq!(fs::read_to_string(&target).unwrap(), "logged");

    let stdout = String::from_utf8_lossy(&out.stdout);
    let json_lines = stdout
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .filter(|v| v.get("level").is_some())
        .count();
    assert!(json_lines > 0, "expected JSON log lines, got:\n{stdout}");
}

#[test]
fn log_file_receives_a_copy() {
    let td = tempfile::tempdir().unwrap();
    let target = td.path().join("out.txt");
    let log = td.path().join("logs").join("run.log");

    let me = assert_cmd::cargo::cargo_bin!("safewrite");
    let mut child = Command::new(me)
        .arg(&target)
        .arg("--log-file")
        .arg(&log)
        .stdin(Stdio::piped())
        .spawn()
        .expect("spawn binary");
    child.stdin.take().unwrap().write_all(b"x").unwrap();
    assert!(child.wait().unwrap().success());

    let logged = fs::read_to_string(&log).expect("log file created");
    assert!(
        logged.contains("Replacement completed"),
        "log file has the completion event: {logged}"
    );
}
