//! Concurrent writers on one path serialize: a reader only ever observes a
//! complete payload, and the final contents belong to one writer.

use safewrite::{WriteOptions, write_file};
use serial_test::serial;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn readers_never_observe_partial_content() {
    let td = tempfile::tempdir().unwrap();
    let target = td.path().join("contended.txt");

    const LEN: usize = 256 * 1024;
    let payloads: Vec<Vec<u8>> = [b'a', b'b', b'c']
        .iter()
        .map(|&b| vec![b; LEN])
        .collect();
    fs::write(&target, &payloads[0]).unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let reader = {
        let target = target.clone();
        let done = Arc::clone(&done);
        let payloads = payloads.clone();
        std::thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                let bytes = fs::read(&target).expect("target path must always exist");
                assert!(
                    payloads.iter().any(|p| p == &bytes),
                    "observed a partial file of {} bytes",
                    bytes.len()
                );
            }
        })
    };

    let mut tasks = Vec::new();
    for round in 0..12 {
        let target = target.clone();
        let payload = payloads[round % payloads.len()].clone();
        tasks.push(tokio::spawn(async move {
            write_file(&target, payload, WriteOptions::default()).await
        }));
    }
    for t in tasks {
        t.await.unwrap().expect("every serialized write succeeds");
    }

    done.store(true, Ordering::Relaxed);
    reader.join().unwrap();

    let final_bytes = fs::read(&target).unwrap();
    assert!(payloads.iter().any(|p| p == &final_bytes));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn distinct_paths_proceed_concurrently() {
    let td = tempfile::tempdir().unwrap();
    let a = td.path().join("a.txt");
    let b = td.path().join("b.txt");

    let (ra, rb) = tokio::join!(
        write_file(&a, "alpha", WriteOptions::default()),
        write_file(&b, "beta", WriteOptions::default()),
    );
    ra.unwrap();
    rb.unwrap();

    assert_eq!(fs::read_to_string(&a).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(&b).unwrap(), "beta");
}
