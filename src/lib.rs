//! Core library for `safewrite`.
//!
//! Durable, crash-safe replacement of a file's contents. A caller hands us
//! a target path and new content; we guarantee the target ends up with
//! either its old contents or the complete new contents, never a partial
//! write, and that the replacement keeps the original file's permission
//! bits and ownership unless told otherwise.
//!
//! ```no_run
//! use safewrite::{write_file, WriteOptions};
//!
//! # async fn demo() -> Result<(), safewrite::WriteError> {
//! write_file("/etc/myapp/state.json", r#"{"ok":true}"#, WriteOptions::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Concurrent [`write_file`] calls aimed at the same resolved path run one
//! at a time in arrival order; distinct paths proceed concurrently.
//! [`write_file_sync`] offers the same replacement without the queue.

pub mod encoding;
pub mod errors;
pub mod fs_ops;
pub mod output;

pub use encoding::{Content, Encoding};
pub use errors::WriteError;
pub use fs_ops::{Ownership, WriteOptions, next_temp_path, write_file, write_file_sync};
