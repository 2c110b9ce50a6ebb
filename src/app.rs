//! Application orchestrator.
//! Initializes logging, gathers the payload from --input or stdin, builds
//! write options from flags, and invokes the replacement.

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use safewrite::output as out;
use safewrite::{Content, Ownership, WriteError, WriteOptions, write_file};

use crate::cli::Args;
use crate::logging::init_tracing;

/// Run the CLI application.
pub async fn run(args: Args) -> Result<()> {
    let guard = init_tracing(args.effective_log_level(), args.log_file.as_deref(), args.json)
        .map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    debug!("Starting safewrite: {:?}", args);

    let content = gather_content(&args).await?;
    let byte_count = match &content {
        Content::Bytes(b) => b.len(),
        Content::Text(s) => s.len(),
        Content::Empty => 0,
    };

    let options = WriteOptions {
        mode: args.mode,
        chown: match (args.uid, args.gid) {
            (Some(uid), Some(gid)) => Some(Ownership { uid, gid }),
            _ => None, // clap enforces the pair
        },
        encoding: args.encoding.unwrap_or_default(),
    };

    let result = match write_file(&args.target, content, options).await {
        Ok(()) => {
            info!(path = %args.target.display(), bytes = byte_count, "Replacement completed");
            out::print_user(&format!(
                "Wrote {} ({} bytes)",
                args.target.display(),
                byte_count
            ));
            Ok(())
        }
        Err(e) => {
            let code = e.code();
            match &e {
                WriteError::Open { path, source } => {
                    error!(code, kind = "open", path = %path.display(), error = %source, "Replacement failed")
                }
                WriteError::Write { path, source } => {
                    error!(code, kind = "write", path = %path.display(), error = %source, "Replacement failed")
                }
                WriteError::Flush { path, source } => {
                    error!(code, kind = "flush", path = %path.display(), error = %source, "Replacement failed")
                }
                WriteError::Chown { path, source } => {
                    error!(code, kind = "chown", path = %path.display(), error = %source, "Replacement failed")
                }
                WriteError::Chmod { path, source } => {
                    error!(code, kind = "chmod", path = %path.display(), error = %source, "Replacement failed")
                }
                WriteError::Rename { from, to, source } => {
                    #[cfg(unix)]
                    let hint: &str = match source.raw_os_error() {
                        Some(code) if code == libc::EXDEV => {
                            "cross-filesystem; target and its temp file must share a filesystem"
                        }
                        Some(code) if code == libc::EACCES || code == libc::EPERM => {
                            "permission denied; check directory perms"
                        }
                        _ => "rename refused",
                    };

                    #[cfg(not(unix))]
                    let hint: &str = match source.kind() {
                        std::io::ErrorKind::PermissionDenied => {
                            "permission denied; check directory perms"
                        }
                        _ => "rename refused",
                    };

                    error!(code, kind = "rename", hint, from = %from.display(), to = %to.display(), error = %source, "Replacement failed")
                }
                WriteError::Encode { encoding } => {
                    error!(code, kind = "encode", %encoding, "Replacement failed")
                }
            }
            out::print_error(&format!("{}", e));
            Err(e.into())
        }
    };

    // Drop the appender guard last so file logs are flushed before exit.
    drop(guard);
    result
}

/// Payload selection: --empty beats everything, then --input, then stdin.
/// With --encoding the bytes must be valid UTF-8 and are re-encoded on write.
async fn gather_content(args: &Args) -> Result<Content> {
    if args.empty {
        return Ok(Content::Empty);
    }

    let bytes = match &args.input {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("read input file '{}'", path.display()))?,
        None => {
            use tokio::io::AsyncReadExt;
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("read content from stdin")?;
            buf
        }
    };

    if args.encoding.is_some() {
        let text = String::from_utf8(bytes).context("--encoding given but input is not UTF-8 text")?;
        Ok(Content::Text(text))
    } else {
        Ok(Content::Bytes(bytes))
    }
}
