//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Content comes from --input FILE when given, stdin otherwise.
//! - --uid and --gid must be supplied together.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use safewrite::Encoding;

use crate::logging::LogLevel;

/// Replace a file's contents durably and atomically.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Replace a file's contents safely: write, fsync, atomic rename"
)]
pub struct Args {
    /// File to replace.
    #[arg(value_name = "TARGET", value_hint = ValueHint::FilePath)]
    pub target: PathBuf,

    /// Read content from this file instead of stdin.
    #[arg(
        long,
        short = 'i',
        value_name = "FILE",
        value_hint = ValueHint::FilePath,
        help = "Read content from FILE instead of stdin"
    )]
    pub input: Option<PathBuf>,

    /// Write an empty file; any input is ignored.
    #[arg(long, help = "Write an empty file, ignoring stdin/--input")]
    pub empty: bool,

    /// Permission bits for the new file, octal (e.g. 644). Inherited from
    /// the existing target when omitted.
    #[arg(long, value_name = "OCTAL", value_parser = parse_octal_mode,
          help = "Permission bits, octal (default: inherit from target)")]
    pub mode: Option<u32>,

    /// Numeric owner uid for the new file. Requires --gid.
    #[arg(long, value_name = "UID", requires = "gid", help = "Owner uid (requires --gid)")]
    pub uid: Option<u32>,

    /// Numeric owner gid for the new file. Requires --uid.
    #[arg(long, value_name = "GID", requires = "uid", help = "Owner gid (requires --uid)")]
    pub gid: Option<u32>,

    /// Treat the input as text and re-encode it before writing.
    /// Without this flag the input bytes are written verbatim.
    #[arg(
        long,
        value_name = "NAME",
        help = "Treat input as UTF-8 text and write it in NAME (utf-8, utf-16le, utf-16be, latin1)"
    )]
    pub encoding: Option<Encoding>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Append logs to this file in addition to stdout.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath,
          help = "Append logs to PATH as well as stdout")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

fn parse_octal_mode(s: &str) -> Result<u32, String> {
    u32::from_str_radix(s.trim_start_matches("0o"), 8)
        .map_err(|_| format!("invalid octal mode: '{s}'"))
        .and_then(|m| {
            if m > 0o7777 {
                Err(format!("mode out of range: '{s}'"))
            } else {
                Ok(m)
            }
        })
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > default.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug {
            return LogLevel::Debug;
        }
        self.log_level
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or_default()
    }
}

pub fn parse() -> Args {
    Args::parse()
}
