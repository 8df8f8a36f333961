//! Header-only verification pass.
//!
//! Re-parses each file's format chunk (no data streaming) and flags anything
//! at or above 32 bits per sample. 32-bit integer PCM and 32-bit float are
//! indistinguishable by width alone, so both are flagged identically.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::WavResult;
use crate::format::WaveFormat;
use crate::parser::read_format;

/// Bit depth at or above which a file is illegal for the target device.
pub const ILLEGAL_BIT_DEPTH: u16 = 32;

/// A file whose header could not be read during verification.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyFailure {
    /// Path of the unreadable file.
    pub path: PathBuf,
    /// Parse or I/O error description.
    pub error: String,
}

/// Outcome of a verification pass.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    /// True if no file is at or above [`ILLEGAL_BIT_DEPTH`].
    pub passed: bool,
    /// Offending file paths, in input order.
    pub offenders: Vec<PathBuf>,
    /// Files whose header could not be parsed; these do not flip `passed`.
    pub failures: Vec<VerifyFailure>,
}

/// Reads the format chunk of a single file without touching sample data.
pub fn read_file_format(path: &Path) -> WavResult<WaveFormat> {
    let mut reader = BufReader::new(File::open(path)?);
    read_format(&mut reader)
}

/// Checks every path's bit depth against [`ILLEGAL_BIT_DEPTH`].
///
/// Never mutates files; unreadable files are recorded and the pass continues.
pub fn verify_files<I>(paths: I) -> VerifyReport
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut offenders = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        match read_file_format(&path) {
            Ok(format) => {
                if format.bits_per_sample >= ILLEGAL_BIT_DEPTH {
                    offenders.push(path);
                }
            }
            Err(e) => failures.push(VerifyFailure {
                path,
                error: e.to_string(),
            }),
        }
    }

    VerifyReport {
        passed: offenders.is_empty(),
        offenders,
        failures,
    }
}
