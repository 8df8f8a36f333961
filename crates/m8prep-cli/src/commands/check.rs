//! Check command implementation
//!
//! Standalone verify pass: re-reads the format chunk of every WAV file under
//! a directory and reports any file still at or above the illegal bit depth.
//! Files are never modified.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use m8prep_wav::{verify_files, VerifyReport, ILLEGAL_BIT_DEPTH};

use crate::scan;

use super::json_output::{error_codes, JsonError};

/// Machine-readable output of a check run.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    /// True if no file is at or above the illegal bit depth.
    pub success: bool,
    /// The illegal ceiling the files were checked against.
    pub illegal_bit_depth: u16,
    /// The verification report.
    #[serde(flatten)]
    pub report: VerifyReport,
    /// Run-level errors (configuration problems).
    pub errors: Vec<JsonError>,
}

/// Run the check command.
///
/// # Arguments
/// * `input_dir` - Directory to scan for .wav files
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if all files are legal, 1 otherwise
pub fn run(input_dir: &str, json_output: bool) -> Result<ExitCode> {
    let dir = Path::new(input_dir);
    if !dir.is_dir() {
        let message = format!("Input path is not a directory: {}", input_dir);
        if json_output {
            let output = CheckOutput {
                success: false,
                illegal_bit_depth: ILLEGAL_BIT_DEPTH,
                report: VerifyReport {
                    passed: false,
                    offenders: vec![],
                    failures: vec![],
                },
                errors: vec![JsonError::new(error_codes::INPUT_DIR, message.as_str())],
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        } else {
            anyhow::bail!(message);
        }
    }

    let report = verify_files(scan::wav_files(dir));
    let success = report.passed;

    if json_output {
        let output = CheckOutput {
            success,
            illegal_bit_depth: ILLEGAL_BIT_DEPTH,
            report,
            errors: vec![],
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&report);
    }

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Print human-readable results.
fn print_report(report: &VerifyReport) {
    println!("{}", "Bit-Depth Check".cyan().bold());
    println!("{}", "===============".dimmed());

    if report.passed {
        println!(
            "{} all files are below {} bits",
            "PASS".green(),
            ILLEGAL_BIT_DEPTH
        );
    } else {
        println!(
            "{} files at or above {} bits:",
            "FAIL".red().bold(),
            ILLEGAL_BIT_DEPTH
        );
        for path in &report.offenders {
            println!("  {} {}", "-".red(), path.display());
        }
    }

    if !report.failures.is_empty() {
        println!("\n{}", "Unreadable files".yellow());
        for failure in &report.failures {
            println!(
                "  {} {} - {}",
                "-".yellow(),
                failure.path.display(),
                failure.error
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use std::fs;

    fn tiny_wav(format_tag: u16, bits: u16) -> Vec<u8> {
        let block_align = bits / 8;
        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + block_align as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&format_tag.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes());
        wav.extend_from_slice(&44100u32.to_le_bytes());
        wav.extend_from_slice(&(44100 * block_align as u32).to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&bits.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(block_align as u32).to_le_bytes());
        wav.extend_from_slice(&vec![0u8; block_align as usize]);
        wav
    }

    #[test]
    fn test_run_passes_clean_tree() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("ok.wav"), tiny_wav(1, 16)).unwrap();

        let result = run(tmp.path().to_str().unwrap(), true);
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_flags_float_file() {
        let tmp = tempfile::tempdir().unwrap();
        let original = tiny_wav(3, 32);
        let path = tmp.path().join("float.wav");
        fs::write(&path, &original).unwrap();

        let result = run(tmp.path().to_str().unwrap(), true);
        assert!(result.is_ok());
        // The check never mutates files, even offending ones.
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[test]
    fn test_run_rejects_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let result = run(missing.to_str().unwrap(), false);
        assert!(result.is_err());
    }
}
