//! Convert command implementation
//!
//! Scans a directory tree for WAV files and rewrites every file whose bit
//! depth exceeds the target, in place. Per-file failures are reported and the
//! batch continues; only configuration errors abort the run.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use m8prep_wav::{
    convert_file, validate_target_bits, ConversionResult, ConversionStatus, RunSummary,
};

use crate::scan;

use super::json_output::{error_codes, JsonError};

/// Machine-readable output of a conversion run.
#[derive(Debug, Serialize)]
pub struct ConvertOutput {
    /// True if no file failed.
    pub success: bool,
    /// Requested target bit depth.
    pub target_bits: u16,
    /// Aggregate counts.
    pub summary: RunSummary,
    /// One entry per processed file.
    pub results: Vec<ConversionResult>,
    /// Run-level errors (configuration problems).
    pub errors: Vec<JsonError>,
}

/// Run the convert command.
///
/// # Arguments
/// * `input_dir` - Directory to scan for .wav files
/// * `bits` - Target bit depth (8, 16 or 24)
/// * `force` - Clear the read-only bit before rewriting
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if no file failed, 1 otherwise
pub fn run(input_dir: &str, bits: u16, force: bool, json_output: bool) -> Result<ExitCode> {
    if let Err(e) = validate_target_bits(bits) {
        return fatal(json_output, bits, error_codes::TARGET_BITS, e.to_string());
    }

    let dir = Path::new(input_dir);
    if !dir.is_dir() {
        return fatal(
            json_output,
            bits,
            error_codes::INPUT_DIR,
            format!("Input path is not a directory: {}", input_dir),
        );
    }

    let wav_files = scan::wav_files(dir);

    let mut results = Vec::with_capacity(wav_files.len());
    for path in &wav_files {
        if force {
            clear_readonly(path);
        }
        results.push(convert_file(path, bits));
    }

    let summary = RunSummary::from_results(&results);
    let success = summary.failed == 0;

    if json_output {
        let output = ConvertOutput {
            success,
            target_bits: bits,
            summary,
            results,
            errors: vec![],
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_results(&results, &summary, bits);
    }

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Report a fatal configuration error without touching any file.
fn fatal(json_output: bool, bits: u16, code: &str, message: String) -> Result<ExitCode> {
    if json_output {
        let output = ConvertOutput {
            success: false,
            target_bits: bits,
            summary: RunSummary::default(),
            results: vec![],
            errors: vec![JsonError::new(code, message.as_str())],
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(ExitCode::from(1))
    } else {
        anyhow::bail!(message);
    }
}

/// Best-effort removal of the read-only bit before the rewrite; if it fails,
/// the conversion surfaces its own error for the file.
fn clear_readonly(path: &Path) {
    if let Ok(metadata) = fs::metadata(path) {
        let mut perms = metadata.permissions();
        if perms.readonly() {
            #[allow(clippy::permissions_set_readonly_false)]
            perms.set_readonly(false);
            let _ = fs::set_permissions(path, perms);
        }
    }
}

/// Print human-readable results.
fn print_results(results: &[ConversionResult], summary: &RunSummary, bits: u16) {
    println!("{}", "Bit-Depth Conversion".cyan().bold());
    println!("{}", "====================".dimmed());
    println!("{} {} bits\n", "Target:".dimmed(), bits);

    for result in results {
        match &result.status {
            ConversionStatus::Converted => {
                let from = result
                    .original_bits
                    .map(|b| b.to_string())
                    .unwrap_or_else(|| "?".to_string());
                println!(
                    "{} {} ({} -> {} bits)",
                    "CONVERTED".green(),
                    result.path.display(),
                    from,
                    result.target_bits
                );
            }
            ConversionStatus::Skipped { reason } => {
                println!(
                    "{} {} ({})",
                    "SKIP".dimmed(),
                    result.path.display(),
                    reason.dimmed()
                );
            }
            ConversionStatus::Failed { error } => {
                println!(
                    "{} {} - {}",
                    "FAIL".red().bold(),
                    result.path.display(),
                    error
                );
            }
        }
    }

    println!("\n{}", "Summary".cyan().bold());
    println!("{}", "-------".dimmed());
    println!("Total:     {}", summary.total());
    println!("Converted: {}", format!("{}", summary.converted).green());
    println!("Skipped:   {}", summary.skipped);
    if summary.failed > 0 {
        println!("Failed:    {}", format!("{}", summary.failed).red());
    } else {
        println!("Failed:    0");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use m8prep_wav::read_file_format;
    use std::fs;

    /// Minimal canonical WAV: `bits` wide, mono, one frame of zeros.
    fn tiny_wav(bits: u16) -> Vec<u8> {
        let block_align = bits / 8;
        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + block_align as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes());
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
    fn test_run_converts_tree_in_place() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("hats")).unwrap();
        fs::write(tmp.path().join("wide.wav"), tiny_wav(32)).unwrap();
        fs::write(tmp.path().join("hats/narrow.wav"), tiny_wav(16)).unwrap();

        let result = run(tmp.path().to_str().unwrap(), 16, false, true);
        assert!(result.is_ok());

        let wide = read_file_format(&tmp.path().join("wide.wav")).unwrap();
        assert_eq!(wide.bits_per_sample, 16);
        let narrow = read_file_format(&tmp.path().join("hats/narrow.wav")).unwrap();
        assert_eq!(narrow.bits_per_sample, 16);
    }

    #[test]
    fn test_run_rejects_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let result = run(missing.to_str().unwrap(), 16, false, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_rejects_invalid_bits_before_touching_files() {
        let tmp = tempfile::tempdir().unwrap();
        let original = tiny_wav(32);
        fs::write(tmp.path().join("wide.wav"), &original).unwrap();

        let result = run(tmp.path().to_str().unwrap(), 12, false, false);
        assert!(result.is_err());
        assert_eq!(fs::read(tmp.path().join("wide.wav")).unwrap(), original);
    }

    #[test]
    fn test_run_converts_readonly_file_with_force() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("locked.wav");
        fs::write(&path, tiny_wav(32)).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&path, perms).unwrap();

        let result = run(tmp.path().to_str().unwrap(), 16, true, true);
        assert!(result.is_ok());
        assert_eq!(read_file_format(&path).unwrap().bits_per_sample, 16);
    }
}
