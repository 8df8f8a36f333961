//! Per-file conversion outcome types.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Outcome of processing one file.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Bits per sample before conversion, if the header could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_bits: Option<u16>,
    /// Requested target bit depth.
    pub target_bits: u16,
    /// What happened to the file.
    pub status: ConversionStatus,
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionStatus {
    /// The file was rewritten at the target bit depth.
    Converted,
    /// The file was left untouched.
    Skipped {
        /// Why no rewrite was needed.
        reason: String,
    },
    /// Parsing or rewriting failed; the original file is intact.
    Failed {
        /// The underlying error.
        error: String,
    },
}

impl ConversionResult {
    /// Creates a converted outcome.
    pub fn converted(path: &Path, original_bits: u16, target_bits: u16) -> Self {
        Self {
            path: path.to_path_buf(),
            original_bits: Some(original_bits),
            target_bits,
            status: ConversionStatus::Converted,
        }
    }

    /// Creates a skipped outcome.
    pub fn skipped(path: &Path, original_bits: u16, target_bits: u16, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            original_bits: Some(original_bits),
            target_bits,
            status: ConversionStatus::Skipped {
                reason: reason.into(),
            },
        }
    }

    /// Creates a failed outcome. `original_bits` is absent when the header
    /// could not even be read.
    pub fn failed(
        path: &Path,
        original_bits: Option<u16>,
        target_bits: u16,
        error: impl std::fmt::Display,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            original_bits,
            target_bits,
            status: ConversionStatus::Failed {
                error: error.to_string(),
            },
        }
    }

    /// True if the file was rewritten.
    pub fn is_converted(&self) -> bool {
        self.status == ConversionStatus::Converted
    }

    /// True if processing failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ConversionStatus::Failed { .. })
    }
}

/// Aggregate counts over a conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Files rewritten at the target depth.
    pub converted: usize,
    /// Files already at or below the target.
    pub skipped: usize,
    /// Files that could not be parsed or rewritten.
    pub failed: usize,
}

impl RunSummary {
    /// Tallies a list of per-file results.
    pub fn from_results(results: &[ConversionResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.status {
                ConversionStatus::Converted => summary.converted += 1,
                ConversionStatus::Skipped { .. } => summary.skipped += 1,
                ConversionStatus::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    /// Total number of files processed.
    pub fn total(&self) -> usize {
        self.converted + self.skipped + self.failed
    }
}
