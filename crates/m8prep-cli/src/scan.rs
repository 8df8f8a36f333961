//! Directory scanning for WAV files.
//!
//! The engine itself consumes an explicit sequence of resolved paths; this
//! module is the only place that knows how those paths are found.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively collects files whose extension is `.wav`, case-insensitively.
///
/// Results are sorted for deterministic output.
pub fn wav_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_lowercase() == "wav")
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}
