//! RIFF/WAVE container parsing and in-place bit-depth normalization.
//!
//! This crate implements the binary engine behind `m8prep`: it walks a WAV
//! file's RIFF chunks directly (no decoding library), reads the format chunk,
//! and when a file carries more bits per sample than the target it rewrites
//! the sample data at the target width and atomically swaps the new container
//! into place.
//!
//! # Overview
//!
//! - [`parser`] - RIFF chunk walking and format-chunk extraction
//! - [`convert`] - sample-width truncation and atomic in-place rewrite
//! - [`verify`] - header-only pass flagging files at or above 32 bits
//!
//! Conversion is a lossy, non-dithered truncation: each sample keeps its most
//! significant `target_bits` bits. Only uncompressed integer PCM (format
//! tag 1) is converted; anything else is rejected per file without aborting
//! the batch.
//!
//! # Example
//!
//! ```ignore
//! use m8prep_wav::{convert_file, verify_files};
//!
//! let result = convert_file(Path::new("kick.wav"), 16);
//! let report = verify_files(vec![PathBuf::from("kick.wav")]);
//! assert!(report.passed);
//! ```

pub mod convert;
pub mod error;
pub mod format;
pub mod parser;
pub mod result;
pub mod verify;
pub mod writer;


// Re-export public API
pub use convert::{convert_file, convert_files, validate_target_bits};
pub use error::{WavError, WavResult};
pub use format::WaveFormat;
pub use parser::{parse_container, read_format, ChunkLocation, ContainerHandle, ParsedContainer};
pub use result::{ConversionResult, ConversionStatus, RunSummary};
pub use verify::{read_file_format, verify_files, VerifyFailure, VerifyReport, ILLEGAL_BIT_DEPTH};
