//! Error types for WAV container handling.

use thiserror::Error;

/// Result type for WAV operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that can occur while parsing or rewriting a WAV container.
#[derive(Debug, Error)]
pub enum WavError {
    /// The file does not start with a RIFF header followed by "WAVE".
    #[error("not a RIFF/WAVE container")]
    NotRiffContainer,

    /// No "fmt " chunk was found before the "data" chunk.
    #[error("no fmt chunk before the data chunk")]
    MissingFormatChunk,

    /// No "data" chunk was found before end of file.
    #[error("no data chunk in container")]
    MissingDataChunk,

    /// A chunk declares more bytes than remain in the file.
    #[error("chunk '{chunk}' declares {declared} bytes but only {available} remain")]
    TruncatedChunk {
        /// Four-character chunk identifier.
        chunk: String,
        /// Size declared in the chunk header.
        declared: u32,
        /// Bytes actually remaining after the chunk header.
        available: u64,
    },

    /// The fmt chunk is too small to hold the 16-byte PCM format block.
    #[error("fmt chunk too short: {declared} bytes, need at least 16")]
    MalformedFormatChunk {
        /// Size declared in the fmt chunk header.
        declared: u32,
    },

    /// The format tag is not integer PCM.
    #[error("unsupported format tag {tag} (only uncompressed PCM, tag 1, is supported)")]
    UnsupportedFormatTag {
        /// The format tag found in the fmt chunk.
        tag: u16,
    },

    /// Block align disagrees with channels and bits per sample.
    #[error("block align {actual} does not match channels * bytes per sample ({expected})")]
    InvalidBlockAlign {
        /// `channels * (bits_per_sample / 8)`, widened past u16 so hostile
        /// headers cannot wrap it back onto the stored value.
        expected: u32,
        /// Block align stored in the fmt chunk.
        actual: u16,
    },

    /// The requested target bit depth is not usable.
    #[error("invalid target bit depth {bits}: must be 8, 16, 24 or 32")]
    InvalidTargetBits {
        /// The rejected bit depth.
        bits: u16,
    },

    /// Writing the converted container failed; the original file is intact.
    #[error("failed to write converted container: {message}")]
    ConversionWriteFailed {
        /// Underlying failure description.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WavError {
    /// Creates a write-failure error from any displayable cause.
    pub fn write_failed(cause: impl std::fmt::Display) -> Self {
        Self::ConversionWriteFailed {
            message: cause.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_chunk_message() {
        let err = WavError::TruncatedChunk {
            chunk: "data".to_string(),
            declared: 4096,
            available: 12,
        };
        assert!(err.to_string().contains("data"));
        assert!(err.to_string().contains("4096"));
    }

    #[test]
    fn test_write_failed_helper() {
        let err = WavError::write_failed("disk full");
        assert!(err.to_string().contains("disk full"));
    }
}
