//! WAV format-chunk contents.

use crate::error::{WavError, WavResult};

/// Format tag for uncompressed integer PCM.
pub const FORMAT_TAG_PCM: u16 = 1;

/// Format tag for IEEE floating-point samples.
pub const FORMAT_TAG_FLOAT: u16 = 3;

/// Parsed contents of a "fmt " chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveFormat {
    /// Encoding tag (1 = integer PCM, 3 = IEEE float).
    pub format_tag: u16,
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Average bytes per second.
    pub avg_bytes_per_sec: u32,
    /// Bytes per complete sample frame (all channels).
    pub block_align: u16,
    /// Bits per sample (per channel).
    pub bits_per_sample: u16,
}

impl WaveFormat {
    /// Decodes the 16-byte PCM format block.
    pub fn from_bytes(bytes: &[u8; 16]) -> Self {
        Self {
            format_tag: u16::from_le_bytes([bytes[0], bytes[1]]),
            channels: u16::from_le_bytes([bytes[2], bytes[3]]),
            sample_rate: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            avg_bytes_per_sec: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            block_align: u16::from_le_bytes([bytes[12], bytes[13]]),
            bits_per_sample: u16::from_le_bytes([bytes[14], bytes[15]]),
        }
    }

    /// Calculates bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Block align as recomputed from channels and bits per sample.
    ///
    /// Widened to u32: both factors come straight from the file, and their
    /// product can exceed u16 for hostile headers.
    pub fn expected_block_align(&self) -> u32 {
        self.channels as u32 * self.bytes_per_sample() as u32
    }

    /// Checks the stored block align against channels and sample width.
    pub fn validate_block_align(&self) -> WavResult<()> {
        let expected = self.expected_block_align();
        if expected == 0 || self.block_align as u32 != expected {
            return Err(WavError::InvalidBlockAlign {
                expected,
                actual: self.block_align,
            });
        }
        Ok(())
    }

    /// Returns this format re-targeted to a new sample width, with block
    /// align and byte rate recomputed.
    pub fn with_bits_per_sample(&self, bits: u16) -> Self {
        // A narrower width than the validated original always fits in u16;
        // the byte rate still needs saturation for extreme sample rates.
        let block_align = (self.channels as u32 * (bits as u32 / 8)) as u16;
        let byte_rate = self.sample_rate as u64 * block_align as u64;
        Self {
            format_tag: self.format_tag,
            channels: self.channels,
            sample_rate: self.sample_rate,
            avg_bytes_per_sec: u32::try_from(byte_rate).unwrap_or(u32::MAX),
            block_align,
            bits_per_sample: bits,
        }
    }
}
