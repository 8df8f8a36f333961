//! Canonical WAV header writing.

use std::io::{self, Write};

use crate::format::WaveFormat;

/// Size of the RIFF header plus a 16-byte fmt chunk and the data chunk header.
pub const CANONICAL_HEADER_LEN: u32 = 44;

/// Writes a canonical RIFF/WAVE header for `data_size` bytes of sample data.
///
/// The caller streams the sample data afterwards, plus one zero pad byte when
/// `data_size` is odd (the pad is already accounted for in the RIFF size).
pub fn write_header<W: Write>(writer: &mut W, format: &WaveFormat, data_size: u32) -> io::Result<()> {
    let riff_size = CANONICAL_HEADER_LEN - 8 + data_size + (data_size % 2);

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&format.format_tag.to_le_bytes())?;
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.avg_bytes_per_sec.to_le_bytes())?;
    writer.write_all(&format.block_align.to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk header
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;

    Ok(())
}
