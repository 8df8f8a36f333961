//! Bit-depth rewriting with atomic in-place replacement.
//!
//! Conversion is a lossy, non-dithered truncation: each sample keeps its most
//! significant `target_bits` bits (a right shift by the dropped bit count).
//! With both widths being byte multiples this amounts to keeping the top
//! `target_bits / 8` bytes of every little-endian sample.
//!
//! The rewritten container is staged in a temporary file next to the original
//! and swapped in with a rename. The temporary file is removed on every exit
//! path except the successful rename, so a failure never leaves a half-written
//! file at the original path.

use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{WavError, WavResult};
use crate::format::{WaveFormat, FORMAT_TAG_PCM};
use crate::parser::ContainerHandle;
use crate::result::ConversionResult;
use crate::writer::write_header;

/// Sample frames converted per streamed block.
const FRAMES_PER_BLOCK: usize = 4096;

/// Checks that a target bit depth is a byte multiple no wider than 32 bits.
///
/// An invalid value is a configuration error; callers should fail the whole
/// run before touching any file.
pub fn validate_target_bits(bits: u16) -> WavResult<()> {
    match bits {
        8 | 16 | 24 | 32 => Ok(()),
        _ => Err(WavError::InvalidTargetBits { bits }),
    }
}

/// Converts a batch of files, one result per path, in input order.
///
/// Per-file failures are recorded in that file's result; the batch always
/// runs to completion.
pub fn convert_files<I>(paths: I, target_bits: u16) -> Vec<ConversionResult>
where
    I: IntoIterator<Item = PathBuf>,
{
    paths
        .into_iter()
        .map(|path| convert_file(&path, target_bits))
        .collect()
}

/// Converts a single file in place if its bit depth exceeds the target.
pub fn convert_file(path: &Path, target_bits: u16) -> ConversionResult {
    if let Err(e) = validate_target_bits(target_bits) {
        return ConversionResult::failed(path, None, target_bits, e);
    }

    let mut handle = match ContainerHandle::open(path) {
        Ok(handle) => handle,
        Err(e) => return ConversionResult::failed(path, None, target_bits, e),
    };
    let format = *handle.format();

    // Covers 32-bit float sources too: this engine never widens or
    // re-quantizes, it only drops low-order bits of integer PCM.
    if format.bits_per_sample <= target_bits {
        return ConversionResult::skipped(
            path,
            format.bits_per_sample,
            target_bits,
            "already at or below target",
        );
    }
    if format.format_tag != FORMAT_TAG_PCM {
        return ConversionResult::failed(
            path,
            Some(format.bits_per_sample),
            target_bits,
            WavError::UnsupportedFormatTag {
                tag: format.format_tag,
            },
        );
    }

    match rewrite(&mut handle, path, target_bits) {
        Ok(()) => ConversionResult::converted(path, format.bits_per_sample, target_bits),
        Err(e) => ConversionResult::failed(path, Some(format.bits_per_sample), target_bits, e),
    }
}

/// Streams the data chunk into a temporary container and swaps it in place.
pub(crate) fn rewrite(handle: &mut ContainerHandle, path: &Path, target_bits: u16) -> WavResult<()> {
    let format = *handle.format();
    // Whole frames only; trailing bytes short of a frame are dropped.
    let frames = handle.data_chunk().len as u64 / format.block_align as u64;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(WavError::write_failed)?;

    let mut src = handle.data_reader()?;
    write_converted(&mut src, tmp.as_file_mut(), &format, target_bits, frames)
        .map_err(WavError::write_failed)?;

    tmp.persist(path).map_err(WavError::write_failed)?;
    Ok(())
}

/// Writes the converted container: header, truncated frames, RIFF pad byte.
pub(crate) fn write_converted<R: Read, W: Write>(
    src: &mut R,
    dst: &mut W,
    format: &WaveFormat,
    target_bits: u16,
    frames: u64,
) -> io::Result<()> {
    let out_format = format.with_bits_per_sample(target_bits);
    let data_size = (frames * out_format.block_align as u64) as u32;

    let mut out = BufWriter::new(dst);
    write_header(&mut out, &out_format, data_size)?;

    let src_bytes = format.bytes_per_sample() as usize;
    let dst_bytes = (target_bits / 8) as usize;
    let src_frame = format.block_align as usize;

    let mut block = vec![0u8; src_frame * FRAMES_PER_BLOCK];
    let mut converted = Vec::with_capacity(dst_bytes * FRAMES_PER_BLOCK * format.channels as usize);
    let mut remaining = frames;
    while remaining > 0 {
        let take = remaining.min(FRAMES_PER_BLOCK as u64) as usize;
        let buf = &mut block[..take * src_frame];
        src.read_exact(buf)?;
        converted.clear();
        truncate_samples(buf, src_bytes, dst_bytes, &mut converted);
        out.write_all(&converted)?;
        remaining -= take as u64;
    }

    if data_size % 2 == 1 {
        out.write_all(&[0])?;
    }
    out.flush()
}

/// Keeps the most significant `dst_bytes` of each little-endian sample.
pub(crate) fn truncate_samples(src: &[u8], src_bytes: usize, dst_bytes: usize, out: &mut Vec<u8>) {
    for sample in src.chunks_exact(src_bytes) {
        out.extend_from_slice(&sample[src_bytes - dst_bytes..]);
    }
}
