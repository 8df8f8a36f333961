//! RIFF chunk walking and format-chunk extraction.
//!
//! A single forward pass over the container: validate the 12-byte RIFF/WAVE
//! header, decode the first "fmt " chunk, and locate the "data" chunk without
//! consuming its payload. Unknown chunks ("LIST", "fact", ...) are skipped by
//! their declared size, rounded up to an even boundary per RIFF padding.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{WavError, WavResult};
use crate::format::WaveFormat;

/// Byte offset and length of a chunk payload within the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLocation {
    /// Offset of the payload, just past the 8-byte chunk header.
    pub offset: u64,
    /// Declared payload length in bytes.
    pub len: u32,
}

/// Parsed structure of a WAV container.
#[derive(Debug, Clone, Copy)]
pub struct ParsedContainer {
    /// Decoded format-chunk fields.
    pub format: WaveFormat,
    /// Location of the "fmt " chunk payload.
    pub fmt_chunk: ChunkLocation,
    /// Location of the "data" chunk payload.
    pub data_chunk: ChunkLocation,
    /// Size declared in the RIFF header.
    pub riff_size: u32,
}

/// An open WAV file together with its parsed structure.
///
/// Created per file and exclusively owned by the operation processing that
/// file; the file is closed on drop.
#[derive(Debug)]
pub struct ContainerHandle {
    file: BufReader<File>,
    parsed: ParsedContainer,
}

impl ContainerHandle {
    /// Opens and fully parses a WAV file.
    pub fn open(path: &Path) -> WavResult<Self> {
        let mut file = BufReader::new(File::open(path)?);
        let parsed = parse_container(&mut file)?;
        Ok(Self { file, parsed })
    }

    /// Decoded format-chunk fields.
    pub fn format(&self) -> &WaveFormat {
        &self.parsed.format
    }

    /// Location of the "data" chunk payload.
    pub fn data_chunk(&self) -> ChunkLocation {
        self.parsed.data_chunk
    }

    /// Size declared in the RIFF header.
    pub fn riff_size(&self) -> u32 {
        self.parsed.riff_size
    }

    /// Seeks back to the start of the data chunk and returns a reader
    /// bounded to its declared length.
    pub fn data_reader(&mut self) -> WavResult<impl Read + '_> {
        self.file.seek(SeekFrom::Start(self.parsed.data_chunk.offset))?;
        Ok((&mut self.file).take(self.parsed.data_chunk.len as u64))
    }
}

/// Parses a complete container: format chunk plus data chunk location.
///
/// Fails with [`WavError::MissingFormatChunk`] if "data" precedes "fmt ",
/// [`WavError::MissingDataChunk`] if the file ends without a "data" chunk,
/// and [`WavError::TruncatedChunk`] if a declared size runs past end of file.
/// The stored block align is checked against channels and sample width.
pub fn parse_container<R: Read + Seek>(reader: &mut R) -> WavResult<ParsedContainer> {
    let parsed = walk_chunks(reader, WalkMode::Full)?;
    parsed.format.validate_block_align()?;
    Ok(parsed)
}

/// Parses the header only: stops at the "fmt " chunk and tolerates a missing
/// "data" chunk. Used by the verify pass, which never streams sample data.
pub fn read_format<R: Read + Seek>(reader: &mut R) -> WavResult<WaveFormat> {
    walk_chunks(reader, WalkMode::FormatOnly).map(|parsed| parsed.format)
}

#[derive(PartialEq)]
enum WalkMode {
    Full,
    FormatOnly,
}

fn walk_chunks<R: Read + Seek>(reader: &mut R, mode: WalkMode) -> WavResult<ParsedContainer> {
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;

    let mut header = [0u8; 12];
    if end < 12 {
        return Err(WavError::NotRiffContainer);
    }
    reader.read_exact(&mut header)?;
    if &header[0..4] != b"RIFF" || &header[8..12] != b"WAVE" {
        return Err(WavError::NotRiffContainer);
    }
    let riff_size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

    let mut fmt: Option<(WaveFormat, ChunkLocation)> = None;
    let mut pos: u64 = 12;

    // A dangling partial chunk header at the tail ends the walk.
    while pos + 8 <= end {
        let mut chunk_header = [0u8; 8];
        reader.read_exact(&mut chunk_header)?;
        let id = [chunk_header[0], chunk_header[1], chunk_header[2], chunk_header[3]];
        let size = u32::from_le_bytes([chunk_header[4], chunk_header[5], chunk_header[6], chunk_header[7]]);
        let payload = pos + 8;

        if payload + size as u64 > end {
            return Err(WavError::TruncatedChunk {
                chunk: String::from_utf8_lossy(&id).into_owned(),
                declared: size,
                available: end - payload,
            });
        }

        match &id {
            b"fmt " => {
                if size < 16 {
                    return Err(WavError::MalformedFormatChunk { declared: size });
                }
                let mut block = [0u8; 16];
                reader.read_exact(&mut block)?;
                let format = WaveFormat::from_bytes(&block);
                let loc = ChunkLocation {
                    offset: payload,
                    len: size,
                };
                if mode == WalkMode::FormatOnly {
                    return Ok(ParsedContainer {
                        format,
                        fmt_chunk: loc,
                        // Placeholder; FormatOnly callers never see the data chunk.
                        data_chunk: ChunkLocation { offset: 0, len: 0 },
                        riff_size,
                    });
                }
                if fmt.is_none() {
                    fmt = Some((format, loc));
                }
            }
            b"data" => {
                let (format, fmt_chunk) = fmt.ok_or(WavError::MissingFormatChunk)?;
                return Ok(ParsedContainer {
                    format,
                    fmt_chunk,
                    data_chunk: ChunkLocation {
                        offset: payload,
                        len: size,
                    },
                    riff_size,
                });
            }
            _ => {}
        }

        pos = payload + padded(size);
        reader.seek(SeekFrom::Start(pos))?;
    }

    if fmt.is_none() {
        Err(WavError::MissingFormatChunk)
    } else {
        Err(WavError::MissingDataChunk)
    }
}

/// Chunk payload size rounded up to an even boundary per RIFF padding rules.
fn padded(size: u32) -> u64 {
    (size as u64 + 1) & !1
}
