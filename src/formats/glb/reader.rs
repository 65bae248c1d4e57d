//! GLB container reading and parsing

use byteorder::{LittleEndian, ReadBytesExt};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use super::{
    CHUNK_BIN, CHUNK_HEADER_SIZE, CHUNK_JSON, ChunkInfo, GLB_MAGIC, GlbFile, GlbHeader, HEADER_SIZE,
};
use crate::error::{Error, Result};

/// Read a .glb file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, otherwise any
/// error [`parse_glb_bytes`] produces.
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_glb<P: AsRef<Path>>(path: P) -> Result<GlbFile> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    parse_glb_bytes(&buffer)
}

/// Parse GLB data from bytes
///
/// The container is accepted whole or rejected whole; there is no partial
/// success mode.
///
/// # Errors
///
/// Returns [`Error::InvalidGlbMagic`] if the data does not start with the
/// `glTF` tag, [`Error::MissingJsonChunk`] if the first chunk is not the
/// JSON chunk, and [`Error::TruncatedGlb`] if any declared length extends
/// past the available bytes.
///
/// [`Error::InvalidGlbMagic`]: crate::Error::InvalidGlbMagic
/// [`Error::MissingJsonChunk`]: crate::Error::MissingJsonChunk
/// [`Error::TruncatedGlb`]: crate::Error::TruncatedGlb
pub fn parse_glb_bytes(data: &[u8]) -> Result<GlbFile> {
    // Magic is checked before anything else is read
    if data.len() < 4 {
        return Err(Error::TruncatedGlb {
            offset: 0,
            needed: 4,
            available: data.len() as u64,
        });
    }
    let mut magic = [0u8; 4];
    magic.copy_from_slice(&data[0..4]);
    if magic != GLB_MAGIC {
        return Err(Error::InvalidGlbMagic(magic));
    }

    if data.len() < HEADER_SIZE {
        return Err(Error::TruncatedGlb {
            offset: 4,
            needed: (HEADER_SIZE - 4) as u64,
            available: (data.len() - 4) as u64,
        });
    }
    let mut cursor = Cursor::new(&data[4..HEADER_SIZE]);
    let version = cursor.read_u32::<LittleEndian>()?;
    let length = cursor.read_u32::<LittleEndian>()?;
    let header = GlbHeader {
        magic,
        version,
        length,
    };

    tracing::debug!(version, length, "read GLB header");

    // Chunks past the declared total length are ignored; chunks cut short by
    // it (or by the end of input) are truncation failures.
    let end = u64::from(length).min(data.len() as u64);

    let (first, mut pos) = read_chunk(data, HEADER_SIZE as u64)?;
    if first.kind != CHUNK_JSON {
        return Err(Error::MissingJsonChunk { found: first.kind });
    }
    let json = chunk_payload(data, first).to_vec();

    let mut chunks = vec![first];
    let mut bin = None;
    while pos + CHUNK_HEADER_SIZE as u64 <= end {
        let (chunk, next) = read_chunk(data, pos)?;
        if bin.is_none() && chunk.kind == CHUNK_BIN {
            bin = Some(chunk);
        }
        chunks.push(chunk);
        pos = next;
    }

    tracing::debug!(
        chunks = chunks.len(),
        has_bin = bin.is_some(),
        "parsed GLB container"
    );

    Ok(GlbFile {
        header,
        json,
        bin,
        chunks,
    })
}

/// Read one chunk header at `offset` and validate that its payload fits.
/// Returns the chunk and the offset of the next chunk header.
fn read_chunk(data: &[u8], offset: u64) -> Result<(ChunkInfo, u64)> {
    let available = data.len() as u64 - offset;
    if available < CHUNK_HEADER_SIZE as u64 {
        return Err(Error::TruncatedGlb {
            offset,
            needed: CHUNK_HEADER_SIZE as u64,
            available,
        });
    }

    let mut cursor = Cursor::new(&data[offset as usize..]);
    let length = cursor.read_u32::<LittleEndian>()?;
    let mut kind = [0u8; 4];
    cursor.read_exact(&mut kind)?;

    let payload = offset + CHUNK_HEADER_SIZE as u64;
    let remaining = data.len() as u64 - payload;
    if u64::from(length) > remaining {
        return Err(Error::TruncatedGlb {
            offset: payload,
            needed: u64::from(length),
            available: remaining,
        });
    }

    let chunk = ChunkInfo {
        kind,
        offset: payload,
        length,
    };
    Ok((chunk, payload + u64::from(length)))
}

fn chunk_payload(data: &[u8], chunk: ChunkInfo) -> &[u8] {
    let start = chunk.offset as usize;
    &data[start..start + chunk.length as usize]
}
