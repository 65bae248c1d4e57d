//! GLB container inspection utilities

use serde::Serialize;
use std::path::Path;

use super::{GlbFile, read_glb};
use crate::error::Result;

/// Information about a GLB container.
#[derive(Debug, Clone, Serialize)]
pub struct GlbInfo {
    pub version: u32,
    /// Total length declared by the header.
    pub declared_length: u32,
    /// Actual file size on disk.
    pub file_size: u64,
    pub num_chunks: usize,
    pub has_bin_chunk: bool,
    pub chunks: Vec<ChunkSummary>,
}

/// Information about one chunk.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkSummary {
    pub index: usize,
    /// Printable chunk type tag (`JSON`, `BIN`, or an unknown tag).
    pub kind: String,
    pub offset: u64,
    pub length: u32,
}

/// Get information about a GLB file's container structure.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid GLB
/// container.
pub fn inspect_glb<P: AsRef<Path>>(source: P) -> Result<GlbInfo> {
    let source_path = source.as_ref();
    let file_size = std::fs::metadata(source_path)?.len();
    let glb = read_glb(source_path)?;
    Ok(container_info(&glb, file_size))
}

/// Build container info from an already-parsed file.
pub fn container_info(glb: &GlbFile, file_size: u64) -> GlbInfo {
    let chunks: Vec<ChunkSummary> = glb
        .chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| ChunkSummary {
            index,
            kind: chunk.tag(),
            offset: chunk.offset,
            length: chunk.length,
        })
        .collect();

    GlbInfo {
        version: glb.header.version,
        declared_length: glb.header.length,
        file_size,
        num_chunks: chunks.len(),
        has_bin_chunk: glb.bin.is_some(),
        chunks,
    }
}
