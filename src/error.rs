//! Error types for `glbscope`

use thiserror::Error;

/// The error type for `glbscope` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== GLB Container Errors ====================
    /// The file is not a valid GLB container (missing glTF magic).
    #[error("invalid GLB magic: expected glTF, found {0:?}")]
    InvalidGlbMagic([u8; 4]),

    /// The first chunk in the container is not the mandatory JSON chunk.
    #[error("missing JSON chunk: first chunk has type {found:?}")]
    MissingJsonChunk {
        /// The type tag of the chunk found instead.
        found: [u8; 4],
    },

    /// A declared length extends past the end of the available bytes.
    #[error("truncated GLB: {needed} bytes needed at offset {offset}, {available} available")]
    TruncatedGlb {
        /// Byte offset at which the read was attempted.
        offset: u64,
        /// Number of bytes the declared length demands.
        needed: u64,
        /// Number of bytes actually remaining.
        available: u64,
    },

    // ==================== glTF Schema Errors ====================
    /// The JSON chunk is not valid JSON, or a known field holds a value of
    /// the wrong shape.
    #[error("glTF schema error at {path}: {message}")]
    Schema {
        /// Path of the offending field (e.g. `nodes[3]`), `$` for the
        /// document root.
        path: String,
        /// The underlying parse or deserialization message.
        message: String,
    },
}

/// A specialized Result type for `glbscope` operations.
pub type Result<T> = std::result::Result<T, Error>;
