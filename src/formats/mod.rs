//! File format handlers for the GLB binary container and the glTF 2.0
//! scene description it embeds.

pub mod glb;
pub mod gltf;

// Re-export main entry points
pub use glb::{ChunkInfo, GlbFile, GlbHeader, parse_glb_bytes, read_glb};
pub use gltf::{GltfDocument, parse_document};
