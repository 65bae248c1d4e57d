//! # glbscope
//!
//! A pure-Rust library for inspecting GLB (binary glTF) files.
//!
//! glbscope decodes the GLB container envelope, parses the embedded glTF
//! 2.0 JSON document into a typed scene-graph model, and builds structured
//! reports over it: entity counts, node transforms, mesh primitives,
//! material/texture links, accessor layouts, and buffer provenance. It is
//! an inspection tool, not a renderer: vertex data, textures, and the
//! `.gltf`+`.bin` multi-file variant are out of scope.
//!
//! ## Quick Start
//!
//! ### Reading a GLB container
//!
//! ```no_run
//! use glbscope::formats::glb::read_glb;
//!
//! let glb = read_glb("assets/models/tree1.glb")?;
//! println!("GLB version {}, {} chunks", glb.header.version, glb.chunks.len());
//! # Ok::<(), glbscope::Error>(())
//! ```
//!
//! ### Parsing the scene description
//!
//! ```no_run
//! use glbscope::formats::glb::read_glb;
//! use glbscope::formats::gltf::{find_nodes, parse_document};
//!
//! let glb = read_glb("assets/models/sponge.glb")?;
//! let document = parse_document(&glb.json)?;
//!
//! for found in find_nodes(&document, "hand") {
//!     println!("Node {}: {}", found.index, found.name);
//! }
//! # Ok::<(), glbscope::Error>(())
//! ```
//!
//! ### Building a full report
//!
//! ```no_run
//! use glbscope::formats::gltf::extract_model_info;
//!
//! let info = extract_model_info("assets/models/stick.glb")?;
//! println!(
//!     "Nodes: {}, Meshes: {}, Materials: {}",
//!     info.document.counts.nodes,
//!     info.document.counts.meshes,
//!     info.document.counts.materials
//! );
//! # Ok::<(), glbscope::Error>(())
//! ```
//!
//! ## Error policy
//!
//! Container and schema failures are atomic: a file is decoded whole or the
//! read fails with [`Error`]. Dangling cross-references inside a decoded
//! document are *not* errors; traversal reports them as unresolved so that
//! imperfect assets can still be inspected.
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `glbscope` command-line binary

pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::glb::{
        ChunkInfo, GlbFile, GlbHeader, GlbInfo, inspect_glb, parse_glb_bytes, read_glb,
    };
    pub use crate::formats::gltf::{
        ComponentType, DocumentInfo, GltfDocument, ModelInfo, NodeMatch, RefInfo, Transform,
        display_name, document_info, extract_model_info, find_nodes, parse_document,
        reachable_nodes,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
