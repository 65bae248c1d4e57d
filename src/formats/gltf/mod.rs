//! glTF 2.0 scene description
//!
//! Typed model of the JSON document a GLB container embeds, plus read-only
//! traversal and report generation over it. Cross-references between
//! entities are integer indices into the owning document's sequences; they
//! are validated when reports are built, never at parse time, so imperfect
//! assets still open for inspection.

mod document;
mod inspect;

pub use document::{
    Accessor, Asset, Buffer, BufferView, GltfDocument, Image, Material, Mesh, Node,
    PbrMetallicRoughness, Primitive, Scene, Texture, TextureRef, Transform, parse_document,
};
pub use inspect::{
    AccessorInfo, AssetInfo, AttributeInfo, BufferInfo, BufferViewInfo, DocumentInfo,
    EntityCounts, ImageInfo, MaterialInfo, MeshInfo, ModelInfo, NodeInfo, NodeMatch,
    PrimitiveInfo, RefInfo, SceneInfo, TextureInfo, display_name, document_info,
    extract_model_info, find_nodes, reachable_nodes,
};

/// Accessor component types, keyed by the numeric codes the glTF schema
/// inherited from GL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    UnsignedInt,
    Float,
    /// Sentinel for codes outside the fixed enumeration.
    Unknown,
}

impl ComponentType {
    /// Map a numeric component-type code to its symbolic value.
    ///
    /// Unrecognized codes map to [`ComponentType::Unknown`] rather than
    /// failing.
    pub fn from_code(code: u32) -> Self {
        match code {
            5120 => Self::Byte,
            5121 => Self::UnsignedByte,
            5122 => Self::Short,
            5123 => Self::UnsignedShort,
            5125 => Self::UnsignedInt,
            5126 => Self::Float,
            _ => Self::Unknown,
        }
    }

    /// Get the symbolic name of this component type
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Byte => "BYTE",
            Self::UnsignedByte => "UNSIGNED_BYTE",
            Self::Short => "SHORT",
            Self::UnsignedShort => "UNSIGNED_SHORT",
            Self::UnsignedInt => "UNSIGNED_INT",
            Self::Float => "FLOAT",
            Self::Unknown => "UNKNOWN",
        }
    }
}
