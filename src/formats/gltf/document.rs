//! glTF document structures
//!
//! The document is built in one pass from the JSON chunk bytes and is
//! immutable afterwards. Optional fields stay `Option` so an absent value
//! and an explicitly-written default (e.g. a scale of `[0,0,0]`) remain
//! distinguishable; traversal resolves defaults, not the deserializer.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ComponentType;
use crate::error::{Error, Result};

/// A parsed glTF document.
///
/// All cross-references between entities are indices into these sequences.
/// Indices found in malformed input may be out of range; lookups validate
/// them, parsing does not.
#[derive(Debug, Clone, Default)]
pub struct GltfDocument {
    pub asset: Option<Asset>,
    pub scenes: Vec<Scene>,
    pub nodes: Vec<Node>,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub textures: Vec<Texture>,
    pub images: Vec<Image>,
    pub accessors: Vec<Accessor>,
    pub buffer_views: Vec<BufferView>,
    pub buffers: Vec<Buffer>,
}

/// Parse the JSON chunk of a GLB file into a document
///
/// One malformed field invalidates the whole document; there is no partial
/// recovery.
///
/// # Errors
///
/// Returns [`Error::Schema`] if the bytes are not valid JSON or a known
/// field holds a value of the wrong shape. The error carries the path of
/// the offending entity (e.g. `nodes[3]`), or `$` for syntax errors.
///
/// [`Error::Schema`]: crate::Error::Schema
pub fn parse_document(json: &[u8]) -> Result<GltfDocument> {
    let root: Value = serde_json::from_slice(json).map_err(|e| Error::Schema {
        path: "$".to_string(),
        message: e.to_string(),
    })?;
    let Value::Object(root) = root else {
        return Err(Error::Schema {
            path: "$".to_string(),
            message: "top-level value is not an object".to_string(),
        });
    };

    let document = GltfDocument {
        asset: optional_object(&root, "asset")?,
        scenes: entity_array(&root, "scenes")?,
        nodes: entity_array(&root, "nodes")?,
        meshes: entity_array(&root, "meshes")?,
        materials: entity_array(&root, "materials")?,
        textures: entity_array(&root, "textures")?,
        images: entity_array(&root, "images")?,
        accessors: entity_array(&root, "accessors")?,
        buffer_views: entity_array(&root, "bufferViews")?,
        buffers: entity_array(&root, "buffers")?,
    };

    tracing::debug!(
        scenes = document.scenes.len(),
        nodes = document.nodes.len(),
        meshes = document.meshes.len(),
        "parsed glTF document"
    );

    Ok(document)
}

/// Deserialize an optional top-level object field.
fn optional_object<T: DeserializeOwned>(root: &Map<String, Value>, key: &str) -> Result<Option<T>> {
    match root.get(key) {
        None => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| Error::Schema {
                path: key.to_string(),
                message: e.to_string(),
            }),
    }
}

/// Deserialize a top-level entity array, element by element so failures
/// carry the index of the offending entity.
fn entity_array<T: DeserializeOwned>(root: &Map<String, Value>, key: &str) -> Result<Vec<T>> {
    match root.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item.clone()).map_err(|e| Error::Schema {
                    path: format!("{key}[{i}]"),
                    message: e.to_string(),
                })
            })
            .collect(),
        Some(other) => Err(Error::Schema {
            path: key.to_string(),
            message: format!("expected an array, found {}", json_type_name(other)),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Asset metadata (tool provenance and format version).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub version: String,
    pub generator: Option<String>,
    pub copyright: Option<String>,
    pub min_version: Option<String>,
}

/// A scene, i.e. an ordered set of root node indices.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<usize>,
}

/// A node in the scene graph.
///
/// Children reference sibling nodes by index; malformed input may make
/// those links cyclic, so traversal carries a visited set.
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub name: Option<String>,
    pub mesh: Option<usize>,
    pub translation: Option<[f32; 3]>,
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
    #[serde(default)]
    pub children: Vec<usize>,
}

impl Node {
    /// Resolved TRS transform, with identity defaults for absent fields.
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.translation.unwrap_or([0.0, 0.0, 0.0]),
            rotation: self.rotation.unwrap_or([0.0, 0.0, 0.0, 1.0]),
            scale: self.scale.unwrap_or([1.0, 1.0, 1.0]),
        }
    }
}

/// Resolved node transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

/// A mesh: a named group of drawable primitives.
#[derive(Debug, Clone, Deserialize)]
pub struct Mesh {
    pub name: Option<String>,
    #[serde(default)]
    pub primitives: Vec<Primitive>,
}

/// One drawable unit of a mesh.
///
/// `attributes` preserves the order the semantic names were declared in the
/// source JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Primitive {
    #[serde(default)]
    pub attributes: IndexMap<String, usize>,
    pub indices: Option<usize>,
    pub material: Option<usize>,
}

/// A material with an optional PBR metallic-roughness block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: Option<String>,
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    pub normal_texture: Option<TextureRef>,
    pub emissive_texture: Option<TextureRef>,
}

/// PBR metallic-roughness parameters; every field is independently optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    pub base_color_factor: Option<[f32; 4]>,
    pub base_color_texture: Option<TextureRef>,
    pub metallic_factor: Option<f32>,
    pub roughness_factor: Option<f32>,
}

/// A texture reference from a material slot.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TextureRef {
    pub index: usize,
}

/// A texture: an image source plus an optional sampler.
#[derive(Debug, Clone, Deserialize)]
pub struct Texture {
    pub name: Option<String>,
    pub source: Option<usize>,
    pub sampler: Option<usize>,
}

/// An image, referenced by URI or embedded via a buffer view.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<usize>,
}

/// A typed view over buffer bytes (component type, element type, count).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    pub component_type: Option<u32>,
    #[serde(rename = "type")]
    pub element_type: Option<String>,
    #[serde(default)]
    pub count: u64,
    pub min: Option<Vec<f64>>,
    pub max: Option<Vec<f64>>,
}

impl Accessor {
    /// Symbolic component type; absent or unrecognized codes resolve to
    /// [`ComponentType::Unknown`].
    pub fn component(&self) -> ComponentType {
        ComponentType::from_code(self.component_type.unwrap_or(0))
    }
}

/// A byte range within a buffer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    #[serde(default)]
    pub buffer: usize,
    #[serde(default)]
    pub byte_length: u64,
    #[serde(default)]
    pub byte_offset: u64,
}

/// A backing byte buffer, external by URI or embedded in the BIN chunk.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    #[serde(default)]
    pub byte_length: u64,
    pub uri: Option<String>,
}

impl Buffer {
    /// True when the buffer's data lives in the container's BIN chunk.
    pub fn is_embedded(&self) -> bool {
        self.uri.is_none()
    }
}
