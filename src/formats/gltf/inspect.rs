//! glTF document inspection utilities
//!
//! Builds serializable reports over a parsed document. All operations here
//! are total: out-of-range cross-references are surfaced as unresolved, not
//! escalated to errors, so imperfect assets can still be inspected.

use serde::Serialize;
use std::path::Path;

use super::document::{GltfDocument, Transform, parse_document};
use crate::error::Result;
use crate::formats::glb::parse_glb_bytes;

/// A cross-reference by index, checked against its target sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefInfo {
    pub index: usize,
    /// False when the index points outside the target sequence.
    pub resolved: bool,
}

impl RefInfo {
    fn check(index: usize, target_len: usize) -> Self {
        Self {
            index,
            resolved: index < target_len,
        }
    }
}

/// Top-level entity counts.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EntityCounts {
    pub scenes: usize,
    pub nodes: usize,
    pub meshes: usize,
    pub materials: usize,
    pub textures: usize,
    pub images: usize,
    pub accessors: usize,
    pub buffer_views: usize,
    pub buffers: usize,
}

/// Asset metadata summary.
#[derive(Debug, Clone, Serialize)]
pub struct AssetInfo {
    pub version: String,
    pub generator: Option<String>,
    pub copyright: Option<String>,
    pub min_version: Option<String>,
}

/// Scene summary: root references plus the cycle-safe reachable node count.
#[derive(Debug, Clone, Serialize)]
pub struct SceneInfo {
    pub index: usize,
    pub name: String,
    pub roots: Vec<RefInfo>,
    pub reachable_nodes: usize,
}

/// Node summary with resolved transform.
#[derive(Debug, Clone, Serialize)]
pub struct NodeInfo {
    pub index: usize,
    pub name: String,
    pub mesh: Option<RefInfo>,
    pub transform: Transform,
    pub children: Vec<RefInfo>,
}

/// Mesh summary.
#[derive(Debug, Clone, Serialize)]
pub struct MeshInfo {
    pub index: usize,
    pub name: String,
    pub primitives: Vec<PrimitiveInfo>,
}

/// Primitive summary with attribute links in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct PrimitiveInfo {
    pub attributes: Vec<AttributeInfo>,
    pub indices: Option<RefInfo>,
    pub material: Option<RefInfo>,
}

/// One attribute semantic and the accessor it references.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeInfo {
    pub semantic: String,
    pub accessor: RefInfo,
}

/// Material summary; every PBR field is independently optional.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialInfo {
    pub index: usize,
    pub name: String,
    pub base_color_texture: Option<RefInfo>,
    pub base_color_factor: Option<[f32; 4]>,
    pub metallic_factor: Option<f32>,
    pub roughness_factor: Option<f32>,
    pub normal_texture: Option<RefInfo>,
    pub emissive_texture: Option<RefInfo>,
}

/// Texture summary.
#[derive(Debug, Clone, Serialize)]
pub struct TextureInfo {
    pub index: usize,
    pub name: String,
    pub source: Option<RefInfo>,
    pub sampler: Option<usize>,
}

/// Image summary.
#[derive(Debug, Clone, Serialize)]
pub struct ImageInfo {
    pub index: usize,
    pub name: String,
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<RefInfo>,
}

/// Accessor summary with symbolic component type.
#[derive(Debug, Clone, Serialize)]
pub struct AccessorInfo {
    pub index: usize,
    pub element_type: String,
    pub count: u64,
    pub component_type: String,
    pub min: Option<Vec<f64>>,
    pub max: Option<Vec<f64>>,
}

/// Buffer view summary.
#[derive(Debug, Clone, Serialize)]
pub struct BufferViewInfo {
    pub index: usize,
    pub buffer: RefInfo,
    pub byte_length: u64,
    pub byte_offset: u64,
}

/// Buffer summary, noting external URI vs embedded BIN-chunk data.
#[derive(Debug, Clone, Serialize)]
pub struct BufferInfo {
    pub index: usize,
    pub byte_length: u64,
    pub uri: Option<String>,
    pub embedded: bool,
}

/// Full document report, in top-level declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub counts: EntityCounts,
    pub asset: Option<AssetInfo>,
    pub scenes: Vec<SceneInfo>,
    pub nodes: Vec<NodeInfo>,
    pub meshes: Vec<MeshInfo>,
    pub materials: Vec<MaterialInfo>,
    pub textures: Vec<TextureInfo>,
    pub images: Vec<ImageInfo>,
    pub accessors: Vec<AccessorInfo>,
    pub buffer_views: Vec<BufferViewInfo>,
    pub buffers: Vec<BufferInfo>,
}

/// Complete model info for one GLB file: container plus document report.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub file_path: String,
    pub glb_version: u32,
    pub file_size: u64,
    pub has_bin_chunk: bool,
    pub document: DocumentInfo,
}

/// Resolve an entity's display name: the explicit name, or a synthesized
/// `"{kind} {index}"` placeholder.
pub fn display_name(name: Option<&str>, kind: &str, index: usize) -> String {
    name.map_or_else(|| format!("{kind} {index}"), ToString::to_string)
}

/// A node matched by [`find_nodes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeMatch {
    pub index: usize,
    pub name: String,
}

/// Find nodes whose resolved name contains `query`, case-insensitively,
/// in index order. Unnamed nodes participate via their `Node {index}`
/// placeholder name.
pub fn find_nodes(document: &GltfDocument, query: &str) -> Vec<NodeMatch> {
    let query = query.to_lowercase();
    document
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| NodeMatch {
            index,
            name: display_name(node.name.as_deref(), "Node", index),
        })
        .filter(|candidate| candidate.name.to_lowercase().contains(&query))
        .collect()
}

/// Collect the node indices reachable from a scene's roots, depth-first in
/// declaration order.
///
/// Each node is visited at most once, so cyclic or self-referential child
/// links in malformed input terminate; out-of-range indices are skipped.
pub fn reachable_nodes(document: &GltfDocument, scene_index: usize) -> Vec<usize> {
    let Some(scene) = document.scenes.get(scene_index) else {
        return Vec::new();
    };

    let mut visited = vec![false; document.nodes.len()];
    let mut order = Vec::new();
    let mut stack: Vec<usize> = scene.nodes.iter().rev().copied().collect();

    while let Some(index) = stack.pop() {
        let Some(node) = document.nodes.get(index) else {
            continue;
        };
        if visited[index] {
            continue;
        }
        visited[index] = true;
        order.push(index);
        for &child in node.children.iter().rev() {
            stack.push(child);
        }
    }

    order
}

/// Build the full report over a parsed document.
pub fn document_info(document: &GltfDocument) -> DocumentInfo {
    let counts = EntityCounts {
        scenes: document.scenes.len(),
        nodes: document.nodes.len(),
        meshes: document.meshes.len(),
        materials: document.materials.len(),
        textures: document.textures.len(),
        images: document.images.len(),
        accessors: document.accessors.len(),
        buffer_views: document.buffer_views.len(),
        buffers: document.buffers.len(),
    };

    let asset = document.asset.as_ref().map(|asset| AssetInfo {
        version: asset.version.clone(),
        generator: asset.generator.clone(),
        copyright: asset.copyright.clone(),
        min_version: asset.min_version.clone(),
    });

    let scenes = document
        .scenes
        .iter()
        .enumerate()
        .map(|(index, scene)| SceneInfo {
            index,
            name: display_name(scene.name.as_deref(), "Scene", index),
            roots: scene
                .nodes
                .iter()
                .map(|&root| RefInfo::check(root, document.nodes.len()))
                .collect(),
            reachable_nodes: reachable_nodes(document, index).len(),
        })
        .collect();

    let nodes = document
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| NodeInfo {
            index,
            name: display_name(node.name.as_deref(), "Node", index),
            mesh: node
                .mesh
                .map(|mesh| RefInfo::check(mesh, document.meshes.len())),
            transform: node.transform(),
            children: node
                .children
                .iter()
                .map(|&child| RefInfo::check(child, document.nodes.len()))
                .collect(),
        })
        .collect();

    let meshes = document
        .meshes
        .iter()
        .enumerate()
        .map(|(index, mesh)| MeshInfo {
            index,
            name: display_name(mesh.name.as_deref(), "Mesh", index),
            primitives: mesh
                .primitives
                .iter()
                .map(|primitive| PrimitiveInfo {
                    attributes: primitive
                        .attributes
                        .iter()
                        .map(|(semantic, &accessor)| AttributeInfo {
                            semantic: semantic.clone(),
                            accessor: RefInfo::check(accessor, document.accessors.len()),
                        })
                        .collect(),
                    indices: primitive
                        .indices
                        .map(|indices| RefInfo::check(indices, document.accessors.len())),
                    material: primitive
                        .material
                        .map(|material| RefInfo::check(material, document.materials.len())),
                })
                .collect(),
        })
        .collect();

    let texture_count = document.textures.len();
    let materials = document
        .materials
        .iter()
        .enumerate()
        .map(|(index, material)| {
            let pbr = material.pbr_metallic_roughness.as_ref();
            MaterialInfo {
                index,
                name: display_name(material.name.as_deref(), "Material", index),
                base_color_texture: pbr
                    .and_then(|pbr| pbr.base_color_texture)
                    .map(|texture| RefInfo::check(texture.index, texture_count)),
                base_color_factor: pbr.and_then(|pbr| pbr.base_color_factor),
                metallic_factor: pbr.and_then(|pbr| pbr.metallic_factor),
                roughness_factor: pbr.and_then(|pbr| pbr.roughness_factor),
                normal_texture: material
                    .normal_texture
                    .map(|texture| RefInfo::check(texture.index, texture_count)),
                emissive_texture: material
                    .emissive_texture
                    .map(|texture| RefInfo::check(texture.index, texture_count)),
            }
        })
        .collect();

    let textures = document
        .textures
        .iter()
        .enumerate()
        .map(|(index, texture)| TextureInfo {
            index,
            name: display_name(texture.name.as_deref(), "Texture", index),
            source: texture
                .source
                .map(|source| RefInfo::check(source, document.images.len())),
            sampler: texture.sampler,
        })
        .collect();

    let images = document
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| ImageInfo {
            index,
            name: display_name(image.name.as_deref(), "Image", index),
            uri: image.uri.clone(),
            mime_type: image.mime_type.clone(),
            buffer_view: image
                .buffer_view
                .map(|view| RefInfo::check(view, document.buffer_views.len())),
        })
        .collect();

    let accessors = document
        .accessors
        .iter()
        .enumerate()
        .map(|(index, accessor)| AccessorInfo {
            index,
            element_type: accessor
                .element_type
                .clone()
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            count: accessor.count,
            component_type: accessor.component().as_str().to_string(),
            min: accessor.min.clone(),
            max: accessor.max.clone(),
        })
        .collect();

    let buffer_views = document
        .buffer_views
        .iter()
        .enumerate()
        .map(|(index, view)| BufferViewInfo {
            index,
            buffer: RefInfo::check(view.buffer, document.buffers.len()),
            byte_length: view.byte_length,
            byte_offset: view.byte_offset,
        })
        .collect();

    let buffers = document
        .buffers
        .iter()
        .enumerate()
        .map(|(index, buffer)| BufferInfo {
            index,
            byte_length: buffer.byte_length,
            uri: buffer.uri.clone(),
            embedded: buffer.is_embedded(),
        })
        .collect();

    DocumentInfo {
        counts,
        asset,
        scenes,
        nodes,
        meshes,
        materials,
        textures,
        images,
        accessors,
        buffer_views,
        buffers,
    }
}

/// Read a GLB file and build the complete model report.
///
/// # Errors
/// Returns an error if the file cannot be read, the container is malformed
/// or truncated, or the JSON chunk fails schema deserialization.
pub fn extract_model_info<P: AsRef<Path>>(source: P) -> Result<ModelInfo> {
    let source_path = source.as_ref();
    let data = std::fs::read(source_path)?;
    let glb = parse_glb_bytes(&data)?;
    let document = parse_document(&glb.json)?;

    Ok(ModelInfo {
        file_path: source_path.display().to_string(),
        glb_version: glb.header.version,
        file_size: data.len() as u64,
        has_bin_chunk: glb.bin.is_some(),
        document: document_info(&document),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> GltfDocument {
        parse_document(json.as_bytes()).unwrap()
    }

    #[test]
    fn test_find_nodes_case_insensitive() {
        let document = doc(
            r#"{"nodes":[
                {"name":"LeftHand"},
                {"name":"RightHand"},
                {"name":"Torso"}
            ]}"#,
        );
        let matches = find_nodes(&document, "hand");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].index, 0);
        assert_eq!(matches[0].name, "LeftHand");
        assert_eq!(matches[1].index, 1);
        assert_eq!(matches[1].name, "RightHand");
    }

    #[test]
    fn test_find_nodes_matches_placeholder_names() {
        let document = doc(r#"{"nodes":[{},{"name":"root"}]}"#);
        let matches = find_nodes(&document, "node 0");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Node 0");
    }

    #[test]
    fn test_unresolved_material_reference_is_reported() {
        let document = doc(
            r#"{
                "meshes":[{"primitives":[{"attributes":{"POSITION":0},"material":7}]}],
                "materials":[{},{},{}]
            }"#,
        );
        let info = document_info(&document);
        let material = info.meshes[0].primitives[0].material.unwrap();
        assert_eq!(material.index, 7);
        assert!(!material.resolved);
    }

    #[test]
    fn test_node_mesh_reference_in_range() {
        let document = doc(r#"{"nodes":[{"mesh":0},{"mesh":3}],"meshes":[{}]}"#);
        let info = document_info(&document);
        assert!(info.nodes[0].mesh.unwrap().resolved);
        assert!(!info.nodes[1].mesh.unwrap().resolved);
    }

    #[test]
    fn test_reachable_nodes_is_cycle_safe() {
        // 0 -> 1 -> 2 -> 0 and 1 -> 1 self-loop
        let document = doc(
            r#"{
                "scenes":[{"nodes":[0]}],
                "nodes":[
                    {"children":[1]},
                    {"children":[2,1]},
                    {"children":[0]}
                ]
            }"#,
        );
        let order = reachable_nodes(&document, 0);
        assert_eq!(order, [0, 1, 2]);
    }

    #[test]
    fn test_reachable_nodes_skips_dangling_roots() {
        let document = doc(r#"{"scenes":[{"nodes":[5,0]}],"nodes":[{}]}"#);
        assert_eq!(reachable_nodes(&document, 0), [0]);
        assert!(reachable_nodes(&document, 9).is_empty());
    }

    #[test]
    fn test_counts_and_declaration_order() {
        let document = doc(
            r#"{
                "asset":{"version":"2.0","generator":"test"},
                "scenes":[{"name":"Main","nodes":[0]}],
                "nodes":[{"name":"root","mesh":0}],
                "meshes":[{"primitives":[{"attributes":{"POSITION":0,"NORMAL":1}}]}],
                "accessors":[
                    {"componentType":5126,"type":"VEC3","count":8},
                    {"componentType":9999,"type":"VEC3","count":8}
                ]
            }"#,
        );
        let info = document_info(&document);
        assert_eq!(info.counts.scenes, 1);
        assert_eq!(info.counts.nodes, 1);
        assert_eq!(info.counts.meshes, 1);
        assert_eq!(info.counts.accessors, 2);
        assert_eq!(info.asset.as_ref().unwrap().version, "2.0");
        assert_eq!(info.scenes[0].reachable_nodes, 1);

        let semantics: Vec<&str> = info.meshes[0].primitives[0]
            .attributes
            .iter()
            .map(|attribute| attribute.semantic.as_str())
            .collect();
        assert_eq!(semantics, ["POSITION", "NORMAL"]);

        assert_eq!(info.accessors[0].component_type, "FLOAT");
        assert_eq!(info.accessors[1].component_type, "UNKNOWN");
    }

    #[test]
    fn test_material_report_fields_are_independent() {
        let document = doc(
            r#"{
                "materials":[{
                    "name":"bark",
                    "pbrMetallicRoughness":{
                        "baseColorTexture":{"index":0},
                        "roughnessFactor":0.9
                    },
                    "normalTexture":{"index":9}
                }],
                "textures":[{"source":0}],
                "images":[{"uri":"bark.png"}]
            }"#,
        );
        let info = document_info(&document);
        let material = &info.materials[0];
        assert_eq!(material.name, "bark");
        assert!(material.base_color_texture.unwrap().resolved);
        assert!(material.base_color_factor.is_none());
        assert!(material.metallic_factor.is_none());
        assert_eq!(material.roughness_factor, Some(0.9));
        let normal = material.normal_texture.unwrap();
        assert_eq!(normal.index, 9);
        assert!(!normal.resolved);
        assert!(material.emissive_texture.is_none());
    }

    #[test]
    fn test_display_name_placeholder_policy() {
        assert_eq!(display_name(Some("Torso"), "Node", 4), "Torso");
        assert_eq!(display_name(None, "Node", 4), "Node 4");
        assert_eq!(display_name(None, "Material", 0), "Material 0");
    }
}
