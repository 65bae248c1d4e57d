use glbscope::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

/// Build a GLB byte stream wrapping the given JSON document and optional
/// binary payload, with correct header length and 4-byte chunk alignment.
fn build_glb(json: &str, bin: Option<&[u8]>) -> Vec<u8> {
    let mut json_bytes = json.as_bytes().to_vec();
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json_bytes);

    if let Some(bin) = bin {
        let mut bin_bytes = bin.to_vec();
        while bin_bytes.len() % 4 != 0 {
            bin_bytes.push(0);
        }
        out.extend_from_slice(&(bin_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(b"BIN\0");
        out.extend_from_slice(&bin_bytes);
    }

    let total = out.len() as u32;
    out[8..12].copy_from_slice(&total.to_le_bytes());
    out
}

const TREE_JSON: &str = r#"{
    "asset": {"version": "2.0", "generator": "glbscope test suite"},
    "scenes": [{"name": "Main", "nodes": [0]}],
    "nodes": [
        {"name": "Trunk", "mesh": 0, "children": [1, 2]},
        {"name": "LeftHand", "translation": [1.0, 2.0, 3.0]},
        {"name": "RightHand", "mesh": 9}
    ],
    "meshes": [
        {"name": "TrunkMesh", "primitives": [
            {"attributes": {"POSITION": 0, "NORMAL": 1, "TEXCOORD_0": 2},
             "indices": 3, "material": 0}
        ]}
    ],
    "materials": [
        {"name": "Bark", "pbrMetallicRoughness": {
            "baseColorTexture": {"index": 0},
            "baseColorFactor": [1.0, 0.5, 0.25, 1.0],
            "roughnessFactor": 0.8
        }}
    ],
    "textures": [{"source": 0}],
    "images": [{"name": "BarkImage", "mimeType": "image/png", "bufferView": 4}],
    "accessors": [
        {"componentType": 5126, "type": "VEC3", "count": 24,
         "min": [-1.0, 0.0, -1.0], "max": [1.0, 4.0, 1.0]},
        {"componentType": 5126, "type": "VEC3", "count": 24},
        {"componentType": 5126, "type": "VEC2", "count": 24},
        {"componentType": 5123, "type": "SCALAR", "count": 36},
        {"componentType": 9999, "type": "SCALAR", "count": 1}
    ],
    "bufferViews": [
        {"buffer": 0, "byteLength": 288},
        {"buffer": 0, "byteLength": 288, "byteOffset": 288},
        {"buffer": 0, "byteLength": 192, "byteOffset": 576},
        {"buffer": 0, "byteLength": 72, "byteOffset": 768},
        {"buffer": 0, "byteLength": 64, "byteOffset": 840}
    ],
    "buffers": [{"byteLength": 904}]
}"#;

#[test]
fn test_container_round_trip() {
    let payload = [7u8, 8, 9];
    let data = build_glb(TREE_JSON, Some(&payload));

    let glb = parse_glb_bytes(&data).unwrap();
    assert_eq!(glb.header.version, 2);
    assert_eq!(glb.header.length as usize, data.len());
    assert_eq!(glb.chunks.len(), 2);

    // JSON payload is handed over byte-for-byte (alignment padding included)
    assert_eq!(glb.json.len() % 4, 0);
    assert_eq!(&glb.json[..TREE_JSON.len()], TREE_JSON.as_bytes());

    let bin = glb.bin.expect("BIN chunk should be recorded");
    let start = bin.offset as usize;
    assert_eq!(&data[start..start + 3], &payload);
}

#[test]
fn test_full_pipeline_report() {
    let data = build_glb(TREE_JSON, Some(&[0u8; 904]));
    let glb = parse_glb_bytes(&data).unwrap();
    let document = parse_document(&glb.json).unwrap();
    let info = document_info(&document);

    assert_eq!(info.counts.scenes, 1);
    assert_eq!(info.counts.nodes, 3);
    assert_eq!(info.counts.meshes, 1);
    assert_eq!(info.counts.materials, 1);
    assert_eq!(info.counts.accessors, 5);
    assert_eq!(info.counts.buffer_views, 5);
    assert_eq!(info.counts.buffers, 1);

    assert_eq!(info.asset.as_ref().unwrap().version, "2.0");
    assert_eq!(info.scenes[0].name, "Main");
    assert_eq!(info.scenes[0].reachable_nodes, 3);

    // Trunk's mesh resolves, RightHand's dangles
    assert!(info.nodes[0].mesh.unwrap().resolved);
    let dangling = info.nodes[2].mesh.unwrap();
    assert_eq!(dangling.index, 9);
    assert!(!dangling.resolved);

    // Transform defaults vs explicit translation
    assert_eq!(info.nodes[0].transform, Transform::default());
    assert_eq!(info.nodes[1].transform.translation, [1.0, 2.0, 3.0]);

    // Attribute declaration order survives deserialization
    let semantics: Vec<&str> = info.meshes[0].primitives[0]
        .attributes
        .iter()
        .map(|attribute| attribute.semantic.as_str())
        .collect();
    assert_eq!(semantics, ["POSITION", "NORMAL", "TEXCOORD_0"]);

    // Symbolic component types, unknown sentinel included
    assert_eq!(info.accessors[0].component_type, "FLOAT");
    assert_eq!(info.accessors[3].component_type, "UNSIGNED_SHORT");
    assert_eq!(info.accessors[4].component_type, "UNKNOWN");

    // The only buffer is embedded in the BIN chunk
    assert!(info.buffers[0].embedded);
}

#[test]
fn test_file_level_inspection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tree.glb");
    std::fs::write(&path, build_glb(TREE_JSON, Some(&[0u8; 16]))).unwrap();

    let container = inspect_glb(&path).unwrap();
    assert_eq!(container.version, 2);
    assert_eq!(container.num_chunks, 2);
    assert!(container.has_bin_chunk);
    assert_eq!(container.declared_length as u64, container.file_size);
    assert_eq!(container.chunks[0].kind, "JSON");
    assert_eq!(container.chunks[1].kind, "BIN");

    let model = extract_model_info(&path).unwrap();
    assert_eq!(model.glb_version, 2);
    assert!(model.has_bin_chunk);
    assert_eq!(model.document.counts.nodes, 3);

    // Reports serialize to JSON for the CLI extract command
    let json = serde_json::to_string_pretty(&model).unwrap();
    assert!(json.contains("\"LeftHand\""));
}

#[test]
fn test_find_nodes_across_pipeline() {
    let data = build_glb(TREE_JSON, None);
    let glb = parse_glb_bytes(&data).unwrap();
    let document = parse_document(&glb.json).unwrap();

    let matches = find_nodes(&document, "HAND");
    let names: Vec<&str> = matches.iter().map(|found| found.name.as_str()).collect();
    assert_eq!(names, ["LeftHand", "RightHand"]);
    assert_eq!(matches[0].index, 1);
    assert_eq!(matches[1].index, 2);
}

#[test]
fn test_minimal_document() {
    let data = build_glb(r#"{"asset":{"version":"2.0"}}"#, None);
    let glb = parse_glb_bytes(&data).unwrap();
    assert!(glb.bin.is_none());

    let document = parse_document(&glb.json).unwrap();
    assert_eq!(document.asset.as_ref().unwrap().version, "2.0");
    assert!(document.scenes.is_empty());
    assert!(document.nodes.is_empty());
    assert!(document.meshes.is_empty());
}

#[test]
fn test_decode_failures_are_atomic() {
    // Wrong magic
    let mut data = build_glb("{}", None);
    data[0] = b'X';
    assert!(matches!(
        parse_glb_bytes(&data),
        Err(Error::InvalidGlbMagic(_))
    ));

    // Truncated mid-chunk
    let data = build_glb(TREE_JSON, Some(&[0u8; 16]));
    assert!(matches!(
        parse_glb_bytes(&data[..data.len() - 8]),
        Err(Error::TruncatedGlb { .. })
    ));

    // Bad schema inside an otherwise valid container
    let data = build_glb(r#"{"nodes":[{"translation":[1.0]}]}"#, None);
    let glb = parse_glb_bytes(&data).unwrap();
    match parse_document(&glb.json) {
        Err(Error::Schema { path, .. }) => assert_eq!(path, "nodes[0]"),
        other => panic!("expected Schema error, got {other:?}"),
    }
}
