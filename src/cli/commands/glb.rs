//! GLB CLI commands
//!
//! Commands for inspecting GLB files and reporting on the scene graphs
//! they embed.

use std::path::{Path, PathBuf};

use crate::formats::glb::{inspect_glb, read_glb};
use crate::formats::gltf::{
    DocumentInfo, RefInfo, extract_model_info, find_nodes, parse_document,
};

/// Inspect a GLB file and display its structure.
pub fn inspect(path: &Path) -> anyhow::Result<()> {
    anyhow::ensure!(path.exists(), "file not found: {}", path.display());

    println!("Inspecting GLB file: {}", path.display());
    println!();

    let info = inspect_glb(path)?;

    println!("GLB Version: {}", info.version);
    println!(
        "File Length: {} bytes (declared {})",
        info.file_size, info.declared_length
    );
    println!();

    println!("Chunks:");
    println!("-------");
    for chunk in &info.chunks {
        println!(
            "  [{:2}] {:4} | offset {:>8}, {:>8} bytes",
            chunk.index, chunk.kind, chunk.offset, chunk.length
        );
    }
    println!();

    let model = extract_model_info(path)?;
    print_document(&model.document);

    Ok(())
}

/// Extract model information to JSON.
pub fn extract_json(path: &Path, output: &Path) -> anyhow::Result<()> {
    anyhow::ensure!(path.exists(), "file not found: {}", path.display());

    println!("Extracting GLB info to JSON: {}", path.display());

    let model_info = extract_model_info(path)?;
    let json = serde_json::to_string_pretty(&model_info)?;
    std::fs::write(output, json)?;

    println!("Written to: {}", output.display());
    Ok(())
}

/// Search nodes by name, case-insensitively.
pub fn find(path: &Path, query: &str) -> anyhow::Result<()> {
    anyhow::ensure!(path.exists(), "file not found: {}", path.display());

    let glb = read_glb(path)?;
    let document = parse_document(&glb.json)?;
    let matches = find_nodes(&document, query);

    println!("Nodes containing {query:?}:");
    if matches.is_empty() {
        println!("  (none)");
    }
    for found in &matches {
        println!("  Node {}: {}", found.index, found.name);
    }

    Ok(())
}

/// Summarize one or more GLB files, continuing past individual failures.
pub fn summary(paths: &[PathBuf]) -> anyhow::Result<()> {
    let mut failed = 0usize;
    for path in paths {
        if let Err(e) = summarize_one(path) {
            eprintln!("{}: {e}", path.display());
            failed += 1;
        }
        println!();
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} files failed", paths.len());
    }
    Ok(())
}

fn summarize_one(path: &Path) -> anyhow::Result<()> {
    anyhow::ensure!(path.exists(), "file not found: {}", path.display());

    let model = extract_model_info(path)?;
    let document = &model.document;

    println!("=== {} ===", path.display());
    println!(
        "Nodes: {}, Meshes: {}, Materials: {}",
        document.counts.nodes, document.counts.meshes, document.counts.materials
    );
    println!("Textures: {}", document.counts.textures);

    for material in &document.materials {
        println!(
            "  Material {} '{}': baseColorTex={}, normalTex={}",
            material.index,
            material.name,
            fmt_opt_ref(material.base_color_texture),
            fmt_opt_ref(material.normal_texture)
        );
    }

    Ok(())
}

fn print_document(document: &DocumentInfo) {
    if let Some(asset) = &document.asset {
        println!("Asset Info:");
        println!("  version: {}", asset.version);
        if let Some(generator) = &asset.generator {
            println!("  generator: {generator}");
        }
        if let Some(copyright) = &asset.copyright {
            println!("  copyright: {copyright}");
        }
        if let Some(min_version) = &asset.min_version {
            println!("  minVersion: {min_version}");
        }
        println!();
    }

    if !document.scenes.is_empty() {
        println!("Scenes: {}", document.counts.scenes);
        for scene in &document.scenes {
            let roots: Vec<usize> = scene.roots.iter().map(|root| root.index).collect();
            println!("  {}: {} (nodes: {:?})", scene.index, scene.name, roots);
        }
        println!();
    }

    if !document.nodes.is_empty() {
        println!("Nodes: {}", document.counts.nodes);
        for node in &document.nodes {
            println!("  {}: {}", node.index, node.name);
            if let Some(mesh) = node.mesh {
                println!("     Mesh: {}", fmt_ref(mesh));
            }
            println!("     Translation: {:?}", node.transform.translation);
            println!("     Rotation: {:?}", node.transform.rotation);
            println!("     Scale: {:?}", node.transform.scale);
        }
        println!();
    }

    if !document.meshes.is_empty() {
        println!("Meshes: {}", document.counts.meshes);
        for mesh in &document.meshes {
            println!("  {}: {}", mesh.index, mesh.name);
            println!("     Primitives: {}", mesh.primitives.len());
            for (j, primitive) in mesh.primitives.iter().enumerate() {
                println!("       Primitive {j}:");
                for attribute in &primitive.attributes {
                    println!(
                        "         {}: accessor {}",
                        attribute.semantic,
                        fmt_ref(attribute.accessor)
                    );
                }
                if let Some(indices) = primitive.indices {
                    println!("         INDICES: accessor {}", fmt_ref(indices));
                }
                if let Some(material) = primitive.material {
                    println!("         MATERIAL: {}", fmt_ref(material));
                }
            }
        }
        println!();
    }

    if !document.materials.is_empty() {
        println!("Materials: {}", document.counts.materials);
        for material in &document.materials {
            println!("  {}: {}", material.index, material.name);
            if let Some(texture) = material.base_color_texture {
                println!("     Base Color Texture: {}", fmt_ref(texture));
            }
            if let Some(factor) = material.base_color_factor {
                println!("     Base Color Factor: {factor:?}");
            }
            if let Some(metallic) = material.metallic_factor {
                println!("     Metallic: {metallic}");
            }
            if let Some(roughness) = material.roughness_factor {
                println!("     Roughness: {roughness}");
            }
            if let Some(texture) = material.normal_texture {
                println!("     Normal Texture: {}", fmt_ref(texture));
            }
            if let Some(texture) = material.emissive_texture {
                println!("     Emissive Texture: {}", fmt_ref(texture));
            }
        }
        println!();
    }

    if !document.textures.is_empty() {
        println!("Textures: {}", document.counts.textures);
        for texture in &document.textures {
            println!("  {}: {}", texture.index, texture.name);
            if let Some(source) = texture.source {
                println!("     Image Source: {}", fmt_ref(source));
            }
            if let Some(sampler) = texture.sampler {
                println!("     Sampler: {sampler}");
            }
        }
        println!();
    }

    if !document.images.is_empty() {
        println!("Images: {}", document.counts.images);
        for image in &document.images {
            println!("  {}: {}", image.index, image.name);
            if let Some(uri) = &image.uri {
                println!("     URI: {uri}");
            }
            if let Some(mime_type) = &image.mime_type {
                println!("     MIME Type: {mime_type}");
            }
            if let Some(view) = image.buffer_view {
                println!("     Buffer View: {} (embedded)", fmt_ref(view));
            }
        }
        println!();
    }

    if !document.accessors.is_empty() {
        println!("Accessors: {}", document.counts.accessors);
        for accessor in &document.accessors {
            println!(
                "  {}: {} x {} ({})",
                accessor.index, accessor.element_type, accessor.count, accessor.component_type
            );
            if let (Some(min), Some(max)) = (&accessor.min, &accessor.max) {
                println!("     Range: {min:?} to {max:?}");
            }
        }
        println!();
    }

    if !document.buffer_views.is_empty() {
        println!("Buffer Views: {}", document.counts.buffer_views);
        for view in &document.buffer_views {
            println!(
                "  {}: Buffer {}, Length: {}, Offset: {}",
                view.index,
                fmt_ref(view.buffer),
                view.byte_length,
                view.byte_offset
            );
        }
        println!();
    }

    if !document.buffers.is_empty() {
        println!("Buffers: {}", document.counts.buffers);
        for buffer in &document.buffers {
            println!("  {}: {} bytes", buffer.index, buffer.byte_length);
            if let Some(uri) = &buffer.uri {
                println!("     URI: {uri}");
            } else {
                println!("     (embedded in BIN chunk)");
            }
        }
        println!();
    }
}

fn fmt_ref(reference: RefInfo) -> String {
    if reference.resolved {
        reference.index.to_string()
    } else {
        format!("{} (unresolved)", reference.index)
    }
}

fn fmt_opt_ref(reference: Option<RefInfo>) -> String {
    reference.map_or_else(|| "None".to_string(), fmt_ref)
}
