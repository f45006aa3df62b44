//! VOX to Wavefront OBJ export
//!
//! Imports a VOX file and writes the generated quad meshes as an OBJ file
//! with one object per model/color part, plus a material library carrying
//! palette colors and emission.
//!
//! Usage: cargo run --example vox_to_obj -- scene.vox scene.obj [voxel_size]

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use voxmesh::{import_vox_bytes, material_props, palette_color, ImportOptions, VoxImport};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (input, PathBuf::from(output)),
        _ => bail!("usage: vox_to_obj <scene.vox> <scene.obj> [voxel_size]"),
    };
    let voxel_size: f32 = match args.next() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("voxel_size {raw:?} is not a number"))?,
        None => 1.0,
    };

    let bytes = std::fs::read(&input).with_context(|| format!("failed to read {input}"))?;
    let options = ImportOptions {
        voxel_size,
        ..ImportOptions::default()
    };
    let import = import_vox_bytes(&bytes, &options).context("import failed")?;

    let mtl_path = output.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("materials.mtl")
        .to_string();

    std::fs::write(&mtl_path, render_mtl(&import))
        .with_context(|| format!("failed to write {}", mtl_path.display()))?;
    std::fs::write(&output, render_obj(&import, &mtl_name))
        .with_context(|| format!("failed to write {}", output.display()))?;

    let quads: usize = import
        .meshes
        .iter()
        .map(voxmesh::model_quad_count)
        .sum();
    println!(
        "wrote {} ({} models, {} quads) and {}",
        output.display(),
        import.meshes.len(),
        quads,
        mtl_path.display()
    );
    Ok(())
}

/// One material per color index that any part references.
fn render_mtl(import: &VoxImport) -> String {
    let used: BTreeSet<u8> = import
        .meshes
        .iter()
        .flat_map(|mesh| mesh.parts.iter().map(|part| part.color))
        .collect();

    let mut mtl = String::from("# voxmesh palette export\n");
    for index in used {
        let color = palette_color(&import.palette, index);
        let props = material_props(&import.materials, index);
        mtl.push_str(&format!("\nnewmtl color_{index}\n"));
        mtl.push_str(&format!("Kd {:.6} {:.6} {:.6}\n", color.r, color.g, color.b));
        mtl.push_str(&format!("d {:.6}\n", color.a));
        if props.emission > 0.0 {
            mtl.push_str(&format!(
                "Ke {:.6} {:.6} {:.6}\n",
                color.r * props.emission,
                color.g * props.emission,
                color.b * props.emission
            ));
        }
    }
    mtl
}

/// Quad faces, 1-based global vertex indexing, one object per part.
fn render_obj(import: &VoxImport, mtl_name: &str) -> String {
    let mut obj = String::from("# voxmesh quad export\n");
    obj.push_str(&format!("mtllib {mtl_name}\n"));

    let mut vertex_base = 1usize;
    for mesh in &import.meshes {
        for part in &mesh.parts {
            obj.push_str(&format!("\no model{}_color{}\n", mesh.model_id, part.color));
            obj.push_str(&format!("usemtl color_{}\n", part.color));
            for vertex in &part.vertices {
                obj.push_str(&format!(
                    "v {:.6} {:.6} {:.6}\n",
                    vertex.position[0], vertex.position[1], vertex.position[2]
                ));
            }
            for quad in &part.quads {
                obj.push_str(&format!(
                    "f {} {} {} {}\n",
                    vertex_base + quad[0] as usize,
                    vertex_base + quad[1] as usize,
                    vertex_base + quad[2] as usize,
                    vertex_base + quad[3] as usize
                ));
            }
            vertex_base += part.vertices.len();
        }
    }
    obj
}
