//! Import summary for a VOX file
//!
//! Decodes a file and prints its models, palette usage, materials and
//! generated mesh statistics. With `--json` the full import result is
//! dumped as JSON instead, for diffing or piping into other tools.
//!
//! Usage: cargo run --example vox_info -- scene.vox [voxel_size] [--json]

use anyhow::{bail, Context, Result};
use voxmesh::{
    import_vox_bytes, material_props, model_quad_count, model_vertex_count, parse_vox_bytes,
    ImportOptions, MaterialProps,
};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let mut json = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            positional.push(arg);
        }
    }

    let mut args = positional.into_iter();
    let path = match args.next() {
        Some(path) => path,
        None => bail!("usage: vox_info <scene.vox> [voxel_size] [--json]"),
    };
    let voxel_size: f32 = match args.next() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("voxel_size {raw:?} is not a number"))?,
        None => 1.0,
    };

    let bytes = std::fs::read(&path).with_context(|| format!("failed to read {path}"))?;

    if json {
        let options = ImportOptions {
            voxel_size,
            ..ImportOptions::default()
        };
        let import = import_vox_bytes(&bytes, &options).context("import failed")?;
        let rendered =
            serde_json::to_string_pretty(&import).context("import did not serialize")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("VOX Import Summary");
    println!("==================");
    println!("file: {path} ({} bytes)", bytes.len());

    let file = parse_vox_bytes(&bytes).context("stream did not decode")?;
    println!("version: {}", file.version);
    println!();

    println!("models: {}", file.models.len());
    for model in &file.models {
        println!(
            "  model {}: {}x{}x{}, {} voxels, {} colors, translation ({}, {}, {})",
            model.id,
            model.size.x,
            model.size.y,
            model.size.z,
            model.voxels.len(),
            model.colors_used.len(),
            model.translation.x,
            model.translation.y,
            model.translation.z,
        );
    }
    println!(
        "scene nodes: {} transforms, {} groups, {} shapes",
        file.graph.transforms.len(),
        file.graph.groups.len(),
        file.graph.shapes.len()
    );
    println!();

    // Materials that differ from the defaults are worth listing
    let default_props = MaterialProps::default();
    let tuned: Vec<u8> = (1..=255u8)
        .filter(|&index| material_props(&file.materials, index) != default_props)
        .collect();
    println!("materials tuned: {}", tuned.len());
    for index in tuned {
        let props = material_props(&file.materials, index);
        println!(
            "  color {index}: roughness {:.3}, metallic {:.3}, transmission {:.3}, emission {:.3}",
            props.roughness, props.metallic, props.transmission, props.emission
        );
    }
    println!();

    let options = ImportOptions {
        voxel_size,
        ..ImportOptions::default()
    };
    let import = import_vox_bytes(&bytes, &options).context("import failed")?;

    println!("meshes (voxel_size {voxel_size}):");
    let mut total_quads = 0;
    for mesh in &import.meshes {
        let quads = model_quad_count(mesh);
        total_quads += quads;
        println!(
            "  model {}: {} parts, {} quads, {} vertices",
            mesh.model_id,
            mesh.parts.len(),
            quads,
            model_vertex_count(mesh)
        );
    }
    println!("total quads: {total_quads}");

    Ok(())
}
