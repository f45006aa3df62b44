//! Benchmark for VOX decoding and mesh generation
//!
//! Measures the two phases separately on dense and sparse grids, plus
//! whole-scene throughput across models.
//!
//! Run with: cargo bench --bench mesh_generation

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use voxmesh::{build_model_mesh, build_scene_meshes, parse_vox_bytes, VoxelModel};

/// Encodes a single-model stream: header, SIZE and XYZI.
fn encode_stream(size: i32, voxels: &[(u8, u8, u8, u8)]) -> Vec<u8> {
    let mut chunks = Vec::new();

    chunks.extend_from_slice(b"SIZE");
    chunks.extend_from_slice(&12i32.to_le_bytes());
    chunks.extend_from_slice(&0i32.to_le_bytes());
    for _ in 0..3 {
        chunks.extend_from_slice(&size.to_le_bytes());
    }

    chunks.extend_from_slice(b"XYZI");
    chunks.extend_from_slice(&((4 + voxels.len() * 4) as i32).to_le_bytes());
    chunks.extend_from_slice(&0i32.to_le_bytes());
    chunks.extend_from_slice(&(voxels.len() as i32).to_le_bytes());
    for (x, y, z, color) in voxels {
        chunks.extend_from_slice(&[*x, *y, *z, *color]);
    }

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"VOX ");
    bytes.extend_from_slice(&200i32.to_le_bytes());
    bytes.extend_from_slice(b"MAIN");
    bytes.extend_from_slice(&0i32.to_le_bytes());
    bytes.extend_from_slice(&(chunks.len() as i32).to_le_bytes());
    bytes.extend_from_slice(&chunks);
    bytes
}

fn solid_cube_voxels(size: u8) -> Vec<(u8, u8, u8, u8)> {
    let mut voxels = Vec::with_capacity((size as usize).pow(3));
    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                voxels.push((x, y, z, 1 + (x % 8)));
            }
        }
    }
    voxels
}

fn sparse_noise_voxels(size: u8, fill: f64, seed: u64) -> Vec<(u8, u8, u8, u8)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut voxels = Vec::new();
    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                if rng.gen_bool(fill) {
                    voxels.push((x, y, z, rng.gen_range(1..=16)));
                }
            }
        }
    }
    voxels
}

fn parsed_model(size: i32, voxels: &[(u8, u8, u8, u8)]) -> VoxelModel {
    let bytes = encode_stream(size, voxels);
    let mut file = parse_vox_bytes(&bytes).expect("Failed to parse bench stream");
    file.models.remove(0)
}

fn benchmark_parse(c: &mut Criterion) {
    let bytes = encode_stream(32, &solid_cube_voxels(32));

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("solid_32_cube", |b| {
        b.iter(|| black_box(parse_vox_bytes(black_box(&bytes))))
    });
    group.finish();
}

fn benchmark_mesh_dense(c: &mut Criterion) {
    let model = parsed_model(32, &solid_cube_voxels(32));

    let mut group = c.benchmark_group("mesh");
    group.throughput(Throughput::Elements(model.voxels.len() as u64));
    group.bench_function("solid_32_cube", |b| {
        b.iter(|| black_box(build_model_mesh(black_box(&model), 1.0)))
    });
    group.finish();
}

fn benchmark_mesh_sparse(c: &mut Criterion) {
    let model = parsed_model(64, &sparse_noise_voxels(64, 0.2, 42));

    let mut group = c.benchmark_group("mesh");
    group.throughput(Throughput::Elements(model.voxels.len() as u64));
    group.bench_function("sparse_64_noise", |b| {
        b.iter(|| black_box(build_model_mesh(black_box(&model), 1.0)))
    });
    group.finish();
}

fn benchmark_scene(c: &mut Criterion) {
    let models: Vec<VoxelModel> = (0..8u64)
        .map(|seed| {
            let mut model = parsed_model(32, &sparse_noise_voxels(32, 0.3, seed));
            model.id = seed as u32;
            model
        })
        .collect();

    let mut group = c.benchmark_group("scene");
    group.throughput(Throughput::Elements(models.len() as u64));
    group.bench_function("8_sparse_models", |b| {
        b.iter(|| black_box(build_scene_meshes(black_box(&models), 0.1)))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_mesh_dense,
    benchmark_mesh_sparse,
    benchmark_scene
);
criterion_main!(benches);
