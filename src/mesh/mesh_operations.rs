//! Mesh Generation Operations - Pure DOP Functions
//!
//! Face-culling quad generation over sparse voxel grids. Pure functions
//! that take model data and return mesh data; models are independent, so
//! scene-level generation fans out across a thread pool when the
//! `parallel` feature is enabled.

use glam::IVec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::mesh::mesh_data::{ColorMesh, MeshVertex, ModelMesh};
use crate::model::{voxel_at, VoxelModel};

/// Neighbor offset and quad corners for one face direction. Corners are
/// lattice offsets from the voxel's minimum corner, wound consistently so
/// hosts can derive the outward normal per direction.
struct FaceDirection {
    offset: IVec3,
    corners: [[i32; 3]; 4],
}

/// The six face directions, in emission order.
const FACE_DIRECTIONS: [FaceDirection; 6] = [
    // +X
    FaceDirection {
        offset: IVec3::new(1, 0, 0),
        corners: [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]],
    },
    // +Y
    FaceDirection {
        offset: IVec3::new(0, 1, 0),
        corners: [[1, 1, 0], [1, 1, 1], [0, 1, 1], [0, 1, 0]],
    },
    // +Z
    FaceDirection {
        offset: IVec3::new(0, 0, 1),
        corners: [[0, 0, 1], [0, 1, 1], [1, 1, 1], [1, 0, 1]],
    },
    // -X
    FaceDirection {
        offset: IVec3::new(-1, 0, 0),
        corners: [[0, 0, 0], [0, 1, 0], [0, 1, 1], [0, 0, 1]],
    },
    // -Y
    FaceDirection {
        offset: IVec3::new(0, -1, 0),
        corners: [[0, 0, 0], [0, 0, 1], [1, 0, 1], [1, 0, 0]],
    },
    // -Z
    FaceDirection {
        offset: IVec3::new(0, 0, -1),
        corners: [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]],
    },
];

/// Generates world-space geometry for every model. Output order always
/// matches model order regardless of how the work is scheduled.
pub fn build_scene_meshes(models: &[VoxelModel], voxel_size: f32) -> Vec<ModelMesh> {
    #[cfg(feature = "parallel")]
    let meshes = models
        .par_iter()
        .map(|model| build_model_mesh(model, voxel_size))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let meshes = models
        .iter()
        .map(|model| build_model_mesh(model, voxel_size))
        .collect();

    meshes
}

/// Face-culling quad generation for one model.
///
/// For each distinct color in first-seen order, every stored voxel of that
/// color emits one quad per face whose neighbor cell is empty. Occupancy
/// by any color suppresses the face, so no hidden geometry appears between
/// touching voxels of different colors. Coplanar quads are never merged.
///
/// Placement is baked into the vertices: positions are centered by the
/// integer half-extent of the grid, offset by the model's resolved lattice
/// translation, and scaled by `voxel_size`.
pub fn build_model_mesh(model: &VoxelModel, voxel_size: f32) -> ModelMesh {
    let half_extent = model.size / 2;
    let mut parts = Vec::with_capacity(model.colors_used.len());

    for &color in &model.colors_used {
        let mut vertices = Vec::new();
        let mut quads = Vec::new();

        for voxel in &model.voxels {
            if voxel.color != color {
                continue;
            }
            let position = IVec3::new(voxel.x as i32, voxel.y as i32, voxel.z as i32);

            for direction in &FACE_DIRECTIONS {
                if voxel_at(model, position + direction.offset) != 0 {
                    continue;
                }
                let base_vertex = vertices.len() as u32;
                for corner in &direction.corners {
                    let lattice =
                        position + IVec3::from(*corner) - half_extent + model.translation;
                    vertices.push(MeshVertex {
                        position: (lattice.as_vec3() * voxel_size).to_array(),
                    });
                }
                quads.push([base_vertex, base_vertex + 1, base_vertex + 2, base_vertex + 3]);
            }
        }

        if !quads.is_empty() {
            parts.push(ColorMesh {
                color,
                vertices,
                quads,
            });
        }
    }

    log::debug!(
        "[build_model_mesh] model {}: {} parts, {} quads from {} voxels",
        model.id,
        parts.len(),
        parts.iter().map(|part| part.quads.len()).sum::<usize>(),
        model.voxels.len()
    );

    ModelMesh {
        model_id: model.id,
        translation: model.translation.as_vec3() * voxel_size,
        scale: voxel_size,
        parts,
    }
}

/// Total quads across all parts of a model mesh.
pub fn model_quad_count(mesh: &ModelMesh) -> usize {
    mesh.parts.iter().map(|part| part.quads.len()).sum()
}

/// Total vertices across all parts of a model mesh.
pub fn model_vertex_count(mesh: &ModelMesh) -> usize {
    mesh.parts.iter().map(|part| part.vertices.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{insert_voxel, Voxel};
    use glam::Vec3;
    use rustc_hash::FxHashMap;

    /// Builds a model the way XYZI decoding would, without going through
    /// the byte layer.
    fn model_of(records: &[(u8, u8, u8, u8)], size: IVec3) -> VoxelModel {
        let mut model = VoxelModel {
            id: 0,
            size,
            voxels: Vec::new(),
            occupancy: FxHashMap::default(),
            colors_used: Vec::new(),
            translation: IVec3::ZERO,
        };
        for &(x, y, z, color) in records {
            insert_voxel(&mut model, Voxel { x, y, z, color });
            if !model.colors_used.contains(&color) {
                model.colors_used.push(color);
            }
        }
        model
    }

    fn positions_of(part: &ColorMesh, quad: usize) -> [[f32; 3]; 4] {
        let indices = part.quads[quad];
        [
            part.vertices[indices[0] as usize].position,
            part.vertices[indices[1] as usize].position,
            part.vertices[indices[2] as usize].position,
            part.vertices[indices[3] as usize].position,
        ]
    }

    #[test]
    fn test_isolated_voxel_emits_six_quads() {
        let model = model_of(&[(0, 0, 0, 1)], IVec3::ONE);
        let mesh = build_model_mesh(&model, 1.0);

        assert_eq!(mesh.parts.len(), 1);
        assert_eq!(model_quad_count(&mesh), 6);
        assert_eq!(model_vertex_count(&mesh), 24);
        // Quads index their own four sequential vertices
        for (quad, indices) in mesh.parts[0].quads.iter().enumerate() {
            let base = (quad * 4) as u32;
            assert_eq!(*indices, [base, base + 1, base + 2, base + 3]);
        }
    }

    #[test]
    fn test_face_windings_for_unit_voxel() {
        let model = model_of(&[(0, 0, 0, 1)], IVec3::ONE);
        let mesh = build_model_mesh(&model, 1.0);
        let part = &mesh.parts[0];

        // Emission order +x, +y, +z, -x, -y, -z with fixed corner windings
        let expected: [[[f32; 3]; 4]; 6] = [
            [[1., 0., 0.], [1., 1., 0.], [1., 1., 1.], [1., 0., 1.]],
            [[1., 1., 0.], [1., 1., 1.], [0., 1., 1.], [0., 1., 0.]],
            [[0., 0., 1.], [0., 1., 1.], [1., 1., 1.], [1., 0., 1.]],
            [[0., 0., 0.], [0., 1., 0.], [0., 1., 1.], [0., 0., 1.]],
            [[0., 0., 0.], [0., 0., 1.], [1., 0., 1.], [1., 0., 0.]],
            [[0., 0., 0.], [1., 0., 0.], [1., 1., 0.], [0., 1., 0.]],
        ];
        for (quad, corners) in expected.iter().enumerate() {
            assert_eq!(positions_of(part, quad), *corners, "face {quad}");
        }
    }

    #[test]
    fn test_adjacent_voxels_cull_shared_faces() {
        let model = model_of(&[(0, 0, 0, 1), (1, 0, 0, 1)], IVec3::new(2, 1, 1));
        let mesh = build_model_mesh(&model, 1.0);

        assert_eq!(mesh.parts.len(), 1);
        assert_eq!(model_quad_count(&mesh), 10);
        assert_eq!(model_vertex_count(&mesh), 40);
    }

    #[test]
    fn test_different_colors_still_cull_between_them() {
        let model = model_of(&[(0, 0, 0, 1), (1, 0, 0, 2)], IVec3::new(2, 1, 1));
        let mesh = build_model_mesh(&model, 1.0);

        assert_eq!(mesh.parts.len(), 2);
        assert_eq!(mesh.parts[0].color, 1);
        assert_eq!(mesh.parts[1].color, 2);
        // Five exposed faces each; the shared face is suppressed both ways
        assert_eq!(mesh.parts[0].quads.len(), 5);
        assert_eq!(mesh.parts[1].quads.len(), 5);
    }

    #[test]
    fn test_enclosed_color_produces_no_part() {
        // A center voxel wrapped on all six sides by another color
        let mut records = vec![(1u8, 1u8, 1u8, 2u8)];
        for (x, y, z) in [
            (2, 1, 1),
            (0, 1, 1),
            (1, 2, 1),
            (1, 0, 1),
            (1, 1, 2),
            (1, 1, 0),
        ] {
            records.push((x, y, z, 1));
        }
        let model = model_of(&records, IVec3::new(3, 3, 3));
        let mesh = build_model_mesh(&model, 1.0);

        // First-seen order puts color 2 first, but its part is empty and
        // therefore omitted entirely
        assert_eq!(mesh.parts.len(), 1);
        assert_eq!(mesh.parts[0].color, 1);
        assert_eq!(mesh.parts[0].quads.len(), 30);
    }

    #[test]
    fn test_repeated_position_keeps_later_color_only() {
        let model = model_of(&[(0, 0, 0, 1), (0, 0, 0, 2)], IVec3::ONE);
        // The repeat overwrites the record in place rather than leaving a
        // stale entry behind
        assert_eq!(model.voxels.len(), 1);
        assert_eq!(model.voxels[0].color, 2);

        let mesh = build_model_mesh(&model, 1.0);
        // Color 1 has no surviving voxels, so only the later color meshes
        assert_eq!(mesh.parts.len(), 1);
        assert_eq!(mesh.parts[0].color, 2);
        assert_eq!(mesh.parts[0].quads.len(), 6);
    }

    #[test]
    fn test_centering_uses_integer_half_extent() {
        // 3x1x1 grid: half extent (1, 0, 0)
        let model = model_of(&[(0, 0, 0, 1)], IVec3::new(3, 1, 1));
        let mesh = build_model_mesh(&model, 1.0);
        let corners = positions_of(&mesh.parts[0], 0);

        // +x face of the voxel at lattice 0 sits at x = 1 - 1 = 0
        assert_eq!(corners[0], [0., 0., 0.]);
        assert_eq!(corners[2], [0., 1., 1.]);
    }

    #[test]
    fn test_translation_and_scale_are_baked_and_reported() {
        let mut model = model_of(&[(0, 0, 0, 1)], IVec3::ONE);
        model.translation = IVec3::new(3, 4, 5);
        let mesh = build_model_mesh(&model, 0.5);

        assert_eq!(mesh.translation, Vec3::new(1.5, 2.0, 2.5));
        assert_eq!(mesh.scale, 0.5);

        // -x face first corner: (0,0,0) + (3,4,5), scaled by 0.5
        let corners = positions_of(&mesh.parts[0], 3);
        assert_eq!(corners[0], [1.5, 2.0, 2.5]);
        // +x face first corner: (1,0,0) + (3,4,5), scaled by 0.5
        let corners = positions_of(&mesh.parts[0], 0);
        assert_eq!(corners[0], [2.0, 2.0, 2.5]);
    }

    #[test]
    fn test_scene_meshes_keep_model_order() {
        let models = vec![
            model_of(&[(0, 0, 0, 1)], IVec3::ONE),
            {
                let mut second = model_of(&[(0, 0, 0, 2)], IVec3::ONE);
                second.id = 1;
                second
            },
        ];
        let meshes = build_scene_meshes(&models, 1.0);
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].model_id, 0);
        assert_eq!(meshes[1].model_id, 1);
        assert_eq!(meshes[1].parts[0].color, 2);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let records: Vec<(u8, u8, u8, u8)> = (0..8u8)
            .flat_map(|x| (0..8u8).map(move |y| (x, y, (x + y) % 4, 1 + (x % 3))))
            .collect();
        let model = model_of(&records, IVec3::new(8, 8, 8));

        let first = build_model_mesh(&model, 0.25);
        let second = build_model_mesh(&model, 0.25);
        assert_eq!(first, second);
    }
}
