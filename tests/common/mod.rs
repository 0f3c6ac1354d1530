#![allow(dead_code)] // each test binary uses a subset of these helpers

/// Shared helpers for meshing integration tests: reconstructing merged
/// rectangles from the raw vertex stream and recomputing exposed faces by
/// brute force for exact-cover comparison.
use glam::IVec3;
use std::collections::HashMap;
use voxel_mesher::{axis_index, padded_index, ChunkMesh, FaceDir, Vertex, CHUNK_SIZE, PADDED_SIZE};

/// One rectangle reconstructed from six emitted vertices.
/// Coordinates are padded-volume indices: `depth` is the voxel position
/// along the face's sweep axis, the in-plane ranges are half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadRect {
    pub face: FaceDir,
    pub depth: usize,
    pub right_min: usize,
    pub right_max: usize,
    pub forward_min: usize,
    pub forward_max: usize,
    pub block_type: u8,
    pub light: u8,
}

impl QuadRect {
    pub fn width(&self) -> usize {
        self.right_max - self.right_min
    }

    pub fn length(&self) -> usize {
        self.forward_max - self.forward_min
    }
}

/// World offset the mesher applies for a chunk position
pub fn world_offset(position: IVec3) -> IVec3 {
    position * CHUNK_SIZE as i32 - IVec3::ONE
}

/// Split the vertex stream into rectangles, checking the two-triangle
/// pattern and per-quad attribute constancy along the way
pub fn reconstruct_quads(mesh: &ChunkMesh) -> Vec<QuadRect> {
    assert_eq!(
        mesh.vertex_count() % 6,
        0,
        "vertex count must be a whole number of quads"
    );
    let offset = world_offset(mesh.position);
    mesh.vertices
        .chunks_exact(6)
        .map(|quad| reconstruct_quad(quad, offset))
        .collect()
}

fn reconstruct_quad(quad: &[Vertex], offset: IVec3) -> QuadRect {
    assert_eq!(quad[3], quad[2], "triangles must share the quad diagonal");
    assert_eq!(quad[5], quad[0], "triangles must share the quad diagonal");
    for vertex in quad {
        assert_eq!(vertex.normal, quad[0].normal, "normal varies within a quad");
        assert_eq!(
            vertex.block_type, quad[0].block_type,
            "block type varies within a quad"
        );
        assert_eq!(vertex.light, quad[0].light, "light varies within a quad");
    }

    let face = quad[0].face_dir();
    let local: Vec<IVec3> = quad.iter().map(|v| v.position() - offset).collect();

    // Lane layout per sweep axis: (plane, right, forward)
    let (plane_lane, right_lane, forward_lane) = match face.axis() {
        0 => (1, 0, 2), // Y faces: right = X, forward = Z
        1 => (0, 2, 1), // X faces: right = Z, forward = Y
        _ => (2, 1, 0), // Z faces: right = Y, forward = X
    };

    let plane = local[0][plane_lane];
    for p in &local {
        assert_eq!(p[plane_lane], plane, "quad must be planar");
    }

    let right_min = local.iter().map(|p| p[right_lane]).min().unwrap();
    let right_max = local.iter().map(|p| p[right_lane]).max().unwrap();
    let forward_min = local.iter().map(|p| p[forward_lane]).min().unwrap();
    let forward_max = local.iter().map(|p| p[forward_lane]).max().unwrap();
    assert!(
        right_max > right_min && forward_max > forward_min,
        "quad must have positive extent"
    );

    let depth = plane - face.is_positive() as i32;
    assert!(
        depth >= 1 && depth < (PADDED_SIZE - 1) as i32,
        "quad depth {} falls on the neighbor border",
        depth
    );

    QuadRect {
        face,
        depth: depth as usize,
        right_min: right_min as usize,
        right_max: right_max as usize,
        forward_min: forward_min as usize,
        forward_max: forward_max as usize,
        block_type: quad[0].block_type,
        light: quad[0].light,
    }
}

/// Rectangles grouped per face direction
pub fn quads_by_face(quads: &[QuadRect]) -> [Vec<QuadRect>; 6] {
    let mut by_face: [Vec<QuadRect>; 6] = Default::default();
    for quad in quads {
        by_face[quad.face as usize].push(*quad);
    }
    by_face
}

/// Multiset of (face, voxel index) cells covered by the rectangles
pub fn covered_faces(quads: &[QuadRect]) -> HashMap<(u8, usize), usize> {
    let mut covered = HashMap::new();
    for quad in quads {
        for right in quad.right_min..quad.right_max {
            for forward in quad.forward_min..quad.forward_max {
                let voxel = axis_index(quad.face.axis(), right, forward, quad.depth);
                *covered.entry((quad.face as u8, voxel)).or_insert(0usize) += 1;
            }
        }
    }
    covered
}

/// Brute-force set of exposed (face, voxel index) cells of the interior
pub fn exposed_faces(voxels: &[u8]) -> HashMap<(u8, usize), usize> {
    let mut exposed = HashMap::new();
    for y in 1..PADDED_SIZE - 1 {
        for x in 1..PADDED_SIZE - 1 {
            for z in 1..PADDED_SIZE - 1 {
                let index = padded_index(x, y, z);
                if voxels[index] == 0 {
                    continue;
                }
                for face in FaceDir::ALL {
                    let step = face.normal();
                    let neighbor = padded_index(
                        (x as i32 + step.x) as usize,
                        (y as i32 + step.y) as usize,
                        (z as i32 + step.z) as usize,
                    );
                    if voxels[neighbor] == 0 {
                        exposed.insert((face as u8, index), 1usize);
                    }
                }
            }
        }
    }
    exposed
}

/// Assert the emitted quads cover exactly the exposed faces, each exactly
/// once, with constant voxel type and lit-side light per quad
pub fn assert_exact_cover(voxels: &[u8], light_map: &[u8], mesh: &ChunkMesh) {
    let quads = reconstruct_quads(mesh);

    for quad in &quads {
        let axis = quad.face.axis();
        let light_depth = (quad.depth as i32 + quad.face.light_step()) as usize;
        for right in quad.right_min..quad.right_max {
            for forward in quad.forward_min..quad.forward_max {
                assert_eq!(
                    voxels[axis_index(axis, right, forward, quad.depth)],
                    quad.block_type,
                    "quad mixes voxel types: {:?}",
                    quad
                );
                assert_eq!(
                    light_map[axis_index(axis, right, forward, light_depth)],
                    quad.light,
                    "quad mixes light values: {:?}",
                    quad
                );
            }
        }
    }

    let covered = covered_faces(&quads);
    let exposed = exposed_faces(voxels);
    for (key, count) in &covered {
        assert_eq!(*count, 1, "voxel face covered by more than one quad: {:?}", key);
        assert!(
            exposed.contains_key(key),
            "quad covers a face that is not exposed: {:?}",
            key
        );
    }
    for key in exposed.keys() {
        assert!(covered.contains_key(key), "exposed face not covered: {:?}", key);
    }
}
