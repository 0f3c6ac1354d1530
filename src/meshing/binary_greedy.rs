use super::mesh::{ChunkMesh, FaceDir, Vertex};
/// Binary greedy meshing over padded 64^3 volumes.
/// The padded edge matches the u64 width, so occupancy along any axis packs
/// into one word per column and face culling becomes two shifts per column.
use crate::voxel::{
    axis_index, PaddedChunk, CHUNK_SIZE, PADDED_AREA, PADDED_SIZE, PADDED_VOLUME,
};
#[cfg(feature = "profiling")]
use crate::perf::FUNCTION_COUNTERS;
use crate::{count_add, count_call};
use glam::IVec3;

const LAST_PADDED: usize = PADDED_SIZE - 1;

/// Reusable meshing workspace.
/// The column buffers alone are 288 KiB; one scratch per meshing thread
/// removes that allocation from every call (see mesh_with_scratch).
pub struct MeshingScratch {
    /// Occupancy bit-columns, one PADDED_AREA section per sweep axis
    axis_cols: Box<[u64; PADDED_AREA * 3]>,
    /// Exposed-face bit-columns, two directions per axis
    face_masks: Box<[u64; PADDED_AREA * 6]>,
    /// Committed forward merges per (right, depth) cell, reset per face
    forward_merged: Box<[u8; PADDED_AREA]>,
    /// Committed rightward merges per depth, reset per forward row
    right_merged: [u8; PADDED_SIZE],
}

impl MeshingScratch {
    pub fn new() -> Self {
        Self {
            axis_cols: Box::new([0; PADDED_AREA * 3]),
            face_masks: Box::new([0; PADDED_AREA * 6]),
            forward_merged: Box::new([0; PADDED_AREA]),
            right_merged: [0; PADDED_SIZE],
        }
    }

    /// Reset state the passes do not fully overwrite.
    /// face_masks is rewritten wholesale by the culling pass, and the merge
    /// counters are reset per face / per row inside the merge pass.
    #[inline]
    fn clear(&mut self) {
        self.axis_cols.fill(0);
    }
}

impl Default for MeshingScratch {
    fn default() -> Self {
        Self::new()
    }
}

/// Binary greedy mesher.
///
/// Three passes over the padded volume:
/// 1. encode occupancy into per-axis bit-columns,
/// 2. expose faces with shift-complement masks,
/// 3. greedily merge co-planar faces of equal type and lit-side light into
///    maximal rectangles and emit two triangles per rectangle.
pub struct BinaryGreedyMesher;

impl BinaryGreedyMesher {
    /// Mesh a padded volume with a throwaway scratch.
    /// Returns None when no face of the interior region is visible.
    pub fn mesh(voxels: &[u8], light_map: &[u8], chunk_pos: IVec3) -> Option<ChunkMesh> {
        let mut scratch = MeshingScratch::new();
        Self::mesh_with_scratch(voxels, light_map, chunk_pos, &mut scratch)
    }

    /// Convenience entry point over the owned padded-volume type
    pub fn mesh_chunk(chunk: &PaddedChunk) -> Option<ChunkMesh> {
        Self::mesh(&chunk.voxels[..], &chunk.light[..], chunk.position)
    }

    /// Mesh a batch of disjoint chunks in parallel.
    /// Each worker thread keeps its own scratch; chunks with no visible
    /// geometry are skipped, preserving input order for the rest.
    pub fn mesh_world(chunks: &[PaddedChunk]) -> Vec<ChunkMesh> {
        use rayon::prelude::*;

        chunks
            .par_iter()
            .map_init(MeshingScratch::new, |scratch, chunk| {
                Self::mesh_with_scratch(&chunk.voxels[..], &chunk.light[..], chunk.position, scratch)
            })
            .flatten()
            .collect()
    }

    /// Mesh a padded volume reusing a caller-owned scratch.
    ///
    /// `voxels` and `light_map` are PADDED_VOLUME bytes indexed
    /// y-major/z-innermost; voxel 0 is empty, any other value is a solid
    /// type compared by equality. Vertices are offset so that interior
    /// voxel (1,1,1) lands at `chunk_pos * CHUNK_SIZE`.
    pub fn mesh_with_scratch(
        voxels: &[u8],
        light_map: &[u8],
        chunk_pos: IVec3,
        scratch: &mut MeshingScratch,
    ) -> Option<ChunkMesh> {
        count_call!(FUNCTION_COUNTERS.mesh_chunk_calls);
        #[cfg(feature = "profiling")]
        let _timer = crate::perf::PerfTimer::new("mesh_chunk");

        assert_eq!(
            voxels.len(),
            PADDED_VOLUME,
            "voxel volume must be exactly {} bytes",
            PADDED_VOLUME
        );
        assert_eq!(
            light_map.len(),
            PADDED_VOLUME,
            "light map must be exactly {} bytes",
            PADDED_VOLUME
        );

        // World offset: the -1 cancels the border layer so interior voxel
        // (1,1,1) lands at chunk_pos * CHUNK_SIZE.
        let offset = chunk_pos * CHUNK_SIZE as i32 - IVec3::ONE;
        assert!(
            offset.min_element() >= i16::MIN as i32
                && offset.max_element() + PADDED_SIZE as i32 <= i16::MAX as i32,
            "chunk position {} produces vertex coordinates outside i16 range",
            chunk_pos
        );

        scratch.clear();
        Self::encode_axis_columns(voxels, &mut scratch.axis_cols[..]);
        Self::cull_hidden_faces(&scratch.axis_cols[..], &mut scratch.face_masks[..]);

        // Terrain chunks average well under 1k vertices; a single
        // power-of-2 allocation covers the common case
        let mut vertices = Vec::with_capacity(1024);
        for face in FaceDir::ALL {
            Self::merge_face(voxels, light_map, face, offset, scratch, &mut vertices);
        }

        if vertices.is_empty() {
            count_call!(FUNCTION_COUNTERS.mesh_empty_results);
            None
        } else {
            Some(ChunkMesh {
                vertices,
                position: chunk_pos,
            })
        }
    }

    /// Pass 1: rewrite the padded volume into per-axis occupancy bit-columns.
    /// The (y, x, z) nesting reads the volume in stride-1 order; the z column
    /// of the current (y, x) row accumulates in a register and stores once.
    fn encode_axis_columns(voxels: &[u8], axis_cols: &mut [u64]) {
        let mut i = 0;
        for y in 0..PADDED_SIZE {
            for x in 0..PADDED_SIZE {
                let mut z_bits: u64 = 0;
                for z in 0..PADDED_SIZE {
                    if voxels[i] != 0 {
                        axis_cols[x + (z * PADDED_SIZE)] |= 1 << y;
                        axis_cols[PADDED_AREA + z + (y * PADDED_SIZE)] |= 1 << x;
                        z_bits |= 1 << z;
                    }
                    i += 1;
                }
                // each (y, x) row is visited exactly once, so plain store
                axis_cols[(PADDED_AREA * 2) + y + (x * PADDED_SIZE)] = z_bits;
            }
        }
    }

    /// Pass 2: a face is exposed when its voxel is solid and the neighbor
    /// along the column is empty. The shift-complement masks also clear the
    /// wrap bit at each end of the column.
    fn cull_hidden_faces(axis_cols: &[u64], face_masks: &mut [u64]) {
        const TOP_BIT: u64 = 1 << LAST_PADDED;
        for axis in 0..3 {
            for i in 0..PADDED_AREA {
                let col = axis_cols[(PADDED_AREA * axis) + i];
                face_masks[(PADDED_AREA * (axis * 2)) + i] = col & !((col >> 1) | TOP_BIT);
                face_masks[(PADDED_AREA * (axis * 2 + 1)) + i] = col & !((col << 1) | 1);
            }
        }
    }

    /// Pass 3: greedy rectangle merging over one face direction.
    ///
    /// Rectangles grow forward first: every face bit that can extend into
    /// the next forward slab is committed before any rightward extension is
    /// considered, and bits in an active rightward run are excluded from
    /// forward merging. Merges require equal voxel type and equal light on
    /// the lit side of the face; a bit that can do neither terminates its
    /// rectangle and emits it.
    fn merge_face(
        voxels: &[u8],
        light_map: &[u8],
        face: FaceDir,
        offset: IVec3,
        scratch: &mut MeshingScratch,
        vertices: &mut Vec<Vertex>,
    ) {
        let axis = face.axis();
        let light_step = face.light_step();
        let face_masks = &scratch.face_masks[PADDED_AREA * face as usize..][..PADDED_AREA];
        scratch.forward_merged.fill(0);

        let sx = offset.x as i16;
        let sy = offset.y as i16;
        let sz = offset.z as i16;

        for forward in 1..LAST_PADDED {
            let mut bits_walking_right: u64 = 0;
            scratch.right_merged.fill(0);

            for right in 1..LAST_PADDED {
                let column = right + (forward * PADDED_SIZE);
                let bits_here = face_masks[column];
                // Rectangles never extend into the neighbor border: the last
                // interior slab and column see empty neighbors.
                let bits_forward = if forward >= CHUNK_SIZE {
                    0
                } else {
                    face_masks[column + PADDED_SIZE]
                };
                let bits_right = if right >= CHUNK_SIZE {
                    0
                } else {
                    face_masks[column + 1]
                };

                let mut bits_merging_forward = bits_here & bits_forward & !bits_walking_right;
                let bits_merging_right = bits_here & bits_right;

                let mut candidates = bits_merging_forward;
                while candidates != 0 {
                    let bit_pos = candidates.trailing_zeros() as usize;
                    candidates &= !(1 << bit_pos);

                    // Ascending masks never carry bit 63 and descending
                    // masks never carry bit 0, so the lit sample stays in
                    // range.
                    let lit = (bit_pos as i32 + light_step) as usize;
                    if voxels[axis_index(axis, right, forward, bit_pos)]
                        == voxels[axis_index(axis, right, forward + 1, bit_pos)]
                        && light_map[axis_index(axis, right, forward, lit)]
                            == light_map[axis_index(axis, right, forward + 1, lit)]
                    {
                        scratch.forward_merged[(right * PADDED_SIZE) + bit_pos] += 1;
                    } else {
                        bits_merging_forward &= !(1 << bit_pos);
                    }
                }

                let mut bits_stopped_forward = bits_here & !bits_merging_forward;
                while bits_stopped_forward != 0 {
                    let bit_pos = bits_stopped_forward.trailing_zeros() as usize;
                    bits_stopped_forward &= !(1 << bit_pos);

                    // Faces at depth 0 and 63 belong to the neighbor border
                    if bit_pos == 0 || bit_pos == LAST_PADDED {
                        continue;
                    }

                    let merged = (right * PADDED_SIZE) + bit_pos;
                    let lit = (bit_pos as i32 + light_step) as usize;

                    if bits_merging_right & (1 << bit_pos) != 0
                        && scratch.forward_merged[merged]
                            == scratch.forward_merged[((right + 1) * PADDED_SIZE) + bit_pos]
                        && voxels[axis_index(axis, right, forward, bit_pos)]
                            == voxels[axis_index(axis, right + 1, forward, bit_pos)]
                        && light_map[axis_index(axis, right, forward, lit)]
                            == light_map[axis_index(axis, right + 1, forward, lit)]
                    {
                        // Keep walking right; the quad is emitted when the
                        // run terminates
                        bits_walking_right |= 1 << bit_pos;
                        scratch.right_merged[bit_pos] += 1;
                        scratch.forward_merged[merged] = 0;
                        continue;
                    }
                    bits_walking_right &= !(1 << bit_pos);

                    let mesh_left = (right - scratch.right_merged[bit_pos] as usize) as i16;
                    let mesh_right = (right + 1) as i16;
                    let mesh_front = (forward - scratch.forward_merged[merged] as usize) as i16;
                    let mesh_back = (forward + 1) as i16;
                    // Ascending faces sit on the high side of the voxel
                    let mesh_up = (bit_pos + face.is_positive() as usize) as i16;

                    let block_type = voxels[axis_index(axis, right, forward, bit_pos)];
                    let light = light_map[axis_index(axis, right, forward, lit)];

                    scratch.forward_merged[merged] = 0;
                    scratch.right_merged[bit_pos] = 0;

                    Self::emit_quad(
                        vertices, face, sx, sy, sz, mesh_left, mesh_right, mesh_front, mesh_back,
                        mesh_up, block_type, light,
                    );
                }
            }
        }
    }

    /// Emit one merged rectangle as two CCW triangles (six vertices).
    /// Each face direction permutes (left/right, front/back, up) into the
    /// world lanes so the winding stays counter-clockwise when viewed along
    /// the outward normal.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn emit_quad(
        vertices: &mut Vec<Vertex>,
        face: FaceDir,
        sx: i16,
        sy: i16,
        sz: i16,
        left: i16,
        right: i16,
        front: i16,
        back: i16,
        up: i16,
        block_type: u8,
        light: u8,
    ) {
        count_add!(FUNCTION_COUNTERS.quads_emitted, 1);

        let corners: [(i16, i16, i16); 6] = match face {
            FaceDir::PosY => [
                (left, up, front),
                (left, up, back),
                (right, up, back),
                (right, up, back),
                (right, up, front),
                (left, up, front),
            ],
            FaceDir::NegY => [
                (left, up, back),
                (left, up, front),
                (right, up, front),
                (right, up, front),
                (right, up, back),
                (left, up, back),
            ],
            FaceDir::PosX => [
                (up, front, left),
                (up, back, left),
                (up, back, right),
                (up, back, right),
                (up, front, right),
                (up, front, left),
            ],
            FaceDir::NegX => [
                (up, back, left),
                (up, front, left),
                (up, front, right),
                (up, front, right),
                (up, back, right),
                (up, back, left),
            ],
            FaceDir::PosZ => [
                (front, left, up),
                (back, left, up),
                (back, right, up),
                (back, right, up),
                (front, right, up),
                (front, left, up),
            ],
            FaceDir::NegZ => [
                (back, left, up),
                (front, left, up),
                (front, right, up),
                (front, right, up),
                (back, right, up),
                (back, left, up),
            ],
        };

        let normal = face as u8;
        for (x, y, z) in corners {
            vertices.push(Vertex::new(sx + x, sy + y, sz + z, block_type, light, normal));
        }
    }
}
