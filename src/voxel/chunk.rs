/// Padded chunk volume storage and indexing
/// A chunk is meshed together with a one-voxel border of neighbor data, so
/// every buffer here spans the padded cube rather than the interior region
use glam::IVec3;
use noise::{NoiseFn, Perlin};

/// Interior chunk edge in voxels
pub const CHUNK_SIZE: usize = 62;
/// Padded edge: one neighbor voxel on each side
pub const PADDED_SIZE: usize = CHUNK_SIZE + 2;
pub const PADDED_AREA: usize = PADDED_SIZE * PADDED_SIZE;
pub const PADDED_VOLUME: usize = PADDED_AREA * PADDED_SIZE;

// One padded column must fit in a single u64 mask
const _: () = assert!(PADDED_SIZE == 64);

/// Block ids used by the built-in terrain and by tests.
/// Any nonzero byte is a valid solid type; only equality matters.
pub const AIR: u8 = 0;
pub const GRASS: u8 = 1;
pub const DIRT: u8 = 2;
pub const STONE: u8 = 3;

/// Light value the terrain generator writes into open air
pub const SKY_LIGHT: u8 = 15;

/// Convert padded coordinates to a linear index (y-major, z innermost)
#[inline]
pub const fn padded_index(x: usize, y: usize, z: usize) -> usize {
    (y * PADDED_AREA) + (x * PADDED_SIZE) + z
}

/// Address a voxel by (right, forward, depth) for one sweep axis.
/// Axis 0 sweeps Y columns, axis 1 X columns, axis 2 Z columns; the mesher
/// uses this to touch the volume uniformly regardless of face direction.
#[inline]
pub const fn axis_index(axis: usize, right: usize, forward: usize, depth: usize) -> usize {
    match axis {
        0 => forward + (right * PADDED_SIZE) + (depth * PADDED_AREA),
        1 => right + (depth * PADDED_SIZE) + (forward * PADDED_AREA),
        _ => depth + (forward * PADDED_SIZE) + (right * PADDED_AREA),
    }
}

/// Owned padded volume: voxel types plus the parallel light field.
/// The border layers carry neighbor chunk data and are consulted for
/// visibility and attribute equality only, never emitted.
pub struct PaddedChunk {
    /// Chunk position in world-chunk coordinates
    pub position: IVec3,
    pub voxels: Box<[u8; PADDED_VOLUME]>,
    pub light: Box<[u8; PADDED_VOLUME]>,
}

impl PaddedChunk {
    /// Create an all-empty, unlit volume
    pub fn new(position: IVec3) -> Self {
        Self {
            position,
            voxels: Box::new([0; PADDED_VOLUME]),
            light: Box::new([0; PADDED_VOLUME]),
        }
    }

    #[inline]
    pub fn voxel(&self, x: usize, y: usize, z: usize) -> u8 {
        debug_assert!(x < PADDED_SIZE && y < PADDED_SIZE && z < PADDED_SIZE);
        self.voxels[padded_index(x, y, z)]
    }

    #[inline]
    pub fn set_voxel(&mut self, x: usize, y: usize, z: usize, block: u8) {
        debug_assert!(x < PADDED_SIZE && y < PADDED_SIZE && z < PADDED_SIZE);
        self.voxels[padded_index(x, y, z)] = block;
    }

    #[inline]
    pub fn light_at(&self, x: usize, y: usize, z: usize) -> u8 {
        debug_assert!(x < PADDED_SIZE && y < PADDED_SIZE && z < PADDED_SIZE);
        self.light[padded_index(x, y, z)]
    }

    #[inline]
    pub fn set_light(&mut self, x: usize, y: usize, z: usize, value: u8) {
        debug_assert!(x < PADDED_SIZE && y < PADDED_SIZE && z < PADDED_SIZE);
        self.light[padded_index(x, y, z)] = value;
    }

    /// Set every voxel, border layers included
    pub fn fill_voxels(&mut self, block: u8) {
        self.voxels.fill(block);
    }

    /// Set every light value, border layers included
    pub fn fill_light(&mut self, value: u8) {
        self.light.fill(value);
    }

    /// Set only the interior region, leaving the neighbor border untouched
    pub fn fill_interior(&mut self, block: u8) {
        for y in 1..PADDED_SIZE - 1 {
            for x in 1..PADDED_SIZE - 1 {
                for z in 1..PADDED_SIZE - 1 {
                    self.voxels[padded_index(x, y, z)] = block;
                }
            }
        }
    }

    /// Generate heightmap terrain using Perlin noise.
    /// Sampling happens in world coordinates (border layers included), so
    /// adjacent chunks generate seam-consistent borders.
    pub fn generate_terrain(position: IVec3) -> Self {
        let perlin = Perlin::new(12345);
        let base = position * CHUNK_SIZE as i32 - IVec3::ONE;

        let mut chunk = Self::new(position);
        for x in 0..PADDED_SIZE {
            let world_x = base.x + x as i32;
            for z in 0..PADDED_SIZE {
                let world_z = base.z + z as i32;
                let height = Self::sample_terrain_height(&perlin, world_x, world_z);

                for y in 0..PADDED_SIZE {
                    let world_y = base.y + y as i32;

                    let block = if world_y > height {
                        AIR
                    } else if world_y == height {
                        GRASS
                    } else if world_y > height - 3 {
                        DIRT
                    } else {
                        STONE
                    };

                    let index = padded_index(x, y, z);
                    chunk.voxels[index] = block;
                    chunk.light[index] = if block == AIR { SKY_LIGHT } else { 0 };
                }
            }
        }

        chunk
    }

    #[inline]
    fn sample_terrain_height(perlin: &Perlin, x: i32, z: i32) -> i32 {
        let scale = 0.01;
        let noise_value = perlin.get([x as f64 * scale, z as f64 * scale]);
        (noise_value * 20.0) as i32
    }
}
