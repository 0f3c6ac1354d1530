/// Core voxel data structures for the padded meshing volume
pub mod chunk;

pub use chunk::{
    axis_index, padded_index, PaddedChunk, AIR, CHUNK_SIZE, DIRT, GRASS, PADDED_AREA, PADDED_SIZE,
    PADDED_VOLUME, SKY_LIGHT, STONE,
};
