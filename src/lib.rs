pub mod meshing;
pub mod perf;
/// Voxel Mesher - binary greedy meshing kernel for chunked voxel renderers
/// Turns padded voxel volumes and their light fields into merged
/// triangle-list vertex buffers ready for GPU upload
pub mod voxel;

pub use meshing::{BinaryGreedyMesher, ChunkMesh, FaceDir, MeshingScratch, Vertex};
pub use perf::{CounterSnapshot, FunctionCounters, FUNCTION_COUNTERS};
pub use voxel::{
    axis_index, padded_index, PaddedChunk, CHUNK_SIZE, PADDED_AREA, PADDED_SIZE, PADDED_VOLUME,
};
