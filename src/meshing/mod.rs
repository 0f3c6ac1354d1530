/// Meshing algorithms for converting voxel data to renderable geometry
/// Uses 64-bit column masks so culling and merging touch whole columns at a time
pub mod binary_greedy;
pub mod mesh;

pub use binary_greedy::{BinaryGreedyMesher, MeshingScratch};
pub use mesh::{ChunkMesh, FaceDir, Vertex};
