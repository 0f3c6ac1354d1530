/// Mesh output types produced by the greedy mesher
use bytemuck::{Pod, Zeroable};
use glam::IVec3;

/// Packed vertex emitted by the mesher.
///
/// Layout (10 bytes, no implicit padding):
/// - x, y, z: i16 - world-space voxel-grid coordinates
/// - block_type: u8 - voxel type the quad was merged from
/// - light: u8 - light sampled on the lit side of the face
/// - normal: u8 - face direction code (see FaceDir)
/// - pad: u8 - reserved, keeps the struct Pod-castable for upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Vertex {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub block_type: u8,
    pub light: u8,
    pub normal: u8,
    pub pad: u8,
}

impl Vertex {
    #[inline]
    pub const fn new(x: i16, y: i16, z: i16, block_type: u8, light: u8, normal: u8) -> Self {
        Self {
            x,
            y,
            z,
            block_type,
            light,
            normal,
            pad: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> IVec3 {
        IVec3::new(self.x as i32, self.y as i32, self.z as i32)
    }

    #[inline]
    pub fn face_dir(&self) -> FaceDir {
        FaceDir::from_index(self.normal as usize)
    }
}

/// Face direction for the six axis-aligned normals.
/// Discriminants are the normal codes stored in Vertex::normal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaceDir {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl FaceDir {
    pub const ALL: [FaceDir; 6] = [
        FaceDir::PosY,
        FaceDir::NegY,
        FaceDir::PosX,
        FaceDir::NegX,
        FaceDir::PosZ,
        FaceDir::NegZ,
    ];

    /// Sweep axis this face is culled and merged along
    #[inline]
    pub const fn axis(self) -> usize {
        match self {
            FaceDir::PosY | FaceDir::NegY => 0,
            FaceDir::PosX | FaceDir::NegX => 1,
            FaceDir::PosZ | FaceDir::NegZ => 2,
        }
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, FaceDir::PosY | FaceDir::PosX | FaceDir::PosZ)
    }

    /// Step along the sweep axis toward the cell the face is lit from
    #[inline]
    pub const fn light_step(self) -> i32 {
        if self.is_positive() {
            1
        } else {
            -1
        }
    }

    #[inline]
    pub const fn normal(self) -> IVec3 {
        match self {
            FaceDir::PosY => IVec3::Y,
            FaceDir::NegY => IVec3::NEG_Y,
            FaceDir::PosX => IVec3::X,
            FaceDir::NegX => IVec3::NEG_X,
            FaceDir::PosZ => IVec3::Z,
            FaceDir::NegZ => IVec3::NEG_Z,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => FaceDir::PosY,
            1 => FaceDir::NegY,
            2 => FaceDir::PosX,
            3 => FaceDir::NegX,
            4 => FaceDir::PosZ,
            5 => FaceDir::NegZ,
            _ => panic!("invalid face index"),
        }
    }
}

/// Merged mesh for one chunk: a raw triangle-list vertex stream.
/// Six vertices per quad (two CCW triangles sharing a diagonal); there is no
/// index buffer.
pub struct ChunkMesh {
    pub vertices: Vec<Vertex>,
    /// Chunk position in world-chunk coordinates
    pub position: IVec3,
}

impl ChunkMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw bytes of the vertex stream for GPU upload
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
