#![allow(dead_code)]

use std::collections::HashMap;

use tessel_blocks::{BlockId, FaceLayers};
use tessel_chunk::{ChunkBuf, ChunkCoord};
use tessel_geom::{Vec2, Vec3};
use tessel_mesh_cpu::MeshBuffers;

pub const STONE: BlockId = BlockId(1);
pub const DIRT: BlockId = BlockId(2);

pub fn layers() -> HashMap<BlockId, FaceLayers> {
    let mut m = HashMap::new();
    m.insert(STONE, FaceLayers::uniform(0));
    m.insert(DIRT, FaceLayers::top_bottom_side(1, 2, 3));
    m
}

pub fn empty(size: usize) -> ChunkBuf {
    ChunkBuf::filled(ChunkCoord::new(0, 0, 0), size, BlockId::AIR)
}

pub struct QuadView {
    pub normal: Vec3,
    pub corners: [Vec3; 4],
    pub colors: [[f32; 4]; 4],
    pub uv: [Vec2; 4],
    pub layer: f32,
    /// Indices relative to the quad's first vertex.
    pub tris: [u32; 6],
}

impl QuadView {
    /// Voxels covered by the quad.
    pub fn area(&self) -> f32 {
        self.uv[2].x * self.uv[2].y
    }
}

pub fn quads(m: &MeshBuffers) -> Vec<QuadView> {
    (0..m.quad_count())
        .map(|q| {
            let v = q * 4;
            let base = v as u32;
            QuadView {
                normal: m.normals[v],
                corners: [0, 1, 2, 3].map(|k| m.positions[v + k]),
                colors: [0, 1, 2, 3].map(|k| m.colors[v + k]),
                uv: [0, 1, 2, 3].map(|k| m.uv0[v + k]),
                layer: m.uv1[v].x,
                tris: [0, 1, 2, 3, 4, 5].map(|k| m.indices[q * 6 + k] - base),
            }
        })
        .collect()
}

pub fn with_normal(m: &MeshBuffers, n: Vec3) -> Vec<QuadView> {
    quads(m).into_iter().filter(|q| q.normal == n).collect()
}

pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const POS_X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const NEG_X: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
