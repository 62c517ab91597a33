//! Region storage and neighbor resolution consumed by the mesher.
#![forbid(unsafe_code)]

mod chunk_coord;
mod neighborhood;
mod store;

pub use chunk_coord::ChunkCoord;
pub use neighborhood::{Neighborhood, Region, SectionNeighbors};
pub use store::{ChunkNeighborhood, ChunkStore};

use tessel_blocks::BlockId;

/// Dense cubic block storage, `size` voxels per edge.
#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub size: usize,
    pub blocks: Vec<BlockId>,
}

impl ChunkBuf {
    pub fn filled(coord: ChunkCoord, size: usize, fill: BlockId) -> Self {
        ChunkBuf {
            coord,
            size,
            blocks: vec![fill; size * size * size],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.size + z) * self.size + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, id: BlockId) {
        let i = self.idx(x, y, z);
        self.blocks[i] = id;
    }

    /// Base world voxel coordinate of this chunk.
    #[inline]
    pub fn origin(&self) -> (i32, i32, i32) {
        let s = self.size as i32;
        (self.coord.cx * s, self.coord.cy * s, self.coord.cz * s)
    }

    pub fn from_blocks_local(
        coord: ChunkCoord,
        size: usize,
        blocks: Vec<BlockId>,
        fill: BlockId,
    ) -> Self {
        let mut b = blocks;
        let expect = size * size * size;
        if b.len() != expect {
            b.resize(expect, fill);
        }
        ChunkBuf {
            coord,
            size,
            blocks: b,
        }
    }

    #[inline]
    pub fn is_all(&self, id: BlockId) -> bool {
        self.blocks.iter().all(|b| *b == id)
    }
}

impl Region for ChunkBuf {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn block(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.get_local(x, y, z)
    }

    #[inline]
    fn is_all(&self, id: BlockId) -> bool {
        ChunkBuf::is_all(self, id)
    }
}
