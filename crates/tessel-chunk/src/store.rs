use std::collections::HashMap;

use tessel_blocks::BlockId;

use crate::chunk_coord::ChunkCoord;
use crate::neighborhood::Neighborhood;
use crate::ChunkBuf;

/// Loaded chunks keyed by coordinate. Every chunk has the same edge length.
#[derive(Clone, Debug)]
pub struct ChunkStore {
    pub size: usize,
    chunks: HashMap<ChunkCoord, ChunkBuf>,
}

impl ChunkStore {
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 0);
        Self {
            size,
            chunks: HashMap::new(),
        }
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkBuf> {
        self.chunks.get(&coord)
    }

    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut ChunkBuf> {
        self.chunks.get_mut(&coord)
    }

    /// Inserts a chunk, replacing any chunk already at its coordinate.
    pub fn insert(&mut self, buf: ChunkBuf) -> Option<ChunkBuf> {
        debug_assert_eq!(buf.size, self.size);
        self.chunks.insert(buf.coord, buf)
    }

    pub fn remove(&mut self, coord: ChunkCoord) -> Option<ChunkBuf> {
        self.chunks.remove(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Returns the chunk at `coord`, inserting one filled with `fill` if absent.
    pub fn ensure(&mut self, coord: ChunkCoord, fill: BlockId) -> &mut ChunkBuf {
        let size = self.size;
        self.chunks
            .entry(coord)
            .or_insert_with(|| ChunkBuf::filled(coord, size, fill))
    }

    /// Writes a block at a world voxel coordinate, creating the chunk if needed.
    pub fn set_world(&mut self, wx: i32, wy: i32, wz: i32, id: BlockId, fill: BlockId) {
        let coord = ChunkCoord::containing(wx, wy, wz, self.size);
        let s = self.size as i32;
        let buf = self.ensure(coord, fill);
        buf.set_local(
            wx.rem_euclid(s) as usize,
            wy.rem_euclid(s) as usize,
            wz.rem_euclid(s) as usize,
            id,
        );
    }

    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<BlockId> {
        let coord = ChunkCoord::containing(wx, wy, wz, self.size);
        let s = self.size as i32;
        self.get(coord).map(|buf| {
            buf.get_local(
                wx.rem_euclid(s) as usize,
                wy.rem_euclid(s) as usize,
                wz.rem_euclid(s) as usize,
            )
        })
    }

    pub fn neighborhood(&self, coord: ChunkCoord) -> Option<ChunkNeighborhood<'_>> {
        let center = self.get(coord)?;
        Some(ChunkNeighborhood {
            store: self,
            coord,
            center,
        })
    }
}

/// Chunk-style neighborhood: any offset, including edges and corners, resolves through the store.
#[derive(Clone, Copy, Debug)]
pub struct ChunkNeighborhood<'a> {
    store: &'a ChunkStore,
    coord: ChunkCoord,
    center: &'a ChunkBuf,
}

impl<'a> ChunkNeighborhood<'a> {
    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }
}

impl<'a> Neighborhood for ChunkNeighborhood<'a> {
    type Region = ChunkBuf;

    #[inline]
    fn center(&self) -> &ChunkBuf {
        self.center
    }

    #[inline]
    fn neighbor(&self, dx: i32, dy: i32, dz: i32) -> Option<&ChunkBuf> {
        self.store.get(self.coord.offset(dx, dy, dz))
    }
}
