//! Occupancy lines: one bit per voxel along a scan axis, padded by one voxel
//! on each end with samples from the adjacent regions.
//!
//! Line index `k` holds voxel `k - 1`, so a line spans `-1..=size`.

use tessel_blocks::BlockId;
use tessel_chunk::{Neighborhood, Region};

use crate::constants::{BITS_PER_WORD, WORD_INDEX_MASK, WORD_INDEX_SHIFT};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyLine {
    words: Vec<u64>,
    len: usize,
}

impl OccupancyLine {
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(BITS_PER_WORD)],
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len);
        (self.words[i >> WORD_INDEX_SHIFT] >> (i & WORD_INDEX_MASK)) & 1 != 0
    }

    #[inline]
    pub fn set(&mut self, i: usize, on: bool) {
        debug_assert!(i < self.len);
        let w = &mut self.words[i >> WORD_INDEX_SHIFT];
        let bit = 1u64 << (i & WORD_INDEX_MASK);
        if on {
            *w |= bit;
        } else {
            *w &= !bit;
        }
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Direction an occupancy line runs through the region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineAxis {
    /// Varies z at fixed `(x, y)`.
    Z,
    /// Varies x at fixed `(z, y)`.
    X,
}

// Maps a coordinate in -1..=size to (region offset, local coordinate).
#[inline]
fn wrap(c: i32, size: usize) -> (i32, usize) {
    let s = size as i32;
    if c < 0 {
        (-1, (c + s) as usize)
    } else if c >= s {
        (1, (c - s) as usize)
    } else {
        (0, c as usize)
    }
}

/// Fills `line` with occupancy along `axis` at cross-axis coordinate `col` and
/// height `y`. Both may lie one voxel outside the center region; unloaded
/// regions and regions of another size read as empty.
pub fn line_occupancy<N: Neighborhood>(
    line: &mut OccupancyLine,
    hood: &N,
    axis: LineAxis,
    col: i32,
    y: i32,
    air: BlockId,
) {
    let size = hood.center().size();
    debug_assert_eq!(line.len(), size + 2);
    line.clear();
    let (col_off, c) = wrap(col, size);
    let (y_off, ly) = wrap(y, size);
    for step in [-1i32, 0, 1] {
        let (dx, dz) = match axis {
            LineAxis::Z => (col_off, step),
            LineAxis::X => (step, col_off),
        };
        let Some(region) = hood.region_at(dx, y_off, dz).filter(|r| r.size() == size) else {
            continue;
        };
        let (first, last) = match step {
            -1 => (size - 1, size - 1),
            0 => (0, size - 1),
            _ => (0, 0),
        };
        for i in first..=last {
            let id = match axis {
                LineAxis::Z => region.block(c, ly, i),
                LineAxis::X => region.block(i, ly, c),
            };
            let k = (step * size as i32 + i as i32 + 1) as usize;
            line.set(k, id != air);
        }
    }
}

/// Three rolling planes of lines at heights `y - 1`, `y` and `y + 1`.
///
/// Each plane holds `size + 2` lines indexed by cross-axis coordinate plus one.
#[derive(Debug, Default)]
pub struct LinePlanes {
    pub below: Vec<OccupancyLine>,
    pub level: Vec<OccupancyLine>,
    pub above: Vec<OccupancyLine>,
    size: usize,
}

impl LinePlanes {
    pub fn new(size: usize) -> Self {
        let plane = || vec![OccupancyLine::new(size + 2); size + 2];
        Self {
            below: plane(),
            level: plane(),
            above: plane(),
            size,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Moves the planes to height `y`. The first call of a sweep (`y == 0`)
    /// fills all three planes; later calls shift down by one and fill `above`.
    pub fn advance<N: Neighborhood>(&mut self, hood: &N, axis: LineAxis, y: usize, air: BlockId) {
        let y = y as i32;
        if y == 0 {
            fill_plane(&mut self.below, hood, axis, -1, air);
            fill_plane(&mut self.level, hood, axis, 0, air);
        } else {
            std::mem::swap(&mut self.below, &mut self.level);
            std::mem::swap(&mut self.level, &mut self.above);
        }
        fill_plane(&mut self.above, hood, axis, y + 1, air);
    }
}

fn fill_plane<N: Neighborhood>(
    plane: &mut [OccupancyLine],
    hood: &N,
    axis: LineAxis,
    y: i32,
    air: BlockId,
) {
    for (k, line) in plane.iter_mut().enumerate() {
        line_occupancy(line, hood, axis, k as i32 - 1, y, air);
    }
}
