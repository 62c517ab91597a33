//! Ambient occlusion: per-corner darkening from the three voxels touching a
//! face corner (two sides and the diagonal).
//!
//! Two conventions are in use:
//! - line-cache levels, where 0 is unoccluded and 3 is fully occluded;
//! - packed-mask levels for per-voxel meshes, where 3 is unoccluded.

use tessel_blocks::BlockId;
use tessel_chunk::Region;

use crate::constants::{AO_GRAY, INVERTED_AO_GRAY, MAX_AO_LEVEL};
use crate::face::Face;
use crate::lines::OccupancyLine;

/// Per-corner AO levels, in the corner order of `Face::quad_corners`.
pub type AoLevels = [u8; 4];

/// Line-cache level: both sides occupied means fully occluded regardless of the
/// diagonal, otherwise one step per occupied sample.
#[inline]
pub fn occlusion_level(side0: bool, side1: bool, corner: bool) -> u8 {
    if side0 && side1 {
        MAX_AO_LEVEL
    } else {
        side0 as u8 + side1 as u8 + corner as u8
    }
}

/// Packed-mask level: the complement of `occlusion_level`.
#[inline]
pub fn inverted_occlusion_level(side0: bool, side1: bool, corner: bool) -> u8 {
    MAX_AO_LEVEL - occlusion_level(side0, side1, corner)
}

/// Panics if `level` is outside `0..=3`.
#[inline]
#[track_caller]
pub fn check_level(level: u8) -> usize {
    assert!(
        level <= MAX_AO_LEVEL,
        "ambient occlusion level {level} outside 0..={MAX_AO_LEVEL}"
    );
    level as usize
}

/// Opaque gray vertex color for a line-cache level.
#[inline]
pub fn ao_color(level: u8) -> [f32; 4] {
    let g = AO_GRAY[check_level(level)];
    [g, g, g, 1.0]
}

/// Opaque gray vertex color for a packed-mask level.
#[inline]
pub fn inverted_ao_color(level: u8) -> [f32; 4] {
    let g = INVERTED_AO_GRAY[check_level(level)];
    [g, g, g, 1.0]
}

/// One sample in a three-line window: `line` picks the line, `offset` the
/// position relative to the scan index (0 = previous voxel, 1 = same, 2 = next).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSample {
    pub line: u8,
    pub offset: u8,
}

const fn s(line: u8, offset: u8) -> LineSample {
    LineSample { line, offset }
}

/// `[side0, side1, corner]` samples for one quad corner.
pub type CornerSamples = [LineSample; 3];

const X_POS: [CornerSamples; 4] = [
    [s(1, 2), s(2, 1), s(2, 2)],
    [s(1, 0), s(2, 1), s(2, 0)],
    [s(1, 0), s(0, 1), s(0, 0)],
    [s(1, 2), s(0, 1), s(0, 2)],
];
const X_NEG: [CornerSamples; 4] = [
    [s(1, 0), s(2, 1), s(2, 0)],
    [s(1, 2), s(2, 1), s(2, 2)],
    [s(1, 2), s(0, 1), s(0, 2)],
    [s(1, 0), s(0, 1), s(0, 0)],
];
const Y_POS: [CornerSamples; 4] = [
    [s(0, 1), s(1, 0), s(0, 0)],
    [s(2, 1), s(1, 0), s(2, 0)],
    [s(2, 1), s(1, 2), s(2, 2)],
    [s(0, 1), s(1, 2), s(0, 2)],
];
const Y_NEG: [CornerSamples; 4] = [
    [s(0, 1), s(1, 2), s(0, 2)],
    [s(2, 1), s(1, 2), s(2, 2)],
    [s(2, 1), s(1, 0), s(2, 0)],
    [s(0, 1), s(1, 0), s(0, 0)],
];

/// Line-cache sample table indexed by `Face::index()`.
///
/// For X and Z faces the three lines are the column just outside the face at
/// heights `y - 1`, `y`, `y + 1`. For Y faces they are the plane just outside
/// the face at cross-axis positions `-1`, `0`, `+1`.
pub const LINE_AO_TABLE: [[CornerSamples; 4]; 6] = [
    Y_POS, // PosY
    Y_NEG, // NegY
    X_POS, // PosX
    X_NEG, // NegX
    X_NEG, // PosZ
    X_POS, // NegZ
];

/// AO levels for `face` of the voxel at scan index `i`.
pub fn line_ao_levels(face: Face, i: usize, lines: [&OccupancyLine; 3]) -> AoLevels {
    let at = |p: LineSample| lines[p.line as usize].get(i + p.offset as usize);
    LINE_AO_TABLE[face.index()].map(|[a, b, c]| occlusion_level(at(a), at(b), at(c)))
}

/// Offsets sampled into a `NeighborMask`, in bit order from bit 16 down to bit 0:
/// the layer at `dy = 0` without the voxel itself, then the layer at `dy = 1`.
pub const PACKED_OFFSETS: [(i32, i32, i32); 17] = packed_offsets();

const fn packed_offsets() -> [(i32, i32, i32); 17] {
    let mut out = [(0, 0, 0); 17];
    let mut i = 0;
    let mut y = 0;
    while y <= 1 {
        let mut z = -1;
        while z <= 1 {
            let mut x = -1;
            while x <= 1 {
                if !(x == 0 && y == 0 && z == 0) {
                    out[i] = (x, y, z);
                    i += 1;
                }
                x += 1;
            }
            z += 1;
        }
        y += 1;
    }
    out
}

/// Mask bit for a neighbor offset, if that offset is sampled.
pub const fn bit_for(offset: (i32, i32, i32)) -> Option<u32> {
    let mut i = 0;
    while i < PACKED_OFFSETS.len() {
        let o = PACKED_OFFSETS[i];
        if o.0 == offset.0 && o.1 == offset.1 && o.2 == offset.2 {
            return Some(16 - i as u32);
        }
        i += 1;
    }
    None
}

/// 17-bit occupancy of the voxels around and above a voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NeighborMask(pub u32);

impl NeighborMask {
    /// Samples around `(x, y, z)`. Positions outside `region` read as empty.
    pub fn sample<R: Region>(region: &R, (x, y, z): (usize, usize, usize), air: BlockId) -> Self {
        let s = region.size() as i32;
        let mut bits = 0u32;
        for (i, &(dx, dy, dz)) in PACKED_OFFSETS.iter().enumerate() {
            let (nx, ny, nz) = (x as i32 + dx, y as i32 + dy, z as i32 + dz);
            if nx < 0 || ny < 0 || nz < 0 || nx >= s || ny >= s || nz >= s {
                continue;
            }
            if region.block(nx as usize, ny as usize, nz as usize) != air {
                bits |= 1 << (16 - i);
            }
        }
        NeighborMask(bits)
    }

    #[inline]
    pub fn has_bit(self, bit: u32) -> bool {
        self.0 & (1 << bit) != 0
    }

    /// Whether the neighbor at `offset` is occupied. Unsampled offsets are empty.
    #[inline]
    pub fn occupied(self, offset: (i32, i32, i32)) -> bool {
        bit_for(offset).is_some_and(|b| self.has_bit(b))
    }
}

/// `[side0, side1, corner]` offsets for each +Y corner, in +Y corner order.
pub const YP_CORNER_OFFSETS: [[(i32, i32, i32); 3]; 4] = [
    [(0, 1, -1), (-1, 1, 0), (-1, 1, -1)],
    [(0, 1, -1), (1, 1, 0), (1, 1, -1)],
    [(0, 1, 1), (1, 1, 0), (1, 1, 1)],
    [(0, 1, 1), (-1, 1, 0), (-1, 1, 1)],
];

/// Packed-convention AO levels for the +Y face.
pub fn packed_yp_ao_levels(mask: NeighborMask) -> AoLevels {
    YP_CORNER_OFFSETS
        .map(|[a, b, c]| inverted_occlusion_level(mask.occupied(a), mask.occupied(b), mask.occupied(c)))
}
