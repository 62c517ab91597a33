//! Shared constants for tessel-mesh-cpu. Centralizes common magic numbers.

// Bitset configuration (u64-based)
pub(crate) const BITS_PER_WORD: usize = 64;
pub(crate) const WORD_INDEX_SHIFT: usize = 6; // log2(64)
pub(crate) const WORD_INDEX_MASK: usize = 63; // (1<<6) - 1

/// Largest ambient occlusion level in either convention.
pub const MAX_AO_LEVEL: u8 = 3;

/// Quad triangulation, indices relative to the quad's first vertex.
pub const TRIANGLES: [u32; 6] = [0, 1, 2, 0, 2, 3];
/// Alternate diagonal used when the other one would pinch under AO.
pub const TRIANGLES_FLIPPED: [u32; 6] = [0, 1, 3, 1, 2, 3];

// Gray per line-cache level, 0 = unoccluded.
pub(crate) const AO_GRAY: [f32; 4] = [1.0, 0.5, 0.35, 0.2];
// Gray per packed level, 3 = unoccluded.
pub(crate) const INVERTED_AO_GRAY: [f32; 4] = [0.15, 0.3, 0.5, 1.0];

/// Vertex color of faces without AO in per-voxel meshes (translucent preview).
pub const GHOST_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
