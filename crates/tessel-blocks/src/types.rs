use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque voxel type identifier. Which value means "air" is decided by the mesher config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
}

/// Texture-array layer assigned to a material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialId(pub u16);

/// Texture-array layer per face. Index order is +Y, -Y, +X, -X, +Z, -Z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceLayers(pub [u16; 6]);

impl FaceLayers {
    pub const FACE_NAMES: [&'static str; 6] = ["pos_y", "neg_y", "pos_x", "neg_x", "pos_z", "neg_z"];

    #[inline]
    pub const fn uniform(layer: u16) -> Self {
        Self([layer; 6])
    }

    #[inline]
    pub const fn top_bottom_side(top: u16, bottom: u16, side: u16) -> Self {
        Self([top, bottom, side, side, side, side])
    }

    /// Layer for the face at `index` (see the index order above).
    #[inline]
    pub fn layer(&self, index: usize) -> u16 {
        self.0[index]
    }
}

/// Per-face texture layer lookup consumed by the mesher.
pub trait TextureLayers {
    fn face_layers(&self, id: BlockId) -> Option<FaceLayers>;
}

impl TextureLayers for HashMap<BlockId, FaceLayers> {
    #[inline]
    fn face_layers(&self, id: BlockId) -> Option<FaceLayers> {
        self.get(&id).copied()
    }
}

impl<T: TextureLayers + ?Sized> TextureLayers for &T {
    #[inline]
    fn face_layers(&self, id: BlockId) -> Option<FaceLayers> {
        (**self).face_layers(id)
    }
}
