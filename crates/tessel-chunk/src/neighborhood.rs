use tessel_blocks::BlockId;

/// A cubic block of voxels addressed by local coordinates `0..size()` per axis.
pub trait Region {
    fn size(&self) -> usize;
    fn block(&self, x: usize, y: usize, z: usize) -> BlockId;

    /// True when every voxel equals `id`.
    fn is_all(&self, id: BlockId) -> bool {
        let s = self.size();
        (0..s).all(|y| (0..s).all(|z| (0..s).all(|x| self.block(x, y, z) == id)))
    }
}

/// A region plus read-only access to the regions around it.
///
/// Offsets are in region units. Returning `None` means the neighbor is not loaded.
pub trait Neighborhood {
    type Region: Region;

    fn center(&self) -> &Self::Region;
    fn neighbor(&self, dx: i32, dy: i32, dz: i32) -> Option<&Self::Region>;

    /// Same as `neighbor`, but `(0, 0, 0)` resolves to the center.
    #[inline]
    fn region_at(&self, dx: i32, dy: i32, dz: i32) -> Option<&Self::Region> {
        if dx == 0 && dy == 0 && dz == 0 {
            Some(self.center())
        } else {
            self.neighbor(dx, dy, dz)
        }
    }
}

/// Section-style neighborhood: six independently tracked face neighbors.
/// Edge and corner neighbors are never available.
#[derive(Debug)]
pub struct SectionNeighbors<'a, R> {
    pub center: &'a R,
    pub pos_x: Option<&'a R>,
    pub neg_x: Option<&'a R>,
    pub pos_y: Option<&'a R>,
    pub neg_y: Option<&'a R>,
    pub pos_z: Option<&'a R>,
    pub neg_z: Option<&'a R>,
}

impl<'a, R> Clone for SectionNeighbors<'a, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, R> Copy for SectionNeighbors<'a, R> {}

impl<'a, R> SectionNeighbors<'a, R> {
    pub fn isolated(center: &'a R) -> Self {
        Self {
            center,
            pos_x: None,
            neg_x: None,
            pos_y: None,
            neg_y: None,
            pos_z: None,
            neg_z: None,
        }
    }
}

impl<'a, R: Region> Neighborhood for SectionNeighbors<'a, R> {
    type Region = R;

    #[inline]
    fn center(&self) -> &R {
        self.center
    }

    fn neighbor(&self, dx: i32, dy: i32, dz: i32) -> Option<&R> {
        match (dx, dy, dz) {
            (1, 0, 0) => self.pos_x,
            (-1, 0, 0) => self.neg_x,
            (0, 1, 0) => self.pos_y,
            (0, -1, 0) => self.neg_y,
            (0, 0, 1) => self.pos_z,
            (0, 0, -1) => self.neg_z,
            _ => None,
        }
    }
}
