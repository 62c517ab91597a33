//! Face visibility with a selectable policy for unloaded neighbors.

use serde::{Deserialize, Serialize};
use tessel_blocks::BlockId;
use tessel_chunk::{Neighborhood, Region};

use crate::face::Face;

/// What a face on the region boundary sees when the adjacent region is not loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Unloaded space is solid: boundary faces stay hidden until the neighbor arrives.
    #[default]
    Closed,
    /// Unloaded space is empty: boundary faces are emitted.
    Open,
}

impl BoundaryPolicy {
    #[inline]
    pub fn absent_neighbor_visible(self) -> bool {
        matches!(self, BoundaryPolicy::Open)
    }
}

/// The six face-adjacent regions of a center, resolved once per generation.
pub struct FaceNeighbors<'a, R> {
    regions: [Option<&'a R>; 6],
}

impl<'a, R: Region> FaceNeighbors<'a, R> {
    pub fn resolve<N>(hood: &'a N) -> Self
    where
        N: Neighborhood<Region = R>,
    {
        let size = hood.center().size();
        let regions = Face::ALL.map(|f| {
            let (dx, dy, dz) = f.delta();
            let n = hood.neighbor(dx, dy, dz)?;
            if n.size() != size {
                log::warn!(
                    "{:?} neighbor has size {} instead of {}; treating it as unloaded",
                    f,
                    n.size(),
                    size
                );
                return None;
            }
            Some(n)
        });
        if log::log_enabled!(log::Level::Trace) {
            let missing: Vec<Face> = Face::ALL
                .into_iter()
                .filter(|f| regions[f.index()].is_none())
                .collect();
            log::trace!("face neighbors missing: {:?}", missing);
        }
        Self { regions }
    }

    #[inline]
    pub fn get(&self, face: Face) -> Option<&'a R> {
        self.regions[face.index()]
    }
}

/// Whether `face` of voxel `(x, y, z)` in `region` is exposed.
///
/// `neighbor` is the region across that face; it is only consulted when the
/// voxel sits on the matching boundary. A neighbor whose size differs from
/// `region` counts as unloaded.
pub fn is_face_visible<R: Region>(
    region: &R,
    neighbor: Option<&R>,
    (x, y, z): (usize, usize, usize),
    face: Face,
    air: BlockId,
    policy: BoundaryPolicy,
) -> bool {
    let Some(last) = region.size().checked_sub(1) else {
        return false;
    };
    let (dx, dy, dz) = face.delta();
    let inside = match face {
        Face::PosX => x < last,
        Face::NegX => x > 0,
        Face::PosY => y < last,
        Face::NegY => y > 0,
        Face::PosZ => z < last,
        Face::NegZ => z > 0,
    };
    if inside {
        let nx = (x as i32 + dx) as usize;
        let ny = (y as i32 + dy) as usize;
        let nz = (z as i32 + dz) as usize;
        return region.block(nx, ny, nz) == air;
    }
    match neighbor.filter(|n| n.size() == region.size()) {
        None => policy.absent_neighbor_visible(),
        Some(n) => {
            // Wrap to the opposite boundary of the neighbor.
            let wrap = |c: usize, d: i32| match d {
                1 => 0,
                -1 => last,
                _ => c,
            };
            n.block(wrap(x, dx), wrap(y, dy), wrap(z, dz)) == air
        }
    }
}
