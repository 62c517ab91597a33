//! Runtime orchestration: a cooperative, time-budgeted mesh queue and a
//! generator pool for parallel batches.
#![forbid(unsafe_code)]

mod generator_pool;
mod scheduler;

pub use generator_pool::{GeneratorPool, PooledGenerator};
pub use scheduler::{BatchReport, Budget, MeshScheduler};

use rayon::prelude::*;
use tessel_blocks::TextureLayers;
use tessel_chunk::{ChunkCoord, ChunkStore};
use tessel_mesh_cpu::{MeshBuffers, MeshError, MeshGenerator};

#[derive(Debug)]
pub enum RegionOutcome {
    Meshed(MeshBuffers),
    /// All air, or nothing visible.
    Empty,
    /// The coordinate has no region in the store.
    Unloaded,
    Failed(MeshError),
}

impl RegionOutcome {
    pub fn quad_count(&self) -> usize {
        match self {
            RegionOutcome::Meshed(m) => m.quad_count(),
            _ => 0,
        }
    }

    pub fn mesh(&self) -> Option<&MeshBuffers> {
        match self {
            RegionOutcome::Meshed(m) => Some(m),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ProcessedRegion {
    pub coord: ChunkCoord,
    pub outcome: RegionOutcome,
}

/// Meshes one stored region against its loaded neighbors.
pub fn mesh_region<L>(
    store: &ChunkStore,
    coord: ChunkCoord,
    layers: &L,
    generator: &mut MeshGenerator,
) -> RegionOutcome
where
    L: TextureLayers + ?Sized,
{
    let Some(hood) = store.neighborhood(coord) else {
        log::debug!("region {:?} not loaded; skipped", coord);
        return RegionOutcome::Unloaded;
    };
    match generator.generate(&hood, layers) {
        Ok(Some(mesh)) => RegionOutcome::Meshed(mesh),
        Ok(None) => RegionOutcome::Empty,
        Err(e) => {
            log::error!("region {:?}: {}", coord, e);
            RegionOutcome::Failed(e)
        }
    }
}

/// Meshes `coords` on the current rayon pool, one pooled generator per task.
/// Results keep the order of `coords`.
pub fn mesh_all_parallel<L>(
    store: &ChunkStore,
    coords: &[ChunkCoord],
    layers: &L,
    pool: &GeneratorPool,
) -> Vec<ProcessedRegion>
where
    L: TextureLayers + Sync + ?Sized,
{
    coords
        .par_iter()
        .map(|&coord| {
            let mut generator = pool.acquire();
            let outcome = mesh_region(store, coord, layers, &mut generator);
            ProcessedRegion { coord, outcome }
        })
        .collect()
}
