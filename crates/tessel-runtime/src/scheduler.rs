use std::collections::VecDeque;
use std::time::{Duration, Instant};

use hashbrown::HashSet;
use tessel_blocks::TextureLayers;
use tessel_chunk::{ChunkCoord, ChunkStore};
use tessel_mesh_cpu::MeshGenerator;

use crate::{ProcessedRegion, RegionOutcome, mesh_region};

/// Limits for one `process_budget` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Budget {
    /// Stop once this much time has elapsed. Checked between regions only.
    pub time_limit: Duration,
    pub max_regions: Option<usize>,
}

impl Default for Budget {
    fn default() -> Self {
        Self::from_millis(10)
    }
}

impl Budget {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            time_limit: Duration::from_millis(ms),
            max_regions: None,
        }
    }

    pub fn with_max_regions(mut self, n: usize) -> Self {
        self.max_regions = Some(n);
        self
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub regions: Vec<ProcessedRegion>,
    pub elapsed: Duration,
    /// Regions still queued after the batch.
    pub remaining: usize,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.regions.len()
    }

    pub fn meshed(&self) -> usize {
        self.count(|o| matches!(o, RegionOutcome::Meshed(_)))
    }

    pub fn empty(&self) -> usize {
        self.count(|o| matches!(o, RegionOutcome::Empty))
    }

    pub fn unloaded(&self) -> usize {
        self.count(|o| matches!(o, RegionOutcome::Unloaded))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RegionOutcome::Failed(_)))
    }

    pub fn quads(&self) -> usize {
        self.regions.iter().map(|r| r.outcome.quad_count()).sum()
    }

    fn count(&self, f: impl Fn(&RegionOutcome) -> bool) -> usize {
        self.regions.iter().filter(|r| f(&r.outcome)).count()
    }
}

/// FIFO of regions waiting for a mesh. A region queued twice is meshed once.
#[derive(Debug, Default)]
pub struct MeshScheduler {
    queue: VecDeque<ChunkCoord>,
    queued: HashSet<ChunkCoord>,
}

impl MeshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `coord` was already waiting.
    pub fn schedule(&mut self, coord: ChunkCoord) -> bool {
        if !self.queued.insert(coord) {
            return false;
        }
        self.queue.push_back(coord);
        true
    }

    pub fn schedule_all(&mut self, coords: impl IntoIterator<Item = ChunkCoord>) -> usize {
        coords.into_iter().filter(|&c| self.schedule(c)).count()
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.queued.clear();
    }

    /// Meshes the oldest queued region. `None` when nothing is queued.
    pub fn process_one<L>(
        &mut self,
        store: &ChunkStore,
        layers: &L,
        generator: &mut MeshGenerator,
    ) -> Option<ProcessedRegion>
    where
        L: TextureLayers + ?Sized,
    {
        let coord = self.queue.pop_front()?;
        self.queued.remove(&coord);
        let outcome = mesh_region(store, coord, layers, generator);
        Some(ProcessedRegion { coord, outcome })
    }

    /// Meshes queued regions until the queue drains or `budget` runs out.
    /// A region is never interrupted, so the batch may overrun the time limit
    /// by one generation. Unless `max_regions` is zero, at least one region is
    /// processed when any is queued.
    pub fn process_budget<L>(
        &mut self,
        store: &ChunkStore,
        layers: &L,
        generator: &mut MeshGenerator,
        budget: Budget,
    ) -> BatchReport
    where
        L: TextureLayers + ?Sized,
    {
        let start = Instant::now();
        let mut report = BatchReport::default();
        loop {
            if budget.max_regions.is_some_and(|n| report.regions.len() >= n) {
                break;
            }
            let Some(region) = self.process_one(store, layers, generator) else {
                break;
            };
            report.regions.push(region);
            if start.elapsed() >= budget.time_limit {
                break;
            }
        }
        report.elapsed = start.elapsed();
        report.remaining = self.pending();
        log::debug!(
            "mesh batch: {} regions in {:?}, {} remaining",
            report.processed(),
            report.elapsed,
            report.remaining
        );
        report
    }
}
