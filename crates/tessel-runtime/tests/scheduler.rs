use std::collections::HashMap;
use std::time::Duration;

use tessel_blocks::{BlockId, FaceLayers};
use tessel_chunk::{ChunkBuf, ChunkCoord, ChunkStore};
use tessel_mesh_cpu::{MeshConfig, MeshError, MeshGenerator};
use tessel_runtime::{Budget, GeneratorPool, MeshScheduler, RegionOutcome, mesh_all_parallel};

const S: usize = 4;
const STONE: BlockId = BlockId(1);

fn layers() -> HashMap<BlockId, FaceLayers> {
    HashMap::from([(STONE, FaceLayers::uniform(0))])
}

// A row of regions along x: every even one holds a single voxel, odd ones are air.
fn store(n: i32) -> ChunkStore {
    let mut store = ChunkStore::new(S);
    for cx in 0..n {
        let mut buf = ChunkBuf::filled(ChunkCoord::new(cx, 0, 0), S, BlockId::AIR);
        if cx % 2 == 0 {
            buf.set_local(1, 1, 1, STONE);
        }
        store.insert(buf);
    }
    store
}

fn coords(n: i32) -> Vec<ChunkCoord> {
    (0..n).map(|cx| ChunkCoord::new(cx, 0, 0)).collect()
}

#[test]
fn schedule_deduplicates_and_keeps_order() {
    let mut s = MeshScheduler::new();
    assert!(s.schedule(ChunkCoord::new(1, 0, 0)));
    assert!(s.schedule(ChunkCoord::new(0, 0, 0)));
    assert!(!s.schedule(ChunkCoord::new(1, 0, 0)));
    assert_eq!(s.pending(), 2);

    let store = store(2);
    let mut g = MeshGenerator::new(MeshConfig::chunk(S)).unwrap();
    let first = s.process_one(&store, &layers(), &mut g).unwrap();
    assert_eq!(first.coord, ChunkCoord::new(1, 0, 0));
    assert!(matches!(first.outcome, RegionOutcome::Empty));
    // Once processed it may be queued again.
    assert!(s.schedule(ChunkCoord::new(1, 0, 0)));
    assert_eq!(s.pending(), 2);
}

#[test]
fn budget_drains_queue_and_reports() {
    let store = store(6);
    let mut s = MeshScheduler::new();
    assert_eq!(s.schedule_all(coords(6)), 6);
    s.schedule(ChunkCoord::new(9, 0, 0));
    let mut g = MeshGenerator::new(MeshConfig::chunk(S)).unwrap();
    let report = s.process_budget(&store, &layers(), &mut g, Budget::from_millis(60_000));
    assert_eq!(report.processed(), 7);
    assert_eq!(report.meshed(), 3);
    assert_eq!(report.empty(), 3);
    assert_eq!(report.unloaded(), 1);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.quads(), 18);
    assert_eq!(report.remaining, 0);
    assert!(s.is_idle());
}

#[test]
fn zero_budget_still_makes_progress() {
    let store = store(4);
    let mut s = MeshScheduler::new();
    s.schedule_all(coords(4));
    let mut g = MeshGenerator::new(MeshConfig::chunk(S)).unwrap();
    let budget = Budget {
        time_limit: Duration::ZERO,
        max_regions: None,
    };
    let report = s.process_budget(&store, &layers(), &mut g, budget);
    assert_eq!(report.processed(), 1);
    assert_eq!(report.remaining, 3);
}

#[test]
fn max_regions_caps_a_batch() {
    let store = store(5);
    let mut s = MeshScheduler::new();
    s.schedule_all(coords(5));
    let mut g = MeshGenerator::new(MeshConfig::chunk(S)).unwrap();
    let budget = Budget::from_millis(60_000).with_max_regions(2);
    assert_eq!(s.process_budget(&store, &layers(), &mut g, budget).processed(), 2);
    assert_eq!(s.process_budget(&store, &layers(), &mut g, budget).processed(), 2);
    assert_eq!(s.process_budget(&store, &layers(), &mut g, budget).processed(), 1);
    assert_eq!(s.process_budget(&store, &layers(), &mut g, budget).processed(), 0);
}

#[test]
fn zero_region_cap_processes_nothing() {
    let store = store(3);
    let mut s = MeshScheduler::new();
    s.schedule_all(coords(3));
    let mut g = MeshGenerator::new(MeshConfig::chunk(S)).unwrap();
    let budget = Budget::from_millis(60_000).with_max_regions(0);
    let report = s.process_budget(&store, &layers(), &mut g, budget);
    assert_eq!(report.processed(), 0);
    assert_eq!(report.remaining, 3);
    assert_eq!(s.pending(), 3);
}

#[test]
fn failures_are_reported_per_region() {
    let mut store = store(2);
    store.set_world(2, 2, 2, BlockId(8), BlockId::AIR);
    let mut s = MeshScheduler::new();
    s.schedule_all(coords(2));
    let mut g = MeshGenerator::new(MeshConfig::chunk(S)).unwrap();
    let report = s.process_budget(&store, &layers(), &mut g, Budget::from_millis(60_000));
    assert_eq!(report.failed(), 1);
    assert_eq!(report.meshed(), 0);
    assert!(matches!(
        report.regions[0].outcome,
        RegionOutcome::Failed(MeshError::MissingTextureLayers { block: BlockId(8) })
    ));
}

#[test]
fn parallel_matches_sequential() {
    let n = 12;
    let store = store(n);
    let pool = GeneratorPool::new(MeshConfig::chunk(S), 3).unwrap();
    let parallel = mesh_all_parallel(&store, &coords(n), &layers(), &pool);
    assert!(pool.allocated() <= 3);

    let mut g = MeshGenerator::new(MeshConfig::chunk(S)).unwrap();
    for (coord, region) in coords(n).into_iter().zip(&parallel) {
        assert_eq!(region.coord, coord);
        let seq = tessel_runtime::mesh_region(&store, coord, &layers(), &mut g);
        assert_eq!(region.outcome.mesh(), seq.mesh());
    }
}
