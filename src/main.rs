mod scene;

use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tessel_blocks::BlockRegistry;
use tessel_geom::{Aabb, Vec3};
use tessel_mesh_cpu::{MeshConfig, MeshGenerator};
use tessel_runtime::{Budget, GeneratorPool, MeshScheduler, ProcessedRegion, RegionOutcome, mesh_all_parallel};

use crate::scene::SceneConfig;

#[derive(Parser, Debug)]
#[command(name = "tessel", about = "Mesh a voxel scene into ambient-occluded quads")]
struct Args {
    /// Mesher settings (region size, boundary policy, fidelity)
    #[arg(long, default_value = "config/mesh.toml")]
    config: PathBuf,
    #[arg(long, default_value = "assets/voxels/materials.toml")]
    materials: PathBuf,
    #[arg(long, default_value = "assets/voxels/blocks.toml")]
    blocks: PathBuf,
    #[arg(long, default_value = "config/scene.toml")]
    scene: PathBuf,
    /// Time budget per scheduler batch, in milliseconds
    #[arg(long, default_value_t = 10)]
    budget_ms: u64,
    /// Mesh all regions at once on a rayon pool instead of budgeted batches
    #[arg(long)]
    parallel: bool,
    /// Worker threads for --parallel (defaults to the number of cores)
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Debug, Default)]
struct Stats {
    regions: usize,
    meshed: usize,
    empty: usize,
    unloaded: usize,
    failed: usize,
    quads: usize,
    triangles: usize,
    vertices: usize,
    batches: usize,
    bounds: Option<Aabb>,
}

impl Stats {
    fn record(&mut self, region: &ProcessedRegion, region_size: usize) {
        self.regions += 1;
        match &region.outcome {
            RegionOutcome::Meshed(mesh) => {
                self.meshed += 1;
                self.quads += mesh.quad_count();
                self.triangles += mesh.triangle_count();
                self.vertices += mesh.vertex_count();
                let s = region_size as i32;
                let c = region.coord;
                let origin = Vec3::from_grid(c.cx * s, c.cy * s, c.cz * s);
                let (lo, hi) = (mesh.bbox.min + origin, mesh.bbox.max + origin);
                match &mut self.bounds {
                    Some(b) => {
                        b.include(lo);
                        b.include(hi);
                    }
                    None => self.bounds = Some(Aabb::new(lo, hi)),
                }
            }
            RegionOutcome::Empty => self.empty += 1,
            RegionOutcome::Unloaded => self.unloaded += 1,
            RegionOutcome::Failed(_) => self.failed += 1,
        }
    }

    fn print(&self, elapsed: Duration) {
        println!(
            "regions:   {} ({} meshed, {} empty, {} unloaded, {} failed)",
            self.regions, self.meshed, self.empty, self.unloaded, self.failed
        );
        println!("quads:     {}", self.quads);
        println!("triangles: {}", self.triangles);
        println!("vertices:  {}", self.vertices);
        if self.batches > 0 {
            println!("batches:   {}", self.batches);
        }
        if let Some(b) = self.bounds {
            let e = b.extent();
            println!(
                "bounds:    {:?} .. {:?} (extent {} x {} x {})",
                b.min, b.max, e.x, e.y, e.z
            );
        }
        println!("elapsed:   {:.2} ms", elapsed.as_secs_f64() * 1000.0);
    }
}

fn main() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let reg = BlockRegistry::load_from_paths(&args.materials, &args.blocks)?;
    let scene = SceneConfig::from_path(&args.scene)?;
    let mut config = MeshConfig::from_path(&args.config)?;
    if config.air != reg.air {
        log::warn!("mesh config air {:?} replaced by registry air {:?}", config.air, reg.air);
        config.air = reg.air;
    }
    if config.region_size != scene.region_size {
        log::warn!(
            "mesh config region size {} replaced by scene region size {}",
            config.region_size,
            scene.region_size
        );
        config.region_size = scene.region_size;
    }
    let region_size = config.region_size;

    let store = scene.build_store(&reg)?;
    let coords = scene.coords();
    log::info!(
        "scene: {} regions of {}^3, {:?} / {:?}",
        coords.len(),
        region_size,
        config.boundary,
        config.fidelity
    );

    let start = Instant::now();
    let mut stats = Stats::default();
    if args.parallel {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = args.threads {
            builder = builder.num_threads(n);
        }
        let threads = builder.build()?;
        let pool = GeneratorPool::new(config, threads.current_num_threads())?;
        let regions = threads.install(|| mesh_all_parallel(&store, &coords, &reg, &pool));
        log::debug!("parallel batch used {} generators", pool.allocated());
        for region in &regions {
            stats.record(region, region_size);
        }
    } else {
        let mut generator = MeshGenerator::new(config)?;
        let mut scheduler = MeshScheduler::new();
        scheduler.schedule_all(coords.iter().copied());
        let budget = Budget::from_millis(args.budget_ms);
        while !scheduler.is_idle() {
            let report = scheduler.process_budget(&store, &reg, &mut generator, budget);
            stats.batches += 1;
            for region in &report.regions {
                stats.record(region, region_size);
            }
            log::info!(
                "batch {}: {} regions, {} quads, {} remaining",
                stats.batches,
                report.processed(),
                report.quads(),
                report.remaining
            );
        }
    }
    stats.print(start.elapsed());
    if stats.failed > 0 {
        return Err(format!("{} regions failed to mesh", stats.failed).into());
    }
    Ok(())
}
