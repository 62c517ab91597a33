use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use tessel_mesh_cpu::{ConfigError, MeshConfig, MeshGenerator, SurfaceMaterial};

/// Lock-free pool handing each worker its own `MeshGenerator`, so scratch
/// buffers are reused across jobs without sharing one generator between threads.
pub struct GeneratorPool {
    available_tx: Sender<MeshGenerator>,
    available_rx: Receiver<MeshGenerator>,
    allocated: AtomicUsize,
    max_generators: usize,
    config: MeshConfig,
    material: Arc<SurfaceMaterial>,
}

impl GeneratorPool {
    pub fn new(config: MeshConfig, max_generators: usize) -> Result<Self, ConfigError> {
        config.validate()?;
        let max_generators = max_generators.max(1);
        let (tx, rx) = bounded(max_generators);
        let material = Arc::new(SurfaceMaterial::new(config.material.clone()));
        Ok(Self {
            available_tx: tx,
            available_rx: rx,
            allocated: AtomicUsize::new(0),
            max_generators,
            config,
            material,
        })
    }

    pub fn with_capacity_from_workers(
        config: MeshConfig,
        worker_count: usize,
    ) -> Result<Arc<Self>, ConfigError> {
        Ok(Arc::new(Self::new(config, worker_count.max(1))?))
    }

    #[inline]
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Material shared by every generator of this pool.
    #[inline]
    pub fn material(&self) -> &Arc<SurfaceMaterial> {
        &self.material
    }

    /// Generators created so far.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Acquire)
    }

    /// Acquire a generator, creating a new one if under capacity. Blocks while
    /// all generators are in use.
    pub fn acquire(&self) -> PooledGenerator<'_> {
        if let Ok(generator) = self.available_rx.try_recv() {
            return self.wrap(generator);
        }

        loop {
            let current = self.allocated.load(Ordering::Acquire);
            if current < self.max_generators {
                let prev = self.allocated.fetch_add(1, Ordering::AcqRel);
                if prev < self.max_generators {
                    match MeshGenerator::with_material(self.config.clone(), Arc::clone(&self.material)) {
                        Ok(generator) => return self.wrap(generator),
                        // Validated in `new`; undo the reservation and wait for a returned one.
                        Err(e) => log::error!("generator construction failed: {}", e),
                    }
                }
                self.allocated.fetch_sub(1, Ordering::AcqRel);
            }

            match self.available_rx.recv() {
                Ok(generator) => return self.wrap(generator),
                Err(_) => continue,
            }
        }
    }

    fn wrap(&self, generator: MeshGenerator) -> PooledGenerator<'_> {
        PooledGenerator {
            generator: Some(generator),
            pool: self,
        }
    }

    fn release(&self, generator: MeshGenerator) {
        let _ = self.available_tx.send(generator);
    }
}

pub struct PooledGenerator<'pool> {
    generator: Option<MeshGenerator>,
    pool: &'pool GeneratorPool,
}

impl Deref for PooledGenerator<'_> {
    type Target = MeshGenerator;

    fn deref(&self) -> &Self::Target {
        self.generator.as_ref().expect("MeshGenerator already released")
    }
}

impl DerefMut for PooledGenerator<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.generator.as_mut().expect("MeshGenerator already released")
    }
}

impl Drop for PooledGenerator<'_> {
    fn drop(&mut self) {
        if let Some(generator) = self.generator.take() {
            self.pool.release(generator);
        }
    }
}
