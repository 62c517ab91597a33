//! Test scenes: a grid of regions filled with axis-aligned boxes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tessel_blocks::{BlockId, BlockRegistry};
use tessel_chunk::{ChunkBuf, ChunkCoord, ChunkStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("fill references unknown block `{0}`")]
    UnknownBlock(String),
    #[error("scene region size must be at least 1")]
    ZeroRegionSize,
}

/// Inclusive box of world voxels set to one block.
#[derive(Clone, Debug, Deserialize)]
pub struct FillBox {
    pub min: [i32; 3],
    pub max: [i32; 3],
    pub block: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SceneConfig {
    pub region_size: usize,
    /// Regions per axis, starting at region (0, 0, 0).
    pub extent: [i32; 3],
    #[serde(default)]
    pub fill: Vec<FillBox>,
}

impl SceneConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, SceneError> {
        let scene: SceneConfig = toml::from_str(toml_str)?;
        if scene.region_size == 0 {
            return Err(SceneError::ZeroRegionSize);
        }
        Ok(scene)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Every region coordinate of the scene, y-major.
    pub fn coords(&self) -> Vec<ChunkCoord> {
        let [ex, ey, ez] = self.extent;
        let mut out = Vec::new();
        for cy in 0..ey {
            for cz in 0..ez {
                for cx in 0..ex {
                    out.push(ChunkCoord::new(cx, cy, cz));
                }
            }
        }
        out
    }

    /// Builds the regions and applies the fills in order. Fills are clipped
    /// to the scene; later fills overwrite earlier ones.
    pub fn build_store(&self, reg: &BlockRegistry) -> Result<ChunkStore, SceneError> {
        let s = self.region_size;
        let mut store = ChunkStore::new(s);
        for coord in self.coords() {
            store.insert(ChunkBuf::filled(coord, s, reg.air));
        }
        let limit = self.extent.map(|e| e * s as i32 - 1);
        for fill in &self.fill {
            let id = resolve(reg, &fill.block)?;
            let lo = [0, 1, 2].map(|a| fill.min[a].min(fill.max[a]).max(0));
            let hi = [0, 1, 2].map(|a| fill.min[a].max(fill.max[a]).min(limit[a]));
            let mut voxels = 0usize;
            for wy in lo[1]..=hi[1] {
                for wz in lo[2]..=hi[2] {
                    for wx in lo[0]..=hi[0] {
                        store.set_world(wx, wy, wz, id, reg.air);
                        voxels += 1;
                    }
                }
            }
            log::debug!("fill `{}`: {} voxels", fill.block, voxels);
        }
        Ok(store)
    }
}

fn resolve(reg: &BlockRegistry, name: &str) -> Result<BlockId, SceneError> {
    reg.id_by_name(name)
        .ok_or_else(|| SceneError::UnknownBlock(name.to_string()))
}
