use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tessel_blocks::{BlockId, TextureLayers};
use tessel_chunk::{Neighborhood, Region};

use crate::ao::{AoLevels, line_ao_levels};
use crate::error::{ConfigError, MeshError};
use crate::face::Face;
use crate::greedy::{LineSource, MergedQuad, merge_xy_line, merge_z_line};
use crate::lines::{LineAxis, LinePlanes, OccupancyLine};
use crate::mesh_build::{MeshBuffers, MeshBuild, SurfaceMaterial, emit_merged_quad};
use crate::per_voxel::mesh_per_voxel;
use crate::visibility::{BoundaryPolicy, FaceNeighbors, is_face_visible};

/// How faces become quads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshFidelity {
    /// Runs merged along scan lines, line-cache AO on every face.
    #[default]
    Greedy,
    /// One quad per visible face, packed-mask AO on +Y only.
    PerVoxel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub region_size: usize,
    pub air: BlockId,
    pub boundary: BoundaryPolicy,
    pub fidelity: MeshFidelity,
    /// Surface material key shared by every mesh.
    pub material: String,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self::chunk(16)
    }
}

impl MeshConfig {
    /// World chunks: closed boundaries, greedy merging.
    pub fn chunk(region_size: usize) -> Self {
        Self {
            region_size,
            air: BlockId::AIR,
            boundary: BoundaryPolicy::Closed,
            fidelity: MeshFidelity::Greedy,
            material: SurfaceMaterial::DEFAULT_KEY.to_string(),
        }
    }

    /// Standalone sections: open boundaries, per-voxel quads.
    pub fn section(region_size: usize) -> Self {
        Self {
            boundary: BoundaryPolicy::Open,
            fidelity: MeshFidelity::PerVoxel,
            ..Self::chunk(region_size)
        }
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let cfg: MeshConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region_size == 0 {
            return Err(ConfigError::ZeroRegionSize);
        }
        if self.material.is_empty() {
            return Err(ConfigError::EmptyMaterialKey);
        }
        Ok(())
    }
}

/// Turns regions into meshes. Holds reusable scratch buffers, so keep one per
/// worker and call `generate` repeatedly.
#[derive(Debug)]
pub struct MeshGenerator {
    config: MeshConfig,
    material: Arc<SurfaceMaterial>,
    build: MeshBuild,
    planes: LinePlanes,
}

impl MeshGenerator {
    pub fn new(config: MeshConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let material = Arc::new(SurfaceMaterial::new(config.material.clone()));
        let planes = match config.fidelity {
            MeshFidelity::Greedy => LinePlanes::new(config.region_size),
            MeshFidelity::PerVoxel => LinePlanes::default(),
        };
        Ok(Self {
            config,
            material,
            build: MeshBuild::default(),
            planes,
        })
    }

    /// Same as `new`, but every mesh shares the given material handle.
    pub fn with_material(config: MeshConfig, material: Arc<SurfaceMaterial>) -> Result<Self, ConfigError> {
        let mut g = Self::new(config)?;
        g.material = material;
        Ok(g)
    }

    #[inline]
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    #[inline]
    pub fn material(&self) -> &Arc<SurfaceMaterial> {
        &self.material
    }

    /// Meshes the center region of `hood`.
    ///
    /// Returns `Ok(None)` when no face is visible. An all-air region returns
    /// before any neighbor is looked up. On error the scratch buffers are
    /// cleared and the generator stays usable.
    pub fn generate<N, L>(&mut self, hood: &N, layers: &L) -> Result<Option<MeshBuffers>, MeshError>
    where
        N: Neighborhood,
        L: TextureLayers + ?Sized,
    {
        let center = hood.center();
        let expected = self.config.region_size;
        if center.size() != expected {
            return Err(MeshError::RegionSizeMismatch {
                expected,
                actual: center.size(),
            });
        }
        if center.is_all(self.config.air) {
            log::trace!("skipping empty region");
            return Ok(None);
        }
        let result = match self.config.fidelity {
            MeshFidelity::Greedy => self.mesh_greedy(hood, layers),
            MeshFidelity::PerVoxel => mesh_per_voxel(
                &mut self.build,
                hood,
                layers,
                self.config.air,
                self.config.boundary,
            ),
        };
        if let Err(e) = result {
            self.build.clear_keep_capacity();
            return Err(e);
        }
        let quads = self.build.quad_count();
        let out = self.build.finish(&self.material);
        log::debug!(
            "meshed region: {} quads ({:?}, {:?})",
            quads,
            self.config.fidelity,
            self.config.boundary
        );
        Ok(out)
    }

    fn mesh_greedy<N, L>(&mut self, hood: &N, layers: &L) -> Result<(), MeshError>
    where
        N: Neighborhood,
        L: TextureLayers + ?Sized,
    {
        let Self {
            config,
            build,
            planes,
            ..
        } = self;
        let s = config.region_size;
        let air = config.air;
        let center = hood.center();
        let neighbors = FaceNeighbors::resolve(hood);
        let mut emit = |q: MergedQuad| -> Result<(), MeshError> {
            let fl = layers
                .face_layers(q.block)
                .ok_or(MeshError::MissingTextureLayers { block: q.block })?;
            emit_merged_quad(build, &q, fl);
            Ok(())
        };

        for axis in [LineAxis::Z, LineAxis::X] {
            for y in 0..s {
                planes.advance(hood, axis, y, air);
                for col in 0..s {
                    let line = RegionLine {
                        center,
                        neighbors: &neighbors,
                        planes: &*planes,
                        axis,
                        col,
                        y,
                        air,
                        policy: config.boundary,
                    };
                    match axis {
                        LineAxis::Z => merge_xy_line(&line, air, &mut emit)?,
                        LineAxis::X => merge_z_line(&line, air, &mut emit)?,
                    }
                }
            }
        }
        Ok(())
    }
}

/// One scan line through the center region: a z-line at `(col, y)` or an
/// x-line at `(col, y)` where `col` is z.
struct RegionLine<'a, R> {
    center: &'a R,
    neighbors: &'a FaceNeighbors<'a, R>,
    planes: &'a LinePlanes,
    axis: LineAxis,
    col: usize,
    y: usize,
    air: BlockId,
    policy: BoundaryPolicy,
}

impl<R> RegionLine<'_, R> {
    #[inline]
    fn coords(&self, i: usize) -> (usize, usize, usize) {
        match self.axis {
            LineAxis::Z => (self.col, self.y, i),
            LineAxis::X => (i, self.y, self.col),
        }
    }

    // Lines padded by one, so the column just outside a positive face is col + 2.
    fn face_lines(&self, face: Face) -> [&OccupancyLine; 3] {
        let p = self.planes;
        let c = self.col;
        match face {
            Face::PosX | Face::PosZ => [&p.below[c + 2], &p.level[c + 2], &p.above[c + 2]],
            Face::NegX | Face::NegZ => [&p.below[c], &p.level[c], &p.above[c]],
            Face::PosY => [&p.above[c], &p.above[c + 1], &p.above[c + 2]],
            Face::NegY => [&p.below[c], &p.below[c + 1], &p.below[c + 2]],
        }
    }
}

impl<R: Region> LineSource for RegionLine<'_, R> {
    #[inline]
    fn len(&self) -> usize {
        self.center.size()
    }

    #[inline]
    fn block(&self, i: usize) -> BlockId {
        let (x, y, z) = self.coords(i);
        self.center.block(x, y, z)
    }

    fn visible(&self, face: Face, i: usize) -> bool {
        is_face_visible(
            self.center,
            self.neighbors.get(face),
            self.coords(i),
            face,
            self.air,
            self.policy,
        )
    }

    fn ao(&self, face: Face, i: usize) -> AoLevels {
        line_ao_levels(face, i, self.face_lines(face))
    }

    fn origin(&self, i: usize) -> [i32; 3] {
        let (x, y, z) = self.coords(i);
        [x as i32, y as i32, z as i32]
    }
}
