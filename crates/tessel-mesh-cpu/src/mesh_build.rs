use std::sync::Arc;

use tessel_blocks::FaceLayers;
use tessel_geom::{Aabb, Vec2, Vec3};

use crate::ao::{AoLevels, ao_color};
use crate::constants::{TRIANGLES, TRIANGLES_FLIPPED};
use crate::greedy::{MergedQuad, choose_winding};

/// Which diagonal splits a quad into two triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Winding {
    #[default]
    Normal,
    Flipped,
}

impl Winding {
    #[inline]
    pub fn triangles(self) -> &'static [u32; 6] {
        match self {
            Winding::Normal => &TRIANGLES,
            Winding::Flipped => &TRIANGLES_FLIPPED,
        }
    }
}

/// Shared surface material reference handed out with every mesh.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceMaterial {
    pub key: String,
}

impl SurfaceMaterial {
    pub const DEFAULT_KEY: &'static str = "block_array";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

/// A finished mesh. Vertex streams are parallel arrays; positions are local to
/// the region.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<Vec3>,
    pub colors: Vec<[f32; 4]>,
    pub uv0: Vec<Vec2>,
    /// `x` carries the texture-array layer, `y` is always 0.
    pub uv1: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub bbox: Aabb,
    pub material: Arc<SurfaceMaterial>,
}

impl MeshBuffers {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }
}

/// Reusable accumulation buffers for one mesh at a time.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pos: Vec<Vec3>,
    col: Vec<[f32; 4]>,
    uv0: Vec<Vec2>,
    uv1: Vec<Vec2>,
    norm: Vec<Vec3>,
    idx: Vec<u32>,
}

impl MeshBuild {
    /// Clears all arrays but retains capacity for the next region.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.col.clear();
        self.uv0.clear();
        self.uv1.clear();
        self.norm.clear();
        self.idx.clear();
    }

    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        // 4 vertices per quad
        self.pos.reserve(n_quads * 4);
        self.col.reserve(n_quads * 4);
        self.uv0.reserve(n_quads * 4);
        self.uv1.reserve(n_quads * 4);
        self.norm.reserve(n_quads * 4);
        self.idx.reserve(n_quads * 6);
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.pos.len() / 4
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Appends four vertices and six indices.
    pub fn add_quad(
        &mut self,
        corners: [Vec3; 4],
        colors: [[f32; 4]; 4],
        uvs: [Vec2; 4],
        layer: u16,
        normal: Vec3,
        winding: Winding,
    ) {
        let base = self.pos.len() as u32;
        self.pos.extend_from_slice(&corners);
        self.col.extend_from_slice(&colors);
        self.uv0.extend_from_slice(&uvs);
        self.uv1.extend([Vec2::new(layer as f32, 0.0); 4]);
        self.norm.extend([normal; 4]);
        self.idx.extend(winding.triangles().iter().map(|t| base + t));
    }

    /// Moves the accumulated data into `MeshBuffers`, leaving the builder empty.
    /// Returns `None` when nothing was added.
    pub fn finish(&mut self, material: &Arc<SurfaceMaterial>) -> Option<MeshBuffers> {
        let bbox = Aabb::from_points(&self.pos)?;
        let quads = self.quad_count();
        let out = MeshBuffers {
            positions: std::mem::take(&mut self.pos),
            colors: std::mem::take(&mut self.col),
            uv0: std::mem::take(&mut self.uv0),
            uv1: std::mem::take(&mut self.uv1),
            normals: std::mem::take(&mut self.norm),
            indices: std::mem::take(&mut self.idx),
            bbox,
            material: Arc::clone(material),
        };
        self.reserve_quads(quads);
        Some(out)
    }
}

/// Colors for a quad's corners from line-cache AO levels.
#[inline]
pub fn ao_colors(levels: AoLevels) -> [[f32; 4]; 4] {
    levels.map(ao_color)
}

/// Appends a merged run with AO colors and the winding that keeps AO smooth.
pub fn emit_merged_quad(build: &mut MeshBuild, quad: &MergedQuad, layers: FaceLayers) {
    let [x, y, z] = quad.origin;
    let len = quad.len as i32;
    build.add_quad(
        quad.face.quad_corners(x, y, z, len),
        ao_colors(quad.ao),
        quad.face.quad_uvs(quad.len as f32),
        layers.layer(quad.face.index()),
        quad.face.normal(),
        choose_winding(quad.ao),
    );
}
