//! CPU meshing crate: greedy and per-voxel meshers with ambient occlusion.
#![forbid(unsafe_code)]

pub mod ao;
pub mod constants;
mod error;
pub mod face;
mod generator;
pub mod greedy;
pub mod lines;
mod mesh_build;
mod per_voxel;
pub mod visibility;

pub use ao::{AoLevels, NeighborMask};
pub use error::{ConfigError, MeshError};
pub use face::Face;
pub use generator::{MeshConfig, MeshFidelity, MeshGenerator};
pub use greedy::{MergedQuad, choose_winding};
pub use mesh_build::{MeshBuffers, MeshBuild, SurfaceMaterial, Winding, ao_colors, emit_merged_quad};
pub use visibility::{BoundaryPolicy, FaceNeighbors, is_face_visible};
