//! Block ids, texture materials, and the block registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod material;
pub mod registry;
pub mod types;

pub use error::RegistryError;
pub use material::MaterialCatalog;
pub use registry::{BlockRegistry, BlockType};
pub use types::{BlockId, FaceLayers, MaterialId, TextureLayers};
