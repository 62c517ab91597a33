use std::path::PathBuf;

use tessel_blocks::BlockId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("region size {actual} does not match configured size {expected}")]
    RegionSizeMismatch { expected: usize, actual: usize },
    #[error("no texture layers for block {}", .block.0)]
    MissingTextureLayers { block: BlockId },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid mesher toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("region size must be at least 1")]
    ZeroRegionSize,
    #[error("surface material key is empty")]
    EmptyMaterialKey,
}
