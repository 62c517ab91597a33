use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid registry toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("block `{block}` references unknown material `{material}`")]
    UnknownMaterial { block: String, material: String },
    #[error("block `{block}` has no material for face {face}")]
    MissingFaceMaterial { block: String, face: &'static str },
    #[error("block id {id} is assigned to both `{first}` and `{second}`")]
    DuplicateId { id: u16, first: String, second: String },
    #[error("block name `{0}` is defined twice")]
    DuplicateName(String),
    #[error("air block `{0}` is not defined")]
    MissingAir(String),
    #[error("too many materials: layer index {0} does not fit in u16")]
    TooManyMaterials(usize),
}
