use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::RegistryError;
use crate::types::MaterialId;

/// One texture-array layer and the image files it may be built from.
#[derive(Clone, Debug)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    pub texture_candidates: Vec<PathBuf>,
}

#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
    pub by_key: HashMap<String, MaterialId>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Appends a material and returns its layer. Re-inserting a key returns the existing layer.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        paths: Vec<PathBuf>,
    ) -> Result<MaterialId, RegistryError> {
        let key = key.into();
        if let Some(id) = self.get_id(&key) {
            return Ok(id);
        }
        let layer = self.materials.len();
        let id = MaterialId(u16::try_from(layer).map_err(|_| RegistryError::TooManyMaterials(layer))?);
        self.by_key.insert(key.clone(), id);
        self.materials.push(Material {
            id,
            key,
            texture_candidates: paths,
        });
        Ok(id)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        let mut entries: Vec<(String, Vec<String>)> = cfg.materials.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so layer assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, paths) in entries {
            catalog.insert(key, paths.into_iter().map(PathBuf::from).collect())?;
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }
}

// Simple form only: material = ["assets/blocks/foo.png", ...]
#[derive(Deserialize)]
pub struct MaterialsConfig {
    pub materials: HashMap<String, Vec<String>>,
}
