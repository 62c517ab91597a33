use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::BlocksConfig;
use crate::error::RegistryError;
use crate::material::MaterialCatalog;
use crate::types::{BlockId, FaceLayers, TextureLayers};

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    /// `None` only for the air block.
    pub layers: Option<FaceLayers>,
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub materials: MaterialCatalog,
    pub blocks: HashMap<BlockId, BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub air: BlockId,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(&id)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn load_from_paths(
        materials_path: impl AsRef<Path>,
        blocks_path: impl AsRef<Path>,
    ) -> Result<Self, RegistryError> {
        let materials = MaterialCatalog::from_path(materials_path)?;
        let blocks_path = blocks_path.as_ref();
        let blocks_toml = fs::read_to_string(blocks_path).map_err(|source| RegistryError::Io {
            path: blocks_path.to_path_buf(),
            source,
        })?;
        let blocks_cfg: BlocksConfig = toml::from_str(&blocks_toml)?;
        Self::from_configs(materials, blocks_cfg)
    }

    pub fn from_configs(
        materials: MaterialCatalog,
        cfg: BlocksConfig,
    ) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry {
            materials,
            ..Default::default()
        };
        let mut next_id = 0u16;
        for def in cfg.blocks {
            if reg.by_name.contains_key(&def.name) {
                return Err(RegistryError::DuplicateName(def.name));
            }
            let id = BlockId(def.id.unwrap_or(next_id));
            if let Some(prev) = reg.blocks.get(&id) {
                return Err(RegistryError::DuplicateId {
                    id: id.0,
                    first: prev.name.clone(),
                    second: def.name,
                });
            }
            next_id = next_id.max(id.0.saturating_add(1));

            let layers = if def.name == cfg.air {
                if def.materials.is_some() {
                    log::warn!("air block `{}` lists materials; they are ignored", def.name);
                }
                None
            } else {
                let mats = def.materials.unwrap_or_default();
                let mut layers = [0u16; 6];
                for (i, key) in mats.face_keys().into_iter().enumerate() {
                    let face = FaceLayers::FACE_NAMES[i];
                    let key = key.ok_or_else(|| RegistryError::MissingFaceMaterial {
                        block: def.name.clone(),
                        face,
                    })?;
                    let mid = reg.materials.get_id(key).ok_or_else(|| {
                        RegistryError::UnknownMaterial {
                            block: def.name.clone(),
                            material: key.to_string(),
                        }
                    })?;
                    layers[i] = mid.0;
                }
                Some(FaceLayers(layers))
            };

            reg.by_name.insert(def.name.clone(), id);
            reg.blocks.insert(
                id,
                BlockType {
                    id,
                    name: def.name,
                    layers,
                },
            );
        }
        reg.air = reg
            .id_by_name(&cfg.air)
            .ok_or(RegistryError::MissingAir(cfg.air))?;
        log::debug!(
            "block registry: {} blocks, {} materials, air={:?}",
            reg.blocks.len(),
            reg.materials.len(),
            reg.air
        );
        Ok(reg)
    }
}

impl TextureLayers for BlockRegistry {
    #[inline]
    fn face_layers(&self, id: BlockId) -> Option<FaceLayers> {
        self.blocks.get(&id).and_then(|b| b.layers)
    }
}
