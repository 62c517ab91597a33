use serde::Deserialize;

fn default_air() -> String {
    "air".to_string()
}

// Top-level blocks config file
#[derive(Deserialize, Debug, Clone)]
pub struct BlocksConfig {
    /// Name of the block that stands for empty space. It carries no materials.
    #[serde(default = "default_air")]
    pub air: String,
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub materials: Option<MaterialsDef>,
}

// Materials mapping: per-face keys win over top/bottom/side, which win over all
#[derive(Deserialize, Debug, Clone, Default)]
pub struct MaterialsDef {
    #[serde(default)]
    pub all: Option<String>,
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default)]
    pub bottom: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub pos_x: Option<String>,
    #[serde(default)]
    pub neg_x: Option<String>,
    #[serde(default)]
    pub pos_z: Option<String>,
    #[serde(default)]
    pub neg_z: Option<String>,
}

impl MaterialsDef {
    /// Material key selected for each face in `FaceLayers` index order.
    pub fn face_keys(&self) -> [Option<&str>; 6] {
        let all = self.all.as_deref();
        let side = self.side.as_deref().or(all);
        [
            self.top.as_deref().or(all),
            self.bottom.as_deref().or(all),
            self.pos_x.as_deref().or(side),
            self.neg_x.as_deref().or(side),
            self.pos_z.as_deref().or(side),
            self.neg_z.as_deref().or(side),
        ]
    }
}
