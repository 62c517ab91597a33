use tessel_blocks::config::{BlockDef, BlocksConfig, MaterialsDef};
use tessel_blocks::{BlockId, BlockRegistry, FaceLayers, MaterialCatalog, RegistryError, TextureLayers};

fn catalog() -> MaterialCatalog {
    MaterialCatalog::from_toml_str(
        r#"
        [materials]
        dirt = ["assets/blocks/dirt.png"]
        grass_side = ["assets/blocks/grass_side.png"]
        grass_top = ["assets/blocks/grass_top.png"]
        stone = ["assets/blocks/stone.png"]
    "#,
    )
    .unwrap()
}

fn parse(blocks: &str) -> Result<BlockRegistry, RegistryError> {
    let cfg: BlocksConfig = toml::from_str(blocks).unwrap();
    BlockRegistry::from_configs(catalog(), cfg)
}

#[test]
fn resolves_top_bottom_side_layers() {
    let reg = parse(
        r#"
        [[blocks]]
        name = "air"

        [[blocks]]
        name = "stone"
        materials = { all = "stone" }

        [[blocks]]
        name = "grass"
        materials = { top = "grass_top", bottom = "dirt", side = "grass_side" }
    "#,
    )
    .unwrap();

    assert_eq!(reg.air, BlockId(0));
    let stone = reg.id_by_name("stone").unwrap();
    let grass = reg.id_by_name("grass").unwrap();
    assert_eq!(stone, BlockId(1));
    assert_eq!(grass, BlockId(2));
    assert_eq!(reg.face_layers(stone), Some(FaceLayers::uniform(3)));
    assert_eq!(
        reg.face_layers(grass),
        Some(FaceLayers::top_bottom_side(2, 0, 1))
    );
    assert_eq!(reg.face_layers(reg.air), None);
    assert_eq!(reg.face_layers(BlockId(99)), None);
}

#[test]
fn per_face_key_overrides_side() {
    let reg = parse(
        r#"
        [[blocks]]
        name = "air"

        [[blocks]]
        name = "marker"
        materials = { all = "stone", side = "dirt", pos_x = "grass_top" }
    "#,
    )
    .unwrap();
    let layers = reg.face_layers(reg.id_by_name("marker").unwrap()).unwrap();
    assert_eq!(layers, FaceLayers([3, 3, 2, 0, 0, 0]));
}

#[test]
fn explicit_ids_advance_implicit_ones() {
    let reg = parse(
        r#"
        [[blocks]]
        name = "air"

        [[blocks]]
        name = "stone"
        id = 10
        materials = { all = "stone" }

        [[blocks]]
        name = "dirt"
        materials = { all = "dirt" }
    "#,
    )
    .unwrap();
    assert_eq!(reg.id_by_name("stone"), Some(BlockId(10)));
    assert_eq!(reg.id_by_name("dirt"), Some(BlockId(11)));
}

#[test]
fn missing_face_material_is_an_error() {
    let err = parse(
        r#"
        [[blocks]]
        name = "air"

        [[blocks]]
        name = "half"
        materials = { top = "stone" }
    "#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::MissingFaceMaterial { ref block, face: "neg_y" } if block == "half"
    ));
}

#[test]
fn unknown_material_is_an_error() {
    let cfg = BlocksConfig {
        air: "air".into(),
        blocks: vec![
            BlockDef { name: "air".into(), id: None, materials: None },
            BlockDef {
                name: "glass".into(),
                id: None,
                materials: Some(MaterialsDef { all: Some("glass".into()), ..Default::default() }),
            },
        ],
    };
    let err = BlockRegistry::from_configs(catalog(), cfg).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownMaterial { ref material, .. } if material == "glass"));
}

#[test]
fn duplicate_ids_and_missing_air_are_rejected() {
    let dup = parse(
        r#"
        [[blocks]]
        name = "air"
        id = 0

        [[blocks]]
        name = "stone"
        id = 0
        materials = { all = "stone" }
    "#,
    )
    .unwrap_err();
    assert!(matches!(dup, RegistryError::DuplicateId { id: 0, .. }));

    let no_air = parse(
        r#"
        air = "void"

        [[blocks]]
        name = "stone"
        materials = { all = "stone" }
    "#,
    )
    .unwrap_err();
    assert!(matches!(no_air, RegistryError::MissingAir(ref n) if n == "void"));
}
