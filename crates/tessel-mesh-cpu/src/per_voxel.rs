//! One unit quad per visible face, no merging. +Y faces carry packed-mask AO,
//! every other face gets the translucent ghost color.

use tessel_blocks::{BlockId, TextureLayers};
use tessel_chunk::{Neighborhood, Region};

use crate::ao::{NeighborMask, inverted_ao_color, packed_yp_ao_levels};
use crate::constants::GHOST_COLOR;
use crate::error::MeshError;
use crate::face::Face;
use crate::mesh_build::{MeshBuild, Winding};
use crate::visibility::{BoundaryPolicy, FaceNeighbors, is_face_visible};

const FACE_ORDER: [Face; 6] = [
    Face::PosX,
    Face::NegX,
    Face::PosY,
    Face::NegY,
    Face::PosZ,
    Face::NegZ,
];

pub(crate) fn mesh_per_voxel<N, L>(
    build: &mut MeshBuild,
    hood: &N,
    layers: &L,
    air: BlockId,
    policy: BoundaryPolicy,
) -> Result<(), MeshError>
where
    N: Neighborhood,
    L: TextureLayers + ?Sized,
{
    let center = hood.center();
    let neighbors = FaceNeighbors::resolve(hood);
    let s = center.size();
    for y in 0..s {
        for z in 0..s {
            for x in 0..s {
                let block = center.block(x, y, z);
                if block == air {
                    continue;
                }
                let mut face_layers = None;
                for face in FACE_ORDER {
                    let at = (x, y, z);
                    if !is_face_visible(center, neighbors.get(face), at, face, air, policy) {
                        continue;
                    }
                    let fl = match face_layers {
                        Some(fl) => fl,
                        None => {
                            let fl = layers
                                .face_layers(block)
                                .ok_or(MeshError::MissingTextureLayers { block })?;
                            face_layers = Some(fl);
                            fl
                        }
                    };
                    let colors = if face == Face::PosY {
                        packed_yp_ao_levels(NeighborMask::sample(center, at, air)).map(inverted_ao_color)
                    } else {
                        [GHOST_COLOR; 4]
                    };
                    build.add_quad(
                        face.quad_corners(x as i32, y as i32, z as i32, 1),
                        colors,
                        face.quad_uvs(1.0),
                        fl.layer(face.index()),
                        face.normal(),
                        Winding::Normal,
                    );
                }
            }
        }
    }
    Ok(())
}
