use tessel_geom::{Vec2, Vec3};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Returns the `[0..6)` index of this face. Matches `FaceLayers` order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<Face> {
        Face::ALL.get(i).copied()
    }

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.delta();
        Vec3::from_grid(dx, dy, dz)
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// Four corners of the face of voxel `(x,y,z)` stretched `len` voxels along
    /// its merge axis (z for X/Y faces, x for Z faces), in emission order.
    pub fn quad_corners(self, x: i32, y: i32, z: i32, len: i32) -> [Vec3; 4] {
        let v = Vec3::from_grid;
        match self {
            Face::PosX => [
                v(x + 1, y + 1, z + len),
                v(x + 1, y + 1, z),
                v(x + 1, y, z),
                v(x + 1, y, z + len),
            ],
            Face::NegX => [
                v(x, y + 1, z),
                v(x, y + 1, z + len),
                v(x, y, z + len),
                v(x, y, z),
            ],
            Face::PosY => [
                v(x, y + 1, z),
                v(x + 1, y + 1, z),
                v(x + 1, y + 1, z + len),
                v(x, y + 1, z + len),
            ],
            Face::NegY => [
                v(x, y, z + len),
                v(x + 1, y, z + len),
                v(x + 1, y, z),
                v(x, y, z),
            ],
            Face::PosZ => [
                v(x, y + 1, z + 1),
                v(x + len, y + 1, z + 1),
                v(x + len, y, z + 1),
                v(x, y, z + 1),
            ],
            Face::NegZ => [
                v(x + len, y + 1, z),
                v(x, y + 1, z),
                v(x, y, z),
                v(x + len, y, z),
            ],
        }
    }

    /// Texture coordinates for a face stretched `len` voxels. The merge axis
    /// spans `len` texture units, so textures stretch across merged runs.
    pub fn quad_uvs(self, len: f32) -> [Vec2; 4] {
        match self {
            Face::PosY | Face::NegY => [
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, len),
                Vec2::new(0.0, len),
            ],
            _ => [
                Vec2::new(0.0, 0.0),
                Vec2::new(len, 0.0),
                Vec2::new(len, 1.0),
                Vec2::new(0.0, 1.0),
            ],
        }
    }
}
