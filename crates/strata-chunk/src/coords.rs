use strata_geom::Vec3;

use crate::{CHUNK_HEIGHT, CHUNK_SIZE};

/// Position of a chunk in the chunk grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.cx + dx, self.cy + dy, self.cz + dz)
    }

    /// Squared horizontal distance in chunk units; streaming ignores `cy`.
    #[inline]
    pub fn distance_sq_xz(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dz * dz
    }

    /// World block coordinate of local cell `(0, 0, 0)`.
    #[inline]
    pub fn origin(self) -> WorldPos {
        WorldPos::new(
            self.cx * CHUNK_SIZE as i32,
            self.cy * CHUNK_HEIGHT as i32,
            self.cz * CHUNK_SIZE as i32,
        )
    }

    /// The single local-to-world conversion for block cells.
    #[inline]
    pub fn to_world(self, local: LocalPos) -> WorldPos {
        let o = self.origin();
        WorldPos::new(
            o.x + i32::from(local.x),
            o.y + i32::from(local.y),
            o.z + i32::from(local.z),
        )
    }

    /// Render-space translation for this chunk's mesh. Applied by the renderer only.
    #[inline]
    pub fn translation(self) -> Vec3 {
        let o = self.origin();
        Vec3::new(o.x as f32, o.y as f32, o.z as f32)
    }

    /// Chunk containing a float world point.
    #[inline]
    pub fn containing(p: Vec3) -> ChunkCoord {
        WorldPos::from_point(p).chunk()
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.cx, self.cy, self.cz)
    }
}

/// Global block coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl WorldPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block cell containing a float world point.
    #[inline]
    pub fn from_point(p: Vec3) -> Self {
        Self::new(p.x.floor() as i32, p.y.floor() as i32, p.z.floor() as i32)
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    #[inline]
    pub fn above(self) -> Self {
        self.offset(0, 1, 0)
    }

    #[inline]
    pub fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    #[inline]
    pub fn chunk(self) -> ChunkCoord {
        ChunkCoord::new(
            self.x.div_euclid(CHUNK_SIZE as i32),
            self.y.div_euclid(CHUNK_HEIGHT as i32),
            self.z.div_euclid(CHUNK_SIZE as i32),
        )
    }

    /// Owning chunk and in-chunk cell. Inverse of [`ChunkCoord::to_world`].
    #[inline]
    pub fn split(self) -> (ChunkCoord, LocalPos) {
        let local = LocalPos {
            x: self.x.rem_euclid(CHUNK_SIZE as i32) as u8,
            y: self.y.rem_euclid(CHUNK_HEIGHT as i32) as u8,
            z: self.z.rem_euclid(CHUNK_SIZE as i32) as u8,
        };
        (self.chunk(), local)
    }

    /// Float centre of the block cell.
    #[inline]
    pub fn center(self) -> Vec3 {
        Vec3::new(
            self.x as f32 + 0.5,
            self.y as f32 + 0.5,
            self.z as f32 + 0.5,
        )
    }
}

impl std::fmt::Display for WorldPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Cell inside a chunk. Only constructible in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalPos {
    x: u8,
    y: u8,
    z: u8,
}

impl LocalPos {
    #[inline]
    pub fn new(x: usize, y: usize, z: usize) -> Option<Self> {
        if x < CHUNK_SIZE && y < CHUNK_HEIGHT && z < CHUNK_SIZE {
            Some(Self {
                x: x as u8,
                y: y as u8,
                z: z as u8,
            })
        } else {
            None
        }
    }

    /// Signed variant; negative components are out of range.
    #[inline]
    pub fn from_signed(x: i32, y: i32, z: i32) -> Option<Self> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        Self::new(x as usize, y as usize, z as usize)
    }

    #[inline]
    pub fn x(self) -> usize {
        self.x as usize
    }

    #[inline]
    pub fn y(self) -> usize {
        self.y as usize
    }

    #[inline]
    pub fn z(self) -> usize {
        self.z as usize
    }

    /// Linear index into a chunk's dense storage.
    #[inline]
    pub fn index(self) -> usize {
        (self.y() * CHUNK_SIZE + self.z()) * CHUNK_SIZE + self.x()
    }
}
