//! Dense chunk storage and the coordinate types that address it.
#![forbid(unsafe_code)]

pub mod coords;

pub use coords::{ChunkCoord, LocalPos, WorldPos};

use strata_blocks::BlockKind;

/// Horizontal chunk extent along X and Z.
pub const CHUNK_SIZE: usize = 16;
/// Vertical chunk extent along Y.
pub const CHUNK_HEIGHT: usize = 32;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE;

/// Fixed-size block grid addressed in local coordinates.
///
/// Out-of-range reads return [`BlockKind::Air`]; out-of-range writes are
/// ignored and report `false`.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    blocks: Box<[BlockKind]>,
    dirty: bool,
}

impl Chunk {
    pub const SIZE: usize = CHUNK_SIZE;
    pub const HEIGHT: usize = CHUNK_HEIGHT;

    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![BlockKind::Air; CHUNK_VOLUME].into_boxed_slice(),
            dirty: false,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn origin(&self) -> WorldPos {
        self.coord.origin()
    }

    #[inline]
    pub fn get(&self, pos: LocalPos) -> BlockKind {
        self.blocks[pos.index()]
    }

    /// Writes `kind` and returns what was there before.
    #[inline]
    pub fn set(&mut self, pos: LocalPos, kind: BlockKind) -> BlockKind {
        std::mem::replace(&mut self.blocks[pos.index()], kind)
    }

    #[inline]
    pub fn get_block(&self, lx: i32, ly: i32, lz: i32) -> BlockKind {
        LocalPos::from_signed(lx, ly, lz)
            .map(|p| self.get(p))
            .unwrap_or(BlockKind::Air)
    }

    /// Returns `true` when the cell was in range and its content changed.
    pub fn set_block(&mut self, lx: i32, ly: i32, lz: i32, kind: BlockKind) -> bool {
        match LocalPos::from_signed(lx, ly, lz) {
            Some(p) => self.set(p, kind) != kind,
            None => false,
        }
    }

    /// Fills the inclusive local box `[min, max]`; used by generators.
    pub fn fill(&mut self, min: LocalPos, max: LocalPos, kind: BlockKind) {
        for y in min.y()..=max.y() {
            for z in min.z()..=max.z() {
                for x in min.x()..=max.x() {
                    if let Some(p) = LocalPos::new(x, y, z) {
                        self.set(p, kind);
                    }
                }
            }
        }
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|b| b.is_air())
    }

    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_solid()).count()
    }

    /// Raw storage in `(y, z, x)` order, matching [`LocalPos::index`].
    #[inline]
    pub fn blocks(&self) -> &[BlockKind] {
        &self.blocks
    }
}
