use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use strata_blocks::BlockKind;
use strata_chunk::{Chunk, ChunkCoord, WorldPos};
use strata_geom::Vec3;

use crate::edits::{ArchivedOverlays, EditStore, EditStoreStats};
use crate::generator::ChunkGenerator;
use crate::{BlockSource, WorldConfig};

/// Chunks that entered and left the loaded set during one streaming update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamDelta {
    pub loaded: Vec<ChunkCoord>,
    pub evicted: Vec<ChunkCoord>,
}

impl StreamDelta {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty() && self.evicted.is_empty()
    }
}

/// Sole owner of every loaded chunk.
///
/// A chunk sits in the dirty queue exactly when its dirty flag is set, so the
/// queue never holds duplicates or evicted coordinates.
pub struct World {
    config: WorldConfig,
    generator: Box<dyn ChunkGenerator>,
    chunks: HashMap<ChunkCoord, Chunk>,
    dirty: VecDeque<ChunkCoord>,
    pub(crate) doors: HashMap<WorldPos, bool>,
    player_blocks: HashSet<WorldPos>,
    edits: EditStore,
}

impl World {
    pub fn new(config: WorldConfig, generator: Box<dyn ChunkGenerator>) -> Self {
        Self {
            config,
            generator,
            chunks: HashMap::new(),
            dirty: VecDeque::new(),
            doors: HashMap::new(),
            player_blocks: HashSet::new(),
            edits: EditStore::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.config.seed
    }

    #[inline]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn loaded_len(&self) -> usize {
        self.chunks.len()
    }

    pub fn loaded_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    #[inline]
    pub fn is_chunk_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    #[inline]
    pub fn is_loaded(&self, pos: WorldPos) -> bool {
        self.is_chunk_loaded(pos.chunk())
    }

    pub fn edit_stats(&self) -> EditStoreStats {
        self.edits.stats()
    }

    /// Block at a world position; unloaded regions read as air.
    pub fn get_block(&self, pos: WorldPos) -> BlockKind {
        let (coord, local) = pos.split();
        self.chunks
            .get(&coord)
            .map(|c| c.get(local))
            .unwrap_or(BlockKind::Air)
    }

    /// Writes a block and queues its chunk for a rebuild.
    ///
    /// Returns `false` without side effects when the chunk is not loaded or the
    /// cell already holds `kind`. Overwriting a player-placed block clears its mark.
    pub fn set_block(&mut self, pos: WorldPos, kind: BlockKind) -> bool {
        if !self.write_block(pos, kind) {
            return false;
        }
        self.player_blocks.remove(&pos);
        true
    }

    /// Like [`World::set_block`], but records the cell as player-authored.
    pub fn set_player_block(&mut self, pos: WorldPos, kind: BlockKind) -> bool {
        if !self.write_block(pos, kind) {
            return false;
        }
        if kind.is_air() {
            self.player_blocks.remove(&pos);
        } else {
            self.player_blocks.insert(pos);
        }
        true
    }

    #[inline]
    pub fn is_player_block(&self, pos: WorldPos) -> bool {
        self.player_blocks.contains(&pos)
    }

    #[inline]
    pub fn player_block_count(&self) -> usize {
        self.player_blocks.len()
    }

    pub(crate) fn clear_player_mark(&mut self, pos: WorldPos) {
        self.player_blocks.remove(&pos);
    }

    /// Raw write: records the edit and dirties the chunk, leaves overlays alone.
    pub(crate) fn write_block(&mut self, pos: WorldPos, kind: BlockKind) -> bool {
        let (coord, local) = pos.split();
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            log::trace!(target: "world", "write to unloaded chunk {} at {} ignored", coord, pos);
            return false;
        };
        if chunk.get(local) == kind {
            return false;
        }
        chunk.set(local, kind);
        self.edits.set(pos, kind);
        self.enqueue_dirty(coord);
        true
    }

    fn enqueue_dirty(&mut self, coord: ChunkCoord) {
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            if !chunk.is_dirty() {
                chunk.mark_dirty();
                self.dirty.push_back(coord);
            }
        }
    }

    /// Dirty chunks in the order they were queued.
    pub fn dirty_chunks(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.dirty.iter().copied()
    }

    #[inline]
    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    /// Flags a loaded chunk for rebuild without changing its content.
    pub fn mark_chunk_dirty(&mut self, coord: ChunkCoord) {
        self.enqueue_dirty(coord);
    }

    pub fn mark_chunk_clean(&mut self, coord: ChunkCoord) {
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return;
        };
        if chunk.is_dirty() {
            chunk.clear_dirty();
            self.dirty.retain(|c| *c != coord);
        }
    }

    /// Pops up to `budget` dirty chunks, oldest first, clearing their flags.
    pub fn take_dirty(&mut self, budget: usize) -> Vec<ChunkCoord> {
        let n = budget.min(self.dirty.len());
        let out: Vec<ChunkCoord> = self.dirty.drain(..n).collect();
        for coord in &out {
            if let Some(chunk) = self.chunks.get_mut(coord) {
                chunk.clear_dirty();
            }
        }
        out
    }

    /// Drains the whole dirty queue.
    pub fn clear_dirty_chunks(&mut self) -> Vec<ChunkCoord> {
        self.take_dirty(self.dirty.len())
    }

    /// Chunk coordinates that should be resident for a viewer at `viewer`,
    /// nearest columns first.
    pub fn desired_chunks(&self, viewer: Vec3) -> Vec<ChunkCoord> {
        let center = ChunkCoord::containing(viewer);
        let r = self.config.render_distance.max(0);
        let r_sq = i64::from(r) * i64::from(r);
        let mut out = Vec::new();
        for dz in -r..=r {
            for dx in -r..=r {
                let column = ChunkCoord::new(center.cx + dx, 0, center.cz + dz);
                if column.distance_sq_xz(center) > r_sq {
                    continue;
                }
                for cy in self.config.min_chunk_y..=self.config.max_chunk_y {
                    out.push(column.offset(0, cy, 0));
                }
            }
        }
        out.sort_by_key(|c| (c.distance_sq_xz(center), c.cy, c.cz, c.cx));
        out
    }

    /// Streams chunks in and out around the viewer.
    ///
    /// Newly loaded chunks are generated, have their edits replayed, and are
    /// always queued dirty. Chunks still in range are left untouched.
    pub fn update_loaded_chunks(&mut self, viewer: Vec3) -> StreamDelta {
        let desired = self.desired_chunks(viewer);
        let keep: HashSet<ChunkCoord> = desired.iter().copied().collect();

        let mut delta = StreamDelta::default();
        let stale: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|c| !keep.contains(*c))
            .copied()
            .collect();
        for coord in stale {
            self.evict_chunk(coord);
            delta.evicted.push(coord);
        }
        for coord in desired {
            if !self.chunks.contains_key(&coord) {
                self.load_chunk(coord);
                delta.loaded.push(coord);
            }
        }
        if !delta.is_empty() {
            log::debug!(
                target: "stream",
                "viewer chunk {}: +{} -{} (loaded {}, dirty {})",
                ChunkCoord::containing(viewer),
                delta.loaded.len(),
                delta.evicted.len(),
                self.chunks.len(),
                self.dirty.len()
            );
        }
        delta
    }

    fn load_chunk(&mut self, coord: ChunkCoord) {
        let mut chunk = Chunk::new(coord);
        self.generator.generate(coord, &mut chunk);
        let edits = self.edits.snapshot_for_chunk(coord);
        for (pos, kind) in &edits {
            let (_, local) = pos.split();
            chunk.set(local, *kind);
        }
        let archived = self.edits.take_overlays(coord);
        self.doors.extend(archived.doors);
        self.player_blocks.extend(archived.player_blocks);
        log::trace!(target: "stream", "loaded chunk {} ({} edit(s) replayed)", coord, edits.len());
        self.chunks.insert(coord, chunk);
        self.enqueue_dirty(coord);
    }

    fn evict_chunk(&mut self, coord: ChunkCoord) {
        let Some(chunk) = self.chunks.remove(&coord) else {
            return;
        };
        if chunk.is_dirty() {
            self.dirty.retain(|c| *c != coord);
        }
        let mut archived = ArchivedOverlays::default();
        self.doors.retain(|pos, open| {
            if pos.chunk() == coord {
                archived.doors.push((*pos, *open));
                false
            } else {
                true
            }
        });
        self.player_blocks.retain(|pos| {
            if pos.chunk() == coord {
                archived.player_blocks.push(*pos);
                false
            } else {
                true
            }
        });
        self.edits.archive_overlays(coord, archived);
        log::trace!(target: "stream", "evicted chunk {}", coord);
    }

    /// Loads one chunk regardless of the viewer; used by tools and tests.
    pub fn ensure_chunk(&mut self, coord: ChunkCoord) -> bool {
        if self.chunks.contains_key(&coord) {
            return false;
        }
        self.load_chunk(coord);
        true
    }
}

impl BlockSource for World {
    #[inline]
    fn block(&self, pos: WorldPos) -> BlockKind {
        self.get_block(pos)
    }

    #[inline]
    fn is_loaded(&self, pos: WorldPos) -> bool {
        World::is_loaded(self, pos)
    }

    /// Open door pairs stay targetable so they can be closed again.
    fn is_targetable(&self, pos: WorldPos) -> bool {
        self.get_block(pos).is_targetable() || self.door_lower(pos).is_some()
    }
}
