//! Per-chunk archive of world edits and overlay state.

use hashbrown::HashMap;
use strata_blocks::BlockKind;
use strata_chunk::{ChunkCoord, WorldPos};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditStoreStats {
    pub chunk_entries: usize,
    pub block_edits: usize,
    pub archived_doors: usize,
    pub archived_player_blocks: usize,
}

/// Overlay entries parked while their chunk is unloaded.
#[derive(Default, Debug, Clone)]
pub struct ArchivedOverlays {
    pub doors: Vec<(WorldPos, bool)>,
    pub player_blocks: Vec<WorldPos>,
}

/// Chunk-keyed store of every block edit made through the world, so a chunk
/// regenerated after eviction can be brought back to its edited state.
#[derive(Default)]
pub struct EditStore {
    blocks: HashMap<ChunkCoord, HashMap<WorldPos, BlockKind>>,
    overlays: HashMap<ChunkCoord, ArchivedOverlays>,
}

impl EditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> EditStoreStats {
        EditStoreStats {
            chunk_entries: self.blocks.len(),
            block_edits: self.blocks.values().map(|m| m.len()).sum(),
            archived_doors: self.overlays.values().map(|o| o.doors.len()).sum(),
            archived_player_blocks: self.overlays.values().map(|o| o.player_blocks.len()).sum(),
        }
    }

    pub fn get(&self, pos: WorldPos) -> Option<BlockKind> {
        self.blocks
            .get(&pos.chunk())
            .and_then(|m| m.get(&pos).copied())
    }

    pub fn set(&mut self, pos: WorldPos, kind: BlockKind) {
        self.blocks.entry(pos.chunk()).or_default().insert(pos, kind);
    }

    /// Edits for one chunk, in unspecified order.
    pub fn snapshot_for_chunk(&self, coord: ChunkCoord) -> Vec<(WorldPos, BlockKind)> {
        self.blocks
            .get(&coord)
            .map(|m| m.iter().map(|(p, k)| (*p, *k)).collect())
            .unwrap_or_default()
    }

    pub fn archive_overlays(&mut self, coord: ChunkCoord, overlays: ArchivedOverlays) {
        if overlays.doors.is_empty() && overlays.player_blocks.is_empty() {
            return;
        }
        let slot = self.overlays.entry(coord).or_default();
        slot.doors.extend(overlays.doors);
        slot.player_blocks.extend(overlays.player_blocks);
    }

    /// Removes and returns archived overlays for a chunk that is loading again.
    pub fn take_overlays(&mut self, coord: ChunkCoord) -> ArchivedOverlays {
        self.overlays.remove(&coord).unwrap_or_default()
    }
}
