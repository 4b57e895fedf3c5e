//! Player-facing world edits: multi-hit block breaking and placement.
#![forbid(unsafe_code)]

use hashbrown::HashMap;
use strata_blocks::{BlockKind, BreakTable};
use strata_chunk::WorldPos;
use strata_geom::Aabb;
use strata_world::World;

/// Result of one recorded hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BreakProgress {
    pub kind: BlockKind,
    pub hits: u32,
    pub required: u32,
    /// The block was removed by this hit.
    pub broken: bool,
}

impl BreakProgress {
    /// Fraction of the way to breaking, in `(0, 1]`.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.hits as f32 / self.required as f32
    }
}

/// Per-position hit counters.
///
/// A counter remembers the kind it was started on; if the block at that
/// position has changed by the next hit, counting starts over.
#[derive(Debug, Default)]
pub struct BreakTracker {
    table: BreakTable,
    counters: HashMap<WorldPos, (BlockKind, u32)>,
}

impl BreakTracker {
    pub fn new(table: BreakTable) -> Self {
        Self {
            table,
            counters: HashMap::new(),
        }
    }

    #[inline]
    pub fn table(&self) -> &BreakTable {
        &self.table
    }

    /// Records one hit on `pos`. Air and unbreakable blocks return `None`.
    pub fn hit(&mut self, world: &mut World, pos: WorldPos) -> Option<BreakProgress> {
        let kind = world.get_block(pos);
        let Some(required) = self.table.required(kind) else {
            self.counters.remove(&pos);
            return None;
        };
        let entry = self.counters.entry(pos).or_insert((kind, 0));
        if entry.0 != kind {
            log::trace!(target: "edit", "{} at {} replaced {}; restarting", kind, pos, entry.0);
            *entry = (kind, 0);
        }
        entry.1 += 1;
        let hits = entry.1;
        if hits < required {
            return Some(BreakProgress {
                kind,
                hits,
                required,
                broken: false,
            });
        }

        self.counters.remove(&pos);
        if kind.is_door() {
            if let Some(lower) = world.door_lower(pos) {
                self.counters.remove(&lower);
                self.counters.remove(&lower.above());
            }
            world.remove_door(pos);
        } else {
            world.set_block(pos, BlockKind::Air);
        }
        log::debug!(target: "edit", "broke {} at {} after {} hit(s)", kind, pos, hits);
        Some(BreakProgress {
            kind,
            hits,
            required,
            broken: true,
        })
    }

    /// Current progress at `pos` without recording a hit.
    pub fn progress(&self, pos: WorldPos) -> Option<BreakProgress> {
        let &(kind, hits) = self.counters.get(&pos)?;
        let required = self.table.required(kind)?;
        Some(BreakProgress {
            kind,
            hits,
            required,
            broken: false,
        })
    }

    pub fn reset(&mut self, pos: WorldPos) -> bool {
        self.counters.remove(&pos).is_some()
    }

    pub fn clear(&mut self) {
        self.counters.clear();
    }

    #[inline]
    pub fn tracked_len(&self) -> usize {
        self.counters.len()
    }
}

/// Places a player block at `cell`, usually the cell a ray passed through
/// just before its hit.
///
/// Refuses unloaded or occupied cells, and cells whose box would overlap any
/// of `blockers` (typically the player's own body).
pub fn place_block(
    world: &mut World,
    cell: WorldPos,
    kind: BlockKind,
    blockers: &[Aabb],
) -> Option<WorldPos> {
    if kind.is_air() || !world.is_loaded(cell) || !world.get_block(cell).is_air() {
        return None;
    }
    if world.door_lower(cell).is_some() {
        return None;
    }
    let cell_box = Aabb::block(cell.x, cell.y, cell.z);
    if kind.is_solid() && blockers.iter().any(|b| b.intersects(&cell_box)) {
        return None;
    }
    world.set_player_block(cell, kind).then_some(cell)
}
