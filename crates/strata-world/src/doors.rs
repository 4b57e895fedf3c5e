//! Door pairs: two stacked cells plus an open/closed overlay keyed by the lower cell.

use strata_blocks::BlockKind;
use strata_chunk::WorldPos;

use crate::world::World;

impl World {
    /// Normalises either half of a door pair to its lower cell.
    pub fn door_lower(&self, pos: WorldPos) -> Option<WorldPos> {
        let below = pos.below();
        let keyed = if self.doors.contains_key(&pos) {
            Some(pos)
        } else if self.doors.contains_key(&below) {
            Some(below)
        } else {
            None
        };
        if let Some(lower) = keyed {
            debug_assert_ne!(
                self.get_block(lower),
                BlockKind::DoorUpper,
                "door overlay keyed by an upper half at {lower}"
            );
            return Some(lower);
        }
        match self.get_block(pos) {
            BlockKind::DoorLower => Some(pos),
            BlockKind::DoorUpper => Some(below),
            _ => None,
        }
    }

    /// Open state of the door at either half; absent entries read as closed.
    pub fn is_door_open(&self, pos: WorldPos) -> bool {
        self.door_lower(pos)
            .and_then(|lower| self.doors.get(&lower).copied())
            .unwrap_or(false)
    }

    #[inline]
    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    /// Places a closed door with its lower half at `lower`.
    ///
    /// Both cells must be loaded air.
    pub fn place_door(&mut self, lower: WorldPos) -> bool {
        let upper = lower.above();
        if !self.is_loaded(lower) || !self.is_loaded(upper) {
            return false;
        }
        if !self.get_block(lower).is_air() || !self.get_block(upper).is_air() {
            return false;
        }
        self.write_block(lower, BlockKind::DoorLower);
        self.write_block(upper, BlockKind::DoorUpper);
        self.doors.insert(lower, false);
        true
    }

    /// Flips the door containing `pos` and returns its new open state.
    ///
    /// Opening clears both halves to air; closing restores them. A doorway
    /// that has since been blocked stays open. Returns `None` if `pos` is not
    /// part of a door.
    pub fn toggle_door(&mut self, pos: WorldPos) -> Option<bool> {
        let lower = self.door_lower(pos)?;
        let upper = lower.above();
        debug_assert_ne!(
            self.get_block(lower),
            BlockKind::DoorUpper,
            "door overlay keyed by an upper half at {lower}"
        );
        let open = self.doors.get(&lower).copied().unwrap_or(false);
        if open {
            if !self.get_block(lower).is_air() || !self.get_block(upper).is_air() {
                log::debug!(target: "world", "door at {} is obstructed; staying open", lower);
                return Some(true);
            }
            self.write_block(lower, BlockKind::DoorLower);
            self.write_block(upper, BlockKind::DoorUpper);
        } else {
            if self.get_block(lower) != BlockKind::DoorLower {
                return None;
            }
            self.write_block(lower, BlockKind::Air);
            self.write_block(upper, BlockKind::Air);
        }
        self.doors.insert(lower, !open);
        log::trace!(target: "world", "door at {} -> {}", lower, if open { "closed" } else { "open" });
        Some(!open)
    }

    /// Removes the door containing `pos`, both halves and overlay entry.
    pub fn remove_door(&mut self, pos: WorldPos) -> bool {
        let Some(lower) = self.door_lower(pos) else {
            return false;
        };
        let upper = lower.above();
        for cell in [lower, upper] {
            if self.get_block(cell).is_door() {
                self.write_block(cell, BlockKind::Air);
            }
            self.clear_player_mark(cell);
        }
        self.doors.remove(&lower);
        true
    }
}
