//! Loaded-world state: chunk map, streaming, dirty tracking, and overlays.
#![forbid(unsafe_code)]

pub mod doors;
pub mod edits;
pub mod generator;
pub mod world;

pub use edits::{EditStore, EditStoreStats};
pub use generator::{ChunkGenerator, EmptyGenerator, FlatGenerator, TerrainGenerator};
pub use world::{StreamDelta, World};

use serde::Deserialize;
use strata_blocks::BlockKind;
use strata_chunk::WorldPos;

/// Streaming and identity parameters of a world.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: i32,
    /// Horizontal load radius in chunks.
    pub render_distance: i32,
    /// Inclusive range of vertical chunk layers kept loaded.
    pub min_chunk_y: i32,
    pub max_chunk_y: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            render_distance: 4,
            min_chunk_y: 0,
            max_chunk_y: 1,
        }
    }
}

/// Read-only block access used by the raycaster and collision solver.
pub trait BlockSource {
    fn block(&self, pos: WorldPos) -> BlockKind;

    fn is_loaded(&self, _pos: WorldPos) -> bool {
        true
    }

    fn is_solid(&self, pos: WorldPos) -> bool {
        self.block(pos).is_solid()
    }

    fn is_targetable(&self, pos: WorldPos) -> bool {
        self.block(pos).is_targetable()
    }
}
