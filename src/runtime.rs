use hashbrown::HashMap;
use strata_chunk::ChunkCoord;
use strata_geom::Vec3;
use strata_mesh_cpu::ChunkMesh;
use strata_world::World;

use crate::config::{ConfigError, EngineConfig};

/// What one [`Runtime::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub loaded: usize,
    pub evicted: usize,
    pub rebuilt: usize,
    /// Dirty chunks still waiting after this tick.
    pub pending: usize,
}

/// Drives streaming and mesh rebuilds for a [`World`].
///
/// Meshes are keyed by chunk coordinate and replaced wholesale on rebuild.
pub struct Runtime {
    world: World,
    meshes: HashMap<ChunkCoord, ChunkMesh>,
    rebuild_budget: usize,
}

impl Runtime {
    pub fn new(world: World, rebuild_budget: usize) -> Self {
        Self {
            world,
            meshes: HashMap::new(),
            rebuild_budget: rebuild_budget.max(1),
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let generator = cfg.generator.build(cfg.world.seed);
        let world = World::new(cfg.world.clone(), generator);
        log::info!(
            "world seed {} with {:?} generator, render distance {}",
            cfg.world.seed,
            cfg.generator.kind,
            cfg.world.render_distance
        );
        Ok(Self::new(world, cfg.runtime.rebuild_budget))
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[inline]
    pub fn meshes(&self) -> &HashMap<ChunkCoord, ChunkMesh> {
        &self.meshes
    }

    #[inline]
    pub fn mesh(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.meshes.get(&coord)
    }

    #[inline]
    pub fn rebuild_budget(&self) -> usize {
        self.rebuild_budget
    }

    pub fn set_rebuild_budget(&mut self, budget: usize) {
        self.rebuild_budget = budget.max(1);
    }

    /// Streams around `viewer`, then rebuilds up to the budget of dirty
    /// chunks, oldest first.
    pub fn tick(&mut self, viewer: Vec3) -> TickStats {
        let delta = self.world.update_loaded_chunks(viewer);
        for coord in &delta.evicted {
            self.meshes.remove(coord);
        }
        let rebuilt = self.rebuild(self.rebuild_budget);
        let stats = TickStats {
            loaded: delta.loaded.len(),
            evicted: delta.evicted.len(),
            rebuilt,
            pending: self.world.dirty_len(),
        };
        if rebuilt > 0 {
            log::debug!(
                target: "mesh",
                "rebuilt {} chunk(s), {} pending, {} meshes resident",
                rebuilt,
                stats.pending,
                self.meshes.len()
            );
        }
        stats
    }

    /// Rebuilds every dirty chunk now. Returns how many were built.
    pub fn drain_all(&mut self) -> usize {
        let n = self.world.dirty_len();
        self.rebuild(n)
    }

    fn rebuild(&mut self, budget: usize) -> usize {
        let batch = self.world.take_dirty(budget);
        let mut built = 0;
        for coord in batch {
            let Some(chunk) = self.world.chunk(coord) else {
                continue;
            };
            self.meshes.insert(coord, ChunkMesh::build(chunk));
            built += 1;
        }
        built
    }
}
