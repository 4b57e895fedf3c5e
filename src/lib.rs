//! Voxel engine core: world streaming, meshing, picking, and movement.
#![forbid(unsafe_code)]

pub mod collision;
pub mod config;
pub mod raycast;
pub mod runtime;

pub use collision::{MoveResult, Walker, aabb_overlaps_solid, move_aabb, resolve_motion};
pub use config::{ConfigError, EngineConfig, GeneratorConfig, GeneratorKind, RuntimeConfig, WalkerConfig};
pub use raycast::{RayHit, raycast};
pub use runtime::{Runtime, TickStats};

pub use strata_blocks::{BlockKind, BreakTable};
pub use strata_chunk::{Chunk, ChunkCoord, LocalPos, WorldPos};
pub use strata_edit::{BreakProgress, BreakTracker, place_block};
pub use strata_geom::{Aabb, Vec3};
pub use strata_mesh_cpu::{ChunkMesh, Face, MeshData, MeshStats};
pub use strata_world::{BlockSource, World, WorldConfig};
