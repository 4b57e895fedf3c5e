//! CPU mesh builder: turns a chunk snapshot into merged, chunk-local quads.
#![forbid(unsafe_code)]

pub mod face;
mod greedy;
pub mod mesh_build;

pub use face::Face;
pub use mesh_build::{MeshData, MeshStats};

use strata_chunk::{Chunk, ChunkCoord};
use strata_geom::{Axis, Vec3};

/// Builds the greedy mesh of `chunk` in chunk-local coordinates.
///
/// Faces are emitted only between a solid block and a non-solid neighbour;
/// cells outside the chunk count as non-solid, so border faces are always
/// present. Adjacent faces merge only when their block kinds are identical.
pub fn build_chunk_mesh(chunk: &Chunk) -> MeshData {
    let mut out = MeshData::default();
    build_chunk_mesh_into(chunk, &mut out);
    out
}

/// Like [`build_chunk_mesh`], reusing the buffers of `out`.
pub fn build_chunk_mesh_into(chunk: &Chunk, out: &mut MeshData) {
    out.clear_keep_capacity();
    if chunk.is_all_air() {
        return;
    }
    greedy::mesh_chunk(chunk, out);
    debug_assert!(
        vertices_in_local_bounds(out),
        "chunk {} produced a vertex outside local bounds",
        chunk.coord()
    );
}

fn vertices_in_local_bounds(mesh: &MeshData) -> bool {
    mesh.positions().all(|p| {
        Axis::ALL
            .iter()
            .all(|&a| (0.0..=greedy::local_extent(a)).contains(&p[a.index()]))
    })
}

/// A built mesh plus the placement the renderer needs.
#[derive(Clone, Debug)]
pub struct ChunkMesh {
    pub coord: ChunkCoord,
    /// World-space offset of the chunk's local origin.
    pub translation: Vec3,
    pub data: MeshData,
}

impl ChunkMesh {
    pub fn build(chunk: &Chunk) -> Self {
        let data = build_chunk_mesh(chunk);
        let stats = data.stats();
        log::trace!(
            target: "mesh",
            "chunk {}: {} quads, {} vertices",
            chunk.coord(),
            stats.quads,
            stats.vertices
        );
        Self {
            coord: chunk.coord(),
            translation: chunk.coord().translation(),
            data,
        }
    }

    #[inline]
    pub fn stats(&self) -> MeshStats {
        self.data.stats()
    }

    /// Vertex positions offset into world space.
    pub fn world_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.data
            .positions()
            .map(|p| Vec3::from(p) + self.translation)
    }
}
