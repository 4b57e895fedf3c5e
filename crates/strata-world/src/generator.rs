//! Chunk content providers. The world calls a generator once for every chunk it
//! instantiates; edits are replayed on top afterwards.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use strata_blocks::BlockKind;
use strata_chunk::{CHUNK_HEIGHT, CHUNK_SIZE, Chunk, ChunkCoord, LocalPos};

pub trait ChunkGenerator {
    fn generate(&self, coord: ChunkCoord, chunk: &mut Chunk);
}

/// Leaves every chunk as air.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyGenerator;

impl ChunkGenerator for EmptyGenerator {
    fn generate(&self, _coord: ChunkCoord, _chunk: &mut Chunk) {}
}

/// Column material for a surface at world height `top` (exclusive).
#[inline]
fn column_block(wy: i32, top: i32) -> BlockKind {
    if wy >= top {
        BlockKind::Air
    } else if wy == 0 {
        BlockKind::Bedrock
    } else if wy == top - 1 {
        BlockKind::Grass
    } else if wy >= top - 4 {
        BlockKind::Dirt
    } else {
        BlockKind::Stone
    }
}

fn fill_columns(coord: ChunkCoord, chunk: &mut Chunk, mut top_at: impl FnMut(i32, i32) -> i32) {
    let origin = coord.origin();
    for z in 0..CHUNK_SIZE {
        for x in 0..CHUNK_SIZE {
            let top = top_at(origin.x + x as i32, origin.z + z as i32);
            for y in 0..CHUNK_HEIGHT {
                let wy = origin.y + y as i32;
                if wy < 0 {
                    continue;
                }
                let kind = column_block(wy, top);
                if kind.is_air() {
                    break;
                }
                if let Some(p) = LocalPos::new(x, y, z) {
                    chunk.set(p, kind);
                }
            }
        }
    }
}

/// Level ground: every column is solid below `ground_height`.
#[derive(Clone, Copy, Debug)]
pub struct FlatGenerator {
    pub ground_height: i32,
}

impl FlatGenerator {
    pub fn new(ground_height: i32) -> Self {
        Self { ground_height }
    }
}

impl ChunkGenerator for FlatGenerator {
    fn generate(&self, coord: ChunkCoord, chunk: &mut Chunk) {
        fill_columns(coord, chunk, |_, _| self.ground_height);
    }
}

/// Rolling heightmap terrain from seeded simplex noise.
pub struct TerrainGenerator {
    noise: FastNoiseLite,
    base_height: i32,
    amplitude: f32,
}

impl TerrainGenerator {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(0.012));
        Self {
            noise,
            base_height: 20,
            amplitude: 8.0,
        }
    }

    pub fn with_shape(mut self, base_height: i32, amplitude: f32) -> Self {
        self.base_height = base_height;
        self.amplitude = amplitude;
        self
    }

    pub fn height_at(&self, wx: i32, wz: i32) -> i32 {
        let n = self.noise.get_noise_2d(wx as f32, wz as f32);
        (self.base_height as f32 + n * self.amplitude).round() as i32
    }
}

impl ChunkGenerator for TerrainGenerator {
    fn generate(&self, coord: ChunkCoord, chunk: &mut Chunk) {
        fill_columns(coord, chunk, |wx, wz| self.height_at(wx, wz).max(1));
    }
}
