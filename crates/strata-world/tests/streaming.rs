use std::cell::RefCell;
use std::rc::Rc;

use strata_blocks::BlockKind;
use strata_chunk::{CHUNK_SIZE, Chunk, ChunkCoord, WorldPos};
use strata_geom::Vec3;
use strata_world::{ChunkGenerator, EmptyGenerator, FlatGenerator, World, WorldConfig};

fn config(render_distance: i32) -> WorldConfig {
    WorldConfig {
        seed: 7,
        render_distance,
        min_chunk_y: 0,
        max_chunk_y: 0,
    }
}

fn flat_world(render_distance: i32) -> World {
    World::new(config(render_distance), Box::new(FlatGenerator::new(4)))
}

/// Counts generator invocations per coordinate.
struct CountingGenerator {
    calls: Rc<RefCell<Vec<ChunkCoord>>>,
}

impl ChunkGenerator for CountingGenerator {
    fn generate(&self, coord: ChunkCoord, _chunk: &mut Chunk) {
        self.calls.borrow_mut().push(coord);
    }
}

#[test]
fn first_load_marks_every_chunk_dirty() {
    let mut world = flat_world(2);
    let delta = world.update_loaded_chunks(Vec3::new(8.0, 10.0, 8.0));
    // Disc of radius 2: 13 columns.
    assert_eq!(delta.loaded.len(), 13);
    assert!(delta.evicted.is_empty());
    assert_eq!(world.loaded_len(), 13);
    assert_eq!(world.dirty_len(), 13);
    let dirty: Vec<ChunkCoord> = world.dirty_chunks().collect();
    for coord in &delta.loaded {
        assert!(dirty.contains(coord));
        assert!(world.chunk(*coord).unwrap().is_dirty());
    }
    // Nearest chunk first.
    assert_eq!(dirty[0], ChunkCoord::new(0, 0, 0));
}

#[test]
fn unchanged_viewer_does_not_redirty() {
    let mut world = flat_world(2);
    let viewer = Vec3::new(8.0, 10.0, 8.0);
    world.update_loaded_chunks(viewer);
    world.clear_dirty_chunks();
    let delta = world.update_loaded_chunks(viewer);
    assert!(delta.is_empty());
    assert_eq!(world.dirty_len(), 0);
    // Moving inside the same chunk changes nothing either.
    let delta = world.update_loaded_chunks(Vec3::new(15.5, 3.0, 0.5));
    assert!(delta.is_empty());
    assert_eq!(world.dirty_len(), 0);
}

#[test]
fn moving_streams_new_chunks_dirty_and_evicts_old() {
    let mut world = flat_world(1);
    world.update_loaded_chunks(Vec3::new(0.5, 5.0, 0.5));
    world.clear_dirty_chunks();
    let delta = world.update_loaded_chunks(Vec3::new(CHUNK_SIZE as f32 + 0.5, 5.0, 0.5));
    assert!(!delta.loaded.is_empty());
    assert!(!delta.evicted.is_empty());
    assert_eq!(world.dirty_len(), delta.loaded.len());
    for coord in &delta.evicted {
        assert!(!world.is_chunk_loaded(*coord));
    }
    assert!(world.is_chunk_loaded(ChunkCoord::new(2, 0, 0)));
    assert!(!world.is_chunk_loaded(ChunkCoord::new(-1, 0, 0)));
}

#[test]
fn evicted_chunks_leave_the_dirty_queue() {
    let mut world = flat_world(1);
    world.update_loaded_chunks(Vec3::new(0.5, 5.0, 0.5));
    assert_eq!(world.dirty_len(), 5);
    world.update_loaded_chunks(Vec3::new(100.0 * CHUNK_SIZE as f32, 5.0, 0.5));
    assert_eq!(world.dirty_len(), 5);
    assert!(world.dirty_chunks().all(|c| world.is_chunk_loaded(c)));
}

#[test]
fn generator_runs_once_per_instantiation() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let generator = CountingGenerator {
        calls: Rc::clone(&calls),
    };
    let mut world = World::new(config(1), Box::new(generator));
    world.update_loaded_chunks(Vec3::ZERO);
    world.update_loaded_chunks(Vec3::new(1.0, 0.0, 1.0));
    let mut seen = calls.borrow().clone();
    let n = seen.len();
    seen.sort();
    seen.dedup();
    assert_eq!(n, 5);
    assert_eq!(seen.len(), 5);
}

#[test]
fn unloaded_reads_are_air_and_writes_ignored() {
    let mut world = flat_world(0);
    world.update_loaded_chunks(Vec3::new(1.0, 1.0, 1.0));
    let far = WorldPos::new(500, 2, 500);
    assert_eq!(world.get_block(far), BlockKind::Air);
    assert!(!world.set_block(far, BlockKind::Stone));
    assert!(world.get_block(WorldPos::new(3, 1, 3)).is_solid());
}

#[test]
fn repeated_edits_enqueue_once() {
    let mut world = flat_world(1);
    world.update_loaded_chunks(Vec3::ZERO);
    world.clear_dirty_chunks();
    let p = WorldPos::new(2, 6, 2);
    assert!(world.set_block(p, BlockKind::Brick));
    assert!(world.set_block(p, BlockKind::Glass));
    assert!(world.set_block(p.above(), BlockKind::Glass));
    assert_eq!(world.dirty_chunks().collect::<Vec<_>>(), vec![ChunkCoord::new(0, 0, 0)]);
    // Same value is a no-op.
    world.clear_dirty_chunks();
    assert!(!world.set_block(p, BlockKind::Glass));
    assert_eq!(world.dirty_len(), 0);
}

#[test]
fn negative_coordinates_resolve_to_owning_chunk() {
    let mut world = World::new(config(2), Box::new(EmptyGenerator));
    world.update_loaded_chunks(Vec3::ZERO);
    world.clear_dirty_chunks();
    let p = WorldPos::new(-1, 3, -1);
    assert!(world.set_block(p, BlockKind::Stone));
    assert_eq!(world.dirty_chunks().collect::<Vec<_>>(), vec![ChunkCoord::new(-1, 0, -1)]);
    let chunk = world.chunk(ChunkCoord::new(-1, 0, -1)).unwrap();
    assert_eq!(
        chunk.get_block(CHUNK_SIZE as i32 - 1, 3, CHUNK_SIZE as i32 - 1),
        BlockKind::Stone
    );
}

#[test]
fn budgeted_drain_completes() {
    let mut world = flat_world(3);
    world.update_loaded_chunks(Vec3::ZERO);
    let total = world.dirty_len();
    let budget = 4;
    let mut ticks = 0;
    let mut drained = 0;
    while world.dirty_len() > 0 {
        let batch = world.take_dirty(budget);
        assert!(batch.len() <= budget);
        drained += batch.len();
        ticks += 1;
    }
    assert_eq!(drained, total);
    assert_eq!(ticks, total.div_ceil(budget));
    assert!(world.loaded_coords().all(|c| !world.chunk(c).unwrap().is_dirty()));
}

#[test]
fn mark_clean_removes_single_entry() {
    let mut world = flat_world(1);
    world.update_loaded_chunks(Vec3::ZERO);
    let first = world.dirty_chunks().next().unwrap();
    world.mark_chunk_clean(first);
    assert_eq!(world.dirty_len(), 4);
    assert!(!world.dirty_chunks().any(|c| c == first));
    world.mark_chunk_dirty(first);
    assert_eq!(world.dirty_chunks().last(), Some(first));
}

#[test]
fn edits_survive_eviction() {
    let mut world = flat_world(0);
    world.update_loaded_chunks(Vec3::ZERO);
    let p = WorldPos::new(4, 4, 4);
    assert!(world.set_player_block(p, BlockKind::Planks));
    assert!(world.set_block(WorldPos::new(5, 3, 5), BlockKind::Air));
    world.update_loaded_chunks(Vec3::new(1000.0, 0.0, 1000.0));
    assert!(!world.is_loaded(p));
    assert!(!world.is_player_block(p));
    assert_eq!(world.edit_stats().archived_player_blocks, 1);
    world.update_loaded_chunks(Vec3::ZERO);
    assert_eq!(world.get_block(p), BlockKind::Planks);
    assert!(world.is_player_block(p));
    assert_eq!(world.get_block(WorldPos::new(5, 3, 5)), BlockKind::Air);
}

#[test]
fn vertical_layers_follow_config() {
    let cfg = WorldConfig {
        min_chunk_y: -1,
        max_chunk_y: 1,
        ..config(0)
    };
    let mut world = World::new(cfg, Box::new(EmptyGenerator));
    let delta = world.update_loaded_chunks(Vec3::ZERO);
    assert_eq!(delta.loaded.len(), 3);
    assert!(world.is_chunk_loaded(ChunkCoord::new(0, -1, 0)));
    assert!(world.is_chunk_loaded(ChunkCoord::new(0, 1, 0)));
}
