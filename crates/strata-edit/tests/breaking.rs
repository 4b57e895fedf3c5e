use strata_blocks::{BlockKind, BreakTable};
use strata_chunk::WorldPos;
use strata_edit::{BreakTracker, place_block};
use strata_geom::{Aabb, Vec3};
use strata_world::{FlatGenerator, World, WorldConfig};

/// Ground is grass at y = 3, dirt below, bedrock at y = 0.
fn world() -> World {
    let cfg = WorldConfig {
        seed: 3,
        render_distance: 1,
        min_chunk_y: 0,
        max_chunk_y: 0,
    };
    let mut w = World::new(cfg, Box::new(FlatGenerator::new(4)));
    w.update_loaded_chunks(Vec3::new(8.0, 8.0, 8.0));
    w.clear_dirty_chunks();
    w
}

#[test]
fn brick_breaks_on_eighth_hit() {
    let mut w = world();
    let mut t = BreakTracker::default();
    let p = WorldPos::new(4, 4, 4);
    w.set_block(p, BlockKind::Brick);
    for k in 1..8 {
        let prog = t.hit(&mut w, p).unwrap();
        assert_eq!((prog.hits, prog.required, prog.broken), (k, 8, false));
        assert!((prog.progress() - k as f32 / 8.0).abs() < 1e-6);
        assert_eq!(w.get_block(p), BlockKind::Brick);
    }
    let last = t.hit(&mut w, p).unwrap();
    assert!(last.broken);
    assert_eq!(last.kind, BlockKind::Brick);
    assert_eq!(w.get_block(p), BlockKind::Air);
    assert_eq!(t.tracked_len(), 0);
    assert!(t.progress(p).is_none());
    assert!(w.dirty_chunks().any(|c| c == p.chunk()));
}

#[test]
fn glass_takes_two() {
    let mut w = world();
    let mut t = BreakTracker::default();
    let p = WorldPos::new(1, 4, 1);
    w.set_block(p, BlockKind::Glass);
    assert!(!t.hit(&mut w, p).unwrap().broken);
    assert!(t.hit(&mut w, p).unwrap().broken);
    assert_eq!(t.hit(&mut w, p), None);
}

#[test]
fn counters_are_independent() {
    let mut w = world();
    let mut t = BreakTracker::default();
    let a = WorldPos::new(2, 3, 2);
    let b = WorldPos::new(3, 3, 2);
    t.hit(&mut w, a);
    t.hit(&mut w, a);
    t.hit(&mut w, b);
    assert_eq!(t.progress(a).map(|p| p.hits), Some(2));
    assert_eq!(t.progress(b).map(|p| p.hits), Some(1));
    assert_eq!(t.tracked_len(), 2);
    assert!(t.reset(a));
    assert!(!t.reset(a));
    assert_eq!(t.progress(b).map(|p| p.hits), Some(1));
    t.clear();
    assert_eq!(t.tracked_len(), 0);
}

#[test]
fn changed_kind_restarts_count() {
    let mut w = world();
    let mut t = BreakTracker::default();
    let p = WorldPos::new(5, 4, 5);
    w.set_block(p, BlockKind::Brick);
    for _ in 0..5 {
        t.hit(&mut w, p);
    }
    w.set_block(p, BlockKind::Planks);
    let prog = t.hit(&mut w, p).unwrap();
    assert_eq!(prog.kind, BlockKind::Planks);
    assert_eq!((prog.hits, prog.required), (1, 4));
}

#[test]
fn air_and_unbreakable_report_none() {
    let mut w = world();
    let mut t = BreakTracker::default();
    assert_eq!(t.hit(&mut w, WorldPos::new(0, 10, 0)), None);
    assert_eq!(t.hit(&mut w, WorldPos::new(0, 0, 0)), None);
    assert_eq!(w.get_block(WorldPos::new(0, 0, 0)), BlockKind::Bedrock);
    assert_eq!(t.tracked_len(), 0);
}

#[test]
fn overridden_table_applies() {
    let mut w = world();
    let mut table = BreakTable::default();
    table.set(BlockKind::Grass, Some(1));
    table.set(BlockKind::Dirt, None);
    let mut t = BreakTracker::new(table);
    assert!(t.hit(&mut w, WorldPos::new(6, 3, 6)).unwrap().broken);
    assert_eq!(t.hit(&mut w, WorldPos::new(6, 2, 6)), None);
}

#[test]
fn breaking_door_half_removes_pair() {
    let mut w = world();
    let mut t = BreakTracker::default();
    let lower = WorldPos::new(7, 4, 7);
    assert!(w.place_door(lower));
    // A stray hit on the lower half, then the upper half is broken.
    t.hit(&mut w, lower);
    assert_eq!(t.tracked_len(), 1);
    for _ in 0..3 {
        t.hit(&mut w, lower.above());
    }
    assert_eq!(w.get_block(lower), BlockKind::Air);
    assert_eq!(w.get_block(lower.above()), BlockKind::Air);
    assert_eq!(w.door_count(), 0);
    assert_eq!(t.tracked_len(), 0);
}

#[test]
fn broken_player_block_loses_mark() {
    let mut w = world();
    let mut t = BreakTracker::default();
    let p = place_block(&mut w, WorldPos::new(3, 4, 3), BlockKind::Leaves, &[]).unwrap();
    assert!(w.is_player_block(p));
    assert!(t.hit(&mut w, p).unwrap().broken);
    assert!(!w.is_player_block(p));
}

#[test]
fn place_refuses_occupied_and_blocked_cells() {
    let mut w = world();
    // Occupied by grass.
    assert_eq!(place_block(&mut w, WorldPos::new(2, 3, 2), BlockKind::Brick, &[]), None);
    // Unloaded.
    assert_eq!(place_block(&mut w, WorldPos::new(900, 4, 0), BlockKind::Brick, &[]), None);
    // Overlaps the player.
    let body = Aabb::from_center(Vec3::new(2.5, 4.9, 2.5), Vec3::new(0.3, 0.9, 0.3));
    assert_eq!(place_block(&mut w, WorldPos::new(2, 4, 2), BlockKind::Brick, &[body]), None);
    // Touching but not overlapping is fine.
    let beside = Aabb::from_center(Vec3::new(3.5, 4.9, 2.5), Vec3::new(0.5, 0.9, 0.3));
    assert_eq!(
        place_block(&mut w, WorldPos::new(2, 4, 2), BlockKind::Brick, &[beside]),
        Some(WorldPos::new(2, 4, 2))
    );
    assert!(w.is_player_block(WorldPos::new(2, 4, 2)));
}

#[test]
fn place_refuses_open_doorway() {
    let mut w = world();
    let lower = WorldPos::new(10, 4, 10);
    w.place_door(lower);
    w.toggle_door(lower);
    assert_eq!(place_block(&mut w, lower.above(), BlockKind::Stone, &[]), None);
}
