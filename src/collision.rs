//! Swept AABB movement against the block grid, plus a gravity-driven walker.

use strata_chunk::WorldPos;
use strata_geom::{Aabb, Axis, Vec3};
use strata_world::BlockSource;

/// Slack on the trailing face of a sweep, so cells the box already sits in or
/// against are not treated as obstacles.
const EPS: f32 = 1e-4;

/// Relative slack for f32 rounding of a face snapped onto a cell boundary.
const SNAP_REL: f32 = 2.5e-7;

#[inline]
fn snap_slack(v: f32) -> f32 {
    SNAP_REL * v.abs().max(1.0)
}

/// Resolution order for [`move_aabb`].
const AXIS_ORDER: [Axis; 3] = [Axis::Y, Axis::X, Axis::Z];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResult {
    /// Corrected box centre.
    pub position: Vec3,
    /// Per axis (`X`, `Y`, `Z`): motion was cut short by a solid block.
    pub blocked: [bool; 3],
    /// Downward motion was stopped by the ground.
    pub on_ground: bool,
}

#[inline]
fn cell_span(min: f32, max: f32) -> (i32, i32) {
    (
        (min + snap_slack(min)).floor() as i32,
        (max - snap_slack(max)).floor() as i32,
    )
}

fn cell_at(axis: Axis, along: i32, a: i32, b: i32) -> WorldPos {
    match axis {
        Axis::X => WorldPos::new(along, a, b),
        Axis::Y => WorldPos::new(a, along, b),
        Axis::Z => WorldPos::new(a, b, along),
    }
}

/// The two axes perpendicular to `axis`, in the order `cell_at` expects.
#[inline]
fn cross_axes(axis: Axis) -> (Axis, Axis) {
    match axis {
        Axis::X => (Axis::Y, Axis::Z),
        Axis::Y => (Axis::X, Axis::Z),
        Axis::Z => (Axis::X, Axis::Y),
    }
}

fn layer_is_solid<S>(source: &S, axis: Axis, along: i32, center: Vec3, half: Vec3) -> bool
where
    S: BlockSource + ?Sized,
{
    let (a, b) = cross_axes(axis);
    let (a0, a1) = cell_span(center.get(a) - half.get(a), center.get(a) + half.get(a));
    let (b0, b1) = cell_span(center.get(b) - half.get(b), center.get(b) + half.get(b));
    for i in a0..=a1 {
        for j in b0..=b1 {
            if source.is_solid(cell_at(axis, along, i, j)) {
                return true;
            }
        }
    }
    false
}

/// Moves the box along one axis. Returns the new centre coordinate on that
/// axis and whether a block stopped it.
fn sweep_axis<S>(source: &S, center: Vec3, half: Vec3, axis: Axis, d: f32) -> (f32, bool)
where
    S: BlockSource + ?Sized,
{
    let c = center.get(axis);
    let h = half.get(axis);
    if d == 0.0 {
        return (c, false);
    }
    if d > 0.0 {
        let e0 = c + h;
        let first = (e0 - EPS).floor() as i32 + 1;
        // The cell holding the target edge is tested even when the move is
        // shorter than the slack.
        let last = (e0 + d).ceil() as i32 - 1;
        for cell in first..=last {
            if layer_is_solid(source, axis, cell, center, half) {
                return (cell as f32 - h, true);
            }
        }
    } else {
        let e0 = c - h;
        let first = (e0 + EPS).floor() as i32 - 1;
        let last = (e0 + d).floor() as i32;
        for cell in (last..=first).rev() {
            if layer_is_solid(source, axis, cell, center, half) {
                return ((cell + 1) as f32 + h, true);
            }
        }
    }
    (c + d, false)
}

/// Moves a box of half-extents `half` centred at `center` by `delta`.
///
/// Axes resolve one at a time, Y first, then X, then Z; each stops flush
/// against the first solid layer its leading face would cross. Cells the
/// box already overlaps are ignored, so an embedded box can still move out.
pub fn move_aabb<S>(source: &S, center: Vec3, half: Vec3, delta: Vec3) -> MoveResult
where
    S: BlockSource + ?Sized,
{
    let mut pos = center;
    let mut blocked = [false; 3];
    for axis in AXIS_ORDER {
        let (v, hit) = sweep_axis(source, pos, half, axis, delta.get(axis));
        pos = pos.with(axis, v);
        blocked[axis.index()] = hit;
    }
    MoveResult {
        position: pos,
        blocked,
        on_ground: blocked[Axis::Y.index()] && delta.y < 0.0,
    }
}

/// [`move_aabb`] with `delta = velocity * dt`.
pub fn resolve_motion<S>(source: &S, center: Vec3, half: Vec3, velocity: Vec3, dt: f32) -> MoveResult
where
    S: BlockSource + ?Sized,
{
    move_aabb(source, center, half, velocity * dt)
}

/// Whether `aabb` overlaps any solid cell.
pub fn aabb_overlaps_solid<S>(source: &S, aabb: &Aabb) -> bool
where
    S: BlockSource + ?Sized,
{
    let (x0, x1) = cell_span(aabb.min.x, aabb.max.x);
    let (y0, y1) = cell_span(aabb.min.y, aabb.max.y);
    let (z0, z1) = cell_span(aabb.min.z, aabb.max.z);
    for y in y0..=y1 {
        for z in z0..=z1 {
            for x in x0..=x1 {
                if source.is_solid(WorldPos::new(x, y, z)) {
                    return true;
                }
            }
        }
    }
    false
}

/// First-person body: feet position, upright box, gravity and jumping.
#[derive(Clone, Debug)]
pub struct Walker {
    pub pos: Vec3, // feet position (x,z at center, y at feet)
    pub vel: Vec3,
    pub on_ground: bool,
    pub height: f32,
    pub eye_height: f32,
    pub radius: f32,     // horizontal half-width
    pub speed: f32,      // walk speed (units/s)
    pub jump_speed: f32, // initial jump velocity
    pub gravity: f32,    // negative
    pub max_fall: f32,
}

impl Walker {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            pos: spawn,
            vel: Vec3::ZERO,
            on_ground: false,
            height: 1.75,
            eye_height: 1.60,
            radius: 0.35,
            speed: 5.0,
            jump_speed: 7.5,
            gravity: -25.0,
            max_fall: 50.0,
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.radius, self.height * 0.5, self.radius)
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.pos + Vec3::new(0.0, self.height * 0.5, 0.0)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.center(), self.half_extents())
    }

    pub fn eye_position(&self) -> Vec3 {
        self.pos + Vec3::new(0.0, self.eye_height, 0.0)
    }

    /// Advances one tick. `wish` is a horizontal direction (its Y is ignored);
    /// `jump` only takes effect while standing on the ground.
    pub fn step<S>(&mut self, source: &S, wish: Vec3, jump: bool, dt: f32) -> MoveResult
    where
        S: BlockSource + ?Sized,
    {
        let wish = Vec3::new(wish.x, 0.0, wish.z).normalized();
        let horiz = wish * self.speed;
        if self.on_ground && jump {
            self.vel.y = self.jump_speed;
            self.on_ground = false;
        }
        self.vel.y = (self.vel.y + self.gravity * dt).max(-self.max_fall);
        self.vel.x = horiz.x;
        self.vel.z = horiz.z;

        let half = self.half_extents();
        let res = resolve_motion(source, self.center(), half, self.vel, dt);
        self.pos = res.position - Vec3::new(0.0, half.y, 0.0);
        if res.blocked[Axis::Y.index()] {
            self.vel.y = 0.0;
        }
        self.on_ground = res.on_ground;
        res
    }
}
