use strata_chunk::WorldPos;
use strata_geom::{Axis, Vec3};
use strata_mesh_cpu::Face;
use strata_world::BlockSource;

/// Upper bound on cells visited by one ray.
pub const MAX_STEPS: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// The targetable block that stopped the ray.
    pub block: WorldPos,
    /// The cell visited just before `block`; where a new block would go.
    pub previous: WorldPos,
    /// Face of `block` the ray entered through; `None` if it started inside.
    pub face: Option<Face>,
    /// Distance along the ray to the entry point.
    pub distance: f32,
}

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

#[inline]
fn step_of(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Marches a ray cell by cell (Amanatides and Woo DDA) and returns the first
/// targetable block within `max_dist`.
///
/// The march stops with `None` when it leaves `max_dist`, enters an unloaded
/// chunk, or runs out of steps. A zero direction never hits.
pub fn raycast<S>(source: &S, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit>
where
    S: BlockSource + ?Sized,
{
    let len = dir.length();
    if !len.is_finite() || len < 1e-6 {
        return None;
    }
    let d = dir / len;

    let mut cell = [
        origin.x.floor() as i32,
        origin.y.floor() as i32,
        origin.z.floor() as i32,
    ];
    let o = origin.to_array();
    let dv = d.to_array();
    let mut step = [0i32; 3];
    let mut t_delta = [f32::MAX; 3];
    let mut t_max = [f32::MAX; 3];
    for a in 0..3 {
        step[a] = step_of(dv[a]);
        if step[a] == 0 {
            continue;
        }
        let inv = inv_or_max(dv[a]);
        let frac = o[a] - o[a].floor();
        t_delta[a] = inv;
        t_max[a] = if step[a] > 0 { (1.0 - frac) * inv } else { frac * inv };
    }

    let mut prev = cell;
    let mut entered: Option<Axis> = None;
    let mut t = 0.0f32;
    for _ in 0..MAX_STEPS {
        if t > max_dist {
            return None;
        }
        let pos = WorldPos::new(cell[0], cell[1], cell[2]);
        if !source.is_loaded(pos) {
            log::trace!(target: "raycast", "ray stopped at unloaded {}", pos);
            return None;
        }
        if source.is_targetable(pos) {
            let face = entered.map(|axis| Face::from_axis(axis, step[axis.index()] < 0));
            return Some(RayHit {
                block: pos,
                previous: WorldPos::new(prev[0], prev[1], prev[2]),
                face,
                distance: t,
            });
        }
        prev = cell;
        // Advance along the axis whose boundary is closest.
        let a = if t_max[0] < t_max[1] {
            if t_max[0] < t_max[2] { 0 } else { 2 }
        } else if t_max[1] < t_max[2] {
            1
        } else {
            2
        };
        if step[a] == 0 {
            return None;
        }
        cell[a] += step[a];
        t = t_max[a];
        t_max[a] += t_delta[a];
        entered = Some(Axis::ALL[a]);
    }
    None
}
