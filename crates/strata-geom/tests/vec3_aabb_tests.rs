use strata_geom::{Aabb, Axis, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    assert!(vec3_approx_eq(a + b, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq((a + b) - a, b, 1e-6));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-6));
    assert!(vec3_approx_eq((a * 2.0) / 2.0, a, 1e-6));

    let mut v = Vec3::ONE;
    v += Vec3::new(2.0, 3.0, 4.0);
    v -= Vec3::splat(1.0);
    assert!(vec3_approx_eq(v, Vec3::new(2.0, 3.0, 4.0), 1e-6));
}

#[test]
fn vec3_normalize_zero_is_noop() {
    let n = Vec3::new(3.0, 4.0, 0.0).normalized();
    assert!(vec3_approx_eq(n, Vec3::new(0.6, 0.8, 0.0), 1e-6));
    assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
}

#[test]
fn vec3_cross_basis() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::UP;
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-6));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-6));
}

#[test]
fn vec3_floor_handles_negatives() {
    let f = Vec3::new(-0.5, 1.5, -2.0).floor();
    assert_eq!(f, Vec3::new(-1.0, 1.0, -2.0));
}

#[test]
fn axis_accessors() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(v.get(Axis::X), 1.0);
    assert_eq!(v.get(Axis::Y), 2.0);
    assert_eq!(v.get(Axis::Z), 3.0);
    assert_eq!(v.with(Axis::Y, 9.0), Vec3::new(1.0, 9.0, 3.0));
    assert_eq!(Axis::Z.index(), 2);
}

#[test]
fn aabb_center_and_half_extents() {
    let b = Aabb::from_center(Vec3::new(2.0, 3.0, 4.0), Vec3::new(0.3, 0.9, 0.3));
    assert!(vec3_approx_eq(b.center(), Vec3::new(2.0, 3.0, 4.0), 1e-6));
    assert!(vec3_approx_eq(b.half_extents(), Vec3::new(0.3, 0.9, 0.3), 1e-6));
    let t = b.translated(Vec3::new(1.0, 0.0, -1.0));
    assert!(vec3_approx_eq(t.center(), Vec3::new(3.0, 3.0, 3.0), 1e-6));
}

#[test]
fn aabb_block_cells() {
    let b = Aabb::block(-1, 0, 2);
    assert_eq!(b.min, Vec3::new(-1.0, 0.0, 2.0));
    assert_eq!(b.max, Vec3::new(0.0, 1.0, 3.0));
    assert!(b.contains_point(Vec3::new(-0.5, 0.5, 2.5)));
    assert!(!b.contains_point(Vec3::new(0.5, 0.5, 2.5)));
}
