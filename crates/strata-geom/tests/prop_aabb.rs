use proptest::prelude::*;
use strata_geom::{Aabb, Vec3};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn small_f32() -> impl Strategy<Value = f32> {
    -1_000.0f32..1_000.0
}

fn small_vec3() -> impl Strategy<Value = Vec3> {
    (small_f32(), small_f32(), small_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn half_extent() -> impl Strategy<Value = Vec3> {
    (0.01f32..4.0, 0.01f32..4.0, 0.01f32..4.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Centre survives a round trip through from_center
    #[test]
    fn from_center_roundtrip(c in small_vec3(), h in half_extent()) {
        let b = Aabb::from_center(c, h);
        let c2 = b.center();
        let h2 = b.half_extents();
        prop_assert!(approx(c2.x, c.x, 1e-3) && approx(c2.y, c.y, 1e-3) && approx(c2.z, c.z, 1e-3));
        prop_assert!(approx(h2.x, h.x, 1e-3) && approx(h2.y, h.y, 1e-3) && approx(h2.z, h.z, 1e-3));
    }

    // Intersection is symmetric
    #[test]
    fn intersects_symmetric(a in small_vec3(), ha in half_extent(), b in small_vec3(), hb in half_extent()) {
        let ba = Aabb::from_center(a, ha);
        let bb = Aabb::from_center(b, hb);
        prop_assert_eq!(ba.intersects(&bb), bb.intersects(&ba));
    }

    // A box always intersects itself and a translated copy that moved less than its extent
    #[test]
    fn small_translation_still_intersects(c in small_vec3(), h in half_extent(), f in 0.0f32..0.9) {
        let b = Aabb::from_center(c, h);
        let moved = b.translated(Vec3::new(h.x * f, 0.0, 0.0));
        prop_assert!(b.intersects(&b));
        prop_assert!(b.intersects(&moved));
    }
}
