use glam::{Mat4, Quat, Vec3};
use super::*;

fn unit_box() -> AABB {
    AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0))
}

fn corners(aabb: &AABB) -> Vec<Vec3> {
    (0..8)
        .map(|i| Vec3::new(
            if i & 1 == 0 { aabb.min.x } else { aabb.max.x },
            if i & 2 == 0 { aabb.min.y } else { aabb.max.y },
            if i & 4 == 0 { aabb.min.z } else { aabb.max.z },
        ))
        .collect()
}

// ============================================================================
// Accumulation
// ============================================================================

#[test]
fn test_empty_is_empty() {
    assert!(AABB::EMPTY.is_empty());
    assert!(!unit_box().is_empty());
}

#[test]
fn test_from_points() {
    let aabb = AABB::from_points([
        Vec3::new(1.0, -2.0, 3.0),
        Vec3::new(-4.0, 5.0, 0.5),
        Vec3::new(0.0, 0.0, -6.0),
    ]);
    assert_eq!(aabb.min, Vec3::new(-4.0, -2.0, -6.0));
    assert_eq!(aabb.max, Vec3::new(1.0, 5.0, 3.0));
}

#[test]
fn test_from_no_points_is_empty() {
    let aabb = AABB::from_points(std::iter::empty());
    assert!(aabb.is_empty());
}

#[test]
fn test_from_single_point_is_degenerate() {
    let p = Vec3::new(2.0, 3.0, 4.0);
    let aabb = AABB::from_points([p]);
    assert_eq!(aabb.min, p);
    assert_eq!(aabb.max, p);
    assert!(!aabb.is_empty());
}

#[test]
fn test_center_size() {
    let aabb = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(aabb.size(), Vec3::new(2.0, 4.0, 6.0));
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_transformed_translation() {
    let moved = unit_box().transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, -5.0)));
    assert_eq!(moved.min, Vec3::new(9.0, -1.0, -6.0));
    assert_eq!(moved.max, Vec3::new(11.0, 1.0, -4.0));
}

#[test]
fn test_transformed_matches_corner_transform() {
    let aabb = AABB::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 1.0, 5.0));
    let m = Mat4::from_scale_rotation_translation(
        Vec3::new(2.0, 1.0, 0.5),
        Quat::from_rotation_y(0.7),
        Vec3::new(1.0, 2.0, 3.0),
    );

    let arvo = aabb.transformed(&m);
    let brute = AABB::from_points(corners(&aabb).iter().map(|c| m.transform_point3(*c)));

    assert!((arvo.min - brute.min).abs().max_element() < 1e-4);
    assert!((arvo.max - brute.max).abs().max_element() < 1e-4);
}
