use glam::{Quat, Vec3};
use crate::camera::{Camera, SharedCamera};
use crate::math::AABB;
use crate::scene::{Scene, SceneNode};
use super::*;

fn unit_box() -> AABB {
    AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5))
}

fn boxed(name: &str, position: Vec3) -> SceneNode {
    SceneNode::from_trs(name, position, Quat::IDENTITY, Vec3::ONE).with_bounding_box(unit_box())
}

/// Camera at the origin looking down -Z, far plane at 50
fn camera() -> Camera {
    Camera::perspective(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 50.0)
}

/// in_front (visible), behind (culled), too_far (culled), marker (no bounds)
fn test_snapshot() -> SceneSnapshot {
    let mut scene = Scene::new();
    scene.insert_root(boxed("in_front", Vec3::new(0.0, 0.0, -5.0)));
    scene.insert_root(boxed("behind", Vec3::new(0.0, 0.0, 5.0)));
    scene.insert_root(boxed("too_far", Vec3::new(0.0, 0.0, -80.0)));
    scene.insert_root(SceneNode::new("marker"));
    scene.tick(0.0)
}

fn visible_names(snapshot: &SceneSnapshot, view: &RenderView) -> Vec<String> {
    let mut names: Vec<String> = ["in_front", "behind", "too_far", "marker"]
        .iter()
        .filter(|name| view.is_visible(snapshot.index_of(name).unwrap()))
        .map(|name| name.to_string())
        .collect();
    names.sort();
    names
}

// ============================================================================
// BruteForceCuller
// ============================================================================

#[test]
fn test_brute_force_returns_everything() {
    let snapshot = test_snapshot();
    let mut culler = BruteForceCuller::new();
    let view = culler.cull(&snapshot, &camera());

    assert_eq!(view.visible_count(), snapshot.len());
    assert_eq!(view.visible_nodes(), &[0, 1, 2, 3]);
}

#[test]
fn test_brute_force_empty_snapshot() {
    let mut culler = BruteForceCuller::new();
    let view = culler.cull(&SceneSnapshot::default(), &camera());
    assert_eq!(view.visible_count(), 0);
}

// ============================================================================
// FrustumCuller
// ============================================================================

#[test]
fn test_frustum_culler_rejects_outside_nodes() {
    let snapshot = test_snapshot();
    let mut culler = FrustumCuller::new();
    let view = culler.cull(&snapshot, &camera());

    assert_eq!(visible_names(&snapshot, &view), vec!["in_front", "marker"]);
    assert_eq!(culler.last_rejected_count(), 2);
}

#[test]
fn test_frustum_culler_follows_camera() {
    let snapshot = test_snapshot();
    let mut turned = camera();
    turned.pan(std::f32::consts::PI);

    let mut culler = FrustumCuller::new();
    let view = culler.cull(&snapshot, &turned);

    assert_eq!(visible_names(&snapshot, &view), vec!["behind", "marker"]);
    assert_eq!(view.camera().rotation(), turned.rotation());
}

#[test]
fn test_frustum_culler_with_shared_camera() {
    let snapshot = test_snapshot();
    let shared = SharedCamera::new(camera());
    shared.set_far(200.0);

    let mut culler = FrustumCuller::new();
    let view = culler.cull_shared(&snapshot, &shared);

    assert_eq!(visible_names(&snapshot, &view), vec!["in_front", "marker", "too_far"]);
    assert_eq!(culler.last_rejected_count(), 1);
}

#[test]
fn test_frustum_culler_uses_world_bounds() {
    // Child box only reaches the view through its parent's transform
    let mut parent = SceneNode::from_trs("parent", Vec3::new(0.0, 0.0, -10.0), Quat::IDENTITY, Vec3::ONE);
    parent.add_child(boxed("child", Vec3::new(0.0, 0.0, 20.0)));

    let mut scene = Scene::new();
    let key = scene.insert_root(parent);
    let mut culler = FrustumCuller::new();

    let snapshot = scene.tick(0.0);
    let view = culler.cull(&snapshot, &camera());
    assert!(!view.is_visible(snapshot.index_of("child").unwrap()));

    scene.root_mut(key).unwrap().set_translation(Vec3::new(0.0, 0.0, -30.0));
    let snapshot = scene.tick(0.0);
    let view = culler.cull(&snapshot, &camera());
    assert!(view.is_visible(snapshot.index_of("child").unwrap()));
}
