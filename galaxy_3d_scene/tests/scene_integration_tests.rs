//! Integration tests for the scene pipeline
//!
//! Keyframes -> samplers -> node hierarchy -> snapshot -> culling, and the
//! thread layout the engine runs it with: an input thread mutating the
//! camera, a simulation thread producing snapshots, a render thread culling
//! them.
//!
//! Run with: cargo test --test scene_integration_tests

use std::sync::mpsc;
use std::thread;
use galaxy_3d_scene::galaxy3d::animation::{Interpolation, RepeatMode, Sampler};
use galaxy_3d_scene::galaxy3d::camera::{Camera, SharedCamera};
use galaxy_3d_scene::galaxy3d::math::AABB;
use galaxy_3d_scene::galaxy3d::scene::{
    CameraCuller, FrustumCuller, Scene, SceneNode, SceneSnapshot,
};
use galaxy_3d_scene::glam::{Quat, Vec3};

// ============================================================================
// HELPERS
// ============================================================================

fn unit_box() -> AABB {
    AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5))
}

/// A cart sliding along -Z from z = -5 to z = -45 and back over 4 seconds,
/// carrying a spinning turret
fn cart() -> SceneNode {
    let mut cart = SceneNode::new("cart").with_bounding_box(unit_box());
    cart.set_translation_sampler(Some(
        Sampler::new(
            vec![0.0, 2.0],
            vec![Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -45.0)],
            Interpolation::Linear,
            RepeatMode::Mirror,
        ).unwrap(),
    ));

    let mut turret = SceneNode::from_trs("turret", Vec3::Y, Quat::IDENTITY, Vec3::ONE)
        .with_bounding_box(unit_box());
    turret.set_rotation_sampler(Some(
        Sampler::new(
            vec![0.0, 0.5, 1.0],
            vec![
                Quat::IDENTITY,
                Quat::from_rotation_y(std::f32::consts::PI * 0.5),
                Quat::from_rotation_y(std::f32::consts::PI),
            ],
            Interpolation::Linear,
            RepeatMode::Repeat,
        ).unwrap(),
    ));
    cart.add_child(turret);
    cart
}

fn camera() -> Camera {
    // Looks down -Z, sees up to 20 units
    Camera::perspective(1.2, 1.0, 0.1, 20.0)
}

fn is_visible(snapshot: &SceneSnapshot, culler: &mut FrustumCuller, camera: &Camera, name: &str) -> bool {
    let view = culler.cull(snapshot, camera);
    view.is_visible(snapshot.index_of(name).unwrap())
}

// ============================================================================
// END-TO-END
// ============================================================================

#[test]
fn test_integration_triangle_keyframes() {
    let sampler = Sampler::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0f32, 10.0, 0.0],
        Interpolation::Linear,
        RepeatMode::Clamp,
    ).unwrap();

    assert!((sampler.value_at(0.5) - 5.0).abs() < 1e-6);
    assert!((sampler.value_at(1.5) - 5.0).abs() < 1e-6);
    assert_eq!(sampler.value_at(-1.0), 0.0);
    assert_eq!(sampler.value_at(3.0), 0.0);
}

#[test]
fn test_integration_animated_cart_enters_and_leaves_view() {
    let mut scene = Scene::new();
    scene.insert_root(cart());
    let mut culler = FrustumCuller::new();
    let camera = camera();

    // t = 0: close to the camera
    let snapshot = scene.tick(0.0);
    assert!(is_visible(&snapshot, &mut culler, &camera, "cart"));

    // t = 2: at the far end, beyond the far plane
    let snapshot = scene.tick(2.0);
    let cart = snapshot.find("cart").unwrap();
    assert!(cart.world_matrix.w_axis.truncate().abs_diff_eq(Vec3::new(0.0, 0.0, -45.0), 1e-4));
    assert!(!is_visible(&snapshot, &mut culler, &camera, "cart"));
    assert!(!is_visible(&snapshot, &mut culler, &camera, "turret"));

    // t = 3.5: mirrored back towards the camera
    let snapshot = scene.tick(3.5);
    let z = snapshot.find("cart").unwrap().world_matrix.w_axis.z;
    assert!((z - (-15.0)).abs() < 1e-4, "z = {}", z);
    assert!(is_visible(&snapshot, &mut culler, &camera, "cart"));
}

#[test]
fn test_integration_child_follows_animated_parent() {
    let mut scene = Scene::new();
    scene.insert_root(cart());

    let snapshot = scene.tick(1.25);
    let cart = snapshot.find("cart").unwrap();
    let turret = snapshot.find("turret").unwrap();

    // Turret sits one unit above the cart, wherever the cart is
    let offset = turret.world_matrix.w_axis.truncate() - cart.world_matrix.w_axis.truncate();
    assert!(offset.abs_diff_eq(Vec3::Y, 1e-5));

    // t = 1.25 wraps to 0.25 on the turret: an eighth of a turn
    let expected = Quat::from_rotation_y(std::f32::consts::PI * 0.25);
    let (_, rotation, _) = turret.world_matrix.to_scale_rotation_translation();
    assert!(rotation.dot(expected).abs() > 0.9999);
}

// ============================================================================
// THREADS
// ============================================================================

#[test]
fn test_integration_simulation_and_render_threads() {
    const FRAMES: usize = 60;

    let shared_camera = SharedCamera::new(camera());
    let (sender, receiver) = mpsc::channel::<SceneSnapshot>();

    // Input: nudges the camera while frames are produced
    let input = {
        let camera = shared_camera.clone();
        thread::spawn(move || {
            for _ in 0..FRAMES {
                camera.pan(0.001);
                camera.set_far(20.0);
                thread::yield_now();
            }
        })
    };

    // Simulation: owns the scene, hands snapshots over by value
    let simulation = thread::spawn(move || {
        let mut scene = Scene::new();
        scene.insert_root(cart());
        for frame in 0..FRAMES {
            let snapshot = scene.tick(frame as f32 / 30.0);
            if sender.send(snapshot).is_err() {
                break;
            }
        }
    });

    // Render: culls every snapshot against the shared camera
    let render = {
        let camera = shared_camera.clone();
        thread::spawn(move || {
            let mut culler = FrustumCuller::new();
            let mut frames = 0;
            let mut last_time = -1.0;
            for snapshot in receiver {
                assert!(snapshot.time() > last_time);
                last_time = snapshot.time();

                let view = culler.cull_shared(&snapshot, &camera);
                assert!(view.visible_count() <= snapshot.len());
                assert!(view.view_projection_matrix().is_finite());
                frames += 1;
            }
            frames
        })
    };

    input.join().unwrap();
    simulation.join().unwrap();
    assert_eq!(render.join().unwrap(), FRAMES);

    let expected_yaw = 0.001 * FRAMES as f32;
    assert!((shared_camera.rotation().y - expected_yaw).abs() < 1e-5);
}
