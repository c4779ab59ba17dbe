/// Camera culling strategies.
///
/// A CameraCuller determines which nodes of a scene snapshot are visible
/// from a given camera. Implementations range from brute-force (return all)
/// to per-node frustum tests.

use crate::camera::{Camera, RenderView, SharedCamera};
use super::snapshot::SceneSnapshot;

/// Strategy for determining visible nodes from a camera.
///
/// Called once per frame on the render side. The returned RenderView is
/// ephemeral.
///
/// `&mut self` allows stateful implementations (e.g. statistics or
/// temporal caching) to keep state across frames.
pub trait CameraCuller: Send + Sync {
    /// Cull the snapshot against the camera and return the visible nodes
    fn cull(&mut self, snapshot: &SceneSnapshot, camera: &Camera) -> RenderView;

    /// Cull against the current state of a shared camera
    fn cull_shared(&mut self, snapshot: &SceneSnapshot, camera: &SharedCamera) -> RenderView {
        self.cull(snapshot, &camera.snapshot())
    }
}

/// Brute-force culler — returns ALL nodes (no actual culling).
///
/// Suitable for small scenes or as a baseline for comparison.
#[derive(Debug, Default)]
pub struct BruteForceCuller;

impl BruteForceCuller {
    pub fn new() -> Self {
        Self
    }
}

impl CameraCuller for BruteForceCuller {
    fn cull(&mut self, snapshot: &SceneSnapshot, camera: &Camera) -> RenderView {
        RenderView::new(camera.clone(), (0..snapshot.len()).collect())
    }
}

/// Frustum culler — tests world-space node bounds against the camera
/// frustum.
///
/// Nodes without bounds cannot be rejected and are always visible.
#[derive(Debug, Default)]
pub struct FrustumCuller {
    rejected: usize,
}

impl FrustumCuller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes rejected by the last `cull`
    pub fn last_rejected_count(&self) -> usize {
        self.rejected
    }
}

impl CameraCuller for FrustumCuller {
    fn cull(&mut self, snapshot: &SceneSnapshot, camera: &Camera) -> RenderView {
        let mut camera = camera.clone();
        let frustum = camera.frustum_planes();

        let visible: Vec<usize> = snapshot.nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| match &node.world_bounds {
                Some(bounds) => frustum.intersects_aabb(bounds),
                None => true,
            })
            .map(|(index, _)| index)
            .collect();

        self.rejected = snapshot.len() - visible.len();
        RenderView::new(camera, visible)
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
