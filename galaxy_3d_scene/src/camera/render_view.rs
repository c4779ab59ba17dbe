/// RenderView — result of culling a scene snapshot against a camera.
///
/// Created by a `CameraCuller`. Holds a copy of the camera taken at culling
/// time (matrices already rebuilt) and the indices of the visible entries
/// in the `SceneSnapshot` that was culled.
///
/// Ephemeral: lives for one frame. No Arc, no lock.

use glam::Mat4;
use super::camera::Camera;

#[derive(Debug, Clone)]
pub struct RenderView {
    camera: Camera,
    view_projection: Mat4,
    visible_nodes: Vec<usize>,
}

impl RenderView {
    /// Crate-internal: only cullers create these
    pub(crate) fn new(mut camera: Camera, visible_nodes: Vec<usize>) -> Self {
        let view_projection = camera.view_projection_matrix();
        Self {
            camera,
            view_projection,
            visible_nodes,
        }
    }

    /// Camera state at the time of culling
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// View-projection matrix the snapshot was culled with
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection
    }

    /// Indices into `SceneSnapshot::nodes()`, in snapshot order
    pub fn visible_nodes(&self) -> &[usize] {
        &self.visible_nodes
    }

    pub fn visible_count(&self) -> usize {
        self.visible_nodes.len()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible_nodes.binary_search(&index).is_ok()
    }
}

#[cfg(test)]
#[path = "render_view_tests.rs"]
mod tests;
