//! Camera module — camera, frustum, shared camera and render view.
//!
//! `Camera` is a plain value owned by its caller. `SharedCamera` is the
//! handle used when an input thread and render threads touch the same
//! camera.

mod camera;
mod frustum;
mod shared_camera;
mod render_view;

pub use camera::{Camera, CameraDesc, CameraDirty, ProjectionKind};
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use shared_camera::SharedCamera;
pub use render_view::RenderView;
