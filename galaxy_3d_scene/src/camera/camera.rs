/// Camera — projection parameters plus pose, with lazily cached matrices.
///
/// Every mutator only stores the new value and marks the dependent cached
/// matrices dirty. Matrices are rebuilt on the next read:
///
/// | Mutated input              | Dirty after          |
/// |----------------------------|----------------------|
/// | position, rotation         | VIEW, VIEW_PROJECTION |
/// | near, far, fov, aspect, kind | PROJECTION, VIEW_PROJECTION |
/// | crop matrix                | VIEW_PROJECTION      |
///
/// Clip space has X and Y in `[-1, 1]`, depth in `[0, 1]`, and Y pointing
/// down (the flip is baked into the projection matrix).
///
/// `Camera` is not synchronized. Share it between threads through
/// [`SharedCamera`](super::SharedCamera).

use bitflags::bitflags;
use glam::{Mat4, Quat, Vec3, Vec4};
use crate::math::AABB;
use super::frustum::Frustum;

bitflags! {
    /// Cached matrices that must be rebuilt before the next read
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CameraDirty: u8 {
        const VIEW            = 1 << 0;
        const PROJECTION      = 1 << 1;
        const VIEW_PROJECTION = 1 << 2;
    }
}

/// Projection model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    /// `fov_or_height` is the vertical field of view in radians
    #[default]
    Perspective,
    /// `fov_or_height` is the half-height of the view volume
    Orthographic,
}

/// Negates clip-space Y
const Y_FLIP: Mat4 = Mat4::from_cols(Vec4::X, Vec4::NEG_Y, Vec4::Z, Vec4::W);

/// Camera creation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDesc {
    pub projection: ProjectionKind,
    pub position: Vec3,
    /// Euler angles in radians: x = pitch, y = yaw, z = roll
    pub rotation: Vec3,
    pub near: f32,
    pub far: f32,
    /// Vertical FOV (perspective) or half-height (orthographic)
    pub fov_or_height: f32,
    pub aspect_ratio: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Perspective,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            near: 0.1,
            far: 100.0,
            fov_or_height: std::f32::consts::FRAC_PI_4,
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

/// Camera with lazily derived view, projection and view-projection matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    rotation: Vec3,
    near: f32,
    far: f32,
    fov_or_height: f32,
    aspect_ratio: f32,
    crop_matrix: Mat4,
    projection: ProjectionKind,

    view_matrix: Mat4,
    projection_matrix: Mat4,
    view_projection_matrix: Mat4,
    dirty: CameraDirty,
}

impl Camera {
    pub fn new(desc: &CameraDesc) -> Self {
        Self {
            position: desc.position,
            rotation: desc.rotation,
            near: desc.near,
            far: desc.far,
            fov_or_height: desc.fov_or_height,
            aspect_ratio: desc.aspect_ratio,
            crop_matrix: Mat4::IDENTITY,
            projection: desc.projection,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
            dirty: CameraDirty::all(),
        }
    }

    /// Perspective camera at the origin looking down -Z
    pub fn perspective(vfov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::new(&CameraDesc {
            projection: ProjectionKind::Perspective,
            fov_or_height: vfov,
            aspect_ratio,
            near,
            far,
            ..CameraDesc::default()
        })
    }

    /// Orthographic camera at the origin looking down -Z
    pub fn orthographic(half_height: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::new(&CameraDesc {
            projection: ProjectionKind::Orthographic,
            fov_or_height: half_height,
            aspect_ratio,
            near,
            far,
            ..CameraDesc::default()
        })
    }

    // ===== PARAMETERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler angles in radians (x = pitch, y = yaw, z = roll)
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn fov_or_height(&self) -> f32 {
        self.fov_or_height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn projection_kind(&self) -> ProjectionKind {
        self.projection
    }

    pub fn crop_matrix(&self) -> &Mat4 {
        &self.crop_matrix
    }

    /// Matrices currently awaiting a rebuild
    pub fn dirty_flags(&self) -> CameraDirty {
        self.dirty
    }

    /// World-space orientation: `Rx(pitch) * Ry(yaw) * Rz(roll)`
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_x(self.rotation.x)
            * Quat::from_rotation_y(self.rotation.y)
            * Quat::from_rotation_z(self.rotation.z)
    }

    /// Viewing direction in world space
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    // ===== POSE MUTATORS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty |= CameraDirty::VIEW | CameraDirty::VIEW_PROJECTION;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.dirty |= CameraDirty::VIEW | CameraDirty::VIEW_PROJECTION;
    }

    /// Translate by `delta` expressed in camera axes (x right, y up, -z forward)
    pub fn move_local(&mut self, delta: Vec3) {
        let offset = self.orientation() * delta;
        self.set_position(self.position + offset);
    }

    /// Translate along the viewing direction
    pub fn dolly(&mut self, distance: f32) {
        let offset = self.forward() * distance;
        self.set_position(self.position + offset);
    }

    /// Rotate around the yaw axis
    pub fn pan(&mut self, radians: f32) {
        let mut rotation = self.rotation;
        rotation.y += radians;
        self.set_rotation(rotation);
    }

    /// Rotate around the pitch axis
    pub fn tilt(&mut self, radians: f32) {
        let mut rotation = self.rotation;
        rotation.x += radians;
        self.set_rotation(rotation);
    }

    // ===== PROJECTION MUTATORS =====

    pub fn set_near(&mut self, near: f32) {
        self.near = near;
        self.dirty |= CameraDirty::PROJECTION | CameraDirty::VIEW_PROJECTION;
    }

    pub fn set_far(&mut self, far: f32) {
        self.far = far;
        self.dirty |= CameraDirty::PROJECTION | CameraDirty::VIEW_PROJECTION;
    }

    /// Vertical field of view in radians (perspective cameras)
    pub fn set_vfov(&mut self, vfov: f32) {
        self.fov_or_height = vfov;
        self.dirty |= CameraDirty::PROJECTION | CameraDirty::VIEW_PROJECTION;
    }

    /// Half-height of the view volume (orthographic cameras)
    pub fn set_ortho_height(&mut self, half_height: f32) {
        self.fov_or_height = half_height;
        self.dirty |= CameraDirty::PROJECTION | CameraDirty::VIEW_PROJECTION;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.dirty |= CameraDirty::PROJECTION | CameraDirty::VIEW_PROJECTION;
    }

    pub fn set_projection_kind(&mut self, projection: ProjectionKind) {
        self.projection = projection;
        self.dirty |= CameraDirty::PROJECTION | CameraDirty::VIEW_PROJECTION;
    }

    /// Post-multiply an extra transform after the projection.
    ///
    /// The base projection parameters are untouched; only the combined
    /// view-projection matrix changes.
    pub fn set_crop_matrix(&mut self, crop: Mat4) {
        self.crop_matrix = crop;
        self.dirty |= CameraDirty::VIEW_PROJECTION;
    }

    pub fn clear_crop_matrix(&mut self) {
        self.set_crop_matrix(Mat4::IDENTITY);
    }

    // ===== DERIVED MATRICES =====

    /// World-to-camera transform
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.dirty.contains(CameraDirty::VIEW) {
            self.view_matrix = Mat4::from_rotation_z(-self.rotation.z)
                * Mat4::from_rotation_y(-self.rotation.y)
                * Mat4::from_rotation_x(-self.rotation.x)
                * Mat4::from_translation(-self.position);
            self.dirty.remove(CameraDirty::VIEW);
        }
        self.view_matrix
    }

    /// Camera-to-clip transform (without the crop matrix)
    pub fn projection_matrix(&mut self) -> Mat4 {
        if self.dirty.contains(CameraDirty::PROJECTION) {
            let base = match self.projection {
                ProjectionKind::Perspective => Mat4::perspective_rh(
                    self.fov_or_height,
                    self.aspect_ratio,
                    self.near,
                    self.far,
                ),
                ProjectionKind::Orthographic => {
                    let half_height = self.fov_or_height;
                    let half_width = half_height * self.aspect_ratio;
                    Mat4::orthographic_rh(
                        -half_width, half_width,
                        -half_height, half_height,
                        self.near, self.far,
                    )
                }
            };
            self.projection_matrix = Y_FLIP * base;
            self.dirty.remove(CameraDirty::PROJECTION);
        }
        self.projection_matrix
    }

    /// `crop * projection * view`
    pub fn view_projection_matrix(&mut self) -> Mat4 {
        if self.dirty.contains(CameraDirty::VIEW_PROJECTION) {
            let view = self.view_matrix();
            let projection = self.projection_matrix();
            self.view_projection_matrix = self.crop_matrix * projection * view;
            self.dirty.remove(CameraDirty::VIEW_PROJECTION);
        }
        self.view_projection_matrix
    }

    /// Rebuild every stale matrix now
    pub fn update_matrices(&mut self) {
        self.view_projection_matrix();
    }

    /// Cached view matrix, `None` while stale
    pub fn cached_view_matrix(&self) -> Option<Mat4> {
        (!self.dirty.contains(CameraDirty::VIEW)).then_some(self.view_matrix)
    }

    /// Cached projection matrix, `None` while stale
    pub fn cached_projection_matrix(&self) -> Option<Mat4> {
        (!self.dirty.contains(CameraDirty::PROJECTION)).then_some(self.projection_matrix)
    }

    /// Cached view-projection matrix, `None` while stale
    pub fn cached_view_projection_matrix(&self) -> Option<Mat4> {
        (!self.dirty.contains(CameraDirty::VIEW_PROJECTION)).then_some(self.view_projection_matrix)
    }

    // ===== FRUSTUM GEOMETRY =====

    /// World-space corners of the view volume.
    ///
    /// Clip-space cube `{-1,1} x {-1,1} x {0,1}` un-projected through the
    /// inverse view-projection. Near corners first, x varying fastest.
    pub fn frustum_vertices(&mut self) -> [Vec3; 8] {
        unproject_clip_cube(&self.view_projection_matrix())
    }

    /// World-space clip planes
    pub fn frustum_planes(&mut self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }

    /// Clip planes in the local space of an object with world matrix `model`
    pub fn frustum_planes_local_space(&mut self, model: &Mat4) -> Frustum {
        Frustum::from_view_projection(&(self.view_projection_matrix() * *model))
    }

    /// Clip-space bounds of a point set.
    ///
    /// Each point goes through the view-projection matrix and the
    /// perspective divide before the min/max accumulation.
    pub fn aabb_from_vertices(&mut self, points: &[Vec3]) -> AABB {
        project_bounds(&self.view_projection_matrix(), points)
    }
}

/// Corners of the clip volume `{-1,1} x {-1,1} x {0,1}` mapped back through
/// `view_projection`. Near corners first, x varying fastest.
pub(crate) fn unproject_clip_cube(view_projection: &Mat4) -> [Vec3; 8] {
    let inverse = view_projection.inverse();
    let mut vertices = [Vec3::ZERO; 8];
    let mut i = 0;
    for z in [0.0, 1.0] {
        for y in [-1.0, 1.0] {
            for x in [-1.0, 1.0] {
                vertices[i] = inverse.project_point3(Vec3::new(x, y, z));
                i += 1;
            }
        }
    }
    vertices
}

/// Bounds of `points` after projection and perspective divide
pub(crate) fn project_bounds(view_projection: &Mat4, points: &[Vec3]) -> AABB {
    AABB::from_points(points.iter().map(|p| view_projection.project_point3(*p)))
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraDesc::default())
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
