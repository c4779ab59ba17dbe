/// SharedCamera — a camera shared between an input thread and render threads.
///
/// Matrix reads first take the shared lock and return the cached matrix when
/// it is clean. Only when a rebuild is needed is the lock released and the
/// exclusive lock taken; the dirty state is then checked again, since another
/// reader may have rebuilt the matrix in between.
///
/// A poisoned lock is recovered: every camera mutation leaves the state
/// consistent (values stored, flags raised), so a panic elsewhere never
/// leaves a half-written camera behind.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use glam::{Mat4, Vec3};
use crate::math::AABB;
use super::camera::{project_bounds, unproject_clip_cube, Camera, ProjectionKind};
use super::frustum::Frustum;

/// Cloneable handle to a camera behind a reader/writer lock.
#[derive(Debug, Clone)]
pub struct SharedCamera {
    inner: Arc<RwLock<Camera>>,
}

impl SharedCamera {
    pub fn new(camera: Camera) -> Self {
        Self { inner: Arc::new(RwLock::new(camera)) }
    }

    fn read(&self) -> RwLockReadGuard<'_, Camera> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Camera> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Double-checked matrix read
    fn read_matrix(
        &self,
        cached: impl Fn(&Camera) -> Option<Mat4>,
        rebuild: impl FnOnce(&mut Camera) -> Mat4,
    ) -> Mat4 {
        {
            let camera = self.read();
            if let Some(matrix) = cached(&camera) {
                return matrix;
            }
        }

        let mut camera = self.write();
        match cached(&camera) {
            Some(matrix) => matrix,
            None => rebuild(&mut camera),
        }
    }

    // ===== MATRICES =====

    pub fn view_matrix(&self) -> Mat4 {
        self.read_matrix(Camera::cached_view_matrix, Camera::view_matrix)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.read_matrix(Camera::cached_projection_matrix, Camera::projection_matrix)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.read_matrix(Camera::cached_view_projection_matrix, Camera::view_projection_matrix)
    }

    pub fn frustum_planes(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }

    /// Clip planes in the local space of an object with world matrix `model`
    pub fn frustum_planes_local_space(&self, model: &Mat4) -> Frustum {
        Frustum::from_view_projection(&(self.view_projection_matrix() * *model))
    }

    pub fn frustum_vertices(&self) -> [Vec3; 8] {
        unproject_clip_cube(&self.view_projection_matrix())
    }

    pub fn aabb_from_vertices(&self, points: &[Vec3]) -> AABB {
        project_bounds(&self.view_projection_matrix(), points)
    }

    // ===== PARAMETERS =====

    pub fn position(&self) -> Vec3 {
        self.read().position()
    }

    pub fn rotation(&self) -> Vec3 {
        self.read().rotation()
    }

    pub fn near(&self) -> f32 {
        self.read().near()
    }

    pub fn far(&self) -> f32 {
        self.read().far()
    }

    pub fn fov_or_height(&self) -> f32 {
        self.read().fov_or_height()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.read().aspect_ratio()
    }

    pub fn projection_kind(&self) -> ProjectionKind {
        self.read().projection_kind()
    }

    pub fn crop_matrix(&self) -> Mat4 {
        *self.read().crop_matrix()
    }

    /// Independent copy of the current camera state
    pub fn snapshot(&self) -> Camera {
        self.read().clone()
    }

    /// Run `f` with exclusive access, for grouped mutations that must be
    /// observed together
    pub fn update<R>(&self, f: impl FnOnce(&mut Camera) -> R) -> R {
        f(&mut self.write())
    }

    // ===== MUTATORS =====

    pub fn set_position(&self, position: Vec3) {
        self.write().set_position(position);
    }

    pub fn set_rotation(&self, rotation: Vec3) {
        self.write().set_rotation(rotation);
    }

    pub fn move_local(&self, delta: Vec3) {
        self.write().move_local(delta);
    }

    pub fn dolly(&self, distance: f32) {
        self.write().dolly(distance);
    }

    pub fn pan(&self, radians: f32) {
        self.write().pan(radians);
    }

    pub fn tilt(&self, radians: f32) {
        self.write().tilt(radians);
    }

    pub fn set_near(&self, near: f32) {
        self.write().set_near(near);
    }

    pub fn set_far(&self, far: f32) {
        self.write().set_far(far);
    }

    pub fn set_vfov(&self, vfov: f32) {
        self.write().set_vfov(vfov);
    }

    pub fn set_ortho_height(&self, half_height: f32) {
        self.write().set_ortho_height(half_height);
    }

    pub fn set_aspect_ratio(&self, aspect_ratio: f32) {
        self.write().set_aspect_ratio(aspect_ratio);
    }

    pub fn set_projection_kind(&self, projection: ProjectionKind) {
        self.write().set_projection_kind(projection);
    }

    pub fn set_crop_matrix(&self, crop: Mat4) {
        self.write().set_crop_matrix(crop);
    }

    pub fn clear_crop_matrix(&self) {
        self.write().clear_crop_matrix();
    }
}

impl From<Camera> for SharedCamera {
    fn from(camera: Camera) -> Self {
        Self::new(camera)
    }
}

#[cfg(test)]
#[path = "shared_camera_tests.rs"]
mod tests;
