/// Cascaded shadow map fitting.
///
/// The view frustum is cut into `cascade_count` depth slices. Split depths
/// blend a logarithmic and a uniform distribution:
///
/// ```text
/// d_i = λ · n · (f / n)^(i / N) + (1 - λ) · (n + (f - n) · i / N)
/// ```
///
/// Each slice's eight corners are projected through the light camera, and
/// the light-space bounds give a crop matrix that scales the slice to fill
/// the shadow map. The scale is the same on X and Y (largest extent), so a
/// cascade stays square while the view rotates.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::math::AABB;
use crate::error::Galaxy3dResult;
use crate::{engine_debug, engine_err};

/// Cascade splitter configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeSplitterDesc {
    /// Number of depth slices, at least 1
    pub cascade_count: usize,
    /// Weight of the logarithmic distribution, in `[0, 1]`
    pub split_lambda: f32,
}

impl Default for CascadeSplitterDesc {
    fn default() -> Self {
        Self {
            cascade_count: 4,
            split_lambda: 0.9,
        }
    }
}

/// One fitted cascade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cascade {
    /// View-space distance where the slice starts
    pub split_near: f32,
    /// View-space distance where the slice ends
    pub split_far: f32,
    /// `split_far` as a `[0, 1]` depth of the main camera's projection,
    /// compared against fragment depth to pick a cascade
    pub camera_space_depth: f32,
    /// Light view-projection with the fitting crop applied
    pub view_projection_matrix: Mat4,
}

/// GPU layout of a cascade (80 bytes, std140/std430 compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CascadeUniform {
    pub view_projection: [[f32; 4]; 4],
    pub camera_space_depth: f32,
    pub split_near: f32,
    pub split_far: f32,
    pub _padding: f32,
}

impl Cascade {
    pub fn to_uniform(&self) -> CascadeUniform {
        CascadeUniform {
            view_projection: self.view_projection_matrix.to_cols_array_2d(),
            camera_space_depth: self.camera_space_depth,
            split_near: self.split_near,
            split_far: self.split_far,
            _padding: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CascadeSplitter {
    desc: CascadeSplitterDesc,
}

impl CascadeSplitter {
    pub fn new(desc: CascadeSplitterDesc) -> Galaxy3dResult<Self> {
        if desc.cascade_count == 0 {
            return Err(engine_err!("galaxy3d::CascadeSplitter",
                "cascade_count must be at least 1"));
        }
        if !(0.0..=1.0).contains(&desc.split_lambda) {
            return Err(engine_err!("galaxy3d::CascadeSplitter",
                "split_lambda must be in [0, 1], got {}", desc.split_lambda));
        }
        Ok(Self { desc })
    }

    pub fn desc(&self) -> &CascadeSplitterDesc {
        &self.desc
    }

    pub fn cascade_count(&self) -> usize {
        self.desc.cascade_count
    }

    /// `cascade_count + 1` split distances, from `near` to `far` inclusive
    pub fn split_depths(&self, near: f32, far: f32) -> Vec<f32> {
        let count = self.desc.cascade_count;
        let lambda = self.desc.split_lambda;

        let mut depths = Vec::with_capacity(count + 1);
        depths.push(near);
        for i in 1..count {
            let p = i as f32 / count as f32;
            let log_split = near * (far / near).powf(p);
            let uniform_split = near + (far - near) * p;
            depths.push(lambda * log_split + (1.0 - lambda) * uniform_split);
        }
        depths.push(far);
        depths
    }

    /// Normalized `[0, 1]` projection depth of view distance `depth`
    pub fn camera_space_depth(near: f32, far: f32, depth: f32) -> f32 {
        (far - far * near / depth) / (far - near)
    }

    /// Fit one cascade per slice of `view_camera` to the light camera.
    ///
    /// Neither camera is modified. The light camera's own crop matrix is
    /// ignored.
    pub fn split(&self, view_camera: &Camera, light_camera: &Camera) -> Vec<Cascade> {
        let near = view_camera.near();
        let far = view_camera.far();
        let depths = self.split_depths(near, far);

        let mut light = light_camera.clone();
        light.clear_crop_matrix();

        let cascades: Vec<Cascade> = depths
            .windows(2)
            .map(|slice| {
                let (split_near, split_far) = (slice[0], slice[1]);

                let mut sub_camera = view_camera.clone();
                sub_camera.clear_crop_matrix();
                sub_camera.set_near(split_near);
                sub_camera.set_far(split_far);

                let corners = sub_camera.frustum_vertices();
                let bounds = light.aabb_from_vertices(&corners);
                let crop = Self::crop_matrix(&bounds);

                let mut cascade_light = light.clone();
                cascade_light.set_crop_matrix(crop);

                Cascade {
                    split_near,
                    split_far,
                    camera_space_depth: Self::camera_space_depth(near, far, split_far),
                    view_projection_matrix: cascade_light.view_projection_matrix(),
                }
            })
            .collect();

        engine_debug!("galaxy3d::CascadeSplitter",
            "Fitted {} cascades over [{}, {}]: splits {:?}",
            cascades.len(), near, far, depths);

        cascades
    }

    /// Uniform XY scale by the largest extent, then translate the box
    /// center to the origin. Depth is left untouched.
    fn crop_matrix(bounds: &AABB) -> Mat4 {
        let extent = bounds.size();
        let scale = 2.0 / extent.x.max(extent.y);
        let offset = -bounds.center() * scale;

        Mat4::from_translation(Vec3::new(offset.x, offset.y, 0.0))
            * Mat4::from_scale(Vec3::new(scale, scale, 1.0))
    }

    /// Index of the first cascade whose `camera_space_depth` reaches
    /// `depth`, or `None` past the last one
    pub fn select_cascade(cascades: &[Cascade], depth: f32) -> Option<usize> {
        cascades.iter().position(|c| depth <= c.camera_space_depth)
    }
}

#[cfg(test)]
#[path = "cascade_tests.rs"]
mod tests;
