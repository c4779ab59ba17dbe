/// Axis-aligned bounding boxes.
///
/// Used in three places: node bounds (local space, transformed to world
/// space for culling), screen-space bounds of projected point sets, and
/// light-space bounds driving cascade crop matrices.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Inverted box: `min = +MAX`, `max = -MAX`.
    ///
    /// Growing it by any point yields that point, so it is the identity
    /// for min/max accumulation.
    pub const EMPTY: AABB = AABB {
        min: Vec3::splat(f32::MAX),
        max: Vec3::splat(f32::MIN),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Component-wise min/max of a point set. `EMPTY` for no points.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().fold(Self::EMPTY, |aabb, p| aabb.grown(p))
    }

    /// True if no point was ever accumulated (or min > max on any axis)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// This box extended to include `point`
    pub fn grown(&self, point: Vec3) -> AABB {
        AABB {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full edge lengths along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Transform this box by an affine matrix, returning the enclosing box.
    ///
    /// Arvo's method: projects each matrix axis onto the extents instead of
    /// transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
