/// Frustum — six clipping planes for visibility culling.
///
/// Each plane is a Vec4 (A, B, C, D):
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside if `A*x + B*y + C*z + D >= 0` for all planes
///
/// Planes are extracted from a combined matrix whose clip volume is
/// `-w <= x <= w`, `-w <= y <= w`, `0 <= z <= w` (the camera's convention).

use glam::{Mat4, Vec3, Vec4};
use crate::math::AABB;

/// Result of a 3-way frustum/AABB classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB partially overlaps the frustum
    Partial,
}

/// Plane indices, named after the clip-space half-space they bound.
/// Clip Y is flipped by the camera, so PLANE_BOTTOM (-Y) is the top
/// of the image.
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes: -X, +X, -Y, +Y, near, far.
///
/// Works with perspective and orthographic projections, with or without
/// a crop matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract the planes from a (crop *) projection * view (* model) matrix.
    ///
    /// Gribb & Hartmann row combinations, adapted to a `[0, 1]` depth range:
    /// the near plane is row 2 alone rather than row 3 + row 2. Each plane is
    /// normalized so that (A, B, C) is a unit vector.
    pub fn from_view_projection(m: &Mat4) -> Self {
        let (r0, r1, r2, r3) = (m.row(0), m.row(1), m.row(2), m.row(3));

        let mut planes = [
            r3 + r0, // -X
            r3 - r0, // +X
            r3 + r1, // -Y
            r3 - r1, // +Y
            r2,      // near (z >= 0)
            r3 - r2, // far  (z <= w)
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from `point` to plane `index` (positive inside)
    pub fn signed_distance(&self, index: usize, point: Vec3) -> f32 {
        let plane = self.planes[index];
        plane.truncate().dot(point) + plane.w
    }

    /// True if `point` is on the inner side of all six planes
    pub fn contains_point(&self, point: Vec3) -> bool {
        (0..6).all(|i| self.signed_distance(i, point) >= 0.0)
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// "Positive vertex" test: for each plane, take the AABB corner furthest
    /// along the plane normal. If that corner is outside any plane, the
    /// whole box is outside.
    ///
    /// Conservative: may return false positives, never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            normal.dot(Self::positive_vertex(normal, aabb)) + plane.w >= 0.0
        })
    }

    /// Classify an AABB against the frustum (3-way test).
    ///
    /// - p-vertex outside any plane: `Outside`
    /// - n-vertex outside some plane: `Partial`
    /// - otherwise `Inside`
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            let normal = plane.truncate();

            if normal.dot(Self::positive_vertex(normal, aabb)) + plane.w < 0.0 {
                return FrustumTest::Outside;
            }

            if normal.dot(Self::negative_vertex(normal, aabb)) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    /// Corner most in the direction of `normal`
    fn positive_vertex(normal: Vec3, aabb: &AABB) -> Vec3 {
        Vec3::select(normal.cmpge(Vec3::ZERO), aabb.max, aabb.min)
    }

    /// Corner least in the direction of `normal`
    fn negative_vertex(normal: Vec3, aabb: &AABB) -> Vec3 {
        Vec3::select(normal.cmpge(Vec3::ZERO), aabb.min, aabb.max)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
