//! Math value types shared by the camera, scene and shadow modules.
//!
//! Vectors and matrices come from glam; this module only adds the
//! bounding-volume type the culling and cascade code exchange.

mod aabb;

pub use aabb::AABB;
