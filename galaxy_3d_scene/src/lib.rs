/*!
# Galaxy 3D Scene

Scene transform and temporal-sampling core of the Galaxy 3D engine.

Answers "where is everything, right now, and what can see what": it
produces plain data (matrices, plane equations, bounding boxes, sampled
transform components) and leaves GPU work to the renderer.

## Architecture

- **KeyframeIndex / Sampler**: time to interpolated value, with clamp,
  repeat and mirror time remapping
- **SceneNode / Scene**: transform hierarchy driven by samplers, flattened
  into snapshots for the render side
- **Camera / SharedCamera**: lazily cached view and projection matrices,
  frustum planes and corners, shared across threads behind a lock
- **CameraCuller**: visibility of a snapshot from a camera
- **CascadeSplitter**: cascaded shadow map split depths and crop fitting
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod animation;
pub mod camera;
pub mod scene;
pub mod shadow;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Galaxy3dError, Galaxy3dResult};

    // Engine singleton (logging)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    pub mod math {
        pub use crate::math::*;
    }

    pub mod animation {
        pub use crate::animation::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod shadow {
        pub use crate::shadow::*;
    }
}

// Re-export math library at crate root
pub use glam;
