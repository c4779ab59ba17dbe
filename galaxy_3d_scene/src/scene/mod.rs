//! Scene module
//!
//! Provides the node hierarchy, the scene of root hierarchies with its
//! global time, world-state snapshots and culling strategies.

mod scene_node;
mod scene;
mod snapshot;
mod culler;

pub use scene_node::SceneNode;
pub use scene::{Scene, SceneNodeKey};
pub use snapshot::{NodeTransform, SceneSnapshot};
pub use culler::{CameraCuller, BruteForceCuller, FrustumCuller};
