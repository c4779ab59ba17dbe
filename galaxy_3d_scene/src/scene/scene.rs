/// Scene — the set of root node hierarchies plus the global animation time.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys. The scene is
/// owned by a single simulation thread; the render side only ever sees
/// `SceneSnapshot`s.

use slotmap::{new_key_type, SlotMap};
use glam::Mat4;
use crate::engine_trace;
use super::scene_node::SceneNode;
use super::snapshot::{NodeTransform, SceneSnapshot};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a root node within a Scene.
    ///
    /// Keys remain valid even after other roots are removed.
    pub struct SceneNodeKey;
}

#[derive(Debug, Default)]
pub struct Scene {
    roots: SlotMap<SceneNodeKey, SceneNode>,
    /// Last time passed to `set_time`
    time: f32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== ROOTS =====

    pub fn insert_root(&mut self, root: SceneNode) -> SceneNodeKey {
        let name = root.name().to_string();
        let descendants = root.descendant_count();
        let key = self.roots.insert(root);
        engine_trace!("galaxy3d::Scene",
            "Inserted root {:?} '{}' ({} descendants)", key, name, descendants);
        key
    }

    pub fn remove_root(&mut self, key: SceneNodeKey) -> Option<SceneNode> {
        let removed = self.roots.remove(key);
        if let Some(root) = &removed {
            engine_trace!("galaxy3d::Scene", "Removed root {:?} '{}'", key, root.name());
        }
        removed
    }

    pub fn root(&self, key: SceneNodeKey) -> Option<&SceneNode> {
        self.roots.get(key)
    }

    pub fn root_mut(&mut self, key: SceneNodeKey) -> Option<&mut SceneNode> {
        self.roots.get_mut(key)
    }

    pub fn root_keys(&self) -> impl Iterator<Item = SceneNodeKey> + '_ {
        self.roots.keys()
    }

    pub fn roots(&self) -> impl Iterator<Item = (SceneNodeKey, &SceneNode)> {
        self.roots.iter()
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Total number of nodes across all hierarchies
    pub fn node_count(&self) -> usize {
        self.roots.values().map(|r| 1 + r.descendant_count()).sum()
    }

    /// First node named `name`, searching every hierarchy
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.roots.values().find_map(|r| r.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.roots.values_mut().find_map(|r| r.find_mut(name))
    }

    pub fn clear(&mut self) {
        self.roots.clear();
    }

    // ===== TIME =====

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance every hierarchy to `time`.
    ///
    /// Every node is visited. Nodes flagged static keep their pose.
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
        for root in self.roots.values_mut() {
            root.advance_time(time);
        }
    }

    pub fn advance(&mut self, delta: f32) {
        self.set_time(self.time + delta);
    }

    // ===== TRANSFORMS =====

    /// Propagate world matrices from every root down
    pub fn update_world(&mut self) {
        for root in self.roots.values_mut() {
            root.update_world(&Mat4::IDENTITY);
        }
    }

    /// Flatten the current world state.
    ///
    /// Reads the matrices as of the last `update_world`.
    pub fn snapshot(&self) -> SceneSnapshot {
        let mut snapshot = SceneSnapshot::new(self.time);
        for (key, root) in &self.roots {
            let start = snapshot.len();
            root.visit(|node, depth| {
                let world_matrix = *node.world_matrix();
                snapshot.push(node.name(), NodeTransform {
                    root: key,
                    depth,
                    world_matrix,
                    world_bounds: node
                        .bounding_box()
                        .filter(|b| !b.is_empty())
                        .map(|b| b.transformed(&world_matrix)),
                });
            });
            snapshot.close_root(key, start);
        }
        snapshot
    }

    /// `set_time`, `update_world`, then `snapshot`
    pub fn tick(&mut self, time: f32) -> SceneSnapshot {
        self.set_time(time);
        self.update_world();
        self.snapshot()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
