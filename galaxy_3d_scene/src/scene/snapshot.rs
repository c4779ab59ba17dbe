/// SceneSnapshot — world transforms handed from the simulation thread to
/// the render side.
///
/// Plain owned data: the scene keeps mutating after the snapshot is taken,
/// and the snapshot can be sent to another thread by value.

use std::ops::Range;
use glam::Mat4;
use rustc_hash::FxHashMap;
use crate::math::AABB;
use super::scene::SceneNodeKey;

/// One node of the scene, flattened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Root the node belongs to
    pub root: SceneNodeKey,
    /// Depth below its root (0 for the root itself)
    pub depth: usize,
    pub world_matrix: Mat4,
    /// Local bounds transformed by `world_matrix`. `None` when the node
    /// has no bounds or only an empty box.
    pub world_bounds: Option<AABB>,
}

#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    time: f32,
    /// Depth-first, pre-order per root
    nodes: Vec<NodeTransform>,
    /// First node index for each non-empty name
    names: FxHashMap<String, usize>,
    roots: FxHashMap<SceneNodeKey, Range<usize>>,
}

impl SceneSnapshot {
    pub(crate) fn new(time: f32) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub(crate) fn push(&mut self, name: &str, node: NodeTransform) {
        let index = self.nodes.len();
        if !name.is_empty() {
            self.names.entry(name.to_string()).or_insert(index);
        }
        self.nodes.push(node);
    }

    pub(crate) fn close_root(&mut self, key: SceneNodeKey, start: usize) {
        self.roots.insert(key, start..self.nodes.len());
    }

    /// Scene time the transforms were sampled at
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn nodes(&self) -> &[NodeTransform] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NodeTransform> {
        self.nodes.get(index)
    }

    /// Index of the first node named `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub fn find(&self, name: &str) -> Option<&NodeTransform> {
        self.index_of(name).and_then(|i| self.nodes.get(i))
    }

    /// Nodes of one root hierarchy, empty if the key is unknown
    pub fn root_nodes(&self, key: SceneNodeKey) -> &[NodeTransform] {
        match self.roots.get(&key) {
            Some(range) => &self.nodes[range.clone()],
            None => &[],
        }
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }
}
