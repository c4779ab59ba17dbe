/// SceneNode — a node of the transform hierarchy.
///
/// Each node owns its children (a tree, never a DAG) and a local TRS
/// transform. Up to three samplers can drive the translation, rotation and
/// scale channels from the global animation time.
///
/// Updates run top-down from the root:
/// - `advance_time(t)` writes sampled channel values and visits every
///   descendant, animated or not. Static nodes keep their pose.
/// - `update_world(parent)` rebuilds the local matrix if dirty, then always
///   rebuilds the world matrix and recurses

use glam::{Mat4, Quat, Vec3};
use crate::animation::Sampler;
use crate::math::AABB;

#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
    children: Vec<SceneNode>,
    local_matrix: Mat4,
    world_matrix: Mat4,
    /// Local matrix must be rebuilt
    dirty: bool,
    is_static: bool,
    translation_anim: Option<Sampler<Vec3>>,
    rotation_anim: Option<Sampler<Quat>>,
    scale_anim: Option<Sampler<Vec3>>,
    /// Local-space bounds, transformed into world space by snapshots
    bounding_box: Option<AABB>,
}

impl SceneNode {
    /// Identity transform, no children, no samplers
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_trs(name, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }

    pub fn from_trs(name: impl Into<String>, translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            name: name.into(),
            translation,
            rotation,
            scale,
            children: Vec::new(),
            local_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            dirty: true,
            is_static: false,
            translation_anim: None,
            rotation_anim: None,
            scale_anim: None,
            bounding_box: None,
        }
    }

    /// Builder-style bounds assignment
    pub fn with_bounding_box(mut self, bounding_box: AABB) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Local matrix as of the last `update_world`
    pub fn local_matrix(&self) -> &Mat4 {
        &self.local_matrix
    }

    /// World matrix as of the last `update_world`
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn bounding_box(&self) -> Option<&AABB> {
        self.bounding_box.as_ref()
    }

    pub fn set_bounding_box(&mut self, bounding_box: Option<AABB>) {
        self.bounding_box = bounding_box;
    }

    // ===== LOCAL TRANSFORM =====

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.dirty = true;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.dirty = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    // ===== SAMPLERS =====

    pub fn translation_sampler(&self) -> Option<&Sampler<Vec3>> {
        self.translation_anim.as_ref()
    }

    pub fn rotation_sampler(&self) -> Option<&Sampler<Quat>> {
        self.rotation_anim.as_ref()
    }

    pub fn scale_sampler(&self) -> Option<&Sampler<Vec3>> {
        self.scale_anim.as_ref()
    }

    /// Assigning a sampler makes this node non-static. Children keep their
    /// own flag.
    pub fn set_translation_sampler(&mut self, sampler: Option<Sampler<Vec3>>) {
        if sampler.is_some() {
            self.is_static = false;
        }
        self.translation_anim = sampler;
    }

    pub fn set_rotation_sampler(&mut self, sampler: Option<Sampler<Quat>>) {
        if sampler.is_some() {
            self.is_static = false;
        }
        self.rotation_anim = sampler;
    }

    pub fn set_scale_sampler(&mut self, sampler: Option<Sampler<Vec3>>) {
        if sampler.is_some() {
            self.is_static = false;
        }
        self.scale_anim = sampler;
    }

    /// True if any of the three channels is driven by a sampler
    pub fn has_samplers(&self) -> bool {
        self.translation_anim.is_some() || self.rotation_anim.is_some() || self.scale_anim.is_some()
    }

    /// Request the static flag for this subtree.
    ///
    /// On this node, `true` is ignored when samplers are assigned and
    /// `false` always applies. Descendants are assigned the *requested*
    /// value as-is, samplers or not. A static node skips sampling in
    /// `advance_time`, so a static request on a parent also freezes its
    /// animated children until they get a new sampler or `set_static(false)`.
    pub fn set_static(&mut self, requested: bool) {
        if !requested || !self.has_samplers() {
            self.is_static = requested;
        }
        for child in &mut self.children {
            child.assign_static(requested);
        }
    }

    fn assign_static(&mut self, value: bool) {
        self.is_static = value;
        for child in &mut self.children {
            child.assign_static(value);
        }
    }

    // ===== UPDATES =====

    /// Sample every assigned channel at `time`, then advance all children.
    ///
    /// Static nodes are not sampled, but their children are still visited.
    pub fn advance_time(&mut self, time: f32) {
        if !self.is_static {
            self.sample_channels(time);
        }

        for child in &mut self.children {
            child.advance_time(time);
        }
    }

    fn sample_channels(&mut self, time: f32) {
        if let Some(sampler) = &self.translation_anim {
            self.translation = sampler.value_at(time);
            self.dirty = true;
        }
        if let Some(sampler) = &self.rotation_anim {
            self.rotation = sampler.value_at(time);
            self.dirty = true;
        }
        if let Some(sampler) = &self.scale_anim {
            self.scale = sampler.value_at(time);
            self.dirty = true;
        }
    }

    /// Recompute `world = parent_world * local` for this subtree.
    ///
    /// The local matrix is only rebuilt for dirty nodes.
    pub fn update_world(&mut self, parent_world: &Mat4) {
        if self.dirty {
            self.local_matrix =
                Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation);
            self.dirty = false;
        }

        // The parent may have moved even if this node did not
        self.world_matrix = *parent_world * self.local_matrix;

        let world = self.world_matrix;
        for child in &mut self.children {
            child.update_world(&world);
        }
    }

    // ===== HIERARCHY =====

    /// Append a child, returning its index
    pub fn add_child(&mut self, child: SceneNode) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Detach and return the child at `index`
    pub fn remove_child(&mut self, index: usize) -> Option<SceneNode> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn child(&self, index: usize) -> Option<&SceneNode> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut SceneNode> {
        self.children.get_mut(index)
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        self.children.iter().map(|c| 1 + c.descendant_count()).sum()
    }

    /// Depth-first, pre-order walk. The callback receives each node and its
    /// depth (0 for `self`).
    pub fn visit(&self, mut f: impl FnMut(&SceneNode, usize)) {
        self.visit_at(0, &mut f);
    }

    fn visit_at(&self, depth: usize, f: &mut dyn FnMut(&SceneNode, usize)) {
        f(self, depth);
        for child in &self.children {
            child.visit_at(depth + 1, f);
        }
    }

    /// First node named `name` in depth-first order, including `self`
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }
}

#[cfg(test)]
#[path = "scene_node_tests.rs"]
mod tests;
