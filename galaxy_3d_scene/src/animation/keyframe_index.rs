/// KeyframeIndex — immutable balanced search tree over sorted keys.
///
/// Answers "which two keyframes bracket this time" in O(log n). Nodes live
/// in a flat arena addressed by index; the tree is built once and never
/// mutated afterwards.

use crate::error::Galaxy3dResult;
use crate::engine_err;

/// A (key, value) pair stored in the index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeEntry<K, V> {
    pub key: K,
    pub value: V,
}

#[derive(Debug, Clone)]
struct KeyframeNode<K, V> {
    entry: KeyframeEntry<K, V>,
    /// Subtree with smaller keys
    below: Option<usize>,
    /// Subtree with greater or equal keys
    above: Option<usize>,
}

/// Balanced binary search structure returning bracketing entries.
///
/// Built from entries sorted by key (duplicates allowed). The median of each
/// range becomes the node, the left half its `below` subtree and the right
/// half its `above` subtree.
#[derive(Debug, Clone)]
pub struct KeyframeIndex<K, V> {
    nodes: Vec<KeyframeNode<K, V>>,
    root: usize,
}

impl<K, V> KeyframeIndex<K, V>
where
    K: PartialOrd + Copy + std::fmt::Debug,
    V: Copy,
{
    /// Build the index from entries sorted by ascending key.
    ///
    /// # Errors
    ///
    /// `Galaxy3dError::InvalidKeyframes` if `entries` is empty or not sorted.
    pub fn new(entries: &[(K, V)]) -> Galaxy3dResult<Self> {
        if entries.is_empty() {
            return Err(engine_err!("galaxy3d::KeyframeIndex",
                InvalidKeyframes => "Cannot build an index from zero entries"));
        }
        if let Some(pos) = entries.windows(2).position(|w| !(w[0].0 <= w[1].0)) {
            return Err(engine_err!("galaxy3d::KeyframeIndex",
                InvalidKeyframes => "Entries not sorted: {:?} followed by {:?} at position {}",
                entries[pos].0, entries[pos + 1].0, pos + 1));
        }

        let mut nodes = Vec::with_capacity(entries.len());
        let root = Self::build(&mut nodes, entries)
            .ok_or_else(|| engine_err!("galaxy3d::KeyframeIndex",
                InvalidKeyframes => "Empty tree after build"))?;

        Ok(Self { nodes, root })
    }

    /// Recursive balanced partition. Returns the arena index of the subtree root.
    fn build(nodes: &mut Vec<KeyframeNode<K, V>>, entries: &[(K, V)]) -> Option<usize> {
        let (below, mid, above) = match entries.len() {
            0 => return None,
            1 => (None, 0, None),
            // Two entries: the lower is the node, the upper hangs above it
            2 => (None, 0, Self::build(nodes, &entries[1..])),
            3 => (
                Self::build(nodes, &entries[..1]),
                1,
                Self::build(nodes, &entries[2..]),
            ),
            len => {
                let mid = len / 2;
                (
                    Self::build(nodes, &entries[..mid]),
                    mid,
                    Self::build(nodes, &entries[mid + 1..]),
                )
            }
        };

        let (key, value) = entries[mid];
        nodes.push(KeyframeNode {
            entry: KeyframeEntry { key, value },
            below,
            above,
        });
        Some(nodes.len() - 1)
    }

    /// Find the entries bracketing `key`.
    ///
    /// Returns `(low, high)` with `low.key <= key <= high.key` when `key` is
    /// inside the indexed range. Outside the range (or exactly on the first
    /// key) both halves are the same edge entry.
    ///
    /// The descent is not a plain BST lookup: every node with
    /// `node.key < key` becomes the low candidate and the walk continues
    /// above it; every other node becomes the high candidate and the walk
    /// continues below it. Equal keys therefore land on the high side.
    pub fn query(&self, key: K) -> (KeyframeEntry<K, V>, KeyframeEntry<K, V>) {
        let mut low = None;
        let mut high = None;
        let mut cursor = Some(self.root);

        while let Some(index) = cursor {
            let node = &self.nodes[index];
            if node.entry.key < key {
                low = Some(node.entry);
                cursor = node.above;
            } else {
                high = Some(node.entry);
                cursor = node.below;
            }
        }

        match (low, high) {
            (Some(low), Some(high)) => (low, high),
            (Some(edge), None) | (None, Some(edge)) => (edge, edge),
            (None, None) => unreachable!("descent always visits the root"),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: construction rejects empty input
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Entry with the smallest key
    pub fn first(&self) -> KeyframeEntry<K, V> {
        let mut node = &self.nodes[self.root];
        while let Some(below) = node.below {
            node = &self.nodes[below];
        }
        node.entry
    }

    /// Entry with the greatest key
    pub fn last(&self) -> KeyframeEntry<K, V> {
        let mut node = &self.nodes[self.root];
        while let Some(above) = node.above {
            node = &self.nodes[above];
        }
        node.entry
    }

    /// Longest root-to-leaf path, counted in nodes
    pub fn depth(&self) -> usize {
        fn walk<K, V>(nodes: &[KeyframeNode<K, V>], index: Option<usize>) -> usize {
            match index {
                None => 0,
                Some(i) => 1 + walk(nodes, nodes[i].below).max(walk(nodes, nodes[i].above)),
            }
        }
        walk(&self.nodes, Some(self.root))
    }

    /// All entries in ascending key order
    pub fn entries(&self) -> Vec<KeyframeEntry<K, V>> {
        fn walk<K: Copy, V: Copy>(
            nodes: &[KeyframeNode<K, V>],
            index: Option<usize>,
            out: &mut Vec<KeyframeEntry<K, V>>,
        ) {
            if let Some(i) = index {
                walk(nodes, nodes[i].below, out);
                out.push(nodes[i].entry);
                walk(nodes, nodes[i].above, out);
            }
        }
        let mut out = Vec::with_capacity(self.nodes.len());
        walk(&self.nodes, Some(self.root), &mut out);
        out
    }
}

/// Append-only collector for [`KeyframeIndex`] entries.
///
/// ```ignore
/// let mut builder = KeyframeIndexBuilder::new();
/// builder.push(0.0, 0).push(0.5, 1).push(1.0, 2);
/// let index = builder.build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyframeIndexBuilder<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> KeyframeIndexBuilder<K, V>
where
    K: PartialOrd + Copy + std::fmt::Debug,
    V: Copy,
{
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append an entry. Keys must be pushed in ascending order.
    pub fn push(&mut self, key: K, value: V) -> &mut Self {
        self.entries.push((key, value));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the collected entries into a balanced index
    pub fn build(&self) -> Galaxy3dResult<KeyframeIndex<K, V>> {
        KeyframeIndex::new(&self.entries)
    }
}

#[cfg(test)]
#[path = "keyframe_index_tests.rs"]
mod tests;
