//! Arena node storage for the layout tree.
//!
//! Nodes live in a contiguous `Vec` and refer to each other by
//! [`NodeIndex`] rather than by reference: a split appends to the
//! arena, and the backing storage may reallocate while the tree is
//! being walked. Index 0 is always the root.

use std::fmt;

use crate::geometry::{Extent3, Origin3};

/// Index of a node within the layout arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeIndex(pub(crate) u32);

impl NodeIndex {
    /// The root node. Created at construction and never retired.
    pub(crate) const ROOT: Self = Self(0);

    /// Position in the arena vec.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single node of the layout tree.
///
/// A node is a leaf iff `children` is `None`; the two children of an
/// internal node partition its box exactly along one axis. `used` is
/// meaningful only on leaves.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LayoutNode {
    /// Origin of this node's box.
    pub(crate) min: Origin3,
    /// Extent of this node's box.
    pub(crate) extent: Extent3,
    /// Parent node, `None` for the root and for tombstoned slots.
    pub(crate) parent: Option<NodeIndex>,
    /// Child pair, stored together: a node has both children or neither.
    pub(crate) children: Option<(NodeIndex, NodeIndex)>,
    /// Whether this leaf currently backs a live allocation.
    pub(crate) used: bool,
}

impl LayoutNode {
    /// Create a free leaf covering the given box.
    pub(crate) fn leaf(min: Origin3, extent: Extent3, parent: Option<NodeIndex>) -> Self {
        Self {
            min,
            extent,
            parent,
            children: None,
            used: false,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_index_zero() {
        assert_eq!(NodeIndex::ROOT.index(), 0);
    }

    #[test]
    fn leaf_starts_free_and_childless() {
        let node = LayoutNode::leaf(Origin3::ZERO, Extent3::new(8, 8, 8), None);
        assert!(node.children.is_none());
        assert!(!node.used);
        assert!(node.parent.is_none());
    }
}
