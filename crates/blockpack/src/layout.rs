//! The volume layout allocator: tree search, split, and collapse.
//!
//! [`VolumeLayout`] packs axis-aligned boxes into a fixed-capacity 3D
//! volume by maintaining a binary tree of box nodes over an index
//! arena. Allocation searches depth-first for a free leaf, carving
//! exact-fit leaves out of larger ones one split at a time; release
//! walks back up the tree and merges fully-freed subtrees into a
//! single leaf so the space can satisfy larger requests again.
//!
//! # Two-phase placement
//!
//! A request is first placed without letting the committed size grow:
//! only positions whose far corner stays inside the current committed
//! bound are considered. Only when that fails is the search repeated
//! with growth allowed, up to the fixed capacity. Callers that watch
//! [`current_size`](VolumeLayout::current_size) therefore see the
//! committed volume grow only when the already-committed region truly
//! cannot hold a request.
//!
//! # Arena bookkeeping
//!
//! Nodes are addressed by index into a contiguous vec. Slots
//! vacated by a collapse are tombstoned on a free list and handed back
//! to later splits, so steady-state churn does not grow the arena.
//! Live allocations are additionally tracked in an origin-keyed map
//! for O(1) release lookup.

use indexmap::IndexMap;
use smallvec::{smallvec, SmallVec};

use crate::config::LayoutConfig;
use crate::geometry::{Extent3, Origin3};
use crate::node::{LayoutNode, NodeIndex};
use crate::stats::LayoutStats;

/// Which axis a split cuts along.
enum SplitAxis {
    X,
    Y,
    Z,
}

/// An incremental 3D spatial bin-packing allocator.
///
/// Hands out non-overlapping axis-aligned boxes from a fixed-capacity
/// volume and reclaims them on release. The committed size (the tight
/// per-axis bound of everything allocated so far) is tracked separately
/// from the capacity and never shrinks.
///
/// Allocation failure (`None`) and release of an unknown region
/// (`false`) are ordinary outcomes for the caller to branch on, not
/// errors: a cache owner typically responds by evicting something and
/// retrying.
///
/// # Examples
///
/// ```
/// use blockpack::{Extent3, LayoutConfig, VolumeLayout};
///
/// let mut layout = VolumeLayout::new(LayoutConfig::new(Extent3::new(64, 64, 64)));
///
/// let origin = layout.allocate(Extent3::new(32, 32, 32)).expect("capacity is empty");
/// assert_eq!(layout.current_size(), Extent3::new(32, 32, 32));
///
/// assert!(layout.free(origin, Extent3::new(32, 32, 32)));
/// // A request larger than the capacity can never be placed.
/// assert_eq!(layout.allocate(Extent3::new(128, 1, 1)), None);
/// ```
pub struct VolumeLayout {
    /// Node arena; index 0 is the root, spanning the full capacity.
    nodes: Vec<LayoutNode>,
    /// Tombstoned arena slots available for reuse by a split.
    free_slots: Vec<NodeIndex>,
    /// Used leaves by origin, for O(1) release lookup.
    live: IndexMap<Origin3, NodeIndex>,
    /// Tight per-axis bound of all allocations so far.
    current: Extent3,
    /// Fixed capacity, equal to the root box extent.
    max: Extent3,
    /// Round the committed size up to powers of two.
    round_pow2: bool,
    /// Round request extents up to multiples of 4.
    align4: bool,
}

impl VolumeLayout {
    /// Create a layout with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if any `max_size` axis exceeds [`LayoutConfig::MAX_AXIS`]
    /// or if `min_size` exceeds `max_size` on any axis. Both are
    /// construction contract violations that can never be satisfied
    /// later.
    pub fn new(config: LayoutConfig) -> Self {
        let LayoutConfig {
            min_size,
            max_size,
            round_pow2,
            align4,
        } = config;
        assert!(
            max_size.fits_in(Extent3::new(
                LayoutConfig::MAX_AXIS,
                LayoutConfig::MAX_AXIS,
                LayoutConfig::MAX_AXIS,
            )),
            "max_size {max_size} exceeds the {}-per-axis capacity limit",
            LayoutConfig::MAX_AXIS,
        );
        assert!(
            min_size.fits_in(max_size),
            "min_size {min_size} exceeds max_size {max_size}",
        );
        Self {
            nodes: vec![LayoutNode::leaf(Origin3::ZERO, max_size, None)],
            free_slots: Vec::new(),
            live: IndexMap::new(),
            current: min_size,
            max: max_size,
            round_pow2,
            align4,
        }
    }

    /// Reserve a box of the given extent.
    ///
    /// Returns the origin of the reserved box, or `None` if no free
    /// region can hold the request even after growing the committed
    /// size to the full capacity. An extent with any zero axis is
    /// trivially satisfied at the layout origin without consuming
    /// space.
    ///
    /// With `align4` set, the reserved box is the request rounded up
    /// to multiples of 4 per axis; pass the original extent back to
    /// [`free`](VolumeLayout::free), which applies the same rounding.
    pub fn allocate(&mut self, extent: Extent3) -> Option<Origin3> {
        if extent.is_empty() {
            return Some(Origin3::ZERO);
        }
        let request = if self.align4 { extent.align_to(4) } else { extent };

        let index = self
            .find_leaf(NodeIndex::ROOT, request, false)
            .or_else(|| self.find_leaf(NodeIndex::ROOT, request, true))?;

        let node = &mut self.nodes[index.index()];
        node.used = true;
        let origin = node.min;
        self.live.insert(origin, index);

        let corner = Extent3::new(
            origin.x + request.x,
            origin.y + request.y,
            origin.z + request.z,
        );
        let mut bound = self.current.max(corner);
        if self.round_pow2 {
            // Clamp so a power-of-two round-up of a box near the edge
            // of a non-power-of-two capacity cannot report a committed
            // size past the capacity.
            bound = bound.next_power_of_two().min(self.max);
        }
        self.current = bound;

        Some(origin)
    }

    /// Release a previously reserved box.
    ///
    /// `origin` and `extent` must be the exact pair produced by the
    /// matching [`allocate`](VolumeLayout::allocate) call. Returns
    /// `false`, leaving the tree untouched, when no such reservation
    /// exists (unknown origin, mismatched extent, or double free).
    ///
    /// Releasing does not shrink the reported committed size; it only
    /// makes the space available to future allocations.
    pub fn free(&mut self, origin: Origin3, extent: Extent3) -> bool {
        if extent.is_empty() {
            // Mirror of the trivial success in `allocate`: a zero
            // extent never occupied tree space.
            return true;
        }
        let extent = if self.align4 { extent.align_to(4) } else { extent };

        let Some(&index) = self.live.get(&origin) else {
            return false;
        };
        if self.nodes[index.index()].extent != extent {
            return false;
        }
        self.live.swap_remove(&origin);
        self.nodes[index.index()].used = false;

        // Walk towards the root, remembering the highest ancestor
        // whose subtree no longer holds any used leaf.
        let mut highest = None;
        let mut cursor = self.nodes[index.index()].parent;
        while let Some(ancestor) = cursor {
            if !self.subtree_unused(ancestor) {
                break;
            }
            highest = Some(ancestor);
            cursor = self.nodes[ancestor.index()].parent;
        }
        if let Some(top) = highest {
            self.collapse(top);
        }
        true
    }

    /// Tight per-axis bound of every allocation made so far.
    ///
    /// Monotonic: grows as allocations land past it and is never
    /// reduced, not even by [`free`](VolumeLayout::free).
    pub fn current_size(&self) -> Extent3 {
        self.current
    }

    /// Fixed capacity of the layout, set at construction.
    pub fn max_capacity(&self) -> Extent3 {
        self.max
    }

    /// Number of currently reserved boxes.
    pub fn live_regions(&self) -> usize {
        self.live.len()
    }

    /// Fraction of the capacity volume covered by live reservations.
    pub fn occupancy(&self) -> f64 {
        let capacity = self.max.volume();
        if capacity == 0 {
            return 0.0;
        }
        self.allocated_volume() as f64 / capacity as f64
    }

    /// Point-in-time bookkeeping counters.
    pub fn stats(&self) -> LayoutStats {
        LayoutStats {
            node_slots: self.nodes.len(),
            retired_slots: self.free_slots.len(),
            live_regions: self.live.len(),
            allocated_volume: self.allocated_volume(),
        }
    }

    fn allocated_volume(&self) -> u64 {
        self.live
            .values()
            .map(|&index| self.nodes[index.index()].extent.volume())
            .sum()
    }

    /// Depth-first, children-first search for a leaf that can hold
    /// `request`, splitting oversized leaves down to an exact fit.
    ///
    /// Phase 1 (`allow_growth == false`) rejects positions whose far
    /// corner crosses the committed bound on any axis; phase 2 lets
    /// the leaf extents alone bound the placement. Splits only happen
    /// on a leaf that has already passed every rejection test, so a
    /// failed search leaves the tree unmodified.
    fn find_leaf(
        &mut self,
        index: NodeIndex,
        request: Extent3,
        allow_growth: bool,
    ) -> Option<NodeIndex> {
        let node = self.nodes[index.index()];
        if let Some((first, second)) = node.children {
            return self
                .find_leaf(first, request, allow_growth)
                .or_else(|| self.find_leaf(second, request, allow_growth));
        }
        if node.used || !request.fits_in(node.extent) {
            return None;
        }
        if !allow_growth
            && (node.min.x + request.x > self.current.x
                || node.min.y + request.y > self.current.y
                || node.min.z + request.z > self.current.z)
        {
            return None;
        }
        if node.extent == request {
            return Some(index);
        }
        let (first, _leftover) = self.split(index, request);
        self.find_leaf(first, request, allow_growth)
    }

    /// Split a leaf once, cutting along the axis with the most slack
    /// so the leftover stays as large and reusable as possible.
    ///
    /// The first child matches `request` exactly on the cut axis and
    /// keeps the leaf's extent on the others; the second child holds
    /// the leftover. Tie-break: X/Z are considered when the x slack
    /// exceeds the y slack (X winning an X-Z tie), otherwise Y/Z
    /// (Y winning a Y-Z tie).
    fn split(&mut self, index: NodeIndex, request: Extent3) -> (NodeIndex, NodeIndex) {
        let node = self.nodes[index.index()];
        let excess = Extent3::new(
            node.extent.x - request.x,
            node.extent.y - request.y,
            node.extent.z - request.z,
        );
        let axis = if excess.x > excess.y {
            if excess.x >= excess.z {
                SplitAxis::X
            } else {
                SplitAxis::Z
            }
        } else if excess.y >= excess.z {
            SplitAxis::Y
        } else {
            SplitAxis::Z
        };

        let (first_extent, leftover_min, leftover_extent) = match axis {
            SplitAxis::X => (
                Extent3::new(request.x, node.extent.y, node.extent.z),
                Origin3::new(node.min.x + request.x, node.min.y, node.min.z),
                Extent3::new(excess.x, node.extent.y, node.extent.z),
            ),
            SplitAxis::Y => (
                Extent3::new(node.extent.x, request.y, node.extent.z),
                Origin3::new(node.min.x, node.min.y + request.y, node.min.z),
                Extent3::new(node.extent.x, excess.y, node.extent.z),
            ),
            SplitAxis::Z => (
                Extent3::new(node.extent.x, node.extent.y, request.z),
                Origin3::new(node.min.x, node.min.y, node.min.z + request.z),
                Extent3::new(node.extent.x, node.extent.y, excess.z),
            ),
        };

        let first = self.insert_leaf(LayoutNode::leaf(node.min, first_extent, Some(index)));
        let second = self.insert_leaf(LayoutNode::leaf(
            leftover_min,
            leftover_extent,
            Some(index),
        ));
        self.nodes[index.index()].children = Some((first, second));
        (first, second)
    }

    /// Place a new leaf in a tombstoned slot, or append one.
    fn insert_leaf(&mut self, node: LayoutNode) -> NodeIndex {
        if let Some(slot) = self.free_slots.pop() {
            self.nodes[slot.index()] = node;
            slot
        } else {
            let index = NodeIndex(self.nodes.len() as u32);
            self.nodes.push(node);
            index
        }
    }

    /// Whether no leaf below (or at) `index` is used. Pure: safe to
    /// call speculatively while walking ancestor chains.
    fn subtree_unused(&self, index: NodeIndex) -> bool {
        let mut stack: SmallVec<[NodeIndex; 32]> = smallvec![index];
        while let Some(cursor) = stack.pop() {
            let node = &self.nodes[cursor.index()];
            match node.children {
                Some((first, second)) => {
                    stack.push(first);
                    stack.push(second);
                }
                None => {
                    if node.used {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Turn a fully-unused internal node back into a single free leaf,
    /// tombstoning every node strictly below it.
    ///
    /// The node's box already equals the union of its subtree, so its
    /// `min`/`extent` are left untouched.
    fn collapse(&mut self, top: NodeIndex) {
        let mut stack: SmallVec<[NodeIndex; 32]> = SmallVec::new();
        if let Some((first, second)) = self.nodes[top.index()].children.take() {
            stack.push(first);
            stack.push(second);
        }
        while let Some(cursor) = stack.pop() {
            if let Some((first, second)) = self.nodes[cursor.index()].children.take() {
                stack.push(first);
                stack.push(second);
            }
            self.nodes[cursor.index()].parent = None;
            self.nodes[cursor.index()].used = false;
            self.free_slots.push(cursor);
        }
    }
}
