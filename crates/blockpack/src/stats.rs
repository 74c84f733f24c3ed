//! Bookkeeping counters for a layout's arena.

use std::fmt;

/// Point-in-time bookkeeping counters for a
/// [`VolumeLayout`](crate::VolumeLayout).
///
/// Cache owners use these to watch arena growth and packing pressure:
/// `node_slots` only grows when a split finds no tombstoned slot to
/// reuse, so a rising slot count under steady churn signals
/// fragmentation that collapse is not recovering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutStats {
    /// Total node slots in the arena, live and tombstoned.
    pub node_slots: usize,
    /// Tombstoned slots awaiting reuse by a future split.
    pub retired_slots: usize,
    /// Currently reserved regions.
    pub live_regions: usize,
    /// Total cells covered by live reservations.
    pub allocated_volume: u64,
}

impl fmt::Display for LayoutStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={} retired={} live={} cells={}",
            self.node_slots, self.retired_slots, self.live_regions, self.allocated_volume
        )
    }
}
