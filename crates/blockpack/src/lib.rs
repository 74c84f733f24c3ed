//! Incremental 3D spatial bin-packing for volume atlases.
//!
//! `blockpack` manages sub-regions of a fixed-capacity 3D resource —
//! typically a cache volume texture shared by many independent callers
//! over time. It hands out non-overlapping axis-aligned boxes on
//! request, reclaims them on release, and keeps the committed bounding
//! volume small and densely packed while allocations and frees arrive
//! out of order.
//!
//! # Architecture
//!
//! ```text
//! VolumeLayout (allocator)
//! ├── Vec<LayoutNode> — binary box tree over an index arena, root at 0
//! ├── free-slot list — tombstoned nodes reused by later splits
//! └── live map — Origin3 → NodeIndex for O(1) release
//! ```
//!
//! Allocation is a two-phase depth-first search: first inside the
//! already-committed bound, then allowing growth up to the capacity.
//! Oversized leaves are cut down to an exact fit one axis at a time,
//! always along the axis with the most slack; release merges
//! fully-freed subtrees back into single leaves so the space can hold
//! larger requests again.
//!
//! # Quick start
//!
//! ```
//! use blockpack::{Extent3, LayoutConfig, VolumeLayout};
//!
//! // A 64³ cache volume, block-aligned for compressed formats.
//! let mut config = LayoutConfig::new(Extent3::new(64, 64, 64));
//! config.align4 = true;
//! let mut layout = VolumeLayout::new(config);
//!
//! let origin = layout.allocate(Extent3::new(10, 10, 10)).expect("empty volume");
//! assert_eq!(layout.current_size(), Extent3::new(12, 12, 12));
//! assert!(layout.free(origin, Extent3::new(10, 10, 10)));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod geometry;
pub mod layout;
mod node;
pub mod stats;

// Public re-exports for the primary API surface.
pub use config::LayoutConfig;
pub use geometry::{Extent3, Origin3};
pub use layout::VolumeLayout;
pub use stats::LayoutStats;
