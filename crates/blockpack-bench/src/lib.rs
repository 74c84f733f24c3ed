//! Benchmark workloads for the blockpack allocator.
//!
//! Provides deterministic, seed-driven operation sequences shared by
//! the criterion benches:
//!
//! - [`random_extents`]: reproducible request extents for a seed
//! - [`churn`]: steady-state allocate/free interleaving with a
//!   configurable number of live regions

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use blockpack::{Extent3, LayoutConfig, Origin3, VolumeLayout};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Standard benchmark capacity: a 64³ cache volume.
pub const BENCH_CAPACITY: Extent3 = Extent3::new(64, 64, 64);

/// Build a fresh layout at the standard benchmark capacity.
pub fn bench_layout() -> VolumeLayout {
    VolumeLayout::new(LayoutConfig::new(BENCH_CAPACITY))
}

/// Generate `n` deterministic request extents with axes in `1..=max_axis`.
pub fn random_extents(seed: u64, n: usize, max_axis: u32) -> Vec<Extent3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Extent3::new(
                rng.random_range(1..=max_axis),
                rng.random_range(1..=max_axis),
                rng.random_range(1..=max_axis),
            )
        })
        .collect()
}

/// Drive a steady-state churn: allocate each extent in turn, freeing
/// the oldest live region whenever more than `high_water` are live.
///
/// Returns the number of successful allocations so benches can
/// `black_box` a value derived from the whole run.
pub fn churn(layout: &mut VolumeLayout, extents: &[Extent3], high_water: usize) -> usize {
    let mut live: Vec<(Origin3, Extent3)> = Vec::new();
    let mut allocated = 0;
    for &extent in extents {
        if live.len() > high_water {
            let (origin, oldest) = live.remove(0);
            assert!(layout.free(origin, oldest), "tracked region failed to free");
        }
        if let Some(origin) = layout.allocate(extent) {
            live.push((origin, extent));
            allocated += 1;
        }
    }
    allocated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_extents_are_deterministic() {
        let a = random_extents(42, 100, 16);
        let b = random_extents(42, 100, 16);
        assert_eq!(a, b);
        assert_eq!(a.len(), 100);
        for extent in &a {
            assert!(!extent.is_empty());
            assert!(extent.fits_in(Extent3::new(16, 16, 16)));
        }
    }

    #[test]
    fn churn_holds_the_high_water_mark() {
        let mut layout = bench_layout();
        let extents = random_extents(42, 256, 16);
        let allocated = churn(&mut layout, &extents, 24);
        assert!(allocated > 0);
        assert!(layout.live_regions() <= 25);
    }
}
