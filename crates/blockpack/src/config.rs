//! Layout construction parameters.

use crate::geometry::Extent3;

/// Configuration for a [`VolumeLayout`](crate::VolumeLayout).
///
/// All values are fixed at construction; the layout never re-reads a
/// config after `new`.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    /// Committed size the layout starts from.
    ///
    /// The reported committed size never drops below this, and only
    /// grows as allocations land past it. Must fit within `max_size`
    /// per axis.
    pub min_size: Extent3,

    /// Fixed capacity of the layout.
    ///
    /// The root box spans `(0, 0, 0)..max_size` and no allocation ever
    /// extends past it. Each axis must fit in 16 bits
    /// ([`LayoutConfig::MAX_AXIS`]).
    pub max_size: Extent3,

    /// Round the committed size up to a power of two per axis after
    /// each successful allocation.
    ///
    /// For callers backing the layout with a resizable texture that
    /// only comes in power-of-two sizes.
    pub round_pow2: bool,

    /// Round requested extents up to a multiple of 4 per axis.
    ///
    /// Matches block-compressed texture formats whose tiles are 4
    /// cells on a side.
    pub align4: bool,
}

impl LayoutConfig {
    /// Maximum capacity per axis: coordinates are carried in 16 bits.
    pub const MAX_AXIS: u32 = u16::MAX as u32;

    /// Create a config with the given capacity, no initial committed
    /// size, and both rounding behaviours off.
    pub const fn new(max_size: Extent3) -> Self {
        Self {
            min_size: Extent3::ZERO,
            max_size,
            round_pow2: false,
            align4: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_empty_committed_size() {
        let config = LayoutConfig::new(Extent3::new(64, 64, 64));
        assert_eq!(config.min_size, Extent3::ZERO);
        assert_eq!(config.max_size, Extent3::new(64, 64, 64));
        assert!(!config.round_pow2);
        assert!(!config.align4);
    }

    #[test]
    fn max_axis_is_16_bit() {
        assert_eq!(LayoutConfig::MAX_AXIS, 65_535);
    }
}
