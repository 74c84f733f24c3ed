//! Coordinate newtypes for box origins and box extents.
//!
//! The allocator deals in two kinds of integer triple: a position
//! ([`Origin3`], measured from the layout's origin) and a size
//! ([`Extent3`], the length of a box along each axis). Keeping them as
//! separate types prevents the classic origin-for-size argument swap
//! at the call surface.

use std::fmt;

/// The origin of an axis-aligned box, measured from the layout origin.
///
/// Origins are handed out by [`VolumeLayout::allocate`] and passed back
/// verbatim to [`VolumeLayout::free`]. Two live allocations never share
/// an origin, so `Origin3` is hashable and used as a map key internally.
///
/// [`VolumeLayout::allocate`]: crate::VolumeLayout::allocate
/// [`VolumeLayout::free`]: crate::VolumeLayout::free
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Origin3 {
    /// Position along the x-axis.
    pub x: u32,
    /// Position along the y-axis.
    pub y: u32,
    /// Position along the z-axis.
    pub z: u32,
}

impl Origin3 {
    /// The layout origin, `(0, 0, 0)`.
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create an origin from its three axis positions.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Origin3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(u32, u32, u32)> for Origin3 {
    fn from((x, y, z): (u32, u32, u32)) -> Self {
        Self { x, y, z }
    }
}

/// The extent of an axis-aligned box: its length along each axis.
///
/// An extent with any zero axis encloses no cells; the allocator
/// treats such requests as trivially satisfied (see
/// [`VolumeLayout::allocate`](crate::VolumeLayout::allocate)).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent3 {
    /// Length along the x-axis.
    pub x: u32,
    /// Length along the y-axis.
    pub y: u32,
    /// Length along the z-axis.
    pub z: u32,
}

impl Extent3 {
    /// The empty extent, `(0, 0, 0)`.
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create an extent from its three axis lengths.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Whether any axis is zero, i.e. the box encloses no cells.
    pub const fn is_empty(&self) -> bool {
        self.x == 0 || self.y == 0 || self.z == 0
    }

    /// Whether a box of this extent fits inside one of `other`'s
    /// extent, per axis.
    pub const fn fits_in(&self, other: Extent3) -> bool {
        self.x <= other.x && self.y <= other.y && self.z <= other.z
    }

    /// Round each axis up to the next multiple of `alignment`.
    ///
    /// `alignment` must be non-zero.
    pub const fn align_to(self, alignment: u32) -> Self {
        Self {
            x: self.x.div_ceil(alignment) * alignment,
            y: self.y.div_ceil(alignment) * alignment,
            z: self.z.div_ceil(alignment) * alignment,
        }
    }

    /// Per-axis maximum of two extents.
    pub fn max(self, other: Extent3) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// Per-axis minimum of two extents.
    pub fn min(self, other: Extent3) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Round each axis up to the next power of two.
    pub fn next_power_of_two(self) -> Self {
        Self {
            x: self.x.next_power_of_two(),
            y: self.y.next_power_of_two(),
            z: self.z.next_power_of_two(),
        }
    }

    /// Number of cells enclosed by a box of this extent.
    ///
    /// Widened to `u64`: three 16-bit axes can reach 2^48 cells.
    pub fn volume(&self) -> u64 {
        self.x as u64 * self.y as u64 * self.z as u64
    }
}

impl fmt::Display for Extent3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

impl From<(u32, u32, u32)> for Extent3 {
    fn from((x, y, z): (u32, u32, u32)) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_extent_has_zero_axis() {
        assert!(Extent3::new(0, 4, 4).is_empty());
        assert!(Extent3::new(4, 0, 4).is_empty());
        assert!(Extent3::new(4, 4, 0).is_empty());
        assert!(!Extent3::new(1, 1, 1).is_empty());
    }

    #[test]
    fn fits_in_is_per_axis() {
        let inner = Extent3::new(4, 8, 2);
        assert!(inner.fits_in(Extent3::new(4, 8, 2)));
        assert!(inner.fits_in(Extent3::new(10, 10, 10)));
        assert!(!inner.fits_in(Extent3::new(3, 10, 10)));
        assert!(!inner.fits_in(Extent3::new(10, 10, 1)));
    }

    #[test]
    fn align_to_rounds_up_to_multiple() {
        let e = Extent3::new(10, 12, 1).align_to(4);
        assert_eq!(e, Extent3::new(12, 12, 4));
        // Already-aligned values are unchanged.
        assert_eq!(e.align_to(4), e);
        assert_eq!(Extent3::ZERO.align_to(4), Extent3::ZERO);
    }

    #[test]
    fn next_power_of_two_per_axis() {
        let e = Extent3::new(3, 16, 33).next_power_of_two();
        assert_eq!(e, Extent3::new(4, 16, 64));
    }

    #[test]
    fn volume_widens_to_u64() {
        let e = Extent3::new(65_535, 65_535, 65_535);
        assert_eq!(e.volume(), 65_535u64 * 65_535 * 65_535);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Origin3::new(1, 2, 3).to_string(), "(1, 2, 3)");
        assert_eq!(Extent3::new(4, 5, 6).to_string(), "4x5x6");
    }
}
