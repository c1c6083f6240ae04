//! Grid coordinates and region keys.
//!
//! [`Position`] addresses a single cell. [`RegionKey`] groups positions into
//! coarse horizontal columns for locality sorting and dirty-region
//! notification; it never addresses anything.
//!
//! The vertical axis is `y`. The horizontal axes are `x` and `z`.

mod types;

pub use types::{Position, RegionKey, DEFAULT_REGION_SHIFT, MAX_REGION_SHIFT};

use std::cmp::Ordering;

/// Sort key used to order writes for locality.
///
/// Primary key is the region, then the vertical axis, then `x`, then `z`.
#[inline]
pub fn locality_key(position: &Position, shift: u32) -> (RegionKey, i32, i32, i32) {
    (
        RegionKey::with_shift(*position, shift),
        position.y,
        position.x,
        position.z,
    )
}

/// Compare two positions by [`locality_key`].
#[inline]
pub fn locality_cmp(a: &Position, b: &Position, shift: u32) -> Ordering {
    locality_key(a, shift).cmp(&locality_key(b, shift))
}

/// Sort positions in place so writes to the same region are adjacent.
///
/// The sort is stable, so duplicate positions keep their relative order.
pub fn sort_for_locality(positions: &mut [Position], shift: u32) {
    positions.sort_by_cached_key(|p| locality_key(p, shift));
}
