//! Coordinate type definitions

use std::fmt;

/// Default number of bits dropped from `x` and `z` to form a region key
/// (16×16 cell columns).
pub const DEFAULT_REGION_SHIFT: u32 = 4;

/// Largest accepted region shift.
pub const MAX_REGION_SHIFT: u32 = 16;

/// Immutable cell address in the grid.
///
/// No bounds are enforced here; callers validate ranges before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    /// Horizontal axis (east-west)
    pub x: i32,
    /// Vertical axis
    pub y: i32,
    /// Horizontal axis (north-south)
    pub z: i32,
}

impl Position {
    /// Create a position from its three coordinates.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return this position shifted by the given deltas.
    #[inline]
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Squared euclidean distance to another position.
    #[inline]
    pub fn distance_squared(&self, other: &Position) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        let dz = (self.z - other.z) as i64;
        dx * dx + dy * dy + dz * dz
    }
}

impl From<(i32, i32, i32)> for Position {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Coarse horizontal region identifier.
///
/// Packs `x >> shift` into the high 32 bits and `z >> shift` into the low 32
/// bits of an `i64`. Ordering is the ordering of the packed value, which
/// groups regions by their `x` column first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionKey(i64);

impl RegionKey {
    /// Region key using [`DEFAULT_REGION_SHIFT`].
    #[inline]
    pub fn from_position(position: Position) -> Self {
        Self::with_shift(position, DEFAULT_REGION_SHIFT)
    }

    /// Region key dropping `shift` low bits from each horizontal axis.
    ///
    /// `shift` is clamped to [`MAX_REGION_SHIFT`].
    #[inline]
    pub fn with_shift(position: Position, shift: u32) -> Self {
        let shift = shift.min(MAX_REGION_SHIFT);
        Self::from_region_coords(position.x >> shift, position.z >> shift)
    }

    /// Region key from already-shifted region coordinates.
    #[inline]
    pub const fn from_region_coords(region_x: i32, region_z: i32) -> Self {
        Self(((region_x as i64) << 32) | (region_z as i64 & 0xFFFF_FFFF))
    }

    /// Region column along `x`.
    #[inline]
    pub const fn region_x(&self) -> i32 {
        (self.0 >> 32) as i32
    }

    /// Region column along `z`.
    #[inline]
    pub const fn region_z(&self) -> i32 {
        self.0 as i32
    }

    /// The packed 64-bit key.
    #[inline]
    pub const fn packed(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r[{}, {}]", self.region_x(), self.region_z())
    }
}
