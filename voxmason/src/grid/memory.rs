//! DashMap-backed in-memory grid.

use crate::builder::GroundLookup;
use crate::coord::{Position, RegionKey};
use crate::engine::{CellWriteError, CellWriter};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Concurrent sparse grid holding one value per written cell.
///
/// Writes outside the optional vertical bounds are declined (`Ok(false)`).
/// The topmost occupied layer of every column is tracked so the grid can act
/// as a [`GroundLookup`].
///
/// # Example
///
/// ```
/// use voxmason::coord::Position;
/// use voxmason::engine::CellWriter;
/// use voxmason::grid::MemoryGrid;
///
/// let grid = MemoryGrid::<&str>::with_height_bounds(0, 255);
/// assert_eq!(grid.apply(Position::new(0, 10, 0), &"stone"), Ok(true));
/// assert_eq!(grid.apply(Position::new(0, 300, 0), &"stone"), Ok(false));
/// assert_eq!(grid.get(&Position::new(0, 10, 0)), Some("stone"));
/// ```
#[derive(Debug)]
pub struct MemoryGrid<V> {
    cells: DashMap<Position, V>,

    /// Highest occupied y per (x, z) column
    column_tops: DashMap<(i32, i32), i32>,

    min_y: i32,
    max_y: i32,

    writes: AtomicU64,
}

impl<V> Default for MemoryGrid<V> {
    fn default() -> Self {
        Self::with_height_bounds(i32::MIN, i32::MAX)
    }
}

impl<V> MemoryGrid<V> {
    /// Create an unbounded grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid accepting writes only for `min_y <= y <= max_y`.
    pub fn with_height_bounds(min_y: i32, max_y: i32) -> Self {
        Self {
            cells: DashMap::new(),
            column_tops: DashMap::new(),
            min_y: min_y.min(max_y),
            max_y: max_y.max(min_y),
            writes: AtomicU64::new(0),
        }
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if `position` holds a value.
    pub fn contains(&self, position: &Position) -> bool {
        self.cells.contains_key(position)
    }

    /// Accepted writes, overwrites included.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Vertical bounds as `(min_y, max_y)`.
    pub fn height_bounds(&self) -> (i32, i32) {
        (self.min_y, self.max_y)
    }

    /// Distinct regions containing at least one occupied cell.
    pub fn occupied_regions(&self, shift: u32) -> HashSet<RegionKey> {
        self.column_tops
            .iter()
            .map(|entry| {
                let (x, z) = *entry.key();
                RegionKey::with_shift(Position::new(x, 0, z), shift)
            })
            .collect()
    }

    /// Remove every cell.
    pub fn clear(&self) {
        self.cells.clear();
        self.column_tops.clear();
    }

    fn in_bounds(&self, position: &Position) -> bool {
        (self.min_y..=self.max_y).contains(&position.y)
    }
}

impl<V: Clone> MemoryGrid<V> {
    /// Value stored at `position`.
    pub fn get(&self, position: &Position) -> Option<V> {
        self.cells.get(position).map(|cell| cell.value().clone())
    }
}

impl<V: Clone + Send + Sync> CellWriter<V> for MemoryGrid<V> {
    fn apply(&self, position: Position, value: &V) -> Result<bool, CellWriteError> {
        if !self.in_bounds(&position) {
            return Ok(false);
        }

        self.cells.insert(position, value.clone());
        self.column_tops
            .entry((position.x, position.z))
            .and_modify(|top| *top = (*top).max(position.y))
            .or_insert(position.y);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(true)
    }
}

impl<V: Send + Sync> GroundLookup for MemoryGrid<V> {
    /// First free layer above the topmost occupied cell of the column.
    fn ground_level(&self, x: i32, z: i32) -> Option<i32> {
        self.column_tops
            .get(&(x, z))
            .map(|top| top.value().saturating_add(1))
    }
}
