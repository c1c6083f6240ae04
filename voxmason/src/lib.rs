//! voxmason - Batched spatial mutation for integer voxel grids
//!
//! This library applies large sets of single-cell writes to a mutable 3D grid
//! under throughput, locality and latency constraints. Shapes are generated as
//! position sequences, sorted so that writes touching the same region are
//! adjacent, and drained through a bounded batch loop with a wall-clock
//! deadline and coalesced dirty-region notifications.
//!
//! # High-Level API
//!
//! For most use cases, the [`builder`] module is the entry point:
//!
//! ```ignore
//! use std::sync::Arc;
//! use voxmason::builder::{PatternBuilder, ShapeSpec};
//! use voxmason::coord::Position;
//! use voxmason::grid::MemoryGrid;
//!
//! let grid = Arc::new(MemoryGrid::<u16>::new());
//! let builder = PatternBuilder::new(grid.clone());
//!
//! let shape = ShapeSpec::sphere(Position::new(0, 64, 0), 10, true);
//! let result = builder.build(&shape, 1).await?;
//! println!("{}", result);
//! ```
//!
//! The lower-level [`engine::BatchProcessor`] drains a caller-filled
//! [`queue::MutationQueue`] directly.

pub mod builder;
pub mod coalesce;
pub mod config;
pub mod coord;
pub mod engine;
pub mod geometry;
pub mod grid;
pub mod log;
pub mod logging;
pub mod profile;
pub mod queue;

/// Version of the voxmason library and CLI.
///
/// Synchronized across the workspace and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_coord_module_exists() {
        use crate::coord::{Position, RegionKey};
        let key = RegionKey::from_position(Position::new(17, 0, -1));
        assert_eq!(key.region_x(), 1);
        assert_eq!(key.region_z(), -1);
    }
}
