//! Shape parameter validation.
//!
//! Runs synchronously before anything is generated or enqueued, so a
//! rejected shape never touches the grid.

use super::ShapeSpec;
use thiserror::Error;

/// Default cap on circle and sphere radius.
pub const DEFAULT_MAX_RADIUS: i32 = 50;
/// Default cap on wall height.
pub const DEFAULT_MAX_WALL_HEIGHT: i32 = 50;
/// Default cap on box width (x extent).
pub const DEFAULT_MAX_BOX_WIDTH: i32 = 30;
/// Default cap on box depth (z extent).
pub const DEFAULT_MAX_BOX_DEPTH: i32 = 30;
/// Default cap on box height (y extent).
pub const DEFAULT_MAX_BOX_HEIGHT: i32 = 20;
/// Default cap on generated cells for any shape.
pub const DEFAULT_MAX_CELLS: u64 = 1_000_000;

/// A shape rejected before generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{shape} {parameter} must be positive, got {value}")]
    NonPositive {
        shape: &'static str,
        parameter: &'static str,
        value: i64,
    },

    #[error("{shape} {parameter} {value} exceeds the maximum of {max}")]
    TooLarge {
        shape: &'static str,
        parameter: &'static str,
        value: i64,
        max: i64,
    },

    #[error("{shape} would place up to {cells} cells, more than the maximum of {max}")]
    TooManyCells {
        shape: &'static str,
        cells: u64,
        max: u64,
    },
}

/// Upstream bound check for shapes.
pub trait ShapeValidator: Send + Sync {
    /// Accept or reject `shape`.
    fn validate(&self, shape: &ShapeSpec) -> Result<(), ValidationError>;
}

/// Size caps applied to every shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeLimits {
    pub max_radius: i32,
    pub max_wall_height: i32,
    pub max_box_width: i32,
    pub max_box_depth: i32,
    pub max_box_height: i32,
    pub max_cells: u64,
}

impl Default for ShapeLimits {
    fn default() -> Self {
        Self {
            max_radius: DEFAULT_MAX_RADIUS,
            max_wall_height: DEFAULT_MAX_WALL_HEIGHT,
            max_box_width: DEFAULT_MAX_BOX_WIDTH,
            max_box_depth: DEFAULT_MAX_BOX_DEPTH,
            max_box_height: DEFAULT_MAX_BOX_HEIGHT,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

fn positive(shape: &'static str, parameter: &'static str, value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        Err(ValidationError::NonPositive {
            shape,
            parameter,
            value,
        })
    } else {
        Ok(())
    }
}

fn at_most(
    shape: &'static str,
    parameter: &'static str,
    value: i64,
    max: i32,
) -> Result<(), ValidationError> {
    if value > max as i64 {
        Err(ValidationError::TooLarge {
            shape,
            parameter,
            value,
            max: max as i64,
        })
    } else {
        Ok(())
    }
}

impl ShapeLimits {
    fn check_box(&self, shape: &'static str, width: i64, height: i64, depth: i64) -> Result<(), ValidationError> {
        at_most(shape, "width", width, self.max_box_width)?;
        at_most(shape, "depth", depth, self.max_box_depth)?;
        at_most(shape, "height", height, self.max_box_height)
    }
}

impl ShapeValidator for ShapeLimits {
    fn validate(&self, shape: &ShapeSpec) -> Result<(), ValidationError> {
        let name = shape.name();
        match *shape {
            ShapeSpec::Wall { height, .. } => {
                positive(name, "height", height as i64)?;
                at_most(name, "height", height as i64, self.max_wall_height)?;
            }
            ShapeSpec::Circle { radius, .. } | ShapeSpec::Sphere { radius, .. } => {
                positive(name, "radius", radius as i64)?;
                at_most(name, "radius", radius as i64, self.max_radius)?;
            }
            ShapeSpec::Cuboid { corner_a, corner_b } => {
                let extent = |a: i32, b: i32| (a as i64 - b as i64).abs() + 1;
                self.check_box(
                    name,
                    extent(corner_a.x, corner_b.x),
                    extent(corner_a.y, corner_b.y),
                    extent(corner_a.z, corner_b.z),
                )?;
            }
            ShapeSpec::Pyramid { size, .. } => {
                positive(name, "size", size as i64)?;
                let footprint = 2 * size as i64 + 1;
                self.check_box(name, footprint, size as i64, footprint)?;
            }
        }

        let cells = shape.estimated_cells();
        if cells > self.max_cells {
            return Err(ValidationError::TooManyCells {
                shape: name,
                cells,
                max: self.max_cells,
            });
        }
        Ok(())
    }
}
