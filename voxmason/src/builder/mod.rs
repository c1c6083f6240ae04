//! Shape building on top of the placement engine.
//!
//! [`PatternBuilder`] is the composition root: it validates a [`ShapeSpec`]
//! with a [`ShapeValidator`], resolves the ground level for walls through an
//! optional [`GroundLookup`], generates positions with [`crate::geometry`],
//! sorts them for locality and hands them to a
//! [`BatchProcessor`](crate::engine::BatchProcessor).

mod ground;
mod pattern;
mod shape;
mod validate;

pub use ground::{resolve_ground, GroundLookup, DEFAULT_GROUND_LEVEL};
pub use pattern::PatternBuilder;
pub use shape::ShapeSpec;
pub use validate::{
    ShapeLimits, ShapeValidator, ValidationError, DEFAULT_MAX_BOX_DEPTH, DEFAULT_MAX_BOX_HEIGHT,
    DEFAULT_MAX_BOX_WIDTH, DEFAULT_MAX_CELLS, DEFAULT_MAX_RADIUS, DEFAULT_MAX_WALL_HEIGHT,
};
