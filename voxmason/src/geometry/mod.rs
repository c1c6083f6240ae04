//! Shape generators.
//!
//! Pure, deterministic functions mapping shape parameters to an ordered
//! sequence of [`Position`]s. They hold no state and perform no caps: limits
//! are enforced by [`crate::builder::ShapeValidator`] before generation.
//!
//! | Shape | Function | Order |
//! |---|---|---|
//! | Line / wall | [`trace_line`], [`wall`] | along the line, each column bottom-up |
//! | Circle | [`circle`] | filled: row-major; outline: octant steps |
//! | Sphere | [`sphere`] | bounding cube, x → y → z |
//! | Box | [`cuboid`] | y → x → z (locality order) |
//! | Pyramid | [`pyramid`] | layer by layer, bottom-up |

mod circle;
mod cuboid;
mod line;
mod pyramid;
mod sphere;

pub use circle::{circle, CircleMode};
pub use cuboid::{cuboid, cuboid_volume};
pub use line::{trace_line, wall, LineTrace};
pub use pyramid::{pyramid, pyramid_cell_count};
pub use sphere::{sphere, SphereMode};

use crate::coord::Position;
