//! Shape descriptions accepted by the pattern builder.

use crate::coord::Position;
use crate::geometry::{self, CircleMode, SphereMode};
use std::fmt;

/// A shape to generate, with all of its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeSpec {
    /// Vertical wall along a horizontal line
    Wall {
        from_x: i32,
        from_z: i32,
        to_x: i32,
        to_z: i32,
        height: i32,
        /// Lowest layer; looked up in the grid when absent
        base_y: Option<i32>,
    },
    /// Horizontal disc or ring
    Circle {
        center: Position,
        radius: i32,
        mode: CircleMode,
    },
    /// Ball or spherical shell
    Sphere {
        center: Position,
        radius: i32,
        mode: SphereMode,
    },
    /// Solid box spanning two corners
    Cuboid { corner_a: Position, corner_b: Position },
    /// Hollow stepped pyramid on `base`
    Pyramid { base: Position, size: i32 },
}

impl ShapeSpec {
    /// A wall on the ground below its starting point.
    pub fn wall(from_x: i32, from_z: i32, to_x: i32, to_z: i32, height: i32) -> Self {
        ShapeSpec::Wall {
            from_x,
            from_z,
            to_x,
            to_z,
            height,
            base_y: None,
        }
    }

    /// A wall whose lowest layer is `base_y`.
    pub fn wall_at(from_x: i32, from_z: i32, to_x: i32, to_z: i32, base_y: i32, height: i32) -> Self {
        ShapeSpec::Wall {
            from_x,
            from_z,
            to_x,
            to_z,
            height,
            base_y: Some(base_y),
        }
    }

    /// A disc (`filled`) or a ring.
    pub fn circle(center: Position, radius: i32, filled: bool) -> Self {
        let mode = if filled {
            CircleMode::Filled
        } else {
            CircleMode::Outline
        };
        ShapeSpec::Circle {
            center,
            radius,
            mode,
        }
    }

    /// A shell (`hollow`) or a solid ball.
    pub fn sphere(center: Position, radius: i32, hollow: bool) -> Self {
        let mode = if hollow {
            SphereMode::Hollow
        } else {
            SphereMode::Filled
        };
        ShapeSpec::Sphere {
            center,
            radius,
            mode,
        }
    }

    /// A solid box.
    pub fn cuboid(corner_a: Position, corner_b: Position) -> Self {
        ShapeSpec::Cuboid { corner_a, corner_b }
    }

    /// A stepped pyramid.
    pub fn pyramid(base: Position, size: i32) -> Self {
        ShapeSpec::Pyramid { base, size }
    }

    /// Short lowercase name, used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeSpec::Wall { .. } => "wall",
            ShapeSpec::Circle { .. } => "circle",
            ShapeSpec::Sphere { .. } => "sphere",
            ShapeSpec::Cuboid { .. } => "box",
            ShapeSpec::Pyramid { .. } => "pyramid",
        }
    }

    /// Upper bound on the number of cells the shape generates.
    ///
    /// Computed from the parameters alone, without generating anything.
    pub fn estimated_cells(&self) -> u64 {
        match *self {
            ShapeSpec::Wall {
                from_x,
                from_z,
                to_x,
                to_z,
                height,
                ..
            } => {
                let dx = (to_x as i64 - from_x as i64).unsigned_abs();
                let dz = (to_z as i64 - from_z as i64).unsigned_abs();
                (dx.max(dz) + 1) * height.max(0) as u64
            }
            ShapeSpec::Circle {
                radius,
                mode: CircleMode::Filled,
                ..
            } => disc_cells(radius),
            // Eight reflections per octant step, duplicates included
            ShapeSpec::Circle {
                radius,
                mode: CircleMode::Outline,
                ..
            } => 8 * (radius.max(0) as u64 + 1),
            // A shell is a subset of the ball
            ShapeSpec::Sphere { radius, .. } => ball_cells(radius),
            ShapeSpec::Cuboid { corner_a, corner_b } => geometry::cuboid_volume(corner_a, corner_b),
            ShapeSpec::Pyramid { size, .. } => geometry::pyramid_cell_count(size),
        }
    }

    /// Column whose ground level a wall is built on, if this is a wall
    /// without an explicit base.
    pub(crate) fn ground_column(&self) -> Option<(i32, i32)> {
        match *self {
            ShapeSpec::Wall {
                from_x,
                from_z,
                base_y: None,
                ..
            } => Some((from_x, from_z)),
            _ => None,
        }
    }

    /// Generate the shape's positions in generator order.
    ///
    /// `ground_y` is used only by walls without an explicit base.
    pub fn generate(&self, ground_y: i32) -> Vec<Position> {
        match *self {
            ShapeSpec::Wall {
                from_x,
                from_z,
                to_x,
                to_z,
                height,
                base_y,
            } => geometry::wall(
                from_x,
                from_z,
                to_x,
                to_z,
                base_y.unwrap_or(ground_y),
                height,
            ),
            ShapeSpec::Circle {
                center,
                radius,
                mode,
            } => geometry::circle(center, radius, mode),
            ShapeSpec::Sphere {
                center,
                radius,
                mode,
            } => geometry::sphere(center, radius, mode),
            ShapeSpec::Cuboid { corner_a, corner_b } => geometry::cuboid(corner_a, corner_b),
            ShapeSpec::Pyramid { base, size } => geometry::pyramid(base, size),
        }
    }
}

/// Integer square root, rounded down.
fn isqrt(n: i64) -> i64 {
    let mut root = (n as f64).sqrt() as i64;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Cells with `dx² + dz² <= r²`, counted one row at a time.
fn disc_cells(radius: i32) -> u64 {
    if radius < 0 {
        return 0;
    }
    let r = radius as i64;
    (-r..=r)
        .map(|dx| (2 * isqrt(r * r - dx * dx) + 1) as u64)
        .sum()
}

/// Cells with `dx² + dy² + dz² <= r²`, counted one column at a time.
fn ball_cells(radius: i32) -> u64 {
    if radius < 0 {
        return 0;
    }
    let r = radius as i64;
    let mut cells = 0;
    for dx in -r..=r {
        for dy in -r..=r {
            let rest = r * r - dx * dx - dy * dy;
            if rest >= 0 {
                cells += (2 * isqrt(rest) + 1) as u64;
            }
        }
    }
    cells
}

impl fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeSpec::Wall {
                from_x,
                from_z,
                to_x,
                to_z,
                height,
                ..
            } => write!(
                f,
                "wall from [{}, {}] to [{}, {}], height {}",
                from_x, from_z, to_x, to_z, height
            ),
            ShapeSpec::Circle {
                center,
                radius,
                mode,
            } => write!(f, "{:?} circle at {}, radius {}", mode, center, radius),
            ShapeSpec::Sphere {
                center,
                radius,
                mode,
            } => write!(f, "{:?} sphere at {}, radius {}", mode, center, radius),
            ShapeSpec::Cuboid { corner_a, corner_b } => {
                write!(f, "box from {} to {}", corner_a, corner_b)
            }
            ShapeSpec::Pyramid { base, size } => write!(f, "pyramid at {}, size {}", base, size),
        }
    }
}
