//! Spheres over the bounding cube.

use super::Position;

/// How a sphere is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SphereMode {
    /// Every cell with squared distance `<= r²`
    Filled,
    /// Cells with squared distance in `[(r-1)², r²]`
    Hollow,
}

/// Generate a sphere around `center`.
///
/// The hollow band approximates a unit-thick shell; it is not an exact
/// iso-surface. Radius 0 yields the centre cell when filled and nothing when
/// hollow; a negative radius yields nothing.
pub fn sphere(center: Position, radius: i32, mode: SphereMode) -> Vec<Position> {
    if radius < 0 {
        return Vec::new();
    }

    let outer = radius * radius;
    let inner = match mode {
        SphereMode::Filled => 0,
        SphereMode::Hollow => (radius - 1) * (radius - 1),
    };

    let mut positions = Vec::new();
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            for dz in -radius..=radius {
                let d2 = dx * dx + dy * dy + dz * dz;
                if d2 >= inner && d2 <= outer {
                    positions.push(center.offset(dx, dy, dz));
                }
            }
        }
    }
    positions
}
