//! Axis-aligned box fill.

use super::Position;

/// Number of cells in the box spanned by two corners.
pub fn cuboid_volume(corner_a: Position, corner_b: Position) -> u64 {
    let span = |a: i32, b: i32| (a as i64 - b as i64).unsigned_abs() + 1;
    span(corner_a.x, corner_b.x) * span(corner_a.y, corner_b.y) * span(corner_a.z, corner_b.z)
}

/// Fill the box spanned by two corners, inclusive.
///
/// Corners may be given in any order. Iteration is `y` outermost, then `x`,
/// then `z`, the same order the builder sorts writes within a region.
pub fn cuboid(corner_a: Position, corner_b: Position) -> Vec<Position> {
    let (min_x, max_x) = (corner_a.x.min(corner_b.x), corner_a.x.max(corner_b.x));
    let (min_y, max_y) = (corner_a.y.min(corner_b.y), corner_a.y.max(corner_b.y));
    let (min_z, max_z) = (corner_a.z.min(corner_b.z), corner_a.z.max(corner_b.z));

    let mut positions = Vec::with_capacity(cuboid_volume(corner_a, corner_b) as usize);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                positions.push(Position::new(x, y, z));
            }
        }
    }
    positions
}
