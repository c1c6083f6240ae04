//! Bresenham line tracing and wall extrusion.

use super::Position;

/// Iterator over the horizontal cells of a line, endpoints inclusive.
///
/// Integer incremental-error tracing: the error term accumulates both axis
/// deltas, the dominant axis steps every iteration and the other axis steps
/// whenever the doubled error crosses its threshold.
#[derive(Debug, Clone)]
pub struct LineTrace {
    x: i32,
    z: i32,
    end_x: i32,
    end_z: i32,
    dx: i32,
    dz: i32,
    step_x: i32,
    step_z: i32,
    err: i32,
    done: bool,
}

impl Iterator for LineTrace {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = (self.x, self.z);
        if self.x == self.end_x && self.z == self.end_z {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dz {
            self.err -= self.dz;
            self.x += self.step_x;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.z += self.step_z;
        }

        Some(current)
    }
}

/// Trace the horizontal cells from `(from_x, from_z)` to `(to_x, to_z)`.
///
/// # Example
///
/// ```
/// use voxmason::geometry::trace_line;
///
/// let cells: Vec<_> = trace_line(0, 0, 4, 2).collect();
/// assert_eq!(cells, vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]);
/// ```
pub fn trace_line(from_x: i32, from_z: i32, to_x: i32, to_z: i32) -> LineTrace {
    let dx = (to_x - from_x).abs();
    let dz = (to_z - from_z).abs();
    LineTrace {
        x: from_x,
        z: from_z,
        end_x: to_x,
        end_z: to_z,
        dx,
        dz,
        step_x: if from_x < to_x { 1 } else { -1 },
        step_z: if from_z < to_z { 1 } else { -1 },
        err: dx - dz,
        done: false,
    }
}

/// Extrude a traced line vertically into a wall.
///
/// Every traced cell becomes a column of `height` cells starting at `base_y`.
/// A non-positive height yields nothing.
pub fn wall(
    from_x: i32,
    from_z: i32,
    to_x: i32,
    to_z: i32,
    base_y: i32,
    height: i32,
) -> Vec<Position> {
    if height <= 0 {
        return Vec::new();
    }

    let columns: Vec<(i32, i32)> = trace_line(from_x, from_z, to_x, to_z).collect();
    let mut positions = Vec::with_capacity(columns.len() * height as usize);
    for (x, z) in columns {
        for layer in 0..height {
            positions.push(Position::new(x, base_y + layer, z));
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let cells: Vec<_> = trace_line(0, 0, 5, 0).collect();
        assert_eq!(cells, (0..=5).map(|x| (x, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn test_diagonal_line() {
        let cells: Vec<_> = trace_line(0, 0, 3, 3).collect();
        assert_eq!(cells, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_shallow_line() {
        let cells: Vec<_> = trace_line(0, 0, 4, 2).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]);
    }

    #[test]
    fn test_reverse_direction() {
        let cells: Vec<_> = trace_line(2, 2, -1, 0).collect();
        assert_eq!(cells, vec![(2, 2), (1, 1), (0, 1), (-1, 0)]);
    }

    #[test]
    fn test_single_point() {
        let cells: Vec<_> = trace_line(7, -3, 7, -3).collect();
        assert_eq!(cells, vec![(7, -3)]);
    }

    #[test]
    fn test_line_is_contiguous() {
        let cells: Vec<_> = trace_line(-10, 4, 23, -17).collect();
        assert_eq!(cells.first(), Some(&(-10, 4)));
        assert_eq!(cells.last(), Some(&(23, -17)));
        // Dominant axis length + 1 cells, each step moves at most one cell per axis
        assert_eq!(cells.len(), 34);
        for pair in cells.windows(2) {
            assert!((pair[1].0 - pair[0].0).abs() <= 1);
            assert!((pair[1].1 - pair[0].1).abs() <= 1);
        }
    }

    #[test]
    fn test_iterator_is_exhausted() {
        let mut trace = trace_line(0, 0, 1, 0);
        assert_eq!(trace.next(), Some((0, 0)));
        assert_eq!(trace.next(), Some((1, 0)));
        assert_eq!(trace.next(), None);
        assert_eq!(trace.next(), None);
    }

    #[test]
    fn test_wall_extrudes_columns() {
        let positions = wall(0, 0, 2, 0, 64, 3);
        assert_eq!(positions.len(), 9);
        assert_eq!(positions[0], Position::new(0, 64, 0));
        assert_eq!(positions[2], Position::new(0, 66, 0));
        assert_eq!(positions[3], Position::new(1, 64, 0));
        assert_eq!(positions[8], Position::new(2, 66, 0));
    }

    #[test]
    fn test_wall_zero_height() {
        assert!(wall(0, 0, 10, 10, 64, 0).is_empty());
        assert!(wall(0, 0, 10, 10, 64, -2).is_empty());
    }
}
