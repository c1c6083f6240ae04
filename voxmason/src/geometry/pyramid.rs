//! Hollow stepped pyramids.

use super::Position;

/// Number of cells [`pyramid`] emits for `size`.
pub fn pyramid_cell_count(size: i32) -> u64 {
    // Perimeter of a square with half-width h is 8h cells
    (1..=size.max(0) as u64).map(|h| 8 * h).sum()
}

/// Generate a hollow stepped pyramid standing on `base`.
///
/// Layer `l` (for `l` in `0..size`) is the perimeter of a square of
/// half-width `size - l` centred over `base`, one cell higher than the layer
/// below. A non-positive size yields nothing.
pub fn pyramid(base: Position, size: i32) -> Vec<Position> {
    let mut positions = Vec::with_capacity(pyramid_cell_count(size) as usize);

    for layer in 0..size.max(0) {
        let half = size - layer;
        for dx in -half..=half {
            for dz in -half..=half {
                if dx.abs() == half || dz.abs() == half {
                    positions.push(base.offset(dx, layer, dz));
                }
            }
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let base = Position::new(0, 64, 0);
        assert_eq!(pyramid(base, 1).len(), 8);
        assert_eq!(pyramid(base, 2).len(), 24);
        assert_eq!(pyramid(base, 3).len(), 48);
        assert_eq!(pyramid_cell_count(3), 48);
    }

    #[test]
    fn test_layers_shrink_and_rise() {
        let base = Position::new(10, 64, 10);
        let size = 4;
        for p in pyramid(base, size) {
            let layer = p.y - base.y;
            assert!((0..size).contains(&layer));
            let half = size - layer;
            let (dx, dz) = ((p.x - base.x).abs(), (p.z - base.z).abs());
            assert!(dx == half || dz == half);
            assert!(dx <= half && dz <= half);
        }
    }

    #[test]
    fn test_no_duplicates() {
        let cells = pyramid(Position::default(), 6);
        let distinct: std::collections::HashSet<_> = cells.iter().collect();
        assert_eq!(distinct.len(), cells.len());
    }

    #[test]
    fn test_non_positive_size() {
        assert!(pyramid(Position::default(), 0).is_empty());
        assert!(pyramid(Position::default(), -3).is_empty());
        assert_eq!(pyramid_cell_count(-3), 0);
    }
}
