//! Horizontal circles.

use super::Position;

/// How a circle is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircleMode {
    /// Every cell inside the radius
    Filled,
    /// Midpoint-circle ring
    Outline,
}

/// Generate a circle in the horizontal plane through `center`.
///
/// Radius 0 yields the centre cell; a negative radius yields nothing.
pub fn circle(center: Position, radius: i32, mode: CircleMode) -> Vec<Position> {
    if radius < 0 {
        return Vec::new();
    }
    if radius == 0 {
        return vec![center];
    }

    match mode {
        CircleMode::Filled => filled(center, radius),
        CircleMode::Outline => outline(center, radius),
    }
}

fn filled(center: Position, radius: i32) -> Vec<Position> {
    let r2 = radius * radius;
    let side = (2 * radius + 1) as usize;
    let mut positions = Vec::with_capacity(side * side);

    for dx in -radius..=radius {
        for dz in -radius..=radius {
            if dx * dx + dz * dz <= r2 {
                positions.push(center.offset(dx, 0, dz));
            }
        }
    }
    positions
}

/// Midpoint circle, walking the first octant from `(r, 0)` and reflecting
/// each step into all eight octants. Cells on octant boundaries are emitted
/// more than once.
fn outline(center: Position, radius: i32) -> Vec<Position> {
    let mut positions = Vec::new();
    let mut x = radius;
    let mut z = 0;
    let mut decision = 1 - radius;

    while x >= z {
        positions.extend_from_slice(&[
            center.offset(x, 0, z),
            center.offset(z, 0, x),
            center.offset(-z, 0, x),
            center.offset(-x, 0, z),
            center.offset(-x, 0, -z),
            center.offset(-z, 0, -x),
            center.offset(z, 0, -x),
            center.offset(x, 0, -z),
        ]);

        z += 1;
        if decision < 0 {
            decision += 2 * z + 1;
        } else {
            x -= 1;
            decision += 2 * (z - x) + 1;
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn horizontal_d2(center: Position, p: &Position) -> i32 {
        let dx = p.x - center.x;
        let dz = p.z - center.z;
        dx * dx + dz * dz
    }

    #[test]
    fn test_filled_respects_radius() {
        let center = Position::new(10, 64, -10);
        for radius in 1..=12 {
            for p in circle(center, radius, CircleMode::Filled) {
                assert_eq!(p.y, 64);
                assert!(horizontal_d2(center, &p) <= radius * radius);
            }
        }
    }

    #[test]
    fn test_filled_counts() {
        let origin = Position::default();
        assert_eq!(circle(origin, 1, CircleMode::Filled).len(), 5);
        assert_eq!(circle(origin, 2, CircleMode::Filled).len(), 13);
        assert_eq!(circle(origin, 5, CircleMode::Filled).len(), 81);
    }

    #[test]
    fn test_outline_stays_on_ring() {
        let center = Position::new(-3, 70, 8);
        for radius in 1..=50 {
            let lower = (radius - 1) * (radius - 1);
            let upper = (radius + 1) * (radius + 1);
            for p in circle(center, radius, CircleMode::Outline) {
                let d2 = horizontal_d2(center, &p);
                assert!(
                    (lower..=upper).contains(&d2),
                    "radius {} produced {} with d2 {}",
                    radius,
                    p,
                    d2
                );
            }
        }
    }

    #[test]
    fn test_outline_is_eightfold_symmetric() {
        for radius in 1..=30 {
            let ring: HashSet<(i32, i32)> = circle(Position::default(), radius, CircleMode::Outline)
                .into_iter()
                .map(|p| (p.x, p.z))
                .collect();

            for &(a, b) in &ring {
                for reflected in [
                    (b, a),
                    (-a, b),
                    (a, -b),
                    (-a, -b),
                    (-b, a),
                    (b, -a),
                    (-b, -a),
                ] {
                    assert!(ring.contains(&reflected), "missing {:?}", reflected);
                }
            }
        }
    }

    #[test]
    fn test_outline_radius_one() {
        let ring: HashSet<Position> = circle(Position::default(), 1, CircleMode::Outline)
            .into_iter()
            .collect();
        let expected: HashSet<Position> = [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .map(|(x, z)| Position::new(x, 0, z))
            .collect();
        assert_eq!(ring, expected);
    }

    #[test]
    fn test_outline_emits_eight_per_step() {
        // r=5 walks 4 steps: (5,0) (5,1) (5,2) (4,3)
        assert_eq!(circle(Position::default(), 5, CircleMode::Outline).len(), 32);
    }

    #[test]
    fn test_degenerate_radius() {
        let center = Position::new(1, 2, 3);
        assert_eq!(circle(center, 0, CircleMode::Filled), vec![center]);
        assert_eq!(circle(center, 0, CircleMode::Outline), vec![center]);
        assert!(circle(center, -4, CircleMode::Filled).is_empty());
        assert!(circle(center, -4, CircleMode::Outline).is_empty());
    }
}
