//! Ground level lookup for walls without an explicit base.

/// Ground level used when nothing else is known.
pub const DEFAULT_GROUND_LEVEL: i32 = 64;

/// Finds the layer a structure standing on column (`x`, `z`) starts at.
///
/// Returns the first free layer above the topmost occupied cell, or `None`
/// when the column is empty or unknown.
pub trait GroundLookup: Send + Sync {
    fn ground_level(&self, x: i32, z: i32) -> Option<i32>;
}

impl<F> GroundLookup for F
where
    F: Fn(i32, i32) -> Option<i32> + Send + Sync,
{
    fn ground_level(&self, x: i32, z: i32) -> Option<i32> {
        self(x, z)
    }
}

/// Resolve the ground level of a column, falling back to
/// [`DEFAULT_GROUND_LEVEL`].
pub fn resolve_ground(lookup: Option<&dyn GroundLookup>, x: i32, z: i32) -> i32 {
    lookup
        .and_then(|lookup| lookup.ground_level(x, z))
        .unwrap_or(DEFAULT_GROUND_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_without_lookup() {
        assert_eq!(resolve_ground(None, 10, 10), 64);
    }

    #[test]
    fn test_lookup_result_used() {
        let lookup = |x: i32, _z: i32| if x > 0 { Some(71) } else { None };
        assert_eq!(resolve_ground(Some(&lookup), 1, 0), 71);
        assert_eq!(resolve_ground(Some(&lookup), -1, 0), DEFAULT_GROUND_LEVEL);
    }
}
