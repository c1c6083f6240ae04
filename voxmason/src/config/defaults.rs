//! Default values, valid ranges and the `ConfigFile::default()` implementation.

use super::settings::*;
use crate::builder::{
    DEFAULT_MAX_BOX_DEPTH, DEFAULT_MAX_BOX_HEIGHT, DEFAULT_MAX_BOX_WIDTH, DEFAULT_MAX_CELLS,
    DEFAULT_MAX_RADIUS, DEFAULT_MAX_WALL_HEIGHT,
};
use crate::coord::{DEFAULT_REGION_SHIFT, MAX_REGION_SHIFT};
use crate::engine::{
    DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENT_BATCHES, DEFAULT_REGION_UPDATE_THRESHOLD,
    DEFAULT_RUN_TIMEOUT,
};
use std::path::PathBuf;

// =============================================================================
// Engine ranges
// =============================================================================

/// Smallest accepted batch size.
pub const MIN_BATCH_SIZE: usize = 1;

/// Largest accepted batch size.
/// Larger batches delay timeout detection by the length of one batch.
pub const MAX_BATCH_SIZE: usize = 100_000;

/// Largest accepted number of concurrent batches.
pub const MAX_CONCURRENT_BATCHES: usize = 64;

// =============================================================================
// Grid defaults
// =============================================================================

/// Default lowest writable layer of the reference grid.
pub const DEFAULT_GRID_MIN_Y: i32 = -64;

/// Default highest writable layer of the reference grid.
pub const DEFAULT_GRID_MAX_Y: i32 = 319;

/// Default log file (~/.voxmason/voxmason.log).
pub fn default_log_file() -> PathBuf {
    super::file::config_directory().join("voxmason.log")
}

fn clamp_setting<T>(key: &'static str, value: T, min: T, max: T) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if value < min {
        tracing::warn!(
            key,
            requested = %value,
            min = %min,
            max = %max,
            "{} below minimum, clamping to {}",
            key,
            min
        );
        min
    } else if value > max {
        tracing::warn!(
            key,
            requested = %value,
            min = %min,
            max = %max,
            "{} above maximum, clamping to {}",
            key,
            max
        );
        max
    } else {
        value
    }
}

/// Clamp `batch_size` to `MIN_BATCH_SIZE..=MAX_BATCH_SIZE`, warning if changed.
pub(super) fn clamp_batch_size(value: usize) -> usize {
    clamp_setting("batch_size", value, MIN_BATCH_SIZE, MAX_BATCH_SIZE)
}

/// Clamp `region_shift` to `0..=MAX_REGION_SHIFT`, warning if changed.
pub(super) fn clamp_region_shift(value: u32) -> u32 {
    clamp_setting("region_shift", value, 0, MAX_REGION_SHIFT)
}

/// Clamp `max_concurrent_batches` to `1..=MAX_CONCURRENT_BATCHES`, warning if changed.
pub(super) fn clamp_concurrent_batches(value: usize) -> usize {
    clamp_setting("max_concurrent_batches", value, 1, MAX_CONCURRENT_BATCHES)
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            region_update_threshold: DEFAULT_REGION_UPDATE_THRESHOLD,
            run_timeout_ms: DEFAULT_RUN_TIMEOUT.as_millis() as u64,
            max_concurrent_batches: DEFAULT_MAX_CONCURRENT_BATCHES,
            region_shift: DEFAULT_REGION_SHIFT,
        }
    }
}

impl Default for LimitSettings {
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

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            min_y: DEFAULT_GRID_MIN_Y,
            max_y: DEFAULT_GRID_MAX_Y,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            limits: LimitSettings::default(),
            grid: GridSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_in_range_unchanged() {
        assert_eq!(clamp_batch_size(500), 500);
        assert_eq!(clamp_region_shift(4), 4);
        assert_eq!(clamp_concurrent_batches(8), 8);
    }

    #[test]
    fn test_clamp_out_of_range() {
        assert_eq!(clamp_batch_size(0), MIN_BATCH_SIZE);
        assert_eq!(clamp_batch_size(1_000_000), MAX_BATCH_SIZE);
        assert_eq!(clamp_region_shift(40), MAX_REGION_SHIFT);
        assert_eq!(clamp_concurrent_batches(0), 1);
        assert_eq!(clamp_concurrent_batches(500), MAX_CONCURRENT_BATCHES);
    }

    #[test]
    fn test_default_engine_settings_match_engine_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.engine_config(), crate::engine::EngineConfig::default());
        assert_eq!(config.shape_limits(), crate::builder::ShapeLimits::default());
    }

    #[test]
    fn test_default_log_file_in_config_directory() {
        let file = default_log_file();
        assert!(file.ends_with(".voxmason/voxmason.log"));
    }
}
