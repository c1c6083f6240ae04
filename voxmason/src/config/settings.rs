//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use crate::builder::ShapeLimits;
use crate::engine::EngineConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Batch loop tuning
    pub engine: EngineSettings,
    /// Shape size caps
    pub limits: LimitSettings,
    /// Reference grid used by the CLI
    pub grid: GridSettings,
    /// Log file location
    pub logging: LoggingSettings,
}

/// `[engine]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub batch_size: usize,
    pub region_update_threshold: usize,
    /// Run deadline in milliseconds
    pub run_timeout_ms: u64,
    pub max_concurrent_batches: usize,
    pub region_shift: u32,
}

/// `[limits]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitSettings {
    pub max_radius: i32,
    pub max_wall_height: i32,
    pub max_box_width: i32,
    pub max_box_depth: i32,
    pub max_box_height: i32,
    pub max_cells: u64,
}

/// `[grid]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSettings {
    /// Lowest writable layer
    pub min_y: i32,
    /// Highest writable layer
    pub max_y: i32,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl From<&EngineSettings> for EngineConfig {
    fn from(settings: &EngineSettings) -> Self {
        EngineConfig {
            batch_size: settings.batch_size,
            region_update_threshold: settings.region_update_threshold,
            run_timeout: Duration::from_millis(settings.run_timeout_ms),
            max_concurrent_batches: settings.max_concurrent_batches,
            region_shift: settings.region_shift,
        }
    }
}

impl From<&LimitSettings> for ShapeLimits {
    fn from(settings: &LimitSettings) -> Self {
        ShapeLimits {
            max_radius: settings.max_radius,
            max_wall_height: settings.max_wall_height,
            max_box_width: settings.max_box_width,
            max_box_depth: settings.max_box_depth,
            max_box_height: settings.max_box_height,
            max_cells: settings.max_cells,
        }
    }
}

impl ConfigFile {
    /// Engine configuration built from the `[engine]` section.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::from(&self.engine)
    }

    /// Shape limits built from the `[limits]` section.
    pub fn shape_limits(&self) -> ShapeLimits {
        ShapeLimits::from(&self.limits)
    }
}
