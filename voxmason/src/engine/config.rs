//! Engine tuning knobs.

use super::EngineError;
use crate::coord::{DEFAULT_REGION_SHIFT, MAX_REGION_SHIFT};
use std::time::Duration;

/// Maximum requests applied between deadline checks.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Applied writes between dirty-region notifications.
pub const DEFAULT_REGION_UPDATE_THRESHOLD: usize = 10_000;

/// Wall-clock budget for one run.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Batches applied at once by the parallel variant.
pub const DEFAULT_MAX_CONCURRENT_BATCHES: usize = 4;

/// Configuration shared by every run of a processor.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use voxmason::engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_batch_size(500)
///     .with_run_timeout(Duration::from_secs(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum requests per batch
    pub batch_size: usize,
    /// Applied writes between dirty-region notifications
    pub region_update_threshold: usize,
    /// Deadline for a run started through the pattern builder
    pub run_timeout: Duration,
    /// Permits in the parallel variant's limiter
    pub max_concurrent_batches: usize,
    /// Bits dropped from `x`/`z` when computing region keys
    pub region_shift: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            region_update_threshold: DEFAULT_REGION_UPDATE_THRESHOLD,
            run_timeout: DEFAULT_RUN_TIMEOUT,
            max_concurrent_batches: DEFAULT_MAX_CONCURRENT_BATCHES,
            region_shift: DEFAULT_REGION_SHIFT,
        }
    }
}

impl EngineConfig {
    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the region update threshold.
    pub fn with_region_update_threshold(mut self, threshold: usize) -> Self {
        self.region_update_threshold = threshold;
        self
    }

    /// Set the run timeout.
    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }

    /// Set the parallel variant's concurrency.
    pub fn with_max_concurrent_batches(mut self, max: usize) -> Self {
        self.max_concurrent_batches = max;
        self
    }

    /// Set the region shift.
    pub fn with_region_shift(mut self, shift: u32) -> Self {
        self.region_shift = shift;
        self
    }

    /// Check that every knob has a usable value.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.batch_size == 0 {
            return Err(EngineError::InvalidConfig {
                field: "batch_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.region_update_threshold == 0 {
            return Err(EngineError::InvalidConfig {
                field: "region_update_threshold",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_concurrent_batches == 0 {
            return Err(EngineError::InvalidConfig {
                field: "max_concurrent_batches",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.region_shift > MAX_REGION_SHIFT {
            return Err(EngineError::InvalidConfig {
                field: "region_shift",
                reason: format!("must be at most {}", MAX_REGION_SHIFT),
            });
        }
        Ok(())
    }
}
