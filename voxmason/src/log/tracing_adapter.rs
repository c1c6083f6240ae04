//! Tracing library adapter implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger implementation that delegates to the `tracing` crate.
///
/// Messages land in whatever subscriber the application installed; the CLI
/// uses [`crate::logging::init_logging`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new tracing logger adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "voxmason", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "voxmason", "{}", args),
            LogLevel::Info => tracing::info!(target: "voxmason", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "voxmason", "{}", args),
            LogLevel::Error => tracing::error!(target: "voxmason", "{}", args),
        }
    }
}
