//! Error types for the placement engine.
//!
//! Per-cell failures never show up here: a rejected or failed write is
//! counted in [`super::PlacementResult::failed`] and logged. A timeout is not
//! an error either. Only faults that prevent a run from producing a result
//! cross the async boundary.

use crate::builder::ValidationError;
use thiserror::Error;
use tokio::task::JoinError;

/// Errors returned by placement operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Shape parameters were rejected before anything was enqueued
    #[error("invalid shape: {0}")]
    Validation(#[from] ValidationError),

    /// The blocking worker running the batch loop panicked
    #[error("placement worker panicked: {0}")]
    WorkerPanicked(String),

    /// The blocking worker was cancelled by the runtime before finishing
    #[error("placement worker cancelled")]
    WorkerCancelled,

    /// Engine configuration is unusable
    #[error("invalid engine configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// The batch limiter's semaphore was closed during a parallel run
    #[error("batch limiter closed")]
    LimiterClosed,
}

impl EngineError {
    /// Convert a failed `spawn_blocking` join into an engine error.
    pub(crate) fn from_join(err: JoinError) -> Self {
        if err.is_panic() {
            let payload = err.into_panic();
            let message = if let Some(message) = payload.downcast_ref::<&str>() {
                (*message).to_string()
            } else if let Some(message) = payload.downcast_ref::<String>() {
                message.clone()
            } else {
                "unknown panic payload".to_string()
            };
            EngineError::WorkerPanicked(message)
        } else {
            EngineError::WorkerCancelled
        }
    }
}
