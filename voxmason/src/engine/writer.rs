//! The single-cell write collaborator.

use crate::coord::Position;
use thiserror::Error;

/// Failure of a single cell write.
///
/// Never aborts a run: the loop counts it as failed and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellWriteError {
    /// Target lies outside the writable volume
    #[error("{0} is outside the writable volume")]
    OutOfBounds(Position),

    /// Target region is not available for writing
    #[error("region containing {0} is not loaded")]
    RegionUnavailable(Position),

    /// Storage backend reported a failure
    #[error("write to {position} failed: {reason}")]
    Backend { position: Position, reason: String },
}

/// Applies a single desired state to a single cell.
///
/// Returns `Ok(true)` when the write took effect, `Ok(false)` when the grid
/// declined it, and `Err` when the attempt failed. The engine calls this from
/// blocking worker threads and never holds a lock around it; implementations
/// provide their own synchronisation.
pub trait CellWriter<V>: Send + Sync {
    /// Write `value` to `position`.
    fn apply(&self, position: Position, value: &V) -> Result<bool, CellWriteError>;
}

impl<V, F> CellWriter<V> for F
where
    F: Fn(Position, &V) -> Result<bool, CellWriteError> + Send + Sync,
{
    fn apply(&self, position: Position, value: &V) -> Result<bool, CellWriteError> {
        self(position, value)
    }
}
