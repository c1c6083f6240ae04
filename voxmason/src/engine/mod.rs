//! The placement engine.
//!
//! [`BatchProcessor`] drains a [`MutationQueue`](crate::queue::MutationQueue)
//! into a [`CellWriter`] in bounded batches, coalescing dirty-region
//! notifications and enforcing a wall-clock deadline. The parallel variant
//! (`place_parallel`) fans batches out to blocking workers bounded by a
//! [`BatchLimiter`].

mod config;
mod error;
mod limiter;
mod parallel;
mod processor;
mod result;
mod writer;

pub use config::{
    EngineConfig, DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENT_BATCHES,
    DEFAULT_REGION_UPDATE_THRESHOLD, DEFAULT_RUN_TIMEOUT,
};
pub use error::EngineError;
pub use limiter::{BatchLimiter, BatchPermit};
pub use processor::BatchProcessor;
pub use result::{PlacementResult, RunTermination};
pub use writer::{CellWriteError, CellWriter};
