//! Single-threaded batch loop.
//!
//! One run drains one queue:
//!
//! ```text
//!   ┌─► deadline passed? ──yes──► discard the rest, count it as failed ─┐
//!   │        │ no                                                        │
//!   │   dequeue ≤ batch_size                                             │
//!   │        │                                                           │
//!   │   apply each (span "batch_apply"), record regions                  │
//!   │        │                                                           │
//!   │   threshold reached? ──yes──► flush dirty regions                  │
//!   │        │                                                           │
//!   └─── requests left from the start                                    │
//!                                                                        ▼
//!                                                 final flush, PlacementResult
//! ```
//!
//! The loop runs on Tokio's blocking pool. It never yields between cells, so
//! timeout and cancellation are observed at batch boundaries only.

use super::{CellWriter, EngineConfig, EngineError, PlacementResult, RunTermination};
use crate::coalesce::{NoOpRegionSink, RegionCoalescer, RegionSink};
use crate::coord::RegionKey;
use crate::log::{Logger, TracingLogger};
use crate::profile::{NoOpProfiler, Profiler, BATCH_APPLY_SPAN, REGION_FLUSH_SPAN};
use crate::queue::{MutationQueue, MutationRequest};
use crate::{log_debug, log_error, log_info, log_warn};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Drains mutation queues into a cell writer.
///
/// Cloning is cheap; clones share the writer, sink, logger and profiler.
///
/// # Example
///
/// ```ignore
/// let processor = BatchProcessor::new(grid.clone())
///     .with_sink(Arc::new(renderer))
///     .with_logger(Arc::new(TracingLogger));
///
/// let queue = Arc::new(MutationQueue::new());
/// queue.enqueue_positions(positions, &stone);
/// let result = processor.place_all(queue, Duration::from_secs(30)).await?;
/// ```
pub struct BatchProcessor<V> {
    writer: Arc<dyn CellWriter<V>>,
    sink: Arc<dyn RegionSink>,
    config: EngineConfig,
    logger: Arc<dyn Logger>,
    profiler: Arc<dyn Profiler>,
}

impl<V> Clone for BatchProcessor<V> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            sink: Arc::clone(&self.sink),
            config: self.config.clone(),
            logger: Arc::clone(&self.logger),
            profiler: Arc::clone(&self.profiler),
        }
    }
}

impl<V> std::fmt::Debug for BatchProcessor<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchProcessor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Per-batch or per-run outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ApplyCounts {
    pub succeeded: usize,
    pub failed: usize,
}

impl ApplyCounts {
    pub(crate) fn add(&mut self, other: ApplyCounts) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

/// True once `deadline` is in the past. `None` never expires.
#[inline]
pub(crate) fn deadline_passed(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|deadline| Instant::now() >= deadline)
}

impl<V: Send + Sync + 'static> BatchProcessor<V> {
    /// Create a processor with default configuration, no region sink, a
    /// `tracing`-backed logger and no profiling.
    pub fn new(writer: Arc<dyn CellWriter<V>>) -> Self {
        Self {
            writer,
            sink: Arc::new(NoOpRegionSink),
            config: EngineConfig::default(),
            logger: Arc::new(TracingLogger),
            profiler: Arc::new(NoOpProfiler),
        }
    }

    /// Set the dirty-region sink.
    pub fn with_sink(mut self, sink: Arc<dyn RegionSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Set the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the logger.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Set the profiler.
    pub fn with_profiler(mut self, profiler: Arc<dyn Profiler>) -> Self {
        self.profiler = profiler;
        self
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Drain `queue`, stopping at the first batch boundary after `timeout`.
    ///
    /// Requests still queued when the deadline passes are dropped, counted as
    /// failed, and the queue is left empty. Already-applied writes are kept.
    ///
    /// # Errors
    ///
    /// Returns an error only if the configuration is invalid or the worker
    /// panics. Individual write failures are reported in the result.
    pub async fn place_all(
        &self,
        queue: Arc<MutationQueue<V>>,
        timeout: Duration,
    ) -> Result<PlacementResult, EngineError> {
        self.place_all_with_cancel(queue, timeout, CancellationToken::new())
            .await
    }

    /// Like [`place_all`](Self::place_all), but also stops at the next batch
    /// boundary once `cancel` is triggered.
    pub async fn place_all_with_cancel(
        &self,
        queue: Arc<MutationQueue<V>>,
        timeout: Duration,
        cancel: CancellationToken,
    ) -> Result<PlacementResult, EngineError> {
        self.config.validate()?;

        let processor = self.clone();
        tokio::task::spawn_blocking(move || processor.run(&queue, timeout, &cancel))
            .await
            .map_err(EngineError::from_join)
    }

    /// The blocking run loop.
    ///
    /// Only the requests queued at the start belong to the run. If the cell
    /// writer panics, the run's unapplied requests are discarded and the
    /// regions already written are flushed before the panic resumes.
    fn run(
        &self,
        queue: &MutationQueue<V>,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> PlacementResult {
        let started = Instant::now();
        let deadline = started.checked_add(timeout);
        let total_requested = queue.len();
        let mut remaining = total_requested;
        let mut counts = ApplyCounts::default();
        let mut coalescer =
            RegionCoalescer::new(self.config.region_update_threshold, self.config.region_shift);
        let mut batches = 0usize;

        log_info!(
            self.logger,
            "Placement run started: {} requests, batch size {}, timeout {}ms",
            total_requested,
            self.config.batch_size,
            timeout.as_millis()
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| loop {
            if remaining == 0 {
                break RunTermination::Drained;
            }
            if cancel.is_cancelled() {
                break RunTermination::Cancelled;
            }
            if deadline_passed(deadline) {
                break RunTermination::TimedOut;
            }

            let batch = queue.dequeue_batch(self.config.batch_size.min(remaining));
            if batch.is_empty() {
                // Someone else drained the queue; the rest count as failed below.
                break RunTermination::Drained;
            }
            remaining -= batch.len();

            let span = self.profiler.start_span(BATCH_APPLY_SPAN);
            for request in &batch {
                if self.apply_request(request) {
                    counts.succeeded += 1;
                    coalescer.record(request.position);
                } else {
                    counts.failed += 1;
                }
            }
            span.end();
            batches += 1;

            if coalescer.is_due() {
                self.flush(&mut coalescer);
            }
        }));

        let termination = match outcome {
            Ok(termination) => termination,
            Err(payload) => {
                let dropped = queue.discard(remaining);
                log_error!(
                    self.logger,
                    "Placement worker panicked after {} applied writes: {} requests dropped",
                    counts.succeeded,
                    dropped
                );
                self.flush(&mut coalescer);
                panic::resume_unwind(payload);
            }
        };

        if termination != RunTermination::Drained {
            queue.discard(remaining);
            match termination {
                RunTermination::TimedOut => log_error!(
                    self.logger,
                    "Placement run timed out after {}ms: {} applied, {} requests dropped",
                    started.elapsed().as_millis(),
                    counts.succeeded,
                    remaining
                ),
                _ => log_warn!(
                    self.logger,
                    "Placement run cancelled: {} applied, {} requests dropped",
                    counts.succeeded,
                    remaining
                ),
            }
        }
        counts.failed += remaining;

        self.flush(&mut coalescer);

        let result = PlacementResult {
            total_requested,
            succeeded: counts.succeeded,
            failed: counts.failed,
            duration: started.elapsed(),
            termination,
        };
        let stats = coalescer.stats();
        log_info!(
            self.logger,
            "Placement run finished after {} batches and {} region flushes ({:.1} writes per region): {}",
            batches,
            stats.flushes,
            stats.writes_per_region(),
            result
        );
        result
    }

    /// Apply one request, logging rejections and failures.
    ///
    /// Returns true if the write took effect.
    pub(crate) fn apply_request(&self, request: &MutationRequest<V>) -> bool {
        match self.writer.apply(request.position, &request.value) {
            Ok(true) => true,
            Ok(false) => {
                log_warn!(self.logger, "Write to {} rejected", request.position);
                false
            }
            Err(e) => {
                log_warn!(self.logger, "Write to {} failed: {}", request.position, e);
                false
            }
        }
    }

    /// Notify the sink of pending dirty regions.
    pub(crate) fn flush(&self, coalescer: &mut RegionCoalescer) {
        let regions = coalescer.take_pending();
        self.notify_regions(&regions);
    }

    /// Send an already collected region set to the sink.
    pub(crate) fn notify_regions(&self, regions: &HashSet<RegionKey>) {
        let span = self.profiler.start_span(REGION_FLUSH_SPAN);
        self.sink.notify_dirty_regions(regions);
        span.end();
        log_debug!(self.logger, "Flushed {} dirty regions", regions.len());
    }

    pub(crate) fn profiler(&self) -> &dyn Profiler {
        self.profiler.as_ref()
    }

    pub(crate) fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }
}
