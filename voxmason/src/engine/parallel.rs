//! Semaphore-bounded parallel variant of the batch loop.
//!
//! Batches are dequeued on the async side and handed to blocking workers,
//! at most `max_concurrent_batches` at a time. Each worker re-sorts its batch
//! by region key (stable, so same-region writes keep their order) before
//! applying it. Cross-batch order is not preserved, so duplicate positions
//! in different batches may resolve in either order.
//!
//! Dirty regions are collected per worker and merged into one coalescer
//! shared behind a mutex. The threshold and the final flush behave exactly
//! as in the single-threaded loop, but the sink is always called outside
//! the lock so a slow sink does not stall other workers.
//!
//! If a worker panics, dispatch stops, the run's remaining requests are
//! discarded and the regions already written are flushed before the panic
//! is returned as [`EngineError::WorkerPanicked`].

use super::processor::{deadline_passed, ApplyCounts};
use super::{BatchLimiter, BatchProcessor, EngineError, PlacementResult, RunTermination};
use crate::coalesce::RegionCoalescer;
use crate::coord::RegionKey;
use crate::profile::BATCH_APPLY_SPAN;
use crate::queue::{Batch, MutationQueue};
use crate::{log_debug, log_error, log_info, log_warn};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

impl<V: Send + Sync + 'static> BatchProcessor<V> {
    /// Drain `queue` with up to `max_concurrent_batches` batches in flight.
    ///
    /// Same contract as [`place_all`](Self::place_all): batches not started
    /// before the deadline are dropped and counted as failed.
    pub async fn place_parallel(
        &self,
        queue: Arc<MutationQueue<V>>,
        timeout: Duration,
    ) -> Result<PlacementResult, EngineError> {
        let limiter = Arc::new(BatchLimiter::new(self.config().max_concurrent_batches));
        self.place_parallel_with(queue, timeout, CancellationToken::new(), limiter)
            .await
    }

    /// Parallel run with an explicit cancellation token and limiter.
    ///
    /// Passing a shared limiter bounds the combined concurrency of several
    /// runs and exposes its in-flight statistics to the caller.
    pub async fn place_parallel_with(
        &self,
        queue: Arc<MutationQueue<V>>,
        timeout: Duration,
        cancel: CancellationToken,
        limiter: Arc<BatchLimiter>,
    ) -> Result<PlacementResult, EngineError> {
        self.config().validate()?;

        let started = Instant::now();
        let deadline = started.checked_add(timeout);
        let total_requested = queue.len();
        let mut remaining = total_requested;
        let batch_size = self.config().batch_size;
        let coalescer = Arc::new(Mutex::new(RegionCoalescer::new(
            self.config().region_update_threshold,
            self.config().region_shift,
        )));
        // Tripped by a worker whose writer panicked.
        let fault = CancellationToken::new();

        log_info!(
            self.logger(),
            "Parallel placement started: {} requests, batch size {}, {} workers",
            total_requested,
            batch_size,
            limiter.max_concurrent()
        );

        let mut workers = JoinSet::new();
        let mut dropped = 0usize;
        let mut spawned = 0usize;
        let mut limiter_error = None;

        let termination = loop {
            if remaining == 0 {
                break RunTermination::Drained;
            }
            let batch = queue.dequeue_batch(batch_size.min(remaining));
            if batch.is_empty() {
                break RunTermination::Drained;
            }
            remaining -= batch.len();

            let permit = match limiter.acquire().await {
                Ok(permit) => permit,
                Err(e) => {
                    limiter_error = Some(e);
                    dropped += batch.len();
                    break RunTermination::Cancelled;
                }
            };

            if cancel.is_cancelled() || fault.is_cancelled() {
                dropped += batch.len();
                break RunTermination::Cancelled;
            }
            if deadline_passed(deadline) {
                dropped += batch.len();
                break RunTermination::TimedOut;
            }

            let processor = self.clone();
            let coalescer = Arc::clone(&coalescer);
            let fault = fault.clone();
            workers.spawn_blocking(move || {
                let _permit = permit;
                processor.apply_parallel_batch(batch, &coalescer, &fault)
            });
            spawned += 1;
        };

        if termination != RunTermination::Drained {
            queue.discard(remaining);
            dropped += remaining;
        }

        // Workers already spawned keep running on the blocking pool; wait for
        // them so no write lands after we return.
        let mut counts = ApplyCounts::default();
        let mut worker_error = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(batch_counts) => counts.add(batch_counts),
                Err(e) => {
                    if worker_error.is_none() {
                        worker_error = Some(EngineError::from_join(e));
                    }
                }
            }
        }

        if let Some(err) = worker_error.or(limiter_error) {
            log_error!(
                self.logger(),
                "Parallel placement aborted after {} applied writes: {}; {} requests dropped",
                counts.succeeded,
                err,
                dropped
            );
            let regions = coalescer.lock().take_pending();
            self.notify_regions(&regions);
            return Err(err);
        }

        match termination {
            RunTermination::TimedOut => log_error!(
                self.logger(),
                "Parallel placement timed out after {}ms: {} requests dropped",
                started.elapsed().as_millis(),
                dropped
            ),
            RunTermination::Cancelled => log_warn!(
                self.logger(),
                "Parallel placement cancelled: {} requests dropped",
                dropped
            ),
            RunTermination::Drained => {}
        }
        counts.failed += dropped;

        let (regions, stats) = {
            let mut coalescer = coalescer.lock();
            let regions = coalescer.take_pending();
            (regions, coalescer.stats())
        };
        self.notify_regions(&regions);

        let result = PlacementResult {
            total_requested,
            succeeded: counts.succeeded,
            failed: counts.failed,
            duration: started.elapsed(),
            termination,
        };
        log_info!(
            self.logger(),
            "Parallel placement finished after {} batches (peak {} in flight), {} region flushes ({:.1} writes per region): {}",
            spawned,
            limiter.peak_in_flight(),
            stats.flushes,
            stats.writes_per_region(),
            result
        );
        Ok(result)
    }

    /// Apply one batch on a blocking worker.
    ///
    /// The shared coalescer is locked only to merge and take the pending set;
    /// the sink is notified after the lock is released. A panicking writer
    /// still merges the regions written so far and trips `fault` before the
    /// panic resumes.
    fn apply_parallel_batch(
        &self,
        mut batch: Batch<V>,
        coalescer: &Mutex<RegionCoalescer>,
        fault: &CancellationToken,
    ) -> ApplyCounts {
        let shift = self.config().region_shift;
        batch.sort_by_key(|request| RegionKey::with_shift(request.position, shift));

        let mut counts = ApplyCounts::default();
        let mut regions = HashSet::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let span = self.profiler().start_span(BATCH_APPLY_SPAN);
            for request in &batch {
                if self.apply_request(request) {
                    counts.succeeded += 1;
                    regions.insert(RegionKey::with_shift(request.position, shift));
                } else {
                    counts.failed += 1;
                }
            }
            span.end();
        }));

        let region_count = regions.len();
        let due = {
            let mut coalescer = coalescer.lock();
            coalescer.merge(regions, counts.succeeded);
            (outcome.is_ok() && coalescer.is_due()).then(|| coalescer.take_pending())
        };

        if let Err(payload) = outcome {
            fault.cancel();
            panic::resume_unwind(payload);
        }

        log_debug!(
            self.logger(),
            "Batch applied: {} ok, {} failed, {} regions",
            counts.succeeded,
            counts.failed,
            region_count
        );
        if let Some(regions) = due {
            self.notify_regions(&regions);
        }
        counts
    }
}
