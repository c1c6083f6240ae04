//! Dirty-region coalescing.
//!
//! Instead of notifying observers once per written cell, a run records the
//! [`RegionKey`] of every applied write and hands the accumulated set to a
//! [`RegionSink`] in bulk:
//!
//! ```text
//!   write ─► record(key) ─► pending set ──(threshold reached)──► sink
//!                                 │
//!                                 └──────(run complete)────────► sink
//! ```
//!
//! The threshold counts applied writes, not distinct regions. A run flushes
//! at least once per `threshold` applied writes and exactly once more when it
//! finishes.

use crate::coord::{Position, RegionKey};
use std::collections::HashSet;

/// Receiver of dirty-region notifications.
///
/// Typically a rendering or propagation layer that resends the listed
/// regions to observers.
pub trait RegionSink: Send + Sync {
    /// Regions written since the previous notification.
    fn notify_dirty_regions(&self, regions: &HashSet<RegionKey>);
}

impl<F> RegionSink for F
where
    F: Fn(&HashSet<RegionKey>) + Send + Sync,
{
    fn notify_dirty_regions(&self, regions: &HashSet<RegionKey>) {
        self(regions)
    }
}

/// Sink that ignores notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRegionSink;

impl RegionSink for NoOpRegionSink {
    fn notify_dirty_regions(&self, _regions: &HashSet<RegionKey>) {}
}

/// Statistics for one coalescer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoalescerStats {
    /// Writes recorded over the coalescer's lifetime
    pub recorded_writes: u64,
    /// Notifications sent to the sink
    pub flushes: u64,
    /// Sum of region-set sizes over all notifications
    pub regions_notified: u64,
}

impl CoalescerStats {
    /// Average writes folded into each notified region (0.0 when nothing was notified).
    pub fn writes_per_region(&self) -> f64 {
        if self.regions_notified == 0 {
            0.0
        } else {
            self.recorded_writes as f64 / self.regions_notified as f64
        }
    }
}

/// Accumulates dirty regions for one run and decides when to flush.
#[derive(Debug)]
pub struct RegionCoalescer {
    pending: HashSet<RegionKey>,
    writes_since_flush: usize,
    threshold: usize,
    region_shift: u32,
    stats: CoalescerStats,
}

impl RegionCoalescer {
    /// Create a coalescer flushing every `threshold` applied writes.
    ///
    /// A zero threshold is treated as 1.
    pub fn new(threshold: usize, region_shift: u32) -> Self {
        Self {
            pending: HashSet::new(),
            writes_since_flush: 0,
            threshold: threshold.max(1),
            region_shift,
            stats: CoalescerStats::default(),
        }
    }

    /// Record one applied write.
    #[inline]
    pub fn record(&mut self, position: Position) {
        self.pending
            .insert(RegionKey::with_shift(position, self.region_shift));
        self.writes_since_flush += 1;
        self.stats.recorded_writes += 1;
    }

    /// Fold a worker's locally collected regions into this coalescer.
    ///
    /// `applied` is the number of successful writes those regions represent.
    pub fn merge(&mut self, regions: HashSet<RegionKey>, applied: usize) {
        if self.pending.is_empty() {
            self.pending = regions;
        } else {
            self.pending.extend(regions);
        }
        self.writes_since_flush += applied;
        self.stats.recorded_writes += applied as u64;
    }

    /// True once `threshold` writes were applied since the last flush.
    #[inline]
    pub fn is_due(&self) -> bool {
        self.writes_since_flush >= self.threshold
    }

    /// Take the pending set and reset the write count.
    ///
    /// Counts as one flush in [`stats`](Self::stats). Callers that share the
    /// coalescer behind a lock take the set under the lock and notify the
    /// sink after releasing it.
    pub fn take_pending(&mut self) -> HashSet<RegionKey> {
        let regions = std::mem::take(&mut self.pending);
        self.stats.flushes += 1;
        self.stats.regions_notified += regions.len() as u64;
        self.writes_since_flush = 0;
        regions
    }

    /// Regions waiting for the next flush.
    pub fn pending_regions(&self) -> usize {
        self.pending.len()
    }

    /// Writes applied since the last flush.
    pub fn writes_since_flush(&self) -> usize {
        self.writes_since_flush
    }

    /// Lifetime statistics.
    pub fn stats(&self) -> CoalescerStats {
        self.stats
    }
}
