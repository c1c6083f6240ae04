//! Pending write requests for a single run.
//!
//! A [`MutationQueue`] is created fresh for each run and drained by exactly
//! one [`crate::engine::BatchProcessor`] invocation. It is safe to share
//! between threads (the run drains it on a blocking worker while the creator
//! may still hold a handle), but it is never shared between concurrent runs.
//!
//! A run owns only the requests queued when it starts. Requests the creator
//! adds while the run is in progress stay queued for the next run.

use crate::coord::Position;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A single desired cell write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest<V> {
    /// Target cell
    pub position: Position,
    /// Opaque desired cell state
    pub value: V,
}

impl<V> MutationRequest<V> {
    /// Create a new request.
    pub fn new(position: Position, value: V) -> Self {
        Self { position, value }
    }
}

/// An ordered list of requests, at most `batch_size` long.
pub type Batch<V> = Vec<MutationRequest<V>>;

/// Thread-safe FIFO of pending requests.
///
/// # Example
///
/// ```
/// use voxmason::coord::Position;
/// use voxmason::queue::MutationQueue;
///
/// let queue = MutationQueue::new();
/// queue.enqueue(Position::new(0, 64, 0), "stone");
/// queue.enqueue(Position::new(1, 64, 0), "stone");
///
/// let batch = queue.dequeue_batch(10);
/// assert_eq!(batch.len(), 2);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug)]
pub struct MutationQueue<V> {
    pending: Mutex<VecDeque<MutationRequest<V>>>,
}

impl<V> Default for MutationQueue<V> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
        }
    }
}

impl<V> MutationQueue<V> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` requests.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Append one request.
    pub fn enqueue(&self, position: Position, value: V) {
        self.pending
            .lock()
            .push_back(MutationRequest::new(position, value));
    }

    /// Append many requests, preserving their order.
    pub fn enqueue_all<I>(&self, requests: I)
    where
        I: IntoIterator<Item = MutationRequest<V>>,
    {
        self.pending.lock().extend(requests);
    }

    /// Remove up to `max_size` requests from the front.
    ///
    /// Returns an empty batch when the queue is empty.
    pub fn dequeue_batch(&self, max_size: usize) -> Batch<V> {
        let mut pending = self.pending.lock();
        let take = max_size.min(pending.len());
        pending.drain(..take).collect()
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// True if no requests are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Drop up to `count` requests from the front, returning how many were
    /// dropped. Requests behind them are kept.
    pub fn discard(&self, count: usize) -> usize {
        let mut pending = self.pending.lock();
        let take = count.min(pending.len());
        pending.drain(..take);
        take
    }

    /// Drop every pending request, returning how many were dropped.
    pub fn clear(&self) -> usize {
        let mut pending = self.pending.lock();
        let dropped = pending.len();
        pending.clear();
        pending.shrink_to_fit();
        dropped
    }
}

impl<V: Clone> MutationQueue<V> {
    /// Append one request per position, all with the same value.
    pub fn enqueue_positions<I>(&self, positions: I, value: &V)
    where
        I: IntoIterator<Item = Position>,
    {
        let mut pending = self.pending.lock();
        pending.extend(
            positions
                .into_iter()
                .map(|position| MutationRequest::new(position, value.clone())),
        );
    }
}

impl<V> FromIterator<MutationRequest<V>> for MutationQueue<V> {
    fn from_iter<I: IntoIterator<Item = MutationRequest<V>>>(iter: I) -> Self {
        Self {
            pending: Mutex::new(iter.into_iter().collect()),
        }
    }
}
