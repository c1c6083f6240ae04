//! Semaphore bound on batches in flight.
//!
//! The parallel variant acquires one permit per batch *before* handing the
//! batch to a blocking worker, so at most `max_concurrent` batches are being
//! applied at any moment. In-flight and peak counts are tracked for tuning
//! and for asserting the bound in tests.
//!
//! ```ignore
//! let limiter = BatchLimiter::new(4);
//! let permit = limiter.acquire().await?;
//! tokio::task::spawn_blocking(move || {
//!     let _permit = permit;
//!     // apply batch
//! });
//! ```

use super::EngineError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting limiter for concurrently applied batches.
#[derive(Debug)]
pub struct BatchLimiter {
    semaphore: Arc<Semaphore>,

    max_permits: usize,

    /// Shared with permits so they can decrement on drop from any thread
    in_flight: Arc<AtomicUsize>,

    peak_in_flight: AtomicUsize,
}

impl BatchLimiter {
    /// Create a limiter allowing `max_concurrent` batches at once.
    ///
    /// Zero is raised to one.
    pub fn new(max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_permits: max_concurrent,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Wait for a permit.
    ///
    /// The permit is owned, so it can move into a blocking worker and is
    /// released when dropped there.
    pub async fn acquire(&self) -> Result<BatchPermit, EngineError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| EngineError::LimiterClosed)?;

        Ok(self.track(permit))
    }

    /// Take a permit if one is free right now.
    pub fn try_acquire(&self) -> Option<BatchPermit> {
        let permit = self.semaphore.clone().try_acquire_owned().ok()?;
        Some(self.track(permit))
    }

    fn track(&self, permit: OwnedSemaphorePermit) -> BatchPermit {
        let current = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.update_peak(current);

        BatchPermit {
            _permit: permit,
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    fn update_peak(&self, current: usize) {
        let mut peak = self.peak_in_flight.load(Ordering::Relaxed);
        while current > peak {
            match self.peak_in_flight.compare_exchange_weak(
                peak,
                current,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(p) => peak = p,
            }
        }
    }

    /// Close the semaphore; pending and future acquires fail.
    pub fn close(&self) {
        self.semaphore.close();
    }

    /// Maximum batches allowed in flight.
    pub fn max_concurrent(&self) -> usize {
        self.max_permits
    }

    /// Batches currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Highest in-flight count observed.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Relaxed)
    }

    /// Permits currently free.
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Permission to apply one batch. Released on drop.
#[derive(Debug)]
pub struct BatchPermit {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for BatchPermit {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_limiter() {
        let limiter = BatchLimiter::new(4);
        assert_eq!(limiter.max_concurrent(), 4);
        assert_eq!(limiter.in_flight(), 0);
        assert_eq!(limiter.available_permits(), 4);
    }

    #[test]
    fn test_zero_raised_to_one() {
        assert_eq!(BatchLimiter::new(0).max_concurrent(), 1);
    }

    #[tokio::test]
    async fn test_acquire_releases_on_drop() {
        let limiter = BatchLimiter::new(2);

        {
            let _first = limiter.acquire().await.unwrap();
            assert_eq!(limiter.available_permits(), 1);
            {
                let _second = limiter.acquire().await.unwrap();
                assert_eq!(limiter.available_permits(), 0);
                assert_eq!(limiter.in_flight(), 2);
            }
            assert_eq!(limiter.in_flight(), 1);
        }

        assert_eq!(limiter.available_permits(), 2);
        assert_eq!(limiter.in_flight(), 0);
        assert_eq!(limiter.peak_in_flight(), 2);
    }

    #[tokio::test]
    async fn test_try_acquire() {
        let limiter = BatchLimiter::new(1);

        let first = limiter.try_acquire();
        assert!(first.is_some());
        assert!(limiter.try_acquire().is_none());

        drop(first);
        assert!(limiter.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_closed_limiter_errors() {
        let limiter = BatchLimiter::new(1);
        limiter.close();
        assert!(matches!(
            limiter.acquire().await,
            Err(EngineError::LimiterClosed)
        ));
    }

    #[tokio::test]
    async fn test_permit_released_on_blocking_thread() {
        let limiter = Arc::new(BatchLimiter::new(3));
        let mut workers = tokio::task::JoinSet::new();

        for _ in 0..9 {
            let permit = limiter.acquire().await.unwrap();
            workers.spawn_blocking(move || {
                let _permit = permit;
                std::thread::sleep(Duration::from_millis(5));
            });
        }
        while let Some(joined) = workers.join_next().await {
            joined.unwrap();
        }

        assert_eq!(limiter.in_flight(), 0);
        assert!(limiter.peak_in_flight() <= 3);
        assert!(limiter.peak_in_flight() >= 1);
    }
}
