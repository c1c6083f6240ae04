//! Optional profiling spans around hot sections.
//!
//! The batch loop opens a span around each batch it applies. Embedding
//! applications that have their own profiler plug it in through the
//! [`Profiler`] trait; the default [`NoOpProfiler`] costs nothing.
//!
//! ```
//! use voxmason::profile::{NoOpProfiler, Profiler};
//!
//! let profiler = NoOpProfiler;
//! let span = profiler.start_span("batch_apply");
//! // ... hot section ...
//! span.end();
//! ```

use std::time::Instant;

/// Span name used around each applied batch.
pub const BATCH_APPLY_SPAN: &str = "batch_apply";

/// Span name used around each dirty-region flush.
pub const REGION_FLUSH_SPAN: &str = "region_flush";

/// Source of profiling spans.
pub trait Profiler: Send + Sync {
    /// Open a span. It closes when the returned guard is ended or dropped.
    fn start_span(&self, name: &'static str) -> ProfileSpan;
}

/// An open profiling span.
///
/// Closing is idempotent: [`ProfileSpan::end`] consumes the guard, and drop
/// closes it if `end` was never called.
#[must_use = "a span closes as soon as it is dropped"]
pub struct ProfileSpan {
    on_end: Option<Box<dyn FnOnce()>>,
}

impl ProfileSpan {
    /// A span that does nothing when closed.
    pub fn noop() -> Self {
        Self { on_end: None }
    }

    /// A span that runs `on_end` exactly once when closed.
    pub fn new(on_end: impl FnOnce() + 'static) -> Self {
        Self {
            on_end: Some(Box::new(on_end)),
        }
    }

    /// Close the span.
    pub fn end(mut self) {
        self.close();
    }

    fn close(&mut self) {
        if let Some(on_end) = self.on_end.take() {
            on_end();
        }
    }
}

impl Drop for ProfileSpan {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ProfileSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileSpan")
            .field("open", &self.on_end.is_some())
            .finish()
    }
}

/// Profiler that opens no spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProfiler;

impl Profiler for NoOpProfiler {
    #[inline]
    fn start_span(&self, _name: &'static str) -> ProfileSpan {
        ProfileSpan::noop()
    }
}

/// Profiler backed by `tracing` spans.
///
/// Each span is entered on the current thread and reports its elapsed time
/// at trace level when closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProfiler;

impl Profiler for TracingProfiler {
    fn start_span(&self, name: &'static str) -> ProfileSpan {
        let entered = tracing::trace_span!("profile", section = name).entered();
        let started = Instant::now();
        ProfileSpan::new(move || {
            tracing::trace!(
                section = name,
                elapsed_us = started.elapsed().as_micros() as u64,
                "profile section closed"
            );
            drop(entered);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_end_runs_callback_once() {
        let closed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&closed);
        let span = ProfileSpan::new(move || counter.set(counter.get() + 1));

        span.end();
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_drop_closes_span() {
        let closed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&closed);
        {
            let _span = ProfileSpan::new(move || flag.set(true));
            assert!(!closed.get());
        }
        assert!(closed.get());
    }

    #[test]
    fn test_noop_profiler() {
        let span = NoOpProfiler.start_span(BATCH_APPLY_SPAN);
        assert_eq!(format!("{:?}", span), "ProfileSpan { open: false }");
        span.end();
    }

    #[test]
    fn test_tracing_profiler_without_subscriber() {
        let span = TracingProfiler.start_span(REGION_FLUSH_SPAN);
        assert_eq!(format!("{:?}", span), "ProfileSpan { open: true }");
        span.end();
    }

    #[test]
    fn test_profilers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoOpProfiler>();
        assert_send_sync::<TracingProfiler>();
    }
}
