//! Outcome of a placement run.

use std::fmt;
use std::time::Duration;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunTermination {
    /// Every request was attempted
    Drained,
    /// The deadline passed; unattempted requests were dropped
    TimedOut,
    /// The caller cancelled; unattempted requests were dropped
    Cancelled,
}

impl fmt::Display for RunTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunTermination::Drained => write!(f, "drained"),
            RunTermination::TimedOut => write!(f, "timed out"),
            RunTermination::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Summary returned once per run.
///
/// `succeeded + failed == total_requested` always holds for a produced
/// result; dropped requests are counted as failed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementResult {
    /// Requests in the queue when the run started
    pub total_requested: usize,
    /// Writes that returned `Ok(true)`
    pub succeeded: usize,
    /// Rejected, errored and dropped requests
    pub failed: usize,
    /// Wall-clock time of the run
    pub duration: Duration,
    /// Why the run stopped
    pub termination: RunTermination,
}

impl PlacementResult {
    /// Result for a run with nothing to do.
    pub fn empty() -> Self {
        Self {
            total_requested: 0,
            succeeded: 0,
            failed: 0,
            duration: Duration::ZERO,
            termination: RunTermination::Drained,
        }
    }

    /// Duration in whole milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    /// Successful writes per second, or `0.0` for a zero-length run.
    pub fn rate(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.succeeded as f64 / secs
        } else {
            0.0
        }
    }

    /// Percentage of requests that succeeded, or `0.0` with no requests.
    pub fn success_rate(&self) -> f64 {
        if self.total_requested > 0 {
            self.succeeded as f64 / self.total_requested as f64 * 100.0
        } else {
            0.0
        }
    }

    /// True when nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for PlacementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "placed {}/{} cells ({} failed) in {}ms, {:.1} cells/s, {:.1}% success",
            self.succeeded,
            self.total_requested,
            self.failed,
            self.duration_ms(),
            self.rate(),
            self.success_rate()
        )?;
        if self.termination != RunTermination::Drained {
            write!(f, " [{}]", self.termination)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(succeeded: usize, failed: usize, millis: u64) -> PlacementResult {
        PlacementResult {
            total_requested: succeeded + failed,
            succeeded,
            failed,
            duration: Duration::from_millis(millis),
            termination: RunTermination::Drained,
        }
    }

    #[test]
    fn test_empty() {
        let empty = PlacementResult::empty();
        assert_eq!(empty.total_requested, 0);
        assert_eq!(empty.rate(), 0.0);
        assert_eq!(empty.success_rate(), 0.0);
        assert!(empty.is_success());
    }

    #[test]
    fn test_rate() {
        let r = result(500, 0, 250);
        assert_eq!(r.duration_ms(), 250);
        assert!((r.rate() - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_success_rate() {
        let r = result(3, 1, 10);
        assert!((r.success_rate() - 75.0).abs() < 1e-9);
        assert!(!r.is_success());
    }

    #[test]
    fn test_display_marks_truncated_runs() {
        let mut r = result(10, 0, 1000);
        assert_eq!(
            r.to_string(),
            "placed 10/10 cells (0 failed) in 1000ms, 10.0 cells/s, 100.0% success"
        );
        r.termination = RunTermination::TimedOut;
        assert!(r.to_string().ends_with("[timed out]"));
    }
}
