//! Transport call statistics

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Snapshot of transport calls made so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallStats {
    /// Number of completed calls
    pub count: u64,
    /// Total time spent in those calls
    pub elapsed: Duration,
}

impl CallStats {
    /// Average time per call; zero when no calls were made.
    pub fn average(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        let nanos = self.elapsed.as_nanos() / u128::from(self.count);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Lock-free accumulator of call counts and elapsed time.
#[derive(Debug, Default)]
pub struct CallStatsRecorder {
    count: AtomicU64,
    elapsed_nanos: AtomicU64,
}

impl CallStatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed call.
    pub fn record(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.elapsed_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CallStats {
        CallStats {
            count: self.count.load(Ordering::Relaxed),
            elapsed: Duration::from_nanos(self.elapsed_nanos.load(Ordering::Relaxed)),
        }
    }
}
