//! API call statistics reporting

use std::io::Write;

use crate::client::CallStats;
use crate::error::Result;

/// Writes cumulative transport statistics to the diagnostic stream.
pub struct StatsReporter<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> StatsReporter<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    /// Write one stats line if reporting is enabled.
    pub fn report(&mut self, stats: CallStats) -> Result<()> {
        if self.enabled {
            writeln!(self.out, "{}", format_stats(&stats))?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Format stats as `ApiStats: count=<n> time=<secs> avgTime=<secs>`.
pub fn format_stats(stats: &CallStats) -> String {
    format!(
        "ApiStats: count={} time={:.3} avgTime={:.3}",
        stats.count,
        stats.elapsed.as_secs_f64(),
        stats.average().as_secs_f64()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_zero_calls() {
        assert_eq!(
            format_stats(&CallStats::default()),
            "ApiStats: count=0 time=0.000 avgTime=0.000"
        );
    }

    #[test]
    fn test_average() {
        let stats = CallStats {
            count: 4,
            elapsed: Duration::from_secs(2),
        };
        assert_eq!(format_stats(&stats), "ApiStats: count=4 time=2.000 avgTime=0.500");
    }

    #[test]
    fn test_disabled_reporter_writes_nothing() {
        let mut reporter = StatsReporter::new(Vec::new(), false);
        reporter.report(CallStats::default()).unwrap();
        assert!(reporter.into_inner().is_empty());
    }
}
