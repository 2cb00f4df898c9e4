//! Elapsed-time instrumentation.
//!
//! Small helpers for measuring how long pipeline phases take:
//! - [`Stopwatch`] for a single measurement
//! - [`AccumTimer`] for repeated measurements of the same phase
//! - [`TimingReport`] for collecting labelled samples and logging a summary
//! - [`ScopedTimer`] for recording into a report when a scope ends

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// A restartable stopwatch.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started: Instant,
    elapsed: Duration,
}

impl Stopwatch {
    /// Create a stopwatch that starts running now.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Stop the measurement and return the elapsed time.
    pub fn stop(&mut self) -> Duration {
        self.elapsed = self.started.elapsed();
        self.elapsed
    }

    /// Elapsed time recorded by the last `stop`.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed seconds recorded by the last `stop`.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Accumulates elapsed time over repeated begin/end pairs.
#[derive(Debug, Clone, Default)]
pub struct AccumTimer {
    running: Option<Instant>,
    total: Duration,
    count: u32,
}

impl AccumTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.running = Some(Instant::now());
    }

    /// Finish the current measurement. Without a matching `begin` this is a no-op.
    pub fn end(&mut self) {
        if let Some(started) = self.running.take() {
            self.total += started.elapsed();
            self.count += 1;
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean duration per measurement, zero when nothing was measured.
    pub fn average(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total / self.count
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Per-label summary produced by [`TimingReport::summaries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    pub total_secs: f64,
    pub count: usize,
    pub avg_secs: f64,
}

/// Labelled timing samples, reported through `tracing`.
#[derive(Debug, Clone)]
pub struct TimingReport {
    started_wall: String,
    samples: BTreeMap<String, Vec<f64>>,
}

impl Default for TimingReport {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingReport {
    pub fn new() -> Self {
        Self {
            started_wall: chrono::Utc::now().to_rfc3339(),
            samples: BTreeMap::new(),
        }
    }

    /// Wall-clock time at which the report was created (RFC 3339).
    pub fn started_wall(&self) -> &str {
        &self.started_wall
    }

    /// Record one sample (seconds) under `label`.
    pub fn record(&mut self, label: &str, secs: f64) {
        self.samples.entry(label.to_string()).or_default().push(secs);
    }

    /// Start a timer that records into this report when dropped.
    pub fn scoped(&mut self, label: impl Into<String>) -> ScopedTimer<'_> {
        ScopedTimer {
            label: label.into(),
            report: self,
            started: Instant::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Totals, counts and averages per label, ordered by label.
    pub fn summaries(&self) -> Vec<(&str, TimingSummary)> {
        self.samples
            .iter()
            .map(|(label, values)| {
                let total_secs: f64 = values.iter().sum();
                let count = values.len();
                let avg_secs = if count == 0 {
                    total_secs
                } else {
                    total_secs / count as f64
                };
                (
                    label.as_str(),
                    TimingSummary {
                        total_secs,
                        count,
                        avg_secs,
                    },
                )
            })
            .collect()
    }

    /// Log every label's summary at info level.
    pub fn report(&self) {
        tracing::info!(started = %self.started_wall, "timing report");
        for (label, summary) in self.summaries() {
            tracing::info!(
                "{}: total {:.6}s, count {}, avg {:.6}s",
                label,
                summary.total_secs,
                summary.count,
                summary.avg_secs
            );
        }
    }
}

/// Records its lifetime into a [`TimingReport`] on drop.
pub struct ScopedTimer<'a> {
    label: String,
    report: &'a mut TimingReport,
    started: Instant,
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        let secs = self.started.elapsed().as_secs_f64();
        self.report.record(&self.label, secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_measures_after_stop() {
        let mut watch = Stopwatch::start();
        assert_eq!(watch.elapsed(), Duration::ZERO);
        let elapsed = watch.stop();
        assert_eq!(watch.elapsed(), elapsed);
        assert!(watch.elapsed_secs() < 1.0);
    }

    #[test]
    fn test_accum_timer_counts_pairs() {
        let mut timer = AccumTimer::new();
        assert_eq!(timer.average(), Duration::ZERO);

        timer.begin();
        timer.end();
        timer.begin();
        timer.end();
        timer.end(); // unmatched, ignored

        assert_eq!(timer.count(), 2);
        assert!(timer.average() <= timer.total());

        timer.clear();
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.total(), Duration::ZERO);
    }

    #[test]
    fn test_report_summaries() {
        let mut report = TimingReport::new();
        report.record("group", 1.0);
        report.record("group", 3.0);
        report.record("parse", 0.5);

        let summaries = report.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].0, "group");
        assert_eq!(summaries[0].1.count, 2);
        assert!((summaries[0].1.total_secs - 4.0).abs() < 1e-12);
        assert!((summaries[0].1.avg_secs - 2.0).abs() < 1e-12);
        assert_eq!(summaries[1].0, "parse");
    }

    #[test]
    fn test_scoped_timer_records_on_drop() {
        let mut report = TimingReport::new();
        {
            let _timer = report.scoped("scope");
        }
        let summaries = report.summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].0, "scope");
        assert_eq!(summaries[0].1.count, 1);
    }
}
