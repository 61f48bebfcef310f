use monitor_core::{AlertEvent, AlertOutcome, Axis, Sample};

use crate::window::Window;

/// Which window the monitor is currently filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    CollectingBaseline,
    CollectingTest,
}

/// Per-axis two-phase windowed comparator.
///
/// Fills a baseline window of N samples and derives a mean +/- population
/// stdev band from it, then fills a test window of N samples and compares
/// the test mean against the band. Each completed cycle emits exactly one
/// [`AlertEvent`] and resets the monitor to an empty baseline; the band is
/// never reused across cycles.
#[derive(Debug, Clone)]
pub struct AxisMonitor {
    axis: Axis,
    phase: Phase,
    baseline: Window,
    test: Window,
    baseline_mean: f64,
    baseline_std_dev: f64,
    baseline_min: f64,
    baseline_max: f64,
    /// Explicit flag: a baseline mean of exactly zero is valid data, so
    /// presence must never be inferred from the numeric fields.
    has_baseline: bool,
}

impl AxisMonitor {
    pub fn new(axis: Axis, window_samples: usize) -> Self {
        Self {
            axis,
            phase: Phase::CollectingBaseline,
            baseline: Window::new(window_samples),
            test: Window::new(window_samples),
            baseline_mean: 0.0,
            baseline_std_dev: 0.0,
            baseline_min: 0.0,
            baseline_max: 0.0,
            has_baseline: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn has_baseline(&self) -> bool {
        self.has_baseline
    }

    /// `(mean, stdev)` of the current baseline, if one is established.
    pub fn baseline_stats(&self) -> Option<(f64, f64)> {
        self.has_baseline
            .then_some((self.baseline_mean, self.baseline_std_dev))
    }

    /// `(min, max)` band of the current baseline, if one is established.
    pub fn baseline_band(&self) -> Option<(f64, f64)> {
        self.has_baseline
            .then_some((self.baseline_min, self.baseline_max))
    }

    /// Samples collected toward the window currently being filled.
    pub fn pending_len(&self) -> usize {
        match self.phase {
            Phase::CollectingBaseline => self.baseline.len(),
            Phase::CollectingTest => self.test.len(),
        }
    }

    /// Feed one raw sample. Returns an event only on the sample that
    /// completes a test window; partial windows never evaluate.
    pub fn ingest(&mut self, sample: Sample) -> Option<AlertEvent> {
        match self.phase {
            Phase::CollectingBaseline => {
                self.baseline.push(sample);
                if self.baseline.is_full() {
                    self.establish_baseline();
                }
                None
            }
            Phase::CollectingTest => {
                self.test.push(sample);
                if !self.test.is_full() {
                    return None;
                }
                let event = self.evaluate();
                self.reset_cycle();
                Some(event)
            }
        }
    }

    fn establish_baseline(&mut self) {
        self.baseline_mean = self.baseline.mean();
        self.baseline_std_dev = self.baseline.population_std_dev();
        self.baseline_min = self.baseline_mean - self.baseline_std_dev;
        self.baseline_max = self.baseline_mean + self.baseline_std_dev;
        self.has_baseline = true;
        self.phase = Phase::CollectingTest;

        tracing::debug!(
            axis = self.axis.name(),
            mean = self.baseline_mean,
            std_dev = self.baseline_std_dev,
            "Baseline established"
        );
    }

    /// Strict inequalities only: a test mean sitting exactly on either bound
    /// does not alert.
    fn evaluate(&self) -> AlertEvent {
        let test_mean = self.test.mean();
        let outcome = if test_mean > self.baseline_max {
            AlertOutcome::AboveMax
        } else if test_mean < self.baseline_min {
            AlertOutcome::BelowMin
        } else {
            AlertOutcome::Okay
        };

        tracing::debug!(
            axis = self.axis.name(),
            test_mean,
            baseline_min = self.baseline_min,
            baseline_max = self.baseline_max,
            outcome = outcome.name(),
            "Test window evaluated"
        );

        AlertEvent::new(
            self.axis,
            test_mean,
            self.baseline_min,
            self.baseline_max,
            outcome,
        )
    }

    fn reset_cycle(&mut self) {
        self.baseline.clear();
        self.test.clear();
        self.baseline_mean = 0.0;
        self.baseline_std_dev = 0.0;
        self.baseline_min = 0.0;
        self.baseline_max = 0.0;
        self.has_baseline = false;
        self.phase = Phase::CollectingBaseline;
    }
}
