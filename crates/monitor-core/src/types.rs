use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw angular-rate reading in sensor counts (signed 16-bit, no unit
/// conversion applied).
pub type Sample = i16;

/// Number of spatial axes in one sensor frame.
pub const AXIS_COUNT: usize = 3;

/// Spatial axis of the gyroscope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    /// Map a cyclic demultiplexer slot to an axis (0 -> X, 1 -> Y, 2 -> Z).
    pub fn from_slot(slot: usize) -> Axis {
        match slot % AXIS_COUNT {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }

}

/// Outcome of comparing a test-window mean against the baseline band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertOutcome {
    /// Test mean fell strictly below `baseline_min`.
    BelowMin,
    /// Test mean rose strictly above `baseline_max`.
    AboveMax,
    /// Test mean stayed inside the band (bounds inclusive).
    Okay,
}

impl AlertOutcome {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            AlertOutcome::BelowMin => "MIN",
            AlertOutcome::AboveMax => "MAX",
            AlertOutcome::Okay => "OK",
        }
    }

    /// True for either tamper outcome.
    pub fn is_alert(&self) -> bool {
        !matches!(self, AlertOutcome::Okay)
    }
}

/// One completed per-axis evaluation: the test-window mean held against the
/// baseline band that was in effect when the window filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub axis: Axis,
    pub test_mean: f64,
    pub baseline_min: f64,
    pub baseline_max: f64,
    pub outcome: AlertOutcome,
    pub timestamp: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(
        axis: Axis,
        test_mean: f64,
        baseline_min: f64,
        baseline_max: f64,
        outcome: AlertOutcome,
    ) -> Self {
        Self {
            axis,
            test_mean,
            baseline_min,
            baseline_max,
            outcome,
            timestamp: Utc::now(),
        }
    }

    pub fn is_alert(&self) -> bool {
        self.outcome.is_alert()
    }

    /// Operator-facing console line for this evaluation.
    pub fn render(&self) -> String {
        match self.outcome {
            AlertOutcome::AboveMax => format!(
                "{} Alert MAX (Min: {}, Val: {}, Max: {})",
                self.axis.name(),
                self.baseline_min,
                self.test_mean,
                self.baseline_max
            ),
            AlertOutcome::BelowMin => format!(
                "{} Alert MIN (Min: {}, Val: {}, Max: {})",
                self.axis.name(),
                self.baseline_min,
                self.test_mean,
                self.baseline_max
            ),
            AlertOutcome::Okay => format!("{}: Okay", self.axis.name()),
        }
    }
}
