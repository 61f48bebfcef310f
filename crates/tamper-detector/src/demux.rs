use monitor_core::{AlertEvent, Axis, Sample, AXIS_COUNT};
use serde::{Deserialize, Serialize};

use crate::axis_monitor::AxisMonitor;

/// A sample that survived warm-up, tagged with the axis it was routed to and
/// any evaluation its arrival completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedSample {
    pub axis: Axis,
    pub sample: Sample,
    pub event: Option<AlertEvent>,
}

/// Routes the flat interleaved X,Y,Z sample stream to per-axis monitors.
///
/// The first `warmup_samples` raw samples are discarded outright (hardware
/// FIFO settling); every sample after that is forwarded to exactly one
/// monitor, in arrival order, by a slot counter cycling X -> Y -> Z.
pub struct Demultiplexer {
    monitors: [AxisMonitor; AXIS_COUNT],
    slot: usize,
    warmup_remaining: usize,
}

impl Demultiplexer {
    pub fn new(window_samples: usize, warmup_samples: usize) -> Self {
        Self {
            monitors: [
                AxisMonitor::new(Axis::X, window_samples),
                AxisMonitor::new(Axis::Y, window_samples),
                AxisMonitor::new(Axis::Z, window_samples),
            ],
            slot: 0,
            warmup_remaining: warmup_samples,
        }
    }

    /// Raw samples still to be discarded before routing begins.
    pub fn warmup_remaining(&self) -> usize {
        self.warmup_remaining
    }

    pub fn monitor(&self, axis: Axis) -> &AxisMonitor {
        &self.monitors[axis as usize]
    }

    /// Feed one raw sample from the stream. Returns `None` while warming up;
    /// afterwards, the routing result for exactly one axis.
    pub fn ingest(&mut self, sample: Sample) -> Option<RoutedSample> {
        if self.warmup_remaining > 0 {
            self.warmup_remaining -= 1;
            if self.warmup_remaining == 0 {
                tracing::debug!("Warm-up complete, routing samples to axis monitors");
            }
            return None;
        }

        let axis = Axis::from_slot(self.slot);
        let event = self.monitors[self.slot].ingest(sample);
        self.slot = (self.slot + 1) % AXIS_COUNT;

        Some(RoutedSample {
            axis,
            sample,
            event,
        })
    }
}
