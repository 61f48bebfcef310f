use monitor_core::Sample;
use statrs::statistics::Statistics;

/// Ordered, bounded sample buffer.
///
/// Append-only until full, cleared atomically at the cycle boundary. Samples
/// are widened to `f64` on entry so the derived statistics share one numeric
/// domain with the comparison band.
#[derive(Debug, Clone)]
pub struct Window {
    samples: Vec<f64>,
    capacity: usize,
}

impl Window {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(f64::from(sample));
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Arithmetic mean of the collected samples.
    pub fn mean(&self) -> f64 {
        self.samples.as_slice().mean()
    }

    /// Population standard deviation (divide by N, not N-1).
    pub fn population_std_dev(&self) -> f64 {
        self.samples.as_slice().population_std_dev()
    }
}
