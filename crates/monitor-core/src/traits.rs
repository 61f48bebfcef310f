use async_trait::async_trait;

use crate::{AlertEvent, MonitorError, Sample};

/// Trait for raw sample producers (device streams, replay buffers).
///
/// `Ok(Some(sample))` yields the next decoded sample, `Ok(None)` signals a
/// clean end of stream, and `Err` signals a broken stream the monitor must
/// not read past.
#[async_trait]
pub trait SampleSource: Send {
    async fn next_sample(&mut self) -> Result<Option<Sample>, MonitorError>;
}

/// Trait for alert consumers (console output, plot capture, ...).
#[async_trait]
pub trait AlertSink: Send {
    async fn emit(&mut self, event: &AlertEvent) -> Result<(), MonitorError>;
    fn name(&self) -> &str;
}
