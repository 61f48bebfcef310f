use std::future::Future;

use monitor_core::{AlertSink, MonitorError, SampleSource};
use tamper_detector::Demultiplexer;

use crate::plot::PlotRecorder;

/// Why the monitoring loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source reported a clean end of stream.
    EndOfStream,
    /// An external shutdown signal arrived during a read.
    Cancelled,
}

/// Pull-based monitoring loop: one sample at a time from the source, through
/// the demultiplexer, any resulting event out to every sink.
///
/// Single-threaded and strictly ordered; each sample is fully processed
/// before the next is requested. In-progress windows at stop time are
/// silently abandoned.
pub struct MonitorRunner {
    demux: Demultiplexer,
    sinks: Vec<Box<dyn AlertSink>>,
    recorder: Option<PlotRecorder>,
}

impl MonitorRunner {
    pub fn new(demux: Demultiplexer) -> Self {
        Self {
            demux,
            sinks: Vec::new(),
            recorder: None,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    pub fn enable_plot(&mut self, recorder: PlotRecorder) {
        self.recorder = Some(recorder);
    }

    pub fn recorder(&self) -> Option<&PlotRecorder> {
        self.recorder.as_ref()
    }

    /// Run until the source ends, the source fails, or `shutdown` resolves.
    ///
    /// A malformed frame propagates as `Err`: the monitor cannot tell a
    /// healthy short read from a broken stream, so it stops rather than
    /// guess. Sink failures are logged and do not stop monitoring.
    pub async fn run<S, F>(
        &mut self,
        source: &mut S,
        shutdown: F,
    ) -> Result<StopReason, MonitorError>
    where
        S: SampleSource,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut samples_seen: u64 = 0;
        let mut events_emitted: u64 = 0;

        loop {
            let next = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!(samples_seen, events_emitted, "Shutdown requested, stopping monitor");
                    return Ok(StopReason::Cancelled);
                }
                next = source.next_sample() => next?,
            };

            let Some(sample) = next else {
                tracing::info!(samples_seen, events_emitted, "Sample stream ended");
                return Ok(StopReason::EndOfStream);
            };
            samples_seen += 1;

            let Some(routed) = self.demux.ingest(sample) else {
                continue;
            };

            if let Some(recorder) = self.recorder.as_mut() {
                recorder.record(&routed);
            }

            if let Some(event) = routed.event.as_ref() {
                events_emitted += 1;
                for sink in &mut self.sinks {
                    if let Err(e) = sink.emit(event).await {
                        tracing::warn!(sink = sink.name(), error = %e, "Alert sink failed");
                    }
                }
            }
        }
    }
}
