use std::io::Write;

use async_trait::async_trait;
use monitor_core::{AlertEvent, AlertSink, MonitorError};

/// Prints one line per completed evaluation to stdout, in the operator
/// format (`<AXIS> Alert MAX (...)` / `<AXIS>: Okay`).
pub struct ConsoleSink;

#[async_trait]
impl AlertSink for ConsoleSink {
    async fn emit(&mut self, event: &AlertEvent) -> Result<(), MonitorError> {
        let stdout = std::io::stdout();
        writeln!(stdout.lock(), "{}", event.render())
            .map_err(|e| MonitorError::Sink(format!("stdout: {e}")))
    }

    fn name(&self) -> &str {
        "console"
    }
}
