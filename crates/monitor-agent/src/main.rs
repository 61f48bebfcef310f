//! monitor-agent: online tamper monitor for a tri-axis gyroscope.
//!
//! Reads the interleaved X,Y,Z sample stream from an IIO character device,
//! baselines each axis over a fixed window, compares the following window
//! against the baseline's mean +/- stdev band, and reports each evaluation
//! to the configured sinks.

use anyhow::{Context, Result};
use tokio::signal::unix::SignalKind;

mod config;
mod console_sink;
mod plot;
mod runner;

use config::MonitorConfig;
use console_sink::ConsoleSink;
use iio_source::IioSampleSource;
use plot::PlotRecorder;
use runner::MonitorRunner;
use tamper_detector::Demultiplexer;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env, init tracing
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    tracing::info!("Starting gyroscope tamper monitor");

    // 2. Load configuration
    let config = MonitorConfig::from_env()?;
    tracing::info!("Configuration loaded and validated");
    tracing::info!("  Device: {}", config.device_path);
    tracing::info!("  Window samples per axis: {}", config.window_samples);
    tracing::info!("  Warm-up samples discarded: {}", config.warmup_samples);
    tracing::info!("  Console output: {}", config.tamper_out);
    tracing::info!("  Plot output: {}", config.plot_out);

    // 3. Read the scale attribute (warn-only; the comparator runs on raw counts)
    let scale_factor = match iio_source::read_scale_factor(&config.scale_attr_path).await {
        Ok(scale) => {
            tracing::info!("Angular-velocity scale: {scale}");
            Some(scale)
        }
        Err(e) => {
            tracing::warn!("Scale attribute unavailable ({e}) — reporting raw counts only");
            None
        }
    };

    // 4. Open the sample device
    let mut source = IioSampleSource::open(&config.device_path)
        .await
        .context("failed to open sample device")?;

    // 5. Assemble the demultiplexer and sinks
    let demux = Demultiplexer::new(config.window_samples, config.warmup_samples);
    let mut runner = MonitorRunner::new(demux);
    if config.tamper_out {
        runner.add_sink(Box::new(ConsoleSink));
    }
    if config.plot_out {
        let mut recorder = PlotRecorder::new();
        if let Some(scale) = scale_factor {
            recorder.set_scale_factor(scale);
        }
        runner.enable_plot(recorder);
    }

    // 6. Run until stream end, stream fault, or signal (SIGINT + SIGTERM)
    let mut sigterm = tokio::signal::unix::signal(SignalKind::terminate())?;
    let shutdown = async {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received SIGINT");
            }
            _ = sigterm.recv() => {
                tracing::info!("Received SIGTERM");
            }
        }
    };

    let reason = runner
        .run(&mut source, shutdown)
        .await
        .context("monitoring loop failed")?;
    tracing::info!("Monitor stopped: {reason:?}");

    // 7. Dump plot data, if recorded
    if let Some(recorder) = runner.recorder() {
        let stdout = std::io::stdout();
        recorder
            .dump(&mut stdout.lock())
            .context("failed to write plot dump")?;
    }

    Ok(())
}
