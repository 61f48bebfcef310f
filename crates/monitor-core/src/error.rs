use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Device error: {0}")]
    Device(String),

    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Scale factor error: {0}")]
    ScaleFactor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sink error: {0}")]
    Sink(String),
}
