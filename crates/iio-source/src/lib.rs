//! Sample acquisition from an IIO character device.
//!
//! The kernel exposes the gyroscope FIFO as a byte device streaming signed
//! little-endian 16-bit samples in repeating X,Y,Z order. This crate owns
//! all byte-level framing: the rest of the system only ever sees decoded
//! [`Sample`] values via the [`SampleSource`] trait.

use std::path::Path;

use async_trait::async_trait;
use monitor_core::{MonitorError, Sample, SampleSource};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, BufReader};

/// Bytes per raw sample on the wire.
pub const SAMPLE_BYTES: usize = 2;

/// Reads and decodes raw samples from an IIO device (or any byte stream).
///
/// End-of-stream on a frame boundary is a clean stop; end-of-stream inside
/// a frame is a malformed-frame error, and the dangling byte is never
/// forwarded as a sample.
pub struct IioSampleSource<R> {
    reader: R,
}

impl IioSampleSource<BufReader<File>> {
    /// Open the IIO character device at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, MonitorError> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .map_err(|e| MonitorError::Device(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Opened sample device");
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: AsyncRead + Unpin + Send> IioSampleSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> SampleSource for IioSampleSource<R> {
    async fn next_sample(&mut self) -> Result<Option<Sample>, MonitorError> {
        let mut frame = [0u8; SAMPLE_BYTES];
        let mut filled = 0;

        while filled < SAMPLE_BYTES {
            let n = self
                .reader
                .read(&mut frame[filled..])
                .await
                .map_err(|e| MonitorError::Device(e.to_string()))?;

            if n == 0 {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(MonitorError::MalformedFrame(format!(
                    "stream ended mid-sample ({filled} of {SAMPLE_BYTES} bytes)"
                )));
            }
            filled += n;
        }

        Ok(Some(Sample::from_le_bytes(frame)))
    }
}

/// Read the angular-velocity scale attribute from sysfs.
///
/// The attribute holds a decimal string (rad/s per count). The value is
/// presentation metadata only; the comparator operates on raw counts.
pub async fn read_scale_factor(path: impl AsRef<Path>) -> Result<f64, MonitorError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MonitorError::ScaleFactor(format!("{}: {}", path.display(), e)))?;

    raw.trim().parse::<f64>().map_err(|_| {
        MonitorError::ScaleFactor(format!(
            "{}: not a decimal value: {:?}",
            path.display(),
            raw.trim()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn drain(bytes: &[u8]) -> Result<Vec<Sample>, MonitorError> {
        let mut source = IioSampleSource::from_reader(bytes);
        let mut samples = Vec::new();
        while let Some(sample) = source.next_sample().await? {
            samples.push(sample);
        }
        Ok(samples)
    }

    #[tokio::test]
    async fn test_decodes_little_endian_signed() {
        // 1, -1, -32768, 32767
        let bytes = [0x01, 0x00, 0xFF, 0xFF, 0x00, 0x80, 0xFF, 0x7F];
        let samples = drain(&bytes).await.unwrap();
        assert_eq!(samples, vec![1, -1, i16::MIN, i16::MAX]);
    }

    #[tokio::test]
    async fn test_empty_stream_is_clean_eof() {
        let samples = drain(&[]).await.unwrap();
        assert!(samples.is_empty());
    }

    #[tokio::test]
    async fn test_odd_trailing_byte_is_malformed() {
        let bytes = [0x01, 0x00, 0xAB];
        let mut source = IioSampleSource::from_reader(&bytes[..]);

        assert_eq!(source.next_sample().await.unwrap(), Some(1));
        let err = source.next_sample().await.unwrap_err();
        assert!(matches!(err, MonitorError::MalformedFrame(_)));
    }

    #[tokio::test]
    async fn test_read_scale_factor_parses_decimal_string() {
        let path = std::env::temp_dir().join(format!("scale-{}", std::process::id()));
        tokio::fs::write(&path, "0.000133090\n").await.unwrap();

        let scale = read_scale_factor(&path).await.unwrap();
        assert!((scale - 0.000133090).abs() < 1e-12);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_scale_factor_rejects_garbage() {
        let path = std::env::temp_dir().join(format!("scale-bad-{}", std::process::id()));
        tokio::fs::write(&path, "not-a-number\n").await.unwrap();

        let err = read_scale_factor(&path).await.unwrap_err();
        assert!(matches!(err, MonitorError::ScaleFactor(_)));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_scale_factor_missing_file() {
        let err = read_scale_factor("/nonexistent/in_anglvel_scale")
            .await
            .unwrap_err();
        assert!(matches!(err, MonitorError::ScaleFactor(_)));
    }
}
