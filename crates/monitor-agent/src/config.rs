use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Reference hardware sysfs node for the angular-velocity scale attribute.
const DEFAULT_SCALE_PATH: &str = "/sys/devices/soc0/soc/2100000.aips-bus/21a0000.i2c/i2c-0/0-006a/iio:device1/in_anglvel_scale";

/// Per-axis window capacity: 416 Hz sample rate / 3 axes ~= 138 samples of
/// each axis per second, so baseline + test spans ~2 s per axis.
const DEFAULT_WINDOW_SAMPLES: usize = 138;

/// Raw samples discarded at startup: 3 samples per frame x 12-frame FIFO
/// watermark.
const DEFAULT_WARMUP_SAMPLES: usize = 36;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    // Sample acquisition
    pub device_path: String,      // IIO character device
    pub scale_attr_path: String,  // sysfs scale attribute

    // Comparator geometry
    pub window_samples: usize,    // N, per-axis window capacity
    pub warmup_samples: usize,    // D, raw samples skipped at startup

    // Presentation
    pub tamper_out: bool,         // console alert lines
    pub plot_out: bool,           // batch plot dump on shutdown
}

impl MonitorConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            device_path: env::var("GYRO_DEVICE_PATH")
                .unwrap_or_else(|_| "/dev/iio:device1".to_string()),
            scale_attr_path: env::var("GYRO_SCALE_PATH")
                .unwrap_or_else(|_| DEFAULT_SCALE_PATH.to_string()),
            window_samples: env::var("WINDOW_SAMPLES")
                .unwrap_or_else(|_| DEFAULT_WINDOW_SAMPLES.to_string())
                .parse()
                .context("WINDOW_SAMPLES must be a positive integer")?,
            warmup_samples: env::var("WARMUP_SAMPLES")
                .unwrap_or_else(|_| DEFAULT_WARMUP_SAMPLES.to_string())
                .parse()
                .context("WARMUP_SAMPLES must be a non-negative integer")?,
            tamper_out: env::var("TAMPER_OUT")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("TAMPER_OUT must be true or false")?,
            plot_out: env::var("PLOT_OUT")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .context("PLOT_OUT must be true or false")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.window_samples == 0 {
            bail!("WINDOW_SAMPLES must be at least 1");
        }
        if self.device_path.is_empty() {
            bail!("GYRO_DEVICE_PATH must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = MonitorConfig {
            device_path: "/dev/iio:device1".to_string(),
            scale_attr_path: DEFAULT_SCALE_PATH.to_string(),
            window_samples: 0,
            warmup_samples: 36,
            tamper_out: true,
            plot_out: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = MonitorConfig {
            device_path: "/dev/iio:device1".to_string(),
            scale_attr_path: DEFAULT_SCALE_PATH.to_string(),
            window_samples: DEFAULT_WINDOW_SAMPLES,
            warmup_samples: DEFAULT_WARMUP_SAMPLES,
            tamper_out: true,
            plot_out: false,
        };
        assert!(config.validate().is_ok());
    }
}
