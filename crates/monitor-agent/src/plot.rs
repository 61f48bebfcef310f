use std::io::{self, Write};

use monitor_core::{Axis, Sample};
use tamper_detector::RoutedSample;

/// Accumulates routed samples and evaluation results for offline plotting.
///
/// Tracks the ordered frame index sequence, per-axis raw sample arrays,
/// per-axis alert-value arrays (test mean when that sample completed an
/// alerting evaluation, `None` otherwise), and cumulative alert counts.
/// The dump format is matplotlib-pasteable.
#[derive(Debug, Default)]
pub struct PlotRecorder {
    frame_index: Vec<u64>,
    frames_seen: u64,
    scale_factor: Option<f64>,

    x_raw: Vec<Sample>,
    y_raw: Vec<Sample>,
    z_raw: Vec<Sample>,

    x_alert: Vec<Option<f64>>,
    y_alert: Vec<Option<f64>>,
    z_alert: Vec<Option<f64>>,

    x_num_alerts: u64,
    y_num_alerts: u64,
    z_num_alerts: u64,
}

impl PlotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the sensor scale factor for the dump header.
    pub fn set_scale_factor(&mut self, scale: f64) {
        self.scale_factor = Some(scale);
    }

    pub fn alert_count(&self, axis: Axis) -> u64 {
        match axis {
            Axis::X => self.x_num_alerts,
            Axis::Y => self.y_num_alerts,
            Axis::Z => self.z_num_alerts,
        }
    }

    pub fn frames_recorded(&self) -> u64 {
        self.frames_seen
    }

    /// Record one routed sample. A frame is complete (and indexed) once its
    /// Z sample arrives.
    pub fn record(&mut self, routed: &RoutedSample) {
        let alert_value = routed
            .event
            .as_ref()
            .filter(|e| e.is_alert())
            .map(|e| e.test_mean);

        match routed.axis {
            Axis::X => {
                self.x_raw.push(routed.sample);
                self.x_alert.push(alert_value);
                self.x_num_alerts += u64::from(alert_value.is_some());
            }
            Axis::Y => {
                self.y_raw.push(routed.sample);
                self.y_alert.push(alert_value);
                self.y_num_alerts += u64::from(alert_value.is_some());
            }
            Axis::Z => {
                self.z_raw.push(routed.sample);
                self.z_alert.push(alert_value);
                self.z_num_alerts += u64::from(alert_value.is_some());
                self.frames_seen += 1;
                self.frame_index.push(self.frames_seen);
            }
        }
    }

    /// Dump all recorded arrays as `name = [values]` assignments.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(scale) = self.scale_factor {
            writeln!(out, "scale = {scale}\n")?;
        }
        writeln!(out, "i = [{}]\n", join(&self.frame_index))?;
        writeln!(out, "x_raw = [{}]\n", join(&self.x_raw))?;
        writeln!(out, "y_raw = [{}]\n", join(&self.y_raw))?;
        writeln!(out, "z_raw = [{}]\n", join(&self.z_raw))?;
        writeln!(out, "x_alert = [{}]\n", join_alerts(&self.x_alert))?;
        writeln!(out, "y_alert = [{}]\n", join_alerts(&self.y_alert))?;
        writeln!(out, "z_alert = [{}]\n", join_alerts(&self.z_alert))?;
        writeln!(out, "x_numalerts = {}\n", self.x_num_alerts)?;
        writeln!(out, "y_numalerts = {}\n", self.y_num_alerts)?;
        writeln!(out, "z_numalerts = {}", self.z_num_alerts)?;
        Ok(())
    }
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_alerts(values: &[Option<f64>]) -> String {
    values
        .iter()
        .map(|v| match v {
            Some(value) => value.to_string(),
            None => "None".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_core::{AlertEvent, AlertOutcome};

    fn routed(axis: Axis, sample: Sample, event: Option<AlertEvent>) -> RoutedSample {
        RoutedSample {
            axis,
            sample,
            event,
        }
    }

    #[test]
    fn test_frames_indexed_from_one_on_z() {
        let mut recorder = PlotRecorder::new();
        recorder.record(&routed(Axis::X, 1, None));
        recorder.record(&routed(Axis::Y, 2, None));
        assert_eq!(recorder.frames_recorded(), 0);

        recorder.record(&routed(Axis::Z, 3, None));
        assert_eq!(recorder.frames_recorded(), 1);
        assert_eq!(recorder.frame_index, vec![1]);
    }

    #[test]
    fn test_alert_values_and_counts() {
        let mut recorder = PlotRecorder::new();

        recorder.record(&routed(Axis::X, 5, None));
        recorder.record(&routed(
            Axis::X,
            6,
            Some(AlertEvent::new(Axis::X, 42.5, 1.0, 2.0, AlertOutcome::AboveMax)),
        ));
        // A completed Okay evaluation is not an alert value.
        recorder.record(&routed(
            Axis::X,
            7,
            Some(AlertEvent::new(Axis::X, 1.5, 1.0, 2.0, AlertOutcome::Okay)),
        ));

        assert_eq!(recorder.x_alert, vec![None, Some(42.5), None]);
        assert_eq!(recorder.alert_count(Axis::X), 1);
        assert_eq!(recorder.alert_count(Axis::Y), 0);
    }

    #[test]
    fn test_dump_format() {
        let mut recorder = PlotRecorder::new();
        recorder.record(&routed(Axis::X, 10, None));
        recorder.record(&routed(
            Axis::Y,
            -3,
            Some(AlertEvent::new(Axis::Y, 11.5, 1.0, 2.0, AlertOutcome::AboveMax)),
        ));
        recorder.record(&routed(Axis::Z, 7, None));

        let mut out = Vec::new();
        recorder.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("i = [1]\n"));
        assert!(text.contains("x_raw = [10]\n"));
        assert!(text.contains("y_raw = [-3]\n"));
        assert!(text.contains("y_alert = [11.5]\n"));
        assert!(text.contains("x_alert = [None]\n"));
        assert!(text.contains("y_numalerts = 1\n"));
        assert!(text.contains("z_numalerts = 0"));
    }
}
