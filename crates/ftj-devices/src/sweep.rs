//! Fixed-step stimulus harness.
//!
//! [`drive`] samples a [`Waveform`] on a uniform time grid and commits one
//! FTJ evaluation per sample. There is no Newton iteration and no step
//! control: the junction is assumed to be driven by an ideal source.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::ftj::Ftj;
use crate::waveforms::Waveform;

/// Upper bound on the number of samples one [`drive`] call records.
pub const MAX_SAMPLES: usize = 10_000_000;

/// One committed evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TracePoint {
    /// Simulation time (s).
    pub time: f64,
    /// Applied bias (V).
    pub voltage: f64,
    /// Junction current (A).
    pub current: f64,
    /// LRS volume fraction.
    pub order_parameter: f64,
}

/// Time series recorded by [`drive`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Trace {
    pub device: String,
    pub points: Vec<TracePoint>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TracePoint> {
        self.points.iter()
    }

    pub fn last(&self) -> Option<&TracePoint> {
        self.points.last()
    }

    /// Order parameter after the last sample.
    pub fn final_order_parameter(&self) -> Option<f64> {
        self.last().map(|p| p.order_parameter)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Drive `ftj` with `waveform` from its last committed time up to `tstop`.
///
/// Samples are taken every `step` seconds, defaulting to the device's
/// time-step hint, with the final sample landing exactly on `tstop`. The
/// first sample is at the device's last committed time and only records the
/// operating point.
///
/// A grid with more than [`MAX_SAMPLES`] points is rejected as an invalid
/// `tstop` before anything is evaluated.
pub fn drive(ftj: &mut Ftj, waveform: &Waveform, tstop: f64, step: Option<f64>) -> Result<Trace> {
    let start = ftj.state().last_time();
    if !(tstop.is_finite() && tstop >= start) {
        return Err(Error::InvalidValue {
            name: "tstop".to_string(),
            value: tstop,
        });
    }

    let step = match step {
        Some(h) if h > 0.0 && h.is_finite() => h,
        Some(h) => {
            return Err(Error::InvalidValue {
                name: "step".to_string(),
                value: h,
            });
        }
        None => ftj.derived().max_step,
    };

    let span = ((tstop - start) / step).ceil();
    if !(span < MAX_SAMPLES as f64) {
        return Err(Error::InvalidValue {
            name: "tstop".to_string(),
            value: tstop,
        });
    }
    let intervals = span as usize;
    log::debug!(
        "{}: driving {} samples from {start:e} s to {tstop:e} s",
        ftj.name,
        intervals + 1
    );

    let mut points = Vec::with_capacity(intervals + 1);
    for k in 0..=intervals {
        let time = if k == intervals {
            tstop
        } else {
            start + k as f64 * step
        };
        let voltage = waveform.value_at(time);
        let eval = ftj.evaluate(voltage, time);
        points.push(TracePoint {
            time,
            voltage,
            current: eval.current,
            order_parameter: eval.order_parameter,
        });
    }

    Ok(Trace {
        device: ftj.name.clone(),
        points,
    })
}
