//! Bias stimuli for driving a junction through time.
//!
//! The variants follow the SPICE independent-source conventions (`PULSE`,
//! `SIN`, `PWL`) plus a bipolar triangle for hysteresis sweeps. Waveforms
//! deserialize from JSON, e.g. `{"triangle": {"amplitude": 2.0, "period":
//! 1e-6, "delay": 0.0}}`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// A time-varying bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Waveform {
    /// Constant bias.
    Dc(f64),

    /// PULSE(V1 V2 TD TR TF PW PER). A period of 0 gives a single pulse.
    Pulse {
        v1: f64,
        v2: f64,
        td: f64,
        tr: f64,
        tf: f64,
        pw: f64,
        per: f64,
    },

    /// SIN(VO VA FREQ TD THETA PHASE), phase in degrees.
    Sin {
        vo: f64,
        va: f64,
        freq: f64,
        td: f64,
        theta: f64,
        phase: f64,
    },

    /// PWL(T1 V1 T2 V2 ...). Held flat outside the listed span.
    Pwl { points: Vec<(f64, f64)> },

    /// Symmetric triangle starting at 0 V: up to `+amplitude`, down to
    /// `-amplitude`, back to 0 V once per period.
    Triangle {
        amplitude: f64,
        period: f64,
        delay: f64,
    },
}

impl Waveform {
    pub fn dc(value: f64) -> Self {
        Waveform::Dc(value)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pulse(v1: f64, v2: f64, td: f64, tr: f64, tf: f64, pw: f64, per: f64) -> Self {
        Waveform::Pulse {
            v1,
            v2,
            td,
            tr,
            tf,
            pw,
            per,
        }
    }

    /// Undamped sine with no delay or phase.
    pub fn sin(vo: f64, va: f64, freq: f64) -> Self {
        Waveform::Sin {
            vo,
            va,
            freq,
            td: 0.0,
            theta: 0.0,
            phase: 0.0,
        }
    }

    /// Piecewise linear waveform. Points are sorted by time.
    pub fn pwl(mut points: Vec<(f64, f64)>) -> Self {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Waveform::Pwl { points }
    }

    pub fn triangle(amplitude: f64, period: f64) -> Self {
        Waveform::Triangle {
            amplitude,
            period,
            delay: 0.0,
        }
    }

    /// Bias at time `t` (s).
    pub fn value_at(&self, t: f64) -> f64 {
        match self {
            Waveform::Dc(v) => *v,
            Waveform::Pulse {
                v1,
                v2,
                td,
                tr,
                tf,
                pw,
                per,
            } => {
                if t < *td {
                    return *v1;
                }
                let mut local = t - td;
                if *per > 0.0 {
                    local = local.rem_euclid(*per);
                }
                if local < *tr {
                    v1 + (v2 - v1) * local / tr
                } else if local < tr + pw {
                    *v2
                } else if local < tr + pw + tf {
                    v2 + (v1 - v2) * (local - tr - pw) / tf
                } else {
                    *v1
                }
            }
            Waveform::Sin {
                vo,
                va,
                freq,
                td,
                theta,
                phase,
            } => {
                let phase = phase.to_radians();
                if t < *td {
                    return vo + va * phase.sin();
                }
                let local = t - td;
                vo + va * (-theta * local).exp() * (2.0 * PI * freq * local + phase).sin()
            }
            Waveform::Pwl { points } => pwl_at(points, t),
            Waveform::Triangle {
                amplitude,
                period,
                delay,
            } => {
                if t < *delay || *period <= 0.0 {
                    return 0.0;
                }
                let x = ((t - delay) / period).fract();
                let shape = if x < 0.25 {
                    4.0 * x
                } else if x < 0.75 {
                    2.0 - 4.0 * x
                } else {
                    4.0 * x - 4.0
                };
                amplitude * shape
            }
        }
    }
}

fn pwl_at(points: &[(f64, f64)], t: f64) -> f64 {
    let (Some(&(t_first, v_first)), Some(&(t_last, v_last))) = (points.first(), points.last()) else {
        return 0.0;
    };
    if t <= t_first {
        return v_first;
    }
    if t >= t_last {
        return v_last;
    }

    // First point strictly after t; 1..len by the bounds checks above.
    let k = points.partition_point(|&(tp, _)| tp <= t);
    let (t0, v0) = points[k - 1];
    let (t1, v1) = points[k];
    v0 + (v1 - v0) * (t - t0) / (t1 - t0)
}
