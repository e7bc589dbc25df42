//! Tunneling current through the ferroelectric barrier.
//!
//! Each resistance state is evaluated independently as if the whole junction
//! were in that state:
//!
//! ```text
//! T_neg < Vb < T_pos   direct tunneling (Gruverman trapezoidal barrier)
//! Vb >= T_pos          Fowler-Nordheim, forward, barrier phi1 + Vb/2
//! Vb <= T_neg          Fowler-Nordheim, reverse, barrier phi2 - Vb/2
//! ```
//!
//! The direct-tunneling expression is 0/0 at `Vb = phi2 - phi1`; see
//! [`guard_crossover`].

use std::f64::consts::PI;

use super::derived::{FtjDerived, StateCoefficients};
use super::params::FtjParams;

/// Half-width of the band around a crossover voltage that gets nudged (V).
pub const SINGULAR_BAND: f64 = 1e-6;
/// Nudge applied to a voltage inside the singular band (V).
pub const SINGULAR_NUDGE: f64 = 1e-4;

/// Conduction mechanism selected for one resistance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TunnelingRegime {
    /// Direct tunneling through the full trapezoidal barrier.
    Direct,
    /// Fowler-Nordheim tunneling at positive bias.
    FowlerNordheimForward,
    /// Fowler-Nordheim tunneling at negative bias.
    FowlerNordheimReverse,
}

/// Hypothetical currents for both resistance states at one bias point.
#[derive(Debug, Clone)]
pub struct TunnelingResult {
    /// Bias actually used, after the crossover guard (V).
    pub vb: f64,
    /// Current if the junction were fully in the high-resistance state (A).
    pub i_hrs: f64,
    /// Current if the junction were fully in the low-resistance state (A).
    pub i_lrs: f64,
    pub hrs_regime: TunnelingRegime,
    pub lrs_regime: TunnelingRegime,
}

/// Move `vb` off the HRS and LRS crossover voltages.
///
/// A bias within [`SINGULAR_BAND`] of either crossover is shifted up by
/// [`SINGULAR_NUDGE`]. The HRS crossover is checked first.
pub fn guard_crossover(vb: f64, d: &FtjDerived) -> f64 {
    let mut v = vb;
    for crossover in [d.hrs.crossover, d.lrs.crossover] {
        if (v - crossover).abs() < SINGULAR_BAND {
            log::trace!("bias {v} V within {SINGULAR_BAND} V of crossover {crossover} V, nudging");
            v += SINGULAR_NUDGE;
        }
    }
    v
}

/// Direct tunneling current through a trapezoidal barrier.
pub fn direct_tunneling(vb: f64, s: &StateCoefficients, area: f64) -> f64 {
    let alpha = s.wkb / (s.phi1 + vb - s.phi2);
    let near = s.phi1 + 0.5 * vb;
    let far = s.phi2 - 0.5 * vb;
    let root_diff = far.sqrt() - near.sqrt();

    let barrier = (alpha * (far.powf(1.5) - near.powf(1.5))).exp();
    let drive = (0.75 * alpha * vb * root_diff).sinh();

    area * s.gruverman * barrier * drive / (alpha * alpha * root_diff * root_diff)
}

/// Fowler-Nordheim current over a triangular barrier of height `phi`.
///
/// `phi` is the bias-shifted height at the injecting electrode. Returns the
/// forward expression; the caller negates it for reverse bias.
fn fowler_nordheim(vb: f64, phi: f64, f1: f64, f2: f64, s: &StateCoefficients, area: f64, tb: f64) -> f64 {
    let q = FtjParams::Q;
    let amplitude =
        f1 * area * q * q * FtjParams::M0 * vb * vb / (16.0 * PI * PI * FtjParams::HBAR * s.mass * phi * tb * tb);
    let exponent = -f2 * s.wkb * phi.powf(1.5) / vb.abs();
    amplitude * exponent.exp()
}

/// Current for one resistance state, selecting the regime from the
/// state's transition thresholds.
pub fn state_current(vb: f64, s: &StateCoefficients, area: f64, tb: f64) -> (f64, TunnelingRegime) {
    if vb >= s.t_pos {
        let f = s.fitting.positive;
        let i = fowler_nordheim(vb, s.phi1 + 0.5 * vb, f.f1, f.f2, s, area, tb);
        (i, TunnelingRegime::FowlerNordheimForward)
    } else if vb <= s.t_neg {
        let f = s.fitting.negative;
        let i = -fowler_nordheim(vb, s.phi2 - 0.5 * vb, f.f1, f.f2, s, area, tb);
        (i, TunnelingRegime::FowlerNordheimReverse)
    } else {
        (direct_tunneling(vb, s, area), TunnelingRegime::Direct)
    }
}

/// Evaluate both state currents at terminal voltage `vb`.
pub fn evaluate(vb: f64, d: &FtjDerived) -> TunnelingResult {
    let vb = guard_crossover(vb, d);
    let (i_hrs, hrs_regime) = state_current(vb, &d.hrs, d.area, d.tb);
    let (i_lrs, lrs_regime) = state_current(vb, &d.lrs, d.area, d.tb);

    TunnelingResult {
        vb,
        i_hrs,
        i_lrs,
        hrs_regime,
        lrs_regime,
    }
}
