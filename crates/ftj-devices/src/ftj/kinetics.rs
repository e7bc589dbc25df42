//! Polarization switching kinetics.
//!
//! The order parameter is the LRS volume fraction. Positive bias grows the
//! HRS domain, negative bias grows the LRS domain. Growth has two stages:
//!
//! - **Nucleation**: a domain driven all the way to its floor has to
//!   re-nucleate before it can grow again. Progress accumulates as
//!   `dt / tau_n(Vb)` and completes at 1.
//! - **Propagation**: domain walls sweep the junction following the KAI
//!   law `g(t) = 1 - exp(-(t / tau_p(Vb))^2)`. Each step restarts the law
//!   from the effective time `tau_p * sqrt(ln(1 / (1 - g)))` that reproduces
//!   the current fraction, so piecewise evaluation matches a single
//!   continuous curve under constant bias.
//!
//! Both fractions are kept in `[FRACTION_FLOOR, 1 - FRACTION_FLOOR]`; the
//! restart time diverges at 0 and 1.

use super::derived::KineticCoefficients;

/// Smallest volume fraction either domain may reach.
pub const FRACTION_FLOOR: f64 = 1e-4;

/// Slack when deciding whether an initial fraction sits on a bound.
const BOUND_SLACK: f64 = 1e-12;

/// Which domain a bias grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// HRS domain grows, order parameter falls (positive bias).
    TowardHigh,
    /// LRS domain grows, order parameter rises (negative bias).
    TowardLow,
}

impl Direction {
    /// Switching direction driven by a bias; `None` at exactly zero.
    pub fn from_bias(vb: f64) -> Option<Self> {
        if vb > 0.0 {
            Some(Direction::TowardHigh)
        } else if vb < 0.0 {
            Some(Direction::TowardLow)
        } else {
            None
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::TowardHigh => Direction::TowardLow,
            Direction::TowardLow => Direction::TowardHigh,
        }
    }
}

/// Kinetic phase of the domain structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainPhase {
    /// Both domains are present; walls move whichever way the bias drives.
    Mixed,
    /// Fully switched: the domain grown by `toward` is extinct and must
    /// nucleate before it can propagate.
    AwaitingNucleation { toward: Direction, progress: f64 },
}

/// What the kinetics do at a given bias, derived from the bias sign and the
/// current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KineticRegime {
    /// Zero bias, or bias pushing further into an already saturated state.
    Stable,
    Nucleating(Direction),
    Propagating(Direction),
}

/// Per-device polarization state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainState {
    low_fraction: f64,
    last_time: f64,
    phase: DomainPhase,
}

impl DomainState {
    /// Initial state with LRS fraction `s0` at time `t0`.
    ///
    /// `s0` is clamped into the allowed range. A fraction on either bound is
    /// a fully switched junction and starts out awaiting nucleation of the
    /// missing domain.
    pub fn new(s0: f64, t0: f64) -> Self {
        let low_fraction = s0.clamp(FRACTION_FLOOR, 1.0 - FRACTION_FLOOR);
        if low_fraction != s0 {
            log::debug!("initial LRS fraction {s0} clamped to {low_fraction}");
        }

        let phase = if low_fraction <= FRACTION_FLOOR + BOUND_SLACK {
            DomainPhase::AwaitingNucleation {
                toward: Direction::TowardLow,
                progress: 0.0,
            }
        } else if low_fraction >= 1.0 - FRACTION_FLOOR - BOUND_SLACK {
            DomainPhase::AwaitingNucleation {
                toward: Direction::TowardHigh,
                progress: 0.0,
            }
        } else {
            DomainPhase::Mixed
        };

        Self {
            low_fraction,
            last_time: t0,
            phase,
        }
    }

    /// LRS volume fraction: the model's order parameter.
    pub fn low_fraction(&self) -> f64 {
        self.low_fraction
    }

    /// HRS volume fraction.
    pub fn high_fraction(&self) -> f64 {
        1.0 - self.low_fraction
    }

    /// Time of the last advancing evaluation.
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    pub fn phase(&self) -> DomainPhase {
        self.phase
    }

    /// Direction that must nucleate before switching can proceed, and the
    /// progress made so far.
    pub fn pending_nucleation(&self) -> Option<(Direction, f64)> {
        match self.phase {
            DomainPhase::AwaitingNucleation { toward, progress } => Some((toward, progress)),
            DomainPhase::Mixed => None,
        }
    }

    /// Regime the kinetics are in for bias `vb`.
    pub fn regime(&self, vb: f64) -> KineticRegime {
        let Some(dir) = Direction::from_bias(vb) else {
            return KineticRegime::Stable;
        };
        match self.phase {
            DomainPhase::AwaitingNucleation { toward, .. } if toward == dir => {
                KineticRegime::Nucleating(dir)
            }
            DomainPhase::AwaitingNucleation { .. } => KineticRegime::Stable,
            DomainPhase::Mixed => KineticRegime::Propagating(dir),
        }
    }

    fn growing_fraction(&self, dir: Direction) -> f64 {
        match dir {
            Direction::TowardHigh => 1.0 - self.low_fraction,
            Direction::TowardLow => self.low_fraction,
        }
    }

    fn set_growing_fraction(&mut self, dir: Direction, g: f64) {
        let low = match dir {
            Direction::TowardHigh => 1.0 - g,
            Direction::TowardLow => g,
        };
        self.low_fraction = low.clamp(FRACTION_FLOOR, 1.0 - FRACTION_FLOOR);
    }

    /// State after holding bias `vb` from the last evaluation until `time`.
    ///
    /// Pure: `self` is not modified. A `time` that does not lie strictly
    /// after the last evaluation returns the state unchanged, including its
    /// timestamp, so repeated or rolled-back solver iterations never
    /// integrate phantom or negative durations.
    pub fn advance(&self, vb: f64, time: f64, k: &KineticCoefficients) -> DomainState {
        let dt = time - self.last_time;
        if !(dt > 0.0) {
            return *self;
        }

        let mut next = DomainState {
            last_time: time,
            ..*self
        };

        let Some(dir) = Direction::from_bias(vb) else {
            if let DomainPhase::AwaitingNucleation { toward, .. } = self.phase {
                next.phase = DomainPhase::AwaitingNucleation {
                    toward,
                    progress: 0.0,
                };
            }
            return next;
        };

        match self.phase {
            DomainPhase::AwaitingNucleation { toward, progress } if toward == dir => {
                let progress = progress + dt / k.nucleation_time(vb);
                if progress >= 1.0 {
                    log::debug!("{dir:?} nucleation complete at t = {time:e} s");
                    next.set_growing_fraction(dir, FRACTION_FLOOR);
                    next.phase = DomainPhase::Mixed;
                } else {
                    next.phase = DomainPhase::AwaitingNucleation { toward, progress };
                }
            }
            DomainPhase::AwaitingNucleation { toward, .. } => {
                next.phase = DomainPhase::AwaitingNucleation {
                    toward,
                    progress: 0.0,
                };
            }
            DomainPhase::Mixed => {
                let tau = k.propagation_time(vb);
                if tau.is_finite() {
                    let g = self.growing_fraction(dir);
                    let t_rel = tau * (-(-g).ln_1p()).sqrt();
                    let x = (t_rel + dt) / tau;
                    let mut g_next = (-(-x * x).exp_m1()).max(g);
                    if g_next >= 1.0 - FRACTION_FLOOR {
                        g_next = 1.0 - FRACTION_FLOOR;
                        next.phase = DomainPhase::AwaitingNucleation {
                            toward: dir.opposite(),
                            progress: 0.0,
                        };
                        log::debug!("{dir:?} switching saturated at t = {time:e} s");
                    }
                    next.set_growing_fraction(dir, g_next);
                }
            }
        }

        next
    }
}
