//! Quantities computed once from [`FtjParams`] and reused on every
//! evaluation.

use std::f64::consts::PI;

use super::fitting::{FnFitting, fn_fitting};
use super::params::FtjParams;
use crate::error::{Error, Result};

/// Largest allowed distance, in unit cells, from a whole cell count.
const CELL_TOLERANCE: f64 = 1e-6;

/// Barrier thickness in whole unit cells. Only these four thicknesses have
/// calibrated Fowler-Nordheim factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitCells {
    Three,
    Four,
    Five,
    Six,
}

impl UnitCells {
    pub const ALL: [UnitCells; 4] = [
        UnitCells::Three,
        UnitCells::Four,
        UnitCells::Five,
        UnitCells::Six,
    ];

    /// Discretize a barrier thickness (m) into unit cells.
    ///
    /// Fails with [`Error::UnsupportedThickness`] unless the thickness is a
    /// whole number of 0.4 nm cells between 3 and 6.
    pub fn resolve(tb: f64) -> Result<Self> {
        let cells = tb / FtjParams::UNIT_CELL;
        let rounded = cells.round();
        if !((cells - rounded).abs() <= CELL_TOLERANCE) {
            return Err(Error::UnsupportedThickness {
                thickness: tb,
                cells,
            });
        }

        match rounded as i64 {
            3 => Ok(UnitCells::Three),
            4 => Ok(UnitCells::Four),
            5 => Ok(UnitCells::Five),
            6 => Ok(UnitCells::Six),
            _ => Err(Error::UnsupportedThickness {
                thickness: tb,
                cells,
            }),
        }
    }

    pub fn count(self) -> u32 {
        match self {
            UnitCells::Three => 3,
            UnitCells::Four => 4,
            UnitCells::Five => 5,
            UnitCells::Six => 6,
        }
    }
}

/// The two polarization states of the barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResistanceState {
    /// High-resistance state (OFF).
    High,
    /// Low-resistance state (ON).
    Low,
}

/// Tunneling coefficients for one resistance state.
#[derive(Debug, Clone)]
pub struct StateCoefficients {
    /// Near-interface barrier height (V).
    pub phi1: f64,
    /// Far-interface barrier height (V).
    pub phi2: f64,
    /// Effective mass (kg).
    pub mass: f64,
    /// Gruverman prefactor -4*m*e^3 / (9*pi^2*hbar^3).
    pub gruverman: f64,
    /// WKB exponent coefficient 4*tb*sqrt(2*m*e) / (3*hbar), without the
    /// voltage-dependent denominator.
    pub wkb: f64,
    /// Fowler-Nordheim fitting factors for the resolved thickness.
    pub fitting: FnFitting,
    /// Direct tunneling gives way to forward FN at this bias (V).
    pub t_pos: f64,
    /// Direct tunneling gives way to reverse FN at this bias (V).
    pub t_neg: f64,
    /// Bias at which the offset barrier heights coincide and the direct
    /// tunneling expression is 0/0 (V).
    pub crossover: f64,
}

impl StateCoefficients {
    fn new(phi1: f64, phi2: f64, mass_coeff: f64, tb: f64, fitting: FnFitting) -> Self {
        let mass = mass_coeff * FtjParams::M0;
        let q = FtjParams::Q;
        let hbar = FtjParams::HBAR;

        let gruverman = -4.0 * mass * q.powi(3) / (9.0 * PI * PI * hbar.powi(3));
        let wkb = 4.0 * tb * (2.0 * mass * q).sqrt() / (3.0 * hbar);

        Self {
            phi1,
            phi2,
            mass,
            gruverman,
            wkb,
            fitting,
            t_pos: phi2,
            t_neg: -phi1,
            crossover: phi2 - phi1,
        }
    }
}

/// Creep-law coefficients for nucleation and domain-wall propagation.
#[derive(Debug, Clone)]
pub struct KineticCoefficients {
    /// Nucleation attempt time (s).
    pub tau_n0: f64,
    /// Propagation attempt time (s).
    pub tau_p0: f64,
    /// tb*U_n*e*E0/(kB*T), in volts.
    pub nucleation_activation: f64,
    /// tb*U_p*e*E0/(kB*T), in volts.
    pub propagation_activation: f64,
}

impl KineticCoefficients {
    /// Characteristic nucleation time at bias `vb`.
    ///
    /// Infinite at zero bias or when the exponent overflows.
    pub fn nucleation_time(&self, vb: f64) -> f64 {
        creep_time(self.tau_n0, self.nucleation_activation, vb)
    }

    /// Characteristic propagation time at bias `vb`.
    pub fn propagation_time(&self, vb: f64) -> f64 {
        creep_time(self.tau_p0, self.propagation_activation, vb)
    }
}

fn creep_time(tau0: f64, activation: f64, vb: f64) -> f64 {
    let v = vb.abs();
    if v == 0.0 {
        return f64::INFINITY;
    }
    tau0 * (activation / v).exp()
}

/// Pre-calculated FTJ coefficients.
#[derive(Debug, Clone)]
pub struct FtjDerived {
    /// Resolved barrier thickness.
    pub cells: UnitCells,
    /// Barrier thickness (m).
    pub tb: f64,
    /// Junction area (m^2).
    pub area: f64,
    /// High-resistance state coefficients.
    pub hrs: StateCoefficients,
    /// Low-resistance state coefficients.
    pub lrs: StateCoefficients,
    /// Switching kinetics.
    pub kinetics: KineticCoefficients,
    /// Time-step hint for the host (s).
    pub max_step: f64,
}

impl FtjDerived {
    /// Compute derived coefficients, validating the parameters first.
    pub fn from_params(p: &FtjParams) -> Result<Self> {
        p.validate()?;
        let cells = UnitCells::resolve(p.tb)?;

        let hrs = StateCoefficients::new(
            p.phi1_hrs,
            p.phi2_hrs,
            p.mass_hrs,
            p.tb,
            fn_fitting(cells, ResistanceState::High),
        );
        let lrs = StateCoefficients::new(
            p.phi1_lrs,
            p.phi2_lrs,
            p.mass_lrs,
            p.tb,
            fn_fitting(cells, ResistanceState::Low),
        );

        let field_scale = p.tb * p.e0 / p.thermal_voltage();
        let kinetics = KineticCoefficients {
            tau_n0: p.tau_n0,
            tau_p0: p.tau_p0,
            nucleation_activation: p.u_n * field_scale,
            propagation_activation: p.u_p * field_scale,
        };

        Ok(Self {
            cells,
            tb: p.tb,
            area: p.area(),
            hrs,
            lrs,
            kinetics,
            max_step: p.tstep,
        })
    }

    pub fn state(&self, state: ResistanceState) -> &StateCoefficients {
        match state {
            ResistanceState::High => &self.hrs,
            ResistanceState::Low => &self.lrs,
        }
    }
}
