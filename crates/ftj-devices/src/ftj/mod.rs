//! Ferroelectric tunnel junction (FTJ) compact model.
//!
//! The junction is a thin ferroelectric barrier whose polarization selects
//! one of two tunneling barrier profiles: the high-resistance state (HRS)
//! and the low-resistance state (LRS). A real junction is a mixture of both
//! domains; the fraction in the LRS is the model's order parameter.
//!
//! Every evaluation computes both hypothetical state currents at the
//! terminal bias, advances the domain fractions over the elapsed time, and
//! blends:
//!
//! ```text
//! Id = I_hrs * (1 - s) + I_lrs * s
//! ```
//!
//! Positive bias drives the junction toward the HRS, negative bias toward
//! the LRS.
//!
//! # Usage
//!
//! ```text
//! .MODEL FTJ4 FTJ TB=1.6n RADIUS=50n S0=0.5
//! XFTJ1 top bottom FTJ4
//! ```

pub mod derived;
pub mod fitting;
pub mod kinetics;
pub mod params;
pub mod tunneling;

pub use derived::{FtjDerived, KineticCoefficients, ResistanceState, StateCoefficients, UnitCells};
pub use fitting::{FnFactors, FnFitting, fn_fitting};
pub use kinetics::{Direction, DomainPhase, DomainState, FRACTION_FLOOR, KineticRegime};
pub use params::FtjParams;
pub use tunneling::{TunnelingRegime, TunnelingResult};

use ftj_core::mna::MnaSystem;
use ftj_core::units::format_value;
use ftj_core::{Element, NodeId, Stamper};
use nalgebra::DVector;

use crate::error::Result;

/// Shunt conductance stamped for the initial guess (S).
const GMIN: f64 = 1e-12;

/// Voltage step for the numerical small-signal conductance (V).
const DIFF_STEP: f64 = 1e-5;

/// Result of one FTJ evaluation.
#[derive(Debug, Clone)]
pub struct FtjEvaluation {
    /// Bias used for the current, after the crossover guard (V).
    pub vb: f64,
    /// Terminal current, positive from the positive to the negative node (A).
    pub current: f64,
    /// Current if the whole junction were HRS (A).
    pub i_hrs: f64,
    /// Current if the whole junction were LRS (A).
    pub i_lrs: f64,
    /// LRS volume fraction after this evaluation.
    pub order_parameter: f64,
    /// HRS volume fraction after this evaluation.
    pub high_fraction: f64,
    /// Largest time step the host should take next (s).
    pub max_step: f64,
    pub hrs_regime: TunnelingRegime,
    pub lrs_regime: TunnelingRegime,
    pub kinetic_regime: KineticRegime,
}

/// A ferroelectric tunnel junction.
#[derive(Debug, Clone)]
pub struct Ftj {
    /// Instance name (e.g. "XFTJ1").
    pub name: String,
    /// Positive (top electrode) node.
    pub node_pos: NodeId,
    /// Negative (bottom electrode) node.
    pub node_neg: NodeId,
    /// Model parameters.
    pub params: FtjParams,
    derived: FtjDerived,
    state: DomainState,
}

impl Ftj {
    /// Create an FTJ with default parameters.
    pub fn new(name: impl Into<String>, node_pos: NodeId, node_neg: NodeId) -> Result<Self> {
        Self::with_params(name, node_pos, node_neg, FtjParams::default())
    }

    /// Create an FTJ with custom parameters.
    ///
    /// Fails if a parameter is out of range or the barrier thickness is not
    /// a supported number of unit cells.
    pub fn with_params(
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        params: FtjParams,
    ) -> Result<Self> {
        let name = name.into();
        let derived = FtjDerived::from_params(&params)?;
        log::debug!(
            "{name}: tb = {}m ({} unit cells), HRS thresholds [{}, {}] V, LRS thresholds [{}, {}] V",
            format_value(derived.tb),
            derived.cells.count(),
            derived.hrs.t_neg,
            derived.hrs.t_pos,
            derived.lrs.t_neg,
            derived.lrs.t_pos,
        );
        let state = DomainState::new(params.s0, 0.0);

        Ok(Self {
            name,
            node_pos,
            node_neg,
            params,
            derived,
            state,
        })
    }

    /// Recompute derived coefficients after modifying `params`.
    ///
    /// The domain state is kept.
    pub fn update_derived(&mut self) -> Result<()> {
        self.derived = FtjDerived::from_params(&self.params)?;
        Ok(())
    }

    /// Return to the initial domain state at time zero.
    pub fn reset(&mut self) {
        self.state = DomainState::new(self.params.s0, 0.0);
    }

    pub fn derived(&self) -> &FtjDerived {
        &self.derived
    }

    pub fn state(&self) -> &DomainState {
        &self.state
    }

    /// LRS volume fraction.
    pub fn order_parameter(&self) -> f64 {
        self.state.low_fraction()
    }

    /// Evaluate at bias `vb` (V) and simulation time `time` (s), committing
    /// the switching that happened since the last committed evaluation.
    ///
    /// A `time` at or before the last committed evaluation reuses the stored
    /// fractions, so repeated calls at one time point are idempotent.
    pub fn evaluate(&mut self, vb: f64, time: f64) -> FtjEvaluation {
        self.state = self.state.advance(vb, time, &self.derived.kinetics);
        self.evaluate_state(vb, &self.state)
    }

    /// Same as [`evaluate`](Self::evaluate) without committing the new state.
    pub fn probe(&self, vb: f64, time: f64) -> FtjEvaluation {
        let state = self.state.advance(vb, time, &self.derived.kinetics);
        self.evaluate_state(vb, &state)
    }

    fn evaluate_state(&self, vb: f64, state: &DomainState) -> FtjEvaluation {
        let t = tunneling::evaluate(vb, &self.derived);
        let low = state.low_fraction();
        let high = state.high_fraction();

        FtjEvaluation {
            vb: t.vb,
            current: t.i_hrs * high + t.i_lrs * low,
            i_hrs: t.i_hrs,
            i_lrs: t.i_lrs,
            order_parameter: low,
            high_fraction: high,
            max_step: self.derived.max_step,
            hrs_regime: t.hrs_regime,
            lrs_regime: t.lrs_regime,
            kinetic_regime: state.regime(vb),
        }
    }

    /// Small-signal conductance dI/dV at `vb` with the domain fractions of
    /// `state` held fixed.
    fn conductance(&self, vb: f64, state: &DomainState) -> f64 {
        let blended = |v: f64| {
            let t = tunneling::evaluate(v, &self.derived);
            t.i_hrs * state.high_fraction() + t.i_lrs * state.low_fraction()
        };
        (blended(vb + DIFF_STEP) - blended(vb - DIFF_STEP)) / (2.0 * DIFF_STEP)
    }

    /// Stamp the FTJ linearized at bias `vb` and time `time`.
    ///
    /// The junction is replaced by a conductance `G = dI/dV` in parallel with
    /// a current source `Ieq = I - G*Vb`, both evaluated on the trial state
    /// from [`probe`](Self::probe).
    pub fn stamp_linearized_at(&self, mna: &mut MnaSystem, vb: f64, time: f64) {
        let state = self.state.advance(vb, time, &self.derived.kinetics);
        let current = self.evaluate_state(vb, &state).current;
        let g = self.conductance(vb, &state).max(GMIN);
        let ieq = current - g * vb;

        let i = self.node_pos.mna_index();
        let j = self.node_neg.mna_index();
        mna.stamp_conductance(i, j, g);
        mna.stamp_current_source(i, j, ieq);
    }
}

impl Element for Ftj {
    fn name(&self) -> &str {
        &self.name
    }

    fn nodes(&self) -> Vec<NodeId> {
        vec![self.node_pos, self.node_neg]
    }
}

impl Stamper for Ftj {
    fn stamp(&self, mna: &mut MnaSystem) {
        let i = self.node_pos.mna_index();
        let j = self.node_neg.mna_index();
        mna.stamp_conductance(i, j, GMIN);
    }

    fn device_name(&self) -> &str {
        &self.name
    }

    fn is_nonlinear(&self) -> bool {
        true
    }

    fn stamp_nonlinear(&self, mna: &mut MnaSystem, solution: &DVector<f64>, time: f64) {
        let vp = self.node_pos.mna_index().map(|i| solution[i]).unwrap_or(0.0);
        let vn = self.node_neg.mna_index().map(|i| solution[i]).unwrap_or(0.0);
        self.stamp_linearized_at(mna, vp - vn, time);
    }
}
