//! Ferroelectric tunnel junction compact model.
//!
//! This crate provides:
//! - The FTJ device: tunneling currents for both polarization states,
//!   blended by a domain-switching state machine
//! - Parameter loading from defaults, JSON or model-card entries
//! - MNA companion stamps through the [`ftj_core`] traits
//! - Bias waveforms and a fixed-step driver for hysteresis sweeps

pub mod error;
pub mod ftj;
pub mod sweep;
pub mod waveforms;

pub use error::{Error, Result};
pub use ftj::{Ftj, FtjEvaluation, FtjParams, KineticRegime, TunnelingRegime};
pub use sweep::{Trace, TracePoint, drive};
pub use waveforms::Waveform;
