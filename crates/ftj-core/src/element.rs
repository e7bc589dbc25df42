//! Traits implemented by devices that live in a circuit.

use nalgebra::DVector;

use crate::mna::MnaSystem;
use crate::node::NodeId;

/// A circuit element that connects nodes.
pub trait Element: std::fmt::Debug {
    /// Instance name (e.g. "XFTJ1").
    fn name(&self) -> &str;

    /// Terminal nodes, in pin order.
    fn nodes(&self) -> Vec<NodeId>;
}

/// Devices that can contribute to an MNA system.
pub trait Stamper: std::fmt::Debug + Send + Sync {
    /// Stamp this device into the MNA system (initial guess).
    fn stamp(&self, mna: &mut MnaSystem);

    /// Device name.
    fn device_name(&self) -> &str {
        ""
    }

    /// Number of extra current variables this device adds to the system.
    fn num_current_vars(&self) -> usize {
        0
    }

    /// Whether the device must be re-linearized on every Newton iteration.
    fn is_nonlinear(&self) -> bool {
        false
    }

    /// Stamp the companion model linearized around `solution` at simulation
    /// time `time`.
    ///
    /// Must not commit any device state: the iterate may be rejected.
    fn stamp_nonlinear(&self, mna: &mut MnaSystem, solution: &DVector<f64>, time: f64) {
        let _ = (solution, time);
        self.stamp(mna);
    }
}
