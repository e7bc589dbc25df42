//! Fowler-Nordheim fitting factors.
//!
//! The FN expression is scaled by an amplitude factor `F1` and an exponent
//! factor `F2` per bias polarity. The values were calibrated, with the
//! bias-shifted injection barrier, so that the FN branch meets the
//! direct-tunneling branch at each transition threshold for the default
//! barrier profile (`FtjParams::default()`). `F2` is matched to the
//! direct-tunneling log-slope where that gives a usable value and pinned to
//! 0.05 otherwise.

use super::derived::{ResistanceState, UnitCells};

/// `(F1, F2)` for one bias polarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FnFactors {
    /// Amplitude factor.
    pub f1: f64,
    /// Exponent factor.
    pub f2: f64,
}

/// Fitting quadruple for one resistance state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FnFitting {
    /// Used for `Vb >= T_pos`.
    pub positive: FnFactors,
    /// Used for `Vb <= T_neg`.
    pub negative: FnFactors,
}

const fn quad(f1_pos: f64, f2_pos: f64, f1_neg: f64, f2_neg: f64) -> FnFitting {
    FnFitting {
        positive: FnFactors { f1: f1_pos, f2: f2_pos },
        negative: FnFactors { f1: f1_neg, f2: f2_neg },
    }
}

// [cells 3, 4, 5, 6] x [HRS, LRS]
const TABLE: [[FnFitting; 2]; 4] = [
    [
        quad(9.844382e-3, 0.077, 3.175462e-1, 0.491),
        quad(3.014122e-2, 0.050, 1.293385e-1, 0.312),
    ],
    [
        quad(2.836420e-3, 0.119, 6.516685e-1, 0.606),
        quad(8.609103e-3, 0.076, 1.906465e-1, 0.454),
    ],
    [
        quad(8.758675e-4, 0.147, 1.378677e0, 0.677),
        quad(3.602758e-3, 0.112, 3.023737e-1, 0.546),
    ],
    [
        quad(2.729765e-4, 0.166, 2.953812e0, 0.725),
        quad(1.534434e-3, 0.137, 4.833365e-1, 0.608),
    ],
];

/// Look up the fitting quadruple for a barrier thickness and state.
pub fn fn_fitting(cells: UnitCells, state: ResistanceState) -> FnFitting {
    let row = match cells {
        UnitCells::Three => 0,
        UnitCells::Four => 1,
        UnitCells::Five => 2,
        UnitCells::Six => 3,
    };
    let col = match state {
        ResistanceState::High => 0,
        ResistanceState::Low => 1,
    };
    TABLE[row][col]
}
