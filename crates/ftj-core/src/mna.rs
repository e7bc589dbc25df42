//! Dense Modified Nodal Analysis system.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// MNA system `A·x = b`.
///
/// The unknowns are the non-ground node voltages followed by one branch
/// current per voltage source.
#[derive(Debug, Clone)]
pub struct MnaSystem {
    /// Coefficient matrix.
    pub matrix: DMatrix<f64>,
    /// Right-hand side.
    pub rhs: DVector<f64>,
    /// Number of nodes (excluding ground).
    pub num_nodes: usize,
    /// Number of voltage-source branch currents.
    pub num_vsources: usize,
}

impl MnaSystem {
    pub fn new(num_nodes: usize, num_vsources: usize) -> Self {
        let size = num_nodes + num_vsources;
        Self {
            matrix: DMatrix::zeros(size, size),
            rhs: DVector::zeros(size),
            num_nodes,
            num_vsources,
        }
    }

    pub fn size(&self) -> usize {
        self.num_nodes + self.num_vsources
    }

    /// Zero the matrix and RHS, keeping the dimensions.
    pub fn clear(&mut self) {
        self.matrix.fill(0.0);
        self.rhs.fill(0.0);
    }

    /// Stamp conductance `g` between nodes `i` and `j` (`None` is ground).
    pub fn stamp_conductance(&mut self, i: Option<usize>, j: Option<usize>, g: f64) {
        if let Some(i) = i {
            self.matrix[(i, i)] += g;
        }
        if let Some(j) = j {
            self.matrix[(j, j)] += g;
        }
        if let (Some(i), Some(j)) = (i, j) {
            self.matrix[(i, j)] -= g;
            self.matrix[(j, i)] -= g;
        }
    }

    /// Stamp a current source driving `current` from node `i` into node `j`
    /// through the external circuit (it leaves `i` through the device).
    pub fn stamp_current_source(&mut self, i: Option<usize>, j: Option<usize>, current: f64) {
        if let Some(i) = i {
            self.rhs[i] -= current;
        }
        if let Some(j) = j {
            self.rhs[j] += current;
        }
    }

    /// Stamp an ideal voltage source `V(pos) - V(neg) = voltage` using branch
    /// current variable `branch` (0-based among voltage sources).
    pub fn stamp_voltage_source(
        &mut self,
        pos: Option<usize>,
        neg: Option<usize>,
        branch: usize,
        voltage: f64,
    ) {
        let row = self.num_nodes + branch;
        if let Some(p) = pos {
            self.matrix[(p, row)] += 1.0;
            self.matrix[(row, p)] += 1.0;
        }
        if let Some(n) = neg {
            self.matrix[(n, row)] -= 1.0;
            self.matrix[(row, n)] -= 1.0;
        }
        self.rhs[row] = voltage;
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    /// Solve the assembled system with a dense LU factorization.
    pub fn solve(&self) -> Result<DVector<f64>> {
        if self.matrix.nrows() != self.matrix.ncols() {
            return Err(Error::DimensionMismatch {
                expected: self.matrix.nrows(),
                actual: self.matrix.ncols(),
            });
        }
        if self.matrix.nrows() != self.rhs.len() {
            return Err(Error::DimensionMismatch {
                expected: self.matrix.nrows(),
                actual: self.rhs.len(),
            });
        }

        self.matrix
            .clone()
            .lu()
            .solve(&self.rhs)
            .ok_or(Error::SingularMatrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conductance_between_nodes() {
        let mut sys = MnaSystem::new(2, 0);
        sys.stamp_conductance(Some(0), Some(1), 2.0);

        assert_eq!(sys.matrix[(0, 0)], 2.0);
        assert_eq!(sys.matrix[(1, 1)], 2.0);
        assert_eq!(sys.matrix[(0, 1)], -2.0);
        assert_eq!(sys.matrix[(1, 0)], -2.0);
    }

    #[test]
    fn test_conductance_to_ground_touches_one_entry() {
        let mut sys = MnaSystem::new(2, 0);
        sys.stamp_conductance(None, Some(1), 0.5);

        assert_eq!(sys.matrix[(1, 1)], 0.5);
        assert_eq!(sys.matrix[(0, 0)], 0.0);
        assert_eq!(sys.matrix[(0, 1)], 0.0);
    }

    #[test]
    fn test_current_source_signs() {
        let mut sys = MnaSystem::new(2, 0);
        sys.stamp_current_source(Some(0), Some(1), 1e-3);

        assert_eq!(sys.rhs[0], -1e-3);
        assert_eq!(sys.rhs[1], 1e-3);
    }

    #[test]
    fn test_divider_solves() {
        // V1 = 2V on node 1, 1k to node 2, 1k to ground.
        let mut sys = MnaSystem::new(2, 1);
        sys.stamp_voltage_source(Some(0), None, 0, 2.0);
        sys.stamp_conductance(Some(0), Some(1), 1e-3);
        sys.stamp_conductance(Some(1), None, 1e-3);

        let x = sys.solve().unwrap();
        assert!((x[0] - 2.0).abs() < 1e-12, "V(1) = {}", x[0]);
        assert!((x[1] - 1.0).abs() < 1e-12, "V(2) = {}", x[1]);
        // Source delivers 1 mA, so its branch current is -1 mA.
        assert!((x[2] + 1e-3).abs() < 1e-15, "I(V1) = {}", x[2]);
    }

    #[test]
    fn test_floating_node_is_singular() {
        let mut sys = MnaSystem::new(2, 0);
        sys.stamp_conductance(Some(0), None, 1.0);

        assert!(matches!(sys.solve(), Err(Error::SingularMatrix)));
    }

    #[test]
    fn test_dimension_mismatch_reported() {
        let mut sys = MnaSystem::new(2, 0);
        sys.rhs = DVector::zeros(3);

        assert!(matches!(
            sys.solve(),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }
}
