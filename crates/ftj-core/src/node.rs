//! Node identifiers.

use std::fmt;

/// Identifier of a circuit node. Node 0 is ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The ground (reference) node.
    pub const GROUND: NodeId = NodeId(0);

    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn is_ground(self) -> bool {
        self.0 == 0
    }

    /// Row/column of this node in an MNA matrix.
    ///
    /// Ground is eliminated from the system, so it has no index.
    pub fn mna_index(self) -> Option<usize> {
        if self.is_ground() {
            None
        } else {
            Some((self.0 - 1) as usize)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "GND")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
