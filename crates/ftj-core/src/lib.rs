//! Node, element and MNA primitives for FTJ device models.
//!
//! These are the pieces a host circuit solver sees when it talks to a
//! device: node identifiers, the [`Element`]/[`Stamper`] traits, and a dense
//! Modified Nodal Analysis system that devices stamp their linearized
//! companion models into.

pub mod element;
pub mod error;
pub mod mna;
pub mod node;
pub mod units;

pub use element::{Element, Stamper};
pub use error::{Error, Result};
pub use mna::MnaSystem;
pub use node::NodeId;
