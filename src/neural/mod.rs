//! Neural network module: layered networks and their mutation operators.
//!
//! - Dense layer representation over [`crate::matrix::Matrix`]
//! - Forward inference with tanh squashing
//! - Weight mutations (five kinds, per-weight gated)
//! - Structural mutations (layer count, neuron count) that preserve
//!   overlapping weights

mod mutations;
mod network;

pub use mutations::{create_offspring, MutationConfig, MutationKind};
pub use network::{Activation, Network, NetworkError};
