//! Layered feedforward network and forward propagation.

use crate::matrix::{Matrix, MatrixError};
use rand::Rng;

/// Element-wise activation applied after every synapse multiply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Activation {
    /// Hyperbolic tangent, maps any input into (-1, 1).
    #[default]
    TanH,
    /// Logistic sigmoid, maps any input into (0, 1).
    Sigmoid,
    /// Identity, no squashing.
    Linear,
}

impl Activation {
    /// Apply the activation to a single value.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            // Kept in the explicit exponential form rather than f32::tanh
            // so outputs stay bit-compatible with previously evolved nets.
            Self::TanH => 2.0 / (1.0 + (-2.0 * t).exp()) - 1.0,
            Self::Sigmoid => 1.0 / (1.0 + (-t).exp()),
            Self::Linear => t,
        }
    }
}

/// Fully connected layered network.
///
/// Activation layers are 1×N rows: one input row, zero or more hidden rows
/// and one output row, with a synapse matrix between each consecutive pair.
/// For every adjacent pair the synapse matrix has as many rows as the
/// upstream layer and as many columns as the downstream layer, so there are
/// always `hidden count + 1` synapse matrices.
///
/// A network exclusively owns all of its matrices; cloning shares nothing
/// with the source.
#[derive(Clone, Debug)]
pub struct Network {
    input_neurons: Matrix,
    hidden_neurons: Vec<Matrix>,
    output_neurons: Matrix,
    synapses: Vec<Matrix>,
    activation: Activation,
    /// Fitness of the last trial, set by the external evaluator.
    pub fitness: f32,
}

impl Network {
    /// Build a network with freshly randomized synapses.
    ///
    /// Activation rows start at 1.0, synapse weights are drawn from the
    /// standard synapse range for their fan-out. Any zero layer size is an
    /// `InvalidTopology` error.
    pub fn new<R: Rng>(
        input_size: usize,
        output_size: usize,
        hidden_sizes: &[usize],
        rng: &mut R,
    ) -> Result<Self, NetworkError> {
        if input_size == 0 {
            return Err(NetworkError::InvalidTopology(
                "input layer size must be at least 1".to_string(),
            ));
        }
        if output_size == 0 {
            return Err(NetworkError::InvalidTopology(
                "output layer size must be at least 1".to_string(),
            ));
        }
        if let Some(layer) = hidden_sizes.iter().position(|&size| size == 0) {
            return Err(NetworkError::InvalidTopology(format!(
                "hidden layer {} has size 0",
                layer
            )));
        }

        let input_neurons = Matrix::ones(1, input_size);
        let hidden_neurons: Vec<Matrix> = hidden_sizes
            .iter()
            .map(|&size| Matrix::ones(1, size))
            .collect();
        let output_neurons = Matrix::ones(1, output_size);

        // One synapse matrix per consecutive layer pair.
        let mut synapses = Vec::with_capacity(hidden_sizes.len() + 1);
        let mut upstream = input_size;
        for &size in hidden_sizes {
            synapses.push(Matrix::random_synapse(upstream, size, rng));
            upstream = size;
        }
        synapses.push(Matrix::random_synapse(upstream, output_size, rng));

        Ok(Self {
            input_neurons,
            hidden_neurons,
            output_neurons,
            synapses,
            activation: Activation::TanH,
            fitness: 0.0,
        })
    }

    /// Build a network from the neural section of a config file.
    pub fn from_config<R: Rng>(
        config: &crate::config::NeuralConfig,
        rng: &mut R,
    ) -> Result<Self, NetworkError> {
        Self::new(
            config.input_size,
            config.output_size,
            &config.hidden_layer_sizes,
            rng,
        )
    }

    /// Select a different activation function (default is tanh).
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Process sensor values forward through the network.
    ///
    /// The sensor count may differ from the input layer size by at most one
    /// (a fixed bias slot tolerated by the input loading); anything beyond
    /// that is an `InputSizeMismatch` error. Each layer in order computes
    /// `activation(previous · synapse)`, including the output row.
    ///
    /// Deterministic for identical inputs and weights; touches only the
    /// network's own layer buffers.
    pub fn forward(&mut self, sensor_values: &[f32]) -> Result<Vec<f32>, NetworkError> {
        let expected = self.input_size();
        if sensor_values.len().abs_diff(expected) > 1 {
            return Err(NetworkError::InputSizeMismatch {
                expected,
                found: sensor_values.len(),
            });
        }
        self.input_neurons.set_row(0, sensor_values, true)?;

        let activation = self.activation;
        for i in 0..self.synapses.len() {
            let upstream = if i == 0 {
                &self.input_neurons
            } else {
                &self.hidden_neurons[i - 1]
            };
            let mut next = upstream.multiply(&self.synapses[i])?;
            next.map_inplace(|t| activation.apply(t));

            if i == self.hidden_neurons.len() {
                self.output_neurons = next;
            } else {
                self.hidden_neurons[i] = next;
            }
        }

        Ok(self.output_neurons.row_values(0))
    }

    /// Deep-copied snapshot of every synapse matrix, in layer order.
    pub fn synapses_clone(&self) -> Vec<Matrix> {
        self.synapses.to_vec()
    }

    /// Replace every synapse matrix's values.
    ///
    /// A count that disagrees with the network's synapse count is
    /// recoverable: the network is left unchanged, a warning is logged and
    /// `SynapseCountMismatch` is returned for the caller to check.
    pub fn insert_synapses(&mut self, new_synapses: &[Matrix]) -> Result<(), NetworkError> {
        if new_synapses.len() != self.synapses.len() {
            log::warn!(
                "Synapse count mismatch: {} matrices supplied, network has {}; doing nothing",
                new_synapses.len(),
                self.synapses.len()
            );
            return Err(NetworkError::SynapseCountMismatch {
                expected: self.synapses.len(),
                found: new_synapses.len(),
            });
        }
        for (current, new) in self.synapses.iter_mut().zip(new_synapses) {
            current.set_all(new)?;
        }
        Ok(())
    }

    /// Number of input neurons.
    pub fn input_size(&self) -> usize {
        self.input_neurons.cols()
    }

    /// Number of output neurons.
    pub fn output_size(&self) -> usize {
        self.output_neurons.cols()
    }

    /// Size of each hidden layer, in order.
    pub fn hidden_layer_sizes(&self) -> Vec<usize> {
        self.hidden_neurons.iter().map(|m| m.cols()).collect()
    }

    /// Number of synapse matrices (always hidden count + 1).
    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    /// The synapse matrices, in layer order.
    pub fn synapses(&self) -> &[Matrix] {
        &self.synapses
    }

    /// Output values from the most recent forward pass.
    pub fn last_outputs(&self) -> Vec<f32> {
        self.output_neurons.row_values(0)
    }

    /// The activation function in use.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Total number of synapse weights.
    pub fn parameter_count(&self) -> usize {
        self.synapses.iter().map(|m| m.rows() * m.cols()).sum()
    }

    /// Check that no weight is NaN or infinite.
    pub fn is_valid(&self) -> bool {
        self.synapses
            .iter()
            .all(|m| m.values().all(|w| w.is_finite()))
    }
}

/// Errors from network construction and inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    InvalidTopology(String),
    InputSizeMismatch { expected: usize, found: usize },
    SynapseCountMismatch { expected: usize, found: usize },
    Matrix(MatrixError),
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTopology(msg) => write!(f, "Invalid topology: {}", msg),
            Self::InputSizeMismatch { expected, found } => write!(
                f,
                "Input size mismatch: network expects {} sensors (one bias slot tolerated), got {}",
                expected, found
            ),
            Self::SynapseCountMismatch { expected, found } => write!(
                f,
                "Synapse count mismatch: network has {} matrices, got {}",
                expected, found
            ),
            Self::Matrix(e) => write!(f, "Matrix error: {}", e),
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Matrix(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MatrixError> for NetworkError {
    fn from(e: MatrixError) -> Self {
        Self::Matrix(e)
    }
}
