//! Configuration for evolutionary runs.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::neural::MutationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub neural: NeuralConfig,
    pub evolution: EvolutionConfig,
    pub population: PopulationConfig,
}

/// Network topology configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuralConfig {
    /// Number of input neurons (sensor count)
    pub input_size: usize,
    /// Number of output neurons (actuator count)
    pub output_size: usize,
    /// Size of each hidden layer, in order
    pub hidden_layer_sizes: Vec<usize>,
}

/// Mutation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Allow the hidden-layer count to mutate
    pub hidden_layer_mutation: bool,
    /// Probability of a layer-count mutation per offspring
    pub hidden_layer_mutation_rate: f32,
    /// Allow per-layer neuron counts to mutate
    pub hidden_neuron_mutation: bool,
    /// Probability of a neuron-count mutation per offspring
    pub hidden_neuron_mutation_rate: f32,
    /// Probability of mutating each weight
    pub synapse_mutation_rate: f32,
    /// Magnitude of weight perturbations
    pub synapse_mutation_range: f32,
}

/// Breeding population configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Leaderboard capacity (number of breeding candidates kept)
    pub breeding_pool_size: usize,
    /// Random seed; pick one at random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            neural: NeuralConfig::default(),
            evolution: EvolutionConfig::default(),
            population: PopulationConfig::default(),
        }
    }
}

impl Default for NeuralConfig {
    fn default() -> Self {
        Self {
            input_size: 4,
            output_size: 2,
            hidden_layer_sizes: vec![5],
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        let mutation = MutationConfig::default();
        Self {
            hidden_layer_mutation: mutation.hidden_layer_mutation,
            hidden_layer_mutation_rate: mutation.hidden_layer_mutation_rate,
            hidden_neuron_mutation: mutation.hidden_neuron_mutation,
            hidden_neuron_mutation_rate: mutation.hidden_neuron_mutation_rate,
            synapse_mutation_rate: mutation.synapse_mutation_rate,
            synapse_mutation_range: mutation.synapse_mutation_range,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            breeding_pool_size: 8,
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

impl From<&EvolutionConfig> for MutationConfig {
    fn from(config: &EvolutionConfig) -> Self {
        Self {
            hidden_layer_mutation: config.hidden_layer_mutation,
            hidden_layer_mutation_rate: config.hidden_layer_mutation_rate,
            hidden_neuron_mutation: config.hidden_neuron_mutation,
            hidden_neuron_mutation_rate: config.hidden_neuron_mutation_rate,
            synapse_mutation_rate: config.synapse_mutation_rate,
            synapse_mutation_range: config.synapse_mutation_range,
        }
    }
}
