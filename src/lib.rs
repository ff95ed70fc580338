//! # NEUREVO
//!
//! Gradient-free neuroevolution core: layered feedforward networks evolved
//! by weight/topology mutation and fitness-based ranking.
//!
//! ## Features
//!
//! - **Layered networks**: dense activation rows and synapse matrices with
//!   tanh squashing
//! - **Evolvable**: weight mutations plus structural mutations that grow
//!   and shrink the topology while keeping learned weights
//! - **Rankable**: fixed-capacity fitness leaderboard for breeding selection
//! - **Configurable**: YAML configuration files
//! - **Reproducible**: every randomized operation takes an injected,
//!   seedable random generator
//!
//! ## Quick Start
//!
//! ```rust
//! use neurevo::{create_offspring, MutationConfig, Network, RankedPopulation};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! // Build a network: 3 sensors, 2 actuators, one hidden layer of 4.
//! let mut net = Network::new(3, 2, &[4], &mut rng).unwrap();
//! let outputs = net.forward(&[0.2, 0.5, 0.8]).unwrap();
//! assert_eq!(outputs.len(), 2);
//!
//! // The external evaluator scores the trial.
//! net.fitness = 12.5;
//!
//! // Rank it and breed the next candidate from the best network.
//! let mut leaderboard = RankedPopulation::new(8);
//! leaderboard.consider(net);
//!
//! let parent = leaderboard.best().unwrap();
//! let offspring = create_offspring(parent, &MutationConfig::default(), &mut rng).unwrap();
//! assert!(offspring.is_valid());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use neurevo::Config;
//!
//! let mut config = Config::default();
//! config.neural.hidden_layer_sizes = vec![6, 4];
//! config.evolution.synapse_mutation_rate = 0.15;
//! ```
//!
//! The simulation loop, fitness formula and rendering live outside this
//! crate: callers feed sensor values into [`Network::forward`], write the
//! resulting [`Network::fitness`], and hand finished networks to
//! [`RankedPopulation::consider`].

pub mod config;
pub mod evolution;
pub mod matrix;
pub mod neural;

// Re-export main types
pub use config::Config;
pub use evolution::RankedPopulation;
pub use matrix::{Matrix, MatrixError};
pub use neural::{create_offspring, Activation, MutationConfig, MutationKind, Network, NetworkError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
