//! Mutation operators that derive an offspring network from a parent.
//!
//! Three independent mutation classes, each gated by its own probability:
//! - hidden-layer-count mutation (grow or shrink the layer pipeline)
//! - hidden-neuron-count mutation (resize one hidden layer by one neuron)
//! - per-weight value mutation (always applied, per-weight gated)
//!
//! Structural changes go through [`Matrix::redimension`], so overlapping
//! weights survive a topology change. The parent is never touched; the
//! offspring owns entirely fresh storage.

use crate::matrix::Matrix;
use crate::neural::network::{Network, NetworkError};
use rand::Rng;

/// Configuration for offspring generation.
///
/// Immutable per evolutionary run; pass the same instance to every
/// [`create_offspring`] call.
#[derive(Clone, Debug)]
pub struct MutationConfig {
    /// Allow the number of hidden layers to change.
    pub hidden_layer_mutation: bool,
    /// Probability of a hidden-layer-count mutation per offspring.
    pub hidden_layer_mutation_rate: f32,
    /// Allow hidden layers to gain or lose single neurons.
    pub hidden_neuron_mutation: bool,
    /// Probability of a neuron-count mutation per offspring.
    pub hidden_neuron_mutation_rate: f32,
    /// Probability of mutating each individual weight.
    pub synapse_mutation_rate: f32,
    /// Magnitude of weight perturbations.
    pub synapse_mutation_range: f32,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            hidden_layer_mutation: true,
            hidden_layer_mutation_rate: 0.01,
            hidden_neuron_mutation: true,
            hidden_neuron_mutation_rate: 0.01,
            synapse_mutation_rate: 0.1,
            synapse_mutation_range: 0.1,
        }
    }
}

/// How a single weight is rewritten when its mutation gate fires.
///
/// The enumeration is closed and the dispatch below matches exhaustively,
/// so there is no "unknown kind" fallback to defend against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    /// Add a uniform perturbation in `[-range, range]`.
    Additive,
    /// Scale by a uniform factor in `[1 - 5*range, 1 + 5*range]`.
    Multiply,
    /// Negate the weight.
    Reverse,
    /// Redraw from the standard synapse range for the matrix's fan-out.
    Replace,
    /// Set the weight to zero.
    Nullify,
}

impl MutationKind {
    const ALL: [MutationKind; 5] = [
        Self::Additive,
        Self::Multiply,
        Self::Reverse,
        Self::Replace,
        Self::Nullify,
    ];

    /// Draw one kind uniformly.
    fn sample<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Create a mutated offspring of `parent`.
///
/// Snapshots the parent's hidden-layer sizes and synapse values, applies
/// the configured mutations, then builds a brand-new network of the
/// (possibly changed) topology and injects the mutated synapses. The
/// offspring always satisfies the adjacency invariant and shares no
/// storage with the parent.
pub fn create_offspring<R: Rng>(
    parent: &Network,
    config: &MutationConfig,
    rng: &mut R,
) -> Result<Network, NetworkError> {
    let mut hidden_sizes = parent.hidden_layer_sizes();
    let mut synapses = parent.synapses_clone();
    let output_size = parent.output_size();

    if config.hidden_layer_mutation && rng.gen::<f32>() < config.hidden_layer_mutation_rate {
        mutate_hidden_layer_count(&mut hidden_sizes, &mut synapses, output_size, rng);
    }

    if config.hidden_neuron_mutation && rng.gen::<f32>() < config.hidden_neuron_mutation_rate {
        mutate_hidden_neuron_count(&mut hidden_sizes, &mut synapses, rng);
    }

    mutate_synapse_values(&mut synapses, config, rng);

    let mut offspring = Network::new(parent.input_size(), output_size, &hidden_sizes, rng)?
        .with_activation(parent.activation());
    offspring.insert_synapses(&synapses)?;
    Ok(offspring)
}

/// Grow or shrink the hidden-layer pipeline by one layer.
///
/// Shrinking drops the last hidden layer (only when more than one remains)
/// and redimensions the new last synapse matrix to connect straight to the
/// output. Growing appends a hidden layer sized like the output, a fresh
/// random synapse matrix to the output, and redimensions the matrix that
/// used to be last so it feeds the new layer.
fn mutate_hidden_layer_count<R: Rng>(
    hidden_sizes: &mut Vec<usize>,
    synapses: &mut Vec<Matrix>,
    output_size: usize,
    rng: &mut R,
) {
    if rng.gen::<f32>() < 0.5 && hidden_sizes.len() > 1 {
        hidden_sizes.pop();
        synapses.pop();

        let last = synapses.len() - 1;
        let resized = synapses[last].redimension(synapses[last].rows(), output_size);
        synapses[last] = resized;
    } else {
        hidden_sizes.push(output_size);

        let last = synapses.len() - 1;
        let resized = synapses[last].redimension(synapses[last].rows(), output_size);
        synapses[last] = resized;
        synapses.push(Matrix::random_synapse(output_size, output_size, rng));
    }
}

/// Resize one hidden layer by a single neuron.
///
/// Picks a hidden layer uniformly, shrinks it with 50% probability (only
/// above size 1), otherwise grows it, and redimensions the two adjacent
/// synapse matrices so overlapping weights are preserved. No-op for
/// networks without hidden layers.
fn mutate_hidden_neuron_count<R: Rng>(
    hidden_sizes: &mut [usize],
    synapses: &mut [Matrix],
    rng: &mut R,
) {
    if hidden_sizes.is_empty() {
        return;
    }

    let layer = rng.gen_range(0..hidden_sizes.len());
    if rng.gen::<f32>() < 0.5 && hidden_sizes[layer] > 1 {
        hidden_sizes[layer] -= 1;
    } else {
        hidden_sizes[layer] += 1;
    }
    let new_size = hidden_sizes[layer];

    let feed_in = synapses[layer].redimension(synapses[layer].rows(), new_size);
    synapses[layer] = feed_in;

    let feed_out = synapses[layer + 1].redimension(new_size, synapses[layer + 1].cols());
    synapses[layer + 1] = feed_out;
}

/// Rewrite individual weights, each gated by the per-weight mutation rate.
fn mutate_synapse_values<R: Rng>(synapses: &mut [Matrix], config: &MutationConfig, rng: &mut R) {
    let rate = config.synapse_mutation_rate;
    let range = config.synapse_mutation_range;

    for synapse in synapses.iter_mut() {
        let replace_range = Matrix::standard_synapse_range(synapse.cols());

        synapse.map_inplace(|weight| {
            if rng.gen::<f32>() >= rate {
                return weight;
            }
            match MutationKind::sample(rng) {
                MutationKind::Additive => weight + rng.gen_range(-range..range),
                MutationKind::Multiply => {
                    weight * rng.gen_range(1.0 - 5.0 * range..1.0 + 5.0 * range)
                }
                MutationKind::Reverse => -weight,
                MutationKind::Replace => rng.gen_range(-replace_range..replace_range),
                MutationKind::Nullify => 0.0,
            }
        });
    }
}
