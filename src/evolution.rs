//! Fitness-ranked leaderboard used to pick breeding candidates.

use crate::neural::Network;

/// Fixed-capacity leaderboard of networks, sorted descending by fitness.
///
/// Holds at most `capacity` networks; a contender enters only if its
/// fitness is strictly greater than an existing entry's (or a slot is
/// still free), so equal-fitness entries keep their insertion order.
///
/// This is shared, mutable state in a concurrent evaluation setup: all
/// [`consider`](Self::consider) calls must go through a single writer
/// (e.g. behind a mutex or one coordinating task).
#[derive(Clone, Debug)]
pub struct RankedPopulation {
    capacity: usize,
    ranked: Vec<Network>,
}

impl RankedPopulation {
    /// Create an empty leaderboard with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ranked: Vec::with_capacity(capacity),
        }
    }

    /// Offer a contender to the leaderboard.
    ///
    /// The contender is ranked above the first entry whose fitness is
    /// strictly below its own; entries past capacity fall off the bottom.
    /// Ties never displace an earlier entry.
    pub fn consider(&mut self, contender: Network) {
        let position = self
            .ranked
            .iter()
            .position(|ranked| contender.fitness > ranked.fitness)
            .unwrap_or(self.ranked.len());

        if position >= self.capacity {
            return;
        }
        self.ranked.insert(position, contender);
        self.ranked.truncate(self.capacity);
    }

    /// The highest-ranked network, if any.
    pub fn best(&self) -> Option<&Network> {
        self.ranked.first()
    }

    /// The network at the given rank (0 = best).
    pub fn get(&self, rank: usize) -> Option<&Network> {
        self.ranked.get(rank)
    }

    /// Fitness of the lowest-ranked entry, if any.
    pub fn min_fitness(&self) -> Option<f32> {
        self.ranked.last().map(|net| net.fitness)
    }

    /// Iterate over entries from best to worst.
    pub fn iter(&self) -> impl Iterator<Item = &Network> {
        self.ranked.iter()
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Whether no network has been accepted yet.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Consume the leaderboard, yielding the ranked networks best-first.
    pub fn into_ranked(self) -> Vec<Network> {
        self.ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn scored(fitness: f32, rng: &mut ChaCha8Rng) -> Network {
        let mut net = Network::new(2, 1, &[2], rng).unwrap();
        net.fitness = fitness;
        net
    }

    fn fitness_order(pop: &RankedPopulation) -> Vec<f32> {
        pop.iter().map(|net| net.fitness).collect()
    }

    #[test]
    fn test_fills_up_to_capacity() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut pop = RankedPopulation::new(3);
        assert!(pop.is_empty());

        pop.consider(scored(1.0, &mut rng));
        pop.consider(scored(2.0, &mut rng));
        assert_eq!(pop.len(), 2);
        assert_eq!(fitness_order(&pop), vec![2.0, 1.0]);
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut pop = RankedPopulation::new(3);

        for fitness in [5.0, 9.0, 2.0, 9.0, 12.0] {
            pop.consider(scored(fitness, &mut rng));
        }

        assert_eq!(pop.len(), 3);
        assert_eq!(fitness_order(&pop), vec![12.0, 9.0, 9.0]);
        assert_eq!(pop.best().unwrap().fitness, 12.0);
        assert_eq!(pop.min_fitness(), Some(9.0));
    }

    #[test]
    fn test_tie_break_first_inserted_wins() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut pop = RankedPopulation::new(2);

        // Mark the first 9.0 entry so we can tell the two apart.
        let mut first = scored(9.0, &mut rng);
        let marker = vec![
            crate::matrix::Matrix::ones(2, 2),
            crate::matrix::Matrix::ones(2, 1),
        ];
        first.insert_synapses(&marker).unwrap();

        for fitness in [5.0, 2.0] {
            pop.consider(scored(fitness, &mut rng));
        }
        pop.consider(first);
        pop.consider(scored(9.0, &mut rng));
        pop.consider(scored(12.0, &mut rng));

        assert_eq!(fitness_order(&pop), vec![12.0, 9.0]);
        // The surviving 9.0 must be the first-inserted (all-ones) one.
        assert_eq!(pop.get(1).unwrap().synapses()[0].get(0, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_low_fitness_rejected_when_full() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let mut pop = RankedPopulation::new(2);

        for fitness in [10.0, 8.0, 3.0] {
            pop.consider(scored(fitness, &mut rng));
        }

        assert_eq!(fitness_order(&pop), vec![10.0, 8.0]);
    }

    #[test]
    fn test_into_ranked() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let mut pop = RankedPopulation::new(4);
        for fitness in [1.0, 4.0, 3.0] {
            pop.consider(scored(fitness, &mut rng));
        }

        let ranked = pop.into_ranked();
        let order: Vec<f32> = ranked.iter().map(|net| net.fitness).collect();
        assert_eq!(order, vec![4.0, 3.0, 1.0]);
    }

    #[test]
    fn test_zero_capacity_accepts_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let mut pop = RankedPopulation::new(0);
        pop.consider(scored(100.0, &mut rng));
        assert!(pop.is_empty());
    }
}
