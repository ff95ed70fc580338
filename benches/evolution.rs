//! Performance benchmarks for the neuroevolution core.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use neurevo::{create_offspring, MutationConfig, Network, RankedPopulation};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn benchmark_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for hidden in [vec![8], vec![16, 16], vec![32, 32, 32]] {
        let mut net = Network::new(8, 4, &hidden, &mut rng).unwrap();
        let inputs = [0.5f32; 8];

        group.bench_with_input(
            BenchmarkId::new("hidden_layers", hidden.len()),
            &hidden,
            |b, _| {
                b.iter(|| net.forward(black_box(&inputs)).unwrap());
            },
        );
    }

    group.finish();
}

fn benchmark_create_offspring(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let parent = Network::new(8, 4, &[16, 16], &mut rng).unwrap();
    let config = MutationConfig::default();

    c.bench_function("create_offspring", |b| {
        b.iter(|| create_offspring(black_box(&parent), &config, &mut rng).unwrap());
    });
}

fn benchmark_consider(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut contenders = Vec::new();
    for i in 0..100 {
        let mut net = Network::new(4, 2, &[4], &mut rng).unwrap();
        net.fitness = (i * 37 % 100) as f32;
        contenders.push(net);
    }

    c.bench_function("ranked_population_consider_100", |b| {
        b.iter(|| {
            let mut pop = RankedPopulation::new(10);
            for net in &contenders {
                pop.consider(net.clone());
            }
            pop.len()
        });
    });
}

criterion_group!(
    benches,
    benchmark_forward,
    benchmark_create_offspring,
    benchmark_consider
);
criterion_main!(benches);
