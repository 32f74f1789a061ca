//! Benchmarks for archive admission and cousin sampling.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use quant_evolve::{
    evolve::{EvolutionaryDatabase, EvolveRng, FeatureMap},
    schema::{CousinParams, DimensionSpec, EvolveConfig, Strategy, StrategyId, StrategyMetrics, keys},
};

fn grid_dimensions(bins: usize) -> Vec<DimensionSpec> {
    vec![
        DimensionSpec::continuous(keys::NUM_TRADES, bins, 0.0, 1000.0),
        DimensionSpec::continuous(keys::WIN_RATE, bins, 0.0, 1.0),
        DimensionSpec::continuous(keys::SHARPE_RATIO, bins, -2.0, 4.0),
    ]
}

fn random_metrics(rng: &mut EvolveRng) -> StrategyMetrics {
    let mut metrics = StrategyMetrics::new();
    metrics.set(keys::SHARPE_RATIO, rng.normal(0.5, 1.0));
    metrics.set(keys::NUM_TRADES, rng.uniform() * 1000.0);
    metrics.set(keys::WIN_RATE, rng.uniform());
    metrics
}

fn bench_archive_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_admission");

    for bins in [8, 16, 32] {
        let mut map = FeatureMap::new(grid_dimensions(bins));
        let mut rng = EvolveRng::new(42);

        // Pre-populate so admissions hit a mix of empty and contested cells
        for i in 0..10_000u64 {
            let metrics = random_metrics(&mut rng);
            let vector = map.feature_vector(&metrics);
            map.add(StrategyId(i), metrics.combined_score(), &vector);
        }

        let mut next_id = 10_000u64;
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{bins}^3 cells")),
            &bins,
            |b, _| {
                b.iter(|| {
                    let metrics = random_metrics(&mut rng);
                    let vector = map.feature_vector(black_box(&metrics));
                    map.add(StrategyId(next_id), metrics.combined_score(), &vector);
                    next_id += 1;
                });
            },
        );
    }

    group.finish();
}

fn bench_cousin_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("cousin_sampling");

    for population in [100usize, 1_000, 10_000] {
        let config = EvolveConfig {
            dimensions: grid_dimensions(16),
            categories: vec!["momentum".to_string()],
            random_seed: Some(42),
            ..EvolveConfig::default()
        };
        let mut database = EvolutionaryDatabase::new(&config).unwrap();
        let mut rng = EvolveRng::new(7);

        let seeds = (0..config.num_islands())
            .map(|i| Strategy::new("seed", "hold()", random_metrics(&mut rng), 0, i, None))
            .collect();
        database.initialize_islands(seeds).unwrap();
        for _ in 0..population {
            let strategy = Strategy::new("candidate", "rule()", random_metrics(&mut rng), 1, 0, None);
            database.add_strategy(strategy, 0).unwrap();
        }

        let params = CousinParams::default();
        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &population,
            |b, _| {
                b.iter(|| {
                    let parent = database.sample_parent(0, 0.5).unwrap().unwrap();
                    black_box(database.sample_cousins(parent, 0, &params).unwrap());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_archive_admission, bench_cousin_sampling);
criterion_main!(benches);
