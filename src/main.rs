//! QuantEvolve CLI - Run an evolution from JSON configuration.
//!
//! Uses a built-in synthetic generator and evaluator so the evolutionary
//! dynamics can be exercised without external services plugged in.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use quant_evolve::{
    evolve::{
        BoundaryError, EvolutionDriver, EvolutionaryDatabase, EvolveRng, GenerationContext,
        HypothesisGenerator, StrategyAnalysis, StrategyDraft, StrategyEvaluator,
    },
    schema::{EvolveConfig, Strategy, StrategyMetrics, keys},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations] [output_dir]", args[0]);
        eprintln!();
        eprintln!("Run a QuantEvolve evolution from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to evolution configuration file");
        eprintln!("  generations  Number of generations (default: from config)");
        eprintln!("  output_dir   Snapshot directory (default: snapshot)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });
    let config: EvolveConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    let generations: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.evolution.num_generations);
    let output_dir = PathBuf::from(args.get(3).map(String::as_str).unwrap_or("snapshot"));

    println!("QuantEvolve");
    println!("===========");
    println!(
        "Islands: {} ({} categories + benchmark)",
        config.num_islands(),
        config.categories.len()
    );
    println!("Dimensions: {}", config.dimensions.len());
    println!("Generations: {}", generations);
    println!();

    let mut database = EvolutionaryDatabase::new(&config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    // One root RNG seeds both demo collaborators, keeping the whole run
    // reproducible from the single configured seed
    let mut demo_rng = EvolveRng::new(config.random_seed.unwrap_or(0));
    let generator = DemoGenerator::new(demo_rng.next_seed());
    let mut evaluator = DemoEvaluator::new(demo_rng.next_seed());
    let seeds = seed_strategies(&config, &mut evaluator);
    if let Err(e) = database.initialize_islands(seeds) {
        eprintln!("Initialization failed: {}", e);
        std::process::exit(1);
    }

    println!("Running evolution...");
    let start = Instant::now();

    let driver =
        EvolutionDriver::new(database, generator, evaluator, config).with_checkpoints(&output_dir);
    let database = match driver.run(generations) {
        Ok(database) => database,
        Err(e) => {
            eprintln!("Evolution failed: {}", e);
            std::process::exit(1);
        }
    };

    let elapsed = start.elapsed();
    let stats = database.statistics();

    println!();
    println!("Final state:");
    println!("  Strategies: {}", stats.total_strategies);
    println!("  Elites: {}", stats.total_elites);
    println!("  Rejected: {}", stats.total_rejected);
    println!("  Insights: {}", stats.num_insights);
    println!(
        "  Archive: {}/{} cells ({:.1}% coverage)",
        stats.feature_map.count,
        database.feature_map().total_cells(),
        stats.feature_map.coverage * 100.0
    );
    println!();
    println!("Islands:");
    for island in &stats.islands {
        println!(
            "  [{}] {}: population={}, elites={}, best={:.3}",
            island.id,
            island.category,
            island.population,
            island.elites,
            island.max_score.unwrap_or(f64::NAN)
        );
    }
    println!();
    println!("Top strategies:");
    for strategy in database.top_strategies(10) {
        println!(
            "  {} score={:.3} gen={} island={} \"{}\"",
            strategy.id,
            strategy.combined_score,
            strategy.generation,
            strategy.island_id,
            strategy.hypothesis
        );
    }

    if let Err(e) = database.save(&output_dir) {
        eprintln!("Snapshot failed: {}", e);
        std::process::exit(1);
    }
    println!();
    println!("Snapshot written to {}", output_dir.display());
    println!(
        "Time: {:.2}s ({:.1} generations/s)",
        elapsed.as_secs_f32(),
        generations as f32 / elapsed.as_secs_f32()
    );
}

fn print_example_config() {
    let config = EvolveConfig::default();
    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}

/// One seed per island: a flat benchmark-like strategy with modest metrics,
/// spread across category bins so the archive starts with distinct niches.
fn seed_strategies(config: &EvolveConfig, evaluator: &mut DemoEvaluator) -> Vec<Strategy> {
    (0..config.num_islands())
        .map(|island_id| {
            let mut metrics = evaluator
                .evaluate("hold()")
                .unwrap_or_else(|_| StrategyMetrics::worst_case());
            metrics.set(keys::STRATEGY_CATEGORY_BIN, island_id as f64);
            Strategy::new("buy and hold baseline", "hold()", metrics, 0, island_id, None)
        })
        .collect()
}

/// Synthetic generator: mutates the parent's hypothesis text.
struct DemoGenerator {
    rng: EvolveRng,
    counter: usize,
}

impl DemoGenerator {
    fn new(seed: u64) -> Self {
        Self {
            rng: EvolveRng::new(seed),
            counter: 0,
        }
    }
}

impl HypothesisGenerator for DemoGenerator {
    fn generate(&mut self, ctx: &GenerationContext<'_>) -> Result<StrategyDraft, BoundaryError> {
        self.counter += 1;
        let window = 5 + self.rng.index(60);
        Ok(StrategyDraft {
            hypothesis: format!(
                "{} refinement of '{}' with a {}-bar window",
                ctx.category, ctx.parent.hypothesis, window
            ),
            code: format!("signal = {}_rule(window={window}) # v{}", ctx.category, self.counter),
        })
    }
}

/// Synthetic evaluator: draws plausible backtest metrics from its RNG.
struct DemoEvaluator {
    rng: EvolveRng,
}

impl DemoEvaluator {
    fn new(seed: u64) -> Self {
        Self {
            rng: EvolveRng::new(seed),
        }
    }
}

impl StrategyEvaluator for DemoEvaluator {
    fn evaluate(&mut self, _code: &str) -> Result<StrategyMetrics, BoundaryError> {
        let mut metrics = StrategyMetrics::new();
        metrics.set(keys::SHARPE_RATIO, self.rng.normal(0.4, 0.6));
        metrics.set(keys::INFORMATION_RATIO, self.rng.normal(0.1, 0.3));
        metrics.set(keys::MAX_DRAWDOWN, -self.rng.uniform() * 40.0);
        metrics.set(keys::TOTAL_RETURN, self.rng.normal(8.0, 15.0));
        metrics.set(keys::NUM_TRADES, (self.rng.uniform() * 500.0).floor());
        metrics.set(keys::WIN_RATE, 0.3 + self.rng.uniform() * 0.4);
        metrics.set(keys::STRATEGY_CATEGORY_BIN, self.rng.index(16) as f64);
        Ok(metrics)
    }

    fn analyze(&mut self, draft: &StrategyDraft, metrics: &StrategyMetrics) -> StrategyAnalysis {
        let mut insights = Vec::new();
        if metrics.get(keys::SHARPE_RATIO) > 1.0 {
            insights.push(format!(
                "High Sharpe observed: consider tighter entry filters around '{}'",
                draft.hypothesis
            ));
        }
        StrategyAnalysis {
            insights,
            category_bin: None,
        }
    }
}
