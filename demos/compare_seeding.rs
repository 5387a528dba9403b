//! Seeding comparison — random search vs. plain PSO vs. local-search-seeded PSO.
//!
//! Loads a headerless CSV of `demand,m1,...,m13` rows (or generates a small
//! synthetic dataset when no path is given) and runs each optimizer several
//! times, printing the mean and standard deviation of the best costs.
//!
//! Run with: `cargo run --example compare_seeding -- data/train.csv`

use std::time::Instant;

use demand_optimizer::prelude::*;

const RUNS: usize = 10;

fn synthetic() -> Dataset {
    let weights = [0.8, -0.3, 0.5, 0.1, 0.0, 0.25, -0.6, 0.4, 0.05, 0.9, -0.15, 0.3, 0.2];
    let mut rng = fastrand::Rng::with_seed(1);
    let records = (0..100)
        .map(|_| {
            let mut fields = [0.0; RECORD_LEN];
            for m in &mut fields[1..] {
                *m = rng.f64() * 10.0;
            }
            let demand: f64 = weights.iter().zip(&fields[1..]).map(|(w, m)| w * m).sum();
            fields[0] = demand + (rng.f64() - 0.5);
            DataRecord::new(fields)
        })
        .collect();
    Dataset::from_records(records).expect("synthetic dataset is non-empty")
}

#[allow(clippy::cast_precision_loss)]
fn summarize(label: &str, costs: &[f64], elapsed: f64) {
    let n = costs.len() as f64;
    let mean = costs.iter().sum::<f64>() / n;
    let var = costs.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / (n - 1.0);
    println!(
        "  {label:<28} mean = {mean:>9.4}  sd = {:>8.4}  time = {elapsed:.2}s",
        var.sqrt()
    );
}

fn main() -> Result<()> {
    let dataset = match std::env::args().nth(1) {
        Some(path) => Dataset::from_path(path)?,
        None => synthetic(),
    };
    println!("Comparing optimizers on {} days ({RUNS} runs each)", dataset.len());
    let model = CostModel::new(dataset);

    let start = Instant::now();
    let costs = (0..RUNS)
        .map(|_| {
            RandomSearch::new(&model)
                .search(3_000, Bounds::default())
                .map(|r| r.cost)
        })
        .collect::<Result<Vec<_>>>()?;
    summarize("random search", &costs, start.elapsed().as_secs_f64());

    for (label, size, seeding) in [
        ("pso, random seeding", 60, None),
        ("pso, local-search seeding", 30, Some(LocalSearchSeeding::new())),
    ] {
        let start = Instant::now();
        let mut costs = Vec::with_capacity(RUNS);
        for _ in 0..RUNS {
            let builder = SwarmConfig::builder()
                .swarm_size(size)
                .budget(Budget::Iterations(100));
            let config = match seeding {
                Some(s) => builder.seeding(s),
                None => builder,
            }
            .build()?;
            costs.push(SwarmOptimizer::new(&model, config)?.run()?.best.cost);
        }
        summarize(label, &costs, start.elapsed().as_secs_f64());
    }

    Ok(())
}
