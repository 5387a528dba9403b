use core::time::Duration;

use demand_optimizer::search::Bounds;
use demand_optimizer::swarm::{
    Budget, Coefficients, LocalSearchSeeding, Particle, RandomSeeding, Seed, Seeding, SwarmConfig,
    SwarmOptimizer,
};
use demand_optimizer::{CostModel, Result};

use crate::datasets;

fn run(model: &CostModel, config: SwarmConfig) -> demand_optimizer::swarm::SwarmReport {
    SwarmOptimizer::new(model, config).unwrap().run().unwrap()
}

#[test]
fn test_global_best_cost_non_increasing() {
    let model = CostModel::with_seed(datasets::noisy(30, 0.5, 1), 42);
    let config = SwarmConfig::builder()
        .swarm_size(20)
        .budget(Budget::Iterations(60))
        .build()
        .unwrap();
    let report = run(&model, config);

    assert_eq!(report.history.len(), 60);
    for (i, w) in report.history.windows(2).enumerate() {
        assert!(w[1] <= w[0], "pass {} raised the global best", i + 1);
    }
}

#[test]
fn test_swarm_beats_zero_weights_on_planted_data() {
    let model = CostModel::with_seed(datasets::planted(40, 2), 42);
    let zero_cost = model.evaluate_cost(&[0.0; 13]).unwrap();

    let config = SwarmConfig::builder()
        .swarm_size(30)
        .budget(Budget::Iterations(200))
        .build()
        .unwrap();
    let report = run(&model, config);

    assert!(
        report.best.cost < 0.5 * zero_cost,
        "swarm cost {} should be well below zero-weight cost {zero_cost}",
        report.best.cost
    );
}

#[test]
fn test_local_search_seeding_starts_from_improved_bests() {
    let model = CostModel::with_seed(datasets::noisy(30, 0.5, 3), 9);
    let config = SwarmConfig::builder()
        .swarm_size(8)
        .budget(Budget::Iterations(1))
        .seeding(LocalSearchSeeding::new())
        .build()
        .unwrap();
    let swarm = SwarmOptimizer::new(&model, config).unwrap();

    for particle in swarm.particles() {
        let start_cost = model.evaluate_cost(particle.position()).unwrap();
        assert!(particle.personal_best_cost() <= start_cost);
    }
}

#[test]
fn test_duration_budget_completes_at_least_one_pass() {
    let model = CostModel::with_seed(datasets::planted(10, 4), 1);
    let config = SwarmConfig::builder()
        .swarm_size(5)
        .budget(Budget::Duration(Duration::from_millis(20)))
        .build()
        .unwrap();
    let report = run(&model, config);

    assert!(!report.history.is_empty());
    assert_eq!(report.best.iterations, report.history.len());
    assert!(report.elapsed >= Duration::from_millis(20));
}

#[test]
fn test_repeated_runs_continue_from_current_state() {
    let model = CostModel::with_seed(datasets::noisy(20, 0.5, 5), 3);
    let config = SwarmConfig::builder()
        .swarm_size(10)
        .budget(Budget::Iterations(10))
        .build()
        .unwrap();
    let mut swarm = SwarmOptimizer::new(&model, config).unwrap();
    let first = swarm.run().unwrap();
    let second = swarm.run().unwrap();

    assert!(second.best.cost <= first.best.cost);
    assert!(second.history[0] <= first.history[9]);
}

#[test]
fn test_independent_coefficients_per_run() {
    let model = CostModel::with_seed(datasets::planted(10, 6), 4);
    let frozen = Coefficients {
        inertia: 0.0,
        cognitive: 0.0,
        social: 0.0,
    };
    let a = SwarmConfig::builder()
        .swarm_size(4)
        .budget(Budget::Iterations(3))
        .coefficients(frozen)
        .build()
        .unwrap();
    let b = SwarmConfig::builder()
        .swarm_size(4)
        .budget(Budget::Iterations(3))
        .build()
        .unwrap();

    let frozen_report = run(&model, a);
    let default_report = run(&model, b);
    assert_eq!(frozen_report.coefficients, frozen);
    assert_eq!(default_report.coefficients, Coefficients::default());
}

#[test]
fn test_frozen_particles_do_not_move() {
    let model = CostModel::with_seed(datasets::planted(10, 6), 4);
    let frozen = Coefficients {
        inertia: 0.0,
        cognitive: 0.0,
        social: 0.0,
    };
    let config = SwarmConfig::builder()
        .swarm_size(3)
        .budget(Budget::Iterations(5))
        .coefficients(frozen)
        .build()
        .unwrap();
    let mut swarm = SwarmOptimizer::new(&model, config).unwrap();
    let starts: Vec<Vec<f64>> = swarm
        .particles()
        .iter()
        .map(|p| p.position().to_vec())
        .collect();
    swarm.run().unwrap();

    for (particle, start) in swarm.particles().iter().zip(&starts) {
        assert_eq!(particle.position(), start.as_slice());
        assert!(particle.velocity().iter().all(|v| *v == 0.0));
    }
}

/// Seeds every particle at the origin with no initial momentum.
struct OriginSeeding;

impl Seeding for OriginSeeding {
    fn seed(&self, model: &CostModel, position: &[f64]) -> Result<Seed> {
        let origin = vec![0.0; 13];
        Ok(Seed {
            personal_best_cost: model.evaluate_cost(&origin)?,
            personal_best: origin,
            reference: position.to_vec(),
        })
    }

    fn name(&self) -> &'static str {
        "origin"
    }
}

#[test]
fn test_custom_seeding_strategy() {
    let model = CostModel::with_seed(datasets::planted(10, 7), 2);
    let config = SwarmConfig::builder()
        .swarm_size(4)
        .budget(Budget::Iterations(5))
        .seeding(OriginSeeding)
        .build()
        .unwrap();
    let swarm = SwarmOptimizer::new(&model, config).unwrap();
    for particle in swarm.particles() {
        assert_eq!(particle.personal_best(), &[0.0; 13]);
        assert!(particle.velocity().iter().all(|v| *v == 0.0));
    }

    let report = SwarmOptimizer::new(
        &model,
        SwarmConfig::builder()
            .swarm_size(4)
            .budget(Budget::Iterations(5))
            .seeding(OriginSeeding)
            .build()
            .unwrap(),
    )
    .unwrap()
    .run()
    .unwrap();
    assert_eq!(report.seeding, "origin");
}

#[test]
fn test_standalone_particle_tracks_personal_best() {
    let model = CostModel::with_seed(datasets::noisy(20, 0.5, 8), 8);
    let seeding = RandomSeeding::new().reference_bounds(Bounds::symmetric(0.5).unwrap());
    let mut particle = Particle::new(
        &model,
        model.generate_random_solution(Bounds::default()),
        &seeding,
        Coefficients::default(),
    )
    .unwrap();
    assert!(particle.velocity().iter().all(|v| v.abs() <= 0.5 + 0.5));

    let target = datasets::PLANTED_WEIGHTS.to_vec();
    let mut best = particle.personal_best_cost();
    for _ in 0..30 {
        particle.update(&model, &target).unwrap();
        assert!(particle.personal_best_cost() <= best);
        best = particle.personal_best_cost();
    }
}
