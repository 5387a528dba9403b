use core::time::Duration;

use demand_optimizer::search::{Bounds, RandomSearch};
use demand_optimizer::{CostModel, Error};

use crate::datasets;

#[test]
fn test_random_search_rejects_zero_iterations() {
    let model = CostModel::with_seed(datasets::planted(20, 1), 42);
    let err = RandomSearch::new(&model)
        .search(0, Bounds::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidIterationCount));
}

#[test]
fn test_more_iterations_never_hurt_on_same_stream() {
    // The first 10 draws of a 200-draw search are the 10-draw search.
    let short = {
        let model = CostModel::with_seed(datasets::noisy(30, 0.5, 2), 7);
        RandomSearch::new(&model)
            .search(10, Bounds::default())
            .unwrap()
    };
    let long = {
        let model = CostModel::with_seed(datasets::noisy(30, 0.5, 2), 7);
        RandomSearch::new(&model)
            .search(200, Bounds::default())
            .unwrap()
    };
    assert!(long.cost <= short.cost);
}

#[test]
fn test_random_search_best_cost_is_consistent() {
    let model = CostModel::with_seed(datasets::noisy(50, 1.0, 3), 11);
    let best = RandomSearch::new(&model)
        .search(500, Bounds::symmetric(2.0).unwrap())
        .unwrap();

    assert_eq!(best.solution.len(), 13);
    assert!(best.solution.iter().all(|w| (-2.0..=2.0).contains(w)));
    let recomputed = model.evaluate_cost(&best.solution).unwrap();
    assert!((best.cost - recomputed).abs() < 1e-9);
}

#[test]
fn test_timed_random_search_runs_until_deadline() {
    let model = CostModel::with_seed(datasets::planted(10, 4), 5);
    let limit = Duration::from_millis(30);
    let start = std::time::Instant::now();
    let best = RandomSearch::new(&model)
        .search_for_duration(limit, Bounds::default())
        .unwrap();

    assert!(start.elapsed() >= limit);
    assert!(best.iterations > 1, "expected many draws in 30ms");
    let (cost, solution) = best.into_parts();
    assert_eq!(solution.len(), 13);
    assert!(cost.is_finite());
}
