use demand_optimizer::search::{Bounds, NeighbourhoodSearch};
use demand_optimizer::{CostModel, Dataset, Error};

use crate::datasets;

#[test]
fn test_find_neighbours_perturbs_one_index_each() {
    let model = CostModel::with_seed(datasets::planted(10, 1), 3);
    let start = model.generate_random_solution(Bounds::default());

    let neighbours = NeighbourhoodSearch::new(&model)
        .find_neighbours(&start)
        .unwrap();
    assert_eq!(neighbours.len(), 13);
    for (i, neighbour) in neighbours.iter().enumerate() {
        let changed: Vec<usize> = (0..13).filter(|&j| neighbour[j] != start[j]).collect();
        assert!(
            changed.is_empty() || changed == vec![i],
            "neighbour {i} changed indices {changed:?}"
        );
    }
}

#[test]
fn test_find_neighbours_spread_matches_std_dev() {
    let model = CostModel::with_seed(datasets::planted(5, 1), 8);
    let search = NeighbourhoodSearch::new(&model);
    let start = vec![0.0; 13];

    let mut sum_sq = 0.0;
    let mut n = 0_u32;
    for _ in 0..500 {
        for (i, neighbour) in search.find_neighbours(&start).unwrap().iter().enumerate() {
            sum_sq += neighbour[i] * neighbour[i];
            n += 1;
        }
    }
    let std_dev = (sum_sq / f64::from(n)).sqrt();
    assert!((std_dev - 2.0).abs() < 0.1, "std dev {std_dev} should be near 2");
}

#[test]
fn test_custom_std_dev_is_used() {
    let model = CostModel::with_seed(datasets::planted(5, 1), 8);
    let search = NeighbourhoodSearch::new(&model).std_dev(0.0).unwrap();
    let start = vec![0.25; 13];
    for neighbour in search.find_neighbours(&start).unwrap() {
        assert_eq!(neighbour, start);
    }
}

#[test]
fn test_std_dev_rejects_negative_and_non_finite() {
    let model = CostModel::with_seed(datasets::planted(5, 1), 8);
    for bad in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = NeighbourhoodSearch::new(&model).std_dev(bad).err();
        assert!(
            matches!(err, Some(Error::InvalidStdDev(_))),
            "std dev {bad} should be rejected"
        );
    }
    assert!(NeighbourhoodSearch::new(&model).std_dev(0.5).is_ok());
}

#[test]
fn test_local_search_improves_on_planted_data() {
    let model = CostModel::with_seed(datasets::planted(40, 5), 21);
    let start = vec![0.0; 13];
    let start_cost = model.evaluate_cost(&start).unwrap();

    let best = NeighbourhoodSearch::new(&model)
        .local_search(&start, 100)
        .unwrap();
    assert!(best.cost < start_cost);
    assert_eq!(best.iterations, 100);
}

#[test]
fn test_local_search_never_regresses_across_seeds() {
    for seed in 0..25 {
        let model = CostModel::with_seed(datasets::noisy(20, 0.5, seed), seed);
        let start = model.generate_random_solution(Bounds::default());
        let start_cost = model.evaluate_cost(&start).unwrap();
        let best = NeighbourhoodSearch::new(&model)
            .local_search(&start, 5)
            .unwrap();
        assert!(best.cost <= start_cost, "seed {seed}");
    }
}

#[test]
fn test_local_search_holds_analytic_optimum() {
    let dataset: Dataset = "10,1,1,1,1,1,1,1,1,1,1,1,1,1".parse().unwrap();
    let optimum = vec![10.0 / 13.0; 13];
    for seed in 0..20 {
        let model = CostModel::with_seed(dataset.clone(), seed);
        let best = NeighbourhoodSearch::new(&model)
            .local_search(&optimum, 5)
            .unwrap();
        assert_eq!(best.solution, optimum, "seed {seed} left the optimum");
    }
}

#[test]
fn test_local_search_rejects_wrong_length() {
    let model = CostModel::with_seed(datasets::planted(5, 1), 1);
    let err = NeighbourhoodSearch::new(&model)
        .local_search(&[0.0; 3], 5)
        .unwrap_err();
    assert!(matches!(err, Error::Dimension { expected: 13, got: 3 }));
}
