//! End-to-end colony runs.
//!
//! Covers capacity safety, all-or-nothing results, best-ever monotonicity,
//! pheromone positivity, seeded determinism, and the reference scenarios.

use antgrid_core::{ColonyConfig, ConfigError, ResultSelection};
use antgrid_placement::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn config(seed: u64) -> ColonyConfig {
    ColonyConfig::default()
        .with_iterations(30)
        .with_ants(12)
        .with_seed(seed)
}

fn random_model(seed: u64, nodes: usize, workloads: usize) -> ResourceModel {
    let mut rng = SmallRng::seed_from_u64(seed);
    let node_caps: Vec<(u64, u64)> = (0..nodes)
        .map(|_| (rng.gen_range(4..=16), rng.gen_range(4..=16)))
        .collect();
    let demands: Vec<(u64, u64)> = (0..workloads)
        .map(|_| (rng.gen_range(1..=6), rng.gen_range(1..=6)))
        .collect();
    ResourceModel::from_pairs(&node_caps, &demands)
}

/// Large nodes and small workloads: any agent places every workload.
fn roomy_model(seed: u64, nodes: usize, workloads: usize) -> ResourceModel {
    let mut rng = SmallRng::seed_from_u64(seed);
    let demands: Vec<(u64, u64)> = (0..workloads)
        .map(|_| (rng.gen_range(1..=4), rng.gen_range(1..=4)))
        .collect();
    ResourceModel::from_pairs(&vec![(40, 40); nodes], &demands)
}

#[test]
fn two_nodes_three_workloads_packs_onto_two() {
    let model = ResourceModel::from_pairs(&[(4, 4), (4, 4)], &[(2, 2), (2, 2), (2, 2)]);
    let report = solve(&model, &config(1)).unwrap();

    let solution = report.outcome.solution().expect("placement should exist");
    assert_eq!(solution.node_count, 2);
    assert!(solution.assignment.is_complete());

    let mut per_node = [0usize; 2];
    for node in solution.assignment.to_complete().unwrap() {
        per_node[node] += 1;
    }
    per_node.sort_unstable();
    assert_eq!(per_node, [1, 2]);
}

#[test]
fn oversized_workload_is_reported_infeasible() {
    let model = ResourceModel::from_pairs(&[(1, 1)], &[(2, 2)]);
    let report = solve(&model, &config(2)).unwrap();

    assert_eq!(report.outcome, ColonyOutcome::Infeasible);
    assert_eq!(report.iterations.len(), 30);
    assert!(report.iterations.iter().all(|it| it.feasible_ants == 0));
}

#[test]
fn zero_ants_or_iterations_is_a_config_error() {
    let model = ResourceModel::from_pairs(&[(4, 4)], &[(1, 1)]);

    let err = solve(&model, &config(3).with_ants(0)).unwrap_err();
    assert!(matches!(err, PlacementError::Config(ConfigError::ZeroAnts)));

    let err = solve(&model, &config(3).with_iterations(0)).unwrap_err();
    assert!(matches!(err, PlacementError::Config(ConfigError::ZeroIterations)));
}

#[test]
fn returned_assignments_respect_capacity() {
    for seed in 0..8 {
        let model = random_model(seed, 6, 14);
        let report = solve(&model, &config(seed)).unwrap();

        if let Some(solution) = report.outcome.solution() {
            assert!(solution.assignment.is_complete(), "seed {seed}: partial result");
            assert!(model.respects_capacity(&solution.assignment), "seed {seed}: overloaded node");
            assert_eq!(solution.node_count, solution.assignment.distinct_nodes());
        }
    }
}

#[test]
fn best_ever_count_never_increases() {
    let model = roomy_model(99, 8, 20);
    let report = solve(&model, &config(7).with_iterations(60)).unwrap();

    let counts: Vec<usize> = report
        .iterations
        .iter()
        .filter_map(|it| it.best_ever_node_count)
        .collect();
    assert!(!counts.is_empty());
    assert!(counts.windows(2).all(|w| w[1] <= w[0]), "best-ever went up: {counts:?}");

    let final_count = report.outcome.solution().unwrap().node_count;
    assert_eq!(Some(&final_count), counts.last());
}

#[test]
fn pheromones_stay_positive_after_a_run() {
    let model = random_model(5, 4, 10);
    let long_run = config(5).with_iterations(400).with_decay_ratio(0.05);
    let mut runner = ColonyRunner::new(&model, long_run).unwrap();
    runner.run(&mut SmallRng::seed_from_u64(5));

    let matrix = runner.pheromones();
    for workload in 0..matrix.workload_count() {
        assert!(matrix.row(workload).iter().all(|&v| v > 0.0));
        assert!(matrix.exploitation_threshold(workload) <= 12);
        assert!(matrix.preferred_node(workload) < matrix.node_count());
    }
}

#[test]
fn same_seed_same_result() {
    let model = random_model(21, 7, 16);
    let first = solve(&model, &config(1234)).unwrap();
    let second = solve(&model, &config(1234)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_and_sequential_agents_agree() {
    let model = random_model(33, 7, 16);
    let parallel = solve(&model, &config(77).with_parallel(true)).unwrap();
    let sequential = solve(&model, &config(77).with_parallel(false)).unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn supplied_random_source_drives_the_run() {
    let model = random_model(40, 5, 12);
    let mut a = ColonyRunner::new(&model, config(0)).unwrap();
    let mut b = ColonyRunner::new(&model, config(0)).unwrap();

    let ra = a.run(&mut SmallRng::seed_from_u64(8));
    let rb = b.run(&mut SmallRng::seed_from_u64(8));
    assert_eq!(ra, rb);
}

#[test]
fn final_iteration_policy_never_beats_best_ever() {
    let model = roomy_model(61, 6, 15);
    let best = solve(&model, &config(9)).unwrap();
    let last = solve(&model, &config(9).with_selection(ResultSelection::FinalIteration)).unwrap();

    let best_count = best.outcome.solution().unwrap().node_count;
    let last_count = last.outcome.solution().unwrap().node_count;
    assert!(best_count <= last_count);
    assert_eq!(last.outcome.solution().unwrap().iteration, 30);
}

#[test]
fn single_fitting_node_absorbs_everything() {
    let model = ResourceModel::from_pairs(&[(1, 1), (10, 10), (1, 1)], &[(2, 2); 5]);
    let report = solve(&model, &config(4)).unwrap();

    let solution = report.outcome.solution().unwrap();
    assert_eq!(solution.node_count, 1);
    assert_eq!(solution.assignment.to_complete().unwrap(), vec![1; 5]);
}

#[test]
fn time_budget_stops_between_iterations() {
    let model = random_model(2, 5, 10);
    let budgeted = config(2).with_iterations(1_000_000).with_max_duration_ms(0);
    let report = solve(&model, &budgeted).unwrap();

    assert!(report.stopped_early);
    assert_eq!(report.iterations.len(), 1);
}

#[test]
fn maximum_iteration_count_is_bounded_by_time_budget() {
    let model = ResourceModel::from_pairs(&[(4, 4)], &[(1, 1)]);
    let budgeted = ColonyConfig::default()
        .with_iterations(u32::MAX)
        .with_ants(1)
        .with_seed(1)
        .with_max_duration_ms(0);
    let report = solve(&model, &budgeted).unwrap();

    assert!(report.stopped_early);
    assert_eq!(report.iterations.len(), 1);
    assert_eq!(report.outcome.solution().unwrap().node_count, 1);
}

#[test]
fn pheromone_feedback_improves_on_first_iteration() {
    // Ten identical nodes that could each hold every workload. Slow decay keeps
    // the second agent exploring while the elite trail is carried forward.
    let model = ResourceModel::from_pairs(&[(10, 10); 10], &[(1, 1); 10]);

    for seed in 0..8 {
        let slow = ColonyConfig::default()
            .with_iterations(200)
            .with_ants(2)
            .with_decay_ratio(0.999)
            .with_raise_ratio(1.001)
            .with_seed(seed);
        let report = solve(&model, &slow).unwrap();

        let first = report.iterations[0].best_node_count.unwrap();
        let last = report.iterations.last().unwrap().best_ever_node_count.unwrap();
        assert!(last < first, "seed {seed}: {first} nodes at start, {last} at end");
        assert_eq!(report.outcome.solution().unwrap().node_count, last);
    }
}

#[test]
fn report_serializes_to_json() {
    let model = ResourceModel::from_pairs(&[(4, 4), (4, 4)], &[(2, 2), (2, 2), (2, 2)]);
    let report = solve(&model, &config(1).with_iterations(3)).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"]["status"], "feasible");
    assert_eq!(json["outcome"]["node_count"], 2);
    assert_eq!(json["iterations"].as_array().unwrap().len(), 3);
}
