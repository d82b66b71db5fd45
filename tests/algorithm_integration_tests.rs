//! Integration tests for the restart driver.

use itertools::Itertools;
use tsp_hill_climbing::config::Config;
use tsp_hill_climbing::distance::Precision;
use tsp_hill_climbing::error::Error;
use tsp_hill_climbing::local_search::SearchPolicy;
use tsp_hill_climbing::problem::{City, Problem};
use tsp_hill_climbing::tour::total_length;
use tsp_hill_climbing::TspSearch;

/// Creates a moderate size problem: a grid of cities around the equator.
fn create_moderate_problem() -> Problem {
    let mut cities = Vec::new();
    for i in 0..3 {
        for j in 0..4 {
            let lon = 10.0 + i as f64 * 2.5;
            let lat = -3.0 + j as f64 * 2.0;
            cities.push(City::new(format!("C{}{}", i, j), lon, lat));
        }
    }
    Problem::new("ModerateTestProblem", cities, Precision::Exact).unwrap()
}

/// Four cities on the corners of a one-degree square.
fn create_square_problem() -> Problem {
    let cities = vec![
        City::new("SW", 0.0, 0.0),
        City::new("NE", 1.0, 1.0),
        City::new("SE", 1.0, 0.0),
        City::new("NW", 0.0, 1.0),
    ];
    Problem::new("Square", cities, Precision::Exact).unwrap()
}

/// Shortest tour by enumerating every order that starts at city 0.
fn brute_force_optimum(problem: &Problem) -> f64 {
    let n = problem.city_count();
    (1..n)
        .permutations(n - 1)
        .map(|rest| {
            let mut order = vec![0];
            order.extend(rest);
            total_length(&order, &problem.distances)
        })
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn test_rejects_degenerate_instance() {
    let single = Problem::new("Single", vec![City::new("Home", 0.0, 0.0)], Precision::Exact).unwrap();

    match TspSearch::new(single, Config::new()) {
        Err(Error::DegenerateInstance { cities }) => assert_eq!(cities, 1),
        Err(other) => panic!("expected DegenerateInstance, got {:?}", other),
        Ok(_) => panic!("expected DegenerateInstance"),
    }

    let empty = Problem::new("Empty", Vec::new(), Precision::Exact).unwrap();
    assert!(matches!(
        TspSearch::new(empty, Config::new()),
        Err(Error::DegenerateInstance { cities: 0 })
    ));
}

#[test]
fn test_rejects_zero_iterations_or_rounds() {
    let problem = create_moderate_problem();

    assert!(matches!(
        TspSearch::new(problem.clone(), Config::new().with_iterations(0)),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        TspSearch::new(problem, Config::new().with_rounds(0)),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_two_city_instance_runs() {
    let cities = vec![City::new("A", 0.0, 0.0), City::new("B", 3.0, 4.0)];
    let problem = Problem::new("Pair", cities, Precision::Exact).unwrap();
    let expected = 2.0 * problem.distances.get(0, 1);

    let config = Config::new().with_iterations(5).with_rounds(2).with_seed(1);
    let mut search = TspSearch::new(problem, config).unwrap();
    let run = search.run().unwrap();

    assert!((run.best_length() - expected).abs() < 1e-9);
}

#[test]
fn test_square_finds_brute_force_optimum() {
    let problem = create_square_problem();
    let optimum = brute_force_optimum(&problem);

    let config = Config::new()
        .with_iterations(50)
        .with_rounds(3)
        .with_policy(SearchPolicy::ExhaustiveBest)
        .with_seed(2024);
    let mut search = TspSearch::new(problem, config).unwrap();
    let run = search.run().unwrap();

    assert!((run.best_length() - optimum).abs() < 1e-9);
    assert!(run.best.validate(4).is_ok());
}

#[test]
fn test_trace_records_every_iteration() {
    let problem = create_moderate_problem();
    let config = Config::new()
        .with_iterations(40)
        .with_rounds(3)
        .with_policy(SearchPolicy::FirstImprovement)
        .with_seed(7);

    let mut search = TspSearch::new(problem, config).unwrap();
    let run = search.run().unwrap();

    assert_eq!(run.rounds.len(), 3);
    for (r, round) in run.rounds.iter().enumerate() {
        assert_eq!(round.round, r);
        assert_eq!(round.trace.len(), 40);

        let iterations: Vec<usize> = round.trace.points().iter().map(|p| p.iteration).collect();
        let expected: Vec<usize> = (r * 40..(r + 1) * 40).collect();
        assert_eq!(iterations, expected);

        // The running best never goes up and ends at the round's best.
        assert!(round.trace.is_non_increasing());
        assert_eq!(round.trace.final_length(), Some(round.best_length()));
    }
}

#[test]
fn test_all_time_best_is_best_round() {
    let problem = create_moderate_problem();
    let config = Config::new()
        .with_iterations(30)
        .with_rounds(4)
        .with_policy(SearchPolicy::RandomizedSample { sample_size: 20 })
        .with_seed(99);

    let mut search = TspSearch::new(problem, config).unwrap();
    let run = search.run().unwrap();

    let best_round = run
        .rounds
        .iter()
        .map(|r| r.best_length())
        .fold(f64::INFINITY, f64::min);
    assert_eq!(run.best_length(), best_round);

    // The reported tour is the one from the first round reaching that length;
    // later rounds that only tie do not replace it.
    let first = run
        .rounds
        .iter()
        .position(|r| r.best_length() == run.best_length())
        .unwrap();
    assert_eq!(run.best, run.rounds[first].best);
    assert!(run.rounds[..first]
        .iter()
        .all(|r| r.best_length() > run.best_length()));

    // The reported tour really has the reported length.
    let n = search.problem.city_count();
    assert!(run.best.validate(n).is_ok());
    assert!(
        (total_length(run.best.order(), &search.problem.distances) - run.best_length()).abs()
            < 1e-9
    );
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let problem = create_moderate_problem();
    let config = Config::new().with_iterations(20).with_rounds(2).with_seed(5);

    let run1 = TspSearch::new(problem.clone(), config.clone())
        .unwrap()
        .run()
        .unwrap();
    let run2 = TspSearch::new(problem, config).unwrap().run().unwrap();

    assert_eq!(run1.best, run2.best);
    for (a, b) in run1.rounds.iter().zip(&run2.rounds) {
        assert_eq!(a.trace.points(), b.trace.points());
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let problem = create_moderate_problem();
    let config = Config::new()
        .with_iterations(25)
        .with_rounds(2)
        .with_policy(SearchPolicy::ExhaustiveBest)
        .with_seed(13);

    let sequential = TspSearch::new(problem.clone(), config.clone())
        .unwrap()
        .run()
        .unwrap();
    let parallel = TspSearch::new(problem, config.with_parallel(true))
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(sequential.best, parallel.best);
    for (a, b) in sequential.rounds.iter().zip(&parallel.rounds) {
        assert_eq!(a.best, b.best);
        assert_eq!(a.trace.points(), b.trace.points());
    }
}

#[test]
fn test_visiting_order_maps_indices_to_cities() {
    let problem = create_square_problem();
    let config = Config::new().with_iterations(10).with_rounds(1).with_seed(3);
    let mut search = TspSearch::new(problem, config).unwrap();
    let run = search.run().unwrap();

    let cities = run.visiting_order(&search.problem);
    assert_eq!(cities.len(), 4);
    for (city, &index) in cities.iter().zip(run.best.order()) {
        assert_eq!(*city, &search.problem.cities[index]);
    }
}

#[test]
fn test_truncated_precision_gives_whole_kilometer_lengths() {
    let cities = create_moderate_problem().cities;
    let problem = Problem::new("Truncated", cities, Precision::TruncatedKm).unwrap();
    let config = Config::new()
        .with_iterations(10)
        .with_rounds(1)
        .with_seed(8)
        .with_precision(Precision::TruncatedKm);

    let run = TspSearch::new(problem, config).unwrap().run().unwrap();
    assert_eq!(run.best_length().fract(), 0.0);
}

#[test]
fn test_rejects_precision_mismatch() {
    let exact = create_moderate_problem();
    let truncated_config = Config::new().with_precision(Precision::TruncatedKm);
    assert!(matches!(
        TspSearch::new(exact, truncated_config),
        Err(Error::InvalidConfig(_))
    ));

    let cities = create_moderate_problem().cities;
    let truncated = Problem::new("Truncated", cities, Precision::TruncatedKm).unwrap();
    assert!(matches!(
        TspSearch::new(truncated, Config::new()),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_parallel_breaks_ties_like_sequential() {
    // Many restarts on the square land on equally short tours, so the
    // earliest restart has to win in both modes.
    let problem = create_square_problem();
    let config = Config::new()
        .with_iterations(200)
        .with_rounds(2)
        .with_policy(SearchPolicy::FirstImprovement)
        .with_seed(31);

    let sequential = TspSearch::new(problem.clone(), config.clone())
        .unwrap()
        .run()
        .unwrap();
    let parallel = TspSearch::new(problem, config.with_parallel(true))
        .unwrap()
        .run()
        .unwrap();

    for (a, b) in sequential.rounds.iter().zip(&parallel.rounds) {
        assert_eq!(a.best, b.best);
        assert_eq!(a.trace.points(), b.trace.points());
        assert_eq!(a.trace.len(), 200);
    }
    assert_eq!(sequential.best, parallel.best);
}
