//! # TSP hill climbing
//!
//! Swap-based local search for the traveling salesman problem over
//! geographic cities.
//!
//! Distances come from the haversine formula and are precomputed once into a
//! dense table. Each search attempt shuffles a random tour and improves it by
//! exchanging two cities, using one of three neighbor selection policies:
//! exhaustive best (steepest ascent), first improvement, or a randomized
//! sample of swaps. A round repeats that attempt many times from fresh random
//! starts, and a run keeps the best tour over several rounds.

pub mod config;
pub mod distance;
pub mod error;
pub mod local_search;
pub mod problem;
pub mod prompt;
pub mod solution;
pub mod tour;
pub mod utils;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::problem::{City, Problem};
pub use crate::tour::Tour;

use crate::solution::{RoundResult, RunResult, SearchTrace};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Instant;

/// The restart driver: runs rounds of independent random-start searches and
/// keeps the best tour seen.
pub struct TspSearch {
    pub problem: Problem,
    pub config: Config,
    rng: ChaCha8Rng,
}

impl TspSearch {
    /// Create a search for the given problem and configuration.
    ///
    /// Fails before any work is done if the instance has fewer than two cities,
    /// the configuration asks for zero iterations or rounds, or the problem's
    /// distance table was built with a different precision than the
    /// configuration names.
    pub fn new(problem: Problem, config: Config) -> Result<Self> {
        config.validate()?;

        let table_precision = problem.distances.precision();
        if table_precision != config.precision {
            return Err(Error::invalid_config(format!(
                "distance table uses {:?} precision but the configuration asks for {:?}",
                table_precision, config.precision
            )));
        }

        let cities = problem.city_count();
        if cities < 2 {
            return Err(Error::DegenerateInstance { cities });
        }

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        log::debug!(
            "search over {} cities: {} rounds x {} iterations, {:?}",
            cities,
            config.rounds,
            config.iterations,
            config.policy
        );

        Ok(TspSearch {
            problem,
            config,
            rng,
        })
    }

    /// Run every round and return the best tour across all of them.
    pub fn run(&mut self) -> Result<RunResult> {
        let start_time = Instant::now();
        let mut rounds = Vec::with_capacity(self.config.rounds);
        let mut best: Option<Tour> = None;

        for r in 0..self.config.rounds {
            let round = self.run_round(r)?;

            // Track the absolute best across rounds
            if best
                .as_ref()
                .map_or(true, |b| round.best_length() < b.length())
            {
                best = Some(round.best.clone());
            }

            rounds.push(round);
        }

        let run_time = start_time.elapsed();
        let best = best.ok_or_else(|| Error::invalid_config("no rounds were run"))?;
        log::info!(
            "Shortest path found: {} km (run time {:.3} sec)",
            best.length(),
            run_time.as_secs_f64()
        );

        Ok(RunResult {
            best,
            rounds,
            run_time,
        })
    }

    /// Run a single round of `config.iterations` restarts.
    pub fn run_round(&mut self, round: usize) -> Result<RoundResult> {
        let start_time = Instant::now();
        let iterations = self.config.iterations;

        // Each restart owns a sub-seed so seeded runs match between sequential
        // and pooled execution.
        let seeds: Vec<u64> = (0..iterations).map(|_| self.rng.gen()).collect();
        let outcome = if self.config.parallel {
            seeds
                .par_iter()
                .enumerate()
                .fold(RoundOutcome::default, |acc, (i, &seed)| {
                    acc.record(i, self.search_once(seed))
                })
                .reduce(RoundOutcome::default, RoundOutcome::merge)
        } else {
            seeds
                .iter()
                .enumerate()
                .fold(RoundOutcome::default(), |acc, (i, &seed)| {
                    acc.record(i, self.search_once(seed))
                })
        };

        let RoundOutcome { mut lengths, best } = outcome;
        lengths.sort_unstable_by_key(|&(i, _)| i);

        let mut trace = SearchTrace::with_capacity(iterations);
        let mut running = f64::INFINITY;
        for (i, length) in lengths {
            if length < running {
                log::trace!("round {} iteration {}: {} km", round, i, length);
                running = length;
            }
            trace.push(round * iterations + i, running);
        }

        let (_, best) =
            best.ok_or_else(|| Error::invalid_config("iterations must be a positive integer"))?;
        let duration = start_time.elapsed();
        log::info!(
            "Best distance in round {}: {} km\t Time taken: {:.3} sec",
            round,
            best.length(),
            duration.as_secs_f64()
        );

        Ok(RoundResult {
            round,
            best,
            trace,
            duration,
        })
    }

    /// One restart: a fresh random tour improved once by the configured policy.
    fn search_once(&self, seed: u64) -> Tour {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let table = &self.problem.distances;
        let start = Tour::random(self.problem.city_count(), table, &mut rng);
        self.config.policy.search(&start, table, &mut rng)
    }
}

/// Per-round reduction state: every restart's length, plus the single best
/// tour with the index of the restart that produced it.
#[derive(Default)]
struct RoundOutcome {
    lengths: Vec<(usize, f64)>,
    best: Option<(usize, Tour)>,
}

impl RoundOutcome {
    fn record(mut self, index: usize, tour: Tour) -> Self {
        self.lengths.push((index, tour.length()));
        if is_better(index, &tour, self.best.as_ref()) {
            self.best = Some((index, tour));
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.lengths.extend(other.lengths);
        if let Some((index, tour)) = other.best {
            if is_better(index, &tour, self.best.as_ref()) {
                self.best = Some((index, tour));
            }
        }
        self
    }
}

/// Shorter wins; on equal length the earlier restart wins.
fn is_better(index: usize, tour: &Tour, current: Option<&(usize, Tour)>) -> bool {
    match current {
        None => true,
        Some((best_index, best)) => {
            tour.length() < best.length() || (tour.length() == best.length() && index < *best_index)
        }
    }
}
